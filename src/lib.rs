pub mod config;
pub mod descriptor;
pub mod generator;
pub mod pathcheck;
pub mod platform;
pub mod prompt;
pub mod templates;
pub mod validate;

// Re-export commonly used types
pub use config::{Defaults, UserConfig};
pub use descriptor::ProjectDescriptor;
pub use generator::{Outcome, ProjectGenerator};
pub use templates::TemplateLoader;
