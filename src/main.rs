use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use jucegen::config::{self, Defaults};
use jucegen::generator::{Outcome, ProjectGenerator};
use jucegen::pathcheck::PortablePathError;
use jucegen::prompt::{self, Cancelled, Prompter};
use jucegen::templates::TemplateLoader;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Interactive JUCE audio-plugin project generator", long_about = None)]
struct Cli {
    /// Template directory (default: templates/ next to the executable)
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Defaults file (default: jucegen.toml next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(Outcome::Generated) => {
            prompt::wait_for_enter();
        }
        Ok(Outcome::Declined) => {}
        Err(err) => {
            if err.is::<Cancelled>() {
                println!("\n{}\n", "❌ Operation cancelled by user".red());
            } else if err.is::<PortablePathError>() {
                // The path report is already fully formatted.
                println!("{err}");
            } else {
                println!("\n{}\n", format!("❌ Error: {err:#}").red());
            }
            prompt::wait_for_enter();
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let base = tool_dir();
    let templates_dir = cli.templates.unwrap_or_else(|| base.join("templates"));
    let config_path = cli
        .config
        .unwrap_or_else(|| base.join(config::CONFIG_FILE_NAME));

    let loader = TemplateLoader::new(templates_dir)?;
    let loaded = config::load_user_config(&config_path);
    let defaults = Defaults::resolve(&loaded.config)?;

    let stdin = io::stdin();
    let mut generator = ProjectGenerator::new(
        loader,
        defaults,
        Prompter::new(stdin.lock()),
        loaded.warning,
    );
    generator.run()
}

/// Directory the template set and defaults file live in: next to the binary
/// when the executable path resolves, the current directory otherwise.
fn tool_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .filter(|dir| dir.join("templates").is_dir())
        .unwrap_or_else(|| PathBuf::from("."))
}
