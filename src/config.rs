//! The optional defaults file and its per-run resolution.
//!
//! `jucegen.toml` supplies per-user defaults: manufacturer identity, install
//! paths, project destination. Every recognized field is a declared
//! `Option`; a missing or broken file never stops the tool. The one fatal
//! path: a configured filesystem path that violates the portable-path rule
//! is rejected before the first prompt, so a project is never generated into
//! a location the Windows toolchain cannot build from.
//!
//! Resolution happens once at startup; the resulting [`Defaults`] value is
//! passed into the generator. No ambient global.

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use serde::Deserialize;

use crate::pathcheck;
use crate::validate;

pub const CONFIG_FILE_NAME: &str = "jucegen.toml";

const DEFAULT_MANUFACTURER_NAME: &str = "My Company";
const DEFAULT_MANUFACTURER_CODE: &str = "Myco";
const DEFAULT_PLUGIN_CODE: &str = "Mypl";
const DEFAULT_VST3_FOLDER: &str = "C:/Users/YourName/VST3";

/// The defaults file as written by the user. Absent fields stay `None`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub default_project_destination: Option<String>,
    pub default_manufacturer_name: Option<String>,
    pub default_manufacturer_code: Option<String>,
    pub default_plugin_code: Option<String>,
    pub custom_vst3_folder_windows: Option<String>,
    pub juce_dir_macos: Option<String>,
    pub juce_dir_windows: Option<String>,
    pub juce_dir_linux: Option<String>,
}

/// Outcome of reading the defaults file: the parsed config (or built-in
/// defaults) plus a warning to show under the header when the file was
/// present but unusable.
pub struct LoadedConfig {
    pub config: UserConfig,
    pub warning: Option<String>,
}

pub fn load_user_config(path: &Path) -> LoadedConfig {
    if !path.exists() {
        return LoadedConfig {
            config: UserConfig::default(),
            warning: None,
        };
    }
    let parsed: Result<UserConfig> = (|| {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    })();
    match parsed {
        Ok(config) => LoadedConfig {
            config,
            warning: None,
        },
        Err(err) => LoadedConfig {
            config: UserConfig::default(),
            warning: Some(format!("Could not load {}: {err}", path.display())),
        },
    }
}

/// Per-run defaults, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Defaults {
    pub destination: String,
    pub manufacturer_name: String,
    pub manufacturer_code: String,
    pub plugin_code: String,
    pub vst3_folder_windows: String,
    pub juce_dir: Option<String>,
}

impl Defaults {
    pub fn resolve(config: &UserConfig) -> Result<Self> {
        Self::resolve_for_os(config, std::env::consts::OS)
    }

    /// OS-parameterized resolution so tests can pin the platform.
    pub fn resolve_for_os(config: &UserConfig, os: &str) -> Result<Self> {
        Ok(Self {
            destination: resolve_destination(config)?,
            manufacturer_name: resolve_manufacturer_name(config),
            manufacturer_code: resolve_manufacturer_code(config),
            plugin_code: resolve_plugin_code(config),
            vst3_folder_windows: resolve_vst3_folder(config)?,
            juce_dir: resolve_juce_dir(config, os),
        })
    }
}

fn resolve_destination(config: &UserConfig) -> Result<String> {
    if let Some(destination) = &config.default_project_destination {
        // "Default"/"default" is the sentinel for "use the system default".
        if !destination.is_empty() && destination != "Default" && destination != "default" {
            let expanded = shellexpand::tilde(destination).into_owned();
            pathcheck::ensure_portable_path(
                &expanded,
                "default_project_destination",
                CONFIG_FILE_NAME,
            )?;
            return Ok(expanded);
        }
    }
    Ok(desktop_fallback())
}

fn desktop_fallback() -> String {
    dirs::desktop_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Desktop")
        })
        .to_string_lossy()
        .into_owned()
}

fn resolve_manufacturer_name(config: &UserConfig) -> String {
    match &config.default_manufacturer_name {
        Some(name) if !name.is_empty() => name.clone(),
        _ => DEFAULT_MANUFACTURER_NAME.to_string(),
    }
}

fn resolve_manufacturer_code(config: &UserConfig) -> String {
    if let Some(code) = config.default_manufacturer_code.as_deref() {
        if !code.is_empty() {
            if validate::is_valid_manufacturer_code(code) {
                return code.to_string();
            }
            println!(
                "{}",
                format!(
                    "⚠️  Warning: default_manufacturer_code in {CONFIG_FILE_NAME} is invalid \
                     (must be 4 alphabetic chars). Using default."
                )
                .yellow()
            );
        }
    }
    DEFAULT_MANUFACTURER_CODE.to_string()
}

fn resolve_plugin_code(config: &UserConfig) -> String {
    if let Some(code) = config.default_plugin_code.as_deref() {
        if !code.is_empty() {
            if validate::is_valid_plugin_code(code) {
                return code.to_string();
            }
            println!(
                "{}",
                format!(
                    "⚠️  Warning: default_plugin_code in {CONFIG_FILE_NAME} is invalid \
                     (must be 4 alphanumeric chars). Using default."
                )
                .yellow()
            );
        }
    }
    DEFAULT_PLUGIN_CODE.to_string()
}

fn resolve_vst3_folder(config: &UserConfig) -> Result<String> {
    if let Some(folder) = config.custom_vst3_folder_windows.as_deref() {
        if !folder.is_empty() {
            let expanded = shellexpand::tilde(folder).into_owned();
            pathcheck::ensure_portable_path(&expanded, "custom_vst3_folder_windows", CONFIG_FILE_NAME)?;
            return Ok(forward_slashes(&expanded));
        }
    }
    Ok(DEFAULT_VST3_FOLDER.to_string())
}

fn resolve_juce_dir(config: &UserConfig, os: &str) -> Option<String> {
    let configured = match os {
        "macos" => config.juce_dir_macos.as_deref(),
        "windows" => config.juce_dir_windows.as_deref(),
        "linux" => config.juce_dir_linux.as_deref(),
        _ => None,
    }?;
    if configured.is_empty() {
        return None;
    }
    let normalized = forward_slashes(&shellexpand::tilde(configured));
    if !Path::new(&normalized).exists() {
        println!(
            "{}",
            format!(
                "⚠️  Warning: JUCE directory '{normalized}' does not exist. Project generation \
                 will continue, but CMake configuration may fail."
            )
            .yellow()
        );
    }
    Some(normalized)
}

fn forward_slashes(path: &str) -> String {
    path.replace('\\', "/")
}
