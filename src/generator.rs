//! The interactive wizard and the project emission sequence.
//!
//! Control flow is strictly linear: header, question/answer stages, summary
//! confirmation, then directory creation and a fixed, ordered list of output
//! files. Writes are not transactional; a failed write surfaces immediately
//! and earlier files stay on disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Defaults;
use crate::descriptor::{flag_label, plugin_categories, PluginFormat, ProjectDescriptor};
use crate::pathcheck;
use crate::platform;
use crate::prompt::Prompter;
use crate::templates::{self, TemplateLoader};
use crate::validate;

const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_PLUGIN_NAME: &str = "NewPlugin";
/// Helper script copied verbatim into the generated project when present
/// next to the template directory.
const PLATFORM_SCRIPT: &str = "configure-platform.py";

/// Source stubs and build file rendered with the full field set, in emission
/// order. Editor configuration and raw copies follow separately.
const RENDERED_SOURCES: [&str; 6] = [
    "CMakeLists.txt",
    "Source/PluginProcessor.h",
    "Source/PluginProcessor.cpp",
    "Source/PluginEditor.h",
    "Source/PluginEditor.cpp",
    "Source/PluginFactory.cpp",
];

/// How a wizard run ended. Both variants are successful process exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Generated,
    Declined,
}

pub struct ProjectGenerator<R> {
    loader: TemplateLoader,
    defaults: Defaults,
    prompter: Prompter<R>,
    config_warning: Option<String>,
    os: &'static str,
}

impl<R: BufRead> ProjectGenerator<R> {
    pub fn new(
        loader: TemplateLoader,
        defaults: Defaults,
        prompter: Prompter<R>,
        config_warning: Option<String>,
    ) -> Self {
        Self {
            loader,
            defaults,
            prompter,
            config_warning,
            os: std::env::consts::OS,
        }
    }

    /// Pin the platform identity instead of detecting it. Used by tests.
    pub fn with_os(mut self, os: &'static str) -> Self {
        self.os = os;
        self
    }

    pub fn run(&mut self) -> Result<Outcome> {
        self.print_header();
        let descriptor = self.collect_project_info()?;
        if !self.show_summary(&descriptor)? {
            println!("{}\n", "❌ Project creation cancelled".red());
            return Ok(Outcome::Declined);
        }
        self.create_project_structure(&descriptor)?;
        self.emit_project_files(&descriptor)?;
        self.show_success(&descriptor);
        Ok(Outcome::Generated)
    }

    fn print_header(&self) {
        let rule = "=".repeat(60);
        println!("\n{}", rule.bright_cyan());
        println!("{}", "  JUCE Project Generator - CMake + Cursor".bright_cyan());
        println!("{}\n", rule.bright_cyan());
        if let Some(warning) = &self.config_warning {
            println!("{}", format!("⚠️  Warning: {warning}").yellow());
            println!(
                "{}\n",
                "   Using default values. Please check your defaults file.".yellow()
            );
        }
    }

    // ------------------------------------------------------------------
    // Interactive stages
    // ------------------------------------------------------------------

    fn collect_project_info(&mut self) -> Result<ProjectDescriptor> {
        println!("{}", "Project Information:".yellow());
        let (name, display_name) = self.input_project_name()?;

        let version = self.prompter.text("  Project version", DEFAULT_VERSION)?;
        let default_manufacturer = self.defaults.manufacturer_name.clone();
        let manufacturer_name = self
            .prompter
            .text("  Manufacturer name", &default_manufacturer)?;

        let default_code = self.defaults.manufacturer_code.clone();
        let manufacturer_code = self.input_code(
            "  Manufacturer code (4 chars)",
            default_code,
            validate::is_valid_manufacturer_code,
            "❌ Must be exactly 4 alphabetic characters",
        )?;
        let default_code = self.defaults.plugin_code.clone();
        let plugin_code = self.input_code(
            "  Plugin code (4 chars)",
            default_code,
            validate::is_valid_plugin_code,
            "❌ Must be exactly 4 alphanumeric characters",
        )?;

        let mut descriptor = ProjectDescriptor {
            bundle_id: validate::derive_bundle_id(&manufacturer_name, &name),
            name,
            display_name,
            version,
            manufacturer_name,
            manufacturer_code,
            plugin_code,
            ..ProjectDescriptor::default()
        };

        self.configure_plugin_settings(&mut descriptor)?;
        descriptor.formats = self.select_plugin_formats()?;
        descriptor.destination_dir = self.select_destination()?;
        descriptor.project_dir = Path::new(&descriptor.destination_dir).join(&descriptor.name);
        Ok(descriptor)
    }

    fn input_project_name(&mut self) -> Result<(String, String)> {
        loop {
            let name = self
                .prompter
                .text("  Technical project name", DEFAULT_PLUGIN_NAME)?;
            if !validate::is_valid_project_name(&name) {
                println!(
                    "{}",
                    "❌ Technical name must start with a letter and contain only letters, \
                     numbers, and underscores"
                        .red()
                );
                continue;
            }
            let project_dir = Path::new(&self.defaults.destination).join(&name);
            if project_dir.exists() && !self.confirm_overwrite(&name)? {
                continue;
            }
            let display_name = self
                .prompter
                .text("  Display name (optional, can include spaces)", &name)?;
            return Ok((name, display_name));
        }
    }

    fn confirm_overwrite(&mut self, name: &str) -> Result<bool> {
        println!(
            "\n{}",
            format!(
                "⚠️  A folder named '{name}' already exists at {}",
                self.defaults.destination
            )
            .yellow()
        );
        if self.prompter.confirm("Overwrite existing folder?", false)? {
            println!("{}\n", "Existing folder will be overwritten.".yellow());
            Ok(true)
        } else {
            println!("{}\n", "Please choose a different technical name.".yellow());
            Ok(false)
        }
    }

    /// Code prompt: empty input short-circuits to the default without
    /// validation; anything typed must pass the 4-character rule.
    fn input_code(
        &mut self,
        prompt: &str,
        default: String,
        valid: fn(&str) -> bool,
        error: &str,
    ) -> Result<String> {
        loop {
            let answer = self.prompter.ask(prompt, &default)?;
            if answer.is_empty() {
                return Ok(default);
            }
            if valid(&answer) {
                return Ok(answer);
            }
            println!("{}", error.red());
        }
    }

    fn configure_plugin_settings(&mut self, descriptor: &mut ProjectDescriptor) -> Result<()> {
        println!("\n{}", "Plugin Configuration:".yellow());
        descriptor.is_synth = self.prompter.confirm("  Is this a synthesizer?", false)?;
        descriptor.needs_midi_input = self.prompter.confirm("  Requires MIDI input?", false)?;
        descriptor.needs_midi_output = self.prompter.confirm("  Produces MIDI output?", false)?;
        descriptor.is_midi_effect = self.prompter.confirm("  Is this a MIDI effect?", false)?;
        let (au_main_type, vst3_categories) =
            plugin_categories(descriptor.is_synth, descriptor.is_midi_effect);
        descriptor.au_main_type = au_main_type;
        descriptor.vst3_categories = vst3_categories;
        Ok(())
    }

    /// An empty selection restarts the whole step, as an explicit loop.
    fn select_plugin_formats(&mut self) -> Result<Vec<PluginFormat>> {
        loop {
            println!("\n{}", "Select plugin formats:".yellow());
            let mut selected = Vec::new();
            for format in PluginFormat::ALL {
                let prompt = format!("  Include {}?", format.label());
                if self.prompter.confirm(&prompt, format.default_selected())? {
                    selected.push(format);
                }
            }
            if selected.is_empty() {
                println!("{}\n", "❌ At least one format must be selected".red());
                continue;
            }
            return Ok(selected);
        }
    }

    fn select_destination(&mut self) -> Result<String> {
        println!("\n{}", "Finalization:".yellow());
        let default = self.defaults.destination.clone();
        loop {
            let destination = self.prompter.text("  Destination folder", &default)?;
            let destination = shellexpand::tilde(&destination).into_owned();
            let problems = pathcheck::problematic_chars(&destination);
            if problems.is_empty() {
                return Ok(destination);
            }
            pathcheck::print_interactive_path_error(&destination, &problems);
        }
    }

    fn show_summary(&mut self, descriptor: &ProjectDescriptor) -> Result<bool> {
        let rule = "=".repeat(60);
        println!("\n{}", rule.yellow());
        println!("{}", "Summary".yellow());
        println!("{}", rule.yellow());
        println!("  Technical Name    : {}", descriptor.name);
        println!("  Display Name      : {}", descriptor.display_name);
        println!("  Version           : {}", descriptor.version);
        println!("  Manufacturer      : {}", descriptor.manufacturer_name);
        println!("  Manufacturer Code : {}", descriptor.manufacturer_code);
        println!("  Plugin Code       : {}", descriptor.plugin_code);
        println!("  Bundle ID         : {}", descriptor.bundle_id);
        println!("  Is Synth          : {}", flag_label(descriptor.is_synth));
        println!("  MIDI Input        : {}", flag_label(descriptor.needs_midi_input));
        println!("  MIDI Output       : {}", flag_label(descriptor.needs_midi_output));
        println!("  MIDI Effect       : {}", flag_label(descriptor.is_midi_effect));
        println!("  Formats           : {}", descriptor.formats_string());
        println!("  Destination       : {}", descriptor.project_dir.display());
        println!("{}\n", rule.yellow());
        self.prompter.confirm("Create project?", true)
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    fn create_project_structure(&self, descriptor: &ProjectDescriptor) -> Result<()> {
        println!("\n{}", "📁 Creating project structure...".green());
        let project_dir = &descriptor.project_dir;
        if project_dir.exists() {
            fs::remove_dir_all(project_dir).with_context(|| {
                format!(
                    "Failed to remove existing project directory: {}",
                    project_dir.display()
                )
            })?;
        }
        for subdir in ["Source", ".vscode"] {
            fs::create_dir_all(project_dir.join(subdir))
                .with_context(|| format!("Failed to create {}/{subdir}", project_dir.display()))?;
        }
        Ok(())
    }

    fn emit_project_files(&self, descriptor: &ProjectDescriptor) -> Result<()> {
        let juce_dir = self.defaults.juce_dir.clone().unwrap_or_default();
        let fields = descriptor.template_fields(&self.defaults.vst3_folder_windows, &juce_dir);

        for name in RENDERED_SOURCES {
            self.render_into(descriptor, name, &fields)?;
        }
        self.emit_vscode_settings(descriptor, &fields)?;
        self.render_into(descriptor, ".vscode/tasks.json", &fields)?;
        self.render_into(descriptor, ".vscode/launch.json", &fields)?;
        self.copy_template(descriptor, ".cursorrules")?;
        self.copy_template(descriptor, ".gitignore")?;
        self.emit_cmake_presets(descriptor)?;
        self.copy_platform_script(descriptor)?;
        self.render_into(descriptor, "README.md", &fields)?;
        Ok(())
    }

    fn render_into(
        &self,
        descriptor: &ProjectDescriptor,
        name: &str,
        fields: &BTreeMap<&str, String>,
    ) -> Result<()> {
        println!("{}", format!("📝 Generating {name}...").green());
        let template = self.loader.load(name)?;
        let rendered = templates::render(&template, fields)
            .with_context(|| format!("Failed to render template: {name}"))?;
        self.write_file(descriptor, name, &rendered)
    }

    /// The editor settings template carries a `{buildDirectory}` token that
    /// is substituted with the platform build directory before the field
    /// pass runs.
    fn emit_vscode_settings(
        &self,
        descriptor: &ProjectDescriptor,
        fields: &BTreeMap<&str, String>,
    ) -> Result<()> {
        println!("{}", "📝 Generating .vscode/settings.json...".green());
        let (build_dir, _preset) = platform::build_config(self.os);
        let template = self
            .loader
            .load(".vscode/settings.json")?
            .replace("{buildDirectory}", build_dir);
        let rendered = templates::render(&template, fields)
            .context("Failed to render template: .vscode/settings.json")?;
        self.write_file(descriptor, ".vscode/settings.json", &rendered)
    }

    fn copy_template(&self, descriptor: &ProjectDescriptor, name: &str) -> Result<()> {
        println!("{}", format!("📝 Generating {name}...").green());
        let content = self.loader.load(name)?;
        self.write_file(descriptor, name, &content)
    }

    /// The presets file shares its syntax with the placeholder syntax, so it
    /// only gets the escape-collapse pass, never field rendering.
    fn emit_cmake_presets(&self, descriptor: &ProjectDescriptor) -> Result<()> {
        println!("{}", "📝 Generating CMakeUserPresets.json...".green());
        let content = templates::collapse_escapes(&self.loader.load("CMakeUserPresets.json")?);
        self.write_file(descriptor, "CMakeUserPresets.json", &content)
    }

    fn copy_platform_script(&self, descriptor: &ProjectDescriptor) -> Result<()> {
        println!("{}", format!("📝 Copying {PLATFORM_SCRIPT} script...").green());
        let script = self
            .loader
            .root()
            .parent()
            .map(|parent| parent.join(PLATFORM_SCRIPT));
        match script {
            Some(path) if path.is_file() => {
                fs::copy(&path, descriptor.project_dir.join(PLATFORM_SCRIPT))
                    .with_context(|| format!("Failed to copy {PLATFORM_SCRIPT}"))?;
            }
            _ => println!(
                "{}",
                format!("⚠️  Warning: {PLATFORM_SCRIPT} not found next to the template directory")
                    .yellow()
            ),
        }
        Ok(())
    }

    fn write_file(
        &self,
        descriptor: &ProjectDescriptor,
        relative: &str,
        content: &str,
    ) -> Result<()> {
        let path = descriptor.project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn show_success(&self, descriptor: &ProjectDescriptor) {
        let (platform_name, preset) = platform::platform_info(self.os);
        let rule = "=".repeat(60);
        println!("\n{}", rule.green());
        println!("{}", "✅ Project created successfully!".green());
        println!("{}\n", rule.green());
        println!(
            "{} {}\n",
            "📍 Location:".bright_cyan(),
            descriptor.project_dir.display()
        );
        println!("{}\n", "Next steps:".yellow());
        println!("  1. Open project in Cursor:");
        let project_path = descriptor.project_dir.display().to_string();
        println!(
            "     {}\n",
            platform::open_command(self.os, &project_path).bright_cyan()
        );
        println!("  2. Project is automatically configured for {platform_name}");
        println!("     CMake preset: {preset}");
        println!(
            "     Build directory: {}\n",
            platform::build_directory_name(self.os, &platform_name)
        );
        println!("  3. In Cursor:");
        println!("     - Select build kit when prompted (CMake Tools will suggest the correct one)");
        println!(
            "     - Build: {} (or {} on macOS) → \"CMake: Build\"",
            "Ctrl+Shift+P".bright_cyan(),
            "Cmd+Shift+P".bright_cyan()
        );
        println!(
            "     - Debug: Press {} to start debugging\n",
            "F5".bright_cyan()
        );
        let other_platform = match self.os {
            "windows" => Some("macOS"),
            "macos" => Some("Windows"),
            _ => None,
        };
        if let Some(other) = other_platform {
            println!("  {} If you open this project on {other} later, run:", "Note:".yellow());
            println!("     {}\n", format!("python {PLATFORM_SCRIPT}").bright_cyan());
        }
        println!("{}\n", rule.green());
    }
}
