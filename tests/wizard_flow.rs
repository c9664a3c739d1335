//! End-to-end wizard scenarios driven by scripted input against the
//! template set shipped in this repository.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use jucegen::config::Defaults;
use jucegen::generator::{Outcome, ProjectGenerator};
use jucegen::prompt::Prompter;
use jucegen::templates::TemplateLoader;
use tempfile::TempDir;

/// Every file the generator emits, relative to the project directory.
const EXPECTED_FILES: [&str; 14] = [
    "CMakeLists.txt",
    "Source/PluginProcessor.h",
    "Source/PluginProcessor.cpp",
    "Source/PluginEditor.h",
    "Source/PluginEditor.cpp",
    "Source/PluginFactory.cpp",
    ".vscode/settings.json",
    ".vscode/tasks.json",
    ".vscode/launch.json",
    ".cursorrules",
    ".gitignore",
    "CMakeUserPresets.json",
    "configure-platform.py",
    "README.md",
];

const PLACEHOLDER_TOKENS: [&str; 17] = [
    "{projectName}",
    "{projectDisplayName}",
    "{projectVersion}",
    "{manufacturerName}",
    "{manufacturerCode}",
    "{pluginCode}",
    "{pluginFormats}",
    "{isSynth}",
    "{needsMidiInput}",
    "{needsMidiOutput}",
    "{isMidiEffect}",
    "{auMainType}",
    "{vst3Categories}",
    "{bundleId}",
    "{customVst3Folder}",
    "{juceDir}",
    "{buildDirectory}",
];

fn repo_templates() -> TemplateLoader {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
    TemplateLoader::new(root).expect("repo templates directory")
}

fn defaults_into(destination: &Path) -> Defaults {
    Defaults {
        destination: destination.to_string_lossy().into_owned(),
        manufacturer_name: "My Company".to_string(),
        manufacturer_code: "Myco".to_string(),
        plugin_code: "Mypl".to_string(),
        vst3_folder_windows: "C:/Users/YourName/VST3".to_string(),
        juce_dir: None,
    }
}

fn run_wizard(script: &str, destination: &Path) -> Outcome {
    let prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()));
    let mut generator = ProjectGenerator::new(
        repo_templates(),
        defaults_into(destination),
        prompter,
        None,
    )
    .with_os("macos");
    generator.run().expect("wizard run")
}

// name, display, version, manufacturer, mfr code, plugin code,
// 4x behavior flags, 3x formats (Standalone only), destination, confirm.
const HAPPY_PATH: &str = "MyPlug\n\n\n\n\n\nn\nn\nn\nn\nn\nn\ny\n\ny\n";

#[test]
fn test_happy_path_generates_full_project() {
    let dest = TempDir::new().unwrap();
    let outcome = run_wizard(HAPPY_PATH, dest.path());
    assert_eq!(outcome, Outcome::Generated);

    let project = dest.path().join("MyPlug");
    for file in EXPECTED_FILES {
        assert!(project.join(file).is_file(), "missing output file: {file}");
    }
}

#[test]
fn test_no_placeholder_residue_in_any_output() {
    let dest = TempDir::new().unwrap();
    run_wizard(HAPPY_PATH, dest.path());

    let project = dest.path().join("MyPlug");
    for file in EXPECTED_FILES {
        let content = fs::read_to_string(project.join(file)).unwrap();
        for token in PLACEHOLDER_TOKENS {
            assert!(
                !content.contains(token),
                "{file} still contains placeholder {token}"
            );
        }
    }
}

#[test]
fn test_identity_fields_land_in_outputs() {
    let dest = TempDir::new().unwrap();
    run_wizard(HAPPY_PATH, dest.path());

    let project = dest.path().join("MyPlug");
    let cmake = fs::read_to_string(project.join("CMakeLists.txt")).unwrap();
    assert!(cmake.contains("project(MyPlug VERSION 1.0.0)"));
    assert!(cmake.contains("com.MyCompany.MyPlug"));
    assert!(cmake.contains("FORMATS Standalone"));
    assert!(cmake.contains("IS_SYNTH FALSE"));
    assert!(cmake.contains("AU_MAIN_TYPE kAudioUnitType_Effect"));

    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert!(readme.contains("MyPlug"));
    assert!(readme.contains("com.MyCompany.MyPlug"));
    assert!(readme.contains("My Company"));
}

#[test]
fn test_generated_json_is_well_formed() {
    let dest = TempDir::new().unwrap();
    run_wizard(HAPPY_PATH, dest.path());

    let project = dest.path().join("MyPlug");
    for file in [
        ".vscode/settings.json",
        ".vscode/tasks.json",
        ".vscode/launch.json",
        "CMakeUserPresets.json",
    ] {
        let content = fs::read_to_string(project.join(file)).unwrap();
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&content);
        assert!(parsed.is_ok(), "{file} is not valid JSON: {parsed:?}");
    }

    // The build directory token was pinned to the macOS flavor.
    let settings = fs::read_to_string(project.join(".vscode/settings.json")).unwrap();
    assert!(settings.contains("build-macos"));
}

#[test]
fn test_declining_confirmation_writes_nothing() {
    let dest = TempDir::new().unwrap();
    let script = "MyPlug\n\n\n\n\n\nn\nn\nn\nn\nn\nn\ny\n\nn\n";
    let outcome = run_wizard(script, dest.path());
    assert_eq!(outcome, Outcome::Declined);
    assert!(!dest.path().join("MyPlug").exists());
}

#[test]
fn test_empty_format_selection_restarts_the_step() {
    let dest = TempDir::new().unwrap();
    // First format round answers no to all three; the step restarts and the
    // second round picks Standalone.
    let script = "MyPlug\n\n\n\n\n\nn\nn\nn\nn\nn\nn\nn\nn\nn\ny\n\ny\n";
    let outcome = run_wizard(script, dest.path());
    assert_eq!(outcome, Outcome::Generated);

    let cmake = fs::read_to_string(dest.path().join("MyPlug/CMakeLists.txt")).unwrap();
    assert!(cmake.contains("FORMATS Standalone"));
}

#[test]
fn test_invalid_name_reprompts() {
    let dest = TempDir::new().unwrap();
    let script = "2bad\nMyPlug\n\n\n\n\n\nn\nn\nn\nn\nn\nn\ny\n\ny\n";
    let outcome = run_wizard(script, dest.path());
    assert_eq!(outcome, Outcome::Generated);
    assert!(dest.path().join("MyPlug/CMakeLists.txt").is_file());
}

#[test]
fn test_declined_overwrite_loops_back_to_name_entry() {
    let dest = TempDir::new().unwrap();
    fs::create_dir(dest.path().join("MyPlug")).unwrap();
    fs::write(dest.path().join("MyPlug/keep.txt"), "precious").unwrap();

    // "MyPlug" collides, overwrite declined, "Fresh" chosen instead.
    let script = "MyPlug\nn\nFresh\n\n\n\n\n\nn\nn\nn\nn\nn\nn\ny\n\ny\n";
    let outcome = run_wizard(script, dest.path());
    assert_eq!(outcome, Outcome::Generated);

    assert!(dest.path().join("Fresh/CMakeLists.txt").is_file());
    let keep = fs::read_to_string(dest.path().join("MyPlug/keep.txt")).unwrap();
    assert_eq!(keep, "precious");
}

#[test]
fn test_accepted_overwrite_replaces_existing_tree() {
    let dest = TempDir::new().unwrap();
    fs::create_dir(dest.path().join("MyPlug")).unwrap();
    fs::write(dest.path().join("MyPlug/stale.txt"), "old").unwrap();

    let script = "MyPlug\ny\n\n\n\n\n\nn\nn\nn\nn\nn\nn\ny\n\ny\n";
    let outcome = run_wizard(script, dest.path());
    assert_eq!(outcome, Outcome::Generated);

    let project = dest.path().join("MyPlug");
    assert!(project.join("CMakeLists.txt").is_file());
    assert!(!project.join("stale.txt").exists());
}

#[test]
fn test_synth_categories_flow_into_build_file() {
    let dest = TempDir::new().unwrap();
    // Synth yes, the other flags no, VST3 + Standalone.
    let script = "MySynth\n\n\n\n\n\ny\nn\nn\nn\nn\ny\ny\n\ny\n";
    let outcome = run_wizard(script, dest.path());
    assert_eq!(outcome, Outcome::Generated);

    let cmake = fs::read_to_string(dest.path().join("MySynth/CMakeLists.txt")).unwrap();
    assert!(cmake.contains("IS_SYNTH TRUE"));
    assert!(cmake.contains("AU_MAIN_TYPE kAudioUnitType_MusicDevice"));
    assert!(cmake.contains("VST3_CATEGORIES \"Instrument|Synth\""));
    assert!(cmake.contains("FORMATS VST3 Standalone"));
}

#[test]
fn test_custom_codes_and_manufacturer() {
    let dest = TempDir::new().unwrap();
    // Typed manufacturer, an invalid manufacturer code first, then a valid
    // one; plugin code accepted by default.
    let script = "Gate\n\n\nAcme Audio\nbad\nACME\n\nn\nn\nn\nn\nn\nn\ny\n\ny\n";
    let outcome = run_wizard(script, dest.path());
    assert_eq!(outcome, Outcome::Generated);

    let cmake = fs::read_to_string(dest.path().join("Gate/CMakeLists.txt")).unwrap();
    assert!(cmake.contains("COMPANY_NAME \"Acme Audio\""));
    assert!(cmake.contains("PLUGIN_MANUFACTURER_CODE ACME"));
    assert!(cmake.contains("PLUGIN_CODE Mypl"));
    assert!(cmake.contains("com.AcmeAudio.Gate"));
}
