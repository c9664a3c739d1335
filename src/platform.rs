//! Platform identity helpers for build presets and follow-up instructions.
//!
//! Pure functions of an OS name: call sites pass `std::env::consts::OS`,
//! tests pass fixed strings.

/// Build directory and CMake preset baked into the generated editor config.
pub fn build_config(os: &str) -> (&'static str, &'static str) {
    match os {
        "macos" => ("build-macos", "default-macos"),
        "windows" => ("build-windows", "default-windows"),
        _ => ("build", "default"),
    }
}

/// Human-readable platform name and CMake preset for the success message.
pub fn platform_info(os: &str) -> (String, &'static str) {
    match os {
        "macos" => ("macOS".to_string(), "default-macos"),
        "windows" => ("Windows".to_string(), "default-windows"),
        other => (other.to_string(), "default"),
    }
}

/// Shell command that opens the generated project in Cursor.
pub fn open_command(os: &str, project_path: &str) -> String {
    if os == "windows" {
        format!("cd \"{project_path}\"; cursor .")
    } else {
        format!("cd {project_path} && cursor .")
    }
}

/// Build directory name shown in the success message.
pub fn build_directory_name(os: &str, platform_name: &str) -> String {
    if os == "windows" {
        "build-windows".to_string()
    } else {
        format!("build-{}", platform_name.to_lowercase())
    }
}
