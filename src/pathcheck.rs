//! Portable-path checks shared by the configuration loader and the wizard.
//!
//! Project paths are restricted to ASCII (plus separators): accented or
//! otherwise non-ASCII characters break CMake/Visual Studio builds on
//! Windows (error MSB8066) and end up mis-encoded in generated .vcxproj
//! files. Configured paths that violate the rule are fatal before any prompt
//! is shown; interactively typed paths just re-prompt.

use std::fmt;

use anyhow::Result;
use colored::Colorize;

fn is_path_separator(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | ' ')
}

/// Every character of `path` above the ASCII range, separators excluded,
/// in order of appearance.
pub fn problematic_chars(path: &str) -> Vec<char> {
    path.chars()
        .filter(|&c| !is_path_separator(c) && !c.is_ascii())
        .collect()
}

/// Distinct offenders quoted for display, capped at 10 plus a remainder count.
pub fn format_problematic_chars(chars: &[char]) -> String {
    let mut unique: Vec<char> = Vec::new();
    for &c in chars {
        if !unique.contains(&c) {
            unique.push(c);
        }
    }
    let mut out = unique
        .iter()
        .take(10)
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ");
    if unique.len() > 10 {
        out.push_str(&format!(" ... (and {} more)", unique.len() - 10));
    }
    out
}

/// Fatal validation failure for a path taken from the defaults file.
///
/// Displays the full report: offending parameter and path, the detected
/// characters, why the restriction exists and how to fix the config.
#[derive(Debug)]
pub struct PortablePathError {
    pub param: String,
    pub path: String,
    pub config_file: String,
    pub chars: Vec<char>,
}

impl fmt::Display for PortablePathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        writeln!(f)?;
        writeln!(f, "{}", rule.red())?;
        writeln!(
            f,
            "{}",
            format!("❌ ERROR: Invalid path detected in {}", self.config_file).red()
        )?;
        writeln!(f, "{}", rule.red())?;
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            format!(
                "The parameter '{}' contains problematic characters.",
                self.param
            )
            .yellow()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", "Problematic path:".yellow())?;
        writeln!(f, "  {}", self.path.red())?;
        writeln!(f)?;
        writeln!(
            f,
            "{} {}",
            "Detected characters:".yellow(),
            format_problematic_chars(&self.chars)
        )?;
        writeln!(f)?;
        writeln!(f, "{}", "Why this restriction?".yellow())?;
        writeln!(f, "  Paths with accents or special characters cause build errors")?;
        writeln!(f, "  with CMake/Visual Studio on Windows (error MSB8066).")?;
        writeln!(f, "  Generated .vcxproj files then contain incorrectly encoded characters.")?;
        writeln!(f)?;
        writeln!(f, "{}", "Solution:".yellow())?;
        writeln!(f, "  1. Open the file {}", self.config_file)?;
        writeln!(f, "  2. Modify '{}' to use a path without accents", self.param)?;
        writeln!(f, "  3. Examples:")?;
        writeln!(f, "     ❌ \"C:/Users/John/Téléchargements\"")?;
        writeln!(f, "     ✅ \"C:/Users/John/Telechargements\"")?;
        writeln!(f, "     ❌ \"D:/Projets/Été 2024\"")?;
        writeln!(f, "     ✅ \"D:/Projets/Ete 2024\"")?;
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            "The generator stops now to avoid creating a project in the wrong location.".red()
        )?;
        write!(f, "{}", rule.red())
    }
}

impl std::error::Error for PortablePathError {}

/// Validate a path taken from the defaults file; violations are fatal.
pub fn ensure_portable_path(path: &str, param: &str, config_file: &str) -> Result<()> {
    let chars = problematic_chars(path);
    if chars.is_empty() {
        return Ok(());
    }
    Err(PortablePathError {
        param: param.to_string(),
        path: path.to_string(),
        config_file: config_file.to_string(),
        chars,
    }
    .into())
}

/// The terse, recoverable variant shown when the wizard's destination prompt
/// gets a bad path. The caller re-prompts afterwards.
pub fn print_interactive_path_error(destination: &str, chars: &[char]) {
    println!(
        "\n{}",
        "❌ ERROR: The path contains problematic characters.".red()
    );
    println!("{}", format!("   Path: {destination}").yellow());
    println!(
        "{}",
        format!("   Detected characters: {}", format_problematic_chars(chars)).yellow()
    );
    println!(
        "{}",
        "   Paths with accents cause build errors with CMake/Visual Studio.".yellow()
    );
    println!(
        "{}\n",
        "   Solution: Use a path without accents (e.g., 'Telechargements' instead of 'Téléchargements')"
            .yellow()
    );
}
