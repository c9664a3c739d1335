//! Input validation and identifier derivation.

/// Technical project names start with a letter and stay within letters,
/// digits, underscore, and hyphen.
pub fn is_valid_project_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Manufacturer codes are exactly 4 alphabetic characters.
pub fn is_valid_manufacturer_code(code: &str) -> bool {
    code.chars().count() == 4 && code.chars().all(char::is_alphabetic)
}

/// Plugin codes are exactly 4 alphanumeric characters.
pub fn is_valid_plugin_code(code: &str) -> bool {
    code.chars().count() == 4 && code.chars().all(char::is_alphanumeric)
}

/// Reverse-DNS bundle identifier derived from the manufacturer and project
/// names. Pure: the same input pair always yields the same identifier.
///
/// The manufacturer segment keeps ASCII alphanumerics only and gets a
/// `Company` prefix when the stripped segment is empty or does not start
/// with a letter. The project segment additionally keeps `_` and `-`.
pub fn derive_bundle_id(manufacturer_name: &str, project_name: &str) -> String {
    let mut manufacturer: String = manufacturer_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let leads_with_letter = manufacturer
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic());
    if !leads_with_letter {
        manufacturer.insert_str(0, "Company");
    }
    let project: String = project_name
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        .collect();
    format!("com.{manufacturer}.{project}")
}
