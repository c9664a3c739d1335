//! Read-only access to the template directory and placeholder rendering.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Thin accessor over the directory of named template files.
pub struct TemplateLoader {
    root: PathBuf,
}

impl TemplateLoader {
    /// Fails when the template root itself is missing; individual templates
    /// are checked on load.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            bail!("Templates directory not found: {}", root.display());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full text of the template at `name`, resolved under the root.
    pub fn load(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        if !path.is_file() {
            bail!("Template not found: {name}");
        }
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read template: {name}"))
    }
}

/// Substitute `{name}` tokens from `fields` into `template`.
///
/// Doubled braces escape to a literal brace. A token without a field, and a
/// stray unmatched brace, abort the render: templates and field set share
/// one fixed vocabulary and must stay in sync.
pub fn render(template: &str, fields: &BTreeMap<&str, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut token = String::new();
                let mut closed = false;
                for t in chars.by_ref() {
                    if t == '}' {
                        closed = true;
                        break;
                    }
                    token.push(t);
                }
                if !closed {
                    bail!("Unterminated placeholder '{{{token}' in template");
                }
                match fields.get(token.as_str()) {
                    Some(value) => out.push_str(value),
                    None => bail!("Unknown placeholder '{{{token}}}' in template"),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    bail!("Unmatched '}}' in template");
                }
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// Collapse doubled-brace escapes without touching any fields. Used for the
/// one template whose own syntax collides with the placeholder syntax.
pub fn collapse_escapes(text: &str) -> String {
    text.replace("{{", "{").replace("}}", "}")
}
