//! Keystore properties file (`android/keystore.properties`)
//!
//! Java `.properties` syntax: `#`/`!` comments, `=`, `:` or whitespace
//! separators, backslash escapes and line continuations.

use passvault_core::error::{Error, ErrorCode, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed keystore properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeystoreProperties {
    pub path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl KeystoreProperties {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorCode::KeystoreError,
                format!("Cannot read {}: {}", path.display(), e),
            )
            .with_suggestion("Create keystore.properties next to the Android settings.gradle")
        })?;

        let mut properties = Self::parse(&content);
        properties.path = Some(path.to_path_buf());
        Ok(properties)
    }

    pub fn parse(content: &str) -> Self {
        let mut entries = BTreeMap::new();
        let mut lines = content.lines();

        while let Some(line) = lines.next() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some(next) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            entries.insert(unescape(key), unescape(value));
        }

        Self { path: None, entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Required keys that are absent or empty
    pub fn missing_keys<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required
            .iter()
            .map(AsRef::as_ref)
            .filter(|key| self.get(key).is_none_or(str::is_empty))
            .map(str::to_string)
            .collect()
    }
}

/// An odd number of trailing backslashes continues the line
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                let key = &line[..i];
                let mut rest = line[i..].trim_start_matches([' ', '\t', '\x0c']);
                if c.is_whitespace() || c == '\x0c' {
                    rest = rest
                        .strip_prefix(['=', ':'])
                        .unwrap_or(rest)
                        .trim_start_matches([' ', '\t', '\x0c']);
                } else {
                    rest = rest[1..].trim_start_matches([' ', '\t', '\x0c']);
                }
                return (key, rest);
            }
            _ => {}
        }
    }
    (line, "")
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
