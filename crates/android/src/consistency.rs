//! Cross-platform flavor consistency
//!
//! Android flavors are lowercase by convention (`dev`), Xcode configurations
//! are capitalized (`Debug-Dev`), so names are compared case-insensitively.

use serde::Serialize;

/// Result of comparing the flavor lists of both platforms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlavorConsistency {
    pub android: Vec<String>,
    pub ios: Vec<String>,
    /// Android flavors with no iOS counterpart
    pub missing_on_ios: Vec<String>,
    /// iOS flavors with no Android counterpart
    pub missing_on_android: Vec<String>,
}

impl FlavorConsistency {
    pub fn is_consistent(&self) -> bool {
        self.missing_on_ios.is_empty() && self.missing_on_android.is_empty()
    }
}

pub fn check_flavor_consistency<A, I>(android: &[A], ios: &[I]) -> FlavorConsistency
where
    A: AsRef<str>,
    I: AsRef<str>,
{
    let android: Vec<String> = android.iter().map(|f| f.as_ref().to_string()).collect();
    let ios: Vec<String> = ios.iter().map(|f| f.as_ref().to_string()).collect();

    let missing = |names: &[String], other: &[String]| -> Vec<String> {
        names
            .iter()
            .filter(|name| !other.iter().any(|o| o.eq_ignore_ascii_case(name)))
            .cloned()
            .collect()
    };

    FlavorConsistency {
        missing_on_ios: missing(&android, &ios),
        missing_on_android: missing(&ios, &android),
        android,
        ios,
    }
}
