//! Build variants: base kinds, flavors and the tables that tie them together

use crate::plist::{Dict, Value};
use passvault_core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Build settings that must come from the `.xcconfig` of a flavor
pub const STRIPPED_SETTINGS: [&str; 3] = [
    "PRODUCT_NAME",
    "PRODUCT_BUNDLE_IDENTIFIER",
    "ASSETCATALOG_COMPILER_APPICON_NAME",
];

/// Build purpose, independent of flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BaseKind {
    Debug,
    Release,
    Profile,
}

/// Whether a configuration builds unoptimized with debug info or optimized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Debug,
    Release,
}

/// Base kind, configuration name and classification
const BASE_KIND_TABLE: [(BaseKind, &str, Classification); 3] = [
    (BaseKind::Debug, "Debug", Classification::Debug),
    (BaseKind::Release, "Release", Classification::Release),
    (BaseKind::Profile, "Profile", Classification::Release),
];

impl BaseKind {
    /// All kinds in processing order
    pub const ALL: [BaseKind; 3] = [BaseKind::Debug, BaseKind::Release, BaseKind::Profile];

    fn row(self) -> (BaseKind, &'static str, Classification) {
        BASE_KIND_TABLE[self as usize]
    }

    /// Name of the stock configuration, e.g. `Debug`
    pub fn name(self) -> &'static str {
        self.row().1
    }

    pub fn classification(self) -> Classification {
        self.row().2
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Classification {
    /// Settings for a new configuration when there is no stock one to clone
    pub fn default_build_settings(self) -> Dict {
        let pairs: &[(&str, &str)] = match self {
            Classification::Debug => &[
                ("DEBUG_INFORMATION_FORMAT", "dwarf"),
                ("ENABLE_TESTABILITY", "YES"),
                ("GCC_OPTIMIZATION_LEVEL", "0"),
                ("MTL_ENABLE_DEBUG_INFO", "YES"),
                ("ONLY_ACTIVE_ARCH", "YES"),
                ("SWIFT_ACTIVE_COMPILATION_CONDITIONS", "DEBUG"),
                ("SWIFT_OPTIMIZATION_LEVEL", "-Onone"),
            ],
            Classification::Release => &[
                ("DEBUG_INFORMATION_FORMAT", "dwarf-with-dsym"),
                ("ENABLE_NS_ASSERTIONS", "NO"),
                ("MTL_ENABLE_DEBUG_INFO", "NO"),
                ("SWIFT_COMPILATION_MODE", "wholemodule"),
                ("SWIFT_OPTIMIZATION_LEVEL", "-O"),
                ("VALIDATE_PRODUCT", "YES"),
            ],
        };

        let mut settings: Dict = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect();
        if self == Classification::Debug {
            settings.insert(
                "GCC_PREPROCESSOR_DEFINITIONS".to_string(),
                Value::Array(vec![Value::from("DEBUG=1"), Value::from("$(inherited)")]),
            );
        }
        settings
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Classification::Debug => "debug",
            Classification::Release => "release",
        })
    }
}

/// A deployment environment, e.g. `Dev`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Flavor(String);

impl Flavor {
    /// Validate a flavor name: an identifier, since it ends up in file names
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut chars = name.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Self(name))
        } else {
            Err(Error::validation(format!("Invalid flavor name: {:?}", name))
                .with_suggestion("Use letters, digits and underscores, starting with a letter"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate a list of names
    pub fn parse_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>> {
        names.iter().map(|n| Self::new(n.as_ref())).collect()
    }

    /// Composite configuration name for a kind, e.g. `Debug-Dev`
    pub fn configuration_name(&self, kind: BaseKind) -> String {
        format!("{}-{}", kind.name(), self.0)
    }

    /// Settings file of a kind, e.g. `Debug-Dev.xcconfig`
    pub fn xcconfig_file_name(&self, kind: BaseKind) -> String {
        format!("{}.xcconfig", self.configuration_name(kind))
    }

    /// Shared scheme file, e.g. `Dev.xcscheme`
    pub fn scheme_file_name(&self) -> String {
        format!("{}.xcscheme", self.0)
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Flavor {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        Self::new(name)
    }
}

impl From<Flavor> for String {
    fn from(flavor: Flavor) -> Self {
        flavor.0
    }
}

/// The flavors PassVault ships
pub fn default_flavors() -> Vec<Flavor> {
    vec![Flavor("Dev".to_string()), Flavor("Prod".to_string())]
}

/// Scheme actions that carry a build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemeAction {
    Launch,
    Test,
    Profile,
    Analyze,
    Archive,
}

/// Action, XML element and the base kind it runs
const SCHEME_ACTION_TABLE: [(SchemeAction, &str, BaseKind); 5] = [
    (SchemeAction::Launch, "LaunchAction", BaseKind::Debug),
    (SchemeAction::Test, "TestAction", BaseKind::Debug),
    (SchemeAction::Profile, "ProfileAction", BaseKind::Profile),
    (SchemeAction::Analyze, "AnalyzeAction", BaseKind::Debug),
    (SchemeAction::Archive, "ArchiveAction", BaseKind::Release),
];

impl SchemeAction {
    pub const ALL: [SchemeAction; 5] = [
        SchemeAction::Launch,
        SchemeAction::Test,
        SchemeAction::Profile,
        SchemeAction::Analyze,
        SchemeAction::Archive,
    ];

    fn row(self) -> (SchemeAction, &'static str, BaseKind) {
        SCHEME_ACTION_TABLE[self as usize]
    }

    /// Element name in `.xcscheme` files
    pub fn element(self) -> &'static str {
        self.row().1
    }

    /// Base kind the action builds with
    pub fn base_kind(self) -> BaseKind {
        self.row().2
    }

    /// Configuration the action uses for a flavor
    pub fn configuration_for(self, flavor: &Flavor) -> String {
        flavor.configuration_name(self.base_kind())
    }
}

impl fmt::Display for SchemeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.element().trim_end_matches("Action");
        f.write_str(&name.to_ascii_lowercase())
    }
}
