//! Configuration schema definitions
//!
//! Defaults reproduce the standard Flutter `ios/` layout of PassVault.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// `[xcode]` section
    #[serde(default)]
    pub xcode: XcodeConfig,

    /// `[flavors]` section
    #[serde(default)]
    pub flavors: FlavorsConfig,

    /// `[android]` section
    #[serde(default)]
    pub android: AndroidConfig,

    /// `[logging]` section
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Xcode project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XcodeConfig {
    /// Path to the .xcodeproj bundle, relative to the project directory
    #[serde(default = "default_project")]
    pub project: String,

    /// Target every scheme builds
    #[serde(default = "default_primary_target")]
    pub primary_target: String,

    /// Group holding the .xcconfig settings files
    #[serde(default = "default_settings_group")]
    pub settings_group: String,

    /// Build settings that must come from the .xcconfig files only
    #[serde(default = "default_stripped_settings")]
    pub stripped_settings: Vec<String>,
}

impl Default for XcodeConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            primary_target: default_primary_target(),
            settings_group: default_settings_group(),
            stripped_settings: default_stripped_settings(),
        }
    }
}

fn default_project() -> String {
    "Runner.xcodeproj".to_string()
}

fn default_primary_target() -> String {
    "Runner".to_string()
}

fn default_settings_group() -> String {
    "Flutter".to_string()
}

fn default_stripped_settings() -> Vec<String> {
    vec![
        "PRODUCT_NAME",
        "PRODUCT_BUNDLE_IDENTIFIER",
        "ASSETCATALOG_COMPILER_APPICON_NAME",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Environment flavors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlavorsConfig {
    /// Flavor names, in processing order
    #[serde(default = "default_flavor_names")]
    pub names: Vec<String>,
}

impl Default for FlavorsConfig {
    fn default() -> Self {
        Self {
            names: default_flavor_names(),
        }
    }
}

fn default_flavor_names() -> Vec<String> {
    vec!["Dev".to_string(), "Prod".to_string()]
}

/// Android build declaration locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidConfig {
    /// Gradle build script declaring the product flavors
    #[serde(default = "default_gradle_file")]
    pub gradle_file: String,

    /// Keystore properties read by the signing configs
    #[serde(default = "default_keystore_properties")]
    pub keystore_properties: String,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            gradle_file: default_gradle_file(),
            keystore_properties: default_keystore_properties(),
        }
    }
}

fn default_gradle_file() -> String {
    "../android/app/build.gradle.kts".to_string()
}

fn default_keystore_properties() -> String {
    "../android/keystore.properties".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
