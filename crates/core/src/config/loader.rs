//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result};
use crate::validation::{ValidationError, ValidationResult, Validator};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const CONFIG_CANDIDATES: [&str; 3] = [
    ".passvault-flavors.toml",
    "passvault-flavors.toml",
    ".config/passvault-flavors.toml",
];

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed values, defaulted where the file is silent
    pub schema: ConfigSchema,
    /// File the values came from, `None` when running on defaults
    pub path: Option<PathBuf>,
    /// Non-blocking validation findings
    pub warnings: Vec<ValidationError>,
}

impl Config {
    /// Load configuration from a file path or the current directory
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(Path::new("."), path)
    }

    /// Load configuration, searching `base_dir` when no explicit path is given
    pub fn load_from(base_dir: &Path, path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(base_dir),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        let mut config = Self {
            schema,
            path: config_path,
            warnings: Vec::new(),
        };
        let result = config.validate();
        let warnings = result.warnings().to_vec();
        result.to_result().map_err(|e| {
            Error::new(crate::ErrorCode::ConfigValidationError, e.message)
                .with_context(config.describe_source())
        })?;
        config.warnings = warnings;

        Ok(config)
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
            warnings: Vec::new(),
        }
    }

    /// Validate the loaded values
    pub fn validate(&self) -> ValidationResult {
        let xcode = &self.schema.xcode;
        let mut validator = Validator::new()
            .required("xcode.project", &xcode.project)
            .pattern(
                "xcode.project",
                &xcode.project,
                r"\.xcodeproj/?$",
                "a path ending in .xcodeproj",
            )
            .required("xcode.primary_target", &xcode.primary_target)
            .required("xcode.settings_group", &xcode.settings_group)
            .custom("flavors.names", || {
                self.schema
                    .flavors
                    .names
                    .is_empty()
                    .then(|| "At least one flavor is required".to_string())
            })
            .custom("flavors.names", || {
                let mut seen = HashSet::new();
                self.schema
                    .flavors
                    .names
                    .iter()
                    .find(|name| !seen.insert(name.to_ascii_lowercase()))
                    .map(|name| format!("Duplicate flavor: {}", name))
            });

        for name in &self.schema.flavors.names {
            validator = validator.pattern(
                "flavors.names",
                name,
                r"^[A-Za-z][A-Za-z0-9_]*$",
                "an identifier (letters, digits, underscore)",
            );
        }

        validator
            .one_of(
                "logging.level",
                &self.schema.logging.level.to_ascii_lowercase(),
                &["error", "warn", "info", "debug", "trace", "off"],
            )
            .warn_if(
                "xcode.project",
                Path::new(&xcode.project).is_absolute(),
                "Absolute project path, --project-dir is ignored",
            )
            .warn_if(
                "xcode.stripped_settings",
                xcode.stripped_settings.is_empty(),
                "No build settings are stripped from the flavor configurations",
            )
            .validate()
    }

    fn describe_source(&self) -> String {
        match &self.path {
            Some(p) => format!("While loading {}", p.display()),
            None => "While applying default configuration".to_string(),
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file(base_dir: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| base_dir.join(candidate))
        .find(|p| p.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path.display(), e))
            .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            crate::ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path.display(), e),
        )
        .with_source(e)
    })
}
