//! Core utilities for the PassVault flavor tools
//!
//! This crate provides shared functionality used by the Xcode and Android tooling:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults for the PassVault layout
//! - **Validation**: Fluent validation of configuration values
//!
//! # Example
//!
//! ```rust,no_run
//! use passvault_core::config::Config;
//!
//! let config = Config::load(None).expect("Invalid configuration");
//! println!("Flavors: {}", config.schema.flavors.names.join(", "));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
