//! Android side of the PassVault flavor tools
//!
//! This crate reads what the Android build declares so it can be checked
//! against the Xcode project:
//! - Product flavors, ABI filters, build types and signing configs from the
//!   app's Gradle build script
//! - The keystore properties the signing configs read
//! - Flavor consistency between both platforms

pub mod consistency;
pub mod gradle;
pub mod keystore;

#[cfg(test)]
mod testing;

pub use consistency::{check_flavor_consistency, FlavorConsistency};
pub use gradle::{BuildType, GradleBuild, ProductFlavor, SigningConfig};
pub use keystore::KeystoreProperties;
