//! Configuration loading and schema definitions
//!
//! Shared configuration types used by the Xcode and Android tooling.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
