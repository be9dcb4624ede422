//! Xcode project tooling for PassVault flavors
//!
//! Keeps `ios/Runner.xcodeproj` in step with the Android product flavors:
//!
//! - **plist / pbxproj**: Read and write `project.pbxproj` without losing content
//! - **project**: Typed access to targets, build configurations and groups
//! - **variant**: Base kinds, flavors and the names derived from them
//! - **scheme**: Shared `.xcscheme` files
//! - **sync**: The configuration synchronizer
//! - **status**: Drift report against the synchronized state
//!
//! # Example
//!
//! ```rust,no_run
//! use passvault_xcode::sync::{sync_project, SyncOptions};
//! use std::path::Path;
//!
//! let report = sync_project(Path::new("Runner.xcodeproj"), &SyncOptions::default())
//!     .expect("sync failed");
//! println!("{} schemes created", report.created_schemes().count());
//! ```

pub mod pbxproj;
pub mod plist;
pub mod project;
pub mod scheme;
pub mod status;
pub mod sync;
pub mod variant;

#[cfg(test)]
mod testing;

pub use project::{BuildConfiguration, Target, XcodeProject};
pub use scheme::Scheme;
pub use status::ProjectStatus;
pub use sync::{sync_project, synchronize, SyncOptions, SyncReport};
pub use variant::{BaseKind, Flavor, SchemeAction};
