//! Flavor configuration synchronizer
//!
//! Makes an Xcode project carry one build configuration per base kind and
//! flavor, at project scope and in every target, each based on its own
//! `.xcconfig` file, plus one shared scheme per flavor. Existing
//! configurations are edited in place and existing schemes are left alone, so
//! running it again changes nothing.

use crate::project::XcodeProject;
use crate::scheme::{BuildableReference, Scheme};
use crate::variant::{default_flavors, BaseKind, Flavor, STRIPPED_SETTINGS};
use passvault_core::config::ConfigSchema;
use passvault_core::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// What to synchronize
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub flavors: Vec<Flavor>,
    /// Target the schemes build and run
    pub primary_target: String,
    /// Group holding the `.xcconfig` files
    pub settings_group: String,
    pub stripped_settings: Vec<String>,
    /// Compute the changes without writing anything
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            flavors: default_flavors(),
            primary_target: "Runner".to_string(),
            settings_group: "Flutter".to_string(),
            stripped_settings: STRIPPED_SETTINGS.iter().map(|s| s.to_string()).collect(),
            dry_run: false,
        }
    }
}

impl SyncOptions {
    pub fn from_config(config: &ConfigSchema) -> Result<Self> {
        Ok(Self {
            flavors: Flavor::parse_all(&config.flavors.names)?,
            primary_target: config.xcode.primary_target.clone(),
            settings_group: config.xcode.settings_group.clone(),
            stripped_settings: config.xcode.stripped_settings.clone(),
            dry_run: false,
        })
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Where a configuration lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    Project,
    Target(String),
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigScope::Project => f.write_str("project"),
            ConfigScope::Target(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
}

/// One composite configuration visited by the synchronizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationChange {
    pub scope: ConfigScope,
    pub name: String,
    pub kind: ChangeKind,
    /// The settings file reference had to be set or replaced
    pub rebound: bool,
    /// Stripped keys that were present
    pub stripped: Vec<String>,
}

impl ConfigurationChange {
    /// Whether the project file differs because of this entry
    pub fn is_change(&self) -> bool {
        self.kind == ChangeKind::Created || self.rebound || !self.stripped.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeChange {
    pub flavor: String,
    pub path: PathBuf,
    /// False when the scheme already existed and was skipped
    pub created: bool,
}

/// Everything a synchronization did, in processing order
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub configurations: Vec<ConfigurationChange>,
    /// Paths of settings file references added to the project
    pub file_references: Vec<String>,
    pub schemes: Vec<SchemeChange>,
    pub dry_run: bool,
}

impl SyncReport {
    /// Configurations created in a scope
    pub fn created_in(&self, scope: &ConfigScope) -> Vec<&str> {
        self.configurations
            .iter()
            .filter(|c| c.kind == ChangeKind::Created && &c.scope == scope)
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn created_schemes(&self) -> impl Iterator<Item = &SchemeChange> {
        self.schemes.iter().filter(|s| s.created)
    }

    /// Whether the project or its schemes differ after the run
    pub fn has_changes(&self) -> bool {
        !self.file_references.is_empty()
            || self.configurations.iter().any(ConfigurationChange::is_change)
            || self.schemes.iter().any(|s| s.created)
    }
}

/// Open the project at `path`, synchronize it and save it
pub fn sync_project(path: &Path, options: &SyncOptions) -> Result<SyncReport> {
    let mut project = XcodeProject::open(path)?;
    let report = synchronize(&mut project, options)?;

    if options.dry_run {
        tracing::info!(project = %path.display(), "Dry run, project not saved");
    } else {
        project.save()?;
    }
    Ok(report)
}

/// Synchronize an opened project
///
/// Shared schemes are written as their flavor completes unless
/// `options.dry_run` is set. The project itself is only changed in memory;
/// saving it is up to the caller.
pub fn synchronize(project: &mut XcodeProject, options: &SyncOptions) -> Result<SyncReport> {
    // Every precondition is checked before the first mutation
    let primary = project
        .find_target(&options.primary_target)?
        .ok_or_else(|| Error::target_not_found(&options.primary_target))?;
    let main_group = project.main_group()?;
    let group = project
        .find_child_group(&main_group, &options.settings_group)?
        .ok_or_else(|| Error::group_not_found(&options.settings_group))?;
    let project_list = project.project_configuration_list()?;
    let targets = project.targets()?;

    let mut report = SyncReport {
        dry_run: options.dry_run,
        ..SyncReport::default()
    };
    let buildable = BuildableReference::for_target(project, &primary);

    for flavor in &options.flavors {
        for kind in BaseKind::ALL {
            let name = flavor.configuration_name(kind);
            let file_ref = resolve_settings_file(
                project,
                &group,
                &options.settings_group,
                &flavor.xcconfig_file_name(kind),
                &mut report,
            )?;

            let change = apply_configuration(
                project,
                &project_list,
                ConfigScope::Project,
                kind,
                &name,
                &file_ref,
                &options.stripped_settings,
            )?;
            report.configurations.push(change);

            for target in &targets {
                let change = apply_configuration(
                    project,
                    &target.configuration_list_id,
                    ConfigScope::Target(target.name.clone()),
                    kind,
                    &name,
                    &file_ref,
                    &options.stripped_settings,
                )?;
                report.configurations.push(change);
            }
        }

        let path = Scheme::shared_path(project, flavor);
        if path.exists() {
            tracing::info!(scheme = %flavor, path = %path.display(), "Scheme exists, skipping");
            report.schemes.push(SchemeChange {
                flavor: flavor.to_string(),
                path,
                created: false,
            });
            continue;
        }

        let scheme = Scheme::for_flavor(flavor, buildable.clone());
        let path = if options.dry_run {
            tracing::debug!(scheme = %flavor, "Dry run, scheme not written");
            path
        } else {
            scheme.save_as(project)?
        };
        report.schemes.push(SchemeChange {
            flavor: flavor.to_string(),
            path,
            created: true,
        });
    }

    Ok(report)
}

/// File reference of a settings file in the settings group, added if missing
fn resolve_settings_file(
    project: &mut XcodeProject,
    group_id: &str,
    group_name: &str,
    file_name: &str,
    report: &mut SyncReport,
) -> Result<String> {
    let nested = format!("{}/{}", group_name, file_name);
    if let Some(existing) = project
        .group_files(group_id)?
        .into_iter()
        .find(|f| f.path == file_name || f.path == nested)
    {
        tracing::debug!(file = file_name, id = %existing.id, "Reusing settings file reference");
        return Ok(existing.id);
    }

    // A group without a directory of its own keeps its files under its name
    let path = if project.group_path(group_id).is_some() {
        file_name.to_string()
    } else {
        nested
    };
    let id = project.new_file(group_id, &path)?;
    tracing::info!(file = %path, "Added settings file reference");
    report.file_references.push(path);
    Ok(id)
}

/// Create or update one composite configuration in a configuration list
fn apply_configuration(
    project: &mut XcodeProject,
    list_id: &str,
    scope: ConfigScope,
    kind: BaseKind,
    name: &str,
    file_ref: &str,
    stripped_settings: &[String],
) -> Result<ConfigurationChange> {
    let (config_id, change_kind, rebound) =
        match project.find_build_configuration(list_id, name)? {
            Some(existing) => {
                let rebound = existing.base_configuration_reference.as_deref() != Some(file_ref);
                (existing.id, ChangeKind::Updated, rebound)
            }
            None => {
                let settings = match project.find_build_configuration(list_id, kind.name())? {
                    Some(base) => base.build_settings,
                    None => {
                        tracing::debug!(
                            scope = %scope,
                            kind = %kind,
                            "No base configuration, seeding {} defaults",
                            kind.classification()
                        );
                        kind.classification().default_build_settings()
                    }
                };
                let id = project.add_build_configuration(list_id, name, settings)?;
                (id, ChangeKind::Created, true)
            }
        };

    project.set_base_configuration_reference(&config_id, file_ref)?;

    let mut stripped = Vec::new();
    for key in stripped_settings {
        if project.remove_build_setting(&config_id, key)? {
            stripped.push(key.clone());
        }
    }

    match change_kind {
        ChangeKind::Created => {
            tracing::info!(scope = %scope, configuration = name, "Created configuration")
        }
        ChangeKind::Updated => {
            tracing::info!(scope = %scope, configuration = name, "Updated configuration")
        }
    }

    Ok(ConfigurationChange {
        scope,
        name: name.to_string(),
        kind: change_kind,
        rebound,
        stripped,
    })
}
