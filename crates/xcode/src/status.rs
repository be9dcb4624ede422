//! Read-only report of how far a project is from the synchronized state

use crate::project::XcodeProject;
use crate::scheme::{read_bindings, Scheme};
use crate::sync::{ConfigScope, SyncOptions};
use crate::variant::{BaseKind, SchemeAction};
use passvault_core::error::Result;
use serde::Serialize;
use std::path::PathBuf;

/// State of one composite configuration in one scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationStatus {
    pub scope: ConfigScope,
    pub name: String,
    pub exists: bool,
    /// Path of the referenced settings file, if any
    pub settings_file: Option<String>,
    /// Whether that file is the configuration's own `.xcconfig`
    pub settings_file_matches: bool,
    /// Stripped keys still present
    pub stripped_present: Vec<String>,
}

impl ConfigurationStatus {
    pub fn is_ok(&self) -> bool {
        self.exists && self.settings_file_matches && self.stripped_present.is_empty()
    }
}

/// State of the shared scheme of one flavor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeStatus {
    pub flavor: String,
    pub path: PathBuf,
    pub exists: bool,
    /// Actions bound to something other than their flavor configuration
    pub mismatched: Vec<SchemeAction>,
}

impl SchemeStatus {
    pub fn is_ok(&self) -> bool {
        self.exists && self.mismatched.is_empty()
    }
}

/// Project status summary
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStatus {
    pub project: PathBuf,
    pub configurations: Vec<ConfigurationStatus>,
    pub schemes: Vec<SchemeStatus>,
}

impl ProjectStatus {
    pub fn inspect(project: &XcodeProject, options: &SyncOptions) -> Result<Self> {
        let mut lists = vec![(ConfigScope::Project, project.project_configuration_list()?)];
        for target in project.targets()? {
            lists.push((ConfigScope::Target(target.name), target.configuration_list_id));
        }

        let mut configurations = Vec::new();
        for flavor in &options.flavors {
            for kind in BaseKind::ALL {
                let name = flavor.configuration_name(kind);
                let expected_file = flavor.xcconfig_file_name(kind);
                for (scope, list) in &lists {
                    configurations.push(inspect_configuration(
                        project,
                        scope.clone(),
                        list,
                        &name,
                        &expected_file,
                        &options.stripped_settings,
                    )?);
                }
            }
        }

        let schemes = options
            .flavors
            .iter()
            .map(|flavor| {
                let path = Scheme::shared_path(project, flavor);
                if !path.is_file() {
                    return SchemeStatus {
                        flavor: flavor.to_string(),
                        path,
                        exists: false,
                        mismatched: Vec::new(),
                    };
                }

                let bindings = read_bindings(&path).unwrap_or_else(|err| {
                    tracing::warn!(path = %path.display(), error = %err, "Unreadable scheme");
                    Default::default()
                });
                let mismatched = SchemeAction::ALL
                    .into_iter()
                    .filter(|action| {
                        bindings.get(action).map(String::as_str)
                            != Some(action.configuration_for(flavor).as_str())
                    })
                    .collect();
                SchemeStatus {
                    flavor: flavor.to_string(),
                    path,
                    exists: true,
                    mismatched,
                }
            })
            .collect();

        Ok(Self {
            project: project.path.clone(),
            configurations,
            schemes,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.configurations.iter().all(ConfigurationStatus::is_ok)
            && self.schemes.iter().all(SchemeStatus::is_ok)
    }

    pub fn missing_configurations(&self) -> usize {
        self.configurations.iter().filter(|c| !c.exists).count()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn print(&self) {
        use owo_colors::OwoColorize;

        println!("{}", "Flavor Configuration Status".bold());
        println!();
        println!("  Project: {}", self.project.display());
        println!();

        for config in &self.configurations {
            let label = format!("{} ({})", config.name, config.scope);
            if config.is_ok() {
                println!("  {} {}", "✓".green(), label);
            } else if !config.exists {
                println!("  {} {} missing", "✗".red(), label);
            } else {
                let mut problems = Vec::new();
                if !config.settings_file_matches {
                    problems.push(match &config.settings_file {
                        Some(file) => format!("based on {}", file),
                        None => "no settings file".to_string(),
                    });
                }
                if !config.stripped_present.is_empty() {
                    problems.push(format!("sets {}", config.stripped_present.join(", ")));
                }
                println!("  {} {}: {}", "⚠".yellow(), label, problems.join("; "));
            }
        }

        println!();
        for scheme in &self.schemes {
            if scheme.is_ok() {
                println!("  {} {}.xcscheme", "✓".green(), scheme.flavor);
            } else if !scheme.exists {
                println!("  {} {}.xcscheme missing", "✗".red(), scheme.flavor);
            } else {
                let actions: Vec<String> =
                    scheme.mismatched.iter().map(|a| a.to_string()).collect();
                println!(
                    "  {} {}.xcscheme: unexpected {} configuration",
                    "⚠".yellow(),
                    scheme.flavor,
                    actions.join(", ")
                );
            }
        }
    }
}

fn inspect_configuration(
    project: &XcodeProject,
    scope: ConfigScope,
    list: &str,
    name: &str,
    expected_file: &str,
    stripped_settings: &[String],
) -> Result<ConfigurationStatus> {
    let Some(config) = project.find_build_configuration(list, name)? else {
        return Ok(ConfigurationStatus {
            scope,
            name: name.to_string(),
            exists: false,
            settings_file: None,
            settings_file_matches: false,
            stripped_present: Vec::new(),
        });
    };

    let settings_file = config
        .base_configuration_reference
        .as_deref()
        .and_then(|id| project.document().string_property(id, "path"))
        .map(str::to_string);
    let settings_file_matches = settings_file
        .as_deref()
        .is_some_and(|path| path.rsplit('/').next() == Some(expected_file));
    let stripped_present = stripped_settings
        .iter()
        .filter(|key| config.build_settings.contains_key(key.as_str()))
        .cloned()
        .collect();

    Ok(ConfigurationStatus {
        scope,
        name: name.to_string(),
        exists: true,
        settings_file,
        settings_file_matches,
        stripped_present,
    })
}
