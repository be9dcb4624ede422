//! Shared Xcode schemes
//!
//! Schemes live next to the project in `xcshareddata/xcschemes/<name>.xcscheme`
//! and bind a build configuration to each scheme action.

use crate::project::{Target, XcodeProject};
use crate::variant::{Flavor, SchemeAction};
use once_cell::sync::Lazy;
use passvault_core::error::{Error, Result, ResultExt};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const LAST_UPGRADE_VERSION: &str = "1510";
const SCHEME_VERSION: &str = "1.7";
const LLDB_DEBUGGER: &str = "Xcode.DebuggerFoundation.Debugger.LLDB";
const LLDB_LAUNCHER: &str = "Xcode.DebuggerFoundation.Launcher.LLDB";

static ACTION_CONFIGURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(\w+Action)\b[^>]*?\bbuildConfiguration\s*=\s*"([^"]*)""#)
        .expect("valid scheme regex")
});

/// Reference from a scheme to a target's product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildableReference {
    pub blueprint_identifier: String,
    pub buildable_name: String,
    pub blueprint_name: String,
    pub referenced_container: String,
}

impl BuildableReference {
    pub fn for_target(project: &XcodeProject, target: &Target) -> Self {
        let container = project
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            blueprint_identifier: target.id.clone(),
            buildable_name: target.product_file_name.clone(),
            blueprint_name: target.name.clone(),
            referenced_container: format!("container:{}", container),
        }
    }

    fn write_xml(&self, out: &mut String, indent: usize) {
        let pad = " ".repeat(indent);
        let _ = writeln!(out, "{pad}<BuildableReference");
        let _ = writeln!(out, "{pad}   BuildableIdentifier = \"primary\"");
        let _ = writeln!(
            out,
            "{pad}   BlueprintIdentifier = \"{}\"",
            xml_escape(&self.blueprint_identifier)
        );
        let _ = writeln!(out, "{pad}   BuildableName = \"{}\"", xml_escape(&self.buildable_name));
        let _ = writeln!(out, "{pad}   BlueprintName = \"{}\"", xml_escape(&self.blueprint_name));
        let _ = writeln!(
            out,
            "{pad}   ReferencedContainer = \"{}\">",
            xml_escape(&self.referenced_container)
        );
        let _ = writeln!(out, "{pad}</BuildableReference>");
    }
}

/// An Xcode scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    pub name: String,
    pub build_targets: Vec<BuildableReference>,
    /// Product launched by the launch and profile actions
    pub runnable: Option<BuildableReference>,
    configurations: BTreeMap<SchemeAction, String>,
}

impl Scheme {
    /// A scheme with Xcode's stock configurations
    pub fn new(name: impl Into<String>) -> Self {
        let configurations = SchemeAction::ALL
            .into_iter()
            .map(|action| {
                let stock = match action {
                    SchemeAction::Launch | SchemeAction::Test | SchemeAction::Analyze => "Debug",
                    SchemeAction::Profile | SchemeAction::Archive => "Release",
                };
                (action, stock.to_string())
            })
            .collect();
        Self {
            name: name.into(),
            build_targets: Vec::new(),
            runnable: None,
            configurations,
        }
    }

    /// The scheme of a flavor, building and running `target`
    pub fn for_flavor(flavor: &Flavor, target: BuildableReference) -> Self {
        let mut scheme = Self::new(flavor.as_str());
        for action in SchemeAction::ALL {
            scheme.set_build_configuration(action, action.configuration_for(flavor));
        }
        scheme.runnable = Some(target.clone());
        scheme.add_build_target(target);
        scheme
    }

    pub fn add_build_target(&mut self, target: BuildableReference) {
        self.build_targets.push(target);
    }

    pub fn set_build_configuration(&mut self, action: SchemeAction, name: impl Into<String>) {
        self.configurations.insert(action, name.into());
    }

    pub fn build_configuration(&self, action: SchemeAction) -> &str {
        self.configurations
            .get(&action)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Path of the shared scheme of a flavor
    pub fn shared_path(project: &XcodeProject, flavor: &Flavor) -> PathBuf {
        project.shared_schemes_dir().join(flavor.scheme_file_name())
    }

    /// Save as a shared scheme, returning the written path
    pub fn save_as(&self, project: &XcodeProject) -> Result<PathBuf> {
        let dir = project.shared_schemes_dir();
        fs::create_dir_all(&dir)
            .map_err(Error::from)
            .context(format!("While creating {}", dir.display()))?;

        let path = dir.join(format!("{}.xcscheme", self.name));
        fs::write(&path, self.to_xml())
            .map_err(Error::from)
            .context(format!("While writing {}", path.display()))?;
        tracing::info!(scheme = %self.name, path = %path.display(), "Saved scheme");
        Ok(path)
    }

    /// Render the `.xcscheme` document
    pub fn to_xml(&self) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(out, "<Scheme");
        let _ = writeln!(out, "   LastUpgradeVersion = \"{}\"", LAST_UPGRADE_VERSION);
        let _ = writeln!(out, "   version = \"{}\">", SCHEME_VERSION);

        out.push_str("   <BuildAction\n");
        out.push_str("      parallelizeBuildables = \"YES\"\n");
        out.push_str("      buildImplicitDependencies = \"YES\">\n");
        out.push_str("      <BuildActionEntries>\n");
        for target in &self.build_targets {
            out.push_str("         <BuildActionEntry\n");
            out.push_str("            buildForTesting = \"YES\"\n");
            out.push_str("            buildForRunning = \"YES\"\n");
            out.push_str("            buildForProfiling = \"YES\"\n");
            out.push_str("            buildForArchiving = \"YES\"\n");
            out.push_str("            buildForAnalyzing = \"YES\">\n");
            target.write_xml(&mut out, 12);
            out.push_str("         </BuildActionEntry>\n");
        }
        out.push_str("      </BuildActionEntries>\n");
        out.push_str("   </BuildAction>\n");

        self.open_action(&mut out, SchemeAction::Test, &[
            ("selectedDebuggerIdentifier", LLDB_DEBUGGER),
            ("selectedLauncherIdentifier", LLDB_LAUNCHER),
            ("shouldUseLaunchSchemeArgsEnv", "YES"),
        ]);
        out.push_str("      <Testables>\n      </Testables>\n");
        out.push_str("   </TestAction>\n");

        self.open_action(&mut out, SchemeAction::Launch, &[
            ("selectedDebuggerIdentifier", LLDB_DEBUGGER),
            ("selectedLauncherIdentifier", LLDB_LAUNCHER),
            ("launchStyle", "0"),
            ("useCustomWorkingDirectory", "NO"),
            ("ignoresPersistentStateOnLaunch", "NO"),
            ("debugDocumentVersioning", "YES"),
            ("debugServiceExtension", "internal"),
            ("allowLocationSimulation", "YES"),
        ]);
        self.write_runnable(&mut out);
        out.push_str("   </LaunchAction>\n");

        self.open_action(&mut out, SchemeAction::Profile, &[
            ("shouldUseLaunchSchemeArgsEnv", "YES"),
            ("savedToolIdentifier", ""),
            ("useCustomWorkingDirectory", "NO"),
            ("debugDocumentVersioning", "YES"),
        ]);
        self.write_runnable(&mut out);
        out.push_str("   </ProfileAction>\n");

        self.open_action(&mut out, SchemeAction::Analyze, &[]);
        out.push_str("   </AnalyzeAction>\n");

        self.open_action(&mut out, SchemeAction::Archive, &[("revealArchiveInOrganizer", "YES")]);
        out.push_str("   </ArchiveAction>\n");

        out.push_str("</Scheme>\n");
        out
    }

    fn open_action(&self, out: &mut String, action: SchemeAction, attributes: &[(&str, &str)]) {
        let _ = write!(
            out,
            "   <{}\n      buildConfiguration = \"{}\"",
            action.element(),
            xml_escape(self.build_configuration(action))
        );
        for (key, value) in attributes {
            let _ = write!(out, "\n      {} = \"{}\"", key, xml_escape(value));
        }
        out.push_str(">\n");
    }

    fn write_runnable(&self, out: &mut String) {
        if let Some(runnable) = &self.runnable {
            out.push_str("      <BuildableProductRunnable\n");
            out.push_str("         runnableDebuggingMode = \"0\">\n");
            runnable.write_xml(out, 9);
            out.push_str("      </BuildableProductRunnable>\n");
        }
    }
}

/// Configurations bound to each action of an existing scheme file
pub fn read_bindings(path: &Path) -> Result<BTreeMap<SchemeAction, String>> {
    let content = fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("While reading {}", path.display()))?;

    let bindings: BTreeMap<SchemeAction, String> = ACTION_CONFIGURATION_RE
        .captures_iter(&content)
        .filter_map(|cap| {
            let action = SchemeAction::ALL
                .into_iter()
                .find(|a| a.element() == &cap[1])?;
            Some((action, xml_unescape(&cap[2])))
        })
        .collect();

    if bindings.is_empty() && !content.contains("<Scheme") {
        return Err(Error::scheme(format!("{} is not an Xcode scheme", path.display())));
    }
    Ok(bindings)
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn xml_unescape(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
