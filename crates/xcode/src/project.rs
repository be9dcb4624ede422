//! Xcode project file manipulation
//!
//! Typed access to the parts of `.xcodeproj/project.pbxproj` the flavor
//! tooling reads and edits: targets, configuration lists, build
//! configurations, groups and file references. Everything else in the file
//! is carried through untouched.

use crate::pbxproj::PbxDocument;
use crate::plist::{Dict, Value};
use passvault_core::error::{Error, Result, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project file inside the bundle
pub const PBXPROJ_FILE_NAME: &str = "project.pbxproj";

/// Represents an Xcode project
#[derive(Debug)]
pub struct XcodeProject {
    /// The `.xcodeproj` bundle
    pub path: PathBuf,
    /// Directory containing the bundle
    pub project_dir: PathBuf,
    doc: PbxDocument,
}

/// Target in the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: String,
    pub name: String,
    pub product_type: Option<String>,
    /// File name of the built product, e.g. `Runner.app`
    pub product_file_name: String,
    pub configuration_list_id: String,
}

/// A named build configuration inside a configuration list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub id: String,
    pub name: String,
    pub build_settings: Dict,
    /// File reference of the `.xcconfig` this configuration is based on
    pub base_configuration_reference: Option<String>,
}

impl BuildConfiguration {
    /// String value of a build setting
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.build_settings.get(key).and_then(Value::as_str)
    }
}

/// File reference in the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub id: String,
    pub path: String,
    pub name: Option<String>,
    pub source_tree: String,
}

impl XcodeProject {
    /// Open an Xcode project bundle
    pub fn open(path: &Path) -> Result<Self> {
        let pbxproj_path = path.join(PBXPROJ_FILE_NAME);
        if !pbxproj_path.is_file() {
            return Err(Error::project_not_found(path));
        }

        let content = fs::read_to_string(&pbxproj_path)?;
        let doc = PbxDocument::parse(&content)
            .context(format!("While reading {}", pbxproj_path.display()))?;

        let project_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::debug!(
            project = %path.display(),
            objects = doc.objects().len(),
            "Opened Xcode project"
        );

        Ok(Self {
            path: path.to_path_buf(),
            project_dir,
            doc,
        })
    }

    /// Project name, the bundle name without `.xcodeproj`
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Project".to_string())
    }

    pub fn document(&self) -> &PbxDocument {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut PbxDocument {
        &mut self.doc
    }

    /// Write the whole project file back in one go
    pub fn save(&self) -> Result<()> {
        let pbxproj_path = self.path.join(PBXPROJ_FILE_NAME);
        fs::write(&pbxproj_path, self.doc.write(&self.name()))
            .map_err(Error::from)
            .context(format!("While saving {}", pbxproj_path.display()))?;
        tracing::info!(project = %self.path.display(), "Saved Xcode project");
        Ok(())
    }

    /// Directory holding schemes shared with all users of the project
    pub fn shared_schemes_dir(&self) -> PathBuf {
        self.path.join("xcshareddata").join("xcschemes")
    }

    fn root(&self) -> Result<&Dict> {
        self.doc.require(self.doc.root_object_id())
    }

    /// Targets in declaration order
    pub fn targets(&self) -> Result<Vec<Target>> {
        let root = self.root()?;
        let ids = root.get("targets").map(Value::string_items).unwrap_or_default();

        ids.into_iter().map(|id| self.target(id)).collect()
    }

    fn target(&self, id: &str) -> Result<Target> {
        let object = self.doc.require(id)?;
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid_project(format!("Target {} has no name", id)))?
            .to_string();
        let configuration_list_id = object
            .get("buildConfigurationList")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::invalid_project(format!("Target {} has no configuration list", name))
            })?
            .to_string();

        let product_file_name = object
            .get("productReference")
            .and_then(Value::as_str)
            .and_then(|file_ref| self.doc.string_property(file_ref, "path"))
            .map(str::to_string)
            .unwrap_or_else(|| {
                let product = object
                    .get("productName")
                    .and_then(Value::as_str)
                    .unwrap_or(name.as_str());
                format!("{}.app", product)
            });

        Ok(Target {
            id: id.to_string(),
            product_type: object
                .get("productType")
                .and_then(Value::as_str)
                .map(str::to_string),
            name,
            product_file_name,
            configuration_list_id,
        })
    }

    /// Find target by name
    pub fn find_target(&self, name: &str) -> Result<Option<Target>> {
        Ok(self.targets()?.into_iter().find(|t| t.name == name))
    }

    /// Configuration list of the project itself
    pub fn project_configuration_list(&self) -> Result<String> {
        self.root()?
            .get("buildConfigurationList")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::invalid_project("Project has no configuration list"))
    }

    fn configuration_ids(&self, list_id: &str) -> Result<Vec<String>> {
        let list = self.doc.require(list_id)?;
        Ok(list
            .get("buildConfigurations")
            .map(Value::string_items)
            .unwrap_or_default()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Build configurations of a configuration list, in list order
    pub fn build_configurations(&self, list_id: &str) -> Result<Vec<BuildConfiguration>> {
        self.configuration_ids(list_id)?
            .into_iter()
            .map(|id| self.build_configuration(&id))
            .collect()
    }

    /// Build configuration by id
    pub fn build_configuration(&self, id: &str) -> Result<BuildConfiguration> {
        let object = self.doc.require(id)?;
        Ok(BuildConfiguration {
            id: id.to_string(),
            name: object
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            build_settings: object
                .get("buildSettings")
                .and_then(Value::as_dict)
                .cloned()
                .unwrap_or_default(),
            base_configuration_reference: object
                .get("baseConfigurationReference")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Build configuration of a list by name
    pub fn find_build_configuration(
        &self,
        list_id: &str,
        name: &str,
    ) -> Result<Option<BuildConfiguration>> {
        Ok(self
            .build_configurations(list_id)?
            .into_iter()
            .find(|bc| bc.name == name))
    }

    /// Append a new build configuration to a list
    pub fn add_build_configuration(
        &mut self,
        list_id: &str,
        name: &str,
        build_settings: Dict,
    ) -> Result<String> {
        self.doc.require(list_id)?;

        let mut properties = Dict::new();
        properties.insert("buildSettings".to_string(), Value::Dict(build_settings));
        properties.insert("name".to_string(), Value::from(name));
        let id = self.doc.insert_object("XCBuildConfiguration", properties);

        let list = self.doc.require_mut(list_id)?;
        list.entry("buildConfigurations".to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or_else(|| {
                Error::invalid_project(format!(
                    "buildConfigurations of {} is not an array",
                    list_id
                ))
            })?
            .push(Value::from(id.clone()));

        tracing::debug!(configuration = name, id = %id, "Added build configuration");
        Ok(id)
    }

    /// Point a build configuration at an `.xcconfig` file reference
    pub fn set_base_configuration_reference(
        &mut self,
        config_id: &str,
        file_ref_id: &str,
    ) -> Result<()> {
        self.doc.require(file_ref_id)?;
        self.doc.require_mut(config_id)?.insert(
            "baseConfigurationReference".to_string(),
            Value::from(file_ref_id),
        );
        Ok(())
    }

    /// Remove a build setting, returning whether it was present
    pub fn remove_build_setting(&mut self, config_id: &str, key: &str) -> Result<bool> {
        let config = self.doc.require_mut(config_id)?;
        Ok(config
            .get_mut("buildSettings")
            .and_then(Value::as_dict_mut)
            .is_some_and(|settings| settings.remove(key).is_some()))
    }

    /// The project's top-level group
    pub fn main_group(&self) -> Result<String> {
        self.root()?
            .get("mainGroup")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::invalid_project("Project has no main group"))
    }

    fn children(&self, group_id: &str) -> Result<Vec<String>> {
        Ok(self
            .doc
            .require(group_id)?
            .get("children")
            .map(Value::string_items)
            .unwrap_or_default()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Child group matched by name, or by path when it has no name
    pub fn find_child_group(&self, parent_id: &str, name: &str) -> Result<Option<String>> {
        Ok(self.children(parent_id)?.into_iter().find(|child| {
            self.doc.isa(child) == Some("PBXGroup")
                && self
                    .doc
                    .string_property(child, "name")
                    .or_else(|| self.doc.string_property(child, "path"))
                    == Some(name)
        }))
    }

    /// Directory of a group relative to its parent, when it has one
    pub fn group_path(&self, group_id: &str) -> Option<&str> {
        self.doc.string_property(group_id, "path")
    }

    /// File references directly inside a group
    pub fn group_files(&self, group_id: &str) -> Result<Vec<FileReference>> {
        Ok(self
            .children(group_id)?
            .into_iter()
            .filter(|child| self.doc.isa(child) == Some("PBXFileReference"))
            .map(|id| FileReference {
                path: self
                    .doc
                    .string_property(&id, "path")
                    .unwrap_or_default()
                    .to_string(),
                name: self.doc.string_property(&id, "name").map(str::to_string),
                source_tree: self
                    .doc
                    .string_property(&id, "sourceTree")
                    .unwrap_or("<group>")
                    .to_string(),
                id,
            })
            .collect())
    }

    /// Add a group-relative file reference to a group
    pub fn new_file(&mut self, group_id: &str, path: &str) -> Result<String> {
        self.doc.require(group_id)?;

        let mut properties = Dict::new();
        properties.insert(
            "lastKnownFileType".to_string(),
            Value::from(last_known_file_type(path)),
        );
        if let Some((_, file_name)) = path.rsplit_once('/') {
            properties.insert("name".to_string(), Value::from(file_name));
        }
        properties.insert("path".to_string(), Value::from(path));
        properties.insert("sourceTree".to_string(), Value::from("<group>"));
        let id = self.doc.insert_object("PBXFileReference", properties);

        self.doc
            .require_mut(group_id)?
            .entry("children".to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
            .as_array_mut()
            .ok_or_else(|| {
                Error::invalid_project(format!("children of {} is not an array", group_id))
            })?
            .push(Value::from(id.clone()));

        tracing::debug!(path, id = %id, "Added file reference");
        Ok(id)
    }
}

fn last_known_file_type(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("xcconfig") => "text.xcconfig",
        Some("plist") => "text.plist.xml",
        Some("swift") => "sourcecode.swift",
        Some("h") => "sourcecode.c.h",
        Some("m") => "sourcecode.c.objc",
        _ => "text",
    }
}
