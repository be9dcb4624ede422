//! `project.pbxproj` object graph
//!
//! The file is one plist dictionary whose `objects` entry maps 24-digit hex
//! ids to object dictionaries tagged with `isa`. [`PbxDocument`] keeps that
//! graph addressable by id and writes it back in the layout Xcode itself
//! produces, so an untouched project survives a load/save cycle.

use crate::plist::{self, Dict, Value};
use passvault_core::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

const HEADER: &str = "// !$*UTF8*$!";

/// Objects Xcode writes on a single line
const SINGLE_LINE_ISAS: [&str; 2] = ["PBXBuildFile", "PBXFileReference"];

/// Keys whose id values Xcode writes without a `/* name */` annotation
const UNANNOTATED_KEYS: [&str; 2] = ["remoteGlobalIDString", "TestTargetID"];

/// A parsed project file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbxDocument {
    /// Top-level keys other than `objects` and `rootObject`
    header: Dict,
    objects: BTreeMap<String, Dict>,
    root_object: String,
}

impl PbxDocument {
    /// Parse project file contents
    pub fn parse(content: &str) -> Result<Self> {
        let Value::Dict(mut root) = plist::parse(content)? else {
            return Err(Error::invalid_project("Project file root is not a dictionary"));
        };

        let root_object = match root.remove("rootObject") {
            Some(Value::String(id)) => id,
            _ => return Err(Error::invalid_project("Project file has no rootObject")),
        };

        let raw_objects = match root.remove("objects") {
            Some(Value::Dict(objects)) => objects,
            _ => return Err(Error::invalid_project("Project file has no objects dictionary")),
        };

        let mut objects = BTreeMap::new();
        for (id, value) in raw_objects {
            let Value::Dict(object) = value else {
                return Err(Error::invalid_project(format!(
                    "Object {} is not a dictionary",
                    id
                )));
            };
            if !matches!(object.get("isa"), Some(Value::String(_))) {
                return Err(Error::invalid_project(format!("Object {} has no isa", id)));
            }
            objects.insert(id, object);
        }

        if !objects.contains_key(&root_object) {
            return Err(Error::object_not_found(&root_object).with_context("Resolving rootObject"));
        }

        Ok(Self {
            header: root,
            objects,
            root_object,
        })
    }

    /// Id of the PBXProject object
    pub fn root_object_id(&self) -> &str {
        &self.root_object
    }

    /// All objects by id
    pub fn objects(&self) -> &BTreeMap<String, Dict> {
        &self.objects
    }

    pub fn object(&self, id: &str) -> Option<&Dict> {
        self.objects.get(id)
    }

    pub fn object_mut(&mut self, id: &str) -> Option<&mut Dict> {
        self.objects.get_mut(id)
    }

    /// Object by id, failing when a reference dangles
    pub fn require(&self, id: &str) -> Result<&Dict> {
        self.objects.get(id).ok_or_else(|| Error::object_not_found(id))
    }

    pub fn require_mut(&mut self, id: &str) -> Result<&mut Dict> {
        self.objects
            .get_mut(id)
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub fn isa(&self, id: &str) -> Option<&str> {
        self.objects.get(id)?.get("isa")?.as_str()
    }

    /// String property of an object
    pub fn string_property(&self, id: &str, key: &str) -> Option<&str> {
        self.objects.get(id)?.get(key)?.as_str()
    }

    /// Ids of all objects with the given isa
    pub fn ids_with_isa<'a>(&'a self, isa: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.objects
            .iter()
            .filter(move |(_, object)| object.get("isa").and_then(Value::as_str) == Some(isa))
            .map(|(id, _)| id.as_str())
    }

    /// Insert a new object and return its generated id
    pub fn insert_object(&mut self, isa: &str, mut properties: Dict) -> String {
        let id = self.generate_id();
        properties.insert("isa".to_string(), Value::from(isa));
        self.objects.insert(id.clone(), properties);
        id
    }

    /// Fresh object id that does not collide with an existing one
    pub fn generate_id(&self) -> String {
        loop {
            let id: String = uuid::Uuid::new_v4()
                .simple()
                .to_string()
                .to_ascii_uppercase()
                .chars()
                .take(24)
                .collect();
            if !self.objects.contains_key(&id) {
                return id;
            }
        }
    }

    /// Serialize in Xcode's layout
    pub fn write(&self, project_name: &str) -> String {
        let names = DisplayNames::build(self, project_name);
        let mut out = String::with_capacity(64 * self.objects.len());

        out.push_str(HEADER);
        out.push_str("\n{\n");

        let mut keys: Vec<&str> = self.header.keys().map(String::as_str).collect();
        keys.extend(["objects", "rootObject"]);
        keys.sort_unstable();

        for key in keys {
            match key {
                "objects" => {
                    out.push_str("\tobjects = {\n");
                    self.write_sections(&mut out, &names);
                    out.push_str("\t};\n");
                }
                "rootObject" => {
                    let _ = writeln!(
                        out,
                        "\trootObject = {};",
                        names.reference(&self.root_object)
                    );
                }
                _ => {
                    let _ = write!(out, "\t{} = ", plist::quote(key));
                    write_value(&mut out, &self.header[key], 1, &names, false);
                    out.push_str(";\n");
                }
            }
        }

        out.push_str("}\n");
        out
    }

    fn write_sections(&self, out: &mut String, names: &DisplayNames) {
        let mut sections: BTreeMap<&str, Vec<(&String, &Dict)>> = BTreeMap::new();
        for (id, object) in &self.objects {
            let isa = object.get("isa").and_then(Value::as_str).unwrap_or_default();
            sections.entry(isa).or_default().push((id, object));
        }

        for (isa, objects) in sections {
            let single_line = SINGLE_LINE_ISAS.contains(&isa);
            let _ = writeln!(out, "\n/* Begin {} section */", isa);
            for (id, object) in objects {
                let _ = write!(out, "\t\t{} = ", names.reference(id));
                write_object(out, object, names, single_line);
                out.push_str(";\n");
            }
            let _ = writeln!(out, "/* End {} section */", isa);
        }
    }
}

/// Keys ordered the way Xcode writes them: `isa` first, the rest sorted
fn ordered_entries(dict: &Dict) -> impl Iterator<Item = (&String, &Value)> {
    let isa = dict.get_key_value("isa");
    isa.into_iter()
        .chain(dict.iter().filter(|(key, _)| key.as_str() != "isa"))
}

fn write_object(out: &mut String, object: &Dict, names: &DisplayNames, single_line: bool) {
    if single_line {
        out.push('{');
        for (key, value) in ordered_entries(object) {
            let _ = write!(out, "{} = ", plist::quote(key));
            write_entry_value(out, key, value, 0, names, true);
            out.push_str("; ");
        }
        out.push('}');
    } else {
        out.push_str("{\n");
        for (key, value) in ordered_entries(object) {
            let _ = write!(out, "\t\t\t{} = ", plist::quote(key));
            write_entry_value(out, key, value, 3, names, false);
            out.push_str(";\n");
        }
        out.push_str("\t\t}");
    }
}

fn write_value(out: &mut String, value: &Value, depth: usize, names: &DisplayNames, inline: bool) {
    match value {
        Value::String(s) => out.push_str(&names.reference(s)),
        Value::Array(items) if inline => {
            out.push('(');
            for item in items {
                write_value(out, item, depth, names, true);
                out.push_str(", ");
            }
            out.push(')');
        }
        Value::Array(items) => {
            out.push_str("(\n");
            for item in items {
                push_indent(out, depth + 1);
                write_value(out, item, depth + 1, names, false);
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push(')');
        }
        Value::Dict(dict) if inline => {
            out.push('{');
            for (key, value) in dict {
                let _ = write!(out, "{} = ", plist::quote(key));
                write_entry_value(out, key, value, depth, names, true);
                out.push_str("; ");
            }
            out.push('}');
        }
        Value::Dict(dict) => {
            out.push_str("{\n");
            for (key, value) in dict {
                push_indent(out, depth + 1);
                let _ = write!(out, "{} = ", plist::quote(key));
                write_entry_value(out, key, value, depth + 1, names, false);
                out.push_str(";\n");
            }
            push_indent(out, depth);
            out.push('}');
        }
    }
}

fn write_entry_value(
    out: &mut String,
    key: &str,
    value: &Value,
    depth: usize,
    names: &DisplayNames,
    inline: bool,
) {
    match value {
        Value::String(s) if UNANNOTATED_KEYS.contains(&key) => out.push_str(&plist::quote(s)),
        _ => write_value(out, value, depth, names, inline),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

/// Annotation comments for object references, e.g. `/* Debug-Dev */`
struct DisplayNames {
    names: HashMap<String, String>,
}

impl DisplayNames {
    fn build(doc: &PbxDocument, project_name: &str) -> Self {
        let mut names = HashMap::new();

        for (id, object) in &doc.objects {
            if let Some(name) = base_display_name(object, id == &doc.root_object) {
                names.insert(id.clone(), name);
            }
        }

        // Owners of configuration lists and build phases of build files
        let mut extra = Vec::new();
        for (id, object) in &doc.objects {
            let owner = if id == &doc.root_object {
                Some(format!("PBXProject \"{}\"", project_name))
            } else {
                object.get("name").and_then(Value::as_str).and_then(|name| {
                    let isa = object.get("isa").and_then(Value::as_str)?;
                    isa.ends_with("Target").then(|| format!("{} \"{}\"", isa, name))
                })
            };
            if let (Some(owner), Some(list)) = (
                owner,
                object.get("buildConfigurationList").and_then(Value::as_str),
            ) {
                extra.push((list.to_string(), format!("Build configuration list for {}", owner)));
            }

            if let (Some(phase), Some(files)) = (names.get(id), object.get("files")) {
                for file in files.string_items() {
                    let file_name = doc
                        .objects
                        .get(file)
                        .and_then(|bf| bf.get("fileRef").or_else(|| bf.get("productRef")))
                        .and_then(Value::as_str)
                        .and_then(|file_ref| names.get(file_ref))
                        .map_or("(null)", String::as_str);
                    extra.push((file.to_string(), format!("{} in {}", file_name, phase)));
                }
            }
        }
        names.extend(extra);

        Self { names }
    }

    /// A string value, annotated when it names a known object
    fn reference(&self, value: &str) -> String {
        match self.names.get(value) {
            Some(name) => format!("{} /* {} */", value, name.replace("*/", "*_/")),
            None => plist::quote(value).into_owned(),
        }
    }
}

fn base_display_name(object: &Dict, is_root: bool) -> Option<String> {
    if is_root {
        return Some("Project object".to_string());
    }
    let isa = object.get("isa").and_then(Value::as_str)?;
    let name = object.get("name").and_then(Value::as_str);
    let path = object.get("path").and_then(Value::as_str);

    let display = match isa {
        "PBXFileReference" | "PBXGroup" | "PBXVariantGroup" | "XCVersionGroup"
        | "PBXReferenceProxy" => name
            .map(str::to_string)
            .or_else(|| path.map(|p| p.rsplit('/').next().unwrap_or(p).to_string()))?,
        "PBXSourcesBuildPhase" => "Sources".to_string(),
        "PBXFrameworksBuildPhase" => "Frameworks".to_string(),
        "PBXResourcesBuildPhase" => "Resources".to_string(),
        "PBXHeadersBuildPhase" => "Headers".to_string(),
        "PBXCopyFilesBuildPhase" => name.unwrap_or("CopyFiles").to_string(),
        "PBXShellScriptBuildPhase" => name.unwrap_or("ShellScript").to_string(),
        "PBXContainerItemProxy" | "PBXTargetDependency" => isa.to_string(),
        "PBXBuildFile" | "XCConfigurationList" => return None,
        _ => name?.to_string(),
    };
    Some(display)
}
