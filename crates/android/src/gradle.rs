//! Gradle build script reader
//!
//! Extracts the flavor, ABI, build type and signing declarations of an Android
//! app module (`build.gradle.kts` or `build.gradle`). This is a pattern-based reader for
//! the declarative subset Flutter apps use, not a Kotlin evaluator.

use once_cell::sync::Lazy;
use passvault_core::error::{Error, Result, ResultExt};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

static FLAVOR_DIMENSIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*flavorDimensions\s*(?:\+=|=|\()?(.*)$").unwrap());
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["']([^"'\\]*)["']"#).unwrap());
static ABI_FILTERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*abiFilters\b(?:\s*\.\s*addAll)?(.*)$").unwrap());
static SIGNING_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"signingConfig\s*=?\s*signingConfigs\s*(?:\.\s*getByName\s*\(\s*"(\w+)"\s*\)|\[\s*"(\w+)"\s*\]|\.\s*(\w+))"#,
    )
    .unwrap()
});
static NAMED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:(create|register|getByName|maybeCreate)\s*\(\s*"(\w+)"\s*\)|\b(\w+))\s*\{"#)
        .unwrap()
});
static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*(\w+)\s*=?\s*"([^"]*)"\s*$"#).unwrap()
});
static RES_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"resValue\s*\(?\s*"(\w+)"\s*,\s*"(\w+)"\s*,\s*"([^"]*)"\s*\)?"#).unwrap()
});
static KEYSTORE_LOOKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*(\w+)\s*=.*?(?:getProperty\s*\(\s*|\[\s*)"(\w+)""#).unwrap()
});
static TOP_LEVEL_STRING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*(namespace|applicationId)\s*=?\s*"([^"]*)""#).unwrap()
});

/// A product flavor declared in `productFlavors`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductFlavor {
    pub name: String,
    pub dimension: Option<String>,
    pub application_id_suffix: Option<String>,
    pub version_name_suffix: Option<String>,
    /// `app_name` string resource, the launcher label
    pub app_name: Option<String>,
}

/// A signing config and the keystore properties it reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningConfig {
    pub name: String,
    /// Signing field (`keyAlias`, `storeFile`, ...) to keystore property key
    pub keystore_keys: BTreeMap<String, String>,
}

/// A build type declared in `buildTypes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildType {
    pub name: String,
    /// Name of the signing config assigned with `signingConfig = ...`
    pub signing_config: Option<String>,
}

/// Flavor-related declarations of an app module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GradleBuild {
    pub namespace: Option<String>,
    pub application_id: Option<String>,
    /// `ndk { abiFilters ... }` entries, in declaration order
    pub abi_filters: Vec<String>,
    pub flavor_dimensions: Vec<String>,
    pub product_flavors: Vec<ProductFlavor>,
    pub build_types: Vec<BuildType>,
    pub signing_configs: Vec<SigningConfig>,
}

impl GradleBuild {
    /// Load and parse a build script
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::gradle_file_not_found(path));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content).context(format!("While reading {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let content = strip_comments(content);
        let mut build = GradleBuild::default();

        for cap in TOP_LEVEL_STRING.captures_iter(&content) {
            let value = Some(cap[2].to_string());
            match &cap[1] {
                "namespace" => build.namespace = value,
                _ => build.application_id = value,
            }
        }

        for cap in FLAVOR_DIMENSIONS.captures_iter(&content) {
            for dim in QUOTED.captures_iter(&cap[1]) {
                push_unique(&mut build.flavor_dimensions, &dim[1]);
            }
        }

        for cap in ABI_FILTERS.captures_iter(&content) {
            for abi in QUOTED.captures_iter(&cap[1]) {
                push_unique(&mut build.abi_filters, &abi[1]);
            }
        }

        if let Some(body) = find_block(&content, "productFlavors")? {
            for (name, flavor_body) in named_blocks(body)? {
                build.product_flavors.push(parse_flavor(name, flavor_body));
            }
        }

        if let Some(body) = find_block(&content, "buildTypes")? {
            for (name, type_body) in named_blocks(body)? {
                let signing_config = SIGNING_REF.captures(type_body).and_then(|cap| {
                    cap.get(1)
                        .or_else(|| cap.get(2))
                        .or_else(|| cap.get(3))
                        .map(|m| m.as_str().to_string())
                });
                build.build_types.push(BuildType {
                    name: name.to_string(),
                    signing_config,
                });
            }
        }

        if let Some(body) = find_block(&content, "signingConfigs")? {
            for (name, config_body) in named_blocks(body)? {
                let keystore_keys = KEYSTORE_LOOKUP
                    .captures_iter(config_body)
                    .map(|cap| (cap[1].to_string(), cap[2].to_string()))
                    .collect();
                build.signing_configs.push(SigningConfig {
                    name: name.to_string(),
                    keystore_keys,
                });
            }
        }

        tracing::debug!(
            flavors = build.product_flavors.len(),
            build_types = build.build_types.len(),
            abis = build.abi_filters.len(),
            signing_configs = build.signing_configs.len(),
            "Parsed Gradle build"
        );
        Ok(build)
    }

    /// Declared flavor names, in declaration order
    pub fn flavor_names(&self) -> Vec<&str> {
        self.product_flavors.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn flavor(&self, name: &str) -> Option<&ProductFlavor> {
        self.product_flavors.iter().find(|f| f.name == name)
    }

    /// Signing configs some build type signs with, in declaration order
    ///
    /// The `debug` build type signs with the `debug` config unless it names
    /// another one, even when it is not declared in `buildTypes`.
    pub fn used_signing_configs(&self) -> Vec<&SigningConfig> {
        let debug_overridden = self
            .build_types
            .iter()
            .any(|t| t.name == "debug" && t.signing_config.is_some());

        self.signing_configs
            .iter()
            .filter(|c| {
                (c.name == "debug" && !debug_overridden)
                    || self
                        .build_types
                        .iter()
                        .any(|t| t.signing_config.as_deref() == Some(c.name.as_str()))
            })
            .collect()
    }

    /// Keystore property keys read by the signing configs in use
    pub fn required_keystore_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .used_signing_configs()
            .into_iter()
            .flat_map(|c| c.keystore_keys.values().map(String::as_str))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Build types naming a signing config that is not declared
    ///
    /// `debug` always exists, the Android plugin creates it.
    pub fn undeclared_signing_configs(&self) -> Vec<(&str, &str)> {
        self.build_types
            .iter()
            .filter_map(|t| {
                let config = t.signing_config.as_deref()?;
                let declared =
                    config == "debug" || self.signing_configs.iter().any(|c| c.name == config);
                (!declared).then_some((t.name.as_str(), config))
            })
            .collect()
    }

    /// Flavors whose dimension is not declared in `flavorDimensions`
    pub fn undeclared_dimensions(&self) -> Vec<(&str, &str)> {
        self.product_flavors
            .iter()
            .filter_map(|f| {
                let dim = f.dimension.as_deref()?;
                (!self.flavor_dimensions.iter().any(|d| d == dim)).then_some((f.name.as_str(), dim))
            })
            .collect()
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

fn parse_flavor(name: &str, body: &str) -> ProductFlavor {
    let mut flavor = ProductFlavor {
        name: name.to_string(),
        dimension: None,
        application_id_suffix: None,
        version_name_suffix: None,
        app_name: None,
    };

    for cap in ASSIGNMENT.captures_iter(body) {
        let value = Some(cap[2].to_string());
        match &cap[1] {
            "dimension" => flavor.dimension = value,
            "applicationIdSuffix" => flavor.application_id_suffix = value,
            "versionNameSuffix" => flavor.version_name_suffix = value,
            _ => {}
        }
    }

    flavor.app_name = RES_VALUE
        .captures_iter(body)
        .find(|cap| &cap[1] == "string" && &cap[2] == "app_name")
        .map(|cap| cap[3].to_string());
    flavor
}

/// Body of the first `name { ... }` block
fn find_block<'a>(content: &'a str, name: &str) -> Result<Option<&'a str>> {
    let pattern = Regex::new(&format!(r"\b{}\s*\{{", regex::escape(name)))?;
    match pattern.find(content) {
        Some(m) => block_body(content, m.end()).map(Some),
        None => Ok(None),
    }
}

/// `create("x") { ... }` style children of a container block
fn named_blocks(body: &str) -> Result<Vec<(&str, &str)>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(cap) = NAMED_BLOCK.captures_at(body, pos) {
        let whole = cap.get(0).map_or(body.len(), |m| m.end());
        let inner = block_body(body, whole)?;
        // Groovy DSL and Kotlin DSL shorthand for built-ins: `debug { ... }`
        let name = cap.get(2).or_else(|| cap.get(3)).map_or("", |m| m.as_str());
        blocks.push((name, inner));
        pos = whole + inner.len() + 1;
    }
    Ok(blocks)
}

/// Text between an opening brace (ending at `start`) and its partner
fn block_body(content: &str, start: usize) -> Result<&str> {
    let mut depth = 1usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in content[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&content[start..start + offset]);
                }
            }
            _ => {}
        }
    }
    Err(Error::android("Unbalanced braces in Gradle build script"))
}

/// Drop `//` and `/* */` comments outside string literals
fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }
    out
}
