//! `package.json` mutation
//!
//! The manifest is kept as a full JSON object so keys the pipeline does not
//! own survive untouched and in their original order.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{common, ErrorCode, ErrorExt, ForgeError, Result};

pub const MANIFEST_FILE: &str = "package.json";

pub const GUIDE_SCRIPT: &str = "start:tutorial";
pub const GUIDE_SCRIPT_COMMAND: &str = "http-server steps -p 1234 --cors -c-1";
pub const POSTINSTALL_SCRIPT: &str = "postinstall";
pub const POSTINSTALL_COMMAND: &str = "cd project && npm install";

/// Static servers every tutorial gets
pub const FIXED_DEV_DEPENDENCIES: &[(&str, &str)] =
    &[("http-server", "^14.1.1"), ("serve", "^14.2.4")];
pub const LIVE_PREVIEW_DEPENDENCY: (&str, &str) = ("live-server", "^1.2.2");

/// What the mutation needs to know about the staged project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManifestInputs {
    pub wants_browser: bool,
    pub has_external_app: bool,
}

impl ManifestInputs {
    fn wants_live_preview(&self) -> bool {
        self.wants_browser && !self.has_external_app
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    path: PathBuf,
    root: Map<String, Value>,
}

impl ManifestDocument {
    pub fn from_value(path: impl Into<PathBuf>, value: Value) -> Result<Self> {
        let path = path.into();
        match value {
            Value::Object(root) => {
                let doc = Self { path, root };
                doc.check_mapping("devDependencies")?;
                doc.check_mapping("scripts")?;
                Ok(doc)
            }
            other => Err(common::invalid_manifest(
                &path,
                format!("expected a JSON object, found {}", kind_of(&other)),
            )),
        }
    }

    /// Load `<root>/package.json`, or `None` when it does not exist.
    pub fn load(root: &Path) -> Result<Option<Self>> {
        let path = root.join(MANIFEST_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).to_storage_error_at("Failed to read manifest", &path),
        };

        let value: Value = serde_json::from_str(&content).map_err(|e| {
            common::invalid_manifest(&path, format!("malformed JSON: {e}")).with_source(e)
        })?;
        Self::from_value(path, value).map(Some)
    }

    /// Two-space indentation and a trailing newline
    pub fn save(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&self.root).map_err(|e| {
            ForgeError::storage_with_code(
                ErrorCode::STORAGE_SERIALIZATION_ERROR,
                "Failed to serialize manifest",
                Some(self.path.clone()),
            )
            .with_source(e)
        })?;
        content.push('\n');
        std::fs::write(&self.path, content).to_storage_error_at("Failed to write manifest", &self.path)
    }

    /// Merge pipeline-owned dependencies and scripts. Re-applying with the
    /// same inputs leaves the document unchanged.
    pub fn apply(&mut self, inputs: ManifestInputs) -> Result<()> {
        let dev_deps = self.mapping_mut("devDependencies")?;
        for (name, version) in FIXED_DEV_DEPENDENCIES {
            dev_deps.insert(name.to_string(), Value::from(*version));
        }
        if inputs.wants_live_preview() {
            let (name, version) = LIVE_PREVIEW_DEPENDENCY;
            dev_deps.insert(name.to_string(), Value::from(version));
        }

        let scripts = self.mapping_mut("scripts")?;
        scripts.insert(GUIDE_SCRIPT.to_string(), Value::from(GUIDE_SCRIPT_COMMAND));
        if inputs.has_external_app {
            scripts.insert(
                POSTINSTALL_SCRIPT.to_string(),
                Value::from(POSTINSTALL_COMMAND),
            );
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dev_dependency(&self, name: &str) -> Option<&str> {
        self.lookup("devDependencies", name)
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.lookup("scripts", name)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    fn lookup(&self, mapping: &str, key: &str) -> Option<&str> {
        self.root.get(mapping)?.as_object()?.get(key)?.as_str()
    }

    fn check_mapping(&self, key: &str) -> Result<()> {
        match self.root.get(key) {
            None | Some(Value::Object(_)) => Ok(()),
            Some(other) => Err(common::invalid_manifest(
                &self.path,
                format!("'{key}' must be an object, found {}", kind_of(other)),
            )),
        }
    }

    fn mapping_mut(&mut self, key: &str) -> Result<&mut Map<String, Value>> {
        self.check_mapping(key)?;
        let entry = self
            .root
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        match entry {
            Value::Object(map) => Ok(map),
            _ => Err(common::invalid_manifest(
                &self.path,
                format!("'{key}' must be an object"),
            )),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
