//! Explorer visibility and auto-open rules

use serde_json::{Map, Value};

use crate::descriptor::TutorialDescriptor;

/// Paths hidden from the explorer unless the tutorial declares them
pub const DEFAULT_HIDDEN: &[&str] = &[
    "node_modules",
    "dist",
    "steps",
    ".devcontainer",
    ".vscode",
    "package.json",
    "package-lock.json",
    "tutorial-config.json",
    "tsconfig.json",
    "astro.config.mjs",
    ".git",
    ".DS_Store",
    "__MACOSX",
    "README.md",
    "markdoc.config.mjs",
    "project/setup-project.js",
];

const PROJECT_PREFIX: &str = "project/";

pub fn hidden_paths(descriptor: &TutorialDescriptor) -> Vec<&'static str> {
    DEFAULT_HIDDEN
        .iter()
        .copied()
        .filter(|path| !descriptor.declares(path))
        .collect()
}

/// `files.exclude` value, in default-list order
pub fn files_exclude(descriptor: &TutorialDescriptor) -> Map<String, Value> {
    hidden_paths(descriptor)
        .into_iter()
        .map(|path| (path.to_string(), Value::Bool(true)))
        .collect()
}

/// Declared files resolved against the workspace folder
pub fn open_files(descriptor: &TutorialDescriptor) -> Vec<String> {
    descriptor
        .files
        .iter()
        .map(|file| {
            if file == "README.md" || file.starts_with(PROJECT_PREFIX) {
                file.clone()
            } else {
                format!("{PROJECT_PREFIX}{file}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(files: &[&str]) -> TutorialDescriptor {
        TutorialDescriptor {
            files: files.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_everything_hidden_by_default() {
        let hidden = hidden_paths(&descriptor(&[]));
        assert_eq!(hidden, DEFAULT_HIDDEN);
    }

    #[test]
    fn test_declared_paths_are_visible() {
        let d = descriptor(&["README.md", "package.json", "src/app.js"]);
        let hidden = hidden_paths(&d);

        for path in DEFAULT_HIDDEN {
            assert_eq!(hidden.contains(path), !d.declares(path), "{path}");
        }
        assert_eq!(hidden.len(), DEFAULT_HIDDEN.len() - 2);
    }

    #[test]
    fn test_files_exclude_keeps_order() {
        let exclude = files_exclude(&descriptor(&["node_modules"]));
        let keys: Vec<&str> = exclude.keys().map(String::as_str).collect();
        assert_eq!(keys.first(), Some(&"dist"));
        assert_eq!(keys.last(), Some(&"project/setup-project.js"));
        assert!(exclude.values().all(|v| v == &Value::Bool(true)));
    }

    #[test]
    fn test_open_files_prefixing() {
        let d = descriptor(&["README.md", "index.html", "project/app.js", "src/main.js"]);
        assert_eq!(
            open_files(&d),
            vec![
                "README.md",
                "project/index.html",
                "project/app.js",
                "project/src/main.js"
            ]
        );
    }
}
