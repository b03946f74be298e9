//! Environment descriptor synthesis
//!
//! Builds the `devcontainer.json` for one tutorial from the staged project
//! flags and the tutorial descriptor: the attach-time command chain, the
//! forwarded ports and the explorer visibility rules.

pub mod document;
pub mod ports;
pub mod startup;
pub mod visibility;

pub use document::{
    CodespacesCustomizations, Customizations, EditorSettings, EnvironmentDescriptor,
    VscodeCustomizations, BASE_IMAGE, DEVCONTAINER_FILE,
};
pub use ports::{port_map, AutoForward, PortAttributes, PortVisibility};
pub use startup::{plan_startup, render_chain, StartupInputs, StartupStage};

use serde_json::Map;
use std::collections::BTreeMap;

use crate::descriptor::TutorialDescriptor;

/// Project state the descriptor depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectFlags {
    pub has_external_app: bool,
    pub has_setup_script: bool,
}

pub fn workspace_folder(repo: &str, name: &str) -> String {
    format!("/workspaces/{repo}/tutorials/{name}")
}

pub fn build_descriptor(
    name: &str,
    repo: &str,
    tutorial: &TutorialDescriptor,
    flags: ProjectFlags,
) -> EnvironmentDescriptor {
    let wants_browser = tutorial.requests_browser();
    let plan = plan_startup(StartupInputs {
        has_setup_script: flags.has_setup_script,
        has_external_app: flags.has_external_app,
        wants_browser,
    });
    tracing::debug!("Startup plan: {:?}", plan);

    let mut features = BTreeMap::new();
    features.insert(document::GITHUB_CLI_FEATURE.to_string(), Map::new());

    EnvironmentDescriptor {
        name: format!("Tutorial: {name}"),
        image: BASE_IMAGE.to_string(),
        workspace_folder: workspace_folder(repo, name),
        wait_for: "onCreateCommand".to_string(),
        update_content_command: "npm install".to_string(),
        post_create_command: String::new(),
        post_attach_command: render_chain(&plan),
        features,
        customizations: Customizations {
            vscode: VscodeCustomizations {
                extensions: Vec::new(),
                settings: EditorSettings {
                    format_on_save: true,
                    files_exclude: visibility::files_exclude(tutorial),
                },
            },
            codespaces: CodespacesCustomizations {
                open_files: visibility::open_files(tutorial),
            },
        },
        ports_attributes: port_map(wants_browser),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn tutorial(json: &str) -> TutorialDescriptor {
        TutorialDescriptor::parse(json).unwrap()
    }

    #[test]
    fn test_document_shape() {
        let t = tutorial(r#"{"files": ["index.html"], "panels": ["browser"]}"#);
        let doc = build_descriptor("intro", "academy", &t, ProjectFlags::default());
        let value: Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

        assert_eq!(value["name"], "Tutorial: intro");
        assert_eq!(value["image"], BASE_IMAGE);
        assert_eq!(value["workspaceFolder"], "/workspaces/academy/tutorials/intro");
        assert_eq!(value["waitFor"], "onCreateCommand");
        assert_eq!(value["updateContentCommand"], "npm install");
        assert_eq!(value["postCreateCommand"], "");
        assert_eq!(
            value["postAttachCommand"],
            "nohup npm run start:tutorial > /dev/null 2>&1 & \
             live-server --port=8080 --no-browser > /dev/null 2>&1 & wait"
        );
        assert_eq!(
            value["features"],
            json!({"ghcr.io/devcontainers/features/github-cli:1": {}})
        );
        assert_eq!(value["customizations"]["vscode"]["extensions"], json!([]));
        assert_eq!(
            value["customizations"]["vscode"]["settings"]["editor.formatOnSave"],
            true
        );
        assert_eq!(
            value["customizations"]["codespaces"]["openFiles"],
            json!(["project/index.html"])
        );
        assert_eq!(
            value["portsAttributes"]["8080"]["visibility"],
            "public"
        );
    }

    #[test]
    fn test_external_app_chain_in_document() {
        let t = tutorial(r#"{"repository": "https://example.com/app.git"}"#);
        let doc = build_descriptor(
            "intro",
            "academy",
            &t,
            ProjectFlags {
                has_external_app: true,
                has_setup_script: false,
            },
        );
        assert_eq!(
            doc.post_attach_command,
            "nohup npm run start:tutorial > /dev/null 2>&1 & cd project && npm start"
        );
        assert!(!doc.ports_attributes.contains_key("8080"));
    }

    #[test]
    fn test_json_uses_four_space_indent() {
        let doc = build_descriptor("t", "r", &TutorialDescriptor::default(), ProjectFlags::default());
        let json = doc.to_json().unwrap();
        assert!(json.starts_with("{\n    \"name\": \"Tutorial: t\","));
    }

    #[test]
    fn test_write_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".devcontainer").join("intro");
        let doc = build_descriptor("intro", "r", &TutorialDescriptor::default(), ProjectFlags::default());

        let path = doc.write_to(&dir).unwrap();

        assert_eq!(path, dir.join(DEVCONTAINER_FILE));
        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(
            written["customizations"]["vscode"]["settings"]["files.exclude"]["node_modules"],
            true
        );
    }
}
