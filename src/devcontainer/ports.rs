use serde::Serialize;
use std::collections::BTreeMap;

pub const GUIDE_PORT: u16 = 1234;
pub const PREVIEW_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AutoForward {
    OpenPreview,
    Notify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortVisibility {
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortAttributes {
    pub label: String,
    pub on_auto_forward: AutoForward,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<PortVisibility>,
}

/// Ports keyed by their decimal string, as `portsAttributes` expects
pub fn port_map(wants_browser: bool) -> BTreeMap<String, PortAttributes> {
    let mut ports = BTreeMap::new();
    ports.insert(
        GUIDE_PORT.to_string(),
        PortAttributes {
            label: "Tutorial Guide".to_string(),
            on_auto_forward: AutoForward::OpenPreview,
            visibility: None,
        },
    );

    if wants_browser {
        ports.insert(
            PREVIEW_PORT.to_string(),
            PortAttributes {
                label: "My Project Preview".to_string(),
                on_auto_forward: AutoForward::Notify,
                visibility: Some(PortVisibility::Public),
            },
        );
    }
    ports
}
