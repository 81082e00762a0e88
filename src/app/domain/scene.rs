//! Scene snapshots and the `.excalidraw` file envelope.
//!
//! The shell treats elements, view state and embedded files as opaque JSON.
//! Only the envelope (`type`, `version`, `source`) and the `isDeleted` flag on
//! elements are interpreted here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::app::infrastructure::error::{AppError, Result};

pub const FILE_TYPE: &str = "excalidraw";
pub const FILE_VERSION: u32 = 2;
pub const FILE_SOURCE: &str = "excalidraw-desktop";
pub const DEFAULT_BACKGROUND: &str = "#f4f2ef";

/// View-state keys that are worth keeping on disk. Everything else in
/// `appState` (selection, zoom, open menus...) is session-only.
const PERSISTED_APP_STATE_KEYS: [&str; 4] = [
    "viewBackgroundColor",
    "gridSize",
    "gridStep",
    "gridModeEnabled",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub elements: Vec<Value>,
    pub app_state: Map<String, Value>,
    pub files: Map<String, Value>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::empty()
    }
}

impl Scene {
    pub fn empty() -> Self {
        let mut app_state = Map::new();
        app_state.insert("viewBackgroundColor".to_string(), Value::from(DEFAULT_BACKGROUND));
        Self {
            elements: Vec::new(),
            app_state,
            files: Map::new(),
        }
    }

    pub fn background(&self) -> &str {
        self.app_state
            .get("viewBackgroundColor")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_BACKGROUND)
    }

    /// Elements that are not soft-deleted.
    pub fn live_elements(&self) -> impl Iterator<Item = &Value> {
        self.elements.iter().filter(|e| !is_deleted(e))
    }

    /// A copy of this scene with one more element on top.
    pub fn with_element(&self, element: Value) -> Scene {
        let mut scene = self.clone();
        scene.elements.push(element);
        scene
    }

    /// Serialize to the `.excalidraw` JSON format.
    pub fn to_file_contents(&self) -> Result<String> {
        let app_state: Map<String, Value> = self
            .app_state
            .iter()
            .filter(|(k, _)| PERSISTED_APP_STATE_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let file = SceneFileOut {
            kind: FILE_TYPE,
            version: FILE_VERSION,
            source: FILE_SOURCE,
            elements: &self.elements,
            app_state,
            files: &self.files,
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Parse and validate `.excalidraw` file contents.
    pub fn from_file_contents(contents: &str) -> Result<Scene> {
        let file: SceneFileIn = serde_json::from_str(contents)?;

        if file.kind != FILE_TYPE {
            return Err(AppError::InvalidScene(format!(
                "unexpected file type \"{}\"",
                file.kind
            )));
        }
        if let Some(version) = file.version
            && version > FILE_VERSION
        {
            log::warn!("Scene file version {} is newer than {}", version, FILE_VERSION);
        }

        let mut elements = Vec::with_capacity(file.elements.len());
        for (i, element) in file.elements.into_iter().enumerate() {
            if !element.is_object() {
                return Err(AppError::InvalidScene(format!("element {} is not an object", i)));
            }
            if !is_deleted(&element) {
                elements.push(element);
            }
        }

        let mut scene = Scene::empty();
        scene.elements = elements;
        if let Some(app_state) = file.app_state {
            scene.app_state.extend(app_state);
        }
        if let Some(files) = file.files {
            scene.files = files;
        }
        Ok(scene)
    }
}

fn is_deleted(element: &Value) -> bool {
    element
        .get("isDeleted")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SceneFileOut<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    version: u32,
    source: &'static str,
    elements: &'a [Value],
    app_state: Map<String, Value>,
    files: &'a Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneFileIn {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    version: Option<u32>,
    elements: Vec<Value>,
    #[serde(default)]
    app_state: Option<Map<String, Value>>,
    #[serde(default)]
    files: Option<Map<String, Value>>,
}

/// A new rectangle element in the library's element shape.
pub fn rectangle_element(x: f64, y: f64, width: f64, height: f64) -> Value {
    let id = Uuid::new_v4();
    let seed = (id.as_u128() & 0x7fff_ffff) as u64;
    json!({
        "id": id.to_string(),
        "type": "rectangle",
        "x": x,
        "y": y,
        "width": width,
        "height": height,
        "angle": 0,
        "strokeColor": "#1e1e1e",
        "backgroundColor": "transparent",
        "fillStyle": "solid",
        "strokeWidth": 2,
        "strokeStyle": "solid",
        "roughness": 1,
        "opacity": 100,
        "groupIds": [],
        "frameId": null,
        "roundness": null,
        "seed": seed,
        "version": 1,
        "versionNonce": seed ^ 0x5bd1_e995,
        "isDeleted": false,
        "boundElements": null,
        "locked": false
    })
}
