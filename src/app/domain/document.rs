use std::fmt;
use std::path::PathBuf;

use uuid::Uuid;

use super::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(Uuid);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One open drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub file_path: Option<PathBuf>,
    pub scene: Scene,
    pub dirty: bool,
    /// Bumped whenever the scene is replaced, so a late save reply can tell
    /// whether the tab changed after its contents were serialized.
    pub revision: u64,
}

/// Optional starting values for a new tab.
#[derive(Debug, Clone, Default)]
pub struct TabOverrides {
    pub title: Option<String>,
    pub file_path: Option<PathBuf>,
    pub scene: Option<Scene>,
    pub dirty: Option<bool>,
}

/// Partial update applied to an existing tab; `None` fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct TabUpdate {
    pub title: Option<String>,
    pub file_path: Option<PathBuf>,
    pub scene: Option<Scene>,
    pub dirty: Option<bool>,
}

impl Tab {
    pub fn new(overrides: TabOverrides, untitled: &str) -> Self {
        Self {
            id: TabId::new(),
            title: overrides
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| untitled.to_string()),
            file_path: overrides.file_path,
            scene: overrides.scene.unwrap_or_default(),
            dirty: overrides.dirty.unwrap_or(false),
            revision: 0,
        }
    }

    pub fn apply(&mut self, update: TabUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(path) = update.file_path {
            self.file_path = Some(path);
        }
        if let Some(scene) = update.scene {
            self.scene = scene;
            self.revision += 1;
        }
        if let Some(dirty) = update.dirty {
            self.dirty = dirty;
        }
    }
}

/// Who caused a scene change reported by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneOrigin {
    /// The shell loaded a scene into the canvas (tab switch, open, new tab).
    Programmatic,
    /// The user drew, moved or deleted something.
    UserEdit,
}

/// Scene-change notification from the canvas for the tab it is showing.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneChange {
    pub tab_id: TabId,
    pub origin: SceneOrigin,
    pub scene: Scene,
}
