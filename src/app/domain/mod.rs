//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Tabs, tab ids and scene-change events
//! - Scene snapshots and the file envelope
//! - Application settings
//! - Message types for the event system

pub mod document;
pub mod messages;
pub mod scene;
pub mod settings;

pub use document::{SceneChange, SceneOrigin, Tab, TabId, TabOverrides, TabUpdate};
pub use messages::Message;
pub use scene::Scene;
pub use settings::AppSettings;
