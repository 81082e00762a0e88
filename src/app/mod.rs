//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Tab, Scene, Settings, Messages)
//! - `controllers/` - Orchestration (TabManager, ShellController)
//! - `services/` - Business operations (native bridge, i18n, text_ops)
//! - `infrastructure/` - External integrations (dialogs, atomic writes, platform, error)
//! - `view.rs` - Presentation model rendered by the widgets
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;
pub mod view;

// Re-exports for convenient external access
pub use controllers::shell::{ShellController, ShellEffect};
pub use controllers::tabs::TabManager;
pub use domain::{AppSettings, Message, Scene, Tab, TabId};
pub use services::i18n::{Lang, Localizer};
