//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Native bridge (dialogs and file I/O off the UI thread)
//! - Localized strings
//! - Path helpers for titles and the file chip

pub mod bridge;
pub mod i18n;
pub mod text_ops;
