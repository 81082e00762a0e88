//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Native file dialogs
//! - All-or-nothing file writes
//! - Platform detection
//! - Error types

pub mod dialogs;
pub mod error;
pub mod fs;
pub mod platform;
