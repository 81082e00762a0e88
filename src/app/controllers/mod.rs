//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the UI:
//! - Tab store (ordering, activation, dirty tracking)
//! - Shell controller (user actions, bridge replies, UI effects)

pub mod shell;
pub mod tabs;
