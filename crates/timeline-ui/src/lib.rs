//! Terminal UI layer for Music Timeline.
//!
//! Provides themes, the header, stat tile and stacked bar components, the
//! dashboard view and the application event loop, all built on
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod themes;
pub mod timeline_view;

pub use timeline_core as core;
