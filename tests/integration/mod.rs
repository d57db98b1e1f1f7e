//! Integration test suite for autosave-render
//!
//! Drives the `autosave-render` binary end to end against temporary projects.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **expand**: template expansion, checking and the variable list
//! - **probe**: directory-scan serials
//! - **serial**: counter inspection and editing
//! - **cycle**: `start` and `finish` around a render
//! - **render_time**: render time log and estimates
//! - **config**: preferences file management

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod config;
mod cycle;
mod expand;
mod probe;
mod render_time;
mod serial;
