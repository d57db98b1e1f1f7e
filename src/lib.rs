//! autosave-render - output path variables and serial numbering for renders
//!
//! Render hosts let users type output paths such as
//! `//renders/{camera}/{project}-{serial}`. This crate expands those
//! placeholders into literal paths, keeps serial counters that advance once
//! per render, and works out where each finished render is autosaved.
//!
//! # Render Cycle
//!
//! ```text
//! start:  expand output paths  -> consume output serial
//! render: (host)
//! finish: account render time  -> resolve autosave location and name
//!         -> probe directory (serial naming) -> consume file serials
//!         -> restore original output paths
//! ```
//!
//! # Core Modules
//!
//! - [`variables`] - the `{variable}` vocabulary and substitution
//! - [`serial`] - persisted serial counters and their scopes
//! - [`probe`] - next free serial from the files in a directory
//!
//! # Supporting Modules
//!
//! - [`scene`] - the host state a cycle works from
//! - [`render`] - engine descriptions, image formats, render time
//! - [`naming`] - autosave file name modes
//! - [`cycle`] - start and finish of one render
//! - [`config`] - preferences and project settings
//! - [`core`] - error types and user-facing error display
//! - [`utils`] - filesystem and platform helpers
//! - [`cli`] - the `autosave-render` command
//!
//! # Example
//!
//! ```rust,no_run
//! use autosave_render::scene::SceneSnapshot;
//! use autosave_render::serial::{MemorySerialStore, SerialAllocator, SerialScope, SerialUsage};
//! use autosave_render::variables::{ResolveOptions, VariableResolver};
//!
//! let scene = SceneSnapshot::default();
//! let resolver = VariableResolver::new(&scene);
//! let mut allocator = SerialAllocator::new(MemorySerialStore::new());
//! let mut usage = SerialUsage::new();
//!
//! let template = "//renders/{project}-{serial}";
//! let mut options = ResolveOptions::new();
//! if let Some(serial) = usage.claim(template, SerialScope::Output, &allocator) {
//!     options = options.with_serial(serial);
//! }
//! let path = resolver.resolve(template, options);
//! allocator.commit(&usage);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod cycle;
pub mod naming;
pub mod probe;
pub mod render;
pub mod scene;
pub mod serial;
pub mod utils;
pub mod variables;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
