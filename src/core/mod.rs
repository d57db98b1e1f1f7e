//! Core types shared by every module
//!
//! At the moment this is the error layer: [`AutosaveError`] for typed failures
//! and [`ErrorContext`] / [`user_friendly_error`] for presenting them in the CLI.

pub mod error;

pub use error::{AutosaveError, ErrorContext, user_friendly_error};
