//! Core types for dockgen.
//!
//! This crate loads the project document ([`ConfigStore`]), turns it into the
//! template variables ([`RenderContext`]), and defines the shared error types.

pub mod config;
pub mod context;
pub mod error;

pub use config::{ConfigStore, DEFAULT_CONFIG_FILE, DocumentFormat};
pub use context::{DEFAULT_MAINTAINER, RenderContext};
pub use error::{Error, Result, TokenizeError};
