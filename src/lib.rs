//! Filtered, multi-part build information reports.
//!
//! A report is made of parts (toolchain version, path, main module, modules,
//! build settings, raw) selected by the caller. Module and build-setting rows
//! can be narrowed with regular expression filters, and a short display mode
//! drops headings and prompts so the output can be consumed by scripts.
//!
//! ```no_run
//! use build_report::core::buildinfo::PackageProvider;
//! use build_report::core::config::{ReportConfig, ReportSelection};
//! use build_report::core::engine::ReportEngine;
//!
//! let config = ReportConfig {
//!     selection: ReportSelection::with_parts(["main-module"]),
//!     ..ReportConfig::default()
//! };
//! let engine = ReportEngine::new(config.resolve()?, Box::new(PackageProvider::new()));
//! engine.run(&mut std::io::stdout())?;
//! # Ok::<(), build_report::error::ReportError>(())
//! ```
pub mod builders;
pub mod core;
pub mod error;
pub mod utils;

pub use error::{ReportError, Result};
