// This file is the module declaration file for the `core` module.
// It declares the submodules which make up the report itself.

// `buildinfo` module:
// Defines the build information record (`BuildInfo`, `Module`, `Dependency`,
// `BuildSetting`), its raw text form, and the `BuildInfoProvider` trait with
// the static, file and package providers.
pub mod buildinfo;

// `config` module:
// Holds the report configuration: the part identifiers and their aliases,
// the `ReportSelection`, and `ReportConfig` which is read from TOML, merged
// with command line flags and resolved into compiled filters.
pub mod config;

// `engine` module:
// The `ReportEngine` resolves which parts to show, fetches the build
// information and drives the reporter once per distinct part.
pub mod engine;
