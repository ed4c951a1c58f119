// This file is the module declaration file for the `builders` module.
// It declares and makes public the pieces the report engine is built from.

// The `pub mod columns;` declaration exposes the `columns` module.
//
// `columns` module:
// Measures the module column widths (`ModuleColumnWidths`) and writes
// space-aligned rows through `Table`.
pub mod columns;

// The `pub mod filter;` declaration exposes the `filter` module.
//
// `filter` module:
// Defines `Filter`, a predicate built from regular expressions a value must
// match and regular expressions it must not match. Module paths and build
// setting keys are filtered with it.
pub mod filter;

// The `pub mod reporter;` declaration exposes the `reporter` module.
//
// `reporter` module:
// Defines the `PartReporter` trait and its `TextReporter` implementation,
// which renders each part of the report (toolchain version, path, main
// module, modules, build settings, raw).
pub mod reporter;

// The `pub mod validator;` declaration exposes the `validator` module.
//
// `validator` module:
// Groups filter pattern errors by name (`IssueGroup`) and defines the
// `ConfigValidator` trait with a `StandardValidator` that looks for likely
// mistakes in a report configuration.
pub mod validator;
