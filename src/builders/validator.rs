use std::fmt;

use crate::core::config::{FilterMap, Part, ReportConfig};
use crate::error::ReportError;

/// A named group of errors, such as all the patterns of one filter that
/// failed to compile.
#[derive(Debug)]
pub struct IssueGroup {
    pub name: &'static str,
    pub errors: Vec<ReportError>,
}

impl IssueGroup {
    pub fn new(name: &'static str, errors: Vec<ReportError>) -> Self {
        Self { name, errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for IssueGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

/// The `ConfigValidator` trait defines the public interface for checking a
/// report configuration for likely mistakes.
///
/// Findings are advisory: a configuration with findings still runs. Errors
/// that make a configuration unusable (patterns that do not compile) are
/// reported when the configuration is resolved instead.
pub trait ConfigValidator {
    /// Checks the whole configuration and returns a list of findings.
    ///
    /// # Arguments
    /// * `config`: The `ReportConfig` to be checked.
    ///
    /// # Returns
    /// A `Vec<String>` where each string describes one finding.
    fn validate_config(&self, config: &ReportConfig) -> Vec<String>;

    /// Checks the patterns of a single filter.
    ///
    /// # Arguments
    /// * `name`: The filter's name, used in the findings.
    /// * `filters`: The filter's pattern map.
    fn validate_filters(&self, name: &str, filters: &FilterMap) -> Vec<String>;
}

/// The `StandardValidator` is the default implementation of `ConfigValidator`.
pub struct StandardValidator;

impl StandardValidator {
    /// Creates a new instance of `StandardValidator`.
    pub fn new() -> Self {
        Self
    }

    /// Patterns which match every string, making the entry a no-op (for an
    /// inclusion) or a filter that rejects everything (for an exclusion).
    fn matches_everything(pattern: &str) -> bool {
        matches!(pattern, "" | ".*" | "^" | "$" | "^.*" | ".*$" | "^.*$")
    }

    /// Whether any part that prints checksums will be shown. An active module
    /// filter brings in the module list, and short display with nothing
    /// requested falls back to the main module.
    fn shows_checksums(config: &ReportConfig) -> bool {
        let selection = &config.selection;
        selection.contains(Part::MainModule.as_str())
            || selection.contains(Part::Modules.as_str())
            || !config.module_filters.is_empty()
            || (selection.short_display && selection.is_empty())
    }
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator for StandardValidator {
    fn validate_config(&self, config: &ReportConfig) -> Vec<String> {
        let mut issues = Vec::new();

        for name in config.selection.parts() {
            if name.parse::<Part>().is_err() {
                issues.push(format!("Unknown version part: {name}"));
            }
        }

        if config.selection.show_checksum && !Self::shows_checksums(config) {
            issues.push(
                "Showing checksums has no effect without main-module or modules".to_string(),
            );
        }

        issues.extend(self.validate_filters("module filter", &config.module_filters));
        issues.extend(
            self.validate_filters("build-setting filter", &config.build_setting_filters),
        );

        issues
    }

    fn validate_filters(&self, name: &str, filters: &FilterMap) -> Vec<String> {
        let mut issues = Vec::new();

        for (pattern, must_match) in filters {
            if Self::matches_everything(pattern) {
                if *must_match {
                    issues.push(format!("{name}: pattern {pattern:?} will match everything"));
                } else {
                    issues.push(format!("{name}: pattern {pattern:?} will exclude everything"));
                }
            }
        }

        issues
    }
}
