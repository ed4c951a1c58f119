use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::builders::filter::Filter;
use crate::builders::validator::{ConfigValidator, IssueGroup, StandardValidator};
use crate::error::{ReportError, Result};

/// Mapping of regular expression to polarity: `true` for a pattern values
/// must match, `false` for one they must not match.
pub type FilterMap = BTreeMap<String, bool>;

/// Name of the error group for module filter patterns.
pub const BAD_MODULE_FILTER: &str = "bad module filter";
/// Name of the error group for build-setting filter patterns.
pub const BAD_BUILD_SETTING_FILTER: &str = "bad build-setting filter";

/// The parts a report can be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    ToolchainVersion,
    Path,
    MainModule,
    Modules,
    BuildSettings,
    Raw,
}

/// The parts shown by `--version` and by the `default` alias.
pub const DEFAULT_PARTS: [Part; 5] = [
    Part::ToolchainVersion,
    Part::Path,
    Part::MainModule,
    Part::Modules,
    Part::BuildSettings,
];

impl Part {
    pub const ALL: [Part; 6] = [
        Part::ToolchainVersion,
        Part::Path,
        Part::MainModule,
        Part::Modules,
        Part::BuildSettings,
        Part::Raw,
    ];

    /// The identifier used to request this part.
    pub fn as_str(self) -> &'static str {
        match self {
            Part::ToolchainVersion => "toolchain-version",
            Part::Path => "path",
            Part::MainModule => "main-module",
            Part::Modules => "modules",
            Part::BuildSettings => "build-settings",
            Part::Raw => "raw",
        }
    }

    /// A one-line description, used in the command line help.
    pub fn description(self) -> &'static str {
        match self {
            Part::ToolchainVersion => "show the toolchain version used to build the program",
            Part::Path => "show the path of the main package",
            Part::MainModule => "show the version of the main module",
            Part::Modules => "show the module dependencies",
            Part::BuildSettings => "show the settings used to build the program",
            Part::Raw => "show the full build information",
        }
    }

    /// Expands an alternative name into the parts it stands for.
    pub fn alias(name: &str) -> Option<&'static [Part]> {
        match name {
            "go" | "go-version" | "go-vsn" | "toolchain" => Some(&[Part::ToolchainVersion]),
            "main" => Some(&[Part::MainModule]),
            "mods" | "dep" | "deps" => Some(&[Part::Modules]),
            "build" | "build-flags" | "settings" => Some(&[Part::BuildSettings]),
            "default" => Some(&DEFAULT_PARTS),
            _ => None,
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Part {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        Part::ALL
            .into_iter()
            .find(|part| part.as_str() == s)
            .ok_or_else(|| ReportError::UnknownPart(s.to_string()))
    }
}

/// Which parts to show and how.
///
/// Parts are kept as requested (after alias expansion) so that a name outside
/// the known set is only rejected when the report is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSelection {
    #[serde(default)]
    parts: Vec<String>,
    #[serde(default)]
    pub short_display: bool,
    #[serde(default)]
    pub show_checksum: bool,
}

impl ReportSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a selection from a list of part names.
    pub fn with_parts<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for name in names {
            selection.request(name.as_ref());
        }
        selection
    }

    /// Requests a part by name or alias. Names already requested are ignored.
    pub fn request(&mut self, name: &str) {
        match Part::alias(name) {
            Some(parts) => {
                for part in parts {
                    self.push_unique(part.as_str());
                }
            }
            None => self.push_unique(name),
        }
    }

    /// Requests a part unless it has been requested already.
    pub fn request_part(&mut self, part: Part) {
        self.push_unique(part.as_str());
    }

    fn push_unique(&mut self, name: &str) {
        if !self.contains(name) {
            self.parts.push(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|p| p == name)
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// The report configuration as supplied by the caller.
///
/// It can be read from a TOML document and merged with command line flags.
/// Filters are kept as pattern maps until `resolve` compiles them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(flatten)]
    pub selection: ReportSelection,
    #[serde(default)]
    pub module_filters: FilterMap,
    #[serde(default)]
    pub build_setting_filters: FilterMap,
}

/// A configuration with both filters compiled, ready to be run.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub selection: ReportSelection,
    pub module_filter: Filter,
    pub build_setting_filter: Filter,
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: ReportConfig = toml::from_str(content)?;
        // Re-request the parts so aliases are expanded and duplicates dropped.
        let requested = std::mem::take(&mut config.selection.parts);
        for name in &requested {
            config.selection.request(name);
        }
        Ok(config)
    }

    /// Reads a configuration file. Nothing is ever written back.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = ?path, parts = ?config.selection.parts(), "loaded report configuration");
        Ok(config)
    }

    /// Folds another configuration into this one.
    ///
    /// Parts are appended in order, display flags are or-ed, and filter
    /// entries from `other` override entries for the same pattern.
    pub fn merge(&mut self, other: ReportConfig) {
        for part in other.selection.parts() {
            self.selection.request(part);
        }
        self.selection.short_display |= other.selection.short_display;
        self.selection.show_checksum |= other.selection.show_checksum;
        self.module_filters.extend(other.module_filters);
        self.build_setting_filters.extend(other.build_setting_filters);
    }

    /// Compiles both filter maps.
    ///
    /// Every pattern of both maps is tried. Failures are grouped per filter
    /// and returned together as `ReportError::InvalidConfig`. Validator
    /// findings are only logged.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        for issue in StandardValidator::new().validate_config(self) {
            warn!("{issue}");
        }

        let (module_filter, module_errors) = Filter::from_map(
            self.module_filters
                .iter()
                .map(|(pattern, must_match)| (pattern.as_str(), *must_match)),
        );
        let (build_setting_filter, setting_errors) = Filter::from_map(
            self.build_setting_filters
                .iter()
                .map(|(pattern, must_match)| (pattern.as_str(), *must_match)),
        );

        let groups: Vec<IssueGroup> = [
            IssueGroup::new(BAD_MODULE_FILTER, module_errors),
            IssueGroup::new(BAD_BUILD_SETTING_FILTER, setting_errors),
        ]
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect();

        if !groups.is_empty() {
            return Err(ReportError::InvalidConfig(groups));
        }

        Ok(ResolvedConfig {
            selection: self.selection.clone(),
            module_filter,
            build_setting_filter,
        })
    }
}
