use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ReportError, Result};

/// A single module: its import path, version and checksum.
///
/// The checksum may be empty, for example for a main module built from a
/// local working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub path: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub checksum: String,
}

/// A dependency of the main module.
///
/// A replacement is a plain `Module`, so a replacement can never be replaced
/// again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    #[serde(flatten)]
    pub module: Module,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<Module>,
}

/// A key/value pair recording a build-time option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSetting {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// The build information record for an executable.
///
/// The record is read-only to the report: dependencies and settings keep the
/// order the provider supplied them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub main_module: Module,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub toolchain_version: String,
    #[serde(default)]
    pub settings: Vec<BuildSetting>,
}

impl Module {
    pub fn new(
        path: impl Into<String>,
        version: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            checksum: checksum.into(),
        }
    }
}

impl Dependency {
    pub fn new(module: Module) -> Self {
        Self {
            module,
            replacement: None,
        }
    }

    pub fn replaced_by(module: Module, replacement: Module) -> Self {
        Self {
            module,
            replacement: Some(replacement),
        }
    }
}

impl BuildSetting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl BuildInfo {
    /// Describes a Cargo package from its compile-time metadata.
    ///
    /// The package name is used as the executable path and, when no
    /// repository is given, as the main module path too. Versions are given a
    /// leading `v`.
    pub fn from_package(name: &str, version: &str, repository: &str, rust_version: &str) -> Self {
        let module_path = if repository.is_empty() {
            name
        } else {
            repository.trim_start_matches("https://").trim_start_matches("http://")
        };

        let profile = if cfg!(debug_assertions) { "debug" } else { "release" };

        Self {
            path: name.to_string(),
            main_module: Module::new(module_path, format!("v{version}"), ""),
            dependencies: Vec::new(),
            toolchain_version: if rust_version.is_empty() {
                "unknown".to_string()
            } else {
                format!("rust{rust_version}")
            },
            settings: vec![
                BuildSetting::new("profile", profile),
                BuildSetting::new("target_arch", std::env::consts::ARCH),
                BuildSetting::new("target_os", std::env::consts::OS),
            ],
        }
    }

    fn write_module(
        f: &mut fmt::Formatter<'_>,
        tag: &str,
        module: &Module,
        with_checksum: bool,
    ) -> fmt::Result {
        write!(f, "{tag}\t{}\t{}", module.path, module.version)?;
        if with_checksum && !module.checksum.is_empty() {
            write!(f, "\t{}", module.checksum)?;
        }
        writeln!(f)
    }
}

/// Quotes a setting key if it could not be read back unambiguously.
fn quote_key(key: &str) -> String {
    if key.is_empty() || key.contains(['=', ' ', '\t', '\r', '\n', '"', '`']) {
        format!("{key:?}")
    } else {
        key.to_string()
    }
}

/// Quotes a setting value if it contains whitespace or quote characters.
fn quote_value(value: &str) -> String {
    if value.contains([' ', '\t', '\r', '\n', '"', '`']) {
        format!("{value:?}")
    } else {
        value.to_string()
    }
}

/// The native descriptive text form of the record, one tab-separated entry
/// per line. This is what the `raw` part prints.
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.toolchain_version.is_empty() {
            writeln!(f, "toolchain\t{}", self.toolchain_version)?;
        }
        if !self.path.is_empty() {
            writeln!(f, "path\t{}", self.path)?;
        }
        if !self.main_module.path.is_empty() {
            Self::write_module(f, "mod", &self.main_module, true)?;
        }
        for dep in &self.dependencies {
            // Replaced dependencies carry no checksum of their own.
            Self::write_module(f, "dep", &dep.module, dep.replacement.is_none())?;
            if let Some(repl) = &dep.replacement {
                Self::write_module(f, "=>", repl, true)?;
            }
        }
        for setting in &self.settings {
            writeln!(f, "build\t{}={}", quote_key(&setting.key), quote_value(&setting.value))?;
        }
        Ok(())
    }
}

/// Supplies the build information record on demand.
///
/// This abstraction keeps the report independent of where the record comes
/// from. `None` means the information is not available, which is terminal
/// for the report.
pub trait BuildInfoProvider {
    fn read_build_info(&self) -> Option<BuildInfo>;
}

/// A provider holding a record (or the lack of one) in memory.
pub struct StaticProvider {
    info: Option<BuildInfo>,
}

impl StaticProvider {
    pub fn new(info: BuildInfo) -> Self {
        Self { info: Some(info) }
    }

    pub fn unavailable() -> Self {
        Self { info: None }
    }
}

impl BuildInfoProvider for StaticProvider {
    fn read_build_info(&self) -> Option<BuildInfo> {
        self.info.clone()
    }
}

/// A provider reading the record from a JSON, YAML or TOML file.
///
/// The format is chosen from the file extension; anything other than
/// `json`, `yaml` or `yml` is read as TOML.
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Reads and parses the file, reporting why it could not be used.
    pub fn load(&self) -> Result<BuildInfo> {
        let content = fs::read_to_string(&self.path)?;
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let parsed = match extension.as_str() {
            "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            _ => toml::from_str(&content).map_err(|e| e.to_string()),
        };

        parsed.map_err(ReportError::BuildInfoParse)
    }
}

impl BuildInfoProvider for FileProvider {
    fn read_build_info(&self) -> Option<BuildInfo> {
        match self.load() {
            Ok(info) => {
                debug!(path = ?self.path, deps = info.dependencies.len(), "loaded build info");
                Some(info)
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "could not read build info");
                None
            }
        }
    }
}

/// A provider describing this package from the metadata Cargo compiled in.
pub struct PackageProvider;

impl PackageProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PackageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildInfoProvider for PackageProvider {
    fn read_build_info(&self) -> Option<BuildInfo> {
        Some(BuildInfo::from_package(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_REPOSITORY"),
            env!("CARGO_PKG_RUST_VERSION"),
        ))
    }
}
