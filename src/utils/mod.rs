use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

use crate::core::buildinfo::{BuildInfoProvider, FileProvider, PackageProvider};
use crate::core::config::ReportConfig;
use crate::core::engine::{ReportEngine, ReportOutcome};

/// Shows the requested version report on standard output.
///
/// The report is a terminal action: once a part has been shown the process
/// exits with a success status. If nothing was requested this returns and
/// the caller carries on.
pub fn show_version_report(
    config: &ReportConfig,
    provider: Box<dyn BuildInfoProvider>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = write_version_report(config, provider, &mut out)?;
    if outcome.is_rendered() {
        std::process::exit(0);
    }
    Ok(())
}

/// Resolves the configuration and writes the report to `out`.
pub fn write_version_report(
    config: &ReportConfig,
    provider: Box<dyn BuildInfoProvider>,
    out: &mut dyn Write,
) -> Result<ReportOutcome> {
    let resolved = config.resolve()?;
    let engine = ReportEngine::new(resolved, provider);
    let outcome = engine.run(out)?;
    Ok(outcome)
}

/// Reads the report configuration file, if one was given.
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    match path {
        Some(path) => ReportConfig::load(path).with_context(|| {
            format!("Failed to load report configuration from {}", path.display())
        }),
        None => Ok(ReportConfig::default()),
    }
}

/// Chooses where the build information comes from: the given file, or the
/// metadata compiled into this package.
pub fn build_info_provider(path: Option<&Path>) -> Box<dyn BuildInfoProvider> {
    match path {
        Some(path) => Box::new(FileProvider::new(path)),
        None => Box::new(PackageProvider::new()),
    }
}
