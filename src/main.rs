//! build-report shows the build information of a program: the toolchain
//! it was built with, its path, its main module version, the modules it
//! depends on and the build settings. Any mix of these parts can be asked
//! for, modules and settings can be narrowed with regular expressions, and
//! a short form drops the headings and prompts for use in scripts.
use anyhow::Result;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use build_report::core::config::ReportConfig;
use build_report::utils;

#[derive(Parser)]
#[command(name = "build-report")]
#[command(about = "Show the build information of a program, in whole or in part")]
struct Cli {
    /// Show the complete version details in the default format
    #[arg(long)]
    version: bool,

    /// Show only the named parts of the version (toolchain-version, path,
    /// main-module, modules, build-settings, raw, or an alias such as
    /// go, main, mods, settings, default)
    #[arg(long = "version-part", value_delimiter = ',', value_name = "PART")]
    version_parts: Vec<String>,

    /// Show the version parts in simplified form, without headings and
    /// prompts. There is no short form of the raw part
    #[arg(long = "version-part-short")]
    short: bool,

    /// Show module checksums
    #[arg(long = "version-show-checksum")]
    show_checksum: bool,

    /// Only show modules whose path matches this regular expression
    #[arg(long = "version-module-filter", value_name = "RE")]
    module_filter: Vec<String>,

    /// Do not show modules whose path matches this regular expression
    #[arg(long = "version-module-exclude", value_name = "RE")]
    module_exclude: Vec<String>,

    /// Only show build settings whose key matches this regular expression
    #[arg(long = "version-build-filter", value_name = "RE")]
    build_filter: Vec<String>,

    /// Do not show build settings whose key matches this regular expression
    #[arg(long = "version-build-exclude", value_name = "RE")]
    build_exclude: Vec<String>,

    /// Read the build information from this JSON, YAML or TOML file instead
    /// of describing this program
    #[arg(long = "build-info", value_name = "FILE")]
    build_info: Option<PathBuf>,

    /// Read default report settings from this TOML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// The part names requested by `--version` and `--version-part`, in the
    /// order they appear on the command line.
    fn requested_parts(&self, matches: &ArgMatches) -> Vec<String> {
        let mut requests: Vec<(usize, String)> = Vec::new();

        if let Some(index) = matches.index_of("version").filter(|_| self.version) {
            requests.push((index, "default".to_string()));
        }
        if let Some(indices) = matches.indices_of("version_parts") {
            requests.extend(indices.zip(self.version_parts.iter().cloned()));
        }

        requests.sort_by_key(|(index, _)| *index);
        requests.into_iter().map(|(_, name)| name).collect()
    }

    /// The report configuration given by the flags.
    fn report_config(&self, matches: &ArgMatches) -> ReportConfig {
        let mut config = ReportConfig::default();

        for name in self.requested_parts(matches) {
            config.selection.request(&name);
        }
        config.selection.short_display = self.short;
        config.selection.show_checksum = self.show_checksum;

        let polarities = [(&self.module_filter, true), (&self.module_exclude, false)];
        for (patterns, must_match) in polarities {
            for pattern in patterns {
                config.module_filters.insert(pattern.clone(), must_match);
            }
        }

        let polarities = [(&self.build_filter, true), (&self.build_exclude, false)];
        for (patterns, must_match) in polarities {
            for pattern in patterns {
                config.build_setting_filters.insert(pattern.clone(), must_match);
            }
        }

        config
    }
}

fn main() -> Result<()> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let mut config = utils::load_config(cli.config.as_deref())?;
    config.merge(cli.report_config(&matches));

    let provider = utils::build_info_provider(cli.build_info.as_deref());
    utils::show_version_report(&config, provider)?;

    eprintln!("Nothing to show: use --version or --version-part to choose what to report");
    Ok(())
}
