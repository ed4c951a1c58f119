//! Error types for the report core.

use thiserror::Error;

use crate::builders::validator::IssueGroup;

/// Errors that can occur while configuring or rendering a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid filter pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Build information not available")]
    BuildInfoUnavailable,

    #[error("bad version part: {0}")]
    UnknownPart(String),

    #[error("invalid report configuration: {}", describe_groups(.0))]
    InvalidConfig(Vec<IssueGroup>),

    #[error("Failed to parse report configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to parse build info: {0}")]
    BuildInfoParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

fn describe_groups(groups: &[IssueGroup]) -> String {
    groups
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
