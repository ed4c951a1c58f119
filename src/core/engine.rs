use std::collections::HashSet;
use std::io::Write;
use tracing::debug;

use crate::builders::reporter::{PartReporter, RenderContext, TextReporter};
use crate::core::buildinfo::BuildInfoProvider;
use crate::core::config::{Part, ReportSelection, ResolvedConfig};
use crate::error::{ReportError, Result};

/// What running a report did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// No part was requested; nothing was fetched or written.
    NotRequested,
    /// These parts were written, in this order.
    Rendered(Vec<Part>),
}

impl ReportOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, ReportOutcome::Rendered(_))
    }
}

pub struct ReportEngine {
    config: ResolvedConfig,
    provider: Box<dyn BuildInfoProvider>,
    reporter: Box<dyn PartReporter>,
}

impl ReportEngine {
    pub fn new(config: ResolvedConfig, provider: Box<dyn BuildInfoProvider>) -> Self {
        Self {
            config,
            provider,
            reporter: Box::new(TextReporter::new()),
        }
    }

    pub fn with_reporter(mut self, reporter: Box<dyn PartReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// The parts that will be rendered, in order.
    ///
    /// Active filters pull in the part they filter, and short display with
    /// nothing requested means the main module version.
    pub fn resolve_selection(&self) -> ReportSelection {
        let mut selection = self.config.selection.clone();

        if self.config.module_filter.has_filters() {
            selection.request_part(Part::Modules);
        }
        if self.config.build_setting_filter.has_filters() {
            selection.request_part(Part::BuildSettings);
        }
        if selection.short_display && selection.is_empty() {
            selection.request_part(Part::MainModule);
        }

        selection
    }

    /// Runs the report, writing every selected part to `out`.
    ///
    /// Build information is only fetched once something is to be shown. An
    /// unknown part stops the report; the parts before it stay written.
    pub fn run(&self, out: &mut dyn Write) -> Result<ReportOutcome> {
        let selection = self.resolve_selection();
        if selection.is_empty() {
            debug!("no version parts requested");
            return Ok(ReportOutcome::NotRequested);
        }
        debug!(parts = ?selection.parts(), "resolved version parts");

        let info = self
            .provider
            .read_build_info()
            .ok_or(ReportError::BuildInfoUnavailable)?;

        let ctx = RenderContext {
            info: &info,
            module_filter: &self.config.module_filter,
            build_setting_filter: &self.config.build_setting_filter,
            short_display: selection.short_display,
            show_checksum: selection.show_checksum,
        };

        let mut shown: HashSet<&str> = HashSet::new();
        let mut rendered = Vec::new();

        for name in selection.parts() {
            if !shown.insert(name.as_str()) {
                debug!(part = %name, "skipping repeated part");
                continue;
            }

            let part: Part = name.parse()?;
            self.reporter.report_part(part, &ctx, out)?;
            rendered.push(part);
        }

        out.flush()?;
        Ok(ReportOutcome::Rendered(rendered))
    }
}
