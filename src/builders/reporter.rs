use std::io::Write;

use crate::builders::columns::{
    Column, Justify, ModuleColumnWidths, REPLACEMENT_INDENT, Table, display_width,
};
use crate::builders::filter::Filter;
use crate::core::buildinfo::{BuildInfo, Module};
use crate::core::config::Part;
use crate::error::Result;

/// Type tag of the main module's row.
pub const MOD_TYPE_MAIN: &str = "M";
/// Type tag of an ordinary dependency, and of a replacement.
pub const MOD_TYPE_DEP: &str = "D";
/// Type tag of a dependency that has been replaced.
pub const MOD_TYPE_REPLACED: &str = "r";

/// Everything a part needs to be rendered.
///
/// This provides a clean way to pass the record, the filters and the display
/// flags from the `ReportEngine` to the `PartReporter` without the reporter
/// owning any of them.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The build information being reported on.
    pub info: &'a BuildInfo,
    /// Applied to module paths in the `modules` part.
    pub module_filter: &'a Filter,
    /// Applied to setting keys in the `build-settings` part.
    pub build_setting_filter: &'a Filter,
    /// Suppress headings, prompts and column headers.
    pub short_display: bool,
    /// Show module checksums.
    pub show_checksum: bool,
}

/// Renders a single part of the report to an output sink.
pub trait PartReporter {
    fn report_part(&self, part: Part, ctx: &RenderContext<'_>, out: &mut dyn Write) -> Result<()>;
}

/// A `PartReporter` writing aligned plain text.
///
/// This is the reporter used by the `ReportEngine` unless another one is
/// supplied.
pub struct TextReporter;

impl TextReporter {
    /// Constructs a new `TextReporter` instance.
    pub fn new() -> Self {
        Self
    }

    /// Returns `prompt`, or nothing in short display mode.
    fn prompt<'p>(ctx: &RenderContext<'_>, prompt: &'p str) -> &'p str {
        if ctx.short_display { "" } else { prompt }
    }

    /// Writes the toolchain version the executable was built with.
    fn toolchain_version(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> Result<()> {
        let prompt = Self::prompt(ctx, "Toolchain Version: ");
        writeln!(out, "{prompt}{}", ctx.info.toolchain_version)?;
        Ok(())
    }

    /// Writes the import path of the executable.
    fn path(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> Result<()> {
        let prompt = Self::prompt(ctx, "Path: ");
        writeln!(out, "{prompt}{}", ctx.info.path)?;
        Ok(())
    }

    /// Writes the version of the main module, and its checksum if checksums
    /// are shown and there is one.
    ///
    /// The prompt names exactly the fields that follow it.
    fn main_module(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> Result<()> {
        let main = &ctx.info.main_module;
        let with_checksum = ctx.show_checksum && !main.checksum.is_empty();

        let prompt = if with_checksum {
            Self::prompt(ctx, "Version, Checksum: ")
        } else {
            Self::prompt(ctx, "Version: ")
        };

        if with_checksum {
            writeln!(out, "{prompt}{} {}", main.version, main.checksum)?;
        } else {
            writeln!(out, "{prompt}{}", main.version)?;
        }
        Ok(())
    }

    /// Writes one row per module whose path passes the module filter.
    ///
    /// Column widths are measured over every module, filtered or not, so the
    /// layout does not shift as filters change. A replaced dependency is
    /// followed by its replacement, indented and tagged as an ordinary
    /// dependency.
    fn modules(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> Result<()> {
        if !ctx.short_display {
            writeln!(out, "Modules:")?;
        }

        let info = ctx.info;
        let widths =
            ModuleColumnWidths::measure(&info.main_module, &info.dependencies, ctx.show_checksum);

        let mut columns = vec![Column::new("Type", display_width(MOD_TYPE_MAIN))];
        columns.extend(widths.columns());

        let mut table = Table::new(out, columns, !ctx.short_display);
        table.print_header()?;

        let row = |tag: &'static str, path: String, module: &Module| -> Vec<String> {
            let mut fields = vec![tag.to_string(), path, module.version.clone()];
            if ctx.show_checksum {
                fields.push(module.checksum.clone());
            }
            fields
        };

        if ctx.module_filter.passes(&info.main_module.path) {
            let fields = row(MOD_TYPE_MAIN, info.main_module.path.clone(), &info.main_module);
            table.print_row(&as_strs(&fields))?;
        }

        for dep in &info.dependencies {
            if !ctx.module_filter.passes(&dep.module.path) {
                continue;
            }

            let tag = if dep.replacement.is_some() {
                MOD_TYPE_REPLACED
            } else {
                MOD_TYPE_DEP
            };
            let fields = row(tag, dep.module.path.clone(), &dep.module);
            table.print_row(&as_strs(&fields))?;

            if let Some(repl) = &dep.replacement {
                let fields = row(MOD_TYPE_DEP, format!("{REPLACEMENT_INDENT}{}", repl.path), repl);
                table.print_row(&as_strs(&fields))?;
            }
        }

        Ok(())
    }

    /// Writes one row per setting whose key passes the build-setting filter.
    ///
    /// Keys are right-justified so they line up against their values, or
    /// left-justified in short display mode.
    fn build_settings(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> Result<()> {
        if !ctx.short_display {
            writeln!(out, "Build Settings:")?;
        }

        let shown: Vec<_> = ctx
            .info
            .settings
            .iter()
            .filter(|s| ctx.build_setting_filter.passes(&s.key))
            .collect();

        let max_key = shown.iter().map(|s| display_width(&s.key)).max().unwrap_or(0);
        let key_justify = if ctx.short_display {
            Justify::Left
        } else {
            Justify::Right
        };

        let columns = vec![
            Column::new("Key", max_key).justified(key_justify),
            Column::new("Value", 0),
        ];
        let mut table = Table::new(out, columns, !ctx.short_display);
        table.print_header()?;

        for setting in shown {
            table.print_row(&[setting.key.as_str(), setting.value.as_str()])?;
        }

        Ok(())
    }

    /// Writes the whole record in its native text form. Filters and display
    /// flags do not apply.
    fn raw(&self, ctx: &RenderContext<'_>, out: &mut dyn Write) -> Result<()> {
        write!(out, "{}", ctx.info)?;
        Ok(())
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PartReporter for TextReporter {
    fn report_part(&self, part: Part, ctx: &RenderContext<'_>, out: &mut dyn Write) -> Result<()> {
        match part {
            Part::ToolchainVersion => self.toolchain_version(ctx, out),
            Part::Path => self.path(ctx, out),
            Part::MainModule => self.main_module(ctx, out),
            Part::Modules => self.modules(ctx, out),
            Part::BuildSettings => self.build_settings(ctx, out),
            Part::Raw => self.raw(ctx, out),
        }
    }
}

fn as_strs(fields: &[String]) -> Vec<&str> {
    fields.iter().map(String::as_str).collect()
}
