use std::io::{self, Write};

use crate::core::buildinfo::{Dependency, Module};

/// Prefix placed before a replacement's path so that it reads as belonging
/// to the dependency row above it.
pub const REPLACEMENT_INDENT: &str = "   ";

/// Separator written between the columns of a table row.
const COLUMN_SEP: &str = " ";

/// Display width of a value, in characters.
pub fn display_width(value: &str) -> usize {
    value.chars().count()
}

/// The widths needed to show every module value without truncation.
///
/// `checksum` is `None` when checksums are not shown, in which case the
/// checksum column does not exist at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleColumnWidths {
    pub path: usize,
    pub version: usize,
    pub checksum: Option<usize>,
}

impl ModuleColumnWidths {
    /// Measures the main module, every dependency and every replacement.
    ///
    /// A replacement's path is measured with `REPLACEMENT_INDENT` in front of
    /// it since that is how it will be printed.
    pub fn measure(main: &Module, deps: &[Dependency], show_checksum: bool) -> Self {
        let mut path = display_width(&main.path);
        let mut version = display_width(&main.version);
        let mut checksum = display_width(&main.checksum);

        for dep in deps {
            path = path.max(display_width(&dep.module.path));
            version = version.max(display_width(&dep.module.version));
            checksum = checksum.max(display_width(&dep.module.checksum));

            if let Some(repl) = &dep.replacement {
                path = path.max(display_width(REPLACEMENT_INDENT) + display_width(&repl.path));
                version = version.max(display_width(&repl.version));
                checksum = checksum.max(display_width(&repl.checksum));
            }
        }

        Self {
            path,
            version,
            checksum: show_checksum.then_some(checksum),
        }
    }

    /// The Path, Version and (if shown) CheckSum columns.
    pub fn columns(&self) -> Vec<Column> {
        let mut cols = vec![
            Column::new("Path", self.path),
            Column::new("Version", self.version),
        ];
        if let Some(width) = self.checksum {
            cols.push(Column::new("CheckSum", width));
        }
        cols
    }
}

/// How text is placed within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Right,
}

/// A single column of a `Table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub heading: &'static str,
    pub width: usize,
    pub justify: Justify,
}

impl Column {
    pub fn new(heading: &'static str, width: usize) -> Self {
        Self {
            heading,
            width,
            justify: Justify::Left,
        }
    }

    pub fn justified(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }
}

/// Writes space-aligned rows to an output sink.
///
/// When the header is shown each column is at least as wide as its heading.
/// The last column is never padded, and padding left at the end of a row
/// (after empty trailing fields) is dropped. Field text is written as is.
pub struct Table<'w> {
    out: &'w mut dyn Write,
    columns: Vec<Column>,
    show_header: bool,
}

impl<'w> Table<'w> {
    pub fn new(out: &'w mut dyn Write, columns: Vec<Column>, show_header: bool) -> Self {
        Self {
            out,
            columns,
            show_header,
        }
    }

    fn width(&self, col: &Column) -> usize {
        if self.show_header {
            col.width.max(display_width(col.heading))
        } else {
            col.width
        }
    }

    fn format_row(&self, fields: &[&str]) -> String {
        let last = self.columns.len().saturating_sub(1);
        let mut line = String::new();
        // End of the last field text written, ignoring padding.
        let mut content_end = 0;

        for (i, (col, field)) in self.columns.iter().zip(fields).enumerate() {
            if i > 0 {
                line.push_str(COLUMN_SEP);
            }
            let pad = self.width(col).saturating_sub(display_width(field));
            match col.justify {
                Justify::Left => {
                    line.push_str(field);
                    if !field.is_empty() {
                        content_end = line.len();
                    }
                    if i != last {
                        line.extend(std::iter::repeat_n(' ', pad));
                    }
                }
                Justify::Right => {
                    line.extend(std::iter::repeat_n(' ', pad));
                    line.push_str(field);
                    if !field.is_empty() {
                        content_end = line.len();
                    }
                }
            }
        }

        line.truncate(content_end);
        line
    }

    /// Writes the column headings, unless the header is suppressed.
    pub fn print_header(&mut self) -> io::Result<()> {
        if !self.show_header {
            return Ok(());
        }
        let headings: Vec<&str> = self.columns.iter().map(|c| c.heading).collect();
        let line = self.format_row(&headings);
        writeln!(self.out, "{line}")
    }

    /// Writes one row. Fields beyond the number of columns are ignored.
    pub fn print_row(&mut self, fields: &[&str]) -> io::Result<()> {
        let line = self.format_row(fields);
        writeln!(self.out, "{line}")
    }
}
