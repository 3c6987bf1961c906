//
//  spotctl
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for every command, supporting the formats users pick
//! with `-o/--output`:
//!
//! - **table**: Human-readable columns for interactive terminal use
//! - **wide**: The table plus extra columns
//! - **json**: The resource as returned by the API, pretty-printed
//! - **yaml**: Same as json, in YAML
//!
//! ## Architecture
//!
//! - [`table`]: Table formatting utilities using `comfy_table`
//! - [`json`]: JSON and YAML serialization using `serde_json` / `serde_yaml`
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: The available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TableOutput`]: Trait for resources that render as table rows
//!
//! ## Example
//!
//! ```rust,ignore
//! use spotctl::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write_list(&pools.items, "No spot node pools found in namespace org-x")?;
//! writer.write_success("Spot node pool 'pool-a' deleted");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Represents the available output formats for CLI output.
///
/// The default is [`OutputFormat::Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format with optional color support.
    #[default]
    Table,
    /// Table format with additional columns.
    Wide,
    /// JSON format for scripting and automation.
    Json,
    /// YAML format for scripting and automation.
    Yaml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Wide => "wide",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Whether this format renders tables (as opposed to structured data).
    pub fn is_tabular(&self) -> bool {
        matches!(self, Self::Table | Self::Wide)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "wide" => Ok(Self::Wide),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => anyhow::bail!(
                "invalid output format '{}': expected one of table, wide, json, yaml",
                other
            ),
        }
    }
}

/// A unified output writer that handles multiple output formats.
///
/// Data goes to stdout. Errors and warnings go to stderr so that piping
/// `-o json` output stays clean.
///
/// # Notes
///
/// Color output is automatically detected based on terminal capabilities.
/// Colors are disabled when output is piped or redirected.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn wide(&self) -> bool {
        self.format == OutputFormat::Wide
    }

    /// Writes a single resource using the configured output format.
    ///
    /// Table formats render a one-row table with the same columns as the
    /// list view.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value)?,
            OutputFormat::Yaml => write_yaml(value)?,
            OutputFormat::Table | OutputFormat::Wide => {
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers(self.wide()))
                    .row(value.row(self.wide(), self.color))
                    .print();
            }
        }
        Ok(())
    }

    /// Writes a list of resources using the configured output format.
    ///
    /// When `values` is empty, table formats print `empty_message` instead of
    /// an empty table, while JSON and YAML print an empty array.
    pub fn write_list<T: Serialize + TableOutput>(
        &self,
        values: &[T],
        empty_message: &str,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(values)?,
            OutputFormat::Yaml => write_yaml(values)?,
            OutputFormat::Table | OutputFormat::Wide => {
                if values.is_empty() {
                    println!("{}", empty_message);
                    return Ok(());
                }
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers(self.wide()))
                    .rows(values.iter().map(|v| v.row(self.wide(), self.color)))
                    .print();
            }
        }
        Ok(())
    }

    /// Writes an error message to stderr, prefixed with "error:".
    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    /// Writes a warning message to stderr, prefixed with "warning:".
    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Writes a success message to stdout behind a checkmark.
    ///
    /// Suppressed for JSON and YAML so scripted output stays parseable.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if !self.format.is_tabular() {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// A trait for resources that render as rows of a table.
///
/// # Example
///
/// ```rust,ignore
/// impl TableOutput for Region {
///     fn headers(wide: bool) -> Vec<&'static str> {
///         vec!["NAME", "COUNTRY"]
///     }
///
///     fn row(&self, _wide: bool, _color: bool) -> Vec<String> {
///         vec![self.metadata.name.clone(), self.spec.country.clone()]
///     }
/// }
/// ```
pub trait TableOutput {
    /// Column headers; `wide` adds the extra columns.
    fn headers(wide: bool) -> Vec<&'static str>;

    /// One row of cells, matching [`TableOutput::headers`] for the same `wide`.
    fn row(&self, wide: bool, color: bool) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("WIDE".parse::<OutputFormat>().unwrap(), OutputFormat::Wide);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display_round_trip() {
        for format in [
            OutputFormat::Table,
            OutputFormat::Wide,
            OutputFormat::Json,
            OutputFormat::Yaml,
        ] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
        assert!(OutputFormat::Wide.is_tabular());
        assert!(!OutputFormat::Json.is_tabular());
    }
}
