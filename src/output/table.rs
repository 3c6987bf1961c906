//
//  spotctl
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! This module provides utilities for creating and formatting tabular output
//! in the terminal. It uses the `comfy_table` crate for rendering Unicode
//! tables with dynamic content arrangement.
//!
//! ## Features
//!
//! - Builder pattern for constructing tables with headers and rows
//! - Automatic color detection and application
//! - Status-aware formatting for cloudspace phases, health and bid states
//! - Placeholder values for missing fields (`<none>`, `N/A`)
//! - String truncation for long descriptions
//!
//! ## Example
//!
//! ```rust,ignore
//! use spotctl::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["NAME", "REGION", "PHASE"])
//!     .row(["prod", "uk-lon-1", "Ready"])
//!     .print();
//! ```

use std::fmt::Display;

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Placeholder for missing values in namespaced resource tables.
pub const NONE: &str = "<none>";

/// Placeholder for missing values in catalogue tables (regions, server classes).
pub const NOT_AVAILABLE: &str = "N/A";

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub struct TableBuilder {
    table: Table,
    headers: Vec<String>,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            headers: Vec::new(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(|s| s.into()).collect();
        if self.color {
            let header_cells: Vec<Cell> = self
                .headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect();
            self.table.set_header(header_cells);
        } else {
            self.table.set_header(&self.headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(|s| s.into()).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(|s| s.into()).collect();
            self.table.add_row(row);
        }
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "ready" | "running" | "healthy" | "winningbid" | "won" | "fulfilled" | "success" => {
            style(status).green().to_string()
        }
        "provisioning" | "pending" | "creating" | "upgrading" | "updating" => {
            style(status).yellow().to_string()
        }
        "failed" | "error" | "unhealthy" | "losingbid" | "lost" | "deleting" => {
            style(status).red().to_string()
        }
        _ => status.to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    if color {
        use console::style;
        if value {
            style("true").green().to_string()
        } else {
            style("false").dim().to_string()
        }
    } else {
        value.to_string()
    }
}

/// `value`, or `placeholder` when it is empty.
pub fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// The displayed optional value, or `placeholder` when absent.
pub fn opt_or_placeholder<T: Display>(value: Option<T>, placeholder: &str) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| placeholder.to_string())
}

pub fn truncate(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
