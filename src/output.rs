// lvl - CLI for the Level27 hosting management API
// Copyright (C) 2026 The lvl contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Rendering of command results: aligned tables for lists, an indented
//! key/value view for single entities, or JSON/YAML of the typed value.

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// How a table cell is derived from its row.
pub enum Cell<T> {
    /// Dotted JSON path into the serialized row, e.g. `organisation.name`.
    Path(&'static str),
    /// Unix timestamp at a path, shown as UTC date and time.
    Time(&'static str),
    /// Length of the array at a path.
    Count(&'static str),
    With(fn(&T) -> String),
}

pub struct Column<T> {
    pub header: &'static str,
    pub cell: Cell<T>,
}

impl<T> Column<T> {
    pub fn path(header: &'static str, path: &'static str) -> Self {
        Self {
            header,
            cell: Cell::Path(path),
        }
    }

    pub fn time(header: &'static str, path: &'static str) -> Self {
        Self {
            header,
            cell: Cell::Time(path),
        }
    }

    pub fn count(header: &'static str, path: &'static str) -> Self {
        Self {
            header,
            cell: Cell::Count(path),
        }
    }

    pub fn with(header: &'static str, f: fn(&T) -> String) -> Self {
        Self {
            header,
            cell: Cell::With(f),
        }
    }

    fn render(&self, row: &T, json: &Value) -> String {
        match &self.cell {
            Cell::Path(path) => lookup(json, path).map(scalar).unwrap_or_default(),
            Cell::Time(path) => lookup(json, path).map(timestamp).unwrap_or_default(),
            Cell::Count(path) => lookup(json, path)
                .and_then(Value::as_array)
                .map_or(0, Vec::len)
                .to_string(),
            Cell::With(f) => f(row),
        }
    }
}

/// Follows a dotted path through nested objects.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

fn timestamp(value: &Value) -> String {
    let secs = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    match secs {
        Some(secs) => format_unix_time(secs),
        None => scalar(value),
    }
}

/// `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_unix_time(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// Normalizes an address for display. The API sends IPv4 addresses as
/// 32-bit integers on some endpoints; `0` means unset.
pub fn ip_display(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(int) = raw.parse::<u32>() {
        return if int == 0 {
            String::new()
        } else {
            Ipv4Addr::from(int).to_string()
        };
    }
    if let Ok(v6) = raw.parse::<Ipv6Addr>() {
        return v6.to_string();
    }
    raw.to_string()
}

fn grid(headers: &[String], rows: &[Vec<String>], indent: &str) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        let joined = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        format!("{indent}{}\n", joined.trim_end())
    };

    let mut out = line(headers);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(separator.as_slice()));
    for row in rows {
        out.push_str(&line(row.as_slice()));
    }
    out
}

/// Renders `rows` as an aligned table with a dashed separator under the
/// headers.
pub fn render_table<T: Serialize>(rows: &[T], columns: &[Column<T>]) -> Result<String> {
    if rows.is_empty() {
        return Ok("No resources found.\n".to_string());
    }

    let headers: Vec<String> = columns.iter().map(|c| c.header.to_uppercase()).collect();
    let mut table = Vec::with_capacity(rows.len());
    for row in rows {
        let json = serde_json::to_value(row).context("serializing table row")?;
        table.push(columns.iter().map(|c| c.render(row, &json)).collect());
    }
    Ok(grid(&headers, &table, ""))
}

fn is_non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn is_timestamp_key(key: &str) -> bool {
    key.strip_prefix("dt")
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}

fn field(key: &str, value: &Value) -> String {
    if is_timestamp_key(key) && !value.is_null() {
        timestamp(value)
    } else {
        scalar(value)
    }
}

/// Up to eight scalar columns that have a value in at least one row.
fn nested_table(rows: &[Value], indent: &str) -> String {
    let Some(Value::Object(first)) = rows.first() else {
        return String::new();
    };
    let columns: Vec<&String> = first
        .keys()
        .filter(|key| {
            rows.iter().any(|row| {
                row.get(key.as_str())
                    .is_some_and(|v| !v.is_object() && !v.is_array() && is_non_empty(v))
            })
        })
        .take(8)
        .collect();

    let headers: Vec<String> = columns.iter().map(|c| c.to_uppercase()).collect();
    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|key| row.get(key.as_str()).map(|v| field(key, v)).unwrap_or_default())
                .collect()
        })
        .collect();
    grid(&headers, &table, indent)
}

fn describe_map(map: &Map<String, Value>, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let width = map.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in map {
        match value {
            Value::Object(inner) if inner.is_empty() => {}
            Value::Object(inner) => {
                let _ = writeln!(out, "{indent}{key}:");
                describe_map(inner, depth + 1, out);
            }
            Value::Array(items) if items.is_empty() => {
                let _ = writeln!(out, "{indent}{key:width$}  -");
            }
            Value::Array(items) if items.iter().all(Value::is_object) => {
                let _ = writeln!(out, "{indent}{key}:");
                out.push_str(&nested_table(items, &"  ".repeat(depth + 1)));
            }
            Value::Array(items) => {
                let joined: Vec<String> = items.iter().map(scalar).collect();
                let _ = writeln!(out, "{indent}{key:width$}  {}", joined.join(", "));
            }
            other => {
                let _ = writeln!(out, "{indent}{key:width$}  {}", field(key, other));
            }
        }
    }
}

/// Indented key/value view of a single entity.
pub fn render_describe<T: Serialize>(item: &T) -> Result<String> {
    let value = serde_json::to_value(item).context("serializing entity")?;
    let mut out = String::new();
    match &value {
        Value::Object(map) => describe_map(map, 0, &mut out),
        other => {
            let _ = writeln!(out, "{}", scalar(other));
        }
    }
    Ok(out)
}

/// Renders `value` as JSON or YAML, or through `text` in text mode.
fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> Result<String>,
) -> Result<String> {
    match format {
        OutputFormat::Text => text(),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(value).context("serializing JSON")?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => serde_yaml::to_string(value).context("serializing YAML"),
    }
}

pub fn print_list<T: Serialize>(
    format: OutputFormat,
    rows: &[T],
    columns: &[Column<T>],
) -> Result<()> {
    print!("{}", render(format, rows, || render_table(rows, columns))?);
    Ok(())
}

pub fn print_describe<T: Serialize>(format: OutputFormat, item: &T) -> Result<()> {
    print!("{}", render(format, item, || render_describe(item))?);
    Ok(())
}

/// Prints `message` in text mode, or the entity itself otherwise.
pub fn print_created<T: Serialize>(format: OutputFormat, message: &str, item: &T) -> Result<()> {
    print!("{}", render(format, item, || Ok(format!("{message}\n")))?);
    Ok(())
}
