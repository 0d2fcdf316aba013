use std::io::{self, IsTerminal, Write};

use anyhow::{Context, anyhow};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::event::Event;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self {
            color: color && io::stdout().is_terminal(),
        })
    }

    #[tracing::instrument(skip(self, grid))]
    pub fn print_grid(&self, grid: &Grid<'_>, format: OutputFormat) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        match format {
            OutputFormat::Text => self.write_grid(&mut out, grid),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, grid).context("failed to encode grid")?;
                writeln!(out)?;
                Ok(())
            }
        }
    }

    pub fn write_grid<W: Write>(&self, mut writer: W, grid: &Grid<'_>) -> anyhow::Result<()> {
        let refresh = if grid.refresh_enabled { " [refresh]" } else { "" };
        writeln!(writer, "{}{refresh}", self.paint(&grid.header_text, "1"))?;

        for column in &grid.columns {
            writeln!(writer)?;
            writeln!(writer, "{}", self.paint(&column.header_label, "1;36"))?;

            if column.events.is_empty() {
                continue;
            }

            let headers = vec![
                "Time".to_string(),
                "Title".to_string(),
                "Participants".to_string(),
                "Location".to_string(),
                "Color".to_string(),
            ];
            let rows = column
                .events
                .iter()
                .map(|event| self.event_row(event))
                .collect();
            write_table(&mut writer, headers, rows)?;
        }

        Ok(())
    }

    fn event_row(&self, event: &Event) -> Vec<String> {
        let time = if event.all_day {
            self.paint(&event.time_range_label(), "33")
        } else {
            event.time_range_label()
        };
        vec![
            time,
            event.title.clone(),
            event.participants_label(),
            event.location.clone(),
            event.color.clone(),
        ]
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let mut widths: Vec<usize> = headers
        .iter()
        .map(|header| UnicodeWidthStr::width(header.as_str()))
        .collect();

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for (header, width) in headers.iter().zip(&widths) {
        write!(writer, "  {header:width$}", width = *width)?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "  {:-<width$}", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (cell, width) in row.iter().zip(&widths) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = width.saturating_sub(visible_width);
            write!(writer, "  {}{}", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
