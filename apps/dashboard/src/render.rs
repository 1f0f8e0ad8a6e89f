//! Plain-text rendering of dashboard view states.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use client_core::{DashboardData, DashboardViewState};
use shared::domain::{GenreSalesSummary, RecentSale, UnsoldGenre};

pub const INVALID_DATE: &str = "Invalid Date";
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";
pub const LOADING: &str = "Loading...";
const NO_SALE: &str = "—";

const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Whether `pattern` renders a date without timezone information. Offset
/// specifiers such as `%z` parse fine but fail when formatting.
pub fn is_renderable_pattern(pattern: &str) -> bool {
    let Some(sample) =
        NaiveDate::from_ymd_opt(2000, 1, 2).and_then(|date| date.and_hms_opt(3, 4, 5))
    else {
        return false;
    };
    let mut out = String::new();
    write!(out, "{}", sample.format(pattern)).is_ok()
}

/// Parses the date shapes the backend emits. Offset timestamps are
/// normalised to UTC.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    if let Some(parsed) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Some(parsed.naive_utc());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[derive(Debug, Clone)]
pub struct DateFormatter {
    pattern: String,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl DateFormatter {
    /// `pattern` must already be a valid strftime pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Locale-style date text, or `Invalid Date` when `raw` does not parse.
    pub fn format(&self, raw: &str) -> String {
        let Some(date) = parse_date(raw) else {
            return INVALID_DATE.to_string();
        };
        let mut out = String::new();
        match write!(out, "{}", date.format(&self.pattern)) {
            Ok(()) => out,
            Err(_) => INVALID_DATE.to_string(),
        }
    }
}

pub fn recent_sale_text(sale: Option<&RecentSale>, dates: &DateFormatter) -> String {
    match sale {
        Some(sale) => format!("{} on {}", sale.genre, dates.format(&sale.date_sold)),
        None => NO_SALE.to_string(),
    }
}

pub fn genre_summary_rows(rows: &[GenreSalesSummary], dates: &DateFormatter) -> Vec<Vec<String>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            vec![
                (index + 1).to_string(),
                row.genre.clone(),
                row.sales_count.to_string(),
                dates.format(&row.last_sale_date),
                row.last_track_sold.clone(),
            ]
        })
        .collect()
}

pub fn unsold_genre_rows(rows: &[UnsoldGenre]) -> Vec<Vec<String>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| vec![(index + 1).to_string(), row.name.clone()])
        .collect()
}

pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!(" {cell}{} ", " ".repeat(pad))
            })
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.to_vec()));
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(width + 2)).collect();
    out.push(format!("|{}|", rule.join("|")));
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

pub fn render_dashboard(data: &DashboardData, dates: &DateFormatter) -> String {
    let summary = render_table(
        &[
            "#",
            "Music Genre",
            "Number of Sales",
            "Last Sale",
            "Last Track Sold",
        ],
        &genre_summary_rows(&data.genre_summaries, dates),
    );
    let unsold = render_table(
        &["#", "Music Genre"],
        &unsold_genre_rows(&data.unsold_genres),
    );

    format!(
        "Distribution of sales by genre\n\n\
         Number of music genres sold: {}\n\
         Most recent Sale: {}\n\n\
         Genre Sale Summary\n{summary}\n\n\
         Genres Not Sold\n{unsold}\n",
        data.total_genres.total_genre_sold,
        recent_sale_text(data.recent_sale.as_ref(), dates),
    )
}

pub fn render_state(state: &DashboardViewState, dates: &DateFormatter) -> String {
    match state {
        DashboardViewState::Loading => LOADING.to_string(),
        DashboardViewState::Ready(data) => render_dashboard(data, dates),
        DashboardViewState::Failed { reason } => format!("Error: {reason}"),
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
