//! Raw tables as read from a source, before any field is resolved.

use tracing::debug;

use crate::columns::Schema;

/// Rows scanned when looking for a header below banner rows.
const HEADER_SCAN_ROWS: usize = 5;

/// How the header row of a table is located.
#[derive(Debug, Clone, Copy)]
pub enum HeaderRow<'s> {
    /// The first row is always the header (word-processor tables).
    First,
    /// Skip leading banner rows, preferring the row that names the most
    /// required fields of the schema.
    Detect(&'s Schema),
}

/// A rectangular table of trimmed string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Sheet name or `Table_N`; `None` for CSV input.
    pub name: Option<String>,
    pub headers: Vec<String>,
    /// Data rows, each padded or truncated to `headers.len()`.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Builds a table from raw rows. Blank rows are dropped before the
    /// header is located.
    pub fn from_rows(
        name: Option<String>,
        raw_rows: Vec<Vec<String>>,
        header: HeaderRow<'_>,
    ) -> Self {
        let raw_rows: Vec<Vec<String>> = raw_rows
            .into_iter()
            .map(|row| row.iter().map(|cell| normalize_cell(cell)).collect::<Vec<_>>())
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();
        if raw_rows.is_empty() {
            return Self {
                name,
                headers: Vec::new(),
                rows: Vec::new(),
            };
        }
        let header_index = match header {
            HeaderRow::First => 0,
            HeaderRow::Detect(schema) => detect_header_row(&raw_rows, schema),
        };
        let headers: Vec<String> = raw_rows[header_index]
            .iter()
            .map(|value| normalize_header(value))
            .collect();
        let rows = raw_rows
            .iter()
            .skip(header_index + 1)
            .map(|record| {
                (0..headers.len())
                    .map(|idx| record.get(idx).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        if header_index > 0 {
            debug!(
                table = name.as_deref().unwrap_or("csv"),
                skipped = header_index,
                "skipped banner rows above header"
            );
        }
        Self {
            name,
            headers,
            rows,
        }
    }

    /// Rows with at least one non-empty cell.
    pub fn data_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.data_row_count() == 0
    }

    /// Cell values of one column, in row order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }
}

/// Picks the authoritative table: the one with the most data rows, ties
/// going to the earliest. Tables without data rows are never selected.
pub fn select_table(tables: Vec<RawTable>) -> Option<RawTable> {
    let mut best: Option<(usize, RawTable)> = None;
    for table in tables {
        let count = table.data_row_count();
        if count == 0 {
            continue;
        }
        let better = best.as_ref().is_none_or(|(best_count, _)| count > *best_count);
        if better {
            best = Some((count, table));
        }
    }
    best.map(|(count, table)| {
        debug!(
            table = table.name.as_deref().unwrap_or("csv"),
            rows = count,
            "selected source table"
        );
        table
    })
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

#[derive(Debug, Default, Clone, Copy)]
struct RowStats {
    total: usize,
    non_empty: usize,
    numeric: usize,
    alpha: usize,
}

impl RowStats {
    fn ratio(self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64
        }
    }

    fn is_header_like(self) -> bool {
        self.ratio(self.non_empty) >= 0.8
            && self.ratio(self.alpha) >= 0.5
            && self.ratio(self.numeric) <= 0.1
    }

    fn is_data_like(self) -> bool {
        self.ratio(self.numeric) >= 0.2 || self.ratio(self.total - self.non_empty) >= 0.2
    }
}

fn row_stats(row: &[String]) -> RowStats {
    let mut stats = RowStats {
        total: row.len(),
        ..RowStats::default()
    };
    for cell in row {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        stats.non_empty += 1;
        if trimmed.parse::<f64>().is_ok() {
            stats.numeric += 1;
        }
        if trimmed.chars().any(|ch| ch.is_alphabetic()) {
            stats.alpha += 1;
        }
    }
    stats
}

/// Locates the header among the first few rows.
///
/// A row naming required fields by alias wins, the one naming the most
/// fields first. Without alias hits, the first header-like row above the
/// first data-like row is used, else row 0.
fn detect_header_row(rows: &[Vec<String>], schema: &Schema) -> usize {
    let scanned = &rows[..rows.len().min(HEADER_SCAN_ROWS)];

    let by_alias = scanned
        .iter()
        .enumerate()
        .map(|(idx, row)| (idx, schema.required_alias_hits(row)))
        .filter(|&(_, hits)| hits > 0)
        .fold(None, |best: Option<(usize, usize)>, (idx, hits)| match best {
            Some((_, best_hits)) if best_hits >= hits => best,
            _ => Some((idx, hits)),
        });
    if let Some((idx, _)) = by_alias {
        return idx;
    }

    let stats: Vec<RowStats> = scanned.iter().map(|row| row_stats(row)).collect();
    let search_end = stats
        .iter()
        .position(|stat| stat.is_data_like())
        .unwrap_or(1)
        .max(1);
    stats[..search_end]
        .iter()
        .position(|stat| stat.is_header_like())
        .unwrap_or(0)
}
