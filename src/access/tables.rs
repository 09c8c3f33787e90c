//! Access and gap tables.
//!
//! Intervals are kept as offsets in seconds from the propagator epoch during the analysis and
//! turned into calendar epochs only here, when the public tables are built.

use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};
use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::constants::Second;
use crate::time::offset_epoch;

/// A time interval, as offsets in seconds from the propagator epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub begin: Second,
    pub end: Second,
}

impl TimeInterval {
    pub fn new(begin: Second, end: Second) -> Self {
        TimeInterval { begin, end }
    }

    pub fn duration(&self) -> Second {
        self.end - self.begin
    }
}

/// Unit of the duration column.
///
/// Parsed from its symbol (`":s"`, `":m"`, `":h"`, the leading colon being optional). Unknown
/// symbols fall back to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim().trim_start_matches(':') {
            "m" => TimeUnit::Minutes,
            "h" => TimeUnit::Hours,
            _ => TimeUnit::Seconds,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => ":s",
            TimeUnit::Minutes => ":m",
            TimeUnit::Hours => ":h",
        }
    }

    /// Abbreviation used in column headers.
    pub fn label(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
            TimeUnit::Hours => "h",
        }
    }

    /// Express a number of seconds in this unit.
    pub fn from_seconds(&self, seconds: Second) -> f64 {
        match self {
            TimeUnit::Seconds => seconds,
            TimeUnit::Minutes => seconds / 60.0,
            TimeUnit::Hours => seconds / 3600.0,
        }
    }
}

impl From<&str> for TimeUnit {
    fn from(symbol: &str) -> Self {
        TimeUnit::from_symbol(symbol)
    }
}

impl From<String> for TimeUnit {
    fn from(symbol: String) -> Self {
        TimeUnit::from_symbol(&symbol)
    }
}

impl From<TimeUnit> for String {
    fn from(unit: TimeUnit) -> Self {
        unit.symbol().to_string()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Semantics of the rows of an [`IntervalTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    Access,
    Gap,
}

impl IntervalKind {
    pub fn description(&self) -> &'static str {
        match self {
            IntervalKind::Access => "Accesses to the ground facilities.",
            IntervalKind::Gap => "Gaps to the ground facilities.",
        }
    }

    fn column_names(&self) -> [&'static str; 3] {
        match self {
            IntervalKind::Access => ["access_beginning", "access_end", "duration"],
            IntervalKind::Gap => ["gap_beginning", "gap_end", "duration"],
        }
    }
}

/// One row of an [`IntervalTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalRow {
    pub begin: Epoch,
    pub end: Epoch,
    /// Duration in the unit of the table.
    pub duration: f64,
}

/// Metadata of a column: its name and, for the duration, its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMetadata {
    pub name: &'static str,
    pub unit: Option<TimeUnit>,
}

/// Ordered access or gap intervals with calendar epochs and durations in a chosen unit.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTable {
    kind: IntervalKind,
    unit: TimeUnit,
    rows: Vec<IntervalRow>,
}

impl IntervalTable {
    /// Build a table from intervals expressed in seconds after `epoch`.
    pub fn from_intervals(
        kind: IntervalKind,
        epoch: Epoch,
        intervals: &[TimeInterval],
        unit: TimeUnit,
    ) -> Self {
        let rows = intervals
            .iter()
            .map(|interval| IntervalRow {
                begin: offset_epoch(epoch, interval.begin),
                end: offset_epoch(epoch, interval.end),
                duration: unit.from_seconds(interval.duration()),
            })
            .collect();

        IntervalTable { kind, unit, rows }
    }

    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    /// Table-level description, e.g. "Accesses to the ground facilities.".
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    /// Unit of the duration column.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn columns(&self) -> [ColumnMetadata; 3] {
        let [begin, end, duration] = self.kind.column_names();
        [
            ColumnMetadata { name: begin, unit: None },
            ColumnMetadata { name: end, unit: None },
            ColumnMetadata {
                name: duration,
                unit: Some(self.unit),
            },
        ]
    }

    pub fn rows(&self) -> &[IntervalRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the durations, in the unit of the table.
    pub fn total_duration(&self) -> f64 {
        self.rows.iter().map(|row| row.duration).sum()
    }
}

impl fmt::Display for IntervalTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [begin, end, duration] = self.kind.column_names();

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new(format!("{begin} (UTC)")),
            Cell::new(format!("{end} (UTC)")),
            Cell::new(format!("{duration} [{}]", self.unit.label())),
        ]);

        for row in &self.rows {
            table.add_row(Row::from(vec![
                Cell::new(row.begin).set_alignment(CellAlignment::Right),
                Cell::new(row.end).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", row.duration)).set_alignment(CellAlignment::Right),
            ]));
        }

        writeln!(f, "{}", self.description())?;
        write!(f, "{table}")
    }
}
