use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Result, bail};
use tracing::warn;

use crate::io::table::{ColumnLayout, Table};

pub mod key;

pub use key::OrderKey;

#[derive(Debug, Clone)]
pub struct Record {
    pub row: usize,
    pub subject: OrderKey,
    pub laterality: String,
    pub visit: OrderKey,
    pub points: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeriesKey {
    pub subject: OrderKey,
    pub laterality: String,
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject, self.laterality)
    }
}

#[derive(Debug, Clone)]
pub struct Series {
    pub key: SeriesKey,
    pub records: Vec<Record>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn baseline(&self) -> Option<&[f64]> {
        self.records.first().map(|r| r.points.as_slice())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cohort {
    pub series: BTreeMap<SeriesKey, Series>,
    pub warnings: Vec<String>,
}

impl Cohort {
    pub fn record_count(&self) -> usize {
        self.series.values().map(Series::len).sum()
    }

    pub fn subject_count(&self) -> usize {
        let mut subjects: Vec<&OrderKey> = self.series.keys().map(|k| &k.subject).collect();
        subjects.dedup();
        subjects.len()
    }
}

pub fn parse_records(table: &Table, layout: &ColumnLayout) -> Result<Vec<Record>> {
    let mut records = Vec::with_capacity(table.rows.len());
    for (row, fields) in table.rows.iter().enumerate() {
        let subject = key_field(table, layout.subject, row, fields)?;
        let laterality = key_field(table, layout.laterality, row, fields)?;
        let visit = key_field(table, layout.visit, row, fields)?;

        let mut points = Vec::with_capacity(layout.points.len());
        for &col in &layout.points {
            let raw = fields[col].trim();
            if raw.is_empty() {
                bail!(
                    "type error: missing test point value in column '{}' at data row {}",
                    table.headers[col],
                    row + 1
                );
            }
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => points.push(v),
                _ => bail!(
                    "type error: column '{}' at data row {} is not a finite number: '{}'",
                    table.headers[col],
                    row + 1,
                    raw
                ),
            }
        }

        records.push(Record {
            row,
            subject: OrderKey::parse(subject),
            laterality: laterality.to_string(),
            visit: OrderKey::parse(visit),
            points,
        });
    }
    Ok(records)
}

fn key_field<'a>(
    table: &Table,
    col: usize,
    row: usize,
    fields: &'a [String],
) -> Result<&'a str> {
    let value = fields[col].trim();
    if value.is_empty() {
        bail!(
            "missing value in key column '{}' at data row {}",
            table.headers[col],
            row + 1
        );
    }
    Ok(value)
}

pub fn group_records(records: Vec<Record>) -> Cohort {
    let mut series: BTreeMap<SeriesKey, Series> = BTreeMap::new();
    for record in records {
        let key = SeriesKey {
            subject: record.subject.clone(),
            laterality: record.laterality.clone(),
        };
        series
            .entry(key.clone())
            .or_insert_with(|| Series {
                key,
                records: Vec::new(),
            })
            .records
            .push(record);
    }

    let mut warnings = Vec::new();
    for s in series.values_mut() {
        s.records.sort_by(|a, b| a.visit.cmp(&b.visit));
        for pair in s.records.windows(2) {
            if pair[0].visit == pair[1].visit {
                let msg = format!(
                    "duplicate visit {} for series {} (data rows {} and {})",
                    pair[1].visit,
                    s.key,
                    pair[0].row + 1,
                    pair[1].row + 1
                );
                warn!(series = %s.key, visit = %pair[1].visit, "duplicate_visit");
                warnings.push(msg);
            }
        }
    }

    Cohort { series, warnings }
}
