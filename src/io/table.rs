use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::io::open_maybe_gz;

pub const STATUS_BASELINE_COL: &str = "Clinical_Status_Baseline";
pub const STATUS_HYBRID_COL: &str = "Clinical_Status_Hybrid";

pub const DEFAULT_SUBJECT_COL: &str = "SUBJECT NUMBER";
pub const DEFAULT_LATERALITY_COL: &str = "Laterality";
pub const DEFAULT_VISIT_COL: &str = "Visit Number";
pub const DEFAULT_POINT_PREFIX: &str = "VF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn detect(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".tsv") || name.ends_with(".txt") {
            Self::Tab
        } else {
            Self::Comma
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Comma => "csv",
            Self::Tab => "tsv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub subject: String,
    pub laterality: String,
    pub visit: String,
    pub point_prefix: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT_COL.to_string(),
            laterality: DEFAULT_LATERALITY_COL.to_string(),
            visit: DEFAULT_VISIT_COL.to_string(),
            point_prefix: DEFAULT_POINT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub subject: usize,
    pub laterality: usize,
    pub visit: usize,
    pub points: Vec<usize>,
}

impl ColumnLayout {
    pub fn resolve(headers: &[String], spec: &ColumnSpec) -> Result<Self> {
        for reserved in [STATUS_BASELINE_COL, STATUS_HYBRID_COL] {
            if headers.iter().any(|h| h.trim() == reserved) {
                bail!("schema error: input already contains output column '{}'", reserved);
            }
        }

        let subject = find_column(headers, &spec.subject)?;
        let laterality = find_column(headers, &spec.laterality)?;
        let visit = find_column(headers, &spec.visit)?;
        let keys = [subject, laterality, visit];

        let points: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| !keys.contains(i) && h.trim().starts_with(&spec.point_prefix))
            .map(|(i, _)| i)
            .collect();
        if points.is_empty() {
            bail!(
                "schema error: no test point columns found with prefix '{}'",
                spec.point_prefix
            );
        }

        Ok(Self {
            subject,
            laterality,
            visit,
            points,
        })
    }

    pub fn point_names<'a>(&self, headers: &'a [String]) -> Vec<&'a str> {
        self.points.iter().map(|&i| headers[i].trim()).collect()
    }
}

fn find_column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .with_context(|| format!("schema error: required column '{}' not found", name))
}

pub fn read_table(path: &Path, delimiter: Delimiter) -> Result<Table> {
    let reader = open_maybe_gz(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    if let Some(first) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }
    if headers.iter().all(|h| h.trim().is_empty()) {
        bail!("{} has no header row", path.display());
    }

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("failed to read data row {}", i + 1))?;
        if record.len() != headers.len() {
            bail!(
                "schema error: data row {} has {} fields, header has {}",
                i + 1,
                record.len(),
                headers.len()
            );
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    info!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "table_loaded"
    );
    Ok(Table { headers, rows })
}
