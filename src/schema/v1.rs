use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::progression::ProgressionParams;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Columns {
    pub subject: String,
    pub laterality: String,
    pub visit: String,
    pub point_prefix: String,
    pub point_columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub path: String,
    pub rows: u64,
    pub subjects: u64,
    pub series: u64,
    pub test_points: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub baseline_rows: u64,
    pub hybrid_rows: u64,
    pub baseline_series: u64,
    pub hybrid_series: u64,
    // keyed "<baseline>,<hybrid>"
    pub combinations: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub table: String,
    pub status_columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VfProgressionV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub params: ProgressionParams,
    pub columns: Columns,
    pub input_meta: InputMeta,
    pub output: Output,
    pub status_counts: StatusCounts,
    pub warnings: Vec<String>,
}
