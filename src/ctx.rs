use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cohort::{Cohort, Record, SeriesKey};
use crate::io::table::{ColumnLayout, ColumnSpec, Delimiter, Table};
use crate::progression::{ProgressionParams, RowLabel, SeriesStatus};

pub const OUTPUT_STEM: &str = "visit_wise_progression_dual_binary";
pub const REPORT_FILE: &str = "vfprogress.json";

#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub columns: ColumnSpec,
    pub params: ProgressionParams,
    pub threads: usize,
    pub write_json: bool,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub table_path: PathBuf,
    pub json_path: PathBuf,
}

#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub delimiter: Delimiter,
    pub config: RunConfig,
    pub table: Option<Table>,
    pub layout: Option<ColumnLayout>,
    pub records: Vec<Record>,
    pub cohort: Option<Cohort>,
    pub statuses: Option<BTreeMap<SeriesKey, SeriesStatus>>,
    pub labels: Vec<RowLabel>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
}

impl Ctx {
    pub fn new(input: PathBuf, out_dir: PathBuf, config: RunConfig) -> Self {
        let delimiter = Delimiter::detect(&input);
        let table_path = out_dir.join(format!("{}.{}", OUTPUT_STEM, delimiter.extension()));
        let json_path = out_dir.join(REPORT_FILE);
        Self {
            input,
            delimiter,
            config,
            table: None,
            layout: None,
            records: Vec::new(),
            cohort: None,
            statuses: None,
            labels: Vec::new(),
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                table_path,
                json_path,
            },
        }
    }

    pub fn params(&self) -> &ProgressionParams {
        &self.config.params
    }
}
