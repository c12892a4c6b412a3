use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cohort::{Cohort, Series, SeriesKey};

pub mod confirm;
pub mod delta;
pub mod event;
pub mod propagate;
pub mod reference;

pub const DEFAULT_DROP_DB: f64 = 3.0;
pub const DEFAULT_MIN_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressionParams {
    pub drop_db: f64,
    pub min_points: usize,
}

impl Default for ProgressionParams {
    fn default() -> Self {
        Self {
            drop_db: DEFAULT_DROP_DB,
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

impl ProgressionParams {
    pub fn validate(&self) -> Result<()> {
        if !self.drop_db.is_finite() || self.drop_db <= 0.0 {
            bail!("drop threshold must be a positive number, got {}", self.drop_db);
        }
        if self.min_points == 0 {
            bail!("minimum worsened point count must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesStatus {
    pub baseline: Vec<bool>,
    pub hybrid: Vec<bool>,
}

impl SeriesStatus {
    pub fn progressed_baseline(&self) -> bool {
        self.baseline.last().copied().unwrap_or(false)
    }

    pub fn progressed_hybrid(&self) -> bool {
        self.hybrid.last().copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLabel {
    pub row: usize,
    pub baseline: bool,
    pub hybrid: bool,
}

pub fn classify_points<V: AsRef<[f64]>>(
    visits: &[V],
    params: &ProgressionParams,
) -> Result<SeriesStatus> {
    let events = event::visit_events(visits, params)?;
    let baseline = confirm::confirm_baseline(&events);
    let hybrid = confirm::confirm_hybrid(&events);
    Ok(SeriesStatus {
        baseline: propagate::carry_forward(&baseline),
        hybrid: propagate::carry_forward(&hybrid),
    })
}

pub fn classify_series(series: &Series, params: &ProgressionParams) -> Result<SeriesStatus> {
    let visits: Vec<&[f64]> = series.records.iter().map(|r| r.points.as_slice()).collect();
    classify_points(&visits, params).with_context(|| format!("series {}", series.key))
}

pub fn classify_cohort(
    cohort: &Cohort,
    params: &ProgressionParams,
    threads: usize,
) -> Result<BTreeMap<SeriesKey, SeriesStatus>> {
    #[cfg(feature = "mt")]
    {
        if threads != 1 {
            use rayon::prelude::*;

            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| anyhow::anyhow!("failed to build thread pool: {}", e))?;
            let series: Vec<&Series> = cohort.series.values().collect();
            let results: Vec<Result<SeriesStatus>> = pool.install(|| {
                series
                    .par_iter()
                    .map(|s| classify_series(s, params))
                    .collect()
            });
            let mut out = BTreeMap::new();
            for (s, status) in series.into_iter().zip(results) {
                out.insert(s.key.clone(), status?);
            }
            return Ok(out);
        }
    }

    #[cfg(not(feature = "mt"))]
    let _ = threads;

    let mut out = BTreeMap::new();
    for (key, series) in &cohort.series {
        out.insert(key.clone(), classify_series(series, params)?);
    }
    Ok(out)
}

pub fn row_labels(
    cohort: &Cohort,
    statuses: &BTreeMap<SeriesKey, SeriesStatus>,
) -> Result<Vec<RowLabel>> {
    let mut labels = Vec::with_capacity(cohort.record_count());
    for (key, series) in &cohort.series {
        let Some(status) = statuses.get(key) else {
            bail!("no progression status computed for series {}", key);
        };
        if status.baseline.len() != series.len() || status.hybrid.len() != series.len() {
            bail!(
                "status length mismatch for series {}: {} visits, {} / {} labels",
                key,
                series.len(),
                status.baseline.len(),
                status.hybrid.len()
            );
        }
        for (i, record) in series.records.iter().enumerate() {
            labels.push(RowLabel {
                row: record.row,
                baseline: status.baseline[i],
                hybrid: status.hybrid[i],
            });
        }
    }
    Ok(labels)
}
