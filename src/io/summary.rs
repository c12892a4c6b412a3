use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::schema::v1::StatusCounts;

pub fn status_counts(ctx: &Ctx) -> Result<StatusCounts> {
    let statuses = ctx.statuses.as_ref().context("progression statuses missing")?;

    let mut counts = StatusCounts::default();
    for label in &ctx.labels {
        counts.baseline_rows += label.baseline as u64;
        counts.hybrid_rows += label.hybrid as u64;
        let combo = format!("{},{}", label.baseline as u8, label.hybrid as u8);
        *counts.combinations.entry(combo).or_insert(0) += 1;
    }
    for status in statuses.values() {
        counts.baseline_series += status.progressed_baseline() as u64;
        counts.hybrid_series += status.progressed_hybrid() as u64;
    }
    Ok(counts)
}

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let cohort = ctx.cohort.as_ref().context("cohort missing")?;
    let layout = ctx.layout.as_ref().context("column layout missing")?;
    let counts = status_counts(ctx)?;
    let params = ctx.params();

    let mut out = String::new();
    out.push_str(&format!("kira-vfprogress v{}\n", version));
    out.push_str(&format!(
        "Input: {} rows, {} subjects, {} series, {} test points\n",
        cohort.record_count(),
        cohort.subject_count(),
        cohort.series.len(),
        layout.points.len()
    ));
    out.push_str(&format!(
        "Params: drop_db={} min_points={}\n",
        params.drop_db, params.min_points
    ));
    out.push_str(&format!(
        "Progressed series: baseline={} hybrid={}\n",
        counts.baseline_series, counts.hybrid_series
    ));
    out.push_str("Clinical_Status_Baseline,Clinical_Status_Hybrid\tcount\n");
    for (combo, n) in &counts.combinations {
        out.push_str(&format!("{}\t{}\n", combo, n));
    }

    Ok(out)
}
