use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::io::summary::status_counts;
use crate::io::table::{STATUS_BASELINE_COL, STATUS_HYBRID_COL};
use crate::io::{Staged, stage_file};
use crate::schema::v1::{Columns, InputMeta, Output, VfProgressionV1};

pub fn build_report(ctx: &Ctx) -> Result<VfProgressionV1> {
    let table = ctx.table.as_ref().context("input table missing")?;
    let layout = ctx.layout.as_ref().context("column layout missing")?;
    let cohort = ctx.cohort.as_ref().context("cohort missing")?;
    let spec = &ctx.config.columns;

    let columns = Columns {
        subject: spec.subject.clone(),
        laterality: spec.laterality.clone(),
        visit: spec.visit.clone(),
        point_prefix: spec.point_prefix.clone(),
        point_columns: layout
            .point_names(&table.headers)
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    let input_meta = InputMeta {
        path: ctx.input.display().to_string(),
        rows: table.rows.len() as u64,
        subjects: cohort.subject_count() as u64,
        series: cohort.series.len() as u64,
        test_points: layout.points.len() as u64,
    };

    let output = Output {
        table: ctx
            .output
            .table_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string(),
        status_columns: vec![STATUS_BASELINE_COL.to_string(), STATUS_HYBRID_COL.to_string()],
    };

    Ok(VfProgressionV1 {
        tool: "kira-vfprogress".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: "v1".to_string(),
        params: ctx.config.params,
        columns,
        input_meta,
        output,
        status_counts: status_counts(ctx)?,
        warnings: ctx.warnings.clone(),
    })
}

pub fn stage_json(path: &Path, ctx: &Ctx) -> Result<Staged> {
    let report = build_report(ctx)?;
    stage_file(path, |file| {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writer.flush()?;
        Ok(())
    })
    .with_context(|| format!("failed to write {}", path.display()))
}
