use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::ctx::Ctx;
use crate::io::table::{STATUS_BASELINE_COL, STATUS_HYBRID_COL};
use crate::io::{Staged, stage_file};

pub fn stage_labelled_table(path: &Path, ctx: &Ctx) -> Result<Staged> {
    let table = ctx.table.as_ref().context("input table missing")?;
    if ctx.labels.len() != table.rows.len() {
        bail!(
            "label count mismatch: {} labels for {} input rows",
            ctx.labels.len(),
            table.rows.len()
        );
    }

    stage_file(path, |file| {
        let mut w = csv::WriterBuilder::new()
            .delimiter(ctx.delimiter.as_byte())
            .from_writer(file);

        let mut header: Vec<&str> = table.headers.iter().map(String::as_str).collect();
        header.push(STATUS_BASELINE_COL);
        header.push(STATUS_HYBRID_COL);
        w.write_record(&header)?;

        for label in &ctx.labels {
            let row = table
                .rows
                .get(label.row)
                .with_context(|| format!("label refers to unknown row {}", label.row))?;
            let mut out: Vec<&str> = row.iter().map(String::as_str).collect();
            out.push(flag(label.baseline));
            out.push(flag(label.hybrid));
            w.write_record(&out)?;
        }

        w.flush()?;
        Ok(())
    })
    .with_context(|| format!("failed to write {}", path.display()))
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}
