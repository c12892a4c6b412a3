use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{commit_all, csv_writer, json_writer};
use crate::pipeline::Stage;

pub struct Stage4Output;

impl Stage4Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Output {
    fn name(&self) -> &'static str {
        "stage4_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let mut staged = vec![csv_writer::stage_labelled_table(&ctx.output.table_path, ctx)?];

        if ctx.config.write_json {
            match json_writer::stage_json(&ctx.output.json_path, ctx) {
                Ok(report) => staged.push(report),
                Err(err) => {
                    staged.into_iter().for_each(|s| s.discard());
                    return Err(err);
                }
            }
        }

        for file in &staged {
            info!(path = %file.dest().display(), "output_staged");
        }
        commit_all(staged)?;
        info!(path = %ctx.output.table_path.display(), "table_written");
        if ctx.config.write_json {
            info!(path = %ctx.output.json_path.display(), "report_written");
        }
        Ok(())
    }
}
