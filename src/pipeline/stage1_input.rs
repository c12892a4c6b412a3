use anyhow::Result;
use tracing::{info, warn};

use crate::cohort::parse_records;
use crate::ctx::Ctx;
use crate::io::table::{ColumnLayout, read_table};
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        ctx.config.params.validate()?;

        let table = read_table(&ctx.input, ctx.delimiter)?;
        let layout = ColumnLayout::resolve(&table.headers, &ctx.config.columns)?;
        let records = parse_records(&table, &layout)?;

        if ctx.config.params.min_points > layout.points.len() {
            let msg = format!(
                "min_points ({}) exceeds the number of test point columns ({}); no visit can register an event",
                ctx.config.params.min_points,
                layout.points.len()
            );
            warn!(
                min_points = ctx.config.params.min_points,
                test_points = layout.points.len(),
                "min_points exceeds test point count"
            );
            ctx.warnings.push(msg);
        }

        info!(
            rows = records.len(),
            test_points = layout.points.len(),
            "records_parsed"
        );

        ctx.table = Some(table);
        ctx.layout = Some(layout);
        ctx.records = records;
        Ok(())
    }
}
