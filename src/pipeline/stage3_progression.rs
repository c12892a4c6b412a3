use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::progression::{classify_cohort, row_labels};

pub struct Stage3Progression;

impl Stage3Progression {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Progression {
    fn name(&self) -> &'static str {
        "stage3_progression"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let cohort = ctx.cohort.as_ref().context("cohort missing")?;
        let statuses = classify_cohort(cohort, &ctx.config.params, ctx.config.threads)?;
        let labels = row_labels(cohort, &statuses)?;

        let baseline_series = statuses.values().filter(|s| s.progressed_baseline()).count();
        let hybrid_series = statuses.values().filter(|s| s.progressed_hybrid()).count();
        info!(
            series = statuses.len(),
            baseline_series,
            hybrid_series,
            "progression_classified"
        );

        ctx.statuses = Some(statuses);
        ctx.labels = labels;
        Ok(())
    }
}
