use anyhow::Result;
use tracing::info;

use crate::cohort::group_records;
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage2Cohort;

impl Stage2Cohort {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Cohort {
    fn name(&self) -> &'static str {
        "stage2_cohort"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let records = std::mem::take(&mut ctx.records);
        let cohort = group_records(records);
        info!(
            series = cohort.series.len(),
            subjects = cohort.subject_count(),
            duplicates = cohort.warnings.len(),
            "cohort_grouped"
        );
        ctx.warnings.extend(cohort.warnings.iter().cloned());
        ctx.cohort = Some(cohort);
        Ok(())
    }
}
