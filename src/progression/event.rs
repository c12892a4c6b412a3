use anyhow::Result;

use crate::progression::ProgressionParams;
use crate::progression::delta::worsened_points;
use crate::progression::reference::references;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitEvents {
    pub baseline: bool,
    pub previous: bool,
}

pub fn is_event(worsened: &[bool], min_points: usize) -> bool {
    worsened.iter().filter(|&&w| w).count() >= min_points
}

pub fn visit_events<V: AsRef<[f64]>>(
    visits: &[V],
    params: &ProgressionParams,
) -> Result<Vec<VisitEvents>> {
    let mut out = Vec::with_capacity(visits.len());
    for (visit, refs) in visits.iter().zip(references(visits)) {
        let current = visit.as_ref();
        let vs_baseline = worsened_points(current, Some(refs.baseline), params.drop_db)?;
        let vs_previous = worsened_points(current, refs.previous, params.drop_db)?;
        out.push(VisitEvents {
            baseline: is_event(&vs_baseline, params.min_points),
            previous: is_event(&vs_previous, params.min_points),
        });
    }
    Ok(out)
}
