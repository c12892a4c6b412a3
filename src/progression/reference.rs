#[derive(Debug, Clone, Copy, PartialEq)]
pub struct References<'a> {
    pub baseline: &'a [f64],
    pub previous: Option<&'a [f64]>,
}

pub fn references<V: AsRef<[f64]>>(visits: &[V]) -> Vec<References<'_>> {
    let Some(first) = visits.first() else {
        return Vec::new();
    };
    let baseline = first.as_ref();
    (0..visits.len())
        .map(|i| References {
            baseline,
            previous: i.checked_sub(1).map(|p| visits[p].as_ref()),
        })
        .collect()
}
