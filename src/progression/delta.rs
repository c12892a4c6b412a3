use anyhow::{Result, bail};

pub fn worsened_points(
    current: &[f64],
    reference: Option<&[f64]>,
    drop_db: f64,
) -> Result<Vec<bool>> {
    let Some(reference) = reference else {
        return Ok(vec![false; current.len()]);
    };
    if reference.len() != current.len() {
        bail!(
            "test point count mismatch: current visit has {}, reference has {}",
            current.len(),
            reference.len()
        );
    }
    Ok(current
        .iter()
        .zip(reference)
        .map(|(cur, refv)| cur - refv <= -drop_db)
        .collect())
}
