use kira_vfprogress::progression::confirm::{confirm_consecutive, confirm_hybrid};
use kira_vfprogress::progression::delta::worsened_points;
use kira_vfprogress::progression::event::{VisitEvents, is_event, visit_events};
use kira_vfprogress::progression::propagate::carry_forward;
use kira_vfprogress::progression::reference::references;
use kira_vfprogress::progression::{ProgressionParams, classify_points};

fn params(drop_db: f64, min_points: usize) -> ProgressionParams {
    ProgressionParams {
        drop_db,
        min_points,
    }
}

fn ev(baseline: bool, previous: bool) -> VisitEvents {
    VisitEvents { baseline, previous }
}

#[test]
fn confirmed_on_second_consecutive_baseline_event() {
    let visits = vec![
        vec![30.0, 30.0, 30.0, 30.0, 30.0],
        vec![26.0, 26.0, 26.0, 30.0, 30.0],
        vec![26.0, 26.0, 26.0, 30.0, 30.0],
    ];
    let p = params(3.0, 3);

    let events = visit_events(&visits, &p).unwrap();
    assert_eq!(events, vec![ev(false, false), ev(true, true), ev(true, false)]);

    let status = classify_points(&visits, &p).unwrap();
    assert_eq!(status.baseline, vec![false, false, true]);
    assert_eq!(status.hybrid, vec![false, false, true]);
}

#[test]
fn sub_threshold_drop_delays_confirmation() {
    let visits = vec![
        vec![30.0; 5],
        vec![28.0; 5],
        vec![26.0, 26.0, 26.0, 30.0, 30.0],
        vec![26.0, 26.0, 26.0, 30.0, 30.0],
    ];
    let status = classify_points(&visits, &params(3.0, 3)).unwrap();
    assert_eq!(status.baseline, vec![false, false, false, true]);
    assert_eq!(status.hybrid, vec![false, false, false, true]);

    let first_three = &visits[..3];
    let status = classify_points(first_three, &params(3.0, 3)).unwrap();
    assert_eq!(status.baseline, vec![false, false, false]);
}

#[test]
fn drop_of_exactly_threshold_counts_as_worsened() {
    let at = worsened_points(&[27.0, 27.0, 27.0], Some(&[30.0, 30.0, 30.0][..]), 3.0).unwrap();
    assert_eq!(at, vec![true, true, true]);

    let below = worsened_points(&[27.01, 27.01, 27.01], Some(&[30.0, 30.0, 30.0][..]), 3.0).unwrap();
    assert_eq!(below, vec![false, false, false]);

    let at_series = vec![vec![30.0; 3], vec![27.0; 3], vec![27.0; 3]];
    let status = classify_points(&at_series, &params(3.0, 3)).unwrap();
    assert_eq!(status.baseline, vec![false, false, true]);

    let below_series = vec![vec![30.0; 3], vec![27.01; 3], vec![27.01; 3]];
    let status = classify_points(&below_series, &params(3.0, 3)).unwrap();
    assert_eq!(status.baseline, vec![false, false, false]);
    assert_eq!(status.hybrid, vec![false, false, false]);
}

#[test]
fn min_count_boundary() {
    assert!(is_event(&[true, true, true, false, false], 3));
    assert!(!is_event(&[true, true, false, false, false], 3));
    assert!(!is_event(&[], 1));

    let exact = vec![
        vec![30.0; 5],
        vec![25.0, 25.0, 25.0, 30.0, 30.0],
        vec![25.0, 25.0, 25.0, 30.0, 30.0],
    ];
    let status = classify_points(&exact, &params(3.0, 3)).unwrap();
    assert_eq!(status.baseline, vec![false, false, true]);

    let one_short = vec![
        vec![30.0; 5],
        vec![25.0, 25.0, 30.0, 30.0, 30.0],
        vec![25.0, 25.0, 30.0, 30.0, 30.0],
    ];
    let status = classify_points(&one_short, &params(3.0, 3)).unwrap();
    assert_eq!(status.baseline, vec![false, false, false]);
}

#[test]
fn single_visit_never_confirms() {
    let status = classify_points(&[vec![10.0, 0.0, 0.0]], &params(3.0, 1)).unwrap();
    assert_eq!(status.baseline, vec![false]);
    assert_eq!(status.hybrid, vec![false]);
}

#[test]
fn empty_series_yields_no_labels() {
    let visits: Vec<Vec<f64>> = Vec::new();
    let status = classify_points(&visits, &ProgressionParams::default()).unwrap();
    assert!(status.baseline.is_empty());
    assert!(status.hybrid.is_empty());
}

#[test]
fn hybrid_confirms_on_previous_visit_pattern_alone() {
    // Sensitivity first improves, then falls 4 dB twice in a row; never below baseline.
    let visits = vec![
        vec![20.0; 3],
        vec![30.0; 3],
        vec![26.0; 3],
        vec![22.0; 3],
        vec![30.0; 3],
    ];
    let status = classify_points(&visits, &params(3.0, 3)).unwrap();
    assert_eq!(status.baseline, vec![false; 5]);
    assert_eq!(status.hybrid, vec![false, false, false, true, true]);
}

#[test]
fn hybrid_windows_are_not_merged() {
    // Baseline event at visit 2, previous-visit event at visit 3: no rule sees two in a row.
    let visits = vec![
        vec![30.0, 30.0, 30.0, 20.0, 20.0, 20.0],
        vec![28.0, 28.0, 28.0, 20.0, 20.0, 20.0],
        vec![26.0, 26.0, 26.0, 30.0, 30.0, 30.0],
        vec![30.0, 30.0, 30.0, 26.0, 26.0, 26.0],
    ];
    let p = params(3.0, 3);
    let events = visit_events(&visits, &p).unwrap();
    assert_eq!(
        events,
        vec![
            ev(false, false),
            ev(false, false),
            ev(true, false),
            ev(false, true)
        ]
    );
    assert_eq!(confirm_hybrid(&events), vec![false; 4]);

    let status = classify_points(&visits, &p).unwrap();
    assert_eq!(status.hybrid, vec![false; 4]);
}

#[test]
fn consecutive_window_and_carry_forward() {
    assert_eq!(
        confirm_consecutive(&[true, true, false, true, true]),
        vec![false, true, false, false, true]
    );
    assert_eq!(confirm_consecutive(&[true]), vec![false]);
    assert_eq!(
        carry_forward(&[false, true, false, false]),
        vec![false, true, true, true]
    );
    assert_eq!(carry_forward(&[false, false]), vec![false, false]);
}

#[test]
fn baseline_reference_is_first_visit_for_every_row() {
    let visits = vec![vec![30.0, 31.0], vec![29.0, 28.0], vec![20.0, 21.0], vec![25.0, 26.0]];
    let refs = references(&visits);
    assert_eq!(refs.len(), visits.len());
    for (i, r) in refs.iter().enumerate() {
        assert_eq!(r.baseline, visits[0].as_slice());
        match i {
            0 => assert!(r.previous.is_none()),
            _ => assert_eq!(r.previous, Some(visits[i - 1].as_slice())),
        }
    }
}

#[test]
fn missing_previous_is_never_worsened() {
    assert_eq!(worsened_points(&[0.0, 0.0], None, 3.0).unwrap(), vec![false, false]);
}

#[test]
fn mismatched_reference_length_is_an_error() {
    assert!(worsened_points(&[1.0, 2.0], Some(&[1.0][..]), 3.0).is_err());
}

#[test]
fn params_are_validated() {
    assert!(ProgressionParams::default().validate().is_ok());
    assert!(params(0.0, 3).validate().is_err());
    assert!(params(-1.0, 3).validate().is_err());
    assert!(params(f64::NAN, 3).validate().is_err());
    assert!(params(3.0, 0).validate().is_err());
}

#[test]
fn thresholds_are_taken_from_params() {
    let visits = vec![vec![30.0; 4], vec![28.0; 4], vec![28.0; 4]];
    let strict = classify_points(&visits, &params(3.0, 3)).unwrap();
    assert_eq!(strict.baseline, vec![false, false, false]);

    let lenient = classify_points(&visits, &params(2.0, 4)).unwrap();
    assert_eq!(lenient.baseline, vec![false, false, true]);
}

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) % 3500) as f64 / 100.0
    }
}

#[test]
fn statuses_are_monotone_and_hybrid_covers_baseline() {
    let mut rng = Lcg(42);
    for len in 1..12 {
        for _ in 0..20 {
            let visits: Vec<Vec<f64>> = (0..len)
                .map(|_| (0..6).map(|_| rng.next()).collect())
                .collect();
            let status = classify_points(&visits, &params(3.0, 2)).unwrap();
            assert_eq!(status.baseline.len(), len);
            assert_eq!(status.hybrid.len(), len);
            assert!(!status.baseline[0]);
            assert!(!status.hybrid[0]);
            for w in status.baseline.windows(2) {
                assert!(!(w[0] && !w[1]), "baseline status went true -> false");
            }
            for w in status.hybrid.windows(2) {
                assert!(!(w[0] && !w[1]), "hybrid status went true -> false");
            }
            for (b, h) in status.baseline.iter().zip(&status.hybrid) {
                assert!(!b || *h, "baseline confirmed without hybrid");
            }
        }
    }
}
