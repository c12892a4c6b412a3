use crate::progression::event::VisitEvents;

// Visit 0 has no predecessor and never confirms.
pub fn confirm_consecutive(events: &[bool]) -> Vec<bool> {
    let mut out = Vec::with_capacity(events.len());
    let mut prev = false;
    for &event in events {
        out.push(event && prev);
        prev = event;
    }
    out
}

pub fn confirm_baseline(events: &[VisitEvents]) -> Vec<bool> {
    let flags: Vec<bool> = events.iter().map(|e| e.baseline).collect();
    confirm_consecutive(&flags)
}

pub fn confirm_previous(events: &[VisitEvents]) -> Vec<bool> {
    let flags: Vec<bool> = events.iter().map(|e| e.previous).collect();
    confirm_consecutive(&flags)
}

pub fn confirm_hybrid(events: &[VisitEvents]) -> Vec<bool> {
    confirm_baseline(events)
        .into_iter()
        .zip(confirm_previous(events))
        .map(|(b, p)| b || p)
        .collect()
}
