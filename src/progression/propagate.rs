pub fn carry_forward(local: &[bool]) -> Vec<bool> {
    local
        .iter()
        .scan(false, |seen, &confirmed| {
            *seen |= confirmed;
            Some(*seen)
        })
        .collect()
}
