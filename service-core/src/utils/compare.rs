use subtle::ConstantTimeEq;

/// Compare two secrets without leaking the position of the first mismatch.
///
/// Lengths are not hidden: unequal lengths return `false` immediately.
pub fn constant_time_eq(expected: &str, candidate: &str) -> bool {
    let expected_bytes = expected.as_bytes();
    let candidate_bytes = candidate.as_bytes();

    if expected_bytes.len() != candidate_bytes.len() {
        return false;
    }

    expected_bytes.ct_eq(candidate_bytes).into()
}
