//! Scoring module - classic line-clear points
//!
//! No levels, combos or back-to-back bonuses: a lock that clears N rows is
//! worth `LINE_SCORES[N]`.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows with one lock.
///
/// More than four rows (only possible on boards seeded with full rows) scores
/// like a four-row clear.
pub fn line_score(lines: usize) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(LINE_SCORES[LINE_SCORES.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_score_table() {
        assert_eq!(line_score(0), 0);
        assert_eq!(line_score(1), 40);
        assert_eq!(line_score(2), 100);
        assert_eq!(line_score(3), 300);
        assert_eq!(line_score(4), 1200);
        assert_eq!(line_score(6), 1200);
    }
}
