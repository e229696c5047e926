//! Scoring module - line clear points and level/speed progression
//!
//! - A sweep that clears `n` rows awards `table[n] * level`.
//! - Level `n` is left once the running line total reaches `n * lines_per_level`;
//!   at most one level is gained per sweep.
//! - Each level up shortens the drop interval by a fixed step, never below the floor.

/// Points for clearing `lines` rows at `level`
///
/// Counts beyond the table (only reachable on hand-built boards) use the last entry.
pub fn calculate_line_score(table: &[u32; 5], lines: usize, level: u32) -> u32 {
    table[lines.min(table.len() - 1)].saturating_mul(level)
}

/// Line total at which `level` ends
pub fn level_threshold(level: u32, lines_per_level: u32) -> u32 {
    level.saturating_mul(lines_per_level)
}

/// Whether a running total of `lines` has finished `level`
pub fn should_level_up(lines: u32, level: u32, lines_per_level: u32) -> bool {
    lines >= level_threshold(level, lines_per_level)
}

/// Drop interval after one level up
pub fn next_drop_interval_ms(current_ms: u32, step_ms: u32, floor_ms: u32) -> u32 {
    current_ms.saturating_sub(step_ms).max(floor_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LINE_SCORES;

    #[test]
    fn test_reference_line_scores() {
        assert_eq!(calculate_line_score(&LINE_SCORES, 0, 1), 0);
        assert_eq!(calculate_line_score(&LINE_SCORES, 1, 1), 100);
        assert_eq!(calculate_line_score(&LINE_SCORES, 2, 1), 300);
        assert_eq!(calculate_line_score(&LINE_SCORES, 3, 1), 500);
        assert_eq!(calculate_line_score(&LINE_SCORES, 4, 1), 800);
        assert_eq!(calculate_line_score(&LINE_SCORES, 4, 3), 2400);
    }

    #[test]
    fn test_line_score_clamps_large_counts() {
        assert_eq!(calculate_line_score(&LINE_SCORES, 6, 2), 1600);
        assert_eq!(calculate_line_score(&[0, 1, 2, 3, u32::MAX], 4, 2), u32::MAX);
    }

    #[test]
    fn test_level_thresholds() {
        assert!(!should_level_up(9, 1, 10));
        assert!(should_level_up(10, 1, 10));
        assert!(!should_level_up(19, 2, 10));
        assert!(should_level_up(21, 2, 10));
        assert_eq!(level_threshold(3, 10), 30);
    }

    #[test]
    fn test_drop_interval_floor() {
        assert_eq!(next_drop_interval_ms(1000, 50, 100), 950);
        assert_eq!(next_drop_interval_ms(140, 50, 100), 100);
        assert_eq!(next_drop_interval_ms(100, 50, 100), 100);
        assert_eq!(next_drop_interval_ms(30, 50, 0), 0);
    }
}
