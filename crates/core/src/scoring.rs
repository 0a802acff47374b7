//! Scoring module - round points, combos, skips and garbage conversion
//!
//! | Clear            | Points | Skip |
//! |------------------|--------|------|
//! | single           | 0      |      |
//! | double           | 3      |      |
//! | triple           | 6      |      |
//! | quad             | 10     | +1   |
//! | T-spin single    | 5      |      |
//! | T-spin double    | 10     | +1   |
//! | perfect clear    | 18     |      |
//!
//! A perfect clear replaces whatever else the round earned. Points are
//! banked in `row_points`; every [`POINTS_PER_GARBAGE`] banked points push one
//! garbage row to the opponent.

use crate::types::{
    DOUBLE_T_SCORE, LINE_SCORES, PERFECT_CLEAR_SCORE, POINTS_PER_GARBAGE, SINGLE_T_SCORE,
};

/// What a player did this round, plus the counters going in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundStats {
    pub rows_removed: u32,
    pub t_spin: bool,
    pub field_cleared: bool,
    pub used_skip: bool,
    /// Combo before this round
    pub combo: u32,
    /// Banked points before this round
    pub row_points: u32,
}

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points earned this round
    pub points: u32,
    /// Combo after this round
    pub combo: u32,
    pub skip_awarded: bool,
    /// Banked points after this round
    pub row_points: u32,
    /// Garbage rows for the opponent
    pub rows_to_send: u32,
    /// Parity of the first garbage row (single hole when true)
    pub first_is_single: bool,
}

/// Base points for a clear, before combo and perfect clear
pub fn clear_points(rows: u32, t_spin: bool) -> u32 {
    if t_spin {
        return match rows {
            1 => SINGLE_T_SCORE,
            2 => DOUBLE_T_SCORE,
            _ => 0,
        };
    }
    LINE_SCORES.get(rows as usize).copied().unwrap_or(0)
}

/// Garbage rows produced by `points`, counting the remainder already banked
///
/// # Examples
///
/// ```
/// use blockbattle_core::scoring::garbage_rows;
///
/// assert_eq!(garbage_rows(3, 0), 1);
/// assert_eq!(garbage_rows(4, 0), 1);
/// assert_eq!(garbage_rows(2, 4), 1);
/// ```
pub fn garbage_rows(points: u32, row_points_before: u32) -> u32 {
    (points + row_points_before % POINTS_PER_GARBAGE) / POINTS_PER_GARBAGE
}

/// Score one player's round
pub fn score_round(stats: &RoundStats) -> ScoreResult {
    let rows = stats.rows_removed;
    let mut points = clear_points(rows, stats.t_spin);
    let skip_awarded = (rows == 4 && !stats.t_spin) || (rows == 2 && stats.t_spin);

    let mut combo = stats.combo;
    if rows > 1 || (rows == 1 && stats.t_spin) {
        points += combo;
        combo += 1;
    } else if rows < 1 && !stats.used_skip {
        combo = 0;
    } else if !stats.used_skip {
        points += combo;
    }

    if stats.field_cleared {
        points = PERFECT_CLEAR_SCORE;
    }

    let rows_to_send = garbage_rows(points, stats.row_points);
    let row_points = stats.row_points + points;

    ScoreResult {
        points,
        combo,
        skip_awarded,
        row_points,
        rows_to_send,
        first_is_single: (row_points / POINTS_PER_GARBAGE) % 2 == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_points_table() {
        assert_eq!(clear_points(0, false), 0);
        assert_eq!(clear_points(1, false), 0);
        assert_eq!(clear_points(2, false), 3);
        assert_eq!(clear_points(3, false), 6);
        assert_eq!(clear_points(4, false), 10);
        assert_eq!(clear_points(1, true), 5);
        assert_eq!(clear_points(2, true), 10);
        assert_eq!(clear_points(0, true), 0);
        assert_eq!(clear_points(3, true), 0);
    }

    #[test]
    fn test_quad_from_fresh_state() {
        let result = score_round(&RoundStats {
            rows_removed: 4,
            ..Default::default()
        });
        assert_eq!(result.points, 10);
        assert_eq!(result.combo, 1);
        assert!(result.skip_awarded);
        assert_eq!(result.rows_to_send, 3);
        assert_eq!(result.row_points, 10);
        // 10 / 3 = 3, odd
        assert!(!result.first_is_single);
    }

    #[test]
    fn test_t_spin_single() {
        let result = score_round(&RoundStats {
            rows_removed: 1,
            t_spin: true,
            ..Default::default()
        });
        assert_eq!(result.points, 5);
        assert_eq!(result.combo, 1);
        assert!(!result.skip_awarded);
    }

    #[test]
    fn test_t_spin_double_awards_skip() {
        let result = score_round(&RoundStats {
            rows_removed: 2,
            t_spin: true,
            combo: 2,
            ..Default::default()
        });
        assert_eq!(result.points, 12);
        assert_eq!(result.combo, 3);
        assert!(result.skip_awarded);
    }

    #[test]
    fn test_empty_round_resets_combo() {
        let result = score_round(&RoundStats {
            combo: 4,
            ..Default::default()
        });
        assert_eq!(result.points, 0);
        assert_eq!(result.combo, 0);
    }

    #[test]
    fn test_skip_keeps_combo() {
        let result = score_round(&RoundStats {
            combo: 4,
            used_skip: true,
            ..Default::default()
        });
        assert_eq!(result.points, 0);
        assert_eq!(result.combo, 4);
    }

    #[test]
    fn test_single_adds_combo_without_extending_it() {
        let result = score_round(&RoundStats {
            rows_removed: 1,
            combo: 2,
            ..Default::default()
        });
        assert_eq!(result.points, 2);
        assert_eq!(result.combo, 2);
    }

    #[test]
    fn test_perfect_clear_replaces_points() {
        let result = score_round(&RoundStats {
            rows_removed: 4,
            field_cleared: true,
            combo: 3,
            ..Default::default()
        });
        assert_eq!(result.points, PERFECT_CLEAR_SCORE);
        assert_eq!(result.combo, 4);
        assert!(result.skip_awarded);
        assert_eq!(result.rows_to_send, 6);
    }

    #[test]
    fn test_garbage_conversion_uses_banked_remainder() {
        assert_eq!(garbage_rows(3, 0), 1);
        assert_eq!(garbage_rows(4, 0), 1);
        assert_eq!(garbage_rows(0, 5), 0);
        assert_eq!(garbage_rows(1, 5), 1);

        let result = score_round(&RoundStats {
            rows_removed: 2,
            row_points: 4,
            ..Default::default()
        });
        assert_eq!(result.points, 3);
        assert_eq!(result.rows_to_send, 1);
        assert_eq!(result.row_points, 7);
        // 7 / 3 = 2, even
        assert!(result.first_is_single);
    }
}
