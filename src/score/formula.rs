//! Scoring formula and time formatting.
//!
//! ```text
//! score = round(max(0, matches * 100 - mistakes * 10 - elapsed_seconds * 0.5))
//! ```
//!
//! Rounding is half-up. The computation runs in half-points so no floating
//! point is involved.

/// Points per matched pair.
pub const MATCH_POINTS: i64 = 100;

/// Penalty per mismatch.
pub const MISTAKE_PENALTY: i64 = 10;

/// Penalty per elapsed second, in half-points (0.5 points).
pub const HALF_POINTS_PER_SECOND: i64 = 1;

/// Compute the final score of a game.
///
/// Never negative. Deterministic.
///
/// ```
/// use flipzy::score::compute_score;
///
/// assert_eq!(compute_score(3, 2, 60), 250);
/// assert_eq!(compute_score(2, 1, 15), 183); // 182.5 rounds up
/// assert_eq!(compute_score(1, 20, 100), 0);
/// ```
#[must_use]
pub fn compute_score(matches: u32, mistakes: u32, elapsed_seconds: u64) -> u32 {
    let half_points = i64::from(matches) * MATCH_POINTS * 2
        - i64::from(mistakes) * MISTAKE_PENALTY * 2
        - i64::try_from(elapsed_seconds).unwrap_or(i64::MAX / 2) * HALF_POINTS_PER_SECOND;

    if half_points <= 0 {
        return 0;
    }

    let rounded = (half_points + 1) / 2;
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Format elapsed seconds as `mm:ss`.
///
/// Minutes are zero-padded to two digits and keep growing past 99.
#[must_use]
pub fn format_elapsed(elapsed_seconds: u64) -> String {
    let minutes = elapsed_seconds / 60;
    let seconds = elapsed_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scores() {
        assert_eq!(compute_score(3, 2, 60), 250);
        assert_eq!(compute_score(0, 0, 0), 0);
        assert_eq!(compute_score(0, 5, 0), 0);
        assert_eq!(compute_score(10, 0, 30), 985);
        assert_eq!(compute_score(3, 1, 40), 270);
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(compute_score(2, 1, 15), 183);
        assert_eq!(compute_score(1, 0, 1), 100);
        assert_eq!(compute_score(1, 0, 3), 99);
    }

    #[test]
    fn test_never_negative() {
        assert_eq!(compute_score(1, 20, 100), 0);
        assert_eq!(compute_score(0, 0, u64::MAX), 0);
        assert_eq!(compute_score(0, u32::MAX, 0), 0);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(60), "01:00");
        assert_eq!(format_elapsed(605), "10:05");
        assert_eq!(format_elapsed(6000), "100:00");
    }
}
