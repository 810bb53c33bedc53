//! End-of-session report

use serde::{Deserialize, Serialize};

use super::controller::{ReviewError, SessionMode};
use super::tracker::SessionStats;
use crate::flashcards::Rating;

/// Overall assessment of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    /// At least 70% easy
    Excellent,
    /// At least 50% easy
    Good,
    /// At least 50% hard
    NeedsFocus,
    KeepPracticing,
}

impl Verdict {
    fn from_percentages(easy_pct: f64, hard_pct: f64) -> Self {
        if easy_pct >= 70.0 {
            Verdict::Excellent
        } else if easy_pct >= 50.0 {
            Verdict::Good
        } else if hard_pct >= 50.0 {
            Verdict::NeedsFocus
        } else {
            Verdict::KeepPracticing
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent! You know these symbols well.",
            Verdict::Good => "Good work! Keep practicing to improve further.",
            Verdict::NeedsFocus => "Focus your study: many symbols need more attention.",
            Verdict::KeepPracticing => "Keep practicing! Repetition is the key to learning.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub mode: SessionMode,
    pub stats: SessionStats,
    pub easy_pct: f64,
    pub medium_pct: f64,
    pub hard_pct: f64,
    /// Number of distinct cards marked hard, i.e. the size of a follow-up drill
    pub hard_marked: usize,
    pub verdict: Verdict,
}

impl SessionReport {
    /// Build the report for a finished session.
    ///
    /// Fails when the counters disagree with each other, which means the
    /// session state can no longer be trusted.
    pub fn finalize(
        mode: SessionMode,
        stats: SessionStats,
        hard_marked: usize,
    ) -> Result<Self, ReviewError> {
        if !stats.is_consistent() {
            return Err(ReviewError::ReportFinalization(format!(
                "answered {} but counted {} easy, {} medium, {} hard",
                stats.answered, stats.easy, stats.medium, stats.hard
            )));
        }

        let denominator = stats.answered.max(1) as f64;
        let pct = |rating: Rating| (stats.count(rating) as f64 * 100.0 / denominator).clamp(0.0, 100.0);

        let easy_pct = pct(Rating::Easy);
        let medium_pct = pct(Rating::Medium);
        let hard_pct = pct(Rating::Hard);

        Ok(Self {
            mode,
            stats,
            easy_pct,
            medium_pct,
            hard_pct,
            hard_marked,
            verdict: Verdict::from_percentages(easy_pct, hard_pct),
        })
    }

    pub fn percentage(&self, rating: Rating) -> f64 {
        match rating {
            Rating::Easy => self.easy_pct,
            Rating::Medium => self.medium_pct,
            Rating::Hard => self.hard_pct,
        }
    }

    /// Whether a hard-only follow-up can be offered
    pub fn offers_hard_only(&self) -> bool {
        self.mode == SessionMode::Complete && self.hard_marked > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(easy: usize, medium: usize, hard: usize) -> SessionStats {
        SessionStats {
            total_questions: easy + medium + hard,
            answered: easy + medium + hard,
            easy,
            medium,
            hard,
        }
    }

    #[test]
    fn test_percentages() {
        let report = SessionReport::finalize(SessionMode::Complete, stats(1, 1, 2), 2).unwrap();
        assert_eq!(report.easy_pct, 25.0);
        assert_eq!(report.medium_pct, 25.0);
        assert_eq!(report.hard_pct, 50.0);
        assert_eq!(report.percentage(Rating::Hard), 50.0);
        assert_eq!(report.verdict, Verdict::NeedsFocus);
        assert!(report.offers_hard_only());
    }

    #[test]
    fn test_empty_session_has_zero_percentages() {
        let report = SessionReport::finalize(SessionMode::Complete, stats(0, 0, 0), 0).unwrap();
        assert_eq!(report.easy_pct, 0.0);
        assert_eq!(report.hard_pct, 0.0);
        assert_eq!(report.verdict, Verdict::KeepPracticing);
        assert!(!report.offers_hard_only());
    }

    #[test]
    fn test_verdict_thresholds() {
        let verdict = |e, m, h| {
            SessionReport::finalize(SessionMode::Complete, stats(e, m, h), h)
                .unwrap()
                .verdict
        };
        assert_eq!(verdict(7, 3, 0), Verdict::Excellent);
        assert_eq!(verdict(5, 5, 0), Verdict::Good);
        assert_eq!(verdict(4, 1, 5), Verdict::NeedsFocus);
        assert_eq!(verdict(4, 4, 2), Verdict::KeepPracticing);
    }

    #[test]
    fn test_hard_only_report_offers_no_drill() {
        let report = SessionReport::finalize(SessionMode::HardOnly, stats(0, 0, 3), 3).unwrap();
        assert!(!report.offers_hard_only());
    }

    #[test]
    fn test_inconsistent_stats_fail() {
        let mut broken = stats(1, 1, 1);
        broken.answered = 5;
        let result = SessionReport::finalize(SessionMode::Complete, broken, 1);
        assert!(matches!(result, Err(ReviewError::ReportFinalization(_))));
    }
}
