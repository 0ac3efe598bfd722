//! Run scoring: grade-point sum, catch counts and run termination

use serde::{Deserialize, Serialize};

use super::grade::Grade;
use crate::config::RunLimits;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Failing-grade limit reached
    AcademicProbation,
    /// Catch maximum reached
    SemesterComplete,
}

impl EndReason {
    /// Overlay headline
    pub fn title(self) -> &'static str {
        match self {
            EndReason::AcademicProbation => "Academic Probation!",
            EndReason::SemesterComplete => "Semester Over!",
        }
    }
}

/// Result of recording a single catch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchOutcome {
    /// Run continues; the block should be removed
    Continue,
    /// Run just ended; stop processing blocks this frame
    Ended(EndReason),
}

/// Per-run scoring state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Sum of grade points caught
    pub score_sum: f64,
    /// Blocks caught (any grade)
    pub block_count: u32,
    /// Failing blocks caught
    pub failing_count: u32,
    /// Set once when the run ends, cleared only by reset
    pub ended: Option<EndReason>,
    /// Grades in catch order
    pub collected: Vec<Grade>,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        self.ended.is_some()
    }

    /// Apply a catch and the termination rules.
    ///
    /// Must not be called once the run is terminal.
    pub fn record_catch(&mut self, grade: Grade, limits: &RunLimits) -> CatchOutcome {
        debug_assert!(!self.is_terminal(), "catch recorded after run ended");

        self.score_sum += grade.score();
        self.block_count += 1;
        self.collected.push(grade);

        if grade.is_failing() {
            self.failing_count += 1;
            if self.failing_count >= limits.failing_limit {
                return self.end(EndReason::AcademicProbation);
            }
        }

        if self.block_count >= limits.max_catches {
            return self.end(EndReason::SemesterComplete);
        }

        CatchOutcome::Continue
    }

    fn end(&mut self, reason: EndReason) -> CatchOutcome {
        self.ended = Some(reason);
        CatchOutcome::Ended(reason)
    }

    /// Mean grade points, `None` before the first catch
    pub fn average(&self) -> Option<f64> {
        if self.block_count == 0 {
            None
        } else {
            Some(self.score_sum / self.block_count as f64)
        }
    }

    /// Average formatted to two decimals ("0.00" before the first catch)
    pub fn average_display(&self) -> String {
        match self.average() {
            Some(avg) => format!("{avg:.2}"),
            None => "0.00".to_string(),
        }
    }

    /// HUD line shown above the canvas
    pub fn summary(&self, limits: &RunLimits) -> String {
        format!(
            "GPA: {} | F: {}/{} | Caught: {}/{}",
            self.average_display(),
            self.failing_count,
            limits.failing_limit,
            self.block_count,
            limits.max_catches
        )
    }

    /// Clear everything for a fresh run
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> RunLimits {
        RunLimits::default()
    }

    #[test]
    fn test_average_placeholder_before_catches() {
        let run = RunState::default();
        assert_eq!(run.average(), None);
        assert_eq!(run.average_display(), "0.00");
    }

    #[test]
    fn test_average_two_grades() {
        let mut run = RunState::default();
        run.record_catch(Grade::APlus, &limits());
        run.record_catch(Grade::F, &limits());
        assert_eq!(run.average_display(), "2.25");
        assert_eq!(run.collected, vec![Grade::APlus, Grade::F]);
    }

    #[test]
    fn test_fourth_failing_grade_ends_run() {
        let mut run = RunState::default();
        for _ in 0..3 {
            assert_eq!(run.record_catch(Grade::F, &limits()), CatchOutcome::Continue);
        }
        assert_eq!(
            run.record_catch(Grade::F, &limits()),
            CatchOutcome::Ended(EndReason::AcademicProbation)
        );
        assert!(run.is_terminal());
        assert_eq!(run.block_count, 4);
        assert_eq!(run.failing_count, 4);
    }

    #[test]
    fn test_seventh_catch_ends_run() {
        let mut run = RunState::default();
        for _ in 0..6 {
            assert_eq!(run.record_catch(Grade::BPlus, &limits()), CatchOutcome::Continue);
        }
        assert_eq!(
            run.record_catch(Grade::BPlus, &limits()),
            CatchOutcome::Ended(EndReason::SemesterComplete)
        );
        assert_eq!(run.failing_count, 0);
        assert_eq!(run.average_display(), "3.50");
    }

    #[test]
    fn test_failing_limit_wins_over_catch_limit() {
        // Three F's then three passes, then a fourth F as the seventh catch
        let mut run = RunState::default();
        for grade in [Grade::F, Grade::F, Grade::F, Grade::AZero, Grade::CZero, Grade::CPlus] {
            assert_eq!(run.record_catch(grade, &limits()), CatchOutcome::Continue);
        }
        assert_eq!(
            run.record_catch(Grade::F, &limits()),
            CatchOutcome::Ended(EndReason::AcademicProbation)
        );
    }

    #[test]
    fn test_summary_and_reset() {
        let mut run = RunState::default();
        run.record_catch(Grade::AZero, &limits());
        run.record_catch(Grade::F, &limits());
        assert_eq!(run.summary(&limits()), "GPA: 2.00 | F: 1/4 | Caught: 2/7");

        run.reset();
        assert_eq!(run, RunState::default());
        assert_eq!(run.summary(&limits()), "GPA: 0.00 | F: 0/4 | Caught: 0/7");
    }
}
