/// Rounded percentage of correct answers, half rounding up.
///
/// Returns `0` for an empty quiz instead of dividing by zero.
#[must_use]
pub fn score_percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total) as u128;
    let total = total as u128;
    let rounded = (correct * 200 + total) / (total * 2);
    u8::try_from(rounded).unwrap_or(100)
}

/// Final result of a submitted quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    correct: usize,
    total: usize,
}

impl ScoreReport {
    #[must_use]
    pub fn new(correct: usize, total: usize) -> Self {
        Self { correct, total }
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.total.saturating_sub(self.correct)
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        score_percentage(self.correct, self.total)
    }
}
