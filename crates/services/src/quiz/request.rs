use quiz_core::model::QuestionKind;

pub const DEFAULT_CHOICE_COUNT: usize = 20;
pub const DEFAULT_JUDGE_COUNT: usize = 10;

/// How many questions of each kind to draw for one exam.
///
/// Counts larger than the bank are allowed here; the sampler clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRequest {
    pub choice: usize,
    pub judge: usize,
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self {
            choice: DEFAULT_CHOICE_COUNT,
            judge: DEFAULT_JUDGE_COUNT,
        }
    }
}

impl QuizRequest {
    #[must_use]
    pub fn new(choice: usize, judge: usize) -> Self {
        Self { choice, judge }
    }

    /// Build a request from raw entry parameters.
    ///
    /// See [`parse_count`] for how each value is read.
    #[must_use]
    pub fn from_params(choice: Option<&str>, judge: Option<&str>) -> Self {
        Self {
            choice: parse_count(choice, DEFAULT_CHOICE_COUNT),
            judge: parse_count(judge, DEFAULT_JUDGE_COUNT),
        }
    }

    #[must_use]
    pub fn count(&self, kind: QuestionKind) -> usize {
        match kind {
            QuestionKind::Choice => self.choice,
            QuestionKind::Judge => self.judge,
        }
    }

    /// True when nothing at all was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choice == 0 && self.judge == 0
    }
}

/// Lenient count parsing for entry parameters.
///
/// - missing or empty: `default`
/// - leading digits are used and trailing junk ignored (`"12abc"` -> 12)
/// - no leading digits or a negative number: 0
/// - values too large for `usize` saturate
#[must_use]
pub fn parse_count(raw: Option<&str>, default: usize) -> usize {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return default;
    };
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if negative || digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(usize::MAX)
}
