use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel module for questions that carry no topic tag.
pub const DEFAULT_MODULE: &str = "default";

/// Zero-based position of a question within a quiz session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionIndex(usize);

impl QuestionIndex {
    /// Creates a new `QuestionIndex`
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying position
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }

    /// One-based number as shown next to the question.
    #[must_use]
    pub fn number(&self) -> usize {
        self.0 + 1
    }
}

impl From<usize> for QuestionIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Topic group used to balance sampled questions.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Creates a module name; blank names fall back to the default group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        Self(trimmed.to_owned())
    }

    /// Builds a module name from an optional tag.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.map_or_else(Self::default, Self::new)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_MODULE
    }
}

impl Default for ModuleName {
    fn default() -> Self {
        Self(DEFAULT_MODULE.to_owned())
    }
}

impl fmt::Debug for QuestionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionIndex({})", self.0)
    }
}

impl fmt::Debug for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleName({:?})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for QuestionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_module_uses_default_group() {
        assert!(ModuleName::from_tag(None).is_default());
        assert!(ModuleName::new("   ").is_default());
        assert_eq!(ModuleName::new(" spring ").as_str(), "spring");
    }

    #[test]
    fn index_number_is_one_based() {
        assert_eq!(QuestionIndex::new(0).number(), 1);
        assert_eq!(QuestionIndex::from(4).value(), 4);
    }
}
