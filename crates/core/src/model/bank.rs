use crate::model::{
    ids::ModuleName,
    question::{Question, QuestionKind},
};

/// Per-kind totals of a bank, shown as the upper limits on the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BankStats {
    pub choice: usize,
    pub judge: usize,
    pub modules: usize,
}

impl BankStats {
    #[must_use]
    pub fn limit(&self, kind: QuestionKind) -> usize {
        match kind {
            QuestionKind::Choice => self.choice,
            QuestionKind::Judge => self.judge,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.choice + self.judge
    }
}

/// Read-only, ordered collection of questions loaded at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions of one kind, in bank order.
    #[must_use]
    pub fn pool(&self, kind: QuestionKind) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|q| q.kind() == kind)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn count_of(&self, kind: QuestionKind) -> usize {
        self.questions.iter().filter(|q| q.kind() == kind).count()
    }

    /// Distinct modules in order of first appearance.
    #[must_use]
    pub fn modules(&self) -> Vec<&ModuleName> {
        let mut seen: Vec<&ModuleName> = Vec::new();
        for question in &self.questions {
            if !seen.contains(&question.module()) {
                seen.push(question.module());
            }
        }
        seen
    }

    #[must_use]
    pub fn stats(&self) -> BankStats {
        BankStats {
            choice: self.count_of(QuestionKind::Choice),
            judge: self.count_of(QuestionKind::Judge),
            modules: self.modules().len(),
        }
    }
}

impl FromIterator<Question> for QuestionBank {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(text: &str, module: Option<&str>) -> Question {
        Question::new(
            text,
            QuestionKind::Choice,
            "A",
            vec!["A. yes".into(), "B. no".into()],
        )
        .unwrap()
        .with_module(ModuleName::from_tag(module))
    }

    fn judge(text: &str) -> Question {
        Question::new(
            text,
            QuestionKind::Judge,
            "T",
            vec!["正确".into(), "错误".into()],
        )
        .unwrap()
    }

    #[test]
    fn stats_count_kinds_and_modules() {
        let bank: QuestionBank = vec![
            choice("c1", Some("ioc")),
            choice("c2", Some("aop")),
            choice("c3", Some("ioc")),
            judge("j1"),
        ]
        .into_iter()
        .collect();

        let stats = bank.stats();
        assert_eq!(stats.choice, 3);
        assert_eq!(stats.judge, 1);
        assert_eq!(stats.modules, 3);
        assert_eq!(stats.total(), bank.len());
        assert_eq!(stats.limit(QuestionKind::Judge), 1);

        let modules: Vec<&str> = bank.modules().iter().map(|m| m.as_str()).collect();
        assert_eq!(modules, vec!["ioc", "aop", "default"]);
    }

    #[test]
    fn pool_keeps_bank_order() {
        let bank = QuestionBank::new(vec![choice("c1", None), judge("j1"), choice("c2", None)]);
        let texts: Vec<String> = bank
            .pool(QuestionKind::Choice)
            .iter()
            .map(|q| q.text().to_owned())
            .collect();
        assert_eq!(texts, vec!["c1", "c2"]);
        assert!(QuestionBank::default().is_empty());
    }
}
