//! Line-oriented terminal front end for a practice exam.
//!
//! Reads commands from any `BufRead` and writes to any `Write`, so whole
//! sittings can be scripted in tests.

use std::io::{self, BufRead, Write};

use quiz_core::model::{
    AnswerCode, BankStats, OptionState, Question, QuestionIndex, QuestionKind, QuizSession,
    ScoreReport, Verdict,
};
use services::quiz::{SUBMIT_PROMPT, parse_count};
use services::{QuizRequest, QuizService, QuizServiceError, SubmissionGate, SubmitOutcome};

/// Choice made on the error screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    Retry,
    Home,
    Quit,
}

/// How an exam screen was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamExit {
    Finished(ScoreReport),
    Home,
    Quit,
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
    auto_confirm: bool,
}

enum Command {
    Answer(usize, String),
    Show,
    Submit,
    Home,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let command = match head.to_ascii_lowercase().as_str() {
        "s" | "submit" => Command::Submit,
        "l" | "list" | "show" => Command::Show,
        "h" | "home" => Command::Home,
        "q" | "quit" | "exit" => Command::Quit,
        "?" | "help" => Command::Help,
        number => {
            let number: usize = number.parse().ok()?;
            let code = parts.next()?;
            Command::Answer(number, code.to_owned())
        }
    };
    if parts.next().is_some() {
        return None;
    }
    Some(command)
}

/// Map typed input onto one of the question's answer codes.
fn resolve_code(question: &Question, typed: &str) -> Option<AnswerCode> {
    question
        .codes()
        .iter()
        .find(|code| code.as_str().eq_ignore_ascii_case(typed))
        .cloned()
}

fn marker(state: OptionState) -> &'static str {
    match state {
        OptionState::Normal => "[ ]",
        OptionState::Selected => "[x]",
        OptionState::Correct => "[v]",
        OptionState::CorrectSelected => "[V]",
        OptionState::Wrong => "[X]",
    }
}

fn kind_label(kind: QuestionKind) -> &'static str {
    match kind {
        QuestionKind::Choice => "single choice",
        QuestionKind::Judge => "true/false",
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            auto_confirm: false,
        }
    }

    /// Skip the yes/no prompt before submitting.
    #[must_use]
    pub fn with_auto_confirm(mut self, auto_confirm: bool) -> Self {
        self.auto_confirm = auto_confirm;
        self
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Ask for the number of questions of each kind. `None` on end of input.
    pub fn start_screen(
        &mut self,
        stats: BankStats,
        defaults: QuizRequest,
    ) -> io::Result<Option<QuizRequest>> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Practice exam ===")?;
        writeln!(
            self.output,
            "The bank holds {} single-choice and {} true/false questions.",
            stats.choice, stats.judge
        )?;

        let mut request = defaults;
        for kind in QuestionKind::ALL {
            let default = defaults.count(kind);
            let text = format!(
                "Number of {} questions [{default}] (max {}): ",
                kind_label(kind),
                stats.limit(kind)
            );
            let Some(line) = self.prompt(&text)? else {
                return Ok(None);
            };
            let count = parse_count(Some(line.as_str()), default);
            match kind {
                QuestionKind::Choice => request.choice = count,
                QuestionKind::Judge => request.judge = count,
            }
        }
        Ok(Some(request))
    }

    /// Fatal screen for a quiz that could not be built.
    pub fn error_screen(&mut self, err: &QuizServiceError) -> io::Result<Recovery> {
        writeln!(self.output)?;
        writeln!(self.output, "Could not generate the exam: {err}")?;
        loop {
            let Some(line) = self.prompt("[r]etry, [h]ome or [q]uit: ")? else {
                return Ok(Recovery::Quit);
            };
            match line.to_ascii_lowercase().as_str() {
                "r" | "retry" => return Ok(Recovery::Retry),
                "h" | "home" => return Ok(Recovery::Home),
                "q" | "quit" => return Ok(Recovery::Quit),
                _ => {}
            }
        }
    }

    fn render_question(&mut self, session: &QuizSession, index: QuestionIndex) -> io::Result<()> {
        let Some(question) = session.question(index) else {
            return Ok(());
        };
        writeln!(
            self.output,
            "{}. {} ({})",
            index.number(),
            question.text(),
            kind_label(question.kind())
        )?;
        for (text, code) in question.labelled_options() {
            let state = session
                .option_state(index, code)
                .unwrap_or(OptionState::Normal);
            writeln!(self.output, "   {} {text}", marker(state))?;
        }
        Ok(())
    }

    fn render_exam(&mut self, session: &QuizSession) -> io::Result<()> {
        let progress = session.progress();
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Progress: {} / {}",
            progress.answered, progress.total
        )?;
        for position in 0..session.len() {
            self.render_question(session, QuestionIndex::new(position))?;
        }
        Ok(())
    }

    fn render_help(&mut self) -> io::Result<()> {
        writeln!(self.output, "Commands:")?;
        writeln!(self.output, "  <number> <answer>  answer a question, e.g. `3 B` or `7 T`")?;
        writeln!(self.output, "  list               show all questions")?;
        writeln!(self.output, "  submit             hand in the exam")?;
        writeln!(self.output, "  home               abandon and return to the start screen")?;
        writeln!(self.output, "  quit               exit")?;
        Ok(())
    }

    fn render_result(&mut self, session: &QuizSession, report: ScoreReport) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Result ===")?;
        writeln!(self.output, "Score: {}", report.percentage())?;
        writeln!(
            self.output,
            "{} correct out of {}",
            report.correct(),
            report.total()
        )?;
        writeln!(self.output, "Legend: [V] your correct answer, [X] your wrong answer, [v] correct answer")?;

        let reviews = session.reviews().unwrap_or_default();
        for review in reviews {
            writeln!(self.output)?;
            self.render_question(session, review.index)?;
            match review.verdict {
                Verdict::Correct => writeln!(self.output, "   Correct")?,
                Verdict::Incorrect => writeln!(
                    self.output,
                    "   Wrong, correct answer: {}",
                    review.correct_answer
                )?,
            }
            if let Some(explanation) = review.explanation {
                writeln!(self.output, "   Explanation: {explanation}")?;
            }
        }
        Ok(())
    }

    /// Run one sitting until it is submitted or abandoned.
    pub fn run_exam(
        &mut self,
        service: &QuizService,
        mut session: QuizSession,
    ) -> Result<ExamExit, Box<dyn std::error::Error>> {
        self.render_exam(&session)?;
        self.render_help()?;

        loop {
            let Some(line) = self.prompt("> ")? else {
                return Ok(ExamExit::Quit);
            };
            if line.is_empty() {
                continue;
            }
            let Some(command) = parse_command(&line) else {
                writeln!(self.output, "Unrecognised command: {line}")?;
                continue;
            };

            match command {
                Command::Answer(number, typed) => {
                    let index = QuestionIndex::new(number.saturating_sub(1));
                    let resolved = session
                        .question(index)
                        .filter(|_| number > 0)
                        .map(|q| resolve_code(q, &typed));
                    match resolved {
                        None => writeln!(self.output, "No question {number}")?,
                        Some(None) => {
                            writeln!(self.output, "Question {number} has no option {typed}")?;
                        }
                        Some(Some(code)) => {
                            session.select_answer(index, code)?;
                            let progress = session.progress();
                            writeln!(
                                self.output,
                                "Progress: {} / {}",
                                progress.answered, progress.total
                            )?;
                        }
                    }
                }
                Command::Show => self.render_exam(&session)?,
                Command::Help => self.render_help()?,
                Command::Home => return Ok(ExamExit::Home),
                Command::Quit => return Ok(ExamExit::Quit),
                Command::Submit => {
                    let outcome = if self.auto_confirm {
                        service.submit(&mut session, &mut services::AutoConfirm)?
                    } else {
                        let mut gate = PromptGate { terminal: &mut *self };
                        service.submit(&mut session, &mut gate)?
                    };
                    match outcome {
                        SubmitOutcome::Declined => writeln!(self.output, "Not submitted.")?,
                        SubmitOutcome::Submitted(report) => {
                            self.render_result(&session, report)?;
                            return Ok(ExamExit::Finished(report));
                        }
                    }
                }
            }
        }
    }
}

/// Asks the yes/no question on the terminal.
struct PromptGate<'a, R, W> {
    terminal: &'a mut Terminal<R, W>,
}

impl<R: BufRead, W: Write> SubmissionGate for PromptGate<'_, R, W> {
    fn confirm(&mut self, progress: &quiz_core::model::QuizProgress) -> bool {
        let unanswered = progress.unanswered();
        if unanswered > 0
            && writeln!(
                self.terminal.output,
                "{unanswered} question(s) are still unanswered."
            )
            .is_err()
        {
            return false;
        }
        let text = format!("{SUBMIT_PROMPT} [y/N]: ");
        match self.terminal.prompt(&text) {
            Ok(Some(answer)) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionBank, QuizProgress};
    use services::Entropy;
    use std::io::Cursor;
    use std::sync::Arc;

    fn service() -> QuizService {
        let questions = vec![
            Question::new(
                "Pick A",
                QuestionKind::Choice,
                "A",
                vec!["A. this one".into(), "B. not this".into()],
            )
            .unwrap(),
            Question::new(
                "Servlets are singletons per container",
                QuestionKind::Judge,
                "T",
                vec!["正确".into(), "错误".into()],
            )
            .unwrap()
            .with_explanation(Some("one instance per declaration".into())),
        ];
        QuizService::new(Arc::new(QuestionBank::new(questions))).with_entropy(Entropy::seeded(1))
    }

    fn run(script: &str, auto_confirm: bool) -> (ExamExit, String) {
        let service = service();
        let session = service.start(QuizRequest::new(1, 1)).unwrap();
        let mut terminal =
            Terminal::new(Cursor::new(script.to_owned()), Vec::new()).with_auto_confirm(auto_confirm);
        let exit = terminal.run_exam(&service, session).unwrap();
        let output = String::from_utf8(terminal.into_output()).unwrap();
        (exit, output)
    }

    #[test]
    fn scripted_exam_scores_and_explains() {
        let (exit, output) = run("1 a\n2 t\nsubmit\ny\n", false);
        assert_eq!(exit, ExamExit::Finished(ScoreReport::new(2, 2)));
        assert!(output.contains("Score: 100"));
        assert!(output.contains("[V] A. this one"));
        assert!(output.contains("Explanation: one instance per declaration"));
    }

    #[test]
    fn declining_confirmation_keeps_exam_open() {
        let (exit, output) = run("2 F\nsubmit\nn\nquit\n", false);
        assert_eq!(exit, ExamExit::Quit);
        assert!(output.contains("1 question(s) are still unanswered."));
        assert!(output.contains("Not submitted."));
    }

    #[test]
    fn wrong_answer_is_marked_after_auto_submit() {
        let (exit, output) = run("2 f\nsubmit\n", true);
        assert_eq!(exit, ExamExit::Finished(ScoreReport::new(0, 2)));
        assert!(output.contains("Score: 0"));
        assert!(output.contains("[X] 错误"));
        assert!(output.contains("[v] 正确"));
        assert!(output.contains("Wrong, correct answer: T"));
    }

    #[test]
    fn invalid_input_is_reported() {
        let (_, output) = run("9 A\n1 Z\nnonsense\nhome\n", false);
        assert!(output.contains("No question 9"));
        assert!(output.contains("Question 1 has no option Z"));
        assert!(output.contains("Unrecognised command: nonsense"));
    }

    #[test]
    fn start_screen_reads_counts_with_defaults() {
        let stats = service().stats();
        let mut terminal = Terminal::new(Cursor::new("\n0\n".to_owned()), Vec::new());
        let request = terminal
            .start_screen(stats, QuizRequest::new(1, 1))
            .unwrap()
            .unwrap();
        assert_eq!(request, QuizRequest::new(1, 0));
    }

    #[test]
    fn error_screen_offers_retry_and_home() {
        let err = QuizServiceError::EmptySelection { choice: 0, judge: 0 };
        let mut terminal = Terminal::new(Cursor::new("x\nr\n".to_owned()), Vec::new());
        assert_eq!(terminal.error_screen(&err).unwrap(), Recovery::Retry);

        let mut terminal = Terminal::new(Cursor::new("home\n".to_owned()), Vec::new());
        assert_eq!(terminal.error_screen(&err).unwrap(), Recovery::Home);

        let mut terminal = Terminal::new(Cursor::new(String::new()), Vec::new());
        assert_eq!(terminal.error_screen(&err).unwrap(), Recovery::Quit);
    }

    /// Accepts everything except the unanswered-questions warning.
    struct RejectsWarning(Vec<u8>);

    impl Write for RejectsWarning {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.windows(10).any(|w| w == b"unanswered") {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_warning_declines_submission() {
        let mut terminal = Terminal::new(Cursor::new("y\n".to_owned()), RejectsWarning(Vec::new()));
        let mut gate = PromptGate { terminal: &mut terminal };
        assert!(!gate.confirm(&QuizProgress { answered: 1, total: 2 }));

        // nothing to warn about, so the typed answer decides
        let mut terminal = Terminal::new(Cursor::new("y\n".to_owned()), RejectsWarning(Vec::new()));
        let mut gate = PromptGate { terminal: &mut terminal };
        assert!(gate.confirm(&QuizProgress { answered: 2, total: 2 }));
    }
}
