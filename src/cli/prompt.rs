//! Interactive suppliers that ask the respondent on the terminal.
//!
//! Prompts go to stderr; answers are read line by line from stdin. Both
//! suppliers share one reader so piped input is not lost between stages.

use std::sync::Arc;

use async_trait::async_trait;
use console::style;
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::domain::errors::{AssessmentError, AssessmentResult};
use crate::domain::models::{AnswerEvent, CandidateSet, Category, Choice, Question, ScenarioPick};
use crate::domain::ports::{AnswerSupplier, PickSupplier};

const SCENARIOS: [&str; 4] = [
    "A project you care about is going off the rails. What do you do first?",
    "A friend asks for honest feedback on a plan you think is weak. How do you respond?",
    "You have a free weekend with no obligations. How do you spend it?",
    "Your team disagrees sharply about the next step. What role do you take?",
];

/// Line reader over stdin, shared by both console suppliers.
#[derive(Clone)]
pub struct ConsoleInput {
    lines: Arc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl ConsoleInput {
    /// Wrap stdin
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(io::stdin()).lines())),
        }
    }

    async fn read_line(&self) -> AssessmentResult<String> {
        self.lines
            .lock()
            .await
            .next_line()
            .await?
            .ok_or_else(|| AssessmentError::InvalidInput("Input closed before assessment finished".to_string()))
    }
}

impl Default for ConsoleInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Asks each forced-choice question on the terminal.
pub struct ConsoleAnswerSupplier {
    input: ConsoleInput,
    total: usize,
}

impl ConsoleAnswerSupplier {
    /// `total` is the catalog size shown in each prompt
    pub const fn new(input: ConsoleInput, total: usize) -> Self {
        Self { input, total }
    }
}

#[async_trait]
impl AnswerSupplier for ConsoleAnswerSupplier {
    async fn next_answer(
        &mut self,
        index: usize,
        question: &Question,
    ) -> AssessmentResult<AnswerEvent> {
        eprintln!(
            "\n{} Which is more like you?",
            style(format!("[{}/{}]", index + 1, self.total)).dim()
        );
        eprintln!("  {} {}", style("A)").bold(), question.category_a().statement());
        eprintln!("  {} {}", style("B)").bold(), question.category_b().statement());

        loop {
            eprint!("> ");
            let line = self.input.read_line().await?;
            match line.trim().to_ascii_uppercase().as_str() {
                "A" => return Ok(AnswerEvent::new(Choice::A)),
                "B" => return Ok(AnswerEvent::new(Choice::B)),
                _ => eprintln!("{}", style("Please answer A or B.").yellow()),
            }
        }
    }
}

/// Presents a scenario each round and asks which reaction fits best.
pub struct ConsolePickSupplier {
    input: ConsoleInput,
}

impl ConsolePickSupplier {
    /// Read picks from `input`
    pub const fn new(input: ConsoleInput) -> Self {
        Self { input }
    }
}

fn parse_pick(line: &str, candidates: &CandidateSet) -> Option<Category> {
    let line = line.trim();
    if let Ok(slot) = line.parse::<usize>() {
        if (1..=candidates.members().len()).contains(&slot) {
            return Some(candidates.members()[slot - 1]);
        }
    }
    line.parse::<Category>()
        .ok()
        .filter(|c| candidates.contains(*c))
}

#[async_trait]
impl PickSupplier for ConsolePickSupplier {
    async fn next_pick(
        &mut self,
        candidates: &CandidateSet,
        round: u32,
    ) -> AssessmentResult<ScenarioPick> {
        let scenario = SCENARIOS[round.saturating_sub(1) as usize % SCENARIOS.len()];
        eprintln!("\n{} {}", style(format!("Scenario {round}:")).bold(), scenario);
        for (i, category) in candidates.members().iter().enumerate() {
            eprintln!("  {}) {}", i + 1, category.statement());
        }

        loop {
            eprint!("> ");
            let line = self.input.read_line().await?;
            match parse_pick(&line, candidates) {
                Some(category) => return Ok(ScenarioPick::new(category)),
                None => eprintln!("{}", style("Please pick 1, 2 or 3.").yellow()),
            }
        }
    }
}
