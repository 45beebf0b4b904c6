use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use quiz_core::model::{ModuleName, Question};

use crate::error::UnknownStrategy;

/// How questions are drawn from a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
    /// Round-robin over shuffled per-module queues, so every module is
    /// represented as evenly as the pool allows.
    #[default]
    Stratified,
    /// Shuffle the whole pool and take a prefix. No per-module guarantee.
    Uniform,
}

impl SamplingStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SamplingStrategy::Stratified => "stratified",
            SamplingStrategy::Uniform => "uniform",
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SamplingStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stratified" => Ok(Self::Stratified),
            "uniform" => Ok(Self::Uniform),
            _ => Err(UnknownStrategy(s.to_owned())),
        }
    }
}

/// Returns a uniformly shuffled copy of `items`; the input is left untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}

/// Draws a random subset of questions from a pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sampler {
    strategy: SamplingStrategy,
}

impl Sampler {
    #[must_use]
    pub fn new(strategy: SamplingStrategy) -> Self {
        Self { strategy }
    }

    #[must_use]
    pub fn strategy(&self) -> SamplingStrategy {
        self.strategy
    }

    /// Select `count` questions (clamped to the pool size) in random order.
    ///
    /// An empty pool or a zero count yields an empty selection.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        pool: &[Question],
        count: usize,
        rng: &mut R,
    ) -> Vec<Question> {
        let count = count.min(pool.len());
        if count == 0 {
            return Vec::new();
        }

        let selected = match self.strategy {
            SamplingStrategy::Stratified => stratified(pool, count, rng),
            SamplingStrategy::Uniform => {
                let mut all = shuffled(pool, rng);
                all.truncate(count);
                all
            }
        };

        tracing::debug!(
            strategy = %self.strategy,
            pool = pool.len(),
            selected = selected.len(),
            "sampled questions"
        );
        selected
    }
}

fn stratified<R: Rng + ?Sized>(pool: &[Question], count: usize, rng: &mut R) -> Vec<Question> {
    let mut queues = group_by_module(pool);
    for queue in &mut queues {
        queue.shuffle(rng);
    }

    let mut selected = Vec::with_capacity(count);
    let mut turn = 0;
    while selected.len() < count && queues.iter().any(|q| !q.is_empty()) {
        let slot = turn % queues.len();
        if let Some(question) = queues[slot].pop() {
            selected.push(question);
        }
        turn += 1;
    }

    // interleave modules so the exam does not read module by module
    selected.shuffle(rng);
    selected
}

/// Partition by module, keeping modules in order of first appearance.
fn group_by_module(pool: &[Question]) -> Vec<Vec<Question>> {
    let mut slots: HashMap<&ModuleName, usize> = HashMap::new();
    let mut groups: Vec<Vec<Question>> = Vec::new();
    for question in pool {
        let slot = *slots.entry(question.module()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(question.clone());
    }
    groups
}
