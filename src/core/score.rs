use crate::core::{AnswerSet, Dimension, Question, TypeCode};
use serde::Serialize;

const BASE_PERCENT: i64 = 50;
const PERCENT_PER_POINT: i64 = 10;

/// Maps a signed dimension score onto 0..=100, ten points per unit of score.
pub fn calculate_percent(score: i64) -> u8 {
    let percent = BASE_PERCENT.saturating_add(score.saturating_mul(PERCENT_PER_POINT));
    percent.clamp(0, 100) as u8
}

/// Exact per-dimension sums. Weights are `i32`, so an `i64` total cannot
/// overflow for any bank that fits in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DimensionScores([i64; 4]);

impl DimensionScores {
    pub fn new(ei: i64, sn: i64, tf: i64, jp: i64) -> Self {
        Self([ei, sn, tf, jp])
    }

    pub fn get(&self, dimension: Dimension) -> i64 {
        self.0[dimension.index()]
    }

    pub fn add(&mut self, dimension: Dimension, weight: i32) {
        self.0[dimension.index()] += i64::from(weight);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionSummary {
    pub dimension: Dimension,
    pub score: i64,
    pub percentage: u8,
    pub leaning: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeResult {
    pub code: TypeCode,
    pub dimensions: [DimensionSummary; 4],
}

impl TypeResult {
    pub fn from_scores(scores: &DimensionScores) -> Self {
        let dimensions = Dimension::ALL.map(|dimension| {
            let score = scores.get(dimension);
            let percentage = calculate_percent(score);
            let (first, second) = dimension.letters();
            DimensionSummary {
                dimension,
                score,
                percentage,
                leaning: if percentage >= 50 { first } else { second },
            }
        });

        let letters = Dimension::ALL.map(|dimension| {
            let (first, second) = dimension.letters();
            if scores.get(dimension) >= 0 { first } else { second }
        });

        Self {
            code: TypeCode(letters),
            dimensions,
        }
    }

    pub fn score(&self, dimension: Dimension) -> i64 {
        self.dimensions[dimension.index()].score
    }

    pub fn percentage(&self, dimension: Dimension) -> u8 {
        self.dimensions[dimension.index()].percentage
    }

    pub fn leaning(&self, dimension: Dimension) -> char {
        self.dimensions[dimension.index()].leaning
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    UnknownQuestion,
    UnknownOption,
}

impl IgnoreReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownQuestion => "unknown question",
            Self::UnknownOption => "unknown option",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredAnswer {
    pub question_id: String,
    pub label: String,
    pub reason: IgnoreReason,
}

#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub result: TypeResult,
    pub answered: usize,
    pub total: usize,
    pub ignored: Vec<IgnoredAnswer>,
}

impl ScoreOutcome {
    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }
}

/// Sums the chosen option weight per dimension over the bank.
///
/// Answers that point at a missing question or an option the question does
/// not offer are skipped and listed in `ignored`; scoring itself never fails.
pub fn score_answers(questions: &[Question], answers: &AnswerSet) -> ScoreOutcome {
    let mut scores = DimensionScores::default();
    let mut answered = 0;
    let mut ignored = Vec::new();

    for question in questions {
        let Some(label) = answers.get(&question.id) else {
            continue;
        };

        match question.weight(label) {
            Some(weight) => {
                scores.add(question.dimension, weight);
                answered += 1;
            }
            None => ignored.push(IgnoredAnswer {
                question_id: question.id.clone(),
                label: label.to_string(),
                reason: IgnoreReason::UnknownOption,
            }),
        }
    }

    for (question_id, label) in answers.iter() {
        if !questions.iter().any(|question| question.id == question_id) {
            ignored.push(IgnoredAnswer {
                question_id: question_id.to_string(),
                label: label.to_string(),
                reason: IgnoreReason::UnknownQuestion,
            });
        }
    }

    ScoreOutcome {
        result: TypeResult::from_scores(&scores),
        answered,
        total: questions.len(),
        ignored,
    }
}
