use crate::config::Config;
use crate::core::compat::{self, Advice, Tier};
use crate::core::score::{IgnoredAnswer, ScoreOutcome, TypeResult};
use crate::core::{TypeCode, share};
use colored::Colorize;
use serde::Serialize;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone)]
pub struct ScoreReport {
    pub bank: String,
    pub outcome: ScoreOutcome,
    pub mascot: &'static str,
    pub exit: ExitStatus,
}

impl ScoreReport {
    pub fn new(bank: impl Into<String>, outcome: ScoreOutcome, cfg: &Config) -> Self {
        let mascot = compat::mascot(&outcome.result.code);
        let exit = evaluate_exit(&outcome, cfg);
        Self {
            bank: bank.into(),
            outcome,
            mascot,
            exit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonScoreReport {
    pub bank: String,
    pub result: TypeResult,
    pub mascot: &'static str,
    pub answered: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<IgnoredAnswer>,
}

impl From<&ScoreReport> for JsonScoreReport {
    fn from(report: &ScoreReport) -> Self {
        Self {
            bank: report.bank.clone(),
            result: report.outcome.result,
            mascot: report.mascot,
            answered: report.outcome.answered,
            total: report.outcome.total,
            ignored: report.outcome.ignored.clone(),
        }
    }
}

pub fn evaluate_exit(outcome: &ScoreOutcome, cfg: &Config) -> ExitStatus {
    let mut reasons = Vec::new();

    if cfg.scoring.require_complete && !outcome.is_complete() {
        reasons.push(format!(
            "{} of {} questions answered (require_complete = true)",
            outcome.answered, outcome.total
        ));
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    pub code: TypeCode,
    pub mascot: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TypeResult>,
}

impl Participant {
    pub fn from_code(code: TypeCode) -> Self {
        Self {
            code,
            mascot: compat::mascot(&code),
            result: None,
        }
    }

    pub fn from_result(result: TypeResult) -> Self {
        Self {
            result: Some(result),
            ..Self::from_code(result.code)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub parent: Participant,
    pub child: Participant,
    pub compatibility: u8,
    pub tier: Tier,
    pub message: &'static str,
    pub advice: Vec<Advice>,
    pub share_url: String,
}

impl MatchReport {
    pub fn build(parent: Participant, child: Participant, cfg: &Config) -> Self {
        let compatibility = compat::compatibility(&parent.code, &child.code);
        let tier = Tier::for_score(compatibility);
        let advice = compat::advice(&parent.code, &child.code);
        let share_url = share::share_link(&cfg.general.share_base_url, &parent.code, &child.code);

        Self {
            parent,
            child,
            compatibility,
            tier,
            message: tier.message(),
            advice,
            share_url,
        }
    }
}

pub fn print_score_human(report: &ScoreReport) {
    let outcome = &report.outcome;
    println!(
        "Type: {} ({})",
        outcome.result.code.to_string().bold(),
        report.mascot
    );
    println!(
        "Bank: {} ({}/{} answered)",
        report.bank, outcome.answered, outcome.total
    );
    println!();
    print_dimension_bars(&outcome.result);

    if !outcome.ignored.is_empty() {
        println!();
        println!("{} ({})", "IGNORED".yellow().bold(), outcome.ignored.len());
        for ignored in &outcome.ignored {
            println!(
                "{}={} ({})",
                ignored.question_id,
                ignored.label,
                ignored.reason.as_str()
            );
        }
    }

    println!();
    if report.exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", report.exit.reason_line());
    }
}

pub fn print_match_human(report: &MatchReport) {
    println!(
        "Parent: {} ({})",
        report.parent.code.to_string().bold(),
        report.parent.mascot
    );
    println!(
        "Child:  {} ({})",
        report.child.code.to_string().bold(),
        report.child.mascot
    );
    println!();
    println!(
        "Compatibility: {}% [{}]",
        report.compatibility,
        report.tier.colored()
    );
    println!("{}", report.message);

    if let Some(result) = &report.parent.result {
        println!();
        println!("{}", "PARENT".bold());
        print_dimension_bars(result);
    }
    if let Some(result) = &report.child.result {
        println!();
        println!("{}", "CHILD".bold());
        print_dimension_bars(result);
    }

    println!();
    println!("{}", "ADVICE".cyan().bold());
    for item in &report.advice {
        match item {
            Advice::Difference {
                dimension,
                parent,
                child,
                note,
            } => println!("[{dimension}] {parent} -> {child}: {note}"),
            Advice::SameWavelength { note } => println!("{note}"),
        }
    }

    println!();
    println!("share: {}", report.share_url);
}

fn print_dimension_bars(result: &TypeResult) {
    for summary in &result.dimensions {
        let (first, second) = summary.dimension.letters();
        println!(
            "{:<10} {} {}{} {} {:>3}% {}",
            summary.dimension.label(),
            first,
            "#".repeat(filled_cells(summary.percentage)).green(),
            "-".repeat(BAR_WIDTH - filled_cells(summary.percentage)).dimmed(),
            second,
            summary.percentage,
            summary.leaning,
        );
    }
}

fn filled_cells(percentage: u8) -> usize {
    usize::from(percentage.min(100)) * BAR_WIDTH / 100
}
