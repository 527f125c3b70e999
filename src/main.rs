mod cli;
mod config;
mod core;
mod quiz;
mod utils;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, CompatArgs, ReportArgs, ScoreArgs, ShareArgs};
use config::LoadedConfig;
use crate::core::report::{JsonScoreReport, MatchReport, Participant, ScoreReport};
use crate::core::score::{IgnoreReason, ScoreOutcome};
use crate::core::{AnswerSet, TypeCode};
use quiz::{Audience, QuestionBank};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    init_tracing();

    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mbtimatch=warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score(args) => run_score(args),
        Commands::Compat(args) => run_compat(args),
        Commands::Report(args) => run_report(args),
        Commands::Share(args) => run_share(args),
        Commands::Init => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn run_score(args: ScoreArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.common.config.as_deref(), &cwd)?;

    let mut answers = match &args.answers {
        Some(path) => utils::fs::read_answer_sheet(&resolve_path(&cwd, path))?,
        None => AnswerSet::new(),
    };
    for raw in &args.answer {
        let (question_id, label) = utils::fs::parse_answer_flag(raw)?;
        answers.insert(question_id, label);
    }
    tracing::debug!(answers = answers.len(), "collected answers");
    utils::fs::ensure_answers(&answers, "--answers FILE or --answer QUESTION_ID=LABEL")?;

    let bank_path = quiz::resolve_bank_path(&loaded, &cwd, args.bank.as_deref(), args.audience);
    let bank = QuestionBank::load(&bank_path)?;
    let outcome = score_bank(&bank, &answers);
    let report = ScoreReport::new(bank.name.clone(), outcome, &loaded.config);

    if args.common.json || loaded.config.general.json {
        let json_report = JsonScoreReport::from(&report);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        core::report::print_score_human(&report);
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}

fn run_compat(args: CompatArgs) -> Result<i32> {
    let first: TypeCode = args.first.parse()?;
    let second: TypeCode = args.second.parse()?;
    let score = core::compat::compatibility(&first, &second);

    if args.json {
        let value = serde_json::json!({
            "first": first,
            "second": second,
            "compatibility": score,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{first} / {second}: {score}%");
    }
    Ok(0)
}

fn run_report(args: ReportArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.common.config.as_deref(), &cwd)?;

    let parent = resolve_participant(
        &args.parent,
        &loaded,
        &cwd,
        args.parent_bank.as_deref(),
        Audience::Parent,
    )
    .context("failed resolving --parent")?;
    let child = resolve_participant(
        &args.child,
        &loaded,
        &cwd,
        args.child_bank.as_deref(),
        args.child_audience,
    )
    .context("failed resolving --child")?;

    let report = MatchReport::build(parent, child, &loaded.config);
    print_match(&report, args.common.json || loaded.config.general.json)?;
    Ok(0)
}

fn run_share(args: ShareArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.common.config.as_deref(), &cwd)?;
    let json = args.common.json || loaded.config.general.json;

    if let Some(url) = &args.open {
        let Some((parent, child)) = core::share::parse_share_link(url) else {
            bail!("share link {url:?} does not carry valid p= and c= type codes");
        };
        let report = MatchReport::build(
            Participant::from_code(parent),
            Participant::from_code(child),
            &loaded.config,
        );
        print_match(&report, json)?;
        return Ok(0);
    }

    let (Some(parent), Some(child)) = (&args.parent, &args.child) else {
        bail!("share needs PARENT and CHILD type codes, or --open URL");
    };
    let parent: TypeCode = parent.parse()?;
    let child: TypeCode = child.parse()?;
    let url = core::share::share_link(&loaded.config.general.share_base_url, &parent, &child);
    if json {
        let value = serde_json::json!({ "share_url": url });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{url}");
    }
    Ok(0)
}

fn print_match(report: &MatchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        core::report::print_match_human(report);
    }
    Ok(())
}

/// `CODE` is taken as-is; `@FILE` is scored against the audience's bank.
fn resolve_participant(
    raw: &str,
    loaded: &LoadedConfig,
    cwd: &Path,
    bank: Option<&Path>,
    audience: Audience,
) -> Result<Participant> {
    let Some(sheet) = raw.strip_prefix('@') else {
        return Ok(Participant::from_code(raw.parse()?));
    };

    let answers = utils::fs::read_answer_sheet(&resolve_path(cwd, Path::new(sheet)))?;
    utils::fs::ensure_answers(&answers, sheet)?;
    let bank_path = quiz::resolve_bank_path(loaded, cwd, bank, audience);
    let bank = QuestionBank::load(&bank_path)?;
    let outcome = score_bank(&bank, &answers);

    if !outcome.is_complete() {
        tracing::warn!(
            audience = %audience,
            answered = outcome.answered,
            total = outcome.total,
            "answer sheet is incomplete"
        );
    }
    Ok(Participant::from_result(outcome.result))
}

fn score_bank(bank: &QuestionBank, answers: &AnswerSet) -> ScoreOutcome {
    let outcome = core::score::score_answers(&bank.questions, answers);
    for ignored in &outcome.ignored {
        match ignored.reason {
            IgnoreReason::UnknownQuestion => tracing::warn!(
                bank = %bank.name,
                question = %ignored.question_id,
                "answer references a question not in the bank"
            ),
            IgnoreReason::UnknownOption => tracing::warn!(
                bank = %bank.name,
                question = %ignored.question_id,
                label = %ignored.label,
                "answer picks an option the question does not offer"
            ),
        }
    }
    outcome
}

fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
