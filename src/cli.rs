use crate::quiz::Audience;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mbtimatch",
    version,
    about = "Score MBTI quiz answers and compare parent/child types"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score an answer sheet against a question bank.
    Score(ScoreArgs),
    /// Positional compatibility of two type codes.
    Compat(CompatArgs),
    /// Full parent/child report with advice and a share link.
    Report(ReportArgs),
    /// Build or open a share link.
    Share(ShareArgs),
    /// Write a default ./mbtimatch.toml.
    Init,
}

#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    #[arg(long, value_enum, default_value_t = Audience::Adult)]
    pub audience: Audience,
    #[arg(long)]
    pub bank: Option<PathBuf>,
    #[arg(long)]
    pub answers: Option<PathBuf>,
    /// QUESTION_ID=LABEL, repeatable; applied after --answers.
    #[arg(long = "answer", value_name = "QUESTION_ID=LABEL")]
    pub answer: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct CompatArgs {
    pub first: String,
    pub second: String,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Type code, or @FILE to score a parent answer sheet.
    #[arg(long)]
    pub parent: String,
    /// Type code, or @FILE to score a child answer sheet.
    #[arg(long)]
    pub child: String,
    #[arg(long, value_enum, default_value_t = Audience::Elementary)]
    pub child_audience: Audience,
    #[arg(long)]
    pub parent_bank: Option<PathBuf>,
    #[arg(long)]
    pub child_bank: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ShareArgs {
    #[command(flatten)]
    pub common: CommonArgs,
    #[arg(required_unless_present = "open")]
    pub parent: Option<String>,
    #[arg(required_unless_present = "open")]
    pub child: Option<String>,
    #[arg(long, conflicts_with_all = ["parent", "child"])]
    pub open: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_open_accepts_json_and_config() {
        let cli = Cli::try_parse_from([
            "mbtimatch",
            "share",
            "--open",
            "https://example.org/mbti/?p=ENFP&c=ISTJ",
            "--json",
            "--config",
            "mbtimatch.toml",
        ])
        .unwrap();

        let Commands::Share(args) = cli.command else {
            panic!("expected share command");
        };
        assert!(args.common.json);
        assert_eq!(args.common.config, Some(PathBuf::from("mbtimatch.toml")));
        assert!(args.parent.is_none());
    }

    #[test]
    fn share_needs_codes_or_open() {
        assert!(Cli::try_parse_from(["mbtimatch", "share"]).is_err());
        assert!(Cli::try_parse_from(["mbtimatch", "share", "ENFP", "ISTJ", "--json"]).is_ok());
    }
}
