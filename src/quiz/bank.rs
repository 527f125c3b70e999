use crate::core::Question;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// An ordered question list, as stored in a bank TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn from_toml(content: &str) -> Result<Self> {
        let bank = toml::from_str::<QuestionBank>(content).context("invalid question bank")?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed reading question bank {}", path.display()))?;
        let mut bank = Self::from_toml(&content)
            .with_context(|| format!("failed loading question bank {}", path.display()))?;

        if bank.name.is_empty() {
            bank.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        tracing::debug!(
            bank = %bank.name,
            questions = bank.questions.len(),
            "loaded question bank"
        );
        Ok(bank)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for question in &self.questions {
            if question.id.trim().is_empty() {
                bail!("question with empty id");
            }
            if !seen.insert(question.id.as_str()) {
                bail!("duplicate question id {}", question.id);
            }
            if question.options.is_empty() {
                bail!("question {} has no options", question.id);
            }
        }
        Ok(())
    }
}
