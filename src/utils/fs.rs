use crate::core::AnswerSet;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerEntry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

/// Parses `question_id=LABEL` lines. Comments, blank lines and lines without
/// a key are skipped.
pub fn parse_answer_sheet(content: &str) -> Vec<AnswerEntry> {
    let mut entries = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value_raw)) = line.split_once('=') else {
            tracing::warn!(line = line_no, "skipping answer line without '='");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        entries.push(AnswerEntry {
            key: key.to_string(),
            value: strip_quotes(value_raw.trim()),
            line: line_no,
        });
    }

    entries
}

pub fn read_answer_sheet(path: &Path) -> Result<AnswerSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading answer sheet {}", path.display()))?;
    Ok(parse_answer_sheet(&content)
        .into_iter()
        .map(|entry| (entry.key, entry.value))
        .collect())
}

/// Rejects an empty answer set; `source` names where the answers came from.
pub fn ensure_answers(answers: &AnswerSet, source: &str) -> Result<()> {
    if answers.is_empty() {
        bail!("no answers given in {source}");
    }
    Ok(())
}

/// Parses a single `--answer id=LABEL` flag value.
pub fn parse_answer_flag(raw: &str) -> Result<(String, String)> {
    match parse_answer_sheet(raw).as_slice() {
        [entry] => Ok((entry.key.clone(), entry.value.clone())),
        _ => bail!("invalid answer {raw:?} (expected QUESTION_ID=LABEL)"),
    }
}

fn strip_quotes(value: &str) -> String {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_answer_lines() {
        let input = r#"
# parent sheet
a01=A
a02 = "B"
a03='C'
a04=
"#;
        let parsed = parse_answer_sheet(input);
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0].key, "a01");
        assert_eq!(parsed[1].value, "B");
        assert_eq!(parsed[2].value, "C");
        assert_eq!(parsed[3].value, "");
        assert_eq!(parsed[3].line, 6);
    }

    #[test]
    fn ignores_invalid_or_comment_lines() {
        let input = r#"
# ignored
NOT_VALID
=ALSO_INVALID
a01=A
"#;
        let parsed = parse_answer_sheet(input);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].key, "a01");
        assert_eq!(parsed[0].value, "A");
    }

    #[test]
    fn reads_sheet_into_answer_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.txt");
        fs::write(&path, "a01=A\na02=B\na01=B\n").unwrap();

        let answers = read_answer_sheet(&path).unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get("a01"), Some("B"));
    }

    #[test]
    fn empty_sheet_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "# nothing answered yet\n\n").unwrap();

        let answers = read_answer_sheet(&path).unwrap();
        let err = ensure_answers(&answers, "empty.txt").unwrap_err();
        assert!(err.to_string().contains("no answers given in empty.txt"));

        let answers: AnswerSet = [("a01", "A")].into_iter().collect();
        assert!(ensure_answers(&answers, "flags").is_ok());
    }

    #[test]
    fn answer_flag_requires_key_and_separator() {
        assert_eq!(
            parse_answer_flag("e1=A").unwrap(),
            ("e1".to_string(), "A".to_string())
        );
        assert!(parse_answer_flag("e1").is_err());
        assert!(parse_answer_flag("=A").is_err());
    }
}
