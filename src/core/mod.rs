pub mod compat;
pub mod report;
pub mod score;
pub mod share;

use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

static TYPE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)[EI][SN][TF][JP]$").expect("valid type code regex"));

/// One of the four MBTI axes, in type-code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "EI")]
    Ei,
    #[serde(rename = "SN")]
    Sn,
    #[serde(rename = "TF")]
    Tf,
    #[serde(rename = "JP")]
    Jp,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [Self::Ei, Self::Sn, Self::Tf, Self::Jp];

    pub fn index(self) -> usize {
        match self {
            Self::Ei => 0,
            Self::Sn => 1,
            Self::Tf => 2,
            Self::Jp => 3,
        }
    }

    /// `(first, second)`: the first letter wins on a non-negative score.
    pub fn letters(self) -> (char, char) {
        match self {
            Self::Ei => ('E', 'I'),
            Self::Sn => ('S', 'N'),
            Self::Tf => ('T', 'F'),
            Self::Jp => ('J', 'P'),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ei => "EI",
            Self::Sn => "SN",
            Self::Tf => "TF",
            Self::Jp => "JP",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ei => "Energy",
            Self::Sn => "Perception",
            Self::Tf => "Judgement",
            Self::Jp => "Lifestyle",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated four-letter type code such as `ENFP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeCode([char; 4]);

impl TypeCode {
    pub fn letter(&self, dimension: Dimension) -> char {
        self.0[dimension.index()]
    }
}

impl FromStr for TypeCode {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !TYPE_CODE_RE.is_match(trimmed) {
            bail!("invalid type code {raw:?} (expected four letters like ENFP)");
        }

        let mut letters = ['E', 'S', 'T', 'J'];
        for (slot, ch) in letters.iter_mut().zip(trimmed.chars()) {
            *slot = ch.to_ascii_uppercase();
        }
        Ok(Self(letters))
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0 {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl Serialize for TypeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub dimension: Dimension,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub options: BTreeMap<String, i32>,
}

impl Question {
    pub fn weight(&self, label: &str) -> Option<i32> {
        self.options.get(label).copied()
    }
}

/// Question id to chosen option label. Re-inserting an id replaces the answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, label: impl Into<String>) {
        self.0.insert(question_id.into(), label.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(id, label)| (id.as_str(), label.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut answers = Self::new();
        for (id, label) in iter {
            answers.insert(id, label);
        }
        answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_codes_case_insensitively() {
        let code: TypeCode = " enfp ".parse().unwrap();
        assert_eq!(code.to_string(), "ENFP");
        assert_eq!(code.letter(Dimension::Tf), 'F');
    }

    #[test]
    fn rejects_malformed_type_codes() {
        for raw in ["", "ENF", "ENFPX", "ESXP", "IEFP", "1234"] {
            assert!(raw.parse::<TypeCode>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn later_answers_replace_earlier_ones() {
        let answers: AnswerSet = [("q1", "A"), ("q2", "B"), ("q1", "C")].into_iter().collect();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get("q1"), Some("C"));
    }

    #[test]
    fn dimension_serializes_as_pair_name() {
        let json = serde_json::to_string(&Dimension::Sn).unwrap();
        assert_eq!(json, "\"SN\"");
    }
}
