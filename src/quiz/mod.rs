pub mod bank;

use crate::config::LoadedConfig;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub use bank::QuestionBank;

/// Who is taking the quiz. Parents answer the adult bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Parent,
    Elementary,
    Middle,
    High,
    Adult,
}

impl Audience {
    pub fn bank_stem(self) -> &'static str {
        match self {
            Self::Parent | Self::Adult => "adult",
            Self::Elementary => "elementary",
            Self::Middle => "middle",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => write!(f, "parent"),
            Self::Elementary => write!(f, "elementary"),
            Self::Middle => write!(f, "middle"),
            Self::High => write!(f, "high"),
            Self::Adult => write!(f, "adult"),
        }
    }
}

/// An explicit `--bank` wins; otherwise `<banks.dir>/<audience>.toml`.
pub fn resolve_bank_path(
    loaded: &LoadedConfig,
    cwd: &Path,
    explicit: Option<&Path>,
    audience: Audience,
) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => cwd.join(path),
        None => loaded
            .banks_dir()
            .join(format!("{}.toml", audience.bank_stem())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn loaded(base: &Path) -> LoadedConfig {
        LoadedConfig {
            config: Config::default(),
            base_dir: base.to_path_buf(),
        }
    }

    #[test]
    fn parent_uses_adult_bank() {
        let base = Path::new("/srv/quiz");
        let path = resolve_bank_path(&loaded(base), base, None, Audience::Parent);
        assert_eq!(path, base.join("banks").join("adult.toml"));
    }

    #[test]
    fn explicit_bank_is_relative_to_cwd() {
        let base = Path::new("/srv/quiz");
        let cwd = Path::new("/home/user");
        let path = resolve_bank_path(
            &loaded(base),
            cwd,
            Some(Path::new("custom.toml")),
            Audience::Middle,
        );
        assert_eq!(path, cwd.join("custom.toml"));
    }

    #[test]
    fn child_audiences_map_to_own_banks() {
        assert_eq!(Audience::Elementary.bank_stem(), "elementary");
        assert_eq!(Audience::High.bank_stem(), "high");
        assert_eq!(Audience::Middle.to_string(), "middle");
    }
}
