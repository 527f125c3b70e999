use crate::core::{Dimension, TypeCode};
use colored::Colorize;
use serde::Serialize;

const POINTS_PER_MATCH: u8 = 25;

pub const SAME_WAVELENGTH: &str = "You share every preference. Routines come easily; \
     take care to expose your child to viewpoints neither of you would pick on your own.";

pub fn matching_positions(a: &TypeCode, b: &TypeCode) -> usize {
    Dimension::ALL
        .iter()
        .filter(|dimension| a.letter(**dimension) == b.letter(**dimension))
        .count()
}

/// Coarse match score: 25 per letter shared at the same position.
pub fn compatibility(a: &TypeCode, b: &TypeCode) -> u8 {
    matching_positions(a, b) as u8 * POINTS_PER_MATCH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn for_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => Self::High,
            50..=74 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::High => "A natural pair. Each of you fills in what the other lacks.",
            Self::Medium => "A good match. A little effort brings a much deeper understanding.",
            Self::Low => "Your differences are the attraction. There is a lot to learn from each other.",
        }
    }

    pub fn colored(self) -> String {
        match self {
            Self::High => self.as_str().green().bold().to_string(),
            Self::Medium => self.as_str().yellow().bold().to_string(),
            Self::Low => self.as_str().blue().bold().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advice {
    Difference {
        dimension: Dimension,
        parent: char,
        child: char,
        note: &'static str,
    },
    SameWavelength {
        note: &'static str,
    },
}

impl Advice {
    pub fn note(&self) -> &'static str {
        match self {
            Self::Difference { note, .. } | Self::SameWavelength { note } => *note,
        }
    }
}

/// One note per position where parent and child differ, keyed by direction.
/// Identical codes get a single same-wavelength note.
pub fn advice(parent: &TypeCode, child: &TypeCode) -> Vec<Advice> {
    let notes: Vec<Advice> = Dimension::ALL
        .into_iter()
        .filter_map(|dimension| {
            let p = parent.letter(dimension);
            let c = child.letter(dimension);
            if p == c {
                return None;
            }
            directed_note(p, c).map(|note| Advice::Difference {
                dimension,
                parent: p,
                child: c,
                note,
            })
        })
        .collect();

    if notes.is_empty() {
        return vec![Advice::SameWavelength {
            note: SAME_WAVELENGTH,
        }];
    }
    notes
}

fn directed_note(parent: char, child: char) -> Option<&'static str> {
    let note = match (parent, child) {
        ('E', 'I') => {
            "You recharge around people; your child recharges alone. When they retreat to \
             their room, give them quiet time instead of asking why they won't join in."
        }
        ('I', 'E') => {
            "You prefer calm; your child draws energy from friends. Treat their noisy \
             play as enthusiasm rather than disturbance."
        }
        ('S', 'N') => {
            "You are practical; your child loves wild ideas. Listen to the 'nonsense' and \
             play along, that is where their creativity grows."
        }
        ('N', 'S') => {
            "You think in possibilities; your child understands by seeing and touching. \
             Show concrete examples or let them try things first-hand."
        }
        ('T', 'F') => {
            "You lead with logic; your child leads with feelings. Acknowledge how they \
             feel before weighing who was right."
        }
        ('F', 'T') => {
            "You lead with feelings; your child cares about facts. Don't be hurt by a blunt \
             reply, once it makes sense to them they act on it."
        }
        ('J', 'P') => {
            "You plan ahead; your child is free-spirited. A packed schedule can feel \
             suffocating, so leave some slack."
        }
        ('P', 'J') => {
            "You go with the flow; your child likes fixed rules. Sudden changes of plan \
             unsettle them, so announce changes early."
        }
        _ => return None,
    };
    Some(note)
}

/// Indexed by which letters are the second of their pair: EI = 8, SN = 4,
/// TF = 2, JP = 1.
const MASCOTS: [(&str, &str); 16] = [
    ("ESTJ", "Eagle Leader"),
    ("ESTP", "Adventurous Cheetah"),
    ("ESFJ", "Golden Retriever"),
    ("ESFP", "Entertaining Parrot"),
    ("ENTJ", "Lion Leader"),
    ("ENTP", "Clever Fox"),
    ("ENFJ", "Caring Dolphin"),
    ("ENFP", "Playful Otter"),
    ("ISTJ", "Steady Turtle"),
    ("ISTP", "Cool Leopard"),
    ("ISFJ", "Caring Rabbit"),
    ("ISFP", "Artistic Cat"),
    ("INTJ", "Wise Owl"),
    ("INTP", "Curious Raccoon"),
    ("INFJ", "Wise Wolf"),
    ("INFP", "Dreaming Unicorn"),
];

fn type_index(code: &TypeCode) -> usize {
    Dimension::ALL.into_iter().fold(0, |index, dimension| {
        let (_, second) = dimension.letters();
        (index << 1) | usize::from(code.letter(dimension) == second)
    })
}

pub fn mascot(code: &TypeCode) -> &'static str {
    MASCOTS[type_index(code)].1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> TypeCode {
        raw.parse().unwrap()
    }

    #[test]
    fn identical_codes_are_fully_compatible() {
        for raw in ["ENFP", "ISTJ", "INTJ", "ESFP"] {
            assert_eq!(compatibility(&code(raw), &code(raw)), 100);
        }
    }

    #[test]
    fn opposite_codes_score_zero() {
        assert_eq!(compatibility(&code("ESTJ"), &code("INFP")), 0);
        assert_eq!(compatibility(&code("ENTP"), &code("ISFJ")), 0);
    }

    #[test]
    fn scores_in_quarters() {
        assert_eq!(compatibility(&code("ENFP"), &code("ENFJ")), 75);
        assert_eq!(compatibility(&code("ENFP"), &code("INFJ")), 50);
        assert_eq!(compatibility(&code("ENFP"), &code("ISFJ")), 25);
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(Tier::for_score(100), Tier::High);
        assert_eq!(Tier::for_score(75), Tier::High);
        assert_eq!(Tier::for_score(50), Tier::Medium);
        assert_eq!(Tier::for_score(25), Tier::Low);
        assert_eq!(Tier::for_score(0), Tier::Low);
    }

    #[test]
    fn advice_is_directed_and_per_difference() {
        let notes = advice(&code("ESTJ"), &code("ISTP"));
        assert_eq!(notes.len(), 2);
        let Advice::Difference {
            dimension,
            parent,
            child,
            ..
        } = &notes[0]
        else {
            panic!("expected a difference note, got {:?}", notes[0]);
        };
        assert_eq!(*dimension, Dimension::Ei);
        assert_eq!((*parent, *child), ('E', 'I'));
        assert!(matches!(
            notes[1],
            Advice::Difference {
                dimension: Dimension::Jp,
                ..
            }
        ));

        let reversed = advice(&code("ISTP"), &code("ESTJ"));
        assert_ne!(notes[0].note(), reversed[0].note());
    }

    #[test]
    fn matching_types_get_one_same_wavelength_note() {
        let notes = advice(&code("INFP"), &code("INFP"));
        assert_eq!(
            notes,
            vec![Advice::SameWavelength {
                note: SAME_WAVELENGTH
            }]
        );
    }

    #[test]
    fn every_type_has_a_distinct_mascot() {
        let mut seen = std::collections::HashSet::new();
        for e in ['E', 'I'] {
            for s in ['S', 'N'] {
                for t in ['T', 'F'] {
                    for j in ['J', 'P'] {
                        let raw = format!("{e}{s}{t}{j}");
                        let code: TypeCode = raw.parse().unwrap();
                        assert_eq!(MASCOTS[type_index(&code)].0, raw);
                        assert!(seen.insert(mascot(&code)));
                    }
                }
            }
        }
        assert_eq!(seen.len(), 16);
        assert_eq!(mascot(&code("ESFP")), "Entertaining Parrot");
    }
}
