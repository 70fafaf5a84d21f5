use std::collections::HashSet;

use chromalab_palette::{CatalogColor, Rgb};

use crate::mixer::MixedColor;

/// An unordered pair of mixing ingredients.
///
/// Equality ignores order: red with yellow is the same recipe as yellow
/// with red.
#[derive(Clone, Debug)]
pub struct ColorPair {
    pub first: CatalogColor,
    pub second: CatalogColor,
}

impl ColorPair {
    pub fn new(first: CatalogColor, second: CatalogColor) -> Self {
        ColorPair { first, second }
    }
}

impl PartialEq for ColorPair {
    fn eq(&self, other: &Self) -> bool {
        (self.first.rgb == other.first.rgb && self.second.rgb == other.second.rgb)
            || (self.first.rgb == other.second.rgb && self.second.rgb == other.first.rgb)
    }
}

impl Eq for ColorPair {}

/// Recall question: which two ingredients blend into the target color?
#[derive(Clone, Debug, PartialEq)]
pub struct MixQuestion {
    /// The even blend the player has to reproduce.
    pub target: MixedColor,
    /// Candidate recipes, exactly one of which produces the target.
    pub options: Vec<ColorPair>,
    pub correct: ColorPair,
}

impl MixQuestion {
    pub fn is_correct(&self, option: &ColorPair) -> bool {
        *option == self.correct
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    Similar,
    Opposite,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Similar => "similar",
            RelationKind::Opposite => "opposite",
        }
    }

    /// Korean connective used when phrasing the question prompt.
    pub fn prompt_word(&self) -> &'static str {
        match self {
            RelationKind::Similar => "비슷한",
            RelationKind::Opposite => "반대되는",
        }
    }

    /// How many picks a complete answer takes.
    pub fn required_picks(&self) -> usize {
        match self {
            RelationKind::Similar => 2,
            RelationKind::Opposite => 1,
        }
    }
}

/// Relation question: which wheel colors are similar to, or opposite of,
/// the target?
#[derive(Clone, Debug, PartialEq)]
pub struct RelationQuestion {
    pub kind: RelationKind,
    pub target: CatalogColor,
    pub options: Vec<CatalogColor>,
    /// The correct answers by value. Two entries for similar, one for
    /// opposite.
    pub correct: Vec<Rgb>,
}

impl RelationQuestion {
    /// Judge a complete selection against the answer set, ignoring pick
    /// order.
    pub fn is_correct_selection(&self, picks: &[Rgb]) -> bool {
        if picks.len() != self.correct.len() {
            return false;
        }
        let picked: HashSet<Rgb> = picks.iter().copied().collect();
        let expected: HashSet<Rgb> = self.correct.iter().copied().collect();
        picked == expected
    }
}

/// A quiz round. Generating a new question fully replaces the old one.
#[derive(Clone, Debug, PartialEq)]
pub enum QuizQuestion {
    Mix(MixQuestion),
    Relation(RelationQuestion),
}

impl QuizQuestion {
    pub fn prompt(&self) -> String {
        match self {
            QuizQuestion::Mix(_) => {
                "아래의 색깔을 만들려면 어떤 색들을 섞어야 할까요?".to_string()
            }
            QuizQuestion::Relation(question) => format!(
                "{}과(와) {} 색은 무엇일까요?",
                question.target.name,
                question.kind.prompt_word()
            ),
        }
    }

    /// Extra instruction line, present when an answer takes several picks.
    pub fn instruction(&self) -> Option<&'static str> {
        match self {
            QuizQuestion::Relation(question) if question.kind == RelationKind::Similar => {
                Some("정답 2개를 골라주세요!")
            }
            _ => None,
        }
    }

    pub fn option_count(&self) -> usize {
        match self {
            QuizQuestion::Mix(question) => question.options.len(),
            QuizQuestion::Relation(question) => question.options.len(),
        }
    }
}
