//! Character-creation form submitted to the engine.

use crate::i18n::t;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    #[serde(rename = "男性", alias = "male")]
    Male,
    #[serde(rename = "女性", alias = "female")]
    Female,
}

impl Gender {
    pub const ALL: [Self; 2] = [Self::Male, Self::Female];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        t(&format!("gender.{}", self.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Education {
    #[default]
    #[serde(rename = "高中", alias = "high_school")]
    HighSchool,
    #[serde(rename = "大专", alias = "associate")]
    Associate,
    #[serde(rename = "本科", alias = "bachelor")]
    Bachelor,
    #[serde(rename = "硕士", alias = "master")]
    Master,
    #[serde(rename = "博士", alias = "doctorate")]
    Doctorate,
}

impl Education {
    pub const ALL: [Self; 5] = [
        Self::HighSchool,
        Self::Associate,
        Self::Bachelor,
        Self::Master,
        Self::Doctorate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighSchool => "high_school",
            Self::Associate => "associate",
            Self::Bachelor => "bachelor",
            Self::Master => "master",
            Self::Doctorate => "doctorate",
        }
    }

    #[must_use]
    pub fn label(self) -> String {
        t(&format!("education.{}", self.as_str()))
    }
}

pub const MIN_AGE: u32 = 18;
pub const MAX_RANDOM_AGE: u32 = 47;
pub const DEFAULT_AGE: u32 = 25;

/// Form fields of the create-character screen. A blank name asks the engine
/// to generate one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterForm {
    pub name: String,
    pub gender: Gender,
    pub age: u32,
    pub education: Education,
}

impl Default for CharacterForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            gender: Gender::default(),
            age: DEFAULT_AGE,
            education: Education::default(),
        }
    }
}

impl CharacterForm {
    /// Fill the form with a random gender, age and education, leaving the name
    /// blank.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            name: String::new(),
            gender: Gender::ALL.choose(rng).copied().unwrap_or_default(),
            age: rng.gen_range(MIN_AGE..=MAX_RANDOM_AGE),
            education: Education::ALL.choose(rng).copied().unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn random_forms_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let form = CharacterForm::random(&mut rng);
            assert!(form.name.is_empty());
            assert!((MIN_AGE..=MAX_RANDOM_AGE).contains(&form.age));
        }
    }

    #[test]
    fn form_serializes_with_engine_literals() {
        let form = CharacterForm {
            name: "张伟".into(),
            gender: Gender::Female,
            age: 30,
            education: Education::Master,
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "张伟", "gender": "女性", "age": 30, "education": "硕士"})
        );
    }

    #[test]
    fn labels_follow_locale() {
        assert_eq!(Gender::Male.label(), "男性");
        assert_eq!(Education::Doctorate.label(), "博士");
        assert_eq!(CharacterForm::default().age, DEFAULT_AGE);
    }
}
