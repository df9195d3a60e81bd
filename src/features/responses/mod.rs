//! # Feature: Mention Responses
//!
//! Replies to messages that mention the bot with a random line from the
//! persisted response lists. Lines are added with `/add`.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Canned reply policy, store mutations serialized behind a mutex
//! - 1.0.0: Initial insult/blab lists with 90/10 weighting

pub mod store;

pub use store::{ResponseStore, Responses};

use rand::seq::IndexedRandom;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Reply used when the drawn category has no entries
pub const FALLBACK_RESPONSE: &str = "I'm at a loss for words!";

/// The fixed response categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCategory {
    Insult,
    Blab,
}

impl ResponseCategory {
    pub const ALL: [ResponseCategory; 2] = [ResponseCategory::Insult, ResponseCategory::Blab];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCategory::Insult => "insult",
            ResponseCategory::Blab => "blab",
        }
    }
}

impl fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insult" => Ok(ResponseCategory::Insult),
            "blab" => Ok(ResponseCategory::Blab),
            other => Err(anyhow::anyhow!("Unknown response category: {other}")),
        }
    }
}

/// How the bot answers a mention
#[derive(Debug, Clone, PartialEq)]
pub enum MentionPolicy {
    /// Draw from `insult` with the given probability, otherwise from `blab`
    Weighted { insult_probability: f64 },
    /// Always answer with the same text
    Canned(String),
}

impl Default for MentionPolicy {
    fn default() -> Self {
        MentionPolicy::Weighted {
            insult_probability: crate::core::config::DEFAULT_INSULT_PROBABILITY,
        }
    }
}

impl MentionPolicy {
    /// Produce the reply for one mention. Never returns an empty string.
    pub fn reply<R: Rng + ?Sized>(&self, responses: &Responses, rng: &mut R) -> String {
        match self {
            MentionPolicy::Canned(text) if !text.is_empty() => text.clone(),
            MentionPolicy::Canned(_) => FALLBACK_RESPONSE.to_string(),
            MentionPolicy::Weighted { insult_probability } => {
                let category = if rng.random_bool(*insult_probability) {
                    ResponseCategory::Insult
                } else {
                    ResponseCategory::Blab
                };
                draw(responses, category, rng)
            }
        }
    }
}

/// Pick a random line from `category`, falling back to [`FALLBACK_RESPONSE`]
pub fn draw<R: Rng + ?Sized>(
    responses: &Responses,
    category: ResponseCategory,
    rng: &mut R,
) -> String {
    responses
        .get(category)
        .iter()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .choose(rng)
        .map(|line| line.to_string())
        .unwrap_or_else(|| FALLBACK_RESPONSE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn responses(insult: &[&str], blab: &[&str]) -> Responses {
        Responses {
            insult: insult.iter().map(|s| s.to_string()).collect(),
            blab: blab.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for category in ResponseCategory::ALL {
            assert_eq!(category.as_str().parse::<ResponseCategory>().unwrap(), category);
        }
        assert!("compliment".parse::<ResponseCategory>().is_err());
    }

    #[test]
    fn test_draw_empty_category_uses_fallback() {
        let data = responses(&["x"], &[]);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(draw(&data, ResponseCategory::Blab, &mut rng), FALLBACK_RESPONSE);
        assert_eq!(draw(&data, ResponseCategory::Insult, &mut rng), "x");
    }

    #[test]
    fn test_draw_skips_empty_lines() {
        let data = responses(&[""], &[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw(&data, ResponseCategory::Insult, &mut rng), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_weighted_policy_extremes() {
        let data = responses(&["insult"], &["blab"]);
        let mut rng = StdRng::seed_from_u64(3);

        let always_insult = MentionPolicy::Weighted { insult_probability: 1.0 };
        let never_insult = MentionPolicy::Weighted { insult_probability: 0.0 };

        for _ in 0..20 {
            assert_eq!(always_insult.reply(&data, &mut rng), "insult");
            assert_eq!(never_insult.reply(&data, &mut rng), "blab");
        }
    }

    #[test]
    fn test_weighted_policy_blab_empty_never_blank() {
        let data = responses(&["x"], &[]);
        let policy = MentionPolicy::Weighted { insult_probability: 0.0 };
        let mut rng = StdRng::seed_from_u64(11);

        assert_eq!(policy.reply(&data, &mut rng), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_canned_policy() {
        let data = responses(&["x"], &["y"]);
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(
            MentionPolicy::Canned("hello".to_string()).reply(&data, &mut rng),
            "hello"
        );
        assert_eq!(
            MentionPolicy::Canned(String::new()).reply(&data, &mut rng),
            FALLBACK_RESPONSE
        );
    }

    #[test]
    fn test_default_policy_is_ninety_ten() {
        assert_eq!(
            MentionPolicy::default(),
            MentionPolicy::Weighted { insult_probability: 0.9 }
        );
    }
}
