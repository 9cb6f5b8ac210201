//! Synthetic idea generator.
//!
//! # Responsibility
//! - Produce the fixed-size startup collection of idea records.
//! - Keep generation deterministic for a given seed.
//!
//! # Invariants
//! - Ids are assigned sequentially from zero and never repeat.
//! - Two generators with the same seed and clock produce identical output.
//! - Every generated record passes `Idea::validate()`.

use crate::model::idea::{Idea, IdeaId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of ideas seeded into a fresh session.
pub const DEFAULT_IDEA_COUNT: usize = 1000;

const AUTHORS: [&str; 10] = [
    "Idan", "Alex", "Lina", "Jordan", "Sam", "Taylor", "Riley", "Morgan", "Dana", "Casey",
];

const TITLE_PREFIXES: [&str; 10] = [
    "AI Coach for ",
    "Marketplace for ",
    "Decentralized ",
    "Emotional ",
    "Micro-Volunteering ",
    "Interactive Tool for ",
    "Collaborative Space for ",
    "Crowdsourced Map of ",
    "Gamified App for ",
    "Open Source Project on ",
];

const TOPICS: [&str; 10] = [
    "Habits",
    "Projects",
    "Learning",
    "Task Management",
    "Civic Actions",
    "Productivity",
    "Ideas",
    "Urban Data",
    "Self-Growth",
    "Climate Tech",
];

fn topic_icon(topic: &str) -> &'static str {
    match topic {
        "Habits" => "\u{1F9D8}",
        "Projects" => "\u{1F6E0}\u{FE0F}",
        "Learning" => "\u{1F4DA}",
        "Task Management" => "\u{2705}",
        "Civic Actions" => "\u{1F30D}",
        "Productivity" => "\u{1F680}",
        "Ideas" => "\u{1F4A1}",
        "Urban Data" => "\u{1F3D9}\u{FE0F}",
        "Self-Growth" => "\u{1F331}",
        "Climate Tech" => "\u{267B}\u{FE0F}",
        _ => "\u{1F4A1}",
    }
}

/// Seedable generator for synthetic idea records.
///
/// The caller provides the clock value so tests can pin `last_updated`.
pub struct IdeaGenerator {
    rng: StdRng,
    now_ms: i64,
}

impl IdeaGenerator {
    /// Creates a generator with a fixed seed and generation timestamp.
    pub fn new(seed: u64, now_ms: i64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now_ms,
        }
    }

    /// Generates `count` ideas with sequential ids starting at zero.
    ///
    /// # Contract
    /// - All records share the generator's `now_ms` as `last_updated`.
    /// - `support` is uniform in [20, 100), `velocity` in [0.1, 0.4),
    ///   `acceleration` in [0.01, 0.04).
    pub fn generate(&mut self, count: usize) -> Vec<Idea> {
        (0..count).map(|i| self.build_idea(i as IdeaId)).collect()
    }

    fn build_idea(&mut self, id: IdeaId) -> Idea {
        let prefix = TITLE_PREFIXES[self.rng.gen_range(0..TITLE_PREFIXES.len())];
        let topic = TOPICS[self.rng.gen_range(0..TOPICS.len())];
        let author = AUTHORS[self.rng.gen_range(0..AUTHORS.len())];

        Idea {
            id,
            author: author.to_string(),
            title: format!("{prefix}{topic} #{id}"),
            description: format!(
                "A platform to explore: {}{}.",
                prefix.to_lowercase(),
                topic.to_lowercase()
            ),
            tag: topic.to_string(),
            icon: topic_icon(topic).to_string(),
            support: self.rng.gen_range(20.0..100.0),
            velocity: self.rng.gen_range(0.1..0.4),
            acceleration: self.rng.gen_range(0.01..0.04),
            last_updated: self.now_ms,
        }
    }
}
