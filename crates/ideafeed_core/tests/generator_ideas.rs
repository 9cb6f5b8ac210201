use ideafeed_core::{IdeaGenerator, DEFAULT_IDEA_COUNT};
use std::collections::HashMap;

const NOW_MS: i64 = 1_700_000_000_000;

#[test]
fn default_count_matches_startup_collection_size() {
    assert_eq!(DEFAULT_IDEA_COUNT, 1000);
}

#[test]
fn same_seed_produces_identical_ideas() {
    let first = IdeaGenerator::new(42, NOW_MS).generate(200);
    let second = IdeaGenerator::new(42, NOW_MS).generate(200);

    assert_eq!(first, second);
}

#[test]
fn different_seeds_produce_different_ideas() {
    let first = IdeaGenerator::new(1, NOW_MS).generate(100);
    let second = IdeaGenerator::new(2, NOW_MS).generate(100);

    assert_ne!(first, second);
}

#[test]
fn ids_are_sequential_from_zero() {
    let ideas = IdeaGenerator::new(7, NOW_MS).generate(50);

    assert_eq!(ideas.len(), 50);
    for (position, idea) in ideas.iter().enumerate() {
        assert_eq!(idea.id, position as i64);
    }
}

#[test]
fn generated_ideas_pass_validation_and_stay_in_score_ranges() {
    let ideas = IdeaGenerator::new(42, NOW_MS).generate(DEFAULT_IDEA_COUNT);

    for idea in &ideas {
        idea.validate().unwrap();
        assert!((20.0..100.0).contains(&idea.support), "support {}", idea.support);
        assert!((0.1..0.4).contains(&idea.velocity), "velocity {}", idea.velocity);
        assert!(
            (0.01..0.04).contains(&idea.acceleration),
            "acceleration {}",
            idea.acceleration
        );
        assert_eq!(idea.last_updated, NOW_MS);
    }
}

#[test]
fn titles_embed_topic_and_id() {
    let ideas = IdeaGenerator::new(3, NOW_MS).generate(25);

    for idea in &ideas {
        assert!(idea.title.contains(&idea.tag), "title `{}` lacks tag", idea.title);
        assert!(
            idea.title.ends_with(&format!("#{}", idea.id)),
            "title `{}` lacks id suffix",
            idea.title
        );
        assert!(idea.description.starts_with("A platform to explore: "));
        assert!(idea.description.ends_with('.'));
    }
}

#[test]
fn ideas_sharing_a_tag_share_an_icon() {
    let ideas = IdeaGenerator::new(42, NOW_MS).generate(500);

    let mut icon_by_tag: HashMap<&str, &str> = HashMap::new();
    for idea in &ideas {
        assert!(!idea.icon.is_empty());
        let known = icon_by_tag.entry(idea.tag.as_str()).or_insert(idea.icon.as_str());
        assert_eq!(*known, idea.icon, "tag {} maps to two icons", idea.tag);
    }
}

#[test]
fn startup_collection_covers_every_topic() {
    let ideas = IdeaGenerator::new(42, NOW_MS).generate(DEFAULT_IDEA_COUNT);

    let tags: std::collections::HashSet<&str> =
        ideas.iter().map(|idea| idea.tag.as_str()).collect();
    assert_eq!(tags.len(), 10, "expected all ten topics, got {tags:?}");
    assert!(tags.contains("Climate Tech"));
}
