use super::common::*;
use crate::advisor::collection::{Advisor, CollectionQuery, Recommendation, SortOrder};
use crate::advisor::scoring::Tier;
use crate::inventory::domain::{CanonicalItem, SlotKey};

#[test]
fn advise_picks_highest_scoring_profile() {
    let advisor = Advisor::standard();
    let circlet = raiden_circlet();

    let advice = advisor.advise(&circlet);

    assert_eq!(advice.best_profile_key.as_deref(), Some("raiden"));
    assert_eq!(advice.best_score.tier, Tier::S);
    assert_eq!(advice.recommendation, Recommendation::BestInSlot);
    assert_eq!(advice.all_scores.len(), 8);
    assert_eq!(advice.all_scores[0].profile_key, "yelan");
}

#[test]
fn all_zero_item_has_no_best_profile() {
    let advisor = Advisor::standard();
    let bare = item("unknown", SlotKey::Flower, None, &[]);

    let advice = advisor.advise(&bare);

    assert!(advice.best_profile_key.is_none());
    assert_eq!(advice.best_score.score, 0.0);
    assert_eq!(advice.best_score.tier, Tier::F);
    assert_eq!(advice.recommendation, Recommendation::Fodder);
}

#[test]
fn ties_keep_the_first_candidate() {
    // Raiden and Xiangling weigh crit identically and neither favors this set.
    let flower = plain_item("gladiator-s-finale", SlotKey::Flower, 3.0);

    let raiden_first = Advisor::standard()
        .with_candidates(["raiden", "xiangling"])
        .advise(&flower);
    let xiangling_first = Advisor::standard()
        .with_candidates(["xiangling", "raiden"])
        .advise(&flower);

    assert_eq!(raiden_first.best_profile_key.as_deref(), Some("raiden"));
    assert_eq!(xiangling_first.best_profile_key.as_deref(), Some("xiangling"));
}

#[test]
fn unknown_candidates_score_zero() {
    let advisor = Advisor::standard().with_candidates(["nobody"]);
    let circlet = raiden_circlet();
    let advice = advisor.advise(&circlet);
    assert!(advice.best_profile_key.is_none());
    assert_eq!(advice.all_scores.len(), 1);
    assert_eq!(advice.all_scores[0].result.score, 0.0);
}

#[test]
fn recommendation_follows_best_tier() {
    let expected = [
        (Tier::S, Recommendation::BestInSlot),
        (Tier::A, Recommendation::Keep),
        (Tier::B, Recommendation::Keep),
        (Tier::C, Recommendation::Potential),
        (Tier::D, Recommendation::Fodder),
        (Tier::F, Recommendation::Fodder),
    ];
    for (tier, recommendation) in expected {
        assert_eq!(Recommendation::from_tier(tier), recommendation);
    }
    assert_eq!(Recommendation::from_key("Best-In-Slot"), Some(Recommendation::BestInSlot));
    assert_eq!(Recommendation::from_key("trash"), None);
}

fn collection() -> Vec<CanonicalItem> {
    vec![
        junk_flower(),
        raiden_circlet(),
        plain_item("gladiator-s-finale", SlotKey::Flower, 3.0),
        plain_item("emblem-of-severed-fate", SlotKey::Plume, 2.0),
        item("unknown", SlotKey::Goblet, None, &[]),
        plain_item("noblesse-oblige", SlotKey::Flower, 1.0),
        plain_item("gladiator-s-finale", SlotKey::Plume, 3.0),
    ]
}

#[test]
fn summary_counts_every_category_in_fixed_order() {
    let items = collection();
    let analysis = Advisor::standard().analyze_collection(&items);
    let summary = &analysis.summary;

    assert_eq!(summary.total, items.len());
    let order: Vec<Recommendation> = summary
        .by_recommendation
        .iter()
        .map(|entry| entry.recommendation)
        .collect();
    assert_eq!(order, Recommendation::ordered().to_vec());
    let tiers: Vec<Tier> = summary.by_tier.iter().map(|entry| entry.tier).collect();
    assert_eq!(tiers, Tier::ordered().to_vec());

    let counted: usize = summary.by_recommendation.iter().map(|entry| entry.count).sum();
    assert_eq!(counted, items.len());
    assert_eq!(summary.fodder_count, summary.count_for(Recommendation::Fodder));
}

#[test]
fn top_items_are_stable_and_descending() {
    let items = collection();
    let analysis = Advisor::standard().analyze_collection(&items);
    let top = &analysis.summary.top_items;

    assert_eq!(top.len(), 5);
    assert_eq!(top[0].item.id, items[1].id);
    assert!(top
        .windows(2)
        .all(|pair| pair[0].best_score.score >= pair[1].best_score.score));

    // Items 2 and 6 score identically; the earlier one ranks first.
    let first_tie = top.iter().position(|advice| advice.item.id == items[2].id);
    let second_tie = top.iter().position(|advice| advice.item.id == items[6].id);
    assert!(first_tie < second_tie);
}

#[test]
fn empty_collection_summarizes_to_zero() {
    let items: Vec<CanonicalItem> = Vec::new();
    let analysis = Advisor::standard().analyze_collection(&items);
    assert_eq!(analysis.summary.total, 0);
    assert!(analysis.summary.top_items.is_empty());
    assert!(analysis.summary.by_tier.iter().all(|entry| entry.count == 0));
}

#[test]
fn query_filters_by_slot_and_search() {
    let items = collection();
    let analysis = Advisor::standard().analyze_collection(&items);

    let flowers = analysis.query(&CollectionQuery {
        slot: Some(SlotKey::Flower),
        ..CollectionQuery::default()
    });
    assert_eq!(flowers.len(), 3);
    assert!(flowers.iter().all(|advice| advice.item.slot_key == SlotKey::Flower));

    let gladiator = analysis.query(&CollectionQuery {
        search: Some("  GLADIATOR ".to_string()),
        ..CollectionQuery::default()
    });
    assert_eq!(gladiator.len(), 3);

    let by_profile = analysis.query(&CollectionQuery {
        search: Some("raiden".to_string()),
        ..CollectionQuery::default()
    });
    assert!(by_profile.iter().any(|advice| advice.item.id == items[1].id));
}

#[test]
fn query_filters_by_recommendation() {
    let items = collection();
    let analysis = Advisor::standard().analyze_collection(&items);

    let fodder = analysis.query(&CollectionQuery {
        recommendation: Some(Recommendation::Fodder),
        ..CollectionQuery::default()
    });
    assert_eq!(fodder.len(), analysis.summary.fodder_count);
    assert!(fodder
        .iter()
        .all(|advice| advice.recommendation == Recommendation::Fodder));
}

#[test]
fn query_sorts_by_set_then_keeps_input_order() {
    let items = collection();
    let analysis = Advisor::standard().analyze_collection(&items);

    let sorted = analysis.query(&CollectionQuery {
        sort: SortOrder::Set,
        ..CollectionQuery::default()
    });
    let sets: Vec<&str> = sorted.iter().map(|advice| advice.item.set_key.as_str()).collect();
    assert_eq!(
        sets,
        vec![
            "emblem-of-severed-fate",
            "emblem-of-severed-fate",
            "gladiator-s-finale",
            "gladiator-s-finale",
            "gladiator-s-finale",
            "noblesse-oblige",
            "unknown",
        ]
    );
    assert_eq!(sorted[2].item.id, items[0].id);
    assert_eq!(SortOrder::from_key("Level"), Some(SortOrder::Level));
}

#[test]
fn owned_holders_with_profiles_become_candidates() {
    let advisor = Advisor::standard().for_holders(["raiden", "paimon", "yelan", "raiden"]);
    assert_eq!(advisor.candidates(), ["raiden".to_string(), "yelan".to_string()]);

    let circlet = raiden_circlet();
    let advice = advisor.advise(&circlet);
    assert_eq!(advice.all_scores.len(), 2);
    assert_eq!(advice.best_profile_key.as_deref(), Some("raiden"));
}

#[test]
fn holders_without_profiles_keep_every_candidate() {
    let everyone = Advisor::standard().candidates().len();
    let advisor = Advisor::standard().for_holders(["paimon", "traveler-anemo"]);
    assert_eq!(advisor.candidates().len(), everyone);
    assert_eq!(Advisor::standard().for_holders(Vec::<&str>::new()).candidates().len(), everyone);
}
