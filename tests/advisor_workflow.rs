use artifact_advisor::advisor::{
    write_advice_csv, Advisor, CollectionQuery, Recommendation, SortOrder, Tier,
};
use artifact_advisor::inventory::{ImportedInventory, InventoryImporter, SlotKey};

const PORTABLE: &[u8] = include_bytes!("fixtures/portable_export.json");
const SHOWCASE: &[u8] = include_bytes!("fixtures/showcase_profile.json");

fn portable() -> ImportedInventory {
    InventoryImporter::from_reader(PORTABLE).expect("portable fixture imports")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn single_profile_analysis_is_deterministic() {
    let inventory = portable();
    let advisor = Advisor::standard().with_candidates(["raiden"]);
    let analysis = advisor.analyze_collection(&inventory.items);

    let scores: Vec<f64> = analysis
        .results
        .iter()
        .map(|advice| advice.best_score.score)
        .collect();
    assert_eq!(scores.len(), 4);
    assert_close(scores[0], 23.8);
    assert_close(scores[1], 78.2);
    assert_close(scores[2], 48.9);
    assert_close(scores[3], 0.0);

    let recommendations: Vec<Recommendation> = analysis
        .results
        .iter()
        .map(|advice| advice.recommendation)
        .collect();
    assert_eq!(
        recommendations,
        vec![
            Recommendation::Fodder,
            Recommendation::Keep,
            Recommendation::Potential,
            Recommendation::Fodder,
        ]
    );

    // A zero score never displaces the empty starting point.
    assert!(analysis.results[3].best_profile_key.is_none());
    assert_eq!(analysis.results[1].best_profile_key.as_deref(), Some("raiden"));
    assert_eq!(analysis.results[1].best_score.tier, Tier::A);
    assert!(analysis.results[1].best_score.set_match);
    assert!(analysis.results[1].best_score.main_stat_match);

    let summary = &analysis.summary;
    assert_eq!(summary.total, 4);
    assert_eq!(summary.fodder_count, 2);
    assert_eq!(summary.count_for(Recommendation::Keep), 1);
    assert_eq!(summary.count_for(Recommendation::BestInSlot), 0);
    assert_eq!(summary.top_items.len(), 4);
    assert_close(summary.top_items[0].best_score.score, 78.2);
}

#[test]
fn every_profile_is_scored_when_no_candidates_are_configured() {
    let inventory = portable();
    let advisor = Advisor::standard();
    let analysis = advisor.analyze_collection(&inventory.items);

    for advice in &analysis.results {
        assert_eq!(advice.all_scores.len(), advisor.candidates().len());
    }

    let spare = &analysis.results[1];
    assert!(spare.best_score.score >= 78.2);
    assert!(matches!(
        spare.recommendation,
        Recommendation::BestInSlot | Recommendation::Keep
    ));
    assert_eq!(analysis.summary.top_items[0].item.id, spare.item.id);
    assert_eq!(analysis.results[3].recommendation, Recommendation::Fodder);
}

#[test]
fn queries_filter_and_reorder_results() {
    let inventory = portable();
    let advisor = Advisor::standard().with_candidates(["raiden"]);
    let analysis = advisor.analyze_collection(&inventory.items);

    let circlets = analysis.query(&CollectionQuery {
        slot: Some(SlotKey::Circlet),
        ..CollectionQuery::default()
    });
    assert_eq!(circlets.len(), 2);
    assert_close(circlets[0].best_score.score, 78.2);

    let fodder = analysis.query(&CollectionQuery {
        recommendation: Some(Recommendation::Fodder),
        ..CollectionQuery::default()
    });
    assert_eq!(fodder.len(), 2);

    let gladiator = analysis.query(&CollectionQuery {
        search: Some("  GLADIATOR ".to_string()),
        ..CollectionQuery::default()
    });
    assert_eq!(gladiator.len(), 1);
    assert_eq!(gladiator[0].item.slot_key, SlotKey::Flower);

    let by_set = analysis.query(&CollectionQuery {
        sort: SortOrder::Set,
        ..CollectionQuery::default()
    });
    assert_eq!(by_set[0].item.set_key, "emblem-of-severed-fate");
    assert_eq!(by_set[3].item.set_key, "gladiator-s-finale");
}

#[test]
fn upgrades_rank_spare_items_by_improvement() {
    let inventory = portable();
    let advisor = Advisor::standard();
    let equipped = inventory.equipped_items("raiden");

    let suggestions = advisor.suggest_upgrades("raiden", &equipped, &inventory.items);
    assert_eq!(suggestions.len(), 2);

    assert_eq!(suggestions[0].slot, SlotKey::Circlet);
    assert_eq!(suggestions[0].current.map(|item| &item.id), Some(&inventory.items[0].id));
    assert_eq!(suggestions[0].suggestion.id, inventory.items[1].id);
    assert_close(suggestions[0].improvement, 54.4);

    // The empty sands slot takes another holder's piece.
    assert_eq!(suggestions[1].slot, SlotKey::Sands);
    assert!(suggestions[1].current.is_none());
    assert_eq!(suggestions[1].suggestion.location.as_deref(), Some("yelan"));
    assert_close(suggestions[1].improvement, 48.9);
}

#[test]
fn upgrades_for_holders_without_a_profile_are_empty() {
    let inventory = portable();
    let advisor = Advisor::standard();
    let suggestions = advisor.suggest_upgrades("paimon", &[], &inventory.items);
    assert!(suggestions.is_empty());
    assert!(advisor.holder_build("paimon", &[]).is_none());
}

#[test]
fn holder_build_averages_occupied_slots() {
    let inventory = InventoryImporter::from_reader(SHOWCASE).expect("showcase imports");
    let advisor = Advisor::standard();
    let equipped = inventory.equipped_items("raiden");

    let build = advisor
        .holder_build("raiden", &equipped)
        .expect("raiden has a profile");
    assert_eq!(build.display_name, "Raiden Shogun");
    assert_eq!(build.equipped_count, 2);
    assert_eq!(build.slots.len(), 5);

    let circlet = build
        .slots
        .iter()
        .find(|slot| slot.slot == SlotKey::Circlet)
        .and_then(|slot| slot.score.as_ref())
        .expect("circlet scored");
    assert_close(circlet.score, 56.8);
    assert_eq!(circlet.tier, Tier::B);

    // Wrong sands main stat halves the score before the set bonus.
    let sands = build
        .slots
        .iter()
        .find(|slot| slot.slot == SlotKey::Sands)
        .and_then(|slot| slot.score.as_ref())
        .expect("sands scored");
    assert!(!sands.main_stat_match);
    assert_close(sands.score, 6.1);

    assert!(build.average_score > 31.3 && build.average_score < 31.6);
    assert_eq!(build.average_tier, Tier::D);
}

#[test]
fn csv_export_writes_header_and_one_row_per_item() {
    let inventory = portable();
    let advisor = Advisor::standard().with_candidates(["raiden"]);
    let analysis = advisor.analyze_collection(&inventory.items);
    let rows = analysis.query(&CollectionQuery::default());

    let mut buffer = Vec::new();
    write_advice_csv(&rows, &mut buffer).expect("csv written");
    let text = String::from_utf8(buffer).expect("utf-8 output");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "Item,Set,Slot,Level,Rarity,Main Stat,Best Profile,Score,Tier,Recommendation"
    );
    assert_eq!(lines.len(), 5);
    assert!(lines[1].contains("78.2"));
    assert!(lines[1].contains("Keep"));
}
