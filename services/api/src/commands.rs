use crate::infra::{build_advisor, parse_recommendation, parse_slot, parse_sort};
use artifact_advisor::advisor::{
    write_advice_csv, Advisor, CollectionQuery, CollectionSummary, HolderBuildSummary,
    ItemAdvice, ProfileDatabase, Recommendation, SortOrder, UpgradeSuggestion,
};
use artifact_advisor::config::{AnalysisConfig, AppConfig};
use artifact_advisor::error::AppError;
use artifact_advisor::inventory::{
    format_set_name, format_stat_value, validate, CanonicalItem, ImportedInventory,
    InventoryImporter, SlotKey, ValidationReport,
};
use clap::Args;
use serde_json::Value;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Portable export (JSON) to check
    #[arg(long)]
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Showcase or portable export (JSON) to analyze
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Restrict scoring to these profile keys (repeatable)
    #[arg(long = "profile")]
    pub(crate) profiles: Vec<String>,
    /// Only list items with this recommendation
    #[arg(long, value_parser = parse_recommendation)]
    pub(crate) recommendation: Option<Recommendation>,
    /// Only list items in this slot
    #[arg(long, value_parser = parse_slot)]
    pub(crate) slot: Option<SlotKey>,
    /// Case-insensitive match on set, main stat or best profile
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Order of the item listing: score, level or set
    #[arg(long, value_parser = parse_sort)]
    pub(crate) sort: Option<SortOrder>,
    /// Maximum number of items to print (0 prints all)
    #[arg(long, default_value_t = 20)]
    pub(crate) limit: usize,
    /// Write the listed items to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct UpgradeArgs {
    /// Showcase or portable export (JSON) holding the character and inventory
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Character key, e.g. raiden
    #[arg(long)]
    pub(crate) holder: String,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.file)?;
    // Unparseable text is reported the same way as an empty payload.
    let payload = serde_json::from_str::<Value>(&raw).unwrap_or(Value::Null);
    let report = validate(&payload);
    render_validation(&args.file, &report);
    Ok(())
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        file,
        profiles,
        recommendation,
        slot,
        search,
        sort,
        limit,
        csv,
    } = args;

    let config = AppConfig::load()?;
    let (inventory, advisor) = load_for_analysis(&file, &config.analysis, &profiles)?;
    let analysis = advisor.analyze_collection(&inventory.items);

    render_inventory_header(&inventory);
    render_summary(&analysis.summary);

    let query = CollectionQuery {
        recommendation,
        slot,
        search,
        sort: sort.unwrap_or_default(),
    };
    let listed = analysis.query(&query);
    render_item_listing(&listed, limit);

    if let Some(path) = csv {
        let writer = File::create(&path)?;
        write_advice_csv(&listed, writer)?;
        println!("\nWrote {} rows to {}", listed.len(), path.display());
    }

    Ok(())
}

fn load_for_analysis(
    file: &Path,
    config: &AnalysisConfig,
    profiles: &[String],
) -> Result<(ImportedInventory, Advisor<'static>), AppError> {
    let inventory = InventoryImporter::from_path(file)?;
    let advisor = build_advisor(config, profiles, &inventory);
    Ok((inventory, advisor))
}

pub(crate) fn run_upgrades(args: UpgradeArgs) -> Result<(), AppError> {
    let holder = args.holder.trim().to_ascii_lowercase();
    let inventory = InventoryImporter::from_path(&args.file)?;
    let advisor = Advisor::standard();
    let equipped = inventory.equipped_items(&holder);

    render_inventory_header(&inventory);
    if inventory.holder(&holder).is_none() {
        println!("Character '{holder}' is not in this inventory; treating every slot as empty");
    }

    match advisor.holder_build(&holder, &equipped) {
        Some(build) => render_build(&build),
        None => {
            println!("No build profile for '{holder}'");
            return Ok(());
        }
    }

    let suggestions = advisor.suggest_upgrades(&holder, &equipped, &inventory.items);
    render_suggestions(&suggestions);
    Ok(())
}

pub(crate) fn run_profiles() -> Result<(), AppError> {
    println!("Build profiles");
    for profile in ProfileDatabase::standard().list_profiles() {
        let sets: Vec<String> = profile
            .preferred_sets
            .iter()
            .map(|set| format_set_name(set))
            .collect();
        println!(
            "- {} ({}): {} {} | sets {}",
            profile.display_name,
            profile.key,
            profile.element.label(),
            profile.weapon_class.label(),
            sets.join(", ")
        );
        for (slot, stats) in &profile.preferred_main_stats {
            let labels: Vec<&str> = stats.iter().map(|stat| stat.label()).collect();
            println!("    {}: {}", slot.label(), labels.join(" / "));
        }
        println!("    {}", profile.notes);
    }
    Ok(())
}

fn render_validation(path: &Path, report: &ValidationReport) {
    println!("Validation of {}", path.display());
    println!(
        "Status: {}",
        if report.valid { "valid" } else { "invalid" }
    );
    println!(
        "Artifacts {} | Characters {} | Weapons {}",
        report.stats.artifact_count, report.stats.character_count, report.stats.weapon_count
    );

    if !report.errors.is_empty() {
        println!("\nErrors");
        for error in &report.errors {
            println!("- {error}");
        }
    }
    if !report.warnings.is_empty() {
        println!("\nWarnings");
        for warning in &report.warnings {
            println!("- {warning}");
        }
    }
}

fn render_inventory_header(inventory: &ImportedInventory) {
    println!(
        "Inventory from {} (format version {})",
        inventory.source_label, inventory.version
    );
    if let Some(player) = &inventory.player {
        println!(
            "Player {} | AR {} | WL {}",
            player.nickname, player.level, player.world_level
        );
    }
    println!(
        "{} characters | {} artifacts",
        inventory.holders.len(),
        inventory.items.len()
    );
    for warning in &inventory.warnings {
        println!("! {warning}");
    }
}

fn render_summary(summary: &CollectionSummary<'_>) {
    println!("\nRecommendations ({} artifacts)", summary.total);
    for entry in &summary.by_recommendation {
        println!("- {}: {}", entry.label, entry.count);
    }

    println!("\nTiers");
    for entry in &summary.by_tier {
        println!("- {} ({}): {}", entry.tier.label(), entry.description, entry.count);
    }

    if !summary.top_items.is_empty() {
        println!("\nTop artifacts");
        for advice in &summary.top_items {
            println!("- {}", describe_advice(advice));
        }
    }
}

fn render_item_listing(listed: &[&ItemAdvice<'_>], limit: usize) {
    if listed.is_empty() {
        println!("\nNo artifacts match the filters");
        return;
    }

    let shown = if limit == 0 { listed.len() } else { limit.min(listed.len()) };
    println!("\nArtifacts ({shown} of {})", listed.len());
    for advice in listed.iter().take(shown) {
        println!("- {}", describe_advice(advice));
        if !advice.item.substats.is_empty() {
            let substats: Vec<String> = advice
                .item
                .substats
                .iter()
                .map(|line| format!("{} {}", line.key.label(), format_stat_value(&line.key, line.value)))
                .collect();
            println!("    {}", substats.join(", "));
        }
    }
}

fn render_build(build: &HolderBuildSummary<'_>) {
    println!(
        "\n{} build score: {:.1}/100 ({} - {})",
        build.display_name,
        build.average_score,
        build.average_tier.label(),
        build.average_tier.description()
    );
    for entry in &build.slots {
        match (entry.item, &entry.score) {
            (Some(item), Some(score)) => println!(
                "- {}: {} | {:.1} ({})",
                entry.slot_label,
                describe_item(item),
                score.score,
                score.tier.label()
            ),
            _ => println!("- {}: empty", entry.slot_label),
        }
    }
}

fn render_suggestions(suggestions: &[UpgradeSuggestion<'_>]) {
    if suggestions.is_empty() {
        println!("\nUpgrades: none found in the inventory");
        return;
    }

    println!("\nUpgrades");
    for suggestion in suggestions {
        println!(
            "- {}: {} scores {:.1} (+{:.1})",
            suggestion.slot_label,
            describe_item(suggestion.suggestion),
            suggestion.suggestion_score.score,
            suggestion.improvement
        );
        if let Some(current) = suggestion.current {
            println!(
                "    replaces {} at {:.1}",
                describe_item(current),
                suggestion.current_score.score
            );
        }
    }
}

fn describe_advice(advice: &ItemAdvice<'_>) -> String {
    let best = match &advice.best_profile_key {
        Some(key) => format!("best for {key}"),
        None => "no matching build".to_string(),
    };
    format!(
        "{} | {:.1} {} | {} | {}",
        describe_item(advice.item),
        advice.best_score.score,
        advice.best_score.tier.label(),
        advice.recommendation.label(),
        best
    )
}

fn describe_item(item: &CanonicalItem) -> String {
    let main_stat = item
        .main_stat
        .as_ref()
        .map(|main| format!("{} {}", main.key.label(), format_stat_value(&main.key, main.value)))
        .unwrap_or_else(|| "no main stat".to_string());
    format!(
        "{} {} +{} ({})",
        format_set_name(&item.set_key),
        item.slot_key.label(),
        item.level,
        main_stat
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_advisor::inventory::ImportError;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../tests/fixtures")
            .join(name)
    }

    #[test]
    fn analysis_scores_owned_characters_by_default() {
        let (inventory, advisor) = load_for_analysis(
            &fixture("portable_export.json"),
            &AnalysisConfig::default(),
            &[],
        )
        .expect("fixture loads");

        assert_eq!(advisor.candidates(), ["raiden".to_string(), "yelan".to_string()]);
        let analysis = advisor.analyze_collection(&inventory.items);
        assert!(analysis
            .results
            .iter()
            .filter_map(|advice| advice.best_profile_key.as_deref())
            .all(|key| key == "raiden" || key == "yelan"));
    }

    #[test]
    fn profile_flags_replace_owned_characters() {
        let (_, advisor) = load_for_analysis(
            &fixture("showcase_profile.json"),
            &AnalysisConfig::default(),
            &["Furina".to_string()],
        )
        .expect("fixture loads");
        assert_eq!(advisor.candidates(), ["furina".to_string()]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_for_analysis(&fixture("absent.json"), &AnalysisConfig::default(), &[])
            .expect_err("file is missing");
        assert!(matches!(err, AppError::Import(ImportError::Io(_))));
    }
}
