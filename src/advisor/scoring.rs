use super::profiles::{Profile, ProfileDatabase};
use crate::inventory::domain::{CanonicalItem, StatKey};
use serde::Serialize;

/// Weighted roll value of a "perfect" item: nine max rolls into weight-1 stats.
pub const PERFECT_ROLL_CEILING: f64 = 9.0;
const WRONG_MAIN_STAT_FACTOR: f64 = 0.5;
const SET_MATCH_FACTOR: f64 = 1.1;

/// Quality bucket derived from a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Tier {
    pub const fn ordered() -> [Tier; 6] {
        [Tier::S, Tier::A, Tier::B, Tier::C, Tier::D, Tier::F]
    }

    /// Inclusive lower bounds, checked highest first.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Tier::S
        } else if score >= 65.0 {
            Tier::A
        } else if score >= 50.0 {
            Tier::B
        } else if score >= 35.0 {
            Tier::C
        } else if score >= 20.0 {
            Tier::D
        } else {
            Tier::F
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
            Tier::F => "F",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Tier::S => "God Roll",
            Tier::A => "Excellent",
            Tier::B => "Good",
            Tier::C => "Average",
            Tier::D => "Below Average",
            Tier::F => "Fodder",
        }
    }
}

/// One substat's share of the weighted roll value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstatContribution {
    pub key: StatKey,
    pub value: f64,
    pub roll_value: f64,
    pub weight: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: f64,
    pub tier: Tier,
    pub breakdown: Vec<SubstatContribution>,
    pub main_stat_match: bool,
    pub set_match: bool,
    pub total_weighted_roll_value: f64,
}

impl ScoreResult {
    /// Zero score used for missing profiles and empty slots.
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            tier: Tier::F,
            breakdown: Vec::new(),
            main_stat_match: false,
            set_match: false,
            total_weighted_roll_value: 0.0,
        }
    }
}

/// Stateless scorer over a profile table.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactScorer<'a> {
    profiles: &'a ProfileDatabase,
}

impl ArtifactScorer<'static> {
    pub fn standard() -> Self {
        Self::new(ProfileDatabase::standard())
    }
}

impl<'a> ArtifactScorer<'a> {
    pub fn new(profiles: &'a ProfileDatabase) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &'a ProfileDatabase {
        self.profiles
    }

    pub fn score(&self, item: &CanonicalItem, profile_key: &str) -> ScoreResult {
        match self.profiles.get_profile(profile_key) {
            Some(profile) => score_against(item, profile),
            None => ScoreResult::empty(),
        }
    }
}

/// Substat value in units of its largest single roll; 0 for attributes
/// without a roll ceiling.
pub fn roll_value(stat: &StatKey, value: f64) -> f64 {
    match stat.max_roll() {
        Some(max_roll) => value / max_roll,
        None => 0.0,
    }
}

pub fn score_against(item: &CanonicalItem, profile: &Profile) -> ScoreResult {
    let breakdown: Vec<SubstatContribution> = item
        .substats
        .iter()
        .map(|line| {
            let roll_value = roll_value(&line.key, line.value);
            let weight = profile.weight(&line.key);
            SubstatContribution {
                key: line.key.clone(),
                value: line.value,
                roll_value,
                weight,
                contribution: roll_value * weight,
            }
        })
        .collect();
    let total_weighted_roll_value: f64 = breakdown.iter().map(|entry| entry.contribution).sum();

    let mut score = (total_weighted_roll_value / PERFECT_ROLL_CEILING * 100.0).min(100.0);

    // Flower and plume carry no main-stat preferences and always match.
    let main_stat_match = match profile.main_stats_for(item.slot_key) {
        Some(preferred) => item
            .main_stat
            .as_ref()
            .is_some_and(|main| preferred.contains(&main.key)),
        None => true,
    };
    if item.slot_key.has_variable_main_stat() && !main_stat_match {
        score *= WRONG_MAIN_STAT_FACTOR;
    }

    let set_match = profile.recommends_set(&item.set_key);
    if set_match {
        score = (score * SET_MATCH_FACTOR).min(100.0);
    }

    let score = round_tenth(score.max(0.0));

    ScoreResult {
        score,
        tier: Tier::from_score(score),
        breakdown,
        main_stat_match,
        set_match,
        total_weighted_roll_value,
    }
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
