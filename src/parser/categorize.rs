//! Keyword classification of log lines for the annotated output.
//!
//! Categories are checked in declaration order and the first keyword hit
//! wins, so a line mentioning both a city and a unit AI type is a `City`
//! line. Matching ignores case.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse topic of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogCategory {
    Empire,
    Team,
    City,
    EvalCity,
    Unit,
    Tech,
    EvalCityPlot,
    EvalUnit,
    EvalTech,
    EmptyLineOrIgnored,
    Unknown,
}

impl LogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogCategory::Empire => "Empire",
            LogCategory::Team => "Team",
            LogCategory::City => "City",
            LogCategory::EvalCity => "EvalCity",
            LogCategory::Unit => "Unit",
            LogCategory::Tech => "Tech",
            LogCategory::EvalCityPlot => "EvalCityPlot",
            LogCategory::EvalUnit => "EvalUnit",
            LogCategory::EvalTech => "EvalTech",
            LogCategory::EmptyLineOrIgnored => "EmptyLineOrIgnored",
            LogCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const KEYWORDS: &[(LogCategory, &[&str])] = &[
    (
        LogCategory::Empire,
        &[
            "has ", " cities", "gold rate:", "Treasury:", "tech percent", "Empire",
            "stats for turn", "Current civics:", "Num units:", "upgrade budget",
            "Total turns in anarchy", "Civic switches", "Science rate:", "Culture rate:",
            "Espionage rate:", "Total population:", "National rev index:",
            "calculates upgrade budget", "Workers in Area", "iNumSettlers", "iMaxSettlers",
            "setTurnActive for", "trade calc", "Total gold income", "Num selection groups",
            "(pre inflation)", "Inflation ef", "financial difficulties",
            "Total espionage output", "Total science output", "Total cultural output",
            "Total food output", "Total production output", " units killed", "mals subdued",
            "Gouvernement:", "Règles:", "Pouvoir:", "Militaire:", "Religion:", "Société: ",
            "Economie: ", "Bien-être:", "Monnaie:", "Travail: ", "Education: ", "Langue: ",
            "Immigration: ", "Agriculture: ", "Traitement des déchets: ",
            "ennemi a été repéré", "pour population (", "pour territoire (",
            "pour technologies (", "pour Merveilles (", "Score total =",
            "Score si victoire à ce tour", "Economy avg", "découvert une source",
            "Naissance de ", "L'âge d'or de ",
        ],
    ),
    (
        LogCategory::Team,
        &[
            "Team ", "at war with", "has met:", "Enemy power", "estimating warplan",
            "financial costs", "planning war with",
        ],
    ),
    (
        LogCategory::City,
        &[
            "City ", "founds new city", "population:", "threat level", "production:",
            "Net happyness", "Net health", "Properties:", "pushes production", "requests",
            "floating defender", "workers have:", "workers needed:",
            "Considering new production", "CalculateAllBuildingValues", "base value for",
            "final value", "fondation de", "Food surplus:", "Local rev index",
            "Maintenance: ", "Income: ", "Science: ", "Espionage: ", "Culture: ",
            " trade yield:", "Criminalité: value", "Maladie: value",
            "Pollution de L'eau: value", "Pollution de l'air: value", "PropertyBuildings:",
            " (pop ", "Maladie: ", " par les citoyens de ", "Criminalité: ",
            "ne peut pas gérer l'excédent", "Risque d'incendie:", "is modified.  We have",
            " s'est développée et est désormais considérée",
        ],
    ),
    (
        LogCategory::EvalCity,
        &[
            "base value for", "final value", "Calc value for", "Gain from immediate",
            "Estimated number of turns t", "enables ",
        ],
    ),
    (
        LogCategory::Unit,
        &[
            "Units:", "UNITAI_", "unit strength", "military units", "worker units",
            "num units", "Exp for promotion present", "a tué l'animal ", "une embuscade à",
            "et gagné la promotion", "des dommages collatéraux", "apprivoisé l'animal",
        ],
    ),
    (
        LogCategory::Tech,
        &[
            "calculate value for tech", "raw value for tech", "Civic", "Building value:",
            "tech path value", "Evaluate tech path", "Misc value:", "Corporation value:",
            "Promotion value:", "Tile improvement value:", "Build value:",
            "Bonus reveal value:", "Unit value:", "enabled civic",
        ],
    ),
    (
        LogCategory::EvalCityPlot,
        &[
            "Update City Sites", "city site", "Found City Site", "Potential best city site",
            "player modified value",
        ],
    ),
    (
        LogCategory::EvalUnit,
        &[
            "evaluate Value for unit", "Better AI Unit", "combat value", "AI_bestUnitAI",
            "Calculated value", "AI Unit not chosen", "searching for UNITAI_",
            "Retrain available",
        ],
    ),
    (
        LogCategory::EvalTech,
        &[
            "evaluate TechBuilding", "mechanism value:", "evaluating buildings for tech",
            "tech evaluation", "tech ", "discovery", "enables ",
        ],
    ),
    (
        LogCategory::EmptyLineOrIgnored,
        &[
            "No switches made", "Ignore", "dans un pays lointain !",
            "------------------------", "a adopté la doctrine ", "\t\tTurn ", " -> ",
        ],
    ),
];

/// One case-insensitive alternation per category, in table order.
fn matchers() -> &'static [(LogCategory, Regex)] {
    static MATCHERS: OnceLock<Vec<(LogCategory, Regex)>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        KEYWORDS
            .iter()
            .map(|(category, words)| {
                let alternation = words
                    .iter()
                    .map(|w| regex::escape(w))
                    .collect::<Vec<_>>()
                    .join("|");
                let re = Regex::new(&format!("(?i){alternation}"))
                    .expect("valid category keyword regex");
                (*category, re)
            })
            .collect()
    })
}

/// Classify one line of text (timestamp already removed).
pub fn categorize(text: &str) -> LogCategory {
    if text.trim().is_empty() {
        return LogCategory::EmptyLineOrIgnored;
    }
    matchers()
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(category, _)| *category)
        .unwrap_or(LogCategory::Unknown)
}
