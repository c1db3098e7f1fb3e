//! Care-frequency text to interval heuristic

/// Interval used when the text matches no known phrase
pub const DEFAULT_SPECIES_INTERVAL_DAYS: u32 = 7;

/// Phrase groups checked in order; the first group with a match wins.
///
/// Order matters because the checks are substring containment: "bi-weekly"
/// contains "weekly" and so must be tested before the weekly group.
const FREQUENCY_PATTERNS: &[(&[&str], u32)] = &[
    (&["daily", "every day"], 1),
    (&["every other day", "every 2 days"], 2),
    (&["2-3 times per week", "twice a week"], 3),
    (&["every 3-4 days"], 4),
    (&["every 2 weeks", "bi-weekly", "biweekly", "every two weeks"], 14),
    (&["every 1-2 weeks"], 10),
    (&["weekly", "once a week", "every week"], 7),
    (&["every 2-3 weeks"], 18),
    (&["every 2-4 weeks"], 21),
    (&["every 3 weeks"], 21),
    (&["monthly", "once a month", "every month"], 30),
    (&["every 4-6 weeks"], 35),
    (&["every 6 weeks"], 42),
];

/// Suggest a watering interval from a free-text care description such as
/// "Water every 2-3 weeks, allowing soil to dry".
///
/// The result is only a suggestion; unrecognized text yields
/// [`DEFAULT_SPECIES_INTERVAL_DAYS`].
pub fn suggest_interval_from_species(text: &str) -> u32 {
    let text = text.to_lowercase();
    FREQUENCY_PATTERNS
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|p| text.contains(p)))
        .map(|(_, days)| *days)
        .unwrap_or(DEFAULT_SPECIES_INTERVAL_DAYS)
}
