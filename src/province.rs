//! Provinces and territories, named the way the backend stores them.

use crate::text::fold;

/// Postal code and backend name of each province and territory.
pub const PROVINCES: [(&str, &str); 13] = [
    ("ON", "Ontario"),
    ("QC", "Québec"),
    ("BC", "Colombie-Britannique"),
    ("AB", "Alberta"),
    ("MB", "Manitoba"),
    ("SK", "Saskatchewan"),
    ("NS", "Nouvelle-Écosse"),
    ("NB", "Nouveau-Brunswick"),
    ("NL", "Terre-Neuve-et-Labrador"),
    ("PE", "Île-du-Prince-Édouard"),
    ("YT", "Yukon"),
    ("NT", "Territoires du Nord-Ouest"),
    ("NU", "Nunavut"),
];

/// Resolve a postal code or a loosely spelled name to the backend name.
///
/// Unknown input is passed through trimmed.
pub fn resolve(input: &str) -> String {
    let key = fold(input);
    PROVINCES
        .iter()
        .find(|(code, name)| code.eq_ignore_ascii_case(&key) || fold(name) == key)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| input.trim().to_string())
}

/// File-name-safe key for a province name.
pub fn slug(name: &str) -> String {
    fold(name)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
