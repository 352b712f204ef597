use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One competitor as scraped from their profile page.
///
/// The full display name is not stored here; it is the key of the
/// [`CompetitorDirectory`] entry this record lives under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
    /// Numeric profile id on the club site (`/osobni_karta/{id}`).
    pub id: u32,
    pub first_name: String,
    /// Everything after the first space in the display name; empty for
    /// single-word names.
    pub last_name: String,
}

/// Mapping from full display name to competitor record.
///
/// A BTreeMap keeps iteration and the persisted JSON deterministic across
/// runs. Two profile ids carrying the same display name collapse to one
/// entry; the last insertion wins.
pub type CompetitorDirectory = BTreeMap<String, Competitor>;

/// Look up a competitor id by first and last name.
///
/// Linear, case-insensitive exact match on both fields. The first match in
/// iteration order wins; `None` if no record matches.
pub fn resolve(first_name: &str, last_name: &str, directory: &CompetitorDirectory) -> Option<u32> {
    // Unicode lowercasing, not ASCII: Czech names carry diacritics
    let first = first_name.to_lowercase();
    let last = last_name.to_lowercase();
    directory
        .values()
        .find(|c| c.first_name.to_lowercase() == first && c.last_name.to_lowercase() == last)
        .map(|c| c.id)
}
