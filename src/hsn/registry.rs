//! HSN code registry

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use super::data::builtin_entries;
use crate::traits::HsnLookup;
use crate::types::{GstError, GstRate, GstResult, HsnCodeEntry};
use crate::utils::{is_ascii_digits, words};

/// Code lengths in use: chapter, heading, sub-heading, tariff item
pub const HSN_CODE_LENGTHS: [usize; 4] = [2, 4, 6, 8];

const STOP_WORDS: [&str; 6] = ["and", "of", "the", "with", "for", "in"];

/// Whether `code` is a well-formed HSN code
pub fn validate_hsn_format(code: &str) -> bool {
    is_ascii_digits(code) && HSN_CODE_LENGTHS.contains(&code.len())
}

/// Immutable table of HSN codes
///
/// Built once and then only read, so it can be shared between threads behind
/// an `Arc`. Entries keep their registration order; when a code is registered
/// more than once, lookups return the first registration.
#[derive(Debug, Clone)]
pub struct HsnRegistry {
    entries: Vec<HsnCodeEntry>,
    first_by_code: HashMap<String, usize>,
}

impl HsnRegistry {
    /// Build a registry from entries, validating each one
    pub fn new(entries: Vec<HsnCodeEntry>) -> GstResult<Self> {
        for entry in &entries {
            validate_entry(entry)?;
        }
        Ok(Self::index_entries(entries))
    }

    /// Registry over the built-in retail table
    ///
    /// The table is checked by the test suite rather than on every call.
    pub fn builtin() -> Self {
        Self::index_entries(builtin_entries())
    }

    fn index_entries(entries: Vec<HsnCodeEntry>) -> Self {
        let mut first_by_code = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if first_by_code.contains_key(&entry.code) {
                warn!(
                    code = %entry.code,
                    description = %entry.description,
                    "duplicate HSN code, lookups resolve to the first registration"
                );
            } else {
                first_by_code.insert(entry.code.clone(), index);
            }
        }

        debug!(entries = entries.len(), "HSN registry loaded");

        Self {
            entries,
            first_by_code,
        }
    }

    /// Load a registry from a JSON array of entries
    pub fn from_json(json: &str) -> GstResult<Self> {
        let entries: Vec<HsnCodeEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Entry for an HSN code
    ///
    /// Any code without an entry is `HsnNotFound`, whatever its shape; the
    /// format rules apply only when entries are registered.
    pub fn lookup_by_code(&self, code: &str) -> GstResult<&HsnCodeEntry> {
        self.lookup(code)
            .ok_or_else(|| GstError::HsnNotFound(code.to_string()))
    }

    /// GST slab for an HSN code
    pub fn rate_for_code(&self, code: &str) -> GstResult<GstRate> {
        self.lookup_by_code(code).map(|entry| entry.gst_rate)
    }

    /// Entries whose description contains `query`, case-insensitively
    ///
    /// Ordered by relevance: exact description, then description prefix, then
    /// whole-word match, then any substring. Equal relevance keeps registration
    /// order. A blank query matches nothing.
    pub fn search_by_description(&self, query: &str) -> Vec<&HsnCodeEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &HsnCodeEntry)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                description_relevance(&entry.description, &query).map(|r| (r, entry))
            })
            .collect();

        matches.sort_by_key(|(relevance, _)| *relevance);
        matches.into_iter().map(|(_, entry)| entry).collect()
    }

    /// Entries in a tariff chapter, in registration order
    pub fn by_chapter(&self, chapter: &str) -> Vec<&HsnCodeEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.chapter == chapter)
            .collect()
    }

    /// Distinct chapters in ascending order
    pub fn chapters(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.chapter.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Best-effort HSN candidates for a product name
    ///
    /// Words of the product name are matched against each entry's description
    /// words and keywords. Entries are ordered by number of matching words,
    /// then by registration order. Returns an empty list when nothing matches.
    pub fn suggest(&self, product_name: &str) -> Vec<&HsnCodeEntry> {
        let name_words: Vec<String> = words(product_name)
            .into_iter()
            .filter(|w| is_significant(w))
            .collect();
        if name_words.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &HsnCodeEntry)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = suggestion_score(entry, &name_words);
                (score > 0).then_some((score, entry))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, entry)| entry).collect()
    }

    /// All entries in registration order
    pub fn entries(&self) -> &[HsnCodeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HsnRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HsnLookup for HsnRegistry {
    fn lookup(&self, code: &str) -> Option<&HsnCodeEntry> {
        self.first_by_code
            .get(code)
            .and_then(|&index| self.entries.get(index))
    }
}

fn validate_entry(entry: &HsnCodeEntry) -> GstResult<()> {
    if !validate_hsn_format(&entry.code) {
        return Err(GstError::InvalidHsnCode(format!(
            "'{}' must be 2, 4, 6 or 8 digits",
            entry.code
        )));
    }

    if entry.chapter != entry.code[..2] {
        return Err(GstError::InvalidHsnCode(format!(
            "'{}' is registered under chapter '{}'",
            entry.code, entry.chapter
        )));
    }

    if entry.description.trim().is_empty() {
        return Err(GstError::InvalidHsnCode(format!(
            "'{}' has an empty description",
            entry.code
        )));
    }

    Ok(())
}

/// Lower is more relevant; `None` when the description does not contain the query
fn description_relevance(description: &str, query: &str) -> Option<u8> {
    let description = description.to_lowercase();
    if description == query {
        Some(0)
    } else if description.starts_with(query) {
        Some(1)
    } else if words(&description).iter().any(|w| w == query) {
        Some(2)
    } else if description.contains(query) {
        Some(3)
    } else {
        None
    }
}

fn is_significant(word: &str) -> bool {
    word.len() >= 2 && !is_ascii_digits(word) && !STOP_WORDS.contains(&word)
}

fn suggestion_score(entry: &HsnCodeEntry, name_words: &[String]) -> usize {
    let mut vocabulary: Vec<String> = words(&entry.description)
        .into_iter()
        .filter(|w| is_significant(w))
        .collect();
    vocabulary.extend(entry.keywords.iter().map(|k| k.to_lowercase()));

    name_words
        .iter()
        .filter(|name_word| vocabulary.iter().any(|v| same_word(name_word, v)))
        .count()
}

/// Equal, or equal up to a trailing plural "s"
fn same_word(a: &str, b: &str) -> bool {
    a == b || a.strip_suffix('s') == Some(b) || b.strip_suffix('s') == Some(a)
}
