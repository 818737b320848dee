// crates/locsearch-core/src/model.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Monotonic tag attached to every issued lookup.
///
/// A completion is only applied when its generation still equals the
/// session's latest one. [`Generation::POISONED`] is the value a destroyed
/// session holds; no issued generation can ever equal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Nothing issued yet.
    pub const ZERO: Generation = Generation(0);
    /// Sentinel of a destroyed session.
    pub const POISONED: Generation = Generation(u64::MAX);

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The generation following `self`. Saturates below the poison value.
    pub(crate) fn next(self) -> Generation {
        Generation(self.0.saturating_add(1).min(u64::MAX - 1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// The raw input text at the moment a search is considered.
///
/// Cheap to clone; the text is shared, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(Arc<str>);

impl Query {
    pub fn new(text: impl AsRef<str>) -> Self {
        Query(Arc::from(text.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, the unit the minimum-length guard counts in.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate location returned by the lookup endpoint.
///
/// The serialized field names follow the endpoint's wire format
/// (`state`, `state_name`, `zip`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub city: String,
    /// Short region code, e.g. "CA".
    #[serde(rename = "state")]
    pub region_code: String,
    /// Full region name, e.g. "California".
    #[serde(rename = "state_name", default)]
    pub region_name: String,
    #[serde(default)]
    pub population: u64,
    #[serde(rename = "zip", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Suggestion {
    pub fn new(city: impl Into<String>, region_code: impl Into<String>) -> Self {
        Suggestion {
            city: city.into(),
            region_code: region_code.into(),
            region_name: String::new(),
            population: 0,
            postal_code: None,
        }
    }

    pub fn with_region_name(mut self, name: impl Into<String>) -> Self {
        self.region_name = name.into();
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    pub fn with_postal_code(mut self, code: impl Into<String>) -> Self {
        self.postal_code = Some(code.into());
        self
    }

    /// `"{city}, {region_code}"`, the text written back into the input on commit.
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.region_code)
    }

    /// A short badge for large cities, e.g. `"1.5M"`. `None` up to 500 000.
    pub fn population_badge(&self) -> Option<String> {
        if self.population > 500_000 {
            Some(format!("{:.1}M", self.population as f64 / 1_000_000.0))
        } else {
            None
        }
    }
}

/// An ordered result set, tagged with the generation that produced it.
///
/// Order is the backend's relevance order and is never re-sorted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionList {
    generation: Generation,
    items: Arc<[Suggestion]>,
}

impl SuggestionList {
    pub fn new(generation: Generation, items: Vec<Suggestion>) -> Self {
        SuggestionList {
            generation,
            items: items.into(),
        }
    }

    pub fn empty() -> Self {
        SuggestionList::new(Generation::ZERO, Vec::new())
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A committed choice, always derived from exactly one [`Suggestion`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectedLocation {
    pub city: String,
    pub region_code: String,
    pub region_name: String,
    pub display_label: String,
}

impl From<&Suggestion> for SelectedLocation {
    fn from(s: &Suggestion) -> Self {
        SelectedLocation {
            city: s.city.clone(),
            region_code: s.region_code.clone(),
            region_name: s.region_name.clone(),
            display_label: s.label(),
        }
    }
}
