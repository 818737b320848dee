// crates/locsearch-core/src/lookup/dataset.rs
use super::Lookup;
use crate::error::{Error, LookupError, Result};
use crate::model::Suggestion;
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Convert a string into a folded key for prefix comparison:
/// transliterate to ASCII (`Łódź` -> `Lodz`), then lowercase.
pub(crate) fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

#[derive(Debug, Clone)]
struct Entry {
    suggestion: Suggestion,
    city_key: String,
    region_key: String,
}

/// In-process lookup over a fixed list of suggestions.
///
/// Matches a folded prefix of the city or region name, or the region code
/// exactly. Entries are kept ordered by population, largest first, so the
/// answer is already in relevance order.
#[derive(Debug, Clone, Default)]
pub struct DatasetLookup {
    entries: Vec<Entry>,
}

impl DatasetLookup {
    pub fn new(suggestions: Vec<Suggestion>) -> Self {
        let mut entries: Vec<Entry> = suggestions
            .into_iter()
            .map(|s| Entry {
                city_key: fold_key(&s.city),
                region_key: fold_key(&s.region_name),
                suggestion: s,
            })
            .collect();
        // Stable: equal populations keep file order.
        entries.sort_by(|a, b| b.suggestion.population.cmp(&a.suggestion.population));
        DatasetLookup { entries }
    }

    /// Loads a JSON array of suggestions (`.json`, or `.json.gz` with the
    /// `compact` feature).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = open_stream(path.as_ref())?;
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(s)?))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Synchronous form of [`Lookup::lookup`].
    pub fn search(&self, q: &str, limit: usize) -> Vec<Suggestion> {
        let key = fold_key(q.trim());
        if key.is_empty() {
            return Vec::new();
        }
        let code = q.trim();

        self.entries
            .iter()
            .filter(|e| {
                e.city_key.starts_with(&key)
                    || e.region_key.starts_with(&key)
                    || e.suggestion.region_code.eq_ignore_ascii_case(code)
            })
            .take(limit)
            .map(|e| e.suggestion.clone())
            .collect()
    }
}

#[async_trait]
impl Lookup for DatasetLookup {
    async fn lookup(&self, q: &str, limit: usize) -> std::result::Result<Vec<Suggestion>, LookupError> {
        Ok(self.search(q, limit))
    }
}

/// Opens a file, buffers it, and unwraps gzip when the name ends in `.gz`.
fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            Error::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
        }
        _ => Error::Io(e),
    })?;
    let reader = BufReader::new(file);

    let gzipped = path.extension().is_some_and(|ext| ext == "gz");
    if !gzipped {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        use flate2::read::GzDecoder;
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(Error::InvalidConfig(format!(
            "{} is gzipped but 'compact' is disabled",
            path.display()
        )))
    }
}
