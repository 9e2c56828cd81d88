//! Ticker reference table and free-text symbol resolution.

use csv::ReaderBuilder;
use daytrader_core::error::DataError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One row of the ticker table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEntry {
    #[serde(alias = "Name")]
    pub name: String,
    /// Free-form alternative names, as written in the table
    #[serde(alias = "Synonyme", alias = "Synonyms", default)]
    pub synonyms: String,
    #[serde(alias = "YahooTicker", alias = "Symbol", alias = "ticker")]
    pub symbol: String,
}

impl TickerEntry {
    pub fn new(
        name: impl Into<String>,
        synonyms: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            synonyms: synonyms.into(),
            symbol: symbol.into(),
        }
    }

    /// Case-insensitive containment of a lowercase needle in any column.
    fn contains(&self, needle: &str) -> bool {
        [&self.name, &self.synonyms, &self.symbol]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Exact-name shortcuts checked before the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolOverrides(BTreeMap<String, String>);

impl SymbolOverrides {
    /// Names the table matches poorly or not at all.
    pub fn builtin() -> Self {
        [
            ("renk group", "RENK.DE"),
            ("rheinmetall", "RHM.DE"),
            ("hims & hers", "HIMS"),
            ("boeing", "BA"),
            ("allianz", "ALV.DE"),
            ("münchner rück", "MUV2.DE"),
            ("münchener rück", "MUV2.DE"),
            ("thales", "HO.PA"),
            ("hensoldt", "HAG.DE"),
            ("porsche", "P911.DE"),
            ("mercedes", "MBG.DE"),
            ("hellofresh", "HFG.DE"),
            ("rolls royce", "RR.L"),
            ("heidelberg", "HDD.DE"),
            ("heidelberger druck", "HDD.DE"),
            ("byd", "1211.HK"),
            ("e.on", "EOAN.DE"),
            ("eon", "EOAN.DE"),
            ("deutsche bank", "DBK.DE"),
            ("deutsche börse", "DB1.DE"),
            ("novo nordisk", "NVO"),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, symbol: impl Into<String>) {
        self.0
            .insert(name.as_ref().trim().to_lowercase(), symbol.into());
    }

    /// Add every entry of `other`, replacing existing names.
    pub fn extend(&mut self, other: &SymbolOverrides) {
        for (name, symbol) in &other.0 {
            self.insert(name, symbol.clone());
        }
    }

    pub fn get(&self, query: &str) -> Option<&str> {
        self.0.get(&query.trim().to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for SymbolOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = SymbolOverrides::default();
        for (name, symbol) in iter {
            overrides.insert(name, symbol);
        }
        overrides
    }
}

/// How to treat a query that matches several table rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disambiguation {
    /// Take the first match in table order
    #[default]
    First,
    /// Analyze every match
    All,
    /// Let the user pick from the candidates
    Prompt,
}

/// How a resolved symbol was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedVia {
    Override,
    ExactSymbol,
    Table,
}

/// Result of resolving a free-text query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Resolved { symbol: String, via: ResolvedVia },
    /// Nothing matched; the query itself is used as the symbol
    Fallback(String),
    /// Several rows matched and the strategy did not pick one
    Candidates(Vec<TickerEntry>),
}

impl Resolution {
    /// Symbols to analyze for this resolution.
    pub fn symbols(&self) -> Vec<String> {
        match self {
            Resolution::Resolved { symbol, .. } => vec![symbol.clone()],
            Resolution::Fallback(symbol) => vec![symbol.clone()],
            Resolution::Candidates(entries) => {
                entries.iter().map(|e| e.symbol.clone()).collect()
            }
        }
    }
}

/// Read-only ticker table with its overrides.
#[derive(Debug, Clone, Default)]
pub struct TickerTable {
    entries: Vec<TickerEntry>,
    overrides: SymbolOverrides,
}

impl TickerTable {
    pub fn new(entries: Vec<TickerEntry>) -> Self {
        Self {
            entries,
            overrides: SymbolOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: SymbolOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load a table from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        debug!(path = %path.display(), entries = table.len(), "Loaded ticker table");
        Ok(table)
    }

    /// Parse a table from CSV text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (line, result) in reader.deserialize().enumerate() {
            let entry: TickerEntry = result
                .map_err(|e| DataError::Parse(format!("ticker table row {}: {}", line + 2, e)))?;
            if entry.symbol.is_empty() {
                return Err(DataError::Parse(format!(
                    "ticker table row {}: empty symbol",
                    line + 2
                )));
            }
            entries.push(entry);
        }

        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[TickerEntry] {
        &self.entries
    }

    pub fn overrides(&self) -> &SymbolOverrides {
        &self.overrides
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows whose name, synonyms or symbol contain the query, in table order.
    pub fn find_matches(&self, query: &str) -> Vec<&TickerEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries.iter().filter(|e| e.contains(&needle)).collect()
    }

    /// Resolve a query to one or more symbols.
    pub fn resolve(&self, query: &str, strategy: Disambiguation) -> Resolution {
        let trimmed = query.trim();

        if let Some(symbol) = self.overrides.get(trimmed) {
            return Resolution::Resolved {
                symbol: symbol.to_string(),
                via: ResolvedVia::Override,
            };
        }

        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(trimmed))
        {
            return Resolution::Resolved {
                symbol: entry.symbol.clone(),
                via: ResolvedVia::ExactSymbol,
            };
        }

        let matches = self.find_matches(trimmed);
        let resolution = match (matches.as_slice(), strategy) {
            ([], _) => Resolution::Fallback(trimmed.to_uppercase()),
            ([only], _) | ([only, ..], Disambiguation::First) => Resolution::Resolved {
                symbol: only.symbol.clone(),
                via: ResolvedVia::Table,
            },
            (many, _) => Resolution::Candidates(many.iter().map(|&e| e.clone()).collect()),
        };
        debug!(query = trimmed, matches = matches.len(), ?resolution, "Resolved query");
        resolution
    }
}
