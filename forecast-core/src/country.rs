use serde::Deserialize;
use thiserror::Error;

/// Country table shipped with the binary.
const BUNDLED_TABLE: &str = include_str!("../assets/country_codes.json");

/// One row of the country table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Code")]
    pub code: String,
}

#[derive(Debug, Error)]
pub enum CountryTableError {
    #[error("Failed to parse country table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Country table entry '{name}' has invalid code '{code}'")]
    InvalidCode { name: String, code: String },
}

/// Read-only name -> two-letter code table.
///
/// Entries keep the order of the source asset. When several entries share a
/// name, the first one wins.
#[derive(Debug, Clone)]
pub struct CountryTable {
    entries: Vec<CountryEntry>,
}

impl CountryTable {
    /// Parse the table embedded in the crate.
    pub fn bundled() -> Result<Self, CountryTableError> {
        Self::from_json(BUNDLED_TABLE)
    }

    /// Parse a JSON array of `{"Name": .., "Code": ..}` objects.
    pub fn from_json(json: &str) -> Result<Self, CountryTableError> {
        let entries: Vec<CountryEntry> = serde_json::from_str(json)?;

        if let Some(bad) = entries
            .iter()
            .find(|e| e.code.len() != 2 || !e.code.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(CountryTableError::InvalidCode {
                name: bad.name.clone(),
                code: bad.code.clone(),
            });
        }

        Ok(Self { entries })
    }

    /// Resolve a free-text country name to its code.
    ///
    /// Case-insensitive, otherwise exact; surrounding whitespace is ignored.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|e| e.name.to_lowercase() == wanted)
            .map(|e| e.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_parses() {
        let table = CountryTable::bundled().expect("bundled table must parse");
        assert!(table.len() > 200);
        assert!(table.iter().all(|e| e.code.len() == 2));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = CountryTable::bundled().unwrap();

        for name in ["France", "france", "FRANCE", "fRaNcE", "  France  "] {
            assert_eq!(table.lookup(name), Some("FR"), "lookup of {name:?}");
        }
        assert_eq!(table.lookup("united states"), Some("US"));
        assert_eq!(table.lookup("Côte d'Ivoire"), Some("CI"));
    }

    #[test]
    fn lookup_every_entry_resolves_to_its_code() {
        let table = CountryTable::bundled().unwrap();

        for entry in table.iter() {
            assert_eq!(table.lookup(&entry.name.to_uppercase()), Some(entry.code.as_str()));
        }
    }

    #[test]
    fn lookup_rejects_partial_and_unknown_names() {
        let table = CountryTable::bundled().unwrap();

        assert_eq!(table.lookup("Fran"), None);
        assert_eq!(table.lookup("United"), None);
        assert_eq!(table.lookup("Atlantis"), None);
        assert_eq!(table.lookup(""), None);
        assert_eq!(table.lookup("   "), None);
    }

    #[test]
    fn duplicate_names_resolve_to_first_entry() {
        let json = r#"[
            {"Name": "Georgia", "Code": "GE"},
            {"Name": "georgia", "Code": "US"}
        ]"#;
        let table = CountryTable::from_json(json).unwrap();

        assert_eq!(table.lookup("GEORGIA"), Some("GE"));
    }

    #[test]
    fn from_json_rejects_bad_codes() {
        let err = CountryTable::from_json(r#"[{"Name": "Nowhere", "Code": "NWH"}]"#).unwrap_err();
        assert!(err.to_string().contains("invalid code 'NWH'"));

        let err = CountryTable::from_json("{}").unwrap_err();
        assert!(matches!(err, CountryTableError::Parse(_)));
    }
}
