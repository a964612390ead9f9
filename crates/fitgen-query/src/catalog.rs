use std::path::Path;

use regex::Regex;
use serde::Serialize;

use crate::errors::QueryError;

/// A statement and the label that introduces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledQuery {
    pub label: String,
    pub sql: String,
}

/// Ordered set of labeled statements. A repeated label keeps its last statement.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryCatalog {
    entries: Vec<LabeledQuery>,
}

impl QueryCatalog {
    /// Parse `-- label` lines each followed by a `;`-terminated statement.
    pub fn parse(content: &str) -> Result<Self, QueryError> {
        let re = Regex::new(r"(?s)--\s*(.*?)\s*\n(.*?);")?;
        let mut catalog = Self::default();
        for captures in re.captures_iter(content) {
            let label = captures[1].trim().to_string();
            let sql = captures[2].trim().to_string();
            if label.is_empty() || sql.is_empty() {
                continue;
            }
            catalog.insert(LabeledQuery { label, sql });
        }
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, QueryError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn insert(&mut self, query: LabeledQuery) {
        match self.entries.iter_mut().find(|entry| entry.label == query.label) {
            Some(existing) => existing.sql = query.sql,
            None => self.entries.push(query),
        }
    }

    pub fn get(&self, label: &str) -> Option<&LabeledQuery> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "-- All users\nSELECT * FROM Users;\n\n-- Workouts for a user\nSELECT *\nFROM Workouts\nWHERE UserID = ?;\n";

    #[test]
    fn parses_labels_and_multiline_statements() {
        let catalog = QueryCatalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.labels().collect::<Vec<_>>(),
            vec!["All users", "Workouts for a user"]
        );
        let query = catalog.get("Workouts for a user").expect("query present");
        assert_eq!(query.sql, "SELECT *\nFROM Workouts\nWHERE UserID = ?");
    }

    #[test]
    fn repeated_label_keeps_last_statement() {
        let catalog = QueryCatalog::parse("-- q\nSELECT 1;\n-- q\nSELECT 2;\n").unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("q").map(|q| q.sql.as_str()), Some("SELECT 2"));
    }

    #[test]
    fn text_without_labels_is_empty() {
        assert!(QueryCatalog::parse("SELECT 1;").unwrap().is_empty());
    }
}
