//! Raw feed rows and the ordered-candidate field lookup.
//!
//! The menu spreadsheet is maintained by hand, so column headers drift:
//! bilingual names, stray whitespace, inconsistent casing. A [`Row`] keeps
//! the cells in header order and resolves a field by trying a list of
//! candidate column names (see [`crate::columns`]).

/// One record of the menu feed: `(header, cell)` pairs in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(header, cell)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (key, value) in pairs {
            row.insert(key, value);
        }
        row
    }

    /// Sets a cell, replacing the value of an existing column with the exact
    /// same header.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((key, value)),
        }
    }

    /// Returns the cell under exactly `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Resolves a field by trying each candidate column name in order.
    ///
    /// Each candidate is first looked up verbatim; failing that, the row's
    /// headers are compared case-insensitively after trimming. The first hit
    /// wins, even when the cell is empty. Returns `""` when no candidate
    /// matches; absence is never an error.
    #[must_use]
    pub fn resolve(&self, candidates: &[&str]) -> &str {
        for candidate in candidates {
            if let Some(value) = self.get(candidate) {
                return value;
            }
            let wanted = candidate.trim().to_lowercase();
            if let Some((_, value)) = self
                .cells
                .iter()
                .find(|(k, _)| k.trim().to_lowercase() == wanted)
            {
                return value;
            }
        }
        ""
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `true` when every cell is blank; such rows carry no menu data.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_verbatim_key() {
        let row = Row::from_pairs([("Name", "wrong"), ("name", "Latte")]);
        assert_eq!(row.resolve(&["name"]), "Latte");
    }

    #[test]
    fn resolve_falls_back_to_case_and_trim_insensitive_match() {
        let row = Row::from_pairs([("  PRICE ", "900")]);
        assert_eq!(row.resolve(&["price"]), "900");
    }

    #[test]
    fn resolve_tries_candidates_in_order() {
        let row = Row::from_pairs([("Цена", "1 200"), ("cost", "5")]);
        assert_eq!(row.resolve(&["price", "Цена"]), "1 200");
    }

    #[test]
    fn resolve_matches_cyrillic_headers_case_insensitively() {
        let row = Row::from_pairs([("НАЗВАНИЕ", "Раф")]);
        assert_eq!(row.resolve(&["name", "Название"]), "Раф");
    }

    #[test]
    fn resolve_returns_empty_present_cell_without_trying_later_candidates() {
        let row = Row::from_pairs([("fullDesc", ""), ("Описание", "long text")]);
        assert_eq!(row.resolve(&["fullDesc", "Описание"]), "");
    }

    #[test]
    fn resolve_returns_empty_string_when_nothing_matches() {
        let row = Row::from_pairs([("id", "1")]);
        assert_eq!(row.resolve(&["badge", "Метка"]), "");
    }

    #[test]
    fn insert_replaces_existing_column() {
        let mut row = Row::from_pairs([("id", "1")]);
        row.insert("id", "2");
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("id"), Some("2"));
    }

    #[test]
    fn blank_row_detection() {
        assert!(Row::from_pairs([("id", " "), ("name", "")]).is_blank());
        assert!(!Row::from_pairs([("id", "7")]).is_blank());
    }
}
