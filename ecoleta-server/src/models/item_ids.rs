//! Parsing for the comma-delimited item id list
//!
//! Clients send item ids as `"1,2,3"` both in the search query string and in
//! the registration form. Parsing is strict: a malformed token fails the
//! request instead of silently coercing to zero. Duplicates collapse.

use std::collections::BTreeSet;

use super::ValidationError;

/// Validated, de-duplicated set of item ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIds(BTreeSet<i64>);

impl ItemIds {
    /// Parse a comma-delimited list of integer ids.
    ///
    /// Tokens are trimmed; every token must parse as an integer and the
    /// resulting set must be non-empty.
    ///
    /// # Example
    /// ```
    /// use ecoleta_server::models::ItemIds;
    ///
    /// let ids = ItemIds::parse("1, 2,2,3").unwrap();
    /// assert_eq!(ids.as_vec(), vec![1, 2, 3]);
    /// assert!(ItemIds::parse("1,two").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "items" });
        }

        let mut ids = BTreeSet::new();
        for token in s.split(',') {
            let token = token.trim();
            let id: i64 = token.parse().map_err(|_| ValidationError::NotANumber {
                field: "items",
                value: token.to_owned(),
            })?;
            ids.insert(id);
        }

        if ids.is_empty() {
            return Err(ValidationError::Empty { field: "items" });
        }

        Ok(Self(ids))
    }

    /// Ids in ascending order, for binding as a Postgres array.
    pub fn as_vec(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_list() {
        let ids = ItemIds::parse("1,2,3").unwrap();
        assert_eq!(ids.as_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn trims_whitespace() {
        let ids = ItemIds::parse(" 4 , 5 ").unwrap();
        assert_eq!(ids.as_vec(), vec![4, 5]);
    }

    #[test]
    fn collapses_duplicates() {
        let ids = ItemIds::parse("2,2,2").unwrap();
        assert_eq!(ids.as_vec(), vec![2]);
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn rejects_malformed_token() {
        let err = ItemIds::parse("1,two,3").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NotANumber { field: "items", .. }
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            ItemIds::parse("").unwrap_err(),
            ValidationError::Empty { field: "items" }
        ));
        assert!(matches!(
            ItemIds::parse("   ").unwrap_err(),
            ValidationError::Empty { field: "items" }
        ));
    }

    #[test]
    fn rejects_trailing_comma() {
        // "1,2," yields an empty final token, which is not an integer
        assert!(ItemIds::parse("1,2,").is_err());
    }
}
