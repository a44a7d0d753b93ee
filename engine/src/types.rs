use crate::error::{EngineError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Term vector: token -> occurrence count
pub type TermVector = HashMap<String, u32>;

/// Which side of the board an item was posted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lost,
    Found,
}

impl ItemKind {
    /// The kind an item has to be to count as a match for this one
    pub fn opposite(self) -> Self {
        match self {
            ItemKind::Lost => ItemKind::Found,
            ItemKind::Found => ItemKind::Lost,
        }
    }
}

/// JSON scalar as sent from JavaScript; ids are often `Date.now()` numbers
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::UInt(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
        }
    }
}

/// String or number, normalized to a string
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(String::from)
}

/// Like `scalar_string`, but `null` becomes empty
fn text_or_null<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

/// A single lost or found listing.
///
/// Text fields default to empty when absent or null; `id` and `type` are
/// required. Numeric ids are kept as their decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(deserialize_with = "scalar_string")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default, deserialize_with = "text_or_null")]
    pub title: String,
    #[serde(default, deserialize_with = "text_or_null")]
    pub description: String,
    #[serde(default, deserialize_with = "text_or_null")]
    pub category: String,
    #[serde(default, deserialize_with = "text_or_null")]
    pub location: String,
    /// Reported date as entered, not the submission timestamp
    #[serde(default, deserialize_with = "text_or_null")]
    pub date: String,
}

impl Item {
    /// Check the fields serde can't: ids must be non-blank
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::InvalidInput("item id is empty".to_string()));
        }
        Ok(())
    }

    /// Parse a single item from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let item: Item = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidInput(format!("failed to parse item: {}", e)))?;
        item.validate()?;
        Ok(item)
    }

    /// Parse a JSON array of items, validating each one
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        let items: Vec<Item> = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidInput(format!("failed to parse items: {}", e)))?;
        for item in &items {
            item.validate()?;
        }
        Ok(items)
    }
}

/// Candidate id paired with its composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: String,
    pub score: f64,
}

/// Ranking constants. Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Added when both categories are exactly equal
    pub category_bonus: f64,
    /// Added when reported dates are within `date_window_days`
    pub date_bonus: f64,
    pub date_window_days: i64,
    /// Composite scores must be strictly above this to be kept
    pub threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            category_bonus: 0.15,
            date_bonus: 0.10,
            date_window_days: 7,
            threshold: 0.15,
        }
    }
}

impl MatchConfig {
    /// Parse config JSON; an empty string means defaults
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(MatchConfig::default());
        }
        serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidInput(format!("failed to parse config: {}", e)))
    }
}

/// Listing filter; every set field must match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFilter {
    #[serde(rename = "type")]
    pub kind: Option<ItemKind>,
    pub category: Option<String>,
    pub query: Option<String>,
}

/// Result of posting a new item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub id: String,
    pub match_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_defaults_missing_text() {
        let item = Item::from_json(r#"{"id": "a1", "type": "lost"}"#).unwrap();
        assert_eq!(item.kind, ItemKind::Lost);
        assert_eq!(item.title, "");
        assert_eq!(item.date, "");
    }

    #[test]
    fn test_item_missing_type_is_invalid() {
        let err = Item::from_json(r#"{"id": "a1", "title": "keys"}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_item_blank_id_is_invalid() {
        let err = Item::from_json(r#"{"id": "  ", "type": "found"}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_item_null_text_fields_become_empty() {
        let item = Item::from_json(
            r#"{"id": "a1", "type": "found", "title": "keys", "description": null,
                "category": null, "location": null, "date": null}"#,
        )
        .unwrap();
        assert_eq!(item.title, "keys");
        assert_eq!(item.description, "");
        assert_eq!(item.category, "");
        assert_eq!(item.location, "");
        assert_eq!(item.date, "");
    }

    #[test]
    fn test_item_numeric_id() {
        let item = Item::from_json(r#"{"id": 1704067200000, "type": "lost"}"#).unwrap();
        assert_eq!(item.id, "1704067200000");
        let item = Item::from_json(r#"{"id": -3, "type": "lost"}"#).unwrap();
        assert_eq!(item.id, "-3");
    }

    #[test]
    fn test_item_null_id_is_invalid() {
        let err = Item::from_json(r#"{"id": null, "type": "lost"}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_item_list_tolerates_nulls() {
        let items = Item::list_from_json(
            r#"[{"id": 1, "type": "lost", "location": null},
                {"id": "two", "type": "found", "title": null}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[1].title, "");
    }

    #[test]
    fn test_unknown_kind_is_invalid() {
        assert!(Item::from_json(r#"{"id": "a1", "type": "stolen"}"#).is_err());
    }

    #[test]
    fn test_opposite() {
        assert_eq!(ItemKind::Lost.opposite(), ItemKind::Found);
        assert_eq!(ItemKind::Found.opposite(), ItemKind::Lost);
    }

    #[test]
    fn test_config_partial_override() {
        let config = MatchConfig::from_json(r#"{"threshold": 0.3}"#).unwrap();
        assert_eq!(config.threshold, 0.3);
        assert_eq!(config.category_bonus, 0.15);
        assert_eq!(config.date_window_days, 7);
        assert_eq!(MatchConfig::from_json("").unwrap(), MatchConfig::default());
    }
}
