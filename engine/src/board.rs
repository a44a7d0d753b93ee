use crate::build::item_searchable_text;
use crate::error::{EngineError, Result};
use crate::parse::tokenize;
use crate::rank::{rank_matches_with, top_n};
use crate::types::{Item, ItemFilter, MatchConfig, MatchResult, SubmitOutcome};
use std::collections::HashSet;

/// Application state: every known item in posting order, plus the ranking
/// constants. The matcher itself stays stateless and is handed the pool on
/// each call.
#[derive(Debug, Clone, Default)]
pub struct Board {
    items: Vec<Item>,
    config: MatchConfig,
}

impl Board {
    pub fn new(config: MatchConfig) -> Self {
        Board {
            items: Vec::new(),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Replace the store with `items`. Nothing changes if any item is invalid.
    pub fn load(&mut self, items: Vec<Item>) -> Result<()> {
        let mut seen = HashSet::new();
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(EngineError::DuplicateId(item.id.clone()));
            }
        }
        log::info!("loaded {} items", items.len());
        self.items = items;
        Ok(())
    }

    /// Post a new item and report how many existing items look like matches
    pub fn submit(&mut self, item: Item) -> Result<SubmitOutcome> {
        item.validate()?;
        if self.get(&item.id).is_some() {
            return Err(EngineError::DuplicateId(item.id));
        }

        // same-kind items are skipped by the ranker
        let match_count = rank_matches_with(&item, &self.items, &self.config).len();

        log::info!(
            "submitted {:?} item '{}' with {} potential matches",
            item.kind,
            item.id,
            match_count
        );

        let outcome = SubmitOutcome {
            id: item.id.clone(),
            match_count,
        };
        self.items.push(item);
        Ok(outcome)
    }

    /// Remove an item, returning whether it existed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            log::info!("removed item '{}'", id);
        } else {
            log::warn!("remove: no item with id '{}'", id);
        }
        removed
    }

    /// Items passing every set field of the filter, in posting order
    pub fn filter(&self, filter: &ItemFilter) -> Vec<&Item> {
        let query_tokens = filter.query.as_deref().map(tokenize).unwrap_or_default();

        self.items
            .iter()
            .filter(|item| filter.kind.map_or(true, |kind| item.kind == kind))
            .filter(|item| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |category| item.category == category)
            })
            .filter(|item| {
                if query_tokens.is_empty() {
                    return true;
                }
                let item_tokens: HashSet<String> =
                    tokenize(&item_searchable_text(item)).into_iter().collect();
                query_tokens.iter().all(|t| item_tokens.contains(t))
            })
            .collect()
    }

    /// Top `n` suggested matches for a stored item
    pub fn matches_for(&self, id: &str, n: usize) -> Result<Vec<MatchResult>> {
        let seed = self
            .get(id)
            .ok_or_else(|| EngineError::NotFound(id.to_string()))?;
        let ranked = rank_matches_with(seed, &self.items, &self.config);
        Ok(top_n(ranked, n))
    }
}
