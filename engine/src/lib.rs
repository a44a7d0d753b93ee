use wasm_bindgen::prelude::*;

pub mod board;
pub mod build;
pub mod console;
pub mod error;
pub mod parse;
pub mod rank;
pub mod types;

use crate::board::Board;
use crate::error::{EngineError, Result};
use crate::types::{Item, ItemFilter, MatchConfig};

/// Install the browser console logger at the given level ("debug", "info", ...)
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    console::init(console::parse_level(level));
}

fn rank_matches_str(seed_json: &str, pool_json: &str) -> Result<String> {
    let seed = Item::from_json(seed_json)?;
    let pool = Item::list_from_json(pool_json)?;
    let results = rank::rank_matches(&seed, &pool);
    Ok(serde_json::to_string(&results)?)
}

/// Rank a candidate pool against a seed item without any board state.
/// seed_json: a single Item, pool_json: an array of Items.
/// Returns a JSON array of {id, score}, best first.
#[wasm_bindgen]
pub fn rank_matches_json(seed_json: &str, pool_json: &str) -> std::result::Result<String, JsError> {
    Ok(rank_matches_str(seed_json, pool_json)?)
}

/// Lost-and-found board owned by the JavaScript side
#[wasm_bindgen]
pub struct LostFoundBoard {
    board: Board,
}

impl LostFoundBoard {
    fn from_config(config_json: &str) -> Result<Self> {
        Ok(LostFoundBoard {
            board: Board::new(MatchConfig::from_json(config_json)?),
        })
    }

    fn submit_str(&mut self, item_json: &str) -> Result<String> {
        let outcome = self.board.submit(Item::from_json(item_json)?)?;
        Ok(serde_json::to_string(&outcome)?)
    }

    fn matches_str(&self, id: &str, n: usize) -> Result<String> {
        Ok(serde_json::to_string(&self.board.matches_for(id, n)?)?)
    }

    fn list_str(&self, filter_json: &str) -> Result<String> {
        let filter: ItemFilter = if filter_json.trim().is_empty() {
            ItemFilter::default()
        } else {
            serde_json::from_str(filter_json).map_err(|e| {
                EngineError::InvalidInput(format!("failed to parse filter: {}", e))
            })?
        };
        Ok(serde_json::to_string(&self.board.filter(&filter))?)
    }
}

#[wasm_bindgen]
impl LostFoundBoard {
    /// config_json: MatchConfig overrides, or "" / "{}" for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> std::result::Result<LostFoundBoard, JsError> {
        Ok(Self::from_config(config_json)?)
    }

    /// Replace all items with a JSON array of Items
    pub fn load_items(&mut self, items_json: &str) -> std::result::Result<(), JsError> {
        self.board.load(Item::list_from_json(items_json)?)?;
        Ok(())
    }

    /// Post one item; returns {id, match_count}
    pub fn submit_item(&mut self, item_json: &str) -> std::result::Result<String, JsError> {
        Ok(self.submit_str(item_json)?)
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        self.board.remove(id)
    }

    /// Top `n` suggested matches for a stored item as JSON
    pub fn matches_for(&self, id: &str, n: usize) -> std::result::Result<String, JsError> {
        Ok(self.matches_str(id, n)?)
    }

    /// Items passing a JSON ItemFilter ("" lists everything)
    pub fn list_items(&self, filter_json: &str) -> std::result::Result<String, JsError> {
        Ok(self.list_str(filter_json)?)
    }

    pub fn item_count(&self) -> usize {
        self.board.len()
    }
}
