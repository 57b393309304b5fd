pub mod disk;
pub mod memory;

use crate::core::valuation::{ValuationRequest, ValuationResult};
use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use disk::DiskStoryStore;
pub use memory::MemoryStoryStore;

/// A persisted spending story together with its last computed valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRecord {
    pub id: String,
    pub title: Option<String>,
    pub request: ValuationRequest,
    pub valuation: Option<ValuationResult>,
}

/// Storage for story records, keyed by id.
pub trait StoryStore: Send + Sync {
    fn get(&self, id: &str) -> Result<Option<StoryRecord>>;
    fn put(&self, record: &StoryRecord) -> Result<()>;
    /// All records ordered by id.
    fn list(&self) -> Result<Vec<StoryRecord>>;
}
