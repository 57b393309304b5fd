use super::{StoryRecord, StoryStore};
use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory story store backed by a `BTreeMap`.
#[derive(Default)]
pub struct MemoryStoryStore {
    inner: RwLock<BTreeMap<String, StoryRecord>>,
}

impl MemoryStoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoryStore for MemoryStoryStore {
    fn get(&self, id: &str) -> Result<Option<StoryRecord>> {
        let stories = self
            .inner
            .read()
            .map_err(|_| anyhow!("story store lock poisoned"))?;
        let record = stories.get(id).cloned();
        if record.is_some() {
            debug!("Store HIT for story: {}", id);
        } else {
            debug!("Store MISS for story: {}", id);
        }
        Ok(record)
    }

    fn put(&self, record: &StoryRecord) -> Result<()> {
        let mut stories = self
            .inner
            .write()
            .map_err(|_| anyhow!("story store lock poisoned"))?;
        debug!("Store PUT for story: {}", record.id);
        stories.insert(record.id.clone(), record.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<StoryRecord>> {
        let stories = self
            .inner
            .read()
            .map_err(|_| anyhow!("story store lock poisoned"))?;
        Ok(stories.values().cloned().collect())
    }
}
