use super::{StoryRecord, StoryStore};
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "stories";

/// Story store persisted in a fjall keyspace, one JSON document per story.
pub struct DiskStoryStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStoryStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open story store at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .context("Failed to open stories partition")?;
        debug!("Opened story store at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl StoryStore for DiskStoryStore {
    fn get(&self, id: &str) -> Result<Option<StoryRecord>> {
        match self.partition.get(id.as_bytes())? {
            Some(bytes) => {
                debug!("Store HIT for story: {}", id);
                let record = serde_json::from_slice(&bytes)
                    .with_context(|| format!("Corrupt story record: {id}"))?;
                Ok(Some(record))
            }
            None => {
                debug!("Store MISS for story: {}", id);
                Ok(None)
            }
        }
    }

    fn put(&self, record: &StoryRecord) -> Result<()> {
        self.partition
            .insert(record.id.as_bytes(), serde_json::to_vec(record)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Store PUT for story: {}", record.id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<StoryRecord>> {
        let mut records = Vec::new();
        for entry in self.partition.iter() {
            let (key, value) = entry?;
            let record = serde_json::from_slice(&value).with_context(|| {
                format!("Corrupt story record: {}", String::from_utf8_lossy(&key))
            })?;
            records.push(record);
        }
        Ok(records)
    }
}
