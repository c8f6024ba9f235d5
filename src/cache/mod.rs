//! Persistent cache artifacts for the chunk sequence and the vector index.
//!
//! Both stages follow the same two-phase pattern: attempt a restore from
//! the persisted artifact, else compute and persist. [`CacheStore::load_or_build`]
//! implements that branching once for both.
//!
//! Artifacts are never invalidated automatically: editing the corpus after
//! a cache exists leaves the index stale until the artifacts are removed
//! (`rmrag clean`).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::index::chunker::Chunk;
use crate::index::vectorizer::IndexArtifact;

/// A cacheable value with a fixed file name and an on-disk codec
pub trait Artifact: Sized {
    const FILENAME: &'static str;

    fn read(path: &Path) -> Result<Self>;
    fn write(&self, path: &Path) -> Result<()>;
}

/// The persisted ordered chunk sequence (human-inspectable JSON)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkSequence {
    pub chunks: Vec<Chunk>,
}

impl Artifact for ChunkSequence {
    const FILENAME: &'static str = "chunks.json";

    fn read(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// The persisted index bundle (binary; vocabulary, IDF, row vectors)
impl Artifact for IndexArtifact {
    const FILENAME: &'static str = "index.bin";

    fn read(path: &Path) -> Result<Self> {
        read_bincode(path)
    }

    fn write(&self, path: &Path) -> Result<()> {
        write_bincode(path, self)
    }
}

fn read_bincode<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path)?;
    Ok(bincode::deserialize(&bytes)?)
}

fn write_bincode<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = bincode::serialize(value)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Cache directory handle
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Open (creating if needed) the cache directory
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of<A: Artifact>(&self) -> PathBuf {
        self.dir.join(A::FILENAME)
    }

    /// Restore the artifact if present, otherwise build and persist it.
    /// Returns the value and whether it came from cache.
    pub fn load_or_build<A, F>(&self, build: F) -> Result<(A, bool)>
    where
        A: Artifact,
        F: FnOnce() -> Result<A>,
    {
        let path = self.path_of::<A>();
        if path.exists() {
            let artifact = A::read(&path)?;
            return Ok((artifact, true));
        }

        let artifact = build()?;
        artifact.write(&path)?;
        Ok((artifact, false))
    }

    /// True when both cache artifacts are on disk
    pub fn is_complete(&self) -> bool {
        self.path_of::<ChunkSequence>().exists() && self.path_of::<IndexArtifact>().exists()
    }

    /// Delete all cache artifacts, forcing a rebuild on next run
    pub fn clear(&self) -> Result<()> {
        for path in [self.path_of::<ChunkSequence>(), self.path_of::<IndexArtifact>()] {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}
