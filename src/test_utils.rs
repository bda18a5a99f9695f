//! Shared test utilities for `SentenceBuddy`.
//!
//! Stores created here live in a fresh temporary directory that is removed when the
//! returned `TempDir` is dropped, so keep it bound for the length of the test.

use crate::{core::store::SentenceStore, errors::Result};
use tempfile::TempDir;

/// Guild id used by tests that only need one guild.
pub const TEST_GUILD: &str = "100000000000000001";

/// Creates an empty store whose backing file does not exist yet.
pub fn temp_store() -> Result<(TempDir, SentenceStore)> {
    let dir = tempfile::tempdir()?;
    let store = SentenceStore::new(dir.path().join("sentences.json"));
    Ok((dir, store))
}

/// Creates a store for `TEST_GUILD` that already holds `sentences`, persisted to disk.
pub fn seeded_store(sentences: &[&str]) -> Result<(TempDir, SentenceStore)> {
    let (dir, mut store) = temp_store()?;
    for sentence in sentences {
        store.add(TEST_GUILD, sentence)?;
    }
    Ok((dir, store))
}
