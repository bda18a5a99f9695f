//! Per-guild sentence storage backed by a single JSON file.
//!
//! The store keeps every guild's sentences in memory, ordered by registration, and
//! rewrites the whole file after each mutation. Reads never touch the disk.

use crate::errors::{Error, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Separator users put between several sentences in one `/register` call.
pub const SENTENCE_SEPARATOR: char = '/';

/// Splits raw user input into trimmed, non-empty sentences, keeping their order.
#[must_use]
pub fn split_sentences(raw_input: &str) -> Vec<String> {
    raw_input
        .split(SENTENCE_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Sentences for every guild, plus the file they are persisted to.
#[derive(Debug)]
pub struct SentenceStore {
    path: PathBuf,
    by_guild: BTreeMap<String, Vec<String>>,
}

impl SentenceStore {
    /// Creates an empty store that will persist to `path`. Nothing is read or written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            by_guild: BTreeMap::new(),
        }
    }

    /// Loads the store from `path`.
    ///
    /// A missing or unreadable file, or one that is not a JSON object of string
    /// arrays, yields an empty store. Blank sentences found in the file are dropped.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let by_guild = match read_mapping(&path) {
            Ok(Some(mapping)) => mapping,
            Ok(None) => {
                info!("No sentence file at {:?}, starting empty", path);
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Could not load sentences from {:?}, starting empty: {}", path, e);
                BTreeMap::new()
            }
        };

        let store = Self { path, by_guild };
        info!(
            "Loaded {} sentences across {} guilds",
            store.sentence_count(),
            store.guild_count()
        );
        store
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Splits `raw_input` into sentences and appends them to the guild's list.
    ///
    /// Returns the sentences that were added. When nothing survives trimming the
    /// store is left untouched and no write happens.
    pub fn add(&mut self, guild_id: &str, raw_input: &str) -> Result<Vec<String>> {
        let added = split_sentences(raw_input);
        if added.is_empty() {
            debug!("Nothing to register for guild {}", guild_id);
            return Ok(added);
        }

        self.by_guild
            .entry(guild_id.to_string())
            .or_default()
            .extend(added.iter().cloned());
        self.persist()?;

        info!("Registered {} sentence(s) for guild {}", added.len(), guild_id);
        Ok(added)
    }

    /// All sentences of a guild in registration order. Unknown guilds have none.
    #[must_use]
    pub fn list(&self, guild_id: &str) -> &[String] {
        self.by_guild
            .get(guild_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Picks one of the guild's sentences uniformly at random.
    pub fn random_pick(&self, guild_id: &str) -> Result<&str> {
        self.random_pick_with(guild_id, &mut rand::thread_rng())
    }

    /// Same as [`Self::random_pick`] with a caller-supplied random source.
    pub fn random_pick_with<R: Rng + ?Sized>(&self, guild_id: &str, rng: &mut R) -> Result<&str> {
        self.list(guild_id)
            .choose(rng)
            .map(String::as_str)
            .ok_or_else(|| Error::NoSentences {
                guild_id: guild_id.to_string(),
            })
    }

    /// Removes the sentence at a 1-based `index` and returns it.
    ///
    /// Later sentences shift down by one. An index outside `1..=len` fails with
    /// [`Error::IndexOutOfRange`] and leaves the list as it was.
    pub fn delete_at(&mut self, guild_id: &str, index: i64) -> Result<String> {
        let out_of_range = || Error::IndexOutOfRange { index };

        let sentences = self.by_guild.get_mut(guild_id).ok_or_else(out_of_range)?;
        let position = index
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .filter(|&i| i < sentences.len())
            .ok_or_else(out_of_range)?;

        let removed = sentences.remove(position);
        self.persist()?;

        info!("Deleted sentence #{} for guild {}", index, guild_id);
        Ok(removed)
    }

    /// Rewrites the backing file with the full mapping.
    ///
    /// The JSON is written to a sibling temporary file first and then renamed over
    /// the target, so readers never observe a half-written document.
    pub fn persist(&self) -> Result<()> {
        let persist_err = |source| Error::Persist {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(&self.by_guild)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(persist_err)?;
        }

        let tmp_path = temp_path_for(&self.path);
        fs::write(&tmp_path, json).map_err(persist_err)?;
        fs::rename(&tmp_path, &self.path).map_err(persist_err)?;

        debug!("Persisted {} guilds to {:?}", self.guild_count(), self.path);
        Ok(())
    }

    /// Number of guilds with an entry (possibly empty).
    #[must_use]
    pub fn guild_count(&self) -> usize {
        self.by_guild.len()
    }

    /// Total number of sentences across all guilds.
    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.by_guild.values().map(Vec::len).sum()
    }
}

/// Reads the mapping from disk. `Ok(None)` means the file does not exist.
fn read_mapping(path: &Path) -> Result<Option<BTreeMap<String, Vec<String>>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut mapping: BTreeMap<String, Vec<String>> = serde_json::from_str(&contents)?;
    for (guild_id, sentences) in &mut mapping {
        let before = sentences.len();
        sentences.retain(|s| !s.trim().is_empty());
        if sentences.len() != before {
            warn!(
                "Dropped {} blank sentence(s) for guild {} while loading",
                before - sentences.len(),
                guild_id
            );
        }
    }
    Ok(Some(mapping))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_split_sentences_trims_and_drops_empty() {
        assert_eq!(split_sentences("a / b /c"), vec!["a", "b", "c"]);
        assert_eq!(split_sentences(" / "), Vec::<String>::new());
        assert_eq!(split_sentences("///"), Vec::<String>::new());
        assert_eq!(split_sentences("  hello  "), vec!["hello"]);
        assert_eq!(split_sentences(""), Vec::<String>::new());
    }

    #[test]
    fn test_unknown_guild_is_empty() -> Result<()> {
        let (_dir, store) = temp_store()?;

        assert!(store.list("never-seen").is_empty());
        assert!(matches!(
            store.random_pick("never-seen"),
            Err(Error::NoSentences { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_add_appends_in_order() -> Result<()> {
        let (_dir, mut store) = temp_store()?;

        let added = store.add(TEST_GUILD, "a / b /c")?;
        assert_eq!(added, vec!["a", "b", "c"]);
        assert_eq!(store.list(TEST_GUILD), ["a", "b", "c"]);

        store.add(TEST_GUILD, "d")?;
        assert_eq!(store.list(TEST_GUILD), ["a", "b", "c", "d"]);
        Ok(())
    }

    #[test]
    fn test_add_nothing_does_not_mutate_or_write() -> Result<()> {
        let (_dir, mut store) = temp_store()?;

        let added = store.add(TEST_GUILD, " / ")?;
        assert!(added.is_empty());
        assert!(store.list(TEST_GUILD).is_empty());
        assert_eq!(store.guild_count(), 0);
        assert!(!store.path().exists());
        Ok(())
    }

    #[test]
    fn test_guilds_are_isolated() -> Result<()> {
        let (_dir, mut store) = temp_store()?;

        store.add("guild-a", "apple")?;
        store.add("guild-b", "banana")?;

        assert_eq!(store.list("guild-a"), ["apple"]);
        assert_eq!(store.list("guild-b"), ["banana"]);
        assert_eq!(store.sentence_count(), 2);
        Ok(())
    }

    #[test]
    fn test_delete_at_shifts_later_entries() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        store.add(TEST_GUILD, "x")?;
        store.add(TEST_GUILD, "y")?;
        assert_eq!(store.list(TEST_GUILD), ["x", "y"]);

        let removed = store.delete_at(TEST_GUILD, 1)?;
        assert_eq!(removed, "x");
        assert_eq!(store.list(TEST_GUILD), ["y"]);
        Ok(())
    }

    #[test]
    fn test_delete_at_out_of_range_leaves_list() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        store.add(TEST_GUILD, "x/y")?;

        for index in [0, 3, -1, i64::MIN, i64::MAX] {
            let result = store.delete_at(TEST_GUILD, index);
            assert!(
                matches!(result, Err(Error::IndexOutOfRange { index: i }) if i == index),
                "index {index} should be out of range"
            );
        }
        assert_eq!(store.list(TEST_GUILD), ["x", "y"]);

        assert!(matches!(
            store.delete_at("empty-guild", 1),
            Err(Error::IndexOutOfRange { index: 1 })
        ));
        Ok(())
    }

    #[test]
    fn test_persist_then_load_round_trips() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        store.add("guild-a", "one/two/three")?;
        store.add("guild-b", "solo")?;
        store.delete_at("guild-b", 1)?;

        let reloaded = SentenceStore::load(store.path());
        assert_eq!(reloaded.list("guild-a"), ["one", "two", "three"]);
        assert!(reloaded.list("guild-b").is_empty());
        assert_eq!(reloaded.guild_count(), 2);

        // Re-saving an unmodified store produces the same document
        let first = fs::read_to_string(store.path())?;
        reloaded.persist()?;
        let second = fs::read_to_string(reloaded.path())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_persisted_shape_is_guild_to_array() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        store.add("123", "hello/world")?;

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path())?)?;
        assert_eq!(value, serde_json::json!({ "123": ["hello", "world"] }));
        Ok(())
    }

    #[test]
    fn test_persist_creates_parent_dirs_and_leaves_no_temp_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("deeper").join("sentences.json");
        let mut store = SentenceStore::new(&path);

        store.add(TEST_GUILD, "hi")?;
        assert!(path.exists());
        assert!(!temp_path_for(&path).exists());
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = SentenceStore::load(dir.path().join("absent.json"));
        assert_eq!(store.guild_count(), 0);
        Ok(())
    }

    #[test]
    fn test_load_corrupt_file_is_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sentences.json");

        fs::write(&path, "{ not json")?;
        assert_eq!(SentenceStore::load(&path).guild_count(), 0);

        fs::write(&path, r#"{"g": "not an array"}"#)?;
        assert_eq!(SentenceStore::load(&path).guild_count(), 0);
        Ok(())
    }

    #[test]
    fn test_load_drops_blank_sentences() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sentences.json");
        fs::write(&path, r#"{"g": ["keep", "  ", "", "also keep"]}"#)?;

        let store = SentenceStore::load(&path);
        assert_eq!(store.list("g"), ["keep", "also keep"]);
        Ok(())
    }

    #[test]
    fn test_random_pick_with_seeded_rng_is_member() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        store.add(TEST_GUILD, "a/b/c")?;
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let picked = store.random_pick_with(TEST_GUILD, &mut rng)?;
            assert!(store.list(TEST_GUILD).iter().any(|s| s == picked));
        }
        Ok(())
    }

    #[test]
    fn test_random_pick_is_roughly_uniform() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        store.add(TEST_GUILD, "a/b/c/d")?;

        let trials = 8000;
        let mut counts = std::collections::HashMap::new();
        for _ in 0..trials {
            *counts.entry(store.random_pick(TEST_GUILD)?.to_string()).or_insert(0) += 1;
        }

        // Expected 2000 each; the bounds sit many standard deviations away
        assert_eq!(counts.len(), 4);
        for (sentence, count) in counts {
            assert!(
                (1600..=2400).contains(&count),
                "{sentence} picked {count} times out of {trials}"
            );
        }
        Ok(())
    }

    #[test]
    fn test_persist_failure_is_reported() -> Result<()> {
        let dir = tempfile::tempdir()?;
        // A directory where the file should be makes the rename fail
        let path = dir.path().join("sentences.json");
        fs::create_dir(&path)?;
        fs::write(path.join("occupied"), "x")?;
        let mut store = SentenceStore::new(&path);

        let result = store.add(TEST_GUILD, "hello");
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Persist { .. }));
        assert!(err.is_fatal());
        Ok(())
    }
}
