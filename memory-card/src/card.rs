//! A key-value [`Card`] optionally persisted to a single JSON file.
mod options;

pub use self::options::{Options, DEFAULT_SUFFIX};
use crate::error::{Error, Result};
use crate::store::AsyncMap;
use async_stream::stream;
use futures::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, error};

/// The complete in-memory mapping of slot names to values.
pub type Payload = Map<String, Value>;

/// A string-keyed map of JSON values, persisted to `<name>.memory-card.json`.
///
/// A card created without a name is memory-only: [`load`](AsyncMap::load) and
/// [`save`](AsyncMap::save) do nothing. Mutations only touch memory until
/// [`save`](AsyncMap::save) is called.
///
/// ```no_run
/// # async fn run() -> memory_card::Result<()> {
/// use memory_card::{AsyncMap, Card};
/// use serde_json::json;
///
/// let card = Card::new("bot")?;
/// card.load().await?;
/// card.set(String::from("greeting"), json!("hello")).await;
/// card.save().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Card {
    name: Option<String>,
    path: RwLock<Option<PathBuf>>,
    payload: RwLock<Payload>,
}

impl Card {
    /// Creates a card backed by the file resolved from `name` against the current directory.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::with_options(name, &Options::default())
    }
    /// Creates a card whose backing file is resolved with the given [`Options`].
    ///
    /// An empty `name` creates a memory-only card, like [`Card::memory`].
    pub fn with_options(name: impl Into<String>, options: &Options) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Ok(Self::memory());
        }
        debug!("constructor({name})");
        let path = options.resolve(&name)?;
        Ok(Self {
            name: Some(name),
            path: RwLock::new(Some(path)),
            payload: RwLock::new(Payload::new()),
        })
    }
    /// Creates a memory-only card.
    pub fn memory() -> Self {
        debug!("constructor()");
        Self::default()
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    /// The backing file, or `None` for memory-only cards and destroyed cards.
    pub async fn path(&self) -> Option<PathBuf> {
        self.path.read().await.clone()
    }
    pub fn version(&self) -> &'static str {
        crate::VERSION
    }
    /// Iterates over `(slot, value)` pairs; the same stream as [`entries`](AsyncMap::entries).
    pub fn stream(&self) -> impl Stream<Item = (String, Value)> + Send + '_ {
        self.entries()
    }
    /// Returns a copy of the whole payload.
    pub async fn snapshot(&self) -> Payload {
        self.payload.read().await.clone()
    }
    /// Reads `slot` and deserializes it into `T`.
    pub async fn get_as<T>(&self, slot: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        debug!("get_as({slot})");
        match self.payload.read().await.get(slot) {
            Some(value) => Ok(Some(T::deserialize(value)?)),
            None => Ok(None),
        }
    }
    /// Serializes `value` and stores it under `slot`.
    pub async fn set_as<T>(&self, slot: impl Into<String>, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let slot = slot.into();
        debug!("set_as({slot})");
        let value = serde_json::to_value(value)?;
        self.payload.write().await.insert(slot, value);
        Ok(())
    }
    async fn read_file(&self, path: &Path) -> Result<Option<String>> {
        if !tokio::fs::try_exists(path).await.map_err(|e| Error::io(path, e))? {
            return Ok(None);
        }
        tokio::fs::read_to_string(path).await.map(Some).map_err(|e| Error::io(path, e))
    }
    async fn write_file(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string(&*self.payload.read().await)?;
        tokio::fs::write(path, text).await.map_err(|e| Error::io(path, e))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryCard<{}>", self.name.as_deref().unwrap_or_default())
    }
}

impl AsyncMap<String, Value> for Card {
    type Error = Error;

    async fn get(&self, slot: &String) -> Option<Value> {
        debug!("get({slot})");
        self.payload.read().await.get(slot).cloned()
    }
    async fn set(&self, slot: String, value: Value) {
        debug!("set({slot}, {value})");
        self.payload.write().await.insert(slot, value);
    }
    async fn has(&self, slot: &String) -> bool {
        debug!("has({slot})");
        self.payload.read().await.contains_key(slot)
    }
    async fn delete(&self, slot: &String) {
        debug!("delete({slot})");
        self.payload.write().await.remove(slot);
    }
    async fn clear(&self) {
        debug!("clear()");
        self.payload.write().await.clear();
    }
    async fn size(&self) -> usize {
        debug!("size");
        self.payload.read().await.len()
    }
    fn entries(&self) -> impl Stream<Item = (String, Value)> + Send {
        debug!("entries()");
        stream! {
            let snapshot = self.payload.read().await.clone();
            for pair in snapshot {
                yield pair;
            }
        }
    }
    fn keys(&self) -> impl Stream<Item = String> + Send {
        debug!("keys()");
        stream! {
            let snapshot = self.payload.read().await.keys().cloned().collect::<Vec<_>>();
            for slot in snapshot {
                yield slot;
            }
        }
    }
    fn values(&self) -> impl Stream<Item = Value> + Send {
        debug!("values()");
        stream! {
            let snapshot = self.payload.read().await.values().cloned().collect::<Vec<_>>();
            for value in snapshot {
                yield value;
            }
        }
    }
    async fn load(&self) -> Result<()> {
        let Some(path) = self.path().await else {
            debug!("load() no file, NOOP");
            return Ok(());
        };
        debug!("load() file: {path:?}");
        let Some(text) = self.read_file(&path).await? else {
            debug!("load() file not exist, NOOP");
            return Ok(());
        };
        match serde_json::from_str::<Payload>(&text) {
            Ok(payload) => *self.payload.write().await = payload,
            Err(err) => error!("load() exception: {err}"),
        }
        Ok(())
    }
    async fn save(&self) -> Result<()> {
        let Some(path) = self.path().await else {
            debug!("save() no file, NOOP");
            return Ok(());
        };
        debug!("save() file: {path:?}");
        self.write_file(&path).await.map_err(|err| {
            error!("save() exception: {err}");
            err
        })
    }
    async fn destroy(&self) -> Result<()> {
        let mut path = self.path.write().await;
        debug!("destroy() file: {:?}", *path);
        self.clear().await;
        if let Some(file) = path.clone() {
            if tokio::fs::try_exists(&file).await.map_err(|e| Error::io(&file, e))? {
                tokio::fs::remove_file(&file).await.map_err(|e| Error::io(&file, e))?;
                *path = None;
            }
        }
        Ok(())
    }
}
