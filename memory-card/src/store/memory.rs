use super::AsyncMap;
use async_stream::stream;
use futures::Stream;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Error, Debug)]
#[error("memory map error")]
pub struct Error;

/// A purely in-memory [`AsyncMap`].
///
/// Clones share the same underlying map. Persistence operations are no-ops,
/// except [`destroy`](AsyncMap::destroy) which clears the map.
#[derive(Clone)]
pub struct MemoryMap<K, V> {
    store: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Default for MemoryMap<K, V> {
    fn default() -> Self {
        Self { store: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl<K, V> MemoryMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, V> AsyncMap<K, V> for MemoryMap<K, V>
where
    K: Debug + Clone + Eq + Hash + Send + Sync + 'static,
    V: Debug + Clone + Send + Sync + 'static,
{
    type Error = Error;

    async fn get(&self, key: &K) -> Option<V> {
        self.store.read().await.get(key).cloned()
    }
    async fn set(&self, key: K, value: V) {
        self.store.write().await.insert(key, value);
    }
    async fn has(&self, key: &K) -> bool {
        self.store.read().await.contains_key(key)
    }
    async fn delete(&self, key: &K) {
        self.store.write().await.remove(key);
    }
    async fn clear(&self) {
        self.store.write().await.clear();
    }
    async fn size(&self) -> usize {
        self.store.read().await.len()
    }
    fn entries(&self) -> impl Stream<Item = (K, V)> + Send {
        stream! {
            let snapshot = self.store.read().await.clone();
            for pair in snapshot {
                yield pair;
            }
        }
    }
    fn keys(&self) -> impl Stream<Item = K> + Send {
        stream! {
            let snapshot = self.store.read().await.keys().cloned().collect::<Vec<_>>();
            for key in snapshot {
                yield key;
            }
        }
    }
    fn values(&self) -> impl Stream<Item = V> + Send {
        stream! {
            let snapshot = self.store.read().await.values().cloned().collect::<Vec<_>>();
            for value in snapshot {
                yield value;
            }
        }
    }
    async fn load(&self) -> Result<(), Self::Error> {
        debug!("load() no backend, NOOP");
        Ok(())
    }
    async fn save(&self) -> Result<(), Self::Error> {
        debug!("save() no backend, NOOP");
        Ok(())
    }
    async fn destroy(&self) -> Result<(), Self::Error> {
        self.clear().await;
        Ok(())
    }
}
