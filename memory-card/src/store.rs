//! The asynchronous map capability shared by every storage backend.
pub mod memory;

use futures::Stream;
use std::error::Error;
use std::future::Future;
use std::hash::Hash;

/// An asynchronous key-value map with explicit persistence.
///
/// In-memory operations never fail, so they return plain values. Only the
/// persistence operations ([`load`](AsyncMap::load), [`save`](AsyncMap::save)
/// and [`destroy`](AsyncMap::destroy)) can report [`AsyncMap::Error`].
///
/// The iteration methods return lazy streams: the mapping is captured when the
/// stream is first polled, and each call produces a fresh stream.
#[cfg_attr(not(target_arch = "wasm32"), trait_variant::make(Send))]
pub trait AsyncMap<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    type Error: Error + Send + Sync + 'static;

    fn get(&self, key: &K) -> impl Future<Output = Option<V>>;
    fn set(&self, key: K, value: V) -> impl Future<Output = ()>;
    fn has(&self, key: &K) -> impl Future<Output = bool>;
    fn delete(&self, key: &K) -> impl Future<Output = ()>;
    fn clear(&self) -> impl Future<Output = ()>;
    fn size(&self) -> impl Future<Output = usize>;

    fn entries(&self) -> impl Stream<Item = (K, V)>;
    fn keys(&self) -> impl Stream<Item = K>;
    fn values(&self) -> impl Stream<Item = V>;

    /// Replaces the in-memory mapping with the persisted one, if any.
    fn load(&self) -> impl Future<Output = Result<(), Self::Error>>;
    /// Writes the whole in-memory mapping to the persistent backend, if any.
    fn save(&self) -> impl Future<Output = Result<(), Self::Error>>;
    /// Clears the mapping and removes its persisted form.
    fn destroy(&self) -> impl Future<Output = Result<(), Self::Error>>;
}
