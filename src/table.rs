//! `ChainedTable` — a separate-chaining hash table with deep-copy semantics.
//!
//! The table is a fixed-size array of buckets, each owning one [`Chain`]. The bucket
//! count is chosen at construction and never changes, so a key always lives in
//! bucket `hash(key) % bucket_count` for the lifetime of the table.
//!
//! Copies come in two flavours:
//! - **Deep copy** (`Clone`): every chain is copied entry by entry with the iterative
//!   routine from [`chain`](crate::chain). The hasher is cloned too, so the copy has the
//!   same bucket layout as the original.
//! - **Copy factory** ([`ChainedTable::copy_of`]): builds an independent table from any
//!   source of borrowed pairs, such as another table or a `std` map.
//!
//! No entry is ever shared between two tables; mutating one never affects another.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use std::collections::hash_map::RandomState;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::chain::{self, Chain};
use crate::config::TableConfig;

/// Bucket count used by [`ChainedTable::new`] and [`TableConfig::default`].
pub const DEFAULT_BUCKETS: usize = 16;

/// A hash table with a fixed bucket array and singly linked chains.
pub struct ChainedTable<K, V, S = RandomState> {
    /// One chain per bucket; the slice length is the bucket count.
    buckets: Box<[Chain<K, V>]>,
    /// Sum of all chain lengths.
    len: usize,
    hash_builder: S,
}

impl<K, V> ChainedTable<K, V, RandomState> {
    /// Creates an empty table with [`DEFAULT_BUCKETS`] buckets.
    #[inline]
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Creates an empty table with exactly `buckets` buckets.
    ///
    /// # Panics
    /// Panics if `buckets` is 0.
    #[inline]
    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_buckets_and_hasher(buckets, RandomState::new())
    }

    /// Creates an empty table laid out as described by `config`.
    #[inline]
    pub fn with_config(config: &TableConfig) -> Self {
        Self::with_buckets(config.buckets())
    }

    /// Copy factory: builds an independent table holding clones of `pairs`.
    ///
    /// Accepts any source of borrowed pairs, e.g. another `ChainedTable` (regardless
    /// of its hasher) or a `std::collections::HashMap`. Later pairs win on duplicate keys.
    pub fn copy_of<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: 'a + Clone + Eq + Hash,
        V: 'a + Clone,
    {
        let mut table = Self::new();
        table.extend(pairs.into_iter().map(|(k, v)| (k.clone(), v.clone())));
        table
    }
}

impl<K, V, S> ChainedTable<K, V, S> {
    /// Creates an empty table with `buckets` buckets and the given hasher.
    ///
    /// # Panics
    /// Panics if `buckets` is 0.
    pub fn with_buckets_and_hasher(buckets: usize, hash_builder: S) -> Self {
        assert!(buckets > 0, "bucket count must be non-zero");
        Self {
            buckets: (0..buckets).map(|_| Chain::new()).collect(),
            len: 0,
            hash_builder,
        }
    }

    /// Returns the number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed number of buckets.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the chain stored in bucket `index`, or `None` if out of bounds.
    #[inline]
    pub fn chain(&self, index: usize) -> Option<&Chain<K, V>> {
        self.buckets.get(index)
    }

    /// Returns an iterator over the bucket chains in bucket order.
    #[inline]
    pub fn chains(&self) -> core::slice::Iter<'_, Chain<K, V>> {
        self.buckets.iter()
    }

    /// Returns the table's hasher.
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry, keeping the bucket array.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Chain::clear);
        self.len = 0;
    }

    /// Returns an iterator over all entries, in bucket order then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { buckets: self.buckets.iter(), current: None, remaining: self.len }
    }

    /// Returns an iterator that allows modifying each value.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut { buckets: self.buckets.iter_mut(), current: None, remaining: self.len }
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, S> ChainedTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    #[allow(clippy::cast_possible_truncation)]
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        // The remainder is below `buckets.len()`, so it always fits in a usize.
        (self.hash_builder.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Inserts a key-value pair.
    ///
    /// If the key is present its value is replaced and the old value returned; the
    /// entry keeps its position in the chain. New keys are prepended to their chain.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let previous = self.buckets[index].insert(key, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.buckets[self.bucket_index(key)].get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        self.buckets[index].get_mut(key)
    }

    /// Returns `true` if the table holds an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Removes the entry for `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        let removed = self.buckets[index].remove(key);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }
}

impl<K, V, S: Default> Default for ChainedTable<K, V, S> {
    fn default() -> Self {
        Self::with_buckets_and_hasher(DEFAULT_BUCKETS, S::default())
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for ChainedTable<K, V, S> {
    fn clone(&self) -> Self {
        let buckets: Box<[Chain<K, V>]> = self.buckets.iter().map(Chain::clone).collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(buckets = buckets.len(), len = self.len, "deep-copied table");

        Self { buckets, len: self.len, hash_builder: self.hash_builder.clone() }
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K, V, S> PartialEq for ChainedTable<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Eq + Hash, V: Eq, S: BuildHasher> Eq for ChainedTable<K, V, S> {}

/// Renders the table as `{k1=v1, k2=v2}` in iteration order.
impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for ChainedTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Serialize, V: Serialize, S> Serialize for ChainedTable<K, V, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.len))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

type TableMarker<K, V, S> = PhantomData<fn() -> ChainedTable<K, V, S>>;

struct TableVisitor<K, V, S> {
    marker: TableMarker<K, V, S>,
}

impl<'de, K, V, S> Visitor<'de> for TableVisitor<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = ChainedTable<K, V, S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = ChainedTable::default();
        while let Some((key, value)) = access.next_entry()? {
            table.insert(key, value);
        }
        Ok(table)
    }
}

impl<'de, K, V, S> Deserialize<'de> for ChainedTable<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor { marker: PhantomData })
    }
}

/// Iterator over the entries of a [`ChainedTable`].
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain<K, V>>,
    current: Option<chain::Iter<'a, K, V>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { buckets: self.buckets.clone(), current: self.current.clone(), remaining: self.remaining }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Mutable iterator over the entries of a [`ChainedTable`].
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Chain<K, V>>,
    current: Option<chain::IterMut<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            self.current = Some(self.buckets.next()?.iter_mut());
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Consuming iterator for [`ChainedTable`].
pub struct IntoIter<K, V> {
    buckets: std::vec::IntoIter<Chain<K, V>>,
    current: Option<chain::IntoIter<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            self.current = Some(self.buckets.next()?.into_iter());
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Iterator over the keys of a [`ChainedTable`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

/// Iterator over the values of a [`ChainedTable`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<K, V, S> IntoIterator for ChainedTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { buckets: self.buckets.into_vec().into_iter(), current: None, remaining: self.len }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainedTable<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
