//! `Chain` — a singly linked sequence of key/value entries.
//!
//! Each entry owns the link to its successor, so a chain is a `Box` list rather than
//! an index list. Two operations walk the whole list and would recurse once per entry
//! if left to the compiler:
//!
//! - **Deep copy** (`Clone`): walks the source with a read cursor and appends freshly
//!   allocated entries through a write cursor parked on the copy's tail link.
//! - **Teardown** (`Drop`): unlinks entries front to back instead of letting the
//!   nested `Option<Box<_>>` drops recurse.
//!
//! Both run in O(len) time with constant stack depth, so chains of any length are safe
//! to copy and drop.

use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::mem;

/// A single link of a [`Chain`]: a key, a mutable value and the owning link to the next entry.
pub struct Entry<K, V> {
    key: K,
    value: V,
    next: Option<Box<Entry<K, V>>>,
}

impl<K, V> Entry<K, V> {
    fn new(key: K, value: V) -> Self {
        Self { key, value, next: None }
    }

    /// Returns the key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the value mutably. The key and the link stay fixed.
    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Returns the next entry of the chain, if any.
    #[inline]
    pub fn next(&self) -> Option<&Entry<K, V>> {
        self.next.as_deref()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// A singly linked chain of entries, as stored in one bucket of a
/// [`ChainedTable`](crate::ChainedTable).
pub struct Chain<K, V> {
    head: Option<Box<Entry<K, V>>>,
    len: usize,
}

impl<K, V> Chain<K, V> {
    /// Creates an empty chain.
    #[inline]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of entries in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the chain has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the first entry of the chain.
    #[inline]
    pub fn head(&self) -> Option<&Entry<K, V>> {
        self.head.as_deref()
    }

    /// Prepends an entry in O(1). Does not check whether the key is already present.
    pub fn push_front(&mut self, key: K, value: V) {
        let mut entry = Box::new(Entry::new(key, value));
        entry.next = self.head.take();
        self.head = Some(entry);
        self.len += 1;
    }

    /// Unlinks the first entry and returns its key and value.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        self.head.take().map(|entry| {
            let Entry { key, value, next } = *entry;
            self.head = next;
            self.len -= 1;
            (key, value)
        })
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut entry) = link {
            link = entry.next.take();
        }
        self.len = 0;
    }

    /// Returns an iterator over the entries in chain order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { next: self.head.as_deref(), remaining: self.len }
    }

    /// Returns an iterator that allows modifying each value.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut { next: self.head.as_deref_mut(), remaining: self.len }
    }

    /// Produces an independent copy of the chain.
    ///
    /// Same as [`Clone::clone`]; spelled out for call sites that want to say so.
    #[inline]
    #[must_use]
    pub fn deep_copy(&self) -> Self
    where
        K: Clone,
        V: Clone,
    {
        self.clone()
    }
}

impl<K, V> Chain<K, V> {
    /// Returns a reference to the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            if entry.key.borrow() == key {
                return Some(&entry.value);
            }
            cursor = entry.next.as_deref();
        }
        None
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cursor = self.head.as_deref_mut();
        while let Some(entry) = cursor {
            if entry.key.borrow() == key {
                return Some(&mut entry.value);
            }
            cursor = entry.next.as_deref_mut();
        }
        None
    }

    /// Returns `true` if the chain holds an entry for `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.get(key).is_some()
    }

    /// Replaces the value of an existing key, returning the old value, or prepends a
    /// new entry and returns `None`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Eq,
    {
        if let Some(slot) = self.get_mut(&key) {
            return Some(mem::replace(slot, value));
        }
        self.push_front(key, value);
        None
    }

    /// Unlinks the entry for `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut link = &mut self.head;
        loop {
            let found = match link.as_deref() {
                None => return None,
                Some(entry) => entry.key.borrow() == key,
            };
            if found {
                let Entry { value, next, .. } = *link.take()?;
                *link = next;
                self.len -= 1;
                return Some(value);
            }
            link = &mut link.as_mut()?.next;
        }
    }
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Chain<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Clone, V: Clone> Clone for Chain<K, V> {
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        let mut tail = &mut copy.head;
        let mut cursor = self.head.as_deref();
        while let Some(entry) = cursor {
            let fresh = Box::new(Entry::new(entry.key.clone(), entry.value.clone()));
            tail = &mut tail.insert(fresh).next;
            cursor = entry.next.as_deref();
        }
        copy.len = self.len;

        #[cfg(feature = "tracing")]
        tracing::trace!(len = copy.len, "deep-copied chain");

        copy
    }
}

impl<K, V> Extend<(K, V)> for Chain<K, V> {
    /// Appends the pairs at the tail in iteration order. Keys are not deduplicated.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let mut tail = &mut self.head;
        while let Some(entry) = tail {
            tail = &mut entry.next;
        }
        let mut appended = 0;
        for (key, value) in iter {
            tail = &mut tail.insert(Box::new(Entry::new(key, value))).next;
            appended += 1;
        }
        self.len += appended;
    }
}

impl<K, V> FromIterator<(K, V)> for Chain<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut chain = Self::new();
        chain.extend(iter);
        chain
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Chain<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Chain<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Chain<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the entries of a [`Chain`].
pub struct Iter<'a, K, V> {
    next: Option<&'a Entry<K, V>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { next: self.next, remaining: self.remaining }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|entry| {
            self.next = entry.next.as_deref();
            self.remaining -= 1;
            (&entry.key, &entry.value)
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Mutable iterator over the entries of a [`Chain`]. Only values are mutable.
pub struct IterMut<'a, K, V> {
    next: Option<&'a mut Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|entry| {
            let Entry { key, value, next } = entry;
            self.next = next.as_deref_mut();
            self.remaining -= 1;
            (&*key, value)
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Consuming iterator for [`Chain`].
pub struct IntoIter<K, V> {
    chain: Chain<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.chain.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chain.len, Some(self.chain.len))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for Chain<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}

impl<'a, K, V> IntoIterator for &'a Chain<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut Chain<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
