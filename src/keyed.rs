//! Map keyed through a caller-supplied key function
//!
//! `KeyedMap<K, V>` lets structurally-equal keys that are not `Hash + Eq`
//! themselves (or whose natural equality is too strict) share one slot: the
//! identity of a key is the `String` its key function derives. The key object
//! itself is stored next to the value and handed back on iteration.
//!
//! Iteration follows the order in which each derived key was first inserted;
//! overwriting a key keeps its position, deleting and re-inserting moves it
//! to the end.

use std::collections::HashMap;
use std::fmt;

/// Derives the identity string of a key
pub type KeyFnBox<K> = Box<dyn Fn(&K) -> String>;

pub struct KeyedMap<K, V> {
    key_fn: KeyFnBox<K>,
    slots: HashMap<String, usize>,
    entries: Vec<(String, K, V)>,
}

impl<K, V> KeyedMap<K, V> {
    pub fn new(key_fn: impl Fn(&K) -> String + 'static) -> Self {
        Self {
            key_fn: Box::new(key_fn),
            slots: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Build from `(key, value)` pairs; later pairs overwrite earlier ones
    /// with the same derived key.
    pub fn from_entries<I>(entries: I, key_fn: impl Fn(&K) -> String + 'static) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new(key_fn);
        for (k, v) in entries {
            map.set(k, v);
        }
        map
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let slot = *self.slots.get(&(self.key_fn)(key))?;
        Some(&self.entries[slot].2)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = *self.slots.get(&(self.key_fn)(key))?;
        Some(&mut self.entries[slot].2)
    }

    /// Store `value` under `key`, replacing both the stored key object and
    /// the value of an existing entry with the same derived key.
    ///
    /// Returns the replaced value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let derived = (self.key_fn)(&key);
        match self.slots.get(&derived) {
            Some(&slot) => {
                let entry = &mut self.entries[slot];
                entry.1 = key;
                Some(std::mem::replace(&mut entry.2, value))
            }
            None => {
                self.slots.insert(derived.clone(), self.entries.len());
                self.entries.push((derived, key, value));
                None
            }
        }
    }

    /// Remove the entry for `key`, returning the stored key and value.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let slot = self.slots.remove(&(self.key_fn)(key))?;
        let (_, k, v) = self.entries.remove(slot);
        for (derived, _, _) in &self.entries[slot..] {
            if let Some(s) = self.slots.get_mut(derived) {
                *s -= 1;
            }
        }
        Some((k, v))
    }

    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    pub fn has(&self, key: &K) -> bool {
        self.slots.contains_key(&(self.key_fn)(key))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored key objects, in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(_, k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, _, v)| v)
    }

    /// `(key, value)` pairs, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(_, k, v)| (k, v))
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for KeyedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
