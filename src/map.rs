//! Implementation of maps, backed by a dense slice and a position index
#![warn(missing_docs)]

extern crate alloc;

use alloc::{string::String, vec::Vec};
use compact_str::CompactString;
use core::{hash::{BuildHasher, Hash}, iter::FusedIterator, mem, slice};
use hashbrown::{hash_map::DefaultHashBuilder, HashMap};
use rand::Rng;

//-----------------------------------------------------------------------------------------------//

/// A map between keys and values, implemented using a dense slice and a position index.
#[derive(Clone)]
pub struct RandomMap<K, V, S = DefaultHashBuilder>
where
    K: Eq + Hash + Clone,
{
    entries: Vec<(K, V)>,
    slots: HashMap<K, usize, S>,
}

impl<K, V> RandomMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Constructor
    pub fn new() -> RandomMap<K, V> {
        RandomMap {
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> RandomMap<K, V> {
        RandomMap {
            entries: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }
}

impl<K, V, S> RandomMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Constructor
    pub fn with_hasher(hash_builder: S) -> RandomMap<K, V, S> {
        RandomMap {
            entries: Vec::new(),
            slots: HashMap::with_hasher(hash_builder),
        }
    }

    /// Constructor
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> RandomMap<K, V, S> {
        RandomMap {
            entries: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Get the number of key/value pairs in the `RandomMap`
    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are any key/value pairs in the `RandomMap`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all key/value pairs from the `RandomMap`
    pub fn clear(&mut self) {
        self.slots.clear();
        self.entries.truncate(0);
    }

    /// Reserves capacity for at least `additional` more key/value pairs
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
        self.entries.reserve(additional);
    }

    /// Get a value by key.
    ///
    /// If the key is not in the map then `None` is returned.
    pub fn get(&self, key: &K) -> Option<&V> {
        let slot = *self.slots.get(key)?;
        self.entries.get(slot).map(|(_, value)| value)
    }

    /// Get a mutable reference by key.
    ///
    /// If the key is not in the map then `None` is returned - this function will not create a
    /// key if it does not exist. In this case use `insert` instead.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let slot = *self.slots.get(key)?;
        self.entries.get_mut(slot).map(|(_, value)| value)
    }

    /// Check if a key is in the `RandomMap`
    pub fn contains_key(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Insert a key/value pair into the `RandomMap`.
    ///
    /// If the key is already present its value is replaced in place, the key keeps its slot and
    /// the old value is returned. Otherwise the pair is appended to the dense slice and `None`
    /// is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.slots.get(&key) {
            Some(&slot) => Some(mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.slots.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a key from the `RandomMap`.
    ///
    /// The departing pair is swapped with the pair in the last slot and the tail is popped, so
    /// no other pair changes slot. Returns the removed value, or `None` if the key was not in
    /// the map.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.slots.remove(key)?;
        let (_, value) = self.entries.swap_remove(slot);

        // The pair from the last slot now occupies `slot`, unless the removed pair was the last
        if slot < self.entries.len() {
            if let Some(position) = self.slots.get_mut(&self.entries[slot].0) {
                *position = slot;
            }
        }

        Some(value)
    }

    /// Draw a key/value pair from the `RandomMap` uniformly at random.
    ///
    /// Each call is an independent draw over the current contents and the map is not modified.
    /// If the map is empty then `None` is returned.
    pub fn choose<R>(&self, rng: &mut R) -> Option<(&K, &V)>
    where
        R: Rng + ?Sized,
    {
        if self.entries.is_empty() {
            return None;
        }

        let slot = rng.random_range(0..self.entries.len());
        let (key, value) = &self.entries[slot];
        Some((key, value))
    }

    /// Draw a key/value pair from the `RandomMap` uniformly at random, returning the value
    /// mutably.
    ///
    /// If the map is empty then `None` is returned.
    pub fn choose_mut<R>(&mut self, rng: &mut R) -> Option<(&K, &mut V)>
    where
        R: Rng + ?Sized,
    {
        if self.entries.is_empty() {
            return None;
        }

        let slot = rng.random_range(0..self.entries.len());
        let (key, value) = &mut self.entries[slot];
        Some((&*key, value))
    }

    /// Draw a key/value pair from the `RandomMap` uniformly at random and remove it.
    ///
    /// Repeated calls draw without replacement, consuming the map in a uniformly random order.
    /// If the map is empty then `None` is returned.
    pub fn pop_random<R>(&mut self, rng: &mut R) -> Option<(K, V)>
    where
        R: Rng + ?Sized,
    {
        if self.entries.is_empty() {
            return None;
        }

        let slot = rng.random_range(0..self.entries.len());
        let (key, value) = self.entries.swap_remove(slot);
        self.slots.remove(&key);

        if slot < self.entries.len() {
            if let Some(position) = self.slots.get_mut(&self.entries[slot].0) {
                *position = slot;
            }
        }

        Some((key, value))
    }

    /// Iterate over the key/value pairs in the `RandomMap`
    ///
    /// The order of iteration is arbitrary.
    pub fn iter(&self) -> RandomMapIterator<'_, K, V> {
        RandomMapIterator {
            entries: self.entries.iter(),
        }
    }
}

impl<K, V> Default for RandomMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, V, S> IntoIterator for &'a RandomMap<K, V, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    type Item = &'a (K, V);
    type IntoIter = RandomMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for RandomMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `RandomMap`
pub struct RandomMapIterator<'a, K, V> {
    entries: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for RandomMapIterator<'a, K, V> {
    type Item = &'a (K, V);

    fn next(&mut self) -> Option<&'a (K, V)> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> FusedIterator for RandomMapIterator<'_, K, V> {}

//-----------------------------------------------------------------------------------------------//

/// A map between strings and values, implemented using a dense slice and a position index.
///
/// This is a specialised version of `RandomMap` that stores keys as a string.
pub struct StringRandomMap<V> {
    entries: Vec<(CompactString, V)>,
    slots: HashMap<CompactString, usize>,
}

impl<V> StringRandomMap<V> {
    /// Constructor
    pub fn new() -> StringRandomMap<V> {
        StringRandomMap {
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> StringRandomMap<V> {
        StringRandomMap {
            entries: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Get the number of string/value pairs in the `StringRandomMap`
    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are any string/value pairs in the `StringRandomMap`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all string/value pairs from the `StringRandomMap`
    pub fn clear(&mut self) {
        self.slots.clear();
        self.entries.truncate(0);
    }

    /// Reserves capacity for at least `additional` more string/value pairs
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
        self.entries.reserve(additional);
    }

    /// Get a value by string.
    ///
    /// If the string is not in the map then `None` is returned.
    pub fn get(&self, key: &str) -> Option<&V> {
        let slot = *self.slots.get(key)?;
        self.entries.get(slot).map(|(_, value)| value)
    }

    /// Get a mutable reference by string.
    ///
    /// If the string is not in the map then `None` is returned - this function will not create
    /// a string if it does not exist. In this case use `insert` instead.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let slot = *self.slots.get(key)?;
        self.entries.get_mut(slot).map(|(_, value)| value)
    }

    /// Check if a string is in the `StringRandomMap`
    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Insert a string/value pair into the `StringRandomMap`.
    ///
    /// If the string is already present its value is replaced in place, the string keeps its
    /// slot and the old value is returned. Otherwise the pair is appended to the dense slice
    /// and `None` is returned.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        match self.slots.get(key) {
            Some(&slot) => Some(mem::replace(&mut self.entries[slot].1, value)),
            None => {
                self.slots.insert(CompactString::new(key), self.entries.len());
                self.entries.push((CompactString::new(key), value));
                None
            }
        }
    }

    /// Remove a string from the `StringRandomMap`.
    ///
    /// The departing pair is swapped with the pair in the last slot and the tail is popped, so
    /// no other pair changes slot. Returns the removed value, or `None` if the string was not
    /// in the map.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let slot = self.slots.remove(key)?;
        let (_, value) = self.entries.swap_remove(slot);

        if slot < self.entries.len() {
            if let Some(position) = self.slots.get_mut(self.entries[slot].0.as_str()) {
                *position = slot;
            }
        }

        Some(value)
    }

    /// Draw a string/value pair from the `StringRandomMap` uniformly at random.
    ///
    /// Each call is an independent draw over the current contents and the map is not modified.
    /// If the map is empty then `None` is returned.
    pub fn choose<R>(&self, rng: &mut R) -> Option<(&str, &V)>
    where
        R: Rng + ?Sized,
    {
        if self.entries.is_empty() {
            return None;
        }

        let slot = rng.random_range(0..self.entries.len());
        let entry = &self.entries[slot];
        Some((entry.0.as_str(), &entry.1))
    }

    /// Draw a string/value pair from the `StringRandomMap` uniformly at random, returning the
    /// value mutably.
    ///
    /// If the map is empty then `None` is returned.
    pub fn choose_mut<R>(&mut self, rng: &mut R) -> Option<(&str, &mut V)>
    where
        R: Rng + ?Sized,
    {
        if self.entries.is_empty() {
            return None;
        }

        let slot = rng.random_range(0..self.entries.len());
        let entry = &mut self.entries[slot];
        Some((entry.0.as_str(), &mut entry.1))
    }

    /// Draw a string/value pair from the `StringRandomMap` uniformly at random and remove it.
    ///
    /// Repeated calls draw without replacement, consuming the map in a uniformly random order.
    /// The drawn string is returned by value. If the map is empty then `None` is returned.
    pub fn pop_random<R>(&mut self, rng: &mut R) -> Option<(String, V)>
    where
        R: Rng + ?Sized,
    {
        if self.entries.is_empty() {
            return None;
        }

        let slot = rng.random_range(0..self.entries.len());
        let (key, value) = self.entries.swap_remove(slot);
        self.slots.remove(key.as_str());

        if slot < self.entries.len() {
            if let Some(position) = self.slots.get_mut(self.entries[slot].0.as_str()) {
                *position = slot;
            }
        }

        Some((key.into_string(), value))
    }

    /// Iterate over the string/value pairs in the `StringRandomMap`
    ///
    /// The order of iteration is arbitrary.
    pub fn iter(&self) -> StringRandomMapIterator<'_, V> {
        StringRandomMapIterator {
            entries: self.entries.iter(),
        }
    }
}

impl<V> Default for StringRandomMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V> IntoIterator for &'a StringRandomMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = StringRandomMapIterator<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> FromIterator<(&'a str, V)> for StringRandomMap<V> {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `StringRandomMap`
pub struct StringRandomMapIterator<'a, V> {
    entries: slice::Iter<'a, (CompactString, V)>,
}

impl<'a, V> Iterator for StringRandomMapIterator<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<(&'a str, &'a V)> {
        let (key, value) = self.entries.next()?;
        Some((key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<V> FusedIterator for StringRandomMapIterator<'_, V> {}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn check_map<K, V, S>(map: &RandomMap<K, V, S>)
where
    K: Eq + Hash + Clone + core::fmt::Debug,
{
    debug_assert_eq!(map.entries.len(), map.slots.len());
    for (key, &slot) in &map.slots {
        debug_assert_eq!(&map.entries[slot].0, key);
    }
}

#[test]
// A very simple test of inserting, replacing and removing
fn test_map_0() {
    use alloc::string::ToString;

    let mut map = RandomMap::new();

    debug_assert_eq!(map.insert(5, "Five".to_string()), None);
    debug_assert_eq!(map.insert(1, "One".to_string()), None);
    debug_assert_eq!(map.insert(9, "Nine".to_string()), None);
    debug_assert_eq!(map.count(), 3);

    debug_assert_eq!(map.get(&5), Some(&"Five".to_string()));
    debug_assert_eq!(map.get(&4), None);

    // Replacing a value hands back the old one and does not grow the map
    debug_assert_eq!(map.insert(5, "five".to_string()), Some("Five".to_string()));
    debug_assert_eq!(map.count(), 3);

    if let Some(value) = map.get_mut(&1) {
        value.push('!');
    }
    debug_assert_eq!(map.get(&1), Some(&"One!".to_string()));

    debug_assert_eq!(map.remove(&9), Some("Nine".to_string()));
    debug_assert_eq!(map.remove(&9), None);
    debug_assert_eq!(map.count(), 2);
    check_map(&map);
}

#[test]
// Draws return pairs that are in the map
fn test_map_1() {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut map = RandomMap::new();
    debug_assert_eq!(map.choose(&mut rng), None);

    for key in 0..10u32 {
        map.insert(key, key * key);
    }

    for _ in 0..100 {
        let (&key, &value) = map.choose(&mut rng).unwrap();
        debug_assert_eq!(value, key * key);
    }

    if let Some((_, value)) = map.choose_mut(&mut rng) {
        *value = 1000;
    }
    debug_assert_eq!(map.count(), 10);
    check_map(&map);
}

#[test]
// A stress test with inserting, getting and removing
fn test_map_2() {
    use alloc::string::ToString;
    use rand::prelude::*;

    const COUNT: usize = 1000000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut map = RandomMap::new();
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        map.insert(key, value);
    }

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        debug_assert_eq!(map.get(&key), Some(&value));
    }

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        map.remove(&key);
    }

    debug_assert_eq!(map.count(), 0);
}

#[test]
// The dense slice and the position index stay consistent through a random workload
fn test_map_3() {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(5678901234);

    let mut map = RandomMap::new();
    for step in 0..10000u32 {
        let key = rng.random_range(0..64u32);
        match rng.random_range(0..3u32) {
            0 => {
                let present = map.contains_key(&key);
                debug_assert_eq!(map.insert(key, step).is_some(), present);
            }
            1 => {
                let present = map.contains_key(&key);
                debug_assert_eq!(map.remove(&key).is_some(), present);
            }
            _ => {
                if let Some((key, _)) = map.pop_random(&mut rng) {
                    debug_assert!(!map.contains_key(&key));
                }
            }
        }
        check_map(&map);
    }
}

#[test]
// Popping randomly drains the map with no repeats
fn test_map_4() {
    use alloc::string::ToString;
    use rand::prelude::*;

    const COUNT: usize = 1000;

    let mut map = RandomMap::new();
    for key in 0..COUNT {
        map.insert(key, key.to_string());
    }

    let mut rng = SmallRng::seed_from_u64(9876543210);
    let mut seen = [false; COUNT];
    for remaining in (0..COUNT).rev() {
        let (key, value) = map.pop_random(&mut rng).unwrap();
        debug_assert_eq!(value, key.to_string());
        debug_assert!(!seen[key]);
        seen[key] = true;
        debug_assert_eq!(map.count(), remaining);
    }

    debug_assert!(map.is_empty());
    debug_assert_eq!(map.pop_random(&mut rng), None);
}

#[test]
// Collecting and iterating cover the same pairs
fn test_map_5() {
    let map: RandomMap<u32, u32> = (0..100).map(|key| (key, 2 * key)).collect();
    debug_assert_eq!(map.count(), 100);

    let mut total = 0;
    for (key, value) in &map {
        debug_assert_eq!(*value, 2 * key);
        total += *value;
    }
    debug_assert_eq!(total, 9900);
}

#[test]
// A very simple test of a string map
fn test_string_map_0() {
    use rand::prelude::*;

    let mut map = StringRandomMap::new();

    debug_assert_eq!(map.insert("Five", 5), None);
    debug_assert_eq!(map.insert("One", 1), None);
    debug_assert_eq!(map.insert("Nine", 9), None);
    debug_assert_eq!(map.insert("Five", 55), Some(5));
    debug_assert_eq!(map.count(), 3);

    debug_assert_eq!(map.get("Five"), Some(&55));
    debug_assert_eq!(map.get("Seven"), None);

    if let Some(value) = map.get_mut("One") {
        *value = 11;
    }
    debug_assert_eq!(map.get("One"), Some(&11));

    debug_assert_eq!(map.remove("Nine"), Some(9));
    debug_assert_eq!(map.remove("Nine"), None);

    let mut rng = SmallRng::seed_from_u64(1234567890);
    let (key, value) = map.choose(&mut rng).unwrap();
    debug_assert!((key == "Five" && *value == 55) || (key == "One" && *value == 11));

    let (key, _) = map.pop_random(&mut rng).unwrap();
    debug_assert!(!map.contains_key(&key));
    debug_assert_eq!(map.count(), 1);
}
