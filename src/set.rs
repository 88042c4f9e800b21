//! Implementation of sets, backed by a dense slice and a position index
#![warn(missing_docs)]

extern crate alloc;

use alloc::{string::String, vec::Vec};
use compact_str::CompactString;
use core::{hash::{BuildHasher, Hash}, iter::FusedIterator, slice};
use hashbrown::{hash_map::DefaultHashBuilder, HashMap};
use rand::Rng;

//-----------------------------------------------------------------------------------------------//

/// A set of keys, implemented using a dense slice and a position index.
#[derive(Clone)]
pub struct RandomSet<K, S = DefaultHashBuilder>
where
    K: Eq + Hash + Clone,
{
    keys: Vec<K>,
    slots: HashMap<K, usize, S>,
}

impl<K> RandomSet<K>
where
    K: Eq + Hash + Clone,
{
    /// Constructor
    pub fn new() -> RandomSet<K> {
        RandomSet {
            keys: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> RandomSet<K> {
        RandomSet {
            keys: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }
}

impl<K, S> RandomSet<K, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    /// Constructor
    pub fn with_hasher(hash_builder: S) -> RandomSet<K, S> {
        RandomSet {
            keys: Vec::new(),
            slots: HashMap::with_hasher(hash_builder),
        }
    }

    /// Constructor
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> RandomSet<K, S> {
        RandomSet {
            keys: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Get the number of keys in the `RandomSet`
    #[inline]
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    /// Check if there are any keys in the `RandomSet`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Remove all keys from the `RandomSet`
    pub fn clear(&mut self) {
        self.slots.clear();
        self.keys.truncate(0);
    }

    /// Reserves capacity for at least `additional` more keys
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
        self.keys.reserve(additional);
    }

    /// Get the stored copy of a key.
    ///
    /// If the key is not in the set then `None` is returned.
    pub fn get(&self, key: &K) -> Option<&K> {
        let slot = *self.slots.get(key)?;
        self.keys.get(slot)
    }

    /// Check if a key is in the `RandomSet`
    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Insert a key into the `RandomSet`.
    ///
    /// If the key is already present the set is unchanged and `false` is returned. Otherwise the
    /// key is appended to the dense slice, its slot is recorded in the position index and `true`
    /// is returned.
    pub fn insert(&mut self, key: K) -> bool {
        if self.slots.contains_key(&key) {
            return false;
        }

        self.slots.insert(key.clone(), self.keys.len());
        self.keys.push(key);
        true
    }

    /// Remove a key from the `RandomSet`.
    ///
    /// The departing key is swapped with the key in the last slot and the tail is popped, so no
    /// other key changes slot. Returns `true` if the key was present and `false` otherwise, in
    /// which case the set is unchanged.
    pub fn remove(&mut self, key: &K) -> bool {
        let slot = match self.slots.remove(key) {
            Some(slot) => slot,
            None => return false,
        };

        self.keys.swap_remove(slot);

        // The key from the last slot now occupies `slot`, unless the removed key was the last
        if slot < self.keys.len() {
            if let Some(position) = self.slots.get_mut(&self.keys[slot]) {
                *position = slot;
            }
        }

        true
    }

    /// Draw a key from the `RandomSet` uniformly at random.
    ///
    /// Each call is an independent draw over the current contents and the set is not modified.
    /// If the set is empty then `None` is returned.
    pub fn choose<R>(&self, rng: &mut R) -> Option<&K>
    where
        R: Rng + ?Sized,
    {
        if self.keys.is_empty() {
            return None;
        }

        let slot = rng.random_range(0..self.keys.len());
        self.keys.get(slot)
    }

    /// Draw a key from the `RandomSet` uniformly at random and remove it.
    ///
    /// Repeated calls draw without replacement, consuming the set in a uniformly random order.
    /// If the set is empty then `None` is returned.
    pub fn pop_random<R>(&mut self, rng: &mut R) -> Option<K>
    where
        R: Rng + ?Sized,
    {
        if self.keys.is_empty() {
            return None;
        }

        let slot = rng.random_range(0..self.keys.len());
        let key = self.keys.swap_remove(slot);
        self.slots.remove(&key);

        if slot < self.keys.len() {
            if let Some(position) = self.slots.get_mut(&self.keys[slot]) {
                *position = slot;
            }
        }

        Some(key)
    }

    /// Iterate over the keys in the `RandomSet`
    ///
    /// The order of iteration is arbitrary.
    pub fn iter(&self) -> RandomSetIterator<'_, K> {
        RandomSetIterator {
            keys: self.keys.iter(),
        }
    }
}

impl<K> Default for RandomSet<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K, S> IntoIterator for &'a RandomSet<K, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    type Item = &'a K;
    type IntoIter = RandomSetIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> FromIterator<K> for RandomSet<K>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for key in iter {
            set.insert(key);
        }
        set
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `RandomSet`
pub struct RandomSetIterator<'a, K> {
    keys: slice::Iter<'a, K>,
}

impl<'a, K> Iterator for RandomSetIterator<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K> FusedIterator for RandomSetIterator<'_, K> {}

//-----------------------------------------------------------------------------------------------//

/// A set of strings, implemented using a dense slice and a position index.
///
/// This is a specialised version of `RandomSet` that stores keys as a string.
pub struct StringRandomSet {
    keys: Vec<CompactString>,
    slots: HashMap<CompactString, usize>,
}

impl StringRandomSet {
    /// Constructor
    pub fn new() -> StringRandomSet {
        StringRandomSet {
            keys: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize) -> StringRandomSet {
        StringRandomSet {
            keys: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Get the number of strings in the `StringRandomSet`
    #[inline]
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    /// Check if there are any strings in the `StringRandomSet`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Remove all strings from the `StringRandomSet`
    pub fn clear(&mut self) {
        self.slots.clear();
        self.keys.truncate(0);
    }

    /// Reserves capacity for at least `additional` more strings
    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
        self.keys.reserve(additional);
    }

    /// Get the stored copy of a string.
    ///
    /// If the string is not in the set then `None` is returned.
    pub fn get(&self, key: &str) -> Option<&str> {
        let slot = *self.slots.get(key)?;
        self.keys.get(slot).map(|key| key.as_str())
    }

    /// Check if a string is in the `StringRandomSet`
    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Insert a string into the `StringRandomSet`.
    ///
    /// If the string is already present the set is unchanged and `false` is returned. Otherwise
    /// the string is appended to the dense slice, its slot is recorded in the position index and
    /// `true` is returned.
    pub fn insert(&mut self, key: &str) -> bool {
        if self.slots.contains_key(key) {
            return false;
        }

        self.slots.insert(CompactString::new(key), self.keys.len());
        self.keys.push(CompactString::new(key));
        true
    }

    /// Remove a string from the `StringRandomSet`.
    ///
    /// The departing string is swapped with the string in the last slot and the tail is popped,
    /// so no other string changes slot. Returns `true` if the string was present and `false`
    /// otherwise, in which case the set is unchanged.
    pub fn remove(&mut self, key: &str) -> bool {
        let slot = match self.slots.remove(key) {
            Some(slot) => slot,
            None => return false,
        };

        self.keys.swap_remove(slot);

        if slot < self.keys.len() {
            if let Some(position) = self.slots.get_mut(self.keys[slot].as_str()) {
                *position = slot;
            }
        }

        true
    }

    /// Draw a string from the `StringRandomSet` uniformly at random.
    ///
    /// Each call is an independent draw over the current contents and the set is not modified.
    /// If the set is empty then `None` is returned.
    pub fn choose<R>(&self, rng: &mut R) -> Option<&str>
    where
        R: Rng + ?Sized,
    {
        if self.keys.is_empty() {
            return None;
        }

        let slot = rng.random_range(0..self.keys.len());
        Some(&self.keys[slot])
    }

    /// Draw a string from the `StringRandomSet` uniformly at random and remove it.
    ///
    /// Repeated calls draw without replacement, consuming the set in a uniformly random order.
    /// The drawn string is returned by value. If the set is empty then `None` is returned.
    pub fn pop_random<R>(&mut self, rng: &mut R) -> Option<String>
    where
        R: Rng + ?Sized,
    {
        if self.keys.is_empty() {
            return None;
        }

        let slot = rng.random_range(0..self.keys.len());
        let key = self.keys.swap_remove(slot);
        self.slots.remove(key.as_str());

        if slot < self.keys.len() {
            if let Some(position) = self.slots.get_mut(self.keys[slot].as_str()) {
                *position = slot;
            }
        }

        Some(key.into_string())
    }

    /// Iterate over the strings in the `StringRandomSet`
    ///
    /// The order of iteration is arbitrary.
    pub fn iter(&self) -> StringRandomSetIterator<'_> {
        StringRandomSetIterator {
            keys: self.keys.iter(),
        }
    }
}

impl Default for StringRandomSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a StringRandomSet {
    type Item = &'a str;
    type IntoIter = StringRandomSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> FromIterator<&'a str> for StringRandomSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for key in iter {
            set.insert(key);
        }
        set
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `StringRandomSet`
pub struct StringRandomSetIterator<'a> {
    keys: slice::Iter<'a, CompactString>,
}

impl<'a> Iterator for StringRandomSetIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.keys.next().map(|key| key.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl FusedIterator for StringRandomSetIterator<'_> {}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn check_set<K, S>(set: &RandomSet<K, S>)
where
    K: Eq + Hash + Clone + core::fmt::Debug,
{
    debug_assert_eq!(set.keys.len(), set.slots.len());
    for (key, &slot) in &set.slots {
        debug_assert_eq!(&set.keys[slot], key);
    }
}

#[test]
// A very simple test of inserting, re-inserting and removing
fn test_set_0() {
    use rand::prelude::*;

    let mut set = RandomSet::new();

    debug_assert!(set.insert(1));
    debug_assert!(set.insert(2));
    debug_assert!(set.insert(3));
    debug_assert!(set.insert(4));
    debug_assert!(!set.insert(2));
    debug_assert_eq!(set.count(), 4);

    debug_assert!(set.remove(&2));
    debug_assert!(!set.remove(&2));
    debug_assert!(!set.remove(&10));
    debug_assert_eq!(set.count(), 3);

    debug_assert!(set.contains(&1));
    debug_assert!(!set.contains(&2));
    debug_assert!(set.contains(&3));
    debug_assert!(set.contains(&4));

    let mut rng = SmallRng::seed_from_u64(1234567890);
    for _ in 0..100 {
        let key = *set.choose(&mut rng).unwrap();
        debug_assert!(key == 1 || key == 3 || key == 4);
    }
    check_set(&set);
}

#[test]
// Draws from an empty set return nothing
fn test_set_1() {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut set = RandomSet::new();
    debug_assert_eq!(set.count(), 0);
    debug_assert!(set.is_empty());
    debug_assert_eq!(set.choose(&mut rng), None);
    debug_assert_eq!(set.pop_random(&mut rng), None);
    debug_assert!(!set.remove(&5));

    set.insert(7);
    debug_assert_eq!(set.choose(&mut rng), Some(&7));
    debug_assert_eq!(set.pop_random(&mut rng), Some(7));
    debug_assert!(set.is_empty());
    debug_assert_eq!(set.choose(&mut rng), None);
    check_set(&set);
}

#[test]
// A very simple test with string keys
fn test_set_2() {
    use alloc::string::ToString;
    use rand::prelude::*;

    let mut set = RandomSet::new();

    debug_assert!(set.insert("Five".to_string()));
    debug_assert!(set.insert("One".to_string()));
    debug_assert!(set.insert("Nine".to_string()));
    debug_assert!(!set.insert("Five".to_string()));

    debug_assert_eq!(set.get(&"Five".to_string()), Some(&"Five".to_string()));
    debug_assert_eq!(set.get(&"Seven".to_string()), None);

    let mut rng = SmallRng::seed_from_u64(9876543210);
    let drawn = set.choose(&mut rng).unwrap();
    debug_assert!(set.get(drawn).is_some());

    debug_assert!(set.remove(&"One".to_string()));
    debug_assert_eq!(set.count(), 2);
    check_set(&set);
}

#[test]
// A stress test with inserting, getting and removing
fn test_set_3() {
    use rand::prelude::*;

    const COUNT: usize = 1000000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut set = RandomSet::new();
    let mut inserted = 0;
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        if set.insert(key) {
            inserted += 1;
        }
    }

    debug_assert_eq!(set.count(), inserted);

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        debug_assert_eq!(set.get(&key), Some(&key));
    }

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        set.remove(&key);
    }

    debug_assert_eq!(set.count(), 0);
}

#[test]
// The dense slice and the position index stay consistent through a random workload
fn test_set_4() {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(5678901234);

    let mut set = RandomSet::new();
    for _ in 0..10000 {
        let key = rng.random_range(0..64u32);
        match rng.random_range(0..3u32) {
            0 => {
                let newly = !set.contains(&key);
                debug_assert_eq!(set.insert(key), newly);
            }
            1 => {
                let present = set.contains(&key);
                debug_assert_eq!(set.remove(&key), present);
            }
            _ => {
                if let Some(drawn) = set.pop_random(&mut rng) {
                    debug_assert!(!set.contains(&drawn));
                }
            }
        }
        check_set(&set);
    }
}

#[test]
// Every member of a fixed set is reachable by the uniform draw
fn test_set_5() {
    use rand::prelude::*;

    let mut set = RandomSet::new();
    for key in 0..10usize {
        set.insert(key);
    }

    let mut rng = SmallRng::seed_from_u64(1234567890);
    let mut observed = [0usize; 10];
    for _ in 0..10000 {
        let key = *set.choose(&mut rng).unwrap();
        observed[key] += 1;
    }

    // Each key expects 1000 draws; the bounds are far looser than the binomial spread
    for count in observed {
        debug_assert!(count > 500);
        debug_assert!(count < 2000);
    }
    debug_assert_eq!(set.count(), 10);
}

#[test]
// Popping randomly drains the set with no repeats
fn test_set_6() {
    use rand::prelude::*;

    const COUNT: usize = 1000;

    let mut set = RandomSet::new();
    for key in 0..COUNT {
        set.insert(key);
    }

    let mut rng = SmallRng::seed_from_u64(9876543210);
    let mut seen = [false; COUNT];
    for remaining in (0..COUNT).rev() {
        let key = set.pop_random(&mut rng).unwrap();
        debug_assert!(!seen[key]);
        seen[key] = true;
        debug_assert_eq!(set.count(), remaining);
        check_set(&set);
    }

    debug_assert!(set.is_empty());
    debug_assert_eq!(set.pop_random(&mut rng), None);
}

#[test]
// Collecting and iterating cover the same keys
fn test_set_7() {
    let mut set: RandomSet<u32> = (0..100).collect();
    debug_assert_eq!(set.count(), 100);

    let total: u32 = set.iter().sum();
    debug_assert_eq!(total, 4950);

    set.clear();
    debug_assert!(set.is_empty());
    debug_assert_eq!(set.iter().next(), None);
}

#[test]
// A very simple test of a string set
fn test_string_set_0() {
    use rand::prelude::*;

    let mut set = StringRandomSet::new();

    debug_assert!(set.insert("Five"));
    debug_assert!(set.insert("One"));
    debug_assert!(set.insert("Nine"));
    debug_assert!(!set.insert("Five"));
    debug_assert_eq!(set.count(), 3);

    debug_assert_eq!(set.get("Five"), Some("Five"));
    debug_assert_eq!(set.get("Seven"), None);

    debug_assert!(set.remove("One"));
    debug_assert!(!set.remove("One"));
    debug_assert_eq!(set.count(), 2);

    let mut rng = SmallRng::seed_from_u64(1234567890);
    let drawn = set.pop_random(&mut rng).unwrap();
    debug_assert!(drawn == "Five" || drawn == "Nine");
    debug_assert!(!set.contains(&drawn));
    debug_assert_eq!(set.count(), 1);
}
