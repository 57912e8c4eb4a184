//! ProbeTable - fixed-capacity open-addressing map with linear probing
//!
//! The table never resizes: capacity is chosen at construction and every
//! key lives in one slot of a single array. Keys are hashed through their
//! `Display` form with [`Poly23Hasher`], so placement and probe statistics
//! are reproducible. Iteration follows first-insertion order, not slot
//! order.
//!
//! # Examples
//!
//! ```rust
//! use wordzip::hash_map::ProbeTable;
//!
//! let mut table = ProbeTable::<String, u32>::with_capacity(10)?;
//! table.put("Hieu".to_string(), 1)?;
//! table.put("Trung".to_string(), 2)?;
//! assert_eq!(table.get("Trung"), Some(&2));
//! assert!(!table.contains_key("Nguyen"));
//! # Ok::<(), wordzip::WordzipError>(())
//! ```

use super::hash_functions::{Poly23Hasher, MAX_BUCKETS};
use crate::error::{Result, WordzipError};
use std::borrow::Borrow;
use std::fmt::{self, Write};

/// Occupied slot
#[derive(Debug, Clone)]
struct Slot<K, V> {
    key: K,
    value: V,
    /// Slots examined past the home bucket before this entry was placed
    probe_distance: usize,
}

/// Outcome of probing for a key
enum Probe {
    /// Slot holding an equal key
    Found(usize),
    /// First empty slot on the probe path, with its distance from home
    Vacant(usize, usize),
    /// Every slot probed, no match and no empty slot
    Exhausted,
}

/// Fixed-capacity linear-probing map
#[derive(Debug, Clone)]
pub struct ProbeTable<K, V> {
    slots: Vec<Option<Slot<K, V>>>,
    /// Slot indices in first-insertion order
    order: Vec<usize>,
}

impl<K, V> ProbeTable<K, V>
where
    K: Eq + fmt::Display,
{
    /// Create a table with exactly `capacity` slots
    ///
    /// `capacity` must be at least 1 and fit the 32-bit hash reduction.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity == 0 || capacity > MAX_BUCKETS {
            return Err(WordzipError::configuration(format!(
                "probe table capacity must be in 1..={}, got {}",
                MAX_BUCKETS, capacity
            )));
        }

        Ok(Self {
            slots: allocate_slots(capacity)?,
            order: Vec::new(),
        })
    }

    /// Number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of distinct keys stored
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether the table holds no keys
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn home_bucket<Q>(&self, key: &Q) -> usize
    where
        Q: fmt::Display + ?Sized,
    {
        let mut hasher = Poly23Hasher::new();
        // The hasher never fails; an error here can only come from a
        // broken Display impl, which then hashes its partial output.
        let _ = write!(hasher, "{}", key);
        hasher.bucket(self.capacity())
    }

    fn probe<Q>(&self, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: Eq + fmt::Display + ?Sized,
    {
        let capacity = self.capacity();
        let home = self.home_bucket(key);

        for distance in 0..capacity {
            let idx = (home + distance) % capacity;
            match &self.slots[idx] {
                None => return Probe::Vacant(idx, distance),
                Some(slot) if <K as Borrow<Q>>::borrow(&slot.key) == key => return Probe::Found(idx),
                Some(_) => {}
            }
        }

        Probe::Exhausted
    }

    /// Insert or overwrite `key`, returning the previous value if any
    ///
    /// Fails with [`WordzipError::CapacityExhausted`] when `key` is new and
    /// every slot is taken.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        match self.probe(&key) {
            Probe::Found(idx) => match self.slots[idx].as_mut() {
                Some(slot) => Ok(Some(std::mem::replace(&mut slot.value, value))),
                None => Err(WordzipError::invalid_data("probe found an empty slot")),
            },
            Probe::Vacant(idx, probe_distance) => {
                self.slots[idx] = Some(Slot {
                    key,
                    value,
                    probe_distance,
                });
                self.order.push(idx);
                Ok(None)
            }
            Probe::Exhausted => Err(WordzipError::capacity_exhausted(self.capacity())),
        }
    }

    /// Get the value stored for `key`, `None` when absent
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + fmt::Display + ?Sized,
    {
        match self.probe(key) {
            Probe::Found(idx) => self.slots[idx].as_ref().map(|slot| &slot.value),
            Probe::Vacant(..) | Probe::Exhausted => None,
        }
    }

    /// Get a mutable reference to the value stored for `key`
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + fmt::Display + ?Sized,
    {
        match self.probe(key) {
            Probe::Found(idx) => self.slots[idx].as_mut().map(|slot| &mut slot.value),
            Probe::Vacant(..) | Probe::Exhausted => None,
        }
    }

    /// Get the value stored for `key` or fail with [`WordzipError::AbsentKey`]
    pub fn lookup<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Eq + fmt::Display + ?Sized,
    {
        self.get(key)
            .ok_or_else(|| WordzipError::absent_key(key.to_string()))
    }

    /// Check whether `key` is stored
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + fmt::Display + ?Sized,
    {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Iterate over `(key, value)` pairs in first-insertion order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            order: self.order.iter(),
        }
    }

    /// Iterate over keys in first-insertion order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over values in first-insertion order
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Snapshot of the probe statistics
    pub fn stats(&self) -> ProbeStats {
        let occupied = || self.slots.iter().flatten();

        let max_probe = occupied().map(|slot| slot.probe_distance).max().unwrap_or(0);
        let mut histogram = vec![0usize; max_probe + 1];
        let mut total_probes = 0usize;
        for slot in occupied() {
            histogram[slot.probe_distance] += 1;
            total_probes += slot.probe_distance;
        }

        let entries = self.len();
        let buckets = self.capacity();
        ProbeStats {
            entries,
            buckets,
            histogram,
            fill_percentage: entries as f64 / buckets as f64 * 100.0,
            max_probe,
            average_probe: if entries > 0 {
                total_probes as f64 / entries as f64
            } else {
                0.0
            },
        }
    }
}

/// Allocate `capacity` empty slots, reporting allocation failure as an error
fn allocate_slots<T>(capacity: usize) -> Result<Vec<Option<T>>> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity).map_err(|e| {
        WordzipError::configuration(format!("cannot allocate {} buckets: {}", capacity, e))
    })?;
    slots.resize_with(capacity, || None);
    Ok(slots)
}

/// Iterator over a [`ProbeTable`] in first-insertion order
pub struct Iter<'a, K, V> {
    slots: &'a [Option<Slot<K, V>>],
    order: std::slice::Iter<'a, usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        self.order
            .by_ref()
            .find_map(|&idx| slots[idx].as_ref().map(|slot| (&slot.key, &slot.value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<'a, K, V> IntoIterator for &'a ProbeTable<K, V>
where
    K: Eq + fmt::Display,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders entries in slot order as `[(key, value), ...]`
impl<K, V> fmt::Display for ProbeTable<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.slots.iter().flatten().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({}, {})", slot.key, slot.value)?;
        }
        f.write_str("]")
    }
}

/// Probe statistics of a [`ProbeTable`]
///
/// Purely observational; nothing in the coding pipeline depends on them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeStats {
    /// Number of distinct keys
    pub entries: usize,
    /// Number of slots
    pub buckets: usize,
    /// `histogram[d]` = entries placed `d` slots past their home bucket
    pub histogram: Vec<usize>,
    /// Occupied slots as a percentage of all slots
    pub fill_percentage: f64,
    /// Longest probe distance of any entry
    pub max_probe: usize,
    /// Mean probe distance over all entries
    pub average_probe: f64,
}

impl fmt::Display for ProbeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hash Table Stats")?;
        writeln!(f, "================")?;
        writeln!(f, "Number of Entries: {}", self.entries)?;
        writeln!(f, "Number of Buckets: {}", self.buckets)?;
        writeln!(f, "Histogram of Probes: {:?}", self.histogram)?;
        writeln!(f, "Filled Percentage: {:.4}%", self.fill_percentage)?;
        writeln!(f, "Max Linear Probe: {}", self.max_probe)?;
        write!(f, "Average Linear Probe: {:.4}", self.average_probe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_table() -> ProbeTable<String, String> {
        // Hieu and Trung share home bucket 3, Nguyen's home is 4
        let mut table = ProbeTable::with_capacity(10).unwrap();
        table.put("Hieu".to_string(), "121212".to_string()).unwrap();
        table.put("Trung".to_string(), "454545".to_string()).unwrap();
        table.put("Nguyen".to_string(), "989898".to_string()).unwrap();
        table
    }

    #[test]
    fn test_put_get_contains() {
        let table = names_table();
        assert_eq!(table.len(), 3);
        assert!(table.contains_key("Hieu"));
        assert!(table.contains_key("Trung"));
        assert!(!table.contains_key("Data Structure"));
        assert_eq!(table.get("Nguyen").map(String::as_str), Some("989898"));
        assert_eq!(table.get("Data Structure"), None);
    }

    #[test]
    fn test_overwrite_keeps_slot_and_order() {
        let mut table = names_table();
        let old = table.put("Hieu".to_string(), "000000".to_string()).unwrap();
        assert_eq!(old.as_deref(), Some("121212"));
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("Hieu").map(String::as_str), Some("000000"));

        let keys: Vec<&str> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Hieu", "Trung", "Nguyen"]);
    }

    #[test]
    fn test_lookup_reports_absent_key() {
        let table = names_table();
        assert!(table.lookup("Hieu").is_ok());
        match table.lookup("nobody") {
            Err(WordzipError::AbsentKey { key }) => assert_eq!(key, "nobody"),
            other => panic!("expected AbsentKey, got {:?}", other),
        }
    }

    #[test]
    fn test_get_mut_updates_value() {
        let mut table = ProbeTable::<String, usize>::with_capacity(8).unwrap();
        table.put("word".to_string(), 1).unwrap();
        if let Some(count) = table.get_mut("word") {
            *count += 1;
        }
        assert_eq!(table.get("word"), Some(&2));
        assert!(table.get_mut("other").is_none());
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut table = ProbeTable::<String, usize>::with_capacity(64).unwrap();
        let words = ["zeta", "alpha", "", " ", "mid", "beta"];
        for (i, w) in words.iter().enumerate() {
            table.put(w.to_string(), i).unwrap();
        }

        let pairs: Vec<(&str, usize)> = table.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        let expected: Vec<(&str, usize)> = words.iter().copied().zip(0..).collect();
        assert_eq!(pairs, expected);
        assert_eq!(table.values().sum::<usize>(), 15);
    }

    #[test]
    fn test_full_table_reports_capacity_exhausted() {
        let mut table = ProbeTable::<String, u8>::with_capacity(3).unwrap();
        table.put("a".to_string(), 1).unwrap();
        table.put("b".to_string(), 2).unwrap();
        table.put("c".to_string(), 3).unwrap();

        // Overwriting still works when full
        assert_eq!(table.put("b".to_string(), 20).unwrap(), Some(2));

        match table.put("d".to_string(), 4) {
            Err(WordzipError::CapacityExhausted { capacity }) => assert_eq!(capacity, 3),
            other => panic!("expected CapacityExhausted, got {:?}", other),
        }

        // Lookups on a full table terminate
        assert_eq!(table.get("d"), None);
        assert!(!table.contains_key("d"));
        assert_eq!(table.get("b"), Some(&20));
    }

    #[test]
    fn test_invalid_capacity() {
        assert!(ProbeTable::<String, u8>::with_capacity(0).is_err());
        assert!(ProbeTable::<String, u8>::with_capacity(1).is_ok());
    }

    #[test]
    fn test_slot_allocation_failure_is_an_error() {
        match allocate_slots::<u64>(usize::MAX / 4) {
            Err(WordzipError::Configuration { message }) => {
                assert!(message.contains("cannot allocate"))
            }
            other => panic!("expected Configuration error, got {:?}", other.map(|v| v.len())),
        }
        assert_eq!(allocate_slots::<u64>(5).unwrap().len(), 5);
    }

    #[test]
    fn test_stats() {
        let stats = names_table().stats();
        assert_eq!(stats.entries, 3);
        assert_eq!(stats.buckets, 10);
        assert_eq!(stats.histogram, vec![1, 2]);
        assert_eq!(stats.max_probe, 1);
        assert!((stats.fill_percentage - 30.0).abs() < 1e-9);
        assert!((stats.average_probe - 2.0 / 3.0).abs() < 1e-9);

        let rendered = stats.to_string();
        assert!(rendered.contains("Histogram of Probes: [1, 2]"));
        assert!(rendered.contains("Filled Percentage: 30.0000%"));
        assert!(rendered.contains("Average Linear Probe: 0.6667"));
    }

    #[test]
    fn test_stats_on_empty_table() {
        let table = ProbeTable::<String, u8>::with_capacity(4).unwrap();
        let stats = table.stats();
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.histogram, vec![0]);
        assert_eq!(stats.average_probe, 0.0);
    }

    #[test]
    fn test_display_in_slot_order() {
        let table = names_table();
        assert_eq!(
            table.to_string(),
            "[(Hieu, 121212), (Trung, 454545), (Nguyen, 989898)]"
        );
    }

    #[test]
    fn test_non_string_keys() {
        let mut table = ProbeTable::<u32, &str>::with_capacity(16).unwrap();
        table.put(7, "seven").unwrap();
        table.put(70, "seventy").unwrap();
        assert_eq!(table.get(&7), Some(&"seven"));
        assert_eq!(table.get(&70), Some(&"seventy"));
        assert!(!table.contains_key(&700));
    }
}
