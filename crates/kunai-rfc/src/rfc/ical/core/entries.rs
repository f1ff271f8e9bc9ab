//! Insertion-ordered, name-keyed storage for custom properties and components.

/// An ordered mapping from a free-form name to a list of values.
///
/// Lookups of names that were never inserted behave like an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedEntries<V> {
    entries: Vec<(String, Vec<V>)>,
}

impl<V> Default for NamedEntries<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> NamedEntries<V> {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether no entry exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries (names), not values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the values stored under `name`, or an empty slice.
    #[must_use]
    pub fn get(&self, name: &str) -> &[V] {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }

    /// Returns whether an entry exists for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// Replaces the values under `name`, keeping its original position.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<V>) {
        *self.entry(name.into()) = values;
    }

    /// Appends one value under `name`, creating the entry at the end if needed.
    pub fn push(&mut self, name: impl Into<String>, value: V) {
        self.entry(name.into()).push(value);
    }

    /// Removes the entry for `name`.
    pub fn remove(&mut self, name: &str) -> Option<Vec<V>> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[V])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Iterates every value of every entry in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().flat_map(|(_, values)| values)
    }

    fn entry(&mut self, name: String) -> &mut Vec<V> {
        let index = match self.entries.iter().position(|(key, _)| *key == name) {
            Some(index) => index,
            None => {
                self.entries.push((name, Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_is_empty() {
        let entries: NamedEntries<u8> = NamedEntries::new();
        assert!(entries.get("nope").is_empty());
        assert!(!entries.contains("nope"));
    }

    #[test]
    fn keeps_insertion_order() {
        let mut entries = NamedEntries::new();
        entries.push("b", 1);
        entries.push("a", 2);
        entries.push("b", 3);

        let keys: Vec<&str> = entries.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(entries.get("b"), &[1, 3]);
        assert_eq!(entries.values().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut entries = NamedEntries::new();
        entries.push("first", 1);
        entries.push("second", 2);
        entries.insert("first", vec![9, 9]);

        let keys: Vec<&str> = entries.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["first", "second"]);
        assert_eq!(entries.get("first"), &[9, 9]);
        assert_eq!(entries.remove("first"), Some(vec![9, 9]));
        assert_eq!(entries.len(), 1);
    }
}
