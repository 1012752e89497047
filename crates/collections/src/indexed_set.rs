use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use fsm_utilities::TagIndex;

/// A zero sized tag for the indices of an [`IndexedSet`].
pub struct SetTag;

/// The index of an element in an [`IndexedSet`].
pub type SetIndex = TagIndex<usize, SetTag>;

/// A set that assigns every element a unique index, in insertion order.
///
/// Used to intern labels and to give every discovered set of states (or pair
/// of states) a dense number during an exploration.
pub struct IndexedSet<T> {
    elements: Vec<T>,
    indices: FxHashMap<T, SetIndex>,
}

impl<T: Clone + Eq + Hash> IndexedSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            indices: FxHashMap::default(),
        }
    }

    /// Inserts the given element and returns its index, and true iff it was
    /// not present before.
    pub fn insert(&mut self, element: T) -> (SetIndex, bool) {
        if let Some(index) = self.indices.get(&element) {
            return (*index, false);
        }

        let index = SetIndex::new(self.elements.len());
        self.elements.push(element.clone());
        self.indices.insert(element, index);
        (index, true)
    }

    /// Returns the index of the given element, if it was inserted.
    pub fn index(&self, element: &T) -> Option<SetIndex> {
        self.indices.get(element).copied()
    }

    /// Returns the element at the given index.
    pub fn get(&self, index: SetIndex) -> Option<&T> {
        self.elements.get(*index)
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true iff the set is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }

    /// Returns the elements in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.elements.clone()
    }

    /// Consumes the set and returns the elements in insertion order.
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<T: Clone + Eq + Hash> Default for IndexedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for IndexedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.elements.iter().enumerate()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_indexed_set_insert() {
        let mut set = IndexedSet::new();

        let (a, inserted_a) = set.insert("a".to_string());
        let (b, inserted_b) = set.insert("b".to_string());
        let (again, inserted_again) = set.insert("a".to_string());

        assert!(inserted_a && inserted_b && !inserted_again);
        assert_eq!(a, again);
        assert_eq!(*b, 1);
        assert_eq!(set.index(&"b".to_string()), Some(b));
        assert_eq!(set.get(a).map(String::as_str), Some("a"));
        assert_eq!(set.to_vec(), vec!["a".to_string(), "b".to_string()]);
    }
}
