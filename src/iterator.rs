//! # Iterator
//!
//! Sequential access to the items of a [Collection] without exposing its storage.
//!
//! A [Cursor] borrows its collection immutably. Mutating the collection while a
//! cursor is alive is therefore rejected at compile time, the sequence a cursor
//! produces is always the collection's content at the cursor's creation.

use core::fmt;
use itertools::Itertools;
use std::iter::FusedIterator;

/// Order of iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

/// An ordered collection of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Collection { items: vec![] }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A fresh cursor, independent of any other cursor on this collection. It
    /// starts at the first item (forward) or the last item (reverse).
    pub fn make_iterator(&self, direction: Direction) -> Cursor<'_, T> {
        Cursor::new(&self.items, direction)
    }

    pub fn iter(&self) -> Cursor<'_, T> {
        self.make_iterator(Direction::Forward)
    }

    pub fn reverse(&self) -> Cursor<'_, T> {
        self.make_iterator(Direction::Reverse)
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Collection {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Single-use cursor over a [Collection].
///
/// Tracks the number of items already handed out and the direction. Once
/// exhausted, it keeps returning `None`.
pub struct Cursor<'a, T> {
    items: &'a [T],
    /// Items already produced
    position: usize,
    direction: Direction,
}

impl<'a, T> Cursor<'a, T> {
    fn new(items: &'a [T], direction: Direction) -> Self {
        Cursor {
            items,
            position: 0,
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Index into the collection of the item that `next` will return
    pub fn key(&self) -> Option<usize> {
        if self.position >= self.items.len() {
            return None;
        }
        match self.direction {
            Direction::Forward => Some(self.position),
            Direction::Reverse => Some(self.items.len() - 1 - self.position),
        }
    }

    pub fn valid(&self) -> bool {
        self.key().is_some()
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items;
        let item = items.get(self.key()?)?;
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("current", &self.key().and_then(|k| self.items.get(k)))
            .finish()
    }
}

/// Runs the iterator example and returns the lines to print. `reverse` flips the
/// direction of the first traversal.
pub fn demo(reverse: bool) -> Vec<String> {
    let words: Collection<&str> = ["First", "Second", "Third"].into_iter().collect();
    let (first, second) = match reverse {
        false => (Direction::Forward, Direction::Reverse),
        true => (Direction::Reverse, Direction::Forward),
    };

    let mut lines = vec![format!("Words, {:?}:", first)];
    lines.extend(words.make_iterator(first).map(|w| w.to_string()));
    lines.push(format!("Words, {:?}:", second));
    lines.extend(words.make_iterator(second).map(|w| w.to_string()));

    let numbers: Collection<i32> = (1..=3).collect();
    lines.push("Numbers, Reverse:".to_string());
    lines.push(numbers.reverse().join(", "));
    lines
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test_log::test]
    fn test_forward_and_reverse() {
        let words: Collection<&str> = ["First", "Second", "Third"].into_iter().collect();
        assert_eq!(words.iter().copied().collect_vec(), &["First", "Second", "Third"]);
        assert_eq!(words.reverse().copied().collect_vec(), &["Third", "Second", "First"]);

        let numbers: Collection<i32> = (1..=3).collect();
        assert_eq!(numbers.reverse().copied().collect_vec(), &[3, 2, 1]);
    }

    #[test_log::test]
    fn test_exhaustion_is_final() {
        let numbers: Collection<i32> = (1..=2).collect();
        for direction in [Direction::Forward, Direction::Reverse] {
            let mut cursor = numbers.make_iterator(direction);
            assert_eq!(cursor.len(), 2);
            assert!(cursor.next().is_some());
            assert!(cursor.next().is_some());
            assert_eq!(cursor.len(), 0);
            assert!(!cursor.valid());
            for _ in 0..3 {
                assert_eq!(cursor.next(), None);
            }
        }
    }

    #[test_log::test]
    fn test_cursors_are_independent() {
        let mut words = Collection::new();
        words.push("a");
        words.push("b");
        words.push("c");

        let mut first = words.iter();
        assert_eq!(first.next(), Some(&"a"));
        assert_eq!(first.key(), Some(1));

        let mut second = words.iter();
        assert_eq!(second.next(), Some(&"a"));
        assert_eq!(first.next(), Some(&"b"));

        let mut backwards = words.reverse();
        assert_eq!(backwards.key(), Some(2));
        assert_eq!(backwards.next(), Some(&"c"));
    }

    #[test_log::test]
    fn test_empty_collection() {
        let empty = Collection::<u8>::default();
        assert!(empty.is_empty());
        assert_eq!(empty.iter().next(), None);
        assert_eq!(empty.reverse().next(), None);
        assert_eq!((&empty).into_iter().count(), 0);
    }

    #[test_log::test]
    fn test_demo() {
        let lines = demo(false);
        assert_eq!(lines[1..4], ["First", "Second", "Third"]);
        assert_eq!(lines[5..8], ["Third", "Second", "First"]);
        assert_eq!(lines[9], "3, 2, 1");

        let lines = demo(true);
        assert_eq!(lines[0], "Words, Reverse:");
        assert_eq!(lines[1], "Third");
    }
}
