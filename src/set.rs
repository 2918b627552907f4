//! `IntervalSet` implementation.

use core::ops::{RangeInclusive, RangeBounds};
use core::fmt::{self, Debug, Formatter};
#[cfg(feature = "dot")]
use core::fmt::Display;
use std::io::{self, Write};

use super::IntervalMap;
#[cfg(feature = "dot")]
use super::Slot;
use super::ix::{IndexType, DefaultIx, NodeIx};
use super::iter::*;

/// Multiset with closed interval keys (ranges `x..=y`). Newtype over `IntervalMap<T, ()>`.
///
/// See [IntervalMap](struct.IntervalMap.html) for more information.
///
/// ```rust
/// let mut set = itree::IntervalSet::new();
/// let a = set.insert(4..=15);
/// set.insert(1..=5);
/// set.insert(-10..=2);
///
/// // Iterate over intervals that overlap `2..=8`. Output is sorted.
/// let q: Vec<_> = set.iter(2..=8).collect();
/// assert_eq!(q, &[-10..=2, 1..=5, 4..=15]);
///
/// // Iterate over intervals that overlap a point 4.
/// let q: Vec<_> = set.overlap(4).collect();
/// assert_eq!(q, &[1..=5, 4..=15]);
///
/// // Remove an entry by its handle.
/// assert_eq!(set.remove(a), 4..=15);
/// let q: Vec<_> = set.overlap(4).collect();
/// assert_eq!(q, &[1..=5]);
/// ```
///
/// The same interval can be inserted any number of times, each insertion returns
/// its own handle, and removing one duplicate leaves the others stored:
/// ```rust
/// let mut set = itree::IntervalSet::new();
/// let first = set.insert(3..=7);
/// let second = set.insert(3..=7);
/// assert!(first != second);
/// set.remove(first);
/// assert!(set.has_overlap(5..=5));
/// ```
///
/// You can get the [smallest](#method.smallest) and [largest](#method.largest) intervals in *O(log N)*.
///
/// You can construct [IntervalSet](struct.IntervalSet.html) using `collect()`:
/// ```rust
/// let set: itree::IntervalSet<_> = vec![10..=20, 0..=20].into_iter().collect();
/// ```
///
/// You can also construct [IntervalSet](struct.IntervalSet.html) using [interval_set](macro.interval_set.html) macro:
/// ```rust
/// #[macro_use] extern crate itree;
///
/// let set = interval_set!{ 100..=210, 50..=150 };
/// let a: Vec<_> = set.iter(..).collect();
/// assert_eq!(a, &[50..=150, 100..=210]);
/// ```
///
/// # Index types:
/// You can specify the [index type](ix/trait.IndexType.html) (`u8`, `u16`, `u32` or `u64`) used in the inner
/// representation of `IntervalSet`.
///
/// Method [new](#method.new), the macro and `collect()` create `IntervalSet` with the default index
/// type `u32`. If you wish to use another index type, you can use methods `default` or
/// [with_capacity](#method.with_capacity), for example:
/// ```rust
/// let mut set: itree::IntervalSet<_, u64> = itree::IntervalSet::default();
/// set.insert(10..=20);
/// ```
/// See [IndexType](ix/trait.IndexType.html) for details.
#[derive(Clone)]
pub struct IntervalSet<T: PartialOrd + Copy, Ix: IndexType = DefaultIx> {
    inner: IntervalMap<T, (), Ix>,
}

impl<T: PartialOrd + Copy, Ix: IndexType> Default for IntervalSet<T, Ix> {
    fn default() -> Self {
        Self {
            inner: IntervalMap::default(),
        }
    }
}

impl<T: PartialOrd + Copy> IntervalSet<T> {
    /// Creates an empty [IntervalSet](struct.IntervalSet.html) with the default index type.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: PartialOrd + Copy, Ix: IndexType> IntervalSet<T, Ix> {
    /// Creates an empty [IntervalSet](struct.IntervalSet.html) with `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: IntervalMap::with_capacity(capacity),
        }
    }

    /// Returns the number of stored intervals.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the set contains no intervals.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes all intervals. Invalidates all handles.
    pub fn clear(&mut self) {
        self.inner.clear()
    }

    /// Inserts an interval `x..=y` and returns a stable handle to the new entry.
    /// The same interval can be inserted multiple times. Takes *O(log N)*.
    ///
    /// Panics if the interval is malformed (`low > high`)
    /// or contains a value that cannot be compared (such as `NAN`).
    pub fn insert(&mut self, interval: RangeInclusive<T>) -> NodeIx<Ix> {
        self.inner.insert(interval, ())
    }

    /// Removes the entry behind the handle and returns its interval. Takes *O(log N)*.
    ///
    /// Every other handle, as well as every other entry with the same interval,
    /// stays untouched. Panics if the handle was already removed.
    pub fn remove(&mut self, index: NodeIx<Ix>) -> RangeInclusive<T> {
        let range = self.inner.interval(index);
        self.inner.remove(index);
        range
    }

    /// Returns the interval of a live entry.
    ///
    /// Panics if the handle was removed.
    pub fn interval(&self, index: NodeIx<Ix>) -> RangeInclusive<T> {
        self.inner.interval(index)
    }

    /// Iterates over intervals `x..=y` that overlap the `query`.
    /// Takes *O(log N + K)* where *K* is the size of the output.
    /// Output is sorted by intervals.
    ///
    /// Panics if `query` is backwards or contains a value that cannot be compared (such as `NAN`).
    pub fn iter<'a, R: RangeBounds<T>>(&'a self, query: R) -> Intervals<'a, T, (), R, Ix> {
        self.inner.intervals(query)
    }

    /// Iterates over intervals `x..=y` that overlap the `point`. Same as `iter(point..=point)`.
    /// See [iter](#method.iter) for more details.
    pub fn overlap<'a>(&'a self, point: T) -> Intervals<'a, T, (), RangeInclusive<T>, Ix> {
        self.inner.intervals(point..=point)
    }

    /// Returns `true` if at least one stored interval overlaps the `query`. Takes *O(log N)*.
    pub fn has_overlap<R: RangeBounds<T>>(&self, query: R) -> bool {
        self.inner.has_overlap(query)
    }

    /// Returns the smallest interval in the set (intervals are sorted lexicographically).
    /// Takes *O(log N)*. Returns `None` if the set is empty.
    pub fn smallest(&self) -> Option<RangeInclusive<T>> {
        self.inner.smallest().map(|(interval, _)| interval)
    }

    /// Returns the largest interval in the set (intervals are sorted lexicographically).
    /// Takes *O(log N)*. Returns `None` if the set is empty.
    pub fn largest(&self) -> Option<RangeInclusive<T>> {
        self.inner.largest().map(|(interval, _)| interval)
    }

    /// Checks every structural invariant of the tree, see
    /// [IntervalMap::check_invariants](struct.IntervalMap.html#method.check_invariants).
    /// Panics on any violation.
    pub fn check_invariants(&self) {
        self.inner.check_invariants()
    }
}

impl<T: PartialOrd + Copy + fmt::Display, Ix: IndexType> IntervalSet<T, Ix> {
    /// Writes a pre-order rendering of the tree and runs the invariant checker,
    /// see [IntervalMap::print](struct.IntervalMap.html#method.print).
    pub fn print<W: Write>(&self, writer: W) -> io::Result<()> {
        self.inner.print(writer)
    }
}

#[cfg(feature = "dot")]
impl<T: PartialOrd + Copy + Display, Ix: IndexType> IntervalSet<T, Ix> {
    /// Writes the tree in Graphviz dot format. `T` should implement `Display`.
    pub fn write_dot<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "digraph {{")?;
        for i in 0..self.inner.nodes.len() {
            if let Slot::Occupied(node) = &self.inner.nodes[i] {
                writeln!(writer, "    {} [label=\"i={}\\n{}\\n{}\", fillcolor={}, style=filled]",
                    i, i, node.interval, node.subtree_max,
                    if node.is_red() { "salmon" } else { "grey65" })?;
                if node.left.defined() {
                    writeln!(writer, "    {} -> {} [label=\"L\"]", i, node.left)?;
                }
                if node.right.defined() {
                    writeln!(writer, "    {} -> {} [label=\"R\"]", i, node.right)?;
                }
            }
        }
        writeln!(writer, "}}")
    }
}

impl<T: PartialOrd + Copy, Ix: IndexType> std::iter::IntoIterator for IntervalSet<T, Ix> {
    type IntoIter = IntoIterSet<T, Ix>;
    type Item = RangeInclusive<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIterSet::new(self.inner)
    }
}

/// Construct [IntervalSet](struct.IntervalSet.html) from ranges `x..=y`.
impl<T: PartialOrd + Copy> std::iter::FromIterator<RangeInclusive<T>> for IntervalSet<T> {
    fn from_iter<I: IntoIterator<Item = RangeInclusive<T>>>(iter: I) -> Self {
        let mut set = IntervalSet::new();
        for range in iter {
            set.insert(range);
        }
        set
    }
}

impl<T: PartialOrd + Copy + Debug, Ix: IndexType> Debug for IntervalSet<T, Ix> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{{")?;
        let mut need_comma = false;
        for interval in self.iter(..) {
            if need_comma {
                write!(f, ", ")?;
            } else {
                need_comma = true;
            }
            write!(f, "{:?}", interval)?;
        }
        write!(f, "}}")
    }
}
