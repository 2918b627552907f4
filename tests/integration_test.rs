use std::ops::{RangeBounds, RangeInclusive, Bound};
use std::fmt::{Debug, Write};
use rand::prelude::*;

use itree::{IntervalMap, IntervalSet, NodeIx};

struct NaiveIntervalMap<T: PartialOrd + Copy, V> {
    nodes: Vec<(RangeInclusive<T>, V)>,
}

fn intersects<T: PartialOrd, R: RangeBounds<T>>(range: &RangeInclusive<T>, query: &R) -> bool {
    (match query.end_bound() {
        Bound::Included(value) => value >= range.start(),
        Bound::Excluded(value) => value > range.start(),
        Bound::Unbounded => true,
    })
        &&
    (match query.start_bound() {
        Bound::Included(value) => value <= range.end(),
        Bound::Excluded(value) => value < range.end(),
        Bound::Unbounded => true,
    })
}

impl<T: PartialOrd + Copy, V> NaiveIntervalMap<T, V> {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
        }
    }

    fn iter<'a, R: 'a + RangeBounds<T>>(&'a self, query: R) -> impl Iterator<Item = (RangeInclusive<T>, &V)> + 'a {
        self.nodes.iter().filter(move |(range, _value)| intersects(range, &query))
            .map(|(range, value)| (range.clone(), value))
    }
}

fn generate_ordered_pair<T: PartialOrd + Copy, F: FnMut() -> T>(generator: &mut F) -> (T, T) {
    let a = generator();
    let b = generator();
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn generate_int(low: u32, high: u32) -> impl (FnMut() -> u32) {
    let mut rng = thread_rng();
    move || rng.gen_range(low..high)
}

fn modify_maps<T, F>(naive: &mut NaiveIntervalMap<T, u32>, tree: &mut IntervalMap<T, u32>, n_inserts: u32,
        mut generator: F) -> (Vec<(NodeIx, RangeInclusive<T>, u32)>, String)
where T: PartialOrd + Copy + Debug,
      F: FnMut() -> T,
{
    let mut handles = Vec::new();
    let mut history = String::new();
    for i in 0..n_inserts {
        let (a, b) = generate_ordered_pair(&mut generator);
        let range = a..=b;
        writeln!(history, "insert({:?})", range).unwrap();
        naive.nodes.push((range.clone(), i));
        let index = tree.insert(range.clone(), i);
        handles.push((index, range, i));
    }
    (handles, history)
}

fn save_iter<'a, T, I>(history: &mut String, prefix: &str, iter: I) -> Vec<(RangeInclusive<T>, u32)>
where T: PartialOrd + Copy + Debug,
      I: Iterator<Item = (RangeInclusive<T>, &'a u32)>,
{
    let mut res: Vec<_> = iter.map(|(range, value)| (range, *value)).collect();
    res.sort_by(|a, b| (a.0.start(), a.0.end(), a.1).partial_cmp(&(b.0.start(), b.0.end(), b.1)).unwrap());
    writeln!(history, "{}{:?}", prefix, res).unwrap();
    res
}

fn search_rand<T, F>(naive: &mut NaiveIntervalMap<T, u32>, tree: &mut IntervalMap<T, u32>, n_searches: u32,
        mut generator: F, history: &mut String)
where T: PartialOrd + Copy + Debug,
      F: FnMut() -> T,
{
    for _ in 0..n_searches {
        let (a, b) = generate_ordered_pair(&mut generator);
        let range = a..=b;
        writeln!(history, "search({:?})", range).unwrap();
        let vec_a = save_iter(history, "    naive: ", naive.iter(range.clone()));
        let vec_b = save_iter(history, "    tree:  ", tree.iter(range.clone()));
        if vec_a != vec_b {
            println!("{}", history);
            assert!(false);
        }
    }
}

#[test]
fn test_inserts_and_searches() {
    let mut naive = NaiveIntervalMap::new();
    let mut tree = IntervalMap::new();
    let (_handles, mut history) = modify_maps(&mut naive, &mut tree, 300, generate_int(0, 100));
    tree.check_invariants();
    search_rand(&mut naive, &mut tree, 50, generate_int(0, 100), &mut history);
}

#[test]
fn test_removals_keep_other_handles() {
    let mut naive = NaiveIntervalMap::new();
    let mut tree = IntervalMap::new();
    let (mut handles, mut history) = modify_maps(&mut naive, &mut tree, 300, generate_int(0, 1000));

    let mut rng = thread_rng();
    while handles.len() > 100 {
        let (index, range, value) = handles.swap_remove(rng.gen_range(0..handles.len()));
        writeln!(history, "remove({:?})", range).unwrap();
        let position = naive.nodes.iter().position(|(r, v)| *r == range && *v == value).unwrap();
        naive.nodes.swap_remove(position);
        assert_eq!(tree.remove(index), value);
        tree.check_invariants();
    }

    for (index, range, value) in &handles {
        assert_eq!(tree.interval(*index), *range);
        assert_eq!(*tree.value(*index), *value);
    }
    search_rand(&mut naive, &mut tree, 50, generate_int(0, 1000), &mut history);
}

#[test]
fn test_set_operations() {
    let mut set = IntervalSet::new();
    let mut handles = Vec::new();
    let mut generator = generate_int(0, 50);
    for _ in 0..100 {
        let (a, b) = generate_ordered_pair(&mut generator);
        handles.push(set.insert(a..=b));
    }
    assert_eq!(set.len(), 100);
    set.check_invariants();

    // Full iteration is sorted.
    let all: Vec<_> = set.iter(..).collect();
    assert_eq!(all.len(), 100);
    for window in all.windows(2) {
        assert!((window[0].start(), window[0].end()) <= (window[1].start(), window[1].end()));
    }

    let mut rng = thread_rng();
    handles.shuffle(&mut rng);
    for index in handles {
        set.remove(index);
    }
    assert!(set.is_empty());
    assert!(set.iter(..).next().is_none());
    set.check_invariants();
}
