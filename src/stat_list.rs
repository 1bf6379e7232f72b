//! Stat list module.
//!
//! An ordered collection of stats with reduction: like stats merge, while
//! stats that share a name but refuse to combine stay separate.

use crate::catalog::Catalog;
use crate::code::Code;
use crate::stat::Stat;
use std::collections::{HashMap, VecDeque};

/// An ordered list of stats.
///
/// Insertion order is the default display order and decides which entry
/// absorbs later ones during [`StatList::reduce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatList {
    stats: Vec<Stat>,
}

impl StatList {
    pub fn new() -> Self {
        Self { stats: Vec::new() }
    }

    pub fn push(&mut self, stat: Stat) {
        self.stats.push(stat);
    }

    /// Remove and return the last stat.
    pub fn pop(&mut self) -> Option<Stat> {
        self.stats.pop()
    }

    /// Move every stat of `other` onto the end of this list.
    pub fn append(&mut self, other: &mut StatList) {
        self.stats.append(&mut other.stats);
    }

    /// Remove the stat at `index`, shifting later stats down.
    pub fn remove(&mut self, index: usize) -> Option<Stat> {
        if index < self.stats.len() {
            Some(self.stats.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Stat> {
        self.stats.get(index)
    }

    /// All stats with the given name, in order.
    pub fn find<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Stat> + 'a {
        self.stats.iter().filter(move |stat| stat.name().as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stat> {
        self.stats.iter()
    }

    pub fn as_slice(&self) -> &[Stat] {
        &self.stats
    }

    /// Merge like stats.
    ///
    /// Each stat is tried against every earlier accumulated entry with the
    /// same name; the first one it combines with absorbs it. A stat that
    /// combines with none becomes a new entry. First-seen order is kept,
    /// and reducing a reduced list changes nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lootstat::{Catalog, StatList};
    ///
    /// let catalog = Catalog::from_json(r#"{
    ///     "stats": [{ "name": "item_nonclassskill", "desc_fn": 28 }],
    ///     "skills": [{ "index": 37, "name": "Warmth" }, { "index": 64, "name": "Frozen Orb" }]
    /// }"#).unwrap();
    ///
    /// let list: StatList = [
    ///     catalog.new_stat("item_nonclassskill", &[1, 64]).unwrap(),
    ///     catalog.new_stat("item_nonclassskill", &[2, 37]).unwrap(),
    ///     catalog.new_stat("item_nonclassskill", &[3, 64]).unwrap(),
    /// ].into_iter().collect();
    ///
    /// let reduced = list.reduce();
    /// assert_eq!(reduced.descriptions(&catalog), vec!["+4 to Frozen Orb", "+2 to Warmth"]);
    /// ```
    pub fn reduce(&self) -> StatList {
        let mut pending: VecDeque<Stat> = self.stats.iter().cloned().collect();
        let mut reduced: Vec<Stat> = Vec::with_capacity(pending.len());
        let mut lookup: HashMap<Code, Vec<usize>> = HashMap::new();

        while let Some(stat) = pending.pop_front() {
            let slots = lookup.entry(stat.name().clone()).or_default();

            let merged = slots.iter().find_map(|&idx| {
                reduced[idx]
                    .combine(&stat)
                    .ok()
                    .map(|combined| (idx, combined))
            });

            match merged {
                Some((idx, combined)) => reduced[idx] = combined,
                None => {
                    slots.push(reduced.len());
                    reduced.push(stat);
                }
            }
        }

        StatList { stats: reduced }
    }

    /// Stats ordered for display: higher priority first, ties in list order.
    pub fn sorted_for_display(&self) -> StatList {
        let mut stats = self.stats.clone();
        stats.sort_by(|a, b| b.priority().cmp(&a.priority()));
        StatList { stats }
    }

    /// Render every stat, skipping non-printing ones.
    pub fn descriptions(&self, catalog: &Catalog) -> Vec<String> {
        self.stats
            .iter()
            .map(|stat| stat.describe(catalog))
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl From<Vec<Stat>> for StatList {
    fn from(stats: Vec<Stat>) -> Self {
        Self { stats }
    }
}

impl FromIterator<Stat> for StatList {
    fn from_iter<I: IntoIterator<Item = Stat>>(iter: I) -> Self {
        Self {
            stats: iter.into_iter().collect(),
        }
    }
}

impl Extend<Stat> for StatList {
    fn extend<I: IntoIterator<Item = Stat>>(&mut self, iter: I) {
        self.stats.extend(iter);
    }
}

impl IntoIterator for StatList {
    type Item = Stat;
    type IntoIter = std::vec::IntoIter<Stat>;

    fn into_iter(self) -> Self::IntoIter {
        self.stats.into_iter()
    }
}

impl<'a> IntoIterator for &'a StatList {
    type Item = &'a Stat;
    type IntoIter = std::slice::Iter<'a, Stat>;

    fn into_iter(self) -> Self::IntoIter {
        self.stats.iter()
    }
}
