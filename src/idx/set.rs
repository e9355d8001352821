/*
 * Created on Mon Jul 27 2026
 *
 * This file is a part of denseidx
 * denseidx is a free and open-source, order-preserving hash set and
 * dictionary library, offering capacity-bounded buffer arrays, a
 * geometrically growing array, and a bit-packed hash table, built with
 * the vision of predictable, allocation-disciplined containers for
 * embedding into latency-sensitive systems.
 *
 * Copyright (c) 2026, Sayan Nandan <ohsayan@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

/*!
    # Ordered Set

    A dense, order-preserving unique collection: a [`GrowingArray`] of
    elements plus an optional bit-packed [`HashTable`] mapping each
    element's hash to its position in that array. Small sets (`len() ≤
    16`) skip the table entirely and fall back to a linear scan — building
    and maintaining a 32-bucket table to index sixteen-or-fewer elements
    would cost more than it saves.
*/

use {
    crate::{
        hash::{hash_with_seed, HashSeedMode},
        idx::hash::{self, HashTable, MAX_UNHASHED},
        mem::GrowingArray,
    },
    std::{fmt, ops::Range, slice},
};

#[cfg(test)]
mod tests;

enum TableState {
    Hashless,
    Hashed(HashTable),
}

/// An order-preserving set: iteration yields elements in insertion order
/// (as adjusted by explicit `insert`/`remove_at`/`sort`/etc.), with
/// membership and lookup backed by a hash table once the set outgrows a
/// linear scan.
pub struct OrderedSet<T> {
    elements: GrowingArray<T>,
    table: TableState,
    seed_mode: HashSeedMode,
    /// Floor below which the table will not demote to Hashless nor shrink
    /// past, set by [`OrderedSet::reserve_capacity`] with `persistent = true`.
    persistent_min: usize,
}

impl<T> OrderedSet<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(n: usize) -> Self {
        let elements = GrowingArray::with_capacity(n);
        let seed_mode = HashSeedMode::current();
        let table = if n > MAX_UNHASHED {
            TableState::Hashed(HashTable::for_capacity(n, seed_mode, elements.as_slice().as_ptr()))
        } else {
            TableState::Hashless
        };
        Self {
            elements,
            table,
            seed_mode,
            persistent_min: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, i: usize) -> &T {
        &self.elements[i]
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        self.elements.as_slice()
    }

    /// `true` once the set has built a hash table (`len() > 16` at some
    /// point and has not since demoted back to linear scan).
    pub fn is_hashed(&self) -> bool {
        matches!(self.table, TableState::Hashed(_))
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::hash::Hash + Eq> OrderedSet<T> {
    fn find_index(&self, e: &T) -> Option<usize> {
        match &self.table {
            TableState::Hashless => self.elements.iter().position(|x| x == e),
            TableState::Hashed(table) => {
                let h = hash_with_seed(e, table.seed());
                table.find(h, |off| &self.elements[off] == e)
            }
        }
    }

    pub fn contains(&self, e: &T) -> bool {
        self.find_index(e).is_some()
    }

    pub fn index_of(&self, e: &T) -> Option<usize> {
        self.find_index(e)
    }

    fn rebuild_table(&self, target_capacity: usize) -> HashTable {
        let target = target_capacity.max(self.persistent_min);
        let anchor = self.elements.as_slice().as_ptr();
        let mut table = HashTable::for_capacity(target, self.seed_mode, anchor);
        let hashed: Vec<(usize, u64)> = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| (i, hash_with_seed(e, table.seed())))
            .collect();
        table.fill_unique(hashed.into_iter());
        table
    }

    /// Place `value` at the end unless an equal element already exists.
    pub fn append(&mut self, value: T) -> (bool, usize) {
        if let Some(i) = self.find_index(&value) {
            return (false, i);
        }
        let idx = self.elements.len();
        self.elements.append(value);
        self.after_append(idx);
        (true, idx)
    }

    fn after_append(&mut self, idx: usize) {
        let len = self.elements.len();
        let needs_promote = matches!(self.table, TableState::Hashless) && len > MAX_UNHASHED;
        let needs_grow = matches!(&self.table, TableState::Hashed(t) if t.occupied() + 1 > t.max_capacity());
        if needs_promote || needs_grow {
            log::debug!("ordered set: rebuilding hash table for append (count={len})");
            self.table = TableState::Hashed(self.rebuild_table(len));
            return;
        }
        if let TableState::Hashed(table) = &mut self.table {
            let seed = table.seed();
            let h = hash_with_seed(&self.elements[idx], seed);
            table.insert_unique(h, idx);
        }
    }

    /// Place `value` at `at` unless an equal element already exists
    /// (whose index may differ from `at`).
    pub fn insert(&mut self, value: T, at: usize) -> (bool, usize) {
        if let Some(i) = self.find_index(&value) {
            return (false, i);
        }
        assert!(at <= self.elements.len(), "ordered set: insert index out of range");
        let old_len = self.elements.len();
        self.elements.insert(value, at);
        self.after_insert(at, old_len);
        (true, at)
    }

    fn after_insert(&mut self, at: usize, old_len: usize) {
        let new_len = old_len + 1;
        let needs_promote = matches!(self.table, TableState::Hashless) && new_len > MAX_UNHASHED;
        let needs_grow = matches!(&self.table, TableState::Hashed(t) if t.occupied() + 1 > t.max_capacity());
        if needs_promote || needs_grow {
            log::debug!("ordered set: rebuilding hash table for insert (count={new_len})");
            self.table = TableState::Hashed(self.rebuild_table(new_len));
            return;
        }
        if matches!(self.table, TableState::Hashed(_)) {
            self.renumber_for_insert(at, old_len);
            if let TableState::Hashed(table) = &mut self.table {
                let seed = table.seed();
                let h = hash_with_seed(&self.elements[at], seed);
                table.insert_unique(h, at);
            }
        }
    }

    /// Shift every stored offset `≥ at` by `+1` (a new element was just
    /// placed at `at`). Picks between the bias-shift trick (when the
    /// prefix `[0, at)` is the smaller side), a whole-table scan, and a
    /// touched-element walk, per the heuristic in §4.D.
    fn renumber_for_insert(&mut self, at: usize, old_len: usize) {
        let TableState::Hashed(table) = &mut self.table else {
            return;
        };
        let suffix_size = old_len - at;
        let seed = table.seed();
        if at < suffix_size {
            table.bias_shift_increment_all();
            for i in 0..at {
                let stale_offset = table.increment_offset(i);
                let h = hash_with_seed(&self.elements[i], seed);
                table.rehome(h, stale_offset, i);
            }
        } else if suffix_size > 0 {
            let threshold = table.max_capacity() / 3;
            if suffix_size > threshold {
                table.renumber_scan(|off| if off >= at { Some(1) } else { None });
            } else {
                // Walk highest offset first: rehome(i-1 -> i) would otherwise
                // collide with the not-yet-processed entry still sitting at
                // i-1 (written as i-1's own "new" value by the next-lower
                // iteration), transiently giving two buckets the same decoded
                // offset while `rehome` matches purely by decoded value.
                for i in (at + 1..=old_len).rev() {
                    let h = hash_with_seed(&self.elements[i], seed);
                    table.rehome(h, i - 1, i);
                }
            }
        }
    }

    /// Remove and return the element equal to `e`, if present.
    pub fn remove(&mut self, e: &T) -> Option<T> {
        let idx = self.find_index(e)?;
        Some(self.remove_at(idx))
    }

    pub fn remove_at(&mut self, at: usize) -> T {
        assert!(at < self.elements.len(), "ordered set: remove index out of range");
        let old_len = self.elements.len();
        let new_len = old_len - 1;

        let needs_demote =
            matches!(self.table, TableState::Hashed(_)) && new_len <= MAX_UNHASHED && self.persistent_min <= MAX_UNHASHED;
        let needs_rebuild = !needs_demote
            && matches!(&self.table, TableState::Hashed(t) if new_len < t.min_capacity() || new_len * 2 <= old_len);

        if needs_demote || needs_rebuild {
            let value = self.elements.remove(at);
            if needs_demote {
                log::debug!("ordered set: demoting hashed -> hashless (count={new_len})");
                self.table = TableState::Hashless;
            } else {
                log::debug!("ordered set: rebuilding hash table for shrink (count={new_len})");
                self.table = TableState::Hashed(self.rebuild_table(new_len));
            }
            return value;
        }

        if let TableState::Hashed(table) = &mut self.table {
            let seed = table.seed();
            let victim_hash = hash_with_seed(&self.elements[at], seed);
            let elements = &self.elements;
            let bucket_count = table.bucket_count() as u64;
            table.remove(
                victim_hash,
                at,
                |off| (hash_with_seed(&elements[off], seed) % bucket_count) as usize,
                |_, _| {},
            );
        }
        let value = self.elements.remove(at);
        self.renumber_for_remove(at, old_len);
        value
    }

    pub fn remove_range(&mut self, range: Range<usize>) -> Vec<T> {
        let mut out = Vec::with_capacity(range.len());
        for _ in range.clone() {
            out.push(self.remove_at(range.start));
        }
        out
    }

    pub fn remove_first(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.remove_at(0))
        }
    }

    pub fn remove_last(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.remove_at(self.len() - 1))
        }
    }

    pub fn remove_all_where<F: FnMut(&T) -> bool>(&mut self, mut pred: F) -> Vec<T> {
        let mut removed = Vec::new();
        let mut i = 0;
        while i < self.len() {
            if pred(&self.elements[i]) {
                removed.push(self.remove_at(i));
            } else {
                i += 1;
            }
        }
        removed
    }

    /// Shift every stored offset `> at` by `-1` (the element at `at` was
    /// just removed). Mirrors [`OrderedSet::renumber_for_insert`].
    fn renumber_for_remove(&mut self, at: usize, old_len: usize) {
        let TableState::Hashed(table) = &mut self.table else {
            return;
        };
        let new_len = old_len - 1;
        let suffix_size = new_len - at;
        let seed = table.seed();
        if suffix_size == 0 {
            return;
        }
        if at < suffix_size {
            table.bias_shift_decrement_all();
            for i in 0..at {
                let stale_offset = table.decrement_offset(i);
                let h = hash_with_seed(&self.elements[i], seed);
                table.rehome(h, stale_offset, i);
            }
        } else {
            let threshold = table.max_capacity() / 3;
            if suffix_size > threshold {
                table.renumber_scan(|off| if off > at { Some(-1) } else { None });
            } else {
                for i in at..new_len {
                    let h = hash_with_seed(&self.elements[i], seed);
                    table.rehome(h, i + 1, i);
                }
            }
        }
    }

    /// Replace the existing element equal to `value`, or append it.
    /// Returns the replaced element, if any.
    pub fn update_or_append(&mut self, value: T) -> Option<T> {
        match self.find_index(&value) {
            Some(i) => Some(std::mem::replace(&mut self.elements.as_mut_slice()[i], value)),
            None => {
                self.append(value);
                None
            }
        }
    }

    /// Replace the existing element equal to `value`, or insert it at
    /// `at`. Returns `(original, index)`.
    pub fn update_or_insert(&mut self, value: T, at: usize) -> (Option<T>, usize) {
        match self.find_index(&value) {
            Some(i) => {
                let old = std::mem::replace(&mut self.elements.as_mut_slice()[i], value);
                (Some(old), i)
            }
            None => {
                self.insert(value, at);
                (None, at)
            }
        }
    }

    /// Replace the element at `i` with `value`. `value` must compare equal
    /// to the element it replaces — the hash table is not touched, since
    /// `Hash`/`Eq` consistency guarantees the bucket is unchanged.
    pub fn update_at(&mut self, i: usize, value: T) -> T {
        assert!(
            self.elements[i] == value,
            "ordered set: update_at requires the replacement to compare equal to the original"
        );
        std::mem::replace(&mut self.elements.as_mut_slice()[i], value)
    }

    /// Reserve table/array capacity for `n` elements. If `persistent`, the
    /// table will not demote to Hashless nor shrink its scale below what
    /// `n` requires, even as elements are removed.
    pub fn reserve_capacity(&mut self, n: usize, persistent: bool) {
        if persistent {
            self.persistent_min = self.persistent_min.max(n);
        }
        self.elements.reserve(n.saturating_sub(self.len()));
        if n > MAX_UNHASHED && matches!(self.table, TableState::Hashless) {
            log::debug!("ordered set: promoting hashless -> hashed via reserve_capacity (n={n})");
            self.table = TableState::Hashed(self.rebuild_table(n));
        } else if let TableState::Hashed(table) = &self.table {
            if n > table.max_capacity() {
                self.table = TableState::Hashed(self.rebuild_table(n));
            }
        }
    }

    /// Shrink the table (and backing array) to fit the current length,
    /// respecting `persistent_min`.
    pub fn shrink_by_policy(&mut self) {
        let len = self.len();
        if matches!(self.table, TableState::Hashed(_)) {
            if len <= MAX_UNHASHED && self.persistent_min <= MAX_UNHASHED {
                log::debug!("ordered set: demoting hashed -> hashless via shrink_by_policy");
                self.table = TableState::Hashless;
            } else {
                let target = len.max(self.persistent_min);
                let current_scale = match &self.table {
                    TableState::Hashed(t) => t.scale(),
                    TableState::Hashless => unreachable!(),
                };
                if hash::select_scale(target) < current_scale {
                    self.table = TableState::Hashed(self.rebuild_table(target));
                }
            }
        }
        self.elements.reallocate(self.len().max(self.persistent_min));
    }
}

impl<T> OrderedSet<T> {
    pub fn swap(&mut self, i: usize, j: usize)
    where
        T: std::hash::Hash,
    {
        if i == j {
            return;
        }
        self.elements.swap(i, j);
        if let TableState::Hashed(table) = &mut self.table {
            let seed = table.seed();
            // hash of the element that used to live at i (now at j), and
            // vice versa
            let h_from_i = hash_with_seed(&self.elements[j], seed);
            let h_from_j = hash_with_seed(&self.elements[i], seed);
            // Locate both buckets by their *current* (pre-swap) offsets
            // before writing either. `rehome` re-probes and matches by
            // decoded value, so calling it twice in sequence would have the
            // second call searching for an offset two buckets now share —
            // find both bucket indices up front instead and write them
            // directly, sidestepping that ambiguity entirely.
            let (_, bucket_i) = table
                .find_with_bucket(h_from_i, |off| off == i)
                .expect("hash table: swap source i not found");
            let (_, bucket_j) = table
                .find_with_bucket(h_from_j, |off| off == j)
                .expect("hash table: swap source j not found");
            table.set_bucket_offset(bucket_i, j);
            table.set_bucket_offset(bucket_j, i);
        }
    }

    /// Partition `[0, len)` so elements matching `pred` come first;
    /// returns the pivot index. Since this can move every element, the
    /// hash table (if present) is rebuilt from scratch afterward.
    pub fn partition<F: FnMut(&T) -> bool>(&mut self, mut pred: F) -> usize
    where
        T: std::hash::Hash + Eq,
    {
        let slice = self.elements.as_mut_slice();
        let mut lo = 0usize;
        let mut hi = slice.len();
        while lo < hi {
            if pred(&slice[lo]) {
                lo += 1;
            } else {
                hi -= 1;
                slice.swap(lo, hi);
            }
        }
        self.rebuild_after_bulk_reorder();
        lo
    }

    pub fn sort<F: FnMut(&T, &T) -> std::cmp::Ordering>(&mut self, mut cmp: F)
    where
        T: std::hash::Hash + Eq,
    {
        self.elements.as_mut_slice().sort_by(|a, b| cmp(a, b));
        self.rebuild_after_bulk_reorder();
    }

    pub fn shuffle<R: rand::Rng>(&mut self, rng: &mut R)
    where
        T: std::hash::Hash + Eq,
    {
        use rand::seq::SliceRandom;
        self.elements.as_mut_slice().shuffle(rng);
        self.rebuild_after_bulk_reorder();
    }

    pub fn reverse(&mut self)
    where
        T: std::hash::Hash + Eq,
    {
        self.elements.as_mut_slice().reverse();
        self.rebuild_after_bulk_reorder();
    }

    fn rebuild_after_bulk_reorder(&mut self)
    where
        T: std::hash::Hash + Eq,
    {
        if matches!(self.table, TableState::Hashed(_)) {
            let len = self.len();
            log::debug!("ordered set: rebuilding hash table after bulk reorder (count={len})");
            self.table = TableState::Hashed(self.rebuild_table(len));
        }
    }
}

impl<T: std::hash::Hash + Eq + Clone> OrderedSet<T> {
    pub fn union(&self, other: &Self) -> Self {
        let mut out = Self::with_capacity(self.len() + other.len());
        for e in self.iter() {
            out.append(e.clone());
        }
        for e in other.iter() {
            if !self.contains(e) {
                out.append(e.clone());
            }
        }
        out
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let mut marked = vec![false; self.len()];
        for (i, e) in self.iter().enumerate() {
            marked[i] = other.contains(e);
        }
        let mut out = Self::with_capacity(marked.iter().filter(|b| **b).count());
        for (i, e) in self.iter().enumerate() {
            if marked[i] {
                out.append(e.clone());
            }
        }
        out
    }

    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut out = Self::with_capacity(self.len() + other.len());
        for e in self.iter() {
            if !other.contains(e) {
                out.append(e.clone());
            }
        }
        for e in other.iter() {
            if !self.contains(e) {
                out.append(e.clone());
            }
        }
        out
    }

    pub fn subtracting(&self, other: &Self) -> Self {
        let mut out = Self::with_capacity(self.len());
        for e in self.iter() {
            if !other.contains(e) {
                out.append(e.clone());
            }
        }
        out
    }

    pub fn union_with(&mut self, other: &Self) {
        *self = self.union(other);
    }

    pub fn intersect_with(&mut self, other: &Self) {
        *self = self.intersection(other);
    }

    pub fn symmetric_difference_with(&mut self, other: &Self) {
        *self = self.symmetric_difference(other);
    }

    pub fn subtract_with(&mut self, other: &Self) {
        *self = self.subtracting(other);
    }
}

impl<T: std::hash::Hash + Eq> OrderedSet<T> {
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|e| other.contains(e))
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    pub fn is_strict_subset(&self, other: &Self) -> bool {
        self.len() < other.len() && self.is_subset(other)
    }

    pub fn is_strict_superset(&self, other: &Self) -> bool {
        self.len() > other.len() && self.is_superset(other)
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.iter().all(|e| !other.contains(e))
    }

    pub fn is_equal_set(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T: std::hash::Hash + Eq, const N: usize> From<[T; N]> for OrderedSet<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: std::hash::Hash + Eq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let it = iter.into_iter();
        let (lower, _) = it.size_hint();
        let mut slf = Self::with_capacity(lower);
        for v in it {
            slf.append(v);
        }
        slf
    }
}

impl<T: std::hash::Hash + Eq> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.append(v);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Order-sensitive: two sets are equal iff their element arrays are equal
/// element-wise. Use [`OrderedSet::is_equal_set`] for unordered comparison.
impl<T: PartialEq> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
