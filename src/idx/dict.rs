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
    # Ordered Dictionary

    A set of keys (see [`crate::idx::set`] for the element-array/hash-table
    mechanics this mirrors) plus a value buffer addressed by *bucket*
    index rather than element index: value `j` is initialized iff the key
    set's hash table has bucket `j` occupied. This avoids a layer of
    indirection a dictionary addressed by element index would otherwise
    pay on every lookup.

    Below the hashless threshold there is no bucket space to address, so
    values are kept in a plain `Vec` parallel to the key array instead.

    Unlike [`crate::idx::set::OrderedSet`], this dictionary is append-only
    — no key is ever removed — which keeps the bucket-relocation story
    simple: Robin-Hood hole-filling and bias shifts never run, since
    nothing is ever deleted from the underlying table.
*/

use {
    crate::{
        hash::{hash_with_seed, HashSeedMode},
        idx::hash::{HashTable, MAX_UNHASHED},
        mem::GrowingArray,
    },
    std::{fmt, slice},
};


enum TableState {
    Hashless,
    Hashed(HashTable),
}

#[derive(Clone, Copy)]
enum Loc {
    Dense(usize),
    Bucket(usize),
}

/// An order-preserving dictionary: key order matches insertion order.
pub struct OrderedDict<K, V> {
    keys: GrowingArray<K>,
    dense_values: Vec<V>,
    bucket_values: Vec<Option<V>>,
    table: TableState,
    seed_mode: HashSeedMode,
}

impl<K, V> OrderedDict<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(n: usize) -> Self {
        let keys = GrowingArray::with_capacity(n);
        let seed_mode = HashSeedMode::current();
        if n > MAX_UNHASHED {
            let table = HashTable::for_capacity(n, seed_mode, keys.as_slice().as_ptr());
            let bucket_values = (0..table.bucket_count()).map(|_| None).collect();
            Self {
                keys,
                dense_values: Vec::new(),
                bucket_values,
                table: TableState::Hashed(table),
                seed_mode,
            }
        } else {
            Self {
                keys,
                dense_values: Vec::with_capacity(n),
                bucket_values: Vec::new(),
                table: TableState::Hashless,
                seed_mode,
            }
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> slice::Iter<'_, K> {
        self.keys.iter()
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self.table, TableState::Hashed(_))
    }
}

impl<K, V> Default for OrderedDict<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: std::hash::Hash + Eq, V> OrderedDict<K, V> {
    fn locate(&self, k: &K) -> Option<Loc> {
        match &self.table {
            TableState::Hashless => self.keys.iter().position(|x| x == k).map(Loc::Dense),
            TableState::Hashed(table) => {
                let seed = table.seed();
                let h = hash_with_seed(k, seed);
                let keys = &self.keys;
                table.find_with_bucket(h, |off| &keys[off] == k).map(|(_, bucket)| Loc::Bucket(bucket))
            }
        }
    }

    pub fn contains_key(&self, k: &K) -> bool {
        self.locate(k).is_some()
    }

    pub fn get(&self, k: &K) -> Option<&V> {
        match self.locate(k)? {
            Loc::Dense(i) => Some(&self.dense_values[i]),
            Loc::Bucket(j) => self.bucket_values[j].as_ref(),
        }
    }

    pub fn get_mut(&mut self, k: &K) -> Option<&mut V> {
        match self.locate(k)? {
            Loc::Dense(i) => Some(&mut self.dense_values[i]),
            Loc::Bucket(j) => self.bucket_values[j].as_mut(),
        }
    }

    /// Rebuild the hash table at `target_capacity`, moving every existing
    /// value into its freshly assigned bucket. Called before a new key is
    /// appended whenever the table must grow or be promoted from
    /// hashless, so the new key lands directly in a correctly sized table.
    fn rebuild(&mut self, target_capacity: usize) {
        let values = self.take_values_in_key_order();
        let anchor = self.keys.as_slice().as_ptr();
        let mut table = HashTable::for_capacity(target_capacity, self.seed_mode, anchor);
        let seed = table.seed();
        let hashed: Vec<(usize, u64)> = self.keys.iter().enumerate().map(|(i, k)| (i, hash_with_seed(k, seed))).collect();
        let buckets = table.fill_unique_with_buckets(hashed.into_iter());
        let mut bucket_values: Vec<Option<V>> = (0..table.bucket_count()).map(|_| None).collect();
        for (value, bucket) in values.into_iter().zip(buckets) {
            bucket_values[bucket] = Some(value);
        }
        self.table = TableState::Hashed(table);
        self.bucket_values = bucket_values;
    }

    /// Drain whatever values currently exist, in key-array order, leaving
    /// the value storage empty.
    fn take_values_in_key_order(&mut self) -> Vec<V> {
        match &self.table {
            TableState::Hashless => std::mem::take(&mut self.dense_values),
            TableState::Hashed(table) => {
                let seed = table.seed();
                let mut out = Vec::with_capacity(self.keys.len());
                for i in 0..self.keys.len() {
                    let h = hash_with_seed(&self.keys[i], seed);
                    let (_, bucket) = table
                        .find_with_bucket(h, |off| off == i)
                        .expect("ordered dict: key missing its bucket during rebuild");
                    out.push(self.bucket_values[bucket].take().expect("ordered dict: occupied bucket missing value"));
                }
                out
            }
        }
    }

    fn ensure_table_capacity(&mut self, new_len: usize) {
        let needs_promote = matches!(self.table, TableState::Hashless) && new_len > MAX_UNHASHED;
        let needs_grow = matches!(&self.table, TableState::Hashed(t) if t.occupied() + 1 > t.max_capacity());
        if needs_promote || needs_grow {
            log::debug!("ordered dict: rebuilding hash table (target={new_len})");
            self.rebuild(new_len);
        }
    }

    fn append_new(&mut self, key: K, value: V) -> &mut V {
        let new_len = self.keys.len() + 1;
        self.ensure_table_capacity(new_len);
        self.keys.append(key);
        let idx = self.keys.len() - 1;
        match &mut self.table {
            TableState::Hashless => {
                self.dense_values.push(value);
                self.dense_values.last_mut().expect("ordered dict: just pushed a value")
            }
            TableState::Hashed(table) => {
                let seed = table.seed();
                let h = hash_with_seed(&self.keys[idx], seed);
                let bucket = table.insert_unique(h, idx);
                self.bucket_values[bucket] = Some(value);
                self.bucket_values[bucket].as_mut().expect("ordered dict: just inserted a value")
            }
        }
    }

    /// Insert `v` under `k`, returning the previous value if `k` was
    /// already present.
    pub fn insert_value(&mut self, k: K, v: V) -> Option<V> {
        match self.locate(&k) {
            Some(Loc::Dense(i)) => Some(std::mem::replace(&mut self.dense_values[i], v)),
            Some(Loc::Bucket(j)) => {
                let slot = self.bucket_values[j].as_mut().expect("ordered dict: occupied bucket missing value");
                Some(std::mem::replace(slot, v))
            }
            None => {
                self.append_new(k, v);
                None
            }
        }
    }

    /// Upsert `k` → `v`, returning the previous value if any. Identical to
    /// [`OrderedDict::insert_value`] — kept as a distinct name for callers
    /// that want to express intent ("update this key") separately from
    /// "insert this, possibly new, key".
    pub fn update_value(&mut self, k: K, v: V) -> Option<V> {
        self.insert_value(k, v)
    }

    /// Return the value for `k`, building and installing it via `build`
    /// if absent.
    pub fn memoized_value<F: FnOnce() -> V>(&mut self, k: K, build: F) -> &V {
        match self.locate(&k) {
            Some(Loc::Dense(i)) => &self.dense_values[i],
            Some(Loc::Bucket(j)) => self.bucket_values[j].as_ref().expect("ordered dict: occupied bucket missing value"),
            None => {
                let v = build();
                &*self.append_new(k, v)
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys.iter().map(move |k| (k, self.get(k).expect("ordered dict: key missing its value slot")))
    }
}

impl<K: std::hash::Hash + Eq, V> FromIterator<(K, V)> for OrderedDict<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let it = iter.into_iter();
        let (lower, _) = it.size_hint();
        let mut slf = Self::with_capacity(lower);
        for (k, v) in it {
            slf.insert_value(k, v);
        }
        slf
    }
}

impl<K: std::hash::Hash + Eq, V> Extend<(K, V)> for OrderedDict<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert_value(k, v);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedDict<K, V>
where
    K: std::hash::Hash + Eq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
