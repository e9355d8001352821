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
    # Hash Table

    A bit-packed, open-addressing table mapping element hashes to their
    position (`offset`) in an external ordering array. This module knows
    nothing about the elements it indexes — every operation that needs to
    compare or re-hash an element takes a closure supplied by
    [`crate::idx::set::OrderedSet`], which owns the element array.

    Bucket read/write lives in [`bucket`]; this module is scale selection,
    probing, Robin-Hood deletion, and renumbering.
*/

mod bucket;

#[cfg(test)]
mod tests;

use crate::hash::HashSeedMode;

/// Below this scale a table would have fewer than 16 buckets; not worth it.
pub(crate) const MIN_SCALE: u8 = 5;

/// A target capacity this small never gets a table — linear scan over the
/// element array is cheaper than maintaining one.
pub(crate) const MAX_UNHASHED: usize = 1usize << (MIN_SCALE - 1);

#[inline(always)]
pub(crate) fn max_scale() -> u8 {
    (usize::BITS as u8).min(56)
}

#[inline(always)]
pub(crate) fn bucket_count_for_scale(scale: u8) -> usize {
    bucket::bucket_count(scale)
}

/// `⌊2^scale · 0.25⌋` — the floor below which a table at this scale should
/// shrink.
#[inline(always)]
pub(crate) fn min_capacity_for_scale(scale: u8) -> usize {
    bucket_count_for_scale(scale) / 4
}

/// `⌊2^scale · 0.75⌋` — the ceiling above which a table at this scale must
/// grow (keeps at least one bucket empty).
#[inline(always)]
pub(crate) fn max_capacity_for_scale(scale: u8) -> usize {
    (bucket_count_for_scale(scale) * 3) / 4
}

/// Smallest scale `s ≥ MIN_SCALE` such that `max_capacity_for_scale(s) ≥
/// capacity` and `bucket_count_for_scale(s) ≥ capacity + 1` (leaving at
/// least one empty bucket).
pub(crate) fn select_scale(capacity: usize) -> u8 {
    let mut s = MIN_SCALE;
    loop {
        let b = bucket_count_for_scale(s) as u64;
        let max_occupied = (b * 3) / 4;
        if max_occupied >= capacity as u64 && b >= capacity as u64 + 1 {
            return s;
        }
        assert!(
            s < max_scale(),
            "hash table: requested capacity exceeds the maximum supported scale"
        );
        s += 1;
    }
}

fn in_circular_range(start: usize, end: usize, x: usize) -> bool {
    if start <= end {
        (start..=end).contains(&x)
    } else {
        x >= start || x <= end
    }
}

/// The bit-packed open-addressing table itself.
pub(crate) struct HashTable {
    words: Vec<u64>,
    scale: u8,
    reserved_scale: u8,
    bias: u64,
    occupied: usize,
    seed: u64,
}

impl HashTable {
    pub(crate) fn with_scale(scale: u8, seed: u64) -> Self {
        assert!(scale >= MIN_SCALE && scale <= max_scale(), "hash table: scale out of range");
        Self {
            words: vec![0u64; bucket::word_count(scale)],
            scale,
            reserved_scale: scale,
            bias: 0,
            occupied: 0,
            seed,
        }
    }

    /// Build a table sized for `capacity` elements, deriving its seed from
    /// `seed_mode` and (for [`HashSeedMode::Random`]) the address of a
    /// caller-owned anchor value — typically the element array's backing
    /// buffer, so the seed is stable for the table's whole lifetime.
    pub(crate) fn for_capacity<A>(capacity: usize, seed_mode: HashSeedMode, address_anchor: *const A) -> Self {
        let scale = select_scale(capacity);
        let seed = match seed_mode {
            HashSeedMode::Random => crate::hash::seed_from_address(address_anchor),
            HashSeedMode::Deterministic => crate::hash::seed_from_scale(scale),
        };
        log::trace!("hash table: building at scale {scale} for capacity {capacity}");
        Self::with_scale(scale, seed)
    }

    #[inline(always)]
    pub(crate) fn scale(&self) -> u8 {
        self.scale
    }

    #[inline(always)]
    pub(crate) fn bucket_count(&self) -> usize {
        bucket_count_for_scale(self.scale)
    }

    #[inline(always)]
    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline(always)]
    pub(crate) fn seed(&self) -> u64 {
        self.seed
    }

    #[inline(always)]
    pub(crate) fn reserved_scale(&self) -> u8 {
        self.reserved_scale
    }

    pub(crate) fn set_reserved_scale(&mut self, scale: u8) {
        self.reserved_scale = scale.max(MIN_SCALE);
    }

    #[inline(always)]
    pub(crate) fn min_capacity(&self) -> usize {
        min_capacity_for_scale(self.scale)
    }

    #[inline(always)]
    pub(crate) fn max_capacity(&self) -> usize {
        max_capacity_for_scale(self.scale)
    }

    #[inline(always)]
    fn ideal_bucket(&self, hash: u64) -> usize {
        (hash % self.bucket_count() as u64) as usize
    }

    /// Probe from `hash`'s ideal bucket until `eq` confirms a decoded
    /// offset or an empty bucket is reached.
    pub(crate) fn find(&self, hash: u64, mut eq: impl FnMut(usize) -> bool) -> Option<usize> {
        let start = self.ideal_bucket(hash);
        let mut cur = bucket::BucketCursor::new(&self.words, self.scale, start);
        loop {
            if !cur.is_occupied() {
                return None;
            }
            if let Some(off) = cur.decoded_offset(self.bias) {
                if eq(off) {
                    return Some(off);
                }
            }
            cur.advance();
        }
    }

    /// Insert `offset` under `hash`, assuming the caller has already
    /// confirmed no equal element is present. Probes to the first empty
    /// bucket and returns the bucket index it landed in — callers that
    /// keep auxiliary storage addressed by bucket (e.g.
    /// [`crate::idx::dict::OrderedDict`]'s value buffer) need it.
    pub(crate) fn insert_unique(&mut self, hash: u64, offset: usize) -> usize {
        let start = self.ideal_bucket(hash);
        let (scale, bias) = (self.scale, self.bias);
        let mut cur = bucket::BucketCursorMut::new(&mut self.words, scale, start);
        loop {
            if !cur.is_occupied() {
                cur.set_current_value(bucket::encode(offset, bias, scale));
                self.occupied += 1;
                return cur.current_bucket();
            }
            cur.advance();
        }
    }

    /// Like [`HashTable::find`], but also returns the bucket index the
    /// match was found in.
    pub(crate) fn find_with_bucket(&self, hash: u64, mut eq: impl FnMut(usize) -> bool) -> Option<(usize, usize)> {
        let start = self.ideal_bucket(hash);
        let mut cur = bucket::BucketCursor::new(&self.words, self.scale, start);
        loop {
            if !cur.is_occupied() {
                return None;
            }
            if let Some(off) = cur.decoded_offset(self.bias) {
                if eq(off) {
                    return Some((off, cur.current_bucket()));
                }
            }
            cur.advance();
        }
    }

    /// Remove the entry for `offset`, located by probing from `hash`'s
    /// ideal bucket. `ideal_bucket_of` lets the Robin-Hood hole-filling
    /// walk recompute the ideal bucket of whichever other elements it
    /// passes over; `on_relocate(from_bucket, to_bucket)` is called for
    /// every surviving entry the walk physically moves, so callers
    /// addressing auxiliary storage by bucket can follow along.
    pub(crate) fn remove(
        &mut self,
        hash: u64,
        offset: usize,
        ideal_bucket_of: impl FnMut(usize) -> usize,
        on_relocate: impl FnMut(usize, usize),
    ) {
        let start = self.ideal_bucket(hash);
        let (scale, bias) = (self.scale, self.bias);
        let b = {
            let mut cur = bucket::BucketCursorMut::new(&mut self.words, scale, start);
            loop {
                assert!(cur.is_occupied(), "hash table: remove called for an absent element");
                if cur.decoded_offset(bias) == Some(offset) {
                    break cur.current_bucket();
                }
                cur.advance();
            }
        };
        self.delete_bucket(b, ideal_bucket_of, on_relocate);
        self.occupied -= 1;
    }

    /// Robin-Hood hole-filling deletion rooted at bucket `b` (already known
    /// to hold the target entry).
    fn delete_bucket(
        &mut self,
        b: usize,
        mut ideal_bucket_of: impl FnMut(usize) -> usize,
        mut on_relocate: impl FnMut(usize, usize),
    ) {
        let bc = self.bucket_count();
        let (scale, bias) = (self.scale, self.bias);

        let next = (b + 1) % bc;
        if bucket::read_raw(&self.words, next, scale) == 0 {
            bucket::write_raw_xor(&mut self.words, b, scale, 0);
            return;
        }

        // walk backwards while occupied to find the start of b's chain
        let mut chain_start = b;
        loop {
            let prev = (chain_start + bc - 1) % bc;
            if bucket::read_raw(&self.words, prev, scale) == 0 {
                break;
            }
            chain_start = prev;
        }

        let mut hole = b;
        let mut walker = next;
        loop {
            let v = bucket::read_raw(&self.words, walker, scale);
            if v == 0 {
                break;
            }
            let off = bucket::decode(v, bias, scale).expect("hash table: occupied bucket decoded as empty");
            let ideal = ideal_bucket_of(off);
            if in_circular_range(chain_start, hole, ideal) {
                let encoded = bucket::encode(off, bias, scale);
                bucket::write_raw_xor(&mut self.words, hole, scale, encoded);
                on_relocate(walker, hole);
                hole = walker;
            }
            walker = (walker + 1) % bc;
        }
        bucket::write_raw_xor(&mut self.words, hole, scale, 0);
    }

    /// Overwrite bucket `b`'s payload directly, with no probing and no
    /// decoded-offset matching. For callers that already know the exact
    /// bucket an entry lives in (e.g. from a prior [`HashTable::find_with_bucket`])
    /// and need to move two entries through each other's offsets without
    /// `rehome`'s "match by decoded value" step ever seeing a transient
    /// duplicate — see [`crate::idx::set::OrderedSet::swap`].
    pub(crate) fn set_bucket_offset(&mut self, b: usize, new_offset: usize) {
        let (scale, bias) = (self.scale, self.bias);
        bucket::write_raw_xor(&mut self.words, b, scale, bucket::encode(new_offset, bias, scale));
    }

    /// Touched-element walk: relocate the single entry for `hash` from
    /// `old_offset` to `new_offset`, by probing for `old_offset` starting
    /// at `hash`'s ideal bucket.
    pub(crate) fn rehome(&mut self, hash: u64, old_offset: usize, new_offset: usize) {
        let start = self.ideal_bucket(hash);
        let (scale, bias) = (self.scale, self.bias);
        let mut cur = bucket::BucketCursorMut::new(&mut self.words, scale, start);
        loop {
            assert!(cur.is_occupied(), "hash table: rehome target not found");
            if cur.decoded_offset(bias) == Some(old_offset) {
                cur.set_current_value(bucket::encode(new_offset, bias, scale));
                return;
            }
            cur.advance();
        }
    }

    /// Whole-table scan renumbering: for every occupied bucket, ask
    /// `delta_for_offset` whether (and by how much) its decoded offset
    /// should shift.
    pub(crate) fn renumber_scan(&mut self, mut delta_for_offset: impl FnMut(usize) -> Option<i64>) {
        let (scale, bias) = (self.scale, self.bias);
        for i in 0..self.bucket_count() {
            let v = bucket::read_raw(&self.words, i, scale);
            if v == 0 {
                continue;
            }
            let off = bucket::decode(v, bias, scale).expect("hash table: occupied bucket decoded as empty");
            if let Some(delta) = delta_for_offset(off) {
                let new_off = (off as i64 + delta) as usize;
                bucket::write_raw_xor(&mut self.words, i, scale, bucket::encode(new_off, bias, scale));
            }
        }
    }

    /// O(1) logical increment of every stored offset, by decrementing
    /// `bias` (mod `2^scale - 1`) instead of touching any bucket. Used for
    /// front insertion when the untouched suffix is larger than the prefix
    /// that would otherwise need a whole-table scan.
    pub(crate) fn bias_shift_increment_all(&mut self) {
        let mask = bucket::mask_for(self.scale);
        self.bias = (self.bias + mask - 1) % mask;
        log::trace!("hash table: bias shift (increment), new bias {}", self.bias);
    }

    /// Inverse of [`HashTable::bias_shift_increment_all`]: decrements every
    /// stored offset in O(1) by incrementing `bias`.
    pub(crate) fn bias_shift_decrement_all(&mut self) {
        let mask = bucket::mask_for(self.scale);
        self.bias = (self.bias + 1) % mask;
        log::trace!("hash table: bias shift (decrement), new bias {}", self.bias);
    }

    /// What `offset` currently reads as after a [`HashTable::bias_shift_increment_all`]
    /// call, i.e. `(offset + 1) mod mask`. Used by callers correcting the
    /// untouched side of a bias shift back to its original value.
    pub(crate) fn increment_offset(&self, offset: usize) -> usize {
        let mask = bucket::mask_for(self.scale);
        ((offset as u64 + 1) % mask) as usize
    }

    /// What `offset` currently reads as after a [`HashTable::bias_shift_decrement_all`]
    /// call, i.e. `(offset - 1) mod mask`.
    pub(crate) fn decrement_offset(&self, offset: usize) -> usize {
        let mask = bucket::mask_for(self.scale);
        ((offset as u64 + mask - 1) % mask) as usize
    }

    /// Insert every `(offset, hash)` pair, assuming the caller has already
    /// verified the elements are pairwise unique.
    pub(crate) fn fill_unique(&mut self, items: impl Iterator<Item = (usize, u64)>) {
        for (offset, hash) in items {
            self.insert_unique(hash, offset);
        }
    }

    /// Like [`HashTable::fill_unique`], but returns the bucket each item
    /// landed in, in input order — used to rebuild bucket-addressed
    /// auxiliary storage alongside a table rebuild.
    pub(crate) fn fill_unique_with_buckets(&mut self, items: impl Iterator<Item = (usize, u64)>) -> Vec<usize> {
        items.map(|(offset, hash)| self.insert_unique(hash, offset)).collect()
    }

    /// Insert `(offset, hash)` pairs one at a time, stopping and returning
    /// the offset of the first element `eq` reports as a duplicate of the
    /// incoming one.
    pub(crate) fn fill_until_first_duplicate(
        &mut self,
        items: impl Iterator<Item = (usize, u64)>,
        mut eq: impl FnMut(usize, usize) -> bool,
    ) -> Option<usize> {
        for (offset, hash) in items {
            if let Some(existing) = self.find(hash, |candidate| eq(candidate, offset)) {
                return Some(existing);
            }
            self.insert_unique(hash, offset);
        }
        None
    }
}
