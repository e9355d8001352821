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
    # Hashing & seed policy

    The table hasher used throughout [`crate::idx::hash`]: a small
    Fowler-Noll-Vo (FNV-1a) implementation, folded together with a
    per-table seed before the key's own bytes are mixed in.

    No third-party hashing crate is used here — this mirrors the upstream
    server's own choice to roll a small FNV-1a rather than pull in
    `ahash`/`fxhash`.
*/

use std::{
    hash::{Hash, Hasher},
    marker::PhantomData,
};

pub trait HashPolicy {
    const PRIME: u64;
    const OFFSET: u64;
}

pub struct Fnv1APolicy64A;
impl HashPolicy for Fnv1APolicy64A {
    const OFFSET: u64 = 0xCBF29CE484222325;
    const PRIME: u64 = 0x100000001B3;
}

pub type Fnv1A64 = Fnv1A<Fnv1APolicy64A>;

pub struct Fnv1A<P: HashPolicy> {
    hash: u64,
    _m: PhantomData<P>,
}

impl<P: HashPolicy> Fnv1A<P> {
    pub const fn new() -> Self {
        Self {
            hash: P::OFFSET,
            _m: PhantomData,
        }
    }
}

impl<P: HashPolicy> Hasher for Fnv1A<P> {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.hash ^= *byte as u64;
            self.hash = self.hash.wrapping_mul(P::PRIME);
        }
    }
}

/// How a hash table's per-instance seed is derived.
///
/// Chosen once, at table construction, and never mutated thereafter (see
/// SPEC_FULL.md §9, "Hash seed selection").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashSeedMode {
    /// Seed is derived from the backing buffer's allocation address —
    /// unpredictable across runs, resistant to algorithmic-complexity
    /// attacks that rely on knowing the hash function's behavior.
    Random,
    /// Seed is a pure function of the table's scale — reproducible, for
    /// golden/deterministic tests. Enabled by the `deterministic-hashing`
    /// feature.
    Deterministic,
}

impl HashSeedMode {
    #[inline(always)]
    pub const fn current() -> Self {
        if cfg!(feature = "deterministic-hashing") {
            HashSeedMode::Deterministic
        } else {
            HashSeedMode::Random
        }
    }
}

/// Derive a table seed from the address of its backing allocation. Two
/// tables that happen to share an address (impossible while both are
/// live) would share a seed; this is fine — the guarantee is
/// per-allocation entropy, not global uniqueness.
pub fn seed_from_address<T>(ptr: *const T) -> u64 {
    let addr = ptr as usize as u64;
    let mut h = Fnv1A64::new();
    h.write(&addr.to_ne_bytes());
    h.finish()
}

/// A seed that depends only on `scale`, for reproducible tests.
pub fn seed_from_scale(scale: u8) -> u64 {
    Fnv1APolicy64A::OFFSET
        .wrapping_mul(Fnv1APolicy64A::PRIME)
        .wrapping_add(scale as u64)
}

/// Hash `value` with `seed` folded in ahead of the value's own bytes.
pub fn hash_with_seed<T: Hash + ?Sized>(value: &T, seed: u64) -> u64 {
    let mut hasher = Fnv1A64::new();
    hasher.write(&seed.to_ne_bytes());
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value_same_hash() {
        assert_eq!(hash_with_seed(&"hello", 42), hash_with_seed(&"hello", 42));
    }

    #[test]
    fn different_seed_usually_different_hash() {
        assert_ne!(hash_with_seed(&"hello", 1), hash_with_seed(&"hello", 2));
    }

    #[test]
    fn seed_from_scale_is_pure() {
        assert_eq!(seed_from_scale(5), seed_from_scale(5));
        assert_ne!(seed_from_scale(5), seed_from_scale(6));
    }
}
