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
    `denseidx`: capacity-bounded buffer arrays, a geometrically growing
    array, and an order-preserving, bit-packed hash set/dictionary.

    - [`mem`] — the storage primitives: [`mem::RawStorage`],
      [`mem::FixedArray`], [`mem::GrowingArray`].
    - [`idx`] — the ordered containers built on top: [`idx::OrderedSet`],
      [`idx::OrderedDict`], and the bit-packed [`idx::hash`] table that
      backs both.
    - [`hash`] — the FNV-1a hasher and per-table seed policy `idx::hash`
      uses.
    - [`error`] — the one propagating error type, for the few operations
      whose caller-supplied callback can itself fail.

    None of these containers are `Sync`/`Send`-aware beyond what `T`/`K`/`V`
    already grant; there is no internal locking, matching the upstream
    server's own split between this kind of bare container and the
    concurrency wrappers built around it elsewhere.
*/

pub mod error;
pub mod hash;
pub mod idx;
pub mod mem;

pub use idx::{OrderedDict, OrderedSet};
pub use mem::{FixedArray, GrowingArray, RawStorage};
