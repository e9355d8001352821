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
    # Raw Storage

    An untyped-by-the-compiler, aligned buffer of `capacity` slots for `T`.
    Each slot is independently initialized or not; this type keeps no
    occupancy bitmap of its own — callers (starting with [`super::fixed::FixedArray`])
    track the initialized prefix length externally.
*/

use {
    super::unsafe_apis,
    std::{marker::PhantomData, ptr::NonNull},
};

/// A handle to a contiguous, heap-allocated, uninitialized-by-default
/// region of `capacity` slots for `T`.
///
/// `RawStorage` never runs a destructor for the values it stores — dropping
/// it only frees the backing memory. Whoever builds on top of this type is
/// responsible for calling [`RawStorage::drop_at`] (or
/// [`RawStorage::take_at`]) on every slot it initialized before the handle
/// itself is dropped.
pub struct RawStorage<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: RawStorage is just an owned allocation; it is Send/Sync exactly
// when T is, same as a raw Vec<T>.
unsafe impl<T: Send> Send for RawStorage<T> {}
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    /// Allocate space for `capacity` values of `T`. A `capacity` of zero
    /// yields a dangling (never-dereferenced) handle — no allocator call is
    /// made.
    pub fn allocate(capacity: usize) -> Self {
        let ptr = unsafe {
            // UNSAFE(@denseidx): alloc_array handles the zero-capacity case
            NonNull::new_unchecked(unsafe_apis::alloc_array(capacity))
        };
        Self {
            ptr,
            cap: capacity,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Write `value` into slot `i`, marking it initialized.
    ///
    /// SAFETY: `i < capacity()` and slot `i` must currently be uninitialized.
    #[inline(always)]
    pub unsafe fn initialize_at(&mut self, i: usize, value: T) {
        debug_assert!(i < self.cap, "raw storage index out of range");
        self.as_mut_ptr().add(i).write(value);
    }

    /// Read the value out of slot `i`, leaving it logically uninitialized.
    ///
    /// SAFETY: `i < capacity()` and slot `i` must currently be initialized.
    #[inline(always)]
    pub unsafe fn take_at(&mut self, i: usize) -> T {
        debug_assert!(i < self.cap, "raw storage index out of range");
        self.as_mut_ptr().add(i).read()
    }

    /// Run `T`'s destructor in place for slot `i`.
    ///
    /// SAFETY: `i < capacity()` and slot `i` must currently be initialized.
    #[inline(always)]
    pub unsafe fn drop_at(&mut self, i: usize) {
        debug_assert!(i < self.cap, "raw storage index out of range");
        self.as_mut_ptr().add(i).drop_in_place();
    }

    /// Relocate `count` initialized values from `[src, src+count)` to
    /// `[dst, dst+count)`. The ranges may overlap. The source slots become
    /// logically uninitialized; no destructor runs for them.
    ///
    /// SAFETY: both ranges lie within `[0, capacity())`, and
    /// `[src, src+count)` is fully initialized.
    #[inline(always)]
    pub unsafe fn move_range(&mut self, dst: usize, src: usize, count: usize) {
        if count == 0 {
            return;
        }
        debug_assert!(dst + count <= self.cap, "raw storage move dst out of range");
        debug_assert!(src + count <= self.cap, "raw storage move src out of range");
        let base = self.as_mut_ptr();
        unsafe_apis::move_overlapping(base.add(src), base.add(dst), count);
    }

    /// Duplicate `count` values from `[src, src+count)` to
    /// `[dst, dst+count)`. The ranges must not overlap.
    ///
    /// SAFETY: both ranges lie within `[0, capacity())`, the ranges are
    /// disjoint, and `[src, src+count)` is fully initialized.
    #[inline(always)]
    pub unsafe fn copy_range(&mut self, dst: usize, src: usize, count: usize)
    where
        T: Copy,
    {
        if count == 0 {
            return;
        }
        debug_assert!(dst + count <= self.cap, "raw storage copy dst out of range");
        debug_assert!(src + count <= self.cap, "raw storage copy src out of range");
        let base = self.as_mut_ptr();
        unsafe_apis::copy_nonoverlapping(base.add(src) as *const T, base.add(dst), count);
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        unsafe {
            // UNSAFE(@denseidx): releases the allocation only; per-slot dtors
            // are the owner's responsibility and must already have run
            unsafe_apis::dealloc_array(self.ptr.as_ptr(), self.cap);
        }
    }
}
