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
    # Unsafe APIs

    Thin, `#[inline(always)]` wrappers over the allocator and a handful of
    pointer primitives. Every caller carries its own one-line safety
    justification; this module does not re-validate anything.
*/

use std::{
    alloc::{self, Layout},
    ptr::{self, NonNull},
};

/// Allocate the given layout. Panics if the allocator returns an error.
#[inline(always)]
pub unsafe fn alloc_layout<T>(layout: Layout) -> *mut T {
    let ptr = alloc::alloc(layout);
    assert!(!ptr.is_null(), "malloc failed");
    ptr as _
}

/// Allocate a block with an array layout of type `T` with space for `l` elements.
#[inline(always)]
pub unsafe fn alloc_array<T>(l: usize) -> *mut T {
    if l != 0 {
        self::alloc_layout(Layout::array::<T>(l).unwrap_unchecked())
    } else {
        NonNull::dangling().as_ptr()
    }
}

/// Deallocate the given layout.
#[inline(always)]
pub unsafe fn dealloc_layout(ptr: *mut u8, layout: Layout) {
    alloc::dealloc(ptr, layout)
}

/// Deallocate an array of type `T` with size `l`. Skips the call for a
/// zero-size array (the allocator was never touched for it either).
#[inline(always)]
pub unsafe fn dealloc_array<T>(ptr: *mut T, l: usize) {
    if l != 0 {
        self::dealloc_layout(ptr as *mut u8, Layout::array::<T>(l).unwrap_unchecked())
    }
}

/// Run the dtor for the given slice (range).
#[inline(always)]
pub unsafe fn drop_slice_in_place_ref<T>(ptr: &mut [T]) {
    ptr::drop_in_place(ptr as *mut [T])
}

/// Run the dtor for the given slice (defined using ptr and len).
#[inline(always)]
pub unsafe fn drop_slice_in_place<T>(ptr: *mut T, l: usize) {
    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr, l))
}

/// Relocate `count` initialized values from `src` to `dst`. The ranges may
/// overlap; the source positions are left uninitialized as far as the
/// caller's bookkeeping is concerned (no dtor runs).
#[inline(always)]
pub unsafe fn move_nonoverlapping<T>(src: *const T, dst: *mut T, count: usize) {
    ptr::copy_nonoverlapping(src, dst, count)
}

/// Relocate `count` initialized values from `src` to `dst`, permitting
/// overlap between the two ranges.
#[inline(always)]
pub unsafe fn move_overlapping<T>(src: *const T, dst: *mut T, count: usize) {
    ptr::copy(src, dst, count)
}

/// Duplicate `count` values from `src` to `dst`. Requires `T: Copy` at the
/// type level from callers; this helper just performs the memcpy.
#[inline(always)]
pub unsafe fn copy_nonoverlapping<T: Copy>(src: *const T, dst: *mut T, count: usize) {
    ptr::copy_nonoverlapping(src, dst, count)
}
