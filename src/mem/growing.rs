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
    # Growing Array

    A [`FixedArray`] wrapper that is the unique owner of its storage and
    grows geometrically on demand instead of trapping when full.
*/

use {
    crate::error::Result as CallbackResult,
    super::fixed::{EditView, FixedArray, GapView, UninitSpan},
    std::{
        fmt,
        ops::{Deref, DerefMut, Range},
    },
};

/// `grow(c) = (3c + 1) / 2` — the geometric growth policy from §4.C.
#[inline(always)]
fn grow(capacity: usize) -> usize {
    (3 * capacity + 1) / 2
}

/// A dynamically growing, exclusively owned sequence.
pub struct GrowingArray<T> {
    inner: FixedArray<T>,
}

impl<T> GrowingArray<T> {
    pub fn new() -> Self {
        Self {
            inner: FixedArray::empty(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: FixedArray::new(capacity),
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.inner.as_mut_slice()
    }

    /// Ensure at least `requested` more slots are free, growing
    /// geometrically if not: `new_capacity = max(count + requested,
    /// grow(capacity))`.
    pub fn ensure_free_capacity(&mut self, requested: usize) {
        if self.inner.remaining_capacity() >= requested {
            return;
        }
        let new_capacity = (self.len() + requested).max(grow(self.capacity()));
        self.inner.reallocate(new_capacity);
    }

    pub fn append(&mut self, value: T) {
        self.ensure_free_capacity(1);
        self.inner.append(value);
    }

    pub fn append_batch<F>(&mut self, n: usize, init_fn: F)
    where
        F: FnOnce(&mut UninitSpan<'_, T>),
    {
        self.ensure_free_capacity(n);
        self.inner.append_batch(n, init_fn);
    }

    pub fn try_append_batch<F, E>(&mut self, n: usize, init_fn: F) -> CallbackResult<(), E>
    where
        F: FnOnce(&mut UninitSpan<'_, T>) -> Result<(), E>,
    {
        self.ensure_free_capacity(n);
        self.inner.try_append_batch(n, init_fn)
    }

    pub fn insert(&mut self, value: T, at: usize) {
        self.ensure_free_capacity(1);
        self.inner.insert(value, at);
    }

    pub fn insert_batch<F>(&mut self, n: usize, at: usize, init_fn: F)
    where
        F: FnOnce(&mut GapView<'_, T>),
    {
        self.ensure_free_capacity(n);
        self.inner.insert_batch(n, at, init_fn);
    }

    pub fn remove(&mut self, at: usize) -> T {
        self.inner.remove(at)
    }

    pub fn remove_range(&mut self, range: Range<usize>) -> Vec<T> {
        self.inner.remove_range(range)
    }

    pub fn remove_last(&mut self) -> Option<T> {
        self.inner.remove_last()
    }

    pub fn remove_last_n(&mut self, k: usize) -> Vec<T> {
        self.inner.remove_last_n(k)
    }

    pub fn gap_for_replacement(&mut self, range: Range<usize>, new_len: usize) -> GapView<'_, T> {
        if new_len > range.len() {
            self.ensure_free_capacity(new_len - range.len());
        }
        self.inner.gap_for_replacement(range, new_len)
    }

    pub fn edit<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut EditView<'_, T>) -> R,
    {
        self.inner.edit(f)
    }

    pub fn try_edit<F, R, E>(&mut self, f: F) -> CallbackResult<R, E>
    where
        F: FnOnce(&mut EditView<'_, T>) -> Result<R, E>,
    {
        self.inner.try_edit(f)
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.inner.swap(i, j)
    }

    /// Reallocate capacity exactly to `new_capacity`. Unlike
    /// [`GrowingArray::ensure_free_capacity`] this is an explicit,
    /// non-geometric resize (used by callers that want to shrink, e.g. a
    /// `shrink_to_fit`-style operation).
    pub fn reallocate(&mut self, new_capacity: usize) {
        self.inner.reallocate(new_capacity);
    }

    pub fn reserve(&mut self, n: usize) {
        self.ensure_free_capacity(n);
    }

    pub fn copy(&self) -> Self
    where
        T: Clone,
    {
        Self {
            inner: self.inner.copy(),
        }
    }
}

impl<T> Default for GrowingArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for GrowingArray<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowingArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowingArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for GrowingArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Clone> Clone for GrowingArray<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T> FromIterator<T> for GrowingArray<T> {
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

impl<T> Extend<T> for GrowingArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let it = iter.into_iter();
        let (lower, _) = it.size_hint();
        self.ensure_free_capacity(lower);
        for v in it {
            self.append(v);
        }
    }
}

#[cfg(test)]
mod tests;
