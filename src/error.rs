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
    # Errors

    This crate's only broad failure surface: a caller-supplied callback
    (to [`crate::mem::fixed::FixedArray::append_batch`],
    [`crate::mem::fixed::FixedArray::insert_batch`],
    [`crate::mem::fixed::FixedArray::edit`], or the Ordered Set/Dictionary
    build helpers) reporting its own `Err(E)`.

    Everything else in this crate that can go wrong is a precondition
    violation, and those panic with a short message instead (see the
    `trap_if_*` helpers in `mem::fixed` and the bounds checks in
    `idx::hash`) rather than being routed through this type — matching the
    teacher's per-subsystem error types rather than one catch-all `enum`.
*/

use std::fmt;

/// Wraps a callback's own error so it can be threaded back out through a
/// container operation without the container needing to know anything
/// about `E` beyond `Sized`.
#[derive(Debug)]
pub struct CallbackError<E> {
    inner: E,
}

impl<E> CallbackError<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: fmt::Display> fmt::Display for CallbackError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "callback failed: {}", self.inner)
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for CallbackError<E> {}

pub type Result<T, E> = std::result::Result<T, CallbackError<E>>;
