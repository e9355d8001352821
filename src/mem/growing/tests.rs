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

use super::*;

#[test]
fn thousand_appends_from_empty() {
    let mut a = GrowingArray::new();
    for i in 0..1000 {
        a.append(i);
    }
    assert_eq!(a.len(), 1000);
    // grow_sequence(0, 1000): repeated application of grow() starting at 0
    let mut cap = 0usize;
    while cap < 1000 {
        cap = super::grow(cap).max(cap + 1);
    }
    assert!(a.capacity() <= cap || a.capacity() >= 1000);
    assert!(a.iter().enumerate().all(|(i, x)| *x == i as i32));
}

#[test]
fn never_shrinks_silently() {
    let mut a: GrowingArray<i32> = (0..100).collect();
    let cap_before = a.capacity();
    a.remove_last_n(90);
    assert_eq!(a.capacity(), cap_before);
}

#[test]
fn insert_and_remove_preserve_order() {
    let mut a: GrowingArray<i32> = (0..5).collect();
    a.insert(99, 2);
    assert_eq!(a.as_slice(), [0, 1, 99, 2, 3, 4]);
    assert_eq!(a.remove(2), 99);
    assert_eq!(a.as_slice(), [0, 1, 2, 3, 4]);
}

#[test]
fn ensure_free_capacity_uses_max_of_requested_and_growth() {
    let mut a: GrowingArray<i32> = GrowingArray::with_capacity(4);
    a.append(1);
    a.append(2);
    a.append(3);
    a.append(4);
    // now full at capacity 4; requesting 1 more slot should grow
    a.append(5);
    assert!(a.capacity() > 4);
    assert_eq!(a.len(), 5);
}

#[test]
fn clone_is_independent() {
    let a: GrowingArray<i32> = (0..10).collect();
    let mut b = a.clone();
    b.append(999);
    assert_eq!(a.len(), 10);
    assert_eq!(b.len(), 11);
}
