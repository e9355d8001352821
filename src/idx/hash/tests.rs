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

fn ht(scale: u8) -> HashTable {
    HashTable::with_scale(scale, 0xDEADBEEF)
}

#[test]
fn select_scale_picks_smallest_fit() {
    assert_eq!(select_scale(16), MIN_SCALE);
    assert_eq!(max_capacity_for_scale(MIN_SCALE), (1usize << MIN_SCALE) * 3 / 4);
    assert!(max_capacity_for_scale(select_scale(16)) >= 16);
}

#[test]
fn insert_and_find_roundtrip() {
    let mut t = ht(5);
    let hashes: Vec<u64> = (0..10).map(|i| i as u64 * 7919 + 3).collect();
    for (i, h) in hashes.iter().enumerate() {
        assert!(t.find(*h, |off| off == i).is_none());
        t.insert_unique(*h, i);
    }
    assert_eq!(t.occupied(), 10);
    for (i, h) in hashes.iter().enumerate() {
        assert_eq!(t.find(*h, |off| off == i), Some(i));
    }
}

#[test]
fn remove_then_lookup_misses() {
    let mut t = ht(5);
    let hashes: Vec<u64> = (0..12).map(|i| i as u64 * 101 + 1).collect();
    for (i, h) in hashes.iter().enumerate() {
        t.insert_unique(*h, i);
    }
    // delete a handful of elements and confirm the rest are still reachable
    for &victim in &[3usize, 7, 0] {
        let h = hashes[victim];
        let bc = t.bucket_count() as u64;
        t.remove(h, victim, |off| (hashes[off]) % bc, |_, _| {});
        assert_eq!(t.find(h, |off| off == victim), None);
    }
    for (i, h) in hashes.iter().enumerate() {
        if [3, 7, 0].contains(&i) {
            continue;
        }
        assert_eq!(t.find(*h, |off| off == i), Some(i), "offset {i} lost after deletions");
    }
}

#[test]
fn rehome_updates_stored_offset() {
    let mut t = ht(5);
    let h = 555u64;
    t.insert_unique(h, 2);
    assert_eq!(t.find(h, |off| off == 2), Some(2));
    t.rehome(h, 2, 9);
    assert_eq!(t.find(h, |off| off == 2), None);
    assert_eq!(t.find(h, |off| off == 9), Some(9));
}

#[test]
fn renumber_scan_shifts_matching_offsets() {
    let mut t = ht(5);
    let hashes: Vec<u64> = (0..8).map(|i| i as u64 * 13 + 2).collect();
    for (i, h) in hashes.iter().enumerate() {
        t.insert_unique(*h, i);
    }
    // simulate insertion at position 3: every offset >= 3 shifts by +1
    t.renumber_scan(|off| if off >= 3 { Some(1) } else { None });
    for (i, h) in hashes.iter().enumerate() {
        let expected = if i >= 3 { i + 1 } else { i };
        assert_eq!(t.find(*h, |off| off == expected), Some(expected));
    }
}

#[test]
fn bias_shift_is_equivalent_to_renumbering_all() {
    let mut a = ht(5);
    let mut b = ht(5);
    let hashes: Vec<u64> = (0..6).map(|i| i as u64 * 29 + 5).collect();
    for (i, h) in hashes.iter().enumerate() {
        a.insert_unique(*h, i);
        b.insert_unique(*h, i);
    }
    a.bias_shift_increment_all();
    b.renumber_scan(|off| Some(1));
    for (i, h) in hashes.iter().enumerate() {
        assert_eq!(a.find(*h, |off| off == i + 1), Some(i + 1));
        assert_eq!(b.find(*h, |off| off == i + 1), Some(i + 1));
    }
    a.bias_shift_decrement_all();
    for (i, h) in hashes.iter().enumerate() {
        assert_eq!(a.find(*h, |off| off == i), Some(i));
    }
}

#[test]
fn offset_increment_decrement_wrap_at_mask() {
    let t = ht(5);
    let mask = bucket::mask_for(t.scale());
    assert_eq!(t.increment_offset((mask - 1) as usize), 0);
    assert_eq!(t.decrement_offset(0), (mask - 1) as usize);
}

#[test]
fn fill_until_first_duplicate_stops_at_match() {
    let mut t = ht(5);
    // offsets 0..3 with hashes designed to collide in value (not bucket) at offset 2
    let items = vec![(0usize, 10u64), (1, 20), (2, 30), (3, 10)];
    let dup = t.fill_until_first_duplicate(items.into_iter(), |candidate, incoming| {
        // pretend offset 0 and 3 hold "equal" elements
        (candidate == 0 && incoming == 3) || candidate == incoming
    });
    assert_eq!(dup, Some(0));
    assert_eq!(t.occupied(), 3);
}

#[test]
#[should_panic(expected = "corrupt")]
fn double_wraparound_during_find_panics() {
    let mut t = ht(MIN_SCALE);
    // fill every bucket but one so find() for an absent hash must wrap around once safely...
    let b = t.bucket_count();
    for i in 0..b - 1 {
        t.insert_unique(i as u64, i);
    }
    // now force a second wraparound by searching starting at an occupied bucket
    // with a closure that never matches — drive it past single wrap deliberately
    // by manually occupying the last bucket too (breaking the invariant) via insert_unique.
    t.insert_unique((b - 1) as u64, b - 1);
    t.find(0, |_| false);
}
