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
fn from_array_deduplicates_keeping_first_occurrence() {
    let s: OrderedSet<i32> = OrderedSet::from([30, 40, 20, 30, 30, 60, 10]);
    assert_eq!(s.as_slice(), [30, 40, 20, 60, 10]);
    assert_eq!(s.len(), 5);
}

#[test]
fn promotes_to_hashed_past_unhashed_threshold() {
    let mut s: OrderedSet<i32> = (0..16).collect();
    assert!(!s.is_hashed());
    s.append(16);
    assert!(s.is_hashed());
    assert_eq!(s.as_slice(), (0..=16).collect::<Vec<_>>());
}

#[test]
fn append_rejects_duplicate() {
    let mut s: OrderedSet<i32> = OrderedSet::new();
    assert_eq!(s.append(1), (true, 0));
    assert_eq!(s.append(2), (true, 1));
    assert_eq!(s.append(1), (false, 0));
    assert_eq!(s.as_slice(), [1, 2]);
}

#[test]
fn insert_at_position_shifts_and_updates_table() {
    let mut s: OrderedSet<i32> = (0..40).collect();
    assert!(s.is_hashed());
    s.insert(999, 10);
    assert_eq!(s.get(10), &999);
    for v in 0..40 {
        assert!(s.contains(&v), "lost {v} after insert");
    }
    assert_eq!(s.len(), 41);
}

#[test]
fn insert_duplicate_reports_existing_index() {
    let mut s: OrderedSet<i32> = (0..40).collect();
    let (inserted, idx) = s.insert(5, 0);
    assert!(!inserted);
    assert_eq!(idx, 5);
    assert_eq!(s.len(), 40);
}

#[test]
fn remove_at_front_renumbers_remaining() {
    let mut s: OrderedSet<i32> = (0..50).collect();
    let removed = s.remove_at(0);
    assert_eq!(removed, 0);
    for v in 1..50 {
        assert_eq!(s.index_of(&v), Some((v - 1) as usize), "offset wrong for {v}");
    }
}

#[test]
fn remove_at_back_renumbers_nothing_else() {
    let mut s: OrderedSet<i32> = (0..50).collect();
    let removed = s.remove_at(49);
    assert_eq!(removed, 49);
    for v in 0..49 {
        assert_eq!(s.index_of(&v), Some(v as usize));
    }
}

#[test]
fn remove_demotes_back_to_hashless() {
    let mut s: OrderedSet<i32> = (0..20).collect();
    assert!(s.is_hashed());
    while s.len() > 10 {
        s.remove_last();
    }
    assert!(!s.is_hashed());
    assert_eq!(s.as_slice(), (0..10).collect::<Vec<_>>());
}

#[test]
fn insert_then_remove_restores_prior_set_when_absent() {
    let mut s: OrderedSet<i32> = (0..30).collect();
    let before = s.as_slice().to_vec();
    let (inserted, at) = s.insert(9999, 5);
    assert!(inserted);
    let removed = s.remove_at(at);
    assert_eq!(removed, 9999);
    assert_eq!(s.as_slice(), before.as_slice());
}

#[test]
fn insert_then_remove_no_op_when_already_present() {
    let mut s: OrderedSet<i32> = (0..30).collect();
    let before = s.as_slice().to_vec();
    let (inserted, at1) = s.insert(7, 2);
    assert!(!inserted);
    let (inserted2, at2) = s.insert(7, 2);
    assert!(!inserted2);
    assert_eq!(at1, at2);
    assert_eq!(s.as_slice(), before.as_slice());
}

#[test]
fn thousand_appends_then_removes_and_readds_is_stable() {
    let mut s: OrderedSet<i32> = OrderedSet::new();
    for i in 0..1000 {
        s.append(i);
    }
    assert_eq!(s.len(), 1000);
    for i in (0..1000).step_by(3) {
        s.remove(&i);
    }
    for i in (0..1000).step_by(3) {
        s.append(i);
    }
    assert_eq!(s.len(), 1000);
    for i in 0..1000 {
        assert!(s.contains(&i));
    }
}

#[test]
fn set_algebra_matches_scenario() {
    let a: OrderedSet<i32> = OrderedSet::from([1, 2, 3, 4]);
    let b: OrderedSet<i32> = OrderedSet::from([6, 4, 2, 0]);
    assert_eq!(a.intersection(&b).as_slice(), [2, 4]);
    assert_eq!(a.symmetric_difference(&b).as_slice(), [1, 3, 6, 0]);
    assert_eq!(a.subtracting(&b).as_slice(), [1, 3]);
    assert_eq!(a.union(&b).as_slice(), [1, 2, 3, 4, 6, 0]);
}

#[test]
fn equality_is_order_sensitive_but_is_equal_set_is_not() {
    let a: OrderedSet<i32> = OrderedSet::from([1, 2, 3, 4]);
    let mut b: OrderedSet<i32> = OrderedSet::from([4, 3, 2, 1]);
    assert_ne!(a, b);
    assert!(a.is_equal_set(&b));
    b.sort(|x, y| x.cmp(y));
    assert_eq!(a, b);
}

#[test]
fn disjoint_and_subset_predicates() {
    let a: OrderedSet<i32> = OrderedSet::from([1, 2]);
    let b: OrderedSet<i32> = OrderedSet::from([1, 2, 3]);
    let c: OrderedSet<i32> = OrderedSet::from([9, 10]);
    assert!(a.is_subset(&b));
    assert!(a.is_strict_subset(&b));
    assert!(b.is_superset(&a));
    assert!(a.is_disjoint(&c));
    assert!(!a.is_disjoint(&b));
}

#[test]
fn reorder_operations_keep_table_consistent() {
    let mut s: OrderedSet<i32> = (0..40).collect();
    s.reverse();
    for v in 0..40 {
        assert!(s.contains(&v));
    }
    s.sort(|a, b| a.cmp(b));
    assert_eq!(s.as_slice(), (0..40).collect::<Vec<_>>());
}

#[test]
fn update_or_append_replaces_equal_element() {
    #[derive(Debug, Clone, Copy)]
    struct Pair(i32, i32);
    impl PartialEq for Pair {
        fn eq(&self, o: &Self) -> bool {
            self.0 == o.0
        }
    }
    impl Eq for Pair {}
    impl std::hash::Hash for Pair {
        fn hash<H: std::hash::Hasher>(&self, h: &mut H) {
            self.0.hash(h);
        }
    }
    let mut s: OrderedSet<Pair> = OrderedSet::new();
    s.append(Pair(1, 100));
    let old = s.update_or_append(Pair(1, 200));
    assert_eq!(old.unwrap().1, 100);
    assert_eq!(s.get(0).1, 200);
    assert_eq!(s.len(), 1);
}

#[test]
fn remove_all_where_filters_matching() {
    let mut s: OrderedSet<i32> = (0..20).collect();
    let removed = s.remove_all_where(|x| x % 2 == 0);
    assert_eq!(removed.len(), 10);
    assert_eq!(s.as_slice(), (0..20).filter(|x| x % 2 != 0).collect::<Vec<_>>());
    for v in s.as_slice() {
        assert!(s.contains(v));
    }
}

#[test]
fn reserve_capacity_persistent_blocks_demotion() {
    let mut s: OrderedSet<i32> = OrderedSet::new();
    s.reserve_capacity(100, true);
    for i in 0..20 {
        s.append(i);
    }
    assert!(s.is_hashed());
    for i in 0..15 {
        s.remove(&i);
    }
    // persistent_min keeps it hashed even though len dropped to 5
    assert!(s.is_hashed());
}
