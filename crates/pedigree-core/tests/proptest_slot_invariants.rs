//! Property-based invariant tests for slot arithmetic.
//!
//! 1. `level(p) == floor(log2(p))`.
//! 2. `index_in_level(p)` lies in `[0, 2^level(p))`.
//! 3. Every non-root slot is one level above its child and is one of the
//!    child's two parents.
//! 4. Siblings share a child and a level.
//! 5. Parents reconstruct the slot from `first_in_level + index`.

use pedigree_core::Slot;
use proptest::prelude::*;

fn slot_strategy() -> impl Strategy<Value = Slot> {
    (1u64..=Slot::MAX).prop_map(|raw| Slot::new(raw).expect("in range"))
}

fn shallow_slot_strategy() -> impl Strategy<Value = Slot> {
    (1u64..(1 << 20)).prop_map(|raw| Slot::new(raw).expect("in range"))
}

proptest! {
    #[test]
    fn level_is_floor_log2(p in shallow_slot_strategy()) {
        let expected = (p.get() as f64).log2().floor() as u32;
        prop_assert_eq!(p.level(), expected);
    }
}

proptest! {
    #[test]
    fn level_matches_highest_bit(p in slot_strategy()) {
        prop_assert!(p.get() >> p.level() == 1);
    }
}

proptest! {
    #[test]
    fn index_in_level_is_bounded(p in slot_strategy()) {
        prop_assert!(p.index_in_level() < Slot::level_len(p.level()));
    }
}

proptest! {
    #[test]
    fn child_is_one_level_down(p in slot_strategy()) {
        match p.child() {
            None => prop_assert!(p.is_root()),
            Some(child) => {
                prop_assert_eq!(p.level(), child.level() + 1);
                let (a, b) = child.parents();
                prop_assert!(p == a || p == b);
            }
        }
    }
}

proptest! {
    #[test]
    fn siblings_share_child(p in slot_strategy()) {
        if let Some(sib) = p.sibling() {
            prop_assert_ne!(sib, p);
            prop_assert_eq!(sib.child(), p.child());
            prop_assert_eq!(sib.level(), p.level());
            prop_assert_ne!(sib.is_first_parent(), p.is_first_parent());
        }
    }
}

proptest! {
    #[test]
    fn parents_round_trip_through_level_index(p in shallow_slot_strategy()) {
        let (a, b) = p.parents();
        prop_assert_eq!(a.level(), p.level() + 1);
        prop_assert_eq!(b.get(), a.get() + 1);
        let first = Slot::first_in_level(a.level()).expect("level in range");
        prop_assert_eq!(first.get() + a.index_in_level(), a.get());
        prop_assert_eq!(a.index_in_level(), 2 * p.index_in_level());
    }
}

proptest! {
    #[test]
    fn lineage_length_is_level_plus_one(p in slot_strategy()) {
        let chain: Vec<Slot> = p.lineage().collect();
        prop_assert_eq!(chain.len() as u32, p.level() + 1);
        prop_assert_eq!(chain.last().copied(), Some(Slot::ROOT));
        for pair in chain.windows(2) {
            prop_assert!(pair[0].is_ancestor_of(pair[1]));
        }
    }
}
