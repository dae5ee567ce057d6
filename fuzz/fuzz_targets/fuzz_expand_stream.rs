#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pedigree_core::Slot;
use pedigree_tree::{ChartConfig, PedigreeTree};

#[derive(Debug, Arbitrary)]
struct Input {
    generations: u8,
    picks: Vec<u16>,
}

fuzz_target!(|input: Input| {
    let generations = u32::from(input.generations % 12) + 1;
    let config = ChartConfig::default().with_max_generations(generations);
    let mut tree = PedigreeTree::with_config(config);

    for pick in input.picks.into_iter().take(600) {
        let slots: Vec<Slot> = tree.slots().collect();
        let slot = slots[usize::from(pick) % slots.len()];
        let before = tree.node_count();
        let predicted = tree.can_expand(slot);
        match tree.expand(slot) {
            Ok(_) => {
                assert!(predicted);
                assert_eq!(tree.node_count(), before + 2);
            }
            Err(_) => {
                assert!(!predicted);
                assert_eq!(tree.node_count(), before);
            }
        }
    }

    // Complete-subtree and edge invariants.
    assert_eq!(tree.edge_count() + 1, tree.node_count());
    for slot in tree.slots() {
        assert!(slot.level() < generations);
        if let Some(child) = slot.child() {
            assert!(tree.has_edge(slot, child));
            let sibling = slot.sibling().unwrap();
            assert!(tree.contains(sibling));
        }
        assert!(tree.position(slot).is_some());
    }
});
