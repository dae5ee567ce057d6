#![no_main]

use libfuzzer_sys::fuzz_target;
use pedigree_tree::{ChartAction, PedigreeTree};

fuzz_target!(|data: &[u8]| {
    // Arbitrary JSON must either fail to parse or replay without panicking.
    let Ok(actions) = serde_json::from_slice::<Vec<ChartAction>>(data) else {
        return;
    };

    let mut tree = PedigreeTree::new();
    for action in actions.iter().take(1024) {
        let before = tree.view();
        if action.apply(&mut tree).is_err() {
            assert_eq!(tree.view(), before, "refused action changed the chart");
        }
    }
    let view = tree.view();
    assert_eq!(view.nodes.len(), tree.node_count());
    assert_eq!(view.edges.len(), tree.edge_count());
});
