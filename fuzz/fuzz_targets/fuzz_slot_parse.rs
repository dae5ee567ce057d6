#![no_main]

use libfuzzer_sys::fuzz_target;
use pedigree_core::Slot;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing must never panic.
    let Ok(slot) = text.parse::<Slot>() else {
        return;
    };

    assert!(slot.level() <= Slot::MAX_LEVEL);
    assert!(slot.index_in_level() < Slot::level_len(slot.level()));
    assert_eq!(slot.to_string().parse::<Slot>().ok(), Some(slot));
    if let Some(child) = slot.child() {
        assert_eq!(child.level() + 1, slot.level());
    }
});
