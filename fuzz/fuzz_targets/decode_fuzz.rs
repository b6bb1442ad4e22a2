//! Decoder fuzz target: feed arbitrary bytes to the wire decoder and action
//! list walker, and UTF-8 inputs to the text parser. None of them may panic.
//! Build with: cargo fuzz run decode_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let registry = setfield::StandardRegistry;
    let _ = setfield::SetFieldAction::from_wire(data, &registry);
    let _ = setfield::decode_action_list(data, &registry);
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = setfield::SetFieldAction::from_text(s, &registry);
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run decode_fuzz");
}
