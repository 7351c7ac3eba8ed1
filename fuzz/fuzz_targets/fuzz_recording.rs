#![no_main]

//! Recording parser fuzzer.
//!
//! Feeds arbitrary bytes to the JSON recording loader. Anything that parses
//! must replay to completion without panicking.

use libfuzzer_sys::fuzz_target;
use memgrid::replay::{Recording, ReplayEngine};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(recording) = Recording::from_json_str(text) else {
        return;
    };
    if recording.initial_grid.len() > 4096 || recording.rounds.len() > 256 {
        return;
    }
    let Ok(mut engine) = ReplayEngine::new(recording) else {
        return;
    };
    let _ = engine.run_to_end();
    let _ = engine.scores();
});
