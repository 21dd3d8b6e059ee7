//! Fuzz target for model document parsing.
//!
//! Tests that JSON model document parsing handles arbitrary input
//! without panicking. Documents may come from untrusted exports.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nb_model::Model;

fuzz_target!(|data: &[u8]| {
    // Try to parse as a model document - should never panic, only
    // return an error
    let _ = Model::from_reader(data);
});
