//! Fuzz target for the prediction path.
//!
//! Any document that parses must score any input record without
//! panicking, and the posterior must stay the same size as the class
//! list.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nb_core::inference::predict;
use nb_core::record::InputRecord;
use nb_model::Model;

fuzz_target!(|input: (&str, Vec<(String, String)>)| {
    let (doc, pairs) = input;
    if let Ok(model) = Model::from_json_str(doc) {
        let record: InputRecord = pairs.into_iter().collect();
        let prediction = predict(&model, &record);
        assert_eq!(prediction.probabilities.len(), prediction.log_scores.len());
    }
});
