//! Fuzz target for the estimate-then-infer pipeline.
//!
//! Small arbitrary corpora, including NaN and negative counts, must be
//! rejected or scored without panicking.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nb_core::{
    estimate_likelihood, estimate_prior, infer_posteriors_with, LabelIndex, SaturationPolicy,
    TermDocumentMatrix,
};

#[derive(Debug, Arbitrary)]
struct Input {
    rows: u8,
    cols: u8,
    entries: Vec<(u8, u8, f64)>,
    labels: Vec<u8>,
    smoothing: f64,
    shared: bool,
}

fuzz_target!(|input: Input| {
    let shape = (usize::from(input.rows % 16), usize::from(input.cols % 16));
    let triplets: Vec<(usize, usize, f64)> = input
        .entries
        .iter()
        .take(256)
        .map(|&(r, c, v)| (usize::from(r), usize::from(c), v))
        .collect();
    let Ok(matrix) = TermDocumentMatrix::from_triplets(shape, &triplets) else {
        return;
    };

    let labels: Vec<u8> = input.labels.iter().take(shape.0).map(|l| l % 4).collect();
    let index = LabelIndex::from_labels(&labels);
    let Ok(prior) = estimate_prior(&index) else {
        return;
    };
    let Ok(likelihood) = estimate_likelihood(&matrix, &index, input.smoothing) else {
        return;
    };

    let policy = if input.shared {
        SaturationPolicy::Shared
    } else {
        SaturationPolicy::Certain
    };
    if let Ok(posteriors) = infer_posteriors_with(&matrix, &prior, &likelihood, policy) {
        assert_eq!(posteriors.len(), matrix.rows());
    }
});
