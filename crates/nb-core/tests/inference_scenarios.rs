//! End-to-end inference scenarios.
//!
//! Covers:
//! - Prior and likelihood reference values
//! - Empty documents falling back to the prior
//! - Zero-likelihood terms and saturation
//! - Order preservation and repeatability
//! - Error surfacing before any result is produced

use nb_core::evaluate::{accuracy, log_loss, DEFAULT_LOG_LOSS_EPS};
use nb_core::inference::joint_log_scores;
use nb_core::{
    estimate_likelihood, estimate_prior, infer_posteriors, infer_posteriors_with, Error,
    LabelIndex, Likelihood, MultinomialNb, Prior, SaturationPolicy, TermDocumentMatrix,
};
use nb_config::ClassifierConfig;
use std::collections::BTreeMap;

const TOL: f64 = 1e-9;

/// Six short documents over a five-term vocabulary:
/// [goal, match, vote, election, team]
fn corpus_rows() -> Vec<Vec<f64>> {
    vec![
        vec![2.0, 1.0, 0.0, 0.0, 1.0],
        vec![0.0, 3.0, 0.0, 0.0, 2.0],
        vec![1.0, 0.0, 0.0, 0.0, 1.0],
        vec![0.0, 0.0, 2.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0, 3.0, 0.0],
        vec![0.0, 0.0, 1.0, 1.0, 1.0],
    ]
}

fn corpus() -> (TermDocumentMatrix, Vec<&'static str>) {
    let m = TermDocumentMatrix::from_dense(&corpus_rows()).unwrap();
    (
        m,
        vec!["sport", "sport", "sport", "politics", "politics", "politics"],
    )
}

#[test]
fn prior_two_to_one() {
    let mut groups = BTreeMap::new();
    groups.insert("A", vec![0, 1]);
    groups.insert("B", vec![2]);
    let prior = estimate_prior(&LabelIndex::from_groups(groups).unwrap()).unwrap();
    assert!((prior.get(&"A").unwrap() - 2.0 / 3.0).abs() < 1e-3);
    assert!((prior.get(&"B").unwrap() - 1.0 / 3.0).abs() < 1e-3);
}

#[test]
fn likelihood_reference_vector() {
    let m = TermDocumentMatrix::from_dense(&[vec![2.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]]).unwrap();
    let index = LabelIndex::from_labels(&["A", "A"]);
    let likelihood = estimate_likelihood(&m, &index, 1.0).unwrap();
    let a = likelihood.get(&"A").unwrap();
    assert!((a[0] - 0.5).abs() < 1e-3);
    assert!((a[1] - 0.167).abs() < 1e-3);
    assert!((a[2] - 0.333).abs() < 1e-3);
}

#[test]
fn empty_document_reproduces_prior() {
    let (_, labels) = corpus();
    let index = LabelIndex::from_labels(&labels[..5]);
    let train = TermDocumentMatrix::from_dense(&corpus_rows()[..5]).unwrap();
    let prior = estimate_prior(&index).unwrap();
    let likelihood = estimate_likelihood(&train, &index, 1.0).unwrap();

    let blank = TermDocumentMatrix::from_triplets((2, 5), &[]).unwrap();
    let posteriors = infer_posteriors(&blank, &prior, &likelihood).unwrap();
    for p in &posteriors {
        assert!((p.get(&"sport").unwrap() - 0.6).abs() < TOL);
        assert!((p.get(&"politics").unwrap() - 0.4).abs() < TOL);
        assert!(!p.is_saturated());
    }
}

#[test]
fn unseen_term_without_smoothing_zeroes_the_label() {
    let (m, labels) = corpus();
    let index = LabelIndex::from_labels(&labels);
    let prior = estimate_prior(&index).unwrap();
    let likelihood = estimate_likelihood(&m, &index, 0.0).unwrap();
    assert_eq!(likelihood.get(&"politics").unwrap()[0], 0.0);

    // "goal" never appears in politics.
    let doc = TermDocumentMatrix::from_dense(&[vec![1.0, 0.0, 0.0, 0.0, 1.0]]).unwrap();
    let p = &infer_posteriors(&doc, &prior, &likelihood).unwrap()[0];
    assert_eq!(p.get(&"politics"), Some(0.0));
    assert_eq!(p.get(&"sport"), Some(1.0));
    assert!(p.is_saturated());
}

#[test]
fn both_labels_impossible_is_uniform() {
    let (m, labels) = corpus();
    let index = LabelIndex::from_labels(&labels);
    let prior = estimate_prior(&index).unwrap();
    let likelihood = estimate_likelihood(&m, &index, 0.0).unwrap();

    // "goal" rules out politics, "election" rules out sport.
    let doc = TermDocumentMatrix::from_dense(&[vec![1.0, 0.0, 0.0, 1.0, 0.0]]).unwrap();
    let scores = joint_log_scores(&doc, &prior, &likelihood).unwrap();
    assert!(scores[0].values().all(|s| *s == f64::NEG_INFINITY));

    let p = &infer_posteriors(&doc, &prior, &likelihood).unwrap()[0];
    assert_eq!(p.get(&"politics"), Some(0.5));
    assert_eq!(p.get(&"sport"), Some(0.5));
}

#[test]
fn long_documents_do_not_underflow() {
    let (m, labels) = corpus();
    let index = LabelIndex::from_labels(&labels);
    let prior = estimate_prior(&index).unwrap();
    let likelihood = estimate_likelihood(&m, &index, 1.0).unwrap();

    // Raw products of likelihoods would underflow to 0 for both labels.
    let doc = TermDocumentMatrix::from_dense(&[vec![120.0, 90.0, 105.0, 90.0, 150.0]]).unwrap();
    let p = &infer_posteriors(&doc, &prior, &likelihood).unwrap()[0];
    assert!((p.total() - 1.0).abs() < TOL);
    assert!(p.get(&"sport").unwrap() > 0.0 || p.get(&"politics").unwrap() > 0.0);
}

#[test]
fn huge_score_gap_saturates() {
    let mut prior = BTreeMap::new();
    prior.insert(0u8, 0.5);
    prior.insert(1u8, 0.5);
    let mut vectors = BTreeMap::new();
    vectors.insert(0u8, vec![0.999, 0.001]);
    vectors.insert(1u8, vec![0.001, 0.999]);
    let prior = Prior::from_probabilities(prior).unwrap();
    let likelihood = Likelihood::from_vectors(vectors).unwrap();

    // Gap is 200 · ln(999) ≈ 1381, far beyond exp's range.
    let doc = TermDocumentMatrix::from_dense(&[vec![200.0, 0.0]]).unwrap();
    let p = &infer_posteriors(&doc, &prior, &likelihood).unwrap()[0];
    assert!(p.is_saturated());
    assert_eq!(p.get(&0), Some(1.0));
    assert_eq!(p.get(&1), Some(0.0));
}

#[test]
fn simultaneous_saturation_policies() {
    let mut prior = BTreeMap::new();
    prior.insert('a', 0.25);
    prior.insert('b', 0.25);
    prior.insert('c', 0.5);
    let mut vectors = BTreeMap::new();
    vectors.insert('a', vec![0.5, 0.5]);
    vectors.insert('b', vec![0.5, 0.5]);
    vectors.insert('c', vec![0.0, 1.0]);
    let prior = Prior::from_probabilities(prior).unwrap();
    let likelihood = Likelihood::from_vectors(vectors).unwrap();

    // Term 0 rules out c, leaving a and b both infinitely more likely.
    let doc = TermDocumentMatrix::from_dense(&[vec![1.0, 0.0]]).unwrap();

    let certain = &infer_posteriors(&doc, &prior, &likelihood).unwrap()[0];
    assert_eq!(certain.get(&'a'), Some(1.0));
    assert_eq!(certain.get(&'b'), Some(1.0));
    assert_eq!(certain.get(&'c'), Some(0.0));
    assert_eq!(certain.total(), 2.0);

    let shared =
        &infer_posteriors_with(&doc, &prior, &likelihood, SaturationPolicy::Shared).unwrap()[0];
    assert_eq!(shared.get(&'a'), Some(0.5));
    assert_eq!(shared.get(&'b'), Some(0.5));
    assert_eq!(shared.total(), 1.0);
}

#[test]
fn output_follows_row_order_and_is_repeatable() {
    let (m, labels) = corpus();
    let index = LabelIndex::from_labels(&labels);
    let prior = estimate_prior(&index).unwrap();
    let likelihood = estimate_likelihood(&m, &index, 1.0).unwrap();

    let first = infer_posteriors(&m, &prior, &likelihood).unwrap();
    let second = infer_posteriors(&m, &prior, &likelihood).unwrap();
    assert_eq!(first.len(), m.rows());
    assert_eq!(first, second);

    let predicted: Vec<&str> = first.iter().map(|p| *p.argmax().unwrap()).collect();
    assert_eq!(predicted, labels);

    // Row i scored alone matches row i scored in the batch.
    for (i, row) in corpus_rows().into_iter().enumerate() {
        let single = TermDocumentMatrix::from_dense(&[row]).unwrap();
        let alone = infer_posteriors(&single, &prior, &likelihood).unwrap();
        assert_eq!(alone[0], first[i]);
    }
}

#[test]
fn model_pipeline_scores_training_set() {
    let (m, labels) = corpus();
    let model = MultinomialNb::fit(&m, &labels, &ClassifierConfig::laplace()).unwrap();
    let predicted = model.predict(&m).unwrap();
    assert_eq!(accuracy(&predicted, &labels).unwrap(), 1.0);

    let posteriors = model.predict_proba(&m).unwrap();
    let loss = log_loss(&posteriors, &labels, DEFAULT_LOG_LOSS_EPS).unwrap();
    assert!(loss > 0.0 && loss < 0.5, "loss was {loss}");
}

#[test]
fn errors_surface_without_partial_results() {
    let (m, labels) = corpus();
    let index = LabelIndex::from_labels(&labels);
    let prior = estimate_prior(&index).unwrap();
    let likelihood = estimate_likelihood(&m, &index, 1.0).unwrap();

    let narrow = TermDocumentMatrix::from_dense(&[vec![1.0, 2.0]]).unwrap();
    let err = infer_posteriors(&narrow, &prior, &likelihood).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { .. }));

    let blank_label = TermDocumentMatrix::from_dense(&[
        vec![1.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0],
    ])
    .unwrap();
    let err = estimate_likelihood(&blank_label, &LabelIndex::from_labels(&[1, 2]), 0.0)
        .unwrap_err();
    assert_eq!(err.code(), 21);
}
