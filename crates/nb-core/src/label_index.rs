//! Grouping of training samples by class label.

use nb_common::{Error, Label, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Class label → indices of the training samples carrying that label.
///
/// Every sample index in `0..num_samples` appears in exactly one group and no
/// group is empty. An index built from zero samples is valid but empty;
/// estimators reject it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelIndex<L: Label> {
    groups: BTreeMap<L, Vec<usize>>,
    num_samples: usize,
}

impl<L: Label> LabelIndex<L> {
    /// Group a parallel label array: sample `i` has label `labels[i]`.
    ///
    /// Indices inside each group are ascending.
    pub fn from_labels(labels: &[L]) -> Self {
        let mut groups: BTreeMap<L, Vec<usize>> = BTreeMap::new();
        for (index, label) in labels.iter().enumerate() {
            groups.entry(label.clone()).or_default().push(index);
        }
        LabelIndex {
            groups,
            num_samples: labels.len(),
        }
    }

    /// Build from explicit groups, checking the coverage invariant.
    pub fn from_groups(groups: BTreeMap<L, Vec<usize>>) -> Result<Self> {
        let num_samples: usize = groups.values().map(Vec::len).sum();
        let mut seen = vec![false; num_samples];

        for (label, indices) in &groups {
            if indices.is_empty() {
                return Err(Error::InvalidInput(format!(
                    "label {:?} has no samples",
                    label
                )));
            }
            for &index in indices {
                if index >= num_samples {
                    return Err(Error::InvalidInput(format!(
                        "sample index {} of label {:?} is outside 0..{}",
                        index, label, num_samples
                    )));
                }
                if seen[index] {
                    return Err(Error::InvalidInput(format!(
                        "sample index {} appears more than once",
                        index
                    )));
                }
                seen[index] = true;
            }
        }

        Ok(LabelIndex {
            groups,
            num_samples,
        })
    }

    /// Number of distinct labels.
    pub fn num_labels(&self) -> usize {
        self.groups.len()
    }

    /// Total number of samples across all labels.
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sample indices for one label.
    pub fn indices(&self, label: &L) -> Option<&[usize]> {
        self.groups.get(label).map(Vec::as_slice)
    }

    /// Labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.groups.keys()
    }

    /// (label, indices) pairs in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, &[usize])> {
        self.groups
            .iter()
            .map(|(label, indices)| (label, indices.as_slice()))
    }
}
