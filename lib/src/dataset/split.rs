//! Train/test partitioning.

use crate::dataset::ListingDataset;
use crate::error::{Error, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffled permutation of `0..n`.
///
/// With `Some(seed)` the permutation is reproducible; `None` seeds from OS entropy.
pub(crate) fn shuffled_indices(n: usize, seed: Option<u64>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    indices.shuffle(&mut rng);
    indices
}

/// Split `dataset` into `(train, test)` with `round(test_fraction * n)` test rows.
///
/// Rows are assigned by a shuffled permutation, so the two sides are disjoint
/// and together contain every row exactly once.
///
/// # Errors
/// [`Error::InvalidParameter`] if `test_fraction` is not in `(0, 1)` or the
/// rounded split leaves either side empty.
pub fn train_test_split(
    dataset: &ListingDataset,
    test_fraction: f64,
    seed: Option<u64>,
) -> Result<(ListingDataset, ListingDataset)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "test fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let n = dataset.len();
    let n_test = (test_fraction * n as f64).round() as usize;
    if n_test == 0 || n_test == n {
        return Err(Error::InvalidParameter(format!(
            "test fraction {} leaves an empty partition for {} rows",
            test_fraction, n
        )));
    }

    let indices = shuffled_indices(n, seed);
    let (test_idx, train_idx) = indices.split_at(n_test);
    debug!("Split {} rows into {} train / {} test", n, train_idx.len(), test_idx.len());

    Ok((dataset.subset(train_idx), dataset.subset(test_idx)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CarListing;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Dataset whose price doubles as a row id.
    fn numbered(n: usize) -> ListingDataset {
        (0..n)
            .map(|i| CarListing::new(i as f64, 2010.0, 0.0, "A", "X"))
            .collect::<Vec<_>>()
            .into()
    }

    fn ids(ds: &ListingDataset) -> Vec<usize> {
        ds.iter().map(|r| r.price as usize).collect()
    }

    #[test]
    fn test_split_sizes() {
        let (train, test) = train_test_split(&numbered(100), 0.2, Some(42)).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
    }

    #[test]
    fn test_split_rounds_test_size() {
        // 0.2 * 7 = 1.4 -> 1
        let (train, test) = train_test_split(&numbered(7), 0.2, Some(1)).unwrap();
        assert_eq!(test.len(), 1);
        assert_eq!(train.len(), 6);
    }

    #[test]
    fn test_split_is_reproducible_with_seed() {
        let ds = numbered(50);
        let (a_train, a_test) = train_test_split(&ds, 0.3, Some(7)).unwrap();
        let (b_train, b_test) = train_test_split(&ds, 0.3, Some(7)).unwrap();
        assert_eq!(a_train, b_train);
        assert_eq!(a_test, b_test);
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        let ds = numbered(10);
        for f in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                train_test_split(&ds, f, Some(0)),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_split_rejects_empty_side() {
        // 0.2 * 2 = 0.4 -> 0 test rows
        assert!(train_test_split(&numbered(2), 0.2, Some(0)).is_err());
        assert!(train_test_split(&ListingDataset::default(), 0.2, Some(0)).is_err());
    }

    #[test]
    fn test_split_without_seed_still_partitions() {
        let (train, test) = train_test_split(&numbered(20), 0.25, None).unwrap();
        assert_eq!(train.len() + test.len(), 20);
    }

    proptest! {
        #[test]
        fn prop_split_partitions_dataset(n in 5usize..300, f in 0.05f64..0.95, seed in any::<u64>()) {
            let ds = numbered(n);
            let expected_test = (f * n as f64).round() as usize;
            prop_assume!(expected_test > 0 && expected_test < n);

            let (train, test) = train_test_split(&ds, f, Some(seed)).unwrap();
            prop_assert_eq!(test.len(), expected_test);

            let train_ids: HashSet<usize> = ids(&train).into_iter().collect();
            let test_ids: HashSet<usize> = ids(&test).into_iter().collect();
            prop_assert!(train_ids.is_disjoint(&test_ids));

            let all: HashSet<usize> = train_ids.union(&test_ids).copied().collect();
            prop_assert_eq!(all.len(), n);
            prop_assert_eq!(train.len() + test.len(), n);
        }
    }
}
