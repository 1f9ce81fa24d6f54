pub(crate) use super::*;
use crate::stats;
use proptest::prelude::*;

proptest! {
    /// Fitted knot values are always monotone non-decreasing.
    #[test]
    fn prop_fitted_knots_monotone(
        data in prop::collection::vec((-1e6_f64..1e6, -1e6_f64..1e6), 0..200)
    ) {
        let x: Vec<f64> = data.iter().map(|p| p.0).collect();
        let y: Vec<f64> = data.iter().map(|p| p.1).collect();

        let mut iso = IsotonicRegression::new();
        iso.fit(&x, &y).expect("fit");

        let (kx, ky) = iso.knots();
        for w in kx.windows(2) {
            prop_assert!(w[0] < w[1]);
        }
        for w in ky.windows(2) {
            prop_assert!(w[0] <= w[1] + 1e-9);
        }
    }

    /// Predictions preserve order: x1 <= x2 implies f(x1) <= f(x2).
    #[test]
    fn prop_predictions_monotone(
        data in prop::collection::vec((-1e3_f64..1e3, -1e3_f64..1e3), 2..100),
        queries in prop::collection::vec(-2e3_f64..2e3, 2..50)
    ) {
        let x: Vec<f64> = data.iter().map(|p| p.0).collect();
        let y: Vec<f64> = data.iter().map(|p| p.1).collect();

        let mut iso = IsotonicRegression::new();
        iso.fit(&x, &y).expect("fit");

        let mut sorted = queries;
        sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite"));
        let preds = iso.predict(&sorted);
        for w in preds.windows(2) {
            prop_assert!(w[0] <= w[1] + 1e-9);
        }
    }

    /// Predictions never leave the fitted value range (clipping).
    #[test]
    fn prop_predictions_clipped_to_fit_range(
        data in prop::collection::vec((-1e3_f64..1e3, -1e3_f64..1e3), 1..100),
        query in -1e9_f64..1e9
    ) {
        let x: Vec<f64> = data.iter().map(|p| p.0).collect();
        let y: Vec<f64> = data.iter().map(|p| p.1).collect();

        let mut iso = IsotonicRegression::new();
        iso.fit(&x, &y).expect("fit");

        let (_, ky) = iso.knots();
        let lo = ky.first().copied().expect("non-empty fit");
        let hi = ky.last().copied().expect("non-empty fit");
        let p = iso.predict_one(query);
        prop_assert!(p >= lo - 1e-9 && p <= hi + 1e-9);
    }

    /// Every element receives a valid bin id, whatever the input shape.
    #[test]
    fn prop_binning_covers_all_elements(
        x in prop::collection::vec(-1e6_f64..1e6, 0..300),
        n_bins in 1_usize..40
    ) {
        let bins = stats::quantile_bins(&x, n_bins);
        prop_assert_eq!(bins.bin_ids.len(), x.len());
        for &b in &bins.bin_ids {
            prop_assert!(b < bins.n_bins());
        }
    }

    /// The empirical quantile of a finite sample stays within its range.
    #[test]
    fn prop_empirical_quantile_in_range(
        a in prop::collection::vec(-1e6_f64..1e6, 1..200),
        alpha in 0.0_f64..=1.0
    ) {
        let q = stats::empirical_quantile(&a, alpha);
        let min = a.iter().copied().fold(f64::INFINITY, f64::min);
        let max = a.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(q >= min && q <= max);
    }
}
