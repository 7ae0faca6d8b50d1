use pcalab::{
    agg::{center, column_means, covariance},
    linalg::Matrix,
    pca::{Fit, PcaModel},
};
use proptest::prelude::*;

prop_compose! {
    fn samples()(height in 1usize..12, width in 1usize..5,
                 values in prop::collection::vec(-100f64..100f64, 1..=48))
                 -> Matrix {
        let data = values.into_iter().cycle().take(height * width).collect::<Vec<_>>();
        Matrix::new(data, height, width).expect("matrix shape")
    }
}

prop_compose! {
    fn samples_and_components()(data in samples())
                               (k in 1..=data.width(), data in Just(data))
                               -> (Matrix, usize) {
        (data, k)
    }
}

proptest! {
    #[test]
    fn fit_is_deterministic((data, k) in samples_and_components()) {
        let Fit { model: first, .. } = PcaModel::fit(data.clone(), k).unwrap();
        let Fit { model: second, .. } = PcaModel::fit(data, k).unwrap();

        let first_bits: Vec<u64> = first.eigenvalues().iter().map(|v| v.to_bits()).collect();
        let second_bits: Vec<u64> = second.eigenvalues().iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(first_bits, second_bits);
        prop_assert_eq!(
            first.explained_variance_ratio().to_bits(),
            second.explained_variance_ratio().to_bits()
        );
        prop_assert!(first
            .eigenvectors()
            .as_slice()
            .iter()
            .zip(second.eigenvectors().as_slice())
            .all(|(a, b)| a.to_bits() == b.to_bits()));
    }

    #[test]
    fn transform_has_one_column_per_component((data, k) in samples_and_components()) {
        let height = data.height();
        let Fit { model, .. } = PcaModel::fit(data.clone(), k).unwrap();

        let projected = model.transform(data).unwrap();

        prop_assert_eq!(projected.shape(), (height, k));
    }

    #[test]
    fn eigenvalues_are_sorted_descending((data, k) in samples_and_components()) {
        let Fit { model, .. } = PcaModel::fit(data, k).unwrap();

        prop_assert!(model.eigenvalues().windows(2).all(|w| w[0] >= w[1]));
        prop_assert_eq!(model.eigenvalues().len(), model.n_features());
    }

    #[test]
    fn explained_variance_ratio_is_bounded(data in samples()) {
        for k in 1..=data.width() {
            let Fit { model, .. } = PcaModel::fit(data.clone(), k).unwrap();
            let ratio = model.explained_variance_ratio();

            prop_assert!(
                (0.0..=1.0).contains(&ratio),
                "ratio {} eigenvalues {:?}",
                ratio,
                model.eigenvalues()
            );
        }
    }

    #[test]
    fn centered_columns_have_zero_mean(mut data in samples()) {
        let means = column_means(&data);
        center(&mut data, &means).unwrap();

        for mean in column_means(&data) {
            prop_assert!(mean.abs() < 1e-9, "mean {} not close to zero", mean);
        }
    }

    #[test]
    fn covariance_is_symmetric(mut data in samples()) {
        let means = column_means(&data);
        center(&mut data, &means).unwrap();

        let cov = covariance(&data).unwrap();
        let transposed = cov.as_matrix().transpose();

        prop_assert!(cov.is_symmetric(1e-9));
        prop_assert!(cov
            .as_matrix()
            .as_slice()
            .iter()
            .zip(transposed.as_slice())
            .all(|(a, b)| (a - b).abs() < 1e-9));
    }
}
