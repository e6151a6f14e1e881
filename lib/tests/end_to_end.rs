use car_price::dataset::SyntheticListings;
use car_price::loss::SquaredLoss;
use car_price::preprocessing::ListingEncoder;
use car_price::{
    cross_validate, train_test_split, Error, KFold, ListingDataset, PricePipeline, TrainConfig,
    Trainer,
};

fn synthetic_1000() -> ListingDataset {
    SyntheticListings::new(1000).with_seed(2024).generate()
}

#[test]
fn poisson_pipeline_scores_synthetic_listings() {
    let config = TrainConfig::default();
    let data = synthetic_1000();
    let (train, test) = train_test_split(&data, config.test_fraction, config.seed).unwrap();
    assert_eq!(test.len(), 200);

    let pipeline = PricePipeline::default();
    let fitted = pipeline.fit(&train).unwrap();
    let train_r2 = fitted.evaluate(&train).unwrap().r_squared;
    let test_r2 = fitted.evaluate(&test).unwrap().r_squared;

    assert!(train_r2 > 0.5, "train R2 = {}", train_r2);
    assert!(test_r2 > 0.5, "test R2 = {}", test_r2);

    let cv = cross_validate(&pipeline, &data, &config.kfold()).unwrap();
    assert_eq!(cv.fold_metrics.len(), 5);
    assert!(
        (cv.mean() - test_r2).abs() < 0.1,
        "CV mean {} vs test {}",
        cv.mean(),
        test_r2
    );
}

#[test]
fn squared_loss_regressor_plugs_into_pipeline() {
    let data = synthetic_1000();
    let (train, test) = train_test_split(&data, 0.2, Some(42)).unwrap();

    let pipeline = PricePipeline::new(
        ListingEncoder::new(),
        Trainer::builder(SquaredLoss).l2_weight(0.0).build(),
    );
    let metrics = pipeline.fit(&train).unwrap().evaluate(&test).unwrap();

    // The synthetic price is linear in the encoded features
    assert!(metrics.r_squared > 0.9, "test R2 = {}", metrics.r_squared);
}

#[test]
fn pipeline_run_is_reproducible_with_seed() {
    let data = SyntheticListings::new(300).with_seed(5).generate();
    let run = || {
        let (train, test) = train_test_split(&data, 0.2, Some(9)).unwrap();
        let fitted = PricePipeline::default().fit(&train).unwrap();
        let cv = cross_validate(
            &PricePipeline::default(),
            &data,
            &KFold::new(5).with_random_state(9),
        )
        .unwrap();
        (fitted.evaluate(&test).unwrap().r_squared, cv.mean())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_rows_with_unseen_categories_do_not_change_layout() {
    let data = synthetic_1000();
    let (train, _) = train_test_split(&data, 0.2, Some(42)).unwrap();
    let fitted = PricePipeline::default().fit(&train).unwrap();

    let mut rows = train.rows()[..5].to_vec();
    for row in &mut rows {
        row.make = "Unseen".to_string();
    }
    let pred = fitted.predict(&ListingDataset::new(rows)).unwrap();
    assert_eq!(pred.len(), 5);
    assert_eq!(fitted.encoder().make_vocabulary(), &["A", "B"]);
}

#[test]
fn cross_validation_rejects_bad_fold_count() {
    let data = SyntheticListings::new(20).generate();
    let err = cross_validate(&PricePipeline::default(), &data, &KFold::new(1)).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}
