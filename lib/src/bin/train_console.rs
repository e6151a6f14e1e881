use anyhow::Context;
use car_price::loss::PoissonLoss;
use car_price::preprocessing::ListingEncoder;
use car_price::{cross_validate, load_listings, train_test_split, PricePipeline, TrainConfig};
use log::info;

// Console entry point
// 1. Load listings
// 2. Split 80/20
// 3. Fit encoder + Poisson regression on the train split
// 4. Score train and test splits
// 5. 5-fold cross-validation over the full dataset
//
// stdout carries only the two result lines; progress goes to stderr via the logger.

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainConfig::from_env()?;

    info!("Loading data...");
    let data = load_listings(&config.data_path)
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;
    info!("Loaded {} listings", data.len());

    let (train, test) = train_test_split(&data, config.test_fraction, config.seed)?;

    let pipeline = PricePipeline::new(
        ListingEncoder::new(),
        config.trainer_builder(PoissonLoss).build(),
    );

    info!("Training model...");
    let fitted = pipeline.fit(&train).context("training on the train split failed")?;

    info!("Evaluating model...");
    let train_metrics = fitted.evaluate(&train)?;
    let test_metrics = fitted.evaluate(&test)?;
    println!(
        "Train Set R-Squared: {} | Test Set R-Squared {}",
        train_metrics.r_squared, test_metrics.r_squared
    );

    info!(
        "Cross-validating with {} folds over all {} listings \
         (not directly comparable to the 80/20 test score above)...",
        config.n_folds,
        data.len()
    );
    let cv = cross_validate(&pipeline, &data, &config.kfold()).context("cross-validation failed")?;
    info!(
        "Fold R-squared: {:?} (std {:.4}, min {:.4}, max {:.4})",
        cv.scores(),
        cv.std(),
        cv.min(),
        cv.max()
    );
    println!("Cross Validated R-Squared: {}", cv.mean());

    Ok(())
}
