//! Price pipeline on synthetic listings.
//!
//! Walks through the same steps as the `train-console` binary without needing
//! a CSV file:
//! - Generate listings with a known pricing rule
//! - Split 80/20 and fit the encoder + Poisson regression
//! - Inspect the learned feature layout and coefficients
//! - Price a couple of new listings, one with an unseen make
//! - Cross-validate
//!
//! Run with: cargo run --example price_pipeline

use car_price::dataset::SyntheticListings;
use car_price::{
    cross_validate, train_test_split, CarListing, KFold, ListingDataset, PricePipeline,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Used Car Price Pipeline ===\n");

    let listings = SyntheticListings::new(2000).with_seed(7).generate();
    let (train, test) = train_test_split(&listings, 0.2, Some(42))?;
    println!("Train rows: {}, test rows: {}", train.len(), test.len());

    let pipeline = PricePipeline::default();
    let fitted = pipeline.fit(&train)?;

    println!("\nLearned coefficients:");
    let weights = &fitted.model().params().weights;
    for (name, w) in fitted.encoder().feature_names().iter().zip(weights.iter()) {
        println!("  {:<12} {:>10.4}", name, w);
    }
    println!("  {:<12} {:>10.4}", "bias", fitted.model().params().bias);

    println!("\nTrain: {}", fitted.evaluate(&train)?);
    println!("Test:  {}", fitted.evaluate(&test)?);

    let new_listings = ListingDataset::new(vec![
        CarListing::new(0.0, 2018.0, 30000.0, "B", "Y"),
        CarListing::new(0.0, 2005.0, 150000.0, "Unknown", "X"),
    ]);
    let prices = fitted.predict(&new_listings)?;
    println!("\nPredictions:");
    for (row, price) in new_listings.iter().zip(prices.iter()) {
        println!(
            "  {} {} {} ({} mi): {:.0}",
            row.year, row.make, row.model, row.mileage, price
        );
    }

    let cv = cross_validate(&pipeline, &listings, &KFold::new(5).with_random_state(42))?;
    println!(
        "\n5-fold R-squared: mean {:.4}, std {:.4}, folds {:?}",
        cv.mean(),
        cv.std(),
        cv.scores()
    );

    Ok(())
}
