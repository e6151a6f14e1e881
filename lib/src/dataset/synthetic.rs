//! Synthetic listing generator.
//!
//! Produces listings whose price is a noisy linear function of the attributes:
//!
//! ```text
//! Price = 15000 + 800 * (Year - 2000) - 0.05 * Mileage
//!       + 3000 * [Make == "B"] + 2000 * [Model == "Y"] + U(-noise, noise)
//! ```
//!
//! Used by tests, benchmarks and the demo binary where no real data file is at hand.

use crate::dataset::{CarListing, ListingDataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAKES: [&str; 2] = ["A", "B"];
const MODELS: [&str; 2] = ["X", "Y"];

/// Builder for a synthetic [`ListingDataset`].
#[derive(Debug, Clone)]
pub struct SyntheticListings {
    n_rows: usize,
    seed: u64,
    noise: f64,
}

impl SyntheticListings {
    /// `n_rows` listings with seed 0 and noise amplitude 1500.
    pub fn new(n_rows: usize) -> Self {
        Self {
            n_rows,
            seed: 0,
            noise: 1500.0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Half-width of the uniform price noise. Zero gives exact prices.
    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise.abs();
        self
    }

    /// Noise-free price for the given attributes.
    pub fn base_price(year: f64, mileage: f64, make: &str, model: &str) -> f64 {
        let mut price = 15000.0 + 800.0 * (year - 2000.0) - 0.05 * mileage;
        if make == "B" {
            price += 3000.0;
        }
        if model == "Y" {
            price += 2000.0;
        }
        price
    }

    pub fn generate(&self) -> ListingDataset {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let rows = (0..self.n_rows)
            .map(|_| {
                let year = rng.gen_range(2000..=2020) as f64;
                let mileage = rng.gen_range(0.0..=200_000.0_f64).round();
                let make = MAKES[rng.gen_range(0..MAKES.len())];
                let model = MODELS[rng.gen_range(0..MODELS.len())];
                let noise = if self.noise > 0.0 {
                    rng.gen_range(-self.noise..=self.noise)
                } else {
                    0.0
                };
                let price = (Self::base_price(year, mileage, make, model) + noise).max(0.0);
                CarListing::new(price, year, mileage, make, model)
            })
            .collect::<Vec<_>>();
        ListingDataset::new(rows)
    }
}
