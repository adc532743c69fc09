//! Writes a synthetic customer dataset and a matching set of demo artifacts
//! (model + encoders) to the default locations, so the dashboard can run
//! without externally trained files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use customer_dashboard::DashboardError;
use customer_dashboard::config::DashboardConfig;
use customer_dashboard::data::model::CustomerRecord;
use customer_dashboard::predict::artifacts::load_bundle;
use customer_dashboard::predict::features::SATISFACTION_FEATURES;
use customer_dashboard::predict::pipeline::{PredictionInput, predict_with};

const CUSTOMERS: usize = 350;

const CITIES: [&str; 6] = [
    "New York",
    "Los Angeles",
    "Chicago",
    "San Francisco",
    "Miami",
    "Houston",
];
const GENDERS: [&str; 2] = ["Female", "Male"];
const MEMBERSHIPS: [&str; 3] = ["Bronze", "Gold", "Silver"];
const SATISFACTION: [&str; 3] = ["Neutral", "Satisfied", "Unsatisfied"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

/// Hand-written demo tree over [discount, days, items, membership code].
fn demo_model() -> serde_json::Value {
    json!({
        "schema_version": SATISFACTION_FEATURES.version,
        "feature_names": SATISFACTION_FEATURES.columns,
        "model": {
            "kind": "decision_tree",
            "nodes": [
                {"feature": 3, "threshold": 0.5, "left": 1, "right": 2},
                {"feature": 1, "threshold": 30.0, "left": 3, "right": 4},
                {"feature": 1, "threshold": 20.0, "left": 5, "right": 6},
                {"class": 0},
                {"class": 2},
                {"class": 1},
                {"feature": 0, "threshold": 20.0, "left": 7, "right": 8},
                {"class": 0},
                {"class": 2}
            ]
        }
    })
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let paths = config.artifact_paths();

    write_json(&paths.model, &demo_model())?;
    write_json(&paths.gender_encoder, &json!({ "classes": GENDERS }))?;
    write_json(&paths.membership_encoder, &json!({ "classes": MEMBERSHIPS }))?;
    write_json(&paths.satisfaction_encoder, &json!({ "classes": SATISFACTION }))?;

    // Label the customers with the demo model itself, plus some noise.
    let bundle = load_bundle(&paths)
        .map_err(DashboardError::ArtifactUnavailable)
        .context("reloading the artifacts just written")?;
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&config.dataset_path)
        .with_context(|| format!("creating {}", config.dataset_path.display()))?;

    for i in 0..CUSTOMERS {
        let membership = rng.pick(&MEMBERSHIPS);
        let discount = (rng.next_f64() * 50.0).round();
        let days = 5 + rng.below(60) as u32;
        let items = 1 + rng.below(20) as u32;

        let satisfaction = if rng.next_f64() < 0.1 {
            rng.pick(&SATISFACTION).to_string()
        } else {
            let input = PredictionInput::new(membership, discount, days, items)?;
            predict_with(&input, &bundle)?
        };

        writer.serialize(CustomerRecord {
            customer_id: 101 + i as i64,
            gender: rng.pick(&GENDERS).to_string(),
            city: rng.pick(&CITIES).to_string(),
            membership_type: membership.to_string(),
            discount_applied: discount,
            days_since_last_purchase: days,
            items_purchased: items,
            satisfaction: Some(satisfaction),
        })?;
    }
    writer.flush()?;

    println!(
        "Wrote {CUSTOMERS} customers to {} and artifacts to {}",
        config.dataset_path.display(),
        config.artifact_dir.display()
    );
    Ok(())
}
