use anyhow::Context;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::time::Duration;

/// Echo sources the synthetic servo keeps re-hitting so the tracker has
/// something to confirm: (bearing degrees, distance cm).
const FEED_TARGETS: [(f32, f32); 2] = [(40.0, 35.0), (120.0, 70.0)];
const SERVO_STEP_DEG: f32 = 3.0;
const TARGET_HALF_WIDTH_DEG: f32 = 5.0;

/// Parameters for one synthetic feed run.
#[derive(Debug, Clone)]
pub struct FeedPlan {
    pub url: String,
    pub count: usize,
    pub seed: u64,
    pub period: Duration,
}

/// Deterministic servo sweep. The angle bounces across [0, 180]; samples
/// near a target echo its distance with small jitter, everything else is
/// uniform clutter.
pub fn synthetic_sweep(seed: u64, count: usize) -> Vec<(f32, f32)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(count);
    let mut angle = 0.0_f32;
    let mut step = SERVO_STEP_DEG;

    for _ in 0..count {
        let target = FEED_TARGETS
            .iter()
            .find(|(bearing, _)| (bearing - angle).abs() <= TARGET_HALF_WIDTH_DEG);
        let distance = match target {
            Some((_, range)) => range + rng.gen_range(-2.0..2.0),
            None => rng.gen_range(20.0..100.0),
        };
        samples.push((angle, distance));

        angle += step;
        if angle >= 180.0 || angle <= 0.0 {
            step = -step;
            angle = angle.clamp(0.0, 180.0);
        }
    }
    samples
}

/// Posts a synthetic sweep to a running collector, one reading per period.
pub async fn run_feed(plan: &FeedPlan) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    for (angle, distance) in synthetic_sweep(plan.seed, plan.count) {
        client
            .post(&plan.url)
            .json(&json!({ "angle": angle, "distance": distance }))
            .send()
            .await
            .with_context(|| format!("posting synthetic reading to {}", plan.url))?
            .error_for_status()
            .context("collector rejected synthetic reading")?;
        debug!("fed angle={:.1} distance={:.1}cm", angle, distance);
        tokio::time::sleep(plan.period).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopecore::tracking::BucketKey;
    use std::collections::HashMap;

    #[test]
    fn same_seed_reproduces_the_sweep() {
        assert_eq!(synthetic_sweep(7, 50), synthetic_sweep(7, 50));
    }

    #[test]
    fn angles_stay_on_the_servo_arc() {
        for (angle, _) in synthetic_sweep(3, 200) {
            assert!((0.0..=180.0).contains(&angle), "angle {} off arc", angle);
        }
    }

    #[test]
    fn target_echoes_cluster_around_their_range() {
        let near_first_target: Vec<f32> = synthetic_sweep(1, 200)
            .into_iter()
            .filter(|(angle, _)| (angle - 40.0).abs() <= TARGET_HALF_WIDTH_DEG)
            .map(|(_, distance)| distance)
            .collect();

        assert!(!near_first_target.is_empty());
        for distance in near_first_target {
            assert!((33.0..37.0).contains(&distance));
        }
    }

    #[test]
    fn a_full_sweep_repeats_at_least_one_bucket() {
        let mut hits: HashMap<BucketKey, u32> = HashMap::new();
        for (angle, distance) in synthetic_sweep(0, 200) {
            *hits.entry(BucketKey::of(angle, distance)).or_insert(0) += 1;
        }
        assert!(hits.values().any(|&count| count >= 2));
    }
}
