use fitgen_core::domain;
use fitgen_core::{NewHealthMetric, NewRow};

use crate::store::{StoreError, StoreUnit};
use crate::synth::Synthesizer;

pub async fn generate<U: StoreUnit>(
    unit: &mut U,
    synth: &mut Synthesizer,
    user_id: i64,
    count: u32,
) -> Result<(), StoreError> {
    let mut walk = WeightWalk::start(synth);
    for _ in 0..count {
        let metric = sample_metric(synth, user_id, &mut walk);
        unit.insert(&NewRow::HealthMetric(metric)).await?;
    }
    Ok(())
}

/// Body weight as a random walk, seeded once per user.
///
/// A step that would cross `WEIGHT_FLOOR_KG` is reflected off it, which keeps
/// every move within the step bound.
#[derive(Debug, Clone, Copy)]
pub struct WeightWalk {
    weight: f64,
}

impl WeightWalk {
    pub fn start(synth: &mut Synthesizer) -> Self {
        Self::at(synth.uniform(domain::BODY_WEIGHT_KG))
    }

    pub fn at(weight: f64) -> Self {
        Self {
            weight: weight.max(domain::WEIGHT_FLOOR_KG),
        }
    }

    /// Perturb the running weight and return the new value.
    pub fn step(&mut self, synth: &mut Synthesizer) -> f64 {
        let next = self.weight + synth.uniform(domain::WEIGHT_STEP_KG);
        self.weight = if next < domain::WEIGHT_FLOOR_KG {
            2.0 * domain::WEIGHT_FLOOR_KG - next
        } else {
            next
        };
        self.weight
    }
}

pub fn sample_metric(
    synth: &mut Synthesizer,
    user_id: i64,
    walk: &mut WeightWalk,
) -> NewHealthMetric {
    let date = synth.date_in_trailing_year();
    let weight = walk.step(synth);
    NewHealthMetric {
        user_id,
        date,
        weight,
        body_fat_percentage: synth.uniform(domain::BODY_FAT_PCT),
        blood_pressure: synth.blood_pressure(),
        glucose_levels: synth.uniform(domain::GLUCOSE),
        cholesterol_levels: synth.uniform(domain::CHOLESTEROL),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fitgen_core::validate_row;

    use super::*;

    #[test]
    fn consecutive_weights_move_at_most_one_kilo() {
        let mut synth = Synthesizer::new(8, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut walk = WeightWalk::start(&mut synth);
        let mut previous: Option<f64> = None;
        for _ in 0..500 {
            let metric = sample_metric(&mut synth, 1, &mut walk);
            if let Some(previous) = previous {
                assert!((metric.weight - previous).abs() <= 1.0 + 1e-9);
            }
            previous = Some(metric.weight);
            validate_row(&NewRow::HealthMetric(metric)).expect("metric in domain");
        }
    }

    #[test]
    fn long_walk_from_the_floor_never_drops_below_it() {
        let mut synth = Synthesizer::new(42, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let mut walk = WeightWalk::at(domain::WEIGHT_FLOOR_KG);
        let mut previous = domain::WEIGHT_FLOOR_KG;
        for _ in 0..20_000 {
            let weight = walk.step(&mut synth);
            assert!(weight >= domain::WEIGHT_FLOOR_KG, "weight {weight}");
            assert!((weight - previous).abs() <= 1.0 + 1e-9);
            previous = weight;
        }
    }
}
