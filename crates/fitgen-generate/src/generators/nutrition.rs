//! Nutrition logs with their food items and micronutrients.
//!
//! Order is strictly log, then items, then one nutrient per item: each child
//! needs the identifier the store assigned to its parent.

use fitgen_core::domain;
use fitgen_core::{NewFoodItem, NewMicronutrient, NewNutritionLog, NewRow};

use crate::store::{StoreError, StoreUnit};
use crate::synth::Synthesizer;

pub async fn generate<U: StoreUnit>(
    unit: &mut U,
    synth: &mut Synthesizer,
    user_id: i64,
    count: u32,
    caloric_intake_probability: f64,
) -> Result<(), StoreError> {
    for _ in 0..count {
        let log = sample_log(synth, user_id, caloric_intake_probability);
        let log_id = unit.insert(&NewRow::NutritionLog(log)).await?;
        generate_food_items(unit, synth, log_id).await?;
    }
    Ok(())
}

async fn generate_food_items<U: StoreUnit>(
    unit: &mut U,
    synth: &mut Synthesizer,
    nutrition_log_id: i64,
) -> Result<(), StoreError> {
    for _ in 0..domain::FOOD_ITEMS_PER_LOG {
        let item = sample_food_item(synth, nutrition_log_id);
        let food_item_id = unit.insert(&NewRow::FoodItem(item)).await?;
        let nutrient = sample_micronutrient(synth, food_item_id);
        unit.insert(&NewRow::Micronutrient(nutrient)).await?;
    }
    Ok(())
}

pub fn sample_log(
    synth: &mut Synthesizer,
    user_id: i64,
    caloric_intake_probability: f64,
) -> NewNutritionLog {
    let date = synth.date_in_trailing_year();
    let total_caloric_intake = synth.nullable(caloric_intake_probability, |s| {
        s.uniform(domain::CALORIC_INTAKE)
    });
    let water_intake = synth.dependent(total_caloric_intake, |s| {
        s.uniform(domain::WATER_INTAKE_L)
    });
    NewNutritionLog {
        user_id,
        date,
        total_caloric_intake,
        water_intake,
    }
}

pub fn sample_food_item(synth: &mut Synthesizer, nutrition_log_id: i64) -> NewFoodItem {
    NewFoodItem {
        nutrition_log_id,
        food_name: synth.choose(domain::FOOD_NAMES),
        portion_size: synth.uniform(domain::PORTION_SIZE_G),
        calories: synth.uniform(domain::FOOD_CALORIES),
    }
}

pub fn sample_micronutrient(synth: &mut Synthesizer, food_item_id: i64) -> NewMicronutrient {
    NewMicronutrient {
        food_item_id,
        vitamin_a: synth.choose(domain::VITAMIN_A),
        vitamin_c: synth.choose(domain::VITAMIN_C),
        calcium: synth.choose(domain::CALCIUM),
        iron: synth.choose(domain::IRON),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fitgen_core::validate_row;

    use super::*;

    fn synth() -> Synthesizer {
        Synthesizer::new(31, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn water_is_recorded_only_with_calories() {
        let mut synth = synth();
        let mut seen_null = false;
        let mut seen_value = false;
        for _ in 0..200 {
            let log = sample_log(&mut synth, 1, 0.5);
            assert_eq!(log.water_intake.is_some(), log.total_caloric_intake.is_some());
            seen_null |= log.total_caloric_intake.is_none();
            seen_value |= log.total_caloric_intake.is_some();
            validate_row(&NewRow::NutritionLog(log)).expect("log in domain");
        }
        assert!(seen_null && seen_value);
    }

    #[test]
    fn children_carry_parent_ids() {
        let mut synth = synth();
        let item = sample_food_item(&mut synth, 42);
        assert_eq!(item.nutrition_log_id, 42);
        validate_row(&NewRow::FoodItem(item)).expect("item in domain");

        let nutrient = sample_micronutrient(&mut synth, 7);
        assert_eq!(nutrient.food_item_id, 7);
        validate_row(&NewRow::Micronutrient(nutrient)).expect("nutrient in domain");
    }
}
