use fitgen_core::domain;
use fitgen_core::{NewRow, NewWorkout};

use crate::store::{StoreError, StoreUnit};
use crate::synth::Synthesizer;

pub async fn generate<U: StoreUnit>(
    unit: &mut U,
    synth: &mut Synthesizer,
    user_id: i64,
    count: u32,
    stress_note_probability: f64,
) -> Result<(), StoreError> {
    for _ in 0..count {
        let workout = sample_workout(synth, user_id, stress_note_probability);
        unit.insert(&NewRow::Workout(workout)).await?;
    }
    Ok(())
}

pub fn sample_workout(
    synth: &mut Synthesizer,
    user_id: i64,
    stress_note_probability: f64,
) -> NewWorkout {
    let date = synth.date_in_trailing_year();
    let duration = synth.uniform(domain::WORKOUT_DURATION_MIN);
    let intensity = synth.choose(domain::INTENSITIES);
    let keyword = if synth.coin(stress_note_probability) {
        Some(synth.choose(domain::STRESS_KEYWORDS))
    } else {
        None
    };
    NewWorkout {
        user_id,
        date,
        workout_type: synth.choose(domain::WORKOUT_TYPES),
        duration,
        intensity,
        calories_burned: synth.uniform(domain::CALORIES_BURNED),
        notes: domain::workout_note(keyword),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fitgen_core::validate_row;

    use super::*;

    fn synth() -> Synthesizer {
        Synthesizer::new(23, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn stress_notes_follow_configured_probability() {
        let mut synth = synth();
        let always = sample_workout(&mut synth, 1, 1.0);
        assert!(always.notes.contains("due to workload"));
        let never = sample_workout(&mut synth, 1, 0.0);
        assert_eq!(never.notes, domain::BASE_WORKOUT_NOTE);
    }

    #[test]
    fn stress_notes_use_known_keywords() {
        let mut synth = synth();
        for _ in 0..100 {
            let workout = sample_workout(&mut synth, 4, 0.5);
            if workout.notes != domain::BASE_WORKOUT_NOTE {
                assert!(
                    domain::STRESS_KEYWORDS
                        .iter()
                        .any(|keyword| workout.notes == domain::workout_note(Some(keyword)))
                );
            }
            assert_eq!(workout.user_id, 4);
            validate_row(&NewRow::Workout(workout)).expect("workout in domain");
        }
    }
}
