use chrono::Duration;

use fitgen_core::domain;
use fitgen_core::{NewRow, NewSleepLog};

use crate::store::{StoreError, StoreUnit};
use crate::synth::Synthesizer;

pub async fn generate<U: StoreUnit>(
    unit: &mut U,
    synth: &mut Synthesizer,
    user_id: i64,
    count: u32,
) -> Result<(), StoreError> {
    for _ in 0..count {
        let sleep = sample_sleep_log(synth, user_id);
        unit.insert(&NewRow::SleepLog(sleep)).await?;
    }
    Ok(())
}

/// Duration is derived from the stored bed and wake timestamps, never sampled.
pub fn sample_sleep_log(synth: &mut Synthesizer, user_id: i64) -> NewSleepLog {
    let date = synth.date_in_trailing_year();
    let time_to_bed = synth.bedtime(date);
    let seconds = synth.sleep_seconds();
    let wake_up_time = time_to_bed + Duration::seconds(seconds);
    NewSleepLog {
        user_id,
        date,
        time_to_bed,
        wake_up_time,
        sleep_duration: (wake_up_time - time_to_bed).num_seconds() as f64 / 3600.0,
        sleep_quality_score: synth.uniform_int(domain::SLEEP_QUALITY),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fitgen_core::validate_row;

    use super::*;

    #[test]
    fn wake_follows_bed_by_derived_duration() {
        let mut synth = Synthesizer::new(2, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        for _ in 0..300 {
            let sleep = sample_sleep_log(&mut synth, 9);
            assert!(sleep.wake_up_time > sleep.time_to_bed);
            let elapsed = (sleep.wake_up_time - sleep.time_to_bed).num_seconds() as f64 / 3600.0;
            assert_eq!(elapsed, sleep.sleep_duration);
            validate_row(&NewRow::SleepLog(sleep)).expect("sleep in domain");
        }
    }
}
