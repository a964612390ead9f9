use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use fake::Fake;
use fake::faker::internet::en::{Password, SafeEmail, Username};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use fitgen_core::domain::{self, FloatRange, IntRange};
use fitgen_core::{add_years, age_on};

/// Value synthesizer over a single seeded random source.
///
/// Every sampled value lies in the domain it was asked for; the only side
/// effect is consuming entropy. `today` anchors all date windows.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    rng: ChaCha8Rng,
    today: NaiveDate,
}

impl Synthesizer {
    pub fn new(seed: u64, today: NaiveDate) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            today,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn uniform(&mut self, range: FloatRange) -> f64 {
        self.rng.random_range(range.min..=range.max)
    }

    pub fn uniform_int(&mut self, range: IntRange) -> i64 {
        self.rng.random_range(range.min..=range.max)
    }

    /// Uniform pick from a non-empty domain.
    pub fn choose<T: Copy>(&mut self, values: &[T]) -> T {
        values[self.rng.random_range(0..values.len())]
    }

    pub fn coin(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    /// Present with `probability`, otherwise null.
    pub fn nullable<T>(
        &mut self,
        probability: f64,
        sample: impl FnOnce(&mut Self) -> T,
    ) -> Option<T> {
        if self.coin(probability) {
            Some(sample(self))
        } else {
            None
        }
    }

    /// Null exactly when the governing value is null.
    pub fn dependent<G, T>(
        &mut self,
        governing: Option<G>,
        sample: impl FnOnce(&mut Self) -> T,
    ) -> Option<T> {
        governing.map(|_| sample(self))
    }

    /// Uniform date in `[today - 1 year, today]`.
    pub fn date_in_trailing_year(&mut self) -> NaiveDate {
        let start = add_years(self.today, -1);
        self.date_between(start, self.today)
    }

    pub fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        if end <= start {
            return start;
        }
        let span = (end - start).num_days();
        start + Duration::days(self.rng.random_range(0..=span))
    }

    /// Birth date such that the age today lies in `[min_age, max_age]`.
    pub fn date_of_birth(&mut self, min_age: i32, max_age: i32) -> NaiveDate {
        let latest = add_years(self.today, -min_age);
        let earliest = add_years(self.today, -(max_age + 1)) + Duration::days(1);
        self.date_between(earliest, latest)
    }

    /// Account creation within the current decade, never before the user
    /// reached `min_age`.
    pub fn account_creation_date(&mut self, date_of_birth: NaiveDate, min_age: i32) -> NaiveDate {
        let decade_start = NaiveDate::from_ymd_opt(self.today.year() - self.today.year() % 10, 1, 1)
            .unwrap_or(self.today);
        let mut adult = add_years(date_of_birth, min_age);
        if age_on(date_of_birth, adult) < min_age {
            adult = adult.succ_opt().unwrap_or(adult);
        }
        let start = decade_start.max(adult).min(self.today);
        self.date_between(start, self.today)
    }

    /// Bedtime on `date` within the evening bedtime window.
    pub fn bedtime(&mut self, date: NaiveDate) -> NaiveDateTime {
        let hour = self.uniform_int(domain::BEDTIME_HOUR);
        let minute = self.uniform_int(domain::BEDTIME_MINUTE);
        date.and_time(NaiveTime::MIN) + Duration::hours(hour) + Duration::minutes(minute)
    }

    /// Sleep length in whole seconds, drawn from the sleep-hours domain.
    pub fn sleep_seconds(&mut self) -> i64 {
        (self.uniform(domain::SLEEP_HOURS) * 3600.0).round() as i64
    }

    pub fn blood_pressure(&mut self) -> String {
        let systolic = self.uniform_int(domain::SYSTOLIC);
        let diastolic = self.uniform_int(domain::DIASTOLIC);
        domain::blood_pressure(systolic, diastolic)
    }

    pub fn username(&mut self) -> String {
        Username().fake_with_rng(&mut self.rng)
    }

    pub fn password(&mut self) -> String {
        Password(domain::PASSWORD_LEN).fake_with_rng(&mut self.rng)
    }

    pub fn email(&mut self) -> String {
        SafeEmail().fake_with_rng(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synth(seed: u64) -> Synthesizer {
        Synthesizer::new(seed, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn same_seed_same_values() {
        let mut a = synth(11);
        let mut b = synth(11);
        for _ in 0..50 {
            assert_eq!(a.uniform(domain::HEIGHT_M), b.uniform(domain::HEIGHT_M));
            assert_eq!(a.username(), b.username());
        }
    }

    #[test]
    fn trailing_year_dates_stay_in_window() {
        let mut synth = synth(3);
        let start = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
        for _ in 0..500 {
            let date = synth.date_in_trailing_year();
            assert!(date >= start && date <= synth.today());
        }
    }

    #[test]
    fn birth_dates_respect_age_window_at_creation() {
        let mut synth = synth(5);
        for _ in 0..500 {
            let dob = synth.date_of_birth(domain::MIN_AGE, domain::MAX_AGE);
            let today_age = age_on(dob, synth.today());
            assert!((domain::MIN_AGE..=domain::MAX_AGE).contains(&today_age));

            let created = synth.account_creation_date(dob, domain::MIN_AGE);
            assert!(created <= synth.today());
            assert!(created.year() >= 2020);
            let age = age_on(dob, created);
            assert!((domain::MIN_AGE..=domain::MAX_AGE).contains(&age), "age {age}");
        }
    }

    #[test]
    fn leap_day_birth_waits_for_march_first() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut synth = Synthesizer::new(1, today);
        let dob = NaiveDate::from_ymd_opt(2008, 2, 29).unwrap();
        for _ in 0..100 {
            let created = synth.account_creation_date(dob, 18);
            assert!(created >= NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        }
    }

    #[test]
    fn dependent_follows_governing_nullability() {
        let mut synth = synth(9);
        for _ in 0..200 {
            let governing = synth.nullable(0.5, |s| s.uniform(domain::CALORIC_INTAKE));
            let dependent = synth.dependent(governing, |s| s.uniform(domain::WATER_INTAKE_L));
            assert_eq!(governing.is_some(), dependent.is_some());
        }
    }

    #[test]
    fn coin_extremes_are_deterministic() {
        let mut synth = synth(1);
        assert!((0..100).all(|_| synth.coin(1.0)));
        assert!((0..100).all(|_| !synth.coin(0.0)));
    }

    #[test]
    fn bedtime_falls_in_evening_window() {
        let mut synth = synth(21);
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        for _ in 0..200 {
            let bed = synth.bedtime(date);
            assert_eq!(bed.date(), date);
            let hour = chrono::Timelike::hour(&bed);
            assert!((21..=23).contains(&hour));
            let seconds = synth.sleep_seconds();
            assert!((4 * 3600..=10 * 3600).contains(&seconds));
        }
    }
}
