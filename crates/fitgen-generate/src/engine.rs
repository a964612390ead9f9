use std::time::Instant;

use chrono::Local;
use tracing::{info, warn};

use fitgen_core::Table;
use fitgen_core::domain::FOOD_ITEMS_PER_LOG;

use crate::errors::GenerationError;
use crate::generators::{health_metrics, nutrition, sleep, users, workouts};
use crate::model::{GenerateOptions, GenerationReport, UnitKind};
use crate::store::{Store, StoreError, StoreUnit};
use crate::synth::Synthesizer;

/// Per-user units, run for every user in this order.
const PER_USER_UNITS: [UnitKind; 3] = [
    UnitKind::Nutrition,
    UnitKind::Sleep,
    UnitKind::HealthMetrics,
];

/// Entry point for populating a store with synthetic fitness data.
///
/// The schema must already be applied. Users and Workouts are each one unit
/// spanning all users; nutrition, sleep and health metrics get one unit per
/// user. A failed unit is rolled back and recorded, and the run continues.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub async fn run<S: Store>(&self, store: &S) -> Result<GenerationReport, GenerationError> {
        self.run_as(store, uuid::Uuid::new_v4().to_string()).await
    }

    /// Same as [`run`](Self::run), reporting under a caller-chosen run id.
    pub async fn run_as<S: Store>(
        &self,
        store: &S,
        run_id: String,
    ) -> Result<GenerationReport, GenerationError> {
        self.options.validate()?;

        let start = Instant::now();
        let seed = self.options.seed.unwrap_or_else(rand::random);
        let today = self.options.today.unwrap_or_else(|| Local::now().date_naive());
        let mut synth = Synthesizer::new(seed, today);
        let mut report = GenerationReport::new(run_id.clone(), seed, today);

        info!(
            run_id = %run_id,
            seed,
            today = %today,
            users = self.options.users,
            "generation started"
        );

        match store.begin().await {
            Ok(mut unit) => {
                let outcome = users::generate(&mut unit, &mut synth, self.options.users).await;
                let rows = [(Table::Users, u64::from(self.options.users))];
                settle(unit, outcome, UnitKind::Users, None, &rows, &mut report).await;
            }
            Err(err) => record_failure(&mut report, UnitKind::Users, None, err),
        }

        let user_ids = store.user_ids().await?;
        info!(users = user_ids.len(), "user identifiers loaded");

        match store.begin().await {
            Ok(mut unit) => {
                let outcome = self.generate_workouts(&mut unit, &mut synth, &user_ids).await;
                let rows = [(
                    Table::Workouts,
                    u64::from(self.options.workouts_per_user) * user_ids.len() as u64,
                )];
                settle(unit, outcome, UnitKind::Workouts, None, &rows, &mut report).await;
            }
            Err(err) => record_failure(&mut report, UnitKind::Workouts, None, err),
        }

        for kind in PER_USER_UNITS {
            let rows = self.rows_per_user(kind);
            for &user_id in &user_ids {
                match store.begin().await {
                    Ok(mut unit) => {
                        let outcome = self
                            .generate_for_user(&mut unit, &mut synth, kind, user_id)
                            .await;
                        settle(unit, outcome, kind, Some(user_id), &rows, &mut report).await;
                    }
                    Err(err) => record_failure(&mut report, kind, Some(user_id), err),
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        if report.is_complete() {
            info!(
                run_id = %run_id,
                units = report.units_committed,
                duration_ms = report.duration_ms,
                "generation completed"
            );
        } else {
            warn!(
                run_id = %run_id,
                units = report.units_committed,
                failed_units = report.failures.len(),
                duration_ms = report.duration_ms,
                "generation completed with failed units"
            );
        }
        Ok(report)
    }

    async fn generate_workouts<U: StoreUnit>(
        &self,
        unit: &mut U,
        synth: &mut Synthesizer,
        user_ids: &[i64],
    ) -> Result<(), StoreError> {
        for &user_id in user_ids {
            workouts::generate(
                unit,
                synth,
                user_id,
                self.options.workouts_per_user,
                self.options.stress_note_probability,
            )
            .await?;
        }
        Ok(())
    }

    async fn generate_for_user<U: StoreUnit>(
        &self,
        unit: &mut U,
        synth: &mut Synthesizer,
        kind: UnitKind,
        user_id: i64,
    ) -> Result<(), StoreError> {
        match kind {
            UnitKind::Nutrition => {
                nutrition::generate(
                    unit,
                    synth,
                    user_id,
                    self.options.nutrition_logs_per_user,
                    self.options.caloric_intake_probability,
                )
                .await
            }
            UnitKind::Sleep => {
                sleep::generate(unit, synth, user_id, self.options.sleep_logs_per_user).await
            }
            UnitKind::HealthMetrics => {
                health_metrics::generate(unit, synth, user_id, self.options.health_metrics_per_user)
                    .await
            }
            UnitKind::Users | UnitKind::Workouts => Ok(()),
        }
    }

    fn rows_per_user(&self, kind: UnitKind) -> Vec<(Table, u64)> {
        let options = &self.options;
        match kind {
            UnitKind::Nutrition => {
                let logs = u64::from(options.nutrition_logs_per_user);
                let items = logs * u64::from(FOOD_ITEMS_PER_LOG);
                vec![
                    (Table::NutritionLogs, logs),
                    (Table::FoodItems, items),
                    (Table::Micronutrients, items),
                ]
            }
            UnitKind::Sleep => vec![(Table::SleepLogs, u64::from(options.sleep_logs_per_user))],
            UnitKind::HealthMetrics => vec![(
                Table::HealthMetrics,
                u64::from(options.health_metrics_per_user),
            )],
            UnitKind::Users | UnitKind::Workouts => Vec::new(),
        }
    }
}

/// Commit the unit when its work succeeded, otherwise roll it back.
async fn settle<U: StoreUnit>(
    unit: U,
    outcome: Result<(), StoreError>,
    kind: UnitKind,
    user_id: Option<i64>,
    rows: &[(Table, u64)],
    report: &mut GenerationReport,
) {
    match outcome {
        Ok(()) => match unit.commit().await {
            Ok(()) => {
                info!(unit = %kind, user_id = ?user_id, "unit committed");
                report.record_commit(rows);
            }
            Err(err) => record_failure(report, kind, user_id, err),
        },
        Err(err) => {
            if let Err(rollback_err) = unit.rollback().await {
                warn!(
                    unit = %kind,
                    user_id = ?user_id,
                    error = %rollback_err,
                    "unit rollback failed"
                );
            }
            record_failure(report, kind, user_id, err);
        }
    }
}

fn record_failure(
    report: &mut GenerationReport,
    kind: UnitKind,
    user_id: Option<i64>,
    err: StoreError,
) {
    match user_id {
        Some(user_id) => warn!(
            unit = %kind,
            user_id,
            error = %err,
            "unit failed for user; writes discarded"
        ),
        None => warn!(unit = %kind, error = %err, "unit failed; writes discarded"),
    }
    report.record_failure(kind, user_id, err.to_string());
}
