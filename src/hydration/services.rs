use std::collections::HashMap;

use time::{Date, Duration, OffsetDateTime};
use uuid::Uuid;

use crate::error::ApiError;
use crate::hydration::goal::daily_goal_oz;
use crate::hydration::store::{IntakeLogEntry, IntakeLogStore, IntakeRow, NewIntakeEntry};
use crate::profile::repo::ProfileStore;

/// Streak evaluation never looks further back than this many days.
pub const STREAK_WINDOW_DAYS: u32 = 30;

/// Derived view of one day; recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyProgress {
    pub date: Date,
    pub total_oz: f64,
    pub goal_oz: i32,
    pub percentage: u8,
}

#[derive(Debug, Clone)]
pub struct LogOutcome {
    pub entry: IntakeLogEntry,
    pub progress: DailyProgress,
    pub streak_days: u32,
}

/// Today's effective intake against the goal computed from the current
/// profile. A missing profile is not an error: the default goal applies.
pub async fn today_progress(
    profiles: &dyn ProfileStore,
    intake: &dyn IntakeLogStore,
    user_id: Uuid,
    today: Date,
) -> Result<DailyProgress, ApiError> {
    let goal_oz = current_goal(profiles, user_id).await?;
    let rows = intake.query_range(user_id, today, today).await?;
    let total_oz = effective_total(&rows);
    Ok(DailyProgress {
        date: today,
        total_oz,
        goal_oz,
        percentage: percentage_of_goal(total_oz, goal_oz),
    })
}

/// Consecutive days, walking backward from `today`, whose effective intake
/// met the goal. The *current* goal is applied to every day in the window;
/// a day's pass/fail is not judged against the goal that applied back then.
pub async fn streak_days(
    profiles: &dyn ProfileStore,
    intake: &dyn IntakeLogStore,
    user_id: Uuid,
    today: Date,
) -> Result<u32, ApiError> {
    let goal = current_goal(profiles, user_id).await? as f64;

    let from = today - Duration::days(i64::from(STREAK_WINDOW_DAYS) - 1);
    let rows = intake.query_range(user_id, from, today).await?;

    let mut by_day: HashMap<Date, f64> = HashMap::new();
    for row in &rows {
        *by_day.entry(row.date).or_insert(0.0) += effective_oz(row);
    }

    let mut streak = 0;
    for i in 0..STREAK_WINDOW_DAYS {
        let day = today - Duration::days(i64::from(i));
        let total = by_day.get(&day).copied().unwrap_or(0.0);
        if total >= goal {
            streak += 1;
        } else {
            break;
        }
    }
    Ok(streak)
}

/// Validates and records one intake event, then recomputes the dependent
/// views so the caller sees its own write reflected immediately.
pub async fn log_intake(
    profiles: &dyn ProfileStore,
    intake: &dyn IntakeLogStore,
    user_id: Uuid,
    amount_oz: f64,
    fluid_type_id: Uuid,
    now: OffsetDateTime,
    max_amount_oz: f64,
) -> Result<LogOutcome, ApiError> {
    validate_amount(amount_oz, max_amount_oz)?;

    let today = now.date();
    let entry = intake
        .insert(NewIntakeEntry {
            user_id,
            fluid_type_id,
            amount_oz,
            date: today,
            logged_at: now,
        })
        .await?;

    let progress = today_progress(profiles, intake, user_id, today).await?;
    let streak_days = streak_days(profiles, intake, user_id, today).await?;

    Ok(LogOutcome {
        entry,
        progress,
        streak_days,
    })
}

/// Amounts are positive, bounded, and carry at most one decimal place.
pub fn validate_amount(amount_oz: f64, max_amount_oz: f64) -> Result<(), ApiError> {
    if !amount_oz.is_finite() || amount_oz <= 0.0 || amount_oz > max_amount_oz {
        return Err(ApiError::Validation(format!(
            "amount must be between 0.1 and {max_amount_oz} oz"
        )));
    }
    let tenths = amount_oz * 10.0;
    if (tenths - tenths.round()).abs() > 1e-6 {
        return Err(ApiError::Validation(
            "amount can have at most one decimal place".into(),
        ));
    }
    Ok(())
}

async fn current_goal(profiles: &dyn ProfileStore, user_id: Uuid) -> Result<i32, ApiError> {
    let (weight, sex, activity) = profiles
        .get(user_id)
        .await?
        .map(|p| p.goal_inputs())
        .unwrap_or_default();
    Ok(daily_goal_oz(weight, sex, activity))
}

fn effective_oz(row: &IntakeRow) -> f64 {
    row.amount_oz * row.hydration_factor.unwrap_or(1.0)
}

fn effective_total(rows: &[IntakeRow]) -> f64 {
    rows.iter().map(effective_oz).sum()
}

fn percentage_of_goal(total_oz: f64, goal_oz: i32) -> u8 {
    if goal_oz <= 0 {
        return 0;
    }
    (total_oz / f64::from(goal_oz) * 100.0).round().min(100.0) as u8
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use time::macros::{date, datetime};
    use time::Date;
    use uuid::Uuid;

    use super::*;
    use crate::profile::repo::{Profile, ProfileFields};

    const TODAY: Date = date!(2025 - 03 - 10);

    struct MemProfiles(Option<Profile>);

    #[async_trait]
    impl ProfileStore for MemProfiles {
        async fn get(&self, _user_id: Uuid) -> anyhow::Result<Option<Profile>> {
            Ok(self.0.clone())
        }

        async fn upsert(&self, _user_id: Uuid, _fields: ProfileFields) -> anyhow::Result<Profile> {
            anyhow::bail!("not used by these tests")
        }
    }

    struct MemIntake {
        factors: HashMap<Uuid, f64>,
        entries: Mutex<Vec<IntakeLogEntry>>,
    }

    impl MemIntake {
        fn new() -> Self {
            Self {
                factors: HashMap::new(),
                entries: Mutex::new(Vec::new()),
            }
        }

        fn fluid(&mut self, factor: f64) -> Uuid {
            let id = Uuid::new_v4();
            self.factors.insert(id, factor);
            id
        }

        fn seed(&self, user_id: Uuid, fluid_type_id: Uuid, amount_oz: f64, date: Date) {
            self.entries.lock().unwrap().push(IntakeLogEntry {
                id: Uuid::new_v4(),
                user_id,
                fluid_type_id,
                amount_oz,
                date,
                logged_at: datetime!(2025-03-10 12:00 UTC),
            });
        }

        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl IntakeLogStore for MemIntake {
        async fn insert(&self, entry: NewIntakeEntry) -> anyhow::Result<IntakeLogEntry> {
            let entry = IntakeLogEntry {
                id: Uuid::new_v4(),
                user_id: entry.user_id,
                fluid_type_id: entry.fluid_type_id,
                amount_oz: entry.amount_oz,
                date: entry.date,
                logged_at: entry.logged_at,
            };
            self.entries.lock().unwrap().push(entry.clone());
            Ok(entry)
        }

        async fn query_range(
            &self,
            user_id: Uuid,
            from: Date,
            to: Date,
        ) -> anyhow::Result<Vec<IntakeRow>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id && e.date >= from && e.date <= to)
                .map(|e| IntakeRow {
                    amount_oz: e.amount_oz,
                    hydration_factor: self.factors.get(&e.fluid_type_id).copied(),
                    date: e.date,
                })
                .collect())
        }

        async fn list_day(&self, user_id: Uuid, date: Date) -> anyhow::Result<Vec<IntakeLogEntry>> {
            let mut entries: Vec<_> = self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id && e.date == date)
                .cloned()
                .collect();
            entries.sort_by_key(|e| std::cmp::Reverse(e.logged_at));
            Ok(entries)
        }
    }

    fn profile(weight_lbs: Option<f64>, sex: &str, activity: &str) -> Profile {
        Profile {
            user_id: Uuid::new_v4(),
            first_name: None,
            last_name: None,
            weight_lbs,
            sex: Some(sex.to_string()),
            activity_level: Some(activity.to_string()),
            avatar_url: None,
            updated_at: datetime!(2025-03-01 00:00 UTC),
        }
    }

    #[tokio::test]
    async fn empty_day_reports_zero_against_the_default_goal() {
        let profiles = MemProfiles(None);
        let intake = MemIntake::new();
        let user = Uuid::new_v4();

        let p = today_progress(&profiles, &intake, user, TODAY).await.unwrap();
        assert_eq!(p.total_oz, 0.0);
        assert_eq!(p.goal_oz, 64);
        assert_eq!(p.percentage, 0);
    }

    #[tokio::test]
    async fn entries_are_weighted_by_hydration_factor() {
        let profiles = MemProfiles(None);
        let mut intake = MemIntake::new();
        let water = intake.fluid(1.0);
        let coffee = intake.fluid(0.5);
        let user = Uuid::new_v4();
        intake.seed(user, water, 8.0, TODAY);
        intake.seed(user, coffee, 8.0, TODAY);

        let p = today_progress(&profiles, &intake, user, TODAY).await.unwrap();
        assert_eq!(p.total_oz, 12.0);
    }

    #[tokio::test]
    async fn missing_factor_counts_as_plain_water() {
        let profiles = MemProfiles(None);
        let intake = MemIntake::new();
        let user = Uuid::new_v4();
        // fluid type never registered in the catalog
        intake.seed(user, Uuid::new_v4(), 10.0, TODAY);

        let p = today_progress(&profiles, &intake, user, TODAY).await.unwrap();
        assert_eq!(p.total_oz, 10.0);
    }

    #[tokio::test]
    async fn percentage_is_capped_at_100() {
        let profiles = MemProfiles(None);
        let mut intake = MemIntake::new();
        let water = intake.fluid(1.0);
        let user = Uuid::new_v4();
        intake.seed(user, water, 100.0, TODAY);

        let p = today_progress(&profiles, &intake, user, TODAY).await.unwrap();
        assert_eq!(p.goal_oz, 64);
        assert_eq!(p.percentage, 100);
    }

    #[tokio::test]
    async fn zero_goal_reports_zero_percentage() {
        // a sub-pound weight rounds the computed goal down to 0
        let profiles = MemProfiles(Some(profile(Some(0.5), "female", "sedentary")));
        let mut intake = MemIntake::new();
        let water = intake.fluid(1.0);
        let user = Uuid::new_v4();
        intake.seed(user, water, 8.0, TODAY);

        let p = today_progress(&profiles, &intake, user, TODAY).await.unwrap();
        assert_eq!(p.goal_oz, 0);
        assert_eq!(p.percentage, 0);
    }

    #[tokio::test]
    async fn progress_excludes_other_days_and_other_users() {
        let profiles = MemProfiles(None);
        let mut intake = MemIntake::new();
        let water = intake.fluid(1.0);
        let user = Uuid::new_v4();
        intake.seed(user, water, 8.0, TODAY - Duration::days(1));
        intake.seed(Uuid::new_v4(), water, 8.0, TODAY);

        let p = today_progress(&profiles, &intake, user, TODAY).await.unwrap();
        assert_eq!(p.total_oz, 0.0);
    }

    #[tokio::test]
    async fn streak_counts_consecutive_goal_met_days() {
        let profiles = MemProfiles(None);
        let mut intake = MemIntake::new();
        let water = intake.fluid(1.0);
        let user = Uuid::new_v4();
        for i in 0..5 {
            intake.seed(user, water, 64.0, TODAY - Duration::days(i));
        }
        // gap on day 5, then more goal-met days that must not count
        for i in 6..10 {
            intake.seed(user, water, 64.0, TODAY - Duration::days(i));
        }

        assert_eq!(streak_days(&profiles, &intake, user, TODAY).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn streak_is_zero_when_today_misses_the_goal() {
        let profiles = MemProfiles(None);
        let mut intake = MemIntake::new();
        let water = intake.fluid(1.0);
        let user = Uuid::new_v4();
        intake.seed(user, water, 8.0, TODAY);
        for i in 1..30 {
            intake.seed(user, water, 64.0, TODAY - Duration::days(i));
        }

        assert_eq!(streak_days(&profiles, &intake, user, TODAY).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn streak_caps_at_the_window() {
        let profiles = MemProfiles(None);
        let mut intake = MemIntake::new();
        let water = intake.fluid(1.0);
        let user = Uuid::new_v4();
        for i in 0..45 {
            intake.seed(user, water, 64.0, TODAY - Duration::days(i));
        }

        assert_eq!(streak_days(&profiles, &intake, user, TODAY).await.unwrap(), 30);
    }

    #[tokio::test]
    async fn streak_weights_each_day_by_factor() {
        let profiles = MemProfiles(None);
        let mut intake = MemIntake::new();
        let coffee = intake.fluid(0.5);
        let user = Uuid::new_v4();
        // 64 oz of coffee is only 32 effective oz, below the 64 oz goal
        intake.seed(user, coffee, 64.0, TODAY);

        assert_eq!(streak_days(&profiles, &intake, user, TODAY).await.unwrap(), 0);
    }

    #[test]
    fn amount_validation_bounds() {
        assert!(validate_amount(8.5, 64.0).is_ok());
        assert!(validate_amount(0.1, 64.0).is_ok());
        assert!(validate_amount(64.0, 64.0).is_ok());

        assert!(validate_amount(0.0, 64.0).is_err());
        assert!(validate_amount(-1.0, 64.0).is_err());
        assert!(validate_amount(64.1, 64.0).is_err());
        assert!(validate_amount(f64::NAN, 64.0).is_err());
        // two decimal places
        assert!(validate_amount(8.25, 64.0).is_err());
    }

    #[tokio::test]
    async fn log_intake_rejects_before_touching_the_store() {
        let profiles = MemProfiles(None);
        let intake = MemIntake::new();
        let user = Uuid::new_v4();
        let now = datetime!(2025-03-10 09:30 UTC);

        for bad in [0.0, -4.0, 65.0, 8.25] {
            let err = log_intake(&profiles, &intake, user, bad, Uuid::new_v4(), now, 64.0)
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)), "amount {bad}");
        }
        assert_eq!(intake.len(), 0);
    }

    #[tokio::test]
    async fn log_intake_returns_the_refreshed_views() {
        // weight 150, female, moderately_active -> goal 121
        let profiles = MemProfiles(Some(profile(Some(150.0), "female", "moderately_active")));
        let mut intake = MemIntake::new();
        let water = intake.fluid(1.0);
        let user = Uuid::new_v4();
        let now = datetime!(2025-03-10 09:30 UTC);

        let outcome = log_intake(&profiles, &intake, user, 16.0, water, now, 64.0)
            .await
            .unwrap();

        assert_eq!(outcome.entry.amount_oz, 16.0);
        assert_eq!(outcome.entry.date, TODAY);
        assert_eq!(outcome.progress.total_oz, 16.0);
        assert_eq!(outcome.progress.goal_oz, 121);
        assert_eq!(outcome.progress.percentage, 13);
        assert_eq!(outcome.streak_days, 0);
        assert_eq!(intake.len(), 1);
    }

    #[tokio::test]
    async fn logging_up_to_the_goal_extends_the_streak() {
        let profiles = MemProfiles(None);
        let mut intake = MemIntake::new();
        let water = intake.fluid(1.0);
        let user = Uuid::new_v4();
        intake.seed(user, water, 64.0, TODAY - Duration::days(1));
        let now = datetime!(2025-03-10 09:30 UTC);

        let outcome = log_intake(&profiles, &intake, user, 64.0, water, now, 64.0)
            .await
            .unwrap();
        assert_eq!(outcome.progress.percentage, 100);
        assert_eq!(outcome.streak_days, 2);
    }
}
