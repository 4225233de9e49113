//! Weekly training volume history.
//!
//! Records are keyed by calendar week rather than exact date: any date in
//! the same week resolves to the same record. The ledger keeps records
//! sorted most recent first and writes the full set back to the store after
//! every mutation. Storage failures are logged and never returned.

use chrono::{NaiveDate, Weekday};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calendar::{same_week, week_start_of};
use crate::models::{Muscle, MuscleValues, WeekRecord};
use crate::store::{load_json, save_json, KeyValueStore, HISTORY_KEY};

pub struct VolumeLedger<S: KeyValueStore> {
    store: S,
    first_day: Weekday,
    weeks: Vec<WeekRecord>,
}

impl<S: KeyValueStore> VolumeLedger<S> {
    pub fn open(store: S, first_day: Weekday) -> Self {
        let weeks = match load_json::<Vec<WeekRecord>>(&store, HISTORY_KEY) {
            Ok(Some(weeks)) => weeks,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Error loading workout history, starting empty: {e}");
                Vec::new()
            }
        };
        let loaded = weeks.len();
        let mut ledger = VolumeLedger {
            store,
            first_day,
            weeks: Vec::new(),
        };
        let repaired = ledger.absorb(weeks);
        debug!(weeks = ledger.weeks.len(), "workout history loaded");
        if repaired {
            warn!(
                loaded,
                kept = ledger.weeks.len(),
                "workout history had blank, unaligned or duplicate weeks; rewriting"
            );
            ledger.save();
        }
        ledger
    }

    /// Installs stored records: week starts are aligned to `first_day`,
    /// blank weeks are dropped, and for a week stored more than once the
    /// record with the latest date wins. Returns whether anything changed.
    fn absorb(&mut self, mut weeks: Vec<WeekRecord>) -> bool {
        let mut repaired = false;
        weeks.sort_by(|a, b| b.week_start.cmp(&a.week_start));
        for mut week in weeks {
            let aligned = week_start_of(week.week_start, self.first_day);
            if week.values.is_blank() {
                repaired = true;
                continue;
            }
            if week.week_start != aligned {
                week.week_start = aligned;
                repaired = true;
            }
            if self.weeks.iter().any(|kept| kept.week_start == aligned) {
                repaired = true;
                continue;
            }
            self.weeks.push(week);
        }
        self.sort();
        repaired
    }

    /// Replaces the week containing `week_start` with `values`, or deletes it
    /// when `values` holds nothing but zeros.
    pub fn record_week(&mut self, week_start: NaiveDate, values: MuscleValues) {
        let week_start = week_start_of(week_start, self.first_day);
        let existing = self
            .weeks
            .iter()
            .position(|week| same_week(week.week_start, week_start, self.first_day));

        match (existing, values.is_blank()) {
            (None, true) => return,
            (Some(index), true) => {
                let removed = self.weeks.remove(index);
                debug!(id = %removed.id, %week_start, "week cleared, record removed");
            }
            (Some(index), false) => {
                self.weeks[index] = WeekRecord::new(week_start, values);
                debug!(%week_start, "week updated");
            }
            (None, false) => {
                self.weeks.push(WeekRecord::new(week_start, values));
                debug!(%week_start, "week added");
            }
        }

        self.sort();
        self.save();
    }

    /// The record for the week containing `date`, if one has been logged.
    pub fn find_week(&self, date: NaiveDate) -> Option<&WeekRecord> {
        self.weeks
            .iter()
            .find(|week| same_week(week.week_start, date, self.first_day))
    }

    /// Like [`find_week`](Self::find_week) but falls back to an all-zero record.
    pub fn week_for(&self, date: NaiveDate) -> WeekRecord {
        self.find_week(date)
            .cloned()
            .unwrap_or_else(|| WeekRecord::empty(week_start_of(date, self.first_day)))
    }

    pub fn all_weeks(&self) -> &[WeekRecord] {
        &self.weeks
    }

    pub fn delete_week(&mut self, id: Uuid) {
        let before = self.weeks.len();
        self.weeks.retain(|week| week.id != id);
        if self.weeks.len() != before {
            debug!(%id, "week deleted");
        }
        self.save();
    }

    pub fn clear_all(&mut self) {
        self.weeks.clear();
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            warn!("Error clearing workout history: {e}");
        }
    }

    pub fn all_time_totals(&self) -> MuscleValues {
        self.weeks
            .iter()
            .fold(MuscleValues::new(), |mut totals, week| {
                totals.merge_add(&week.values);
                totals
            })
    }

    pub fn increment(&mut self, date: NaiveDate, muscle: Muscle) {
        let mut values = self.week_for(date).values;
        values.increment(muscle);
        self.record_week(date, values);
    }

    pub fn set_count(&mut self, date: NaiveDate, muscle: Muscle, count: u32) {
        let mut values = self.week_for(date).values;
        values.set(muscle, count);
        self.record_week(date, values);
    }

    fn sort(&mut self) {
        self.weeks.sort_by(|a, b| b.week_start.cmp(&a.week_start));
    }

    fn save(&self) {
        if let Err(e) = save_json(&self.store, HISTORY_KEY, &self.weeks) {
            warn!("Error saving workout history: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::BrokenStore;
    use crate::store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn values(entries: &[(Muscle, u32)]) -> MuscleValues {
        entries.iter().copied().collect()
    }

    fn ledger() -> VolumeLedger<MemoryStore> {
        VolumeLedger::open(MemoryStore::new(), Weekday::Sun)
    }

    #[test]
    fn record_then_zero_out_a_week() {
        let mut ledger = ledger();
        ledger.record_week(date(2024, 1, 7), values(&[(Muscle::Chest, 10)]));
        assert_eq!(ledger.all_weeks().len(), 1);
        assert_eq!(ledger.week_for(date(2024, 1, 9)).count(Muscle::Chest), 10);

        ledger.record_week(date(2024, 1, 7), values(&[(Muscle::Chest, 0)]));
        assert!(ledger.all_weeks().is_empty());
        assert_eq!(ledger.week_for(date(2024, 1, 9)).count(Muscle::Chest), 0);
    }

    #[test]
    fn recording_twice_keeps_one_record() {
        let mut ledger = ledger();
        let week = values(&[(Muscle::Lats, 6), (Muscle::Biceps, 4)]);
        ledger.record_week(date(2024, 3, 3), week.clone());
        ledger.record_week(date(2024, 3, 3), week.clone());
        assert_eq!(ledger.all_weeks().len(), 1);
        assert_eq!(ledger.all_weeks()[0].values, week);
    }

    #[test]
    fn any_day_of_the_week_addresses_the_same_record() {
        let mut ledger = ledger();
        ledger.record_week(date(2024, 1, 10), values(&[(Muscle::Quads, 8)]));
        ledger.record_week(date(2024, 1, 13), values(&[(Muscle::Quads, 9)]));

        assert_eq!(ledger.all_weeks().len(), 1);
        assert_eq!(ledger.all_weeks()[0].week_start, date(2024, 1, 7));
        assert_eq!(ledger.week_for(date(2024, 1, 7)), ledger.week_for(date(2024, 1, 11)));
        assert_eq!(ledger.week_for(date(2024, 1, 8)).count(Muscle::Quads), 9);
    }

    #[test]
    fn blank_values_for_unknown_week_do_nothing() {
        let store = MemoryStore::new();
        let mut ledger = VolumeLedger::open(store.clone(), Weekday::Sun);
        ledger.record_week(date(2024, 1, 7), MuscleValues::new());
        assert!(ledger.all_weeks().is_empty());
        assert!(!store.contains(HISTORY_KEY));
    }

    #[test]
    fn weeks_stay_sorted_most_recent_first() {
        let mut ledger = ledger();
        ledger.record_week(date(2024, 2, 4), values(&[(Muscle::Core, 1)]));
        ledger.record_week(date(2024, 1, 7), values(&[(Muscle::Core, 2)]));
        ledger.record_week(date(2024, 3, 10), values(&[(Muscle::Core, 3)]));
        ledger.record_week(date(2024, 2, 18), values(&[(Muscle::Core, 4)]));

        let starts: Vec<_> = ledger.all_weeks().iter().map(|w| w.week_start).collect();
        assert_eq!(
            starts,
            vec![date(2024, 3, 10), date(2024, 2, 18), date(2024, 2, 4), date(2024, 1, 7)]
        );
    }

    #[test]
    fn totals_sum_every_week() {
        let mut ledger = ledger();
        assert!(ledger.all_time_totals().is_blank());

        ledger.record_week(date(2024, 1, 7), values(&[(Muscle::Biceps, 5)]));
        ledger.record_week(date(2024, 1, 14), values(&[(Muscle::Biceps, 7), (Muscle::Cardio, 2)]));

        let totals = ledger.all_time_totals();
        assert_eq!(totals.get(Muscle::Biceps), 12);
        assert_eq!(totals.get(Muscle::Cardio), 2);
        assert_eq!(totals.get(Muscle::Chest), 0);
    }

    #[test]
    fn delete_by_id_ignores_unknown_ids() {
        let mut ledger = ledger();
        ledger.record_week(date(2024, 1, 7), values(&[(Muscle::Glutes, 3)]));
        ledger.record_week(date(2024, 1, 14), values(&[(Muscle::Glutes, 4)]));

        ledger.delete_week(Uuid::new_v4());
        assert_eq!(ledger.all_weeks().len(), 2);

        let id = ledger.find_week(date(2024, 1, 7)).unwrap().id;
        ledger.delete_week(id);
        assert_eq!(ledger.all_weeks().len(), 1);
        assert!(ledger.find_week(date(2024, 1, 7)).is_none());
    }

    #[test]
    fn increments_build_up_the_week() {
        let mut ledger = ledger();
        let today = date(2024, 5, 15);
        ledger.increment(today, Muscle::Chest);
        ledger.increment(today, Muscle::Chest);
        ledger.set_count(today, Muscle::Triceps, 5);
        let week = ledger.week_for(today);
        assert_eq!(week.count(Muscle::Chest), 2);
        assert_eq!(week.count(Muscle::Triceps), 5);

        ledger.set_count(today, Muscle::Chest, 0);
        ledger.set_count(today, Muscle::Triceps, 0);
        assert!(ledger.all_weeks().is_empty());
    }

    #[test]
    fn history_survives_reopen_and_clear_removes_it() {
        let store = MemoryStore::new();
        let mut ledger = VolumeLedger::open(store.clone(), Weekday::Sun);
        ledger.record_week(date(2024, 1, 7), values(&[(Muscle::Calves, 6)]));

        let reopened = VolumeLedger::open(store.clone(), Weekday::Sun);
        assert_eq!(reopened.all_weeks(), ledger.all_weeks());

        ledger.clear_all();
        assert!(ledger.all_weeks().is_empty());
        assert!(!store.contains(HISTORY_KEY));
    }

    #[test]
    fn corrupt_history_starts_empty() {
        let store = MemoryStore::new();
        store.set(HISTORY_KEY, b"[{\"id\": 5}]").unwrap();
        let ledger = VolumeLedger::open(store, Weekday::Sun);
        assert!(ledger.all_weeks().is_empty());
    }

    #[test]
    fn loading_repairs_blank_unaligned_and_duplicate_weeks() {
        let store = MemoryStore::new();
        let payload = r#"[
            {"id": "00000000-0000-0000-0000-000000000001", "weekStart": "2024-01-07",
             "values": {"Chest": 0}},
            {"id": "00000000-0000-0000-0000-000000000002", "weekStart": "2024-01-09",
             "values": {"Chest": 3}},
            {"id": "00000000-0000-0000-0000-000000000003", "weekStart": "2024-01-08",
             "values": {"Chest": 1}},
            {"id": "00000000-0000-0000-0000-000000000004", "weekStart": "2024-01-16",
             "values": {"Lats": 2}}
        ]"#;
        store.set(HISTORY_KEY, payload.as_bytes()).unwrap();

        let ledger = VolumeLedger::open(store.clone(), Weekday::Sun);
        let starts: Vec<_> = ledger.all_weeks().iter().map(|w| w.week_start).collect();
        assert_eq!(starts, vec![date(2024, 1, 14), date(2024, 1, 7)]);
        assert_eq!(ledger.week_for(date(2024, 1, 10)).count(Muscle::Chest), 3);
        assert_eq!(ledger.all_time_totals().get(Muscle::Chest), 3);

        let reopened = VolumeLedger::open(store, Weekday::Sun);
        assert_eq!(reopened.all_weeks(), ledger.all_weeks());
    }

    #[test]
    fn unknown_muscle_in_history_keeps_the_rest() {
        let store = MemoryStore::new();
        let payload = r#"[{"id": "00000000-0000-0000-0000-000000000001",
            "weekStart": "2024-01-28", "values": {"Chest": 3, "Neck": 1}}]"#;
        store.set(HISTORY_KEY, payload.as_bytes()).unwrap();

        let mut ledger = VolumeLedger::open(store.clone(), Weekday::Sun);
        assert_eq!(ledger.all_weeks().len(), 1);
        assert_eq!(ledger.week_for(date(2024, 1, 30)).count(Muscle::Chest), 3);

        ledger.record_week(date(2024, 2, 4), values(&[(Muscle::Lats, 1)]));
        let reopened = VolumeLedger::open(store, Weekday::Sun);
        assert_eq!(reopened.all_weeks().len(), 2);
        assert_eq!(reopened.all_time_totals().get(Muscle::Chest), 3);
    }

    #[test]
    fn storage_failures_leave_memory_state_intact() {
        let mut ledger = VolumeLedger::open(BrokenStore, Weekday::Sun);
        ledger.record_week(date(2024, 1, 7), values(&[(Muscle::Hamstrings, 4)]));
        assert_eq!(ledger.week_for(date(2024, 1, 7)).count(Muscle::Hamstrings), 4);
        ledger.clear_all();
        assert!(ledger.all_weeks().is_empty());
    }
}
