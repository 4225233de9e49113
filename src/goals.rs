use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::models::{known_muscles, Muscle};
use crate::store::{load_json, save_json, KeyValueStore, GOALS_KEY};

pub const DEFAULT_STRENGTH_GOAL: u32 = 12;
pub const DEFAULT_CARDIO_GOAL: u32 = 3;

pub fn default_goal(muscle: Muscle) -> u32 {
    if muscle.is_cardio() {
        DEFAULT_CARDIO_GOAL
    } else {
        DEFAULT_STRENGTH_GOAL
    }
}

/// Weekly volume targets. Muscles without an override use [`default_goal`].
pub struct GoalTable<S: KeyValueStore> {
    store: S,
    overrides: BTreeMap<Muscle, u32>,
}

impl<S: KeyValueStore> GoalTable<S> {
    pub fn open(store: S) -> Self {
        let overrides = match load_json::<BTreeMap<String, u32>>(&store, GOALS_KEY) {
            Ok(goals) => known_muscles(goals.unwrap_or_default()),
            Err(e) => {
                warn!("Error loading volume goals, using defaults: {e}");
                BTreeMap::new()
            }
        };
        GoalTable { store, overrides }
    }

    pub fn goal_for(&self, muscle: Muscle) -> u32 {
        self.overrides
            .get(&muscle)
            .copied()
            .unwrap_or_else(|| default_goal(muscle))
    }

    /// Negative targets are stored as 0.
    pub fn set_goal(&mut self, muscle: Muscle, value: i64) {
        let goal = u32::try_from(value.max(0)).unwrap_or(u32::MAX);
        self.overrides.insert(muscle, goal);
        debug!(%muscle, goal, "goal updated");
        if let Err(e) = save_json(&self.store, GOALS_KEY, &self.overrides) {
            warn!("Error saving volume goals: {e}");
        }
    }

    pub fn goals(&self) -> Vec<(Muscle, u32)> {
        Muscle::ALL
            .iter()
            .map(|muscle| (*muscle, self.goal_for(*muscle)))
            .collect()
    }
}
