//models.rs
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Push,
    Pull,
    Legs,
    Misc,
    Cardio,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Push,
        Category::Pull,
        Category::Legs,
        Category::Misc,
        Category::Cardio,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Push => "Push",
            Category::Pull => "Pull",
            Category::Legs => "Legs",
            Category::Misc => "Misc",
            Category::Cardio => "Cardio",
        }
    }

    pub fn muscles(self) -> &'static [Muscle] {
        match self {
            Category::Push => &[
                Muscle::Chest,
                Muscle::Triceps,
                Muscle::FrontDelts,
                Muscle::SideDelts,
            ],
            Category::Pull => &[
                Muscle::Lats,
                Muscle::Biceps,
                Muscle::MidBack,
                Muscle::RearDelts,
            ],
            Category::Legs => &[
                Muscle::Quads,
                Muscle::Hamstrings,
                Muscle::Glutes,
                Muscle::Calves,
            ],
            Category::Misc => &[Muscle::Core, Muscle::Forearms, Muscle::LowerBack],
            Category::Cardio => &[Muscle::Cardio],
        }
    }
}

/// A muscle group from the fixed training vocabulary. Serialized by its
/// display name so persisted maps read `{"Front Delts": 4}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Muscle {
    Chest,
    Triceps,
    #[serde(rename = "Front Delts")]
    FrontDelts,
    #[serde(rename = "Side Delts")]
    SideDelts,
    Lats,
    Biceps,
    #[serde(rename = "Mid Back")]
    MidBack,
    #[serde(rename = "Rear Delts")]
    RearDelts,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    Core,
    Forearms,
    #[serde(rename = "Lower Back")]
    LowerBack,
    Cardio,
}

impl Muscle {
    pub const ALL: [Muscle; 16] = [
        Muscle::Chest,
        Muscle::Triceps,
        Muscle::FrontDelts,
        Muscle::SideDelts,
        Muscle::Lats,
        Muscle::Biceps,
        Muscle::MidBack,
        Muscle::RearDelts,
        Muscle::Quads,
        Muscle::Hamstrings,
        Muscle::Glutes,
        Muscle::Calves,
        Muscle::Core,
        Muscle::Forearms,
        Muscle::LowerBack,
        Muscle::Cardio,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Muscle::Chest => "Chest",
            Muscle::Triceps => "Triceps",
            Muscle::FrontDelts => "Front Delts",
            Muscle::SideDelts => "Side Delts",
            Muscle::Lats => "Lats",
            Muscle::Biceps => "Biceps",
            Muscle::MidBack => "Mid Back",
            Muscle::RearDelts => "Rear Delts",
            Muscle::Quads => "Quads",
            Muscle::Hamstrings => "Hamstrings",
            Muscle::Glutes => "Glutes",
            Muscle::Calves => "Calves",
            Muscle::Core => "Core",
            Muscle::Forearms => "Forearms",
            Muscle::LowerBack => "Lower Back",
            Muscle::Cardio => "Cardio",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Muscle::Chest | Muscle::Triceps | Muscle::FrontDelts | Muscle::SideDelts => {
                Category::Push
            }
            Muscle::Lats | Muscle::Biceps | Muscle::MidBack | Muscle::RearDelts => {
                Category::Pull
            }
            Muscle::Quads | Muscle::Hamstrings | Muscle::Glutes | Muscle::Calves => {
                Category::Legs
            }
            Muscle::Core | Muscle::Forearms | Muscle::LowerBack => Category::Misc,
            Muscle::Cardio => Category::Cardio,
        }
    }

    /// Cardio is counted in sessions rather than sets.
    pub fn is_cardio(self) -> bool {
        self.category() == Category::Cardio
    }
}

impl fmt::Display for Muscle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMuscle(pub String);

impl fmt::Display for UnknownMuscle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown muscle group: {}", self.0)
    }
}

impl std::error::Error for UnknownMuscle {}

impl FromStr for Muscle {
    type Err = UnknownMuscle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Muscle::ALL
            .iter()
            .copied()
            .find(|muscle| muscle.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMuscle(s.to_string()))
    }
}

/// Drops keys outside the muscle vocabulary, logging each one.
pub fn known_muscles<V>(raw: BTreeMap<String, V>) -> BTreeMap<Muscle, V> {
    raw.into_iter()
        .filter_map(|(name, value)| match name.parse::<Muscle>() {
            Ok(muscle) => Some((muscle, value)),
            Err(e) => {
                warn!("Skipping stored entry: {e}");
                None
            }
        })
        .collect()
}

/// Per-muscle counts for one week (or a total across weeks).
/// A muscle with no entry counts as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MuscleValues(BTreeMap<Muscle, u32>);

impl<'de> Deserialize<'de> for MuscleValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
        Ok(MuscleValues(known_muscles(raw)))
    }
}

impl MuscleValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, muscle: Muscle) -> u32 {
        self.0.get(&muscle).copied().unwrap_or(0)
    }

    pub fn set(&mut self, muscle: Muscle, count: u32) {
        self.0.insert(muscle, count);
    }

    pub fn increment(&mut self, muscle: Muscle) {
        let count = self.0.entry(muscle).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// True when nothing worth persisting is present.
    pub fn is_blank(&self) -> bool {
        self.0.values().all(|count| *count == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Muscle, u32)> + '_ {
        self.0.iter().map(|(muscle, count)| (*muscle, *count))
    }

    pub fn merge_add(&mut self, other: &MuscleValues) {
        for (muscle, count) in other.iter() {
            let total = self.0.entry(muscle).or_insert(0);
            *total = total.saturating_add(count);
        }
    }
}

impl FromIterator<(Muscle, u32)> for MuscleValues {
    fn from_iter<I: IntoIterator<Item = (Muscle, u32)>>(iter: I) -> Self {
        MuscleValues(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRecord {
    pub id: Uuid,
    pub week_start: NaiveDate,
    pub values: MuscleValues,
}

impl WeekRecord {
    pub fn new(week_start: NaiveDate, values: MuscleValues) -> Self {
        WeekRecord {
            id: Uuid::new_v4(),
            week_start,
            values,
        }
    }

    /// Placeholder for a week nobody has logged yet.
    pub fn empty(week_start: NaiveDate) -> Self {
        WeekRecord {
            id: Uuid::nil(),
            week_start,
            values: MuscleValues::new(),
        }
    }

    pub fn count(&self, muscle: Muscle) -> u32 {
        self.values.get(muscle)
    }
}
