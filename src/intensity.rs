use crate::models::Muscle;

/// How strongly a muscle should be highlighted for the week.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shade {
    Empty,
    /// Fraction of the goal reached, in `(0, 1]`.
    Progress(f64),
    GoalMet,
}

pub fn shade_for(muscle: Muscle, count: u32, goal: u32) -> Shade {
    if count == 0 {
        return Shade::Empty;
    }
    // cardio only turns gold once the session target is exceeded
    let met = if muscle.is_cardio() {
        count > goal
    } else {
        count >= goal
    };
    if met || goal == 0 {
        return Shade::GoalMet;
    }
    Shade::Progress((f64::from(count) / f64::from(goal)).min(1.0))
}
