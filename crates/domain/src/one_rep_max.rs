use chrono::NaiveDate;

use crate::{Lift, Reps, Workset};

const CURVE_POINTS: usize = 100;
const CURVE_MAX_REPS: f32 = 15.0;

/// Estimation formula for the one-repetition maximum.
///
/// `Fusion` is the canonical estimator used by the cycle advisor and the
/// progression history; the other two are kept as interchangeable
/// strategies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    /// `weight * 36 / (37 - reps)`. Diverges as reps approach 37; callers
    /// must stay below that.
    Brzycki,
    /// `weight * reps^0.1`.
    Lombardi,
    /// Arithmetic mean of Brzycki and Lombardi.
    #[default]
    Fusion,
}

impl Formula {
    #[must_use]
    pub fn estimate(self, weight: f32, reps: Reps) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let reps = u32::from(reps) as f32;
        self.one_rep_max_at(weight, reps)
    }

    fn one_rep_max_at(self, weight: f32, reps: f32) -> f32 {
        match self {
            Formula::Brzycki => weight * 36.0 / (37.0 - reps),
            Formula::Lombardi => weight * reps.powf(0.1),
            Formula::Fusion => {
                0.5 * (Formula::Brzycki.one_rep_max_at(weight, reps)
                    + Formula::Lombardi.one_rep_max_at(weight, reps))
            }
        }
    }

    /// The (reps, weight) curve that yields the given 1RM under this
    /// formula: 100 evenly spaced rep counts between 1 and 15, each paired
    /// with the weight solving the formula for that rep count.
    #[must_use]
    pub fn curve(self, one_rep_max: f32) -> Vec<(f32, f32)> {
        #[allow(clippy::cast_precision_loss)]
        (0..CURVE_POINTS)
            .map(|i| {
                let reps =
                    1.0 + (CURVE_MAX_REPS - 1.0) * i as f32 / (CURVE_POINTS - 1) as f32;
                (reps, self.weight_at(one_rep_max, reps))
            })
            .collect()
    }

    fn weight_at(self, one_rep_max: f32, reps: f32) -> f32 {
        match self {
            Formula::Brzycki => (37.0 - reps) * one_rep_max / 36.0,
            Formula::Lombardi => one_rep_max / reps.powf(0.1),
            Formula::Fusion => 2.0 * one_rep_max / (reps.powf(0.1) + 36.0 / (37.0 - reps)),
        }
    }
}

impl Workset {
    /// Estimated 1RM of a completed set, `None` while the set is planned.
    #[must_use]
    pub fn one_rep_max(&self, formula: Formula) -> Option<f32> {
        let reps = self.reps()?;
        Some(formula.estimate(f32::from(self.weight), reps))
    }
}

/// Dated 1RM estimates of all completed sets of one lift, ascending by
/// date. Input order breaks ties within a day.
#[must_use]
pub fn history(worksets: &[Workset], lift: Lift, formula: Formula) -> Vec<(NaiveDate, f32)> {
    let mut result = worksets
        .iter()
        .filter(|ws| ws.lift == lift)
        .filter_map(|ws| Some((ws.date()?, ws.one_rep_max(formula)?)))
        .collect::<Vec<_>>();
    result.sort_by_key(|(date, _)| *date);
    result
}
