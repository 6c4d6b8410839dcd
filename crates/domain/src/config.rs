use std::collections::BTreeMap;

use derive_more::{Display, Into};

use crate::{Lift, ProgramTemplate, Scheme};

/// Configuration of the training program, constructed once at startup and
/// passed by reference into the operations that need it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub templates: Templates,
    pub weight_increment: WeightIncrement,
    pub progression: Progression,
    /// Per-lift setup notes (rack heights and the like), display only.
    pub comments: BTreeMap<Lift, String>,
    /// Per-lift assistance exercises, display only.
    pub assistance: BTreeMap<Lift, String>,
}

impl TrainingConfig {
    #[must_use]
    pub fn comment(&self, lift: Lift) -> Option<&str> {
        self.comments.get(&lift).map(String::as_str)
    }

    #[must_use]
    pub fn assistance(&self, lift: Lift) -> Option<&str> {
        self.assistance.get(&lift).map(String::as_str)
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            templates: Templates::default(),
            weight_increment: WeightIncrement::default(),
            progression: Progression::default(),
            comments: [
                (Lift::Squat, "rack @ 17, safetybar @ 3".to_string()),
                (Lift::Military, "rack @ 16, dips @ 9".to_string()),
            ]
            .into_iter()
            .collect(),
            assistance: [
                (Lift::Squat, "one-leg-squat / ab-wheel".to_string()),
                (Lift::Bench, "dips / chins".to_string()),
                (Lift::Deadlift, "ham raise / leg raise".to_string()),
                (Lift::Military, "dips / chins".to_string()),
            ]
            .into_iter()
            .collect(),
        }
    }
}

/// The program template of every scheme. Total by construction, there is
/// no missing-template state.
#[derive(Debug, Clone, PartialEq)]
pub struct Templates {
    pub five: ProgramTemplate,
    pub three: ProgramTemplate,
    pub one: ProgramTemplate,
    pub deload: ProgramTemplate,
}

impl Templates {
    #[must_use]
    pub fn get(&self, scheme: Scheme) -> &ProgramTemplate {
        match scheme {
            Scheme::Five => &self.five,
            Scheme::Three => &self.three,
            Scheme::One => &self.one,
            Scheme::Deload => &self.deload,
        }
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            five: ProgramTemplate::default_for(Scheme::Five),
            three: ProgramTemplate::default_for(Scheme::Three),
            one: ProgramTemplate::default_for(Scheme::One),
            deload: ProgramTemplate::default_for(Scheme::Deload),
        }
    }
}

/// Smallest weight step the available plates allow.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct WeightIncrement(f32);

impl WeightIncrement {
    pub fn new(value: f32) -> Result<Self, WeightIncrementError> {
        if value <= 0.0 {
            return Err(WeightIncrementError::NotPositive);
        }

        Ok(Self(value))
    }
}

impl Default for WeightIncrement {
    fn default() -> Self {
        Self(2.5)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightIncrementError {
    #[error("Weight increment must be positive")]
    NotPositive,
}

/// Amount added to each lift's train max per completed cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progression {
    pub squat: f32,
    pub bench: f32,
    pub deadlift: f32,
    pub military: f32,
}

impl Progression {
    #[must_use]
    pub fn get(&self, lift: Lift) -> f32 {
        match lift {
            Lift::Squat => self.squat,
            Lift::Bench => self.bench,
            Lift::Deadlift => self.deadlift,
            Lift::Military => self.military,
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            squat: 5.0,
            bench: 2.5,
            deadlift: 5.0,
            military: 2.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_templates_lookup_is_total() {
        let templates = Templates::default();

        for scheme in Scheme::iter() {
            assert!(!templates.get(*scheme).rows().is_empty());
        }
    }

    #[rstest]
    #[case(2.5, Ok(WeightIncrement(2.5)))]
    #[case(1.25, Ok(WeightIncrement(1.25)))]
    #[case(0.0, Err(WeightIncrementError::NotPositive))]
    #[case(-2.5, Err(WeightIncrementError::NotPositive))]
    fn test_weight_increment_new(
        #[case] input: f32,
        #[case] expected: Result<WeightIncrement, WeightIncrementError>,
    ) {
        assert_eq!(WeightIncrement::new(input), expected);
    }

    #[test]
    fn test_weight_increment_default() {
        assert_eq!(WeightIncrement::default(), WeightIncrement(2.5));
    }

    #[rstest]
    #[case(Lift::Squat, 5.0)]
    #[case(Lift::Bench, 2.5)]
    #[case(Lift::Deadlift, 5.0)]
    #[case(Lift::Military, 2.5)]
    fn test_progression_default(#[case] lift: Lift, #[case] expected: f32) {
        assert_eq!(Progression::default().get(lift), expected);
    }

    #[test]
    fn test_training_config_notes() {
        let config = TrainingConfig::default();

        assert_eq!(config.comment(Lift::Squat), Some("rack @ 17, safetybar @ 3"));
        assert_eq!(config.comment(Lift::Bench), None);
        assert_eq!(config.assistance(Lift::Deadlift), Some("ham raise / leg raise"));
    }
}
