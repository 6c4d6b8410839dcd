use std::{collections::BTreeMap, fmt, slice::Iter, str::FromStr};

use derive_more::{Display, Into};

use crate::{
    Lift, Name, Prescription, Reps, TrainingConfig, Weight, WeightError, WeightIncrement, Workset,
    WorksetID, WorksetState,
};

/// Rep scheme governing one week of the cycle, identified by its top rep
/// target. Replaces the original's interchangeable string/int template
/// keys; the string form only exists at the parsing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scheme {
    Five,
    Three,
    One,
    Deload,
}

impl Scheme {
    pub fn iter() -> Iter<'static, Scheme> {
        static SCHEMES: [Scheme; 4] = [Scheme::Five, Scheme::Three, Scheme::One, Scheme::Deload];
        SCHEMES.iter()
    }

    /// The top rep target identifying this scheme (0 for the deload week).
    #[must_use]
    pub fn base_reps(self) -> u32 {
        match self {
            Scheme::Five => 5,
            Scheme::Three => 3,
            Scheme::One => 1,
            Scheme::Deload => 0,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Deload => write!(f, "off"),
            _ => write!(f, "{}", self.base_reps()),
        }
    }
}

impl TryFrom<u32> for Scheme {
    type Error = SchemeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(Scheme::Five),
            3 => Ok(Scheme::Three),
            1 => Ok(Scheme::One),
            0 => Ok(Scheme::Deload),
            _ => Err(SchemeError::Unknown(value.to_string())),
        }
    }
}

impl FromStr for Scheme {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "5" => Ok(Scheme::Five),
            "3" => Ok(Scheme::Three),
            "1" => Ok(Scheme::One),
            "0" | "off" => Ok(Scheme::Deload),
            _ => Err(SchemeError::Unknown(s.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SchemeError {
    #[error("unknown rep scheme: {0}")]
    Unknown(String),
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percentage(u8);

impl Percentage {
    pub fn new(value: u8) -> Result<Self, PercentageError> {
        if value > 100 {
            return Err(PercentageError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl From<Percentage> for f32 {
    fn from(value: Percentage) -> Self {
        f32::from(value.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PercentageError {
    #[error("Percentage must be in the range 0 to 100")]
    OutOfRange,
}

/// Fraction of the estimated 1RM that prescribed percentages are computed
/// from.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct TrainMax(f32);

impl TrainMax {
    pub const RATIO: f32 = 0.9;

    pub fn new(value: f32) -> Result<Self, TrainMaxError> {
        if value < 0.0 {
            return Err(TrainMaxError::Negative);
        }

        Ok(Self(value))
    }

    pub fn from_one_rm(one_rep_max: f32) -> Result<Self, TrainMaxError> {
        Self::new(one_rep_max * Self::RATIO)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TrainMaxError {
    #[error("Train max must not be negative")]
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateRow {
    pub percentage: Percentage,
    pub target_reps: Reps,
    pub amrap: bool,
}

/// Ordered percentage/rep rows of one session; the row order is the
/// lifting order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramTemplate {
    rows: Vec<TemplateRow>,
}

impl ProgramTemplate {
    pub fn new(rows: Vec<TemplateRow>) -> Result<Self, ProgramTemplateError> {
        if rows.is_empty() {
            return Err(ProgramTemplateError::Empty);
        }

        Ok(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[TemplateRow] {
        &self.rows
    }

    /// The canonical template of a scheme, with the top set of the three
    /// working weeks performed for as many reps as possible.
    #[must_use]
    pub fn default_for(scheme: Scheme) -> Self {
        let row = |pct, target_reps, amrap| TemplateRow {
            percentage: Percentage(pct),
            target_reps,
            amrap,
        };
        let rows = match scheme {
            Scheme::Five => vec![
                row(40, Reps::FIVE, false),
                row(50, Reps::FIVE, false),
                row(60, Reps::THREE, false),
                row(65, Reps::FIVE, false),
                row(75, Reps::FIVE, false),
                row(85, Reps::FIVE, true),
            ],
            Scheme::Three => vec![
                row(40, Reps::FIVE, false),
                row(50, Reps::FIVE, false),
                row(60, Reps::THREE, false),
                row(70, Reps::THREE, false),
                row(80, Reps::THREE, false),
                row(90, Reps::THREE, true),
            ],
            Scheme::One => vec![
                row(40, Reps::FIVE, false),
                row(50, Reps::FIVE, false),
                row(60, Reps::THREE, false),
                row(75, Reps::FIVE, false),
                row(85, Reps::THREE, false),
                row(95, Reps::ONE, true),
            ],
            Scheme::Deload => vec![
                row(40, Reps::FIVE, false),
                row(50, Reps::FIVE, false),
                row(40, Reps::FIVE, false),
            ],
        };
        Self { rows }
    }

    /// Prescribed sets for a train max, in row order. Weights are truncated
    /// down to the nearest multiple of the increment, never rounded up, so
    /// a prescribed weight never exceeds the computed percentage.
    #[must_use]
    pub fn compile(&self, train_max: TrainMax, increment: WeightIncrement) -> Vec<CompiledSet> {
        self.rows
            .iter()
            .map(|row| {
                let raw = f32::from(train_max) * f32::from(row.percentage) / 100.0;
                let weight = (raw / f32::from(increment)).floor() * f32::from(increment);
                CompiledSet {
                    percentage: row.percentage,
                    target_reps: row.target_reps,
                    weight,
                    amrap: row.amrap,
                }
            })
            .collect()
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProgramTemplateError {
    #[error("Program template must have at least one row")]
    Empty,
}

/// One prescribed set of a compiled program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompiledSet {
    pub percentage: Percentage,
    pub target_reps: Reps,
    pub weight: f32,
    pub amrap: bool,
}

/// Compiled program of one lift, in lifting order.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftPlan {
    pub lift: Lift,
    pub sets: Vec<CompiledSet>,
}

impl LiftPlan {
    /// Rep targets in lifting order, the final all-out set marked with a
    /// trailing `+`.
    #[must_use]
    pub fn reps(&self) -> Vec<String> {
        self.sets
            .iter()
            .map(|set| {
                if set.amrap {
                    format!("{}+", set.target_reps)
                } else {
                    set.target_reps.to_string()
                }
            })
            .collect()
    }

    #[must_use]
    pub fn weights(&self) -> Vec<f32> {
        self.sets.iter().map(|set| set.weight).collect()
    }
}

/// Train max for a cycle: 90 % of the recorded 1RM baseline plus the
/// per-lift increment gained on each completed pass through all four
/// schemes. Cycles below zero (no cycle history yet) contribute nothing.
#[must_use]
pub fn progressed_train_max(
    one_rep_max: f32,
    lift: Lift,
    cycle: i32,
    config: &TrainingConfig,
) -> TrainMax {
    #[allow(clippy::cast_precision_loss)]
    let added = config.progression.get(lift) * cycle.max(0) as f32;
    TrainMax((one_rep_max * TrainMax::RATIO + added).max(0.0))
}

/// Compiled programs for all planned sets, one per lift. If a lift has
/// several planned sets, the most recently created one wins.
#[must_use]
pub fn pending_program(worksets: &[Workset], config: &TrainingConfig) -> Vec<LiftPlan> {
    Lift::iter()
        .filter_map(|lift| {
            let prescription = worksets
                .iter()
                .filter(|ws| ws.is_planned() && ws.lift == *lift)
                .last()
                .and_then(Workset::prescription)?;
            let train_max = progressed_train_max(
                prescription.base_max,
                *lift,
                prescription.cycle,
                config,
            );
            let template = config.templates.get(prescription.scheme);
            Some(LiftPlan {
                lift: *lift,
                sets: template.compile(train_max, config.weight_increment),
            })
        })
        .collect()
}

/// Planned worksets for a new cycle, one per lift with a known 1RM. Each
/// carries the submitted 1RM as its baseline and the compiled top-set
/// weight as the planned weight; ids are assigned by storage.
pub fn plan_cycle(
    athlete: &Name,
    one_rep_maxes: &BTreeMap<Lift, f32>,
    scheme: Scheme,
    cycle: i32,
    config: &TrainingConfig,
) -> Result<Vec<Workset>, WeightError> {
    let mut worksets = vec![];

    for lift in Lift::iter() {
        let Some(one_rep_max) = one_rep_maxes.get(lift) else {
            continue;
        };
        let train_max = progressed_train_max(*one_rep_max, *lift, cycle, config);
        let sets = config
            .templates
            .get(scheme)
            .compile(train_max, config.weight_increment);
        let Some(top_set) = sets.last() else {
            continue;
        };
        worksets.push(Workset {
            id: WorksetID::nil(),
            athlete: athlete.clone(),
            lift: *lift,
            weight: Weight::new(top_set.weight)?,
            is_max: false,
            state: WorksetState::Planned {
                prescription: Prescription {
                    base_max: *one_rep_max,
                    scheme,
                    cycle,
                },
            },
        });
    }

    Ok(worksets)
}
