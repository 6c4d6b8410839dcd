use chrono::{Local, NaiveDate};
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, Lift, Name, ReadError, Scheme, UpdateError, ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait WorksetService {
    async fn get_worksets(&self, athlete: &Name) -> Result<Vec<Workset>, ReadError>;
    async fn create_workset(&self, workset: Workset) -> Result<Workset, CreateError>;
    async fn modify_workset(
        &self,
        id: WorksetID,
        date: Option<NaiveDate>,
        reps: Option<Reps>,
        weight: Option<Weight>,
    ) -> Result<Workset, UpdateError>;
    async fn delete_workset(&self, id: WorksetID) -> Result<WorksetID, DeleteError>;

    async fn get_pending_worksets(&self, athlete: &Name) -> Result<Vec<Workset>, ReadError> {
        Ok(self
            .get_worksets(athlete)
            .await?
            .into_iter()
            .filter(Workset::is_planned)
            .collect())
    }

    /// One set per lift, athlete and day; a date that already has a
    /// completed set of the lift is a conflict.
    async fn validate_workset_date(
        &self,
        date: &str,
        athlete: &Name,
        lift: Lift,
    ) -> Result<NaiveDate, ValidationError> {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed_date) => {
                if parsed_date <= Local::now().date_naive() {
                    match self.get_worksets(athlete).await {
                        Ok(worksets) => {
                            if worksets
                                .iter()
                                .all(|ws| ws.lift != lift || ws.date() != Some(parsed_date))
                            {
                                Ok(parsed_date)
                            } else {
                                Err(ValidationError::Conflict("date".to_string()))
                            }
                        }
                        Err(err) => Err(ValidationError::Other(err.into())),
                    }
                } else {
                    Err(ValidationError::Other(
                        "Date must not be in the future".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other("Invalid date".into())),
        }
    }

    fn validate_workset_reps(&self, reps: &str) -> Result<Reps, ValidationError> {
        Reps::try_from(reps.trim()).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_workset_weight(&self, weight: &str) -> Result<Weight, ValidationError> {
        Weight::try_from(weight.replace(',', ".").trim())
            .map_err(|err| ValidationError::Other(err.into()))
    }
}

#[allow(async_fn_in_trait)]
pub trait WorksetRepository {
    async fn read_worksets(&self, athlete: &Name) -> Result<Vec<Workset>, ReadError>;
    async fn create_workset(&self, workset: Workset) -> Result<Workset, CreateError>;
    async fn modify_workset(
        &self,
        id: WorksetID,
        date: Option<NaiveDate>,
        reps: Option<Reps>,
        weight: Option<Weight>,
    ) -> Result<Workset, UpdateError>;
    async fn delete_workset(&self, id: WorksetID) -> Result<WorksetID, DeleteError>;
}

/// One performed or planned set of an athlete's lift.
#[derive(Debug, Clone, PartialEq)]
pub struct Workset {
    pub id: WorksetID,
    pub athlete: Name,
    pub lift: Lift,
    pub weight: Weight,
    pub is_max: bool,
    pub state: WorksetState,
}

impl Workset {
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        match &self.state {
            WorksetState::Planned { .. } => None,
            WorksetState::Completed { date, .. } => Some(*date),
        }
    }

    #[must_use]
    pub fn reps(&self) -> Option<Reps> {
        match &self.state {
            WorksetState::Planned { .. } => None,
            WorksetState::Completed { reps, .. } => Some(*reps),
        }
    }

    #[must_use]
    pub fn prescription(&self) -> Option<&Prescription> {
        match &self.state {
            WorksetState::Planned { prescription } => Some(prescription),
            WorksetState::Completed { prescription, .. } => prescription.as_ref(),
        }
    }

    #[must_use]
    pub fn is_planned(&self) -> bool {
        matches!(self.state, WorksetState::Planned { .. })
    }

    /// Rep count for display, `(N+)` for sets that are still to be done.
    #[must_use]
    pub fn rep_label(&self) -> String {
        match &self.state {
            WorksetState::Planned { prescription } => {
                format!("({}+)", prescription.scheme.base_reps())
            }
            WorksetState::Completed { reps, .. } => reps.to_string(),
        }
    }
}

/// A set is either planned (no date, no reps, prescribed by a program) or
/// completed (dated and with a rep count, prescription only if the set was
/// program-generated rather than ad hoc).
#[derive(Debug, Clone, PartialEq)]
pub enum WorksetState {
    Planned {
        prescription: Prescription,
    },
    Completed {
        date: NaiveDate,
        reps: Reps,
        prescription: Option<Prescription>,
    },
}

/// Program metadata of a prescribed set: the train-max baseline the
/// percentage was computed from, the rep scheme and the cycle index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prescription {
    pub base_max: f32,
    pub scheme: Scheme,
    pub cycle: i32,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorksetID(Uuid);

impl WorksetID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorksetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorksetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub const ONE: Reps = Reps(1);
    pub const THREE: Reps = Reps(3);
    pub const FIVE: Reps = Reps(5);

    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(1..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}
