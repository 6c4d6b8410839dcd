#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod cycle;
pub mod error;
pub mod lift;
pub mod name;
pub mod one_rep_max;
pub mod program;
pub mod service;
pub mod workset;

pub use crate::{
    config::{
        Progression, Templates, TrainingConfig, WeightIncrement, WeightIncrementError,
    },
    cycle::{
        CycleEstimate, CycleService, Transition, advance, estimate_next_cycle, latest_cycle,
        latest_max,
    },
    error::{
        CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError,
    },
    lift::{Lift, LiftError},
    name::{Name, NameError},
    one_rep_max::{Formula, history},
    program::{
        CompiledSet, LiftPlan, Percentage, PercentageError, ProgramTemplate,
        ProgramTemplateError, Scheme, SchemeError, TemplateRow, TrainMax, TrainMaxError,
        pending_program, plan_cycle, progressed_train_max,
    },
    service::Service,
    workset::{
        Prescription, Reps, RepsError, Weight, WeightError, Workset, WorksetID,
        WorksetRepository, WorksetService, WorksetState,
    },
};
