use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    CreateError, CycleEstimate, CycleService, DeleteError, Lift, LiftPlan, Name, ReadError,
    Reps, Scheme, TrainingConfig, UpdateError, Weight, Workset, WorksetID, WorksetRepository,
    WorksetService, estimate_next_cycle, pending_program, plan_cycle,
};

/// Application service over a workset store. Owns the training
/// configuration, constructed once by the embedding application.
pub struct Service<R> {
    repository: R,
    config: TrainingConfig,
}

impl<R> Service<R> {
    pub fn new(repository: R, config: TrainingConfig) -> Self {
        Self { repository, config }
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorksetRepository> WorksetService for Service<R> {
    async fn get_worksets(&self, athlete: &Name) -> Result<Vec<Workset>, ReadError> {
        log_on_error!(
            self.repository.read_worksets(athlete),
            ReadError,
            "get",
            "worksets"
        )
    }

    async fn create_workset(&self, workset: Workset) -> Result<Workset, CreateError> {
        log_on_error!(
            self.repository.create_workset(workset),
            CreateError,
            "create",
            "workset"
        )
    }

    async fn modify_workset(
        &self,
        id: WorksetID,
        date: Option<NaiveDate>,
        reps: Option<Reps>,
        weight: Option<Weight>,
    ) -> Result<Workset, UpdateError> {
        log_on_error!(
            self.repository.modify_workset(id, date, reps, weight),
            UpdateError,
            "modify",
            "workset"
        )
    }

    async fn delete_workset(&self, id: WorksetID) -> Result<WorksetID, DeleteError> {
        log_on_error!(
            self.repository.delete_workset(id),
            DeleteError,
            "delete",
            "workset"
        )
    }
}

impl<R: WorksetRepository> CycleService for Service<R> {
    async fn get_next_cycle(&self, athlete: &Name) -> Result<CycleEstimate, ReadError> {
        Ok(estimate_next_cycle(&self.get_worksets(athlete).await?))
    }

    async fn get_pending_program(&self, athlete: &Name) -> Result<Vec<LiftPlan>, ReadError> {
        Ok(pending_program(
            &self.get_worksets(athlete).await?,
            &self.config,
        ))
    }

    async fn start_cycle(
        &self,
        athlete: &Name,
        one_rep_maxes: &BTreeMap<Lift, f32>,
        scheme: Scheme,
        cycle: i32,
    ) -> Result<Vec<Workset>, CreateError> {
        let planned = plan_cycle(athlete, one_rep_maxes, scheme, cycle, &self.config)
            .map_err(|err| CreateError::Other(err.into()))?;

        let mut created = vec![];
        for workset in planned {
            created.push(self.create_workset(workset).await?);
        }
        Ok(created)
    }
}
