use std::collections::BTreeMap;

use crate::{CreateError, Formula, Lift, LiftPlan, Name, ReadError, Scheme, Workset};

#[allow(async_fn_in_trait)]
pub trait CycleService {
    async fn get_next_cycle(&self, athlete: &Name) -> Result<CycleEstimate, ReadError>;
    async fn get_pending_program(&self, athlete: &Name) -> Result<Vec<LiftPlan>, ReadError>;
    async fn start_cycle(
        &self,
        athlete: &Name,
        one_rep_maxes: &BTreeMap<Lift, f32>,
        scheme: Scheme,
        cycle: i32,
    ) -> Result<Vec<Workset>, CreateError>;
}

/// Successor state of the scheme rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub scheme: Scheme,
    pub cycle_increment: i32,
}

/// The scheme rotation: 5 → 3 → 1 → off, then back to 5 with the cycle
/// index advancing. `None` (no cycle history) enters the rotation at 5.
/// Total, every state has exactly one successor.
#[must_use]
pub fn advance(current: Option<Scheme>) -> Transition {
    match current {
        None => Transition {
            scheme: Scheme::Five,
            cycle_increment: 0,
        },
        Some(Scheme::Five) => Transition {
            scheme: Scheme::Three,
            cycle_increment: 0,
        },
        Some(Scheme::Three) => Transition {
            scheme: Scheme::One,
            cycle_increment: 0,
        },
        Some(Scheme::One) => Transition {
            scheme: Scheme::Deload,
            cycle_increment: 0,
        },
        Some(Scheme::Deload) => Transition {
            scheme: Scheme::Five,
            cycle_increment: 1,
        },
    }
}

/// Next cycle and scheme for an athlete, with the latest estimated 1RM of
/// every lift that has max-marked history. Derived from the full history
/// on each request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleEstimate {
    pub cycle: i32,
    pub scheme: Scheme,
    pub one_rep_maxes: BTreeMap<Lift, f32>,
}

/// The completed, cycle-tagged set with the maximum date. Ties on the date
/// are broken towards the highest id.
#[must_use]
pub fn latest_cycle(worksets: &[Workset]) -> Option<&Workset> {
    worksets
        .iter()
        .filter(|ws| ws.prescription().is_some() && ws.date().is_some())
        .max_by_key(|ws| (ws.date(), ws.id))
}

/// The most recent completed max attempt of one lift. Ties on the date are
/// broken towards the highest id.
#[must_use]
pub fn latest_max(worksets: &[Workset], lift: Lift) -> Option<&Workset> {
    worksets
        .iter()
        .filter(|ws| ws.is_max && ws.lift == lift && ws.date().is_some())
        .max_by_key(|ws| (ws.date(), ws.id))
}

/// What comes next for an athlete: the successor of the most recently
/// completed cycle-tagged set (or the initial state for an empty history)
/// and the current 1RM estimates. Lifts without max-marked history are
/// absent from the result.
#[must_use]
pub fn estimate_next_cycle(worksets: &[Workset]) -> CycleEstimate {
    let current = latest_cycle(worksets).and_then(Workset::prescription);
    let (current_cycle, current_scheme) = current.map_or((-1, None), |p| (p.cycle, Some(p.scheme)));
    let transition = advance(current_scheme);

    let one_rep_maxes = Lift::iter()
        .filter_map(|lift| {
            let ws = latest_max(worksets, *lift)?;
            Some((*lift, ws.one_rep_max(Formula::Fusion)?))
        })
        .collect();

    CycleEstimate {
        cycle: current_cycle + transition.cycle_increment,
        scheme: transition.scheme,
        one_rep_maxes,
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Prescription, Reps, Weight, WorksetState};

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn completed(
        id: u128,
        lift: Lift,
        weight: f32,
        reps: u32,
        day: NaiveDate,
        is_max: bool,
        prescription: Option<Prescription>,
    ) -> Workset {
        Workset {
            id: id.into(),
            athlete: Name::new("irka").unwrap(),
            lift,
            weight: Weight::new(weight).unwrap(),
            is_max,
            state: WorksetState::Completed {
                date: day,
                reps: Reps::new(reps).unwrap(),
                prescription,
            },
        }
    }

    fn cycle_set(id: u128, day: NaiveDate, scheme: Scheme, cycle: i32) -> Workset {
        completed(
            id,
            Lift::Squat,
            60.0,
            5,
            day,
            false,
            Some(Prescription {
                base_max: 70.0,
                scheme,
                cycle,
            }),
        )
    }

    #[rstest]
    #[case(None, Scheme::Five, 0)]
    #[case(Some(Scheme::Five), Scheme::Three, 0)]
    #[case(Some(Scheme::Three), Scheme::One, 0)]
    #[case(Some(Scheme::One), Scheme::Deload, 0)]
    #[case(Some(Scheme::Deload), Scheme::Five, 1)]
    fn test_advance(
        #[case] current: Option<Scheme>,
        #[case] scheme: Scheme,
        #[case] cycle_increment: i32,
    ) {
        assert_eq!(
            advance(current),
            Transition {
                scheme,
                cycle_increment,
            }
        );
    }

    #[test]
    fn test_estimate_next_cycle_empty_history() {
        let estimate = estimate_next_cycle(&[]);

        assert_eq!(
            estimate,
            CycleEstimate {
                cycle: -1,
                scheme: Scheme::Five,
                one_rep_maxes: BTreeMap::new(),
            }
        );
    }

    #[test]
    fn test_estimate_next_cycle_ignores_planned_sets() {
        let planned = Workset {
            id: 1.into(),
            athlete: Name::new("irka").unwrap(),
            lift: Lift::Squat,
            weight: Weight::new(75.0).unwrap(),
            is_max: false,
            state: WorksetState::Planned {
                prescription: Prescription {
                    base_max: 100.0,
                    scheme: Scheme::Three,
                    cycle: 4,
                },
            },
        };

        let estimate = estimate_next_cycle(&[planned]);

        assert_eq!(estimate.cycle, -1);
        assert_eq!(estimate.scheme, Scheme::Five);
    }

    #[rstest]
    #[case(Scheme::Five, 2, Scheme::Three, 2)]
    #[case(Scheme::One, 2, Scheme::Deload, 2)]
    #[case(Scheme::Deload, 2, Scheme::Five, 3)]
    fn test_estimate_next_cycle_transitions(
        #[case] current_scheme: Scheme,
        #[case] current_cycle: i32,
        #[case] next_scheme: Scheme,
        #[case] next_cycle: i32,
    ) {
        let worksets = vec![
            cycle_set(1, date(2023, 1, 2), Scheme::Five, 0),
            cycle_set(2, date(2023, 3, 6), current_scheme, current_cycle),
        ];

        let estimate = estimate_next_cycle(&worksets);

        assert_eq!(estimate.scheme, next_scheme);
        assert_eq!(estimate.cycle, next_cycle);
    }

    #[test]
    fn test_estimate_next_cycle_date_tie_broken_by_highest_id() {
        let worksets = vec![
            cycle_set(2, date(2023, 3, 6), Scheme::Three, 1),
            cycle_set(1, date(2023, 3, 6), Scheme::Five, 1),
        ];

        let estimate = estimate_next_cycle(&worksets);

        assert_eq!(estimate.scheme, Scheme::One);
        assert_eq!(estimate.cycle, 1);
    }

    #[test]
    fn test_estimate_next_cycle_partial_max_history() {
        let worksets = vec![
            cycle_set(1, date(2023, 1, 2), Scheme::Five, 0),
            completed(2, Lift::Bench, 100.0, 5, date(2023, 1, 9), true, None),
            completed(3, Lift::Bench, 102.5, 5, date(2023, 1, 16), true, None),
            completed(4, Lift::Deadlift, 140.0, 3, date(2023, 1, 9), false, None),
        ];

        let estimate = estimate_next_cycle(&worksets);

        assert_eq!(
            estimate.one_rep_maxes.keys().collect::<Vec<_>>(),
            vec![&Lift::Bench]
        );
        assert_approx_eq!(estimate.one_rep_maxes[&Lift::Bench], 117.855_4, 1e-3);
    }

    #[test]
    fn test_latest_max_prefers_latest_date_then_highest_id() {
        let worksets = vec![
            completed(3, Lift::Bench, 90.0, 5, date(2023, 1, 9), true, None),
            completed(5, Lift::Bench, 100.0, 5, date(2023, 1, 16), true, None),
            completed(4, Lift::Bench, 95.0, 5, date(2023, 1, 16), true, None),
        ];

        let latest = latest_max(&worksets, Lift::Bench).unwrap();

        assert_eq!(latest.id, 5.into());
        assert_eq!(latest_max(&worksets, Lift::Squat), None);
    }
}
