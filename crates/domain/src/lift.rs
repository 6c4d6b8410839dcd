use std::{fmt, slice::Iter, str::FromStr};

/// The four barbell lifts tracked by the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Lift {
    Squat,
    Bench,
    Deadlift,
    Military,
}

impl Lift {
    pub fn iter() -> Iter<'static, Lift> {
        static LIFTS: [Lift; 4] = [Lift::Squat, Lift::Bench, Lift::Deadlift, Lift::Military];
        LIFTS.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Lift::Squat => "squat",
            Lift::Bench => "bench",
            Lift::Deadlift => "deadlift",
            Lift::Military => "military",
        }
    }
}

impl fmt::Display for Lift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Lift {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "squat" => Ok(Lift::Squat),
            "bench" => Ok(Lift::Bench),
            "deadlift" => Ok(Lift::Deadlift),
            "military" | "military press" | "press" => Ok(Lift::Military),
            _ => Err(LiftError::Unknown(s.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LiftError {
    #[error("unknown lift: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_lift_iter() {
        assert_eq!(Lift::iter().count(), 4);
        assert_eq!(Lift::iter().next(), Some(&Lift::Squat));
    }

    #[rstest]
    #[case(Lift::Squat, "squat")]
    #[case(Lift::Bench, "bench")]
    #[case(Lift::Deadlift, "deadlift")]
    #[case(Lift::Military, "military")]
    fn test_lift_display(#[case] lift: Lift, #[case] expected: &str) {
        assert_eq!(lift.to_string(), expected);
    }

    #[rstest]
    #[case("squat", Ok(Lift::Squat))]
    #[case("  Bench ", Ok(Lift::Bench))]
    #[case("deadlift", Ok(Lift::Deadlift))]
    #[case("military", Ok(Lift::Military))]
    #[case("military press", Ok(Lift::Military))]
    #[case("curl", Err(LiftError::Unknown("curl".to_string())))]
    fn test_lift_from_str(#[case] value: &str, #[case] expected: Result<Lift, LiftError>) {
        assert_eq!(value.parse(), expected);
    }
}
