use thiserror::Error;

use crate::catalog::{is_known_city, is_known_team};

use super::features::{MatchState, INNINGS_OVERS, MAX_WICKETS};

/// Input rejected before any feature is derived. The user can correct the
/// form and try again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Overs cannot be zero.")]
    ZeroOvers,

    #[error("Score cannot be greater than target.")]
    ScoreExceedsTarget,

    #[error("Target must be at least 1.")]
    TargetOutOfRange,

    #[error("Overs must be between 0.0 and 20.0.")]
    OversOutOfRange,

    #[error("Wickets lost must be between 0 and 10.")]
    WicketsOutOfRange,

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Unknown host city: {0}")]
    UnknownCity(String),

    #[error("Batting and bowling team must be different.")]
    SameTeams,
}

impl ValidationError {
    /// Stable machine-readable kind for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::ZeroOvers => "zero_overs",
            ValidationError::ScoreExceedsTarget => "score_exceeds_target",
            ValidationError::TargetOutOfRange => "target_out_of_range",
            ValidationError::OversOutOfRange => "overs_out_of_range",
            ValidationError::WicketsOutOfRange => "wickets_out_of_range",
            ValidationError::UnknownTeam(_) => "unknown_team",
            ValidationError::UnknownCity(_) => "unknown_city",
            ValidationError::SameTeams => "same_teams",
        }
    }
}

/// Check a match state. Rules run in a fixed order and the first failure wins.
pub fn validate(state: &MatchState) -> Result<(), ValidationError> {
    if state.overs_completed == 0.0 {
        return Err(ValidationError::ZeroOvers);
    }
    if state.current_score > state.target {
        return Err(ValidationError::ScoreExceedsTarget);
    }

    // Ranges the form widgets enforce; JSON callers bypass them.
    if state.target < 1 {
        return Err(ValidationError::TargetOutOfRange);
    }
    if !state.overs_completed.is_finite()
        || !(0.0..=INNINGS_OVERS as f64).contains(&state.overs_completed)
    {
        return Err(ValidationError::OversOutOfRange);
    }
    if state.wickets_fallen > MAX_WICKETS {
        return Err(ValidationError::WicketsOutOfRange);
    }

    for team in [&state.batting_team, &state.bowling_team] {
        if !is_known_team(team) {
            return Err(ValidationError::UnknownTeam(team.clone()));
        }
    }
    if !is_known_city(&state.host_city) {
        return Err(ValidationError::UnknownCity(state.host_city.clone()));
    }
    if state.batting_team == state.bowling_team {
        return Err(ValidationError::SameTeams);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(target: u32, score: u32, overs: f64, wickets: u32) -> MatchState {
        MatchState {
            batting_team: "Kolkata Knight Riders".into(),
            bowling_team: "Rajasthan Royals".into(),
            host_city: "Kolkata".into(),
            target,
            current_score: score,
            overs_completed: overs,
            wickets_fallen: wickets,
        }
    }

    #[test]
    fn accepts_ordinary_state() {
        assert_eq!(validate(&state(150, 80, 10.0, 2)), Ok(()));
    }

    #[test]
    fn zero_overs_rejected_for_any_score() {
        for (target, score, wickets) in [(150, 0, 0), (1, 1, 10), (200, 250, 3)] {
            assert_eq!(
                validate(&state(target, score, 0.0, wickets)),
                Err(ValidationError::ZeroOvers)
            );
        }
    }

    #[test]
    fn score_above_target_rejected() {
        assert_eq!(
            validate(&state(100, 101, 12.0, 4)),
            Err(ValidationError::ScoreExceedsTarget)
        );
        // still the reported error when later rules would also fail
        let mut s = state(100, 101, 25.0, 11);
        s.bowling_team = s.batting_team.clone();
        assert_eq!(validate(&s), Err(ValidationError::ScoreExceedsTarget));
    }

    #[test]
    fn score_equal_to_target_accepted() {
        assert_eq!(validate(&state(100, 100, 12.0, 4)), Ok(()));
    }

    #[test]
    fn all_out_accepted() {
        assert_eq!(validate(&state(100, 60, 12.0, 10)), Ok(()));
    }

    #[test]
    fn out_of_notation_overs_accepted() {
        assert_eq!(validate(&state(100, 60, 4.7, 2)), Ok(()));
        assert_eq!(validate(&state(100, 60, 20.0, 2)), Ok(()));
    }

    #[test]
    fn range_checks() {
        assert_eq!(
            validate(&state(0, 0, 3.0, 0)),
            Err(ValidationError::TargetOutOfRange)
        );
        assert_eq!(
            validate(&state(150, 10, 20.1, 0)),
            Err(ValidationError::OversOutOfRange)
        );
        assert_eq!(
            validate(&state(150, 10, -1.0, 0)),
            Err(ValidationError::OversOutOfRange)
        );
        assert_eq!(
            validate(&state(150, 10, f64::NAN, 0)),
            Err(ValidationError::OversOutOfRange)
        );
        assert_eq!(
            validate(&state(150, 10, 3.0, 11)),
            Err(ValidationError::WicketsOutOfRange)
        );
    }

    #[test]
    fn catalog_membership() {
        let mut s = state(150, 10, 3.0, 0);
        s.bowling_team = "Deccan Chargers".into();
        assert_eq!(
            validate(&s),
            Err(ValidationError::UnknownTeam("Deccan Chargers".into()))
        );

        let mut s = state(150, 10, 3.0, 0);
        s.host_city = "Lahore".into();
        assert_eq!(validate(&s), Err(ValidationError::UnknownCity("Lahore".into())));
    }

    #[test]
    fn same_team_on_both_sides_rejected() {
        let mut s = state(150, 10, 3.0, 0);
        s.bowling_team = s.batting_team.clone();
        assert_eq!(validate(&s), Err(ValidationError::SameTeams));
    }

    #[test]
    fn messages_and_kinds() {
        assert_eq!(ValidationError::ZeroOvers.to_string(), "Overs cannot be zero.");
        assert_eq!(
            ValidationError::ScoreExceedsTarget.to_string(),
            "Score cannot be greater than target."
        );
        assert_eq!(
            ValidationError::OversOutOfRange.to_string(),
            "Overs must be between 0.0 and 20.0."
        );
        assert_eq!(ValidationError::SameTeams.kind(), "same_teams");
    }
}
