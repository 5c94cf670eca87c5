//! Match-state to model-feature derivation for a 20-over chase.
//!
//! Overs arrive in cricket notation (`4.3` = 4 overs and 3 balls). Balls
//! bowled are taken as `trunc(overs * 6)`, the same conversion the model was
//! trained with, so out-of-notation values such as `4.7` are not corrected.

use serde::{Deserialize, Serialize};

pub const BALLS_PER_OVER: u32 = 6;
pub const INNINGS_OVERS: u32 = 20;
pub const INNINGS_BALLS: u32 = INNINGS_OVERS * BALLS_PER_OVER;
pub const MAX_WICKETS: u32 = 10;

/// Live state of the second innings, as entered on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub batting_team: String,
    pub bowling_team: String,
    #[serde(alias = "city")]
    pub host_city: String,
    /// Runs the batting side is chasing.
    pub target: u32,
    pub current_score: u32,
    /// Overs bowled in cricket notation, 0.0–20.0.
    pub overs_completed: f64,
    pub wickets_fallen: u32,
}

/// Model input record. Serialized field names are the ones the trained
/// pipeline expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub batting_team: String,
    pub bowling_team: String,
    #[serde(rename = "city")]
    pub host_city: String,
    pub runs_left: u32,
    pub balls_left: i32,
    #[serde(rename = "wickets")]
    pub wickets_in_hand: u32,
    #[serde(rename = "total_runs_x")]
    pub target: u32,
    #[serde(rename = "crr")]
    pub current_run_rate: f64,
    #[serde(rename = "rrr")]
    pub required_run_rate: f64,
}

impl FeatureVector {
    /// Categorical column by its model name.
    pub fn categorical(&self, column: &str) -> Option<&str> {
        match column {
            "batting_team" => Some(self.batting_team.as_str()),
            "bowling_team" => Some(self.bowling_team.as_str()),
            "city" => Some(self.host_city.as_str()),
            _ => None,
        }
    }

    /// Numeric column by its model name.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "runs_left" => Some(self.runs_left as f64),
            "balls_left" => Some(self.balls_left as f64),
            "wickets" => Some(self.wickets_in_hand as f64),
            "total_runs_x" => Some(self.target as f64),
            "crr" => Some(self.current_run_rate),
            "rrr" => Some(self.required_run_rate),
            _ => None,
        }
    }
}

/// Balls bowled so far for an overs value in cricket notation.
pub fn balls_bowled(overs_completed: f64) -> i32 {
    (overs_completed * BALLS_PER_OVER as f64).trunc() as i32
}

/// Derive the model features from a validated match state.
///
/// Never fails. Both rate features guard their own zero denominator: the
/// validator rejects zero overs, but zero balls left is a legal state at the
/// end of the innings.
pub fn derive(state: &MatchState) -> FeatureVector {
    let runs_left = state.target.saturating_sub(state.current_score);
    let balls_left = (INNINGS_BALLS as i32).saturating_sub(balls_bowled(state.overs_completed));
    let wickets_in_hand = MAX_WICKETS.saturating_sub(state.wickets_fallen);

    let current_run_rate = if state.overs_completed > 0.0 {
        state.current_score as f64 / state.overs_completed
    } else {
        0.0
    };
    let required_run_rate = if balls_left > 0 {
        runs_left as f64 * BALLS_PER_OVER as f64 / balls_left as f64
    } else {
        0.0
    };

    FeatureVector {
        batting_team: state.batting_team.clone(),
        bowling_team: state.bowling_team.clone(),
        host_city: state.host_city.clone(),
        runs_left,
        balls_left,
        wickets_in_hand,
        target: state.target,
        current_run_rate,
        required_run_rate,
    }
}
