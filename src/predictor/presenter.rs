use serde::Serialize;

use super::oracle::ClassProbabilities;

/// Win probabilities for both sides of one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub batting_team: String,
    pub bowling_team: String,
    pub batting_win_probability: f64,
    pub bowling_win_probability: f64,
}

impl PredictionResult {
    /// The oracle's win class belongs to the batting side, loss to the bowling side.
    pub fn new(batting_team: &str, bowling_team: &str, probs: ClassProbabilities) -> Self {
        PredictionResult {
            batting_team: batting_team.to_string(),
            bowling_team: bowling_team.to_string(),
            batting_win_probability: probs.win,
            bowling_win_probability: probs.loss,
        }
    }

    pub fn batting_percent(&self) -> u32 {
        whole_percent(self.batting_win_probability)
    }

    pub fn bowling_percent(&self) -> u32 {
        whole_percent(self.bowling_win_probability)
    }

    /// Display lines, batting side first.
    pub fn lines(&self) -> [String; 2] {
        [
            format!("{} Win Probability: {}%", self.batting_team, self.batting_percent()),
            format!("{} Win Probability: {}%", self.bowling_team, self.bowling_percent()),
        ]
    }
}

/// Halves go to the even neighbour, so 12.5% shows as 12%.
fn whole_percent(p: f64) -> u32 {
    (p.clamp(0.0, 1.0) * 100.0).round_ties_even() as u32
}
