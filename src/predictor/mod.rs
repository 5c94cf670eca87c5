pub mod features;
pub mod oracle;
pub mod presenter;
pub mod validation;

pub use features::{derive, FeatureVector, MatchState};
pub use oracle::{ClassProbabilities, LogisticPipeline, OracleError, ProbabilityOracle};
pub use presenter::PredictionResult;
pub use validation::{validate, ValidationError};

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("prediction failed: {0}")]
    Oracle(#[from] OracleError),
}

/// validate → derive → oracle → present, for one form submission.
#[derive(Clone)]
pub struct Predictor {
    oracle: Arc<dyn ProbabilityOracle>,
}

impl Predictor {
    pub fn new(oracle: Arc<dyn ProbabilityOracle>) -> Self {
        Predictor { oracle }
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    pub fn predict(&self, state: &MatchState) -> Result<PredictionResult, PredictError> {
        if let Err(e) = validate(state) {
            debug!("Rejected match state: {}", e);
            return Err(e.into());
        }

        let features = derive(state);
        let probs = self.oracle.predict_proba(&features)?;
        let result = PredictionResult::new(&state.batting_team, &state.bowling_team, probs);

        info!(
            "{} chasing {} ({}/{} after {:.1} ov) vs {}: {}% / {}%",
            state.batting_team,
            state.target,
            state.current_score,
            state.wickets_fallen,
            state.overs_completed,
            state.bowling_team,
            result.batting_percent(),
            result.bowling_percent(),
        );
        Ok(result)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Mutex;

    /// Oracle stub returning a fixed win probability and recording its inputs.
    pub(crate) struct FixedOracle {
        pub win: f64,
        pub seen: Mutex<Vec<FeatureVector>>,
    }

    impl FixedOracle {
        pub fn new(win: f64) -> Self {
            FixedOracle {
                win,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProbabilityOracle for FixedOracle {
        fn predict_proba(&self, features: &FeatureVector) -> Result<ClassProbabilities, OracleError> {
            self.seen.lock().unwrap().push(features.clone());
            if !self.win.is_finite() {
                return Err(OracleError::NonFinite);
            }
            Ok(ClassProbabilities {
                loss: 1.0 - self.win,
                win: self.win,
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    pub(crate) fn sample_state() -> MatchState {
        MatchState {
            batting_team: "Royal Challengers Bangalore".into(),
            bowling_team: "Sunrisers Hyderabad".into(),
            host_city: "Bangalore".into(),
            target: 150,
            current_score: 80,
            overs_completed: 10.0,
            wickets_fallen: 2,
        }
    }

    #[test]
    fn passes_derived_features_to_oracle() {
        let oracle = Arc::new(FixedOracle::new(0.64));
        let predictor = Predictor::new(oracle.clone());

        let result = predictor.predict(&sample_state()).unwrap();
        assert_relative_eq!(result.batting_win_probability, 0.64, epsilon = 1e-12);
        assert_eq!(result.lines()[0], "Royal Challengers Bangalore Win Probability: 64%");
        assert_eq!(result.lines()[1], "Sunrisers Hyderabad Win Probability: 36%");

        let seen = oracle.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].runs_left, 70);
        assert_eq!(seen[0].balls_left, 60);
        assert_eq!(seen[0].wickets_in_hand, 8);
    }

    #[test]
    fn validation_failure_never_reaches_oracle() {
        let oracle = Arc::new(FixedOracle::new(0.5));
        let predictor = Predictor::new(oracle.clone());

        let mut state = sample_state();
        state.overs_completed = 0.0;
        let err = predictor.predict(&state).unwrap_err();
        assert!(matches!(err, PredictError::Invalid(ValidationError::ZeroOvers)));

        let mut state = sample_state();
        state.current_score = 151;
        let err = predictor.predict(&state).unwrap_err();
        assert!(matches!(
            err,
            PredictError::Invalid(ValidationError::ScoreExceedsTarget)
        ));
        assert_eq!(err.to_string(), "Score cannot be greater than target.");

        assert!(oracle.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn oracle_failure_is_surfaced() {
        let predictor = Predictor::new(Arc::new(FixedOracle::new(f64::NAN)));
        let err = predictor.predict(&sample_state()).unwrap_err();
        assert!(matches!(err, PredictError::Oracle(OracleError::NonFinite)));
    }

    #[test]
    fn end_of_innings_reaches_oracle_with_zero_rrr() {
        let oracle = Arc::new(FixedOracle::new(0.1));
        let predictor = Predictor::new(oracle.clone());

        let mut state = sample_state();
        state.overs_completed = 20.0;
        state.current_score = 140;
        predictor.predict(&state).unwrap();

        let seen = oracle.seen.lock().unwrap();
        assert_eq!(seen[0].balls_left, 0);
        assert_eq!(seen[0].required_run_rate, 0.0);
    }

    #[test]
    fn bundled_pipeline_gives_complementary_pair() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/models/pipe.json");
        let pipeline = LogisticPipeline::load(path).unwrap();
        let predictor = Predictor::new(Arc::new(pipeline));
        assert_eq!(predictor.oracle_name(), "ipl-chase-logreg");

        let result = predictor.predict(&sample_state()).unwrap();
        assert!((0.0..=1.0).contains(&result.batting_win_probability));
        assert_relative_eq!(
            result.batting_win_probability + result.bowling_win_probability,
            1.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn bundled_pipeline_favours_easier_chase() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/models/pipe.json");
        let predictor = Predictor::new(Arc::new(LogisticPipeline::load(path).unwrap()));

        let mut easy = sample_state();
        easy.current_score = 140;
        let mut hard = sample_state();
        hard.current_score = 40;
        hard.wickets_fallen = 7;

        let p_easy = predictor.predict(&easy).unwrap().batting_win_probability;
        let p_hard = predictor.predict(&hard).unwrap().batting_win_probability;
        assert!(p_easy > p_hard, "easy {p_easy:.3} should beat hard {p_hard:.3}");
    }
}
