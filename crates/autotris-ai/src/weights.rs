use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::placement_analysis::PlacementFeatures;

/// Coefficients of the linear placement score.
///
/// Any real value is accepted, including ones that invert a heuristic.
/// Missing fields in a serialized form fall back to [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationWeights {
    pub hole: f64,
    pub landing_height: f64,
    pub lines_cleared: f64,
    pub bumpiness: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            hole: -5.0,
            landing_height: -1.0,
            lines_cleared: 10.0,
            bumpiness: -2.0,
        }
    }
}

impl EvaluationWeights {
    #[must_use]
    pub const fn new(hole: f64, landing_height: f64, lines_cleared: f64, bumpiness: f64) -> Self {
        Self {
            hole,
            landing_height,
            lines_cleared,
            bumpiness,
        }
    }

    /// Weighted sum of the features. No normalization is applied.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn score(&self, features: &PlacementFeatures) -> f64 {
        self.hole * features.holes as f64
            + self.landing_height * features.landing_height as f64
            + self.lines_cleared * features.lines_cleared as f64
            + self.bumpiness * features.bumpiness as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseWeightsError {
    #[display("expected 4 comma-separated weights (hole,height,lines,bumpiness), got {count}")]
    WrongCount { count: usize },
    #[display("invalid weight '{value}'")]
    InvalidNumber { value: String },
}

/// Parses `"hole,height,lines,bumpiness"`, e.g. `"-5,-1,10,-2"`.
impl FromStr for EvaluationWeights {
    type Err = ParseWeightsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|value| {
                let value = value.trim();
                value
                    .parse::<f64>()
                    .map_err(|_| ParseWeightsError::InvalidNumber {
                        value: value.to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let [hole, landing_height, lines_cleared, bumpiness] = values[..] else {
            return Err(ParseWeightsError::WrongCount {
                count: values.len(),
            });
        };
        Ok(Self::new(hole, landing_height, lines_cleared, bumpiness))
    }
}
