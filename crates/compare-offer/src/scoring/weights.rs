use std::fmt;

use serde::{Deserialize, Serialize};

/// Weight applied to each scoring dimension.
///
/// Weights are non-negative and finite but are not required to sum to one; the engine
/// computes a plain weighted sum. Use [`WeightConfiguration::normalized`] when a 0..=1
/// score range is needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawWeights")]
pub struct WeightConfiguration {
    salary: f64,
    work_mode: f64,
    location: f64,
}

/// Weights a comparison starts from and returns to on reset.
pub const DEFAULT_WEIGHTS: WeightConfiguration = WeightConfiguration {
    salary: 0.6,
    work_mode: 0.25,
    location: 0.15,
};

impl WeightConfiguration {
    pub fn new(salary: f64, work_mode: f64, location: f64) -> Result<Self, WeightError> {
        for (dimension, value) in [
            (WeightDimension::Salary, salary),
            (WeightDimension::WorkMode, work_mode),
            (WeightDimension::Location, location),
        ] {
            if !value.is_finite() {
                return Err(WeightError::NotFinite { dimension });
            }
            if value < 0.0 {
                return Err(WeightError::Negative { dimension, value });
            }
        }

        Ok(Self {
            salary,
            work_mode,
            location,
        })
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn work_mode(&self) -> f64 {
        self.work_mode
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    pub fn sum(&self) -> f64 {
        self.salary + self.work_mode + self.location
    }

    /// Rescale so the weights sum to one. An all-zero triple falls back to the defaults.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum <= 0.0 {
            return DEFAULT_WEIGHTS;
        }

        Self {
            salary: self.salary / sum,
            work_mode: self.work_mode / sum,
            location: self.location / sum,
        }
    }
}

impl Default for WeightConfiguration {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawWeights {
    salary: f64,
    work_mode: f64,
    location: f64,
}

impl TryFrom<RawWeights> for WeightConfiguration {
    type Error = WeightError;

    fn try_from(raw: RawWeights) -> Result<Self, Self::Error> {
        WeightConfiguration::new(raw.salary, raw.work_mode, raw.location)
    }
}

/// The three scored attributes of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeightDimension {
    Salary,
    WorkMode,
    Location,
}

impl WeightDimension {
    pub const fn label(self) -> &'static str {
        match self {
            WeightDimension::Salary => "Salary",
            WeightDimension::WorkMode => "Work mode",
            WeightDimension::Location => "Location",
        }
    }
}

impl fmt::Display for WeightDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("{dimension} weight must be non-negative (got {value})")]
    Negative {
        dimension: WeightDimension,
        value: f64,
    },
    #[error("{dimension} weight must be a finite number")]
    NotFinite { dimension: WeightDimension },
}

/// Slider linkage: pin one dimension to `value` and share the remainder between the other
/// two in proportion to their previous weights, so the triple sums to one.
///
/// `value` is clamped to `0.0..=1.0`; NaN is treated as zero. When both remaining weights
/// were zero the remainder is split evenly.
pub fn redistribute(
    changed: WeightDimension,
    value: f64,
    previous: &WeightConfiguration,
) -> WeightConfiguration {
    let value = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    };
    let rest = 1.0 - value;

    let (first, second) = match changed {
        WeightDimension::Salary => (previous.work_mode, previous.location),
        WeightDimension::WorkMode => (previous.salary, previous.location),
        WeightDimension::Location => (previous.salary, previous.work_mode),
    };

    let pool = first + second;
    let (first, second) = if pool > 0.0 {
        (rest * first / pool, rest * second / pool)
    } else {
        (rest / 2.0, rest / 2.0)
    };

    match changed {
        WeightDimension::Salary => WeightConfiguration {
            salary: value,
            work_mode: first,
            location: second,
        },
        WeightDimension::WorkMode => WeightConfiguration {
            salary: first,
            work_mode: value,
            location: second,
        },
        WeightDimension::Location => WeightConfiguration {
            salary: first,
            work_mode: second,
            location: value,
        },
    }
}
