//! Offer scoring engine.
//!
//! Every function here is pure: an offer's score depends only on the offer and the weights,
//! never on which other offers are being compared.

mod rules;
mod weights;

pub use rules::{normalize_salary, score_location, score_work_mode, SALARY_CAP};
pub use weights::{
    redistribute, WeightConfiguration, WeightDimension, WeightError, DEFAULT_WEIGHTS,
};

use serde::Serialize;

use crate::offers::domain::Offer;

/// Weighted sum of the three normalized sub-scores.
pub fn compute_score(offer: &Offer, weights: &WeightConfiguration) -> f64 {
    normalize_salary(offer.salary) * weights.salary()
        + score_work_mode(offer.work_mode) * weights.work_mode()
        + score_location(offer.location.as_deref()) * weights.location()
}

/// Same total as [`compute_score`] plus the per-dimension contributions.
pub fn score_offer(offer: &Offer, weights: &WeightConfiguration) -> ScoreBreakdown {
    let components = vec![
        ScoreComponent::new(
            WeightDimension::Salary,
            normalize_salary(offer.salary),
            weights.salary(),
        ),
        ScoreComponent::new(
            WeightDimension::WorkMode,
            score_work_mode(offer.work_mode),
            weights.work_mode(),
        ),
        ScoreComponent::new(
            WeightDimension::Location,
            score_location(offer.location.as_deref()),
            weights.location(),
        ),
    ];

    ScoreBreakdown {
        total: compute_score(offer, weights),
        components,
    }
}

/// One dimension's share of an offer score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponent {
    pub dimension: WeightDimension,
    pub normalized: f64,
    pub weight: f64,
    pub contribution: f64,
}

impl ScoreComponent {
    fn new(dimension: WeightDimension, normalized: f64, weight: f64) -> Self {
        Self {
            dimension,
            normalized,
            weight,
            contribution: normalized * weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub total: f64,
    pub components: Vec<ScoreComponent>,
}
