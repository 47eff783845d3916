use serde::Serialize;

use super::session::{ComparisonSession, RankedOffer};
use crate::offers::domain::{OfferId, WorkMode};
use crate::scoring::{ScoreBreakdown, WeightConfiguration};

/// Serializable snapshot of a comparison, as returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    pub weights: WeightConfiguration,
    pub ranked: Vec<RankedOfferView>,
    pub best_offer: Option<RankedOfferView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_ids: Vec<OfferId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedOfferView {
    pub rank: usize,
    pub offer_id: OfferId,
    pub company: String,
    pub title: String,
    pub work_mode: WorkMode,
    pub work_mode_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl RankedOfferView {
    fn from_ranked(rank: usize, entry: RankedOffer<'_>) -> Self {
        let offer = entry.offer;
        Self {
            rank,
            offer_id: offer.id.clone(),
            company: offer.company.clone(),
            title: offer.title.clone(),
            work_mode: offer.work_mode,
            work_mode_label: offer.work_mode.label(),
            salary: offer.salary,
            location: offer.location.clone(),
            score: entry.score,
            breakdown: entry.breakdown,
        }
    }
}

impl ComparisonView {
    /// Snapshot the session; the best offer is the first ranked entry.
    pub fn from_session(session: &ComparisonSession<'_>, ignored_ids: Vec<OfferId>) -> Self {
        let ranked: Vec<RankedOfferView> = session
            .rank_selected()
            .into_iter()
            .enumerate()
            .map(|(position, entry)| RankedOfferView::from_ranked(position + 1, entry))
            .collect();
        let best_offer = ranked.first().cloned();

        Self {
            weights: *session.weights(),
            ranked,
            best_offer,
            ignored_ids,
        }
    }
}
