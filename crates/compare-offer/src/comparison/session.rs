use std::collections::HashMap;

use crate::offers::domain::{Offer, OfferId};
use crate::scoring::{
    redistribute, score_offer, ScoreBreakdown, WeightConfiguration, WeightDimension,
    DEFAULT_WEIGHTS,
};

/// Client-held comparison state: which offers are selected and the active weights.
///
/// The offer collection is borrowed read-only; selection order is kept so ties rank
/// first-selected-first.
pub struct ComparisonSession<'a> {
    offers: &'a [Offer],
    index: HashMap<&'a OfferId, &'a Offer>,
    selected: Vec<OfferId>,
    weights: WeightConfiguration,
}

/// A selected offer with its score under the session's weights.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedOffer<'a> {
    pub offer: &'a Offer,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

impl<'a> ComparisonSession<'a> {
    pub fn new(offers: &'a [Offer]) -> Self {
        Self::with_weights(offers, DEFAULT_WEIGHTS)
    }

    pub fn with_weights(offers: &'a [Offer], weights: WeightConfiguration) -> Self {
        let index = offers.iter().map(|offer| (&offer.id, offer)).collect();
        Self {
            offers,
            index,
            selected: Vec::new(),
            weights,
        }
    }

    pub fn weights(&self) -> &WeightConfiguration {
        &self.weights
    }

    pub fn selected_ids(&self) -> &[OfferId] {
        &self.selected
    }

    pub fn is_selected(&self, id: &OfferId) -> bool {
        self.selected.contains(id)
    }

    /// Add `id` to the selection. Returns `false` when the id is not part of this
    /// session's offers; selecting an already-selected offer is a no-op.
    pub fn select_offer(&mut self, id: &OfferId) -> bool {
        if !self.index.contains_key(id) {
            return false;
        }
        if !self.is_selected(id) {
            self.selected.push(id.clone());
        }
        true
    }

    /// Remove `id` from the selection; a no-op when it was not selected.
    pub fn deselect_offer(&mut self, id: &OfferId) {
        self.selected.retain(|selected| selected != id);
    }

    pub fn toggle(&mut self, id: &OfferId, checked: bool) -> bool {
        if checked {
            self.select_offer(id)
        } else {
            self.deselect_offer(id);
            true
        }
    }

    /// Select the first `count` offers in collection order.
    pub fn preselect_leading(&mut self, count: usize) {
        let offers = self.offers;
        for offer in offers.iter().take(count) {
            self.select_offer(&offer.id);
        }
    }

    pub fn set_weights(&mut self, weights: WeightConfiguration) {
        self.weights = weights;
    }

    /// Move one slider and rebalance the other two dimensions.
    pub fn adjust_weight(&mut self, dimension: WeightDimension, value: f64) {
        self.weights = redistribute(dimension, value, &self.weights);
    }

    pub fn reset_weights(&mut self) {
        self.weights = DEFAULT_WEIGHTS;
    }

    /// Selected offers ordered by score, highest first. Equal scores keep selection order.
    pub fn rank_selected(&self) -> Vec<RankedOffer<'a>> {
        let mut ranked: Vec<RankedOffer<'a>> = self
            .selected
            .iter()
            .filter_map(|id| self.index.get(id).copied())
            .map(|offer| {
                let breakdown = score_offer(offer, &self.weights);
                RankedOffer {
                    offer,
                    score: breakdown.total,
                    breakdown,
                }
            })
            .collect();

        // sort_by is stable
        ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
        ranked
    }

    pub fn best_offer(&self) -> Option<RankedOffer<'a>> {
        self.rank_selected().into_iter().next()
    }
}
