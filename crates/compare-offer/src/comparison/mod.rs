//! Comparison session: selection management, ranking and best-offer designation.

mod session;
mod view;

pub use session::{ComparisonSession, RankedOffer};
pub use view::{ComparisonView, RankedOfferView};
