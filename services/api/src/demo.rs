use crate::infra::{StaticSessionProvider, CLI_OWNER};
use clap::Args;
use compare_offer::comparison::ComparisonSession;
use compare_offer::error::AppError;
use compare_offer::offers::{
    InMemoryOfferRepository, Offer, OfferDraft, OfferService, OwnerId, WorkMode,
};
use compare_offer::scoring::{WeightConfiguration, WeightDimension, DEFAULT_WEIGHTS};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// JSON file holding an array of offers (company, title, salary, location, workMode)
    #[arg(long)]
    pub(crate) offers: PathBuf,
    /// 1-based positions of the offers to compare. Defaults to every offer in the file.
    #[arg(long, value_delimiter = ',')]
    pub(crate) select: Vec<usize>,
    /// Salary weight (defaults to 0.6)
    #[arg(long)]
    pub(crate) salary_weight: Option<f64>,
    /// Work mode weight (defaults to 0.25)
    #[arg(long)]
    pub(crate) work_mode_weight: Option<f64>,
    /// Location weight (defaults to 0.15)
    #[arg(long)]
    pub(crate) location_weight: Option<f64>,
    /// Rescale the weights to sum to one so scores stay within 0..1
    #[arg(long)]
    pub(crate) normalize: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Where to move the salary slider for the second ranking
    #[arg(long, default_value_t = 0.3)]
    pub(crate) salary_weight: f64,
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let CompareArgs {
        offers,
        select,
        salary_weight,
        work_mode_weight,
        location_weight,
        normalize,
    } = args;

    let raw = std::fs::read_to_string(&offers)?;
    let drafts: Vec<OfferDraft> = serde_json::from_str(&raw)?;
    let stored = store_drafts(drafts)?;

    let weights = WeightConfiguration::new(
        salary_weight.unwrap_or(DEFAULT_WEIGHTS.salary()),
        work_mode_weight.unwrap_or(DEFAULT_WEIGHTS.work_mode()),
        location_weight.unwrap_or(DEFAULT_WEIGHTS.location()),
    )?;
    let weights = if normalize {
        weights.normalized()
    } else {
        weights
    };

    let mut session = ComparisonSession::with_weights(&stored, weights);
    select_positions(&mut session, &stored, &select)?;

    println!(
        "Comparing {} of {} offers from {}",
        session.selected_ids().len(),
        stored.len(),
        offers.display()
    );
    render_ranking(&session);
    Ok(())
}

/// Select offers by 1-based position; every offer when no positions are given.
fn select_positions(
    session: &mut ComparisonSession<'_>,
    stored: &[Offer],
    positions: &[usize],
) -> Result<(), AppError> {
    if positions.is_empty() {
        session.preselect_leading(stored.len());
        return Ok(());
    }

    for &position in positions {
        let offer = position
            .checked_sub(1)
            .and_then(|index| stored.get(index))
            .ok_or(AppError::InvalidSelection {
                position,
                total: stored.len(),
            })?;
        session.select_offer(&offer.id);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let stored = store_drafts(sample_portfolio())?;
    let mut session = ComparisonSession::new(&stored);
    session.preselect_leading(stored.len());

    println!("CompareOffer demo: {} sample offers", stored.len());
    println!("\nDefault weights");
    render_ranking(&session);

    session.adjust_weight(WeightDimension::Salary, args.salary_weight);
    println!("\nAfter moving the salary slider to {:.2}", args.salary_weight);
    render_ranking(&session);
    Ok(())
}

/// Store drafts for the CLI owner and return them in input order.
fn store_drafts(drafts: Vec<OfferDraft>) -> Result<Vec<Offer>, AppError> {
    let service = OfferService::new(
        Arc::new(InMemoryOfferRepository::default()),
        Arc::new(StaticSessionProvider::default()),
    );
    let owner = OwnerId(CLI_OWNER.to_string());

    drafts
        .into_iter()
        .map(|draft| service.create(&owner, draft).map_err(AppError::from))
        .collect()
}

fn render_ranking(session: &ComparisonSession<'_>) {
    let weights = session.weights();
    println!(
        "Weights: salary {:.2} | work mode {:.2} | location {:.2}",
        weights.salary(),
        weights.work_mode(),
        weights.location()
    );

    let ranked = session.rank_selected();
    if ranked.is_empty() {
        println!("  No offers selected.");
        return;
    }

    for (position, entry) in ranked.iter().enumerate() {
        let offer = entry.offer;
        println!(
            "  {}. {} ({}) score {:.3}",
            position + 1,
            offer.company,
            offer.title,
            entry.score
        );
        println!(
            "     {} | {} | {}",
            offer
                .salary
                .map(|salary| format!("{salary:.0} / month"))
                .unwrap_or_else(|| "salary n/a".to_string()),
            offer.work_mode.label(),
            offer.location.as_deref().unwrap_or("location n/a")
        );
        for component in &entry.breakdown.components {
            println!(
                "       - {}: {:.2} x {:.2} = {:.3}",
                component.dimension, component.normalized, component.weight, component.contribution
            );
        }
    }

    if let Some(best) = ranked.first() {
        println!("Best offer: {} ({})", best.offer.company, best.offer.title);
    }
}

fn sample_portfolio() -> Vec<OfferDraft> {
    let offer = |company: &str, title: &str, salary: Option<f64>, work_mode, location: &str| {
        OfferDraft {
            company: company.to_string(),
            title: title.to_string(),
            salary,
            location: Some(location.to_string()),
            work_mode,
            notes: None,
        }
    };

    vec![
        offer("Monday.com", "Senior Backend Engineer", Some(38_000.0), WorkMode::Hybrid, "Tel Aviv"),
        offer("Elbit Systems", "Embedded Engineer", Some(31_000.0), WorkMode::Onsite, "Haifa, North"),
        offer("Snyk", "Platform Engineer", Some(27_000.0), WorkMode::Remote, "Center"),
        offer("Teva", "Data Engineer", Some(33_000.0), WorkMode::Onsite, "Petah Tikva, Center"),
    ]
}
