use crate::offers::domain::WorkMode;

/// Salaries at or above this value score the full salary component.
pub const SALARY_CAP: f64 = 40_000.0;

const LOCATION_MISSING_SCORE: f64 = 0.4;
const LOCATION_FALLBACK_SCORE: f64 = 0.5;

/// Ordered location bands; the first band with a matching needle wins.
const LOCATION_RULES: &[(&[&str], f64)] = &[
    (&["tel aviv"], 1.0),
    (&["center"], 0.8),
    (&["north", "south"], 0.6),
];

/// Map a salary onto `0.0..=1.0` against [`SALARY_CAP`].
///
/// Missing, zero, negative and NaN salaries score zero.
pub fn normalize_salary(salary: Option<f64>) -> f64 {
    match salary {
        Some(value) if value > 0.0 => value.min(SALARY_CAP) / SALARY_CAP,
        _ => 0.0,
    }
}

pub fn score_work_mode(mode: WorkMode) -> f64 {
    match mode {
        WorkMode::Remote => 1.0,
        WorkMode::Hybrid => 0.7,
        WorkMode::Onsite => 0.4,
    }
}

/// Case-insensitive substring match against the location bands.
pub fn score_location(location: Option<&str>) -> f64 {
    let Some(location) = location.filter(|value| !value.is_empty()) else {
        return LOCATION_MISSING_SCORE;
    };

    let lower = location.to_lowercase();
    LOCATION_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lower.contains(needle)))
        .map(|(_, score)| *score)
        .unwrap_or(LOCATION_FALLBACK_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_non_positive_salary_scores_zero() {
        assert_eq!(normalize_salary(None), 0.0);
        assert_eq!(normalize_salary(Some(0.0)), 0.0);
        assert_eq!(normalize_salary(Some(-12_000.0)), 0.0);
        assert_eq!(normalize_salary(Some(f64::NAN)), 0.0);
    }

    #[test]
    fn salary_at_or_above_cap_scores_one() {
        assert_eq!(normalize_salary(Some(SALARY_CAP)), 1.0);
        assert_eq!(normalize_salary(Some(55_000.0)), 1.0);
        assert_eq!(normalize_salary(Some(f64::INFINITY)), 1.0);
    }

    #[test]
    fn salary_score_is_monotonic_up_to_cap() {
        let mut previous = 0.0;
        for step in 0..=80 {
            let salary = step as f64 * 500.0;
            let score = normalize_salary(Some(salary));
            assert!(score >= previous, "score dropped at salary {salary}");
            assert!((0.0..=1.0).contains(&score));
            previous = score;
        }
        assert_eq!(normalize_salary(Some(20_000.0)), 0.5);
    }

    #[test]
    fn work_mode_table_orders_remote_first() {
        assert_eq!(score_work_mode(WorkMode::Remote), 1.0);
        assert_eq!(score_work_mode(WorkMode::Hybrid), 0.7);
        assert_eq!(score_work_mode(WorkMode::Onsite), 0.4);
        assert!(score_work_mode(WorkMode::Remote) > score_work_mode(WorkMode::Hybrid));
        assert!(score_work_mode(WorkMode::Hybrid) > score_work_mode(WorkMode::Onsite));
    }

    #[test]
    fn location_bands_match_first_rule() {
        assert_eq!(score_location(None), 0.4);
        assert_eq!(score_location(Some("")), 0.4);
        assert_eq!(score_location(Some("Tel Aviv")), 1.0);
        assert_eq!(score_location(Some("Petah Tikva, Center District")), 0.8);
        assert_eq!(score_location(Some("Haifa, North")), 0.6);
        assert_eq!(score_location(Some("South Beer Sheva")), 0.6);
        assert_eq!(score_location(Some("Jerusalem")), 0.5);
        // "tel aviv" outranks "center" when both appear.
        assert_eq!(score_location(Some("Tel Aviv city center")), 1.0);
    }

    #[test]
    fn location_matching_ignores_case() {
        assert_eq!(
            score_location(Some("TEL AVIV, IL")),
            score_location(Some("tel aviv"))
        );
        assert_eq!(score_location(Some("NORTHERN district")), 0.6);
    }
}
