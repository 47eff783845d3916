use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferId(pub String);

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of the user owning a set of offers, as resolved by the session provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerId(pub String);

/// Where the job is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum WorkMode {
    Onsite,
    Hybrid,
    Remote,
}

impl WorkMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            WorkMode::Onsite => "onsite",
            WorkMode::Hybrid => "hybrid",
            WorkMode::Remote => "remote",
        }
    }

    /// Human readable label used by comparison views.
    pub const fn label(self) -> &'static str {
        match self {
            WorkMode::Onsite => "On-site",
            WorkMode::Hybrid => "Hybrid",
            WorkMode::Remote => "Remote",
        }
    }
}

impl Default for WorkMode {
    fn default() -> Self {
        WorkMode::Hybrid
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkMode {
    type Err = InvalidWorkMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "onsite" => Ok(WorkMode::Onsite),
            "hybrid" => Ok(WorkMode::Hybrid),
            "remote" => Ok(WorkMode::Remote),
            other => Err(InvalidWorkMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for WorkMode {
    type Error = InvalidWorkMode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Raised when stored or submitted data carries a work mode outside the enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid work mode '{0}': expected onsite, hybrid, or remote")]
pub struct InvalidWorkMode(pub String);

/// A stored job offer. Timestamps and id are owned by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub company: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub work_mode: WorkMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;
const NOTES_MAX_CHARS: usize = 1000;

/// Payload accepted when creating an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OfferDraft {
    pub company: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub work_mode: WorkMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OfferDraft {
    /// Trim text fields and check every rule, collecting all violations.
    pub fn validated(self) -> Result<Self, OfferValidationError> {
        let mut details = Vec::new();

        let company = self.company.trim().to_string();
        check_name("company", &company, &mut details);
        let title = self.title.trim().to_string();
        check_name("title", &title, &mut details);
        check_salary(self.salary, &mut details);
        let location = trim_optional(self.location);
        if let Some(location) = &location {
            check_name("location", location, &mut details);
        }
        let notes = trim_optional(self.notes);
        check_notes(notes.as_deref(), &mut details);

        if !details.is_empty() {
            return Err(OfferValidationError { details });
        }

        Ok(Self {
            company,
            title,
            salary: self.salary,
            location,
            work_mode: self.work_mode,
            notes,
        })
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OfferPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_mode: Option<WorkMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OfferPatch {
    pub fn validated(self) -> Result<Self, OfferValidationError> {
        let mut details = Vec::new();

        let company = trim_optional(self.company);
        if let Some(company) = &company {
            check_name("company", company, &mut details);
        }
        let title = trim_optional(self.title);
        if let Some(title) = &title {
            check_name("title", title, &mut details);
        }
        check_salary(self.salary, &mut details);
        let location = trim_optional(self.location);
        if let Some(location) = &location {
            check_name("location", location, &mut details);
        }
        let notes = trim_optional(self.notes);
        check_notes(notes.as_deref(), &mut details);

        if !details.is_empty() {
            return Err(OfferValidationError { details });
        }

        Ok(Self {
            company,
            title,
            salary: self.salary,
            location,
            work_mode: self.work_mode,
            notes,
        })
    }

    /// Apply present fields onto a stored offer. Timestamps are left to the caller.
    pub fn apply(self, offer: &mut Offer) {
        if let Some(company) = self.company {
            offer.company = company;
        }
        if let Some(title) = self.title {
            offer.title = title;
        }
        if let Some(salary) = self.salary {
            offer.salary = Some(salary);
        }
        if let Some(location) = self.location {
            offer.location = Some(location);
        }
        if let Some(work_mode) = self.work_mode {
            offer.work_mode = work_mode;
        }
        if let Some(notes) = self.notes {
            offer.notes = Some(notes);
        }
    }
}

/// Collected rule violations for a draft or patch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation error: {}", .details.join("; "))]
pub struct OfferValidationError {
    pub details: Vec<String>,
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(|raw| raw.trim().to_string())
}

fn check_name(field: &str, value: &str, details: &mut Vec<String>) {
    let chars = value.chars().count();
    if chars < NAME_MIN_CHARS {
        details.push(format!(
            "\"{field}\" length must be at least {NAME_MIN_CHARS} characters long"
        ));
    } else if chars > NAME_MAX_CHARS {
        details.push(format!(
            "\"{field}\" length must be less than or equal to {NAME_MAX_CHARS} characters long"
        ));
    }
}

fn check_salary(salary: Option<f64>, details: &mut Vec<String>) {
    match salary {
        Some(value) if !value.is_finite() => {
            details.push("\"salary\" must be a finite number".to_string())
        }
        Some(value) if value < 0.0 => {
            details.push("\"salary\" must be greater than or equal to 0".to_string())
        }
        _ => {}
    }
}

fn check_notes(notes: Option<&str>, details: &mut Vec<String>) {
    if let Some(notes) = notes {
        if notes.chars().count() > NOTES_MAX_CHARS {
            details.push(format!(
                "\"notes\" length must be less than or equal to {NOTES_MAX_CHARS} characters long"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft() -> OfferDraft {
        OfferDraft {
            company: "  Wix ".to_string(),
            title: "Backend Engineer".to_string(),
            salary: Some(32000.0),
            location: Some(" Tel Aviv ".to_string()),
            work_mode: WorkMode::Remote,
            notes: None,
        }
    }

    #[test]
    fn draft_validation_trims_text_fields() {
        let draft = draft().validated().expect("valid draft");
        assert_eq!(draft.company, "Wix");
        assert_eq!(draft.location.as_deref(), Some("Tel Aviv"));
    }

    #[test]
    fn draft_validation_collects_every_violation() {
        let mut invalid = draft();
        invalid.company = "X".to_string();
        invalid.salary = Some(-1.0);
        invalid.notes = Some("n".repeat(1001));

        let error = invalid.validated().expect_err("draft is invalid");
        assert_eq!(error.details.len(), 3);
        assert!(error.details[0].contains("company"));
        assert!(error.details[1].contains("salary"));
        assert!(error.details[2].contains("notes"));
    }

    #[test]
    fn draft_defaults_to_hybrid_work_mode() {
        let draft: OfferDraft = serde_json::from_value(json!({
            "company": "Monday",
            "title": "SRE"
        }))
        .expect("draft parses");
        assert_eq!(draft.work_mode, WorkMode::Hybrid);
    }

    #[test]
    fn draft_rejects_unknown_fields() {
        let result: Result<OfferDraft, _> = serde_json::from_value(json!({
            "company": "Monday",
            "title": "SRE",
            "bonus": 5000
        }));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_work_mode_is_an_integrity_error() {
        assert_eq!(
            "office".parse::<WorkMode>(),
            Err(InvalidWorkMode("office".to_string()))
        );

        let error = serde_json::from_value::<OfferDraft>(json!({
            "company": "Monday",
            "title": "SRE",
            "workMode": "office"
        }))
        .expect_err("work mode rejected");
        assert!(error.to_string().contains("invalid work mode 'office'"));
    }

    #[test]
    fn offer_serializes_with_camel_case_fields() {
        let now = Utc::now();
        let offer = Offer {
            id: OfferId("offer-000001".to_string()),
            company: "Wix".to_string(),
            title: "Backend Engineer".to_string(),
            salary: None,
            location: None,
            work_mode: WorkMode::Onsite,
            notes: None,
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&offer).expect("serializes");
        assert_eq!(value["id"], json!("offer-000001"));
        assert_eq!(value["workMode"], json!("onsite"));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("salary").is_none());
    }

    #[test]
    fn patch_validation_collects_every_violation() {
        let patch = OfferPatch {
            title: Some(" Q ".to_string()),
            salary: Some(-2500.0),
            work_mode: Some(WorkMode::Remote),
            ..OfferPatch::default()
        };

        let error = patch.validated().expect_err("patch is invalid");
        assert_eq!(
            error.details,
            vec![
                "\"title\" length must be at least 2 characters long".to_string(),
                "\"salary\" must be greater than or equal to 0".to_string(),
            ]
        );
    }

    #[test]
    fn patch_only_overwrites_present_fields() {
        let now = Utc::now();
        let mut offer = Offer {
            id: OfferId("offer-000002".to_string()),
            company: "Wix".to_string(),
            title: "Backend Engineer".to_string(),
            salary: Some(30000.0),
            location: Some("Haifa".to_string()),
            work_mode: WorkMode::Onsite,
            notes: Some("referral".to_string()),
            created_at: now,
            updated_at: now,
        };

        let patch = OfferPatch {
            salary: Some(35000.0),
            work_mode: Some(WorkMode::Hybrid),
            ..OfferPatch::default()
        }
        .validated()
        .expect("valid patch");
        patch.apply(&mut offer);

        assert_eq!(offer.salary, Some(35000.0));
        assert_eq!(offer.work_mode, WorkMode::Hybrid);
        assert_eq!(offer.location.as_deref(), Some("Haifa"));
        assert_eq!(offer.notes.as_deref(), Some("referral"));
    }
}
