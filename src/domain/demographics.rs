use chrono::NaiveDateTime;

use crate::config::dimensions::{
    AGE_BRACKET, AGE_LABELS, CONTINENT, CONTINENT_LABELS, COUNTRY, GENDER, GENDER_LABELS, TENURE, TENURE_LABELS,
};
use crate::stats::DemographicAttributes;

/// Profile fields of a rating's author, as stored
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorProfile {
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub continent: Option<String>,
    pub country: Option<String>,
    pub account_created_at: NaiveDateTime,
}

/// Buckets the author profile as of the moment the rating was submitted
pub fn snapshot(profile: &AuthorProfile, submitted_at: NaiveDateTime) -> DemographicAttributes {
    let mut attributes = DemographicAttributes::new();
    attributes.set(AGE_BRACKET, profile.age.and_then(age_bracket));
    attributes.set(GENDER, profile.gender.as_deref().and_then(gender_label));
    attributes.set(TENURE, tenure_bucket(profile.account_created_at, submitted_at));
    attributes.set(CONTINENT, profile.continent.as_deref().and_then(continent_label));
    attributes.set(COUNTRY, profile.country.as_deref().and_then(country_label));
    attributes
}

pub fn age_bracket(age: i32) -> Option<&'static str> {
    let idx = match age {
        ..0 => return None,
        0..18 => 0,
        18..25 => 1,
        25..35 => 2,
        35..45 => 3,
        45..55 => 4,
        _ => 5,
    };
    Some(AGE_LABELS[idx])
}

pub fn gender_label(raw: &str) -> Option<&'static str> {
    let normalized = raw.trim().to_lowercase();
    GENDER_LABELS.iter().copied().find(|label| *label == normalized)
}

pub fn continent_label(raw: &str) -> Option<&'static str> {
    let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
    CONTINENT_LABELS.iter().copied().find(|label| *label == normalized)
}

/// Countries are free-form; only blank values are dropped
pub fn country_label(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|country| !country.is_empty())
}

/// Account age when the rating was submitted
pub fn tenure_bucket(account_created_at: NaiveDateTime, submitted_at: NaiveDateTime) -> Option<&'static str> {
    let days = submitted_at.signed_duration_since(account_created_at).num_days();
    let idx = match days {
        ..0 => return None,
        0..30 => 0,
        30..182 => 1,
        182..365 => 2,
        365..730 => 3,
        _ => 4,
    };
    Some(TENURE_LABELS[idx])
}
