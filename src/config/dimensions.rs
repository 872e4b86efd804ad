/// A demographic dimension and its buckets in canonical display order.
///
/// The label order here is the order segments are emitted in, independent of
/// the order ratings were submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionDefinition {
    pub name: String,
    pub labels: Vec<String>,
}

impl DimensionDefinition {
    pub fn new(name: &str, labels: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

pub const AGE_BRACKET: &str = "age_bracket";
pub const GENDER: &str = "gender";
pub const TENURE: &str = "tenure";
pub const CONTINENT: &str = "continent";

/// Attribute key for the rater's country, reported as counts only
pub const COUNTRY: &str = "country";

pub const AGE_LABELS: [&str; 6] = ["under18", "18-24", "25-34", "35-44", "45-54", "55+"];
pub const GENDER_LABELS: [&str; 3] = ["male", "female", "other"];
pub const TENURE_LABELS: [&str; 5] = [
    "under_1_month",
    "1-6_months",
    "6-12_months",
    "1-2_years",
    "2_years_plus",
];
pub const CONTINENT_LABELS: [&str; 7] = [
    "africa",
    "asia",
    "europe",
    "north_america",
    "south_america",
    "australia",
    "antarctica",
];

/// Dimensions segmented by default, in report order
pub fn get_dimensions() -> Vec<DimensionDefinition> {
    vec![
        DimensionDefinition::new(AGE_BRACKET, &AGE_LABELS),
        DimensionDefinition::new(GENDER, &GENDER_LABELS),
        DimensionDefinition::new(TENURE, &TENURE_LABELS),
        DimensionDefinition::new(CONTINENT, &CONTINENT_LABELS),
    ]
}
