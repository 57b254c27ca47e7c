// ============================================================
// LOCATION ENUMERATIONS
// ============================================================
// Fixed value sets accepted for the category and state columns

use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory category a location is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Venue,
    Studio,
    Festival,
    Label,
    Management,
    Services,
    Education,
    #[serde(rename = "Government/Peak Body")]
    GovernmentPeakBody,
    #[serde(rename = "Community Organisation")]
    CommunityOrganisation,
    #[serde(rename = "Co-working/Creative Hub")]
    CoworkingCreativeHub,
    #[serde(rename = "Gallery/Arts Space")]
    GalleryArtsSpace,
    Other,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Venue,
        Category::Studio,
        Category::Festival,
        Category::Label,
        Category::Management,
        Category::Services,
        Category::Education,
        Category::GovernmentPeakBody,
        Category::CommunityOrganisation,
        Category::CoworkingCreativeHub,
        Category::GalleryArtsSpace,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Venue => "Venue",
            Category::Studio => "Studio",
            Category::Festival => "Festival",
            Category::Label => "Label",
            Category::Management => "Management",
            Category::Services => "Services",
            Category::Education => "Education",
            Category::GovernmentPeakBody => "Government/Peak Body",
            Category::CommunityOrganisation => "Community Organisation",
            Category::CoworkingCreativeHub => "Co-working/Creative Hub",
            Category::GalleryArtsSpace => "Gallery/Arts Space",
            Category::Other => "Other",
        }
    }

    /// Exact label match; no case folding or fuzzy matching.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == label)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Australian state or territory code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AustralianState {
    Vic,
    Nsw,
    Qld,
    Sa,
    Wa,
    Tas,
    Nt,
    Act,
}

impl AustralianState {
    pub const ALL: [AustralianState; 8] = [
        AustralianState::Vic,
        AustralianState::Nsw,
        AustralianState::Qld,
        AustralianState::Sa,
        AustralianState::Wa,
        AustralianState::Tas,
        AustralianState::Nt,
        AustralianState::Act,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AustralianState::Vic => "VIC",
            AustralianState::Nsw => "NSW",
            AustralianState::Qld => "QLD",
            AustralianState::Sa => "SA",
            AustralianState::Wa => "WA",
            AustralianState::Tas => "TAS",
            AustralianState::Nt => "NT",
            AustralianState::Act => "ACT",
        }
    }

    /// Expects an already upper-cased code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == code)
    }

    pub fn codes() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl fmt::Display for AustralianState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.as_str()), Some(category));
        }
        assert_eq!(Category::labels().len(), 12);
    }

    #[test]
    fn test_category_match_is_exact() {
        assert_eq!(Category::from_label("venue"), None);
        assert_eq!(Category::from_label(" Venue"), None);
        assert_eq!(
            Category::from_label("Gallery/Arts Space"),
            Some(Category::GalleryArtsSpace)
        );
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::CoworkingCreativeHub).unwrap();
        assert_eq!(json, "\"Co-working/Creative Hub\"");
    }

    #[test]
    fn test_state_codes() {
        assert_eq!(
            AustralianState::codes(),
            vec!["VIC", "NSW", "QLD", "SA", "WA", "TAS", "NT", "ACT"]
        );
        assert_eq!(AustralianState::from_code("TAS"), Some(AustralianState::Tas));
        assert_eq!(AustralianState::from_code("vic"), None);
        assert_eq!(
            serde_json::to_string(&AustralianState::Act).unwrap(),
            "\"ACT\""
        );
    }
}
