//! Board Taxonomy
//!
//! The fixed two-level section/subsection tree used to place toolbox items
//! on the board. `TAXONOMY` is the single table both the classification
//! engine and the render layer read from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classification::ClassificationError;

/// Top-level board section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Market,
    Sell,
    Customer,
    Product,
    Team,
    Structure,
    Support,
}

/// Second-level bucket; each one belongs to exactly one `Section`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subsection {
    BrandBuilding,
    AudienceGrowth,
    LeadNurture,
    LeadQualification,
    LeadConversion,
    Experience,
    Fulfillment,
    Retention,
    ResearchDevelopment,
    LogisticsSupply,
    TeamCuration,
    TrainingDevelopment,
    CompEngagement,
    Data,
    ToolsTech,
    Financial,
    Legal,
    Risk,
    Admin,
}

/// Static description of one subsection
#[derive(Debug)]
pub struct SubsectionSpec {
    pub subsection: Subsection,
    pub label: &'static str,
    pub icon: &'static str,
}

/// Static description of one section and its subsections
#[derive(Debug)]
pub struct SectionSpec {
    pub section: Section,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub subsections: &'static [SubsectionSpec],
}

macro_rules! sub {
    ($variant:ident, $label:literal, $icon:literal) => {
        SubsectionSpec { subsection: Subsection::$variant, label: $label, icon: $icon }
    };
}

/// Board columns in display order
pub static TAXONOMY: [SectionSpec; 7] = [
    SectionSpec {
        section: Section::Market,
        label: "Market",
        icon: "Target",
        color: "blue",
        subsections: &[
            sub!(BrandBuilding, "Brand Building", "Award"),
            sub!(AudienceGrowth, "Audience Growth", "Users"),
            sub!(LeadNurture, "Lead Nurture", "UserPlus"),
        ],
    },
    SectionSpec {
        section: Section::Sell,
        label: "Sell",
        icon: "DollarSign",
        color: "green",
        subsections: &[
            sub!(LeadQualification, "Lead Qualification", "Filter"),
            sub!(LeadConversion, "Lead Conversion", "CheckCircle"),
        ],
    },
    SectionSpec {
        section: Section::Customer,
        label: "Customer",
        icon: "Users",
        color: "purple",
        subsections: &[
            sub!(Experience, "Experience", "Star"),
            sub!(Fulfillment, "Fulfillment", "Package"),
            sub!(Retention, "Retention", "RefreshCw"),
        ],
    },
    SectionSpec {
        section: Section::Product,
        label: "Product",
        icon: "Package",
        color: "orange",
        subsections: &[
            sub!(ResearchDevelopment, "Research and Development", "Search"),
            sub!(LogisticsSupply, "Logistics and Supply", "Truck"),
        ],
    },
    SectionSpec {
        section: Section::Team,
        label: "Team",
        icon: "Users2",
        color: "pink",
        subsections: &[
            sub!(TeamCuration, "Team Curation", "UserCheck"),
            sub!(TrainingDevelopment, "Training and Development", "BookOpen"),
            sub!(CompEngagement, "Comp and Engagement", "Zap"),
        ],
    },
    SectionSpec {
        section: Section::Structure,
        label: "Structure",
        icon: "Building",
        color: "indigo",
        subsections: &[
            sub!(Data, "Data", "Database"),
            sub!(ToolsTech, "Tools and Tech", "Settings"),
        ],
    },
    SectionSpec {
        section: Section::Support,
        label: "Support",
        icon: "HelpCircle",
        color: "yellow",
        subsections: &[
            sub!(Financial, "Financial", "DollarSign"),
            sub!(Legal, "Legal", "Scale"),
            sub!(Risk, "Risk", "AlertTriangle"),
            sub!(Admin, "Admin", "FileText"),
        ],
    },
];

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Market,
        Section::Sell,
        Section::Customer,
        Section::Product,
        Section::Team,
        Section::Structure,
        Section::Support,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Market => "market",
            Section::Sell => "sell",
            Section::Customer => "customer",
            Section::Product => "product",
            Section::Team => "team",
            Section::Structure => "structure",
            Section::Support => "support",
        }
    }

    /// Taxonomy row for this section
    pub fn spec(&self) -> &'static SectionSpec {
        // TAXONOMY is declared in `Section::ALL` order.
        &TAXONOMY[*self as usize]
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    pub fn subsections(&self) -> impl Iterator<Item = Subsection> {
        self.spec().subsections.iter().map(|s| s.subsection)
    }

    pub fn owns(&self, subsection: Subsection) -> bool {
        subsection.section() == *self
    }
}

impl Subsection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subsection::BrandBuilding => "brand-building",
            Subsection::AudienceGrowth => "audience-growth",
            Subsection::LeadNurture => "lead-nurture",
            Subsection::LeadQualification => "lead-qualification",
            Subsection::LeadConversion => "lead-conversion",
            Subsection::Experience => "experience",
            Subsection::Fulfillment => "fulfillment",
            Subsection::Retention => "retention",
            Subsection::ResearchDevelopment => "research-development",
            Subsection::LogisticsSupply => "logistics-supply",
            Subsection::TeamCuration => "team-curation",
            Subsection::TrainingDevelopment => "training-development",
            Subsection::CompEngagement => "comp-engagement",
            Subsection::Data => "data",
            Subsection::ToolsTech => "tools-tech",
            Subsection::Financial => "financial",
            Subsection::Legal => "legal",
            Subsection::Risk => "risk",
            Subsection::Admin => "admin",
        }
    }

    /// The section this subsection belongs to
    pub fn section(&self) -> Section {
        use Subsection::*;
        match self {
            BrandBuilding | AudienceGrowth | LeadNurture => Section::Market,
            LeadQualification | LeadConversion => Section::Sell,
            Experience | Fulfillment | Retention => Section::Customer,
            ResearchDevelopment | LogisticsSupply => Section::Product,
            TeamCuration | TrainingDevelopment | CompEngagement => Section::Team,
            Data | ToolsTech => Section::Structure,
            Financial | Legal | Risk | Admin => Section::Support,
        }
    }

    pub fn spec(&self) -> &'static SubsectionSpec {
        // Variants are declared grouped by section, in TAXONOMY order.
        let siblings = self.section().spec().subsections;
        let first = siblings[0].subsection as usize;
        &siblings[*self as usize - first]
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }
}

impl FromStr for Section {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| ClassificationError::UnknownSection(s.to_string()))
    }
}

impl FromStr for Subsection {
    type Err = ClassificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TAXONOMY
            .iter()
            .flat_map(|section| section.subsections.iter())
            .map(|spec| spec.subsection)
            .find(|subsection| subsection.as_str() == s)
            .ok_or_else(|| ClassificationError::UnknownSubsection(s.to_string()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Subsection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_order_matches_sections() {
        for (index, section) in Section::ALL.iter().enumerate() {
            assert_eq!(TAXONOMY[index].section, *section);
            assert_eq!(section.spec().section, *section);
        }
    }

    #[test]
    fn test_every_subsection_listed_under_its_parent() {
        let mut count = 0;
        for spec in TAXONOMY.iter() {
            for sub in spec.subsections {
                assert_eq!(sub.subsection.section(), spec.section);
                assert_eq!(sub.subsection.spec().subsection, sub.subsection);
                assert_eq!(sub.subsection.label(), sub.label);
                assert!(!sub.label.is_empty());
                count += 1;
            }
        }
        assert_eq!(count, 19);
    }

    #[test]
    fn test_string_ids_match_serde() {
        for section in Section::ALL {
            let json = serde_json::to_string(&section).unwrap();
            assert_eq!(json, format!("\"{}\"", section.as_str()));
            assert_eq!(section.as_str().parse::<Section>().unwrap(), section);
            for sub in section.subsections() {
                let json = serde_json::to_string(&sub).unwrap();
                assert_eq!(json, format!("\"{}\"", sub.as_str()));
                assert_eq!(sub.as_str().parse::<Subsection>().unwrap(), sub);
            }
        }
    }

    #[test]
    fn test_unknown_ids_rejected() {
        assert!("notes".parse::<Section>().is_err());
        assert!("brand".parse::<Subsection>().is_err());
    }

    #[test]
    fn test_ownership() {
        assert!(Section::Support.owns(Subsection::Legal));
        assert!(!Section::Team.owns(Subsection::Legal));
        assert_eq!(Section::Market.subsections().count(), 3);
    }
}
