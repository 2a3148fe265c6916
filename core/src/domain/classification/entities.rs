use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Revision of the prompt/response contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ContractVersion {
    /// Boolean vegetarian/vegan flags with risky keywords.
    DietaryV1,
    /// Five vegetarian categories with risky keywords.
    CategoryV2,
    /// Severity scale with per-ingredient flags and a suggestion.
    SeverityV3,
}

impl ContractVersion {
    pub const ALL: [ContractVersion; 3] = [
        ContractVersion::DietaryV1,
        ContractVersion::CategoryV2,
        ContractVersion::SeverityV3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractVersion::DietaryV1 => "dietary-v1",
            ContractVersion::CategoryV2 => "category-v2",
            ContractVersion::SeverityV3 => "severity-v3",
        }
    }

    /// Closed label set the revision asks the model to choose from.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            ContractVersion::DietaryV1 => &["vegetarian", "vegan"],
            ContractVersion::CategoryV2 => &["全素", "蛋奶素", "五葷素", "非素食", "無法判斷"],
            ContractVersion::SeverityV3 => &["clear", "caution", "warning", "unknown"],
        }
    }
}

impl fmt::Display for ContractVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractVersion::ALL
            .into_iter()
            .find(|version| version.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown contract version: {}", s))
    }
}

/// Shared severity scale every contract revision maps onto.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Clear,
    Caution,
    Warning,
    #[serde(rename = "unknown", alias = "indeterminate")]
    Indeterminate,
}

impl Severity {
    /// Checks the label against the flags it carries.
    ///
    /// `clear` and `unknown` carry no flags, `caution` needs at least one
    /// flag and `warning` needs at least one high-severity flag.
    pub fn check_flags(self, flag_count: usize, high_severity_count: usize) -> Result<(), String> {
        match self {
            Severity::Clear | Severity::Indeterminate if flag_count > 0 => Err(format!(
                "{:?} verdict must not carry flags, found {}",
                self, flag_count
            )),
            Severity::Caution if flag_count == 0 => {
                Err("caution verdict requires at least one flag".to_string())
            }
            Severity::Warning if high_severity_count == 0 => {
                Err("warning verdict requires at least one high-severity flag".to_string())
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlagLevel {
    Caution,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientFlag {
    pub ingredient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<FlagLevel>,
}

/// Labels of the category revision, as the model writes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum VegetarianCategory {
    #[serde(rename = "全素")]
    FullyVegetarian,
    #[serde(rename = "蛋奶素")]
    DairyEgg,
    #[serde(rename = "五葷素")]
    PungentRoots,
    #[serde(rename = "非素食")]
    NonVegetarian,
    #[serde(rename = "無法判斷")]
    Indeterminate,
}

impl VegetarianCategory {
    pub fn severity(&self) -> Severity {
        match self {
            VegetarianCategory::FullyVegetarian => Severity::Clear,
            VegetarianCategory::DairyEgg | VegetarianCategory::PungentRoots => Severity::Caution,
            VegetarianCategory::NonVegetarian => Severity::Warning,
            VegetarianCategory::Indeterminate => Severity::Indeterminate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DietaryVerdict {
    pub vegetarian: bool,
    pub vegan: bool,
    pub reasoning: String,
    pub risky_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryVerdict {
    #[serde(rename = "type")]
    pub category: VegetarianCategory,
    pub reasoning: String,
    pub risky_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SeverityVerdict {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub explanations: Vec<String>,
    pub flags: Vec<IngredientFlag>,
    /// Empty when there is nothing to suggest.
    pub suggestion: String,
}

/// A parsed verdict, shaped by the contract revision that produced it.
///
/// Serializes to exactly the object the model was asked to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ClassificationVerdict {
    Dietary(DietaryVerdict),
    Category(CategoryVerdict),
    Severity(SeverityVerdict),
}

impl ClassificationVerdict {
    pub fn version(&self) -> ContractVersion {
        match self {
            ClassificationVerdict::Dietary(_) => ContractVersion::DietaryV1,
            ClassificationVerdict::Category(_) => ContractVersion::CategoryV2,
            ClassificationVerdict::Severity(_) => ContractVersion::SeverityV3,
        }
    }

    /// Position of the verdict on the shared severity scale.
    pub fn severity(&self) -> Severity {
        match self {
            ClassificationVerdict::Dietary(verdict) => {
                if verdict.vegan {
                    Severity::Clear
                } else if verdict.vegetarian {
                    Severity::Caution
                } else if verdict.risky_keywords.is_empty() {
                    Severity::Indeterminate
                } else {
                    Severity::Warning
                }
            }
            ClassificationVerdict::Category(verdict) => verdict.category.severity(),
            ClassificationVerdict::Severity(verdict) => verdict.severity,
        }
    }

    pub fn flagged_ingredients(&self) -> Vec<&str> {
        match self {
            ClassificationVerdict::Dietary(DietaryVerdict { risky_keywords, .. })
            | ClassificationVerdict::Category(CategoryVerdict { risky_keywords, .. }) => {
                risky_keywords.iter().map(String::as_str).collect()
            }
            ClassificationVerdict::Severity(verdict) => verdict
                .flags
                .iter()
                .map(|flag| flag.ingredient.as_str())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_version_from_str() {
        assert_eq!(
            "severity-v3".parse::<ContractVersion>(),
            Ok(ContractVersion::SeverityV3)
        );
        assert_eq!(
            "Category-V2".parse::<ContractVersion>(),
            Ok(ContractVersion::CategoryV2)
        );
        assert!("v4".parse::<ContractVersion>().is_err());
    }

    #[test]
    fn test_severity_wire_names() {
        assert_eq!(
            serde_json::to_string(&Severity::Indeterminate).unwrap(),
            "\"unknown\""
        );
        let parsed: Severity = serde_json::from_str("\"indeterminate\"").unwrap();
        assert_eq!(parsed, Severity::Indeterminate);
    }

    #[test]
    fn test_check_flags() {
        assert!(Severity::Clear.check_flags(0, 0).is_ok());
        assert!(Severity::Clear.check_flags(1, 0).is_err());
        assert!(Severity::Indeterminate.check_flags(1, 0).is_err());
        assert!(Severity::Caution.check_flags(0, 0).is_err());
        assert!(Severity::Caution.check_flags(1, 0).is_ok());
        assert!(Severity::Warning.check_flags(2, 0).is_err());
        assert!(Severity::Warning.check_flags(2, 1).is_ok());
    }

    #[test]
    fn test_dietary_severity() {
        let verdict = ClassificationVerdict::Dietary(DietaryVerdict {
            vegetarian: false,
            vegan: false,
            reasoning: "含有蜂蜜".to_string(),
            risky_keywords: vec!["蜂蜜".to_string()],
        });
        assert_eq!(verdict.severity(), Severity::Warning);
        assert_eq!(verdict.flagged_ingredients(), vec!["蜂蜜"]);
    }

    #[test]
    fn test_category_serializes_with_wire_labels() {
        let verdict = ClassificationVerdict::Category(CategoryVerdict {
            category: VegetarianCategory::PungentRoots,
            reasoning: "含有大蒜".to_string(),
            risky_keywords: vec!["大蒜".to_string()],
        });
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value["type"], "五葷素");
        assert_eq!(value["riskyKeywords"][0], "大蒜");
        assert_eq!(verdict.severity(), Severity::Caution);
    }
}
