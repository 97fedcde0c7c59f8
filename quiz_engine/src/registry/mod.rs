//! Attribute Type Registry - the fixed catalogue of question types.

mod attribute_type;

pub use attribute_type::*;

use company_registry::AttributeKind;

use crate::config::GameConfig;
use crate::error::QuizError;

/// The question types a game can draw from, in a fixed order.
///
/// Built once from the [`GameConfig`] and never modified afterwards.
#[derive(Debug, Clone)]
pub struct AttributeTypeRegistry {
    types: Vec<AttributeType>,
}

impl AttributeTypeRegistry {
    /// Build the standard registry with the thresholds from `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        let min = &config.min_difference;
        let types = vec![
            AttributeType {
                kind: AttributeKind::FoundingYear,
                extractor: |c| c.attribute(AttributeKind::FoundingYear),
                threshold: Threshold::MinDifference(min.years),
                template: "Milline ettevõte asutati aastal {value}?",
                format: ValueFormat::Integer,
            },
            AttributeType {
                kind: AttributeKind::Employees,
                extractor: |c| c.attribute(AttributeKind::Employees),
                threshold: Threshold::MinDifference(min.employees),
                template: "Millisel ettevõttel on {value} töötajat?",
                format: ValueFormat::Integer,
            },
            AttributeType {
                kind: AttributeKind::Revenue,
                extractor: |c| c.attribute(AttributeKind::Revenue),
                threshold: Threshold::MinDifference(min.revenue),
                template: "Millisel ettevõttel on käive {value} eurot?",
                format: ValueFormat::Euros,
            },
            AttributeType {
                kind: AttributeKind::Profit,
                extractor: |c| c.attribute(AttributeKind::Profit),
                threshold: Threshold::MinDifference(min.profit),
                template: "Millisel ettevõttel on kasum {value} eurot?",
                format: ValueFormat::Euros,
            },
            AttributeType {
                kind: AttributeKind::LaborCosts,
                extractor: |c| c.attribute(AttributeKind::LaborCosts),
                threshold: Threshold::MinDifference(min.labor_costs),
                template: "Millisel ettevõttel on tööjõukulud {value} eurot?",
                format: ValueFormat::Euros,
            },
            AttributeType {
                kind: AttributeKind::County,
                extractor: |c| c.attribute(AttributeKind::County),
                threshold: Threshold::MustDiffer,
                template: "Milline ettevõte asub {value}?",
                format: ValueFormat::County,
            },
            AttributeType {
                kind: AttributeKind::Ceo,
                extractor: |c| c.attribute(AttributeKind::Ceo),
                threshold: Threshold::MustDiffer,
                template: "Millist ettevõtet juhib {value}?",
                format: ValueFormat::Plain,
            },
            AttributeType {
                kind: AttributeKind::Activity,
                extractor: |c| c.attribute(AttributeKind::Activity),
                threshold: Threshold::MustDiffer,
                template: "Milline ettevõte tegeleb: {value}?",
                format: ValueFormat::Truncated(config.activity_max_chars),
            },
            AttributeType {
                kind: AttributeKind::LegalForm,
                extractor: |c| c.attribute(AttributeKind::LegalForm),
                threshold: Threshold::MustDiffer,
                template: "Milline ettevõte on {value}?",
                format: ValueFormat::Plain,
            },
            AttributeType {
                kind: AttributeKind::VatNumber,
                extractor: |c| c.attribute(AttributeKind::VatNumber),
                threshold: Threshold::MustDiffer,
                template: "Millisel ettevõttel on KMKR number {value}?",
                format: ValueFormat::Plain,
            },
        ];

        Self { types }
    }

    /// Build a registry from an explicit list of types.
    pub fn with_types(types: Vec<AttributeType>) -> Self {
        Self { types }
    }

    /// All registered types, in registration order.
    pub fn list_types(&self) -> &[AttributeType] {
        &self.types
    }

    /// Look up a type by its identifier.
    pub fn resolve(&self, id: &str) -> Result<&AttributeType, QuizError> {
        self.types
            .iter()
            .find(|ty| ty.id() == id)
            .ok_or_else(|| QuizError::UnknownType(id.to_string()))
    }

    /// Look up a type by kind.
    pub fn get(&self, kind: AttributeKind) -> Option<&AttributeType> {
        self.types.iter().find(|ty| ty.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for AttributeTypeRegistry {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
