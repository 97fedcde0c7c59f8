//! The comparable facts a company record can answer questions about.

use serde::{Deserialize, Serialize};

/// Every attribute the quiz knows how to ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    // Numeric
    FoundingYear,
    Employees,
    Revenue,
    Profit,
    LaborCosts,

    // Categorical
    County,
    Ceo,
    Activity,
    LegalForm,
    VatNumber,
}

impl AttributeKind {
    /// All attribute kinds in their canonical order.
    pub const ALL: [AttributeKind; 10] = [
        AttributeKind::FoundingYear,
        AttributeKind::Employees,
        AttributeKind::Revenue,
        AttributeKind::Profit,
        AttributeKind::LaborCosts,
        AttributeKind::County,
        AttributeKind::Ceo,
        AttributeKind::Activity,
        AttributeKind::LegalForm,
        AttributeKind::VatNumber,
    ];

    /// Stable string identifier, also used in configuration files.
    pub fn id(&self) -> &'static str {
        match self {
            AttributeKind::FoundingYear => "founding_year",
            AttributeKind::Employees => "employees",
            AttributeKind::Revenue => "revenue",
            AttributeKind::Profit => "profit",
            AttributeKind::LaborCosts => "labor_costs",
            AttributeKind::County => "county",
            AttributeKind::Ceo => "ceo",
            AttributeKind::Activity => "activity",
            AttributeKind::LegalForm => "legal_form",
            AttributeKind::VatNumber => "vat_number",
        }
    }

    /// Look up a kind by its identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Whether values of this kind are numbers compared by absolute difference.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            AttributeKind::FoundingYear
                | AttributeKind::Employees
                | AttributeKind::Revenue
                | AttributeKind::Profit
                | AttributeKind::LaborCosts
        )
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A present attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

impl AttributeValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Number(_) => None,
            AttributeValue::Text(s) => Some(s),
        }
    }

    /// Absolute difference between two numeric values.
    ///
    /// Returns `None` if either side is text.
    pub fn distance(&self, other: &AttributeValue) -> Option<f64> {
        Some((self.as_number()? - other.as_number()?).abs())
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{n}"),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for kind in AttributeKind::ALL {
            assert_eq!(AttributeKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(AttributeKind::from_id("shoe_size"), None);
    }

    #[test]
    fn test_numeric_kinds() {
        let numeric: Vec<_> = AttributeKind::ALL
            .into_iter()
            .filter(AttributeKind::is_numeric)
            .collect();
        assert_eq!(numeric.len(), 5);
        assert!(!AttributeKind::VatNumber.is_numeric());
    }

    #[test]
    fn test_distance() {
        let a = AttributeValue::Number(1995.0);
        let b = AttributeValue::Number(2010.0);
        assert_eq!(a.distance(&b), Some(15.0));
        assert_eq!(b.distance(&a), Some(15.0));

        let text = AttributeValue::Text("harju".into());
        assert_eq!(a.distance(&text), None);
    }
}
