//! Company records.

mod fields;

pub use fields::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attributes::{AttributeKind, AttributeValue};

/// Store-wide company key.
///
/// Registry dumps carry no ids of their own, so a record loaded without one
/// gets a fresh random id (see [`Company::id`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub Uuid);

impl CompanyId {
    pub fn new() -> Self {
        Uuid::new_v4().into()
    }
}

impl Default for CompanyId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CompanyId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::str::FromStr for CompanyId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A company as listed in the business registry.
///
/// Every attribute the quiz can ask about is optional. `None` means the registry
/// did not report the value; it is never the same thing as zero or an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub id: CompanyId,
    pub name: String,
    #[serde(default)]
    pub registry_code: String,

    // Registry card
    #[serde(default)]
    pub legal_form: Option<String>,
    /// Registration date in the registry's `DD.MM.YYYY` format.
    #[serde(default)]
    pub registered_date: Option<String>,
    /// Free-form location, usually `"street, city, Harju maakond"`.
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub activity_code: Option<String>,
    #[serde(default)]
    pub activity: Option<String>,
    #[serde(default)]
    pub vat_number: Option<String>,
    #[serde(default)]
    pub ceo: Option<String>,

    // Annual report figures
    #[serde(default)]
    pub employees: Option<f64>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub profit: Option<f64>,
    /// Labor taxes paid, used as the labor cost figure.
    #[serde(default)]
    pub labor_taxes: Option<f64>,
}

impl Company {
    /// Create a company with only a name; every attribute starts out absent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CompanyId::new(),
            name: name.into(),
            registry_code: String::new(),
            legal_form: None,
            registered_date: None,
            county: None,
            activity_code: None,
            activity: None,
            vat_number: None,
            ceo: None,
            employees: None,
            revenue: None,
            profit: None,
            labor_taxes: None,
        }
    }

    pub fn with_id(mut self, id: CompanyId) -> Self {
        self.id = id;
        self
    }

    pub fn with_registry_code(mut self, code: impl Into<String>) -> Self {
        self.registry_code = code.into();
        self
    }

    pub fn with_legal_form(mut self, legal_form: impl Into<String>) -> Self {
        self.legal_form = Some(legal_form.into());
        self
    }

    /// Set the registration date (`DD.MM.YYYY`).
    pub fn with_registered_date(mut self, date: impl Into<String>) -> Self {
        self.registered_date = Some(date.into());
        self
    }

    /// Convenience for tests and fixtures: registered on January 1st of `year`.
    pub fn with_founding_year(self, year: i32) -> Self {
        self.with_registered_date(format!("01.01.{year}"))
    }

    pub fn with_county(mut self, county: impl Into<String>) -> Self {
        self.county = Some(county.into());
        self
    }

    pub fn with_activity(mut self, code: impl Into<String>, description: impl Into<String>) -> Self {
        self.activity_code = Some(code.into());
        self.activity = Some(description.into());
        self
    }

    pub fn with_vat_number(mut self, vat: impl Into<String>) -> Self {
        self.vat_number = Some(vat.into());
        self
    }

    pub fn with_ceo(mut self, ceo: impl Into<String>) -> Self {
        self.ceo = Some(ceo.into());
        self
    }

    pub fn with_employees(mut self, employees: f64) -> Self {
        self.employees = Some(employees);
        self
    }

    pub fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }

    pub fn with_profit(mut self, profit: f64) -> Self {
        self.profit = Some(profit);
        self
    }

    pub fn with_labor_taxes(mut self, labor_taxes: f64) -> Self {
        self.labor_taxes = Some(labor_taxes);
        self
    }

    /// Turn blank strings and non-finite numbers into `None`.
    ///
    /// Registry exports use `""` for "not reported", which must not become a
    /// question answer.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.legal_form,
            &mut self.registered_date,
            &mut self.county,
            &mut self.activity_code,
            &mut self.activity,
            &mut self.vat_number,
            &mut self.ceo,
        ] {
            *field = non_blank(field.take());
        }
        for figure in [
            &mut self.employees,
            &mut self.revenue,
            &mut self.profit,
            &mut self.labor_taxes,
        ] {
            *figure = figure.filter(|v| v.is_finite());
        }
        self
    }

    /// Year the company was registered, if the date is present and parses.
    pub fn founding_year(&self) -> Option<i32> {
        self.registered_date.as_deref().and_then(year_from_date)
    }

    /// Normalized county name (`"harju"`), if present.
    pub fn county_name(&self) -> Option<String> {
        self.county.as_deref().and_then(extract_county_name)
    }

    /// Extract the value of `kind` for this company.
    pub fn attribute(&self, kind: AttributeKind) -> Option<AttributeValue> {
        match kind {
            AttributeKind::FoundingYear => self
                .founding_year()
                .map(|y| AttributeValue::Number(f64::from(y))),
            AttributeKind::Employees => self.employees.map(AttributeValue::Number),
            AttributeKind::Revenue => self.revenue.map(AttributeValue::Number),
            AttributeKind::Profit => self.profit.map(AttributeValue::Number),
            AttributeKind::LaborCosts => self.labor_taxes.map(AttributeValue::Number),
            AttributeKind::County => self.county_name().map(AttributeValue::Text),
            AttributeKind::Ceo => text(&self.ceo),
            AttributeKind::Activity => text(&self.activity),
            AttributeKind::LegalForm => text(&self.legal_form),
            AttributeKind::VatNumber => text(&self.vat_number),
        }
    }

    /// Check whether every quiz attribute is present.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && AttributeKind::ALL.iter().all(|kind| self.attribute(*kind).is_some())
    }
}

fn text(field: &Option<String>) -> Option<AttributeValue> {
    non_blank(field.clone()).map(AttributeValue::Text)
}
