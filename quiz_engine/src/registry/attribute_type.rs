//! Attribute types - what a question compares and how it is phrased.

use company_registry::{AttributeKind, AttributeValue, Company};

/// Pulls an attribute value out of a company record.
pub type Extractor = fn(&Company) -> Option<AttributeValue>;

/// How far apart two values must be before the pair makes a fair question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Numeric values whose absolute difference is at least this much.
    MinDifference(f64),
    /// Categorical values that are not equal.
    MustDiffer,
}

impl Threshold {
    /// Check whether two values are far enough apart.
    ///
    /// Equal values never qualify, even with a zero threshold, so exactly one
    /// company of a pair can match the stated value.
    pub fn is_met(&self, a: &AttributeValue, b: &AttributeValue) -> bool {
        if a == b {
            return false;
        }
        match self {
            Threshold::MinDifference(min) => a.distance(b).is_some_and(|d| d >= *min),
            Threshold::MustDiffer => true,
        }
    }
}

/// How the stated value is written into the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Rounded whole number.
    Integer,
    /// Euro amount in millions (`miljonit`) or thousands (`tuhat`).
    Euros,
    /// Normalized county name rendered as `"Harju maakond"`.
    County,
    /// Text cut to at most this many characters, followed by `...`.
    Truncated(usize),
    /// Text as is.
    Plain,
}

impl ValueFormat {
    pub fn render(&self, value: &AttributeValue) -> String {
        match (self, value) {
            (ValueFormat::Integer, AttributeValue::Number(n)) => format!("{}", n.trunc() as i64),
            (ValueFormat::Euros, AttributeValue::Number(n)) => format_euros(*n),
            (ValueFormat::County, AttributeValue::Text(county)) => {
                format!("{} maakond", capitalize(county))
            }
            (ValueFormat::Truncated(max), AttributeValue::Text(text)) => truncate(text, *max),
            _ => value.to_string(),
        }
    }
}

/// Write a euro amount the way the registry reports are read out loud.
pub fn format_euros(amount: f64) -> String {
    let whole = amount.trunc();
    if whole >= 1_000_000.0 {
        format!("{:.1} miljonit", whole / 1_000_000.0)
    } else if whole >= 1_000.0 {
        format!("{:.0} tuhat", whole / 1_000.0)
    } else {
        format!("{}", whole as i64)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// A question type: extractor, fairness threshold and prompt template.
#[derive(Clone)]
pub struct AttributeType {
    pub kind: AttributeKind,
    pub extractor: Extractor,
    pub threshold: Threshold,
    /// Prompt with a `{value}` placeholder for the stated value.
    pub template: &'static str,
    pub format: ValueFormat,
}

impl std::fmt::Debug for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeType")
            .field("kind", &self.kind)
            .field("threshold", &self.threshold)
            .field("template", &self.template)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl AttributeType {
    /// Identifier of this type.
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    /// Extract this type's value from a company.
    pub fn extract(&self, company: &Company) -> Option<AttributeValue> {
        (self.extractor)(company)
    }

    /// Whether a pair of values has exactly one answer: the threshold holds
    /// and the two values read differently in the prompt.
    pub fn tells_apart(&self, a: &AttributeValue, b: &AttributeValue) -> bool {
        self.threshold.is_met(a, b) && self.format.render(a) != self.format.render(b)
    }

    /// Render the prompt for a stated value.
    pub fn render_prompt(&self, value: &AttributeValue) -> String {
        self.template.replace("{value}", &self.format.render(value))
    }
}
