//! Typed filters for listing endpoints.
//!
//! Each filter struct mirrors the query parameters one listing accepts.
//! Unset filters simply omit the parameter. Status values parse through
//! `FromStr` and unknown strings are rejected before any request is built.

use crate::errors::FakturoidError;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

/// A date or timestamp filter value, serialized as ISO-8601.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterTime {
    /// Calendar date.
    Date(NaiveDate),
    /// Timestamp.
    Timestamp(DateTime<Utc>),
}

impl FilterTime {
    pub(crate) fn iso(&self) -> String {
        match self {
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Timestamp(t) => t.to_rfc3339(),
        }
    }
}

impl From<NaiveDate> for FilterTime {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for FilterTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    /// Issued, not yet sent.
    Open,
    /// Sent to the client.
    Sent,
    /// Past its due date.
    Overdue,
    /// Fully paid.
    Paid,
    /// Cancelled.
    Cancelled,
}

impl InvoiceStatus {
    /// Query-parameter value of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Sent => "sent",
            Self::Overdue => "overdue",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = FakturoidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "sent" => Ok(Self::Sent),
            "overdue" => Ok(Self::Overdue),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(FakturoidError::invalid_parameter(format!(
                "invalid invoice status '{}', expected one of open, sent, overdue, paid, cancelled",
                other
            ))),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expense lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseStatus {
    /// Received, not yet paid.
    Open,
    /// Past its due date.
    Overdue,
    /// Fully paid.
    Paid,
}

impl ExpenseStatus {
    /// Query-parameter value of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Overdue => "overdue",
            Self::Paid => "paid",
        }
    }
}

impl FromStr for ExpenseStatus {
    type Err = FakturoidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "overdue" => Ok(Self::Overdue),
            "paid" => Ok(Self::Paid),
            other => Err(FakturoidError::invalid_parameter(format!(
                "invalid expense status '{}', expected one of open, overdue, paid",
                other
            ))),
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for the subjects listing.
#[derive(Debug, Clone, Default)]
pub struct SubjectFilters {
    pub(crate) since: Option<FilterTime>,
    pub(crate) updated_since: Option<FilterTime>,
    pub(crate) custom_id: Option<String>,
}

impl SubjectFilters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only subjects created since the given date or timestamp.
    pub fn since(mut self, value: impl Into<FilterTime>) -> Self {
        self.since = Some(value.into());
        self
    }

    /// Only subjects updated since the given date or timestamp.
    pub fn updated_since(mut self, value: impl Into<FilterTime>) -> Self {
        self.updated_since = Some(value.into());
        self
    }

    /// Only subjects with the given custom id.
    pub fn custom_id(mut self, value: impl Into<String>) -> Self {
        self.custom_id = Some(value.into());
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(since) = &self.since {
            params.push(("since".to_string(), since.iso()));
        }
        if let Some(updated_since) = &self.updated_since {
            params.push(("updated_since".to_string(), updated_since.iso()));
        }
        if let Some(custom_id) = &self.custom_id {
            params.push(("custom_id".to_string(), custom_id.clone()));
        }
        params
    }
}

/// Filters for the invoices listing.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilters {
    pub(crate) proforma: Option<bool>,
    pub(crate) subject_id: Option<i64>,
    pub(crate) since: Option<FilterTime>,
    pub(crate) until: Option<FilterTime>,
    pub(crate) updated_since: Option<FilterTime>,
    pub(crate) updated_until: Option<FilterTime>,
    pub(crate) number: Option<String>,
    pub(crate) status: Option<InvoiceStatus>,
    pub(crate) custom_id: Option<String>,
}

impl InvoiceFilters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to proforma (`true`) or regular (`false`) documents.
    pub fn proforma(mut self, value: bool) -> Self {
        self.proforma = Some(value);
        self
    }

    /// Only invoices issued to the given subject.
    pub fn subject_id(mut self, value: i64) -> Self {
        self.subject_id = Some(value);
        self
    }

    /// Only invoices issued since the given date or timestamp.
    pub fn since(mut self, value: impl Into<FilterTime>) -> Self {
        self.since = Some(value.into());
        self
    }

    /// Only invoices issued until the given date or timestamp.
    pub fn until(mut self, value: impl Into<FilterTime>) -> Self {
        self.until = Some(value.into());
        self
    }

    /// Only invoices updated since the given date or timestamp.
    pub fn updated_since(mut self, value: impl Into<FilterTime>) -> Self {
        self.updated_since = Some(value.into());
        self
    }

    /// Only invoices updated until the given date or timestamp.
    pub fn updated_until(mut self, value: impl Into<FilterTime>) -> Self {
        self.updated_until = Some(value.into());
        self
    }

    /// Only the invoice with the given document number.
    pub fn number(mut self, value: impl Into<String>) -> Self {
        self.number = Some(value.into());
        self
    }

    /// Only invoices in the given status.
    pub fn status(mut self, value: InvoiceStatus) -> Self {
        self.status = Some(value);
        self
    }

    /// Only invoices with the given custom id.
    pub fn custom_id(mut self, value: impl Into<String>) -> Self {
        self.custom_id = Some(value.into());
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(subject_id) = self.subject_id {
            params.push(("subject_id".to_string(), subject_id.to_string()));
        }
        if let Some(since) = &self.since {
            params.push(("since".to_string(), since.iso()));
        }
        if let Some(until) = &self.until {
            params.push(("until".to_string(), until.iso()));
        }
        if let Some(updated_since) = &self.updated_since {
            params.push(("updated_since".to_string(), updated_since.iso()));
        }
        if let Some(updated_until) = &self.updated_until {
            params.push(("updated_until".to_string(), updated_until.iso()));
        }
        if let Some(number) = &self.number {
            params.push(("number".to_string(), number.clone()));
        }
        if let Some(custom_id) = &self.custom_id {
            params.push(("custom_id".to_string(), custom_id.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(proforma) = self.proforma {
            let document_type = if proforma { "proforma" } else { "regular" };
            params.push(("document_type".to_string(), document_type.to_string()));
        }
        params
    }
}

/// Filters for the expenses listing.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilters {
    pub(crate) subject_id: Option<i64>,
    pub(crate) since: Option<FilterTime>,
    pub(crate) updated_since: Option<FilterTime>,
    pub(crate) number: Option<String>,
    pub(crate) status: Option<ExpenseStatus>,
    pub(crate) custom_id: Option<String>,
    pub(crate) variable_symbol: Option<String>,
}

impl ExpenseFilters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only expenses from the given subject.
    pub fn subject_id(mut self, value: i64) -> Self {
        self.subject_id = Some(value);
        self
    }

    /// Only expenses received since the given date or timestamp.
    pub fn since(mut self, value: impl Into<FilterTime>) -> Self {
        self.since = Some(value.into());
        self
    }

    /// Only expenses updated since the given date or timestamp.
    pub fn updated_since(mut self, value: impl Into<FilterTime>) -> Self {
        self.updated_since = Some(value.into());
        self
    }

    /// Only the expense with the given document number.
    pub fn number(mut self, value: impl Into<String>) -> Self {
        self.number = Some(value.into());
        self
    }

    /// Only expenses in the given status.
    pub fn status(mut self, value: ExpenseStatus) -> Self {
        self.status = Some(value);
        self
    }

    /// Only expenses with the given custom id.
    pub fn custom_id(mut self, value: impl Into<String>) -> Self {
        self.custom_id = Some(value.into());
        self
    }

    /// Only expenses with the given variable symbol.
    pub fn variable_symbol(mut self, value: impl Into<String>) -> Self {
        self.variable_symbol = Some(value.into());
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(subject_id) = self.subject_id {
            params.push(("subject_id".to_string(), subject_id.to_string()));
        }
        if let Some(since) = &self.since {
            params.push(("since".to_string(), since.iso()));
        }
        if let Some(updated_since) = &self.updated_since {
            params.push(("updated_since".to_string(), updated_since.iso()));
        }
        if let Some(number) = &self.number {
            params.push(("number".to_string(), number.clone()));
        }
        if let Some(custom_id) = &self.custom_id {
            params.push(("custom_id".to_string(), custom_id.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(variable_symbol) = &self.variable_symbol {
            params.push(("variable_symbol".to_string(), variable_symbol.clone()));
        }
        params
    }
}

/// Filters for the generators listing.
#[derive(Debug, Clone, Default)]
pub struct GeneratorFilters {
    pub(crate) recurring: Option<bool>,
    pub(crate) subject_id: Option<i64>,
    pub(crate) since: Option<FilterTime>,
}

impl GeneratorFilters {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to recurring (`true`) or template (`false`) generators.
    /// Routes to the dedicated sub-endpoint rather than a query parameter.
    pub fn recurring(mut self, value: bool) -> Self {
        self.recurring = Some(value);
        self
    }

    /// Only generators for the given subject.
    pub fn subject_id(mut self, value: i64) -> Self {
        self.subject_id = Some(value);
        self
    }

    /// Only generators created since the given date or timestamp.
    pub fn since(mut self, value: impl Into<FilterTime>) -> Self {
        self.since = Some(value.into());
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(subject_id) = self.subject_id {
            params.push(("subject_id".to_string(), subject_id.to_string()));
        }
        if let Some(since) = &self.since {
            params.push(("since".to_string(), since.iso()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_filter_time_iso() {
        let date: FilterTime = NaiveDate::from_ymd_opt(2023, 11, 5).unwrap().into();
        assert_eq!(date.iso(), "2023-11-05");

        let ts: FilterTime = DateTime::parse_from_rfc3339("2023-11-05T08:15:30Z")
            .unwrap()
            .with_timezone(&Utc)
            .into();
        assert_eq!(ts.iso(), "2023-11-05T08:15:30+00:00");
    }

    #[test_case("open", InvoiceStatus::Open)]
    #[test_case("sent", InvoiceStatus::Sent)]
    #[test_case("overdue", InvoiceStatus::Overdue)]
    #[test_case("paid", InvoiceStatus::Paid)]
    #[test_case("cancelled", InvoiceStatus::Cancelled)]
    fn test_invoice_status_parse(input: &str, expected: InvoiceStatus) {
        assert_eq!(input.parse::<InvoiceStatus>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let error = "payed".parse::<InvoiceStatus>().unwrap_err();
        assert!(error.is_caller_error());
        assert!(error.to_string().contains("payed"));

        assert!("sent".parse::<ExpenseStatus>().is_err());
    }

    #[test]
    fn test_invoice_params() {
        let filters = InvoiceFilters::new()
            .subject_id(28)
            .since(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
            .status(InvoiceStatus::Paid)
            .proforma(true);

        let params = filters.to_params();
        assert_eq!(
            params,
            vec![
                ("subject_id".to_string(), "28".to_string()),
                ("since".to_string(), "2023-01-01".to_string()),
                ("status".to_string(), "paid".to_string()),
                ("document_type".to_string(), "proforma".to_string()),
            ]
        );
    }

    #[test]
    fn test_unset_filters_omit_params() {
        assert!(InvoiceFilters::new().to_params().is_empty());
        assert!(SubjectFilters::new().to_params().is_empty());
        assert!(ExpenseFilters::new().to_params().is_empty());
    }

    #[test]
    fn test_regular_document_type() {
        let params = InvoiceFilters::new().proforma(false).to_params();
        assert_eq!(
            params,
            vec![("document_type".to_string(), "regular".to_string())]
        );
    }

    #[test]
    fn test_generator_params_exclude_recurring() {
        let params = GeneratorFilters::new().recurring(true).subject_id(28).to_params();
        assert_eq!(
            params,
            vec![("subject_id".to_string(), "28".to_string())]
        );
    }
}
