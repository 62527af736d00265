//! Lifecycle events for invoices and expenses.
//!
//! Firing an event posts to the document's `fire` endpoint with the event
//! name and its arguments as query parameters. Each event accepts a fixed
//! set of named arguments; anything outside that set, or a wrongly typed
//! value, is rejected before a request is dispatched.

use crate::errors::{FakturoidError, FakturoidErrorKind, FakturoidResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Expected type of one event argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Calendar date, serialized as ISO-8601.
    Date,
    /// Monetary amount, serialized as a decimal string.
    Amount,
    /// Plain text.
    Text,
    /// Integer record id.
    Id,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => f.write_str("date"),
            Self::Amount => f.write_str("decimal amount"),
            Self::Text => f.write_str("text"),
            Self::Id => f.write_str("integer id"),
        }
    }
}

/// One event argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum EventValue {
    /// Calendar date.
    Date(NaiveDate),
    /// Monetary amount.
    Amount(Decimal),
    /// Plain text.
    Text(String),
    /// Integer record id.
    Id(i64),
}

impl EventValue {
    fn kind(&self) -> ArgKind {
        match self {
            Self::Date(_) => ArgKind::Date,
            Self::Amount(_) => ArgKind::Amount,
            Self::Text(_) => ArgKind::Text,
            Self::Id(_) => ArgKind::Id,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Amount(a) => a.to_string(),
            Self::Text(t) => t.clone(),
            Self::Id(i) => i.to_string(),
        }
    }
}

/// Named arguments attached to a fired event.
#[derive(Debug, Clone, Default)]
pub struct EventArgs {
    entries: Vec<(String, EventValue)>,
}

impl EventArgs {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a date argument.
    pub fn date(self, name: impl Into<String>, value: NaiveDate) -> Self {
        self.push(name, EventValue::Date(value))
    }

    /// Adds a monetary amount argument.
    pub fn amount(self, name: impl Into<String>, value: Decimal) -> Self {
        self.push(name, EventValue::Amount(value))
    }

    /// Adds a text argument.
    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, EventValue::Text(value.into()))
    }

    /// Adds an integer id argument.
    pub fn id(self, name: impl Into<String>, value: i64) -> Self {
        self.push(name, EventValue::Id(value))
    }

    fn push(mut self, name: impl Into<String>, value: EventValue) -> Self {
        self.entries.push((name.into(), value));
        self
    }

    /// True when no arguments were added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks every argument against the event's accepted set.
    pub(crate) fn validate(
        &self,
        event: &str,
        allowed: &'static [(&'static str, ArgKind)],
    ) -> FakturoidResult<()> {
        for (name, value) in &self.entries {
            match allowed.iter().find(|(n, _)| *n == name.as_str()) {
                None => {
                    let names: Vec<&str> = allowed.iter().map(|(n, _)| *n).collect();
                    let message = if names.is_empty() {
                        format!("no arguments can be used with {}", event)
                    } else {
                        format!("only {} can be used with {}", names.join(", "), event)
                    };
                    return Err(FakturoidError::new(
                        FakturoidErrorKind::InvalidEventArgument,
                        message,
                    ));
                }
                Some((_, kind)) if *kind != value.kind() => {
                    return Err(FakturoidError::new(
                        FakturoidErrorKind::InvalidEventArgument,
                        format!("'{}' argument must be a {}", name, kind),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.clone(), value.render()))
            .collect()
    }
}

/// Lifecycle events accepted by invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceEvent {
    /// Mark as sent without emailing the client.
    MarkAsSent,
    /// Email the invoice to the client.
    Deliver,
    /// Record a full payment. Accepts `paid_at` and `paid_amount`.
    Pay,
    /// Pay a proforma and issue the final invoice.
    PayProforma,
    /// Pay a partial proforma.
    PayPartialProforma,
    /// Remove the last payment.
    RemovePayment,
    /// Email a payment reminder.
    DeliverReminder,
    /// Cancel the invoice.
    Cancel,
    /// Undo a cancellation.
    UndoCancel,
}

impl InvoiceEvent {
    /// Query-parameter value of the event.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MarkAsSent => "mark_as_sent",
            Self::Deliver => "deliver",
            Self::Pay => "pay",
            Self::PayProforma => "pay_proforma",
            Self::PayPartialProforma => "pay_partial_proforma",
            Self::RemovePayment => "remove_payment",
            Self::DeliverReminder => "deliver_reminder",
            Self::Cancel => "cancel",
            Self::UndoCancel => "undo_cancel",
        }
    }

    /// Arguments the event accepts; empty means none are allowed.
    pub(crate) fn allowed_args(self) -> &'static [(&'static str, ArgKind)] {
        match self {
            Self::Pay => &[("paid_at", ArgKind::Date), ("paid_amount", ArgKind::Amount)],
            _ => &[],
        }
    }
}

impl FromStr for InvoiceEvent {
    type Err = FakturoidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mark_as_sent" => Ok(Self::MarkAsSent),
            "deliver" => Ok(Self::Deliver),
            "pay" => Ok(Self::Pay),
            "pay_proforma" => Ok(Self::PayProforma),
            "pay_partial_proforma" => Ok(Self::PayPartialProforma),
            "remove_payment" => Ok(Self::RemovePayment),
            "deliver_reminder" => Ok(Self::DeliverReminder),
            "cancel" => Ok(Self::Cancel),
            "undo_cancel" => Ok(Self::UndoCancel),
            other => Err(FakturoidError::new(
                FakturoidErrorKind::InvalidEvent,
                format!("invalid invoice event '{}'", other),
            )),
        }
    }
}

impl fmt::Display for InvoiceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle events accepted by expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseEvent {
    /// Remove the last payment.
    RemovePayment,
    /// Mark the expense as delivered.
    Deliver,
    /// Record a payment. Accepts `paid_on`, `paid_amount`,
    /// `variable_symbol` and `bank_account_id`.
    Pay,
    /// Lock the expense.
    Lock,
    /// Unlock the expense.
    Unlock,
}

impl ExpenseEvent {
    /// Query-parameter value of the event.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RemovePayment => "remove_payment",
            Self::Deliver => "deliver",
            Self::Pay => "pay",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
        }
    }

    /// Arguments the event accepts; empty means none are allowed.
    pub(crate) fn allowed_args(self) -> &'static [(&'static str, ArgKind)] {
        match self {
            Self::Pay => &[
                ("paid_on", ArgKind::Date),
                ("paid_amount", ArgKind::Amount),
                ("variable_symbol", ArgKind::Text),
                ("bank_account_id", ArgKind::Id),
            ],
            _ => &[],
        }
    }
}

impl FromStr for ExpenseEvent {
    type Err = FakturoidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remove_payment" => Ok(Self::RemovePayment),
            "deliver" => Ok(Self::Deliver),
            "pay" => Ok(Self::Pay),
            "lock" => Ok(Self::Lock),
            "unlock" => Ok(Self::Unlock),
            other => Err(FakturoidError::new(
                FakturoidErrorKind::InvalidEvent,
                format!("invalid expense event '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ExpenseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr as _;

    #[test]
    fn test_pay_accepts_whitelisted_args() {
        let args = EventArgs::new()
            .date("paid_at", NaiveDate::from_ymd_opt(2023, 11, 8).unwrap())
            .amount("paid_amount", Decimal::from_str("605.0").unwrap());

        assert!(args
            .validate("pay", InvoiceEvent::Pay.allowed_args())
            .is_ok());
        assert_eq!(
            args.to_params(),
            vec![
                ("paid_at".to_string(), "2023-11-08".to_string()),
                ("paid_amount".to_string(), "605.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_unlisted_argument_rejected() {
        let args = EventArgs::new().text("note", "thanks");
        let error = args
            .validate("pay", InvoiceEvent::Pay.allowed_args())
            .unwrap_err();

        assert_eq!(*error.kind(), FakturoidErrorKind::InvalidEventArgument);
        assert!(error.to_string().contains("paid_at"));
    }

    #[test]
    fn test_event_without_declared_args_rejects_any() {
        let args = EventArgs::new().text("reason", "duplicate");
        let error = args
            .validate("cancel", InvoiceEvent::Cancel.allowed_args())
            .unwrap_err();

        assert!(error.to_string().contains("no arguments"));
    }

    #[test]
    fn test_wrongly_typed_argument_rejected() {
        let args = EventArgs::new().text("paid_at", "2023-11-08");
        let error = args
            .validate("pay", InvoiceEvent::Pay.allowed_args())
            .unwrap_err();

        assert_eq!(*error.kind(), FakturoidErrorKind::InvalidEventArgument);
        assert!(error.to_string().contains("date"));
    }

    #[test]
    fn test_expense_pay_whitelist() {
        let args = EventArgs::new()
            .date("paid_on", NaiveDate::from_ymd_opt(2023, 11, 8).unwrap())
            .text("variable_symbol", "20230108")
            .id("bank_account_id", 4);

        assert!(args
            .validate("pay", ExpenseEvent::Pay.allowed_args())
            .is_ok());

        // paid_at belongs to invoices, not expenses
        let args = EventArgs::new().date("paid_at", NaiveDate::from_ymd_opt(2023, 11, 8).unwrap());
        assert!(args
            .validate("pay", ExpenseEvent::Pay.allowed_args())
            .is_err());
    }

    #[test]
    fn test_event_parse() {
        assert_eq!(
            InvoiceEvent::from_str("mark_as_sent").unwrap(),
            InvoiceEvent::MarkAsSent
        );
        let error = InvoiceEvent::from_str("shred").unwrap_err();
        assert_eq!(*error.kind(), FakturoidErrorKind::InvalidEvent);

        assert_eq!(ExpenseEvent::from_str("lock").unwrap(), ExpenseEvent::Lock);
        assert!(ExpenseEvent::from_str("mark_as_sent").is_err());
    }
}
