//! Per-resource field schemas.
//!
//! Each resource declares which fields the server owns (read-only, skipped
//! on serialization), which carry monetary decimals, and which prefixes are
//! denied outright. The schemas are plain consts handed to the generic
//! coercion and serialization routines in [`super::value`].

/// Field-level rules for one resource.
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    /// Fields the server owns; never serialized back.
    pub readonly: &'static [&'static str],
    /// Monetary fields exchanged as decimal strings.
    pub decimal: &'static [&'static str],
    /// Field-name prefixes denied on serialization regardless of the
    /// read-only list (denormalized subject copies on invoice-like models).
    pub readonly_prefixes: &'static [&'static str],
}

impl FieldSchema {
    /// True when the field carries a monetary decimal.
    pub fn is_decimal(&self, field: &str) -> bool {
        self.decimal.contains(&field)
    }

    /// True when the field may be written back to the server.
    pub fn is_writable(&self, field: &str) -> bool {
        if self
            .readonly_prefixes
            .iter()
            .any(|prefix| field.starts_with(prefix))
        {
            return false;
        }
        !self.readonly.contains(&field)
    }
}

const INVOICE_LIKE_PREFIXES: &[&str] = &["your_", "client_"];

/// Account settings resource.
pub const ACCOUNT: FieldSchema = FieldSchema {
    readonly: &[],
    decimal: &[],
    readonly_prefixes: &[],
};

/// Bank account resource.
pub const BANK_ACCOUNT: FieldSchema = FieldSchema {
    readonly: &[],
    decimal: &[],
    readonly_prefixes: &[],
};

/// Subject (contact) resource.
pub const SUBJECT: FieldSchema = FieldSchema {
    readonly: &[
        "id",
        "user_id",
        "unreliable",
        "unreliable_checked_at",
        "html_url",
        "url",
        "created_at",
        "updated_at",
    ],
    decimal: &[],
    readonly_prefixes: &[],
};

/// Invoice line resource.
pub const INVOICE_LINE: FieldSchema = FieldSchema {
    readonly: &[
        "id",
        "unit_price_without_vat",
        "unit_price_with_vat",
        "total_price_without_vat",
        "total_vat",
        "native_total_price_without_vat",
        "native_total_vat",
        "inventory",
    ],
    decimal: &["quantity", "unit_price"],
    readonly_prefixes: &[],
};

/// Invoice resource.
pub const INVOICE: FieldSchema = FieldSchema {
    readonly: &[
        "id",
        "your_name",
        "your_street",
        "your_city",
        "your_zip",
        "your_country",
        "your_registration_no",
        "your_vat_no",
        "your_local_vat_no",
        "generator_id",
        "token",
        "status",
        "due_on",
        "sent_at",
        "paid_at",
        "reminder_sent_at",
        "canceled_at",
        "uncollectible_at",
        "locked_at",
        "webinvoice_seen_on",
        "subtotal",
        "total",
        "native_subtotal",
        "native_total",
        "remaining_amount",
        "remaining_native_amount",
        "eet_records",
        "vat_rates_summary",
        "paid_advances",
        "payments",
        "html_url",
        "public_html_url",
        "url",
        "pdf_url",
        "subject_url",
        "created_at",
        "updated_at",
    ],
    decimal: &[
        "exchange_rate",
        "subtotal",
        "total",
        "native_subtotal",
        "native_total",
        "remaining_amount",
        "remaining_native_amount",
    ],
    readonly_prefixes: INVOICE_LIKE_PREFIXES,
};

/// Expense resource.
pub const EXPENSE: FieldSchema = FieldSchema {
    readonly: &[
        "id",
        "supplier_name",
        "supplier_street",
        "supplier_city",
        "supplier_zip",
        "supplier_country",
        "supplier_registration_no",
        "supplier_vat_no",
        "supplier_local_vat_no",
        "status",
        "paid_on",
        "locked_at",
        "subtotal",
        "total",
        "native_subtotal",
        "native_total",
        "vat_rates_summary",
        "payments",
        "html_url",
        "url",
        "subject_url",
        "created_at",
        "updated_at",
    ],
    decimal: &[
        "exchange_rate",
        "subtotal",
        "total",
        "native_subtotal",
        "native_total",
    ],
    readonly_prefixes: INVOICE_LIKE_PREFIXES,
};

/// Generator (invoice template) resource.
pub const GENERATOR: FieldSchema = FieldSchema {
    readonly: &[
        "id",
        "legacy_bank_details",
        "subtotal",
        "total",
        "native_subtotal",
        "native_total",
        "html_url",
        "url",
        "subject_url",
        "created_at",
        "updated_at",
    ],
    decimal: &[
        "exchange_rate",
        "subtotal",
        "total",
        "native_subtotal",
        "native_total",
    ],
    readonly_prefixes: INVOICE_LIKE_PREFIXES,
};

/// Invoice message resource.
pub const INVOICE_MESSAGE: FieldSchema = FieldSchema {
    readonly: &[],
    decimal: &[],
    readonly_prefixes: &[],
};

/// Invoice payment resource.
pub const INVOICE_PAYMENT: FieldSchema = FieldSchema {
    readonly: &["id", "tax_document_id", "created_at", "updated_at"],
    decimal: &["amount", "native_amount"],
    readonly_prefixes: &[],
};
