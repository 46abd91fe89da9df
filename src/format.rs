//! Text formatting helpers shared by the composer and the file naming logic.
//!
//! All helpers are total: they accept any input, including values that the
//! validation layer would reject, and always produce printable text.

use crate::itinerary::{PaymentInstallment, Timestamp};

/// Placeholder printed for absent dates.
pub const MISSING_DATE: &str = "-";

/// Currency assumed when an installment does not carry one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Status shown for installments without a recorded status.
pub const DEFAULT_PAYMENT_STATUS: &str = "Pending";

/// Formats a date as `Jan 2, 2024`, or `-` when absent.
pub fn format_date(value: Option<&Timestamp>) -> String {
    match value {
        Some(timestamp) => timestamp.format("%b %-d, %Y").to_string(),
        None => MISSING_DATE.to_owned(),
    }
}

/// Formats a timestamp as `Jan 2, 2024 15:04`, or `-` when absent.
pub fn format_date_time(value: Option<&Timestamp>) -> String {
    match value {
        Some(timestamp) => timestamp.format("%b %-d, %Y %H:%M").to_string(),
        None => MISSING_DATE.to_owned(),
    }
}

/// Formats an amount as `<CUR> <amount>` with exactly two decimals.
pub fn format_amount(amount: f64, currency: &str) -> String {
    let currency = currency.trim();
    let currency = if currency.is_empty() {
        DEFAULT_CURRENCY.to_owned()
    } else {
        currency.to_uppercase()
    };
    format!("{} {:.2}", currency, amount)
}

/// Lower-cases the trimmed input and upper-cases its first character.
pub fn title_case(value: &str) -> String {
    let lower = value.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders a night count, singular only for exactly one night.
pub fn nights_label(nights: i32) -> String {
    if nights == 1 {
        "1 night".to_owned()
    } else {
        format!("{} nights", nights)
    }
}

/// Display status for an installment; blank statuses read as `Pending`.
pub fn payment_status(installment: &PaymentInstallment) -> &str {
    let status = installment.status.trim();
    if status.is_empty() {
        DEFAULT_PAYMENT_STATUS
    } else {
        status
    }
}

/// Returns the installments ordered by installment number.
///
/// The sort is stable and works on borrowed values, so the caller's plan keeps
/// its order and contents.
pub fn sorted_installments(plan: &[PaymentInstallment]) -> Vec<&PaymentInstallment> {
    let mut ordered: Vec<&PaymentInstallment> = plan.iter().collect();
    ordered.sort_by_key(|installment| installment.installment_number);
    ordered
}

/// Reduces a string to a file-system friendly slug.
///
/// The input is lower-cased, whitespace runs become a single `-`, characters
/// outside `[a-z0-9-_]` are dropped, and leading/trailing `-`/`_` are trimmed.
pub fn sanitize_file_name(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let mut cleaned = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for ch in lowered.chars() {
        if ch.is_ascii_whitespace() {
            if !in_whitespace {
                cleaned.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_' {
            cleaned.push(ch);
        }
    }

    cleaned.trim_matches(|c| c == '-' || c == '_').to_owned()
}
