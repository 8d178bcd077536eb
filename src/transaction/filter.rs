//! The transient filter the client applies to the transaction table,
//! summary, and export.

use serde::Deserialize;
use time::Date;

use super::core::TransactionKind;

/// The filter submitted by the client as query parameters.
///
/// Every field is optional; an absent (or empty) field leaves that
/// dimension unconstrained. The date range is inclusive on both ends.
/// The filter is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionFilter {
    /// Keep only transactions of this kind.
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionKind>,
    /// Keep only transactions on or after this date.
    #[serde(default)]
    pub start_date: Option<Date>,
    /// Keep only transactions on or before this date.
    #[serde(default)]
    pub end_date: Option<Date>,
}

#[cfg(test)]
mod filter_tests {
    use time::macros::date;

    use crate::transaction::TransactionKind;

    use super::TransactionFilter;

    #[test]
    fn deserializes_from_query_parameters() {
        let got: TransactionFilter = serde_json::from_value(serde_json::json!({
            "type": "income",
            "start_date": "2024-01-01",
            "end_date": "2024-02-01",
        }))
        .unwrap();

        let want = TransactionFilter {
            kind: Some(TransactionKind::Income),
            start_date: Some(date!(2024 - 01 - 01)),
            end_date: Some(date!(2024 - 02 - 01)),
        };
        assert_eq!(got, want);
    }

    #[test]
    fn absent_parameters_leave_the_filter_open() {
        let got: TransactionFilter = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(got, TransactionFilter::default());
    }
}
