use super::payment::{Payment, PaymentStatus};
use crate::error::{Result, StoreError};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value that clears a filter field instead of setting it.
pub const MATCH_ALL: &str = "all";

/// The filter fields a UI can set individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    MemberName,
    Status,
    DueDate,
    Type,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::MemberName => "memberName",
            FilterField::Status => "status",
            FilterField::DueDate => "dueDate",
            FilterField::Type => "type",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "memberName" | "member_name" | "name" => Ok(FilterField::MemberName),
            "status" => Ok(FilterField::Status),
            "dueDate" | "due_date" => Ok(FilterField::DueDate),
            "type" | "kind" => Ok(FilterField::Type),
            other => Err(StoreError::Validation(format!(
                "Unknown filter field: {other}"
            ))),
        }
    }
}

/// A partial, AND-combined predicate over payments. `None` matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFilters {
    pub member_name: Option<String>,
    pub status: Option<PaymentStatus>,
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl PaymentFilters {
    pub fn is_empty(&self) -> bool {
        self.member_name.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.kind.is_none()
    }

    /// Sets one field from its UI string form.
    ///
    /// `"all"` and the empty string clear the field. Name and type values are
    /// stored exactly as given. On a parse error the filters are left as they
    /// were.
    pub fn set(&mut self, field: FilterField, value: &str) -> Result<()> {
        let raw = value.trim();
        let clear = raw.is_empty() || raw == MATCH_ALL;
        let invalid = || StoreError::InvalidFilter {
            field: field.to_string(),
            value: value.to_string(),
        };

        match field {
            FilterField::MemberName => {
                self.member_name = (!clear).then(|| value.to_string());
            }
            FilterField::Status => {
                self.status = if clear {
                    None
                } else {
                    Some(raw.parse().map_err(|_| invalid())?)
                };
            }
            FilterField::DueDate => {
                self.due_date = if clear {
                    None
                } else {
                    Some(parse_calendar_day(raw).ok_or_else(invalid)?)
                };
            }
            FilterField::Type => {
                self.kind = (!clear).then(|| value.to_string());
            }
        }
        Ok(())
    }

    pub fn matches(&self, payment: &Payment) -> bool {
        let matches_name = self.member_name.as_ref().is_none_or(|name| {
            payment
                .member
                .name
                .to_lowercase()
                .contains(&name.to_lowercase())
        });
        let matches_status = self.status.is_none_or(|status| payment.status == status);
        let matches_type = self.kind.as_ref().is_none_or(|kind| payment.kind == *kind);
        let matches_due_date = self.due_date.is_none_or(|day| payment.due_date == day);

        matches_name && matches_status && matches_type && matches_due_date
    }

    /// Returns the payments that satisfy every active predicate, in order.
    pub fn apply(&self, payments: &[Payment]) -> Vec<Payment> {
        payments.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; the time of day is dropped.
fn parse_calendar_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{Amount, Member, PaymentId};
    use rust_decimal_macros::dec;

    fn payment(id: &str, name: &str, status: PaymentStatus, kind: &str, day: u32) -> Payment {
        Payment {
            id: PaymentId::new(id),
            member_id: id.to_string(),
            member: Member {
                name: name.to_string(),
                email: format!("{id}@example.com"),
                phone: "+100".to_string(),
            },
            amount: Amount::new(dec!(10)).unwrap(),
            kind: kind.to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            status,
            description: None,
            reminders: None,
        }
    }

    fn sample() -> Vec<Payment> {
        vec![
            payment("1", "John Doe", PaymentStatus::Pending, "Monthly", 1),
            payment("2", "Jane Smith", PaymentStatus::Overdue, "Annual", 25),
            payment("3", "Johnny Cash", PaymentStatus::Paid, "Monthly", 25),
        ]
    }

    fn ids(payments: &[Payment]) -> Vec<&str> {
        payments.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filters_match_all() {
        let filters = PaymentFilters::default();
        assert!(filters.is_empty());
        assert_eq!(ids(&filters.apply(&sample())), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_name_is_case_insensitive_substring() {
        let mut filters = PaymentFilters::default();
        filters.set(FilterField::MemberName, "JOHN").unwrap();
        assert_eq!(ids(&filters.apply(&sample())), vec!["1", "3"]);
    }

    #[test]
    fn test_predicates_are_and_combined() {
        let mut filters = PaymentFilters::default();
        filters.set(FilterField::MemberName, "john").unwrap();
        filters.set(FilterField::Type, "Monthly").unwrap();
        filters.set(FilterField::DueDate, "2024-03-25").unwrap();
        assert_eq!(ids(&filters.apply(&sample())), vec!["3"]);
    }

    #[test]
    fn test_type_is_exact_match() {
        let mut filters = PaymentFilters::default();
        filters.set(FilterField::Type, "month").unwrap();
        assert!(filters.apply(&sample()).is_empty());

        filters.set(FilterField::Type, "Monthly ").unwrap();
        assert_eq!(filters.kind.as_deref(), Some("Monthly "));
        assert!(filters.apply(&sample()).is_empty());

        filters.set(FilterField::Type, " all ").unwrap();
        assert_eq!(filters.kind, None);
    }

    #[test]
    fn test_due_date_ignores_time_of_day() {
        let mut filters = PaymentFilters::default();
        filters
            .set(FilterField::DueDate, "2024-03-25T18:30:00+00:00")
            .unwrap();
        assert_eq!(filters.due_date, NaiveDate::from_ymd_opt(2024, 3, 25));
        assert_eq!(ids(&filters.apply(&sample())), vec!["2", "3"]);
    }

    #[test]
    fn test_all_clears_field() {
        let mut filters = PaymentFilters::default();
        filters.set(FilterField::Status, "overdue").unwrap();
        filters.set(FilterField::Status, MATCH_ALL).unwrap();
        assert_eq!(filters, PaymentFilters::default());
    }

    #[test]
    fn test_invalid_value_leaves_filters_untouched() {
        let mut filters = PaymentFilters::default();
        filters.set(FilterField::Status, "paid").unwrap();

        let err = filters.set(FilterField::Status, "refunded").unwrap_err();
        assert!(matches!(err, StoreError::InvalidFilter { .. }));
        assert!(filters.set(FilterField::DueDate, "next tuesday").is_err());

        assert_eq!(filters.status, Some(PaymentStatus::Paid));
        assert_eq!(filters.due_date, None);
    }

    #[test]
    fn test_field_names() {
        assert_eq!("memberName".parse::<FilterField>().unwrap(), FilterField::MemberName);
        assert_eq!("dueDate".parse::<FilterField>().unwrap(), FilterField::DueDate);
        let err = "amount".parse::<FilterField>().unwrap_err();
        assert!(matches!(&err, StoreError::Validation(msg) if msg == "Unknown filter field: amount"));
    }
}
