//! Built-in data set the store starts from when no seed file is given.

use crate::domain::payment::{Amount, Member, Payment, PaymentId, PaymentStatus, Reminders};
use crate::domain::stats::PaymentStats;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

const JOHN_AMOUNT: Amount = Amount::from_cents(9999);
const JANE_AMOUNT: Amount = Amount::from_cents(14999);
const JOHN_DUE: NaiveDate = date(2024, 4, 1);
const JANE_DUE: NaiveDate = date(2024, 3, 25);

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid seed date"),
    }
}

fn default_reminders() -> Reminders {
    Reminders {
        types: vec!["email".to_string(), "whatsapp".to_string()],
        days: vec![3, 1, 0],
    }
}

pub fn payments() -> Vec<Payment> {
    vec![
        Payment {
            id: PaymentId::new("1"),
            member_id: "1".to_string(),
            member: Member {
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                phone: "+1234567890".to_string(),
            },
            amount: JOHN_AMOUNT,
            kind: "Monthly Membership".to_string(),
            due_date: JOHN_DUE,
            status: PaymentStatus::Pending,
            description: None,
            reminders: Some(default_reminders()),
        },
        Payment {
            id: PaymentId::new("2"),
            member_id: "2".to_string(),
            member: Member {
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
                phone: "+1234567891".to_string(),
            },
            amount: JANE_AMOUNT,
            kind: "Annual Membership".to_string(),
            due_date: JANE_DUE,
            status: PaymentStatus::Overdue,
            description: None,
            reminders: Some(default_reminders()),
        },
    ]
}

pub fn stats() -> PaymentStats {
    PaymentStats {
        total_due: dec!(2500),
        overdue: dec!(500),
        paid: dec!(1500),
        pending: dec!(500),
        overdue_count: 5,
        paid_count: 15,
        pending_count: 5,
        due_trend: "+12%".to_string(),
        overdue_trend: "-5%".to_string(),
        paid_trend: "+8%".to_string(),
        pending_trend: "-2%".to_string(),
    }
}
