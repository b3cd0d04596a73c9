#![allow(dead_code)]

use chrono::NaiveDate;
use dues::domain::payment::{Amount, Member, NewPayment, Payment, PaymentId, PaymentStatus};
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

pub fn payment(id: &str, name: &str, status: PaymentStatus, kind: &str, due: NaiveDate) -> Payment {
    Payment {
        id: PaymentId::new(id),
        member_id: format!("m{id}"),
        member: Member {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+15550000".to_string(),
        },
        amount: Amount::new(Decimal::new(1999, 2)).unwrap(),
        kind: kind.to_string(),
        due_date: due,
        status,
        description: None,
        reminders: None,
    }
}

pub fn new_payment(name: &str, status: Option<PaymentStatus>) -> NewPayment {
    NewPayment {
        member_id: "new".to_string(),
        member: Member {
            name: name.to_string(),
            email: "new@example.com".to_string(),
            phone: "+15551111".to_string(),
        },
        amount: Amount::new(Decimal::new(5000, 2)).unwrap(),
        kind: "Monthly Membership".to_string(),
        due_date: day(2024, 4, 15),
        status,
        description: Some("walk-in signup".to_string()),
        reminders: None,
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Writes `payments` to a temporary JSON seed file.
pub fn seed_file(payments: &[Payment]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    serde_json::to_writer(&mut file, payments).unwrap();
    file.flush().unwrap();
    file
}
