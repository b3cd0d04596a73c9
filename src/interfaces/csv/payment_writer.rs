use crate::domain::payment::Payment;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct PaymentRow<'a> {
    id: &'a str,
    member: &'a str,
    email: &'a str,
    amount: String,
    #[serde(rename = "type")]
    kind: &'a str,
    due_date: String,
    status: &'static str,
}

impl<'a> From<&'a Payment> for PaymentRow<'a> {
    fn from(payment: &'a Payment) -> Self {
        Self {
            id: payment.id.as_str(),
            member: &payment.member.name,
            email: &payment.member.email,
            amount: payment.amount.to_string(),
            kind: &payment.kind,
            due_date: payment.due_date.format("%Y-%m-%d").to_string(),
            status: payment.status.as_str(),
        }
    }
}

/// Writes a payment list as a flat CSV table, one row per payment.
pub struct PaymentWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_payments<'a>(&mut self, payments: impl IntoIterator<Item = &'a Payment>) -> Result<()> {
        let mut wrote_any = false;
        for payment in payments {
            self.writer.serialize(PaymentRow::from(payment))?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer
                .write_record(["id", "member", "email", "amount", "type", "due_date", "status"])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
