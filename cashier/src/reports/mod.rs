//! Report Projector
//!
//! Flattens transactions into display rows and a summary for the history
//! screen and for export. Labels are the Indonesian ones printed on the
//! shop's reports.

pub mod export;

pub use export::{ExportError, export_csv, write_csv, write_json};

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{DeliveryType, PaymentStatus, Transaction};

use crate::utils::time::format_local;

pub fn delivery_label(delivery_type: DeliveryType) -> &'static str {
    match delivery_type {
        DeliveryType::Pickup => "Ambil Langsung",
        DeliveryType::PreOrder => "Pre-Order (PO)",
    }
}

pub fn status_label(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "Sudah Dibayar",
        PaymentStatus::Pending => "Belum Dibayar",
    }
}

/// `Nasi Goreng (x2), Es Teh (x1)`
pub fn items_label(transaction: &Transaction) -> String {
    transaction
        .items
        .iter()
        .map(|item| format!("{} (x{})", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One exported line; field names are the column headers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Tanggal")]
    pub date: String,
    #[serde(rename = "Pembeli")]
    pub buyer: String,
    #[serde(rename = "Metode")]
    pub payment_method: String,
    #[serde(rename = "Tipe")]
    pub delivery: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Total")]
    pub total: Decimal,
    #[serde(rename = "Produk")]
    pub items: String,
}

/// Totals for one payment method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMethodBreakdown {
    pub method: String,
    pub amount: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReportSummary {
    pub transaction_count: usize,
    pub revenue: Decimal,
    pub paid_count: usize,
    pub paid_revenue: Decimal,
    pub pending_count: usize,
    pub pending_revenue: Decimal,
    /// Units sold across all transactions
    pub item_count: u64,
    /// Highest amount first
    pub by_payment_method: Vec<PaymentMethodBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Copy)]
pub struct ReportProjector {
    tz: Tz,
}

impl ReportProjector {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Rows in input order plus the summary over the same transactions
    pub fn project<'a, I>(&self, transactions: I) -> Report
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut report = Report::default();

        for tx in transactions {
            report.rows.push(self.row(tx));
            add_to_summary(&mut report.summary, tx);
        }

        report.summary.by_payment_method.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.method.cmp(&b.method))
        });
        report
    }

    fn row(&self, tx: &Transaction) -> ReportRow {
        ReportRow {
            id: tx.id.clone(),
            date: format_local(tx.created_at, self.tz),
            buyer: tx.buyer_name.clone(),
            payment_method: tx.payment_method.name.clone(),
            delivery: delivery_label(tx.delivery_type).to_string(),
            status: status_label(tx.payment_status).to_string(),
            total: tx.total,
            items: items_label(tx),
        }
    }
}

fn add_to_summary(summary: &mut ReportSummary, tx: &Transaction) {
    summary.transaction_count += 1;
    summary.revenue += tx.total;
    summary.item_count += u64::from(tx.item_count());

    if tx.is_paid() {
        summary.paid_count += 1;
        summary.paid_revenue += tx.total;
    } else {
        summary.pending_count += 1;
        summary.pending_revenue += tx.total;
    }

    let method = &tx.payment_method.name;
    match summary
        .by_payment_method
        .iter_mut()
        .find(|b| &b.method == method)
    {
        Some(breakdown) => {
            breakdown.amount += tx.total;
            breakdown.count += 1;
        }
        None => summary.by_payment_method.push(PaymentMethodBreakdown {
            method: method.clone(),
            amount: tx.total,
            count: 1,
        }),
    }
}
