//! Transaction Ledger
//!
//! Local record of submitted transactions. Records are appended after the
//! backend accepted them and never removed; only the payment status changes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::{PaymentStatus, Transaction};
use thiserror::Error;

use crate::utils::time::{day_start, local_date, month_start, next_month_start, week_start};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Transaction not found: {0}")]
    NotFound(String),
}

/// Calendar window relative to "now" in the business time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    #[default]
    All,
    Today,
    /// Monday 00:00 until next Monday 00:00
    ThisWeek,
    ThisMonth,
}

impl Period {
    /// Half-open `[start, end)` window, `None` for [`Period::All`]
    pub fn window(self, now: DateTime<Utc>, tz: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let today = local_date(now, tz);
        let (start, end) = match self {
            Self::All => return None,
            Self::Today => (today, today + Duration::days(1)),
            Self::ThisWeek => {
                let monday = week_start(today);
                (monday, monday + Duration::days(7))
            }
            Self::ThisMonth => (month_start(today), next_month_start(today)),
        };
        Some((day_start(start, tz), day_start(end, tz)))
    }

    pub fn contains(self, instant: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> bool {
        match self.window(now, tz) {
            Some((start, end)) => start <= instant && instant < end,
            None => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::ThisWeek => "week",
            Self::ThisMonth => "month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown period: {0} (expected all, today, week or month)")]
pub struct UnknownPeriod(pub String);

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "semua" => Ok(Self::All),
            "today" | "hari-ini" => Ok(Self::Today),
            "week" | "this-week" | "minggu-ini" => Ok(Self::ThisWeek),
            "month" | "this-month" | "bulan-ini" => Ok(Self::ThisMonth),
            other => Err(UnknownPeriod(other.to_string())),
        }
    }
}

/// History filter: free text plus a calendar period
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerQuery {
    pub text: String,
    pub period: Period,
}

impl LedgerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }
}

/// Lazy view over the ledger
///
/// Nothing is evaluated until iterated; every call to [`LedgerView::iter`]
/// starts over from the first record.
pub struct LedgerView<'a, P> {
    transactions: &'a [Transaction],
    predicate: P,
}

impl<'a, P> LedgerView<'a, P>
where
    P: Fn(&Transaction) -> bool,
{
    pub fn iter(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.transactions.iter().filter(|tx| (self.predicate)(*tx))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Sum of stored totals
    pub fn total(&self) -> Decimal {
        self.iter().map(|tx| tx.total).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction; a record with the same id is replaced in place
    pub fn append(&mut self, transaction: Transaction) {
        if let Some(existing) = self
            .transactions
            .iter_mut()
            .find(|tx| tx.id == transaction.id)
        {
            tracing::debug!(
                transaction_id = %transaction.id,
                "Transaction already in ledger, replaced"
            );
            *existing = transaction;
            return;
        }
        tracing::debug!(
            transaction_id = %transaction.id,
            total = %transaction.total,
            "Transaction appended to ledger"
        );
        self.transactions.push(transaction);
    }

    /// Change the payment status of one record, leaving every other field as is
    pub fn set_payment_status(
        &mut self,
        id: &str,
        status: PaymentStatus,
    ) -> Result<&Transaction, LedgerError> {
        let transaction = self
            .transactions
            .iter_mut()
            .find(|tx| tx.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        transaction.payment_status = status;
        Ok(transaction)
    }

    /// Swap in a fresh copy loaded from the backend
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    pub fn filter<P>(&self, predicate: P) -> LedgerView<'_, P>
    where
        P: Fn(&Transaction) -> bool,
    {
        LedgerView {
            transactions: &self.transactions,
            predicate,
        }
    }

    /// Case-insensitive substring match on buyer name or any item name
    pub fn search(&self, text: &str) -> LedgerView<'_, impl Fn(&Transaction) -> bool + use<>> {
        let needle = text.trim().to_lowercase();
        self.filter(move |tx| tx.matches_text(&needle))
    }

    /// Text and period filter, newest first
    pub fn query(&self, query: &LedgerQuery, now: DateTime<Utc>, tz: Tz) -> Vec<&Transaction> {
        let needle = query.text.trim().to_lowercase();
        let window = query.period.window(now, tz);

        let mut matches: Vec<&Transaction> = self
            .transactions
            .iter()
            .rev()
            .filter(|tx| match window {
                Some((start, end)) => start <= tx.created_at && tx.created_at < end,
                None => true,
            })
            .filter(|tx| tx.matches_text(&needle))
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::{DeliveryType, PaymentMethodRef, TransactionItem, WALK_IN_BUYER};

    const TZ: Tz = chrono_tz::Asia::Jakarta;

    fn create_test_transaction(
        id: &str,
        buyer: &str,
        item: &str,
        created_at: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id: id.into(),
            created_at,
            buyer_name: buyer.into(),
            delivery_type: if buyer == WALK_IN_BUYER {
                DeliveryType::Pickup
            } else {
                DeliveryType::PreOrder
            },
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethodRef {
                id: "pm1".into(),
                name: "Tunai".into(),
            },
            items: vec![TransactionItem {
                product_id: format!("p-{id}"),
                name: item.into(),
                price: Decimal::from(10000),
                quantity: 1,
            }],
            total: Decimal::from(10000),
            idempotency_key: None,
        }
    }

    /// Wednesday 2026-10-21 14:00 in Jakarta
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 21, 7, 0, 0).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let now = now();
        ledger.append(create_test_transaction("t1", "Siti", "Nasi Goreng", now - Duration::days(8)));
        ledger.append(create_test_transaction("t2", WALK_IN_BUYER, "Es Teh", now - Duration::days(2)));
        ledger.append(create_test_transaction("t3", "Budi", "Kopi Susu", now - Duration::hours(1)));
        ledger.append(create_test_transaction("t4", WALK_IN_BUYER, "Ayam Geprek", now));
        ledger
    }

    #[test]
    fn test_set_payment_status_patches_only_status() {
        let mut ledger = sample_ledger();
        let before = ledger.get("t3").unwrap().clone();

        let after = ledger.set_payment_status("t3", PaymentStatus::Paid).unwrap().clone();

        assert_eq!(after.payment_status, PaymentStatus::Paid);
        assert_eq!(
            Transaction {
                payment_status: before.payment_status,
                ..after
            },
            before
        );
        assert_eq!(
            ledger.set_payment_status("nope", PaymentStatus::Paid).unwrap_err(),
            LedgerError::NotFound("nope".into())
        );
    }

    #[test]
    fn test_status_toggles_back_and_forth() {
        let mut ledger = sample_ledger();
        ledger.set_payment_status("t1", PaymentStatus::Paid).unwrap();
        ledger.set_payment_status("t1", PaymentStatus::Pending).unwrap();
        assert_eq!(ledger.get("t1").unwrap().payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_today_includes_now_excludes_eight_days_ago() {
        let now = now();
        assert!(Period::Today.contains(now, now, TZ));
        assert!(!Period::Today.contains(now - Duration::days(8), now, TZ));
        assert!(Period::All.contains(now - Duration::days(800), now, TZ));
    }

    #[test]
    fn test_week_starts_on_monday() {
        let now = now();
        let (start, end) = Period::ThisWeek.window(now, TZ).unwrap();
        // Monday 2026-10-19 00:00 WIB
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 10, 18, 17, 0, 0).unwrap());
        assert_eq!(end - start, Duration::days(7));
        assert!(Period::ThisWeek.contains(now - Duration::days(2), now, TZ));
        assert!(!Period::ThisWeek.contains(now - Duration::days(3), now, TZ));
    }

    #[test]
    fn test_month_window() {
        let now = now();
        let (start, end) = Period::ThisMonth.window(now, TZ).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 9, 30, 17, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 10, 31, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_search_is_case_insensitive_and_restartable() {
        let ledger = sample_ledger();

        let view = ledger.search("KOPI");
        assert_eq!(view.count(), 1);
        assert_eq!(view.iter().next().unwrap().id, "t3");
        // A second pass sees the same records
        assert_eq!(view.iter().count(), 1);

        assert_eq!(ledger.search("siti").count(), 1);
        assert_eq!(ledger.search("umum").count(), 2);
        assert_eq!(ledger.search("").count(), 4);
    }

    #[test]
    fn test_filter_view_totals() {
        let ledger = sample_ledger();
        let pre_orders = ledger.filter(|tx| tx.is_pre_order());
        assert_eq!(pre_orders.count(), 2);
        assert_eq!(pre_orders.total(), Decimal::from(20000));
    }

    #[test]
    fn test_query_combines_text_and_period_newest_first() {
        let ledger = sample_ledger();
        let now = now();

        let all: Vec<&str> = ledger
            .query(&LedgerQuery::new(), now, TZ)
            .into_iter()
            .map(|tx| tx.id.as_str())
            .collect();
        assert_eq!(all, vec!["t4", "t3", "t2", "t1"]);

        let week = ledger.query(&LedgerQuery::new().with_period(Period::ThisWeek), now, TZ);
        assert_eq!(week.len(), 3);

        let week_walk_in = ledger.query(
            &LedgerQuery::new()
                .with_period(Period::ThisWeek)
                .with_text("umum"),
            now,
            TZ,
        );
        let ids: Vec<&str> = week_walk_in.iter().map(|tx| tx.id.as_str()).collect();
        assert_eq!(ids, vec!["t4", "t2"]);
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("today".parse::<Period>(), Ok(Period::Today));
        assert_eq!("Minggu-Ini".parse::<Period>(), Ok(Period::ThisWeek));
        assert_eq!("month".parse::<Period>(), Ok(Period::ThisMonth));
        assert!("year".parse::<Period>().is_err());
    }

    #[test]
    fn test_append_same_id_replaces() {
        let mut ledger = sample_ledger();
        let mut again = create_test_transaction("t3", "Budi", "Kopi Susu", now());
        again.idempotency_key = Some("k1".into());

        ledger.append(again);

        assert_eq!(ledger.len(), 4);
        assert_eq!(ledger.iter().filter(|tx| tx.id == "t3").count(), 1);
        assert_eq!(
            ledger.get("t3").and_then(|tx| tx.idempotency_key.as_deref()),
            Some("k1")
        );
    }

    #[test]
    fn test_replace_all() {
        let mut ledger = sample_ledger();
        ledger.replace_all(vec![create_test_transaction("t9", "Ani", "Roti", now())]);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get("t1").is_none());
    }
}
