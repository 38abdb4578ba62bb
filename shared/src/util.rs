/// Fresh client-side idempotency token for a transaction submission
///
/// A UUID v4; the backend treats two submissions carrying the same token as
/// one transaction.
pub fn idempotency_key() -> String {
    uuid::Uuid::new_v4().to_string()
}
