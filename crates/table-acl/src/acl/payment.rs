//! Applying payments to open checks.

use super::{AclError, TableAcl};
use crate::model::AddToCheckRequest;
use tracing::{info, instrument, warn};

/// Parses an order id into the upstream's check sequence number.
///
/// The id must be a base-10 integer that fits in 32 bits; anything else is
/// rejected here, before any request is built.
pub fn parse_check_seq(order_id: &str) -> Result<i32, AclError> {
    let value: i64 = order_id
        .parse()
        .map_err(|e: std::num::ParseIntError| AclError::InvalidOrderId {
            order_id: order_id.to_string(),
            reason: e.to_string(),
        })?;
    i32::try_from(value).map_err(|_| AclError::OrderIdOutOfRange(value))
}

impl TableAcl {
    /// Tenders a payment against the check identified by `order_id`.
    ///
    /// `bill` and `tip` are passed through as decimal strings. `total` is only
    /// logged; the backend derives it. Upstream failures are returned unchanged.
    #[instrument(skip(self))]
    pub async fn apply_payment(
        &self,
        order_id: &str,
        txn_id: &str,
        total: &str,
        bill: &str,
        tip: &str,
    ) -> Result<(), AclError> {
        info!("Applying payment");

        let check_seq =
            parse_check_seq(order_id).inspect_err(|e| warn!(error = %e, "Rejected order id"))?;

        let employee_id_num = self.employee_id_num();
        let request = AddToCheckRequest::new(check_seq, &employee_id_num, txn_id, bill, tip);
        self.call_upstream(self.api.add_to_existing_check(request))
            .await
            .inspect_err(|e| warn!(check_seq, error = %e, "Payment rejected upstream"))?;

        info!(check_seq, "Payment applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_seq_accepts_int32() {
        assert_eq!(parse_check_seq("1001"), Ok(1001));
        assert_eq!(parse_check_seq("-7"), Ok(-7));
        assert_eq!(parse_check_seq("2147483647"), Ok(i32::MAX));
    }

    #[test]
    fn test_parse_check_seq_rejects_non_numeric() {
        let error = parse_check_seq("12a").unwrap_err();
        assert!(matches!(
            error,
            AclError::InvalidOrderId { ref order_id, .. } if order_id == "12a"
        ));
        assert!(parse_check_seq("").is_err());
        assert!(parse_check_seq(" 12").is_err());
    }

    #[test]
    fn test_parse_check_seq_rejects_out_of_range() {
        assert_eq!(
            parse_check_seq("2147483648"),
            Err(AclError::OrderIdOutOfRange(2_147_483_648))
        );
        assert_eq!(
            parse_check_seq("-2147483649"),
            Err(AclError::OrderIdOutOfRange(-2_147_483_649))
        );
    }
}
