use std::sync::Arc;
use std::time::Duration;
use table_acl::acl::{AclError, TableAcl};
use table_acl::clients::{MockPosApi, UpstreamError};

fn start(pos: &MockPosApi, credential: &str) -> TableAcl {
    let (actor, acl) = TableAcl::builder(Arc::new(pos.clone()))
        .credential(credential)
        .build();
    tokio::spawn(actor.run());
    acl
}

#[tokio::test]
async fn test_payment_builds_tender_request() {
    let pos = MockPosApi::new();
    pos.expect_payment().return_ok();
    let acl = start(&pos, "90001");

    acl.apply_payment("4102", "txn-1", "94.50", "84.50", "10.00")
        .await
        .unwrap();

    let requests = pos.payment_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.check_seq, 4102);
    assert_eq!(request.employee_id_num, "90001");
    assert_eq!(request.tender.reference, "txn-1");
    assert_eq!(request.tender.epayment.base_amount, "84.50");
    assert_eq!(request.tender.epayment.tip_amount, "10.00");
    pos.verify();
}

#[tokio::test]
async fn test_authenticate_on_clone_replaces_credential() {
    let pos = MockPosApi::new();
    pos.expect_payment().return_ok();
    let acl = start(&pos, "90001");
    acl.clone().authenticate("90002");

    acl.apply_payment("7", "txn-2", "5.00", "5.00", "0.00")
        .await
        .unwrap();

    assert_eq!(pos.payment_requests()[0].employee_id_num, "90002");
}

#[tokio::test]
async fn test_non_numeric_order_id_never_reaches_upstream() {
    let pos = MockPosApi::new();
    let acl = start(&pos, "90001");

    let result = acl.apply_payment("T-12", "txn-3", "1.00", "1.00", "0.00").await;

    let error = result.unwrap_err();
    assert!(matches!(error, AclError::InvalidOrderId { .. }));
    assert!(error.is_validation());
    assert!(pos.payment_requests().is_empty());
}

#[tokio::test]
async fn test_out_of_range_order_id_never_reaches_upstream() {
    let pos = MockPosApi::new();
    let acl = start(&pos, "90001");

    let result = acl
        .apply_payment("3000000000", "txn-4", "1.00", "1.00", "0.00")
        .await;

    assert_eq!(result, Err(AclError::OrderIdOutOfRange(3_000_000_000)));
    assert!(pos.payment_requests().is_empty());
}

#[tokio::test]
async fn test_upstream_rejection_is_returned_unchanged() {
    let pos = MockPosApi::new();
    let fault = UpstreamError::Remote {
        code: "E_CHECK_CLOSED".to_string(),
        message: "check is closed".to_string(),
    };
    pos.expect_payment().return_err(fault.clone());
    let acl = start(&pos, "90001");

    let result = acl.apply_payment("4102", "txn-5", "1.00", "1.00", "0.00").await;

    assert_eq!(result, Err(AclError::Upstream(fault)));
    assert_eq!(pos.payment_requests().len(), 1);
}

#[tokio::test]
async fn test_slow_payment_times_out() {
    let pos = MockPosApi::new().with_latency(Duration::from_millis(200));
    pos.expect_payment().return_ok();
    let (actor, acl) = TableAcl::builder(Arc::new(pos.clone()))
        .upstream_timeout(Some(Duration::from_millis(20)))
        .build();
    tokio::spawn(actor.run());

    let result = acl.apply_payment("4102", "txn-6", "1.00", "1.00", "0.00").await;

    assert_eq!(
        result,
        Err(AclError::Upstream(UpstreamError::Timeout(Duration::from_millis(20))))
    );
}
