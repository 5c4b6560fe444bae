//! # Table ACL Demo
//!
//! Runs the adapter against a scripted point-of-sale backend:
//! 1. Starts a [`PosSystem`] with an in-memory cache.
//! 2. Fires several concurrent lookups for one table; they share one upstream call.
//! 3. Looks the table up again, this time from the cache.
//! 4. Applies a payment to the check found there.

use coalesce::tracing::setup_tracing;
use std::sync::Arc;
use std::time::Duration;
use table_acl::clients::MockPosApi;
use table_acl::lifecycle::{AclConfig, PosSystem};
use table_acl::model::{RawCheck, RawSeat};
use tracing::{error, info, Instrument};

fn seats(names: &[&str]) -> Vec<RawSeat> {
    names
        .iter()
        .zip(1..)
        .map(|(name, seat_num)| RawSeat {
            seat_num,
            guest_name: Some(name.to_string()),
        })
        .collect()
}

fn open_checks() -> Vec<RawCheck> {
    vec![
        RawCheck {
            check_seq: 4101,
            check_num: 17,
            check_id: "BAR-17".to_string(),
            check_name: "Bar tab".to_string(),
            revenue_center_id: 1,
            table_object_num: 0,
            guest_count: 1,
            total_due: "12.00".to_string(),
            ..RawCheck::default()
        },
        RawCheck {
            check_seq: 4102,
            check_num: 18,
            check_id: "T12".to_string(),
            check_name: "Window".to_string(),
            revenue_center_id: 1,
            table_object_num: 12,
            floor: Some("ground".to_string()),
            section: Some("patio".to_string()),
            guest_count: 2,
            total_due: "84.50".to_string(),
            open_time: Some("2026-10-17T19:02:00".to_string()),
            seats: seats(&["Ada", "Grace"]),
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting table ACL demo");

    let pos = MockPosApi::new().with_latency(Duration::from_millis(50));
    pos.serve_open_checks(open_checks());
    pos.expect_payment().return_ok();

    let config = AclConfig {
        credential: "90001".to_string(),
        cache_max_entries: Some(1_000),
        cache_ttl: Some(Duration::from_secs(60)),
        ..AclConfig::default()
    };
    let system = PosSystem::start(Arc::new(pos.clone()), config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("cold_lookups");
    let lookups = async {
        let mut handles = Vec::new();
        for _ in 0..5 {
            let acl = system.acl.clone();
            handles.push(tokio::spawn(async move {
                acl.fetch_table("1", "ground", "patio", "12").await
            }));
        }
        let mut found = 0;
        for handle in handles {
            if handle.await.map_err(|e| e.to_string())?.is_ok() {
                found += 1;
            }
        }
        Ok::<_, String>(found)
    }
    .instrument(span)
    .await?;
    info!(lookups, upstream_calls = pos.open_checks_calls(), "Cold lookups done");

    let table = system
        .acl
        .fetch_table("1", "ground", "patio", "12")
        .await
        .map_err(|e| e.to_string())?;
    info!(upstream_calls = pos.open_checks_calls(), "Warm lookup done");
    println!(
        "{}",
        serde_json::to_string_pretty(&table).map_err(|e| e.to_string())?
    );

    let span = tracing::info_span!("payment");
    let payment = async {
        system
            .acl
            .apply_payment(&table.order_id(), "txn-7781", "94.50", "84.50", "10.00")
            .await
    }
    .instrument(span)
    .await;

    match payment {
        Ok(()) => info!(order_id = %table.order_id(), "Payment applied"),
        Err(e) => error!(error = %e, "Payment failed"),
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
