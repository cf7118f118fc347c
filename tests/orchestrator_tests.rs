mod support;

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;

use sentinelpay::application::publisher::EventPublisher;
use sentinelpay::domain::{Metadata, PaymentRequest, Provider, TransactionStatus};
use sentinelpay::error::Error;
use sentinelpay::infrastructure::bootstrap::Services;
use sentinelpay::port::inbound::payment::Page;
use sentinelpay::port::outbound::store::TransactionStore;

use support::config::offline_config;
use support::store::ProbeStore;
use support::transport::RecordingTransport;

fn connected(store: ProbeStore, transport: &RecordingTransport) -> Services<ProbeStore> {
    Services::assemble(
        &offline_config(),
        Arc::new(store),
        EventPublisher::with_transport(Box::new(transport.clone())),
    )
}

#[tokio::test]
async fn small_payment_is_scored_routed_published_and_cached() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::new(), &transport);

    let txn = services
        .orchestrator
        .create_transaction(PaymentRequest::new("user-1", dec!(50), "USD"))
        .await
        .unwrap();

    assert_eq!(txn.risk_score, 0.0);
    assert!(!txn.fraud_detected);
    assert_eq!(txn.provider, Provider::Stripe);
    assert_eq!(txn.status, TransactionStatus::Processing);

    let sent = transport.sent_json();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "payment.created");
    assert_eq!(sent[0].1["id"], txn.id.as_str());
    assert_eq!(sent[0].1["status"], "processing");
    assert_eq!(transport.declared(), vec!["payment.created".to_string()]);

    assert_eq!(services.cache.get(&txn.id), Some(txn.clone()));
    assert_eq!(services.store.inserts(), 1);
}

#[tokio::test]
async fn large_payment_is_flagged_but_still_processing() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::new(), &transport);

    let txn = services
        .orchestrator
        .create_transaction(PaymentRequest::new("user-1", dec!(6000), "USD"))
        .await
        .unwrap();

    assert_eq!(txn.risk_score, 0.75);
    assert!(txn.fraud_detected);
    assert_eq!(txn.provider, Provider::Paypal);
    assert_eq!(txn.status, TransactionStatus::Processing);
}

#[tokio::test]
async fn persistence_failure_publishes_and_caches_nothing() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::failing_inserts(), &transport);

    let result = services
        .orchestrator
        .create_transaction(PaymentRequest::new("user-1", dec!(50), "USD"))
        .await;

    assert!(matches!(result, Err(Error::Database(_))));
    assert!(transport.sent().is_empty());
    assert!(services.cache.is_empty());
}

#[tokio::test]
async fn publish_failure_does_not_fail_the_create() {
    let transport = RecordingTransport::failing();
    let services = connected(ProbeStore::new(), &transport);

    let txn = services
        .orchestrator
        .create_transaction(PaymentRequest::new("user-1", dec!(50), "USD"))
        .await
        .unwrap();

    assert!(services.cache.get(&txn.id).is_some());
    assert_eq!(services.store.len(), 1);
}

#[tokio::test]
async fn fallback_publisher_still_completes_the_create() {
    let services = Services::assemble(
        &offline_config(),
        Arc::new(ProbeStore::new()),
        EventPublisher::fallback(),
    );

    let txn = services
        .orchestrator
        .create_transaction(PaymentRequest::new("user-1", dec!(50), "USD"))
        .await
        .unwrap();

    assert!(services.publisher.is_fallback());
    assert!(services.cache.get(&txn.id).is_some());
}

#[tokio::test]
async fn description_and_metadata_are_carried_through() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::new(), &transport);
    let mut metadata = Metadata::new();
    metadata.insert("order".into(), serde_json::json!(7));

    let txn = services
        .orchestrator
        .create_transaction(
            PaymentRequest::new("user-1", dec!(12.5), "eur")
                .with_description("Coffee beans")
                .with_metadata(metadata),
        )
        .await
        .unwrap();

    assert_eq!(txn.currency, "EUR");
    assert_eq!(txn.description, "Coffee beans");
    assert_eq!(transport.sent_json()[0].1["metadata"]["order"], 7);
}

#[tokio::test]
async fn invalid_request_touches_nothing() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::new(), &transport);

    let result = services
        .orchestrator
        .create_transaction(PaymentRequest::new(" ", dec!(50), "USD"))
        .await;

    assert!(matches!(result, Err(Error::Domain(_))));
    assert_eq!(services.store.inserts(), 0);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn cache_hit_skips_the_store() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::new(), &transport);
    let txn = services
        .orchestrator
        .create_transaction(PaymentRequest::new("user-1", dec!(50), "USD"))
        .await
        .unwrap();

    services.store.fail_reads(true);
    let fetched = services.orchestrator.get_transaction(&txn.id).await.unwrap();

    assert_eq!(fetched, Some(txn));
    assert_eq!(services.store.lookups(), 0);
}

#[tokio::test]
async fn read_miss_surfaces_store_errors() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::new(), &transport);
    services.store.fail_reads(true);

    let result = services
        .orchestrator
        .get_transaction(&"unknown".into())
        .await;

    assert!(matches!(result, Err(Error::Connection(_))));
}

#[tokio::test(start_paused = true)]
async fn expired_entry_is_refetched_and_recached() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::new(), &transport);
    let txn = services
        .orchestrator
        .create_transaction(PaymentRequest::new("user-1", dec!(50), "USD"))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(301)).await;
    assert!(services.cache.get(&txn.id).is_none());

    let fetched = services.orchestrator.get_transaction(&txn.id).await.unwrap();
    assert_eq!(fetched.as_ref().map(|t| &t.id), Some(&txn.id));
    assert_eq!(services.store.lookups(), 1);
    assert!(services.cache.get(&txn.id).is_some());
}

#[tokio::test]
async fn listing_and_status_read_from_the_store() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::new(), &transport);
    let mut ids = Vec::new();
    for amount in [dec!(10), dec!(20), dec!(30)] {
        let txn = services
            .orchestrator
            .create_transaction(PaymentRequest::new("user-1", amount, "USD"))
            .await
            .unwrap();
        ids.push(txn.id);
    }

    let page = services
        .orchestrator
        .list_transactions(Page::new(Some(2), None))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert!(page[0].created_at >= page[1].created_at);

    services
        .store
        .update_status(&ids[0], TransactionStatus::Completed)
        .await
        .unwrap();
    assert_eq!(
        services.orchestrator.transaction_status(&ids[0]).await.unwrap(),
        Some(TransactionStatus::Completed)
    );
    assert_eq!(
        services
            .orchestrator
            .transaction_status(&"missing".into())
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn concurrent_creates_each_publish_once() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::new(), &transport);
    let orchestrator = Arc::clone(&services.orchestrator);

    let mut handles = Vec::new();
    for i in 1..=16_u32 {
        let orchestrator = Arc::clone(&orchestrator);
        handles.push(tokio::spawn(async move {
            orchestrator
                .create_transaction(PaymentRequest::new(
                    format!("user-{i}"),
                    rust_decimal::Decimal::from(i * 10),
                    "USD",
                ))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(transport.sent().len(), 16);
    assert_eq!(services.cache.len(), 16);
    assert_eq!(services.store.len(), 16);
}

#[tokio::test]
async fn shutdown_closes_transport_and_stops_sweeper() {
    let transport = RecordingTransport::new();
    let services = connected(ProbeStore::new(), &transport);

    services.shutdown().await;

    assert!(transport.is_closed());
    assert!(!services.cache.is_sweeping());
}
