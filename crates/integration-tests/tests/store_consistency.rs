//! Entity store consistency guarantees after mutation.

use bizniz_client::{ClientError, EntityStore};
use bizniz_core::{Company, CompanyDraft};
use serde_json::json;

use bizniz_integration_tests::{StubBackend, client_parts};

fn seed_three(backend: &StubBackend) {
    backend.seed_company(json!({
        "_id": "c1", "name": "Acme", "contractLevel": "Gold", "contractLength": "12mo"
    }));
    backend.seed_company(json!({
        "_id": "c2", "name": "Globex", "contractLevel": "Silver", "contractLength": "6mo"
    }));
    backend.seed_company(json!({
        "_id": "c3", "name": "Initech", "contractLevel": "Bronze", "contractLength": "3mo"
    }));
}

async fn loaded_store(backend: &StubBackend, tag: &str) -> EntityStore<Company> {
    let (transport, resolver) = client_parts(backend, tag);
    let mut store: EntityStore<Company> = EntityStore::new(transport, resolver);
    store.load().await.expect("list companies");
    store
}

#[tokio::test]
async fn test_update_replaces_exactly_the_matching_entry() {
    let backend = StubBackend::start_default().await;
    seed_three(&backend);
    let mut store = loaded_store(&backend, "update-middle").await;

    let before: Vec<Company> = store.items().to_vec();

    let draft = CompanyDraft {
        name: "Globex International".to_string(),
        industry: Some("Energy".to_string()),
        location: None,
        contract_level: "Gold".to_string(),
        contract_length: "24mo".to_string(),
    };
    let updated = store.update("c2", &draft).await.expect("update c2");
    assert_eq!(updated.name, "Globex International");

    let items = store.items();
    assert_eq!(items.len(), 3);
    // Neighbors are byte-for-byte what they were before the update.
    assert_eq!(items.first(), before.first());
    assert_eq!(items.get(2), before.get(2));
    assert_eq!(items.get(1).map(|c| c.name.as_str()), Some("Globex International"));
}

#[tokio::test]
async fn test_remove_preserves_relative_order() {
    let backend = StubBackend::start_default().await;
    seed_three(&backend);
    let mut store = loaded_store(&backend, "remove-middle").await;

    store.remove("c2").await.expect("remove c2");

    let ids: Vec<&str> = store.items().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["c1", "c3"]);
}

#[tokio::test]
async fn test_update_on_absent_id_is_a_precondition_failure_without_a_request() {
    let backend = StubBackend::start_default().await;
    seed_three(&backend);
    let mut store = loaded_store(&backend, "update-absent").await;

    let draft = CompanyDraft {
        name: "Ghost".to_string(),
        industry: None,
        location: None,
        contract_level: "Gold".to_string(),
        contract_length: "12mo".to_string(),
    };
    let err = store
        .update("nope", &draft)
        .await
        .expect_err("absent id fails the precondition");
    assert!(matches!(err, ClientError::NotFound { resource: "company", .. }));

    // The precondition fired before any request went out.
    assert!(backend.request_log().is_empty());

    let err = store
        .remove("nope")
        .await
        .expect_err("absent id fails the precondition");
    assert!(matches!(err, ClientError::NotFound { .. }));
    assert!(backend.request_log().is_empty());
}

#[tokio::test]
async fn test_failed_load_leaves_collection_untouched() {
    let backend = StubBackend::start_default().await;
    seed_three(&backend);
    let mut store = loaded_store(&backend, "failed-load").await;
    assert_eq!(store.items().len(), 3);

    backend.fail_lists(true);
    let err = store.load().await.expect_err("backend down");
    match err {
        ClientError::HttpStatus { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("backend unavailable"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }

    // The previous collection survives the failed refresh.
    assert_eq!(store.items().len(), 3);
}
