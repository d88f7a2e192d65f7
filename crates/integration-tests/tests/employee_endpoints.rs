//! Endpoint resolution behavior for employee creation.

use bizniz_client::{ClientError, EndpointCache, EndpointResolver, EntityStore};
use bizniz_core::{Employee, EmployeeDraft};
use reqwest::Method;
use serde_json::json;

use bizniz_integration_tests::{
    EMPLOYEE_CREATE_PATHS, EnvelopeStyle, StubBackend, client_parts, client_parts_with_cache,
    temp_cache_path,
};

fn jane_draft() -> EmployeeDraft {
    EmployeeDraft {
        surname: "Doe".to_string(),
        name: "Jane".to_string(),
        location: None,
        salary: None,
        competence: None,
        company: None,
    }
}

#[tokio::test]
async fn test_resolver_stops_at_first_success_and_records_the_trace() {
    // Only the second candidate accepts creation.
    let backend = StubBackend::start(
        EnvelopeStyle::Bare,
        &["/api/companies"],
        &["/api/employee"],
    )
    .await;
    let (transport, mut resolver) = client_parts(&backend, "trace-order");

    let body = json!({"surname": "Doe", "name": "Jane"});
    let resolution = resolver
        .resolve(
            &transport,
            "create.employee",
            EMPLOYEE_CREATE_PATHS,
            Method::POST,
            Some(&body),
        )
        .await
        .expect("second candidate succeeds");

    assert_eq!(resolution.path_used, "/api/employee");

    // Exactly [first failed, second succeeded]; later candidates never tried.
    assert_eq!(resolution.attempts.len(), 2);
    let first = resolution.attempts.first().expect("first attempt");
    let second = resolution.attempts.get(1).expect("second attempt");
    assert_eq!(first.path, "/api/employees");
    assert!(!first.succeeded());
    assert_eq!(second.path, "/api/employee");
    assert!(second.succeeded());

    assert_eq!(
        backend.request_log(),
        vec!["POST /api/employees", "POST /api/employee"]
    );
}

#[tokio::test]
async fn test_staff_only_backend_resolves_and_memoizes() {
    let backend = StubBackend::start(
        EnvelopeStyle::Bare,
        &["/api/companies"],
        &["/api/staff"],
    )
    .await;
    let (transport, resolver) = client_parts(&backend, "staff-memo");
    let mut store: EntityStore<Employee> = EntityStore::new(transport, resolver);

    let created = store.create(&jane_draft()).await.expect("create employee");
    assert_eq!(created.surname, "Doe");

    // First creation walked the candidates up to /api/staff.
    assert_eq!(
        backend.request_log(),
        vec![
            "POST /api/employees",
            "POST /api/employee",
            "POST /api/staff",
        ]
    );

    // A second creation in the same process leads with the memoized winner.
    store.create(&jane_draft()).await.expect("create again");
    assert_eq!(
        backend.request_log().last().map(String::as_str),
        Some("POST /api/staff")
    );
    assert_eq!(backend.request_log().len(), 4);
}

#[tokio::test]
async fn test_memoized_endpoint_survives_client_restart() {
    let backend = StubBackend::start(
        EnvelopeStyle::Bare,
        &["/api/companies"],
        &["/api/staff"],
    )
    .await;

    let cache_path = temp_cache_path("memo-restart");
    let _ = std::fs::remove_file(&cache_path);

    {
        let (transport, resolver) = client_parts_with_cache(&backend, cache_path.clone());
        let mut store: EntityStore<Employee> = EntityStore::new(transport, resolver);
        store.create(&jane_draft()).await.expect("first process creates");
    }

    // A fresh resolver over the same cache file leads with /api/staff.
    let (transport, resolver) = client_parts_with_cache(&backend, cache_path.clone());
    let mut store: EntityStore<Employee> = EntityStore::new(transport, resolver);
    store.create(&jane_draft()).await.expect("second process creates");

    assert_eq!(
        backend.request_log().last().map(String::as_str),
        Some("POST /api/staff")
    );
    // 3 walked attempts from the first process + 1 memoized hit.
    assert_eq!(backend.request_log().len(), 4);

    let _ = std::fs::remove_file(&cache_path);
}

#[tokio::test]
async fn test_exhausted_candidates_report_every_attempt_and_leave_store_unchanged() {
    // No employee create path is accepted at all.
    let backend = StubBackend::start(EnvelopeStyle::Bare, &["/api/companies"], &[]).await;
    backend.seed_employee(json!({"_id": "e1", "surname": "Doe", "name": "Jane"}));

    let (transport, resolver) = client_parts(&backend, "exhausted");
    let mut store: EntityStore<Employee> = EntityStore::new(transport, resolver);
    store.load().await.expect("list employees");
    let before: Vec<Employee> = store.items().to_vec();

    let err = store
        .create(&jane_draft())
        .await
        .expect_err("every candidate fails");

    match err {
        ClientError::EndpointExhausted { operation, attempts } => {
            assert_eq!(operation, "create.employee");
            let paths: Vec<&str> = attempts.iter().map(|a| a.path.as_str()).collect();
            assert_eq!(paths, EMPLOYEE_CREATE_PATHS);
            assert!(attempts.iter().all(|a| !a.succeeded()));
        }
        other => panic!("expected EndpointExhausted, got {other:?}"),
    }

    assert_eq!(store.items(), before.as_slice());
}

#[tokio::test]
async fn test_unresolved_company_reference_still_loads() {
    // The company field is a weak reference; an employee pointing at a
    // company absent from the collection must load fine.
    let backend = StubBackend::start_default().await;
    backend.seed_employee(json!({
        "_id": "e1", "surname": "Doe", "name": "Jane", "company": "gone-company"
    }));

    let (transport, resolver) = client_parts(&backend, "weak-ref");
    let mut store: EntityStore<Employee> = EntityStore::new(transport, resolver);
    store.load().await.expect("list employees");

    let employee = store.find("e1").expect("employee loaded");
    assert_eq!(
        employee.company.as_ref().map(ToString::to_string),
        Some("gone-company".to_string())
    );
}

#[tokio::test]
async fn test_resolver_with_empty_cache_never_duplicates_candidates() {
    let backend = StubBackend::start(
        EnvelopeStyle::Bare,
        &["/api/companies"],
        &["/api/users"],
    )
    .await;
    let cache_path = temp_cache_path("no-duplicates");
    let _ = std::fs::remove_file(&cache_path);

    let (transport, _) = client_parts_with_cache(&backend, cache_path.clone());
    let mut resolver = EndpointResolver::new(EndpointCache::load(cache_path.clone()));

    let body = json!({"surname": "Doe", "name": "Jane"});
    let resolution = resolver
        .resolve(
            &transport,
            "create.employee",
            EMPLOYEE_CREATE_PATHS,
            Method::POST,
            Some(&body),
        )
        .await
        .expect("last candidate succeeds");

    // The winner is the final candidate; afterwards the memo must not make a
    // second resolve try it twice.
    assert_eq!(resolution.path_used, "/api/users");
    let resolution = resolver
        .resolve(
            &transport,
            "create.employee",
            EMPLOYEE_CREATE_PATHS,
            Method::POST,
            Some(&body),
        )
        .await
        .expect("memoized candidate succeeds");
    assert_eq!(resolution.attempts.len(), 1);

    let _ = std::fs::remove_file(&cache_path);
}
