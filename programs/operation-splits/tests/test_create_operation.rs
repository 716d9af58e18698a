//! Tests for create_operation instruction

mod helpers;

use {
    helpers::{anonymous, flexible, new_operation_form, signed_in},
    operation_splits::{
        create_operation, AllocationError, Context, InMemoryStore, OperationStatus, RecordStore,
        StoreError,
    },
};

#[test]
fn test_create_operation_success() {
    let mut store = InMemoryStore::new();
    let session = signed_in();
    let config = flexible();

    let mut ctx = Context::new(&mut store, &session, &config);
    let created = create_operation(&mut ctx, new_operation_form()).unwrap();

    assert_eq!(created.id.as_deref(), Some("OP-001"));
    // Input-form date is stored as DD/MM/YYYY
    assert_eq!(created.date, "01/09/2025");
    assert_eq!(created.status, OperationStatus::Planned);
    assert!(created.created_at.is_some());

    let stored = store.fetch_by_id("OP-001").unwrap();
    assert_eq!(stored, created);
}

#[test]
fn test_create_operation_ignores_caller_id() {
    let mut store = InMemoryStore::new();
    let session = signed_in();
    let config = flexible();

    let mut form = new_operation_form();
    form.id = Some("OP-999".into());

    let mut ctx = Context::new(&mut store, &session, &config);
    let created = create_operation(&mut ctx, form).unwrap();

    assert_eq!(created.id.as_deref(), Some("OP-001"));
    assert!(store.fetch_by_id("OP-999").is_err());
}

#[test]
fn test_create_operation_missing_fields() {
    let mut store = InMemoryStore::new();
    let session = signed_in();
    let config = flexible();

    let mut form = new_operation_form();
    form.client = "   ".into();
    form.pilots = Some(vec![]);
    form.start_time.clear();

    let mut ctx = Context::new(&mut store, &session, &config);
    assert_eq!(
        create_operation(&mut ctx, form),
        Err(AllocationError::Validation {
            fields: vec!["cliente", "piloto", "horaInicio"]
        })
    );
    assert!(store.is_empty());
}

#[test]
fn test_create_operation_legacy_pilot_satisfies_validation() {
    let mut store = InMemoryStore::new();
    let session = signed_in();
    let config = flexible();

    let mut form = new_operation_form();
    form.pilots = None;
    form.legacy_pilot = Some("Juan Pérez".into());

    let mut ctx = Context::new(&mut store, &session, &config);
    assert!(create_operation(&mut ctx, form).is_ok());
}

#[test]
fn test_create_operation_unauthorized() {
    let mut store = InMemoryStore::new();
    let session = anonymous();
    let config = flexible();

    let mut ctx = Context::new(&mut store, &session, &config);
    assert_eq!(
        create_operation(&mut ctx, new_operation_form()),
        Err(AllocationError::Unauthorized)
    );
    assert!(store.is_empty());
}

#[test]
fn test_create_operation_store_failure() {
    let mut store = InMemoryStore::new();
    store.reject_writes(true);
    let session = signed_in();
    let config = flexible();

    let mut ctx = Context::new(&mut store, &session, &config);
    let err = create_operation(&mut ctx, new_operation_form()).unwrap_err();
    assert!(matches!(err, AllocationError::Store(StoreError::Failure(_))));
}
