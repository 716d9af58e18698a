//! Tests for save_distribution instruction

mod helpers;

use {
    helpers::{anonymous, flexible, setup_store, signed_in, strict},
    operation_splits::{
        load_operation, save_distribution, AllocationError, Context, DecodeIntent,
        DistributionSnapshot, RecordStore, Role, StoreError,
    },
};

#[test]
fn test_save_distribution_balanced_strict() {
    let mut store = setup_store();
    let session = signed_in();
    let config = strict();

    // Load the roster record, move 4 points from helper to pilot
    let loaded = {
        let ctx = Context::new(&mut store, &session, &config);
        load_operation(&ctx, "OP-002", DecodeIntent::Edit).unwrap()
    };
    let mut allocation = loaded.allocation;
    allocation.set_share("María González", Role::Pilot, "44");
    allocation.set_share("Pedro Soto", Role::Helper, "10");
    assert_eq!(allocation.aggregate_total_percent(), 100.0);

    // Save
    let mut ctx = Context::new(&mut store, &session, &config);
    let outcome = save_distribution(&mut ctx, "OP-002", &allocation).unwrap();

    assert_eq!(outcome.aggregate_total_percent, 100.0);
    assert!(outcome.overage.is_none());

    let Some(DistributionSnapshot::Current(saved)) = outcome.record.distribution else {
        panic!("expected roster-shaped distribution");
    };
    assert_eq!(saved.empresa, Some(46.0));
    assert_eq!(saved.pilots.get("María González"), Some(&44.0));
    assert_eq!(saved.helpers.get("Pedro Soto"), Some(&10.0));
    assert!(outcome.record.updated_at.is_some());
}

#[test]
fn test_save_distribution_unbalanced_strict_rejected() {
    let mut store = setup_store();
    let session = signed_in();
    let config = strict();
    let before = store.fetch_by_id("OP-002").unwrap();

    let mut allocation = {
        let ctx = Context::new(&mut store, &session, &config);
        load_operation(&ctx, "OP-002", DecodeIntent::Edit).unwrap().allocation
    };
    // 60 + 14 already leaves the company at its 36 floor: 110 total
    allocation.set_share("María González", Role::Pilot, "60");

    let mut ctx = Context::new(&mut store, &session, &config);
    let err = save_distribution(&mut ctx, "OP-002", &allocation).unwrap_err();

    assert!(matches!(err, AllocationError::UnbalancedDistribution { total } if total == 110.0));
    assert_eq!(store.fetch_by_id("OP-002").unwrap(), before);
}

#[test]
fn test_save_distribution_overage_flexible() {
    let mut store = setup_store();
    let session = signed_in();
    let config = flexible();

    let mut allocation = {
        let ctx = Context::new(&mut store, &session, &config);
        load_operation(&ctx, "OP-002", DecodeIntent::Edit).unwrap().allocation
    };
    allocation.set_total_amount(1_000_000);
    allocation.set_share("María González", Role::Pilot, "50");
    allocation.set_share("Pedro Soto", Role::Helper, "20");

    let mut ctx = Context::new(&mut store, &session, &config);
    let outcome = save_distribution(&mut ctx, "OP-002", &allocation).unwrap();

    assert_eq!(outcome.aggregate_total_percent, 106.0);
    let overage = outcome.overage.expect("overage reported");
    assert_eq!(overage.amount, 60_000);
    assert_eq!(outcome.record.total_amount, Some(1_000_000));
}

#[test]
fn test_save_distribution_replaces_legacy_fields() {
    let mut store = setup_store();
    let session = signed_in();
    let config = flexible();

    let allocation = {
        let ctx = Context::new(&mut store, &session, &config);
        load_operation(&ctx, "OP-001", DecodeIntent::Edit).unwrap().allocation
    };

    let mut ctx = Context::new(&mut store, &session, &config);
    let outcome = save_distribution(&mut ctx, "OP-001", &allocation).unwrap();
    let record = outcome.record;

    assert!(record.legacy_pilot.is_none());
    assert!(record.legacy_helper.is_none());
    assert_eq!(record.pilots.as_deref(), Some(&["Juan Pérez".to_string()][..]));
    assert_eq!(record.helpers.as_deref(), Some(&["Carlos Rodríguez".to_string()][..]));
    // The 10% expense bucket became an exact amount
    assert_eq!(record.exact_expense, Some(45_000));
    assert!(matches!(record.distribution, Some(DistributionSnapshot::Current(_))));
    // Form fields survive
    assert_eq!(record.client, "Constructora ABC");
}

#[test]
fn test_save_distribution_unauthorized() {
    let mut store = setup_store();
    let session = anonymous();
    let config = flexible();

    let allocation = {
        let ctx = Context::new(&mut store, &session, &config);
        load_operation(&ctx, "OP-002", DecodeIntent::View).unwrap().allocation
    };

    let mut ctx = Context::new(&mut store, &session, &config);
    assert_eq!(
        save_distribution(&mut ctx, "OP-002", &allocation),
        Err(AllocationError::Unauthorized)
    );
}

#[test]
fn test_save_distribution_store_failure() {
    let mut store = setup_store();
    let session = signed_in();
    let config = flexible();

    let allocation = {
        let ctx = Context::new(&mut store, &session, &config);
        load_operation(&ctx, "OP-002", DecodeIntent::Edit).unwrap().allocation
    };

    store.reject_writes(true);
    let mut ctx = Context::new(&mut store, &session, &config);
    let err = save_distribution(&mut ctx, "OP-002", &allocation).unwrap_err();

    assert!(matches!(err, AllocationError::Store(StoreError::Failure(_))));
}

#[test]
fn test_save_distribution_missing_operation() {
    let mut store = setup_store();
    let session = signed_in();
    let config = flexible();

    let allocation = {
        let ctx = Context::new(&mut store, &session, &config);
        load_operation(&ctx, "OP-002", DecodeIntent::Edit).unwrap().allocation
    };

    let mut ctx = Context::new(&mut store, &session, &config);
    assert_eq!(
        save_distribution(&mut ctx, "OP-404", &allocation),
        Err(AllocationError::Store(StoreError::NotFound("OP-404".into())))
    );
}
