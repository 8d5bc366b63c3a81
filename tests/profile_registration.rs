mod common;

use chrono::{Datelike, Utc};
use serde_json::json;
use uuid::Uuid;

use common::MemoryBackend;
use kurye_market::api::dto::profile::{RegisterBusinessRequest, RegisterCourierRequest};
use kurye_market::domain::entities::{NewBusiness, NewCourier};
use kurye_market::error::AppError;

fn new_courier() -> NewCourier {
    serde_json::from_value::<RegisterCourierRequest>(json!({
        "first_name": "Mehmet",
        "last_name": "Demir",
        "gender": "erkek",
        "birth_year": Utc::now().year() - 30,
        "nationality": "TC",
        "license_type": "A2",
        "phone": "+905551112233",
        "province": "Ankara",
        "district": "Çankaya",
        "working_hours": "gunduz",
        "working_days": ["Pazartesi"],
        "working_type": "tam",
        "moto_model": "Honda PCX",
        "moto_cc": 125
    }))
    .unwrap()
    .into_new_courier()
    .unwrap()
}

fn new_business() -> NewBusiness {
    serde_json::from_value::<RegisterBusinessRequest>(json!({
        "business_name": "Köşe Pide",
        "manager_first_name": "Can",
        "manager_last_name": "Öztürk",
        "phone": "+905551112233",
        "address": "Atatürk Bulvarı No: 5 Çankaya",
        "working_type": "yari",
        "working_hours": "gece"
    }))
    .unwrap()
    .into_new_business()
    .unwrap()
}

#[tokio::test]
async fn test_concurrent_registrations_yield_single_role() {
    let backend = MemoryBackend::new();
    let state = common::create_test_state(&backend);
    let user = Uuid::new_v4();

    let (courier, business) = tokio::join!(
        state.profile_service.register_courier(user, new_courier()),
        state.profile_service.register_business(user, new_business()),
    );

    assert!(
        courier.is_ok() != business.is_ok(),
        "exactly one registration must succeed"
    );
    let refused = courier.err().or(business.err()).unwrap();
    assert!(matches!(refused, AppError::Conflict { .. }));

    let couriers = backend.couriers.lock().unwrap().len();
    let businesses = backend.businesses.lock().unwrap().len();
    assert_eq!(couriers + businesses, 1);
}

#[tokio::test]
async fn test_concurrent_same_role_registrations() {
    let backend = MemoryBackend::new();
    let state = common::create_test_state(&backend);
    let user = Uuid::new_v4();

    let (first, second) = tokio::join!(
        state.profile_service.register_courier(user, new_courier()),
        state.profile_service.register_courier(user, new_courier()),
    );

    assert!(first.is_ok() != second.is_ok());
    assert_eq!(backend.couriers.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_registration_after_other_role_conflicts() {
    let backend = MemoryBackend::new();
    let state = common::create_test_state(&backend);
    let user = Uuid::new_v4();

    state
        .profile_service
        .register_business(user, new_business())
        .await
        .unwrap();

    match state
        .profile_service
        .register_courier(user, new_courier())
        .await
        .unwrap_err()
    {
        AppError::Conflict { details, .. } => assert_eq!(details["role"], "isletme"),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert!(backend.couriers.lock().unwrap().is_empty());
}
