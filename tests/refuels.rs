mod common;

use rust_decimal::Decimal;

use fleet_backoffice::dto::refuel_dto::CreateRefuelRequest;
use fleet_backoffice::models::refuel::RefuelFilters;
use fleet_backoffice::repositories::Repositories;
use fleet_backoffice::services::refuel_service::RefuelService;
use fleet_backoffice::utils::errors::AppError;
use uuid::Uuid;

use common::{date, km, seed_vehicle};

fn request(vehicle_id: Uuid, odometer: i64, price: Decimal, total: Decimal) -> CreateRefuelRequest {
    CreateRefuelRequest {
        vehicle_id: Some(vehicle_id),
        odometer_km: Some(km(odometer)),
        price_per_liter: Some(price),
        total_price: Some(total),
        store: "Renova".to_string(),
        station: "Posto Central".to_string(),
        date: Some(date(2025, 3, 10)),
    }
}

#[tokio::test]
async fn test_refuel_derives_liters_and_overwrites_odometer() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 1000).await;
    let service = RefuelService::new(repositories.clone());

    let (refuel, updated) = service
        .create_refuel(request(vehicle.id, 1350, Decimal::new(600, 2), Decimal::from(240)))
        .await
        .unwrap();

    assert_eq!(refuel.liters, Decimal::from(40));
    assert_eq!(updated.odometer_km, km(1350));
    let stored = repositories.vehicles.find_by_id(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored.odometer_km, km(1350));
}

#[tokio::test]
async fn test_refuel_with_zero_price_is_rejected() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 1000).await;
    let service = RefuelService::new(repositories.clone());

    let result = service
        .create_refuel(request(vehicle.id, 1100, Decimal::ZERO, Decimal::from(100)))
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let stored = repositories.vehicles.find_by_id(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored.odometer_km, km(1000));
}

#[tokio::test]
async fn test_refuel_for_unknown_vehicle_is_not_found() {
    let service = RefuelService::new(Repositories::in_memory());
    let result = service
        .create_refuel(request(Uuid::new_v4(), 10, Decimal::from(5), Decimal::from(50)))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_list_filters_and_summarizes() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 0).await;
    let service = RefuelService::new(repositories.clone());

    service
        .create_refuel(request(vehicle.id, 100, Decimal::from(5), Decimal::from(50)))
        .await
        .unwrap();
    let mut other_store = request(vehicle.id, 200, Decimal::from(5), Decimal::from(100));
    other_store.store = "Leo Baby".to_string();
    service.create_refuel(other_store).await.unwrap();

    let all = service.list_refuels(&RefuelFilters::default()).await.unwrap();
    assert_eq!(all.summary.count, 2);
    assert_eq!(all.summary.total_liters, Decimal::from(30));
    assert_eq!(all.summary.total_spent, Decimal::from(150));

    let filters = RefuelFilters {
        store: Some("Leo Baby".to_string()),
        month: Some(3),
        ..RefuelFilters::default()
    };
    let filtered = service.list_refuels(&filters).await.unwrap();
    assert_eq!(filtered.summary.count, 1);
    assert_eq!(filtered.summary.total_liters, Decimal::from(20));
}
