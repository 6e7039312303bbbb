mod common;

use std::sync::Arc;

use rust_decimal::Decimal;

use fleet_backoffice::models::route::RouteStatus;
use fleet_backoffice::repositories::Repositories;
use fleet_backoffice::services::route_lifecycle_service::RouteLifecycleService;
use fleet_backoffice::utils::errors::AppError;

use common::{km, seed_driver, seed_vehicle};

#[tokio::test]
async fn test_start_uses_vehicle_odometer_and_finish_updates_it() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 1000).await;
    let driver = seed_driver(&repositories, "Ana").await;
    let service = RouteLifecycleService::new(repositories.clone());

    let route = service
        .start_route(vehicle.id, driver.id, "Centro - Zona Sul")
        .await
        .unwrap();
    assert_eq!(route.km_start, km(1000));
    assert_eq!(route.status, RouteStatus::InProgress);

    let (route, vehicle) = service.finish_route(route.id, km(1125)).await.unwrap();
    assert_eq!(route.status, RouteStatus::Finished);
    assert_eq!(route.distance, Some(km(125)));
    assert!(route.ended_at.is_some());
    assert_eq!(vehicle.odometer_km, km(1125));
}

#[tokio::test]
async fn test_finish_rejects_non_increasing_odometer() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 1000).await;
    let driver = seed_driver(&repositories, "Ana").await;
    let service = RouteLifecycleService::new(repositories.clone());
    let route = service.start_route(vehicle.id, driver.id, "Entrega").await.unwrap();

    for km_end in [km(1000), km(900)] {
        let result = service.finish_route(route.id, km_end).await;
        assert!(matches!(result, Err(AppError::Precondition(_))));
    }

    let stored = repositories.routes.find_by_id(route.id).await.unwrap().unwrap();
    assert_eq!(stored.status, RouteStatus::InProgress);
    let stored_vehicle = repositories.vehicles.find_by_id(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored_vehicle.odometer_km, km(1000));
}

#[tokio::test]
async fn test_finishing_twice_keeps_first_result() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 500).await;
    let driver = seed_driver(&repositories, "Bruno").await;
    let service = RouteLifecycleService::new(repositories.clone());
    let route = service.start_route(vehicle.id, driver.id, "Entrega").await.unwrap();

    service.finish_route(route.id, km(600)).await.unwrap();
    let second = service.finish_route(route.id, km(700)).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    let stored_vehicle = repositories.vehicles.find_by_id(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored_vehicle.odometer_km, km(600));
    let stored = repositories.routes.find_by_id(route.id).await.unwrap().unwrap();
    assert_eq!(stored.km_end, Some(km(600)));
}

#[tokio::test]
async fn test_concurrent_finish_has_single_winner() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 0).await;
    let driver = seed_driver(&repositories, "Carla").await;
    let service = Arc::new(RouteLifecycleService::new(repositories.clone()));
    let route = service.start_route(vehicle.id, driver.id, "Entrega").await.unwrap();

    let handles: Vec<_> = (1..=8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move { service.finish_route(route.id, Decimal::from(100 * i)).await })
        })
        .collect();

    let mut winners = Vec::new();
    for handle in handles {
        if let Ok((route, vehicle)) = handle.await.unwrap() {
            winners.push((route, vehicle));
        }
    }
    assert_eq!(winners.len(), 1);

    let (route, _) = &winners[0];
    let stored_vehicle = repositories.vehicles.find_by_id(vehicle.id).await.unwrap().unwrap();
    assert_eq!(Some(stored_vehicle.odometer_km), route.km_end);
}

#[tokio::test]
async fn test_vehicle_cannot_have_two_active_routes() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 0).await;
    let driver = seed_driver(&repositories, "Davi").await;
    let service = RouteLifecycleService::new(repositories.clone());

    service.start_route(vehicle.id, driver.id, "Manhã").await.unwrap();
    let second = service.start_route(vehicle.id, driver.id, "Tarde").await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_start_with_unknown_vehicle_is_not_found() {
    let repositories = Repositories::in_memory();
    let driver = seed_driver(&repositories, "Eva").await;
    let service = RouteLifecycleService::new(repositories);

    let result = service
        .start_route(uuid::Uuid::new_v4(), driver.id, "Entrega")
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
