mod common;

use rust_decimal::Decimal;
use uuid::Uuid;

use fleet_backoffice::controllers::maintenance_controller::MaintenanceController;
use fleet_backoffice::dto::maintenance_dto::MaintenanceRequest;
use fleet_backoffice::models::maintenance::{MaintenanceFilters, MaintenanceStatus};
use fleet_backoffice::repositories::Repositories;
use fleet_backoffice::utils::errors::AppError;

use common::{date, km, seed_vehicle};

fn request(vehicle_id: Uuid, maintenance_type: &str) -> MaintenanceRequest {
    MaintenanceRequest {
        vehicle_id: Some(vehicle_id),
        maintenance_type: maintenance_type.to_string(),
        odometer_km: None,
        cost: None,
        notes: None,
        status: None,
        date: Some(date(2025, 3, 10)),
    }
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 1000).await;
    let controller = MaintenanceController::new(repositories);

    let created = controller
        .create(request(vehicle.id, "Troca de óleo"))
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(created.odometer_km, Decimal::ZERO);
    assert_eq!(created.cost, Decimal::ZERO);
    assert_eq!(created.status, MaintenanceStatus::Completed);
    assert!(created.notes.is_none());
}

#[tokio::test]
async fn test_create_for_unknown_vehicle_is_not_found() {
    let controller = MaintenanceController::new(Repositories::in_memory());

    let result = controller.create(request(Uuid::new_v4(), "Freios")).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_list_filters_by_vehicle_and_status() {
    let repositories = Repositories::in_memory();
    let first = seed_vehicle(&repositories, "ABC1D23", 1000).await;
    let second = seed_vehicle(&repositories, "XYZ9K88", 2000).await;
    let controller = MaintenanceController::new(repositories);

    controller.create(request(first.id, "Troca de óleo")).await.unwrap();
    controller
        .create(MaintenanceRequest {
            status: Some(MaintenanceStatus::Pending),
            ..request(first.id, "Pneus")
        })
        .await
        .unwrap();
    controller.create(request(second.id, "Freios")).await.unwrap();

    let all = controller.list(&MaintenanceFilters::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let by_vehicle = controller
        .list(&MaintenanceFilters {
            vehicle_id: Some(first.id),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(by_vehicle.len(), 2);

    let pending = controller
        .list(&MaintenanceFilters {
            vehicle_id: Some(first.id),
            status: Some(MaintenanceStatus::Pending),
        })
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].maintenance_type, "Pneus");
}

#[tokio::test]
async fn test_update_overwrites_fields_and_keeps_created_at() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 1000).await;
    let controller = MaintenanceController::new(repositories);

    let created = controller
        .create(MaintenanceRequest {
            odometer_km: Some(km(1000)),
            cost: Some(Decimal::from(250)),
            notes: Some("filtro incluso".to_string()),
            ..request(vehicle.id, "Troca de óleo")
        })
        .await
        .unwrap()
        .data
        .unwrap();

    let updated = controller
        .update(
            created.id,
            MaintenanceRequest {
                status: Some(MaintenanceStatus::Pending),
                date: Some(date(2025, 4, 2)),
                ..request(vehicle.id, "Alinhamento")
            },
        )
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.maintenance_type, "Alinhamento");
    assert_eq!(updated.odometer_km, Decimal::ZERO);
    assert_eq!(updated.cost, Decimal::ZERO);
    assert!(updated.notes.is_none());
    assert_eq!(updated.status, MaintenanceStatus::Pending);
    assert_eq!(updated.date, date(2025, 4, 2));

    let stored = controller.get_by_id(created.id).await.unwrap();
    assert_eq!(stored, updated);
}
