mod common;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use fleet_backoffice::dto::refuel_dto::CreateRefuelRequest;
use fleet_backoffice::models::report::ReportQuery;
use fleet_backoffice::models::route::Route;
use fleet_backoffice::repositories::Repositories;
use fleet_backoffice::services::refuel_service::RefuelService;
use fleet_backoffice::services::report_service::{ReportService, REPORT_TITLE};
use fleet_backoffice::utils::errors::AppError;

use common::{date, km, seed_driver, seed_vehicle};

async fn finish_route_on(repositories: &Repositories, vehicle_id: Uuid, driver_id: Uuid, km_end: i64, day: u32) {
    let vehicle = repositories.vehicles.find_by_id(vehicle_id).await.unwrap().unwrap();
    let route = Route::start(vehicle_id, driver_id, format!("Ruta {}", day), vehicle.odometer_km);
    let route = repositories.routes.start(&route).await.unwrap();
    let ended_at = Utc.with_ymd_and_hms(2025, 3, day, 17, 0, 0).unwrap();
    repositories.routes.finish(route.id, km(km_end), ended_at).await.unwrap();
}

async fn seeded() -> (Repositories, Uuid) {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 0).await;
    let driver = seed_driver(&repositories, "Ana").await;

    finish_route_on(&repositories, vehicle.id, driver.id, 100, 1).await;
    finish_route_on(&repositories, vehicle.id, driver.id, 250, 15).await;
    finish_route_on(&repositories, vehicle.id, driver.id, 300, 31).await;

    let refuels = RefuelService::new(repositories.clone());
    for day in [1, 31] {
        refuels
            .create_refuel(CreateRefuelRequest {
                vehicle_id: Some(vehicle.id),
                odometer_km: Some(km(300)),
                price_per_liter: Some(Decimal::from(5)),
                total_price: Some(Decimal::from(100)),
                store: "Renova".to_string(),
                station: "Posto Central".to_string(),
                date: Some(date(2025, 3, day)),
            })
            .await
            .unwrap();
    }

    (repositories, vehicle.id)
}

#[tokio::test]
async fn test_report_range_is_inclusive() {
    let (repositories, _) = seeded().await;
    let service = ReportService::new(repositories);

    let report = service
        .build_report(&ReportQuery {
            start: Some(date(2025, 3, 1)),
            end: Some(date(2025, 3, 15)),
            vehicle_id: None,
        })
        .await
        .unwrap();

    assert_eq!(report.title, REPORT_TITLE);
    assert_eq!(report.summary.total_routes, 2);
    assert_eq!(report.summary.total_distance, km(250));
    assert_eq!(report.refuels.len(), 1);
    assert_eq!(report.summary.total_liters, Decimal::from(20));
    assert_eq!(report.summary.average_consumption, Some(12.5));
    assert_eq!(report.routes[0].driver, "Ana");
}

#[tokio::test]
async fn test_report_for_single_vehicle() {
    let (repositories, vehicle_id) = seeded().await;
    let other = seed_vehicle(&repositories, "XYZ9A87", 0).await;
    let service = ReportService::new(repositories);

    let report = service
        .build_report(&ReportQuery {
            start: Some(date(2025, 3, 1)),
            end: Some(date(2025, 3, 31)),
            vehicle_id: Some(vehicle_id),
        })
        .await
        .unwrap();
    assert_eq!(report.vehicle.as_deref(), Some("Fiorino - ABC1D23"));
    assert_eq!(report.summary.total_routes, 3);
    assert_eq!(report.summary.total_cost, Decimal::from(200));

    let empty = service
        .build_report(&ReportQuery {
            start: Some(date(2025, 3, 1)),
            end: Some(date(2025, 3, 31)),
            vehicle_id: Some(other.id),
        })
        .await
        .unwrap();
    assert!(empty.routes.is_empty());
    assert_eq!(empty.summary.average_consumption, None);
}

#[tokio::test]
async fn test_report_rejects_inverted_range() {
    let service = ReportService::new(Repositories::in_memory());
    let result = service
        .build_report(&ReportQuery {
            start: Some(date(2025, 3, 31)),
            end: Some(date(2025, 3, 1)),
            vehicle_id: None,
        })
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_pdf_export() {
    let (repositories, _) = seeded().await;
    let service = ReportService::new(repositories);

    let (file_name, bytes) = service
        .export_pdf(&ReportQuery {
            start: Some(date(2025, 3, 1)),
            end: Some(date(2025, 3, 31)),
            vehicle_id: None,
        })
        .await
        .unwrap();

    assert_eq!(file_name, "fleet_report_2025-03-01_2025-03-31.pdf");
    assert!(bytes.starts_with(b"%PDF"));
}
