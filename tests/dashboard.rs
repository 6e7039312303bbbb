mod common;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use fleet_backoffice::models::analytics::DashboardQuery;
use fleet_backoffice::models::refuel::Refuel;
use fleet_backoffice::models::route::Route;
use fleet_backoffice::models::vehicle::Vehicle;
use fleet_backoffice::repositories::Repositories;
use fleet_backoffice::services::dashboard_service::{
    compare_months, month_bucket, top_vehicles, DashboardService, TOP_VEHICLES,
};
use fleet_backoffice::utils::errors::AppError;

use common::{date, km, seed_driver, seed_vehicle};

fn finished_route(vehicle_id: Uuid, distance: i64, year: i32, month: u32) -> Route {
    let mut route = Route::start(vehicle_id, Uuid::new_v4(), "Entrega".to_string(), km(0));
    let ended_at = Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap();
    route.finish(km(distance), ended_at).unwrap();
    route
}

fn refuel(vehicle_id: Uuid, liters: i64, year: i32, month: u32) -> Refuel {
    Refuel::new(
        vehicle_id,
        km(0),
        Decimal::from(5),
        Decimal::from(liters * 5),
        "Renova".to_string(),
        "Posto".to_string(),
        date(year, month, 10),
    )
    .unwrap()
}

#[test]
fn test_month_without_refuels_has_no_consumption() {
    let vehicle_id = Uuid::new_v4();
    let routes = vec![finished_route(vehicle_id, 300, 2025, 4)];

    let bucket = month_bucket(&routes, &[], 2025, 4);
    assert_eq!(bucket.km, km(300));
    assert_eq!(bucket.liters, Decimal::ZERO);
    assert_eq!(bucket.consumption, None);
}

#[test]
fn test_january_compares_with_previous_december() {
    let vehicle_id = Uuid::new_v4();
    let routes = vec![
        finished_route(vehicle_id, 200, 2024, 12),
        finished_route(vehicle_id, 300, 2025, 1),
    ];
    let refuels = vec![refuel(vehicle_id, 20, 2024, 12), refuel(vehicle_id, 20, 2025, 1)];

    let comparison = compare_months(&routes, &refuels, 2025, 1);
    assert_eq!((comparison.previous_year, comparison.previous_month), (2024, 12));
    assert_eq!(comparison.km.current, Some(300.0));
    assert_eq!(comparison.km.previous, Some(200.0));
    assert_eq!(comparison.km.variation_pct, Some(50.0));
    assert_eq!(comparison.consumption.current, Some(15.0));
    assert_eq!(comparison.consumption.previous, Some(10.0));
}

#[test]
fn test_variation_is_absent_when_previous_month_is_empty() {
    let vehicle_id = Uuid::new_v4();
    let routes = vec![finished_route(vehicle_id, 300, 2025, 6)];

    let comparison = compare_months(&routes, &[], 2025, 6);
    assert_eq!(comparison.km.previous, Some(0.0));
    assert_eq!(comparison.km.variation_pct, None);
    assert_eq!(comparison.consumption.current, None);
}

#[test]
fn test_top_vehicles_ranked_by_distance() {
    let vehicles: Vec<Vehicle> = ["AAA1111", "BBB2222", "CCC3333", "DDD4444"]
        .iter()
        .map(|plate| Vehicle::new("Fiorino".to_string(), plate.to_string(), km(0)))
        .collect();
    let routes = vec![
        finished_route(vehicles[0].id, 100, 2025, 3),
        finished_route(vehicles[1].id, 400, 2025, 3),
        finished_route(vehicles[2].id, 200, 2025, 3),
        finished_route(vehicles[3].id, 50, 2025, 3),
        finished_route(vehicles[2].id, 100, 2025, 4),
    ];

    let top = top_vehicles(&vehicles, &routes, TOP_VEHICLES);
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].label, "Fiorino - BBB2222");
    assert_eq!(top[0].distance, km(400));
    assert_eq!(top[0].share_pct, 100.0);
    assert_eq!(top[1].label, "Fiorino - CCC3333");
    assert_eq!(top[1].share_pct, 75.0);
    assert_eq!(top[2].label, "Fiorino - AAA1111");
}

#[tokio::test]
async fn test_summary_builds_twelve_months() {
    let repositories = Repositories::in_memory();
    let vehicle = seed_vehicle(&repositories, "ABC1D23", 0).await;
    let driver = seed_driver(&repositories, "Ana").await;

    let route = Route::start(vehicle.id, driver.id, "Entrega".to_string(), km(0));
    let route = repositories.routes.start(&route).await.unwrap();
    let ended_at = Utc.with_ymd_and_hms(2025, 5, 20, 18, 0, 0).unwrap();
    repositories.routes.finish(route.id, km(250), ended_at).await.unwrap();

    let service = DashboardService::new(repositories);
    let summary = service
        .summary(&DashboardQuery {
            year: Some(2025),
            month: Some(5),
        })
        .await
        .unwrap();

    assert_eq!(summary.monthly.len(), 12);
    assert_eq!(summary.monthly[4].km, km(250));
    assert_eq!(summary.totals.total_km, km(250));
    assert_eq!(summary.totals.average_consumption, None);
    assert_eq!(summary.top_vehicles.len(), 1);
}

#[tokio::test]
async fn test_summary_rejects_invalid_month() {
    let service = DashboardService::new(Repositories::in_memory());
    let result = service
        .summary(&DashboardQuery {
            year: Some(2025),
            month: Some(13),
        })
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_summary_rejects_year_outside_calendar() {
    let service = DashboardService::new(Repositories::in_memory());
    for year in [i32::MIN, i32::MAX] {
        let result = service
            .summary(&DashboardQuery {
                year: Some(year),
                month: Some(1),
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}

#[test]
fn test_compare_months_at_minimum_year_does_not_overflow() {
    let comparison = compare_months(&[], &[], i32::MIN, 1);
    assert_eq!(comparison.previous_month, 12);
    assert_eq!(comparison.km.variation_pct, None);
}
