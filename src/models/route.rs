//! Modelo de Route
//!
//! Este módulo contiene el struct Route y su ciclo de vida.
//! Mapea exactamente a la tabla routes con primary key 'id'.
//!
//! Una ruta nace `in_progress` con el odómetro actual del vehículo como
//! `km_start` y pasa una única vez a `finished`. No hay cancelación ni
//! reapertura.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use uuid::Uuid;

/// Estado de la ruta - mapea al ENUM route_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "route_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    InProgress,
    Finished,
}

impl RouteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::InProgress => "in_progress",
            RouteStatus::Finished => "finished",
        }
    }

    /// Único salto permitido: in_progress -> finished
    pub fn can_transition_to(self, next: RouteStatus) -> bool {
        matches!((self, next), (RouteStatus::InProgress, RouteStatus::Finished))
    }
}

/// Errores del ciclo de vida de una ruta
#[derive(Debug, Error, PartialEq)]
pub enum RouteTransitionError {
    #[error("la ruta ya está finalizada")]
    AlreadyFinished,

    #[error("el km final ({km_end}) debe ser mayor que el km inicial ({km_start})")]
    InvalidOdometer { km_start: Decimal, km_end: Decimal },
}

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Route {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Uuid,
    pub route_name: String,
    pub km_start: Decimal,
    pub km_end: Option<Decimal>,
    pub distance: Option<Decimal>,
    pub status: RouteStatus,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl Route {
    /// Inicia una ruta con el odómetro actual del vehículo
    pub fn start(vehicle_id: Uuid, driver_id: Uuid, route_name: String, km_start: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            driver_id,
            route_name: route_name.trim().to_string(),
            km_start,
            km_end: None,
            distance: None,
            status: RouteStatus::InProgress,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == RouteStatus::InProgress
    }

    /// Comprueba que la ruta puede cerrarse con `km_end` sin modificar nada
    pub fn check_finish(&self, km_end: Decimal) -> Result<(), RouteTransitionError> {
        if !self.status.can_transition_to(RouteStatus::Finished) {
            return Err(RouteTransitionError::AlreadyFinished);
        }
        if km_end <= self.km_start {
            return Err(RouteTransitionError::InvalidOdometer {
                km_start: self.km_start,
                km_end,
            });
        }
        Ok(())
    }

    /// Cierra la ruta: distance = km_end - km_start
    pub fn finish(&mut self, km_end: Decimal, at: DateTime<Utc>) -> Result<(), RouteTransitionError> {
        self.check_finish(km_end)?;
        self.km_end = Some(km_end);
        self.distance = Some(km_end - self.km_start);
        self.status = RouteStatus::Finished;
        self.ended_at = Some(at);
        Ok(())
    }
}

/// Filtros para listado de rutas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteFilters {
    pub status: Option<RouteStatus>,
    pub vehicle_id: Option<Uuid>,
}

impl RouteFilters {
    pub fn matches(&self, route: &Route) -> bool {
        self.status.map_or(true, |s| route.status == s)
            && self.vehicle_id.map_or(true, |v| route.vehicle_id == v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route(km_start: i64) -> Route {
        Route::start(Uuid::new_v4(), Uuid::new_v4(), " Cedral → Mirinzal ".into(), Decimal::from(km_start))
    }

    #[test]
    fn test_start_route_is_in_progress() {
        let route = sample_route(1000);
        assert!(route.is_in_progress());
        assert_eq!(route.route_name, "Cedral → Mirinzal");
        assert!(route.km_end.is_none());
        assert!(route.distance.is_none());
    }

    #[test]
    fn test_finish_computes_distance() {
        let mut route = sample_route(1000);
        route.finish(Decimal::new(11255, 1), Utc::now()).unwrap();
        assert_eq!(route.status, RouteStatus::Finished);
        assert_eq!(route.distance, Some(Decimal::new(1255, 1)));
        assert!(route.ended_at.is_some());
    }

    #[test]
    fn test_finish_rejects_non_increasing_odometer() {
        let mut route = sample_route(1000);
        let before = route.clone();
        assert_eq!(
            route.finish(Decimal::from(1000), Utc::now()),
            Err(RouteTransitionError::InvalidOdometer {
                km_start: Decimal::from(1000),
                km_end: Decimal::from(1000),
            })
        );
        assert!(route.finish(Decimal::from(900), Utc::now()).is_err());
        assert_eq!(route, before);
    }

    #[test]
    fn test_finish_twice_is_rejected() {
        let mut route = sample_route(10);
        route.finish(Decimal::from(20), Utc::now()).unwrap();
        assert_eq!(
            route.finish(Decimal::from(30), Utc::now()),
            Err(RouteTransitionError::AlreadyFinished)
        );
        assert_eq!(route.km_end, Some(Decimal::from(20)));
    }

    #[test]
    fn test_transitions() {
        assert!(RouteStatus::InProgress.can_transition_to(RouteStatus::Finished));
        assert!(!RouteStatus::Finished.can_transition_to(RouteStatus::InProgress));
        assert!(!RouteStatus::Finished.can_transition_to(RouteStatus::Finished));
        assert!(!RouteStatus::InProgress.can_transition_to(RouteStatus::InProgress));
    }
}
