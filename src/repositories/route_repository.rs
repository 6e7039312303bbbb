use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::route::{Route, RouteFilters};
use crate::models::vehicle::Vehicle;
use crate::repositories::RouteRepository;
use crate::utils::errors::{map_db_error, not_found_error, AppError, AppResult};

pub struct PgRouteRepository {
    pool: PgPool,
}

impl PgRouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteRepository for PgRouteRepository {
    async fn start(&self, route: &Route) -> AppResult<Route> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Error opening transaction", e))?;

        // Bloquea el vehículo: un abastecimiento concurrente espera al commit
        let km_start: Decimal =
            sqlx::query_scalar("SELECT odometer_km FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(route.vehicle_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| map_db_error("Error locking vehicle", e))?
                .ok_or_else(|| not_found_error("Vehicle", route.vehicle_id))?;

        // El índice parcial routes_one_active_per_vehicle devuelve 23505 -> Conflict
        let route = sqlx::query_as::<_, Route>(
            r#"
            INSERT INTO routes (id, vehicle_id, driver_id, route_name, km_start, km_end, distance, status, started_at, ended_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(route.id)
        .bind(route.vehicle_id)
        .bind(route.driver_id)
        .bind(&route.route_name)
        .bind(km_start)
        .bind(route.km_end)
        .bind(route.distance)
        .bind(route.status)
        .bind(route.started_at)
        .bind(route.ended_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error("Error starting route", e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("Error committing route start", e))?;
        Ok(route)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error finding route", e))
    }

    async fn list(&self, filters: &RouteFilters) -> AppResult<Vec<Route>> {
        sqlx::query_as::<_, Route>(
            r#"
            SELECT * FROM routes
            WHERE ($1::route_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR vehicle_id = $2)
            ORDER BY started_at DESC
            "#,
        )
        .bind(filters.status)
        .bind(filters.vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Error listing routes", e))
    }

    async fn find_active_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Option<Route>> {
        sqlx::query_as::<_, Route>(
            "SELECT * FROM routes WHERE vehicle_id = $1 AND status = 'in_progress' LIMIT 1",
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Error finding active route", e))
    }

    async fn finish(
        &self,
        id: Uuid,
        km_end: Decimal,
        ended_at: DateTime<Utc>,
    ) -> AppResult<(Route, Vehicle)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_error("Error opening transaction", e))?;

        let current = sqlx::query_as::<_, Route>("SELECT * FROM routes WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_db_error("Error locking route", e))?
            .ok_or_else(|| not_found_error("Route", id))?;

        current.check_finish(km_end)?;

        let route = sqlx::query_as::<_, Route>(
            r#"
            UPDATE routes
            SET km_end = $2, distance = $2 - km_start, status = 'finished', ended_at = $3
            WHERE id = $1 AND status = 'in_progress'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(km_end)
        .bind(ended_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_error("Error finishing route", e))?
        .ok_or_else(|| AppError::Conflict(format!("Route '{}' is not in progress", id)))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET odometer_km = $2, last_update = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(route.vehicle_id)
        .bind(km_end)
        .bind(ended_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_error("Error updating vehicle odometer", e))?
        .ok_or_else(|| not_found_error("Vehicle", route.vehicle_id))?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("Error committing route finish", e))?;

        Ok((route, vehicle))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Error deleting route", e))?;

        Ok(result.rows_affected() > 0)
    }
}
