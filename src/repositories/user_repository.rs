use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::User;
use crate::repositories::UserRepository;
use crate::utils::errors::{map_db_error, not_found_error, AppResult};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: &User) -> AppResult<User> {
        let p = &user.permissions;
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                id, username, email, password_hash, role,
                view_vehicles, manage_vehicles, view_routes, edit_routes,
                view_refuels, add_refuels, generate_reports, manage_users, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(p.view_vehicles)
        .bind(p.manage_vehicles)
        .bind(p.view_routes)
        .bind(p.edit_routes)
        .bind(p.view_refuels)
        .bind(p.add_refuels)
        .bind(p.generate_reports)
        .bind(p.manage_users)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Error creating user", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error finding user", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error finding user by username", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Error finding user by email", e))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_error("Error listing users", e))
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let p = &user.permissions;
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, role = $5,
                view_vehicles = $6, manage_vehicles = $7, view_routes = $8, edit_routes = $9,
                view_refuels = $10, add_refuels = $11, generate_reports = $12, manage_users = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(p.view_vehicles)
        .bind(p.manage_vehicles)
        .bind(p.view_routes)
        .bind(p.edit_routes)
        .bind(p.view_refuels)
        .bind(p.add_refuels)
        .bind(p.generate_reports)
        .bind(p.manage_users)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Error updating user", e))?
        .ok_or_else(|| not_found_error("User", user.id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Error deleting user", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_db_error("Error counting users", e))?;

        Ok(result.0)
    }
}
