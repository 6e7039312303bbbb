use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::models::user::User;
use crate::repositories::Repositories;
use crate::services::auth_service::AuthService;
use crate::utils::errors::{not_found_error, AppError};

pub struct UserController {
    repositories: Repositories,
    auth: AuthService,
}

impl UserController {
    pub fn new(repositories: Repositories, auth: AuthService) -> Self {
        Self { repositories, auth }
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<ApiResponse<User>, AppError> {
        request.validate()?;

        let password_hash = self.auth.hash_password(&request.password)?;
        let user = User::new(
            request.username,
            request.email,
            password_hash,
            request.role,
            request.permissions,
        );
        let user = self.repositories.users.insert(&user).await?;

        Ok(ApiResponse::success_with_message(user, "Usuario creado exitosamente"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User, AppError> {
        self.repositories
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", id))
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.repositories.users.list().await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<User>, AppError> {
        request.validate()?;

        let current = self.get_by_id(id).await?;
        let password_hash = match request.password.as_deref() {
            Some(password) => self.auth.hash_password(password)?,
            None => current.password_hash,
        };

        let updated = User {
            id: current.id,
            created_at: current.created_at,
            ..User::new(
                request.username,
                request.email,
                password_hash,
                request.role,
                request.permissions,
            )
        };
        let user = self.repositories.users.update(&updated).await?;

        Ok(ApiResponse::success_with_message(user, "Usuario actualizado exitosamente"))
    }

    /// Un usuario no puede eliminar su propia cuenta
    pub async fn delete(&self, id: Uuid, current_user: &User) -> Result<(), AppError> {
        if id == current_user.id {
            return Err(AppError::Conflict(
                "No puedes eliminar tu propia cuenta".to_string(),
            ));
        }
        if !self.repositories.users.delete(id).await? {
            return Err(not_found_error("User", id));
        }
        Ok(())
    }
}
