use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::driver_dto::DriverRequest;
use crate::models::driver::Driver;
use crate::repositories::Repositories;
use crate::utils::errors::{not_found_error, AppError};

pub struct DriverController {
    repositories: Repositories,
}

impl DriverController {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    pub async fn create(&self, request: DriverRequest) -> Result<ApiResponse<Driver>, AppError> {
        request.validate()?;

        let driver = Driver::new(
            request.name,
            request.license_number,
            request.phone,
            request.category,
        );
        let driver = self.repositories.drivers.insert(&driver).await?;

        Ok(ApiResponse::success_with_message(
            driver,
            "Motorista creado exitosamente",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Driver, AppError> {
        self.repositories
            .drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))
    }

    pub async fn list(&self) -> Result<Vec<Driver>, AppError> {
        self.repositories.drivers.list().await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: DriverRequest,
    ) -> Result<ApiResponse<Driver>, AppError> {
        request.validate()?;

        let current = self.get_by_id(id).await?;
        let updated = Driver {
            id: current.id,
            created_at: current.created_at,
            ..Driver::new(
                request.name,
                request.license_number,
                request.phone,
                request.category,
            )
        };
        let driver = self.repositories.drivers.update(&updated).await?;

        Ok(ApiResponse::success_with_message(
            driver,
            "Motorista actualizado exitosamente",
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repositories.drivers.delete(id).await? {
            return Err(not_found_error("Driver", id));
        }
        Ok(())
    }
}
