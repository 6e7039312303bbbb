mod common;

use fleet_backoffice::controllers::user_controller::UserController;
use fleet_backoffice::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use fleet_backoffice::models::user::{Permissions, UserRole};
use fleet_backoffice::utils::errors::AppError;

use common::test_state;

fn create_request(username: &str, email: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: "operador123".to_string(),
        role: UserRole::User,
        permissions: Permissions::default(),
    }
}

#[tokio::test]
async fn test_user_cannot_delete_own_account() {
    let state = test_state().await;
    let controller = UserController::new(state.repositories.clone(), state.auth.clone());
    let admin = state
        .repositories
        .users
        .find_by_username("admin")
        .await
        .unwrap()
        .unwrap();

    let result = controller.delete(admin.id, &admin).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert!(state.repositories.users.find_by_id(admin.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_duplicate_username_or_email_is_conflict() {
    let state = test_state().await;
    let controller = UserController::new(state.repositories.clone(), state.auth.clone());

    controller
        .create(create_request("operador", "operador@frota.local"))
        .await
        .unwrap();

    let same_username = controller
        .create(create_request("operador", "outro@frota.local"))
        .await;
    assert!(matches!(same_username, Err(AppError::Conflict(_))));

    let same_email = controller
        .create(create_request("outro", "operador@frota.local"))
        .await;
    assert!(matches!(same_email, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_username_with_at_sign_is_rejected() {
    let state = test_state().await;
    let controller = UserController::new(state.repositories.clone(), state.auth.clone());

    let result = controller
        .create(create_request("ana@frota", "ana@frota.local"))
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_password_reset_allows_login_with_new_password() {
    let state = test_state().await;
    let controller = UserController::new(state.repositories.clone(), state.auth.clone());

    let user = controller
        .create(create_request("operador", "operador@frota.local"))
        .await
        .unwrap()
        .data
        .unwrap();

    controller
        .update(
            user.id,
            UpdateUserRequest {
                username: user.username.clone(),
                email: user.email.clone(),
                password: Some("nova-senha".to_string()),
                role: user.role,
                permissions: user.permissions,
            },
        )
        .await
        .unwrap();

    let old = state.auth.login("operador", "operador123").await;
    assert!(matches!(old, Err(AppError::Unauthorized(_))));

    let session = state.auth.login("operador", "nova-senha").await.unwrap();
    assert_eq!(session.user.id, user.id);
    assert_eq!(session.user.created_at, user.created_at);
}
