use axum::{Extension, extract::State};
use std::sync::Arc;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResult, Path, ValidatedJson, created, ok};
use crate::persistence::Role;

use super::types::{
    AuthResponse, Claims, CreateRoleRequest, LoginRequest, RegisterRequest, UpdateUserRequest,
    UserDto,
};

/// POST /api/account/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<UserDto> {
    created(state.user_auth.register(req).await?)
}

/// POST /api/account/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    ok(state.user_auth.login(req).await?)
}

/// GET /api/account/user
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<UserDto> {
    ok(state.user_auth.current_user(&claims).await?)
}

/// PUT /api/account/user
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<UserDto> {
    ok(state.user_auth.update_user(&claims, req).await?)
}

#[derive(serde::Serialize)]
pub struct RoleDto {
    pub id: i32,
    pub name: String,
}

impl From<Role> for RoleDto {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
        }
    }
}

/// POST /api/account/roles
pub async fn create_role(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateRoleRequest>,
) -> ApiResult<RoleDto> {
    let name = req.name.unwrap_or_default();
    created(state.user_auth.create_role(&name).await?.into())
}

/// POST /api/account/roles/{name}/users/{user_id}
pub async fn add_to_role(
    State(state): State<Arc<AppState>>,
    Path((name, user_id)): Path<(String, i32)>,
) -> ApiResult<String> {
    state.user_auth.add_to_role(user_id, &name).await?;
    ok("Added".to_string())
}
