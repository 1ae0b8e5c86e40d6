use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::persistence::User;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String, // Subject (user_id as string)
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at
}

impl Claims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// User Registration Request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "The user_name field is required"),
        length(max = 256, message = "The user_name field must be at most 256 characters")
    )]
    pub user_name: Option<String>,
    #[validate(
        required(message = "The email field is required"),
        email(message = "The email field is not a valid e-mail address"),
        length(max = 256, message = "The email field must be at most 256 characters")
    )]
    pub email: Option<String>,
    #[validate(required(message = "The password field is required"))]
    pub password: Option<String>,
    #[validate(length(max = 100, message = "The first_name field must be at most 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 100, message = "The last_name field must be at most 100 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 30, message = "The phone field must be at most 30 characters"))]
    pub phone: Option<String>,
}

/// User Login Request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "The user_name field is required"))]
    pub user_name: Option<String>,
    #[validate(required(message = "The password field is required"))]
    pub password: Option<String>,
}

/// Profile update. Replaces every profile field; the password only changes
/// when one is given.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(
        required(message = "The user_name field is required"),
        length(max = 256, message = "The user_name field must be at most 256 characters")
    )]
    pub user_name: Option<String>,
    #[validate(
        required(message = "The email field is required"),
        email(message = "The email field is not a valid e-mail address"),
        length(max = 256, message = "The email field must be at most 256 characters")
    )]
    pub email: Option<String>,
    #[validate(length(max = 100, message = "The first_name field must be at most 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 100, message = "The last_name field must be at most 100 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 30, message = "The phone field must be at most 30 characters"))]
    pub phone: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(
        required(message = "The name field is required"),
        length(max = 256, message = "The name field must be at most 256 characters")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub user_name: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub roles: Vec<String>,
}

impl UserDto {
    pub fn new(user: User, roles: Vec<String>) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            roles,
        }
    }
}

/// Auth Response (JWT)
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}
