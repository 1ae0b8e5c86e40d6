use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::sync::Arc;

use crate::persistence::{NewUser, Role, User, UserRepository};

use super::error::AuthServiceError;
use super::types::{
    AuthResponse, Claims, LoginRequest, RegisterRequest, UpdateUserRequest, UserDto,
};

pub type AuthResult<T> = Result<T, AuthServiceError>;

/// Minimum password length. No character-class rules apply.
pub const MIN_PASSWORD_LEN: usize = 4;

const TOKEN_TTL_HOURS: i64 = 24;

pub fn check_password_policy(password: &str) -> AuthResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthServiceError::InvalidInput(format!(
            "Passwords must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthServiceError::Hashing(e.to_string()))
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub struct UserAuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
}

impl UserAuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: String) -> Self {
        Self { users, jwt_secret }
    }

    /// Register a new user
    pub async fn register(&self, req: RegisterRequest) -> AuthResult<UserDto> {
        let password = req.password.unwrap_or_default();
        check_password_policy(&password)?;

        let user = self
            .users
            .create_user(&NewUser {
                user_name: req.user_name.unwrap_or_default(),
                email: req.email.unwrap_or_default(),
                first_name: req.first_name,
                last_name: req.last_name,
                phone: req.phone,
                password_hash: hash_password(&password)?,
            })
            .await?;
        tracing::info!(user_id = user.id, user_name = %user.user_name, "User registered");
        Ok(UserDto::new(user, Vec::new()))
    }

    /// Login user and issue JWT
    pub async fn login(&self, req: LoginRequest) -> AuthResult<AuthResponse> {
        let user_name = req.user_name.unwrap_or_default();
        let password = req.password.unwrap_or_default();

        let user = match self.users.find_user_by_name(&user_name).await? {
            Some(user) if verify_password(&password, &user.password_hash) => user,
            _ => {
                tracing::warn!(user_name = %user_name, "Rejected login");
                return Err(AuthServiceError::InvalidCredentials);
            }
        };

        let roles = self.users.roles_for_user(user.id).await?;
        let token = self.issue_token(&user, &roles)?;
        Ok(AuthResponse {
            token,
            user: UserDto::new(user, roles),
        })
    }

    async fn load_user(&self, claims: &Claims) -> AuthResult<User> {
        let id = claims
            .user_id()
            .ok_or_else(|| AuthServiceError::InvalidInput("Invalid user id in token".into()))?;
        self.users
            .get_user(id)
            .await?
            .ok_or(AuthServiceError::UserNotFound(id))
    }

    pub async fn current_user(&self, claims: &Claims) -> AuthResult<UserDto> {
        let user = self.load_user(claims).await?;
        let roles = self.users.roles_for_user(user.id).await?;
        Ok(UserDto::new(user, roles))
    }

    pub async fn update_user(&self, claims: &Claims, req: UpdateUserRequest) -> AuthResult<UserDto> {
        let current = self.load_user(claims).await?;
        let password_hash = match req.password.as_deref() {
            Some(password) => {
                check_password_policy(password)?;
                hash_password(password)?
            }
            None => current.password_hash,
        };

        let user = User {
            id: current.id,
            user_name: req.user_name.unwrap_or(current.user_name),
            email: req.email.unwrap_or(current.email),
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            password_hash,
        };
        let saved = self
            .users
            .update_user(&user)
            .await?
            .ok_or(AuthServiceError::UserNotFound(user.id))?;
        tracing::info!(user_id = saved.id, "User updated");
        let roles = self.users.roles_for_user(saved.id).await?;
        Ok(UserDto::new(saved, roles))
    }

    pub async fn create_role(&self, name: &str) -> AuthResult<Role> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthServiceError::InvalidInput(
                "Role name must not be empty".into(),
            ));
        }
        let role = self.users.create_role(name).await?;
        tracing::info!(role = %role.name, "Role created");
        Ok(role)
    }

    pub async fn add_to_role(&self, user_id: i32, role_name: &str) -> AuthResult<()> {
        let role = self
            .users
            .find_role(role_name)
            .await?
            .ok_or_else(|| AuthServiceError::RoleNotFound(role_name.to_string()))?;
        self.users.add_user_to_role(user_id, role.id).await?;
        tracing::info!(user_id, role = %role.name, "User added to role");
        Ok(())
    }

    pub fn issue_token(&self, user: &User, roles: &[String]) -> AuthResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.user_name.clone(),
            roles: roles.to_vec(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?)
    }

    /// Verify JWT token. Signature and expiry only; issuer and audience are
    /// not checked.
    pub fn verify_token(&self, token: &str) -> AuthResult<Claims> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}
