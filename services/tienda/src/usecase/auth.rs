use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use fundas_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::TiendaServiceError;

/// Access tokens live for 24 hours.
pub const ACCESS_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Reserved admin account seeded at first startup.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@fundasdepatin.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// JWT claims for access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: u8,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

// ── Password hashing ─────────────────────────────────────────────────────────

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, TiendaServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| TiendaServiceError::Internal(anyhow::anyhow!("password hash error: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash. A mismatch is `Ok(false)`;
/// only a malformed hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, TiendaServiceError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| TiendaServiceError::Internal(anyhow::anyhow!("invalid hash format: {e}")))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(TiendaServiceError::Internal(anyhow::anyhow!(
            "password verify error: {e}"
        ))),
    }
}

// ── Tokens ───────────────────────────────────────────────────────────────────

pub fn issue_access_token(
    user: &User,
    secret: &str,
) -> Result<(String, u64), TiendaServiceError> {
    let exp = now_secs() + ACCESS_TOKEN_TTL_SECS;
    let claims = TokenClaims {
        sub: user.id.to_string(),
        role: user.role.as_u8(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TiendaServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Validate a bearer token (HS256, exp checked) and return its claims.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, TiendaServiceError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| TiendaServiceError::InvalidToken)?;

    Ok(data.claims)
}

/// Role gate for admin-only operations.
pub fn require_admin(user: &User) -> Result<(), TiendaServiceError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(TiendaServiceError::Forbidden)
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, TiendaServiceError> {
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(TiendaServiceError::EmailAlreadyExists);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            phone: input.phone,
            address: input.address,
            city: input.city,
            postal_code: input.postal_code,
            role: UserRole::Customer,
            is_active: true,
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutput, TiendaServiceError> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(TiendaServiceError::InvalidCredentials)?;

        if !user.is_active || !verify_password(password, &user.password_hash)? {
            return Err(TiendaServiceError::InvalidCredentials);
        }

        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;
        Ok(LoginOutput {
            user,
            access_token,
            access_token_exp,
        })
    }
}

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> AuthenticateUseCase<R> {
    /// Resolve a bearer token to the user it references. Every defect
    /// (bad signature, expiry, malformed subject, unknown user) looks
    /// the same to the caller.
    pub async fn execute(&self, token: &str) -> Result<User, TiendaServiceError> {
        let claims = validate_token(token, &self.jwt_secret)?;
        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| TiendaServiceError::InvalidToken)?;
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(TiendaServiceError::InvalidToken)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, TiendaServiceError> {
        self.repo.list().await
    }
}

// ── Admin seeding ────────────────────────────────────────────────────────────

pub struct EnsureAdminUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> EnsureAdminUseCase<R> {
    /// Create the reserved admin account if it does not exist yet.
    /// Returns `true` when a new account was seeded.
    pub async fn execute(&self) -> Result<bool, TiendaServiceError> {
        if self.repo.find_by_email(DEFAULT_ADMIN_EMAIL).await?.is_some() {
            return Ok(false);
        }
        let admin = User {
            id: Uuid::new_v4(),
            name: "Administrador".to_owned(),
            email: DEFAULT_ADMIN_EMAIL.to_owned(),
            password_hash: hash_password(DEFAULT_ADMIN_PASSWORD)?,
            phone: None,
            address: None,
            city: None,
            postal_code: None,
            role: UserRole::Admin,
            is_active: true,
            created_at: Utc::now(),
        };
        self.repo.create(&admin).await?;
        Ok(true)
    }
}
