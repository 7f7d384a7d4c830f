//! Signed-in state: the bearer token, its claims and the user it belongs to.
//!
//! Tokens are JWTs issued by the API. The API is the authority on whether a
//! token is genuine, so claims are decoded without verifying the signature;
//! only expiry is checked locally.

use std::sync::{Arc, RwLock};

use byteblog_engine::UserProfile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::images::proxied_image_url;
use crate::store::{StoreError, TokenStore};

const ADMIN_ROLE: &str = "ADMIN";
const DEFAULT_USER_NAME: &str = "User";
const DEFAULT_FALLBACK_IMAGE: &str = "/abstract-profile.png";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Session lock poisoned")]
    Poisoned,
}

/// Payload of an API-issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject; the numeric user id on this API.
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub exp: Option<u64>,
    #[serde(default)]
    pub iat: Option<u64>,
}

impl Claims {
    /// A token without `exp` is treated as expired.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.exp.is_none_or(|exp| exp <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(jsonwebtoken::get_current_timestamp())
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// Decode a token's claims without checking its signature or expiry.
///
/// Any signing algorithm is accepted since no key is involved.
pub fn decode_claims(token: &str) -> Result<Claims, SessionError> {
    jsonwebtoken::dangerous::insecure_decode::<Claims>(token)
        .map(|data| data.claims)
        .map_err(|e| SessionError::InvalidToken(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    /// Already rewritten for the image proxy.
    pub profile_image: Option<String>,
}

impl User {
    pub fn from_claims(claims: &Claims, fallback_email: &str) -> Self {
        Self {
            id: claims.sub.parse().ok(),
            name: non_empty(claims.name.as_deref())
                .unwrap_or(DEFAULT_USER_NAME)
                .to_string(),
            email: non_empty(claims.email.as_deref())
                .unwrap_or(fallback_email)
                .to_string(),
            role: claims.role.clone(),
            profile_image: None,
        }
    }

    pub fn from_profile(profile: &UserProfile, fallback_image: &str) -> Self {
        Self {
            id: Some(profile.id),
            name: non_empty(profile.name.as_deref())
                .unwrap_or(DEFAULT_USER_NAME)
                .to_string(),
            email: profile.email.clone().unwrap_or_default(),
            role: profile.role.clone(),
            profile_image: profile
                .profile_image
                .as_deref()
                .map(|url| proxied_image_url(Some(url), fallback_image)),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub claims: Claims,
    pub user: User,
}

impl Session {
    pub fn is_valid(&self) -> bool {
        !self.claims.is_expired()
    }

    /// Admin rights come from the token, not the profile.
    pub fn is_admin(&self) -> bool {
        self.claims.is_admin()
    }
}

/// Owns the token store and the current session.
pub struct SessionManager {
    store: Arc<dyn TokenStore>,
    current: RwLock<Option<Session>>,
    fallback_image: String,
}

impl SessionManager {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
        }
    }

    pub fn with_fallback_image(mut self, fallback_image: impl Into<String>) -> Self {
        self.fallback_image = fallback_image.into();
        self
    }

    /// The store backing this session, shared with API clients.
    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.store)
    }

    /// Resume from the stored token. Expired or undecodable tokens are
    /// removed from the store.
    pub fn restore(&self) -> Result<Option<Session>, SessionError> {
        let Some(token) = self.store.load()? else {
            return Ok(None);
        };

        let claims = match decode_claims(&token) {
            Ok(claims) if !claims.is_expired() => claims,
            Ok(_) => {
                log::info!("Stored token has expired, signing out");
                self.discard()?;
                return Ok(None);
            }
            Err(e) => {
                log::warn!("Discarding stored token: {e}");
                self.discard()?;
                return Ok(None);
            }
        };

        let session = Session {
            user: User::from_claims(&claims, ""),
            token,
            claims,
        };
        self.set(Some(session.clone()))?;
        Ok(Some(session))
    }

    /// Sign in and persist the issued token.
    pub async fn login(
        &self,
        client: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<Session, SessionError> {
        let response = client.login(email, password).await?;
        let claims = decode_claims(&response.token)?;

        let user = match &response.user {
            Some(profile) => User::from_profile(profile, &self.fallback_image),
            None => User::from_claims(&claims, email),
        };

        self.store.save(&response.token)?;
        let session = Session {
            token: response.token,
            claims,
            user,
        };
        self.set(Some(session.clone()))?;
        log::info!("Signed in as {}", session.user.email);
        Ok(session)
    }

    /// Replace the session's user with the API's full profile.
    pub async fn refresh_profile(&self, client: &ApiClient) -> Result<Option<User>, SessionError> {
        if !self.is_valid() {
            return Ok(None);
        }

        let profile = client.profile().await?;
        let user = User::from_profile(&profile, &self.fallback_image);

        let mut guard = self.current.write().map_err(|_| SessionError::Poisoned)?;
        if let Some(session) = guard.as_mut() {
            session.user = user.clone();
        }
        Ok(Some(user))
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.discard()
    }

    pub fn current(&self) -> Option<Session> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|session| session.token)
    }

    pub fn is_valid(&self) -> bool {
        self.current().is_some_and(|session| session.is_valid())
    }

    pub fn is_admin(&self) -> bool {
        self.current().is_some_and(|session| session.is_admin())
    }

    fn discard(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        self.set(None)
    }

    fn set(&self, session: Option<Session>) -> Result<(), SessionError> {
        let mut guard = self.current.write().map_err(|_| SessionError::Poisoned)?;
        *guard = session;
        Ok(())
    }
}
