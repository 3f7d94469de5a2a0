//! Authentication utilities library
//!
//! Provides the session building blocks used by the bookstore service:
//! - Password hashing (Argon2id)
//! - JWT access token issuance and validation
//! - In-memory token revocation
//! - Session coordination (login, logout, per-request authorization)
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_subject("alice", Duration::minutes(30));
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.subject(), Some("alice"));
//! ```
//!
//! ## Session Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, PasswordHasher, RevocationRegistry};
//! use chrono::Duration;
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let runtime = tokio::runtime::Runtime::new().unwrap();
//! # runtime.block_on(async {
//! let registry = Arc::new(RevocationRegistry::new());
//! let auth = Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::minutes(30),
//!     registry,
//! );
//!
//! let hash = PasswordHasher::new().hash("pw1").unwrap();
//! let session = auth.login("alice", "pw1", &hash).await.unwrap();
//! assert_eq!(auth.authorize(&session.access_token).await.unwrap(), "alice");
//!
//! auth.logout(&session.access_token).await.unwrap();
//! assert!(auth.authorize(&session.access_token).await.is_err());
//! # });
//! # }
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod revocation;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use revocation::RevocationRegistry;
