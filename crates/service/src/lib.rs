//! HTTP service layer for the pet tracker REST API.
//! - `ApiClient` carries credentials and the 401/403 -> login policy.
//! - `AnimalService` / `ChickenService` are thin CRUD wrappers.
//! - `AuthService` logs in and out and keeps the session flag in a `SessionStore`.

pub mod animal;
pub mod auth;
pub mod chicken;
pub mod client;
pub mod errors;
pub mod session;
pub mod storage;
pub mod upload;

pub use animal::AnimalService;
pub use auth::AuthService;
pub use chicken::ChickenService;
pub use client::ApiClient;
pub use errors::ClientError;
