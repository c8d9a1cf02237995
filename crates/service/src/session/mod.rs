//! Session flag storage.
//!
//! The flag is not an authentication token: the server keeps the real session
//! behind the `session_token` cookie. The stored id only lets a fresh process
//! present that cookie again.

pub mod file;

use async_trait::async_trait;

use crate::errors::ClientError;

pub use file::FileSessionStore;

/// Cookie carrying the server-side session id.
pub const SESSION_COOKIE: &str = "session_token";

/// Storage abstraction for the session flag.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Session id from the last successful login, if still flagged as logged in.
    async fn session_id(&self) -> Option<String>;
    async fn set_logged_in(&self, session_id: &str) -> Result<(), ClientError>;
    async fn clear(&self) -> Result<(), ClientError>;

    async fn is_logged_in(&self) -> bool {
        self.session_id().await.is_some()
    }
}

/// Simple in-memory store for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemorySessionStore {
        session: Mutex<Option<String>>,
    }

    impl MemorySessionStore {
        pub fn logged_in(session_id: &str) -> Self {
            Self { session: Mutex::new(Some(session_id.to_string())) }
        }
    }

    #[async_trait]
    impl SessionStore for MemorySessionStore {
        async fn session_id(&self) -> Option<String> {
            self.session.lock().unwrap().clone()
        }

        async fn set_logged_in(&self, session_id: &str) -> Result<(), ClientError> {
            *self.session.lock().unwrap() = Some(session_id.to_string());
            Ok(())
        }

        async fn clear(&self) -> Result<(), ClientError> {
            *self.session.lock().unwrap() = None;
            Ok(())
        }
    }
}
