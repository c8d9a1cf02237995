//! Auth module: login/logout requests and the session flag they maintain.

pub mod domain;
pub mod service;

pub use service::AuthService;
