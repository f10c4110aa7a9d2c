//! Clinic appointment web UI

pub mod app;
pub mod auth;
pub mod client;
pub mod components;
pub mod config;
pub mod logging;
pub mod navigator;
pub mod pages;
pub mod routes;
pub mod storage;

pub use app::App;
pub use auth::AuthContext;
pub use client::{api_client, session};
pub use config::FrontendConfig;
pub use navigator::BrowserNavigator;
pub use storage::LocalSessionStore;
