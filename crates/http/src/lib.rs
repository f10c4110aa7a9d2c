//! Clinic HTTP client
//!
//! Typed access to the clinic appointment API. Requests carry the session
//! token held by [`clinic_core::Session`]; authorization failures end that
//! session and redirect to the login page.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::{ClinicClient, ClinicClientBuilder};
