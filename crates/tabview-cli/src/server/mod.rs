//! Local HTTP shell around a viewer session.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
