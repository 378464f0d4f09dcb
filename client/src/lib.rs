//! Client for a small Reddit-style forum backend.
//!
//! A [`Gateway`](gateway::Gateway) talks to the backend, one service per
//! resource wraps it, and forms and pages turn each reply into
//! [`Feedback`](feedback::Feedback) for the [`App`](app::App) to show.

pub mod app;
pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod feedback;
pub mod forms;
pub mod gateway;
pub mod models;
pub mod pages;
pub mod routes;
pub mod services;
pub mod session;
pub mod shell;
pub mod states;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
