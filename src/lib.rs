//! ProgexAI engine: deterministic rule engines for student project
//! guidance, served over HTTP/JSON.
//!
//! The crate is split into three layers: [`knowledge`] holds the static
//! tables the engines score against, [`engines`] holds the six pure rule
//! engines, and [`api`] exposes them as axum endpoints.

pub mod api;
pub mod engines;
pub mod knowledge;
