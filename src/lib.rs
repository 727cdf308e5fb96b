//! Credit Risk Assessment API Library
//!
//! This library scores an applicant's creditworthiness from a bureau score,
//! a utility bill history and a bank ledger, and exposes that pipeline over
//! HTTP behind a pre-shared API key.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `auth`: API key verification.
//! - `config`: Configuration management.
//! - `docs`: OpenAPI document.
//! - `errors`: Error handling types.
//! - `features`: Feature vector construction.
//! - `handlers`: HTTP request handlers.
//! - `models`: Request, feature and response models.
//! - `scoring`: Scoring models.
//! - `server`: Router assembly.
//! - `service`: Assessment orchestration.
//! - `transactions`: Bank ledger metrics.
//! - `utility`: Utility bill payment score.
//! - `validation`: Request field validation.

pub mod api;
pub mod core;

pub mod auth;
pub mod config;
pub mod docs;
pub mod errors;
pub mod features;
pub mod handlers;
pub mod models;
pub mod scoring;
pub mod server;
pub mod service;
pub mod transactions;
pub mod utility;
pub mod validation;
