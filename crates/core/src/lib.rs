//! # SPOA Core
//!
//! Core business logic for the SPOA denuncia intake system.
//!
//! This crate contains the pieces that do not depend on the web surface:
//! - Offense reference catalog loaded once at startup (`catalog`)
//! - Append-only denuncia log on local storage (`store`)
//! - Sentencing estimates derived from the catalog (`estimate`)
//! - Startup-resolved configuration (`config`)
//!
//! **No API concerns**: HTTP handlers, HTML rendering and the Gemini client
//! live in the root binary and in `spoa-analysis`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod estimate;
pub mod store;

pub use catalog::OffenseCatalog;
pub use config::CoreConfig;
pub use error::{DenunciaError, DenunciaResult};
pub use estimate::{estimate_sentencing, CondenaLine, PlazoSentencia, SentenceEstimate};
pub use store::{DenunciaStore, StoredDenuncia};
