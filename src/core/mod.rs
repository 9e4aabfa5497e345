//! Core library components.
//!
//! Contains the stage-variable engine, its store adapters, the encryption
//! collaborator and configuration handling.

pub mod audit;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod key;
pub mod mask;
pub mod stage;
pub mod store;
pub mod types;
