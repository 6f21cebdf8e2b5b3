//! Data-driven progression content and its loaders.
//!
//! This crate houses the shipped content and loads it from RON/TOML files:
//! - Skill catalogs (RON, one file per job line under `skills/`)
//! - Boss progression table (RON)
//! - Balance configuration (TOML)
//!
//! Loaders validate everything they read, so a catalog with an unknown
//! prerequisite, a mis-sized rank table or a prerequisite cycle never
//! reaches the runtime. Content is consumed through the core oracle traits
//! and never appears in saved state.

pub mod loaders;

pub use loaders::{
    BossLoader, ConfigLoader, ContentFactory, GameContent, LoadResult, SkillLoader, embedded,
    validate_static_tables,
};
