#![doc = "ecj-cms-core: core logic library for the ECJ Tire Supply content layer."]

//! This crate holds everything that talks to the Directus CMS behind the
//! ECJ Tire Supply website: schema provisioning, demo seeding, published-content
//! reads and the formatting helpers page templates use.
//!
//! # Usage
//! - Build a [`client::DirectusClient`] from a [`config::CmsConfig`].
//! - Admin commands go through [`provision`] and [`seed`] with the client as [`contract::AdminApi`].
//! - Pages read through [`content::ContentReader`] and collapse failures with [`presentation::OrEmpty`].

pub mod client;
pub mod config;
pub mod content;
pub mod contract;
pub mod error;
pub mod format;
pub mod lookups;
pub mod models;
pub mod presentation;
pub mod provision;
pub mod query;
pub mod schema;
pub mod seed;

pub use error::CmsError;
