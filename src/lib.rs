//! BTrustOn Directory Web Library
//!
//! Server-rendered marketing and directory front-end for the BTrustOn
//! business-profile network: the home directory, per-company pages,
//! sitemap/robots generation and social-preview images, all read-only
//! over the remote `profiles` table.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `filter`: In-memory directory search and facets.
//! - `handlers`: HTTP request handlers and routing.
//! - `models`: Profile data model.
//! - `normalize`: Display-value normalization.
//! - `og`: Social-preview image generation.
//! - `pages`: HTML document rendering.
//! - `seo`: Sitemap, robots and structured-data blocks.
//! - `store`: Remote profile store accessor.

pub mod config;
pub mod errors;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod og;
pub mod pages;
pub mod seo;
pub mod store;
