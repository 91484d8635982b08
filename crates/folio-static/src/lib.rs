//! Static site generator for the portfolio.
//!
//! Builds the home, posts, projects and markdown pages, then the utility
//! stylesheet, public assets, sitemap and robots file.

pub mod assets;
pub mod builder;
pub mod config;
pub mod glob;
pub mod images;
pub mod sitemap;
pub mod templates;
pub mod utility;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use config::{SiteIntegrations, StyleConfig, StylePlugin};
pub use utility::UtilityEngine;
