//! Reference Maven manifest-type extension for the basis resolver.
//!
//! Implements `basis_core::Extension` for Maven-layout coordinates: POM
//! parsing, `maven-metadata.xml`, artifact download, checksum verification,
//! a local artifact cache, and repository authentication.

pub mod auth;
pub mod cache;
pub mod checksum;
pub mod download;
pub mod extension;
pub mod metadata;
pub mod pom;
pub mod repository;
pub mod version;
