//! # Registry Module
//!
//! The introspectable route catalogue and its diagnostic report.
//!
//! ## Overview
//!
//! The catalogue accumulates one entry per registration, in call order: a
//! group entry for every `group` call and a leaf entry for every typed-handler
//! registration. Leaves registered under a group's base path nest as that
//! group's children; leaves with no base path sit at the top level. The
//! catalogue exists for diagnostics and documentation only; request dispatch
//! never consults it.
//!
//! Rendering produces a column-aligned tree written to a diagnostic stream:
//!
//! ```text
//! [router]├── /api/pets
//! [router]│   └── /{id}   GET   routedoc::handlers::GetPet
//! [router]│   └── /       POST  routedoc::handlers::AddPet
//! [router]├── /healthz    GET   routedoc::handlers::Health
//! ```
//!
//! Groups that never received a child are omitted from the report entirely.

mod catalogue;
mod report;

pub use catalogue::{CatalogueError, RouteCatalogue, RouteEntry, RouteInfo};
