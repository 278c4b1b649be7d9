//! # Router Module
//!
//! The registration facade application code builds routes through.
//!
//! ## Overview
//!
//! [`AppRouter`] owns the dispatch adapter and the route catalogue.
//! Registration happens through [`RouteScope`] values: the root scope covers
//! top-level paths, and [`RouteScope::group`] mirrors the underlying router's
//! grouping while recording the group in the catalogue.
//!
//! A registration call accepts any mix of handlers as [`RouteHandler`] values:
//! native framework callbacks pass through unmodified, and at most one typed
//! application function per call is recorded into the catalogue and forwarded
//! in its adapted native shape. A second typed function in the same call is a
//! registration-time error.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut router = AppRouter::new(Dispatcher::new());
//! let mut api = router.group("/api", vec![]);
//! let get_pet = api.typed(GetPet);
//! api.get("/pets/{id}", vec![get_pet])?;
//! router.catalogue().print();
//! ```

mod facade;

pub use facade::{AppRouter, RouteError, RouteHandler, RouteScope};
