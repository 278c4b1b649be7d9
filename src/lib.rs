//! # routedoc
//!
//! **routedoc** is a request-routing facade for Rust services: handlers
//! register either as raw framework callbacks or as plain typed functions,
//! while the facade builds an introspectable route catalogue and derives
//! OpenAPI-style schemas from application types for documentation generation.
//!
//! ## Overview
//!
//! routedoc sits between application code and whatever actually serves HTTP.
//! It never parses wire bytes and never matches paths; it classifies handlers,
//! keeps the books, and forwards native callbacks to a dispatch adapter. Three
//! pieces carry the weight:
//!
//! - the **schema compiler** - a pure recursive walk over a type's structural
//!   shape producing a JSON-serializable schema (types, nesting, required
//!   fields, formats)
//! - the **route catalogue** - an append-only record of groups and endpoints,
//!   rendered as a column-aligned diagnostic tree
//! - the **router facade** - the registration surface that tells native
//!   callbacks and typed functions apart and enforces the one-typed-handler
//!   rule per registration call
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`schema`]** - structural schemas, the [`Reflect`](schema::Reflect)
//!   shape trait, and the compiler
//! - **[`registry`]** - the route catalogue and its report renderer
//! - **[`router`]** - the `AppRouter`/`RouteScope` registration facade
//! - **[`typed`]** - the typed-handler trait and native-callback adaptation
//! - **[`dispatcher`]** - the dispatch-adapter boundary and a provided
//!   coroutine-based implementation
//! - **[`middleware`]** - before/after dispatch hooks
//! - **[`code`]** - status-coded errors typed handlers return
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use routedoc::{AppRouter, Dispatcher};
//!
//! let mut router = AppRouter::new(Dispatcher::new());
//!
//! let mut pets = router.group("/pets", vec![]);
//! let get_pet = pets.typed(GetPet);
//! pets.get("/{id}", vec![get_pet])?;
//!
//! // Diagnostic tree of everything registered:
//! router.print_routes();
//!
//! // Documentation schema for a response type:
//! let docs = routedoc::schema::generate::<Pet>("schema");
//! ```
//!
//! ## Design Notes
//!
//! Registration is single-threaded startup-phase work: the facade takes no
//! locks and assumes registration completes before dispatch or rendering
//! begins. Misregistering two typed functions in one call is a structured
//! registration-time error, as is placing a leaf under a base path no group
//! was created for. Schema generation is silent about unsupported shapes -
//! absence from the output means "not representable", never failure.
//!
//! The provided [`Dispatcher`](dispatcher::Dispatcher) runs each registered
//! chain in a `may` coroutine behind an mpsc channel, recovering handler
//! panics into 500 responses. Any other backend can take its place by
//! implementing [`DispatchAdapter`](dispatcher::DispatchAdapter).

pub mod code;
pub mod dispatcher;
pub mod middleware;
pub mod registry;
pub mod router;
pub mod schema;
pub mod typed;

pub use code::CodeError;
pub use dispatcher::{
    DispatchAdapter, Dispatcher, HandlerRequest, HandlerResponse, NativeHandler, RequestParts,
};
pub use registry::{CatalogueError, RouteCatalogue, RouteEntry, RouteInfo};
pub use router::{AppRouter, RouteError, RouteHandler, RouteScope};
pub use schema::{FieldShape, Reflect, Schema, SchemaFormat, SchemaKind, Shape};
pub use typed::{TypedHandler, TypedRequest};
