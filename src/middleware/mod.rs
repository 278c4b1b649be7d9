//! Dispatch-side middleware hooks.
//!
//! A [`Middleware`] observes every dispatch: `before` runs ahead of the
//! handler chain and may short-circuit with an early response, `after` sees
//! the final response and the handler latency. Hooks run in the order they
//! were added to the dispatcher.

mod core;
mod tracing;

pub use core::Middleware;
pub use tracing::TracingMiddleware;
