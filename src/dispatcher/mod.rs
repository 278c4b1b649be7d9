//! # Dispatcher Module
//!
//! The outbound boundary of the routing facade, plus a provided
//! implementation.
//!
//! ## Overview
//!
//! The facade does not interpret handlers; it forwards native-callback-shaped
//! values to a [`DispatchAdapter`]. The adapter owns:
//!
//! - converting a typed application handler into the native callback shape
//! - registering callback chains under a method and path
//! - mirroring route grouping (base path computation)
//! - carrying natively-shaped middleware attached to a group
//!
//! [`Dispatcher`] is the provided implementation: each registered chain runs in
//! its own coroutine, fed requests over an mpsc channel and replying over a
//! reply channel. Handler panics are recovered into 500 responses, and
//! [`Middleware`](crate::middleware::Middleware) hooks run before and after
//! every dispatch.
//!
//! ## Request Flow
//!
//! 1. Caller resolves a method and path and calls [`Dispatcher::dispatch`]
//! 2. The dispatcher builds a [`HandlerRequest`] with a reply channel
//! 3. `before` middleware hooks may short-circuit with an early response
//! 4. The request is sent to the chain's coroutine; callbacks run in
//!    registration order and the first reply sent wins
//! 5. `after` middleware hooks observe the response and latency
//!
//! All registration happens during single-threaded startup; only handler
//! execution is concurrent.

mod core;

pub(crate) use core::join_base_path;
pub use core::{
    DispatchAdapter, Dispatcher, HandlerRequest, HandlerResponse, HandlerSender, HeaderVec,
    NativeHandler, ParamVec, RequestParts,
};
