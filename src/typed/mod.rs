//! # Typed Module
//!
//! Type-safe application handlers and their adaptation to the native callback
//! shape.
//!
//! ## Overview
//!
//! Instead of writing against the raw [`HandlerRequest`](crate::dispatcher::HandlerRequest)
//! / reply-channel surface, an application handler can be a plain typed
//! function: its request type is extracted from the wire request via
//! `TryFrom`, its response type serializes to the JSON body, and failures are
//! expressed as [`CodeError`](crate::code::CodeError) values carrying the
//! status to report.
//!
//! ```rust
//! use anyhow::anyhow;
//! use routedoc::code::CodeError;
//! use routedoc::dispatcher::HandlerRequest;
//! use routedoc::typed::{TypedHandler, TypedRequest};
//!
//! struct GetPetRequest {
//!     id: i64,
//! }
//!
//! impl TryFrom<HandlerRequest> for GetPetRequest {
//!     type Error = anyhow::Error;
//!
//!     fn try_from(req: HandlerRequest) -> Result<Self, Self::Error> {
//!         let id = req
//!             .get_path_param("id")
//!             .ok_or_else(|| anyhow!("missing id"))?
//!             .parse()?;
//!         Ok(GetPetRequest { id })
//!     }
//! }
//!
//! struct GetPet;
//!
//! impl TypedHandler for GetPet {
//!     type Request = GetPetRequest;
//!     type Response = serde_json::Value;
//!
//!     fn handle(&self, req: TypedRequest<Self::Request>) -> Result<Self::Response, CodeError> {
//!         if req.data.id == 0 {
//!             return Err(CodeError::not_found("no such pet"));
//!         }
//!         Ok(serde_json::json!({ "id": req.data.id }))
//!     }
//! }
//! ```
//!
//! [`into_native`] performs the conversion the facade forwards to the
//! dispatch adapter: extraction failure becomes a 400 response, a handler
//! error becomes a response with the error's status, and a successful result
//! becomes a 200 response with the serialized body.

mod core;

pub use core::{into_native, TypedHandler, TypedRequest};
