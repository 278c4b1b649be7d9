use crate::code::CodeError;
use crate::dispatcher::{HandlerRequest, HandlerResponse, NativeHandler, ParamVec};
use anyhow::Result;
use http::Method;
use serde::Serialize;
use std::convert::TryFrom;
use std::sync::Arc;
use tracing::warn;

/// Trait implemented by typed application handlers.
///
/// A handler receives a [`TypedRequest`] and returns its serializable
/// response, or a [`CodeError`] naming the status to report.
pub trait TypedHandler: Send + Sync + 'static {
    type Request: TryFrom<HandlerRequest, Error = anyhow::Error> + Send + 'static;
    type Response: Serialize + Send + 'static;

    fn handle(&self, req: TypedRequest<Self::Request>) -> Result<Self::Response, CodeError>;
}

/// A request whose data has been extracted into the handler's request type.
#[derive(Debug, Clone)]
pub struct TypedRequest<T> {
    pub method: Method,
    pub path: String,
    pub handler_name: String,
    pub path_params: ParamVec,
    pub query_params: ParamVec,
    pub data: T,
}

impl<T> TypedRequest<T>
where
    T: TryFrom<HandlerRequest, Error = anyhow::Error>,
{
    /// Extract the typed request from the wire request.
    pub fn from_handler(req: HandlerRequest) -> Result<TypedRequest<T>> {
        let data = T::try_from(req.clone())?;

        Ok(TypedRequest {
            method: req.method,
            path: req.path,
            handler_name: req.handler_name,
            path_params: req.path_params,
            query_params: req.query_params,
            data,
        })
    }
}

/// Convert a typed handler into the native callback shape.
///
/// The resulting callback extracts the request type (failure replies 400),
/// invokes the handler (a `CodeError` replies with its status and body), and
/// serializes a successful response into a 200 reply.
pub fn into_native<H: TypedHandler>(handler: H) -> NativeHandler {
    Arc::new(move |req: HandlerRequest| {
        let reply_tx = req.reply_tx.clone();
        let handler_name = req.handler_name.clone();

        let response = match TypedRequest::<H::Request>::from_handler(req) {
            Ok(typed) => match handler.handle(typed) {
                Ok(body) => match serde_json::to_value(body) {
                    Ok(value) => HandlerResponse::ok_json(value),
                    Err(err) => {
                        warn!(handler = %handler_name, "failed to serialize response: {err}");
                        HandlerResponse::new(
                            500,
                            serde_json::json!({ "error": "failed to serialize response" }),
                        )
                    }
                },
                Err(err) => HandlerResponse::from_error(&err),
            },
            Err(err) => HandlerResponse::from_error(&CodeError::bad_request(err)),
        };

        let _ = reply_tx.send(response);
    })
}
