use crate::code::CodeError;
use crate::middleware::Middleware;
use crate::typed::TypedHandler;
use http::Method;
use may::sync::mpsc;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Path and query parameters extracted by the server layer.
pub type ParamVec = SmallVec<[(Arc<str>, String); 4]>;

/// Header and cookie storage.
pub type HeaderVec = SmallVec<[(Arc<str>, String); 8]>;

/// A request as seen by native callbacks.
///
/// Carries the reply channel; a callback answers by sending a
/// [`HandlerResponse`] through `reply_tx`. Callbacks that act as middleware
/// simply do not reply.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    pub method: Method,
    pub path: String,
    pub handler_name: String,
    pub path_params: ParamVec,
    pub query_params: ParamVec,
    pub headers: HeaderVec,
    pub cookies: HeaderVec,
    pub body: Option<Value>,
    pub reply_tx: mpsc::Sender<HandlerResponse>,
}

impl HandlerRequest {
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        lookup(&self.path_params, name)
    }

    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        lookup(&self.query_params, name)
    }

    pub fn get_header(&self, name: &str) -> Option<&str> {
        lookup(&self.headers, name)
    }

    pub fn get_cookie(&self, name: &str) -> Option<&str> {
        lookup(&self.cookies, name)
    }
}

fn lookup<'a>(pairs: &'a [(Arc<str>, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| &**key == name)
        .map(|(_, value)| value.as_str())
}

#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    pub status: u16,
    #[serde(skip_serializing)]
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl HandlerResponse {
    pub fn new(status: u16, body: Value) -> Self {
        HandlerResponse {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    pub fn ok_json(body: Value) -> Self {
        HandlerResponse::new(200, body)
    }

    pub fn from_error(err: &CodeError) -> Self {
        HandlerResponse::new(err.code, err.body())
    }
}

/// The native callback shape: a function over a [`HandlerRequest`] that
/// answers through the request's reply channel.
pub type NativeHandler = Arc<dyn Fn(HandlerRequest) + Send + Sync + 'static>;

/// Sender feeding a registered chain's coroutine.
pub type HandlerSender = mpsc::Sender<HandlerRequest>;

/// The underlying dispatch boundary the routing facade registers into.
///
/// Implementations own the native callback shape, the typed-to-native
/// conversion, and the base-path semantics of grouping. The facade never
/// interprets a `Native` value; it only collects and forwards them.
pub trait DispatchAdapter {
    type Native;

    /// Convert a typed application handler into the native callback shape.
    fn adapt<H: TypedHandler>(&self, handler: H) -> Self::Native;

    /// Register a callback chain under a method and path. Never fails;
    /// registration is advisory startup-phase work.
    fn register(
        &mut self,
        method: Method,
        base_path: &str,
        path: &str,
        handler_name: &str,
        chain: Vec<Self::Native>,
    );

    /// Mirror the underlying router's grouping and return the resulting base
    /// path.
    fn group(&mut self, parent: &str, path: &str) -> String;

    /// Attach natively-shaped middleware to a base path; it is prepended to
    /// every chain subsequently registered under that base.
    fn use_middleware(&mut self, base_path: &str, middleware: Self::Native);
}

struct ChainEntry {
    name: String,
    tx: HandlerSender,
}

/// Channel-based dispatch adapter.
///
/// Each registered chain runs in its own coroutine. Requests are sent over an
/// mpsc channel; callbacks run in registration order and the first reply sent
/// wins. Panics inside a chain are recovered into 500 responses.
#[derive(Default)]
pub struct Dispatcher {
    routes: HashMap<(Method, String), ChainEntry>,
    scoped: HashMap<String, Vec<NativeHandler>>,
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher::default()
    }

    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    /// Whether a chain is registered for the exact method and path.
    pub fn has_route(&self, method: &Method, path: &str) -> bool {
        self.routes.contains_key(&(method.clone(), path.to_string()))
    }

    /// Send a request through the chain registered for `method` and `path`.
    ///
    /// Returns `None` when no chain is registered or the chain's coroutine is
    /// gone. Middleware `before` hooks may short-circuit with an early
    /// response; `after` hooks observe the response and latency either way.
    pub fn dispatch(
        &self,
        method: Method,
        path: &str,
        parts: RequestParts,
    ) -> Option<HandlerResponse> {
        let entry = self.routes.get(&(method.clone(), path.to_string()))?;
        let (reply_tx, reply_rx) = mpsc::channel();

        let request = HandlerRequest {
            method,
            path: path.to_string(),
            handler_name: entry.name.clone(),
            path_params: parts.path_params,
            query_params: parts.query_params,
            headers: parts.headers,
            cookies: parts.cookies,
            body: parts.body,
            reply_tx,
        };

        let mut early_resp: Option<HandlerResponse> = None;
        for mw in &self.middlewares {
            if early_resp.is_none() {
                early_resp = mw.before(&request);
            } else {
                mw.before(&request);
            }
        }

        let (mut resp, latency) = if let Some(r) = early_resp {
            (r, Duration::from_millis(0))
        } else {
            let start = Instant::now();
            entry.tx.send(request.clone()).ok()?;
            let r = reply_rx.recv().ok()?;
            (r, start.elapsed())
        };

        for mw in &self.middlewares {
            mw.after(&request, &mut resp, latency);
        }

        Some(resp)
    }

    fn spawn_chain(handler_name: &str, chain: Vec<NativeHandler>) -> HandlerSender {
        let (tx, rx) = mpsc::channel::<HandlerRequest>();

        // Safety: the chain is Send + Sync, the coroutine exclusively owns its
        // receiver, and every request carries its own reply channel.
        #[allow(unsafe_code)]
        let spawned = unsafe {
            may::coroutine::Builder::new()
                .stack_size(may::config().get_stack_size())
                .spawn(move || {
                    for req in rx.iter() {
                        let reply_tx = req.reply_tx.clone();
                        let name = req.handler_name.clone();

                        if let Err(panic) =
                            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                                for callback in &chain {
                                    callback(req.clone());
                                }
                            }))
                        {
                            let _ = reply_tx.send(HandlerResponse::new(
                                500,
                                serde_json::json!({
                                    "error": "handler panicked",
                                    "details": format!("{:?}", panic),
                                }),
                            ));
                            error!(handler = %name, "handler panicked: {:?}", panic);
                        }
                    }
                })
        };
        #[allow(clippy::unwrap_used)]
        spawned.unwrap();

        debug!(handler = %handler_name, "spawned handler chain coroutine");
        tx
    }
}

impl DispatchAdapter for Dispatcher {
    type Native = NativeHandler;

    fn adapt<H: TypedHandler>(&self, handler: H) -> NativeHandler {
        crate::typed::into_native(handler)
    }

    fn register(
        &mut self,
        method: Method,
        base_path: &str,
        path: &str,
        handler_name: &str,
        chain: Vec<NativeHandler>,
    ) {
        let full_path = join_base_path(base_path, path);

        let mut full_chain: Vec<NativeHandler> = self
            .scoped
            .get(base_path)
            .map(|mws| mws.to_vec())
            .unwrap_or_default();
        full_chain.extend(chain);

        debug!(
            method = %method,
            path = %full_path,
            handler = %handler_name,
            callbacks = full_chain.len(),
            "registering handler chain"
        );

        let entry = ChainEntry {
            name: handler_name.to_string(),
            tx: Dispatcher::spawn_chain(handler_name, full_chain),
        };
        if self
            .routes
            .insert((method.clone(), full_path.clone()), entry)
            .is_some()
        {
            warn!(method = %method, path = %full_path, "replaced previously registered chain");
        }
    }

    fn group(&mut self, parent: &str, path: &str) -> String {
        let base = join_base_path(parent, path);
        // Child scopes inherit the middleware their parent has accumulated so
        // far, as the underlying router's grouping does.
        let inherited = self.scoped.get(parent).map(|mws| mws.to_vec());
        if let Some(mws) = inherited {
            self.scoped.entry(base.clone()).or_default().extend(mws);
        }
        base
    }

    fn use_middleware(&mut self, base_path: &str, middleware: NativeHandler) {
        self.scoped
            .entry(base_path.to_string())
            .or_default()
            .push(middleware);
    }
}

/// Wire-level request parts the server layer hands to [`Dispatcher::dispatch`].
#[derive(Debug, Clone, Default)]
pub struct RequestParts {
    pub path_params: ParamVec,
    pub query_params: ParamVec,
    pub headers: HeaderVec,
    pub cookies: HeaderVec,
    pub body: Option<Value>,
}

/// Join a group base path with a relative path, normalizing slashes.
///
/// Mirrors the underlying router's `BasePath` semantics: the result always
/// starts with `/` unless both inputs are empty.
pub(crate) fn join_base_path(parent: &str, path: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return parent.to_string();
    }
    format!("{parent}/{trimmed}")
}
