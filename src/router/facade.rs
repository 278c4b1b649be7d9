use crate::dispatcher::{join_base_path, DispatchAdapter};
use crate::registry::{CatalogueError, RouteCatalogue};
use crate::typed::TypedHandler;
use http::Method;
use thiserror::Error;
use tracing::debug;

/// A handler value passed to a registration call.
///
/// The tagged union replaces runtime type inspection: a handler is either a
/// native framework callback, passed through unmodified, or a typed
/// application function already adapted to the native shape, retaining its
/// identity for the catalogue.
pub enum RouteHandler<N> {
    Native(N),
    Typed { identity: &'static str, native: N },
}

impl<N> RouteHandler<N> {
    pub fn native(callback: N) -> Self {
        RouteHandler::Native(callback)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// More than one typed function was passed to a single registration call.
    /// The call is a misuse of the registration API; nothing is registered.
    #[error("registration of {method} {path} carries more than one typed handler")]
    DuplicateTypedHandler { method: Method, path: String },
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

/// The routing facade: owns the dispatch adapter and the route catalogue.
///
/// Built once at startup; registration goes through scopes obtained from
/// [`AppRouter::root`] and [`AppRouter::group`]. Single-writer during the
/// registration phase, read-only afterwards.
pub struct AppRouter<D: DispatchAdapter> {
    adapter: D,
    catalogue: RouteCatalogue,
}

impl<D: DispatchAdapter> AppRouter<D> {
    pub fn new(adapter: D) -> Self {
        AppRouter {
            adapter,
            catalogue: RouteCatalogue::new(),
        }
    }

    /// Wrap a typed application handler for registration, capturing its
    /// catalogue identity and adapting it to the native callback shape.
    pub fn typed<H: TypedHandler>(&self, handler: H) -> RouteHandler<D::Native> {
        RouteHandler::Typed {
            identity: std::any::type_name::<H>(),
            native: self.adapter.adapt(handler),
        }
    }

    /// The top-level registration scope.
    pub fn root(&mut self) -> RouteScope<'_, D> {
        RouteScope {
            router: self,
            base_path: String::new(),
        }
    }

    /// Create a routing group under the given path prefix, mirroring the
    /// underlying router's grouping and recording it in the catalogue.
    pub fn group(&mut self, path: &str, middleware: Vec<D::Native>) -> RouteScope<'_, D> {
        let base_path = self.adapter.group("", path);
        for mw in middleware {
            self.adapter.use_middleware(&base_path, mw);
        }
        self.catalogue.add_group(&base_path);
        debug!(base_path = %base_path, "created route group");
        RouteScope {
            router: self,
            base_path,
        }
    }

    pub fn catalogue(&self) -> &RouteCatalogue {
        &self.catalogue
    }

    pub fn adapter(&self) -> &D {
        &self.adapter
    }

    /// Write the routing report to standard output.
    pub fn print_routes(&self) {
        self.catalogue.print();
    }

    /// Tear the facade apart once registration is complete.
    pub fn into_parts(self) -> (D, RouteCatalogue) {
        (self.adapter, self.catalogue)
    }
}

/// A registration scope bound to a base path.
pub struct RouteScope<'r, D: DispatchAdapter> {
    router: &'r mut AppRouter<D>,
    base_path: String,
}

impl<D: DispatchAdapter> RouteScope<'_, D> {
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// See [`AppRouter::typed`].
    pub fn typed<H: TypedHandler>(&self, handler: H) -> RouteHandler<D::Native> {
        self.router.typed(handler)
    }

    /// Create a nested group under this scope's base path.
    pub fn group(&mut self, path: &str, middleware: Vec<D::Native>) -> RouteScope<'_, D> {
        let base_path = self.router.adapter.group(&self.base_path, path);
        for mw in middleware {
            self.router.adapter.use_middleware(&base_path, mw);
        }
        self.router.catalogue.add_group(&base_path);
        debug!(base_path = %base_path, "created route group");
        RouteScope {
            router: &mut *self.router,
            base_path,
        }
    }

    /// Attach native middleware to this scope; it applies to chains registered
    /// afterwards.
    pub fn use_middleware(&mut self, middleware: Vec<D::Native>) {
        for mw in middleware {
            self.router.adapter.use_middleware(&self.base_path, mw);
        }
    }

    pub fn get(
        &mut self,
        path: &str,
        handlers: Vec<RouteHandler<D::Native>>,
    ) -> Result<(), RouteError> {
        self.handle(Method::GET, path, handlers)
    }

    pub fn post(
        &mut self,
        path: &str,
        handlers: Vec<RouteHandler<D::Native>>,
    ) -> Result<(), RouteError> {
        self.handle(Method::POST, path, handlers)
    }

    pub fn put(
        &mut self,
        path: &str,
        handlers: Vec<RouteHandler<D::Native>>,
    ) -> Result<(), RouteError> {
        self.handle(Method::PUT, path, handlers)
    }

    pub fn patch(
        &mut self,
        path: &str,
        handlers: Vec<RouteHandler<D::Native>>,
    ) -> Result<(), RouteError> {
        self.handle(Method::PATCH, path, handlers)
    }

    pub fn delete(
        &mut self,
        path: &str,
        handlers: Vec<RouteHandler<D::Native>>,
    ) -> Result<(), RouteError> {
        self.handle(Method::DELETE, path, handlers)
    }

    /// Register a handler chain for `method` at `path` under this scope.
    ///
    /// Native callbacks pass through in call order. At most one typed handler
    /// is permitted per call; it is recorded into the catalogue and its
    /// adapted form takes its position in the chain. On error nothing is
    /// registered.
    pub fn handle(
        &mut self,
        method: Method,
        path: &str,
        handlers: Vec<RouteHandler<D::Native>>,
    ) -> Result<(), RouteError> {
        let mut natives = Vec::with_capacity(handlers.len());
        let mut typed_identity: Option<&'static str> = None;

        for handler in handlers {
            match handler {
                RouteHandler::Native(native) => natives.push(native),
                RouteHandler::Typed { identity, native } => {
                    if typed_identity.is_some() {
                        return Err(RouteError::DuplicateTypedHandler {
                            method,
                            path: path.to_string(),
                        });
                    }
                    typed_identity = Some(identity);
                    natives.push(native);
                }
            }
        }

        if let Some(identity) = typed_identity {
            self.router
                .catalogue
                .add_route(&self.base_path, path, identity, method.clone())?;
        }

        let handler_name = typed_identity
            .map(str::to_string)
            .unwrap_or_else(|| join_base_path(&self.base_path, path));

        debug!(
            method = %method,
            base_path = %self.base_path,
            path = %path,
            handler = %handler_name,
            "registered route"
        );
        self.router
            .adapter
            .register(method, &self.base_path, path, &handler_name, natives);
        Ok(())
    }
}
