//! Route dispatch.
//!
//! A request is matched on its route and method directly to a handler
//! function. Unknown routes answer 404; a known route with an unsupported
//! method answers 405.

use http::Method;

use crate::app::Services;
use crate::handlers::{self, HandlerResult};
use crate::request::{ApiRequest, ApiResponse};

/// Top-level routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Ping,
    Users,
    Tokens,
    Menu,
    Cart,
    Checkout,
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        match path.trim_matches('/') {
            "ping" => Some(Route::Ping),
            "users" => Some(Route::Users),
            "tokens" => Some(Route::Tokens),
            "menu" => Some(Route::Menu),
            "cart" => Some(Route::Cart),
            "checkout" => Some(Route::Checkout),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Ping => "ping",
            Route::Users => "users",
            Route::Tokens => "tokens",
            Route::Menu => "menu",
            Route::Cart => "cart",
            Route::Checkout => "checkout",
        }
    }
}

/// Dispatches requests to handlers over a shared set of services.
#[derive(Clone)]
pub struct Router {
    services: Services,
}

impl Router {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub async fn dispatch(&self, req: &ApiRequest) -> ApiResponse {
        let Some(route) = Route::parse(req.route()) else {
            tracing::debug!(path = %req.path, "no such route");
            return ApiResponse::not_found();
        };

        let result = match self.call(route, req).await {
            Some(result) => result,
            None => {
                tracing::debug!(route = route.as_str(), method = %req.method, "method not allowed");
                return ApiResponse::method_not_allowed();
            }
        };

        let response = result.unwrap_or_else(ApiResponse::from);
        tracing::debug!(
            route = route.as_str(),
            method = %req.method,
            status = response.status.as_u16(),
            "request handled"
        );
        response
    }

    async fn call(&self, route: Route, req: &ApiRequest) -> Option<HandlerResult> {
        let s = &self.services;
        let result = match (route, &req.method) {
            (Route::Ping, _) => Ok(ApiResponse::ok()),

            (Route::Users, &Method::POST) => handlers::users::post(s, req).await,
            (Route::Users, &Method::GET) => handlers::users::get(s, req).await,
            (Route::Users, &Method::PUT) => handlers::users::put(s, req).await,
            (Route::Users, &Method::DELETE) => handlers::users::delete(s, req).await,

            (Route::Tokens, &Method::POST) => handlers::tokens::post(s, req).await,
            (Route::Tokens, &Method::GET) => handlers::tokens::get(s, req).await,
            (Route::Tokens, &Method::PUT) => handlers::tokens::put(s, req).await,
            (Route::Tokens, &Method::DELETE) => handlers::tokens::delete(s, req).await,

            (Route::Menu, &Method::GET) => handlers::menu::get(s, req).await,
            (Route::Menu, &Method::POST) => handlers::menu::post(s, req).await,
            (Route::Menu, &Method::DELETE) => handlers::menu::delete(s, req).await,

            (Route::Cart, &Method::GET) => handlers::cart::get(s, req).await,

            (Route::Checkout, &Method::POST) => handlers::checkout::post(s, req).await,

            _ => return None,
        };
        Some(result)
    }
}
