use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

#[cfg(not(test))]
use {
    std::net::IpAddr,
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
    tracing::warn,
};

use crate::api::auth::USER_ID_HEADER;
use crate::api::handlers::{self as api_handlers, AppState};
use crate::config::Settings;

/// Milliseconds between token refills for a limit of `rate` requests per
/// second. Rates above 1000/s refill once per millisecond.
fn replenish_interval_ms(rate: u64) -> u64 {
    (1000 / rate.max(1)).max(1)
}

/// Create the router with all API and health endpoints
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        // Recipes
        .route(
            "/recipes",
            get(api_handlers::list_recipes).post(api_handlers::create_recipe),
        )
        .route("/recipes/search", post(api_handlers::search_recipes))
        .route("/recipes/:id", get(api_handlers::get_recipe))
        .route(
            "/recipes/:id/shopping-list",
            post(api_handlers::create_missing_ingredients_list),
        )
        // Favorites
        .route(
            "/favorites",
            get(api_handlers::list_favorites).post(api_handlers::add_favorite),
        )
        .route("/favorites/:recipe_id", delete(api_handlers::remove_favorite))
        // Shopping lists
        .route(
            "/shopping-lists",
            get(api_handlers::list_shopping_lists).post(api_handlers::create_shopping_list),
        )
        .route(
            "/shopping-lists/:id",
            put(api_handlers::update_shopping_list).delete(api_handlers::delete_shopping_list),
        )
        .with_state(state.clone());

    // Rate limiting is keyed on the peer IP, falling back to localhost when
    // the connection info is unavailable.
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct FallbackIpKeyExtractor;

        impl KeyExtractor for FallbackIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> Result<Self::Key, tower_governor::GovernorError> {
                if let Some(addr) = req.extensions().get::<std::net::SocketAddr>() {
                    return Ok(addr.ip());
                }

                Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
            }
        }

        let burst = u32::try_from(settings.server.api_rate_limit.saturating_mul(2))
            .unwrap_or(u32::MAX);

        match GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_millisecond(replenish_interval_ms(settings.server.api_rate_limit))
            .burst_size(burst)
            .finish()
        {
            Some(config) => {
                api_routes = api_routes.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => warn!(
                "Invalid rate limit configuration ({}/s), serving without rate limiting",
                settings.server.api_rate_limit
            ),
        }
    }

    let api_routes = api_routes;

    let health_routes = Router::new()
        .route("/health", get(api_handlers::health_check))
        .route("/ready", get(api_handlers::readiness_check))
        .with_state(state);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(RequestBodyLimitLayer::new(
            settings.server.max_request_body_size,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    header::HeaderName::from_static(USER_ID_HEADER),
                ])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
