use crate::{
    auth::{auth_middleware, require_auth, require_path_owner, AdminOverride},
    handlers::{
        auth as auth_handlers, categories, inflation, items, notifications, preferences, users,
    },
    middleware::{cors_layer, login_rate_limit, ping, request_id_layer, trace_layer, LoginRateLimiter},
    state::AppState,
    utils::ApiError,
};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
    Router,
};
use tower::ServiceBuilder;

/// Build the application router.
///
/// Guards are attached per route group with `route_layer` so that unknown
/// paths still fall through to the 404 handler instead of a guard rejection.
/// All routes under `/notifications` share the `:id` parameter name; for the
/// list route it carries the user id, for the mutation routes the
/// notification id.
pub fn create_app(state: AppState) -> Router {
    let limiter = LoginRateLimiter::new(&state.config.rate_limit);

    let public_routes = Router::new()
        .route("/ping", get(ping))
        .route("/auth/register", post(auth_handlers::register))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/categories", get(categories::list_categories))
        .route("/categories/:id", get(categories::get_category))
        .route(
            "/categories/:id/items",
            get(categories::get_category_with_items),
        )
        .route("/items", get(items::list_items))
        .route("/items/:id", get(items::get_item))
        .route("/inflation/latest", get(inflation::latest))
        .route("/inflation/:itemId/range", get(inflation::by_item_range))
        .route("/inflation/:itemId", get(inflation::by_item))
        .route("/notifications", post(notifications::create));

    let login_routes = Router::new()
        .route("/auth/token", post(auth_handlers::issue_token))
        .route_layer(from_fn_with_state(limiter, login_rate_limit));

    let user_routes = Router::new()
        .route(
            "/users/:userId",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::remove_user),
        )
        .route_layer(from_fn(require_path_owner("userId", AdminOverride::Denied)));

    let notification_read_routes = Router::new()
        .route("/notifications/:id", get(notifications::list_for_user))
        .route_layer(from_fn(require_path_owner("id", AdminOverride::Denied)));

    let notification_mutate_routes = Router::new()
        .route("/notifications/:id/read", patch(notifications::mark_read))
        .route("/notifications/:id", delete(notifications::remove))
        .route_layer(from_fn(require_auth));

    let preference_routes = Router::new()
        .route(
            "/preferences/:userId/preferences",
            get(preferences::list).post(preferences::create),
        )
        .route(
            "/preferences/:userId/preferences/:itemId",
            patch(preferences::update).delete(preferences::remove),
        )
        .route_layer(from_fn(require_path_owner("userId", AdminOverride::Denied)));

    Router::new()
        .merge(public_routes)
        .merge(login_routes)
        .merge(user_routes)
        .merge(notification_read_routes)
        .merge(notification_mutate_routes)
        .merge(preference_routes)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                // Request tracing
                .layer(trace_layer())
                // Request ID
                .layer(request_id_layer())
                // CORS
                .layer(cors_layer(&state.config))
                // Identity middleware; attaches AuthUser, never rejects
                .layer(from_fn_with_state(
                    state.token_service.clone(),
                    auth_middleware,
                )),
        )
        .with_state(state)
}

/// Catch-all for unmatched paths
async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
