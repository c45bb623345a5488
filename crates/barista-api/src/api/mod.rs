//! API module for the Barista drinks service

pub mod auth;
pub mod middleware;
pub mod routes;
pub mod types;

use crate::server::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create all API routes.
///
/// Everything under `/drinks` requires a valid Auth0 token, `/health`
/// does not.
pub fn routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/drinks", get(routes::drinks::get_drinks))
        .route("/drinks", post(routes::drinks::create_drink))
        .route("/drinks-detail", get(routes::drinks::get_drinks_detail))
        .route("/drinks/:id", patch(routes::drinks::update_drink))
        .route("/drinks/:id", delete(routes::drinks::delete_drink))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let router = protected.route("/health", get(routes::health::health_check));

    middleware::apply_middleware(router, state.clone()).with_state(state)
}

/// Create OpenAPI documentation routes
pub fn docs_routes() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        routes::drinks::get_drinks,
        routes::drinks::get_drinks_detail,
        routes::drinks::create_drink,
        routes::drinks::update_drink,
        routes::drinks::delete_drink,
        routes::health::health_check,
    ),
    components(schemas(
        types::CreateDrinkRequest,
        types::UpdateDrinkRequest,
        types::DrinksResponse,
        types::DrinksDetailResponse,
        types::DrinkResponse,
        types::DeleteDrinkResponse,
        types::HealthCheckResponse,
        crate::models::Drink,
        crate::models::DrinkShort,
        crate::models::RecipeIngredient,
        crate::models::RecipeIngredientShort,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "drinks", description = "Drinks menu management"),
        (name = "health", description = "Health and monitoring"),
    ),
    info(
        title = "Barista API",
        version = "0.1.0",
        description = "Drinks menu API protected by Auth0 JWTs",
    )
)]
pub struct ApiDoc;
