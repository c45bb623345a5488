//! Drinks menu route handlers
//!
//! Every handler runs behind the auth middleware and checks its own RBAC
//! permission.

use crate::{
    api::{
        middleware::AuthContext,
        types::{
            CreateDrinkRequest, DeleteDrinkResponse, DrinkResponse, DrinksDetailResponse,
            DrinksResponse, UpdateDrinkRequest,
        },
    },
    error::{ApiError, Result},
    server::AppState,
    storage,
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tracing::{debug, info, instrument};

/// List all drinks in short form
#[utoipa::path(
    get,
    path = "/drinks",
    responses(
        (status = 200, description = "Drinks listed", body = DrinksResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission not found"),
        (status = 422, description = "Database failure")
    ),
    tag = "drinks",
    security(("bearer_auth" = ["get:drinks"]))
)]
#[instrument(skip(state, auth_context), fields(user_id = %auth_context.user_id))]
pub async fn get_drinks(
    State(state): State<AppState>,
    Extension(auth_context): Extension<AuthContext>,
) -> Result<Json<DrinksResponse>> {
    auth_context.require_permission("get:drinks")?;

    let drinks = storage::list_drinks(&state.db).await?;
    debug!("Listing {} drinks", drinks.len());

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(|d| d.short()).collect(),
    }))
}

/// List all drinks with full recipes
#[utoipa::path(
    get,
    path = "/drinks-detail",
    responses(
        (status = 200, description = "Drinks listed with recipes", body = DrinksDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission not found"),
        (status = 422, description = "Database failure")
    ),
    tag = "drinks",
    security(("bearer_auth" = ["get:drinks"]))
)]
#[instrument(skip(state, auth_context), fields(user_id = %auth_context.user_id))]
pub async fn get_drinks_detail(
    State(state): State<AppState>,
    Extension(auth_context): Extension<AuthContext>,
) -> Result<Json<DrinksDetailResponse>> {
    auth_context.require_permission("get:drinks")?;

    let drinks = storage::list_drinks(&state.db).await?;

    Ok(Json(DrinksDetailResponse {
        success: true,
        drinks: drinks.iter().map(|d| d.long()).collect(),
    }))
}

/// Create a new drink
#[utoipa::path(
    post,
    path = "/drinks",
    request_body = CreateDrinkRequest,
    responses(
        (status = 200, description = "Drink created", body = DrinkResponse),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission not found"),
        (status = 422, description = "Database failure, e.g. duplicate title")
    ),
    tag = "drinks",
    security(("bearer_auth" = ["post:drinks"]))
)]
#[instrument(skip(state, auth_context, request), fields(user_id = %auth_context.user_id, title = %request.title))]
pub async fn create_drink(
    State(state): State<AppState>,
    Extension(auth_context): Extension<AuthContext>,
    Json(request): Json<CreateDrinkRequest>,
) -> Result<Json<DrinkResponse>> {
    auth_context.require_permission("post:drinks")?;

    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest {
            message: "title must not be empty".to_string(),
        });
    }

    let drink = storage::insert_drink(&state.db, &request.title, &request.recipe).await?;
    info!("Created drink {} ({})", drink.id, drink.title);

    Ok(Json(DrinkResponse {
        success: true,
        drinks: drink.long(),
    }))
}

/// Update a drink's title and/or recipe
#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    params(("id" = i64, Path, description = "Drink id")),
    request_body = UpdateDrinkRequest,
    responses(
        (status = 200, description = "Drink updated", body = DrinkResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission not found"),
        (status = 404, description = "No drink with that id"),
        (status = 422, description = "Database failure")
    ),
    tag = "drinks",
    security(("bearer_auth" = ["patch:drinks"]))
)]
#[instrument(skip(state, auth_context, request), fields(user_id = %auth_context.user_id))]
pub async fn update_drink(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(auth_context): Extension<AuthContext>,
    Json(request): Json<UpdateDrinkRequest>,
) -> Result<Json<DrinkResponse>> {
    auth_context.require_permission("patch:drinks")?;

    let drink = storage::update_drink(
        &state.db,
        id,
        request.title.as_deref(),
        request.recipe.as_deref(),
    )
    .await?
    .ok_or(ApiError::NotFound)?;

    info!("Updated drink {}", drink.id);

    Ok(Json(DrinkResponse {
        success: true,
        drinks: drink.long(),
    }))
}

/// Delete a drink
#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    params(("id" = i64, Path, description = "Drink id")),
    responses(
        (status = 200, description = "Drink deleted", body = DeleteDrinkResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Permission not found"),
        (status = 404, description = "No drink with that id"),
        (status = 422, description = "Database failure")
    ),
    tag = "drinks",
    security(("bearer_auth" = ["delete:drinks"]))
)]
#[instrument(skip(state, auth_context), fields(user_id = %auth_context.user_id))]
pub async fn delete_drink(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(auth_context): Extension<AuthContext>,
) -> Result<Json<DeleteDrinkResponse>> {
    auth_context.require_permission("delete:drinks")?;

    if !storage::delete_drink(&state.db, id).await? {
        return Err(ApiError::NotFound);
    }

    info!("Deleted drink {}", id);

    Ok(Json(DeleteDrinkResponse { success: true }))
}
