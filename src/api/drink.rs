//! Drink API handlers

use crate::api::{
    DeleteDrinkResponse, DrinkResponse, DrinkSummariesResponse, DrinksResponse,
};
use crate::domain::{CreateDrinkInput, UpdateDrinkInput};
use crate::error::{ErrorBody, Result};
use crate::middleware::auth::Authorized;
use crate::policy::{DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks};
use crate::state::HasDrinks;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// List drinks in short form
///
/// GET /drinks
#[utoipa::path(
    get,
    path = "/drinks",
    tag = "Drinks",
    security(()),
    responses(
        (status = 200, description = "Success", body = DrinkSummariesResponse),
        (status = 404, description = "No drinks", body = ErrorBody)
    )
)]
pub async fn list<S: HasDrinks>(State(state): State<S>) -> Result<impl IntoResponse> {
    let drinks = state.drink_service().list_short().await?;
    Ok(Json(DrinkSummariesResponse::new(drinks)))
}

/// List drinks in long form
///
/// GET /drinks-detail
#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = "Drinks",
    responses(
        (status = 200, description = "Success", body = DrinksResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Missing get:drinks-detail", body = ErrorBody),
        (status = 404, description = "No drinks", body = ErrorBody)
    )
)]
pub async fn list_detail<S: HasDrinks>(
    State(state): State<S>,
    _auth: Authorized<GetDrinksDetail>,
) -> Result<impl IntoResponse> {
    let drinks = state.drink_service().list_long().await?;
    Ok(Json(DrinksResponse::new(drinks)))
}

/// Create a drink
///
/// POST /drinks
#[utoipa::path(
    post,
    path = "/drinks",
    tag = "Drinks",
    request_body = CreateDrinkInput,
    responses(
        (status = 200, description = "Created", body = DrinkResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Missing post:drinks", body = ErrorBody),
        (status = 422, description = "Invalid drink or duplicate title", body = ErrorBody)
    )
)]
pub async fn create<S: HasDrinks>(
    State(state): State<S>,
    _auth: Authorized<PostDrinks>,
    Json(input): Json<CreateDrinkInput>,
) -> Result<impl IntoResponse> {
    let drink = state.drink_service().create(input).await?;
    Ok(Json(DrinkResponse::new(drink)))
}

/// Update a drink; only the supplied fields change
///
/// PATCH /drinks/{id}
#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = "Drinks",
    params(("id" = i64, Path, description = "Drink id")),
    request_body = UpdateDrinkInput,
    responses(
        (status = 200, description = "Updated", body = DrinkResponse),
        (status = 400, description = "Neither title nor recipe supplied", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Missing patch:drinks", body = ErrorBody),
        (status = 404, description = "Drink not found", body = ErrorBody),
        (status = 422, description = "Invalid drink or duplicate title", body = ErrorBody)
    )
)]
pub async fn update<S: HasDrinks>(
    State(state): State<S>,
    _auth: Authorized<PatchDrinks>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateDrinkInput>,
) -> Result<impl IntoResponse> {
    let drink = state.drink_service().update(id, input).await?;
    Ok(Json(DrinkResponse::new(drink)))
}

/// Delete a drink
///
/// DELETE /drinks/{id}
#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = "Drinks",
    params(("id" = i64, Path, description = "Drink id")),
    responses(
        (status = 200, description = "Deleted", body = DeleteDrinkResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Missing delete:drinks", body = ErrorBody),
        (status = 404, description = "Drink not found", body = ErrorBody)
    )
)]
pub async fn delete<S: HasDrinks>(
    State(state): State<S>,
    _auth: Authorized<DeleteDrinks>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.drink_service().delete(id).await?;
    Ok(Json(DeleteDrinkResponse::new(id)))
}
