//! OpenAPI 3.0 documentation assembly

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Drinks API",
        description = "Drink menu management with permission-based access"
    ),
    tags(
        (name = "System", description = "Health checks and system status"),
        (name = "Drinks", description = "Drink menu and recipes"),
    ),
    security(
        ("bearer_jwt" = [])
    ),
    components(
        schemas(
            crate::api::DrinkSummariesResponse,
            crate::api::DrinksResponse,
            crate::api::DrinkResponse,
            crate::api::DeleteDrinkResponse,
            crate::api::health::HealthResponse,
            crate::error::ErrorBody,
            crate::domain::Drink,
            crate::domain::DrinkSummary,
            crate::domain::Ingredient,
            crate::domain::IngredientSummary,
            crate::domain::CreateDrinkInput,
            crate::domain::UpdateDrinkInput,
        ),
    ),
    paths(
        crate::api::health::health,
        crate::api::health::ready,
        crate::api::drink::list,
        crate::api::drink::list_detail,
        crate::api::drink::create,
        crate::api::drink::update,
        crate::api::drink::delete,
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    /// OpenAPI document with the bearer JWT security scheme attached
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        if let Some(c) = doc.components.as_mut() {
            c.security_schemes.insert(
                "bearer_jwt".to_string(),
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
        doc
    }
}
