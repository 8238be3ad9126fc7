//! API integration tests infrastructure
//!
//! In-memory drink repository and token helpers shared by the HTTP tests.

pub mod http;

use async_trait::async_trait;
use drinks_api::config::AuthConfig;
use drinks_api::domain::{CreateDrinkInput, Drink, Ingredient, UpdateDrinkInput};
use drinks_api::error::{AppError, Result};
use drinks_api::repository::DrinkRepository;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use tokio::sync::RwLock;

// ============================================================================
// Token Fixtures
// ============================================================================

pub const SIGNING_KEY: &str = include_str!("../fixtures/signing_key.pem");
pub const FOREIGN_KEY: &str = include_str!("../fixtures/foreign_key.pem");
pub const JWKS: &str = include_str!("../fixtures/jwks.json");
pub const KID: &str = "test-signing-key";

pub const TEST_DOMAIN: &str = "drinks.test";
pub const TEST_AUDIENCE: &str = "drinks";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig::for_domain(TEST_DOMAIN, TEST_AUDIENCE).unwrap()
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Claims of a valid token granting `permissions`
pub fn claims_with(permissions: &[&str]) -> serde_json::Value {
    json!({
        "sub": "auth0|test-user",
        "iss": format!("https://{}/", TEST_DOMAIN),
        "aud": TEST_AUDIENCE,
        "iat": now(),
        "exp": now() + 3600,
        "permissions": permissions,
    })
}

/// Sign `claims` with the given PEM key under `kid`
pub fn sign_with(pem: &str, kid: &str, claims: &serde_json::Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).unwrap();
    encode(&header, claims, &key).unwrap()
}

/// Valid token granting `permissions`
pub fn token_with(permissions: &[&str]) -> String {
    sign_with(SIGNING_KEY, KID, &claims_with(permissions))
}

/// Token that expired an hour ago
pub fn expired_token(permissions: &[&str]) -> String {
    let mut claims = claims_with(permissions);
    claims["iat"] = json!(now() - 7200);
    claims["exp"] = json!(now() - 3600);
    sign_with(SIGNING_KEY, KID, &claims)
}

/// Valid token without a `permissions` claim
pub fn token_without_permissions_claim() -> String {
    let mut claims = claims_with(&[]);
    claims
        .as_object_mut()
        .unwrap()
        .remove("permissions");
    sign_with(SIGNING_KEY, KID, &claims)
}

/// Token for a different API
pub fn token_for_audience(audience: &str, permissions: &[&str]) -> String {
    let mut claims = claims_with(permissions);
    claims["aud"] = json!(audience);
    sign_with(SIGNING_KEY, KID, &claims)
}

/// Valid token with no `aud` claim
pub fn token_without_audience(permissions: &[&str]) -> String {
    let mut claims = claims_with(permissions);
    claims.as_object_mut().unwrap().remove("aud");
    sign_with(SIGNING_KEY, KID, &claims)
}

pub fn foreign_token(permissions: &[&str]) -> String {
    sign_with(FOREIGN_KEY, KID, &claims_with(permissions))
}

// ============================================================================
// Test Drinks
// ============================================================================

pub fn ingredient(name: &str, color: &str, parts: u32) -> Ingredient {
    Ingredient {
        color: color.to_string(),
        name: name.to_string(),
        parts,
    }
}

pub fn water_recipe() -> Vec<Ingredient> {
    vec![ingredient("water", "blue", 1)]
}

// ============================================================================
// Test Repository
// ============================================================================

/// In-memory `DrinkRepository` enforcing unique titles like the real table
pub struct TestDrinkRepository {
    drinks: RwLock<Vec<Drink>>,
    next_id: RwLock<i64>,
}

impl TestDrinkRepository {
    pub fn new() -> Self {
        Self {
            drinks: RwLock::new(vec![]),
            next_id: RwLock::new(1),
        }
    }

    /// Insert a drink directly, bypassing validation. Returns its id.
    pub async fn add_drink(&self, title: &str, recipe: Vec<Ingredient>) -> i64 {
        let mut next_id = self.next_id.write().await;
        let id = *next_id;
        *next_id += 1;
        self.drinks.write().await.push(Drink {
            id,
            title: title.to_string(),
            recipe,
        });
        id
    }

    pub async fn get(&self, id: i64) -> Option<Drink> {
        self.drinks.read().await.iter().find(|d| d.id == id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.drinks.read().await.len()
    }

    fn duplicate_title() -> AppError {
        AppError::Validation("A drink with this title already exists".to_string())
    }
}

impl Default for TestDrinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DrinkRepository for TestDrinkRepository {
    async fn list(&self) -> Result<Vec<Drink>> {
        let mut drinks = self.drinks.read().await.clone();
        drinks.sort_by_key(|d| d.id);
        Ok(drinks)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Drink>> {
        Ok(self.get(id).await)
    }

    async fn create(&self, input: &CreateDrinkInput) -> Result<Drink> {
        if self
            .drinks
            .read()
            .await
            .iter()
            .any(|d| d.title == input.title)
        {
            return Err(Self::duplicate_title());
        }

        let id = self.add_drink(&input.title, input.recipe.clone()).await;
        self.get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Drink {} not found", id)))
    }

    async fn update(&self, id: i64, input: &UpdateDrinkInput) -> Result<Drink> {
        let mut drinks = self.drinks.write().await;

        if let Some(title) = &input.title {
            if drinks.iter().any(|d| d.id != id && &d.title == title) {
                return Err(Self::duplicate_title());
            }
        }

        let drink = drinks
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Drink {} not found", id)))?;

        if let Some(title) = &input.title {
            drink.title = title.clone();
        }
        if let Some(recipe) = &input.recipe {
            drink.recipe = recipe.clone();
        }
        Ok(drink.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut drinks = self.drinks.write().await;
        let before = drinks.len();
        drinks.retain(|d| d.id != id);
        Ok(drinks.len() < before)
    }
}
