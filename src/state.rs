//! Application state trait for dependency injection
//!
//! Handlers and extractors are generic over `HasDrinks`, so the same router
//! runs against the production `AppState` and in-memory test states.

use crate::config::Config;
use crate::jwt::TokenVerifier;
use crate::repository::DrinkRepository;
use crate::service::DrinkService;

pub trait HasDrinks: Clone + Send + Sync + 'static {
    /// The drink repository type
    type DrinkRepo: DrinkRepository;

    /// Get the application configuration
    fn config(&self) -> &Config;

    /// Get the drink service
    fn drink_service(&self) -> &DrinkService<Self::DrinkRepo>;

    /// Get the verifier used by the authorization checker
    fn token_verifier(&self) -> &TokenVerifier;

    /// Check if the backing store is reachable
    fn check_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}
