//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, and workflow policies needed by services.

use std::sync::Arc;

use dock_cache::{RedisPool, RefreshTokenStore, WebSessionStore};
use dock_common::auth::JwtService;
use dock_core::traits::{
    ParkingRepository, ParkingShipRepository, ShipRepository, UserRepository,
};
use dock_core::{CrewCostEstimator, DetachPolicy, RandomCrewCost};
use dock_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Default cookie session lifetime (2 weeks)
const DEFAULT_SESSION_TTL: u64 = 14 * 24 * 60 * 60;

/// Service context containing all dependencies
///
/// This is the dependency container passed to every service. It provides:
/// - Database repositories
/// - Redis token and session stores
/// - JWT service for authentication
/// - The crew cost estimator and detach policy of the parking workflow
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    redis_pool: RedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    ship_repo: Arc<dyn ShipRepository>,
    parking_repo: Arc<dyn ParkingRepository>,
    parking_ship_repo: Arc<dyn ParkingShipRepository>,

    // Cache stores
    refresh_token_store: RefreshTokenStore,
    session_store: WebSessionStore,

    jwt_service: Arc<JwtService>,

    // Workflow policies
    crew_cost: Arc<dyn CrewCostEstimator>,
    detach_policy: DetachPolicy,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: RedisPool,
        user_repo: Arc<dyn UserRepository>,
        ship_repo: Arc<dyn ShipRepository>,
        parking_repo: Arc<dyn ParkingRepository>,
        parking_ship_repo: Arc<dyn ParkingShipRepository>,
        jwt_service: Arc<JwtService>,
        crew_cost: Arc<dyn CrewCostEstimator>,
        detach_policy: DetachPolicy,
        session_ttl: u64,
    ) -> Self {
        let refresh_ttl = u64::try_from(jwt_service.refresh_token_expiry()).unwrap_or(0);
        let refresh_token_store = RefreshTokenStore::with_ttl(redis_pool.clone(), refresh_ttl);
        let session_store = WebSessionStore::with_ttl(redis_pool.clone(), session_ttl);

        Self {
            pool,
            redis_pool,
            user_repo,
            ship_repo,
            parking_repo,
            parking_ship_repo,
            refresh_token_store,
            session_store,
            jwt_service,
            crew_cost,
            detach_policy,
        }
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &RedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn ship_repo(&self) -> &dyn ShipRepository {
        self.ship_repo.as_ref()
    }

    pub fn parking_repo(&self) -> &dyn ParkingRepository {
        self.parking_repo.as_ref()
    }

    pub fn parking_ship_repo(&self) -> &dyn ParkingShipRepository {
        self.parking_ship_repo.as_ref()
    }

    // === Cache Stores ===

    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    pub fn session_store(&self) -> &WebSessionStore {
        &self.session_store
    }

    // === Services and policies ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Estimator used when a parking is approved
    pub fn crew_cost(&self) -> &dyn CrewCostEstimator {
        self.crew_cost.as_ref()
    }

    pub fn detach_policy(&self) -> DetachPolicy {
        self.detach_policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &self.redis_pool)
            .field("repositories", &"...")
            .field("detach_policy", &self.detach_policy)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    ship_repo: Option<Arc<dyn ShipRepository>>,
    parking_repo: Option<Arc<dyn ParkingRepository>>,
    parking_ship_repo: Option<Arc<dyn ParkingShipRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    crew_cost: Arc<dyn CrewCostEstimator>,
    detach_policy: DetachPolicy,
    session_ttl: u64,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            user_repo: None,
            ship_repo: None,
            parking_repo: None,
            parking_ship_repo: None,
            jwt_service: None,
            crew_cost: Arc::new(RandomCrewCost::default()),
            detach_policy: DetachPolicy::default(),
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn ship_repo(mut self, repo: Arc<dyn ShipRepository>) -> Self {
        self.ship_repo = Some(repo);
        self
    }

    pub fn parking_repo(mut self, repo: Arc<dyn ParkingRepository>) -> Self {
        self.parking_repo = Some(repo);
        self
    }

    pub fn parking_ship_repo(mut self, repo: Arc<dyn ParkingShipRepository>) -> Self {
        self.parking_ship_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Defaults to [`RandomCrewCost::default`]
    pub fn crew_cost(mut self, estimator: Arc<dyn CrewCostEstimator>) -> Self {
        self.crew_cost = estimator;
        self
    }

    pub fn detach_policy(mut self, policy: DetachPolicy) -> Self {
        self.detach_policy = policy;
        self
    }

    /// Cookie session lifetime in seconds
    pub fn session_ttl(mut self, ttl: u64) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext::new(
            required(self.pool, "pool")?,
            required(self.redis_pool, "redis_pool")?,
            required(self.user_repo, "user_repo")?,
            required(self.ship_repo, "ship_repo")?,
            required(self.parking_repo, "parking_repo")?,
            required(self.parking_ship_repo, "parking_ship_repo")?,
            required(self.jwt_service, "jwt_service")?,
            self.crew_cost,
            self.detach_policy,
            self.session_ttl,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
