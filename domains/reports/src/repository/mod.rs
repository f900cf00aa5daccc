//! Repository implementations for the Reports domain

pub mod mapping;
pub mod metadata;

use reportservice_common::RepositoryError;
use reportservice_query::{JoinedRepository, QueryExecutor, TableRepository};
use sqlx::PgPool;

use crate::domain::entities::{
    Author, Bathroom, Bedroom, Entrance, EnvFactor, Infrastructure, Kitchen, LivingRoom, Report,
};

pub use metadata::EntityKind;

pub type AuthorRepository = TableRepository<Author>;
pub type ReportRepository = JoinedRepository<Report>;
pub type BathroomRepository = JoinedRepository<Bathroom>;
pub type BedroomRepository = JoinedRepository<Bedroom>;
pub type EntranceRepository = JoinedRepository<Entrance>;
pub type EnvFactorRepository = JoinedRepository<EnvFactor>;
pub type InfrastructureRepository = JoinedRepository<Infrastructure>;
pub type KitchenRepository = JoinedRepository<Kitchen>;
pub type LivingRoomRepository = JoinedRepository<LivingRoom>;

/// Combined repository access for the Reports domain
#[derive(Clone)]
pub struct ReportsRepositories {
    pool: PgPool,
    pub authors: AuthorRepository,
    pub reports: ReportRepository,
    pub bathrooms: BathroomRepository,
    pub bedrooms: BedroomRepository,
    pub entrances: EntranceRepository,
    pub env_factors: EnvFactorRepository,
    pub infrastructures: InfrastructureRepository,
    pub kitchens: KitchenRepository,
    pub living_rooms: LivingRoomRepository,
}

impl ReportsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            authors: AuthorRepository::new(pool.clone()),
            reports: ReportRepository::new(pool.clone()),
            bathrooms: BathroomRepository::new(pool.clone()),
            bedrooms: BedroomRepository::new(pool.clone()),
            entrances: EntranceRepository::new(pool.clone()),
            env_factors: EnvFactorRepository::new(pool.clone()),
            infrastructures: InfrastructureRepository::new(pool.clone()),
            kitchens: KitchenRepository::new(pool.clone()),
            living_rooms: LivingRoomRepository::new(pool.clone()),
            pool,
        }
    }

    /// Executor over the shared pool, for kind-keyed queries
    pub fn executor(&self) -> QueryExecutor {
        QueryExecutor::new(self.pool.clone())
    }

    /// Row count of one entity kind
    pub async fn count(&self, kind: EntityKind) -> Result<i64, RepositoryError> {
        self.executor().count(kind.meta(), None).await
    }

    /// Row count of every entity kind, in `EntityKind::ALL` order
    pub async fn count_all(&self) -> Result<Vec<(EntityKind, i64)>, RepositoryError> {
        let executor = self.executor();
        let mut counts = Vec::with_capacity(EntityKind::ALL.len());
        for kind in EntityKind::ALL {
            let count = executor.count(kind.meta(), None).await?;
            tracing::debug!(entity = %kind, count, "Counted rows");
            counts.push((kind, count));
        }
        Ok(counts)
    }
}
