//! Reports domain: inspection reports, authors, room and feature entities

pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    Author, Bathroom, Bedroom, Entrance, EnvFactor, Infrastructure, Kitchen, LivingRoom, Report,
};
pub use domain::enums::{InfraType, QualityStateType};

// Re-export repository types
pub use repository::{
    AuthorRepository, BathroomRepository, BedroomRepository, EntityKind, EntranceRepository,
    EnvFactorRepository, InfrastructureRepository, KitchenRepository, LivingRoomRepository,
    ReportRepository, ReportsRepositories,
};
