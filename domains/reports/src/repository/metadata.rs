//! Table registry for every entity kind
//!
//! Column order here is projection order. The identity column always comes
//! first, and the foreign key to the parent always comes last.

use std::fmt;
use std::str::FromStr;

use reportservice_query::{ColumnDef, EnumTag, ParentRelation, TableMeta};

use crate::domain::enums::{InfraType, QualityStateType};

const QUALITY: &[&str] = QualityStateType::TAGS;
const INFRA: &[&str] = InfraType::TAGS;

const fn quality(name: &'static str) -> ColumnDef {
    ColumnDef::tag(name, QUALITY).required()
}

const REPORT_LINK: Option<ParentRelation> = Some(ParentRelation {
    table: &REPORT,
    foreign_key: "report_id",
});

pub const AUTHOR: TableMeta = TableMeta {
    entity: "Author",
    table: "author",
    alias: "author",
    columns: &[
        ColumnDef::id(),
        ColumnDef::text("name").required(),
        ColumnDef::text("contact_info").required(),
    ],
    parent: None,
};

pub const REPORT: TableMeta = TableMeta {
    entity: "Report",
    table: "report",
    alias: "report",
    columns: &[
        ColumnDef::id(),
        ColumnDef::text("report_title").required(),
        ColumnDef::timestamp("report_date"),
        ColumnDef::text("summary"),
        quality("exterior_state"),
        ColumnDef::int("construction_year"),
        quality("maintenance_state"),
        ColumnDef::text("parking_facility"),
        ColumnDef::int("parking_count"),
        quality("elevator_state"),
        quality("noise_state"),
        quality("homepad_state"),
        ColumnDef::text("cctv_yn"),
        quality("fire_safety_state"),
        quality("door_security_state"),
        ColumnDef::int("maintenance_fee"),
        ColumnDef::text("redevelopment_yn"),
        ColumnDef::text("rental_demand"),
        ColumnDef::text("community_rules"),
        ColumnDef::big_int("complex_id").required(),
        ColumnDef::text("complex_name").required(),
        ColumnDef::big_int("property_id").required(),
        ColumnDef::text("property_name").required(),
        ColumnDef::timestamp("created_at").required(),
        ColumnDef::timestamp("updated_at"),
        ColumnDef::big_int("author_id"),
    ],
    parent: Some(ParentRelation {
        table: &AUTHOR,
        foreign_key: "author_id",
    }),
};

// The stored column is spelled `condtion_level` on this table and on `entrance`.
pub const BATHROOM: TableMeta = TableMeta {
    entity: "Bathroom",
    table: "bathroom",
    alias: "bathroom",
    columns: &[
        ColumnDef::id(),
        ColumnDef::text("bathroom_name").required(),
        quality("condtion_level"),
        ColumnDef::decimal("bathroom_size"),
        quality("water_pressure"),
        ColumnDef::text("shower_booth_presence"),
        ColumnDef::text("bathtub_presence"),
        quality("floor_and_ceiling"),
        ColumnDef::text("remarks"),
        ColumnDef::big_int("report_id"),
    ],
    parent: REPORT_LINK,
};

pub const BEDROOM: TableMeta = TableMeta {
    entity: "Bedroom",
    table: "bedroom",
    alias: "bedroom",
    columns: &[
        ColumnDef::id(),
        ColumnDef::text("bedroom_name").required(),
        quality("condition_level"),
        ColumnDef::decimal("room_size"),
        ColumnDef::text("closet_yn"),
        ColumnDef::text("ac_yn"),
        ColumnDef::text("window_location"),
        ColumnDef::text("window_size"),
        ColumnDef::text("remarks"),
        ColumnDef::big_int("report_id"),
    ],
    parent: REPORT_LINK,
};

pub const ENTRANCE: TableMeta = TableMeta {
    entity: "Entrance",
    table: "entrance",
    alias: "entrance",
    columns: &[
        ColumnDef::id(),
        ColumnDef::text("entrance_name").required(),
        quality("condtion_level"),
        ColumnDef::decimal("entrance_size"),
        ColumnDef::decimal("shoe_rack_size"),
        ColumnDef::text("pantry_presence"),
        ColumnDef::text("remarks"),
        ColumnDef::big_int("report_id"),
    ],
    parent: REPORT_LINK,
};

pub const ENV_FACTOR: TableMeta = TableMeta {
    entity: "EnvFactor",
    table: "env_factor",
    alias: "env_factor",
    columns: &[
        ColumnDef::id(),
        ColumnDef::text("env_factor_name").required(),
        ColumnDef::decimal("env_factor_distance"),
        ColumnDef::text("remarks"),
        ColumnDef::big_int("report_id"),
    ],
    parent: REPORT_LINK,
};

pub const INFRASTRUCTURE: TableMeta = TableMeta {
    entity: "Infrastructure",
    table: "infrastructure",
    alias: "infrastructure",
    columns: &[
        ColumnDef::id(),
        ColumnDef::tag("infra_type", INFRA).required(),
        ColumnDef::text("infra_name").required(),
        quality("condition_level"),
        ColumnDef::int("infra_distance"),
        ColumnDef::tag("infra_distance_unit", QUALITY),
        ColumnDef::text("remarks"),
        ColumnDef::big_int("report_id"),
    ],
    parent: REPORT_LINK,
};

pub const KITCHEN: TableMeta = TableMeta {
    entity: "Kitchen",
    table: "kitchen",
    alias: "kitchen",
    columns: &[
        ColumnDef::id(),
        ColumnDef::text("kitchen_name").required(),
        quality("condition_level"),
        ColumnDef::text("built_in_cabinet"),
        quality("sink_condition"),
        ColumnDef::text("ventilation_system"),
        ColumnDef::text("appliance_provision"),
        ColumnDef::text("remarks"),
        ColumnDef::big_int("report_id"),
    ],
    parent: REPORT_LINK,
};

pub const LIVING_ROOM: TableMeta = TableMeta {
    entity: "LivingRoom",
    table: "living_room",
    alias: "living_room",
    columns: &[
        ColumnDef::id(),
        ColumnDef::text("living_room_name").required(),
        quality("condition_level"),
        ColumnDef::decimal("room_size"),
        quality("wall_state"),
        ColumnDef::text("floor_material"),
        ColumnDef::text("sunlight"),
        ColumnDef::text("remarks"),
        ColumnDef::big_int("report_id"),
    ],
    parent: REPORT_LINK,
};

/// Closed set of entity kinds served by this domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Author,
    Report,
    Bathroom,
    Bedroom,
    Entrance,
    EnvFactor,
    Infrastructure,
    Kitchen,
    LivingRoom,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Author,
        EntityKind::Report,
        EntityKind::Bathroom,
        EntityKind::Bedroom,
        EntityKind::Entrance,
        EntityKind::EnvFactor,
        EntityKind::Infrastructure,
        EntityKind::Kitchen,
        EntityKind::LivingRoom,
    ];

    pub fn meta(&self) -> &'static TableMeta {
        match self {
            EntityKind::Author => &AUTHOR,
            EntityKind::Report => &REPORT,
            EntityKind::Bathroom => &BATHROOM,
            EntityKind::Bedroom => &BEDROOM,
            EntityKind::Entrance => &ENTRANCE,
            EntityKind::EnvFactor => &ENV_FACTOR,
            EntityKind::Infrastructure => &INFRASTRUCTURE,
            EntityKind::Kitchen => &KITCHEN,
            EntityKind::LivingRoom => &LIVING_ROOM,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.meta().entity)
    }
}

/// Parses an entity name (`EnvFactor`) or table name (`env_factor`), case-insensitively
impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| {
                let meta = kind.meta();
                meta.entity.eq_ignore_ascii_case(s) || meta.table.eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| format!("Unknown entity kind '{}'", s))
    }
}
