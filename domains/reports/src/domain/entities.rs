//! Domain entities for the Reports domain
//!
//! A `Report` is the root aggregate written by an `Author`; every room or
//! feature entity belongs to one report through `report_id`. The embedded
//! `report` / `author` fields are read-only snapshots filled in by the join
//! on read. Saving an entity never writes them back.

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use reportservice_common::{Error, Result};

use crate::domain::enums::{InfraType, QualityStateType};

/// Maximum length of every room / feature name
pub const NAME_MAX_LEN: usize = 100;

/// Author entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<i64>,
    pub name: String,
    pub contact_info: String,
}

impl Author {
    /// Create a new, unsaved author with validation
    pub fn new(name: impl Into<String>, contact_info: impl Into<String>) -> Result<Self> {
        let author = Self {
            id: None,
            name: name.into(),
            contact_info: contact_info.into(),
        };
        author.validate()?;
        Ok(author)
    }

    pub fn validate(&self) -> Result<()> {
        check_required("Author name", &self.name, 100)?;
        check_required("Author contact info", &self.contact_info, 200)
    }
}

/// Inspection report, the root aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Option<i64>,
    pub report_title: String,
    pub report_date: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub exterior_state: QualityStateType,
    pub construction_year: Option<i32>,
    pub maintenance_state: QualityStateType,
    pub parking_facility: Option<String>,
    pub parking_count: Option<i32>,
    pub elevator_state: QualityStateType,
    pub noise_state: QualityStateType,
    pub homepad_state: QualityStateType,
    pub cctv_yn: Option<String>,
    pub fire_safety_state: QualityStateType,
    pub door_security_state: QualityStateType,
    pub maintenance_fee: Option<i32>,
    pub redevelopment_yn: Option<String>,
    pub rental_demand: Option<String>,
    pub community_rules: Option<String>,
    pub complex_id: i64,
    pub complex_name: String,
    pub property_id: i64,
    pub property_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub author_id: Option<i64>,
    /// Snapshot of the referenced author, present only when read through the join
    pub author: Option<Author>,
}

impl Report {
    /// Create a new, unsaved report with every state graded `state`
    pub fn new(
        report_title: impl Into<String>,
        complex_id: i64,
        complex_name: impl Into<String>,
        property_id: i64,
        property_name: impl Into<String>,
        state: QualityStateType,
    ) -> Result<Self> {
        let report = Self {
            id: None,
            report_title: report_title.into(),
            report_date: None,
            summary: None,
            exterior_state: state,
            construction_year: None,
            maintenance_state: state,
            parking_facility: None,
            parking_count: None,
            elevator_state: state,
            noise_state: state,
            homepad_state: state,
            cctv_yn: None,
            fire_safety_state: state,
            door_security_state: state,
            maintenance_fee: None,
            redevelopment_yn: None,
            rental_demand: None,
            community_rules: None,
            complex_id,
            complex_name: complex_name.into(),
            property_id,
            property_name: property_name.into(),
            // Stored timestamps keep microseconds
            created_at: Utc::now().trunc_subsecs(6),
            updated_at: None,
            author_id: None,
            author: None,
        };
        report.validate()?;
        Ok(report)
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        check_required("Report title", &self.report_title, 200)?;
        check_optional("Parking facility", self.parking_facility.as_deref(), 500)?;
        check_flag("CCTV flag", self.cctv_yn.as_deref())?;
        check_flag("Redevelopment flag", self.redevelopment_yn.as_deref())?;
        check_optional("Rental demand", self.rental_demand.as_deref(), 200)?;
        check_optional("Community rules", self.community_rules.as_deref(), 2000)?;
        check_required("Complex name", &self.complex_name, 255)?;
        check_required("Property name", &self.property_name, 255)?;

        if let Some(count) = self.parking_count {
            if count < 0 {
                return Err(Error::Validation(
                    "Parking count must not be negative".to_string(),
                ));
            }
        }
        if let (Some(updated), created) = (self.updated_at, self.created_at) {
            if updated < created {
                return Err(Error::Validation(
                    "Report updated_at must not precede created_at".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bathroom {
    pub id: Option<i64>,
    pub bathroom_name: String,
    pub condition_level: QualityStateType,
    pub bathroom_size: Option<Decimal>,
    pub water_pressure: QualityStateType,
    pub shower_booth_presence: Option<String>,
    pub bathtub_presence: Option<String>,
    pub floor_and_ceiling: QualityStateType,
    pub remarks: Option<String>,
    pub report_id: Option<i64>,
    pub report: Option<Report>,
}

impl Bathroom {
    pub fn new(
        bathroom_name: impl Into<String>,
        condition_level: QualityStateType,
        water_pressure: QualityStateType,
        floor_and_ceiling: QualityStateType,
    ) -> Result<Self> {
        let bathroom = Self {
            id: None,
            bathroom_name: bathroom_name.into(),
            condition_level,
            bathroom_size: None,
            water_pressure,
            shower_booth_presence: None,
            bathtub_presence: None,
            floor_and_ceiling,
            remarks: None,
            report_id: None,
            report: None,
        };
        bathroom.validate()?;
        Ok(bathroom)
    }

    pub fn validate(&self) -> Result<()> {
        check_required("Bathroom name", &self.bathroom_name, NAME_MAX_LEN)?;
        check_size("Bathroom size", self.bathroom_size)?;
        check_flag("Shower booth flag", self.shower_booth_presence.as_deref())?;
        check_flag("Bathtub flag", self.bathtub_presence.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bedroom {
    pub id: Option<i64>,
    pub bedroom_name: String,
    pub condition_level: QualityStateType,
    pub room_size: Option<Decimal>,
    pub closet_yn: Option<String>,
    pub ac_yn: Option<String>,
    pub window_location: Option<String>,
    pub window_size: Option<String>,
    pub remarks: Option<String>,
    pub report_id: Option<i64>,
    pub report: Option<Report>,
}

impl Bedroom {
    pub fn new(bedroom_name: impl Into<String>, condition_level: QualityStateType) -> Result<Self> {
        let bedroom = Self {
            id: None,
            bedroom_name: bedroom_name.into(),
            condition_level,
            room_size: None,
            closet_yn: None,
            ac_yn: None,
            window_location: None,
            window_size: None,
            remarks: None,
            report_id: None,
            report: None,
        };
        bedroom.validate()?;
        Ok(bedroom)
    }

    pub fn validate(&self) -> Result<()> {
        check_required("Bedroom name", &self.bedroom_name, NAME_MAX_LEN)?;
        check_size("Room size", self.room_size)?;
        check_flag("Closet flag", self.closet_yn.as_deref())?;
        check_flag("Air conditioning flag", self.ac_yn.as_deref())?;
        check_optional("Window location", self.window_location.as_deref(), 100)?;
        check_optional("Window size", self.window_size.as_deref(), 100)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entrance {
    pub id: Option<i64>,
    pub entrance_name: String,
    pub condition_level: QualityStateType,
    pub entrance_size: Option<Decimal>,
    pub shoe_rack_size: Option<Decimal>,
    pub pantry_presence: Option<String>,
    pub remarks: Option<String>,
    pub report_id: Option<i64>,
    pub report: Option<Report>,
}

impl Entrance {
    pub fn new(entrance_name: impl Into<String>, condition_level: QualityStateType) -> Result<Self> {
        let entrance = Self {
            id: None,
            entrance_name: entrance_name.into(),
            condition_level,
            entrance_size: None,
            shoe_rack_size: None,
            pantry_presence: None,
            remarks: None,
            report_id: None,
            report: None,
        };
        entrance.validate()?;
        Ok(entrance)
    }

    pub fn validate(&self) -> Result<()> {
        check_required("Entrance name", &self.entrance_name, NAME_MAX_LEN)?;
        check_size("Entrance size", self.entrance_size)?;
        check_size("Shoe rack size", self.shoe_rack_size)?;
        check_flag("Pantry flag", self.pantry_presence.as_deref())
    }
}

/// Environmental factor near the property (noise source, park, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvFactor {
    pub id: Option<i64>,
    pub env_factor_name: String,
    pub env_factor_distance: Option<Decimal>,
    pub remarks: Option<String>,
    pub report_id: Option<i64>,
    pub report: Option<Report>,
}

impl EnvFactor {
    pub fn new(env_factor_name: impl Into<String>) -> Result<Self> {
        let factor = Self {
            id: None,
            env_factor_name: env_factor_name.into(),
            env_factor_distance: None,
            remarks: None,
            report_id: None,
            report: None,
        };
        factor.validate()?;
        Ok(factor)
    }

    pub fn validate(&self) -> Result<()> {
        check_required("Environment factor name", &self.env_factor_name, NAME_MAX_LEN)?;
        check_size("Environment factor distance", self.env_factor_distance)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    pub id: Option<i64>,
    pub infra_type: InfraType,
    pub infra_name: String,
    pub condition_level: QualityStateType,
    pub infra_distance: Option<i32>,
    pub infra_distance_unit: Option<QualityStateType>,
    pub remarks: Option<String>,
    pub report_id: Option<i64>,
    pub report: Option<Report>,
}

impl Infrastructure {
    pub fn new(
        infra_type: InfraType,
        infra_name: impl Into<String>,
        condition_level: QualityStateType,
    ) -> Result<Self> {
        let infrastructure = Self {
            id: None,
            infra_type,
            infra_name: infra_name.into(),
            condition_level,
            infra_distance: None,
            infra_distance_unit: None,
            remarks: None,
            report_id: None,
            report: None,
        };
        infrastructure.validate()?;
        Ok(infrastructure)
    }

    pub fn validate(&self) -> Result<()> {
        check_required("Infrastructure name", &self.infra_name, 200)?;
        if let Some(distance) = self.infra_distance {
            if distance < 0 {
                return Err(Error::Validation(
                    "Infrastructure distance must not be negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kitchen {
    pub id: Option<i64>,
    pub kitchen_name: String,
    pub condition_level: QualityStateType,
    pub built_in_cabinet: Option<String>,
    pub sink_condition: QualityStateType,
    pub ventilation_system: Option<String>,
    pub appliance_provision: Option<String>,
    pub remarks: Option<String>,
    pub report_id: Option<i64>,
    pub report: Option<Report>,
}

impl Kitchen {
    pub fn new(
        kitchen_name: impl Into<String>,
        condition_level: QualityStateType,
        sink_condition: QualityStateType,
    ) -> Result<Self> {
        let kitchen = Self {
            id: None,
            kitchen_name: kitchen_name.into(),
            condition_level,
            built_in_cabinet: None,
            sink_condition,
            ventilation_system: None,
            appliance_provision: None,
            remarks: None,
            report_id: None,
            report: None,
        };
        kitchen.validate()?;
        Ok(kitchen)
    }

    pub fn validate(&self) -> Result<()> {
        check_required("Kitchen name", &self.kitchen_name, NAME_MAX_LEN)?;
        check_flag("Built-in cabinet flag", self.built_in_cabinet.as_deref())?;
        check_optional("Ventilation system", self.ventilation_system.as_deref(), 100)?;
        check_optional("Appliance provision", self.appliance_provision.as_deref(), 100)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivingRoom {
    pub id: Option<i64>,
    pub living_room_name: String,
    pub condition_level: QualityStateType,
    pub room_size: Option<Decimal>,
    pub wall_state: QualityStateType,
    pub floor_material: Option<String>,
    pub sunlight: Option<String>,
    pub remarks: Option<String>,
    pub report_id: Option<i64>,
    pub report: Option<Report>,
}

impl LivingRoom {
    pub fn new(
        living_room_name: impl Into<String>,
        condition_level: QualityStateType,
        wall_state: QualityStateType,
    ) -> Result<Self> {
        let living_room = Self {
            id: None,
            living_room_name: living_room_name.into(),
            condition_level,
            room_size: None,
            wall_state,
            floor_material: None,
            sunlight: None,
            remarks: None,
            report_id: None,
            report: None,
        };
        living_room.validate()?;
        Ok(living_room)
    }

    pub fn validate(&self) -> Result<()> {
        check_required("Living room name", &self.living_room_name, NAME_MAX_LEN)?;
        check_size("Room size", self.room_size)?;
        check_optional("Floor material", self.floor_material.as_deref(), 100)?;
        check_optional("Sunlight", self.sunlight.as_deref(), 100)
    }
}

fn check_required(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    check_optional(field, Some(value), max)
}

// Lengths are counted in characters, not bytes
fn check_optional(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(Error::Validation(format!(
            "{} must be ≤{} characters",
            field, max
        ))),
        _ => Ok(()),
    }
}

/// Yes/no flags hold exactly one character when present
fn check_flag(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.chars().count() != 1 => Err(Error::Validation(format!(
            "{} must be exactly one character",
            field
        ))),
        _ => Ok(()),
    }
}

fn check_size(field: &str, value: Option<Decimal>) -> Result<()> {
    match value {
        Some(v) if v.is_sign_negative() && !v.is_zero() => Err(Error::Validation(format!(
            "{} must not be negative",
            field
        ))),
        _ => Ok(()),
    }
}
