//! Typed accessor glue between the table registry and the domain entities

use reportservice_common::{DecodeError, Result};
use reportservice_query::{Child, Entity, Record, TableMeta, Value};

use crate::domain::entities::{
    Author, Bathroom, Bedroom, Entrance, EnvFactor, Infrastructure, Kitchen, LivingRoom, Report,
};
use crate::repository::metadata::{
    AUTHOR, BATHROOM, BEDROOM, ENTRANCE, ENV_FACTOR, INFRASTRUCTURE, KITCHEN, LIVING_ROOM, REPORT,
};

impl Entity for Author {
    const META: &'static TableMeta = &AUTHOR;

    fn from_record(record: &Record) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            id: record.get("id")?,
            name: record.require("name")?,
            contact_info: record.require("contact_info")?,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", self.name.clone().into()),
            ("contact_info", self.contact_info.clone().into()),
        ]
    }

    fn validate(&self) -> Result<()> {
        Author::validate(self)
    }
}

impl Entity for Report {
    const META: &'static TableMeta = &REPORT;

    fn from_record(record: &Record) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            id: record.get("id")?,
            report_title: record.require("report_title")?,
            report_date: record.get("report_date")?,
            summary: record.get("summary")?,
            exterior_state: record.require_tag("exterior_state")?,
            construction_year: record.get("construction_year")?,
            maintenance_state: record.require_tag("maintenance_state")?,
            parking_facility: record.get("parking_facility")?,
            parking_count: record.get("parking_count")?,
            elevator_state: record.require_tag("elevator_state")?,
            noise_state: record.require_tag("noise_state")?,
            homepad_state: record.require_tag("homepad_state")?,
            cctv_yn: record.get("cctv_yn")?,
            fire_safety_state: record.require_tag("fire_safety_state")?,
            door_security_state: record.require_tag("door_security_state")?,
            maintenance_fee: record.get("maintenance_fee")?,
            redevelopment_yn: record.get("redevelopment_yn")?,
            rental_demand: record.get("rental_demand")?,
            community_rules: record.get("community_rules")?,
            complex_id: record.require("complex_id")?,
            complex_name: record.require("complex_name")?,
            property_id: record.require("property_id")?,
            property_name: record.require("property_name")?,
            created_at: record.require("created_at")?,
            updated_at: record.get("updated_at")?,
            author_id: record.get("author_id")?,
            author: None,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("report_title", self.report_title.clone().into()),
            ("report_date", self.report_date.into()),
            ("summary", self.summary.clone().into()),
            ("exterior_state", Value::tag(Some(self.exterior_state))),
            ("construction_year", self.construction_year.into()),
            ("maintenance_state", Value::tag(Some(self.maintenance_state))),
            ("parking_facility", self.parking_facility.clone().into()),
            ("parking_count", self.parking_count.into()),
            ("elevator_state", Value::tag(Some(self.elevator_state))),
            ("noise_state", Value::tag(Some(self.noise_state))),
            ("homepad_state", Value::tag(Some(self.homepad_state))),
            ("cctv_yn", self.cctv_yn.clone().into()),
            ("fire_safety_state", Value::tag(Some(self.fire_safety_state))),
            ("door_security_state", Value::tag(Some(self.door_security_state))),
            ("maintenance_fee", self.maintenance_fee.into()),
            ("redevelopment_yn", self.redevelopment_yn.clone().into()),
            ("rental_demand", self.rental_demand.clone().into()),
            ("community_rules", self.community_rules.clone().into()),
            ("complex_id", self.complex_id.into()),
            ("complex_name", self.complex_name.clone().into()),
            ("property_id", self.property_id.into()),
            ("property_name", self.property_name.clone().into()),
            ("created_at", self.created_at.into()),
            ("updated_at", self.updated_at.into()),
            ("author_id", self.author_id.into()),
        ]
    }

    fn validate(&self) -> Result<()> {
        Report::validate(self)
    }
}

impl Child for Report {
    type Parent = Author;

    fn set_parent(&mut self, parent: Option<Author>) {
        self.author = parent;
    }
}

impl Entity for Bathroom {
    const META: &'static TableMeta = &BATHROOM;

    fn from_record(record: &Record) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            id: record.get("id")?,
            bathroom_name: record.require("bathroom_name")?,
            condition_level: record.require_tag("condtion_level")?,
            bathroom_size: record.get("bathroom_size")?,
            water_pressure: record.require_tag("water_pressure")?,
            shower_booth_presence: record.get("shower_booth_presence")?,
            bathtub_presence: record.get("bathtub_presence")?,
            floor_and_ceiling: record.require_tag("floor_and_ceiling")?,
            remarks: record.get("remarks")?,
            report_id: record.get("report_id")?,
            report: None,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("bathroom_name", self.bathroom_name.clone().into()),
            ("condtion_level", Value::tag(Some(self.condition_level))),
            ("bathroom_size", self.bathroom_size.into()),
            ("water_pressure", Value::tag(Some(self.water_pressure))),
            ("shower_booth_presence", self.shower_booth_presence.clone().into()),
            ("bathtub_presence", self.bathtub_presence.clone().into()),
            ("floor_and_ceiling", Value::tag(Some(self.floor_and_ceiling))),
            ("remarks", self.remarks.clone().into()),
            ("report_id", self.report_id.into()),
        ]
    }

    fn validate(&self) -> Result<()> {
        Bathroom::validate(self)
    }
}

impl Child for Bathroom {
    type Parent = Report;

    fn set_parent(&mut self, parent: Option<Report>) {
        self.report = parent;
    }
}

impl Entity for Bedroom {
    const META: &'static TableMeta = &BEDROOM;

    fn from_record(record: &Record) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            id: record.get("id")?,
            bedroom_name: record.require("bedroom_name")?,
            condition_level: record.require_tag("condition_level")?,
            room_size: record.get("room_size")?,
            closet_yn: record.get("closet_yn")?,
            ac_yn: record.get("ac_yn")?,
            window_location: record.get("window_location")?,
            window_size: record.get("window_size")?,
            remarks: record.get("remarks")?,
            report_id: record.get("report_id")?,
            report: None,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("bedroom_name", self.bedroom_name.clone().into()),
            ("condition_level", Value::tag(Some(self.condition_level))),
            ("room_size", self.room_size.into()),
            ("closet_yn", self.closet_yn.clone().into()),
            ("ac_yn", self.ac_yn.clone().into()),
            ("window_location", self.window_location.clone().into()),
            ("window_size", self.window_size.clone().into()),
            ("remarks", self.remarks.clone().into()),
            ("report_id", self.report_id.into()),
        ]
    }

    fn validate(&self) -> Result<()> {
        Bedroom::validate(self)
    }
}

impl Child for Bedroom {
    type Parent = Report;

    fn set_parent(&mut self, parent: Option<Report>) {
        self.report = parent;
    }
}

impl Entity for Entrance {
    const META: &'static TableMeta = &ENTRANCE;

    fn from_record(record: &Record) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            id: record.get("id")?,
            entrance_name: record.require("entrance_name")?,
            condition_level: record.require_tag("condtion_level")?,
            entrance_size: record.get("entrance_size")?,
            shoe_rack_size: record.get("shoe_rack_size")?,
            pantry_presence: record.get("pantry_presence")?,
            remarks: record.get("remarks")?,
            report_id: record.get("report_id")?,
            report: None,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("entrance_name", self.entrance_name.clone().into()),
            ("condtion_level", Value::tag(Some(self.condition_level))),
            ("entrance_size", self.entrance_size.into()),
            ("shoe_rack_size", self.shoe_rack_size.into()),
            ("pantry_presence", self.pantry_presence.clone().into()),
            ("remarks", self.remarks.clone().into()),
            ("report_id", self.report_id.into()),
        ]
    }

    fn validate(&self) -> Result<()> {
        Entrance::validate(self)
    }
}

impl Child for Entrance {
    type Parent = Report;

    fn set_parent(&mut self, parent: Option<Report>) {
        self.report = parent;
    }
}

impl Entity for EnvFactor {
    const META: &'static TableMeta = &ENV_FACTOR;

    fn from_record(record: &Record) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            id: record.get("id")?,
            env_factor_name: record.require("env_factor_name")?,
            env_factor_distance: record.get("env_factor_distance")?,
            remarks: record.get("remarks")?,
            report_id: record.get("report_id")?,
            report: None,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("env_factor_name", self.env_factor_name.clone().into()),
            ("env_factor_distance", self.env_factor_distance.into()),
            ("remarks", self.remarks.clone().into()),
            ("report_id", self.report_id.into()),
        ]
    }

    fn validate(&self) -> Result<()> {
        EnvFactor::validate(self)
    }
}

impl Child for EnvFactor {
    type Parent = Report;

    fn set_parent(&mut self, parent: Option<Report>) {
        self.report = parent;
    }
}

impl Entity for Infrastructure {
    const META: &'static TableMeta = &INFRASTRUCTURE;

    fn from_record(record: &Record) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            id: record.get("id")?,
            infra_type: record.require_tag("infra_type")?,
            infra_name: record.require("infra_name")?,
            condition_level: record.require_tag("condition_level")?,
            infra_distance: record.get("infra_distance")?,
            infra_distance_unit: record.tag("infra_distance_unit")?,
            remarks: record.get("remarks")?,
            report_id: record.get("report_id")?,
            report: None,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("infra_type", Value::tag(Some(self.infra_type))),
            ("infra_name", self.infra_name.clone().into()),
            ("condition_level", Value::tag(Some(self.condition_level))),
            ("infra_distance", self.infra_distance.into()),
            ("infra_distance_unit", Value::tag(self.infra_distance_unit)),
            ("remarks", self.remarks.clone().into()),
            ("report_id", self.report_id.into()),
        ]
    }

    fn validate(&self) -> Result<()> {
        Infrastructure::validate(self)
    }
}

impl Child for Infrastructure {
    type Parent = Report;

    fn set_parent(&mut self, parent: Option<Report>) {
        self.report = parent;
    }
}

impl Entity for Kitchen {
    const META: &'static TableMeta = &KITCHEN;

    fn from_record(record: &Record) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            id: record.get("id")?,
            kitchen_name: record.require("kitchen_name")?,
            condition_level: record.require_tag("condition_level")?,
            built_in_cabinet: record.get("built_in_cabinet")?,
            sink_condition: record.require_tag("sink_condition")?,
            ventilation_system: record.get("ventilation_system")?,
            appliance_provision: record.get("appliance_provision")?,
            remarks: record.get("remarks")?,
            report_id: record.get("report_id")?,
            report: None,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("kitchen_name", self.kitchen_name.clone().into()),
            ("condition_level", Value::tag(Some(self.condition_level))),
            ("built_in_cabinet", self.built_in_cabinet.clone().into()),
            ("sink_condition", Value::tag(Some(self.sink_condition))),
            ("ventilation_system", self.ventilation_system.clone().into()),
            ("appliance_provision", self.appliance_provision.clone().into()),
            ("remarks", self.remarks.clone().into()),
            ("report_id", self.report_id.into()),
        ]
    }

    fn validate(&self) -> Result<()> {
        Kitchen::validate(self)
    }
}

impl Child for Kitchen {
    type Parent = Report;

    fn set_parent(&mut self, parent: Option<Report>) {
        self.report = parent;
    }
}

impl Entity for LivingRoom {
    const META: &'static TableMeta = &LIVING_ROOM;

    fn from_record(record: &Record) -> std::result::Result<Self, DecodeError> {
        Ok(Self {
            id: record.get("id")?,
            living_room_name: record.require("living_room_name")?,
            condition_level: record.require_tag("condition_level")?,
            room_size: record.get("room_size")?,
            wall_state: record.require_tag("wall_state")?,
            floor_material: record.get("floor_material")?,
            sunlight: record.get("sunlight")?,
            remarks: record.get("remarks")?,
            report_id: record.get("report_id")?,
            report: None,
        })
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("living_room_name", self.living_room_name.clone().into()),
            ("condition_level", Value::tag(Some(self.condition_level))),
            ("room_size", self.room_size.into()),
            ("wall_state", Value::tag(Some(self.wall_state))),
            ("floor_material", self.floor_material.clone().into()),
            ("sunlight", self.sunlight.clone().into()),
            ("remarks", self.remarks.clone().into()),
            ("report_id", self.report_id.into()),
        ]
    }

    fn validate(&self) -> Result<()> {
        LivingRoom::validate(self)
    }
}

impl Child for LivingRoom {
    type Parent = Report;

    fn set_parent(&mut self, parent: Option<Report>) {
        self.report = parent;
    }
}
