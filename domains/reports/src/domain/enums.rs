//! Closed enumerations stored as text tags

use std::fmt;

use reportservice_query::EnumTag;
use serde::{Deserialize, Serialize};

/// Three-level quality grade used by every condition/state column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityStateType {
    High,
    Middle,
    Low,
}

impl EnumTag for QualityStateType {
    const TAGS: &'static [&'static str] = &["HIGH", "MIDDLE", "LOW"];

    fn tag(&self) -> &'static str {
        match self {
            QualityStateType::High => "HIGH",
            QualityStateType::Middle => "MIDDLE",
            QualityStateType::Low => "LOW",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "HIGH" => Some(QualityStateType::High),
            "MIDDLE" => Some(QualityStateType::Middle),
            "LOW" => Some(QualityStateType::Low),
            _ => None,
        }
    }
}

impl fmt::Display for QualityStateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kind of nearby infrastructure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InfraType {
    School,
    /// Public transport; the stored tag is `TRANSPRT`
    Transprt,
}

impl EnumTag for InfraType {
    const TAGS: &'static [&'static str] = &["SCHOOL", "TRANSPRT"];

    fn tag(&self) -> &'static str {
        match self {
            InfraType::School => "SCHOOL",
            InfraType::Transprt => "TRANSPRT",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SCHOOL" => Some(InfraType::School),
            "TRANSPRT" => Some(InfraType::Transprt),
            _ => None,
        }
    }
}

impl fmt::Display for InfraType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
