use std::fmt;
use std::str::FromStr;

use cadoor_core::geometry::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 门的分类。序列化名称与下游估价系统保持一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DoorType {
    #[serde(rename = "EXTERIOR_SINGLE")]
    ExteriorSingle,
    #[serde(rename = "FIRE_RATED_60MIN")]
    FireRated60Min,
    #[serde(rename = "INTERIOR_DOUBLE")]
    InteriorDouble,
    #[serde(rename = "SLIDING")]
    Sliding,
    #[serde(rename = "BIFOLD")]
    Bifold,
    #[default]
    #[serde(rename = "INTERIOR_SINGLE")]
    InteriorSingle,
}

impl DoorType {
    pub const ALL: [DoorType; 6] = [
        DoorType::ExteriorSingle,
        DoorType::FireRated60Min,
        DoorType::InteriorDouble,
        DoorType::Sliding,
        DoorType::Bifold,
        DoorType::InteriorSingle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DoorType::ExteriorSingle => "EXTERIOR_SINGLE",
            DoorType::FireRated60Min => "FIRE_RATED_60MIN",
            DoorType::InteriorDouble => "INTERIOR_DOUBLE",
            DoorType::Sliding => "SLIDING",
            DoorType::Bifold => "BIFOLD",
            DoorType::InteriorSingle => "INTERIOR_SINGLE",
        }
    }
}

impl fmt::Display for DoorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown door type: {0:?}")]
pub struct UnknownDoorType(pub String);

impl FromStr for DoorType {
    type Err = UnknownDoorType;

    /// 接受规范名称，大小写不敏感，`-` 与空格视同 `_`。
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .map(|ch| match ch {
                '-' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        DoorType::ALL
            .into_iter()
            .find(|door_type| door_type.as_str() == normalized)
            .ok_or_else(|| UnknownDoorType(value.to_string()))
    }
}

/// 产生候选的识别策略。每个候选只属于一种策略，跨策略不合并。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    Block,
    Geometry,
}

/// 一个疑似门的识别结果。
///
/// 由提取器创建，注释富化阶段返回补全后的副本，最终由结果组装器只读消费。
/// `confidence` 在创建时确定，之后不再变化。
#[derive(Debug, Clone, PartialEq)]
pub struct DoorCandidate {
    pub source: CandidateSource,
    pub mark: Option<String>,
    pub door_type: DoorType,
    pub floor: Option<String>,
    pub area: Option<String>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    /// 旋转角（度）。
    pub rotation: Option<f64>,
    pub layer: Option<String>,
    pub block_name: Option<String>,
    pub confidence: f64,
}

impl DoorCandidate {
    pub fn new(source: CandidateSource, confidence: f64) -> Self {
        Self {
            source,
            mark: None,
            door_type: DoorType::default(),
            floor: None,
            area: None,
            width_cm: None,
            height_cm: None,
            x: None,
            y: None,
            rotation: None,
            layer: None,
            block_name: None,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn at(mut self, point: Point2) -> Self {
        self.x = Some(point.x());
        self.y = Some(point.y());
        self
    }

    /// 两个坐标都存在时才返回定位点。
    pub fn position(&self) -> Option<Point2> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point2::new(x, y)),
            _ => None,
        }
    }
}
