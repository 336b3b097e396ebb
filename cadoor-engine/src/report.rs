use cadoor_core::drawing::Drawing;
use serde::{Deserialize, Serialize};

use crate::candidate::{DoorCandidate, DoorType};
use crate::hardware::HardwareLine;

const UNKNOWN: &str = "Unknown";

/// `$INSUNITS` 代码对应的单位名称，下标即代码。
const INSUNITS_NAMES: [&str; 21] = [
    "Unitless",
    "Inches",
    "Feet",
    "Miles",
    "Millimeters",
    "Centimeters",
    "Meters",
    "Kilometers",
    "Microinches",
    "Mils",
    "Yards",
    "Angstroms",
    "Nanometers",
    "Microns",
    "Decimeters",
    "Decameters",
    "Hectometers",
    "Gigameters",
    "Astronomical units",
    "Light years",
    "Parsecs",
];

/// 图纸级元数据快照。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingMetadata {
    pub filename: String,
    pub units: String,
    pub scale: Option<f64>,
    pub created_with: String,
    pub layers: Vec<String>,
    pub blocks: Vec<String>,
}

impl DrawingMetadata {
    pub fn from_drawing(drawing: &Drawing, filename: impl Into<String>) -> Self {
        let units = match drawing.header_value("$INSUNITS") {
            Some(value) => match value.as_i32() {
                Some(code) => units_name(code),
                None => value.as_str().unwrap_or(UNKNOWN).to_string(),
            },
            None => UNKNOWN.to_string(),
        };
        let created_with = drawing
            .header_value("$ACADVER")
            .and_then(|value| value.as_str())
            .filter(|version| !version.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string();

        Self {
            filename: filename.into(),
            units,
            scale: drawing.header_value("$DIMSCALE").and_then(|value| value.as_f64()),
            created_with,
            layers: drawing.layers().map(|layer| layer.name.clone()).collect(),
            blocks: drawing.named_blocks().map(str::to_string).collect(),
        }
    }
}

/// 未收录的代码原样输出。
pub fn units_name(code: i32) -> String {
    usize::try_from(code)
        .ok()
        .and_then(|index| INSUNITS_NAMES.get(index))
        .map_or_else(|| code.to_string(), |name| (*name).to_string())
}

/// 对外输出的一条门记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorRecord {
    pub mark: Option<String>,
    pub door_type: DoorType,
    pub floor: Option<String>,
    pub area: Option<String>,
    pub full_location: String,
    pub width: Option<String>,
    pub height: Option<String>,
    pub drawing_x: Option<f64>,
    pub drawing_y: Option<f64>,
    pub rotation: Option<f64>,
    pub layer: Option<String>,
    pub block_name: Option<String>,
    pub confidence: f64,
}

impl From<&DoorCandidate> for DoorRecord {
    fn from(candidate: &DoorCandidate) -> Self {
        let full_location = format!(
            "{} - {} - {}",
            candidate.floor.as_deref().unwrap_or("F1"),
            candidate.area.as_deref().unwrap_or(UNKNOWN),
            candidate.mark.as_deref().unwrap_or("DOOR-X"),
        );
        Self {
            mark: candidate.mark.clone(),
            door_type: candidate.door_type,
            floor: candidate.floor.clone(),
            area: candidate.area.clone(),
            full_location,
            width: candidate.width_cm.and_then(format_measurement),
            height: candidate.height_cm.and_then(format_measurement),
            drawing_x: candidate.x,
            drawing_y: candidate.y,
            rotation: candidate.rotation,
            layer: candidate.layer.clone(),
            block_name: candidate.block_name.clone(),
            confidence: candidate.confidence,
        }
    }
}

/// 厘米值格式化为 `"<value>cm"`，整数值保留一位小数；零值视为缺省。
pub fn format_measurement(value_cm: f64) -> Option<String> {
    if value_cm == 0.0 || value_cm.is_nan() {
        return None;
    }
    if value_cm.is_finite() && value_cm.fract() == 0.0 && value_cm.abs() < 1e16 {
        Some(format!("{value_cm:.1}cm"))
    } else {
        Some(format!("{value_cm}cm"))
    }
}

/// 一次解析的完整输出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub metadata: DrawingMetadata,
    pub doors: Vec<DoorRecord>,
    pub total_doors: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<Vec<HardwareLine>>,
}

impl ParseResult {
    pub fn assemble(metadata: DrawingMetadata, candidates: &[DoorCandidate]) -> Self {
        let doors: Vec<DoorRecord> = candidates.iter().map(DoorRecord::from).collect();
        Self {
            metadata,
            total_doors: doors.len(),
            doors,
            hardware: None,
        }
    }

    pub fn with_hardware(mut self, hardware: Vec<HardwareLine>) -> Self {
        self.hardware = Some(hardware);
        self
    }

    /// 没有门时为 0。
    pub fn average_confidence(&self) -> f64 {
        if self.doors.is_empty() {
            return 0.0;
        }
        self.doors.iter().map(|door| door.confidence).sum::<f64>() / self.doors.len() as f64
    }
}
