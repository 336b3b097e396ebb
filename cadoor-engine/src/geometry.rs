use cadoor_config::DetectionConfig;
use cadoor_core::drawing::{Arc, Drawing};

use crate::candidate::{CandidateSource, DoorCandidate};
use crate::patterns::{classify_door_type, is_door_layer};
use crate::pipeline::CandidateExtractor;

/// 基于门扇开启弧的几何识别策略：近似直角的圆弧，半径落在常见门宽范围内。
///
/// 不寻找配套的门扇直线，单凭圆弧判断。
pub struct ArcSwingExtractor;

impl CandidateExtractor for ArcSwingExtractor {
    fn name(&self) -> &'static str {
        "arc-swing"
    }

    fn extract(&self, drawing: &Drawing, config: &DetectionConfig) -> Vec<DoorCandidate> {
        extract_geometry_candidates(drawing, config)
    }
}

pub fn extract_geometry_candidates(drawing: &Drawing, config: &DetectionConfig) -> Vec<DoorCandidate> {
    drawing
        .arcs()
        .filter(|arc| !config.require_door_layer || is_door_layer(&arc.layer))
        .filter(|arc| is_door_swing(arc, config))
        .map(|arc| candidate_from_arc(arc, config.geometry_confidence))
        .collect()
}

pub fn is_door_swing(arc: &Arc, config: &DetectionConfig) -> bool {
    let span = arc.sweep_degrees();
    (config.min_swing_degrees..=config.max_swing_degrees).contains(&span)
        && (config.min_door_radius..=config.max_door_radius).contains(&arc.radius)
}

fn candidate_from_arc(arc: &Arc, confidence: f64) -> DoorCandidate {
    let mut candidate = DoorCandidate::new(CandidateSource::Geometry, confidence).at(arc.center);
    // 开启弧半径即门宽
    candidate.width_cm = Some(arc.radius);
    candidate.layer = Some(arc.layer.clone());
    candidate.door_type = classify_door_type("", &arc.layer);
    candidate
}
