use cadoor_config::DetectionConfig;
use cadoor_core::drawing::{Attribute, BlockInsert, Drawing};
use tracing::debug;

use crate::candidate::{CandidateSource, DoorCandidate, DoorType};
use crate::patterns::{classify_door_type, is_door_block};
use crate::pipeline::CandidateExtractor;

/// 基于块参照名称的识别策略。
pub struct BlockExtractor;

impl CandidateExtractor for BlockExtractor {
    fn name(&self) -> &'static str {
        "block"
    }

    fn extract(&self, drawing: &Drawing, config: &DetectionConfig) -> Vec<DoorCandidate> {
        extract_block_candidates(drawing, config.block_confidence)
    }
}

pub fn extract_block_candidates(drawing: &Drawing, confidence: f64) -> Vec<DoorCandidate> {
    drawing
        .inserts()
        .filter_map(|insert| candidate_from_insert(insert, confidence))
        .collect()
}

/// 块名不符合门约定时返回 `None`。
pub fn candidate_from_insert(insert: &BlockInsert, confidence: f64) -> Option<DoorCandidate> {
    if !is_door_block(&insert.name) {
        return None;
    }

    let mut candidate = DoorCandidate::new(CandidateSource::Block, confidence).at(insert.insert);
    candidate.rotation = insert.rotation;
    candidate.layer = Some(insert.layer.clone());
    candidate.block_name = Some(insert.name.clone());
    candidate.door_type = classify_door_type(&insert.name, &insert.layer);

    for attribute in &insert.attributes {
        apply_attribute(&mut candidate, attribute);
    }
    Some(candidate)
}

fn apply_attribute(candidate: &mut DoorCandidate, attribute: &Attribute) {
    let tag = attribute.tag.trim().to_ascii_uppercase();
    let value = attribute.text.as_str();
    match tag.as_str() {
        "MARK" | "TAG" | "NUMBER" => candidate.mark = Some(value.to_string()),
        "WIDTH" | "ANCHO" => {
            if let Some(width) = parse_measurement(&tag, value) {
                candidate.width_cm = Some(width);
            }
        }
        "HEIGHT" | "ALTO" => {
            if let Some(height) = parse_measurement(&tag, value) {
                candidate.height_cm = Some(height);
            }
        }
        "TYPE" | "TIPO" => candidate.door_type = resolve_door_type(value),
        _ => {}
    }
}

/// 属性中的尺寸只接受有限正数，其余一律视为缺省，不向上报告。
fn parse_measurement(tag: &str, raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Some(value),
        _ => {
            debug!(tag, value = raw, "忽略无法解析的尺寸属性");
            None
        }
    }
}

/// TYPE/TIPO 属性：先按规范名称解析，否则按关键字规则对属性文本分类。
pub fn resolve_door_type(value: &str) -> DoorType {
    value
        .parse::<DoorType>()
        .unwrap_or_else(|_| classify_door_type(value, ""))
}
