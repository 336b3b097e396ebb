//! 从门附近的文字注释中补全编号、楼层、房间与尺寸。

use cadoor_core::drawing::TextAnnotation;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::candidate::DoorCandidate;

static MARK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(P-\d+-F\d+|DOOR-\d+|D-\d+|PT-\d+)").expect("mark regex is valid")
});

static FLOOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)F(\d+)|FLOOR\s*(\d+)|PISO\s*(\d+)").expect("floor regex is valid")
});

static AREA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(COCINA|HABITACI[OÓ]N|BA[NÑ]O|SALA|COMEDOR|KITCHEN|BEDROOM|BATHROOM|LIVING|DINING)",
    )
    .expect("area regex is valid")
});

// 区分大小写：单位只认小写。数字限定为 ASCII，与 `f64` 解析一致
static DIMENSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"((?-u:\d)+(?:\.(?-u:\d)+)?)\s*[xX×]\s*((?-u:\d)+(?:\.(?-u:\d)+)?)\s*(cm|mm|m)?")
        .expect("dimension regex is valid")
});

/// 门洞尺寸，统一换算为厘米。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width_cm: f64,
    pub height_cm: f64,
}

/// 单条注释中识别出的字段，未命中的字段为 `None`。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationFields {
    pub mark: Option<String>,
    pub floor: Option<String>,
    pub area: Option<String>,
    pub dimensions: Option<Dimensions>,
}

impl AnnotationFields {
    pub fn is_empty(&self) -> bool {
        self.mark.is_none() && self.floor.is_none() && self.area.is_none() && self.dimensions.is_none()
    }

    /// 命中的字段直接覆盖候选上的旧值。
    fn apply_to(&self, candidate: &mut DoorCandidate) {
        if let Some(mark) = &self.mark {
            candidate.mark = Some(mark.clone());
        }
        if let Some(floor) = &self.floor {
            candidate.floor = Some(floor.clone());
        }
        if let Some(area) = &self.area {
            candidate.area = Some(area.clone());
        }
        if let Some(dimensions) = self.dimensions {
            candidate.width_cm = Some(dimensions.width_cm);
            candidate.height_cm = Some(dimensions.height_cm);
        }
    }
}

/// 对一段注释文字分别尝试四种独立提取。
pub fn parse_annotation(content: &str) -> AnnotationFields {
    AnnotationFields {
        mark: extract_mark(content),
        floor: extract_floor(content),
        area: extract_area(content),
        dimensions: extract_dimensions(content),
    }
}

pub fn extract_mark(content: &str) -> Option<String> {
    MARK_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// 楼层统一规范为 `F<数字>`。
pub fn extract_floor(content: &str) -> Option<String> {
    let caps = FLOOR_REGEX.captures(content)?;
    let digits = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
    Some(format!("F{}", digits.as_str()))
}

pub fn extract_area(content: &str) -> Option<String> {
    AREA_REGEX
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| title_case(m.as_str()))
}

pub fn extract_dimensions(content: &str) -> Option<Dimensions> {
    let caps = DIMENSION_REGEX.captures(content)?;
    let width: f64 = caps.get(1)?.as_str().parse().ok()?;
    let height: f64 = caps.get(2)?.as_str().parse().ok()?;
    let unit = caps.get(3).map(|m| m.as_str());
    let to_cm = |value: f64| match unit {
        Some("mm") => value / 10.0,
        Some("m") => value * 100.0,
        _ => value,
    };
    Some(Dimensions {
        width_cm: to_cm(width),
        height_cm: to_cm(height),
    })
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// 用邻近注释补全候选，返回新的候选列表。
///
/// 注释按绘图顺序（先 TEXT 后 MTEXT）处理，同一字段后命中者覆盖先命中者。
/// 缺少坐标的候选原样返回。
pub fn enrich_candidates(
    candidates: Vec<DoorCandidate>,
    annotations: &[TextAnnotation<'_>],
    radius: f64,
) -> Vec<DoorCandidate> {
    let parsed: Vec<(TextAnnotation<'_>, AnnotationFields)> = annotations
        .iter()
        .map(|annotation| (*annotation, parse_annotation(annotation.content)))
        .filter(|(_, fields)| !fields.is_empty())
        .collect();

    candidates
        .into_iter()
        .map(|mut candidate| {
            let Some(position) = candidate.position() else {
                return candidate;
            };
            for (annotation, fields) in &parsed {
                if position.distance_to(annotation.insert) < radius {
                    trace!(content = annotation.content, "应用邻近注释");
                    fields.apply_to(&mut candidate);
                }
            }
            candidate
        })
        .collect()
}
