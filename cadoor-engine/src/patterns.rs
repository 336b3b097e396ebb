//! 块名、图层名与自由文本上的纯匹配函数。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::candidate::DoorType;

/// 门块命名约定（英文/西班牙文）。每条模式都从字符串开头锚定，
/// 但前几条本身以 `.*` 开头，实际效果等同子串匹配。
const DOOR_BLOCK_PATTERNS: [&str; 6] = [
    r".*door.*",
    r".*puerta.*",
    r".*dr.*",
    r".*pt.*",
    r"A-DOOR.*",
    r"DOOR-.*",
];

const DOOR_LAYER_PATTERNS: [&str; 4] = [r".*door.*", r".*puerta.*", r"A-DOOR.*", r"ARCH-DOOR.*"];

/// 分类规则按优先级排列，先命中者生效：同时含 exterior 与 fire 时判为外门。
const DOOR_TYPE_RULES: [(&[&str], DoorType); 5] = [
    (&["exterior", "entrance", "entrada"], DoorType::ExteriorSingle),
    (&["fire", "fuego", "cortafuego"], DoorType::FireRated60Min),
    (&["double", "doble"], DoorType::InteriorDouble),
    (&["sliding", "corredera"], DoorType::Sliding),
    (&["bifold"], DoorType::Bifold),
];

static DOOR_BLOCK_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| compile_anchored(&DOOR_BLOCK_PATTERNS));
static DOOR_LAYER_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| compile_anchored(&DOOR_LAYER_PATTERNS));

fn compile_anchored(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(&format!("(?i)^(?:{pattern})")).expect("door name patterns are valid regex")
        })
        .collect()
}

/// 块名是否符合门块命名约定。
pub fn is_door_block(name: &str) -> bool {
    DOOR_BLOCK_REGEXES.iter().any(|regex| regex.is_match(name))
}

/// 图层名是否符合门图层命名约定。
pub fn is_door_layer(layer: &str) -> bool {
    DOOR_LAYER_REGEXES.iter().any(|regex| regex.is_match(layer))
}

pub fn classify_door_type(block_name: &str, layer: &str) -> DoorType {
    let text = format!("{block_name} {layer}").to_lowercase();
    DOOR_TYPE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, door_type)| *door_type)
        .unwrap_or_default()
}
