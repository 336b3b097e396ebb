use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use cadoor_config::OutputFormat;
use cadoor_engine::ParseResult;

/// 按输出格式渲染解析结果。
pub fn render(result: &ParseResult, path: &Path, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result).context("序列化解析结果失败"),
        OutputFormat::Text => Ok(render_text(result, path)),
    }
}

/// 每扇门一行的文字摘要。
pub fn render_text(result: &ParseResult, path: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found {} doors in {}", result.total_doors, path.display());
    for door in &result.doors {
        let _ = writeln!(
            out,
            "  - {}: {} at ({}, {})",
            door.mark.as_deref().unwrap_or("DOOR-X"),
            door.door_type,
            format_coordinate(door.drawing_x),
            format_coordinate(door.drawing_y),
        );
    }
    if let Some(hardware) = &result.hardware {
        let _ = writeln!(out, "Hardware:");
        for line in hardware {
            let _ = writeln!(out, "  - {} x{}", line.product_name, line.quantity);
        }
    }
    let _ = write!(out, "Average confidence: {:.2}", result.average_confidence());
    out
}

fn format_coordinate(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 => format!("{v:.1}"),
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}
