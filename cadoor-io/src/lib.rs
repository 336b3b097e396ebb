use std::fs;
use std::path::{Path, PathBuf};

use cadoor_core::{
    drawing::{
        Arc, Attribute, BlockDefinition, BlockInsert, Drawing, Entity, HeaderValue, Layer, MText,
        Text,
    },
    geometry::Point2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),
    #[error("unsupported drawing format {path:?}: only DXF files are supported")]
    UnsupportedFormat { path: PathBuf },
    #[error("failed to read file {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid document structure: {0}")]
    InvalidDocument(String),
}

/// 图纸访问适配器：把文件装载为内存中的 [`Drawing`]。
pub trait DrawingLoader {
    fn load(&self, path: &Path) -> Result<Drawing, IoError>;
}

/// ASCII DXF 读取器。只解析门识别用得到的段与实体，其余实体直接跳过。
pub struct DxfFacade;

impl DxfFacade {
    pub fn new() -> Self {
        Self
    }

    /// 直接从内存中的 DXF 文本解析，便于测试与嵌入调用。
    pub fn load_from_str(&self, source: &str) -> Result<Drawing, IoError> {
        let parser = DxfParser::new(source);
        parser.parse().map_err(|err| match err {
            DxfError::Unsupported { feature } => IoError::UnsupportedFeature(feature),
            DxfError::Invalid { message } => IoError::InvalidDocument(message),
        })
    }
}

impl Default for DxfFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingLoader for DxfFacade {
    fn load(&self, path: &Path) -> Result<Drawing, IoError> {
        if !has_dxf_extension(path) {
            return Err(IoError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
        let bytes = fs::read(path).map_err(|source| IoError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        // R2007 之前的文件常见 ANSI 代码页，非 UTF-8 字节按替换字符处理。
        let data = String::from_utf8_lossy(&bytes);
        self.load_from_str(&data)
    }
}

fn has_dxf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dxf"))
}

#[derive(Debug)]
enum DxfError {
    Unsupported { feature: String },
    Invalid { message: String },
}

impl DxfError {
    fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

struct DxfParser<'a> {
    reader: DxfReader<'a>,
}

impl<'a> DxfParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            reader: DxfReader::new(source),
        }
    }

    fn parse(mut self) -> Result<Drawing, DxfError> {
        let mut drawing = Drawing::new();
        let mut sections = 0usize;
        let mut saw_eof = false;
        while let Some((code, value)) = self.reader.next_pair()? {
            if code != 0 {
                return Err(DxfError::invalid(format!(
                    "意外的组码 {code}（期望 0 表示 SECTION/EOF）"
                )));
            }
            match value.trim() {
                "SECTION" => {
                    sections += 1;
                    let (name_code, name) = self
                        .reader
                        .next_pair()?
                        .ok_or_else(|| DxfError::invalid("SECTION 缺少名称（组码 2）"))?;
                    if name_code != 2 {
                        return Err(DxfError::invalid(format!(
                            "SECTION 名称使用了组码 {name_code}（期望 2）"
                        )));
                    }
                    match name.trim() {
                        "HEADER" => self.parse_header(&mut drawing)?,
                        "TABLES" => self.parse_tables(&mut drawing)?,
                        "BLOCKS" => self.parse_blocks(&mut drawing)?,
                        "ENTITIES" => self.parse_entities(&mut drawing)?,
                        _ => self.skip_section()?,
                    }
                }
                "EOF" => {
                    saw_eof = true;
                    break;
                }
                unexpected => {
                    return Err(DxfError::invalid(format!(
                        "意外的标记 {unexpected}，期望 SECTION 或 EOF"
                    )));
                }
            }
        }
        if sections == 0 && !saw_eof {
            return Err(DxfError::unsupported("文件中没有任何 DXF 段，可能不是 ASCII DXF"));
        }
        Ok(drawing)
    }

    fn skip_section(&mut self) -> Result<(), DxfError> {
        loop {
            match self.reader.next_pair()? {
                Some((0, value)) if value.trim() == "ENDSEC" => break,
                Some(_) => continue,
                None => {
                    return Err(DxfError::invalid("SECTION 未找到 ENDSEC 终止标记"));
                }
            }
        }
        Ok(())
    }

    fn parse_header(&mut self, drawing: &mut Drawing) -> Result<(), DxfError> {
        let mut current: Option<(String, HeaderValue)> = None;
        loop {
            match self.reader.next_pair()? {
                Some((0, value)) if value.trim() == "ENDSEC" => break,
                Some((9, name)) => {
                    if let Some((name, value)) = current.take() {
                        drawing.set_header_value(name, value);
                    }
                    current = Some((
                        name.trim().to_string(),
                        HeaderValue {
                            code: 0,
                            values: Vec::new(),
                        },
                    ));
                }
                Some((code, value)) => match current.as_mut() {
                    Some((_, header)) => {
                        if header.values.is_empty() {
                            header.code = code;
                        }
                        header.values.push(value);
                    }
                    None => {
                        return Err(DxfError::invalid(format!(
                            "HEADER 段在变量名（组码 9）之前出现组码 {code}"
                        )));
                    }
                },
                None => return Err(DxfError::invalid("HEADER 段提前结束")),
            }
        }
        if let Some((name, value)) = current.take() {
            drawing.set_header_value(name, value);
        }
        Ok(())
    }

    fn parse_tables(&mut self, drawing: &mut Drawing) -> Result<(), DxfError> {
        loop {
            let (code, value) = match self.reader.next_pair()? {
                Some(pair) => pair,
                None => return Err(DxfError::invalid("TABLES 段提前结束")),
            };
            if code != 0 {
                return Err(DxfError::invalid(format!(
                    "TABLES 段遇到组码 {code}（期望 0 表示 TABLE 起始）"
                )));
            }
            match value.trim() {
                "ENDSEC" => break,
                "TABLE" => self.parse_table(drawing)?,
                _ => self.skip_entity_body()?,
            }
        }
        Ok(())
    }

    fn parse_table(&mut self, drawing: &mut Drawing) -> Result<(), DxfError> {
        let mut table_name: Option<String> = None;
        loop {
            match self.reader.next_pair()? {
                Some((0, value)) => match value.trim() {
                    "ENDTAB" => {
                        self.skip_entity_body()?;
                        break;
                    }
                    "LAYER" if table_name.as_deref() == Some("LAYER") => {
                        if let Some(layer) = self.parse_layer_record()? {
                            drawing.add_layer(layer);
                        }
                    }
                    _ => self.skip_entity_body()?,
                },
                Some((2, value)) if table_name.is_none() => {
                    table_name = Some(value.trim().to_string());
                }
                Some(_) => {
                    // 表头中的句柄、计数等字段
                }
                None => return Err(DxfError::invalid("TABLE 未找到 ENDTAB 终止标记")),
            }
        }
        Ok(())
    }

    fn parse_layer_record(&mut self) -> Result<Option<Layer>, DxfError> {
        let mut name: Option<String> = None;
        let mut color: i16 = 7;
        let mut flags: i16 = 0;
        loop {
            match self.reader.next_pair()? {
                Some((0, value)) => {
                    self.reader.put_back((0, value));
                    break;
                }
                Some((code, value)) => match code {
                    2 => name = Some(value.trim().to_string()),
                    62 => color = parse_i16(&value, "LAYER 颜色（组码 62）")?,
                    70 => flags = parse_i16(&value, "LAYER 标志（组码 70）")?,
                    _ => {}
                },
                None => return Err(DxfError::invalid("LAYER 记录未正确结束")),
            }
        }
        Ok(name.map(|name| Layer {
            name,
            // 颜色号为负表示图层关闭，标志位 1 表示冻结
            is_visible: color >= 0 && flags & 0x01 == 0,
        }))
    }

    fn parse_blocks(&mut self, drawing: &mut Drawing) -> Result<(), DxfError> {
        loop {
            let (code, value) = match self.reader.next_pair()? {
                Some(pair) => pair,
                None => return Err(DxfError::invalid("BLOCKS 段提前结束")),
            };
            if code != 0 {
                return Err(DxfError::invalid(format!(
                    "BLOCKS 段遇到组码 {code}（期望 0 表示实体起始）"
                )));
            }

            match value.trim() {
                "ENDSEC" => break,
                "BLOCK" => {
                    let definition = self.parse_block_definition()?;
                    drawing.add_block_definition(definition);
                }
                _ => {
                    // 未预期的条目（例如游离的 ENDBLK），直接跳过
                    self.skip_entity_body()?;
                }
            }
        }
        Ok(())
    }

    /// 只读取块名与基点；块内实体不参与门识别，全部跳过。
    fn parse_block_definition(&mut self) -> Result<BlockDefinition, DxfError> {
        let mut name: Option<String> = None;
        let mut base_x: f64 = 0.0;
        let mut base_y: f64 = 0.0;

        loop {
            match self.reader.next_pair()? {
                Some((0, value)) => match value.trim() {
                    "ENDBLK" => {
                        self.skip_entity_body()?;
                        break;
                    }
                    _ => self.skip_entity_body()?,
                },
                Some((code, value)) => match code {
                    2 => {
                        if name.is_none() {
                            name = Some(value.trim().to_string());
                        }
                    }
                    10 => base_x = parse_f64(&value, "BLOCK 基点 X")?,
                    20 => base_y = parse_f64(&value, "BLOCK 基点 Y")?,
                    _ => {}
                },
                None => {
                    return Err(DxfError::invalid("BLOCK 定义未找到 ENDBLK 终止标记"));
                }
            }
        }

        let name = name.ok_or_else(|| DxfError::invalid("BLOCK 缺少名称（组码 2）"))?;
        Ok(BlockDefinition {
            name,
            base_point: Point2::new(base_x, base_y),
        })
    }

    fn parse_entities(&mut self, drawing: &mut Drawing) -> Result<(), DxfError> {
        loop {
            let (code, value) = match self.reader.next_pair()? {
                Some(pair) => pair,
                None => return Err(DxfError::invalid("ENTITIES 段提前结束")),
            };
            if code != 0 {
                return Err(DxfError::invalid(format!(
                    "ENTITIES 段遇到组码 {code}（期望 0 表示实体起始）"
                )));
            }

            match value.trim() {
                "ENDSEC" => break,
                "ARC" => {
                    let arc = self.parse_arc()?;
                    drawing.add_entity(arc);
                }
                "TEXT" => {
                    let text = self.parse_text()?;
                    drawing.add_entity(text);
                }
                "MTEXT" => {
                    let mtext = self.parse_mtext()?;
                    drawing.add_entity(mtext);
                }
                "INSERT" => {
                    let insert = self.parse_insert()?;
                    drawing.add_entity(insert);
                }
                _ => {
                    // LINE、LWPOLYLINE、HATCH 等与门识别无关的实体
                    self.skip_entity_body()?;
                }
            }
        }
        Ok(())
    }

    fn parse_arc(&mut self) -> Result<Entity, DxfError> {
        let mut layer = None;
        let mut center_x = None;
        let mut center_y = None;
        let mut radius = None;
        let mut start_angle = None;
        let mut end_angle = None;
        loop {
            match self.reader.next_pair()? {
                Some((0, value)) => {
                    self.reader.put_back((0, value));
                    break;
                }
                Some((code, value)) => match code {
                    8 => layer = Some(value.trim().to_string()),
                    10 => assign_coord(&mut center_x, &value, "ARC 圆心 X（组码 10）")?,
                    20 => assign_coord(&mut center_y, &value, "ARC 圆心 Y（组码 20）")?,
                    40 => assign_coord(&mut radius, &value, "ARC 半径（组码 40）")?,
                    50 => assign_coord(&mut start_angle, &value, "ARC 起始角（组码 50）")?,
                    51 => assign_coord(&mut end_angle, &value, "ARC 终止角（组码 51）")?,
                    _ => {}
                },
                None => return Err(DxfError::invalid("ARC 未正确结束")),
            }
        }

        let layer = layer.unwrap_or_else(|| "0".to_string());
        let cx = center_x.ok_or_else(|| DxfError::invalid("ARC 缺少圆心 X（组码 10）"))?;
        let cy = center_y.ok_or_else(|| DxfError::invalid("ARC 缺少圆心 Y（组码 20）"))?;
        let radius = radius.ok_or_else(|| DxfError::invalid("ARC 缺少半径（组码 40）"))?;
        let start_angle =
            start_angle.ok_or_else(|| DxfError::invalid("ARC 缺少起始角（组码 50）"))?;
        let end_angle = end_angle.ok_or_else(|| DxfError::invalid("ARC 缺少终止角（组码 51）"))?;

        Ok(Entity::Arc(Arc {
            center: Point2::new(cx, cy),
            radius,
            start_angle,
            end_angle,
            layer,
        }))
    }

    fn parse_text(&mut self) -> Result<Entity, DxfError> {
        let mut layer = None;
        let mut insert_x = None;
        let mut insert_y = None;
        let mut height = None;
        let mut rotation_deg = 0.0;
        let mut text: Option<String> = None;
        loop {
            match self.reader.next_pair()? {
                Some((0, value)) => {
                    self.reader.put_back((0, value));
                    break;
                }
                Some((code, value)) => match code {
                    8 => layer = Some(value.trim().to_string()),
                    10 => assign_coord(&mut insert_x, &value, "TEXT 插入点 X（组码 10）")?,
                    20 => assign_coord(&mut insert_y, &value, "TEXT 插入点 Y（组码 20）")?,
                    40 => assign_coord(&mut height, &value, "TEXT 文字高度（组码 40）")?,
                    50 => rotation_deg = parse_f64(&value, "TEXT 旋转角")?,
                    1 => match text {
                        Some(ref mut existing) => {
                            existing.push('\n');
                            existing.push_str(&value);
                        }
                        None => text = Some(value),
                    },
                    _ => {}
                },
                None => return Err(DxfError::invalid("TEXT 未正确结束")),
            }
        }

        let layer = layer.unwrap_or_else(|| "0".to_string());
        let ix = insert_x.ok_or_else(|| DxfError::invalid("TEXT 缺少插入点 X（组码 10）"))?;
        let iy = insert_y.ok_or_else(|| DxfError::invalid("TEXT 缺少插入点 Y（组码 20）"))?;

        Ok(Entity::Text(Text {
            insert: Point2::new(ix, iy),
            content: text.unwrap_or_default(),
            height: height.unwrap_or(0.0),
            rotation: rotation_deg,
            layer,
        }))
    }

    fn parse_mtext(&mut self) -> Result<Entity, DxfError> {
        let mut layer = None;
        let mut insert_x = None;
        let mut insert_y = None;
        let mut height = None;
        let mut style: Option<String> = None;
        let mut fragments: Vec<String> = Vec::new();

        loop {
            match self.reader.next_pair()? {
                Some((0, value)) => {
                    self.reader.put_back((0, value));
                    break;
                }
                Some((code, value)) => match code {
                    8 => layer = Some(value.trim().to_string()),
                    10 => assign_coord(&mut insert_x, &value, "MTEXT 插入点 X（组码 10）")?,
                    20 => assign_coord(&mut insert_y, &value, "MTEXT 插入点 Y（组码 20）")?,
                    40 => assign_coord(&mut height, &value, "MTEXT 文本高度（组码 40）")?,
                    7 => style = Some(value.trim().to_string()),
                    // 组码 3 为超长文本的前置分段，组码 1 为最后一段
                    1 | 3 => fragments.push(value),
                    _ => {}
                },
                None => return Err(DxfError::invalid("MTEXT 未正确结束")),
            }
        }

        let layer = layer.unwrap_or_else(|| "0".to_string());
        let ix = insert_x.ok_or_else(|| DxfError::invalid("MTEXT 缺少插入点 X（组码 10）"))?;
        let iy = insert_y.ok_or_else(|| DxfError::invalid("MTEXT 缺少插入点 Y（组码 20）"))?;

        let raw: String = fragments.concat();
        Ok(Entity::MText(MText {
            insert: Point2::new(ix, iy),
            content: decode_mtext_content(&raw),
            height: height.unwrap_or(0.0),
            style,
            layer,
        }))
    }

    fn parse_insert(&mut self) -> Result<Entity, DxfError> {
        let mut layer = None;
        let mut name = None;
        let mut insert_x = None;
        let mut insert_y = None;
        let mut rotation_deg: Option<f64> = None;

        loop {
            match self.reader.next_pair()? {
                Some((0, value)) => {
                    self.reader.put_back((0, value));
                    break;
                }
                Some((code, value)) => match code {
                    8 => layer = Some(value.trim().to_string()),
                    2 => {
                        if name.is_some() {
                            return Err(DxfError::invalid("INSERT 遇到重复的块名（组码 2）"));
                        }
                        name = Some(value.trim().to_string());
                    }
                    10 => assign_coord(&mut insert_x, &value, "INSERT 插入点 X（组码 10）")?,
                    20 => assign_coord(&mut insert_y, &value, "INSERT 插入点 Y（组码 20）")?,
                    50 => rotation_deg = Some(parse_f64(&value, "INSERT 旋转角")?),
                    66 => {
                        // 指示存在属性，解析流程会自动尝试读取
                    }
                    _ => {}
                },
                None => return Err(DxfError::invalid("INSERT 未正确结束")),
            }
        }

        let layer = layer.unwrap_or_else(|| "0".to_string());
        let name = name.ok_or_else(|| DxfError::invalid("INSERT 缺少块名（组码 2）"))?;
        let ix = insert_x.ok_or_else(|| DxfError::invalid("INSERT 缺少插入点 X（组码 10）"))?;
        let iy = insert_y.ok_or_else(|| DxfError::invalid("INSERT 缺少插入点 Y（组码 20）"))?;

        let mut attributes: Vec<Attribute> = Vec::new();
        loop {
            match self.reader.next_pair()? {
                Some((0, value)) => match value.trim() {
                    "ATTRIB" => {
                        let attr = self.parse_attrib()?;
                        attributes.push(attr);
                    }
                    "SEQEND" => {
                        self.skip_entity_body()?;
                        break;
                    }
                    _ => {
                        self.reader.put_back((0, value));
                        break;
                    }
                },
                Some((code, value)) => {
                    return Err(DxfError::invalid(format!(
                        "INSERT 属性段出现意外组码 {code} 值 {value}"
                    )));
                }
                None => break,
            }
        }

        Ok(Entity::BlockInsert(BlockInsert {
            name,
            insert: Point2::new(ix, iy),
            rotation: rotation_deg,
            attributes,
            layer,
        }))
    }

    fn parse_attrib(&mut self) -> Result<Attribute, DxfError> {
        let mut layer = None;
        let mut insert_x = None;
        let mut insert_y = None;
        let mut text: Option<String> = None;
        let mut tag: Option<String> = None;

        loop {
            match self.reader.next_pair()? {
                Some((0, value)) => {
                    self.reader.put_back((0, value));
                    break;
                }
                Some((code, value)) => match code {
                    8 => layer = Some(value.trim().to_string()),
                    10 => assign_coord(&mut insert_x, &value, "ATTRIB 插入点 X（组码 10）")?,
                    20 => assign_coord(&mut insert_y, &value, "ATTRIB 插入点 Y（组码 20）")?,
                    1 => match text {
                        Some(ref mut existing) => {
                            existing.push('\n');
                            existing.push_str(&value);
                        }
                        None => text = Some(value),
                    },
                    2 => tag = Some(value.trim().to_string()),
                    _ => {}
                },
                None => return Err(DxfError::invalid("ATTRIB 未正确结束")),
            }
        }

        let tag = tag.ok_or_else(|| DxfError::invalid("ATTRIB 缺少标记（组码 2）"))?;
        let insert = match (insert_x, insert_y) {
            (Some(x), Some(y)) => Some(Point2::new(x, y)),
            _ => None,
        };
        Ok(Attribute {
            tag,
            text: text.unwrap_or_default(),
            insert,
            layer: layer.unwrap_or_else(|| "0".to_string()),
        })
    }

    fn skip_entity_body(&mut self) -> Result<(), DxfError> {
        loop {
            match self.reader.next_pair()? {
                Some((0, value)) => {
                    self.reader.put_back((0, value));
                    break;
                }
                Some(_) => continue,
                None => break,
            }
        }
        Ok(())
    }
}

struct DxfReader<'a> {
    lines: std::str::Lines<'a>,
    buffer: Option<(i32, String)>,
    line_number: usize,
}

impl<'a> DxfReader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            lines: source.trim_start_matches('\u{feff}').lines(),
            buffer: None,
            line_number: 0,
        }
    }

    /// 读取下一对（组码, 值），自动跳过 999 注释。
    fn next_pair(&mut self) -> Result<Option<(i32, String)>, DxfError> {
        if let Some(pair) = self.buffer.take() {
            return Ok(Some(pair));
        }

        loop {
            let code_line = loop {
                match self.lines.next() {
                    Some(line) => {
                        self.line_number += 1;
                        if !line.trim().is_empty() {
                            break line;
                        }
                    }
                    None => return Ok(None),
                }
            };

            let value_line = match self.lines.next() {
                Some(line) => {
                    self.line_number += 1;
                    line
                }
                None => {
                    return Err(DxfError::invalid(format!(
                        "文件在第 {} 行结束，缺少与组码对应的值行",
                        self.line_number
                    )));
                }
            };

            let code = code_line.trim().parse::<i32>().map_err(|_| {
                DxfError::invalid(format!(
                    "第 {} 行的组码 \"{}\" 无法解析为整数",
                    self.line_number - 1,
                    code_line.trim()
                ))
            })?;
            if code == 999 {
                continue;
            }
            let value = value_line.trim_end_matches('\r').to_string();
            return Ok(Some((code, value)));
        }
    }

    fn put_back(&mut self, pair: (i32, String)) {
        debug_assert!(self.buffer.is_none(), "DXF pair 只能回退一次");
        self.buffer = Some(pair);
    }
}

fn assign_coord(slot: &mut Option<f64>, raw: &str, context: &str) -> Result<(), DxfError> {
    if slot.is_some() {
        return Err(DxfError::invalid(format!("{context} 出现重复值")));
    }
    *slot = Some(parse_f64(raw, context)?);
    Ok(())
}

fn parse_f64(raw: &str, context: &str) -> Result<f64, DxfError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| DxfError::invalid(format!("{context} 解析失败（值：\"{raw}\"）")))
}

fn parse_i32(raw: &str, context: &str) -> Result<i32, DxfError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| DxfError::invalid(format!("{context} 解析失败（值：\"{raw}\"）")))
}

fn parse_i16(raw: &str, context: &str) -> Result<i16, DxfError> {
    let value = parse_i32(raw, context)?;
    i16::try_from(value)
        .map_err(|_| DxfError::invalid(format!("{context} 超出 i16 范围（值：{value}）")))
}

/// MTEXT 格式码的最小解码：段落、硬空格、转义反斜杠，以及 `\A1;` 一类带分号的控制码。
fn decode_mtext_content(raw: &str) -> String {
    let mut result = String::new();
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('P') | Some('p') => result.push('\n'),
                Some('~') => result.push(' '),
                Some('\\') => result.push('\\'),
                Some('{') => result.push('{'),
                Some('}') => result.push('}'),
                Some('A' | 'C' | 'c' | 'F' | 'f' | 'H' | 'h' | 'Q' | 'q' | 'T' | 't' | 'W' | 'w') => {
                    for next in chars.by_ref() {
                        if next == ';' {
                            break;
                        }
                    }
                }
                Some('L' | 'l' | 'O' | 'o' | 'K' | 'k') => {}
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            },
            '{' | '}' => {}
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mtext_decoding_strips_formatting_codes() {
        assert_eq!(decode_mtext_content("D-7\\PBaño"), "D-7\nBaño");
        assert_eq!(decode_mtext_content("{\\fArial|b0;Kitchen}"), "Kitchen");
        assert_eq!(decode_mtext_content("\\A1;80x200cm"), "80x200cm");
        assert_eq!(decode_mtext_content("a\\~b\\\\c"), "a b\\c");
    }

    #[test]
    fn reader_skips_comments_and_blank_lines() {
        let mut reader = DxfReader::new("999\ncomment\n\n  0\nSECTION\n");
        assert_eq!(
            reader.next_pair().expect("read pair"),
            Some((0, "SECTION".to_string()))
        );
        assert_eq!(reader.next_pair().expect("read eof"), None);
    }

    #[test]
    fn reader_rejects_non_numeric_group_code() {
        let mut reader = DxfReader::new("abc\nSECTION\n");
        assert!(matches!(reader.next_pair(), Err(DxfError::Invalid { .. })));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_dxf_extension(Path::new("plan.DXF")));
        assert!(has_dxf_extension(Path::new("dir/plan.dxf")));
        assert!(!has_dxf_extension(Path::new("plan.dwg")));
        assert!(!has_dxf_extension(Path::new("plan")));
    }
}
