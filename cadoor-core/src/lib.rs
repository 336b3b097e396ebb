pub mod geometry {
    use glam::DVec2;
    use serde::{Deserialize, Serialize};

    /// 二维点，内部以 `glam::DVec2` 表示，坐标单位即图纸单位。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point2(pub DVec2);

    impl Point2 {
        #[inline]
        pub fn new(x: f64, y: f64) -> Self {
            Self(DVec2::new(x, y))
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        /// 两点之间的欧氏距离。
        #[inline]
        pub fn distance_to(self, other: Point2) -> f64 {
            self.0.distance(other.0)
        }
    }
}

pub mod drawing {
    use std::collections::HashMap;

    use serde::{Deserialize, Serialize};

    use crate::geometry::Point2;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EntityId(u64);

    impl EntityId {
        #[inline]
        pub fn new(raw: u64) -> Self {
            Self(raw)
        }

        /// 提供原始数值，便于序列化或日志输出。
        #[inline]
        pub fn get(self) -> u64 {
            self.0
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Layer {
        pub name: String,
        pub is_visible: bool,
    }

    impl Layer {
        #[inline]
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                is_visible: true,
            }
        }
    }

    /// 门识别所需的实体类别，对应 DXF 中的 INSERT / ARC / TEXT / MTEXT。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum EntityKind {
        BlockInsert,
        Arc,
        Text,
        MText,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub enum Entity {
        Arc(Arc),
        Text(Text),
        MText(MText),
        BlockInsert(BlockInsert),
    }

    impl Entity {
        #[inline]
        pub fn kind(&self) -> EntityKind {
            match self {
                Entity::Arc(_) => EntityKind::Arc,
                Entity::Text(_) => EntityKind::Text,
                Entity::MText(_) => EntityKind::MText,
                Entity::BlockInsert(_) => EntityKind::BlockInsert,
            }
        }
    }

    /// 圆弧实体，角度以度储存（与 DXF 组码 50/51 一致），逆时针为正。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Arc {
        pub center: Point2,
        pub radius: f64,
        pub start_angle: f64,
        pub end_angle: f64,
        pub layer: String,
    }

    impl Arc {
        /// 从起始角扫到终止角的角度，归一化到 [0, 360)。
        #[inline]
        pub fn sweep_degrees(&self) -> f64 {
            (self.end_angle - self.start_angle).rem_euclid(360.0)
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Text {
        pub insert: Point2,
        /// 组码 1 的原始文字，不做格式码解码。
        pub content: String,
        pub height: f64,
        /// 旋转角（度）。
        pub rotation: f64,
        pub layer: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct MText {
        pub insert: Point2,
        /// 已解码的文本，`\P` 转为换行。
        pub content: String,
        pub height: f64,
        pub style: Option<String>,
        pub layer: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Attribute {
        pub tag: String,
        pub text: String,
        pub insert: Option<Point2>,
        pub layer: String,
    }

    impl Attribute {
        pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
            Self {
                tag: tag.into(),
                text: text.into(),
                insert: None,
                layer: "0".to_string(),
            }
        }
    }

    /// 块参照（INSERT）。`rotation` 以度表示，文件中未写组码 50 时为 `None`。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BlockInsert {
        pub name: String,
        pub insert: Point2,
        pub rotation: Option<f64>,
        pub attributes: Vec<Attribute>,
        pub layer: String,
    }

    impl BlockInsert {
        pub fn new(name: impl Into<String>, insert: Point2, layer: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                insert,
                rotation: None,
                attributes: Vec::new(),
                layer: layer.into(),
            }
        }

        pub fn with_rotation(mut self, degrees: f64) -> Self {
            self.rotation = Some(degrees);
            self
        }

        pub fn with_attribute(mut self, tag: impl Into<String>, text: impl Into<String>) -> Self {
            self.attributes.push(Attribute::new(tag, text));
            self
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct BlockDefinition {
        pub name: String,
        pub base_point: Point2,
    }

    impl BlockDefinition {
        /// 以 `*` 开头的块（`*Model_Space`、`*D12` 等）属于内部匿名块。
        #[inline]
        pub fn is_anonymous(&self) -> bool {
            self.name.starts_with('*')
        }
    }

    /// HEADER 段中的一个系统变量，保留原始组码与全部取值行。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct HeaderValue {
        pub code: i32,
        pub values: Vec<String>,
    }

    impl HeaderValue {
        pub fn new(code: i32, value: impl Into<String>) -> Self {
            Self {
                code,
                values: vec![value.into()],
            }
        }

        #[inline]
        pub fn as_str(&self) -> Option<&str> {
            self.values.first().map(|value| value.trim())
        }

        pub fn as_f64(&self) -> Option<f64> {
            self.as_str().and_then(|raw| raw.parse::<f64>().ok())
        }

        pub fn as_i32(&self) -> Option<i32> {
            self.as_str().and_then(|raw| raw.parse::<i32>().ok())
        }
    }

    /// 文字类实体（TEXT / MTEXT）的统一只读视图，供注释匹配使用。
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct TextAnnotation<'a> {
        pub kind: EntityKind,
        pub insert: Point2,
        pub content: &'a str,
        pub layer: &'a str,
    }

    /// 已加载图纸的内存模型。图层与块名按文件中的出现顺序保存。
    ///
    /// `layers` 只记录图层表中的条目（以及默认图层 `0`），
    /// 实体引用但图层表未定义的图层不会出现在其中。
    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Drawing {
        header: HashMap<String, HeaderValue>,
        layers: Vec<Layer>,
        blocks: Vec<BlockDefinition>,
        entities: Vec<(EntityId, Entity)>,
        next_entity_id: u64,
    }

    impl Drawing {
        pub fn new() -> Self {
            Self {
                layers: vec![Layer::new("0")],
                ..Self::default()
            }
        }

        pub fn set_header_value(&mut self, name: impl Into<String>, value: HeaderValue) {
            self.header.insert(name.into(), value);
        }

        #[inline]
        pub fn header_value(&self, name: &str) -> Option<&HeaderValue> {
            self.header.get(name)
        }

        /// 添加图层表记录；同名图层已存在时仅更新其属性，保持原有顺序。
        pub fn add_layer(&mut self, layer: Layer) {
            match self.layers.iter_mut().find(|existing| existing.name == layer.name) {
                Some(existing) => *existing = layer,
                None => self.layers.push(layer),
            }
        }

        #[inline]
        pub fn layers(&self) -> impl Iterator<Item = &Layer> {
            self.layers.iter()
        }

        pub fn add_block_definition(&mut self, definition: BlockDefinition) {
            match self
                .blocks
                .iter_mut()
                .find(|existing| existing.name == definition.name)
            {
                Some(existing) => *existing = definition,
                None => self.blocks.push(definition),
            }
        }

        #[inline]
        pub fn block(&self, name: &str) -> Option<&BlockDefinition> {
            self.blocks.iter().find(|block| block.name == name)
        }

        #[inline]
        pub fn blocks(&self) -> impl Iterator<Item = &BlockDefinition> {
            self.blocks.iter()
        }

        /// 非匿名块名列表。
        pub fn named_blocks(&self) -> impl Iterator<Item = &str> {
            self.blocks
                .iter()
                .filter(|block| !block.is_anonymous())
                .map(|block| block.name.as_str())
        }

        pub fn add_entity(&mut self, entity: Entity) -> EntityId {
            let id = EntityId::new(self.next_entity_id);
            self.next_entity_id += 1;
            self.entities.push((id, entity));
            id
        }

        pub fn add_arc(
            &mut self,
            center: Point2,
            radius: f64,
            start_angle: f64,
            end_angle: f64,
            layer: impl Into<String>,
        ) -> EntityId {
            self.add_entity(Entity::Arc(Arc {
                center,
                radius,
                start_angle,
                end_angle,
                layer: layer.into(),
            }))
        }

        pub fn add_text(
            &mut self,
            insert: Point2,
            content: impl Into<String>,
            height: f64,
            layer: impl Into<String>,
        ) -> EntityId {
            self.add_entity(Entity::Text(Text {
                insert,
                content: content.into(),
                height,
                rotation: 0.0,
                layer: layer.into(),
            }))
        }

        pub fn add_mtext(
            &mut self,
            insert: Point2,
            content: impl Into<String>,
            height: f64,
            layer: impl Into<String>,
        ) -> EntityId {
            self.add_entity(Entity::MText(MText {
                insert,
                content: content.into(),
                height,
                style: None,
                layer: layer.into(),
            }))
        }

        pub fn add_block_insert(&mut self, insert: BlockInsert) -> EntityId {
            self.add_entity(Entity::BlockInsert(insert))
        }

        #[inline]
        pub fn entities(&self) -> impl Iterator<Item = &(EntityId, Entity)> {
            self.entities.iter()
        }

        #[inline]
        pub fn entity(&self, id: EntityId) -> Option<&Entity> {
            self.entities
                .iter()
                .find_map(|(entity_id, entity)| (*entity_id == id).then_some(entity))
        }

        /// 按类别筛选实体，保持绘图顺序。
        pub fn query(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
            self.entities
                .iter()
                .map(|(_, entity)| entity)
                .filter(move |entity| entity.kind() == kind)
        }

        pub fn inserts(&self) -> impl Iterator<Item = &BlockInsert> {
            self.query(EntityKind::BlockInsert).filter_map(|entity| match entity {
                Entity::BlockInsert(insert) => Some(insert),
                _ => None,
            })
        }

        pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
            self.query(EntityKind::Arc).filter_map(|entity| match entity {
                Entity::Arc(arc) => Some(arc),
                _ => None,
            })
        }

        /// 所有文字注释：先全部 TEXT，再全部 MTEXT。
        pub fn annotations(&self) -> impl Iterator<Item = TextAnnotation<'_>> {
            let texts = self.query(EntityKind::Text);
            let mtexts = self.query(EntityKind::MText);
            texts.chain(mtexts).filter_map(|entity| match entity {
                Entity::Text(text) => Some(TextAnnotation {
                    kind: EntityKind::Text,
                    insert: text.insert,
                    content: &text.content,
                    layer: &text.layer,
                }),
                Entity::MText(mtext) => Some(TextAnnotation {
                    kind: EntityKind::MText,
                    insert: mtext.insert,
                    content: &mtext.content,
                    layer: &mtext.layer,
                }),
                _ => None,
            })
        }
    }

}
