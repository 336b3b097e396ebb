use std::path::{Path, PathBuf};

use cadoor_config::DetectionConfig;
use cadoor_core::drawing::{Drawing, TextAnnotation};
use cadoor_io::DrawingLoader;
use tracing::{debug, info};

use crate::annotations::enrich_candidates;
use crate::blocks::BlockExtractor;
use crate::candidate::DoorCandidate;
use crate::errors::ExtractError;
use crate::geometry::ArcSwingExtractor;
use crate::report::{DrawingMetadata, ParseResult};

/// 一种候选识别策略。各策略互不感知，产出的候选不做跨策略合并。
pub trait CandidateExtractor {
    fn name(&self) -> &'static str;
    fn extract(&self, drawing: &Drawing, config: &DetectionConfig) -> Vec<DoorCandidate>;
}

/// 按注册顺序运行各识别策略，再统一做注释富化。
pub struct DoorDetector {
    extractors: Vec<Box<dyn CandidateExtractor>>,
    config: DetectionConfig,
}

impl DoorDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            extractors: Vec::new(),
            config,
        }
    }

    /// 注册块识别与开启弧识别两种内建策略。
    pub fn with_defaults(config: DetectionConfig) -> Self {
        let mut detector = Self::new(config);
        detector.register(BlockExtractor);
        detector.register(ArcSwingExtractor);
        detector
    }

    pub fn register<E: CandidateExtractor + 'static>(&mut self, extractor: E) {
        self.extractors.push(Box::new(extractor));
    }

    pub fn extractor_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extractors.iter().map(|extractor| extractor.name())
    }

    pub fn collect_candidates(&self, drawing: &Drawing) -> Vec<DoorCandidate> {
        let mut candidates = Vec::new();
        for extractor in &self.extractors {
            let found = extractor.extract(drawing, &self.config);
            debug!(strategy = extractor.name(), count = found.len(), "识别策略完成");
            candidates.extend(found);
        }
        candidates
    }

    pub fn detect(&self, drawing: &Drawing) -> Vec<DoorCandidate> {
        let candidates = self.collect_candidates(drawing);
        let annotations: Vec<TextAnnotation<'_>> = drawing.annotations().collect();
        debug!(
            candidates = candidates.len(),
            annotations = annotations.len(),
            "开始注释富化"
        );
        enrich_candidates(candidates, &annotations, self.config.annotation_radius)
    }
}

/// 单个图纸的解析会话：持有已加载的图纸与其文件名。
pub struct DoorParser {
    path: PathBuf,
    drawing: Drawing,
}

impl DoorParser {
    /// 先确认文件存在，再交给加载器解析。
    pub fn open(path: impl AsRef<Path>, loader: &dyn DrawingLoader) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ExtractError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let drawing = loader.load(path).map_err(|source| ExtractError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), entities = drawing.entities().count(), "图纸加载完成");
        Ok(Self::from_drawing(path, drawing))
    }

    pub fn from_drawing(path: impl Into<PathBuf>, drawing: Drawing) -> Self {
        Self {
            path: path.into(),
            drawing,
        }
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> DrawingMetadata {
        let filename = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        DrawingMetadata::from_drawing(&self.drawing, filename)
    }

    pub fn parse(&self, detector: &DoorDetector) -> Vec<DoorCandidate> {
        detector.detect(&self.drawing)
    }

    /// 元数据与识别结果组装为最终输出。
    pub fn run(&self, detector: &DoorDetector) -> ParseResult {
        let metadata = self.metadata();
        let doors = self.parse(detector);
        let result = ParseResult::assemble(metadata, &doors);
        info!(
            doors = result.total_doors,
            average_confidence = result.average_confidence(),
            "门识别完成"
        );
        result
    }
}
