//! 门识别引擎：候选提取、注释富化与结果组装。

pub mod annotations;
pub mod blocks;
pub mod candidate;
pub mod errors;
pub mod geometry;
pub mod hardware;
pub mod patterns;
pub mod pipeline;
pub mod report;

pub use candidate::{CandidateSource, DoorCandidate, DoorType};
pub use errors::ExtractError;
pub use hardware::{HardwareLine, summarize_hardware};
pub use pipeline::{CandidateExtractor, DoorDetector, DoorParser};
pub use report::{DoorRecord, DrawingMetadata, ParseResult};
