use std::path::PathBuf;

use cadoor_config::DetectionConfig;
use cadoor_core::drawing::{BlockInsert, Drawing, EntityKind, TextAnnotation};
use cadoor_core::geometry::Point2;
use cadoor_engine::annotations::enrich_candidates;
use cadoor_engine::patterns::{classify_door_type, is_door_block};
use cadoor_engine::{
    CandidateSource, DoorCandidate, DoorDetector, DoorParser, DoorType, ExtractError, ParseResult,
    summarize_hardware,
};
use cadoor_io::DxfFacade;

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/data");
    path.push(name);
    path
}

fn detector() -> DoorDetector {
    DoorDetector::with_defaults(DetectionConfig::default())
}

fn text(insert: Point2, content: &str) -> TextAnnotation<'_> {
    TextAnnotation {
        kind: EntityKind::Text,
        insert,
        content,
        layer: "A-ANNO",
    }
}

#[test]
fn door_block_pattern_truth_table() {
    assert!(is_door_block("DOOR-90"));
    assert!(is_door_block("my_puerta_block"));
    assert!(is_door_block("a-door-single"));
    assert!(!is_door_block("WALL-EXTERIOR"));
    assert!(!is_door_block("WINDOW"));
}

#[test]
fn exterior_wins_over_fire_rated() {
    assert_eq!(
        classify_door_type("FIRE-EXTERIOR-DOOR", "A-DOOR"),
        DoorType::ExteriorSingle
    );
}

#[test]
fn quarter_arc_yields_one_geometry_candidate() {
    let mut drawing = Drawing::new();
    drawing.add_arc(Point2::new(0.0, 0.0), 90.0, 0.0, 90.0, "A-DOOR");

    let doors = detector().detect(&drawing);
    assert_eq!(doors.len(), 1);
    assert_eq!(doors[0].source, CandidateSource::Geometry);
    assert_eq!(doors[0].width_cm, Some(90.0));
    assert!((doors[0].confidence - 0.6).abs() < f64::EPSILON);
}

#[test]
fn oversized_arc_is_not_a_door() {
    let mut drawing = Drawing::new();
    drawing.add_arc(Point2::new(0.0, 0.0), 200.0, 0.0, 90.0, "A-DOOR");
    assert!(detector().detect(&drawing).is_empty());
}

#[test]
fn nearby_text_enriches_candidate() {
    let mut drawing = Drawing::new();
    drawing.add_arc(Point2::new(1000.0, 1000.0), 90.0, 0.0, 90.0, "A-DOOR");
    drawing.add_text(Point2::new(1050.0, 1000.0), "D-7 F2 Kitchen 80x200cm", 10.0, "A-ANNO");

    let doors = detector().detect(&drawing);
    assert_eq!(doors.len(), 1);
    let door = &doors[0];
    assert_eq!(door.mark.as_deref(), Some("D-7"));
    assert_eq!(door.floor.as_deref(), Some("F2"));
    assert_eq!(door.area.as_deref(), Some("Kitchen"));
    assert_eq!(door.width_cm, Some(80.0));
    assert_eq!(door.height_cm, Some(200.0));
    assert!((door.confidence - 0.6).abs() < f64::EPSILON);
}

#[test]
fn millimetre_dimensions_are_converted() {
    let candidate = DoorCandidate::new(CandidateSource::Geometry, 0.6).at(Point2::new(0.0, 0.0));
    let annotations = [text(Point2::new(10.0, 10.0), "90x2100mm")];

    let enriched = enrich_candidates(vec![candidate], &annotations, 200.0);
    assert_eq!(enriched[0].width_cm, Some(9.0));
    assert_eq!(enriched[0].height_cm, Some(210.0));
}

#[test]
fn text_on_the_radius_boundary_is_ignored() {
    let candidate = DoorCandidate::new(CandidateSource::Geometry, 0.6).at(Point2::new(0.0, 0.0));
    let annotations = [text(Point2::new(200.0, 0.0), "D-1")];

    let enriched = enrich_candidates(vec![candidate.clone()], &annotations, 200.0);
    assert_eq!(enriched[0], candidate);
}

#[test]
fn last_matching_text_wins_per_field() {
    let candidate = DoorCandidate::new(CandidateSource::Geometry, 0.6).at(Point2::new(0.0, 0.0));
    let annotations = [
        text(Point2::new(5.0, 0.0), "D-1 F1"),
        text(Point2::new(0.0, 5.0), "D-2 Sala"),
    ];

    let enriched = enrich_candidates(vec![candidate], &annotations, 200.0);
    assert_eq!(enriched[0].mark.as_deref(), Some("D-2"));
    assert_eq!(enriched[0].floor.as_deref(), Some("F1"));
    assert_eq!(enriched[0].area.as_deref(), Some("Sala"));
}

#[test]
fn candidate_without_coordinates_is_unchanged() {
    let mut candidate = DoorCandidate::new(CandidateSource::Block, 0.8);
    candidate.x = Some(0.0);
    let annotations = [text(Point2::new(0.0, 0.0), "D-7 F2 Kitchen 80x200cm")];

    let enriched = enrich_candidates(vec![candidate.clone()], &annotations, 200.0);
    assert_eq!(enriched, vec![candidate]);
}

#[test]
fn block_and_arc_at_same_spot_are_both_reported() {
    let mut drawing = Drawing::new();
    drawing.add_block_insert(BlockInsert::new("DOOR-90", Point2::new(0.0, 0.0), "A-DOOR"));
    drawing.add_arc(Point2::new(0.0, 0.0), 90.0, 0.0, 90.0, "A-DOOR");

    let parser = DoorParser::from_drawing("same-spot.dxf", drawing);
    let result = parser.run(&detector());
    assert_eq!(result.total_doors, 2);
    assert!((result.average_confidence() - 0.7).abs() < 1e-12);
}

#[test]
fn parse_result_survives_json_round_trip() {
    let parser = DoorParser::open(fixture("doors_plan.dxf"), &DxfFacade::new()).expect("load fixture");
    let result = parser.run(&detector()).with_hardware(summarize_hardware(
        parser.parse(&detector()).iter().map(|door| door.door_type),
    ));

    let json = serde_json::to_string(&result).expect("serialize result");
    let back: ParseResult = serde_json::from_str(&json).expect("deserialize result");
    assert_eq!(back, result);
}

#[test]
fn fixture_plan_end_to_end() {
    let parser = DoorParser::open(fixture("doors_plan.dxf"), &DxfFacade::new()).expect("load fixture");
    let result = parser.run(&detector());

    let metadata = &result.metadata;
    assert_eq!(metadata.filename, "doors_plan.dxf");
    assert_eq!(metadata.units, "Centimeters");
    assert_eq!(metadata.scale, Some(1.0));
    assert_eq!(metadata.created_with, "AC1027");
    assert_eq!(metadata.layers, ["0", "A-DOOR", "A-ANNO", "A-WALL"]);
    assert_eq!(metadata.blocks, ["DOOR-EXTERIOR", "WALL-EXTERIOR"]);

    assert_eq!(result.total_doors, 2);

    let block = &result.doors[0];
    assert_eq!(block.mark.as_deref(), Some("D-12"));
    assert_eq!(block.door_type, DoorType::ExteriorSingle);
    assert_eq!(block.floor.as_deref(), Some("F2"));
    assert_eq!(block.area.as_deref(), Some("Kitchen"));
    assert_eq!(block.full_location, "F2 - Kitchen - D-12");
    assert_eq!(block.width.as_deref(), Some("90.0cm"));
    assert!(block.height.is_none());
    assert_eq!(block.rotation, Some(90.0));
    assert_eq!(block.block_name.as_deref(), Some("DOOR-EXTERIOR"));
    assert!((block.confidence - 0.8).abs() < f64::EPSILON);

    let arc = &result.doors[1];
    assert_eq!(arc.mark.as_deref(), Some("D-7"));
    assert_eq!(arc.door_type, DoorType::InteriorSingle);
    assert!(arc.floor.is_none());
    assert_eq!(arc.area.as_deref(), Some("Baño"));
    assert_eq!(arc.full_location, "F1 - Baño - D-7");
    assert_eq!(arc.width.as_deref(), Some("80.0cm"));
    assert_eq!(arc.height.as_deref(), Some("200.0cm"));
    assert_eq!(arc.drawing_x, Some(500.0));
    assert_eq!(arc.layer.as_deref(), Some("A-DOOR"));
    assert!(arc.block_name.is_none());
    assert!(arc.rotation.is_none());
}

#[test]
fn metadata_lists_only_layer_table_entries() {
    let source = concat!(
        "  0\nSECTION\n  2\nTABLES\n",
        "  0\nTABLE\n  2\nLAYER\n  0\nLAYER\n  2\n0\n 62\n7\n  0\nENDTAB\n",
        "  0\nENDSEC\n",
        "  0\nSECTION\n  2\nENTITIES\n",
        "  0\nTEXT\n  8\nGHOST-NOTES\n 10\n0.0\n 20\n0.0\n  1\nnote\n",
        "  0\nENDSEC\n  0\nEOF\n",
    );
    let drawing = DxfFacade::new().load_from_str(source).expect("load drawing");
    let result = DoorParser::from_drawing("ghost.dxf", drawing).run(&detector());
    assert_eq!(result.metadata.layers, ["0"]);
}

#[test]
fn missing_fixture_is_file_not_found() {
    let err = DoorParser::open(fixture("no_such_plan.dxf"), &DxfFacade::new())
        .err()
        .expect("missing file should fail");
    assert!(matches!(err, ExtractError::FileNotFound { .. }));
}

#[test]
fn non_dxf_file_is_a_load_error() {
    let file = tempfile::Builder::new()
        .suffix(".dwg")
        .tempfile()
        .expect("create temp file");
    let err = DoorParser::open(file.path(), &DxfFacade::new())
        .err()
        .expect("dwg should be rejected");
    assert!(matches!(err, ExtractError::Load { .. }));
}
