// Integration tests for annotator-match
use annotator_match::prelude::*;
use annotator_match::{get_similarity_ratio, to_annotation_boxes, calculate_weighted_similarity};
use serde_json::{json, Value};
use std::io::Write;

fn nike_cutout() -> Value {
    json!({
        "brand": "Nike",
        "product_name": "Air Max",
        "visible_text": "AIR",
        "material": {"fabric": "mesh"}
    })
}

fn nike_and_adidas() -> Vec<Value> {
    vec![
        json!({"id": "nike-90", "analysis": {"brand_name": "Nike", "product": "Air Max 90"}}),
        json!({"id": "superstar", "analysis": {"brand": "Adidas", "product_name": "Superstar"}}),
    ]
}

#[test]
fn test_ratio_identity_and_empty() {
    for s in ["a", "Nike", "Air Max 90", "{\"brand\": \"Nike\"}"] {
        assert_eq!(get_similarity_ratio(s, s), 1.0);
        assert_eq!(get_similarity_ratio(s, ""), 0.0);
        assert_eq!(get_similarity_ratio("", s), 0.0);
    }
}

#[test]
fn test_ratio_symmetry() {
    let pairs = [("nike air", "nike air max"), ("superstar", "air max"), ("mesh", "mesh fabric")];
    for (a, b) in pairs {
        assert_eq!(get_similarity_ratio(a, b), get_similarity_ratio(b, a));
    }
}

#[test]
fn test_extraction_is_total() {
    let inputs = [
        json!({}),
        Value::Null,
        json!(42),
        json!({"analysis": "not json"}),
        json!({"analysis": "{\"brand\":\"X\"}"}),
    ];

    for input in &inputs {
        let fields = extract_key_fields(input);
        // the struct guarantees six strings; make sure nothing leaked through as "null"
        assert_ne!(fields.brand, "null");
        assert_ne!(fields.color_combined, "null");
    }

    assert_eq!(
        extract_key_fields(&inputs[3]),
        ExtractedFields {
            json_string: r#"{"analysis": "not json"}"#.to_string(),
            ..ExtractedFields::default()
        }
    );
    assert_eq!(extract_key_fields(&inputs[4]).brand, "X");
    assert!(extract_key_fields(&inputs[0]).is_empty());
    assert!(extract_key_fields(&inputs[1]).is_empty());
    assert!(extract_key_fields(&inputs[2]).is_empty());
}

#[test]
fn test_material_list_is_not_joined() {
    let fields = extract_key_fields(&json!({
        "material": ["mesh", "rubber"],
        "colors_secondary": ["red", "blue"]
    }));
    assert_eq!(fields.material, r#"["mesh","rubber"]"#);
    assert_eq!(fields.color_combined, "red blue");
}

#[test]
fn test_identical_records_score_one() {
    let record = json!({
        "brand": "Nike",
        "product_name": "Air Max",
        "color_primary": "white",
        "colors_secondary": ["red"],
        "visible_text": "AIR",
        "material": "mesh"
    });
    let fields = extract_key_fields(&record);
    let breakdown = calculate_weighted_similarity(&fields, &fields);

    assert_eq!(MatchWeights::default().total(), 1.0);
    assert_eq!(breakdown.overall_similarity, 1.0);
}

#[test]
fn test_no_candidates_is_no_match() {
    assert!(find_best_match(&nike_cutout(), &[]).is_none());
}

#[test]
fn test_tie_break_prefers_first() {
    let products = vec![
        json!({"id": "a", "analysis": {"brand": "Puma", "product_name": "Suede"}}),
        json!({"id": "b", "analysis": {"brand": "Puma", "product_name": "Suede"}}),
    ];
    let cutout = json!({"brand": "Puma", "product_name": "Suede Classic"});

    let best = find_best_match(&cutout, &products).unwrap();
    assert_eq!(best.product["id"], "a");
}

#[test]
fn test_end_to_end_nike_scenario() {
    let products = nike_and_adidas();
    let matcher = Matcher::default();

    let best = matcher.find_best_match(&nike_cutout(), &products).unwrap();
    assert_eq!(best.product["id"], "nike-90");
    assert_eq!(best.similarity.brand_similarity, 1.0);

    let cutout_fields = extract_key_fields(&nike_cutout());
    let adidas_fields = extract_key_fields(&products[1]["analysis"]);
    let adidas = calculate_weighted_similarity(&adidas_fields, &cutout_fields);
    assert!(best.score > adidas.overall_similarity);

    // the full candidate record comes back, not just its analysis
    assert_eq!(best.product, &products[0]);
}

#[test]
fn test_count_high_matches_threshold() {
    let breakdown = SimilarityBreakdown {
        overall_similarity: 0.0,
        brand_similarity: 1.0,
        product_similarity: 0.8,
        color_similarity: 0.5,
        visible_text_similarity: 0.0,
        material_similarity: 0.0,
        json_similarity: 0.75,
    };
    assert_eq!(count_high_matches(&breakdown, DEFAULT_HIGH_MATCH_THRESHOLD), 3);
}

#[test]
fn test_candidate_without_analysis() {
    let products = vec![json!({"id": "bare", "sku": 123})];

    let best = find_best_match(&nike_cutout(), &products).unwrap();
    assert_eq!(best.score, 0.0);

    let empty_cutout = json!({});
    let best = find_best_match(&empty_cutout, &products).unwrap();
    assert_eq!(best.score, 0.0);
}

#[test]
fn test_optional_fields_guarded_independently() {
    let cutout = json!({"brand": "Nike", "color_primary": "black", "material": "leather"});
    let products = vec![json!({
        "analysis": {"brand": "Nike", "visible_text": "JUST DO IT", "material": "Leather"}
    })];

    let best = find_best_match(&cutout, &products).unwrap();
    assert_eq!(best.similarity.color_similarity, 0.0);
    assert_eq!(best.similarity.visible_text_similarity, 0.0);
    assert_eq!(best.similarity.material_similarity, 1.0);
    assert!(best.similarity.json_similarity > 0.0);
}

#[test]
fn test_double_encoded_cutout() {
    let cutout = json!({
        "analysis": serde_json::to_string(&nike_cutout()).unwrap(),
        "cutout_id": "c-1"
    });
    let products = nike_and_adidas();

    let direct = find_best_match(&nike_cutout(), &products).unwrap();
    let encoded = find_best_match(&cutout, &products).unwrap();
    assert_eq!(direct, encoded);
}

#[test]
fn test_summary_gate() {
    let products = nike_and_adidas();
    let matcher = Matcher::default();
    let best = matcher.find_best_match(&nike_cutout(), &products);

    let summary = matcher.summarize(best.as_ref(), products.len(), DEFAULT_MIN_HIGH_MATCHES);
    assert_eq!(summary.candidates_count, 2);
    assert_eq!(summary.high_match_count, 2);
    assert!(!summary.accepted);
    assert_eq!(summary.top_field, Some("brand_similarity"));
}

#[test]
fn test_config_file_drives_matcher() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "weights": {{"brand": 0, "product": 1, "color": 0, "visible_text": 0, "material": 0, "json": 0}},
            "rules": {{"product_name": [{{"path": ["title"]}}]}}
        }}"#
    )
    .unwrap();

    let config = MatchConfig::from_path(file.path()).unwrap();
    let matcher = Matcher::new(config);

    let cutout = json!({"title": "Gel Kayano"});
    let products = vec![
        json!({"id": "x", "analysis": {"title": "Superstar"}}),
        json!({"id": "y", "analysis": {"title": "Gel Kayano"}}),
    ];
    let best = matcher.find_best_match(&cutout, &products).unwrap();
    assert_eq!(best.product["id"], "y");
    assert_eq!(best.score, 1.0);
}

#[test]
fn test_annotation_boxes() {
    let annotations: Vec<Annotation> = serde_json::from_value(json!([
        {"label": "Air Max 90", "bbox": [0, 0, 100, 100]},
        {"label": "Air Max 90", "bbox": [5, 5, 100, 100]},
        {"label": "Superstar", "bbox": [200, 0, 260, 80]}
    ]))
    .unwrap();

    let boxes = to_annotation_boxes(&annotations, 0.5);
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[1].label, "Superstar");
    assert_eq!((boxes[1].x, boxes[1].y, boxes[1].width, boxes[1].height), (200.0, 0.0, 60.0, 80.0));
}
