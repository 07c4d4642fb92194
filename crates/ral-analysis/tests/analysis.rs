use approx::assert_relative_eq;
use ral_analysis::{
    dataset::Dataset,
    export,
    ral::{self, TableResult},
    request::AnalysisRequest,
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use serde_json::json;

fn analyze(value: serde_json::Value) -> Vec<TableResult> {
    let request: AnalysisRequest = serde_json::from_value(value).unwrap();
    request.analyze()
}

#[test]
fn test_request_with_multiple_tables() {
    let results = analyze(json!({
        "treatments": 3,
        "replications": 4,
        "tables": 2,
        "data": [
            [[10, 20, 30], [12, 22, 29], [11, 19, 31], [9, 21, 30]],
            [[5, 5, 5], [5, 5, 5], [5, 5, 5], [5, 5, 5]],
        ],
    }));
    assert_eq!(results.len(), 2);

    let first = &results[0];
    assert_eq!(first.labels, ["T1", "T2", "T3"]);
    assert_relative_eq!(first.means[0], 10.5);
    assert_relative_eq!(first.means[1], 20.5);
    assert_relative_eq!(first.means[2], 30.0);
    assert_eq!((first.df1, first.df2), (Some(2), Some(9)));
    assert_relative_eq!(first.f_value.unwrap(), 285.25, max_relative = 1e-9);
    assert_relative_eq!(first.p_value.unwrap(), 6.090_716_049_638_424e-4, max_relative = 1e-6);

    let second = &results[1];
    assert_eq!(second.means, [5.0, 5.0, 5.0]);
    assert!(second.f_value.unwrap().is_nan());
}

#[test]
fn test_non_array_data_yields_no_results() {
    assert!(analyze(json!({ "treatments": 2, "replications": 2, "tables": 1, "data": "x" })).is_empty());
    assert!(analyze(json!({ "treatments": 2, "replications": 2, "tables": 1 })).is_empty());
}

#[test]
fn test_generated_request_round_trips_through_json() {
    let mut rng = Pcg32::seed_from_u64(2024);
    let dataset = Dataset::random(4, 3, 2, &mut rng);
    let request = AnalysisRequest::from_dataset(4, 3, 2, &dataset);
    assert!(request.shape_mismatches().is_empty());

    let json = serde_json::to_string(&request).unwrap();
    let parsed: AnalysisRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, request);

    let from_request = parsed.analyze();
    let from_dataset = ral::calculate_dataset(&dataset);
    assert_eq!(from_request.len(), 2);
    for (a, b) in from_request.iter().zip(&from_dataset) {
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.df1, b.df1);
        assert_eq!(a.df2, b.df2);
        assert_eq!(a.f_value.map(f64::to_bits), b.f_value.map(f64::to_bits));
    }
}

#[test]
fn test_resize_then_analyze() {
    let request: AnalysisRequest = serde_json::from_value(json!({
        "treatments": 2,
        "replications": 2,
        "tables": 1,
        "data": [[[1, 2], [3, 4]]],
    }))
    .unwrap();

    let grown = request.resized(3, 2, 1);
    let results = grown.analyze();
    assert_eq!(results[0].labels, ["T1", "T2", "T3"]);
    assert_eq!(results[0].means, [2.0, 3.0, 0.0]);

    let restored = grown.resized(2, 2, 1);
    assert_eq!(restored.data, json!([[[1.0, 2.0], [3.0, 4.0]]]));
}

#[test]
fn test_results_export() {
    let results = analyze(json!({
        "treatments": 2,
        "replications": 2,
        "tables": 2,
        "data": [[[1, 2], [3, 4]], "broken"],
    }));

    let mut buf = Vec::new();
    export::write_results_tsv(&mut buf, &results).unwrap();
    let tsv = String::from_utf8(buf).unwrap();

    let blocks = tsv.split("\n\n").collect::<Vec<_>>();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("Table 1\nMetric\tValue\nF-value\t0.5000\n"));
    assert!(blocks[1].starts_with("Table 2\nMetric\tValue\nF-value\tN/A\n"));
}
