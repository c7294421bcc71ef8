//! instrumentation-reporter generator tests module.


use crate::aggregate::{self, Aggregator, FileProfile, ProfilingResult, Tally};
use crate::error::Error;
use crate::kind::InstrumentationKind;
use crate::mapping::MappingTable;
use crate::report::{self, Measurement, Report};
use crate::{output, points};
use serde_json::json;
use std::fs;
use std::path::Path;

fn reports(docs: &[&str]) -> Vec<Report> {
    docs.iter()
        .map(|doc| report::parse(doc.as_bytes(), Path::new("mock")).unwrap())
        .collect()
}

fn find<'a>(
    result: &'a [FileProfile],
    file: &str,
    function: &str,
    id: &str,
) -> &'a ProfilingResult {
    result
        .iter()
        .find(|f| f.file_name == file)
        .and_then(|f| f.profiling_data_per_function.get(function))
        .and_then(|results| results.iter().find(|p| p.param == id))
        .unwrap()
}

/// Reports where the point `p1` is present in `hits` of `total` with frequency 1,
/// either at the front or at the back of the sequence.
fn hit_reports(total: usize, hits: usize, at_back: bool) -> Vec<Report> {
    (0..total)
        .map(|i| {
            let present = if at_back { i >= total - hits } else { i < hits };
            let mut report = Report::new();
            if present {
                report.insert("p1".to_string(), Measurement { frequency: 1 });
            }
            report
        })
        .collect()
}

/// Rounds `numerator / denominator` half up using exact integers.
fn expected_round(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

#[test]
fn tally_counts() {
    let mut tally = Tally::default();
    assert_eq!(tally.executed_percent(), 0.0);
    assert_eq!(tally.average_frequency(), 0);
    for frequency in [Some(10), None, Some(5), Some(1)] {
        tally.push(frequency.map(|frequency| Measurement { frequency }).as_ref());
    }
    assert_eq!(tally.reports(), 4);
    assert_eq!(tally.executed_percent(), 75.0);
    assert_eq!(tally.average_frequency(), 4);
}

#[test]
fn tally_rounds_half_up_for_every_share() {
    for total in 1..=200_u64 {
        for hits in 0..=total {
            let mut tally = Tally::default();
            for i in 0..total {
                tally.push((i < hits).then_some(&Measurement { frequency: 1 }));
            }
            let hundredths = expected_round(10000 * hits, total);
            assert_eq!(
                tally.executed_percent(),
                hundredths as f64 / 100.0,
                "executed for {} of {}",
                hits,
                total
            );
            assert_eq!(
                tally.average_frequency(),
                expected_round(hits, total),
                "frequency for {} of {}",
                hits,
                total
            );
        }
    }
}

#[test]
fn generate_rounds_half_way_shares() {
    let mapping = mock::SINGLE_MAPPING.parse::<MappingTable>().unwrap();
    let cases = [
        (12, 6, false, 50.0, 1),
        (16, 8, true, 50.0, 1),
        (32, 9, false, 28.13, 0),
        (32, 15, true, 46.88, 0),
        (8, 4, true, 50.0, 1),
        (3, 2, false, 66.67, 1),
    ];
    for (total, hits, at_back, executed, frequency) in cases {
        let result = aggregate::aggregate(&mapping, &hit_reports(total, hits, at_back));
        let p1 = find(&result, "f.js", "g", "p1");
        assert_eq!(p1.executed, executed, "executed for {} of {}", hits, total);
        assert_eq!(
            p1.data.frequency, frequency,
            "frequency for {} of {}",
            hits, total
        );
    }
}

#[test]
fn generate_order_does_not_change_rounding() {
    let mapping = mock::SINGLE_MAPPING.parse::<MappingTable>().unwrap();
    for total in 1..=64 {
        for hits in 0..=total {
            let front = aggregate::aggregate(&mapping, &hit_reports(total, hits, false));
            let back = aggregate::aggregate(&mapping, &hit_reports(total, hits, true));
            assert_eq!(front, back, "{} of {}", hits, total);
        }
    }
}

#[test]
fn generate_single_point() {
    let mapping = mock::SINGLE_MAPPING.parse::<MappingTable>().unwrap();
    let result = aggregate::aggregate(&mapping, &reports(mock::SINGLE_REPORTS));

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!([{
            "fileName": "f.js",
            "profilingDataPerFunction": {
                "g": [{
                    "param": "p1",
                    "type": "FUNCTION",
                    "lineNo": 5,
                    "colNo": 2,
                    "executed": 50.0,
                    "data": { "frequency": 5 }
                }]
            }
        }])
    );
}

#[test]
fn generate_statistics() {
    let mapping = mock::MAPPING.parse::<MappingTable>().unwrap();
    let result = aggregate::aggregate(&mapping, &reports(mock::REPORTS));

    let p1 = find(&result, "f.js", "main", "p1");
    assert_eq!(p1.kind, InstrumentationKind::Function);
    assert_eq!((p1.line_no, p1.col_no), (5, 2));
    assert_eq!(p1.executed, 66.67);
    assert_eq!(p1.data, Measurement { frequency: 5 });

    let p2 = find(&result, "f.js", "main", "p2");
    assert_eq!(p2.kind, InstrumentationKind::Branch);
    assert_eq!(p2.executed, 33.33);
    assert_eq!(p2.data.frequency, 1);

    let p3 = find(&result, "f.js", "helper", "p3");
    assert_eq!(p3.kind, InstrumentationKind::BranchDefault);
    assert_eq!((p3.line_no, p3.col_no), (16, 0));
    assert_eq!(p3.executed, 0.0);
    assert_eq!(p3.data.frequency, 0);

    let p4 = find(&result, "g.js", "helper", "p4");
    assert_eq!(p4.executed, 33.33);
    assert_eq!(p4.data.frequency, 0);
}

#[test]
fn generate_without_reports() {
    let mapping = mock::MAPPING.parse::<MappingTable>().unwrap();
    let result = aggregate::aggregate(&mapping, &[]);

    let all = result
        .iter()
        .flat_map(|f| f.profiling_data_per_function.values())
        .flatten()
        .collect::<Vec<_>>();
    assert_eq!(all.len(), 4);
    for p in all {
        assert_eq!(p.executed, 0.0);
        assert_eq!(p.data.frequency, 0);
    }
}

#[test]
fn generate_groups_every_file() {
    let mapping = mock::MAPPING.parse::<MappingTable>().unwrap();
    let result = aggregate::aggregate(&mapping, &reports(mock::REPORTS));

    let files = result.iter().map(|f| f.file_name.as_str()).collect::<Vec<_>>();
    assert_eq!(files, vec!["f.js", "g.js", "empty.js"]);

    let f = &result[0].profiling_data_per_function;
    assert_eq!(f.keys().collect::<Vec<_>>(), vec!["helper", "main"]);
    let main = f["main"].iter().map(|p| p.param.as_str()).collect::<Vec<_>>();
    assert_eq!(main, vec!["p1", "p2"]);

    assert_eq!(result[1].profiling_data_per_function.len(), 1);
    assert!(result[2].profiling_data_per_function.is_empty());
}

#[test]
fn generate_streaming_matches_batch() {
    let mapping = mock::MAPPING.parse::<MappingTable>().unwrap();
    let reports = reports(mock::REPORTS);

    let mut aggregator = Aggregator::new(&mapping);
    for report in &reports {
        aggregator.push(report);
    }
    assert_eq!(aggregator.finish(), aggregate::aggregate(&mapping, &reports));
}

#[test]
fn output_compact() {
    let mapping = mock::SINGLE_MAPPING.parse::<MappingTable>().unwrap();
    let result = aggregate::aggregate(&mapping, &reports(mock::SINGLE_REPORTS));

    let mut buffer = Vec::<u8>::new();
    let r = output::write_json(&result, false, &mut buffer);
    assert!(r.is_ok());
    assert_eq!(
        std::str::from_utf8(&buffer).unwrap(),
        "[{\"fileName\":\"f.js\",\"profilingDataPerFunction\":{\"g\":[{\"param\":\"p1\",\
         \"type\":\"FUNCTION\",\"lineNo\":5,\"colNo\":2,\"executed\":50.0,\
         \"data\":{\"frequency\":5}}]}}]\n"
    );
}

#[test]
fn points_listing() {
    let mapping = mock::MAPPING.parse::<MappingTable>().unwrap();
    let mut buffer = Vec::<u8>::new();
    let r = points::list(&mapping, &mut buffer);
    assert!(r.is_ok());
    assert_eq!(std::str::from_utf8(&buffer).unwrap(), mock::POINTS_LISTING);
}

#[test]
fn report_lenient_measurement() {
    let r = report::parse(
        "{\"p1\":{},\"p2\":{\"frequency\":7,\"extra\":true}}".as_bytes(),
        Path::new("mock"),
    );
    assert!(r.is_ok());
    let report = r.unwrap();
    assert_eq!(report["p1"].frequency, 0);
    assert_eq!(report["p2"].frequency, 7);
}

#[test]
fn report_malformed() {
    for doc in [
        "[1, 2]",
        "{\"p1\":{\"frequency\":-1}}",
        "{\"p1\":{\"frequency\":\"ten\"}}",
        "{\"p1\":",
        "null",
        "{\"p1\":{\"frequency\":1},\"p1\":{\"frequency\":2}}",
        "{} {}",
    ] {
        let r = report::parse(doc.as_bytes(), Path::new("bad.json"));
        assert!(
            matches!(&r, Err(Error::ReportParse(_, path)) if path == Path::new("bad.json")),
            "{} should be rejected",
            doc
        );
    }
}

#[test]
fn report_directory_sorted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.json"), "{\"x\":{\"frequency\":2}}").unwrap();
    fs::write(dir.path().join("a.json"), "{\"x\":{\"frequency\":1}}").unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();

    let r = report::read_dir(dir.path());
    assert!(r.is_ok());
    let reports = r.unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["x"].frequency, 1);
    assert_eq!(reports[1]["x"].frequency, 2);
}

#[test]
fn report_directory_missing() {
    let dir = tempfile::tempdir().unwrap();
    let r = report::read_dir(&dir.path().join("absent"));
    assert!(matches!(r, Err(Error::ReadDir(..))));
}

#[test]
fn run_integral() {
    let dir = tempfile::tempdir().unwrap();
    let mapping_path = dir.path().join("instrumentReport.txt");
    let reports_path = dir.path().join("reports");
    let output_path = dir.path().join("finalResult.json");
    fs::write(&mapping_path, mock::SINGLE_MAPPING).unwrap();
    fs::create_dir(&reports_path).unwrap();
    for (i, doc) in mock::SINGLE_REPORTS.iter().enumerate() {
        fs::write(reports_path.join(format!("{}.json", i)), doc).unwrap();
    }
    fs::write(&output_path, "stale").unwrap();

    let r = super::run(&mapping_path, &reports_path, "pretty", Some(&output_path));
    assert!(r.is_ok());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(written[0]["fileName"], "f.js");
    assert_eq!(written[0]["profilingDataPerFunction"]["g"][0]["executed"], 50.0);
    assert_eq!(
        written[0]["profilingDataPerFunction"]["g"][0]["data"]["frequency"],
        5
    );
}

#[test]
fn run_aborts_on_malformed_report() {
    let dir = tempfile::tempdir().unwrap();
    let mapping_path = dir.path().join("instrumentReport.txt");
    let reports_path = dir.path().join("reports");
    let output_path = dir.path().join("finalResult.json");
    fs::write(&mapping_path, mock::SINGLE_MAPPING).unwrap();
    fs::create_dir(&reports_path).unwrap();
    fs::write(reports_path.join("0.json"), mock::SINGLE_REPORTS[0]).unwrap();
    fs::write(reports_path.join("1.json"), "{\"p1\": 3}").unwrap();

    let r = super::run(&mapping_path, &reports_path, "pretty", Some(&output_path));
    assert!(matches!(r, Err(Error::ReportParse(..))));
    assert!(!output_path.exists());
}
