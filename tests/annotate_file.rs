// Batch annotation over a variant file, using the in-memory transport.

use serde_json::json;
use std::io::Write;
use tvac::mock::MockTransport;
use tvac::{AnnotationClient, AnnotationRecord, AnnotationReport, BatchObserver, ClientError};

const TEST_URL: &str = "https://test.com/{variant}";
const HEADER: &str =
    "variant\tassembly_name\tseq_region_name\tstart\tend\tmost_severe_consequence\tstrand\tgenes";

/// Records every event so tests can check what was reported.
#[derive(Default)]
struct Recorder {
    total: Option<usize>,
    succeeded: Vec<String>,
    failed: Vec<(String, String)>,
}

impl BatchObserver for Recorder {
    fn on_start(&mut self, total: usize) {
        self.total = Some(total);
    }

    fn on_success(&mut self, record: &AnnotationRecord) {
        self.succeeded.push(record.variant.clone());
    }

    fn on_failure(&mut self, variant: &str, error: &ClientError) {
        self.failed.push((variant.to_string(), error.to_string()));
    }
}

fn vep_body(attr: &str) -> serde_json::Value {
    json!([{
        "assembly_name": format!("{}_assembly", attr),
        "seq_region_name": "1",
        "start": 100,
        "end": 101,
        "most_severe_consequence": "missense_variant",
        "strand": 1,
        "transcript_consequences": [{ "gene_symbol": format!("{}_gene", attr) }]
    }])
}

fn variant_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn three_variant_transport(second_status: u16) -> MockTransport {
    let mut transport = MockTransport::new();
    transport.add_json("https://test.com/variant1", 200, &vep_body("v1"));
    if second_status < 400 {
        transport.add_json("https://test.com/variant2", second_status, &vep_body("v2"));
    } else {
        transport.add_response("https://test.com/variant2", second_status, "error blah error");
    }
    transport.add_json("https://test.com/variant3", 200, &vep_body("v3"));
    transport
}

#[test]
fn test_annotate_file_all_succeed() {
    let file = variant_file("variant1\nvariant2\nvariant3");
    let client = AnnotationClient::with_transport(three_variant_transport(200), TEST_URL).unwrap();
    let mut recorder = Recorder::default();

    let report = client.annotate_file_with(file.path(), &mut recorder).unwrap();

    assert_eq!(
        report.to_string(),
        [
            HEADER,
            "variant1\tv1_assembly\t1\t100\t101\tmissense_variant\t1\tv1_gene",
            "variant2\tv2_assembly\t1\t100\t101\tmissense_variant\t1\tv2_gene",
            "variant3\tv3_assembly\t1\t100\t101\tmissense_variant\t1\tv3_gene",
        ]
        .join("\n")
    );
    assert_eq!(recorder.total, Some(3));
    assert!(recorder.failed.is_empty());
    assert_eq!(recorder.succeeded, vec!["variant1", "variant2", "variant3"]);
}

#[test]
fn test_annotate_file_skips_failed_variant() {
    let file = variant_file("variant1\nvariant2\nvariant3\n");
    let client = AnnotationClient::with_transport(three_variant_transport(400), TEST_URL).unwrap();
    let mut recorder = Recorder::default();

    let report = client.annotate_file_with(file.path(), &mut recorder).unwrap();

    let rows = report.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], HEADER);
    assert!(rows[1].starts_with("variant1\t"));
    assert!(rows[2].starts_with("variant3\t"));

    assert_eq!(recorder.failed.len(), 1);
    let (variant, message) = &recorder.failed[0];
    assert_eq!(variant, "variant2");
    assert!(message.contains("status_code:400"));
    assert!(message.contains("error blah error"));

    assert_eq!(
        client.transport().calls(),
        vec![
            "https://test.com/variant1",
            "https://test.com/variant2",
            "https://test.com/variant3",
        ]
    );
}

#[test]
fn test_annotate_file_dedupes_before_calling() {
    let file = variant_file("  variant1  \n\nvariant3\nvariant1\n\n");
    let client = AnnotationClient::with_transport(three_variant_transport(200), TEST_URL).unwrap();

    let report = client.annotate_file(file.path()).unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(
        client.transport().calls(),
        vec!["https://test.com/variant1", "https://test.com/variant3"]
    );
}

#[test]
fn test_annotate_file_every_variant_fails() {
    let file = variant_file("unknown1\nunknown2");
    let client = AnnotationClient::with_transport(MockTransport::new(), TEST_URL).unwrap();
    let mut recorder = Recorder::default();

    let report = client.annotate_file_with(file.path(), &mut recorder).unwrap();

    assert!(report.is_empty());
    assert_eq!(report.to_string(), HEADER);
    assert_eq!(recorder.failed.len(), 2);
}

#[test]
fn test_annotate_file_network_failure_is_recovered() {
    let file = variant_file("variant1\nvariant2\nvariant3");
    let mut transport = three_variant_transport(200);
    transport.add_failure("https://test.com/variant2", "connection reset");
    let client = AnnotationClient::with_transport(transport, TEST_URL).unwrap();
    let mut recorder = Recorder::default();

    let report = client.annotate_file_with(file.path(), &mut recorder).unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(recorder.failed.len(), 1);
    assert_eq!(recorder.failed[0].0, "variant2");
}

#[test]
fn test_annotate_file_missing_file_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let client = AnnotationClient::with_transport(MockTransport::new(), TEST_URL).unwrap();

    let err = client
        .annotate_file(&dir.path().join("variants.txt"))
        .unwrap_err();

    assert!(matches!(err, ClientError::FileAccess { .. }));
    assert!(client.transport().calls().is_empty());
}

#[test]
fn test_annotate_file_is_repeatable() {
    let file = variant_file("variant3\nvariant2\nvariant1");
    let client = AnnotationClient::with_transport(three_variant_transport(500), TEST_URL).unwrap();

    let first = client.annotate_file(file.path()).unwrap();
    let second = client.annotate_file(file.path()).unwrap();

    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.len(), 2);
}

#[test]
fn test_row_count_bounded_by_input() {
    let inputs = ["", "variant1", "variant1\nvariant1", "variant1\nvariant2\nvariant3\nvariant4"];
    for input in inputs {
        let file = variant_file(input);
        let client =
            AnnotationClient::with_transport(three_variant_transport(200), TEST_URL).unwrap();

        let report: AnnotationReport = client.annotate_file(file.path()).unwrap();
        let unique = tvac::parse_variant_lines(input).len();
        assert!(report.len() <= unique, "input {:?}", input);
        assert_eq!(report.rows().len(), report.len() + 1);
    }
}
