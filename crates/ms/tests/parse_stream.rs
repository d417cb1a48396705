//! Integration tests for reading complete ms-format streams.

use homwin_ms::{ConsistencyError, MsParser, ParseError};
use std::io::Write;

/// One generation block with `label` and a single diploid individual.
fn block(label: &str) -> String {
    format!("//\n#OUT: {label} 1000 1\nsegsites: 2\npositions: 0.1 0.6\n01\n11\n")
}

#[test]
fn test_five_sentinel_markers_map_to_sampling_generations() {
    let text: String = (0..5).map(|_| block("20:100")).collect();

    let dataset = MsParser::new().parse_str(&text).unwrap();

    assert_eq!(dataset.generations(), vec![20, 40, 60, 80, 100]);
    for datum in dataset.iter() {
        assert_eq!(datum.haplotypes(), &["01", "11"]);
    }
}

#[test]
fn test_sentinel_ignores_other_numeric_fields() {
    // The third field carries unrelated numbers; only the sentinel order matters.
    let text = "#OUT: 20:100 999 1\n#OUT: 20:100 5 1\n";
    let dataset = MsParser::new().parse_str(text).unwrap();
    assert_eq!(dataset.generations(), vec![20, 40]);
}

#[test]
fn test_parse_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}{}", block("20"), block("80")).unwrap();

    let dataset = MsParser::new().parse_path(file.path()).unwrap();

    assert_eq!(dataset.generations(), vec![20, 80]);
    assert_eq!(dataset.get(80).unwrap().positions(), &[0.1, 0.6]);
}

#[test]
fn test_parse_path_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = MsParser::new()
        .parse_path(dir.path().join("absent.ms"))
        .unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
}

#[test]
fn test_short_block_parses_but_cannot_be_paired() {
    let text = "\
#OUT: 40 40 2
segsites: 1
positions: 0.5
0
1
1
";
    let dataset = MsParser::new().parse_str(text).unwrap();
    let datum = dataset.get(40).unwrap();

    assert_eq!(datum.haplotypes().len(), 3);
    assert!(matches!(
        datum.haplotype_pair(0),
        Err(ConsistencyError::HaplotypeCount { expected: 4, found: 3, .. })
    ));
}

#[test]
fn test_error_messages_name_the_line() {
    let err = MsParser::new()
        .parse_str("#OUT: 20 20 1\nsegsites: 1\npositions: x\n")
        .unwrap_err();
    assert!(err.to_string().starts_with("line 3:"));
}
