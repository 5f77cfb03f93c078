//! # Command Loop End-to-End
//!
//! Drives `CommandHandler` over real files through `FileTraceSink` and checks
//! the trace file line for line.

use std::fs;
use std::io::{BufReader, Cursor};

use url_bloom_cache::{
    CommandHandler, FileTraceSink, FilterConfig, HashStrategy, MembershipApi,
    MemoryTraceSink, UrlCacheService,
};

const REFERENCE_INPUT: &str = "\
ADD https://example1.com/page1
ADD https://example2.com/page2
CONTAINS https://example1.com/page1
CONTAINS https://totally-unseen-url.test
CONTAINS https://example2.com/page2
";

#[test]
fn test_reference_run_writes_expected_trace_file() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("inputPS03.txt");
    let output_path = dir.path().join("outputPS03.txt");
    fs::write(&input_path, REFERENCE_INPUT).unwrap();

    let sink = FileTraceSink::open(&output_path).unwrap();
    let mut cache = UrlCacheService::from_config(&FilterConfig::default(), sink).unwrap();
    let reader = BufReader::new(fs::File::open(&input_path).unwrap());

    let summary = CommandHandler::new().run(reader, &mut cache).unwrap();
    drop(cache);

    assert_eq!(summary.added, 2);
    assert_eq!(summary.checked, 3);
    assert_eq!(summary.positives, 2);
    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        "\
Added: https://example1.com/page1
Added: https://example2.com/page2
URL Existence Check for https://example1.com/page1: True
URL Existence Check for https://totally-unseen-url.test: False
URL Existence Check for https://example2.com/page2: True
"
    );
}

#[test]
fn test_second_run_appends_to_trace_file() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("trace.txt");

    for _ in 0..2 {
        let sink = FileTraceSink::open(&output_path).unwrap();
        let mut cache = UrlCacheService::from_config(&FilterConfig::default(), sink).unwrap();
        CommandHandler::new()
            .run(Cursor::new("ADD https://a.test\n"), &mut cache)
            .unwrap();
    }

    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        "Added: https://a.test\nAdded: https://a.test\n"
    );
}

#[test]
fn test_every_strategy_reports_added_urls() {
    let input: String = (0..500)
        .map(|i| format!("ADD https://example{i}.com/\n"))
        .chain((0..500).map(|i| format!("CONTAINS https://example{i}.com/\n")))
        .collect();

    for strategy in [
        HashStrategy::Standard,
        HashStrategy::Rolling,
        HashStrategy::DoubleHashing,
    ] {
        let config = FilterConfig::default().with_hash_strategy(strategy);
        let mut cache = UrlCacheService::from_config(&config, MemoryTraceSink::new()).unwrap();
        let summary = CommandHandler::new()
            .run(Cursor::new(input.as_str()), &mut cache)
            .unwrap();

        assert_eq!(summary.positives, 500, "false negatives with {strategy}");
        assert!(cache.sink().lines()[500..]
            .iter()
            .all(|line| line.ends_with(": True")));
    }
}

#[test]
fn test_zero_size_cache_is_rejected() {
    let config = FilterConfig::default().with_size_bits(0);
    let result = UrlCacheService::from_config(&config, MemoryTraceSink::new());
    assert!(result.is_err());
}

#[test]
fn test_handler_accepts_trait_object() {
    let mut cache = UrlCacheService::from_config(&FilterConfig::default(), MemoryTraceSink::new())
        .unwrap();
    let api: &mut dyn MembershipApi = &mut cache;

    let summary = CommandHandler::new()
        .run(Cursor::new("ADD x\nCONTAINS x\n"), api)
        .unwrap();
    assert_eq!(summary.positives, 1);
}

#[test]
fn test_invalid_utf8_line_does_not_stop_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.txt");
    let output_path = dir.path().join("output.txt");
    fs::write(
        &input_path,
        b"ADD https://a.test\n\xff\xfe\nADD https://b.test\nCONTAINS https://b.test\n",
    )
    .unwrap();

    let sink = FileTraceSink::open(&output_path).unwrap();
    let mut cache = UrlCacheService::from_config(&FilterConfig::default(), sink).unwrap();
    let reader = BufReader::new(fs::File::open(&input_path).unwrap());
    let summary = CommandHandler::new().run(reader, &mut cache).unwrap();
    drop(cache);

    assert_eq!(summary.malformed, 1);
    assert_eq!(
        fs::read_to_string(&output_path).unwrap(),
        "Added: https://a.test\nAdded: https://b.test\nURL Existence Check for https://b.test: True\n"
    );
}
