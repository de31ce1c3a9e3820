// Bulk loader tests against a mock index service

mod common;

use common::{bulk_body, client_for, columns, FailingReader, HangUpServer};
use genomic_search::loader::{AttributeMode, DelimiterLoader, LoadStats};
use genomic_search::AppError;
use mockito::{Matcher, Server};
use std::io::{BufReader, Cursor};

// ============================================================================
// FLUSHING
// ============================================================================

#[test]
fn test_three_column_file_is_one_bulk_request() {
    let mut server = Server::new();
    let expected = bulk_body(&[
        (1, r#"{"seqid":"chr1","start":100,"id":"rs1"}"#),
        (2, r#"{"seqid":"chr1","start":200,"id":"rs2"}"#),
    ]);
    let bulk = server
        .mock("PUT", "/marker/marker/_bulk")
        .match_header("content-type", "application/x-ndjson")
        .match_body(Matcher::Exact(expected))
        .with_status(200)
        .with_body(r#"{"took":3,"errors":false,"items":[]}"#)
        .expect(1)
        .create();

    let client = client_for(&server);
    let stats = DelimiterLoader::new(&client)
        .batch_size(2)
        .load(
            &columns(&["seqid", "start", "id"]),
            Cursor::new("chr1\t100\trs1\nchr1\t200\trs2\n"),
            "marker",
            "marker",
        )
        .unwrap();

    bulk.assert();
    assert_eq!(
        stats,
        LoadStats {
            documents: 2,
            batches: 1
        }
    );
}

#[test]
fn test_batches_flush_when_threshold_exceeded() {
    let mut server = Server::new();
    let first = server
        .mock("PUT", "/idx/rs/_bulk")
        .match_body(Matcher::Exact(bulk_body(&[
            (1, r#"{"id":"rs1"}"#),
            (2, r#"{"id":"rs2"}"#),
            (3, r#"{"id":"rs3"}"#),
        ])))
        .with_status(200)
        .with_body(r#"{"errors":false}"#)
        .expect(1)
        .create();
    let second = server
        .mock("PUT", "/idx/rs/_bulk")
        .match_body(Matcher::Exact(bulk_body(&[
            (4, r#"{"id":"rs4"}"#),
            (5, r#"{"id":"rs5"}"#),
        ])))
        .with_status(200)
        .with_body(r#"{"errors":false}"#)
        .expect(1)
        .create();

    let client = client_for(&server);
    let stats = DelimiterLoader::new(&client)
        .batch_size(2)
        .load(
            &columns(&["id"]),
            Cursor::new("rs1\nrs2\nrs3\nrs4\nrs5\n"),
            "idx",
            "rs",
        )
        .unwrap();

    first.assert();
    second.assert();
    assert_eq!(stats.documents, 5);
    assert_eq!(stats.batches, 2);
}

#[test]
fn test_empty_input_sends_nothing() {
    let mut server = Server::new();
    let bulk = server.mock("PUT", Matcher::Any).expect(0).create();

    let client = client_for(&server);
    let stats = DelimiterLoader::new(&client)
        .load(&columns(&["id"]), Cursor::new("#only a header\n"), "idx", "rs")
        .unwrap();

    bulk.assert();
    assert_eq!(stats, LoadStats::default());
}

// ============================================================================
// SKIPPED LINES
// ============================================================================

#[test]
fn test_skipped_lines_do_not_consume_ids() {
    let mut server = Server::new();
    let bulk = server
        .mock("PUT", "/marker/marker/_bulk")
        .match_body(Matcher::Exact(bulk_body(&[
            (1, r#"{"seqid":"chr1","start":100,"id":"rs1"}"#),
            (2, r#"{"seqid":"chr2","start":250.5,"id":"rs2"}"#),
        ])))
        .with_status(200)
        .with_body(r#"{"errors":false}"#)
        .expect(1)
        .create();

    let input = "#CHROM\tPOS\tID\n\
                 chr1\t100\trs1\n\
                 ragged\tline\n\
                 chr2\t250.5\trs2\n";

    let client = client_for(&server);
    let stats = DelimiterLoader::new(&client)
        .load(&columns(&["seqid", "start", "id"]), Cursor::new(input), "marker", "marker")
        .unwrap();

    bulk.assert();
    assert_eq!(stats.documents, 2);
}

#[test]
fn test_line_with_invalid_utf8_is_skipped() {
    let mut server = Server::new();
    let bulk = server
        .mock("PUT", "/idx/rs/_bulk")
        .match_body(Matcher::Exact(bulk_body(&[
            (1, r#"{"id":"rs1"}"#),
            (2, r#"{"id":"rs3"}"#),
        ])))
        .with_status(200)
        .with_body(r#"{"errors":false}"#)
        .expect(1)
        .create();

    let client = client_for(&server);
    let stats = DelimiterLoader::new(&client)
        .load(
            &columns(&["id"]),
            Cursor::new(&b"rs1\nrs\xe92\nrs3\n"[..]),
            "idx",
            "rs",
        )
        .unwrap();

    bulk.assert();
    assert_eq!(stats.documents, 2);
}

#[test]
fn test_crlf_line_endings() {
    let mut server = Server::new();
    let bulk = server
        .mock("PUT", "/idx/rs/_bulk")
        .match_body(Matcher::Exact(bulk_body(&[(1, r#"{"id":"rs1","start":5}"#)])))
        .with_status(200)
        .with_body(r#"{"errors":false}"#)
        .expect(1)
        .create();

    let client = client_for(&server);
    DelimiterLoader::new(&client)
        .load(&columns(&["id", "start"]), Cursor::new("rs1\t5\r\n"), "idx", "rs")
        .unwrap();

    bulk.assert();
}

#[test]
fn test_gff_attributes_become_nested_objects() {
    let mut server = Server::new();
    let bulk = server
        .mock("PUT", "/gff/gff/_bulk")
        .match_body(Matcher::Exact(bulk_body(&[(
            1,
            r#"{"seqid":"chr17","type":"gene","attr":{"ID":"gene1","Name":"BRCA1"}}"#,
        )])))
        .with_status(200)
        .with_body(r#"{"errors":false}"#)
        .expect(1)
        .create();

    let client = client_for(&server);
    DelimiterLoader::new(&client)
        .attribute_mode(AttributeMode::Gff)
        .load(
            &columns(&["seqid", "type", "attr"]),
            Cursor::new("chr17\tgene\tID=gene1;Name=BRCA1;\n"),
            "gff",
            "gff",
        )
        .unwrap();

    bulk.assert();
}

#[test]
fn test_custom_delimiter() {
    let mut server = Server::new();
    let bulk = server
        .mock("PUT", "/idx/rs_merge/_bulk")
        .match_body(Matcher::Exact(bulk_body(&[(1, r#"{"rshigh":3,"rslow":1}"#)])))
        .with_status(200)
        .with_body(r#"{"errors":false}"#)
        .expect(1)
        .create();

    let client = client_for(&server);
    DelimiterLoader::new(&client)
        .delimiter(",")
        .load(&columns(&["rshigh", "rslow"]), Cursor::new("3,1\n"), "idx", "rs_merge")
        .unwrap();

    bulk.assert();
}

// ============================================================================
// FAILURE PATHS
// ============================================================================

#[test]
fn test_read_error_flushes_buffered_documents_once() {
    let mut server = Server::new();
    let bulk = server
        .mock("PUT", "/marker/marker/_bulk")
        .match_body(Matcher::Exact(bulk_body(&[
            (1, r#"{"seqid":"chr1","start":100,"id":"rs1"}"#),
            (2, r#"{"seqid":"chr1","start":200,"id":"rs2"}"#),
            (3, r#"{"seqid":"chr1","start":300,"id":"rs3"}"#),
        ])))
        .with_status(200)
        .with_body(r#"{"errors":false}"#)
        .expect(1)
        .create();

    let reader = BufReader::new(FailingReader::new(
        "chr1\t100\trs1\nchr1\t200\trs2\nchr1\t300\trs3\n",
    ));

    let client = client_for(&server);
    let result = DelimiterLoader::new(&client).batch_size(10).load(
        &columns(&["seqid", "start", "id"]),
        reader,
        "marker",
        "marker",
    );

    bulk.assert();
    assert!(matches!(result, Err(AppError::Io(_))));
}

#[test]
fn test_item_errors_in_bulk_response_do_not_fail_the_load() {
    let mut server = Server::new();
    let bulk = server
        .mock("PUT", "/idx/rs/_bulk")
        .with_status(200)
        .with_body(r#"{"errors":true,"items":[{"index":{"status":400}}]}"#)
        .expect(1)
        .create();

    let client = client_for(&server);
    let stats = DelimiterLoader::new(&client)
        .load(&columns(&["id"]), Cursor::new("rs1\n"), "idx", "rs")
        .unwrap();

    bulk.assert();
    assert_eq!(stats.batches, 1);
}

#[test]
fn test_failed_flush_mid_load_stops_without_resending() {
    let server = HangUpServer::start();
    let client = server.client();

    let err = DelimiterLoader::new(&client)
        .batch_size(1)
        .load(
            &columns(&["id"]),
            Cursor::new("rs1\nrs2\nrs3\nrs4\nrs5\n"),
            "idx",
            "rs",
        )
        .unwrap_err();

    assert!(err.is_transport());
    // Only the batch holding rs1 and rs2 was attempted.
    assert_eq!(server.requests(), 1);
}

#[test]
fn test_unreachable_service_is_transport_error() {
    let client = genomic_search::elastic::ElasticClient::new("http://127.0.0.1:9", 2).unwrap();
    let err = DelimiterLoader::new(&client)
        .load(&columns(&["id"]), Cursor::new("rs1\n"), "idx", "rs")
        .unwrap_err();

    assert!(err.is_transport());
}
