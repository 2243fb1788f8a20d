//! End-to-end pipeline tests over synthetic captures

use mslog_core::datalog::{write_csv, COLUMNS};
use mslog_core::frame::{FrameSynchronizer, FRAME_LEN};
use mslog_core::pipeline::{decode_reader, read_tokens, RecordStream};
use mslog_core::DecodeError;

/// Build one 82-token chunk from leading tokens, padded with filler.
fn chunk(lead: &[&str], fill: &str) -> Vec<String> {
    let mut tokens: Vec<String> = lead.iter().map(|t| t.to_string()).collect();
    while tokens.len() < FRAME_LEN {
        tokens.push(fill.to_string());
    }
    tokens
}

/// A well-formed telemetry chunk: Seconds=100+n, RPM=3000.
fn telemetry_chunk(n: u8) -> Vec<String> {
    let seconds_lo = format!("{:02X}", 100 + u16::from(n));
    chunk(
        &[
            seconds_lo.as_str(),
            "00", // seconds
            "D0",
            "07", // pw1
            "E8",
            "03", // pw2
            "B8",
            "0B", // rpm = 3000
        ],
        "00",
    )
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

#[test]
fn test_clean_capture_end_to_end() {
    init_tracing();

    let mut tokens = Vec::new();
    for n in 0..5 {
        tokens.extend(telemetry_chunk(n));
    }
    let text = tokens.join(" ");

    let output = decode_reader(text.as_bytes()).unwrap();
    assert_eq!(output.records.len(), 5);
    assert_eq!(output.stats.frames_decoded, 5);
    assert_eq!(output.stats.rejected_garbage, 0);
    assert_eq!(output.stats.malformed_frames, 0);

    assert_eq!(output.records[0].seconds, 100);
    assert_eq!(output.records[4].seconds, 104);
    assert!(output.records.iter().all(|r| r.rpm == 3000));
}

#[test]
fn test_noisy_capture_skips_but_never_aborts() {
    init_tracing();

    let mut tokens = Vec::new();
    tokens.extend(telemetry_chunk(0));
    // idle keep-alive frame
    tokens.extend(chunk(&["00", "00", "00"], "F0"));
    // marker byte 2 zeroed
    tokens.extend(chunk(&["05", "12", "00"], "34"));
    // survives the filter but carries a corrupt token
    tokens.extend(chunk(&["05", "12", "34", "ZZ"], "34"));
    tokens.extend(telemetry_chunk(1));
    // trailing partial frame
    tokens.extend(chunk(&["05"], "05")[..40].to_vec());

    let text = tokens.join(" ");
    let output = decode_reader(text.as_bytes()).unwrap();

    assert_eq!(output.records.len(), 2);
    assert_eq!(output.records[0].seconds, 100);
    assert_eq!(output.records[1].seconds, 101);
    assert_eq!(output.stats.rejected_garbage, 2);
    assert_eq!(output.stats.malformed_frames, 1);
    assert_eq!(output.stats.truncated_tokens, 40);
}

#[test]
fn test_record_count_never_exceeds_chunk_count() {
    let mut tokens = Vec::new();
    for n in 0..7 {
        tokens.extend(telemetry_chunk(n));
    }
    // 30 leftover tokens
    tokens.extend(chunk(&["05"], "05")[..30].to_vec());

    let token_count = tokens.len();
    let output = decode_reader(tokens.join(" ").as_bytes()).unwrap();
    assert!(output.records.len() <= token_count / FRAME_LEN);
    assert_eq!(output.records.len(), 7);
}

#[test]
fn test_lowercase_and_short_tokens_decode() {
    // same frame, mixed case and unpadded single digits
    let tokens = chunk(&["64", "0", "d0", "7", "e8", "3", "b8", "b"], "0");
    let output = decode_reader(tokens.join(" ").as_bytes()).unwrap();
    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].seconds, 100);
    assert_eq!(output.records[0].pulse_width1_us, 2000);
    assert_eq!(output.records[0].rpm, 0x0BB8);
}

#[test]
fn test_binary_input_is_fatal() {
    let garbage = [0xC3u8, 0x28, 0x00, 0xFF, 0xFE];
    let err = decode_reader(&garbage[..]).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidInputEncoding(_)));
}

#[test]
fn test_synchronizer_chunk_law() {
    // an exact multiple of FRAME_LEN tokens yields exactly that many chunks
    for frames in [1usize, 3, 8] {
        let mut tokens = Vec::new();
        for _ in 0..frames {
            tokens.extend(chunk(&["05", "12", "34"], "34"));
        }
        let mut sync = FrameSynchronizer::new(tokens.into_iter());
        let yielded = sync.by_ref().count();
        assert_eq!(yielded, frames);
        assert_eq!(sync.stats().chunks, frames as u64);
    }
}

#[test]
fn test_consumer_can_stop_early() {
    let mut tokens = Vec::new();
    for n in 0..50 {
        tokens.extend(telemetry_chunk(n));
    }
    let raw = read_tokens(tokens.join(" ").as_bytes()).unwrap();
    let mut stream = RecordStream::new(raw.into_iter());

    let first = stream.by_ref().take(3).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(stream.sync_stats().chunks, 3);
}

#[test]
fn test_csv_output_round_trip() {
    let mut tokens = Vec::new();
    tokens.extend(telemetry_chunk(0));
    tokens.extend(telemetry_chunk(1));
    let output = decode_reader(tokens.join(" ").as_bytes()).unwrap();

    let mut csv = Vec::new();
    write_csv(&mut csv, &output.records).unwrap();
    let text = String::from_utf8(csv).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].split(',').count(), COLUMNS.len());
    assert!(lines[1].starts_with("100,2000,1000,3000,"));
    assert!(lines[2].starts_with("101,"));
}

#[test]
fn test_record_serializes_for_consumers() {
    let tokens = telemetry_chunk(0);
    let output = decode_reader(tokens.join(" ").as_bytes()).unwrap();
    let json = serde_json::to_value(&output.records[0]).unwrap();
    assert_eq!(json["seconds"], 100);
    assert_eq!(json["rpm"], 3000);
    assert_eq!(json["engine"]["ready"], false);
}
