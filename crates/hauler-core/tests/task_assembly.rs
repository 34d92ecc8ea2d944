//! End-to-end assembly: build a task through the fluent surface and both
//! capability views, finalize it, and hand it to an engine double.

use anyhow::Result;

use hauler_core::engine::{TaskId, TransferEngine};
use hauler_core::metadata::ResponseMetadata;
use hauler_core::naming;
use hauler_core::options::OptionKey;
use hauler_core::task::{DownloadTask, FileLenResolver, Protocol, TaskBuilder};

/// Resolver reading a vendor-specific length header.
struct RawLengthHeader;

impl FileLenResolver for RawLengthHeader {
    fn file_len(&self, meta: &ResponseMetadata) -> Option<u64> {
        meta.header("x-raw-length")?.parse().ok()
    }
}

#[derive(Default)]
struct RecordingEngine {
    tasks: Vec<DownloadTask>,
}

impl TransferEngine for RecordingEngine {
    fn submit(&mut self, task: DownloadTask) -> Result<TaskId> {
        self.tasks.push(task);
        Ok(self.tasks.len() as TaskId)
    }
}

#[test]
fn full_chain_from_builder_to_engine() {
    let mut builder = TaskBuilder::hls("https://cdn.example.com/v/master.m3u8")
        .unwrap()
        .file_path_force("/data/streams/show.ts", true)
        .unwrap()
        .use_server_file_name(true)
        .file_len_resolver(RawLengthHeader)
        .unwrap();

    builder
        .http_options()
        .header("Authorization", "Bearer token")
        .unwrap()
        .param("session", "s1")
        .unwrap()
        .follow_redirects(false)
        .unwrap();
    builder
        .stream_options()
        .bandwidth(1_200_000)
        .unwrap()
        .ignore_failed_parts(true)
        .unwrap();

    let task = builder.finish();
    let mut engine = RecordingEngine::default();
    let id = engine.submit(task).unwrap();
    assert_eq!(id, 1);

    let task = &engine.tasks[0];
    assert_eq!(task.protocol(), Protocol::Hls);
    assert_eq!(task.url(), "https://cdn.example.com/v/master.m3u8");
    assert_eq!(task.dest_path(), Some("/data/streams/show.ts"));
    assert!(task.force_overwrite());
    assert!(task.use_server_file_name());

    let opts = task.options();
    assert_eq!(
        opts.string_map(OptionKey::RequestHeaders)
            .unwrap()
            .get("Authorization")
            .map(String::as_str),
        Some("Bearer token")
    );
    assert_eq!(
        opts.string_map(OptionKey::RequestParams)
            .unwrap()
            .get("session")
            .map(String::as_str),
        Some("s1")
    );
    assert!(!opts.bool_opt(OptionKey::FollowRedirects));
    assert_eq!(opts.int_opt(OptionKey::StreamBandwidth), 1_200_000);
    assert!(opts.bool_opt(OptionKey::IgnoreFailedParts));
}

#[test]
fn engine_side_resolver_and_naming() {
    let task = TaskBuilder::http("https://example.com/dl")
        .unwrap()
        .use_server_file_name(true)
        .file_len_resolver(RawLengthHeader)
        .unwrap()
        .finish();

    // What the engine would see after its probe.
    let meta = ResponseMetadata::from_header_lines(&[
        "HTTP/1.1 200 OK".to_string(),
        "X-Raw-Length: 1048576".to_string(),
        "Content-Disposition: attachment; filename=\"nightly build.tar.gz\"".to_string(),
    ]);

    let resolver = task.file_len_resolver().unwrap();
    assert_eq!(resolver.file_len(&meta), Some(1_048_576));
    assert_eq!(naming::pick_file_name(&task, &meta), "nightly_build.tar.gz");
}

#[test]
fn snapshot_is_engine_independent_json() {
    let mut builder = TaskBuilder::http("https://example.com/a.zip")
        .unwrap()
        .file_path("/tmp/a.zip")
        .unwrap();
    builder.http_options().method("post").unwrap();

    let snapshot = builder.finish().snapshot();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["protocol"], "http");
    assert_eq!(json["dest_path"], "/tmp/a.zip");
    assert_eq!(json["options"]["request_method"], "POST");
    assert_eq!(json["force_overwrite"], false);
    assert!(json.get("file_len_resolver").is_none());
}
