//! Tests for single, batch and listing runs

mod common;

use std::path::PathBuf;

use common::{FakeBehavior, FakeEngine, Workspace};
use mp4tomp3::converter::{ConversionResult, ConvertError, Converter, ErrorKind};
use mp4tomp3::orchestrator::{list_mode, Orchestrator, RunOptions};

fn options(ws: &Workspace, bitrate: &str) -> RunOptions {
    RunOptions {
        movie_dir: ws.movie_dir.clone(),
        output_dir: ws.output_dir.clone(),
        bitrate: bitrate.to_string(),
        show_info: false,
    }
}

#[test]
fn test_batch_continues_after_failure() {
    let ws = Workspace::new();
    let first = ws.add_video("1_first.mp4");
    let second = ws.add_video("2_second.mkv");
    let third = ws.add_video("3_third.avi");
    let engine = FakeEngine::scripted(vec![
        FakeBehavior::Succeed,
        FakeBehavior::fail("2_second.mkv: Invalid data found when processing input"),
        FakeBehavior::Succeed,
    ]);
    let converter = Converter::new(ws.config(), &engine).unwrap();
    let orchestrator = Orchestrator::new(&converter, options(&ws, "192k"));

    let report = orchestrator.run_all().unwrap();

    assert_eq!(engine.invocation_count(), 3, "third file must still be processed");
    assert_eq!(report.total_count, 3);

    let paths = |results: Vec<&ConversionResult>| -> Vec<PathBuf> {
        results.iter().map(|r| r.source_path.clone()).collect()
    };
    assert_eq!(paths(report.succeeded()), vec![first.clone(), third.clone()]);
    assert_eq!(paths(report.failed()), vec![second.clone()]);
    assert_eq!(
        paths(report.results.iter().collect()),
        vec![first, second, third],
        "summary rows follow processing order"
    );
    assert!(!report.all_succeeded());

    assert_eq!(ws.output_files(), vec!["1_first.mp3", "3_third.mp3"]);
}

#[test]
fn test_batch_all_succeed() {
    let ws = Workspace::new();
    ws.add_video("a.mp4");
    ws.add_video("b.ts");
    let engine = FakeEngine::new();
    let converter = Converter::new(ws.config(), &engine).unwrap();
    let orchestrator = Orchestrator::new(&converter, options(&ws, "128k"));

    let report = orchestrator.run_all().unwrap();

    assert!(report.all_succeeded());
    assert_eq!(report.processed_count(), 2);
    assert!(report.failed().is_empty());
}

#[test]
fn test_batch_preserves_input_order() {
    let ws = Workspace::new();
    let c = ws.add_video("c.mp4");
    let a = ws.add_video("a.mp4");
    let b = ws.add_video("b.mp4");
    let engine = FakeEngine::new();
    let converter = Converter::new(ws.config(), &engine).unwrap();
    let orchestrator = Orchestrator::new(&converter, options(&ws, "192k"));

    let report = orchestrator.run_batch(&[c.clone(), a.clone(), b.clone()]);

    let order: Vec<_> = report.results.iter().map(|r| r.source_path.clone()).collect();
    assert_eq!(order, vec![c, a, b]);
}

#[test]
fn test_batch_stops_on_fatal_error() {
    let ws = Workspace::new();
    let first = ws.add_video("a.mp4");
    let second = ws.add_video("b.mp4");
    let engine = FakeEngine::new();
    let converter = Converter::new(ws.config(), &engine).unwrap();
    let orchestrator = Orchestrator::new(&converter, options(&ws, "192k"));

    // The engine vanishing mid-run surfaces as EngineNotFound from the spawn.
    struct Vanished;
    impl mp4tomp3::converter::TranscodeEngine for Vanished {
        fn name(&self) -> &str {
            "vanished"
        }
        fn is_available(&self) -> bool {
            true
        }
        fn transcode(
            &self,
            _job: &mp4tomp3::converter::TranscodeJob,
        ) -> Result<mp4tomp3::converter::EngineOutput, ConvertError> {
            Err(ConvertError::EngineNotFound {
                program: "ffmpeg".into(),
            })
        }
        fn probe(
            &self,
            path: &std::path::Path,
        ) -> Result<mp4tomp3::converter::MediaInfo, ConvertError> {
            Err(ConvertError::probe_failed(path, "unavailable"))
        }
    }
    let vanished = Converter::new(ws.config(), Vanished).unwrap();
    let fatal_run = Orchestrator::new(&vanished, options(&ws, "192k"));

    let report = fatal_run.run_batch(&[first.clone(), second.clone()]);

    assert_eq!(report.failed().len(), 1);
    assert_eq!(report.processed_count(), 1);
    assert!(!report.all_succeeded());
    assert_eq!(
        report.failed()[0].failure.as_ref().map(|e| e.kind()),
        Some(ErrorKind::EngineNotFound)
    );

    // A healthy engine still processes both.
    assert!(orchestrator.run_batch(&[first, second]).all_succeeded());
}

#[test]
fn test_invalid_bitrate_in_batch_fails_every_file_without_engine() {
    let ws = Workspace::new();
    ws.add_video("a.mp4");
    ws.add_video("b.mp4");
    let engine = FakeEngine::new();
    let converter = Converter::new(ws.config(), &engine).unwrap();
    let orchestrator = Orchestrator::new(&converter, options(&ws, "999k"));

    let report = orchestrator.run_all().unwrap();

    assert_eq!(report.failed().len(), 2);
    assert_eq!(engine.invocation_count(), 0);
}

#[test]
fn test_single_run_reports_outcome() {
    let ws = Workspace::new();
    let source = ws.add_video("solo.m4v");
    let engine = FakeEngine::new();
    let converter = Converter::new(ws.config(), &engine).unwrap();
    let orchestrator = Orchestrator::new(&converter, options(&ws, "192k"));

    let report = orchestrator.run_single(&source);

    assert_eq!(report.total_count, 1);
    assert!(report.all_succeeded());
}

#[test]
fn test_single_run_unsupported_format() {
    let ws = Workspace::new();
    let source = ws.movie_dir.join("slides.pdf");
    std::fs::write(&source, b"%PDF").unwrap();
    let engine = FakeEngine::new();
    let converter = Converter::new(ws.config(), &engine).unwrap();
    let orchestrator = Orchestrator::new(&converter, options(&ws, "192k"));

    let report = orchestrator.run_single(&source);

    assert!(!report.all_succeeded());
    assert_eq!(
        report.failed()[0].failure.as_ref().map(|e| e.kind()),
        Some(ErrorKind::UnsupportedFormat)
    );
}

#[test]
fn test_show_info_probes_source_first() {
    let ws = Workspace::new();
    let source = ws.add_video("with_info.mp4");
    let engine = FakeEngine::new();
    let converter = Converter::new(ws.config(), &engine).unwrap();
    let mut opts = options(&ws, "192k");
    opts.show_info = true;
    let orchestrator = Orchestrator::new(&converter, opts);

    let result = orchestrator.convert_one(&source);

    assert!(result.succeeded());
    let probed = engine.probed_paths();
    assert_eq!(probed.first(), Some(&source));
    assert_eq!(probed.last(), Some(&ws.output_dir.join("with_info.mp3")));
}

#[test]
fn test_run_all_missing_movie_directory() {
    let ws = Workspace::new();
    let engine = FakeEngine::new();
    let converter = Converter::new(ws.config(), &engine).unwrap();
    let mut opts = options(&ws, "192k");
    opts.movie_dir = ws.temp_dir.path().join("missing");
    let orchestrator = Orchestrator::new(&converter, opts);

    let err = orchestrator.run_all().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DirectoryNotFound);
}

#[test]
fn test_run_all_empty_directory() {
    let ws = Workspace::new();
    let engine = FakeEngine::new();
    let converter = Converter::new(ws.config(), &engine).unwrap();
    let orchestrator = Orchestrator::new(&converter, options(&ws, "192k"));

    let report = orchestrator.run_all().unwrap();

    assert_eq!(report.total_count, 0);
    assert!(report.all_succeeded());
    assert_eq!(engine.invocation_count(), 0);
}

#[test]
fn test_list_mode_does_not_convert() {
    let ws = Workspace::new();
    ws.add_video("x.mp4");
    ws.add_video("y.flv");

    let candidates = list_mode(&ws.movie_dir).unwrap();

    assert_eq!(candidates.len(), 2);
    assert!(!ws.output_dir.exists());
}
