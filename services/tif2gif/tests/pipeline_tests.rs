//! End-to-end pipeline tests: TIF directory in, PNGs and a GIF out.

use std::fs::File;
use std::io::BufReader;

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use test_utils::{capture_logs, create_test_rgb16, names, write_corrupt_tif, write_rgb16_tif, TestWorkspace};
use timelapse_common::PipelineConfig;
use tracing::Level;

fn workspace_config(ws: &TestWorkspace) -> PipelineConfig {
    PipelineConfig::new(ws.input_dir(), ws.output_dir(), ws.gif_path())
}

fn write_daily(ws: &TestWorkspace) {
    for name in names::DAILY {
        write_rgb16_tif(&ws.input_tif(name), 2, 2, &create_test_rgb16(2, 2));
    }
}

#[test]
fn test_three_tifs_make_three_frame_gif() {
    let ws = TestWorkspace::new();
    write_daily(&ws);

    let (report, logs) = capture_logs(|| tif2gif::run(&workspace_config(&ws)).unwrap());

    assert_eq!(report.conversion.completed(), 3);
    for name in names::DAILY {
        assert!(ws.output_dir().join(format!("{name}.png")).is_file());
    }

    assert!(report.produced_gif());
    let labels: Vec<&str> = report
        .composition
        .frames
        .outputs()
        .map(|frame| frame.label.as_str())
        .collect();
    assert_eq!(labels, names::DAILY);

    // 2 px wide images leave no room for the bar track.
    let fills: Vec<u32> = report.composition.frames.outputs().map(|f| f.fill_width).collect();
    assert_eq!(fills, vec![0, 0, 0]);

    let reader = BufReader::new(File::open(ws.gif_path()).unwrap());
    let frames = GifDecoder::new(reader)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].buffer().dimensions(), (2, 42));

    assert!(logs.contains(Level::INFO, "Starting the entire process"));
    assert!(logs.contains(Level::INFO, "Successfully created GIF"));
    assert_eq!(logs.count(Level::ERROR), 0);
}

#[test]
fn test_progress_thirds_on_wide_frames() {
    let ws = TestWorkspace::new();
    for name in names::DAILY {
        write_rgb16_tif(&ws.input_tif(name), 50, 4, &create_test_rgb16(50, 4));
    }

    let report = tif2gif::run(&workspace_config(&ws)).unwrap();

    let fills: Vec<u32> = report.composition.frames.outputs().map(|f| f.fill_width).collect();
    assert_eq!(fills, vec![10, 20, 30]);
}

#[test]
fn test_corrupt_tif_does_not_stop_the_run() {
    let ws = TestWorkspace::new();
    write_daily(&ws);
    write_corrupt_tif(&ws.input_tif("20230101_bad"));

    let (report, logs) = capture_logs(|| tif2gif::run(&workspace_config(&ws)).unwrap());

    assert_eq!(report.conversion.discovered, 4);
    assert_eq!(report.conversion.skipped(), 1);
    assert_eq!(report.composition.frames.completed(), 3);
    assert_eq!(logs.count(Level::ERROR), 1);
    assert!(ws.gif_path().is_file());
}

#[test]
fn test_empty_input_still_runs_composer() {
    let ws = TestWorkspace::new();

    let (report, logs) = capture_logs(|| tif2gif::run(&workspace_config(&ws)).unwrap());

    assert!(!report.produced_gif());
    assert!(ws.output_dir().is_dir());
    assert!(!ws.gif_path().exists());
    assert!(logs.contains(Level::INFO, "Starting GIF creation from PNG images"));
    assert!(logs.contains(Level::WARN, "No valid images found to create GIF"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let ws = TestWorkspace::new();
    let config = workspace_config(&ws).with_duration_ms(0);

    assert!(tif2gif::run(&config).is_err());
    assert!(!ws.output_dir().exists());
}

#[test]
fn test_unwritable_output_dir_is_fatal() {
    let ws = TestWorkspace::new();
    write_daily(&ws);
    let blocker = ws.root().join("blocker");
    std::fs::write(&blocker, b"file, not a directory").unwrap();

    let config = PipelineConfig::new(ws.input_dir(), blocker.join("png"), ws.gif_path());
    let err = tif2gif::run(&config).unwrap_err();

    assert!(format!("{err:#}").contains("TIF to PNG conversion failed"));
    assert!(!ws.gif_path().exists());
}
