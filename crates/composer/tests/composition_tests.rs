//! Directory-level GIF composition tests.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use composer::{ComposeError, Composer, LabelFont};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Frame, Rgb, RgbImage};
use test_utils::{capture_logs, names, write_png, write_solid_png, TestWorkspace};
use tracing::Level;

// ============================================================================
// Helper functions
// ============================================================================

fn bitmap_composer() -> Composer {
    Composer::new(LabelFont::Bitmap, 300, true)
}

fn decode_frames(path: &Path) -> Vec<Frame> {
    let reader = BufReader::new(File::open(path).unwrap());
    GifDecoder::new(reader)
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

/// Number of white pixels along the middle row of the progress bar.
fn bar_fill(frame: &Frame, image_height: u32) -> usize {
    let buffer = frame.buffer();
    let y = image_height + 10 + 10;
    (0..buffer.width())
        .filter(|&x| buffer.get_pixel(x, y).0[..3].iter().all(|&c| c > 200))
        .count()
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_frames_follow_path_order() {
    let ws = TestWorkspace::new();
    let dir = ws.output_dir();
    // Written out of order; distinct colors identify each frame.
    write_solid_png(&dir.join("20230103.png"), 80, 40, [0, 0, 255]);
    write_solid_png(&dir.join("20230101.png"), 80, 40, [255, 0, 0]);
    write_solid_png(&dir.join("20230102.png"), 80, 40, [0, 255, 0]);

    let report = bitmap_composer().compose_directory(&dir, &ws.gif_path()).unwrap();

    assert_eq!(report.gif.as_deref(), Some(ws.gif_path().as_path()));
    let labels: Vec<&str> = report.frames.outputs().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, names::DAILY);

    let frames = decode_frames(&ws.gif_path());
    assert_eq!(frames.len(), 3);
    let corner = |i: usize| frames[i].buffer().get_pixel(79, 39).0;
    assert_eq!(corner(0), [255, 0, 0, 255]);
    assert_eq!(corner(1), [0, 255, 0, 255]);
    assert_eq!(corner(2), [0, 0, 255, 255]);

    for frame in &frames {
        assert_eq!(frame.buffer().dimensions(), (80, 80));
        assert_eq!(frame.delay().numer_denom_ms(), (300, 1));
    }
}

#[test]
fn test_progress_bar_grows_to_full_track() {
    let ws = TestWorkspace::new();
    let dir = ws.output_dir();
    for name in ["a", "b", "c", "d"] {
        write_solid_png(&dir.join(format!("{name}.png")), 120, 30, [0, 0, 0]);
    }

    let report = bitmap_composer().compose_directory(&dir, &ws.gif_path()).unwrap();

    let fills: Vec<u32> = report.frames.outputs().map(|f| f.fill_width).collect();
    assert_eq!(fills, vec![25, 50, 75, 100]);

    let drawn: Vec<usize> = decode_frames(&ws.gif_path())
        .iter()
        .map(|frame| bar_fill(frame, 30))
        .collect();
    assert_eq!(drawn, vec![25, 50, 75, 100]);
}

#[test]
fn test_undecodable_png_is_skipped() {
    let ws = TestWorkspace::new();
    let dir = ws.output_dir();
    write_solid_png(&dir.join("20230101.png"), 60, 20, [40, 40, 40]);
    std::fs::write(dir.join("20230102.png"), b"garbage").unwrap();
    write_solid_png(&dir.join("20230103.png"), 60, 20, [80, 80, 80]);

    let (report, logs) = capture_logs(|| bitmap_composer().compose_directory(&dir, &ws.gif_path()).unwrap());

    assert_eq!(report.frames.discovered, 3);
    assert_eq!(report.frames.completed(), 2);
    let (source, reason) = report.frames.skip_reasons().next().unwrap();
    assert!(source.ends_with("20230102.png"));
    assert!(matches!(reason, ComposeError::Decode { .. }));

    assert_eq!(logs.count(Level::ERROR), 1);
    assert!(logs.contains(Level::INFO, "Successfully created GIF"));

    // The skipped file still counts toward the progress total.
    let fills: Vec<u32> = report.frames.outputs().map(|f| f.fill_width).collect();
    assert_eq!(fills, vec![40 / 3, 40]);
    assert_eq!(decode_frames(&ws.gif_path()).len(), 2);
}

#[test]
fn test_mixed_sizes_are_cropped_to_first_frame() {
    let ws = TestWorkspace::new();
    let dir = ws.output_dir();
    write_png(&dir.join("1.png"), &RgbImage::from_pixel(50, 20, Rgb([9, 9, 9])));
    write_png(&dir.join("2.png"), &RgbImage::from_pixel(70, 30, Rgb([9, 9, 9])));

    let report = bitmap_composer().compose_directory(&dir, &ws.gif_path()).unwrap();

    // Each overlay is laid out for its own image...
    let fills: Vec<u32> = report.frames.outputs().map(|f| f.fill_width).collect();
    assert_eq!(fills, vec![15, 50]);

    // ...but the GIF screen is sized by the first frame, so later, larger
    // frames are cut down to 50 x 60.
    let frames = decode_frames(&ws.gif_path());
    assert_eq!(frames.len(), 2);
    for frame in &frames {
        assert_eq!(frame.buffer().dimensions(), (50, 60));
    }
    assert_eq!(bar_fill(&frames[0], 20), 15);
}

#[test]
fn test_empty_directory_writes_no_gif() {
    let ws = TestWorkspace::new();
    std::fs::create_dir_all(ws.output_dir()).unwrap();

    let (report, logs) =
        capture_logs(|| bitmap_composer().compose_directory(&ws.output_dir(), &ws.gif_path()).unwrap());

    assert!(report.gif.is_none());
    assert_eq!(report.frames.discovered, 0);
    assert!(!ws.gif_path().exists());
    assert!(logs.contains(Level::WARN, "No valid images found to create GIF"));
    assert!(logs.contains(Level::INFO, "Found 0 PNG files for GIF creation"));
}

#[test]
fn test_all_frames_failing_writes_no_gif() {
    let ws = TestWorkspace::new();
    let dir = ws.output_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("x.png"), b"nope").unwrap();

    let (report, logs) = capture_logs(|| bitmap_composer().compose_directory(&dir, &ws.gif_path()).unwrap());

    assert!(report.gif.is_none());
    assert_eq!(report.frames.skipped(), 1);
    assert_eq!(logs.count(Level::WARN), 1);
    assert!(!ws.gif_path().exists());
}
