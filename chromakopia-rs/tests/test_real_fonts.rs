//! Rendering with real glyphs: DejaVu Sans registered as all three segment faces.

use chromakopia_rs::{
    load_fonts, FontFiles, Frame, GeneratorConfig, GeneratorState, LoadedFonts, Renderer, Segment,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

fn fixture_font() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../chromakopia-canvas2d/tests/fonts/DejaVuSans.ttf")
}

fn config() -> GeneratorConfig {
    GeneratorConfig {
        recent_colors_path: None,
        load_system_fonts: false,
        fonts: FontFiles {
            first: Some(fixture_font()),
            middle: Some(fixture_font()),
            last: Some(fixture_font()),
        },
        ..GeneratorConfig::default()
    }
}

async fn fonts(config: &GeneratorConfig) -> LoadedFonts {
    load_fonts(&config.fonts, Duration::from_secs(10), false).await
}

/// Columns of a straight-alpha RGBA buffer that contain any ink.
fn ink_columns(rgba: &[u8], width: u32) -> Vec<bool> {
    let mut columns = vec![false; width as usize];
    for (i, pixel) in rgba.chunks_exact(4).enumerate() {
        if pixel[3] > 0 {
            columns[i % width as usize] = true;
        }
    }
    columns
}

fn ink_extent(columns: &[bool]) -> (usize, usize) {
    let first = columns.iter().position(|&c| c).unwrap();
    let last = columns.iter().rposition(|&c| c).unwrap();
    (first, last)
}

fn has_ink(columns: &[bool], from: f32, to: f32) -> bool {
    let from = from.max(0.0) as usize;
    let to = (to as usize).min(columns.len());
    columns[from..to].iter().any(|&c| c)
}

fn preview_rgba(renderer: &Renderer, frame: &Frame) -> Vec<u8> {
    let side = frame.surface.side;
    renderer.preview().get_image_data(0, 0, side, side)
}

#[tokio::test]
async fn test_segment_faces_registered_from_files() {
    let config = config();
    let fonts = fonts(&config).await;

    assert!(fonts.all_loaded(), "missing {:?}", fonts.missing);
    assert_eq!(fonts.resolved.face_count(), 3);
    for segment in Segment::ALL {
        assert!(fonts.resolved.has_family(segment.family()));
    }
    assert!(!fonts.resolved.has_family("DejaVu Sans"));
}

#[tokio::test]
async fn test_glyphs_painted_in_selected_color() {
    let config = config();
    let mut renderer = Renderer::new(&config, &fonts(&config).await).unwrap();
    let mut state = GeneratorState::new(&config);
    state.set_text("AB");

    let frame = renderer.render_preview(&state).unwrap();
    assert!(frame.metrics.first_width > 0.0);
    assert!(frame.metrics.last_width > 0.0);

    let rgba = preview_rgba(&renderer, &frame);
    let opaque: HashSet<(u8, u8, u8)> = rgba
        .chunks_exact(4)
        .filter(|pixel| pixel[3] == 255)
        .map(|pixel| (pixel[0], pixel[1], pixel[2]))
        .collect();
    assert_eq!(opaque, HashSet::from([(0x01, 0x82, 0x3f)]));
}

#[tokio::test]
async fn test_last_letter_follows_first_and_spacing() {
    let config = config();
    let mut renderer = Renderer::new(&config, &fonts(&config).await).unwrap();
    let mut state = GeneratorState::new(&config);
    state.set_text("AB");

    let frame = renderer.render_preview(&state).unwrap();
    let metrics = &frame.metrics;
    assert_eq!(metrics.spacing_offset, 62.0);
    assert_eq!(metrics.middle_width, 0.0);

    let columns = ink_columns(&preview_rgba(&renderer, &frame), frame.surface.side);
    let first_end = frame.surface.start_x + metrics.first_width;
    let last_origin = first_end + metrics.spacing_offset + metrics.middle_width;

    assert!(has_ink(&columns, frame.surface.start_x, first_end));
    assert!(!has_ink(&columns, first_end + 2.0, last_origin));
    assert!(has_ink(&columns, last_origin, last_origin + metrics.last_width));
}

#[tokio::test]
async fn test_single_letter_skips_last_segment() {
    let config = config();
    let mut renderer = Renderer::new(&config, &fonts(&config).await).unwrap();
    let mut state = GeneratorState::new(&config);
    state.set_text("a");

    let frame = renderer.render_preview(&state).unwrap();
    assert!(frame.metrics.last_width > 0.0);

    let columns = ink_columns(&preview_rgba(&renderer, &frame), frame.surface.side);
    let first_end = frame.surface.start_x + frame.metrics.first_width;
    assert!(has_ink(&columns, frame.surface.start_x, first_end));
    assert!(!has_ink(&columns, first_end + 2.0, frame.surface.side as f32));
}

#[tokio::test]
async fn test_export_ink_is_scaled_preview_ink() {
    let config = config();
    let mut renderer = Renderer::new(&config, &fonts(&config).await).unwrap();
    let mut state = GeneratorState::new(&config);
    state.set_font_size(60);

    let frame = renderer.render_preview(&state).unwrap();
    let (preview_left, preview_right) =
        ink_extent(&ink_columns(&preview_rgba(&renderer, &frame), frame.surface.side));

    let png_data = renderer.export_png(&state).unwrap();
    let decoder = png::Decoder::new(std::io::Cursor::new(png_data));
    let mut reader = decoder.read_info().unwrap();
    let mut rgba = vec![0; reader.output_buffer_size()];
    reader.next_frame(&mut rgba).unwrap();
    let export_side = reader.info().width;
    assert_eq!(export_side, frame.surface.side * 4);

    let (export_left, export_right) = ink_extent(&ink_columns(&rgba, export_side));
    assert!(export_left.abs_diff(preview_left * 4) <= 4, "{export_left} vs {preview_left}");
    assert!(
        (export_right + 1).abs_diff((preview_right + 1) * 4) <= 4,
        "{export_right} vs {preview_right}"
    );
}
