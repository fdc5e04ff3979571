use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, Document, HtmlElement, Url};

use scramble_core::{Board, Region};

use crate::state::State;

/// Render the current board into an RGBA pixmap and trigger a PNG download.
/// Encoding is deterministic: the same board state produces identical bytes.
pub fn export_png_snapshot(state: &State) -> Result<(), JsValue> {
    let Some(board) = state.board.as_ref() else {
        return Ok(());
    };
    let pixmap = render_board(board, state.canvas.width(), state.canvas.height())
        .ok_or_else(|| JsValue::from_str("pixmap alloc failed"))?;
    let bytes = encode_png_deterministic(&pixmap)
        .map_err(|e| JsValue::from_str(&format!("encode: {e}")))?;
    download_bytes(&state.document, "map_scramble.png", &bytes)
}

fn region_path(region: &Region, offset: (f64, f64)) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for ring in region.rings() {
        let mut points = ring.iter();
        let first = points.next()?;
        pb.move_to((first.x + offset.0) as f32, (first.y + offset.1) as f32);
        for p in points {
            pb.line_to((p.x + offset.0) as f32, (p.y + offset.1) as f32);
        }
        pb.close();
    }
    pb.finish()
}

fn paint_for(color: (u8, u8, u8)) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.anti_alias = true;
    paint.set_color_rgba8(color.0, color.1, color.2, 255);
    paint
}

fn render_board(board: &Board, w: u32, h: u32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(w.max(1), h.max(1))?;
    pixmap.fill(Color::WHITE);

    let thin = Stroke {
        width: 1.2,
        ..Stroke::default()
    };

    // base map at the true positions
    for region in &board.regions {
        if let Some(path) = region_path(region, (0.0, 0.0)) {
            pixmap.fill_path(
                &path,
                &paint_for((240, 240, 240)),
                FillRule::EvenOdd,
                Transform::identity(),
                None,
            );
            pixmap.stroke_path(
                &path,
                &paint_for((187, 187, 187)),
                &thin,
                Transform::identity(),
                None,
            );
        }
    }

    // frame chrome
    let f = &board.frame;
    if let Some(rect) = Rect::from_xywh(
        f.margin as f32,
        f.margin as f32,
        f.width as f32,
        f.height as f32,
    ) {
        let path = PathBuilder::from_rect(rect);
        pixmap.stroke_path(
            &path,
            &paint_for((0, 0, 0)),
            &Stroke {
                width: 4.0,
                ..Stroke::default()
            },
            Transform::identity(),
            None,
        );
    }

    // pieces wherever they currently sit
    for region in &board.regions {
        if let Some(path) = region_path(region, region.offset()) {
            let (fill, outline) = if region.placed {
                ((67, 160, 71), (255, 255, 255))
            } else {
                ((204, 204, 204), (51, 51, 51))
            };
            pixmap.fill_path(
                &path,
                &paint_for(fill),
                FillRule::EvenOdd,
                Transform::identity(),
                None,
            );
            pixmap.stroke_path(
                &path,
                &paint_for(outline),
                &thin,
                Transform::identity(),
                None,
            );
        }
    }

    Some(pixmap)
}

// Fixed filter and compression keep the byte stream reproducible.
fn encode_png_deterministic(pixmap: &Pixmap) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    let mut enc = Encoder::new(&mut buf, pixmap.width(), pixmap.height());
    enc.set_color(ColorType::Rgba);
    enc.set_depth(BitDepth::Eight);
    enc.set_filter(FilterType::NoFilter);
    enc.set_compression(Compression::Default);
    {
        let mut writer = enc.write_header()?;
        writer.write_image_data(pixmap.data())?;
    }
    Ok(buf)
}

fn download_bytes(document: &Document, filename: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let array = js_sys::Array::new();
    let u8 = js_sys::Uint8Array::from(bytes);
    array.push(&u8);
    let blob = Blob::new_with_u8_array_sequence(&array)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let a = document.create_element("a")?.dyn_into::<HtmlElement>()?;
    a.set_attribute("href", &url)?;
    a.set_attribute("download", filename)?;
    a.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}
