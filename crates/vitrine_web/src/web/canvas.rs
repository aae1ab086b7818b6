use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use vitrine::matrix::MatrixFrame;

pub(super) fn context_2d(
    canvas: &web_sys::HtmlCanvasElement,
) -> Result<web_sys::CanvasRenderingContext2d, String> {
    canvas
        .get_context("2d")
        .map_err(|_| "canvas: get_context threw".to_string())?
        .ok_or("canvas: missing 2d context".to_string())?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| "canvas: context is not 2d".to_string())
}

/// Matches the drawing buffer to the element's layout size.
pub(super) fn fit(canvas: &web_sys::HtmlCanvasElement) -> (u32, u32) {
    let w = canvas.offset_width().max(0) as u32;
    let h = canvas.offset_height().max(0) as u32;
    canvas.set_width(w);
    canvas.set_height(h);
    (w, h)
}

#[allow(deprecated)]
pub(super) fn draw_matrix(
    canvas: &web_sys::HtmlCanvasElement,
    frame: &MatrixFrame,
) -> Result<(), String> {
    let ctx = context_2d(canvas)?;

    // Veil over the previous frame leaves the fading trails.
    ctx.set_fill_style(&JsValue::from_str(&frame.fade));
    ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);

    ctx.set_fill_style(&JsValue::from_str(&frame.color));
    ctx.set_font(&frame.font);

    let mut buf = [0u8; 4];
    for g in &frame.glyphs {
        ctx.fill_text(g.ch.encode_utf8(&mut buf), g.x, g.y)
            .map_err(|_| "canvas: fill_text threw".to_string())?;
    }
    Ok(())
}
