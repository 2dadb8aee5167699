// Browser side of the drawing seam: a 2D canvas context as a `Surface`, and
// an off-screen canvas holding the baked heart as its `Sprite`.

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

use crate::heart::Bitmap;
use crate::surface::{Sprite, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasSurface, JsValue> {
        let context = context_2d(&canvas)?;
        Ok(CanvasSurface { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlCanvasElement;
    type Error = JsValue;

    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear(&mut self) {
        self.context
            .clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn draw_image(
        &mut self,
        image: &HtmlCanvasElement,
        alpha: f64,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<(), JsValue> {
        self.context.set_global_alpha(alpha);
        self.context
            .draw_image_with_html_canvas_element_and_dw_and_dh(image, x, y, w, h)
    }
}

impl Sprite for HtmlCanvasElement {
    fn width(&self) -> f64 {
        HtmlCanvasElement::width(self) as f64
    }

    fn height(&self) -> f64 {
        HtmlCanvasElement::height(self) as f64
    }
}

/// Matches the canvas' pixel size to the size it is laid out at. Leaves the
/// canvas alone while it has no layout (e.g. `display: none`).
pub fn fit_to_container(canvas: &HtmlCanvasElement) {
    let width = canvas.client_width();
    let height = canvas.client_height();
    if width > 0 && height > 0 {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
    }
}

/// Copies `bitmap` into a fresh off-screen canvas of the same size.
pub fn bitmap_to_canvas(document: &Document, bitmap: &Bitmap) -> Result<HtmlCanvasElement, JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(bitmap.pixel_width());
    canvas.set_height(bitmap.pixel_height());

    let pixel_image_data = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(bitmap.pixel_data()),
        bitmap.pixel_width(),
        bitmap.pixel_height(),
    )?;
    context_2d(&canvas)?.put_image_data(&pixel_image_data, 0.0, 0.0)?;
    Ok(canvas)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}
