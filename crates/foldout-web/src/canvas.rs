#![forbid(unsafe_code)]

//! Backing-store sizing for animation canvases.
//!
//! The animation library draws into whatever pixel buffer the canvas has;
//! for sharp output on high-DPI displays the buffer must be the CSS size
//! scaled by the device pixel ratio. Playback itself belongs to the external
//! library; this module only keeps the buffer sized, initially and on
//! resize.

/// Pixel buffer size for a canvas displayed at `css_width` x `css_height`.
///
/// Non-finite or non-positive ratios fall back to 1.0; dimensions round to
/// the nearest pixel and never collapse below 1.
#[must_use]
pub fn backing_size(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let scale = |css: f64| -> u32 {
        if !css.is_finite() || css <= 0.0 {
            return 1;
        }
        let px = (css * dpr).round();
        if px < 1.0 { 1 } else { px as u32 }
    };
    (scale(css_width), scale(css_height))
}

#[cfg(target_arch = "wasm32")]
mod apply {
    use tracing::debug;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use web_sys::{Document, HtmlCanvasElement, Window};

    use super::backing_size;
    use crate::classes::CANVAS_ATTR;

    /// Size one canvas's pixel buffer from its CSS box and the current DPR.
    pub fn rescale(window: &Window, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        let rect = canvas.get_bounding_client_rect();
        let (width, height) = backing_size(rect.width(), rect.height(), window.device_pixel_ratio());
        canvas.set_width(width);
        canvas.set_height(height);
        let style = canvas.style();
        style.set_property("width", &format!("{}px", rect.width()))?;
        style.set_property("height", &format!("{}px", rect.height()))?;
        Ok(())
    }

    /// Rescale every marked animation canvas on the page.
    pub fn rescale_all(window: &Window, document: &Document) -> Result<(), JsValue> {
        let canvases = document.query_selector_all(&format!("canvas[{CANVAS_ATTR}]"))?;
        if canvases.length() == 0 {
            debug!("no animation canvases on this page");
        }
        for i in 0..canvases.length() {
            let Some(node) = canvases.item(i) else {
                continue;
            };
            let Ok(canvas) = node.dyn_into::<HtmlCanvasElement>() else {
                continue;
            };
            rescale(window, &canvas)?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use apply::{rescale, rescale_all};

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn scales_by_device_pixel_ratio() {
        assert_eq!(backing_size(100.0, 50.0, 2.0), (200, 100));
        assert_eq!(backing_size(100.0, 50.0, 1.0), (100, 50));
        assert_eq!(backing_size(33.3, 33.3, 1.5), (50, 50));
    }

    #[test]
    fn degenerate_inputs_fall_back() {
        assert_eq!(backing_size(100.0, 100.0, 0.0), (100, 100));
        assert_eq!(backing_size(100.0, 100.0, f64::NAN), (100, 100));
        assert_eq!(backing_size(0.0, -5.0, 2.0), (1, 1));
        assert_eq!(backing_size(f64::INFINITY, 10.0, 2.0), (1, 20));
    }

    proptest! {
        #[test]
        fn buffer_is_never_empty(
            w in -1000.0f64..4000.0,
            h in -1000.0f64..4000.0,
            dpr in -1.0f64..4.0,
        ) {
            let (bw, bh) = backing_size(w, h, dpr);
            prop_assert!(bw >= 1);
            prop_assert!(bh >= 1);
        }
    }
}
