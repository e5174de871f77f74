//! WASM bindings for in-browser previews of the enhancement pass.

use wasm_bindgen::prelude::*;

use crate::{EnhanceConfig, enhance_html};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Enhance HTML markup with the default configuration.
///
/// Returns the enhanced document serialized back to HTML.
#[wasm_bindgen]
pub fn enhance_markup(html: &str) -> Result<String, JsValue> {
    let (_, markup) =
        enhance_html(html, EnhanceConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(markup)
}

/// Describe what the enhancement pass would wire for `html`.
#[wasm_bindgen]
pub fn enhancement_summary(html: &str) -> Result<String, JsValue> {
    let (report, _) =
        enhance_html(html, EnhanceConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(match report {
        Some(report) => report.to_string(),
        None => "No content root; nothing enhanced".to_string(),
    })
}
