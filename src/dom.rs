use crate::constants::*;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn body_data(document: &web::Document, key: &str) -> Option<String> {
    document
        .body()
        .and_then(|body| body.dataset().get(key))
        .filter(|v| !v.trim().is_empty())
}

/// Config location from `<body data-my-globe-config="...">`.
pub fn config_path(document: &web::Document) -> String {
    body_data(document, CONFIG_DATASET_KEY).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

pub fn control_mode(document: &web::Document) -> crate::orbit::ControlMode {
    body_data(document, CONTROLS_DATASET_KEY)
        .and_then(|v| crate::orbit::ControlMode::parse(&v))
        .unwrap_or_default()
}

pub fn set_primary_color(document: &web::Document, color: &str) {
    let Some(root) = document
        .document_element()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    else {
        return;
    };
    if let Err(e) = root.style().set_property(PRIMARY_COLOR_PROPERTY, color) {
        log::warn!("[config] cannot set {}: {:?}", PRIMARY_COLOR_PROPERTY, e);
    }
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", id, e))
}

async fn fetch_ok(path: &str) -> anyhow::Result<web::Response> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let response: web::Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {} failed: {:?}", path, e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !response.ok() {
        anyhow::bail!("fetch {} returned HTTP {}", path, response.status());
    }
    Ok(response)
}

pub async fn fetch_text(path: &str) -> anyhow::Result<String> {
    let response = fetch_ok(path).await?;
    let text = response.text().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    JsFuture::from(text)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("{} is not text", path))
}

pub async fn fetch_bytes(path: &str) -> anyhow::Result<Vec<u8>> {
    let response = fetch_ok(path).await?;
    let buffer = response
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| anyhow::anyhow!("reading {} failed: {:?}", path, e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Resolve after `duration` via `setTimeout`, yielding to the browser.
pub async fn sleep(duration: Duration) {
    let ms = duration.as_millis().min(i32::MAX as u128) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web::window()
            .map(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                    .is_ok()
            })
            .unwrap_or(false);
        if !scheduled {
            _ = resolve.call0(&JsValue::NULL);
        }
    });
    _ = JsFuture::from(promise).await;
}

/// Notify the page that a pin was tapped; `detail` is the pin index.
pub fn dispatch_pin_selected(target: &web::EventTarget, index: usize) {
    let init = web::CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&JsValue::from(index as u32));
    match web::CustomEvent::new_with_event_init_dict(PIN_SELECTED_EVENT, &init) {
        Ok(event) => {
            _ = target.dispatch_event(&event);
        }
        Err(e) => log::error!("[pick] cannot create {} event: {:?}", PIN_SELECTED_EVENT, e),
    }
}
