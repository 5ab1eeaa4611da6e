#![cfg(target_arch = "wasm32")]
use globe_core::constants::CAMERA_START_DISTANCE;
use globe_core::{Globe, GlobeConfig, GlobeSettings, PinSpec, SceneGraph, SequentialPlacement};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod geometry;
mod input;
mod orbit;
mod render;
mod texture;

use constants::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("planet-keeper starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let path = dom::config_path(&document);
    let text = dom::fetch_text(&path).await?;
    let config = GlobeConfig::from_json(&text)?;
    if let Some(color) = &config.primary_color {
        dom::set_primary_color(&document, color);
    }

    let canvas = dom::canvas_by_id(&document, &config.canvas_container_id)?;
    dom::wire_canvas_resize(&canvas);

    let textures = Rc::new(RefCell::new(texture::TextureCache::default()));
    request_texture(&textures, &config.texture);

    let settings = GlobeSettings::default();
    let interval = settings.placement_interval;
    let globe = Rc::new(RefCell::new(Globe::new(
        &config,
        settings,
        SceneGraph::default(),
    )?));
    let orbit = Rc::new(RefCell::new(orbit::OrbitCamera::new(
        CAMERA_START_DISTANCE,
        ORBIT_MIN_DISTANCE,
        ORBIT_MAX_DISTANCE,
    )));
    let mode = dom::control_mode(&document);
    log::info!("[config] controls={:?} pins={}", mode, config.images.len());

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        globe: globe.clone(),
        orbit: orbit.clone(),
        drag: Rc::new(RefCell::new(input::DragState::default())),
        mode,
    });

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        globe: globe.clone(),
        orbit,
        canvas: canvas.clone(),
        textures: textures.clone(),
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    spawn_local(place_pins(globe, canvas, textures, config.images, interval));
    Ok(())
}

/// Fetch and decode `url` in the background unless it is already known.
/// Failures are logged by the cache and leave the surface untextured.
fn request_texture(textures: &Rc<RefCell<texture::TextureCache>>, url: &str) {
    if !textures.borrow_mut().begin(url) {
        return;
    }
    let textures = textures.clone();
    let url = url.to_string();
    spawn_local(async move {
        let result = match dom::fetch_bytes(&url).await {
            Ok(bytes) => texture::decode(&bytes, MAX_TEXTURE_DIMENSION),
            Err(e) => Err(e),
        };
        textures.borrow_mut().finish(&url, result);
    });
}

async fn place_pins(
    globe: Rc<RefCell<Globe>>,
    canvas: web::HtmlCanvasElement,
    textures: Rc<RefCell<texture::TextureCache>>,
    images: Vec<PinSpec>,
    interval: std::time::Duration,
) {
    let target = globe.clone();
    let loads = textures.clone();
    let summary = SequentialPlacement::new(interval)
        .place_all(
            images,
            move |index, spec| {
                let canvas = canvas.clone();
                let on_select = move || dom::dispatch_pin_selected(&canvas, index);
                let url = spec.url.clone();
                target.borrow_mut().add_pin(spec, on_select)?;
                request_texture(&loads, &url);
                Ok(())
            },
            dom::sleep,
        )
        .await;

    let mut globe = globe.borrow_mut();
    for (count, radius, seed) in STAR_SHELLS {
        globe.add_stars(count, radius, seed);
    }
    globe.enable_auto_rotation();
    log::info!(
        "[place] showcase ready: {} pins, {} rejected, {} images still loading",
        summary.placed,
        summary.rejected,
        textures.borrow().pending()
    );
}
