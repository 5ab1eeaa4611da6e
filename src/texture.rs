//! Decoded images waiting for upload, keyed by URL.
//!
//! Loads run as browser tasks and finish in any order; the renderer drains
//! finished images once per frame. A URL that failed stays failed and its
//! surface keeps the flat material colour.

use image::GenericImageView;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode PNG or JPEG bytes into tightly packed RGBA8, shrinking images
/// whose longer side exceeds `max_dimension` while keeping their aspect.
pub fn decode(bytes: &[u8], max_dimension: u32) -> anyhow::Result<DecodedImage> {
    let mut decoded = image::load_from_memory(bytes)?;
    let (width, height) = decoded.dimensions();
    anyhow::ensure!(width > 0 && height > 0, "empty image");
    if width > max_dimension || height > max_dimension {
        decoded = decoded.resize(
            max_dimension,
            max_dimension,
            image::imageops::FilterType::Triangle,
        );
    }
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

#[derive(Debug)]
pub enum TextureSlot {
    Loading,
    Ready(DecodedImage),
    Uploaded,
    Failed,
}

#[derive(Debug, Default)]
pub struct TextureCache {
    slots: HashMap<String, TextureSlot>,
}

impl TextureCache {
    /// Returns true when `url` was not seen before and the caller should
    /// start loading it.
    pub fn begin(&mut self, url: &str) -> bool {
        if url.trim().is_empty() || self.slots.contains_key(url) {
            return false;
        }
        self.slots.insert(url.to_string(), TextureSlot::Loading);
        true
    }

    pub fn finish(&mut self, url: &str, result: anyhow::Result<DecodedImage>) {
        let slot = match result {
            Ok(image) => {
                log::info!("[texture] {} {}x{}", url, image.width, image.height);
                TextureSlot::Ready(image)
            }
            Err(e) => {
                log::warn!("[texture] {} failed: {:#}", url, e);
                TextureSlot::Failed
            }
        };
        self.slots.insert(url.to_string(), slot);
    }

    /// Hand over every image decoded since the last call.
    pub fn take_ready(&mut self) -> Vec<(String, DecodedImage)> {
        let mut ready = Vec::new();
        for (url, slot) in self.slots.iter_mut() {
            if matches!(slot, TextureSlot::Ready(_)) {
                if let TextureSlot::Ready(image) = std::mem::replace(slot, TextureSlot::Uploaded) {
                    ready.push((url.clone(), image));
                }
            }
        }
        ready
    }

    pub fn slot(&self, url: &str) -> Option<&TextureSlot> {
        self.slots.get(url)
    }

    pub fn pending(&self) -> usize {
        self.slots
            .values()
            .filter(|s| matches!(s, TextureSlot::Loading))
            .count()
    }
}
