use glam::Vec2;
use globe_core::Viewport;
use web_sys as web;

/// What the current pointer gesture is driving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragTarget {
    /// Press landed on a pin; still a candidate tap.
    Pin,
    Camera,
    Sphere,
}

#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub target: Option<DragTarget>,
    pub pointer_id: i32,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, target: DragTarget, pointer_id: i32, position: Vec2) {
        self.target = Some(target);
        self.pointer_id = pointer_id;
        self.last = position;
    }

    /// Movement since the previous sample; updates the stored position.
    pub fn advance(&mut self, position: Vec2) -> Vec2 {
        let delta = position - self.last;
        self.last = position;
        delta
    }

    pub fn end(&mut self) -> Option<DragTarget> {
        self.target.take()
    }
}

/// WheelEvent deltas come in pixels, lines or pages depending on `deltaMode`.
#[inline]
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32, page_height_px: f32) -> f32 {
    let d = delta_y as f32;
    match delta_mode {
        1 => d * crate::constants::WHEEL_LINE_HEIGHT_PX,
        2 => d * page_height_px,
        _ => d,
    }
}

#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width().max(1.0) as f32;
    let h = rect.height().max(1.0) as f32;
    Vec2::new(
        x_css / w * canvas.width() as f32,
        y_css / h * canvas.height() as f32,
    )
}

#[inline]
pub fn canvas_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    Viewport::new(canvas.width() as f32, canvas.height() as f32)
}
