use web_sys as web;

/// Pointer drag in CSS pixels, turned into per-move deltas for the orbit camera.
#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    last: Option<(f32, f32)>,
}

impl DragState {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.active = true;
        self.last = Some((x, y));
    }

    pub fn end(&mut self) {
        self.active = false;
        self.last = None;
    }

    pub fn moved(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.active {
            return None;
        }
        let delta = self.last.map(|(lx, ly)| (x - lx, y - ly));
        self.last = Some((x, y));
        delta
    }
}

#[inline]
pub fn pointer_client_px(ev: &web::PointerEvent) -> (f32, f32) {
    (ev.client_x() as f32, ev.client_y() as f32)
}

/// Normalise wheel deltas to line "notches"; positive zooms in.
#[inline]
pub fn wheel_notches(ev: &web::WheelEvent) -> f32 {
    let dy = ev.delta_y() as f32;
    match ev.delta_mode() {
        web::WheelEvent::DOM_DELTA_LINE => -dy,
        web::WheelEvent::DOM_DELTA_PAGE => -dy * 10.0,
        _ => -dy / 40.0,
    }
}
