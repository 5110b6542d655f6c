use super::controller::{DragTarget, OrbitController};
use super::frame::{Primitive, derive_frame};
use super::projection::{VIEWPORT_SIZE, ViewConfig};
use super::state::CameraParams;
use egui::{
    Align2, Color32, CornerRadius, CursorIcon, FontId, PointerButton, Pos2, Rect, Response, Sense,
    Shape, Stroke, TextureId, Ui, Vec2, Widget, pos2,
};

/// Wheel units per scroll notch. egui reports one notch as
/// `line_scroll_speed` points.
const WHEEL_NOTCH: f32 = 100.0;

/// Interactive orbit-camera picker.
///
/// Without an `on_update` callback the widget is a passive viewer: drags
/// never start and the wheel does nothing.
pub struct CameraControl<'a> {
    controller: &'a mut OrbitController,
    params: CameraParams,
    on_update: Option<Box<dyn FnMut(CameraParams) + 'a>>,
    image: Option<TextureId>,
    view: ViewConfig,
    show_grid: bool,
}

impl<'a> CameraControl<'a> {
    pub fn new(controller: &'a mut OrbitController, params: CameraParams) -> Self {
        Self {
            controller,
            params,
            on_update: None,
            image: None,
            view: ViewConfig::default(),
            show_grid: true,
        }
    }

    pub fn on_update(mut self, callback: impl FnMut(CameraParams) + 'a) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn image(mut self, image: Option<TextureId>) -> Self {
        self.image = image;
        self
    }

    pub fn view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    pub fn show_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    /// Hand a full snapshot to the owner. Returns whether anything moved.
    fn publish(&mut self, params: CameraParams) -> bool {
        let changed = params != self.params;
        self.params = params;
        if let Some(callback) = self.on_update.as_mut() {
            callback(params);
        }
        changed
    }

    /// Route this frame's pointer input through the controller.
    fn handle_input(&mut self, ui: &Ui, rect: Rect, response: &Response) -> bool {
        let editable = self.on_update.is_some();
        let to_local = |p: Pos2| pos2(p.x - rect.min.x, p.y - rect.min.y);
        let (primary_pressed, secondary_pressed, released, latest, scroll) = ui.input(|i| {
            (
                i.pointer.button_pressed(PointerButton::Primary),
                i.pointer.button_pressed(PointerButton::Secondary),
                i.pointer.any_released(),
                i.pointer.latest_pos(),
                i.raw_scroll_delta.y,
            )
        });

        let line_scroll_speed = ui
            .ctx()
            .options(|o| o.input_options.line_scroll_speed)
            .max(1.0);

        let mut changed = false;

        if response.hovered() && (primary_pressed || secondary_pressed) {
            if let Some(pos) = latest {
                let local = to_local(pos);
                let target = if secondary_pressed {
                    DragTarget::Zoom
                } else {
                    derive_frame(&self.params, &self.view, self.controller.drag()).hit_test(local)
                };
                self.controller.on_pointer_down(target, local, editable);
            }
        }

        if self.controller.is_dragging() {
            match latest {
                Some(pos) if rect.contains(pos) => {
                    if let Some(updated) = self.controller.on_pointer_move(to_local(pos), self.params) {
                        changed |= self.publish(updated);
                    }
                }
                _ => self.controller.on_pointer_leave(),
            }
        }

        if released {
            self.controller.on_pointer_up();
        }

        if editable && response.hovered() && scroll != 0.0 {
            let notches = -scroll / line_scroll_speed;
            let updated = self.controller.on_wheel(notches * WHEEL_NOTCH, self.params);
            changed |= self.publish(updated);
        }

        changed
    }

    fn paint(&self, ui: &Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        let offset = rect.min.to_vec2();
        let visuals = ui.visuals();

        painter.rect_filled(rect, CornerRadius::same(8), visuals.extreme_bg_color);

        let frame = derive_frame(&self.params, &self.view, self.controller.drag());
        for primitive in frame.primitives(self.show_grid) {
            match primitive {
                Primitive::Segment {
                    points,
                    stroke,
                    dashed,
                } => {
                    let points = [points[0] + offset, points[1] + offset];
                    if dashed {
                        painter.extend(Shape::dashed_line(&points, stroke, 4.0, 3.0));
                    } else {
                        painter.line_segment(points, stroke);
                    }
                }
                Primitive::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => {
                    painter.circle(center + offset, radius, fill, stroke);
                }
                Primitive::Polygon {
                    points,
                    fill,
                    stroke,
                } => {
                    let points = points.into_iter().map(|p| p + offset).collect();
                    painter.add(Shape::convex_polygon(points, fill, stroke));
                }
                Primitive::Subject { rect: local } => {
                    self.paint_subject(&painter, local.translate(offset));
                }
            }
        }

        painter.text(
            rect.left_bottom() + Vec2::new(8.0, -8.0),
            Align2::LEFT_BOTTOM,
            format!(
                "az {:.0}°  el {:.0}°  d {:.2}",
                self.params.azimuth, self.params.elevation, self.params.distance
            ),
            FontId::monospace(11.0),
            visuals.weak_text_color(),
        );
    }

    fn paint_subject(&self, painter: &egui::Painter, rect: Rect) {
        let border = Stroke::new(1.5, Color32::from_gray(180));
        match self.image {
            Some(texture) => {
                let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                painter.image(texture, rect, uv, Color32::WHITE);
                painter.rect_stroke(rect, CornerRadius::same(3), border, egui::StrokeKind::Outside);
            }
            None => {
                painter.rect_filled(rect, CornerRadius::same(3), Color32::from_gray(55));
                painter.rect_stroke(rect, CornerRadius::same(3), border, egui::StrokeKind::Outside);
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "no photo",
                    FontId::proportional(10.0),
                    Color32::from_gray(170),
                );
            }
        }
    }

    fn update_cursor(&self, ui: &Ui, rect: Rect, response: &Response) {
        if self.on_update.is_none() {
            return;
        }
        if self.controller.is_dragging() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if let Some(pos) = response.hover_pos() {
            let local = pos2(pos.x - rect.min.x, pos.y - rect.min.y);
            let frame = derive_frame(&self.params, &self.view, DragTarget::None);
            if frame.hit_test(local) != DragTarget::Orbit {
                ui.ctx().set_cursor_icon(CursorIcon::Grab);
            }
        }
    }
}

impl Widget for CameraControl<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let (rect, mut response) =
            ui.allocate_exact_size(Vec2::splat(VIEWPORT_SIZE), Sense::click_and_drag());

        if self.handle_input(ui, rect, &response) {
            response.mark_changed();
        }
        if ui.is_rect_visible(rect) {
            self.paint(ui, rect);
        }
        self.update_cursor(ui, rect, &response);

        response
    }
}
