use std::f64::consts::PI;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::geometry::{ChartLayout, control_points};
use crate::domain::{
    chart::{ChartBackend, ChartInstance, LineChartConfig},
    errors::{AppError, AppResult},
    logging::LogComponent,
};
use crate::{log_debug, log_warn};

const GRID_COLOR: &str = "rgba(229, 231, 235, 0.5)";
const TICK_COLOR: &str = "#9ca3af";
const TOOLTIP_BACKGROUND: &str = "rgba(0, 0, 0, 0.8)";
const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 320;

/// Canvas 2D line chart backend - Infrastructure implementation
#[derive(Debug, Clone)]
pub struct CanvasChartBackend {
    height: u32,
}

impl Default for CanvasChartBackend {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT)
    }
}

impl CanvasChartBackend {
    pub fn new(height: u32) -> Self {
        Self { height }
    }

    /// Get canvas element and context
    fn get_canvas_context(&self, canvas_id: &str) -> AppResult<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AppError::Rendering("document not available".to_string()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| AppError::Rendering(format!("canvas '{canvas_id}' not found")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::Rendering(format!("'{canvas_id}' is not a canvas")))?;

        let width = match canvas.client_width() {
            w if w > 0 => w as u32,
            _ => DEFAULT_WIDTH,
        };
        canvas.set_width(width);
        canvas.set_height(self.height);

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| AppError::Rendering("2D context not available".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::Rendering("failed to cast to 2D context".to_string()))?;

        Ok((canvas, context))
    }
}

impl ChartBackend for CanvasChartBackend {
    type Instance = CanvasChart;

    fn create(&mut self, canvas_id: &str, config: &LineChartConfig) -> AppResult<CanvasChart> {
        let (canvas, context) = self.get_canvas_context(canvas_id)?;
        let layout = ChartLayout::new(canvas.width() as f64, canvas.height() as f64, config);
        let painter = Rc::new(Painter { context, config: config.clone(), layout });

        painter.draw(None)?;

        let hover_painter = Rc::clone(&painter);
        let hover_canvas = canvas.clone();
        let on_move = EventListener::new(&canvas, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let scale = match hover_canvas.client_width() {
                w if w > 0 => hover_canvas.width() as f64 / w as f64,
                _ => 1.0,
            };
            let index = hover_painter.layout.nearest_index(event.offset_x() as f64 * scale);
            if let Err(e) = hover_painter.draw(index) {
                log_warn!(LogComponent::Infrastructure("CanvasChart"), "hover redraw failed: {:?}", e);
            }
        });

        let leave_painter = Rc::clone(&painter);
        let on_leave = EventListener::new(&canvas, "mouseleave", move |_| {
            if let Err(e) = leave_painter.draw(None) {
                log_warn!(LogComponent::Infrastructure("CanvasChart"), "redraw failed: {:?}", e);
            }
        });

        log_debug!(
            LogComponent::Infrastructure("CanvasChart"),
            "created on '{}' ({}x{})",
            canvas_id,
            canvas.width(),
            canvas.height()
        );

        Ok(CanvasChart { canvas, painter, listeners: vec![on_move, on_leave] })
    }
}

/// A line chart drawn on one canvas, with hover tooltips.
pub struct CanvasChart {
    canvas: HtmlCanvasElement,
    painter: Rc<Painter>,
    listeners: Vec<EventListener>,
}

impl ChartInstance for CanvasChart {
    fn destroy(&mut self) {
        // Dropping the listeners detaches them from the canvas.
        self.listeners.clear();
        self.painter.clear();
        log_debug!(LogComponent::Infrastructure("CanvasChart"), "destroyed chart on '{}'", self.canvas.id());
    }
}

struct Painter {
    context: CanvasRenderingContext2d,
    config: LineChartConfig,
    layout: ChartLayout,
}

impl Painter {
    fn clear(&self) {
        self.context.clear_rect(0.0, 0.0, self.layout.width, self.layout.height);
    }

    fn draw(&self, hover: Option<usize>) -> Result<(), JsValue> {
        self.clear();
        self.draw_grid()?;
        self.draw_x_labels()?;
        self.draw_series();
        if let Some(index) = hover {
            self.draw_hover(index)?;
        }
        Ok(())
    }

    fn draw_grid(&self) -> Result<(), JsValue> {
        let ctx = &self.context;
        let layout = &self.layout;

        ctx.set_line_width(1.0);
        ctx.set_stroke_style(&JsValue::from(GRID_COLOR));
        ctx.set_fill_style(&JsValue::from(TICK_COLOR));
        ctx.set_font("12px sans-serif");
        ctx.set_text_align("right");

        for tick in layout.y_ticks() {
            let y = layout.y(tick);
            ctx.begin_path();
            ctx.move_to(layout.margins.left, y);
            ctx.line_to(layout.width - layout.margins.right, y);
            ctx.stroke();
            ctx.fill_text(&LineChartConfig::y_tick_label(tick), layout.margins.left - 8.0, y + 4.0)?;
        }
        Ok(())
    }

    fn draw_x_labels(&self) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.set_fill_style(&JsValue::from(TICK_COLOR));
        ctx.set_text_align("center");

        let baseline = self.layout.plot_bottom() + 20.0;
        for index in self.config.x_tick_indices() {
            if let Some(label) = self.config.labels.get(index) {
                ctx.fill_text(label, self.layout.x(index), baseline)?;
            }
        }
        Ok(())
    }

    fn trace_line(&self, points: &[(f64, f64)]) {
        let ctx = &self.context;
        let Some(first) = points.first() else {
            return;
        };
        ctx.move_to(first.0, first.1);
        for (i, (cp1, cp2)) in control_points(points, self.config.tension).into_iter().enumerate() {
            let to = points[i + 1];
            ctx.bezier_curve_to(cp1.0, cp1.1, cp2.0, cp2.1, to.0, to.1);
        }
    }

    fn draw_series(&self) {
        let ctx = &self.context;
        let points = self.layout.points(&self.config.values);
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return;
        };

        ctx.begin_path();
        self.trace_line(&points);
        ctx.line_to(last.0, self.layout.plot_bottom());
        ctx.line_to(first.0, self.layout.plot_bottom());
        ctx.close_path();
        ctx.set_fill_style(&JsValue::from(self.config.fill_color.as_str()));
        ctx.fill();

        ctx.begin_path();
        self.trace_line(&points);
        ctx.set_stroke_style(&JsValue::from(self.config.line_color.as_str()));
        ctx.set_line_width(self.config.border_width);
        ctx.stroke();
    }

    fn draw_hover(&self, index: usize) -> Result<(), JsValue> {
        let (Some(value), Some(label)) = (self.config.values.get(index), self.config.labels.get(index)) else {
            return Ok(());
        };
        let ctx = &self.context;
        let (x, y) = (self.layout.x(index), self.layout.y(*value));

        ctx.begin_path();
        ctx.arc(x, y, self.config.point_hover_radius, 0.0, 2.0 * PI)?;
        ctx.set_fill_style(&JsValue::from(self.config.line_color.as_str()));
        ctx.fill();

        let price = LineChartConfig::tooltip_label(*value);
        let box_width = 110.0;
        let box_height = 44.0;
        let box_x = (x + 12.0).min(self.layout.width - box_width - 4.0);
        let box_y = (y - box_height - 12.0).max(4.0);

        ctx.set_fill_style(&JsValue::from(TOOLTIP_BACKGROUND));
        ctx.fill_rect(box_x, box_y, box_width, box_height);
        ctx.set_stroke_style(&JsValue::from(self.config.line_color.as_str()));
        ctx.set_line_width(1.0);
        ctx.stroke_rect(box_x, box_y, box_width, box_height);

        ctx.set_text_align("left");
        ctx.set_fill_style(&JsValue::from("#ffffff"));
        ctx.set_font("bold 14px sans-serif");
        ctx.fill_text(label, box_x + 10.0, box_y + 18.0)?;
        ctx.set_font("13px sans-serif");
        ctx.fill_text(&price, box_x + 10.0, box_y + 36.0)?;
        Ok(())
    }
}
