//! Minimal canvas host.
//!
//! Draws the live elements of the loaded scene and lets the user drag out
//! rectangles. Every load is echoed back as a programmatic scene change and
//! every finished drag as a user edit, so the shell sees the same event
//! stream a full drawing engine would produce.

use std::cell::RefCell;
use std::rc::Rc;

use fltk::{
    app::{self, Sender},
    draw,
    enums::{Align, Color, Event, Font, LineStyle},
    prelude::*,
    widget::Widget,
};
use serde_json::Value;

use crate::app::domain::document::{SceneChange, SceneOrigin, TabId};
use crate::app::domain::messages::Message;
use crate::app::domain::scene::{Scene, rectangle_element};
use crate::ui::theme;

/// Drags smaller than this on either axis are treated as clicks.
const MIN_DRAG: i32 = 4;
const ARROW_HEAD: f64 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle { x: f64, y: f64, w: f64, h: f64 },
    Ellipse { x: f64, y: f64, w: f64, h: f64 },
    Diamond { x: f64, y: f64, w: f64, h: f64 },
    Polyline { points: Vec<(f64, f64)>, arrow: bool },
    Text { x: f64, y: f64, text: String, size: i32 },
}

/// Geometry of an element in canvas coordinates, if it is a kind we draw.
pub fn shape_of(element: &Value) -> Option<Shape> {
    let num = |key: &str| element.get(key).and_then(Value::as_f64);
    let x = num("x")?;
    let y = num("y")?;
    let (bx, by, w, h) = normalize(x, y, num("width").unwrap_or(0.0), num("height").unwrap_or(0.0));

    match element.get("type").and_then(Value::as_str)? {
        "rectangle" => Some(Shape::Rectangle { x: bx, y: by, w, h }),
        "ellipse" => Some(Shape::Ellipse { x: bx, y: by, w, h }),
        "diamond" => Some(Shape::Diamond { x: bx, y: by, w, h }),
        kind @ ("line" | "arrow" | "freedraw") => {
            let points: Vec<(f64, f64)> = element
                .get("points")?
                .as_array()?
                .iter()
                .filter_map(|p| {
                    let p = p.as_array()?;
                    Some((x + p.first()?.as_f64()?, y + p.get(1)?.as_f64()?))
                })
                .collect();
            if points.len() < 2 {
                return None;
            }
            Some(Shape::Polyline { points, arrow: kind == "arrow" })
        }
        "text" => Some(Shape::Text {
            x,
            y,
            text: element.get("text").and_then(Value::as_str)?.to_string(),
            size: num("fontSize").unwrap_or(20.0).round() as i32,
        }),
        _ => None,
    }
}

fn normalize(x: f64, y: f64, w: f64, h: f64) -> (f64, f64, f64, f64) {
    let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
    let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
    (x, y, w, h)
}

fn stroke_of(element: &Value) -> Color {
    element
        .get("strokeColor")
        .and_then(Value::as_str)
        .map(|hex| theme::parse_hex(hex, theme::ink()))
        .unwrap_or_else(theme::ink)
}

struct CanvasState {
    tab_id: Option<TabId>,
    scene: Scene,
    drag: Option<((i32, i32), (i32, i32))>,
    sender: Sender<Message>,
}

pub struct CanvasHost {
    pub widget: Widget,
    state: Rc<RefCell<CanvasState>>,
}

impl CanvasHost {
    pub fn new(sender: Sender<Message>) -> Self {
        let state = Rc::new(RefCell::new(CanvasState {
            tab_id: None,
            scene: Scene::empty(),
            drag: None,
            sender,
        }));

        let mut widget = Widget::new(0, 0, 0, 0, None);

        let draw_state = state.clone();
        widget.draw(move |wid| {
            let st = draw_state.borrow();
            draw_canvas(wid, &st);
        });

        let handle_state = state.clone();
        widget.handle(move |wid, event| handle_canvas(wid, event, &handle_state));

        Self { widget, state }
    }

    /// Replace the displayed scene. The resulting change event is tagged
    /// programmatic so it never dirties the tab.
    pub fn load_scene(&mut self, tab_id: TabId, scene: Scene) {
        let mut st = self.state.borrow_mut();
        st.tab_id = Some(tab_id);
        st.scene = scene.clone();
        st.drag = None;
        let sender = st.sender;
        drop(st);

        self.widget.redraw();
        sender.send(Message::SceneChanged(SceneChange {
            tab_id,
            origin: SceneOrigin::Programmatic,
            scene,
        }));
    }
}

fn draw_canvas(wid: &Widget, st: &CanvasState) {
    let (ox, oy) = (wid.x(), wid.y());
    draw::push_clip(ox, oy, wid.w(), wid.h());

    draw::set_draw_color(theme::parse_hex(st.scene.background(), theme::paper()));
    draw::draw_rectf(ox, oy, wid.w(), wid.h());

    draw::set_line_style(LineStyle::Solid, 2);
    for element in st.scene.live_elements() {
        if let Some(shape) = shape_of(element) {
            draw::set_draw_color(stroke_of(element));
            draw_shape(ox, oy, &shape);
        }
    }

    if let Some(((x0, y0), (x1, y1))) = st.drag {
        draw::set_draw_color(theme::accent());
        draw::set_line_style(LineStyle::Dash, 1);
        draw::draw_rect(x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs());
    }

    draw::set_line_style(LineStyle::Solid, 0);
    draw::pop_clip();
}

fn draw_shape(ox: i32, oy: i32, shape: &Shape) {
    let px = |v: f64, o: i32| o + v.round() as i32;

    match shape {
        Shape::Rectangle { x, y, w, h } => {
            draw::draw_rect(px(*x, ox), px(*y, oy), w.round() as i32, h.round() as i32);
        }
        Shape::Ellipse { x, y, w, h } => {
            draw::draw_arc(px(*x, ox), px(*y, oy), w.round() as i32, h.round() as i32, 0.0, 360.0);
        }
        Shape::Diamond { x, y, w, h } => {
            let (cx, cy) = (x + w / 2.0, y + h / 2.0);
            let corners = [(cx, *y), (x + w, cy), (cx, y + h), (*x, cy), (cx, *y)];
            for pair in corners.windows(2) {
                draw::draw_line(px(pair[0].0, ox), px(pair[0].1, oy), px(pair[1].0, ox), px(pair[1].1, oy));
            }
        }
        Shape::Polyline { points, arrow } => {
            for pair in points.windows(2) {
                draw::draw_line(px(pair[0].0, ox), px(pair[0].1, oy), px(pair[1].0, ox), px(pair[1].1, oy));
            }
            if *arrow && let [.., from, tip] = points.as_slice() {
                let angle = (tip.1 - from.1).atan2(tip.0 - from.0);
                for spread in [-0.5f64, 0.5] {
                    let a = angle + std::f64::consts::PI + spread;
                    draw::draw_line(
                        px(tip.0, ox),
                        px(tip.1, oy),
                        px(tip.0 + ARROW_HEAD * a.cos(), ox),
                        px(tip.1 + ARROW_HEAD * a.sin(), oy),
                    );
                }
            }
        }
        Shape::Text { x, y, text, size } => {
            draw::set_font(Font::Helvetica, *size);
            for (i, line) in text.lines().enumerate() {
                let line_y = px(*y, oy) + (i as i32) * (*size + 4);
                draw::draw_text2(line, px(*x, ox), line_y, 0, *size + 4, Align::Left | Align::Inside);
            }
        }
    }
}

fn handle_canvas(wid: &mut Widget, event: Event, state: &Rc<RefCell<CanvasState>>) -> bool {
    match event {
        Event::Push if app::event_button() == 1 => {
            let pos = (app::event_x(), app::event_y());
            state.borrow_mut().drag = Some((pos, pos));
            true
        }
        Event::Drag => {
            let mut st = state.borrow_mut();
            let Some((start, _)) = st.drag else {
                return false;
            };
            st.drag = Some((start, (app::event_x(), app::event_y())));
            drop(st);
            wid.redraw();
            true
        }
        Event::Released => {
            let mut st = state.borrow_mut();
            let Some(((x0, y0), (x1, y1))) = st.drag.take() else {
                return false;
            };
            let (w, h) = ((x1 - x0).abs(), (y1 - y0).abs());
            let finished = match st.tab_id {
                Some(tab_id) if w >= MIN_DRAG && h >= MIN_DRAG => {
                    let element = rectangle_element(
                        f64::from(x0.min(x1) - wid.x()),
                        f64::from(y0.min(y1) - wid.y()),
                        f64::from(w),
                        f64::from(h),
                    );
                    st.scene = st.scene.with_element(element);
                    Some((st.sender, tab_id, st.scene.clone()))
                }
                _ => None,
            };
            drop(st);
            wid.redraw();

            if let Some((sender, tab_id, scene)) = finished {
                sender.send(Message::SceneChanged(SceneChange {
                    tab_id,
                    origin: SceneOrigin::UserEdit,
                    scene,
                }));
            }
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shape_of_box_kinds() {
        let rect = json!({"type": "rectangle", "x": 10, "y": 20, "width": 30, "height": 40});
        assert_eq!(shape_of(&rect), Some(Shape::Rectangle { x: 10.0, y: 20.0, w: 30.0, h: 40.0 }));

        let ellipse = json!({"type": "ellipse", "x": 0, "y": 0, "width": 5, "height": 5});
        assert!(matches!(shape_of(&ellipse), Some(Shape::Ellipse { .. })));

        let diamond = json!({"type": "diamond", "x": 0, "y": 0, "width": 5, "height": 5});
        assert!(matches!(shape_of(&diamond), Some(Shape::Diamond { .. })));
    }

    #[test]
    fn test_negative_size_is_normalized() {
        let rect = json!({"type": "rectangle", "x": 50, "y": 50, "width": -20, "height": -10});
        assert_eq!(shape_of(&rect), Some(Shape::Rectangle { x: 30.0, y: 40.0, w: 20.0, h: 10.0 }));
    }

    #[test]
    fn test_points_are_relative_to_origin() {
        let arrow = json!({"type": "arrow", "x": 100, "y": 10, "points": [[0, 0], [50, 25]]});
        assert_eq!(
            shape_of(&arrow),
            Some(Shape::Polyline { points: vec![(100.0, 10.0), (150.0, 35.0)], arrow: true })
        );

        let lone = json!({"type": "line", "x": 0, "y": 0, "points": [[0, 0]]});
        assert_eq!(shape_of(&lone), None);
    }

    #[test]
    fn test_text_and_unknown_kinds() {
        let text = json!({"type": "text", "x": 1, "y": 2, "text": "hello", "fontSize": 16});
        assert_eq!(
            shape_of(&text),
            Some(Shape::Text { x: 1.0, y: 2.0, text: "hello".to_string(), size: 16 })
        );

        assert_eq!(shape_of(&json!({"type": "image", "x": 0, "y": 0})), None);
        assert_eq!(shape_of(&json!({"type": "rectangle"})), None);
    }

    #[test]
    fn test_new_rectangles_are_drawable() {
        let element = rectangle_element(5.0, 6.0, 7.0, 8.0);
        assert_eq!(shape_of(&element), Some(Shape::Rectangle { x: 5.0, y: 6.0, w: 7.0, h: 8.0 }));
    }
}
