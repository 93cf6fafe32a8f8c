//! Browser glue for the history strip.
//!
//! Pointer, mouse, wheel and button events are reduced to [`PanInput`] here
//! so the clamping rules live only in [`PanController`]. The surface never
//! owns DOM nodes; it looks them up through `NodeRef`s and quietly does
//! nothing while they are absent.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo_render::{request_animation_frame, AnimationFrame};
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent, PointerEvent, WheelEvent};
use yew::{Callback, NodeRef};

use crate::pan::{DragSource, PanButtons, PanController, PanDirection, PanInput, PanResponse};

const DRAGGING_CLASS: &str = "is-dragging";
const WHEEL_LINE_PX: f64 = 16.0;

#[derive(Clone)]
struct PanTarget {
    controller: Rc<RefCell<PanController>>,
    viewport: NodeRef,
    track: NodeRef,
    on_buttons: Callback<PanButtons>,
}

impl PanTarget {
    fn dispatch(&self, input: PanInput) -> PanResponse {
        let response = {
            let Ok(mut controller) = self.controller.try_borrow_mut() else {
                debug!("pan input dropped while another update is in progress");
                return PanResponse::default();
            };
            controller.handle(input)
        };

        if let Some(viewport) = self.viewport.cast::<Element>() {
            if let Some(scroll_top) = response.scroll_top {
                viewport.set_scroll_top(scroll_top.round() as i32);
            }
            if let Some(dragging) = response.dragging {
                let _ = viewport
                    .class_list()
                    .toggle_with_force(DRAGGING_CLASS, dragging);
            }
        }
        self.render();
        response
    }

    fn resync(&self) {
        let (Some(viewport), Some(track)) = (
            self.viewport.cast::<HtmlElement>(),
            self.track.cast::<Element>(),
        ) else {
            return;
        };

        if let Some(parent) = viewport.parent_element() {
            let parent_width = parent.client_width();
            if parent_width > 0 {
                let _ = viewport
                    .style()
                    .set_property("width", &format!("{parent_width}px"));
            }
        }

        let content_width = f64::from(track.scroll_width());
        let viewport_width = f64::from(viewport.client_width());
        {
            let Ok(mut controller) = self.controller.try_borrow_mut() else {
                return;
            };
            controller.resync(content_width, viewport_width);
        }
        self.render();
    }

    fn collapse(&self) {
        {
            let Ok(mut controller) = self.controller.try_borrow_mut() else {
                return;
            };
            controller.collapse();
        }
        self.render();
    }

    fn render(&self) {
        let (offset, buttons) = match self.controller.try_borrow() {
            Ok(controller) => (controller.offset(), controller.buttons()),
            Err(_) => return,
        };
        if let Some(track) = self.track.cast::<HtmlElement>() {
            let _ = track
                .style()
                .set_property("transform", &format!("translateX({offset}px)"));
        }
        self.on_buttons.emit(buttons);
    }
}

/// Owns the pan controller for one mounted history strip.
#[derive(Clone)]
pub struct PanSurface {
    target: PanTarget,
    frame: Rc<RefCell<Option<AnimationFrame>>>,
}

impl PanSurface {
    pub fn new(
        step: f64,
        viewport: NodeRef,
        track: NodeRef,
        on_buttons: Callback<PanButtons>,
    ) -> Self {
        Self {
            target: PanTarget {
                controller: Rc::new(RefCell::new(PanController::new(step))),
                viewport,
                track,
                on_buttons,
            },
            frame: Rc::new(RefCell::new(None)),
        }
    }

    /// Re-measures on the next animation frame. A pending request is
    /// replaced, so bursts of changes measure once.
    pub fn schedule_resync(&self) {
        let target = self.target.clone();
        let handle = request_animation_frame(move |_| target.resync());
        *self.frame.borrow_mut() = Some(handle);
    }

    pub fn collapse(&self) {
        self.frame.borrow_mut().take();
        self.target.collapse();
    }

    pub fn step(&self, direction: PanDirection) {
        self.target.dispatch(PanInput::Step(direction));
    }

    pub fn pointer_down(&self, event: &PointerEvent) {
        let response = self.target.dispatch(PanInput::DragStart {
            source: DragSource::Pointer(event.pointer_id()),
            button: event.button(),
            x: f64::from(event.client_x()),
            y: f64::from(event.client_y()),
            scroll_top: self.scroll_top(),
        });
        if response.consumed {
            event.prevent_default();
        }
        if response.dragging == Some(true) {
            if let Some(viewport) = self.target.viewport.cast::<Element>() {
                let _ = viewport.set_pointer_capture(event.pointer_id());
            }
        }
    }

    pub fn pointer_move(&self, event: &PointerEvent) {
        let response = self.target.dispatch(PanInput::DragMove {
            source: DragSource::Pointer(event.pointer_id()),
            x: f64::from(event.client_x()),
            y: f64::from(event.client_y()),
        });
        if response.consumed {
            event.prevent_default();
        }
    }

    /// Handles `pointerup`, `pointercancel` and `pointerleave` alike.
    pub fn pointer_end(&self, event: &PointerEvent) {
        self.target.dispatch(PanInput::DragEnd {
            source: DragSource::Pointer(event.pointer_id()),
        });
        if let Some(viewport) = self.target.viewport.cast::<Element>() {
            if viewport.has_pointer_capture(event.pointer_id()) {
                let _ = viewport.release_pointer_capture(event.pointer_id());
            }
        }
    }

    pub fn mouse_down(&self, event: &MouseEvent) {
        let response = self.target.dispatch(PanInput::DragStart {
            source: DragSource::Mouse,
            button: event.button(),
            x: f64::from(event.client_x()),
            y: f64::from(event.client_y()),
            scroll_top: self.scroll_top(),
        });
        if response.consumed {
            event.prevent_default();
        }
    }

    fn mouse_move(&self, event: &MouseEvent) {
        let response = self.target.dispatch(PanInput::DragMove {
            source: DragSource::Mouse,
            x: f64::from(event.client_x()),
            y: f64::from(event.client_y()),
        });
        if response.consumed {
            event.prevent_default();
        }
    }

    fn mouse_up(&self) {
        self.target.dispatch(PanInput::DragEnd {
            source: DragSource::Mouse,
        });
    }

    fn wheel(&self, event: &WheelEvent) {
        let (mut delta_x, mut delta_y) = (event.delta_x(), event.delta_y());
        match event.delta_mode() {
            1 => {
                delta_x *= WHEEL_LINE_PX;
                delta_y *= WHEEL_LINE_PX;
            }
            2 => {
                if let Some(viewport) = self.target.viewport.cast::<Element>() {
                    delta_x *= f64::from(viewport.client_width());
                    delta_y *= f64::from(viewport.client_height());
                }
            }
            _ => {}
        }
        let response = self.target.dispatch(PanInput::Wheel { delta_x, delta_y });
        if response.consumed {
            event.prevent_default();
        }
    }

    fn scroll_top(&self) -> f64 {
        self.target
            .viewport
            .cast::<Element>()
            .map(|viewport| f64::from(viewport.scroll_top()))
            .unwrap_or(0.0)
    }

    /// Registers the listeners Yew cannot express: a non-passive wheel
    /// handler, window-level mouse fallback and viewport resize. Dropping
    /// the returned listeners detaches them.
    pub fn listen(&self) -> Vec<EventListener> {
        let mut listeners = Vec::new();

        if let Some(viewport) = self.target.viewport.cast::<Element>() {
            let surface = self.clone();
            listeners.push(EventListener::new_with_options(
                &viewport,
                "wheel",
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: false,
                },
                move |event: &Event| {
                    if let Some(event) = event.dyn_ref::<WheelEvent>() {
                        surface.wheel(event);
                    }
                },
            ));
        }

        let Some(window) = web_sys::window() else {
            return listeners;
        };

        let surface = self.clone();
        listeners.push(EventListener::new_with_options(
            &window,
            "mousemove",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    surface.mouse_move(event);
                }
            },
        ));

        let surface = self.clone();
        listeners.push(EventListener::new(&window, "mouseup", move |_| {
            surface.mouse_up();
        }));

        let surface = self.clone();
        listeners.push(EventListener::new(&window, "resize", move |_| {
            surface.schedule_resync();
        }));

        listeners
    }
}
