use crate::geometry::clamp;

pub const DEFAULT_PAN_STEP: f64 = 220.0;

const PRIMARY_BUTTON: i16 = 0;

/// Which input stream a drag gesture arrived on.
///
/// Browsers emit compatibility mouse events after pointer events, so a
/// `Mouse` sample may continue a gesture that a pointer started. Two
/// different pointer ids never continue each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Pointer(i32),
    Mouse,
}

impl DragSource {
    fn continues(self, started: DragSource) -> bool {
        match (self, started) {
            (DragSource::Pointer(current), DragSource::Pointer(origin)) => current == origin,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
}

/// Normalized input for the history strip. Coordinates are client pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanInput {
    DragStart {
        source: DragSource,
        button: i16,
        x: f64,
        y: f64,
        scroll_top: f64,
    },
    DragMove {
        source: DragSource,
        x: f64,
        y: f64,
    },
    DragEnd {
        source: DragSource,
    },
    Wheel {
        delta_x: f64,
        delta_y: f64,
    },
    Step(PanDirection),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub source: DragSource,
    pub start_x: f64,
    pub start_y: f64,
    pub start_offset: f64,
    pub start_scroll_top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    Idle,
    Dragging(DragAnchor),
}

/// What the host should do after an input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanResponse {
    /// The native default action should be suppressed.
    pub consumed: bool,
    /// Vertical scroll position the surface should follow.
    pub scroll_top: Option<f64>,
    /// Set when the drag phase changed: `Some(true)` on start, `Some(false)` on end.
    pub dragging: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanButtons {
    pub left_enabled: bool,
    pub right_enabled: bool,
}

/// Horizontal offset of the history strip and the drag state machine that
/// moves it.
///
/// `offset` stays within `[-max, 0]` after every call.
#[derive(Debug, Clone, PartialEq)]
pub struct PanController {
    offset: f64,
    max: f64,
    step: f64,
    phase: DragPhase,
}

impl Default for PanController {
    fn default() -> Self {
        Self::new(DEFAULT_PAN_STEP)
    }
}

impl PanController {
    pub fn new(step: f64) -> Self {
        Self {
            offset: 0.0,
            max: 0.0,
            step: if step.is_finite() { step.abs() } else { DEFAULT_PAN_STEP },
            phase: DragPhase::Idle,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    pub fn buttons(&self) -> PanButtons {
        let has_room = self.max > 0.0;
        PanButtons {
            left_enabled: has_room && self.offset < 0.0,
            right_enabled: has_room && self.offset > -self.max,
        }
    }

    pub fn handle(&mut self, input: PanInput) -> PanResponse {
        match input {
            PanInput::DragStart {
                source,
                button,
                x,
                y,
                scroll_top,
            } => {
                if button != PRIMARY_BUTTON || !x.is_finite() || !y.is_finite() {
                    return PanResponse::default();
                }
                if self.is_dragging() {
                    return PanResponse {
                        consumed: true,
                        ..PanResponse::default()
                    };
                }
                self.phase = DragPhase::Dragging(DragAnchor {
                    source,
                    start_x: x,
                    start_y: y,
                    start_offset: self.offset,
                    start_scroll_top: finite_or_zero(scroll_top),
                });
                PanResponse {
                    consumed: true,
                    scroll_top: None,
                    dragging: Some(true),
                }
            }
            PanInput::DragMove { source, x, y } => {
                let DragPhase::Dragging(anchor) = self.phase else {
                    return PanResponse::default();
                };
                if !source.continues(anchor.source) || !x.is_finite() || !y.is_finite() {
                    return PanResponse::default();
                }
                self.set_offset(anchor.start_offset + (x - anchor.start_x));
                PanResponse {
                    consumed: true,
                    scroll_top: Some(anchor.start_scroll_top - (y - anchor.start_y)),
                    dragging: None,
                }
            }
            PanInput::DragEnd { source } => {
                let DragPhase::Dragging(anchor) = self.phase else {
                    return PanResponse::default();
                };
                if !source.continues(anchor.source) {
                    return PanResponse::default();
                }
                self.phase = DragPhase::Idle;
                PanResponse {
                    consumed: false,
                    scroll_top: None,
                    dragging: Some(false),
                }
            }
            PanInput::Wheel { delta_x, delta_y } => {
                if !delta_x.is_finite() || !delta_y.is_finite() {
                    return PanResponse::default();
                }
                // Vertical wheel stays native.
                if delta_x.abs() <= delta_y.abs() {
                    return PanResponse::default();
                }
                self.pan_by(-delta_x);
                PanResponse {
                    consumed: true,
                    ..PanResponse::default()
                }
            }
            PanInput::Step(direction) => {
                let delta = match direction {
                    PanDirection::Left => self.step,
                    PanDirection::Right => -self.step,
                };
                self.pan_by(delta);
                PanResponse {
                    consumed: true,
                    ..PanResponse::default()
                }
            }
        }
    }

    /// Recomputes `max` from measured widths and pulls `offset` back in range.
    pub fn resync(&mut self, content_width: f64, viewport_width: f64) {
        let content = finite_or_zero(content_width);
        let viewport = finite_or_zero(viewport_width);
        self.max = (content - viewport).max(0.0);
        self.set_offset(self.offset);
    }

    /// Bounds for an empty strip.
    pub fn collapse(&mut self) {
        self.max = 0.0;
        self.offset = 0.0;
    }

    fn pan_by(&mut self, delta: f64) {
        self.set_offset(self.offset + delta);
    }

    fn set_offset(&mut self, value: f64) {
        self.offset = clamp(value, -self.max, 0.0);
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn start(x: f64, y: f64) -> PanInput {
        PanInput::DragStart {
            source: DragSource::Pointer(1),
            button: 0,
            x,
            y,
            scroll_top: 40.0,
        }
    }

    fn move_to(x: f64, y: f64) -> PanInput {
        PanInput::DragMove {
            source: DragSource::Pointer(1),
            x,
            y,
        }
    }

    fn controller_with_room(max: f64) -> PanController {
        let mut pan = PanController::default();
        pan.resync(500.0 + max, 500.0);
        pan
    }

    #[test]
    fn drag_pans_and_scrolls_independently() {
        let mut pan = controller_with_room(600.0);
        let response = pan.handle(start(300.0, 100.0));
        assert!(response.consumed);
        assert_eq!(response.dragging, Some(true));

        let response = pan.handle(move_to(180.0, 130.0));
        assert_eq!(pan.offset(), -120.0);
        assert_eq!(response.scroll_top, Some(10.0));

        pan.handle(PanInput::DragEnd {
            source: DragSource::Pointer(1),
        });
        assert!(!pan.is_dragging());
    }

    #[test]
    fn drag_is_clamped_to_bounds() {
        let mut pan = controller_with_room(200.0);
        pan.handle(start(0.0, 0.0));
        pan.handle(move_to(-1000.0, 0.0));
        assert_eq!(pan.offset(), -200.0);
        pan.handle(move_to(1000.0, 0.0));
        assert_eq!(pan.offset(), 0.0);
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let mut pan = controller_with_room(200.0);
        let response = pan.handle(move_to(-50.0, 0.0));
        assert_eq!(response, PanResponse::default());
        assert_eq!(pan.offset(), 0.0);
    }

    #[test]
    fn secondary_button_does_not_start_drag() {
        let mut pan = controller_with_room(200.0);
        let response = pan.handle(PanInput::DragStart {
            source: DragSource::Mouse,
            button: 2,
            x: 10.0,
            y: 10.0,
            scroll_top: 0.0,
        });
        assert!(!response.consumed);
        assert!(!pan.is_dragging());
    }

    #[test]
    fn mouse_fallback_continues_pointer_drag() {
        let mut pan = controller_with_room(400.0);
        pan.handle(start(200.0, 0.0));
        // Compatibility mousedown for the same press keeps the original anchor.
        pan.handle(PanInput::DragStart {
            source: DragSource::Mouse,
            button: 0,
            x: 150.0,
            y: 0.0,
            scroll_top: 0.0,
        });
        pan.handle(PanInput::DragMove {
            source: DragSource::Mouse,
            x: 100.0,
            y: 0.0,
        });
        assert_eq!(pan.offset(), -100.0);

        pan.handle(PanInput::DragMove {
            source: DragSource::Pointer(7),
            x: 0.0,
            y: 0.0,
        });
        assert_eq!(pan.offset(), -100.0);

        pan.handle(PanInput::DragEnd {
            source: DragSource::Mouse,
        });
        assert!(!pan.is_dragging());
    }

    #[test]
    fn horizontal_wheel_pans_vertical_wheel_passes_through() {
        let mut pan = controller_with_room(300.0);
        let response = pan.handle(PanInput::Wheel {
            delta_x: 80.0,
            delta_y: 10.0,
        });
        assert!(response.consumed);
        assert_eq!(pan.offset(), -80.0);

        let response = pan.handle(PanInput::Wheel {
            delta_x: 10.0,
            delta_y: 10.0,
        });
        assert!(!response.consumed);
        assert_eq!(pan.offset(), -80.0);
    }

    #[test]
    fn step_buttons_move_by_fixed_amount() {
        let mut pan = controller_with_room(500.0);
        pan.handle(PanInput::Step(PanDirection::Right));
        assert_eq!(pan.offset(), -DEFAULT_PAN_STEP);
        pan.handle(PanInput::Step(PanDirection::Right));
        pan.handle(PanInput::Step(PanDirection::Right));
        assert_eq!(pan.offset(), -500.0);
        pan.handle(PanInput::Step(PanDirection::Left));
        assert_eq!(pan.offset(), -280.0);
    }

    #[test]
    fn buttons_reflect_position() {
        let mut pan = PanController::default();
        assert_eq!(pan.buttons(), PanButtons::default());

        pan.resync(900.0, 500.0);
        assert_eq!(
            pan.buttons(),
            PanButtons {
                left_enabled: false,
                right_enabled: true,
            }
        );

        pan.handle(PanInput::Wheel {
            delta_x: 1000.0,
            delta_y: 0.0,
        });
        assert_eq!(
            pan.buttons(),
            PanButtons {
                left_enabled: true,
                right_enabled: false,
            }
        );
    }

    #[test]
    fn shrinking_content_reclamps_offset() {
        let mut pan = controller_with_room(800.0);
        pan.handle(PanInput::Wheel {
            delta_x: 700.0,
            delta_y: 0.0,
        });
        assert_eq!(pan.offset(), -700.0);

        pan.resync(700.0, 500.0);
        assert_eq!(pan.max(), 200.0);
        assert_eq!(pan.offset(), -200.0);

        pan.resync(300.0, 500.0);
        assert_eq!(pan.max(), 0.0);
        assert_eq!(pan.offset(), 0.0);
    }

    #[test]
    fn resync_is_idempotent() {
        let mut pan = controller_with_room(350.0);
        pan.handle(PanInput::Step(PanDirection::Right));
        pan.resync(850.0, 500.0);
        let snapshot = (pan.offset(), pan.max());
        pan.resync(850.0, 500.0);
        assert_eq!((pan.offset(), pan.max()), snapshot);
    }

    #[test]
    fn bad_measurements_keep_invariants() {
        let mut pan = controller_with_room(350.0);
        pan.handle(PanInput::Step(PanDirection::Right));
        pan.resync(f64::NAN, f64::INFINITY);
        assert_eq!(pan.max(), 0.0);
        assert_eq!(pan.offset(), 0.0);
    }

    #[test]
    fn collapse_resets_bounds() {
        let mut pan = controller_with_room(350.0);
        pan.handle(PanInput::Step(PanDirection::Right));
        pan.collapse();
        assert_eq!((pan.offset(), pan.max()), (0.0, 0.0));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Input(PanInput),
        Resync(f64, f64),
    }

    fn source_strategy() -> impl Strategy<Value = DragSource> {
        prop_oneof![Just(DragSource::Mouse), (0i32..3).prop_map(DragSource::Pointer)]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        let coord = -3000.0f64..3000.0;
        prop_oneof![
            (source_strategy(), 0i16..3, coord.clone(), coord.clone(), 0.0f64..800.0).prop_map(
                |(source, button, x, y, scroll_top)| {
                    Op::Input(PanInput::DragStart {
                        source,
                        button,
                        x,
                        y,
                        scroll_top,
                    })
                }
            ),
            (source_strategy(), coord.clone(), coord.clone())
                .prop_map(|(source, x, y)| Op::Input(PanInput::DragMove { source, x, y })),
            source_strategy().prop_map(|source| Op::Input(PanInput::DragEnd { source })),
            (coord.clone(), coord.clone()).prop_map(|(delta_x, delta_y)| {
                Op::Input(PanInput::Wheel { delta_x, delta_y })
            }),
            prop_oneof![Just(PanDirection::Left), Just(PanDirection::Right)]
                .prop_map(|direction| Op::Input(PanInput::Step(direction))),
            (0.0f64..6000.0, 0.0f64..2000.0)
                .prop_map(|(content, viewport)| Op::Resync(content, viewport)),
        ]
    }

    proptest! {
        #[test]
        fn offset_stays_within_bounds(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut pan = PanController::default();
            for op in ops {
                match op {
                    Op::Input(input) => {
                        pan.handle(input);
                    }
                    Op::Resync(content, viewport) => {
                        pan.resync(content, viewport);
                        prop_assert_eq!(pan.max(), (content - viewport).max(0.0));
                    }
                }
                prop_assert!(pan.max() >= 0.0);
                prop_assert!(pan.offset() <= 0.0);
                prop_assert!(pan.offset() >= -pan.max());
            }
        }

        #[test]
        fn repeated_resync_changes_nothing(
            ops in prop::collection::vec(op_strategy(), 0..32),
            content in 0.0f64..6000.0,
            viewport in 0.0f64..2000.0,
        ) {
            let mut pan = PanController::default();
            for op in ops {
                if let Op::Input(input) = op {
                    pan.handle(input);
                }
            }
            pan.resync(content, viewport);
            let first = (pan.offset(), pan.max());
            pan.resync(content, viewport);
            prop_assert_eq!((pan.offset(), pan.max()), first);
        }
    }
}
