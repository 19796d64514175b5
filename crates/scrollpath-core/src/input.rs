use glam::{Vec2, Vec3};

// Pixel equivalents used to normalise wheel events reported in lines or pages.
pub const WHEEL_LINE_PX: f32 = 16.0;
pub const WHEEL_PAGE_PX: f32 = 800.0;

/// DOM `WheelEvent.deltaMode` values.
pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

/// Actions available from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorCommand {
    ToggleDebug,
    AddKeyframe,
    RemoveSelected,
    SelectPrevious,
    SelectNext,
    CycleEasing,
    SpeedDown,
    SpeedUp,
    CaptureCamera,
    TogglePath,
    /// Cycle the selected keyframe's own easing.
    CycleKeyframeEasing,
    DurationDown,
    DurationUp,
    FovDown,
    FovUp,
    /// Switch nudges between the selected keyframe's position and target.
    ToggleNudgeTarget,
    Nudge { axis: Axis, positive: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Which point of the selected keyframe nudges move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NudgeTarget {
    #[default]
    Position,
    Target,
}

impl NudgeTarget {
    pub fn toggled(self) -> Self {
        match self {
            NudgeTarget::Position => NudgeTarget::Target,
            NudgeTarget::Target => NudgeTarget::Position,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NudgeTarget::Position => "position",
            NudgeTarget::Target => "target",
        }
    }
}

impl EditorCommand {
    /// Whether the command is only honoured while debug mode is on.
    pub fn requires_debug(self) -> bool {
        !matches!(self, EditorCommand::ToggleDebug)
    }
}

fn nudge(axis: Axis, positive: bool) -> EditorCommand {
    EditorCommand::Nudge { axis, positive }
}

#[inline]
pub fn command_for_key(key: &str) -> Option<EditorCommand> {
    match key {
        "d" | "D" => Some(EditorCommand::ToggleDebug),
        "n" | "N" => Some(EditorCommand::AddKeyframe),
        "x" | "X" | "Delete" => Some(EditorCommand::RemoveSelected),
        "[" => Some(EditorCommand::SelectPrevious),
        "]" => Some(EditorCommand::SelectNext),
        "e" | "E" => Some(EditorCommand::CycleEasing),
        "-" | "_" => Some(EditorCommand::SpeedDown),
        "=" | "+" => Some(EditorCommand::SpeedUp),
        "c" | "C" => Some(EditorCommand::CaptureCamera),
        "p" | "P" => Some(EditorCommand::TogglePath),
        "k" | "K" => Some(EditorCommand::CycleKeyframeEasing),
        "," | "<" => Some(EditorCommand::DurationDown),
        "." | ">" => Some(EditorCommand::DurationUp),
        "9" | "(" => Some(EditorCommand::FovDown),
        "0" | ")" => Some(EditorCommand::FovUp),
        "t" | "T" => Some(EditorCommand::ToggleNudgeTarget),
        "ArrowLeft" => Some(nudge(Axis::X, false)),
        "ArrowRight" => Some(nudge(Axis::X, true)),
        "ArrowDown" => Some(nudge(Axis::Y, false)),
        "ArrowUp" => Some(nudge(Axis::Y, true)),
        "PageDown" => Some(nudge(Axis::Z, false)),
        "PageUp" => Some(nudge(Axis::Z, true)),
        _ => None,
    }
}

/// Convert a wheel delta to pixel units.
#[inline]
pub fn wheel_delta_px(delta: f64, delta_mode: u32) -> f32 {
    let d = delta as f32;
    match delta_mode {
        DOM_DELTA_LINE => d * WHEEL_LINE_PX,
        DOM_DELTA_PAGE => d * WHEEL_PAGE_PX,
        _ => d,
    }
}

/// Map a position inside a `width` x `height` area to \[-1, 1\] on both axes.
/// Y grows downwards, matching screen coordinates.
#[inline]
pub fn pointer_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width > 0.0 && height > 0.0 {
        Vec2::new(x / width * 2.0 - 1.0, y / height * 2.0 - 1.0)
    } else {
        Vec2::ZERO
    }
}

/// Step `speed` by `delta`, rounded to one decimal and kept inside
/// `[min, max]`.
#[inline]
pub fn step_speed(speed: f32, delta: f32, min: f32, max: f32) -> f32 {
    step_rounded(speed, delta, min, max)
}

/// `value + delta` rounded to one decimal, clamped to `[min, max]`.
#[inline]
pub fn step_rounded(value: f32, delta: f32, min: f32, max: f32) -> f32 {
    (((value + delta) * 10.0).round() / 10.0).clamp(min, max)
}
