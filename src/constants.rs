// Web frontend tuning constants

// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const DEBUG_MENU_ID: &str = "debug-menu";
pub const EDITOR_HELP_ID: &str = "editor-help";

// How often the debug menu text is rebuilt (seconds)
pub const OVERLAY_REFRESH_SEC: f32 = 0.1;

// Frame delta clamp so a backgrounded tab does not produce a huge first step
pub const MAX_FRAME_DT_SEC: f32 = 0.25;

pub const EDITOR_HELP_LINES: [&str; 13] = [
    "D  toggle debug",
    "N  add keyframe    X  remove selected",
    "[ ]  select keyframe",
    "E  cycle easing",
    "- =  interpolation speed",
    "C  capture camera into selected",
    "P  toggle path",
    "K  cycle selected easing",
    ", .  selected duration",
    "9 0  selected fov",
    "T  nudge position / target",
    "arrows, PgUp PgDn  nudge x y / z",
    "drag: orbit   wheel: zoom",
];
