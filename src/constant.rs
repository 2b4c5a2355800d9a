// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 1100.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 720.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Pane Diff";

/// Application name and metadata constants
pub const APP_NAME: &str = "Pane Diff";

/// Visible line bounds for the editor and diff panels
pub const MIN_VISIBLE_LINES: u32 = 10;
pub const MAX_VISIBLE_LINES: u32 = 50;
pub const DEFAULT_VISIBLE_LINES: u32 = 25;

/// Height of one editor line in points
pub const LINE_HEIGHT: f32 = 19.0;

pub const EDITOR_FONT_SIZE: f32 = 13.0;
pub const DEFAULT_THEME: &str = "InspiredGitHub";
