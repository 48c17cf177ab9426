use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ColorDepth {
    #[default]
    NoChange,
    Bits16,
    Bits32,
}
indexed_table!(ColorDepth {
    NoChange,
    Bits16,
    Bits32
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Frequency {
    #[default]
    NoChange,
    Hz60,
    Hz70,
    Hz85,
    Hz100,
    Hz120,
}
indexed_table!(Frequency {
    NoChange,
    Hz60,
    Hz70,
    Hz85,
    Hz100,
    Hz120
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Resolution {
    #[default]
    NoChange,
    Res320x240,
    Res640x480,
    Res800x600,
    Res1024x768,
    Res1280x1024,
    Res1600x1200,
}
indexed_table!(Resolution {
    NoChange,
    Res320x240,
    Res640x480,
    Res800x600,
    Res1024x768,
    Res1280x1024,
    Res1600x1200
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Priority {
    #[default]
    Normal,
    High,
    Highest,
}
indexed_table!(Priority {
    Normal,
    High,
    Highest
});

/// Global Game Settings, read from the first config of the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameSettings {
    pub start_fullscreen: bool,
    pub allow_window_resize: bool,
    pub always_on_top: bool,
    pub abort_on_error: bool,
    pub disable_screensavers: bool,
    pub display_cursor: bool,
    pub display_errors: bool,
    pub dont_draw_border: bool,
    pub dont_show_buttons: bool,
    pub error_on_args: bool,
    pub freeze_on_lose_focus: bool,
    pub color_depth: ColorDepth,
    pub frequency: Frequency,
    pub resolution: Resolution,
    pub set_resolution: bool,
    pub priority: Priority,
    pub let_esc_end_game: bool,
    pub treat_close_as_escape: bool,
    pub interpolate: bool,
    pub scaling: i32,
    pub last_changed: Option<f64>,
    #[serde(skip)]
    pub game_icon: Vec<u8>, // raw .ico bytes
    pub game_id: i32,
    pub guid: String,
    pub author: String,
    pub company: String,
    pub copyright: String,
    pub description: String,
    pub product: String,
    pub version: String,
    pub version_build: i32,
    pub version_major: i32,
    pub version_minor: i32,
    pub version_release: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameInformation {
    pub text: String, // rich text, kept verbatim
}
