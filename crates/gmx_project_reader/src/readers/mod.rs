//! One reader per category, each fills its registry and returns the category folder.

pub(crate) mod actions;
pub(crate) mod background;
pub(crate) mod font;
pub(crate) mod object;
pub(crate) mod path;
pub(crate) mod room;
pub(crate) mod script;
pub(crate) mod settings;
pub(crate) mod sound;
pub(crate) mod sprite;
pub(crate) mod timeline;

pub use script::SHADER_MARKER;
