use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::{
    object::GmObject,
    registry::{Id, ResourceRef},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    #[default]
    Normal,
    BeginGroup,
    EndGroup,
    Else,
    Exit,
    Repeat,
    Variable,
    Code,
    Placeholder,
    Separator,
    Label,
}
indexed_table!(ActionKind {
    Normal,
    BeginGroup,
    EndGroup,
    Else,
    Exit,
    Repeat,
    Variable,
    Code,
    Placeholder,
    Separator,
    Label,
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecType {
    #[default]
    None,
    Function,
    Code,
}
indexed_table!(ExecType {
    None,
    Function,
    Code
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgumentKind {
    #[default]
    Expression,
    String,
    Both,
    Boolean,
    Menu,
    Sprite,
    Sound,
    Background,
    Path,
    Script,
    Object,
    Room,
    FontString,
    Color,
    Timeline,
    Font,
}
indexed_table!(ArgumentKind {
    Expression,
    String,
    Both,
    Boolean,
    Menu,
    Sprite,
    Sound,
    Background,
    Path,
    Script,
    Object,
    Room,
    FontString,
    Color,
    Timeline,
    Font,
});

/// Static shape of an action as published by an action library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibAction {
    pub library_id: i32,
    pub id: i32,
    pub name: SmolStr,
    pub kind: ActionKind,
    pub allow_relative: bool,
    pub question: bool,
    pub can_apply_to: bool,
    pub exec_type: ExecType,
    pub exec_info: String,
    pub argument_kinds: Vec<ArgumentKind>,
    /// true when the descriptor was made up from an action instance because no library knew it
    pub synthesized: bool,
}

impl LibAction {
    pub const CODE_LIBRARY_ID: i32 = 1;
    pub const CODE_ACTION_ID: i32 = 603;

    /// The "execute code" action every project can use, whatever libraries are installed.
    pub fn code_action() -> Self {
        Self {
            library_id: Self::CODE_LIBRARY_ID,
            id: Self::CODE_ACTION_ID,
            name: SmolStr::new_inline("Execute Code"),
            kind: ActionKind::Code,
            allow_relative: false,
            question: false,
            can_apply_to: true,
            exec_type: ExecType::Code,
            exec_info: String::new(),
            argument_kinds: vec![ArgumentKind::String],
            synthesized: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum AppliesTo {
    #[default]
    SelfInstance,
    Other,
    Object(Id<GmObject>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub kind: ArgumentKind,
    pub value: String,
    pub resource: Option<ResourceRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub library: Arc<LibAction>,
    pub relative: bool,
    pub not: bool,
    pub applies_to: AppliesTo,
    pub arguments: Vec<Argument>,
}

impl Action {
    pub fn new(library: Arc<LibAction>) -> Self {
        Self {
            library,
            relative: false,
            not: false,
            applies_to: AppliesTo::default(),
            arguments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MainEventKind {
    #[default]
    Create,
    Destroy,
    Alarm,
    Step,
    Collision,
    Keyboard,
    Mouse,
    Other,
    Draw,
    KeyPress,
    KeyRelease,
    Trigger,
}
indexed_table!(MainEventKind {
    Create,
    Destroy,
    Alarm,
    Step,
    Collision,
    Keyboard,
    Mouse,
    Other,
    Draw,
    KeyPress,
    KeyRelease,
    Trigger,
});

impl MainEventKind {
    pub const COUNT: usize = 12;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Event {
    pub main: MainEventKind,
    pub id: i32, // sub event, unused by collisions
    pub other: Option<Id<GmObject>>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MainEvent {
    pub events: Vec<Event>,
}
