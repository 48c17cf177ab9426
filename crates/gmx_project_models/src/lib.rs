//! In memory model of a GameMaker Studio project.
//!
//! Every category owns a [`registry::ResourceList`], the navigation folders live in a separate [`tree::ResNode`].
//! Cross references are typed [`registry::Id`]s, `None` meaning the slot was never linked.

/// Lookup of the small integer tables used by the format.
/// An index outside of the table yields `None`, callers decide if that is fatal.
macro_rules! indexed_table {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            pub const TABLE: &'static [$ty] = &[$($ty::$variant),+];

            pub fn from_index(index: i32) -> Option<Self> {
                usize::try_from(index)
                    .ok()
                    .and_then(|index| Self::TABLE.get(index).copied())
            }
        }
    };
}

pub mod action;
pub mod background;
pub mod font;
pub mod media;
pub mod object;
pub mod path;
pub mod project;
pub mod registry;
pub mod room;
pub mod script;
pub mod settings;
pub mod sound;
pub mod sprite;
pub mod timeline;
pub mod tree;

pub use project::{ActionOwner, Project, ResourceType};
pub use registry::{Id, Resource, ResourceKind, ResourceList, ResourceRef};
pub use tree::{NodeKind, ResNode};
