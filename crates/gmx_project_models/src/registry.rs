use std::{
    collections::HashMap,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use serde::{Serialize, Serializer};
use smol_str::SmolStr;
use tracing::trace;

use crate::{
    background::Background, font::Font, object::GmObject, path::GmPath, room::Room,
    script::{Script, Shader}, sound::Sound, sprite::Sprite, timeline::Timeline,
};

/// Position of a record inside the [`ResourceList`] of its category.
/// Ids are handed out sequentially from zero and never reused, a record is never removed during a load.
pub struct Id<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }
    pub fn index(&self) -> usize {
        self.index
    }
}

// derives would require `T: Clone` and friends, which the marker does not need
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Id<T> {}
impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}
impl<T> Eq for Id<T> {}
impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state)
    }
}
impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index)
    }
}
impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.index as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    Sprite,
    Sound,
    Background,
    Path,
    Script,
    Shader,
    Font,
    Timeline,
    Object,
    Room,
    GameInformation,
    GameSettings,
}

impl ResourceKind {
    /// Categories with a registry, in the order a project is read.
    pub const LISTED: [ResourceKind; 10] = [
        ResourceKind::Sprite,
        ResourceKind::Sound,
        ResourceKind::Background,
        ResourceKind::Path,
        ResourceKind::Script,
        ResourceKind::Shader,
        ResourceKind::Font,
        ResourceKind::Timeline,
        ResourceKind::Object,
        ResourceKind::Room,
    ];

    /// Label of the fixed top level folder, or of the single leaf for the project wide resources.
    pub fn folder_name(&self) -> &'static str {
        match self {
            ResourceKind::Sprite => "Sprites",
            ResourceKind::Sound => "Sounds",
            ResourceKind::Background => "Backgrounds",
            ResourceKind::Path => "Paths",
            ResourceKind::Script => "Scripts",
            ResourceKind::Shader => "Shaders",
            ResourceKind::Font => "Fonts",
            ResourceKind::Timeline => "Timelines",
            ResourceKind::Object => "Objects",
            ResourceKind::Room => "Rooms",
            ResourceKind::GameInformation => "Game Information",
            ResourceKind::GameSettings => "Global Game Settings",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Sprite => "sprite",
            ResourceKind::Sound => "sound",
            ResourceKind::Background => "background",
            ResourceKind::Path => "path",
            ResourceKind::Script => "script",
            ResourceKind::Shader => "shader",
            ResourceKind::Font => "font",
            ResourceKind::Timeline => "timeline",
            ResourceKind::Object => "object",
            ResourceKind::Room => "room",
            ResourceKind::GameInformation => "game information",
            ResourceKind::GameSettings => "game settings",
        };
        f.write_str(name)
    }
}

/// Type erased reference to any record of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id")]
pub enum ResourceRef {
    Sprite(Id<Sprite>),
    Sound(Id<Sound>),
    Background(Id<Background>),
    Path(Id<GmPath>),
    Script(Id<Script>),
    Shader(Id<Shader>),
    Font(Id<Font>),
    Timeline(Id<Timeline>),
    Object(Id<GmObject>),
    Room(Id<Room>),
    GameInformation,
    GameSettings,
}

impl ResourceRef {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceRef::Sprite(_) => ResourceKind::Sprite,
            ResourceRef::Sound(_) => ResourceKind::Sound,
            ResourceRef::Background(_) => ResourceKind::Background,
            ResourceRef::Path(_) => ResourceKind::Path,
            ResourceRef::Script(_) => ResourceKind::Script,
            ResourceRef::Shader(_) => ResourceKind::Shader,
            ResourceRef::Font(_) => ResourceKind::Font,
            ResourceRef::Timeline(_) => ResourceKind::Timeline,
            ResourceRef::Object(_) => ResourceKind::Object,
            ResourceRef::Room(_) => ResourceKind::Room,
            ResourceRef::GameInformation => ResourceKind::GameInformation,
            ResourceRef::GameSettings => ResourceKind::GameSettings,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Resource<T> {
    pub id: Id<T>,
    pub name: SmolStr,
    pub props: T,
}

/// All the records of one category.
/// Records keep insertion order, the name index always points to the most recent record with that name.
#[derive(Debug, Clone)]
pub struct ResourceList<T> {
    items: Vec<Resource<T>>,
    by_name: HashMap<SmolStr, usize>,
    last_id: i32,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            by_name: HashMap::new(),
            last_id: -1,
        }
    }
}

impl<T> ResourceList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_with(&mut self, name: impl Into<SmolStr>, props: T) -> &mut Resource<T> {
        let name: SmolStr = name.into();
        let index = self.items.len();
        if self.by_name.insert(name.clone(), index).is_some() {
            trace!(%name, index, "name is now bound to a newer record");
        }
        self.items.push(Resource {
            id: Id::new(index),
            name,
            props,
        });
        &mut self.items[index]
    }

    pub fn get(&self, name: &str) -> Option<&Resource<T>> {
        self.by_name.get(name).map(|&index| &self.items[index])
    }
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Resource<T>> {
        match self.by_name.get(name) {
            Some(&index) => Some(&mut self.items[index]),
            None => None,
        }
    }
    pub fn id_of(&self, name: &str) -> Option<Id<T>> {
        self.by_name.get(name).map(|&index| Id::new(index))
    }
    pub fn get_index(&self, position: usize) -> Option<&Resource<T>> {
        self.items.get(position)
    }
    pub fn get_id(&self, id: Id<T>) -> Option<&Resource<T>> {
        self.items.get(id.index())
    }
    pub fn get_id_mut(&mut self, id: Id<T>) -> Option<&mut Resource<T>> {
        self.items.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Resource<T>> {
        self.items.iter()
    }

    /// Counter kept next to the records, see the numbering option of the reader.
    pub fn last_id(&self) -> i32 {
        self.last_id
    }
    pub fn bump_last_id(&mut self) {
        self.last_id += 1;
    }
    pub fn set_last_id(&mut self, last_id: i32) {
        self.last_id = last_id;
    }
}

impl<T: Default> ResourceList<T> {
    pub fn add(&mut self, name: impl Into<SmolStr>) -> &mut Resource<T> {
        self.add_with(name, T::default())
    }
}

impl<T> Index<Id<T>> for ResourceList<T> {
    type Output = Resource<T>;

    fn index(&self, id: Id<T>) -> &Self::Output {
        &self.items[id.index()]
    }
}
impl<T> IndexMut<Id<T>> for ResourceList<T> {
    fn index_mut(&mut self, id: Id<T>) -> &mut Self::Output {
        &mut self.items[id.index()]
    }
}

impl<'a, T> IntoIterator for &'a ResourceList<T> {
    type Item = &'a Resource<T>;
    type IntoIter = std::slice::Iter<'a, Resource<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for ResourceList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.items.iter())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Dummy {
        value: i32,
    }

    #[test]
    fn test_sequential_ids() {
        let mut list: ResourceList<Dummy> = ResourceList::new();
        for name in ["a", "b", "c"] {
            list.add(name);
        }
        let ids: Vec<usize> = list.iter().map(|r| r.id.index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(list.last_id(), -1);
    }

    #[test]
    fn test_last_write_wins() {
        let mut list: ResourceList<Dummy> = ResourceList::new();
        list.add("spr_dup").props.value = 1;
        list.add("spr_other");
        list.add("spr_dup").props.value = 2;
        assert_eq!(list.len(), 3);
        let found = list.get("spr_dup").map(|r| r.props.value);
        assert_eq!(found, Some(2));
        assert_eq!(list.id_of("spr_dup"), Some(Id::new(2)));
        assert_eq!(list.get_index(0).map(|r| r.props.value), Some(1));
    }

    #[test]
    fn test_missing_name() {
        let list: ResourceList<Dummy> = ResourceList::new();
        assert!(list.get("nothing").is_none());
        assert!(list.get_index(0).is_none());
    }

    #[test]
    fn test_index_by_id() {
        let mut list: ResourceList<Dummy> = ResourceList::new();
        let id = list.add("x").id;
        list[id].props.value = 7;
        assert_eq!(list[id].props, Dummy { value: 7 });
    }
}
