use serde::Serialize;

use crate::{
    action::{Action, MainEventKind},
    background::Background,
    font::Font,
    object::GmObject,
    path::GmPath,
    registry::{Id, ResourceKind, ResourceList, ResourceRef},
    room::Room,
    script::{Script, Shader},
    settings::{GameInformation, GameSettings},
    sound::Sound,
    sprite::Sprite,
    timeline::Timeline,
    tree::ResNode,
};

/// The whole resource graph of one project.
#[derive(Debug, Default, Serialize)]
pub struct Project {
    pub sprites: ResourceList<Sprite>,
    pub sounds: ResourceList<Sound>,
    pub backgrounds: ResourceList<Background>,
    pub paths: ResourceList<GmPath>,
    pub scripts: ResourceList<Script>,
    pub shaders: ResourceList<Shader>,
    pub fonts: ResourceList<Font>,
    pub timelines: ResourceList<Timeline>,
    pub objects: ResourceList<GmObject>,
    pub rooms: ResourceList<Room>,
    pub game_settings: GameSettings,
    pub game_info: GameInformation,
    pub tree: ResNode,
}

/// Glue between a record type and the registry holding it.
pub trait ResourceType: Sized + 'static {
    const KIND: ResourceKind;
    fn list(project: &Project) -> &ResourceList<Self>;
    fn list_mut(project: &mut Project) -> &mut ResourceList<Self>;
    fn reference(id: Id<Self>) -> ResourceRef;
}

macro_rules! resource_type {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl ResourceType for $ty {
            const KIND: ResourceKind = ResourceKind::$kind;
            fn list(project: &Project) -> &ResourceList<Self> {
                &project.$field
            }
            fn list_mut(project: &mut Project) -> &mut ResourceList<Self> {
                &mut project.$field
            }
            fn reference(id: Id<Self>) -> ResourceRef {
                ResourceRef::$kind(id)
            }
        }
    };
}

resource_type!(Sprite, Sprite, sprites);
resource_type!(Sound, Sound, sounds);
resource_type!(Background, Background, backgrounds);
resource_type!(GmPath, Path, paths);
resource_type!(Script, Script, scripts);
resource_type!(Shader, Shader, shaders);
resource_type!(Font, Font, fonts);
resource_type!(Timeline, Timeline, timelines);
resource_type!(GmObject, Object, objects);
resource_type!(Room, Room, rooms);

/// Where an action lives, so it can be found again once every record is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOwner {
    Event {
        object: Id<GmObject>,
        main: MainEventKind,
        event: usize,
    },
    Moment {
        timeline: Id<Timeline>,
        moment: usize,
    },
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len_of(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Sprite => self.sprites.len(),
            ResourceKind::Sound => self.sounds.len(),
            ResourceKind::Background => self.backgrounds.len(),
            ResourceKind::Path => self.paths.len(),
            ResourceKind::Script => self.scripts.len(),
            ResourceKind::Shader => self.shaders.len(),
            ResourceKind::Font => self.fonts.len(),
            ResourceKind::Timeline => self.timelines.len(),
            ResourceKind::Object => self.objects.len(),
            ResourceKind::Room => self.rooms.len(),
            ResourceKind::GameInformation | ResourceKind::GameSettings => 1,
        }
    }

    /// Numbering counter of a category, `None` for the project wide resources.
    pub fn last_id(&self, kind: ResourceKind) -> Option<i32> {
        let last_id = match kind {
            ResourceKind::Sprite => self.sprites.last_id(),
            ResourceKind::Sound => self.sounds.last_id(),
            ResourceKind::Background => self.backgrounds.last_id(),
            ResourceKind::Path => self.paths.last_id(),
            ResourceKind::Script => self.scripts.last_id(),
            ResourceKind::Shader => self.shaders.last_id(),
            ResourceKind::Font => self.fonts.last_id(),
            ResourceKind::Timeline => self.timelines.last_id(),
            ResourceKind::Object => self.objects.last_id(),
            ResourceKind::Room => self.rooms.last_id(),
            ResourceKind::GameInformation | ResourceKind::GameSettings => return None,
        };
        Some(last_id)
    }

    pub fn bump_last_id(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Sprite => self.sprites.bump_last_id(),
            ResourceKind::Sound => self.sounds.bump_last_id(),
            ResourceKind::Background => self.backgrounds.bump_last_id(),
            ResourceKind::Path => self.paths.bump_last_id(),
            ResourceKind::Script => self.scripts.bump_last_id(),
            ResourceKind::Shader => self.shaders.bump_last_id(),
            ResourceKind::Font => self.fonts.bump_last_id(),
            ResourceKind::Timeline => self.timelines.bump_last_id(),
            ResourceKind::Object => self.objects.bump_last_id(),
            ResourceKind::Room => self.rooms.bump_last_id(),
            ResourceKind::GameInformation | ResourceKind::GameSettings => {}
        }
    }

    pub fn name_of(&self, reference: ResourceRef) -> Option<&str> {
        let name = match reference {
            ResourceRef::Sprite(id) => &self.sprites.get_id(id)?.name,
            ResourceRef::Sound(id) => &self.sounds.get_id(id)?.name,
            ResourceRef::Background(id) => &self.backgrounds.get_id(id)?.name,
            ResourceRef::Path(id) => &self.paths.get_id(id)?.name,
            ResourceRef::Script(id) => &self.scripts.get_id(id)?.name,
            ResourceRef::Shader(id) => &self.shaders.get_id(id)?.name,
            ResourceRef::Font(id) => &self.fonts.get_id(id)?.name,
            ResourceRef::Timeline(id) => &self.timelines.get_id(id)?.name,
            ResourceRef::Object(id) => &self.objects.get_id(id)?.name,
            ResourceRef::Room(id) => &self.rooms.get_id(id)?.name,
            ResourceRef::GameInformation | ResourceRef::GameSettings => {
                return Some(reference.kind().folder_name())
            }
        };
        Some(name.as_str())
    }

    pub fn actions_mut(&mut self, owner: ActionOwner) -> Option<&mut Vec<Action>> {
        match owner {
            ActionOwner::Event {
                object,
                main,
                event,
            } => self
                .objects
                .get_id_mut(object)?
                .props
                .main_event_mut(main)
                .events
                .get_mut(event)
                .map(|event| &mut event.actions),
            ActionOwner::Moment { timeline, moment } => self
                .timelines
                .get_id_mut(timeline)?
                .props
                .moments
                .get_mut(moment)
                .map(|moment| &mut moment.actions),
        }
    }

    pub fn action_mut(&mut self, owner: ActionOwner, index: usize) -> Option<&mut Action> {
        self.actions_mut(owner)?.get_mut(index)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        action::{Event, LibAction},
        timeline::Moment,
    };
    use std::sync::Arc;

    #[test]
    fn test_action_lookup_by_owner() {
        let mut project = Project::new();
        let object = project.objects.add("obj_player").id;
        project.objects[object].props.prepend_event(Event {
            main: MainEventKind::Step,
            actions: vec![Action::new(Arc::new(LibAction::code_action()))],
            ..Default::default()
        });
        let owner = ActionOwner::Event {
            object,
            main: MainEventKind::Step,
            event: 0,
        };
        let action = project.action_mut(owner, 0).map(|a| a.relative = true);
        assert!(action.is_some());
        assert!(project.action_mut(owner, 1).is_none());

        let timeline = project.timelines.add("tl_intro").id;
        project.timelines[timeline].props.moments.push(Moment::default());
        let owner = ActionOwner::Moment {
            timeline,
            moment: 0,
        };
        assert_eq!(project.actions_mut(owner).map(|a| a.len()), Some(0));
    }

    #[test]
    fn test_names_by_reference() {
        let mut project = Project::new();
        let id = Sprite::list_mut(&mut project).add("spr_wall").id;
        assert_eq!(project.name_of(Sprite::reference(id)), Some("spr_wall"));
        assert_eq!(project.name_of(ResourceRef::Room(Id::new(3))), None);
        assert_eq!(
            project.name_of(ResourceRef::GameSettings),
            Some("Global Game Settings")
        );
    }
}
