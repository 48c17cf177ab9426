use std::{collections::VecDeque, fmt};

use gmx_project_models::{Id, Project, ResourceKind, ResourceType};
use smol_str::SmolStr;
use tracing::trace;

/// Written in place of a reference to mean "none".
pub const UNDEFINED: &str = "<undefined>";

pub fn is_no_reference(name: &str) -> bool {
    name.is_empty() || name == UNDEFINED
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Name(SmolStr),
    Index(usize),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Name(name) => write!(f, "{name:?}"),
            Lookup::Index(index) => write!(f, "#{index}"),
        }
    }
}

/// A reference found while reading, waiting for every record to exist.
pub struct PostponedRef {
    pub kind: ResourceKind,
    pub lookup: Lookup,
    complete: Box<dyn FnOnce(&mut Project) -> bool>,
}

impl fmt::Debug for PostponedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostponedRef")
            .field("kind", &self.kind)
            .field("lookup", &self.lookup)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct ResolveReport {
    pub resolved: usize,
    pub dangling: Vec<(ResourceKind, Lookup)>,
}

/// Queue of the references of one load. It is drained once, in the order references were found.
#[derive(Debug, Default)]
pub struct DeferredRefs {
    queue: VecDeque<PostponedRef>,
}

impl DeferredRefs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a lookup by name. Returns false, and queues nothing, for the reserved "no reference" names.
    pub fn postpone<T: ResourceType>(
        &mut self,
        name: &str,
        write: impl FnOnce(&mut Project, Id<T>) + 'static,
    ) -> bool {
        if is_no_reference(name) {
            return false;
        }
        let name = SmolStr::new(name);
        let key = name.clone();
        self.queue.push_back(PostponedRef {
            kind: T::KIND,
            lookup: Lookup::Name(name),
            complete: Box::new(move |project: &mut Project| {
                let found = T::list(project).id_of(&key);
                match found {
                    Some(id) => {
                        write(project, id);
                        true
                    }
                    None => false,
                }
            }),
        });
        true
    }

    /// Queues a lookup by position in the registry of `T`.
    pub fn postpone_index<T: ResourceType>(
        &mut self,
        position: usize,
        write: impl FnOnce(&mut Project, Id<T>) + 'static,
    ) {
        self.queue.push_back(PostponedRef {
            kind: T::KIND,
            lookup: Lookup::Index(position),
            complete: Box::new(move |project: &mut Project| {
                let found = T::list(project).get_index(position).map(|record| record.id);
                match found {
                    Some(id) => {
                        write(project, id);
                        true
                    }
                    None => false,
                }
            }),
        });
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Runs every task once. Failed lookups leave their slot untouched and are only reported.
    pub fn resolve_all(self, project: &mut Project) -> ResolveReport {
        let mut report = ResolveReport::default();
        for task in self.queue {
            let PostponedRef {
                kind,
                lookup,
                complete,
            } = task;
            if complete(project) {
                report.resolved += 1;
            } else {
                trace!(%kind, %lookup, "reference target does not exist");
                report.dangling.push((kind, lookup));
            }
        }
        report
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gmx_project_models::{object::GmObject, room::Room, sprite::Sprite};

    #[test]
    fn test_forward_reference() {
        let mut project = Project::new();
        let mut deferred = DeferredRefs::new();
        let object = project.objects.add("obj_player").id;
        deferred.postpone::<Sprite>("spr_player", move |project, sprite| {
            project.objects[object].props.sprite = Some(sprite);
        });
        // target registered after the reference was read
        let sprite = project.sprites.add("spr_player").id;

        let report = deferred.resolve_all(&mut project);
        assert_eq!(report.resolved, 1);
        assert!(report.dangling.is_empty());
        assert_eq!(project.objects[object].props.sprite, Some(sprite));
    }

    #[test]
    fn test_dangling_reference_is_silent() {
        let mut project = Project::new();
        let mut deferred = DeferredRefs::new();
        let object = project.objects.add("obj_enemy").id;
        deferred.postpone::<GmObject>("obj_missing", move |project, parent| {
            project.objects[object].props.parent = Some(parent);
        });
        let report = deferred.resolve_all(&mut project);
        assert_eq!(report.resolved, 0);
        assert_eq!(
            report.dangling,
            vec![(ResourceKind::Object, Lookup::Name("obj_missing".into()))]
        );
        assert_eq!(project.objects[object].props.parent, None);
    }

    #[test]
    fn test_reserved_names_queue_nothing() {
        let mut deferred = DeferredRefs::new();
        assert!(!deferred.postpone::<Sprite>(UNDEFINED, |_, _| {}));
        assert!(!deferred.postpone::<Sprite>("", |_, _| {}));
        assert!(deferred.is_empty());
    }

    #[test]
    fn test_lookup_by_position_and_order() {
        let mut project = Project::new();
        let mut deferred = DeferredRefs::new();
        let path = project.paths.add("pth_patrol").id;
        deferred.postpone_index::<Room>(1, move |project, room| {
            project.paths[path].props.background_room = Some(room);
        });
        deferred.postpone_index::<Room>(9, move |project, room| {
            project.paths[path].props.background_room = Some(room);
        });
        project.rooms.add("rm_a");
        let second = project.rooms.add("rm_b").id;

        let report = deferred.resolve_all(&mut project);
        assert_eq!(report.resolved, 1);
        assert_eq!(report.dangling, vec![(ResourceKind::Room, Lookup::Index(9))]);
        assert_eq!(project.paths[path].props.background_room, Some(second));
    }

    #[test]
    fn test_last_write_wins_when_resolving() {
        let mut project = Project::new();
        let mut deferred = DeferredRefs::new();
        let object = project.objects.add("obj_wall").id;
        deferred.postpone::<Sprite>("spr_dup", move |project, sprite| {
            project.objects[object].props.sprite = Some(sprite);
        });
        project.sprites.add("spr_dup");
        let second = project.sprites.add("spr_dup").id;
        deferred.resolve_all(&mut project);
        assert_eq!(project.objects[object].props.sprite, Some(second));
    }
}
