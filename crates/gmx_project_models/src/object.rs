use serde::Serialize;

use crate::{
    action::{Event, MainEvent, MainEventKind},
    registry::Id,
    sprite::Sprite,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhysicsProps {
    pub enabled: bool,
    pub sensor: bool,
    pub shape: i32,
    pub density: f64,
    pub restitution: f64,
    pub group: i32,
    pub linear_damping: f64,
    pub angular_damping: f64,
    pub friction: f64,
    pub awake: bool,
    pub kinematic: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GmObject {
    pub sprite: Option<Id<Sprite>>,
    pub mask: Option<Id<Sprite>>,
    pub parent: Option<Id<GmObject>>,
    pub solid: bool,
    pub visible: bool,
    pub depth: i32,
    pub persistent: bool,
    pub physics: Option<PhysicsProps>,
    /// one bucket per [`MainEventKind`], indexed by its position in the table
    pub main_events: [MainEvent; MainEventKind::COUNT],
}

impl GmObject {
    pub fn main_event(&self, kind: MainEventKind) -> &MainEvent {
        &self.main_events[kind as usize]
    }
    pub fn main_event_mut(&mut self, kind: MainEventKind) -> &mut MainEvent {
        &mut self.main_events[kind as usize]
    }

    /// Inserts the event at the front of its bucket, the way the editor stacks them.
    pub fn prepend_event(&mut self, event: Event) {
        self.main_event_mut(event.main).events.insert(0, event);
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.main_events.iter().flat_map(|main| main.events.iter())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_prepend_event_reverses_reading_order() {
        let mut obj = GmObject::default();
        for id in [0, 1, 2] {
            obj.prepend_event(Event {
                main: MainEventKind::Alarm,
                id,
                ..Default::default()
            });
        }
        obj.prepend_event(Event::default());
        let alarms: Vec<i32> = obj
            .main_event(MainEventKind::Alarm)
            .events
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(alarms, vec![2, 1, 0]);
        assert_eq!(obj.main_event(MainEventKind::Create).events.len(), 1);
        assert_eq!(obj.events().count(), 4);
    }
}
