use gmx_project_models::{
    action::{Event, MainEventKind},
    object::{GmObject, PhysicsProps},
    sprite::Sprite,
    ActionOwner, ResNode, ResourceKind, ResourceRef,
};
use miette::Result;
use smol_str::SmolStr;
use tracing::{debug, info_span, instrument};

use crate::{
    context::{walk_section, LoadContext},
    document::{GmxDocument, GmxNode},
    fields::parse_table,
    names::GmxName,
    readers::actions::read_actions,
};

#[instrument(skip_all)]
pub(crate) fn read_objects(ctx: &mut LoadContext, manifest: &GmxDocument) -> Result<ResNode> {
    let folder = walk_section(
        ctx,
        manifest,
        ResourceKind::Object,
        GmxName::Objects,
        GmxName::Object,
        read_object,
    )?;
    if ctx.config.legacy_last_id {
        if let Some(section) = manifest.first(GmxName::Objects) {
            // the editor counts every child node of the section, whitespace included
            let last_id = section.child_node_count() as i32 - 1;
            ctx.project.objects.set_last_id(last_id);
        }
    }
    Ok(folder)
}

fn read_object(ctx: &mut LoadContext, entry: GmxNode) -> Result<(SmolStr, ResourceRef)> {
    let relative = entry.relative_path();
    let name = SmolStr::new(relative.file_name());
    let id = ctx.add::<GmObject>(&name);
    let _span = info_span!("load file", file_name = %relative).entered();

    let doc = GmxDocument::open(&ctx.paths.side_file(&relative, ".object.gmx"))?;

    let sprite = doc.text_of(GmxName::SpriteName)?;
    ctx.deferred.postpone::<Sprite>(&sprite, move |project, sprite| {
        project.objects[id].props.sprite = Some(sprite);
    });
    let mask = doc.text_of(GmxName::MaskName)?;
    ctx.deferred.postpone::<Sprite>(&mask, move |project, mask| {
        project.objects[id].props.mask = Some(mask);
    });
    let parent = doc.text_of(GmxName::ParentName)?;
    if parent != "self" {
        ctx.deferred.postpone::<GmObject>(&parent, move |project, parent| {
            project.objects[id].props.parent = Some(parent);
        });
    }

    let mut object = GmObject {
        solid: doc.flag(GmxName::Solid)?,
        visible: doc.flag(GmxName::Visible)?,
        depth: doc.parse_first(GmxName::Depth)?,
        persistent: doc.flag(GmxName::Persistent)?,
        physics: read_physics(&doc)?,
        ..Default::default()
    };

    let events = doc
        .elements_by_name(GmxName::Event)
        .map(|node| -> Result<(GmxNode, MainEventKind)> {
            let main = parse_table(
                node.required_attr(GmxName::Eventtype)?,
                GmxName::Eventtype,
                MainEventKind::from_index,
            )?;
            Ok((node, main))
        })
        .collect::<Result<Vec<_>>>()?;
    let mut remaining = [0usize; MainEventKind::COUNT];
    for (_, main) in &events {
        remaining[*main as usize] += 1;
    }

    for (node, main) in events {
        // events are prepended, so the first one read ends up last in its bucket
        remaining[main as usize] -= 1;
        let index = remaining[main as usize];
        let mut event = Event {
            main,
            ..Default::default()
        };
        if main == MainEventKind::Collision {
            let other = node.attr(GmxName::Ename).unwrap_or_default();
            ctx.deferred.postpone::<GmObject>(other, move |project, other| {
                let event = project.objects[id]
                    .props
                    .main_event_mut(MainEventKind::Collision)
                    .events
                    .get_mut(index);
                if let Some(event) = event {
                    event.other = Some(other);
                }
            });
        } else {
            event.id = node.attr_parse(GmxName::Enumb)?;
        }
        let owner = ActionOwner::Event {
            object: id,
            main,
            event: index,
        };
        event.actions = read_actions(ctx, owner, node, 0)?;
        object.prepend_event(event);
    }
    debug!(events = object.events().count(), "object {name} read");

    ctx.store(id, object);
    Ok((name, ResourceRef::Object(id)))
}

/// Only written by editors with physics support.
fn read_physics(doc: &GmxDocument) -> Result<Option<PhysicsProps>> {
    let Some(enabled) = doc.first(GmxName::PhysicsObject) else {
        return Ok(None);
    };
    Ok(Some(PhysicsProps {
        enabled: enabled.flag()?,
        sensor: doc.flag(GmxName::PhysicsObjectSensor)?,
        shape: doc.parse_first(GmxName::PhysicsObjectShape)?,
        density: doc.parse_first(GmxName::PhysicsObjectDensity)?,
        restitution: doc.parse_first(GmxName::PhysicsObjectRestitution)?,
        group: doc.parse_first(GmxName::PhysicsObjectGroup)?,
        linear_damping: doc.parse_first(GmxName::PhysicsObjectLinearDamping)?,
        angular_damping: doc.parse_first(GmxName::PhysicsObjectAngularDamping)?,
        friction: doc.parse_first(GmxName::PhysicsObjectFriction)?,
        awake: doc.flag(GmxName::PhysicsObjectAwake)?,
        kinematic: doc.flag(GmxName::PhysicsObjectKinematic)?,
    }))
}
