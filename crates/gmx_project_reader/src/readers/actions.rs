use std::sync::Arc;

use gmx_project_models::{
    action::{Action, ActionKind, AppliesTo, Argument, ArgumentKind, ExecType, LibAction},
    background::Background,
    font::Font,
    object::GmObject,
    path::GmPath,
    room::Room,
    script::Script,
    sound::Sound,
    sprite::Sprite,
    timeline::Timeline,
    ActionOwner, ResourceType,
};
use miette::{Result, WrapErr};
use smol_str::SmolStr;
use tracing::trace;

use crate::{
    context::LoadContext, deferred::DeferredRefs, document::GmxNode, fields::parse_table,
    names::GmxName,
};

/// Reads the `<action>` children of `parent`.
///
/// `first_index` is the position the first action will take in the list of `owner`.
/// References found in targets and arguments are queued against those positions, so the
/// caller must place the returned actions there before the queue is drained.
pub(crate) fn read_actions(
    ctx: &mut LoadContext,
    owner: ActionOwner,
    parent: GmxNode,
    first_index: usize,
) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    for (offset, node) in parent
        .children()
        .filter(|child| child.is(GmxName::Action))
        .enumerate()
    {
        let index = first_index + offset;
        let action = read_action(ctx, owner, node, index)
            .wrap_err_with(|| format!("failed to read action #{index}"))?;
        actions.push(action);
    }
    Ok(actions)
}

fn read_action(
    ctx: &mut LoadContext,
    owner: ActionOwner,
    node: GmxNode,
    index: usize,
) -> Result<Action> {
    let library_id: i32 = node.required_child(GmxName::Libid)?.parse()?;
    let action_id: i32 = node.required_child(GmxName::Id)?.parse()?;
    let kind = parse_table(
        &node.required_child(GmxName::Kind)?.text(),
        GmxName::Kind,
        ActionKind::from_index,
    )?;
    let exec_type = parse_table(
        &node.required_child(GmxName::Exetype)?.text(),
        GmxName::Exetype,
        ExecType::from_index,
    )?;

    let arguments = match node.child(GmxName::Arguments) {
        Some(list) => read_arguments(ctx, owner, index, list)?,
        None => Vec::new(),
    };

    let library = if kind == ActionKind::Code {
        ctx.code_action.clone()
    } else if let Some(known) = ctx.library.lookup(library_id, action_id) {
        known
    } else {
        trace!(library_id, action_id, "unknown action, describing it from the project");
        let exec_info = match exec_type {
            ExecType::Function => node.child(GmxName::Functionname),
            ExecType::Code => node.child(GmxName::Codestring),
            ExecType::None => None,
        };
        Arc::new(LibAction {
            library_id,
            id: action_id,
            name: SmolStr::default(),
            kind,
            allow_relative: node.required_child(GmxName::Userelative)?.flag()?,
            question: node.required_child(GmxName::Isquestion)?.flag()?,
            can_apply_to: node.required_child(GmxName::Useapplyto)?.flag()?,
            exec_type,
            exec_info: exec_info.map(|info| info.text()).unwrap_or_default(),
            argument_kinds: arguments.iter().map(|argument| argument.kind).collect(),
            synthesized: true,
        })
    };

    let mut action = Action::new(library);
    action.relative = node.required_child(GmxName::Relative)?.flag()?;
    action.not = node.required_child(GmxName::Isnot)?.flag()?;
    action.arguments = arguments;
    if let Some(who) = node.child(GmxName::WhoName) {
        action.applies_to = read_target(&mut ctx.deferred, owner, index, who.text().trim());
    }
    Ok(action)
}

fn read_target(
    deferred: &mut DeferredRefs,
    owner: ActionOwner,
    index: usize,
    who: &str,
) -> AppliesTo {
    match who {
        "self" | "" => AppliesTo::SelfInstance,
        "other" => AppliesTo::Other,
        object => {
            deferred.postpone::<GmObject>(object, move |project, object| {
                if let Some(action) = project.action_mut(owner, index) {
                    action.applies_to = AppliesTo::Object(object);
                }
            });
            AppliesTo::SelfInstance
        }
    }
}

fn read_arguments(
    ctx: &mut LoadContext,
    owner: ActionOwner,
    action: usize,
    list: GmxNode,
) -> Result<Vec<Argument>> {
    let mut arguments = Vec::new();
    for (position, node) in list
        .children()
        .filter(|child| child.is(GmxName::Argument))
        .enumerate()
    {
        let kind = parse_table(
            &node.required_child(GmxName::Kind)?.text(),
            GmxName::Kind,
            ArgumentKind::from_index,
        )?;
        let mut argument = Argument {
            kind,
            ..Default::default()
        };
        for field in node.children() {
            let Some(name) = field.name() else { continue };
            let value = field.text();
            let slot = (owner, action, position);
            let deferred = &mut ctx.deferred;
            match name {
                GmxName::Kind => continue,
                GmxName::String => {}
                GmxName::Sprite => defer_argument::<Sprite>(deferred, &value, slot),
                GmxName::Sound => defer_argument::<Sound>(deferred, &value, slot),
                GmxName::Background => defer_argument::<Background>(deferred, &value, slot),
                GmxName::Path => defer_argument::<GmPath>(deferred, &value, slot),
                GmxName::Script => defer_argument::<Script>(deferred, &value, slot),
                GmxName::Font => defer_argument::<Font>(deferred, &value, slot),
                GmxName::Object => defer_argument::<GmObject>(deferred, &value, slot),
                GmxName::Room => defer_argument::<Room>(deferred, &value, slot),
                GmxName::Timeline => defer_argument::<Timeline>(deferred, &value, slot),
                other => {
                    trace!("ignored <{other}> in an argument");
                    continue;
                }
            }
            argument.value = value;
        }
        arguments.push(argument);
    }
    Ok(arguments)
}

fn defer_argument<T: ResourceType>(
    deferred: &mut DeferredRefs,
    name: &str,
    (owner, action, argument): (ActionOwner, usize, usize),
) {
    deferred.postpone::<T>(name, move |project, id| {
        let slot = project
            .action_mut(owner, action)
            .and_then(|action| action.arguments.get_mut(argument));
        if let Some(slot) = slot {
            slot.resource = Some(T::reference(id));
        }
    });
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use gmx_core::ProjectPaths;
    use gmx_project_models::{timeline::Moment, ResourceRef};

    use super::*;
    use crate::{
        catalog::{ActionCatalog, ActionLibrary, EmptyActionLibrary},
        codec::ImageCodec,
        config::ReaderConfig,
        document::GmxDocument,
    };

    const EVENT: &str = r#"<event eventtype="3" enumb="0">
  <action>
    <libid>1</libid>
    <id>603</id>
    <kind>7</kind>
    <userelative>0</userelative>
    <isquestion>0</isquestion>
    <useapplyto>-1</useapplyto>
    <exetype>2</exetype>
    <functionname></functionname>
    <codestring></codestring>
    <whoName>self</whoName>
    <relative>0</relative>
    <isnot>0</isnot>
    <arguments>
      <argument>
        <kind>1</kind>
        <string>x += 1;</string>
      </argument>
    </arguments>
  </action>
  <action>
    <libid>1</libid>
    <id>101</id>
    <kind>0</kind>
    <userelative>-1</userelative>
    <isquestion>0</isquestion>
    <useapplyto>-1</useapplyto>
    <exetype>1</exetype>
    <functionname>action_move</functionname>
    <codestring></codestring>
    <whoName>obj_target</whoName>
    <relative>-1</relative>
    <isnot>0</isnot>
    <arguments>
      <argument>
        <kind>10</kind>
        <object>obj_target</object>
      </argument>
      <argument>
        <kind>0</kind>
        <string>4</string>
      </argument>
    </arguments>
  </action>
</event>"#;

    fn read_into_timeline(library: &dyn ActionLibrary) -> (LoadContext<'_>, Vec<Action>) {
        let mut ctx = LoadContext::new(
            ProjectPaths::new(Path::new("game.project.gmx")),
            &ImageCodec,
            library,
            &ReaderConfig {
                legacy_last_id: false,
                load_media: false,
                report_dangling_references: false,
            },
        );
        let timeline = ctx.project.timelines.add("tl_intro").id;
        ctx.project.timelines[timeline]
            .props
            .moments
            .push(Moment::default());
        let owner = ActionOwner::Moment {
            timeline,
            moment: 0,
        };
        let doc = GmxDocument::parse(EVENT, Path::new("tl_intro.timeline.gmx")).unwrap();
        let actions = read_actions(&mut ctx, owner, doc.root(), 0).unwrap();
        ctx.project.timelines[timeline].props.moments[0].actions = actions.clone();
        (ctx, actions)
    }

    #[test]
    fn test_code_action_substitution_and_fallback() {
        let (_, actions) = read_into_timeline(&EmptyActionLibrary);
        assert_eq!(actions.len(), 2);

        assert_eq!(*actions[0].library, LibAction::code_action());
        assert_eq!(actions[0].arguments[0].value, "x += 1;");
        assert_eq!(actions[0].applies_to, AppliesTo::SelfInstance);

        let fallback = &actions[1].library;
        assert!(fallback.synthesized);
        assert_eq!((fallback.library_id, fallback.id), (1, 101));
        assert_eq!(fallback.exec_type, ExecType::Function);
        assert_eq!(fallback.exec_info, "action_move");
        assert!(fallback.allow_relative);
        assert_eq!(
            fallback.argument_kinds,
            vec![ArgumentKind::Object, ArgumentKind::Expression]
        );
        assert!(actions[1].relative);
    }

    #[test]
    fn test_library_descriptor_is_used() {
        let mut catalog = ActionCatalog::new();
        catalog.register(LibAction {
            library_id: 1,
            id: 101,
            name: "Move Fixed".into(),
            ..Default::default()
        });
        let (_, actions) = read_into_timeline(&catalog);
        assert_eq!(actions[1].library.name, "Move Fixed");
        assert!(!actions[1].library.synthesized);
    }

    #[test]
    fn test_references_resolve_into_the_owner() {
        let (mut ctx, _) = read_into_timeline(&EmptyActionLibrary);
        let target = ctx.project.objects.add("obj_target").id;
        let deferred = std::mem::take(&mut ctx.deferred);
        let report = deferred.resolve_all(&mut ctx.project);
        assert_eq!(report.resolved, 2);

        let action = &ctx.project.timelines.iter().next().unwrap().props.moments[0].actions[1];
        assert_eq!(action.applies_to, AppliesTo::Object(target));
        assert_eq!(action.arguments[0].value, "obj_target");
        assert_eq!(action.arguments[0].resource, Some(ResourceRef::Object(target)));
        assert_eq!(action.arguments[1].resource, None);
    }
}
