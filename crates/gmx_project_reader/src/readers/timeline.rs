use gmx_project_models::{
    timeline::{Moment, Timeline},
    ActionOwner, ResNode, ResourceKind, ResourceRef,
};
use miette::Result;
use smol_str::SmolStr;
use tracing::{debug, info_span, instrument};

use crate::{
    context::{walk_section, LoadContext},
    document::{GmxDocument, GmxNode},
    names::GmxName,
    readers::actions::read_actions,
};

#[instrument(skip_all)]
pub(crate) fn read_timelines(ctx: &mut LoadContext, manifest: &GmxDocument) -> Result<ResNode> {
    walk_section(
        ctx,
        manifest,
        ResourceKind::Timeline,
        GmxName::Timelines,
        GmxName::Timeline,
        read_timeline,
    )
}

fn read_timeline(ctx: &mut LoadContext, entry: GmxNode) -> Result<(SmolStr, ResourceRef)> {
    let relative = entry.relative_path();
    let name = SmolStr::new(relative.file_name());
    let id = ctx.add::<Timeline>(&name);
    let _span = info_span!("load file", file_name = %relative).entered();

    let doc = GmxDocument::open(&ctx.paths.side_file(&relative, ".timeline.gmx"))?;
    let mut timeline = Timeline::default();
    for node in doc.elements_by_name(GmxName::Entry) {
        let owner = ActionOwner::Moment {
            timeline: id,
            moment: timeline.moments.len(),
        };
        let mut moment = Moment::default();
        for child in node.children() {
            match child.name() {
                Some(GmxName::Step) => moment.step = child.parse()?,
                Some(GmxName::Event) => {
                    let actions = read_actions(ctx, owner, child, moment.actions.len())?;
                    moment.actions.extend(actions);
                }
                _ => {}
            }
        }
        timeline.moments.push(moment);
    }
    debug!(moments = timeline.moments.len(), "timeline {name} read");

    ctx.store(id, timeline);
    Ok((name, ResourceRef::Timeline(id)))
}
