use std::sync::Arc;

use gmx_core::ProjectPaths;
use gmx_project_models::{
    action::LibAction, Id, Project, ResNode, ResourceKind, ResourceRef, ResourceType,
};
use miette::{Result, WrapErr};
use smol_str::SmolStr;
use tracing::trace;

use crate::{
    catalog::ActionLibrary, codec::MediaCodec, config::ReaderConfig, deferred::DeferredRefs,
    document::{GmxDocument, GmxNode},
    names::GmxName,
};

/// Everything a single load owns. Nothing here outlives the call that created it.
pub(crate) struct LoadContext<'a> {
    pub project: Project,
    pub deferred: DeferredRefs,
    pub paths: ProjectPaths,
    pub codec: &'a dyn MediaCodec,
    pub library: &'a dyn ActionLibrary,
    pub config: &'a ReaderConfig,
    pub code_action: Arc<LibAction>,
}

impl<'a> LoadContext<'a> {
    pub fn new(
        paths: ProjectPaths,
        codec: &'a dyn MediaCodec,
        library: &'a dyn ActionLibrary,
        config: &'a ReaderConfig,
    ) -> Self {
        Self {
            project: Project::new(),
            deferred: DeferredRefs::new(),
            paths,
            codec,
            library,
            config,
            code_action: Arc::new(LibAction::code_action()),
        }
    }

    /// Creates an empty record and bumps the numbering counter.
    pub fn add<T: ResourceType + Default>(&mut self, name: &SmolStr) -> Id<T> {
        let id = T::list_mut(&mut self.project).add(name.clone()).id;
        let counter = self.counter_of(T::KIND);
        self.project.bump_last_id(counter);
        trace!(kind = %T::KIND, %name, id = id.index(), "registered");
        id
    }

    pub fn store<T: ResourceType>(&mut self, id: Id<T>, props: T) {
        T::list_mut(&mut self.project)[id].props = props;
    }

    fn counter_of(&self, kind: ResourceKind) -> ResourceKind {
        if !self.config.legacy_last_id {
            return kind;
        }
        match kind {
            ResourceKind::Shader => ResourceKind::Script,
            ResourceKind::Room => ResourceKind::Timeline,
            other => other,
        }
    }
}

/// Reads one category section of the manifest into its fixed folder.
/// Nested sections with the same tag become groups, `leaf` elements are handed to `read_leaf`.
pub(crate) fn walk_section<F>(
    ctx: &mut LoadContext,
    manifest: &GmxDocument,
    kind: ResourceKind,
    section: GmxName,
    leaf: GmxName,
    mut read_leaf: F,
) -> Result<ResNode>
where
    F: FnMut(&mut LoadContext, GmxNode) -> Result<(SmolStr, ResourceRef)>,
{
    let mut folder = ResNode::primary(kind);
    match manifest.first(section) {
        Some(node) => {
            walk_children(ctx, node, kind, section, leaf, &mut read_leaf, &mut folder)?;
        }
        None => trace!("no <{section}> section"),
    }
    Ok(folder)
}

fn walk_children<F>(
    ctx: &mut LoadContext,
    parent: GmxNode,
    kind: ResourceKind,
    section: GmxName,
    leaf: GmxName,
    read_leaf: &mut F,
    folder: &mut ResNode,
) -> Result<()>
where
    F: FnMut(&mut LoadContext, GmxNode) -> Result<(SmolStr, ResourceRef)>,
{
    for child in parent.children() {
        match child.name() {
            Some(name) if name == section => {
                let label = child.attr(GmxName::Name).unwrap_or_default();
                let group = folder.add_group(label, kind);
                walk_children(ctx, child, kind, section, leaf, read_leaf, group)?;
            }
            Some(name) if name == leaf => {
                let (label, reference) = read_leaf(ctx, child)
                    .wrap_err_with(|| format!("failed to read {kind} {}", child.text().trim()))?;
                folder.add_leaf(label, reference);
            }
            _ => trace!("skipped unexpected element in <{section}>"),
        }
    }
    Ok(())
}
