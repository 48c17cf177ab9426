use std::path::Path;

use gmx_core::ProjectPaths;
use gmx_project_models::{Project, ResNode, ResourceKind};
use miette::{Result, WrapErr};
use tracing::{debug, info, instrument, trace, warn};

use crate::{
    catalog::{ActionLibrary, EmptyActionLibrary},
    codec::{ImageCodec, MediaCodec},
    config::ReaderConfig,
    context::LoadContext,
    document::GmxDocument,
    readers::{background, font, object, path, room, script, settings, sound, sprite, timeline},
};

type CategoryReader = fn(&mut LoadContext, &GmxDocument) -> Result<ResNode>;

/// Categories in the order the editor itself reads them. Ids and tree folders follow this order.
const CATEGORY_READERS: [(ResourceKind, CategoryReader); 10] = [
    (ResourceKind::Sprite, sprite::read_sprites),
    (ResourceKind::Sound, sound::read_sounds),
    (ResourceKind::Background, background::read_backgrounds),
    (ResourceKind::Path, path::read_paths),
    (ResourceKind::Script, script::read_scripts),
    (ResourceKind::Shader, script::read_shaders),
    (ResourceKind::Font, font::read_fonts),
    (ResourceKind::Timeline, timeline::read_timelines),
    (ResourceKind::Object, object::read_objects),
    (ResourceKind::Room, room::read_rooms),
];

/// Reads a whole `*.project.gmx` into a [`Project`].
///
/// Every call owns its own registries and reference queue, nothing carries over between reads.
pub struct ProjectReader {
    codec: Box<dyn MediaCodec>,
    library: Box<dyn ActionLibrary>,
    config: ReaderConfig,
}

impl Default for ProjectReader {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}

impl ProjectReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            codec: Box::new(ImageCodec),
            library: Box::new(EmptyActionLibrary),
            config,
        }
    }

    pub fn with_codec(mut self, codec: impl MediaCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn with_library(mut self, library: impl ActionLibrary + 'static) -> Self {
        self.library = Box::new(library);
        self
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    #[instrument(skip_all, fields(manifest = %manifest.display()))]
    pub fn read(&self, manifest: &Path) -> Result<Project> {
        let start = std::time::SystemTime::now();
        let doc = GmxDocument::open(manifest).wrap_err("failed to open the project manifest")?;
        let mut ctx = LoadContext::new(
            ProjectPaths::new(manifest),
            self.codec.as_ref(),
            self.library.as_ref(),
            &self.config,
        );

        let mut root = ResNode::root();
        for (kind, read_category) in CATEGORY_READERS {
            let folder = read_category(&mut ctx, &doc)?;
            debug!("{} read: {}", kind.folder_name(), ctx.project.len_of(kind));
            root.push(folder);
        }
        // includes, extensions and packages are not part of the model
        if let Some(leaf) = settings::read_game_information(&mut ctx, &doc)? {
            root.push(leaf);
        }
        if let Some(leaf) = settings::read_game_settings(&mut ctx, &doc)? {
            root.push(leaf);
        }
        let elapsed = start.elapsed().unwrap_or_default();
        info!("reading project files took {} ms", elapsed.as_millis());

        let LoadContext {
            mut project,
            deferred,
            ..
        } = ctx;
        let queued = deferred.len();
        let report = deferred.resolve_all(&mut project);
        info!(
            "references resolved: {} of {queued}, dangling: {}",
            report.resolved,
            report.dangling.len()
        );
        for (kind, lookup) in &report.dangling {
            if self.config.report_dangling_references {
                warn!(%kind, %lookup, "unresolved reference");
            } else {
                trace!(%kind, %lookup, "unresolved reference");
            }
        }
        project.tree = root;

        for kind in ResourceKind::LISTED {
            info!("{} registered: {}", kind.folder_name(), project.len_of(kind));
        }
        Ok(project)
    }
}
