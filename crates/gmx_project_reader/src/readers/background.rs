use glam::IVec2;
use gmx_core::MediaFolder;
use gmx_project_models::{background::Background, ResNode, ResourceKind, ResourceRef};
use miette::Result;
use smol_str::SmolStr;
use tracing::{info_span, instrument};

use crate::{
    context::{walk_section, LoadContext},
    document::{GmxDocument, GmxNode},
    names::GmxName,
};

#[instrument(skip_all)]
pub(crate) fn read_backgrounds(ctx: &mut LoadContext, manifest: &GmxDocument) -> Result<ResNode> {
    walk_section(
        ctx,
        manifest,
        ResourceKind::Background,
        GmxName::Backgrounds,
        GmxName::Background,
        read_background,
    )
}

fn read_background(ctx: &mut LoadContext, entry: GmxNode) -> Result<(SmolStr, ResourceRef)> {
    let relative = entry.relative_path();
    let name = SmolStr::new(relative.file_name());
    let id = ctx.add::<Background>(&name);
    let _span = info_span!("load file", file_name = %relative).entered();

    let doc = GmxDocument::open(&ctx.paths.side_file(&relative, ".background.gmx"))?;
    let mut background = Background {
        use_as_tileset: doc.bool_of(GmxName::Istileset)?,
        tile_size: IVec2::new(
            doc.parse_first(GmxName::Tilewidth)?,
            doc.parse_first(GmxName::Tileheight)?,
        ),
        tile_offset: IVec2::new(
            doc.parse_first(GmxName::Tilexoff)?,
            doc.parse_first(GmxName::Tileyoff)?,
        ),
        tile_separation: IVec2::new(
            doc.parse_first(GmxName::Tilehsep)?,
            doc.parse_first(GmxName::Tilevsep)?,
        ),
        ..Default::default()
    };
    if let (Some(width), Some(height)) = (doc.first(GmxName::Width), doc.first(GmxName::Height)) {
        background.size = IVec2::new(width.parse()?, height.parse()?);
    }

    let image = doc.required(GmxName::Data)?.relative_path();
    if ctx.config.load_media && !image.is_empty() {
        let path = ctx.paths.media(MediaFolder::Backgrounds, &image);
        background.image = Some(ctx.codec.load_image(&path)?);
    }

    ctx.store(id, background);
    Ok((name, ResourceRef::Background(id)))
}
