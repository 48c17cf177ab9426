use glam::IVec2;
use gmx_core::MediaFolder;
use gmx_project_models::{
    sprite::{BoundingBox, BoundingBoxMode, MaskShape, Sprite},
    ResNode, ResourceKind, ResourceRef,
};
use miette::Result;
use smol_str::SmolStr;
use tracing::{info_span, instrument, trace};

use crate::{
    context::{walk_section, LoadContext},
    document::{GmxDocument, GmxNode},
    fields::parse_table,
    names::GmxName,
};

#[instrument(skip_all)]
pub(crate) fn read_sprites(ctx: &mut LoadContext, manifest: &GmxDocument) -> Result<ResNode> {
    walk_section(
        ctx,
        manifest,
        ResourceKind::Sprite,
        GmxName::Sprites,
        GmxName::Sprite,
        read_sprite,
    )
}

fn read_sprite(ctx: &mut LoadContext, entry: GmxNode) -> Result<(SmolStr, ResourceRef)> {
    let relative = entry.relative_path();
    let name = SmolStr::new(relative.file_name());
    let id = ctx.add::<Sprite>(&name);
    let _span = info_span!("load file", file_name = %relative).entered();

    let doc = GmxDocument::open(&ctx.paths.side_file(&relative, ".sprite.gmx"))?;
    let mut sprite = Sprite {
        origin: IVec2::new(
            doc.parse_first(GmxName::Xorig)?,
            doc.parse_first(GmxName::Yorigin)?,
        ),
        bbox_mode: parse_table(
            &doc.text_of(GmxName::Bboxmode)?,
            GmxName::Bboxmode,
            BoundingBoxMode::from_index,
        )?,
        bbox: BoundingBox {
            left: doc.parse_first(GmxName::BboxLeft)?,
            right: doc.parse_first(GmxName::BboxRight)?,
            top: doc.parse_first(GmxName::BboxTop)?,
            bottom: doc.parse_first(GmxName::BboxBottom)?,
        },
        alpha_tolerance: doc.parse_first(GmxName::Coltolerance)?,
        ..Default::default()
    };
    // written by newer versions of the editor only
    if let Some(node) = doc.first(GmxName::Colkind) {
        sprite.mask_shape = parse_table(&node.text(), GmxName::Colkind, MaskShape::from_index)?;
    }
    if let Some(node) = doc.first(GmxName::Sepmasks) {
        sprite.separate_masks = node.flag()?;
    }
    if let (Some(width), Some(height)) = (doc.first(GmxName::Width), doc.first(GmxName::Height)) {
        sprite.size = IVec2::new(width.parse()?, height.parse()?);
    }

    for frame in doc.elements_by_name(GmxName::Frame) {
        let path = ctx.paths.media(MediaFolder::Sprites, &frame.relative_path());
        if ctx.config.load_media {
            sprite.frames.push(ctx.codec.load_image(&path)?);
        } else {
            trace!("frame {} not loaded", path.display());
        }
    }
    trace!(frames = sprite.frames.len(), "sprite {name} read");

    ctx.store(id, sprite);
    Ok((name, ResourceRef::Sprite(id)))
}
