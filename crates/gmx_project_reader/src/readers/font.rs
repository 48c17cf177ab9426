use gmx_project_models::{font::Font, ResNode, ResourceKind, ResourceRef};
use miette::{miette, Result};
use smol_str::SmolStr;
use tracing::{info_span, instrument};

use crate::{
    context::{walk_section, LoadContext},
    document::{GmxDocument, GmxNode},
    fields::parse_number,
    names::GmxName,
};

#[instrument(skip_all)]
pub(crate) fn read_fonts(ctx: &mut LoadContext, manifest: &GmxDocument) -> Result<ResNode> {
    walk_section(
        ctx,
        manifest,
        ResourceKind::Font,
        GmxName::Fonts,
        GmxName::Font,
        read_font,
    )
}

fn read_font(ctx: &mut LoadContext, entry: GmxNode) -> Result<(SmolStr, ResourceRef)> {
    let relative = entry.relative_path();
    let name = SmolStr::new(relative.file_name());
    let id = ctx.add::<Font>(&name);
    let _span = info_span!("load file", file_name = %relative).entered();

    let doc = GmxDocument::open(&ctx.paths.side_file(&relative, ".font.gmx"))?;
    let range = doc.text_of(GmxName::Range0)?;
    let (min, max) = range
        .split_once(',')
        .ok_or_else(|| miette!("<range0> holds {range:?}, expected min,max"))?;
    let mut font = Font {
        font_name: doc.text_of(GmxName::Name)?,
        size: doc.parse_first(GmxName::Size)?,
        bold: doc.flag(GmxName::Bold)?,
        italic: doc.flag(GmxName::Italic)?,
        charset: doc.parse_first(GmxName::Charset)?,
        antialias: doc.parse_first(GmxName::Aa)?,
        range_min: parse_number(min, GmxName::Range0)?,
        range_max: parse_number(max, GmxName::Range0)?,
        ..Default::default()
    };
    if let Some(node) = doc.first(GmxName::Renderhq) {
        font.high_quality = node.flag()?;
    }
    if let Some(node) = doc.first(GmxName::IncludeTtf) {
        font.include_ttf = node.flag()?;
    }

    ctx.store(id, font);
    Ok((name, ResourceRef::Font(id)))
}
