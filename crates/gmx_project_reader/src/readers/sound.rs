use gmx_core::{MediaFolder, RelativePath};
use gmx_project_models::{
    sound::{Sound, SoundKind},
    ResNode, ResourceKind, ResourceRef,
};
use miette::{miette, Result};
use smol_str::SmolStr;
use tracing::{info_span, instrument};

use crate::{
    context::{walk_section, LoadContext},
    document::{GmxDocument, GmxNode},
    fields::parse_table,
    names::GmxName,
};

#[instrument(skip_all)]
pub(crate) fn read_sounds(ctx: &mut LoadContext, manifest: &GmxDocument) -> Result<ResNode> {
    walk_section(
        ctx,
        manifest,
        ResourceKind::Sound,
        GmxName::Sounds,
        GmxName::Sound,
        read_sound,
    )
}

fn read_sound(ctx: &mut LoadContext, entry: GmxNode) -> Result<(SmolStr, ResourceRef)> {
    let relative = entry.relative_path();
    let name = SmolStr::new(relative.file_name());
    let id = ctx.add::<Sound>(&name);
    let _span = info_span!("load file", file_name = %relative).entered();

    let doc = GmxDocument::open(&ctx.paths.side_file(&relative, ".sound.gmx"))?;
    // some exporters nest <volume> inside itself, the innermost one holds the value
    let volume = doc
        .last(GmxName::Volume)
        .ok_or_else(|| miette!("missing <volume> in {}", doc.path().display()))?
        .parse()?;
    let mut sound = Sound {
        kind: parse_table(
            &doc.text_of(GmxName::Kind)?,
            GmxName::Kind,
            SoundKind::from_index,
        )?,
        file_type: doc.text_of(GmxName::Extension)?,
        file_name: doc.text_of(GmxName::Data)?,
        volume,
        pan: doc.parse_first(GmxName::Pan)?,
        preload: doc.bool_of(GmxName::Preload)?,
        data: Vec::new(),
    };

    if ctx.config.load_media && !sound.file_name.is_empty() {
        let audio = RelativePath::from_manifest(&sound.file_name);
        sound.data = ctx
            .codec
            .load_bytes(&ctx.paths.media(MediaFolder::Audio, &audio))?;
    }

    ctx.store(id, sound);
    Ok((name, ResourceRef::Sound(id)))
}
