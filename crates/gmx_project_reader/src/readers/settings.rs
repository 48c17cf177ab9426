use gmx_core::RelativePath;
use gmx_project_models::{
    settings::{ColorDepth, Frequency, GameInformation, GameSettings, Priority, Resolution},
    ResNode, ResourceKind, ResourceRef,
};
use miette::{Result, WrapErr};
use tracing::{debug, info_span, instrument};

use crate::{
    context::LoadContext, document::GmxDocument, fields::parse_table, names::GmxName,
    readers::script::read_lines,
};

/// Reads the config listed under `<Configs name="configs">` in the manifest.
/// `None` when the project names no config, the settings then stay at their defaults.
#[instrument(skip_all)]
pub(crate) fn read_game_settings(
    ctx: &mut LoadContext,
    manifest: &GmxDocument,
) -> Result<Option<ResNode>> {
    let section = manifest
        .elements_by_name(GmxName::Configs)
        .find(|node| node.attr(GmxName::Name) == Some("configs"));
    let Some(config) = section.and_then(|section| section.child(GmxName::Config)) else {
        debug!("project names no config");
        return Ok(None);
    };
    let relative = config.relative_path();
    let _span = info_span!("load file", file_name = %relative).entered();

    let doc = GmxDocument::open(&ctx.paths.side_file(&relative, ".config.gmx"))?;
    let settings = read_config(ctx, &doc)
        .wrap_err_with(|| format!("failed to read game settings {relative}"))?;
    ctx.project.game_settings = settings;

    let kind = ResourceKind::GameSettings;
    Ok(Some(ResNode::leaf(kind.folder_name(), ResourceRef::GameSettings)))
}

fn read_config(ctx: &LoadContext, doc: &GmxDocument) -> Result<GameSettings> {
    let close_esc = doc.bool_of(GmxName::OptionCloseesc)?;
    let mut settings = GameSettings {
        start_fullscreen: doc.bool_of(GmxName::OptionFullscreen)?,
        allow_window_resize: doc.bool_of(GmxName::OptionSizeable)?,
        always_on_top: doc.bool_of(GmxName::OptionStayontop)?,
        abort_on_error: doc.bool_of(GmxName::OptionAborterrors)?,
        disable_screensavers: doc.bool_of(GmxName::OptionNoscreensaver)?,
        display_cursor: doc.bool_of(GmxName::OptionShowcursor)?,
        display_errors: doc.bool_of(GmxName::OptionDisplayerrors)?,
        dont_draw_border: doc.bool_of(GmxName::OptionNoborder)?,
        dont_show_buttons: doc.bool_of(GmxName::OptionNobuttons)?,
        error_on_args: doc.bool_of(GmxName::OptionArgumenterrors)?,
        freeze_on_lose_focus: doc.bool_of(GmxName::OptionFreeze)?,
        color_depth: parse_table(
            &doc.text_of(GmxName::OptionColordepth)?,
            GmxName::OptionColordepth,
            ColorDepth::from_index,
        )?,
        frequency: parse_table(
            &doc.text_of(GmxName::OptionFrequency)?,
            GmxName::OptionFrequency,
            Frequency::from_index,
        )?,
        resolution: parse_table(
            &doc.text_of(GmxName::OptionResolution)?,
            GmxName::OptionResolution,
            Resolution::from_index,
        )?,
        set_resolution: doc.bool_of(GmxName::OptionChangeresolution)?,
        priority: parse_table(
            &doc.text_of(GmxName::OptionPriority)?,
            GmxName::OptionPriority,
            Priority::from_index,
        )?,
        let_esc_end_game: close_esc,
        treat_close_as_escape: close_esc,
        interpolate: doc.bool_of(GmxName::OptionInterpolate)?,
        scaling: doc.parse_first(GmxName::OptionScale)?,
        game_id: doc.parse_first(GmxName::OptionGameid)?,
        guid: doc.text_of(GmxName::OptionGameguid)?,
        author: doc.text_of(GmxName::OptionAuthor)?,
        company: doc.text_of(GmxName::OptionVersionCompany)?,
        copyright: doc.text_of(GmxName::OptionVersionCopyright)?,
        description: doc.text_of(GmxName::OptionVersionDescription)?,
        product: doc.text_of(GmxName::OptionVersionProduct)?,
        version: doc.text_of(GmxName::OptionVersion)?,
        version_build: doc.parse_first(GmxName::OptionVersionBuild)?,
        version_major: doc.parse_first(GmxName::OptionVersionMajor)?,
        version_minor: doc.parse_first(GmxName::OptionVersionMinor)?,
        version_release: doc.parse_first(GmxName::OptionVersionRelease)?,
        ..Default::default()
    };
    if let Some(node) = doc.first(GmxName::OptionLastchanged) {
        if !node.text().trim().is_empty() {
            settings.last_changed = Some(node.parse()?);
        }
    }

    let icon = RelativePath::from_manifest(&doc.text_of(GmxName::OptionWindowsGameIcon)?);
    if ctx.config.load_media && !icon.is_empty() {
        settings.game_icon = ctx.codec.load_bytes(&ctx.paths.resolve(&icon))?;
    }
    Ok(settings)
}

/// The last `<rtf>` of the manifest names the game information document.
#[instrument(skip_all)]
pub(crate) fn read_game_information(
    ctx: &mut LoadContext,
    manifest: &GmxDocument,
) -> Result<Option<ResNode>> {
    let Some(rtf) = manifest.last(GmxName::Rtf) else {
        return Ok(None);
    };
    let relative = rtf.relative_path();
    let _span = info_span!("load file", file_name = %relative).entered();
    let text = read_lines(&ctx.paths.resolve(&relative))?;
    ctx.project.game_info = GameInformation { text };

    let kind = ResourceKind::GameInformation;
    Ok(Some(ResNode::leaf(kind.folder_name(), ResourceRef::GameInformation)))
}
