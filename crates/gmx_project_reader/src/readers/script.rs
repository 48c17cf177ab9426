use std::path::Path;

use gmx_project_models::{
    script::{Script, Shader},
    ResNode, ResourceKind, ResourceRef,
};
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use smol_str::SmolStr;
use tracing::{info_span, instrument};

use crate::{
    context::{walk_section, LoadContext},
    document::{GmxDocument, GmxNode},
    names::GmxName,
};

/// Separates the vertex half of a shader file from its fragment half.
pub const SHADER_MARKER: &str =
    "//######################_==_YOYO_SHADER_MARKER_==_######################@~//";

#[instrument(skip_all)]
pub(crate) fn read_scripts(ctx: &mut LoadContext, manifest: &GmxDocument) -> Result<ResNode> {
    walk_section(
        ctx,
        manifest,
        ResourceKind::Script,
        GmxName::Scripts,
        GmxName::Script,
        read_script,
    )
}

#[instrument(skip_all)]
pub(crate) fn read_shaders(ctx: &mut LoadContext, manifest: &GmxDocument) -> Result<ResNode> {
    walk_section(
        ctx,
        manifest,
        ResourceKind::Shader,
        GmxName::Shaders,
        GmxName::Shader,
        read_shader,
    )
}

fn read_script(ctx: &mut LoadContext, entry: GmxNode) -> Result<(SmolStr, ResourceRef)> {
    let relative = entry.relative_path();
    let name = SmolStr::new(relative.file_stem());
    let id = ctx.add::<Script>(&name);
    let _span = info_span!("load file", file_name = %relative).entered();

    let code = read_lines(&ctx.paths.resolve(&relative))?;
    ctx.store(id, Script { code });
    Ok((name, ResourceRef::Script(id)))
}

fn read_shader(ctx: &mut LoadContext, entry: GmxNode) -> Result<(SmolStr, ResourceRef)> {
    let relative = entry.relative_path();
    let name = SmolStr::new(relative.file_stem());
    let id = ctx.add::<Shader>(&name);
    let _span = info_span!("load file", file_name = %relative).entered();

    let code = read_lines(&ctx.paths.resolve(&relative))?;
    let (vertex, fragment) = split_shader(&code)
        .ok_or_else(|| miette!("no shader marker in {relative}, the fragment half is missing"))?;
    let shader = Shader {
        kind: entry.attr(GmxName::Type).unwrap_or_default().into(),
        vertex: vertex.to_string(),
        fragment: fragment.to_string(),
    };
    ctx.store(id, shader);
    Ok((name, ResourceRef::Shader(id)))
}

/// Source text with every line terminated by `\n`, whatever the file used.
/// Bytes that are not UTF-8 are replaced, older projects were saved in the ANSI code page.
pub(crate) fn read_lines(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.lines().flat_map(|line| [line, "\n"]).collect())
}

fn split_shader(code: &str) -> Option<(&str, &str)> {
    let mut halves = code.split(SHADER_MARKER);
    let vertex = halves.next()?;
    let fragment = halves.next()?;
    Some((vertex, fragment))
}
