use glam::{DVec2, IVec2};
use gmx_project_models::{
    path::{GmPath, PathPoint},
    room::Room,
    ResNode, ResourceKind, ResourceRef,
};
use itertools::Itertools;
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
pub(crate) fn read_paths(ctx: &mut LoadContext, manifest: &GmxDocument) -> Result<ResNode> {
    walk_section(
        ctx,
        manifest,
        ResourceKind::Path,
        GmxName::Paths,
        GmxName::Path,
        read_path,
    )
}

fn read_path(ctx: &mut LoadContext, entry: GmxNode) -> Result<(SmolStr, ResourceRef)> {
    let relative = entry.relative_path();
    let name = SmolStr::new(relative.file_name());
    let id = ctx.add::<GmPath>(&name);
    let _span = info_span!("load file", file_name = %relative).entered();

    let doc = GmxDocument::open(&ctx.paths.side_file(&relative, ".path.gmx"))?;
    let mut path = GmPath {
        precision: doc.parse_first(GmxName::Precision)?,
        closed: doc.flag(GmxName::Closed)?,
        snap: IVec2::new(
            doc.parse_first(GmxName::Hsnap)?,
            doc.parse_first(GmxName::Vsnap)?,
        ),
        ..Default::default()
    };
    if let Some(kind) = doc.first(GmxName::Kind) {
        path.smooth = kind.parse::<i32>()? == 1;
    }

    let room: i32 = doc.parse_first(GmxName::Backroom)?;
    if let Ok(position) = usize::try_from(room) {
        ctx.deferred.postpone_index::<Room>(position, move |project, room| {
            project.paths[id].props.background_room = Some(room);
        });
    }

    for point in doc.elements_by_name(GmxName::Point) {
        path.points.push(parse_point(&point.text())?);
    }

    ctx.store(id, path);
    Ok((name, ResourceRef::Path(id)))
}

/// `x,y,speed`
fn parse_point(text: &str) -> Result<PathPoint> {
    let (x, y, speed) = text
        .split(',')
        .collect_tuple()
        .ok_or_else(|| miette!("path point {text:?} is not x,y,speed"))?;
    Ok(PathPoint {
        position: DVec2::new(
            parse_number(x, GmxName::Point)?,
            parse_number(y, GmxName::Point)?,
        ),
        speed: parse_number(speed, GmxName::Point)?,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_point() {
        let point = parse_point("96,-32.5,100").unwrap();
        assert_eq!(point.position, DVec2::new(96.0, -32.5));
        assert_eq!(point.speed, 100.0);
    }

    #[rstest]
    #[case("96,32")]
    #[case("96,32,100,1")]
    #[case("96,up,100")]
    #[case("")]
    fn test_bad_point(#[case] text: &str) {
        assert!(parse_point(text).is_err());
    }
}
