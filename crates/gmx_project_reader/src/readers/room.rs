use glam::IVec2;
use gmx_project_models::{
    background::Background,
    object::GmObject,
    room::{
        BackgroundDef, EditorSettings, EditorToggle, Instance, Rect, Rgb, Room, Tile, View,
    },
    Id, ResNode, ResourceKind, ResourceRef,
};
use miette::Result;
use smol_str::SmolStr;
use tracing::{debug, info_span, instrument, trace};

use crate::{
    context::{walk_section, LoadContext},
    document::{GmxDocument, GmxNode},
    names::GmxName,
};

const EDITOR_TOGGLES: [(GmxName, EditorToggle); 8] = [
    (GmxName::ShowGrid, EditorToggle::ShowGrid),
    (GmxName::ShowObjects, EditorToggle::ShowObjects),
    (GmxName::ShowTiles, EditorToggle::ShowTiles),
    (GmxName::ShowBackgrounds, EditorToggle::ShowBackgrounds),
    (GmxName::ShowForegrounds, EditorToggle::ShowForegrounds),
    (GmxName::ShowViews, EditorToggle::ShowViews),
    (GmxName::DeleteUnderlyingObj, EditorToggle::DeleteUnderlyingObjects),
    (GmxName::DeleteUnderlyingTiles, EditorToggle::DeleteUnderlyingTiles),
];

// an instance carrying none of these is an empty placeholder left by the editor
const INSTANCE_ATTRIBUTES: [GmxName; 6] = [
    GmxName::ObjName,
    GmxName::X,
    GmxName::Y,
    GmxName::Name,
    GmxName::Code,
    GmxName::Locked,
];

#[instrument(skip_all)]
pub(crate) fn read_rooms(ctx: &mut LoadContext, manifest: &GmxDocument) -> Result<ResNode> {
    walk_section(
        ctx,
        manifest,
        ResourceKind::Room,
        GmxName::Rooms,
        GmxName::Room,
        read_room,
    )
}

fn read_room(ctx: &mut LoadContext, entry: GmxNode) -> Result<(SmolStr, ResourceRef)> {
    let relative = entry.relative_path();
    let name = SmolStr::new(relative.file_name());
    let id = ctx.add::<Room>(&name);
    let _span = info_span!("load file", file_name = %relative).entered();

    let doc = GmxDocument::open(&ctx.paths.side_file(&relative, ".room.gmx"))?;
    let root = doc.root();
    let mut room = Room {
        caption: root.required_child(GmxName::Caption)?.text(),
        size: IVec2::new(
            root.required_child(GmxName::Width)?.parse()?,
            root.required_child(GmxName::Height)?.parse()?,
        ),
        snap: IVec2::new(
            root.required_child(GmxName::Hsnap)?.parse()?,
            root.required_child(GmxName::Vsnap)?.parse()?,
        ),
        isometric: root.required_child(GmxName::Isometric)?.flag()?,
        speed: root.required_child(GmxName::Speed)?.parse()?,
        persistent: root.required_child(GmxName::Persistent)?.flag()?,
        background_color: Rgb::from_packed_bgr(root.required_child(GmxName::Colour)?.parse()?),
        draw_background_color: root.required_child(GmxName::Showcolour)?.flag()?,
        creation_code: root.required_child(GmxName::Code)?.text(),
        enable_views: root.required_child(GmxName::EnableViews)?.flag()?,
        ..Default::default()
    };
    if let Some(node) = root.child(GmxName::ClearViewBackground) {
        room.clear_view_background = node.flag()?;
    }
    if let Some(node) = root.child(GmxName::MakerSettings) {
        room.editor = read_editor_settings(node)?;
    }

    if let Some(list) = root.child(GmxName::Backgrounds) {
        for node in list.children().filter(|node| node.is(GmxName::Background)) {
            let index = room.backgrounds.len();
            room.backgrounds.push(read_background_def(node)?);
            let background = node.attr(GmxName::Name).unwrap_or_default();
            ctx.deferred
                .postpone::<Background>(background, move |project, background| {
                    if let Some(def) = project.rooms[id].props.backgrounds.get_mut(index) {
                        def.background = Some(background);
                    }
                });
        }
    }

    if let Some(list) = root.child(GmxName::Views) {
        for node in list.children().filter(|node| node.is(GmxName::View)) {
            let index = room.views.len();
            room.views.push(read_view(node)?);
            let follow = node.attr(GmxName::ObjName).unwrap_or_default();
            ctx.deferred.postpone::<GmObject>(follow, move |project, object| {
                if let Some(view) = project.rooms[id].props.views.get_mut(index) {
                    view.follow = Some(object);
                }
            });
        }
    }

    if let Some(list) = root.child(GmxName::Instances) {
        for node in list.children().filter(|node| node.is(GmxName::Instance)) {
            if !node.has_any_attr(&INSTANCE_ATTRIBUTES) {
                trace!("skipped empty instance");
                continue;
            }
            let index = room.instances.len();
            room.instances.push(read_instance(node)?);
            let object = node.attr(GmxName::ObjName).unwrap_or_default();
            ctx.deferred.postpone::<GmObject>(object, move |project, object| {
                set_instance_object(&mut project.rooms[id].props, index, object);
            });
        }
    }

    if let Some(list) = root.child(GmxName::Tiles) {
        for node in list.children().filter(|node| node.is(GmxName::Tile)) {
            let index = room.tiles.len();
            room.tiles.push(read_tile(node)?);
            let background = node.attr(GmxName::BgName).unwrap_or_default();
            ctx.deferred
                .postpone::<Background>(background, move |project, background| {
                    if let Some(tile) = project.rooms[id].props.tiles.get_mut(index) {
                        tile.background = Some(background);
                    }
                });
        }
    }

    debug!(
        instances = room.instances.len(),
        tiles = room.tiles.len(),
        "room {name} read"
    );
    ctx.store(id, room);
    Ok((name, ResourceRef::Room(id)))
}

fn set_instance_object(room: &mut Room, index: usize, object: Id<GmObject>) {
    if let Some(instance) = room.instances.get_mut(index) {
        instance.object = Some(object);
    }
}

fn read_editor_settings(node: GmxNode) -> Result<EditorSettings> {
    let mut editor = EditorSettings::default();
    // nothing else is meaningful until the room was saved from the editor once
    if !node.required_child(GmxName::IsSet)?.flag()? {
        return Ok(editor);
    }
    editor.remember = true;
    editor.size = IVec2::new(
        node.required_child(GmxName::W)?.parse()?,
        node.required_child(GmxName::H)?.parse()?,
    );
    for (name, toggle) in EDITOR_TOGGLES {
        if node.required_child(name)?.flag()? {
            editor.toggles.insert(toggle);
        }
    }
    editor.page = node.required_child(GmxName::Page)?.parse()?;
    editor.scroll = IVec2::new(
        node.required_child(GmxName::Xoffset)?.parse()?,
        node.required_child(GmxName::Yoffset)?.parse()?,
    );
    Ok(editor)
}

fn read_background_def(node: GmxNode) -> Result<BackgroundDef> {
    Ok(BackgroundDef {
        visible: node.attr_flag(GmxName::Visible)?,
        background: None,
        foreground: node.attr_flag(GmxName::Foreground)?,
        tile_horizontal: node.attr_flag(GmxName::Htiled)?,
        tile_vertical: node.attr_flag(GmxName::Vtiled)?,
        stretch: node.attr_flag(GmxName::Stretch)?,
        speed: attr_vec(node, GmxName::Hspeed, GmxName::Vspeed)?,
        position: attr_vec(node, GmxName::X, GmxName::Y)?,
    })
}

fn read_view(node: GmxNode) -> Result<View> {
    Ok(View {
        visible: node.attr_flag(GmxName::Visible)?,
        follow: None,
        speed: attr_vec(node, GmxName::Hspeed, GmxName::Vspeed)?,
        border: attr_vec(node, GmxName::Hborder, GmxName::Vborder)?,
        port: Rect {
            position: attr_vec(node, GmxName::Xport, GmxName::Yport)?,
            size: attr_vec(node, GmxName::Wport, GmxName::Hport)?,
        },
        view: Rect {
            position: attr_vec(node, GmxName::Xview, GmxName::Yview)?,
            size: attr_vec(node, GmxName::Wview, GmxName::Hview)?,
        },
    })
}

fn read_instance(node: GmxNode) -> Result<Instance> {
    Ok(Instance {
        name: node.attr(GmxName::Name).unwrap_or_default().into(),
        object: None,
        position: attr_vec(node, GmxName::X, GmxName::Y)?,
        creation_code: node.attr(GmxName::Code).unwrap_or_default().to_string(),
        locked: optional_flag(node, GmxName::Locked)?,
    })
}

fn read_tile(node: GmxNode) -> Result<Tile> {
    Ok(Tile {
        name: node.attr(GmxName::Name).unwrap_or_default().into(),
        background: None,
        position: attr_vec(node, GmxName::X, GmxName::Y)?,
        source: attr_vec(node, GmxName::Xo, GmxName::Yo)?,
        size: attr_vec(node, GmxName::W, GmxName::H)?,
        depth: node.attr_parse(GmxName::Depth)?,
        locked: optional_flag(node, GmxName::Locked)?,
    })
}

fn attr_vec(node: GmxNode, x: GmxName, y: GmxName) -> Result<IVec2> {
    Ok(IVec2::new(node.attr_parse(x)?, node.attr_parse(y)?))
}

fn optional_flag(node: GmxNode, name: GmxName) -> Result<bool> {
    match node.attr(name) {
        Some(_) => node.attr_flag(name),
        None => Ok(false),
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::*;

    const MAKER: &str = r#"<makerSettings>
    <isSet>-1</isSet>
    <w>1024</w>
    <h>600</h>
    <showGrid>-1</showGrid>
    <showObjects>-1</showObjects>
    <showTiles>0</showTiles>
    <showBackgrounds>-1</showBackgrounds>
    <showForegrounds>0</showForegrounds>
    <showViews>0</showViews>
    <deleteUnderlyingObj>0</deleteUnderlyingObj>
    <deleteUnderlyingTiles>-1</deleteUnderlyingTiles>
    <page>1</page>
    <xoffset>16</xoffset>
    <yoffset>-8</yoffset>
  </makerSettings>"#;

    #[test]
    fn test_editor_settings() {
        let doc = GmxDocument::parse(MAKER, Path::new("rm_start.room.gmx")).unwrap();
        let editor = read_editor_settings(doc.root()).unwrap();
        assert!(editor.remember);
        assert_eq!(editor.size, IVec2::new(1024, 600));
        assert_eq!(
            editor.toggles,
            EditorToggle::ShowGrid
                | EditorToggle::ShowObjects
                | EditorToggle::ShowBackgrounds
                | EditorToggle::DeleteUnderlyingTiles
        );
        assert_eq!(editor.page, 1);
        assert_eq!(editor.scroll, IVec2::new(16, -8));
    }

    #[test]
    fn test_unset_editor_settings_are_ignored() {
        let doc = GmxDocument::parse(
            "<makerSettings><isSet>0</isSet><w>bogus</w></makerSettings>",
            Path::new("rm_start.room.gmx"),
        )
        .unwrap();
        let editor = read_editor_settings(doc.root()).unwrap();
        assert_eq!(editor, EditorSettings::default());
    }

    #[test]
    fn test_view_rectangles() {
        let text = r#"<view visible="-1" objName="obj_player" xview="0" yview="32" wview="640" hview="480" xport="8" yport="0" wport="1280" hport="960" hborder="32" vborder="64" hspeed="-1" vspeed="4"/>"#;
        let doc = GmxDocument::parse(text, Path::new("rm_start.room.gmx")).unwrap();
        let view = read_view(doc.root()).unwrap();
        assert!(view.visible);
        assert_eq!(view.view.position, IVec2::new(0, 32));
        assert_eq!(view.view.size, IVec2::new(640, 480));
        assert_eq!(view.port.position, IVec2::new(8, 0));
        assert_eq!(view.port.size, IVec2::new(1280, 960));
        assert_eq!(view.border, IVec2::new(32, 64));
        assert_eq!(view.speed, IVec2::new(-1, 4));
    }
}
