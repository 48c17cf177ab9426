use bimap::BiMap;
use xot::{NameId, Xot};

macro_rules! gmx_names {
    ($($variant:ident => $text:tt),+ $(,)?) => {
        /// Every element and attribute name the reader understands.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum GmxName {
            $($variant),+
        }

        static GMX_NAMES: phf::Map<&'static str, GmxName> = phf::phf_map! {
            $($text => GmxName::$variant),+
        };

        impl GmxName {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(GmxName::$variant => $text),+
                }
            }
        }
    };
}

gmx_names! {
    // manifest
    Assets => "assets",
    Sprites => "sprites",
    Sprite => "sprite",
    Sounds => "sounds",
    Sound => "sound",
    Backgrounds => "backgrounds",
    Background => "background",
    Paths => "paths",
    Path => "path",
    Scripts => "scripts",
    Script => "script",
    Shaders => "shaders",
    Shader => "shader",
    Fonts => "fonts",
    Font => "font",
    Timelines => "timelines",
    Timeline => "timeline",
    Objects => "objects",
    Object => "object",
    Rooms => "rooms",
    Room => "room",
    Configs => "Configs",
    Config => "Config",
    Rtf => "rtf",
    Name => "name",
    Type => "type",
    // sprite
    Xorig => "xorig",
    Yorigin => "yorigin",
    Bboxmode => "bboxmode",
    BboxLeft => "bbox_left",
    BboxRight => "bbox_right",
    BboxTop => "bbox_top",
    BboxBottom => "bbox_bottom",
    Coltolerance => "coltolerance",
    Colkind => "colkind",
    Sepmasks => "sepmasks",
    Width => "width",
    Height => "height",
    Frame => "frame",
    // sound
    Kind => "kind",
    Extension => "extension",
    Data => "data",
    Volume => "volume",
    Pan => "pan",
    Preload => "preload",
    // background
    Istileset => "istileset",
    Tilewidth => "tilewidth",
    Tileheight => "tileheight",
    Tilexoff => "tilexoff",
    Tileyoff => "tileyoff",
    Tilehsep => "tilehsep",
    Tilevsep => "tilevsep",
    // path
    Precision => "precision",
    Closed => "closed",
    Backroom => "backroom",
    Hsnap => "hsnap",
    Vsnap => "vsnap",
    Point => "point",
    // font
    Size => "size",
    Bold => "bold",
    Italic => "italic",
    Charset => "charset",
    Aa => "aa",
    Range0 => "range0",
    Renderhq => "renderhq",
    IncludeTtf => "includeTTF",
    // timeline
    Entry => "entry",
    Step => "step",
    Event => "event",
    // object
    SpriteName => "spriteName",
    MaskName => "maskName",
    ParentName => "parentName",
    Solid => "solid",
    Visible => "visible",
    Depth => "depth",
    Persistent => "persistent",
    Eventtype => "eventtype",
    Enumb => "enumb",
    Ename => "ename",
    PhysicsObject => "PhysicsObject",
    PhysicsObjectSensor => "PhysicsObjectSensor",
    PhysicsObjectShape => "PhysicsObjectShape",
    PhysicsObjectDensity => "PhysicsObjectDensity",
    PhysicsObjectRestitution => "PhysicsObjectRestitution",
    PhysicsObjectGroup => "PhysicsObjectGroup",
    PhysicsObjectLinearDamping => "PhysicsObjectLinearDamping",
    PhysicsObjectAngularDamping => "PhysicsObjectAngularDamping",
    PhysicsObjectFriction => "PhysicsObjectFriction",
    PhysicsObjectAwake => "PhysicsObjectAwake",
    PhysicsObjectKinematic => "PhysicsObjectKinematic",
    // actions
    Action => "action",
    Libid => "libid",
    Id => "id",
    Userelative => "userelative",
    Isquestion => "isquestion",
    Useapplyto => "useapplyto",
    Exetype => "exetype",
    Functionname => "functionname",
    Codestring => "codestring",
    WhoName => "whoName",
    Relative => "relative",
    Isnot => "isnot",
    Arguments => "arguments",
    Argument => "argument",
    String => "string",
    // room
    Caption => "caption",
    Isometric => "isometric",
    Speed => "speed",
    Colour => "colour",
    Showcolour => "showcolour",
    Code => "code",
    EnableViews => "enableViews",
    ClearViewBackground => "clearViewBackground",
    MakerSettings => "makerSettings",
    IsSet => "isSet",
    W => "w",
    H => "h",
    ShowGrid => "showGrid",
    ShowObjects => "showObjects",
    ShowTiles => "showTiles",
    ShowBackgrounds => "showBackgrounds",
    ShowForegrounds => "showForegrounds",
    ShowViews => "showViews",
    DeleteUnderlyingObj => "deleteUnderlyingObj",
    DeleteUnderlyingTiles => "deleteUnderlyingTiles",
    Page => "page",
    Xoffset => "xoffset",
    Yoffset => "yoffset",
    Foreground => "foreground",
    Htiled => "htiled",
    Vtiled => "vtiled",
    Stretch => "stretch",
    Hspeed => "hspeed",
    Vspeed => "vspeed",
    X => "x",
    Y => "y",
    Views => "views",
    View => "view",
    ObjName => "objName",
    Hborder => "hborder",
    Vborder => "vborder",
    Hport => "hport",
    Wport => "wport",
    Xport => "xport",
    Yport => "yport",
    Hview => "hview",
    Wview => "wview",
    Xview => "xview",
    Yview => "yview",
    Instances => "instances",
    Instance => "instance",
    Locked => "locked",
    Tiles => "tiles",
    Tile => "tile",
    BgName => "bgName",
    Xo => "xo",
    Yo => "yo",
    // game settings
    OptionFullscreen => "option_fullscreen",
    OptionSizeable => "option_sizeable",
    OptionStayontop => "option_stayontop",
    OptionAborterrors => "option_aborterrors",
    OptionNoscreensaver => "option_noscreensaver",
    OptionShowcursor => "option_showcursor",
    OptionDisplayerrors => "option_displayerrors",
    OptionNoborder => "option_noborder",
    OptionNobuttons => "option_nobuttons",
    OptionArgumenterrors => "option_argumenterrors",
    OptionFreeze => "option_freeze",
    OptionColordepth => "option_colordepth",
    OptionFrequency => "option_frequency",
    OptionResolution => "option_resolution",
    OptionChangeresolution => "option_changeresolution",
    OptionPriority => "option_priority",
    OptionCloseesc => "option_closeesc",
    OptionInterpolate => "option_interpolate",
    OptionScale => "option_scale",
    OptionLastchanged => "option_lastchanged",
    OptionWindowsGameIcon => "option_windows_game_icon",
    OptionGameid => "option_gameid",
    OptionGameguid => "option_gameguid",
    OptionAuthor => "option_author",
    OptionVersionCompany => "option_version_company",
    OptionVersionCopyright => "option_version_copyright",
    OptionVersionDescription => "option_version_description",
    OptionVersionProduct => "option_version_product",
    OptionVersion => "option_version",
    OptionVersionBuild => "option_version_build",
    OptionVersionMajor => "option_version_major",
    OptionVersionMinor => "option_version_minor",
    OptionVersionRelease => "option_version_release",
}

impl GmxName {
    pub fn from_tag(tag: &str) -> Option<Self> {
        GMX_NAMES.get(tag).copied()
    }
}

impl std::fmt::Display for GmxName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registers every known name with the tree of one document.
/// Names are interned per [`Xot`], so a new table is needed for every parsed file.
pub(crate) fn register_with_xot(tree: &mut Xot) -> BiMap<GmxName, NameId> {
    let mut names = BiMap::with_capacity(GMX_NAMES.len());
    for (text, name) in GMX_NAMES.entries() {
        names.insert(*name, tree.add_name(text));
    }
    names
}
