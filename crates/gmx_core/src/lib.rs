use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use tracing::trace;

/// A path as written in a GMX manifest, relative to the project directory.
///
/// Manifests are written on Windows, so separators are turned into `/` and leading
/// separators are dropped. Case is kept as is and `.`/`..` are left alone.
/// An empty path stands for the project directory itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativePath(SmolStr);

impl RelativePath {
    pub fn from_manifest(text: &str) -> Self {
        let text = text.trim().replace('\\', "/");
        Self(text.trim_start_matches('/').into())
    }

    /// Appends a raw suffix to the last component: `sprites/spr_a` + `.sprite.gmx`.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{suffix}", self.0).into())
    }

    /// Last component of the path, the whole path if there is no separator.
    pub fn file_name(&self) -> &str {
        let path = self.0.trim_end_matches('/');
        path.rsplit_once('/').map_or(path, |(_, name)| name)
    }

    /// File name without its last extension. A name without a dot is returned as is.
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(index) if index > 0 => &name[..index],
            _ => name,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RelativePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed sub folders where GMX keeps the binary payloads of some resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    Sprites,
    Backgrounds,
    Audio,
}

impl MediaFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFolder::Sprites => "sprites",
            MediaFolder::Backgrounds => "background",
            MediaFolder::Audio => "sound/audio",
        }
    }
}

/// Resolves every file of a project against the directory holding its manifest.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    manifest: PathBuf,
    root: PathBuf,
}

impl ProjectPaths {
    pub fn new(manifest: &Path) -> Self {
        let root = match manifest.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self {
            manifest: manifest.to_path_buf(),
            root,
        }
    }
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, relative: &RelativePath) -> PathBuf {
        if relative.is_empty() {
            return self.root.clone();
        }
        self.root.join(relative.as_str())
    }

    /// `<root>/<relative><suffix>`, the way GMX names per resource documents.
    pub fn side_file(&self, relative: &RelativePath, suffix: &str) -> PathBuf {
        let path = self.resolve(&relative.with_suffix(suffix));
        trace!("side file {}", path.display());
        path
    }

    /// `<root>/<media folder>/<relative>`.
    pub fn media(&self, folder: MediaFolder, relative: &RelativePath) -> PathBuf {
        let dir = self.root.join(folder.as_str());
        if relative.is_empty() {
            return dir;
        }
        dir.join(relative.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("sprites\\spr_player", "sprites/spr_player")]
    #[case("\\scripts\\scr_move.gml", "scripts/scr_move.gml")]
    #[case("  rooms/rm_start ", "rooms/rm_start")]
    #[case("", "")]
    fn test_from_manifest(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(RelativePath::from_manifest(input).as_str(), expected);
    }

    #[rstest]
    #[case("sprites\\spr_player", "spr_player", "spr_player")]
    #[case("scripts\\scr_move.gml", "scr_move.gml", "scr_move")]
    #[case("shaders\\shd_blur.shader", "shd_blur.shader", "shd_blur")]
    #[case("Configs\\Default", "Default", "Default")]
    #[case(".hidden", ".hidden", ".hidden")]
    fn test_names(#[case] input: &str, #[case] name: &str, #[case] stem: &str) {
        let path = RelativePath::from_manifest(input);
        assert_eq!(path.file_name(), name);
        assert_eq!(path.file_stem(), stem);
    }

    #[test]
    fn test_project_paths() {
        let paths = ProjectPaths::new(Path::new("/games/demo/demo.project.gmx"));
        assert_eq!(paths.root(), Path::new("/games/demo"));
        let sprite = RelativePath::from_manifest("sprites\\spr_player");
        assert_eq!(
            paths.side_file(&sprite, ".sprite.gmx"),
            PathBuf::from("/games/demo/sprites/spr_player.sprite.gmx")
        );
        let frame = RelativePath::from_manifest("images\\spr_player_0.png");
        assert_eq!(
            paths.media(MediaFolder::Sprites, &frame),
            PathBuf::from("/games/demo/sprites/images/spr_player_0.png")
        );
        let audio = RelativePath::from_manifest("snd_jump.wav");
        assert_eq!(
            paths.media(MediaFolder::Audio, &audio),
            PathBuf::from("/games/demo/sound/audio/snd_jump.wav")
        );
        assert_eq!(
            paths.media(MediaFolder::Backgrounds, &RelativePath::default()),
            PathBuf::from("/games/demo/background")
        );
    }

    #[test]
    fn test_bare_manifest_uses_current_dir() {
        let paths = ProjectPaths::new(Path::new("demo.project.gmx"));
        assert_eq!(paths.root(), Path::new("."));
    }
}
