use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use bimap::BiMap;
use gmx_core::RelativePath;
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use tracing::trace;
use xot::{NameId, Node, Xot};

use crate::{
    fields::{parse_bool, parse_flag, parse_number},
    names::{register_with_xot, GmxName},
};

/// One parsed GMX file: the manifest, a side file or a config.
pub struct GmxDocument {
    tree: Xot,
    root: Node,
    names: BiMap<GmxName, NameId>,
    path: PathBuf,
}

impl GmxDocument {
    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text, path)
    }

    /// `path` is only kept for error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut tree = Xot::new();
        let names = register_with_xot(&mut tree);
        let document = tree
            .parse(text)
            .map_err(|err| miette!("invalid xml in {}: {err:?}", path.display()))?;
        let root = tree
            .document_element(document)
            .map_err(|err| miette!("no document element in {}: {err:?}", path.display()))?;
        trace!("parsed {}", path.display());
        Ok(Self {
            tree,
            root,
            names,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> GmxNode<'_> {
        self.node(self.root)
    }

    fn node(&self, node: Node) -> GmxNode<'_> {
        GmxNode { doc: self, node }
    }

    /// Every element with this name in document order, the document element included.
    pub fn elements_by_name(&self, name: GmxName) -> impl Iterator<Item = GmxNode<'_>> + '_ {
        let wanted = self.names.get_by_left(&name).copied();
        self.tree
            .descendants(self.root)
            .filter(move |&node| {
                self.tree
                    .element(node)
                    .is_some_and(|element| Some(element.name()) == wanted)
            })
            .map(move |node| self.node(node))
    }

    pub fn first(&self, name: GmxName) -> Option<GmxNode<'_>> {
        self.elements_by_name(name).next()
    }
    pub fn last(&self, name: GmxName) -> Option<GmxNode<'_>> {
        self.elements_by_name(name).last()
    }

    pub fn required(&self, name: GmxName) -> Result<GmxNode<'_>> {
        self.first(name)
            .ok_or_else(|| miette!("missing <{name}> in {}", self.path.display()))
    }

    /// Text of the first element with this name.
    pub fn text_of(&self, name: GmxName) -> Result<String> {
        self.required(name).map(|node| node.text())
    }

    pub fn parse_first<T>(&self, name: GmxName) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.required(name)?.parse()
    }

    pub fn flag(&self, name: GmxName) -> Result<bool> {
        self.required(name)?.flag()
    }

    pub fn bool_of(&self, name: GmxName) -> Result<bool> {
        self.required(name)?.bool()
    }
}

#[derive(Clone, Copy)]
pub struct GmxNode<'a> {
    doc: &'a GmxDocument,
    node: Node,
}

impl<'a> GmxNode<'a> {
    /// `None` for text nodes and for names the reader does not know.
    pub fn name(&self) -> Option<GmxName> {
        let element = self.doc.tree.element(self.node)?;
        self.doc.names.get_by_right(&element.name()).copied()
    }

    pub fn is(&self, name: GmxName) -> bool {
        self.name() == Some(name)
    }

    /// Element children, text and comments are skipped.
    pub fn children(&self) -> impl Iterator<Item = GmxNode<'a>> + 'a {
        let doc = self.doc;
        doc.tree
            .children(self.node)
            .filter(move |&node| doc.tree.element(node).is_some())
            .map(move |node| doc.node(node))
    }

    /// Number of raw child nodes, whitespace included.
    pub fn child_node_count(&self) -> usize {
        self.doc.tree.children(self.node).count()
    }

    pub fn child(&self, name: GmxName) -> Option<GmxNode<'a>> {
        self.children().find(|child| child.is(name))
    }

    pub fn required_child(&self, name: GmxName) -> Result<GmxNode<'a>> {
        self.child(name).ok_or_else(|| {
            miette!(
                "missing <{name}> under <{}> in {}",
                self.field_name(),
                self.doc.path.display()
            )
        })
    }

    /// Concatenated text of every descendant, like the DOM `textContent`.
    pub fn text(&self) -> String {
        let tree = &self.doc.tree;
        tree.descendants(self.node)
            .filter_map(|node| tree.text(node))
            .map(|text| text.get())
            .collect()
    }

    pub fn relative_path(&self) -> RelativePath {
        RelativePath::from_manifest(&self.text())
    }

    pub fn parse<T>(&self) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let field = self.field_name();
        parse_number(&self.text(), field).wrap_err_with(|| self.location())
    }

    pub fn flag(&self) -> Result<bool> {
        parse_flag(&self.text(), self.field_name()).wrap_err_with(|| self.location())
    }

    pub fn bool(&self) -> Result<bool> {
        parse_bool(&self.text(), self.field_name()).wrap_err_with(|| self.location())
    }

    pub fn attr(&self, name: GmxName) -> Option<&'a str> {
        let id = self.doc.names.get_by_left(&name)?;
        self.doc.tree.element(self.node)?.get_attribute(*id)
    }

    pub fn has_any_attr(&self, names: &[GmxName]) -> bool {
        names.iter().any(|name| self.attr(*name).is_some())
    }

    pub fn required_attr(&self, name: GmxName) -> Result<&'a str> {
        self.attr(name).ok_or_else(|| {
            miette!(
                "missing attribute {name} on <{}> in {}",
                self.field_name(),
                self.doc.path.display()
            )
        })
    }

    pub fn attr_parse<T>(&self, name: GmxName) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        parse_number(self.required_attr(name)?, name).wrap_err_with(|| self.location())
    }

    pub fn attr_flag(&self, name: GmxName) -> Result<bool> {
        parse_flag(self.required_attr(name)?, name).wrap_err_with(|| self.location())
    }

    fn field_name(&self) -> GmxName {
        self.name().unwrap_or(GmxName::Assets)
    }

    fn location(&self) -> String {
        format!("in {}", self.doc.path.display())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SOUND: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!--This Document is generated by GameMaker, if you edit it by hand then you do so at your own risk!-->
<sound>
  <kind>0</kind>
  <extension>.wav</extension>
  <volume>
    <volume>0.5</volume>
  </volume>
  <pan>0</pan>
  <preload>-1</preload>
  <data>snd_jump.wav</data>
</sound>
"#;

    fn sound() -> GmxDocument {
        GmxDocument::parse(SOUND, Path::new("snd_jump.sound.gmx")).unwrap()
    }

    #[test]
    fn test_root_and_children() {
        let doc = sound();
        assert!(doc.root().is(GmxName::Sound));
        let names: Vec<Option<GmxName>> = doc.root().children().map(|c| c.name()).collect();
        assert_eq!(names.len(), 6);
        assert_eq!(names[0], Some(GmxName::Kind));
        assert!(doc.root().child_node_count() > 6);
    }

    #[test]
    fn test_nested_volume_last_wins() {
        let doc = sound();
        assert_eq!(doc.elements_by_name(GmxName::Volume).count(), 2);
        let volume: f64 = doc.last(GmxName::Volume).unwrap().parse().unwrap();
        assert_eq!(volume, 0.5);
    }

    #[test]
    fn test_fields() {
        let doc = sound();
        assert_eq!(doc.text_of(GmxName::Data).unwrap(), "snd_jump.wav");
        assert!(doc.flag(GmxName::Preload).unwrap());
        assert_eq!(doc.parse_first::<i32>(GmxName::Kind).unwrap(), 0);
        let err = doc.text_of(GmxName::Caption).unwrap_err();
        assert!(err.to_string().contains("missing <caption>"));
    }

    #[test]
    fn test_attributes() {
        let text = r#"<tiles><tile bgName="bg_grass" x="32" y="-16" locked="-1"/><tile/></tiles>"#;
        let doc = GmxDocument::parse(text, Path::new("room.gmx")).unwrap();
        let tiles: Vec<GmxNode> = doc.root().children().collect();
        assert_eq!(tiles[0].attr(GmxName::BgName), Some("bg_grass"));
        assert_eq!(tiles[0].attr_parse::<i32>(GmxName::Y).unwrap(), -16);
        assert!(tiles[0].attr_flag(GmxName::Locked).unwrap());
        assert!(tiles[0].has_any_attr(&[GmxName::Name, GmxName::X]));
        assert!(!tiles[1].has_any_attr(&[GmxName::Name, GmxName::X]));
        assert!(tiles[1].required_attr(GmxName::X).is_err());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(GmxDocument::parse("<sprite><xorig>", Path::new("broken.gmx")).is_err());
    }
}
