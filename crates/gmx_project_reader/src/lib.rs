//! Reader for GameMaker Studio projects saved in the GMX format.
//!
//! A project is a `*.project.gmx` manifest listing every resource by relative path, each resource
//! lives in its own side file next to it. [`ProjectReader::read`] follows the manifest in a fixed
//! category order, builds the registries and the navigation tree of a
//! [`gmx_project_models::Project`] and links cross references by name once everything is read.

mod catalog;
mod codec;
mod config;
mod context;
mod deferred;
mod document;
mod fields;
mod loader;
mod names;
mod readers;

pub use catalog::{ActionCatalog, ActionLibrary, EmptyActionLibrary};
pub use codec::{ImageCodec, MediaCodec};
pub use config::ReaderConfig;
pub use deferred::{is_no_reference, DeferredRefs, Lookup, ResolveReport, UNDEFINED};
pub use document::{GmxDocument, GmxNode};
pub use loader::ProjectReader;
pub use names::GmxName;
pub use readers::SHADER_MARKER;
