use std::{collections::HashMap, path::Path, sync::Arc};

use gmx_project_models::action::LibAction;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::debug;

/// Source of the static action descriptors, keyed by library id and action id.
pub trait ActionLibrary {
    fn lookup(&self, library_id: i32, action_id: i32) -> Option<Arc<LibAction>>;
}

/// No library installed, every action falls back to a descriptor made from the project itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyActionLibrary;

impl ActionLibrary for EmptyActionLibrary {
    fn lookup(&self, _library_id: i32, _action_id: i32) -> Option<Arc<LibAction>> {
        None
    }
}

#[derive(Debug, Default, Clone)]
pub struct ActionCatalog {
    actions: HashMap<(i32, i32), Arc<LibAction>>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A later registration with the same ids replaces the earlier one.
    pub fn register(&mut self, action: LibAction) {
        self.actions
            .insert((action.library_id, action.id), Arc::new(action));
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Reads a JSON array of descriptors.
    pub fn from_json(text: &str) -> Result<Self> {
        let actions: Vec<LibAction> = serde_json::from_str(text).into_diagnostic()?;
        let mut catalog = Self::new();
        for action in actions {
            catalog.register(action);
        }
        debug!("action catalog holds {} descriptors", catalog.len());
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read action catalog {}", path.display()))?;
        Self::from_json(&text)
            .wrap_err_with(|| format!("invalid action catalog {}", path.display()))
    }
}

impl ActionLibrary for ActionCatalog {
    fn lookup(&self, library_id: i32, action_id: i32) -> Option<Arc<LibAction>> {
        self.actions.get(&(library_id, action_id)).cloned()
    }
}
