// ── Navigation capability ──
//
// The core never owns routing. It reads the current location and asks a
// `Navigator` to move; `MemoryNavigator` is the in-process history used
// by the CLI and tests.

use tracing::debug;
use url::Url;

use super::location::Location;
use crate::error::CoreError;

/// Push/replace/back over a location history.
pub trait Navigator {
    fn location(&self) -> &Location;

    /// Push a new entry. Relative targets resolve against the current
    /// route base.
    fn navigate(&mut self, to: &str) -> Result<(), CoreError>;

    /// Overwrite the current entry.
    fn replace(&mut self, to: &str) -> Result<(), CoreError>;

    /// Step back one entry. Returns `false` at the start of history.
    fn back(&mut self) -> bool;
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct MemoryNavigator {
    base: Url,
    entries: Vec<Location>,
    index: usize,
}

impl MemoryNavigator {
    /// Start at `route`. Relative targets resolve against `/`.
    pub fn new(route: &str) -> Result<Self, CoreError> {
        Ok(Self {
            base: Location::default().as_url().clone(),
            entries: vec![Location::parse(route)?],
            index: 0,
        })
    }

    /// Resolve relative targets against `base_route` (e.g. `/app/`), the
    /// way nested routes resolve `form` to `/app/form`.
    pub fn with_base(mut self, base_route: &str) -> Result<Self, CoreError> {
        let mut base = Location::parse(base_route)?.as_url().clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        self.base = base;
        Ok(self)
    }

    /// Every entry, oldest first.
    pub fn history(&self) -> &[Location] {
        &self.entries
    }

    fn resolve(&self, to: &str) -> Result<Location, CoreError> {
        Location::resolve(&self.base, to)
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self {
            base: Location::default().as_url().clone(),
            entries: vec![Location::default()],
            index: 0,
        }
    }
}

impl Navigator for MemoryNavigator {
    fn location(&self) -> &Location {
        // `entries` is never empty and `index` stays in bounds.
        &self.entries[self.index]
    }

    fn navigate(&mut self, to: &str) -> Result<(), CoreError> {
        let next = self.resolve(to)?;
        debug!(from = %self.location(), to = %next, "navigate");
        self.entries.truncate(self.index + 1);
        self.entries.push(next);
        self.index = self.entries.len() - 1;
        Ok(())
    }

    fn replace(&mut self, to: &str) -> Result<(), CoreError> {
        let next = self.resolve(to)?;
        debug!(from = %self.location(), to = %next, "replace");
        self.entries[self.index] = next;
        Ok(())
    }

    fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        debug!(to = %self.location(), "back");
        true
    }
}
