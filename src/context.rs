//! State shared by the per-module steps of one run
//!
//! Commands that visit every module of a project may need an action to fire
//! only once per run, or to gather results across modules. A [`RunContext`]
//! is created by the caller, passed by `&mut` to each step and dropped when
//! the run ends.

use std::collections::HashSet;

use crate::pom::Coordinates;

#[derive(Debug, Default)]
pub struct RunContext {
    fired: HashSet<String>,
    bundles: Vec<Coordinates>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time `marker` is seen in this run, false afterwards
    pub fn run_once(&mut self, marker: &str) -> bool {
        self.fired.insert(marker.to_string())
    }

    /// Remember a bundle discovered during the run; repeated entries are ignored
    pub fn record_bundle(&mut self, coordinates: Coordinates) {
        if !self.bundles.contains(&coordinates) {
            self.bundles.push(coordinates);
        }
    }

    /// Bundles recorded so far, in discovery order
    pub fn bundles(&self) -> &[Coordinates] {
        &self.bundles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_once() {
        let mut context = RunContext::new();
        assert!(context.run_once("attach"));
        assert!(!context.run_once("attach"));
        assert!(context.run_once("other"));

        // a fresh run starts over
        assert!(RunContext::new().run_once("attach"));
    }

    #[test]
    fn test_record_bundle() {
        let mut context = RunContext::new();
        let core = Coordinates::new("g", "core", "1.0");
        context.record_bundle(core.clone());
        context.record_bundle(Coordinates::new("g", "api", "1.0"));
        context.record_bundle(core.clone());
        assert_eq!(context.bundles().len(), 2);
        assert_eq!(context.bundles()[0], core);
    }
}
