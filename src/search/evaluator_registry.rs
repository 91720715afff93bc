//! Name-to-evaluator registry.
//!
//! The process-wide registry is built once on first use and is read-only
//! afterwards. Callers that need extra evaluators build their own registry
//! from `EvaluatorRegistry::builtin()` and `register`.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::chess_errors::{ChessError, ChessResult};
use crate::search::board_scoring::{Evaluator, MaterialEvaluator, PositionalEvaluator};

/// Builds a fresh evaluator instance.
pub type EvaluatorFactory = fn() -> Box<dyn Evaluator>;

#[derive(Debug, Clone, Default)]
pub struct EvaluatorRegistry {
    factories: BTreeMap<String, EvaluatorFactory>,
}

static GLOBAL: OnceLock<EvaluatorRegistry> = OnceLock::new();

impl EvaluatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in `material` and `positional`
    /// evaluators.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("material", material);
        registry.register("positional", positional);
        registry
    }

    /// The shared process-wide registry.
    pub fn global() -> &'static EvaluatorRegistry {
        GLOBAL.get_or_init(Self::builtin)
    }

    /// Add or replace the factory for `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: EvaluatorFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn create(&self, name: &str) -> ChessResult<Box<dyn Evaluator>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ChessError::UnknownEvaluator(name.to_owned()))
    }
}

fn material() -> Box<dyn Evaluator> {
    Box::new(MaterialEvaluator)
}

fn positional() -> Box<dyn Evaluator> {
    Box::new(PositionalEvaluator)
}
