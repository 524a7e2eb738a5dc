//! Worklist of created functions awaiting body lowering

use crate::function::Function;
use std::sync::Arc;

/// Receives every function node the builder creates
///
/// Registration is the only notification the lowering pass gets: a node
/// exists and can be referenced as soon as it is added, but its body is
/// translated later.
pub trait Creator {
    fn add(&mut self, function: Arc<Function>);
}

/// Vec-backed [`Creator`] owned by one build worker
#[derive(Debug, Default)]
pub struct Worklist {
    functions: Vec<Arc<Function>>,
}

impl Worklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Function>> {
        self.functions.iter()
    }

    /// Take the pending functions, leaving the worklist empty
    pub fn take(&mut self) -> Vec<Arc<Function>> {
        std::mem::take(&mut self.functions)
    }

    pub fn into_functions(self) -> Vec<Arc<Function>> {
        self.functions
    }
}

impl Creator for Worklist {
    fn add(&mut self, function: Arc<Function>) {
        self.functions.push(function);
    }
}
