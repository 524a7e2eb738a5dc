//! Instance sets: the instances created so far for one generic template

use crate::canon::TypeList;
use crate::creator::Creator;
use crate::error::BuildError;
use crate::function::Function;
use crate::instantiate::instantiate;
use crate::program::Program;
use indexmap::IndexMap;
use ssa_types::{FuncDecl, Info, Type};
use std::sync::Arc;

/// The instantiations of one generic function
///
/// Performs no locking of its own; every access goes through the program's
/// generics lock. Entries are only ever added.
#[derive(Debug)]
pub(crate) struct InstanceSet {
    template: Arc<Function>,
    /// Template syntax kept for specializing after the template is built;
    /// absent for synthetic templates
    syntax: Option<Arc<FuncDecl>>,
    info: Option<Arc<Info>>,
    instances: IndexMap<TypeList, Arc<Function>>,
}

impl InstanceSet {
    pub(crate) fn new(template: Arc<Function>) -> Self {
        Self {
            syntax: template.syntax().cloned(),
            info: template.info().cloned(),
            template,
            instances: IndexMap::new(),
        }
    }

    pub(crate) fn template(&self) -> &Arc<Function> {
        &self.template
    }

    pub(crate) fn syntax(&self) -> Option<&Arc<FuncDecl>> {
        self.syntax.as_ref()
    }

    pub(crate) fn info(&self) -> Option<&Arc<Info>> {
        self.info.as_ref()
    }

    pub(crate) fn len(&self) -> usize {
        self.instances.len()
    }

    /// Snapshot of the instances, in creation order
    pub(crate) fn list(&self) -> Vec<Arc<Function>> {
        self.instances.values().cloned().collect()
    }

    /// Return the instance for `targs`, creating and registering it with `cr` on first request
    pub(crate) fn lookup_or_create(
        &mut self,
        prog: &Program,
        targs: Vec<Type>,
        cr: &mut dyn Creator,
    ) -> Result<Arc<Function>, BuildError> {
        let key = prog.canon().list(targs);
        if let Some(existing) = self.instances.get(&key) {
            tracing::trace!(instance = %existing.name(), "reusing instance");
            return Ok(Arc::clone(existing));
        }

        let instance = instantiate(prog, self, &key)?;
        // Record before registering so a panicking creator cannot orphan the node
        self.instances.insert(key, Arc::clone(&instance));
        cr.add(Arc::clone(&instance));
        Ok(instance)
    }
}
