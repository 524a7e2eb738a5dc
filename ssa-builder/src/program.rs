//! The program: owner of every function node and every instance set
//!
//! A `Program` lives exactly as long as one compilation. It is created by the
//! driver and shared by reference with every build worker; nothing here is
//! process-global.
//!
//! Lock order: `generics` before `functions`. Nothing acquires `generics`
//! while holding `functions`.

use crate::canon::Canonicalizer;
use crate::creator::Creator;
use crate::error::BuildError;
use crate::function::{Function, FunctionId};
use crate::instance::InstanceSet;
use crate::mode::BuilderMode;
use ssa_types::{Func, FuncDecl, Info, Type};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Arena of function nodes, indexed by [`FunctionId`]
#[derive(Debug, Default)]
struct FunctionTable {
    nodes: Vec<Arc<Function>>,
    /// Declared functions by address of their front-end object
    declared: HashMap<usize, FunctionId>,
}

fn object_key(object: &Arc<Func>) -> usize {
    Arc::as_ptr(object) as usize
}

/// The id the next node appended to a table of `count` nodes receives
fn next_function_id(count: usize, function: &str) -> Result<FunctionId, BuildError> {
    u32::try_from(count)
        .map(FunctionId)
        .map_err(|_| BuildError::FunctionLimit {
            function: function.to_string(),
            count,
        })
}

#[derive(Debug)]
pub struct Program {
    mode: BuilderMode,
    canon: Canonicalizer,
    functions: RwLock<FunctionTable>,
    /// Instance sets by template. One lock for all of them, held from set
    /// lookup through instance insertion so no two workers can both create
    /// the same set or the same instance.
    generics: Mutex<HashMap<FunctionId, InstanceSet>>,
}

impl Program {
    pub fn new(mode: BuilderMode) -> Self {
        Self {
            mode,
            canon: Canonicalizer::new(),
            functions: RwLock::new(FunctionTable::default()),
            generics: Mutex::new(HashMap::new()),
        }
    }

    pub fn mode(&self) -> BuilderMode {
        self.mode
    }

    pub fn canon(&self) -> &Canonicalizer {
        &self.canon
    }

    fn read_functions(&self) -> RwLockReadGuard<'_, FunctionTable> {
        self.functions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_functions(&self) -> RwLockWriteGuard<'_, FunctionTable> {
        self.functions.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_generics(&self) -> MutexGuard<'_, HashMap<FunctionId, InstanceSet>> {
        self.generics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate an id for `name` and publish the node `build` returns for it
    ///
    /// Nothing is published when `build` fails.
    pub(crate) fn try_insert_function(
        &self,
        name: &str,
        build: impl FnOnce(FunctionId) -> Result<Function, BuildError>,
    ) -> Result<Arc<Function>, BuildError> {
        let mut table = self.write_functions();
        let id = next_function_id(table.nodes.len(), name)?;
        let function = Arc::new(build(id)?);
        table.nodes.push(Arc::clone(&function));
        Ok(function)
    }

    /// Create the node for a function or method declared in `object.package`
    ///
    /// Declaring the same object twice returns the existing node. Generic
    /// templates get their instance set immediately.
    pub fn create_function(
        &self,
        object: Arc<Func>,
        syntax: Option<Arc<FuncDecl>>,
        info: Option<Arc<Info>>,
    ) -> Result<Arc<Function>, BuildError> {
        let function = {
            let mut table = self.write_functions();
            let key = object_key(&object);
            if let Some(existing) = table.declared.get(&key) {
                return Ok(Arc::clone(&table.nodes[existing.0 as usize]));
            }

            let id = next_function_id(table.nodes.len(), &object.full_name())?;
            let function = Arc::new(Function {
                id,
                name: object.name.clone(),
                signature: Arc::clone(&object.sig),
                synthetic: None,
                span: object.span,
                package: object.package.clone(),
                type_params: object.sig.generic_params().clone(),
                object,
                syntax,
                info,
                instance: None,
            });
            table.nodes.push(Arc::clone(&function));
            table.declared.insert(key, id);
            function
        };

        if function.is_generic_template() {
            Self::ensure_instance_set(&mut self.lock_generics(), &function);
        }
        Ok(function)
    }

    fn ensure_instance_set<'a>(
        sets: &'a mut HashMap<FunctionId, InstanceSet>,
        template: &Arc<Function>,
    ) -> &'a mut InstanceSet {
        sets.entry(template.id()).or_insert_with(|| {
            tracing::debug!(template = %template, "created instance set");
            InstanceSet::new(Arc::clone(template))
        })
    }

    /// Create the instance set of a generic template if it does not exist yet
    pub fn create_instance_set(&self, template: &Arc<Function>) -> Result<(), BuildError> {
        if !template.is_generic_template() {
            return Err(BuildError::NotGeneric {
                function: template.to_string(),
            });
        }
        Self::ensure_instance_set(&mut self.lock_generics(), template);
        Ok(())
    }

    /// The instance of `template` for `targs`, created on first request
    ///
    /// Concurrent requests for structurally equal arguments all return the
    /// same node, and only the request that created it registers it with its
    /// `cr`. An error means the front end accepted arguments the builder
    /// cannot realize; the build should abort.
    pub fn needs_instance(
        &self,
        template: &Arc<Function>,
        targs: Vec<Type>,
        cr: &mut dyn Creator,
    ) -> Result<Arc<Function>, BuildError> {
        if !template.is_generic_template() {
            return Err(BuildError::NotGeneric {
                function: template.to_string(),
            });
        }

        let mut sets = self.lock_generics();
        Self::ensure_instance_set(&mut sets, template).lookup_or_create(self, targs, cr)
    }

    /// All instances created so far for `template`, in creation order
    ///
    /// Empty for functions that are not generic templates. The result is a
    /// snapshot; later instantiations do not appear in it.
    pub fn instances(&self, template: &Function) -> Vec<Arc<Function>> {
        if !template.is_generic_template() {
            return Vec::new();
        }
        self.lock_generics()
            .get(&template.id())
            .map(InstanceSet::list)
            .unwrap_or_default()
    }

    /// Number of instances created so far for `template`
    pub fn instance_count(&self, template: &Function) -> usize {
        self.lock_generics()
            .get(&template.id())
            .map_or(0, InstanceSet::len)
    }

    pub fn has_instance_set(&self, template: &Function) -> bool {
        self.lock_generics().contains_key(&template.id())
    }

    pub fn function(&self, id: FunctionId) -> Option<Arc<Function>> {
        self.read_functions().nodes.get(id.0 as usize).cloned()
    }

    /// The template an instance was created from
    pub fn origin(&self, function: &Function) -> Option<Arc<Function>> {
        function.origin().and_then(|id| self.function(id))
    }

    /// The node created for a declared function object
    pub fn declared_func(&self, object: &Arc<Func>) -> Option<Arc<Function>> {
        let table = self.read_functions();
        table
            .declared
            .get(&object_key(object))
            .and_then(|id| table.nodes.get(id.0 as usize))
            .cloned()
    }

    pub fn function_count(&self) -> usize {
        self.read_functions().nodes.len()
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new(BuilderMode::default())
    }
}
