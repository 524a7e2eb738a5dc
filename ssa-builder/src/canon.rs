//! Canonicalization of type-argument tuples and signatures
//!
//! Structurally equal values are interned to a single `Arc` so that identity
//! comparison can stand in for structural comparison. The tables are
//! read-mostly: lookups take a shared lock and only a miss takes the write
//! lock, re-checking before inserting so that exactly one of several racing
//! candidates becomes the representative.

use ssa_types::{Func, InstantiateError, Signature, Type, TypeArgs};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe intern table keyed by structural equality
struct Interner<T: ?Sized> {
    table: RwLock<HashSet<Arc<T>>>,
}

impl<T: ?Sized + Hash + Eq> Interner<T> {
    fn new() -> Self {
        Self {
            table: RwLock::new(HashSet::new()),
        }
    }

    /// Return the representative for `value`, making `value` the representative on a miss
    fn intern<V>(&self, value: V) -> (Arc<T>, bool)
    where
        V: Borrow<T> + Into<Arc<T>>,
    {
        let key: &T = value.borrow();
        {
            let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = table.get(key) {
                return (Arc::clone(existing), false);
            }
        }

        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have won between the two locks
        if let Some(existing) = table.get(key) {
            return (Arc::clone(existing), false);
        }
        let canonical: Arc<T> = value.into();
        table.insert(Arc::clone(&canonical));
        (canonical, true)
    }

    fn len(&self) -> usize {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Canonical type-argument tuple
///
/// Equality and hashing are by identity of the interned representative, so
/// two `TypeList`s are equal exactly when they came from structurally equal
/// tuples passed through the same [`Canonicalizer`].
#[derive(Clone)]
pub struct TypeList(Arc<[Type]>);

impl TypeList {
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for TypeList {
    type Target = [Type];

    fn deref(&self) -> &[Type] {
        &self.0
    }
}

impl PartialEq for TypeList {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for TypeList {}

impl Hash for TypeList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).cast::<Type>().hash(state);
    }
}

impl fmt::Debug for TypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeList({})", TypeArgs(&self.0))
    }
}

impl fmt::Display for TypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TypeArgs(&self.0))
    }
}

/// Program-wide canonicalizer for type-argument tuples and signatures
pub struct Canonicalizer {
    lists: Interner<[Type]>,
    signatures: Interner<Signature>,
}

impl Canonicalizer {
    pub fn new() -> Self {
        Self {
            lists: Interner::new(),
            signatures: Interner::new(),
        }
    }

    /// Canonicalize a type-argument tuple
    ///
    /// The first caller's tuple becomes the representative; later callers'
    /// tuples are dropped. An empty tuple is a valid, degenerate key.
    pub fn list(&self, targs: Vec<Type>) -> TypeList {
        let (list, inserted) = self.lists.intern(targs);
        if inserted {
            tracing::trace!(targs = %TypeArgs(&list), "interned type list");
        }
        TypeList(list)
    }

    /// Canonicalize a signature
    ///
    /// Independently instantiated signatures are not unique; this collapses
    /// identical ones (parameter names aside) to one shared object.
    pub fn signature(&self, sig: Signature) -> Arc<Signature> {
        self.signatures.intern(sig).0
    }

    /// Instantiate a method of a generic receiver type, canonicalizing the
    /// resulting signature
    pub fn instantiate_method(
        &self,
        method: &Arc<Func>,
        targs: &TypeList,
    ) -> Result<Arc<Func>, InstantiateError> {
        let mut obj = ssa_types::instantiate_method(method, targs)?;
        obj.sig = self.signature(Arc::unwrap_or_clone(obj.sig));
        Ok(Arc::new(obj))
    }

    /// Number of distinct type-argument tuples seen so far
    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// Number of distinct signatures seen so far
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Canonicalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canonicalizer")
            .field("lists", &self.list_count())
            .field("signatures", &self.signature_count())
            .finish()
    }
}
