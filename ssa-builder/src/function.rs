//! Function nodes
//!
//! A [`Function`] is the builder's node for one function body, either
//! declared in source or created as an instance of a generic template.
//! Nodes are created cheaply (signature only); bodies are lowered later from
//! the [`BodyPlan`] each node describes.

use crate::canon::TypeList;
use miette::SourceSpan;
use ssa_types::{Func, FuncDecl, Info, Signature, Substitution, Type, TypeParamList};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Handle of a function node within its [`Program`](crate::Program)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub u32);

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn#{}", self.0)
    }
}

/// How an instance's body is produced
#[derive(Debug, Clone)]
pub enum InstanceKind {
    /// Monomorphized: the template body rewritten by this substitution
    Specialized(Substitution),
    /// Forwards to the generic body through runtime type descriptors
    Wrapper,
}

impl InstanceKind {
    pub fn is_specialized(&self) -> bool {
        matches!(self, Self::Specialized(_))
    }

    pub fn is_wrapper(&self) -> bool {
        matches!(self, Self::Wrapper)
    }
}

/// Instance metadata; present only on nodes created by instantiation
#[derive(Debug, Clone)]
pub(crate) struct Instance {
    /// Non-owning back-reference to the template
    pub(crate) origin: FunctionId,
    pub(crate) type_args: TypeList,
    pub(crate) kind: InstanceKind,
}

#[derive(Debug)]
pub struct Function {
    pub(crate) id: FunctionId,
    pub(crate) name: String,
    pub(crate) object: Arc<Func>,
    pub(crate) signature: Arc<Signature>,
    /// Provenance label of builder-created functions
    pub(crate) synthetic: Option<String>,
    pub(crate) syntax: Option<Arc<FuncDecl>>,
    pub(crate) info: Option<Arc<Info>>,
    pub(crate) span: SourceSpan,
    /// Declaring package; instances belong to the program, not a package
    pub(crate) package: Option<String>,
    /// Shared with the template for instances
    pub(crate) type_params: TypeParamList,
    pub(crate) instance: Option<Instance>,
}

impl Function {
    pub fn id(&self) -> FunctionId {
        self.id
    }

    /// Debug name; for instances `Name[args]`, which is not guaranteed unique
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &Arc<Func> {
        &self.object
    }

    pub fn signature(&self) -> &Arc<Signature> {
        &self.signature
    }

    pub fn synthetic(&self) -> Option<&str> {
        self.synthetic.as_deref()
    }

    pub fn syntax(&self) -> Option<&Arc<FuncDecl>> {
        self.syntax.as_ref()
    }

    pub fn info(&self) -> Option<&Arc<Info>> {
        self.info.as_ref()
    }

    pub fn span(&self) -> SourceSpan {
        self.span
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn type_params(&self) -> &TypeParamList {
        &self.type_params
    }

    /// Type arguments of an instance; empty for declared functions
    pub fn type_args(&self) -> &[Type] {
        match &self.instance {
            Some(inst) => &inst.type_args[..],
            None => &[],
        }
    }

    /// The canonical type-argument tuple of an instance
    pub fn type_list(&self) -> Option<&TypeList> {
        self.instance.as_ref().map(|inst| &inst.type_args)
    }

    /// The template this function instantiates
    pub fn origin(&self) -> Option<FunctionId> {
        self.instance.as_ref().map(|inst| inst.origin)
    }

    pub fn instance_kind(&self) -> Option<&InstanceKind> {
        self.instance.as_ref().map(|inst| &inst.kind)
    }

    pub fn substitution(&self) -> Option<&Substitution> {
        match self.instance_kind() {
            Some(InstanceKind::Specialized(subst)) => Some(subst),
            _ => None,
        }
    }

    /// Has type parameters and no type arguments of its own
    pub fn is_generic_template(&self) -> bool {
        !self.type_params.is_empty() && self.instance.is_none()
    }

    pub fn is_instance(&self) -> bool {
        self.instance.is_some()
    }

    /// Describe how this function's body is to be lowered
    pub fn body_plan(&self) -> BodyPlan<'_> {
        match (&self.instance, &self.syntax) {
            (None, Some(syntax)) => BodyPlan::Source { syntax },
            (None, None) => BodyPlan::External,
            (Some(inst), syntax) => match (&inst.kind, syntax) {
                (InstanceKind::Wrapper, _) => BodyPlan::Forward {
                    template: inst.origin,
                },
                (InstanceKind::Specialized(subst), Some(syntax)) => BodyPlan::Specialize {
                    template: inst.origin,
                    syntax,
                    subst,
                },
                // Template synthesized without syntax
                (InstanceKind::Specialized(_), None) => BodyPlan::External,
            },
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{package}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Deferred description of a function body
///
/// Creating an instance only records this plan; the clone-and-substitute of
/// a specialized body happens when the lowering pass calls
/// [`BodyPlan::materialize_syntax`].
#[derive(Debug, Clone, Copy)]
pub enum BodyPlan<'a> {
    /// Lower the function's own declaration
    Source { syntax: &'a Arc<FuncDecl> },
    /// Lower the template's declaration with every type rewritten by `subst`
    Specialize {
        template: FunctionId,
        syntax: &'a Arc<FuncDecl>,
        subst: &'a Substitution,
    },
    /// Emit a body that calls the generic implementation of `template`
    Forward { template: FunctionId },
    /// No syntax is available; the body is provided elsewhere
    External,
}

impl<'a> BodyPlan<'a> {
    /// The declaration the lowering pass should translate, if any
    pub fn materialize_syntax(&self) -> Option<Cow<'a, FuncDecl>> {
        match *self {
            BodyPlan::Source { syntax } => Some(Cow::Borrowed(&**syntax)),
            BodyPlan::Specialize { syntax, subst, .. } => Some(Cow::Owned(
                syntax.map_types(|ty| subst.apply(ty).into_owned()),
            )),
            BodyPlan::Forward { .. } | BodyPlan::External => None,
        }
    }
}
