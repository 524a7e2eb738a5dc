//! Resolved function and method objects

use crate::types::Signature;
use miette::SourceSpan;
use std::sync::Arc;

/// A declared (or instantiated) function or method
#[derive(Debug, Clone)]
pub struct Func {
    pub name: String,
    /// Import path of the declaring package; `None` for synthesized functions
    pub package: Option<String>,
    pub sig: Arc<Signature>,
    pub span: SourceSpan,
    /// The generic method this object was instantiated from
    pub origin: Option<Arc<Func>>,
}

impl Func {
    pub fn new(
        name: impl Into<String>,
        package: Option<String>,
        sig: Signature,
        span: SourceSpan,
    ) -> Self {
        Self {
            name: name.into(),
            package,
            sig: Arc::new(sig),
            span,
            origin: None,
        }
    }

    pub fn is_method(&self) -> bool {
        self.sig.recv.is_some()
    }

    /// Qualified name for diagnostics: `pkg.Name` or `(*Box[T]).Name`
    pub fn full_name(&self) -> String {
        match (&self.sig.recv, &self.package) {
            (Some(recv), _) => format!("({}).{}", recv.ty, self.name),
            (None, Some(package)) => format!("{package}.{}", self.name),
            (None, None) => self.name.clone(),
        }
    }
}
