//! SSA builder: generic function instantiation
//!
//! Creates, at most once per distinct type-argument tuple, the function node
//! for each instantiation of a generic function, while many build workers
//! request instances concurrently.
//!
//! ## Architecture
//!
//! - **Canonicalizer**: interns type-argument tuples and signatures so equal
//!   tuples share one key
//! - **Instance Set**: per-template map from canonical key to instance
//! - **Instantiation Engine**: builds an instance's signature and decides
//!   between full specialization and a forwarding wrapper
//! - **Program**: owns every function node and every instance set; the only
//!   place instances are requested from
//!
//! Bodies are not lowered here. Every created node is handed to a
//! [`Creator`], and its [`BodyPlan`] tells the lowering pass what to translate.

pub mod canon;
pub mod creator;
pub mod error;
pub mod function;
mod instance;
pub mod instantiate;
pub mod mode;
pub mod program;
pub mod sanity;

// Re-export public API
pub use canon::{Canonicalizer, TypeList};
pub use creator::{Creator, Worklist};
pub use error::{BuildError, ModeParseError};
pub use function::{BodyPlan, Function, FunctionId, InstanceKind};
pub use instantiate::is_concrete;
pub use mode::BuilderMode;
pub use program::Program;

#[cfg(test)]
mod tests;
