//! celgen_emitter: cel-go binding synthesis and registry output.
//!
//! Each extracted declaration becomes a `BindingUnit` (a `cel.Function`
//! definition with its overload signature and invocation thunk). The units
//! of one package are gathered into a `Registry`, which gives every import a
//! name free in the file and renders the generated Go file.

pub mod cel;
mod imports;
mod registry;
mod synthesizer;
pub mod writer;

pub use registry::{emit_registry, Registry, RegistryOptions, GENERATED_HEADER};
pub use synthesizer::{synthesize, BindingUnit};
pub use writer::GoWriter;
