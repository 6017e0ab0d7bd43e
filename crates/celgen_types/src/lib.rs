//! celgen_types: The closed set of CEL-facing type descriptors and the
//! mapping from Go type expressions onto them.

mod descriptor;
mod mapper;
mod qualifiers;

pub use descriptor::{TypeDescriptor, TypeKind};
pub use mapper::{descriptor_for_spelling, map_type};
pub use qualifiers::{collect_qualifiers, mentions_qualifier, requalify_spelling};
