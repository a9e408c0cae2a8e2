// Shared domain types, used by the query layer, the resolver and the
// command workflows alike.

pub mod common;
pub mod pr;

pub use common::*;
pub use pr::*;
