//! Entity data and per-entity rules.
//!
//! Kind hierarchies from the domain (station kinds, train kinds, load kinds)
//! are closed sets of tagged variants dispatched through small capability
//! tables rather than trait objects.

mod load;
mod route;
mod station;
mod track;
mod train;

pub use load::*;
pub use route::*;
pub use station::*;
pub use track::*;
pub use train::*;
