pub mod edit;
pub mod interchange;
pub mod model;
pub mod preview;
pub mod templates;

pub use edit::{AxiomUpdate, ProfileUpdate};
pub use interchange::{DocumentError, Migration};
pub use model::{Adt, Axiom, Implementation, Implementations, Profile, Variant};
