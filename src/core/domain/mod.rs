//! Domain types.

mod batch;
mod blob;
mod principal;
mod stage;
mod view;

pub use batch::UpdateBatch;
pub use blob::{BlobMetadata, VariableBlob};
pub use principal::Principal;
pub use stage::StageMetadata;
pub use view::{ProjectedVars, Projection, ViewContext};
