pub mod artifact;
pub mod route;

pub use artifact::{Artifact, StorageLocator};
pub use route::{BodyRepr, RouteBinding};
