pub mod endpoints;
pub mod outcome;
pub mod store;

pub use endpoints::TaskEndpoints;
pub use outcome::{OperationKind, RequestOutcome};
pub use store::TaskStore;
