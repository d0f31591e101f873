pub mod batch;
pub mod link;
pub mod record;

pub use batch::Batch;
pub use link::ProductLink;
pub use record::{Field, ProductRecord};
