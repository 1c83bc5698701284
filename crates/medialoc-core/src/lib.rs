pub mod config;
pub mod error;
pub mod owner;
pub mod request;
pub mod types;

pub use error::{MedialocError, MedialocResult};
pub use owner::{MediaOwner, OwnerContext};
pub use request::ResolveRequest;
