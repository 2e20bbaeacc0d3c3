pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod services;

pub use domain::ScorePair;
pub use services::resolver::{Resolver, ResolverOptions};
