pub mod batch;
pub mod cache;
pub mod normalize;
pub mod parsing;
pub mod resolver;
