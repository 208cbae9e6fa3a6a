pub mod client;
pub mod image;
pub mod queries;

pub use client::{DocumentStore, MutationResult, SanityClient};
