mod client;
mod job;
mod quote;
mod resource;

pub use client::*;
pub use job::*;
pub use quote::*;
pub use resource::*;
