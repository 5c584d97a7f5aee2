//! API layer - wire types of the chat completion endpoint

pub mod types;
