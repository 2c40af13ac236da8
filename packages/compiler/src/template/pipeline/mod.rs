//! Template Pipeline
//!
//! IR definitions and the passes that rewrite it ahead of code generation.

pub mod ir;
pub mod src;
