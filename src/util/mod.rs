//! Implements utility functions

mod tensor_ops;
pub use crate::util::tensor_ops::*;
