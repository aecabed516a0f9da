//! This is the documentation for all `bswabe` utils
//!
//! Currently those are:
//! hash
//! policy
//! secretsharing
//! tools
//! trace
//!
pub mod hash;
pub mod policy;
pub mod secretsharing;
pub mod tools;
pub mod trace;
