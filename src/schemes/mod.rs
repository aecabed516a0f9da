//! This is the documentation for all `bswabe` schemes
//!
//! Currently those are:
//! * BSW CP-ABE
//!
pub mod bsw;
