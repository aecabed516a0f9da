//! This is the documentation for the `bswabe` library.
//!
//! * Type: ciphertext-policy attribute-based encryption (CP-ABE)
//! * Setting: bilinear groups, BN curve
//!
//! A ciphertext is bound to a threshold-tree access policy over named
//! attributes, a secret key is bound to a set of attributes, and decryption
//! recovers the session element exactly when the attributes satisfy the
//! policy. The session element is meant to be fed into a hybrid layer of the
//! caller's choosing; this crate does not define a wire format for it.
//!
//! # Example
//!
//! ```
//! use bswabe::schemes::bsw::*;
//! use bswabe::utils::policy::pest::PolicyLanguage;
//! let (pk, msk) = setup();
//! let sk = keygen(&pk, &msk, &vec!["A".to_string(), "B".to_string()]).unwrap();
//! let (ct, key) = encrypt(&pk, "A B 2of2", PolicyLanguage::PostfixPolicy).unwrap();
//! assert_eq!(decrypt(&sk, &ct).unwrap(), key);
//! ```
#[cfg(feature = "borsh")]
extern crate borsh;
extern crate pest;
#[macro_use]
extern crate pest_derive;
extern crate rabe_bn;
extern crate rand;
#[cfg(feature = "serde")]
extern crate serde;
extern crate sha3;

pub mod error;
pub mod schemes;
pub mod utils;

pub use error::BswabeError;
