//! `BSW` scheme by John Bethencourt, Amit Sahai, Brent Waters.
//!
//! * Developped by John Bethencourt, Amit Sahai, Brent Waters, "Ciphertext-Policy Attribute-Based Encryption"
//! * Published in 2007 IEEE Symposium on Security and Privacy
//! * Available from <https://ieeexplore.ieee.org/document/4223236>
//! * Type: encryption (ciphertext-policy attribute-based)
//! * Setting: bilinear groups (asymmetric)
//!
//! Encryption binds a random session element of the target group to a
//! postfix threshold-tree policy; the session element is returned alongside
//! the ciphertext so a hybrid layer can derive a symmetric key from it.
//!
//! # Examples
//!
//! ```
//! use bswabe::schemes::bsw::*;
//! use bswabe::utils::policy::pest::PolicyLanguage;
//! let (pk, msk) = setup();
//! let sk = keygen(&pk, &msk, &vec!["A".to_string(), "B".to_string()]).unwrap();
//! let (ct, key) = encrypt(&pk, "A B 2of2", PolicyLanguage::PostfixPolicy).unwrap();
//! assert_eq!(decrypt(&sk, &ct).unwrap(), key);
//! ```
use rabe_bn::*;
use rand::Rng;
use utils::{
    policy::pest::{PolicyLanguage, PolicyNode, parse},
    secretsharing::{gen_shares_policy, check_satisfy, pick_min_leaves, calc_coefficients},
    hash::sha3_hash,
    trace::{NoopSink, TraceSink}
};
use error::BswabeError;
#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};
#[cfg(feature = "borsh")]
use borsh::{BorshSerialize, BorshDeserialize};

/// A BSW Public Key (PK)
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpAbePublicKey {
    pub g: G1,
    pub gp: G2,
    pub h: G1,
    pub e_gg_alpha: Gt,
}

/// A BSW Master Key (MSK), kept by the issuing authority
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpAbeMasterKey {
    pub beta: Fr,
    pub g_alpha: G2,
}

/// A BSW Secret Key (SK). Components are `(attribute, d_j, d_j_prime)` in
/// insertion order; the pruned policy refers to them by position, names are
/// only compared during the satisfiability pass.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpAbeSecretKey {
    pub d: G2,
    pub comps: Vec<(String, G2, G1)>,
}

/// A BSW Ciphertext (CT). `c_y` holds the per-leaf elements
/// `(attribute, g^q(0), H(attribute)^q(0))` in depth-first leaf order of
/// `policy`. Immutable once produced; decryption annotates a parallel
/// scratch tree instead.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpAbeCiphertext {
    pub policy: PolicyNode,
    pub c: G1,
    pub cs: Gt,
    pub c_y: Vec<(String, G1, G2)>,
}

/// Sets up a new scheme instance and returns PK and MSK.
pub fn setup() -> (CpAbePublicKey, CpAbeMasterKey) {
    let mut rng = rand::thread_rng();
    let g: G1 = rng.gen();
    let gp: G2 = rng.gen();
    let alpha: Fr = rng.gen();
    let beta: Fr = rng.gen();
    let g_alpha = gp * alpha;
    let h = g * beta;
    let e_gg_alpha = pairing(g, g_alpha);
    (
        CpAbePublicKey { g, gp, h, e_gg_alpha },
        CpAbeMasterKey { beta, g_alpha },
    )
}

/// Generates a secret key for the given attribute set. An empty set is
/// allowed and yields a key that satisfies no policy.
pub fn keygen(
    pk: &CpAbePublicKey,
    msk: &CpAbeMasterKey,
    attributes: &Vec<String>,
) -> Result<CpAbeSecretKey, BswabeError> {
    let mut rng = rand::thread_rng();
    let r: Fr = rng.gen();
    let g_r = pk.gp * r;
    let d = (msk.g_alpha + g_r) * msk.beta.inverse().unwrap();
    let mut comps: Vec<(String, G2, G1)> = Vec::new();
    for attr in attributes {
        let r_j: Fr = rng.gen();
        comps.push((
            attr.clone(),
            g_r + (sha3_hash(pk.gp, attr)? * r_j),
            pk.g * r_j,
        ));
    }
    Ok(CpAbeSecretKey { d, comps })
}

/// Picks a random session element of the target group and encrypts it under
/// the policy. Returns the ciphertext together with the session element.
pub fn encrypt(
    pk: &CpAbePublicKey,
    policy: &str,
    language: PolicyLanguage,
) -> Result<(CpAbeCiphertext, Gt), BswabeError> {
    encrypt_with(pk, policy, language, &NoopSink)
}

/// [`encrypt`] with an injectable trace sink.
pub fn encrypt_with(
    pk: &CpAbePublicKey,
    policy: &str,
    language: PolicyLanguage,
    sink: &dyn TraceSink,
) -> Result<(CpAbeCiphertext, Gt), BswabeError> {
    let policy = parse(policy, language)?;
    let mut rng = rand::thread_rng();
    let s: Fr = rng.gen();
    let msg: Gt = rng.gen();
    let shares = gen_shares_policy(s, &policy, sink);
    let mut c_y: Vec<(String, G1, G2)> = Vec::new();
    for (attr, share) in shares {
        let h_attr = sha3_hash(pk.gp, &attr)?;
        c_y.push((attr, pk.g * share, h_attr * share));
    }
    let ct = CpAbeCiphertext {
        policy,
        c: pk.h * s,
        cs: pk.e_gg_alpha.pow(s) * msg,
        c_y,
    };
    Ok((ct, msg))
}

/// Recovers the session element, or [`BswabeError::AccessDenied`] if the
/// key's attributes do not satisfy the policy of the ciphertext. The
/// ciphertext is not mutated and can be decrypted any number of times.
pub fn decrypt(sk: &CpAbeSecretKey, ct: &CpAbeCiphertext) -> Result<Gt, BswabeError> {
    decrypt_with(sk, ct, &NoopSink)
}

/// [`decrypt`] with an injectable trace sink.
pub fn decrypt_with(
    sk: &CpAbeSecretKey,
    ct: &CpAbeCiphertext,
    sink: &dyn TraceSink,
) -> Result<Gt, BswabeError> {
    let attributes: Vec<String> = sk.comps.iter().map(|comp| comp.0.clone()).collect();
    let mut pruned = check_satisfy(&ct.policy, &attributes, sink);
    if !pruned.satisfiable {
        return Err(BswabeError::AccessDenied);
    }
    pick_min_leaves(&ct.policy, &mut pruned, sink);
    let mut a = Gt::one();
    for (leaf, comp, exp) in calc_coefficients(&ct.policy, &pruned) {
        let c_y = &ct.c_y[leaf];
        let d_j = &sk.comps[comp];
        a = a * (pairing(c_y.1, d_j.1) * pairing(d_j.2, c_y.2).inverse()).pow(exp);
    }
    Ok(ct.cs * a * pairing(ct.c, sk.d).inverse())
}
