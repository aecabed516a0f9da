use std::{
    error,
    fmt::{
        Display,
        Formatter,
        Result
    },
    cmp
};
use pest::error::{Error as PestError, LineColLocation};
use rabe_bn::FieldError;
use utils::policy::pest::postfix::Rule as PostfixRule;
#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};

#[cfg(feature = "borsh")]
use borsh::{BorshSerialize, BorshDeserialize};

/// Reasons a policy string is rejected at parse time. All of them are
/// terminal for the encrypt call; none is retryable without fixing the
/// policy string.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PolicyError {
    /// gate with a threshold below one, e.g. `0of2`
    TriviallySatisfied(String),
    /// gate with a threshold above its arity, e.g. `3of2`
    Unsatisfiable(String),
    /// single-child gate `1of1`
    IdentityGate(String),
    /// gate arity exceeds the number of nodes parsed so far
    StackUnderflow(String),
    /// threshold or arity does not fit into a machine integer
    MalformedGate(String),
    /// more than one root candidate after the last token
    ExtraNodes,
    /// no tokens at all
    EmptyPolicy,
    /// token-level syntax error reported by the grammar
    Syntax(String),
}

impl Display for PolicyError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PolicyError::TriviallySatisfied(gate) => write!(f, "trivially satisfied operator {}", gate),
            PolicyError::Unsatisfiable(gate) => write!(f, "unsatisfiable operator {}", gate),
            PolicyError::IdentityGate(gate) => write!(f, "identity operator {}", gate),
            PolicyError::StackUnderflow(gate) => write!(f, "stack underflow at {}", gate),
            PolicyError::MalformedGate(gate) => write!(f, "malformed threshold gate {}", gate),
            PolicyError::ExtraNodes => write!(f, "extra node left on the stack"),
            PolicyError::EmptyPolicy => write!(f, "empty policy"),
            PolicyError::Syntax(details) => write!(f, "syntax error {}", details),
        }
    }
}

/// Error type of the crate. Access denial is an expected outcome of
/// decryption and gets its own variant so callers can tell it apart from
/// broken inputs.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BswabeError {
    /// the policy string was rejected
    InvalidPolicy(PolicyError),
    /// attributes in the key do not satisfy the policy of the ciphertext
    AccessDenied,
    /// a digest could not be embedded into the scalar field
    FieldDecoding(String),
}

impl Display for BswabeError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            BswabeError::InvalidPolicy(e) => write!(f, "Error parsing policy: {}", e),
            BswabeError::AccessDenied => write!(f, "Error: attributes in key do not satisfy policy"),
            BswabeError::FieldDecoding(details) => write!(f, "Error: {}", details),
        }
    }
}

impl error::Error for BswabeError {}

impl From<PolicyError> for BswabeError {
    fn from(error: PolicyError) -> Self {
        BswabeError::InvalidPolicy(error)
    }
}

impl From<PestError<PostfixRule>> for BswabeError {
    fn from(error: PestError<PostfixRule>) -> Self {
        let line = match error.line_col.to_owned() {
            LineColLocation::Pos((line, _)) => line,
            LineColLocation::Span((start_line, _), (end_line, _)) => cmp::max(start_line, end_line),
        };
        BswabeError::InvalidPolicy(PolicyError::Syntax(format!("in line {}", line)))
    }
}

impl From<FieldError> for BswabeError {
    fn from(error: FieldError) -> Self {
        match error {
            FieldError::InvalidSliceLength => BswabeError::FieldDecoding("FieldError::InvalidSliceLength".to_string()),
            FieldError::InvalidU512Encoding => BswabeError::FieldDecoding("FieldError::InvalidU512Encoding".to_string()),
            FieldError::NotMember => BswabeError::FieldDecoding("FieldError::NotMember".to_string()),
        }
    }
}
