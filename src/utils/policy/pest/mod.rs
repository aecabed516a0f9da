use pest::Parser;
use std::string::String;
use error::BswabeError;
#[cfg(feature = "serde")]
use serde::{Serialize, Deserialize};
#[cfg(feature = "borsh")]
use borsh::{BorshSerialize, BorshDeserialize};

pub(crate) mod postfix;

use self::postfix::PostfixPolicyParser;

/// Supported textual policy encodings.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PolicyLanguage {
    /// whitespace separated postorder tokens, e.g. `"foo bar fim 2of3 baf 1of2"`
    PostfixPolicy,
}

/// An access policy: a tree of threshold gates over attribute leaves. The
/// shape is fixed once parsed; encryption and decryption annotate it through
/// separate, call-local structures.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "borsh", derive(BorshSerialize, BorshDeserialize))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PolicyNode {
    /// a named attribute
    Leaf(String),
    /// satisfied when at least `threshold` of the children are satisfied;
    /// the parser guarantees 1 <= threshold <= children.len() and
    /// children.len() > 1
    Gate {
        threshold: usize,
        children: Vec<PolicyNode>,
    },
}

impl PolicyNode {
    /// Number of attribute leaves in this subtree.
    pub fn leaves(&self) -> usize {
        match self {
            PolicyNode::Leaf(_) => 1,
            PolicyNode::Gate { children, .. } => children.iter().map(|child| child.leaves()).sum(),
        }
    }
}

pub fn parse(policy: &str, language: PolicyLanguage) -> Result<PolicyNode, BswabeError> {
    match language {
        PolicyLanguage::PostfixPolicy => {
            use utils::policy::pest::postfix::Rule;
            match PostfixPolicyParser::parse(Rule::content, policy) {
                Ok(mut result) => postfix::build(result.next().unwrap()),
                Err(e) => Err(e.into())
            }
        }
    }
}

/// Renders a policy tree back into its textual encoding.
pub fn serialize_policy(val: &PolicyNode, language: PolicyLanguage) -> String {
    match language {
        PolicyLanguage::PostfixPolicy => {
            match val {
                PolicyNode::Leaf(attr) => attr.clone(),
                PolicyNode::Gate { threshold, children } => {
                    let contents: Vec<_> = children.iter().map(|child| serialize_policy(child, language)).collect();
                    format!("{} {}of{}", contents.join(" "), threshold, children.len())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::PolicyError;

    fn parse_postfix(policy: &str) -> Result<PolicyNode, BswabeError> {
        parse(policy, PolicyLanguage::PostfixPolicy)
    }

    #[test]
    fn test_single_leaf_parsing() {
        let root = parse_postfix("A").unwrap();
        assert_eq!(root, PolicyNode::Leaf("A".to_string()));
    }

    #[test]
    fn test_gate_parsing() {
        let root = parse_postfix("a b 2of2").unwrap();
        match root {
            PolicyNode::Gate { threshold, ref children } => {
                assert_eq!(threshold, 2);
                assert_eq!(children[0], PolicyNode::Leaf("a".to_string()));
                assert_eq!(children[1], PolicyNode::Leaf("b".to_string()));
            }
            _ => panic!("expected a gate at the root"),
        }
    }

    #[test]
    fn test_nested_parsing_keeps_child_order() {
        let root = parse_postfix("foo bar fim 2of3 baf 1of2").unwrap();
        match root {
            PolicyNode::Gate { threshold, ref children } => {
                assert_eq!(threshold, 1);
                assert_eq!(children.len(), 2);
                match children[0] {
                    PolicyNode::Gate { threshold, ref children } => {
                        assert_eq!(threshold, 2);
                        let names: Vec<_> = children
                            .iter()
                            .map(|child| serialize_policy(child, PolicyLanguage::PostfixPolicy))
                            .collect();
                        assert_eq!(names, vec!["foo", "bar", "fim"]);
                    }
                    _ => panic!("expected inner gate as first child"),
                }
                assert_eq!(children[1], PolicyNode::Leaf("baf".to_string()));
            }
            _ => panic!("expected a gate at the root"),
        }
    }

    #[test]
    fn test_serialize_round_trip() {
        let policy = "foo bar fim 2of3 baf 1of2";
        let root = parse_postfix(policy).unwrap();
        assert_eq!(serialize_policy(&root, PolicyLanguage::PostfixPolicy), policy);
    }

    #[test]
    fn test_trivially_satisfied_gate() {
        assert_eq!(
            parse_postfix("a b 0of2"),
            Err(BswabeError::InvalidPolicy(PolicyError::TriviallySatisfied("0of2".to_string())))
        );
    }

    #[test]
    fn test_unsatisfiable_gate() {
        assert_eq!(
            parse_postfix("a b 3of2"),
            Err(BswabeError::InvalidPolicy(PolicyError::Unsatisfiable("3of2".to_string())))
        );
    }

    #[test]
    fn test_identity_gate() {
        assert_eq!(
            parse_postfix("a 1of1"),
            Err(BswabeError::InvalidPolicy(PolicyError::IdentityGate("1of1".to_string())))
        );
    }

    #[test]
    fn test_stack_underflow() {
        assert_eq!(
            parse_postfix("a b 2of3"),
            Err(BswabeError::InvalidPolicy(PolicyError::StackUnderflow("2of3".to_string())))
        );
    }

    #[test]
    fn test_extra_nodes() {
        assert_eq!(
            parse_postfix("a b c 2of2"),
            Err(BswabeError::InvalidPolicy(PolicyError::ExtraNodes))
        );
    }

    #[test]
    fn test_empty_policy() {
        assert_eq!(
            parse_postfix("  "),
            Err(BswabeError::InvalidPolicy(PolicyError::EmptyPolicy))
        );
    }

    #[test]
    fn test_dangling_gate_suffix_is_rejected() {
        // "2of3x" is neither a gate nor an attribute
        match parse_postfix("a b c 2of3x") {
            Err(BswabeError::InvalidPolicy(PolicyError::Syntax(_))) => (),
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_attribute_containing_of_is_rejected() {
        match parse_postfix("professor student 1of2") {
            Err(BswabeError::InvalidPolicy(PolicyError::Syntax(_))) => (),
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_underscores_allowed_in_attributes() {
        let root = parse_postfix("some_attr other_attr 1of2").unwrap();
        assert_eq!(root.leaves(), 2);
    }
}
