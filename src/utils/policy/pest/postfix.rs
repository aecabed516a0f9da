use utils::policy::pest::PolicyNode;
use error::{BswabeError, PolicyError};
use pest::iterators::Pair;

#[derive(Parser)]
#[grammar = "postfix.policy.pest"]
pub(crate) struct PostfixPolicyParser;

/// Builds the tree from the token stream with a single stack pass: an
/// attribute pushes a leaf, a `KofN` gate pops its N children.
pub(crate) fn build(content: Pair<Rule>) -> Result<PolicyNode, BswabeError> {
    let mut stack: Vec<PolicyNode> = Vec::new();
    for token in content.into_inner() {
        match token.as_rule() {
            Rule::attribute => stack.push(PolicyNode::Leaf(token.as_str().to_string())),
            Rule::gate => reduce_gate(token, &mut stack)?,
            Rule::EOI => (),
            Rule::content
            | Rule::token
            | Rule::threshold
            | Rule::arity
            | Rule::sep
            | Rule::WHITESPACE => unreachable!(),
        }
    }
    match stack.len() {
        0 => Err(PolicyError::EmptyPolicy.into()),
        1 => Ok(stack.pop().unwrap()),
        _ => Err(PolicyError::ExtraNodes.into()),
    }
}

fn reduce_gate(token: Pair<Rule>, stack: &mut Vec<PolicyNode>) -> Result<(), BswabeError> {
    let gate = token.as_str().to_string();
    let mut inner = token.into_inner();
    let threshold = inner
        .next()
        .unwrap()
        .as_str()
        .parse::<usize>()
        .map_err(|_| PolicyError::MalformedGate(gate.clone()))?;
    let arity = inner
        .next()
        .unwrap()
        .as_str()
        .parse::<usize>()
        .map_err(|_| PolicyError::MalformedGate(gate.clone()))?;
    if threshold < 1 {
        Err(PolicyError::TriviallySatisfied(gate).into())
    } else if threshold > arity {
        Err(PolicyError::Unsatisfiable(gate).into())
    } else if arity == 1 {
        Err(PolicyError::IdentityGate(gate).into())
    } else if arity > stack.len() {
        Err(PolicyError::StackUnderflow(gate).into())
    } else {
        // split_off keeps the popped nodes in left-to-right order
        let children = stack.split_off(stack.len() - arity);
        stack.push(PolicyNode::Gate { threshold, children });
        Ok(())
    }
}
