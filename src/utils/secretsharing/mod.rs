//! Threshold secret sharing over a policy tree: share distribution during
//! encryption, pruning during decryption and the Lagrange arithmetic that
//! ties the two together. Everything here works on scalars; the pairing
//! arithmetic stays in the scheme module.
use rabe_bn::*;
use rand::Rng;
use utils::policy::pest::PolicyNode;
use utils::tools::usize_to_fr;
use utils::trace::{NoopSink, TraceEvent, TraceSink};

/// A polynomial over [`rabe-bn::Fr`], coefficients from x^0 upwards.
#[derive(Clone, PartialEq)]
pub struct Polynomial {
    coef: Vec<Fr>,
}

impl Polynomial {
    /// Degree `deg` polynomial with the given constant term and uniformly
    /// random higher coefficients.
    pub fn random(deg: usize, zero_value: Fr) -> Polynomial {
        let mut rng = rand::thread_rng();
        let mut coef: Vec<Fr> = vec![zero_value];
        for _i in 0..deg {
            coef.push(rng.gen());
        }
        Polynomial { coef }
    }

    pub fn degree(&self) -> usize {
        self.coef.len() - 1
    }

    /// Direct evaluation with a running power of x.
    pub fn eval(&self, x: Fr) -> Fr {
        let mut share = Fr::zero();
        let mut power = Fr::one();
        for coef in self.coef.iter() {
            share = share + (*coef * power);
            power = power * x;
        }
        share
    }
}

/// Distributes `secret` over the policy tree: every gate with threshold k
/// draws a degree k-1 polynomial whose constant term is the share it
/// received, child i (1-based) receives the evaluation at i. Returns one
/// share per leaf in depth-first order, the order in which a ciphertext
/// stores its per-leaf elements.
pub fn gen_shares_policy(secret: Fr, policy: &PolicyNode, sink: &dyn TraceSink) -> Vec<(String, Fr)> {
    match policy {
        PolicyNode::Leaf(attr) => {
            sink.notify(TraceEvent::ShareAssigned { attr });
            vec![(attr.clone(), secret)]
        }
        PolicyNode::Gate { threshold, children } => {
            let q = Polynomial::random(threshold - 1, secret);
            let mut shares: Vec<(String, Fr)> = Vec::new();
            for (i, child) in children.iter().enumerate() {
                shares.extend(gen_shares_policy(q.eval(usize_to_fr(i + 1)), child, sink));
            }
            shares
        }
    }
}

/// Decryption-time scratch, parallel in shape to the policy tree. It is
/// recomputed on every decrypt call so the ciphertext itself stays
/// untouched and can be shared across concurrent decryptions.
#[derive(Clone, PartialEq, Debug)]
pub struct PrunedNode {
    pub satisfiable: bool,
    /// leaf only: position of the first matching component in the key
    pub attr_index: Option<usize>,
    /// number of leaves a decryption of this subtree has to pair
    pub min_leaves: usize,
    /// gate only: 1-based positions of the children picked to meet the
    /// threshold, in ascending cost order
    pub selected: Vec<usize>,
    pub children: Vec<PrunedNode>,
}

/// Marks every node of the tree as satisfiable or not for the given
/// attribute list. Recurses into all children unconditionally; the later
/// passes rely on unselected siblings being annotated too.
pub fn check_satisfy(policy: &PolicyNode, attributes: &[String], sink: &dyn TraceSink) -> PrunedNode {
    match policy {
        PolicyNode::Leaf(attr) => {
            let attr_index = attributes.iter().position(|candidate| candidate == attr);
            sink.notify(TraceEvent::LeafChecked { attr, satisfied: attr_index.is_some() });
            PrunedNode {
                satisfiable: attr_index.is_some(),
                attr_index,
                min_leaves: 0,
                selected: Vec::new(),
                children: Vec::new(),
            }
        }
        PolicyNode::Gate { threshold, children } => {
            let pruned: Vec<PrunedNode> = children
                .iter()
                .map(|child| check_satisfy(child, attributes, sink))
                .collect();
            let satisfied = pruned.iter().filter(|child| child.satisfiable).count();
            sink.notify(TraceEvent::GateChecked {
                threshold: *threshold,
                satisfied,
                arity: children.len(),
            });
            PrunedNode {
                satisfiable: satisfied >= *threshold,
                attr_index: None,
                min_leaves: 0,
                selected: Vec::new(),
                children: pruned,
            }
        }
    }
}

/// Picks, per satisfied gate, the cheapest subset of satisfiable children
/// that still meets the threshold. Cost is the number of leaves that end up
/// in pairings; ties keep the original child order. Must only be called
/// after [`check_satisfy`] and only on a satisfiable node.
pub fn pick_min_leaves(policy: &PolicyNode, pruned: &mut PrunedNode, sink: &dyn TraceSink) {
    assert!(pruned.satisfiable, "pick_min_leaves called on an unsatisfiable node");
    match policy {
        PolicyNode::Leaf(_) => pruned.min_leaves = 1,
        PolicyNode::Gate { threshold, children } => {
            for (i, child) in children.iter().enumerate() {
                if pruned.children[i].satisfiable {
                    pick_min_leaves(child, &mut pruned.children[i], sink);
                }
            }
            let mut order: Vec<usize> = (0..children.len())
                .filter(|i| pruned.children[*i].satisfiable)
                .collect();
            // stable sort: equally cheap children stay in tree order
            order.sort_by_key(|i| pruned.children[*i].min_leaves);
            pruned.selected = order[..*threshold].iter().map(|i| *i + 1).collect();
            pruned.min_leaves = pruned
                .selected
                .iter()
                .map(|i| pruned.children[*i - 1].min_leaves)
                .sum();
            sink.notify(TraceEvent::ChildrenSelected {
                threshold: *threshold,
                selected: &pruned.selected,
            });
        }
    }
}

/// Lagrange basis coefficient for point `i` evaluated at zero over the
/// selected index set: prod_{j in set, j != i} (0 - j) / (i - j).
pub fn lagrange_coef(set: &[usize], i: usize) -> Fr {
    let mut coef = Fr::one();
    for j in set.iter().cloned() {
        if j == i {
            continue;
        }
        coef = coef * ((Fr::zero() - usize_to_fr(j)) * (usize_to_fr(i) - usize_to_fr(j)).inverse().unwrap());
    }
    coef
}

/// Flattens the pruned tree into `(leaf position, key component position,
/// exponent)` triples: the exponent of a leaf is the product of the
/// Lagrange coefficients along its path, each computed over the selected
/// sibling set of that gate, not over all siblings. Unselected subtrees
/// only advance the leaf counter.
pub fn calc_coefficients(policy: &PolicyNode, pruned: &PrunedNode) -> Vec<(usize, usize, Fr)> {
    let mut result: Vec<(usize, usize, Fr)> = Vec::new();
    let mut leaf_index = 0;
    flatten_coefficients(policy, pruned, Fr::one(), &mut leaf_index, &mut result);
    result
}

fn flatten_coefficients(
    policy: &PolicyNode,
    pruned: &PrunedNode,
    exp: Fr,
    leaf_index: &mut usize,
    result: &mut Vec<(usize, usize, Fr)>,
) {
    match policy {
        PolicyNode::Leaf(_) => {
            let attr_index = pruned.attr_index.expect("selected leaf without a matching key component");
            result.push((*leaf_index, attr_index, exp));
            *leaf_index += 1;
        }
        PolicyNode::Gate { children, .. } => {
            for (i, child) in children.iter().enumerate() {
                if pruned.selected.contains(&(i + 1)) {
                    let coef = lagrange_coef(&pruned.selected, i + 1);
                    flatten_coefficients(child, &pruned.children[i], exp * coef, leaf_index, result);
                } else {
                    *leaf_index += child.leaves();
                }
            }
        }
    }
}

/// Scalar-level reconstruction: applies the flattened coefficients to the
/// depth-first leaf shares. Returns `None` if the attributes do not satisfy
/// the policy. Exercised by the tests; the scheme performs the same
/// combination in the exponent of the target group.
pub fn recover_secret(policy: &PolicyNode, attributes: &[String], shares: &[(String, Fr)]) -> Option<Fr> {
    let mut pruned = check_satisfy(policy, attributes, &NoopSink);
    if !pruned.satisfiable {
        return None;
    }
    pick_min_leaves(policy, &mut pruned, &NoopSink);
    let mut secret = Fr::zero();
    for (leaf, _, coef) in calc_coefficients(policy, &pruned) {
        secret = secret + (coef * shares[leaf].1);
    }
    Some(secret)
}
