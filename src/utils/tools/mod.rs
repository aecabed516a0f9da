use rabe_bn::*;

/// Embed a tree index into the scalar field. Shares are evaluated at the
/// 1-based child position, Lagrange coefficients at the selected positions.
pub fn usize_to_fr(_i: usize) -> Fr {
    Fr::from_str(&_i.to_string()).unwrap()
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_usize_to_fr() {
        let one = Fr::one();
        assert_eq!(usize_to_fr(0), Fr::zero());
        assert_eq!(usize_to_fr(1), one);
        assert_eq!(usize_to_fr(3), one + one + one);
    }
}
