use super::syntax::Token;

/// Flat composition of one compound: ordered atom counts, net charge and the
/// optional user-declared default coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct AbstractCompound {
    /// element name -> atom count, in first-appearance order
    pub atoms: Vec<(String, f64)>,
    pub charge: f64,
    /// `Some(c)` when the source text wrote a leading multiplier before a
    /// top-level bracket group
    pub pinned: Option<f64>,
}

impl AbstractCompound {
    fn new() -> Self {
        Self {
            atoms: Vec::new(),
            charge: 0.0,
            pinned: None,
        }
    }

    fn add_atoms(&mut self, name: &str, count: f64) {
        match self.atoms.iter_mut().find(|(n, _)| n == name) {
            Some((_, c)) => *c += count,
            None => self.atoms.push((name.to_string(), count)),
        }
    }

    pub fn count_of(&self, name: &str) -> f64 {
        self.atoms
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
            .unwrap_or(0.0)
    }
}

/// Reduces one compound token to its flat composition. `Sum` and `Yield`
/// separators reduce to nothing.
///
/// Multipliers distribute over nesting: a nested formula multiplies the atom
/// counts of its body by its own group count, while the count of a top-level
/// formula is the stoichiometric coefficient and is NOT folded into the
/// composition here (the solver determines it).
pub fn simplify(token: &Token, is_nested: bool) -> Option<AbstractCompound> {
    match token {
        Token::Sum | Token::Yield => None,
        Token::Element {
            name,
            count,
            charge,
        } => {
            let mut compound = AbstractCompound::new();
            compound.add_atoms(name, *count);
            compound.charge = *charge;
            Some(compound)
        }
        Token::FreeCharge { value } => {
            let mut compound = AbstractCompound::new();
            compound.charge = *value;
            Some(compound)
        }
        Token::Formula {
            body,
            count,
            charge,
            pinned,
        } => {
            let mut compound = AbstractCompound::new();
            let mult = if is_nested { *count } else { 1.0 };
            for child in body {
                if let Some(inner) = simplify(child, true) {
                    for (name, atom_count) in &inner.atoms {
                        compound.add_atoms(name, atom_count * mult);
                    }
                }
            }
            // only the formula's own written charge counts; charge marks on
            // nested tokens do not accumulate
            compound.charge = *charge;
            if !is_nested && *pinned {
                compound.pinned = Some(*count);
            }
            Some(compound)
        }
    }
}

/// Splits the top-level token sequence at the yield sign and simplifies each
/// side into its list of compounds.
pub fn simplify_sides(ast: &[Token]) -> (Vec<AbstractCompound>, Vec<AbstractCompound>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut after_yield = false;
    for token in ast {
        if matches!(token, Token::Yield) {
            after_yield = true;
            continue;
        }
        if let Some(compound) = simplify(token, false) {
            if after_yield {
                right.push(compound);
            } else {
                left.push(compound);
            }
        }
    }
    (left, right)
}

/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Balancer::scanner::scan;

    #[test]
    fn test_simplify_nested_multipliers() {
        // Al2(SO3)3: the *3 on the inner group distributes over S and O
        let ast = scan("[2*Al [S O*3]*3]");
        let compound = simplify(&ast[0], false).unwrap();
        assert_eq!(
            compound.atoms,
            vec![
                ("Al".to_string(), 2.0),
                ("S".to_string(), 3.0),
                ("O".to_string(), 9.0)
            ]
        );
        assert_eq!(compound.charge, 0.0);
        assert_eq!(compound.pinned, None);
    }

    #[test]
    fn test_simplify_merges_repeated_elements() {
        let ast = scan("[H O H]");
        let compound = simplify(&ast[0], false).unwrap();
        assert_eq!(
            compound.atoms,
            vec![("H".to_string(), 2.0), ("O".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_simplify_charge_and_pin() {
        let ast = scan("2*[Mn O*4]^-1");
        let compound = simplify(&ast[0], false).unwrap();
        assert_eq!(compound.charge, -1.0);
        assert_eq!(compound.pinned, Some(2.0));
    }

    #[test]
    fn test_simplify_ignores_nested_charges() {
        // only the group's own ^charge counts toward the compound charge
        let ast = scan("[H^1 O]");
        let compound = simplify(&ast[0], false).unwrap();
        assert_eq!(compound.charge, 0.0);
        let ast = scan("[H^1 O]^-2");
        let compound = simplify(&ast[0], false).unwrap();
        assert_eq!(compound.charge, -2.0);
    }

    #[test]
    fn test_simplify_free_charge() {
        let compound = simplify(&Token::FreeCharge { value: -2.0 }, false).unwrap();
        assert!(compound.atoms.is_empty());
        assert_eq!(compound.charge, -2.0);
    }

    #[test]
    fn test_simplify_sides_split() {
        let ast = scan("[H*2]+[O*2]⇒[H*2 O]");
        let (left, right) = simplify_sides(&ast);
        assert_eq!(left.len(), 2);
        assert_eq!(right.len(), 1);
        assert_eq!(right[0].count_of("H"), 2.0);
        assert_eq!(right[0].count_of("O"), 1.0);
    }
}
