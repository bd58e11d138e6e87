use std::collections::HashSet;

use super::balance_api::BalanceError;
use super::simplifier::simplify;
use super::syntax::Token;

/// Structural checks over the scanned token sequence. All three must pass
/// before any numeric work starts:
/// 1. exactly one yield sign,
/// 2. the same element set on the reactant and the product side,
/// 3. at most one top-level formula with a user-declared default coefficient.
pub fn validate(ast: &[Token]) -> Result<(), BalanceError> {
    check_yield(ast)?;
    check_element_sets(ast)?;
    check_pinned(ast)?;
    Ok(())
}

fn check_yield(ast: &[Token]) -> Result<(), BalanceError> {
    let yields = ast.iter().filter(|t| matches!(t, Token::Yield)).count();
    match yields {
        0 => Err(BalanceError::MissingYield),
        1 => Ok(()),
        _ => Err(BalanceError::DuplicateYield),
    }
}

fn check_element_sets(ast: &[Token]) -> Result<(), BalanceError> {
    let mut left: HashSet<String> = HashSet::new();
    let mut right: HashSet<String> = HashSet::new();
    let mut after_yield = false;
    for token in ast {
        if matches!(token, Token::Yield) {
            after_yield = true;
            continue;
        }
        if let Some(compound) = simplify(token, false) {
            let side = if after_yield { &mut right } else { &mut left };
            for (name, _) in &compound.atoms {
                side.insert(name.clone());
            }
        }
    }
    if left == right {
        Ok(())
    } else {
        Err(BalanceError::ElementMismatch)
    }
}

fn check_pinned(ast: &[Token]) -> Result<(), BalanceError> {
    let pinned = ast
        .iter()
        .filter(|t| matches!(t, Token::Formula { pinned: true, .. }))
        .count();
    if pinned > 1 {
        Err(BalanceError::TooManyPinnedCoefficients)
    } else {
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Balancer::scanner::scan;

    #[test]
    fn test_validate_accepts_well_formed_equation() {
        let ast = scan("[H*2]+[O*2]⇒[H*2 O]");
        assert!(validate(&ast).is_ok());
    }

    #[test]
    fn test_validate_missing_yield() {
        let ast = scan("[H*2]+[O*2]");
        assert!(matches!(validate(&ast), Err(BalanceError::MissingYield)));
    }

    #[test]
    fn test_validate_duplicate_yield() {
        let ast = scan("[H*2]⇒[H*2]⇒[H*2]");
        assert!(matches!(validate(&ast), Err(BalanceError::DuplicateYield)));
    }

    #[test]
    fn test_validate_element_mismatch() {
        let ast = scan("[H*2]+[O*2]⇒[H*2 S]");
        assert!(matches!(
            validate(&ast),
            Err(BalanceError::ElementMismatch)
        ));
    }

    #[test]
    fn test_validate_too_many_pins() {
        let ast = scan("2*[H*2]+1*[O*2]⇒[H*2 O]");
        assert!(matches!(
            validate(&ast),
            Err(BalanceError::TooManyPinnedCoefficients)
        ));
    }

    #[test]
    fn test_validate_single_pin_is_fine() {
        let ast = scan("2*[H*2]+[O*2]⇒[H*2 O]");
        assert!(validate(&ast).is_ok());
    }
}
