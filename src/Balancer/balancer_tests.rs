use std::collections::HashMap;

use approx::assert_relative_eq;

use crate::Balancer::balance_api::{BalanceError, compute};
use crate::Balancer::scanner::scan;
use crate::Balancer::simplifier::simplify;
use crate::Balancer::syntax::Token;

/// total atoms and charge of one side, with top-level formula counts applied
/// as coefficient multipliers
fn side_totals(tokens: &[Token]) -> (HashMap<String, f64>, f64) {
    let mut atoms: HashMap<String, f64> = HashMap::new();
    let mut charge = 0.0;
    for token in tokens {
        let Some(compound) = simplify(token, false) else {
            continue;
        };
        let coeff = match token {
            Token::Formula { count, .. } => *count,
            _ => 1.0,
        };
        for (name, count) in &compound.atoms {
            *atoms.entry(name.clone()).or_insert(0.0) += count * coeff;
        }
        charge += compound.charge * coeff;
    }
    (atoms, charge)
}

fn split_at_yield(ast: &[Token]) -> (&[Token], &[Token]) {
    let pos = ast
        .iter()
        .position(|t| matches!(t, Token::Yield))
        .unwrap();
    (&ast[..pos], &ast[pos + 1..])
}

#[test]
fn test_balance_water() {
    let result = compute("[H*2]+[O*2]⇒[H*2 O]").unwrap();
    assert_eq!(result.coefficients, vec![2.0, 1.0, 2.0]);
    assert_eq!(result.rendered, "2H₂ + O₂ ⇒ 2H₂O ");
}

#[test]
fn test_balance_aluminium_sulfite() {
    let result =
        compute("[2*Al [S O*3]*3]+[Na O H]⇒[Na*2 S O*3]+[Al [O H]*3]").unwrap();
    assert_eq!(result.coefficients, vec![1.0, 6.0, 3.0, 2.0]);
}

#[test]
fn test_balance_charged_equation() {
    let result = compute("[H*2 O]+[Mn O*4]^-1-1⇒[Mn O*2]+[O H]^-1").unwrap();
    assert_eq!(result.coefficients, vec![2.0, 1.0, 3.0, 1.0, 4.0]);
}

#[test]
fn test_balance_with_declared_coefficient() {
    // the declared 2 on H2 pins the solution, no rescaling happens
    let result = compute("2*[H*2]+[O*2]⇒[H*2 O]").unwrap();
    assert_eq!(result.coefficients, vec![2.0, 1.0, 2.0]);
}

#[test]
fn test_balance_fractional_pin_kept_verbatim() {
    let result = compute("[H*2]+0.5*[O*2]⇒[H*2 O]").unwrap();
    assert_eq!(result.coefficients, vec![1.0, 0.5, 1.0]);
}

#[test]
fn test_singular_equation_is_rejected() {
    let result = compute("[H*2]⇒[H*2]+[H*2]");
    assert_eq!(result, Err(BalanceError::SingularSystem));
}

#[test]
fn test_structural_errors() {
    assert_eq!(compute("[H*2]+[O*2]"), Err(BalanceError::MissingYield));
    assert_eq!(
        compute("[H*2]⇒[H*2 O]⇒[H*2]"),
        Err(BalanceError::DuplicateYield)
    );
    assert_eq!(compute("[H*2]⇒[O*2]"), Err(BalanceError::ElementMismatch));
    assert_eq!(
        compute("1*[H*2]+1*[O*2]⇒[H*2 O]"),
        Err(BalanceError::TooManyPinnedCoefficients)
    );
}

#[test]
fn test_balanced_result_conserves_atoms_and_charge() {
    let inputs = [
        "[H*2]+[O*2]⇒[H*2 O]",
        "[2*Al [S O*3]*3]+[Na O H]⇒[Na*2 S O*3]+[Al [O H]*3]",
        "[H*2 O]+[Mn O*4]^-1-1⇒[Mn O*2]+[O H]^-1",
    ];
    for input in inputs {
        let result = compute(input).unwrap();
        let (left, right) = split_at_yield(&result.ast);
        let (left_atoms, left_charge) = side_totals(left);
        let (right_atoms, right_charge) = side_totals(right);
        assert_eq!(
            left_atoms.keys().collect::<Vec<_>>().len(),
            right_atoms.keys().collect::<Vec<_>>().len(),
            "element sets differ for {input}"
        );
        for (name, count) in &left_atoms {
            assert_relative_eq!(*count, right_atoms[name], epsilon = 1e-6);
        }
        assert_relative_eq!(left_charge, right_charge, epsilon = 1e-6);
    }
}

/// render then rescan must preserve the atom totals and the charge totals
/// of both sides
fn assert_scans_back(ast: &[Token], label: &str) {
    let rendered = crate::Balancer::stringifier::render(ast);
    let rescanned = scan(&rendered);
    let (left_a, right_a) = split_at_yield(ast);
    let (left_b, right_b) = split_at_yield(&rescanned);
    assert_eq!(side_totals(left_a), side_totals(left_b), "{label}");
    assert_eq!(side_totals(right_a), side_totals(right_b), "{label}");
}

#[test]
fn test_rendered_output_scans_back() {
    // the display spelling of the input describes the same mixture
    let inputs = [
        "[H*2]+[O*2]⇒[H*2 O]",
        "[Na O H]+[Al [O H]*3]⇒[Na O H]+[Al [O H]*3]",
        "[H*2 O]+[Mn O*4]^-1-1⇒[Mn O*2]+[O H]^-1",
    ];
    for input in inputs {
        assert_scans_back(&scan(input), input);
    }
}

#[test]
fn test_rendered_coefficients_scan_back() {
    // a written coefficient multiplies the whole compound when the rendered
    // form is scanned again, not just its first symbol
    assert_scans_back(&scan("2*[H*2 O]⇒2*[H*2 O]"), "declared coefficient");
    let inputs = [
        "[H*2]+[O*2]⇒[H*2 O]",
        "[2*Al [S O*3]*3]+[Na O H]⇒[Na*2 S O*3]+[Al [O H]*3]",
        "[H*2 O]+[Mn O*4]^-1-1⇒[Mn O*2]+[O H]^-1",
    ];
    for input in inputs {
        let result = compute(input).unwrap();
        assert_scans_back(&result.ast, input);
    }
}

#[test]
fn test_compute_is_deterministic() {
    let first = compute("[H*2]+[O*2]⇒[H*2 O]").unwrap();
    let second = compute("[H*2]+[O*2]⇒[H*2 O]").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_json_output() {
    let result = compute("[H*2]+[O*2]⇒[H*2 O]").unwrap();
    let json = result.to_json().unwrap();
    assert!(json.contains("\"coefficients\""));
    assert!(json.contains("\"rendered\""));
}
