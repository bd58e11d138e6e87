/// The module takes as input a chemical equation written in the compact bracket
/// notation and turns it into an ordered sequence of syntax tokens. Nested bracket
/// groups are scanned recursively. The scanner is lenient: text it cannot match
/// produces no token, strictness lives in the validator and the solver.
pub mod scanner;
/// Syntax tokens of the equation notation: `Sum`, `Yield`, `Element`, `Formula`,
/// `FreeCharge`. A scanned equation is an ordered `Vec<Token>` with the reactant
/// side before the `Yield` token and the product side after it.
pub mod syntax;
/// Three structural checks over the top-level token sequence which must pass before
/// any computation: exactly one yield, the same element set on both sides, and at
/// most one compound with a user-declared default coefficient.
pub mod validator;
/// The module reduces every compound (bracket group, bare element or free-electron
/// term) to a flat composition: element name -> atom count, plus net charge, plus
/// an optional pinned default coefficient. Nested multipliers are resolved here.
pub mod simplifier;
/// Construction of the conservation system: one row per element symbol plus one row
/// for the charge accumulator plus one pinning row, one column per compound,
/// reactant columns positive and product columns negated.
pub mod linear_system;
/// Least-squares solver: normal equations reduced by Gaussian elimination with
/// partial pivoting, back substitution, rounding to a stable decimal precision and
/// scaling of the free (unpinned) solution to the smallest integer ratio.
pub mod solver;
/// Rendering of the token sequence back into the display notation with Unicode
/// subscript counts and superscript charges.
pub mod stringifier;
/// API of the whole module: the `ChemEqBalancer` struct which carries the data of
/// one equation through every stage, and the pure function `compute` which runs the
/// full pipeline scanner -> validator -> simplifier -> builder -> solver -> stringifier.
///
///  # Examples
/// ```
/// use StoiThe::Balancer::balance_api::compute;
/// let result = compute("[H*2]+[O*2]⇒[H*2 O]").unwrap();
/// assert_eq!(result.coefficients, vec![2.0, 1.0, 2.0]);
/// assert_eq!(result.rendered, "2H₂ + O₂ ⇒ 2H₂O ");
/// ```
pub mod balance_api;

#[cfg(test)]
mod balancer_tests;
