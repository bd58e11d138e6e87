use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::linear_system::{self, LinearSystem};
use super::scanner::scan;
use super::simplifier::{AbstractCompound, simplify_sides};
use super::solver::{scale_to_integers, solve};
use super::stringifier::render;
use super::syntax::Token;
use super::validator::validate;

/// Everything that can go wrong between a notation string and its balanced
/// coefficients.
#[derive(Debug, Error, PartialEq)]
pub enum BalanceError {
    #[error("equation must have one yield")]
    MissingYield,
    #[error("equation must have only one yield")]
    DuplicateYield,
    #[error("elements on both sides must be the same")]
    ElementMismatch,
    #[error("must have zero or one formula with default coefficient")]
    TooManyPinnedCoefficients,
    #[error("no solution found")]
    SingularSystem,
}

/// Result of a successful balancing run: the token sequence with the solved
/// coefficients written back, the raw coefficient vector (one entry per
/// compound, reactants first) and the rendered display string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancedEquation {
    pub ast: Vec<Token>,
    pub coefficients: Vec<f64>,
    pub rendered: String,
}

impl BalancedEquation {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Carries the data of one equation through every stage of the pipeline.
/// Each method performs one stage and stores its output, so callers may run
/// the whole pipeline via [`compute`] or stop midway to inspect intermediate
/// state (the CLI does this to show the conservation system).
#[derive(Debug, Clone)]
pub struct ChemEqBalancer {
    pub input: String,
    pub ast: Vec<Token>,
    pub reactants: Vec<AbstractCompound>,
    pub products: Vec<AbstractCompound>,
    pub system: Option<LinearSystem>,
    pub coefficients: Option<Vec<f64>>,
}

impl ChemEqBalancer {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            ast: Vec::new(),
            reactants: Vec::new(),
            products: Vec::new(),
            system: None,
            coefficients: None,
        }
    }

    pub fn from_input(input: &str) -> Self {
        let mut balancer = Self::new();
        balancer.input = input.to_string();
        balancer
    }

    pub fn scan_input(&mut self) {
        self.ast = scan(&self.input);
        info!("scanned {} tokens from input", self.ast.len());
    }

    pub fn validate_ast(&self) -> Result<(), BalanceError> {
        validate(&self.ast)
    }

    pub fn simplify_sides(&mut self) {
        let (left, right) = simplify_sides(&self.ast);
        self.reactants = left;
        self.products = right;
    }

    pub fn build_system(&mut self) {
        self.system = Some(linear_system::build(&self.reactants, &self.products));
    }

    /// Solves the stored system. When no compound carries a user-declared
    /// default coefficient the free solution is rescaled to the smallest
    /// whole-number ratio; a declared pin is honored exactly.
    pub fn solve_system(&mut self) -> Result<(), BalanceError> {
        let Some(system) = &self.system else {
            warn!("solve_system called before build_system");
            return Err(BalanceError::SingularSystem);
        };
        let mut coefficients = solve(&system.a, &system.b)?;
        let has_pin = self
            .reactants
            .iter()
            .chain(self.products.iter())
            .any(|c| c.pinned.is_some());
        if !has_pin {
            coefficients = scale_to_integers(&coefficients);
        }
        info!("solved coefficients: {coefficients:?}");
        self.coefficients = Some(coefficients);
        Ok(())
    }

    /// Writes the solved coefficients back into the token sequence, in
    /// compound order: a top-level formula takes the coefficient as its
    /// count, a bare element and a free-electron term absorb it
    /// multiplicatively.
    pub fn write_back(&mut self) {
        let Some(coefficients) = &self.coefficients else {
            return;
        };
        let mut next = 0usize;
        for token in self.ast.iter_mut() {
            if !token.is_compound() {
                continue;
            }
            let Some(c) = coefficients.get(next).copied() else {
                break;
            };
            next += 1;
            match token {
                Token::Formula { count, .. } => *count = c,
                Token::Element { count, .. } => *count *= c,
                Token::FreeCharge { value } => *value *= c,
                _ => {}
            }
        }
    }

    pub fn render_solution(&self) -> String {
        render(&self.ast)
    }
}

impl Default for ChemEqBalancer {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the full pipeline over one notation string. Pure: equal inputs give
/// equal outputs, nothing outside the returned value is touched.
pub fn compute(input: &str) -> Result<BalancedEquation, BalanceError> {
    info!("balancing: {input}");
    let mut balancer = ChemEqBalancer::from_input(input);
    balancer.scan_input();
    balancer.validate_ast()?;
    balancer.simplify_sides();
    balancer.build_system();
    balancer.solve_system()?;
    balancer.write_back();
    let rendered = balancer.render_solution();
    let coefficients = balancer.coefficients.unwrap_or_default();
    Ok(BalancedEquation {
        ast: balancer.ast,
        coefficients,
        rendered,
    })
}
