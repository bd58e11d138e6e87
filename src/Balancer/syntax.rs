use serde::{Deserialize, Serialize};

/// The yield sign separating the reactant side from the product side.
pub const YIELD_SIGN: char = '⇒';

/// One node of the scanned equation. The notation is flat at the top level
/// (compounds separated by `Sum` and exactly one `Yield`), `Formula` bodies
/// may nest further `Formula` tokens.
///
/// `count` defaults to 1 and `charge` to 0 when absent from the source text.
/// For a top-level `Formula` the `count` field is the stoichiometric
/// coefficient placeholder which the solver fills in; for a nested `Formula`
/// it is the group multiplier (e.g. the 3 of `[O H]*3`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// `+` separator between compounds of one side
    Sum,
    /// `⇒` separator between the two sides
    Yield,
    /// bare element symbol with optional multiplier and optional charge
    Element { name: String, count: f64, charge: f64 },
    /// bracket group; `pinned` records that a leading multiplier was written
    /// before the bracket, which on a top-level formula declares the default
    /// coefficient (the pinned value is `count` itself)
    Formula {
        body: Vec<Token>,
        count: f64,
        charge: f64,
        pinned: bool,
    },
    /// bare signed numeral: free electrons, contributes only to charge balance
    FreeCharge { value: f64 },
}

impl Token {
    /// true for tokens which become one column of the linear system
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            Token::Element { .. } | Token::Formula { .. } | Token::FreeCharge { .. }
        )
    }
}
