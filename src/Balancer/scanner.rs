use super::syntax::{Token, YIELD_SIGN};

/// Scans the notation string into an ordered token sequence.
///
/// The function is total over any input: spans that match no alternative are
/// skipped character by character, so malformed text surfaces later (validator
/// or solver) instead of here. Alternatives are tried in a fixed priority
/// order: sum, yield, bracketed formula, element, free charge.
///
/// Both spellings of the notation are accepted: the ASCII form written by the
/// input layer (`[H*2 O]`, `^-1`, `2*[...]`) and the rendered display form
/// (`H₂O`, parentheses around nested groups, `⁻¹` charges), so the output of
/// the stringifier scans back into an equivalent token sequence.
///
///  # Examples
/// ```
/// use StoiThe::Balancer::scanner::scan;
/// use StoiThe::Balancer::syntax::Token;
/// let ast = scan("[H*2]+[O*2]⇒[H*2 O]");
/// assert_eq!(ast.len(), 5);
/// assert!(matches!(ast[3], Token::Yield));
/// ```
pub fn scan(text: &str) -> Vec<Token> {
    Scanner::new(text).run()
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn new(text: &str) -> Self {
        // parentheses are the display spelling of bracket groups
        let chars = text
            .chars()
            .map(|c| match c {
                '(' => '[',
                ')' => ']',
                other => other,
            })
            .collect();
        Self { chars, pos: 0 }
    }

    fn run(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let Some(c) = self.peek() else { break };
            if c == '+' {
                self.pos += 1;
                tokens.push(Token::Sum);
                continue;
            }
            if c == YIELD_SIGN {
                self.pos += 1;
                tokens.push(Token::Yield);
                continue;
            }
            if let Some(token) = self.try_formula() {
                tokens.push(token);
                continue;
            }
            if let Some(token) = self.try_coefficient_run() {
                tokens.push(token);
                continue;
            }
            if let Some(token) = self.try_element() {
                tokens.push(token);
                continue;
            }
            if let Some(token) = self.try_free_charge() {
                tokens.push(token);
                continue;
            }
            // nothing matched here; drop the character and keep moving so the
            // scan always makes forward progress
            self.pos += 1;
        }
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    /// `2*` / `2` before a bracket or an element symbol
    fn read_leading_multiplier(&mut self) -> Option<f64> {
        let value = self.read_decimal()?;
        self.skip_whitespace();
        if self.peek() == Some('*') {
            self.pos += 1;
            self.skip_whitespace();
        }
        Some(value)
    }

    /// `[`, optional leading multiplier, trailing `*n`, `^charge`
    fn try_formula(&mut self) -> Option<Token> {
        let start = self.pos;
        let leading = self.read_leading_multiplier();
        if self.peek() != Some('[') {
            self.pos = start;
            return None;
        }
        self.pos += 1;
        let mut depth = 1usize;
        let mut inner = String::new();
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == '[' {
                depth += 1;
            } else if c == ']' {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            inner.push(c);
        }
        if depth != 0 {
            // unterminated group: no token for this span
            self.pos = start;
            return None;
        }
        let trailing = self.read_trailing_multiplier();
        let charge = self.read_charge().unwrap_or(0.0);
        Some(Token::Formula {
            body: formula_body(&inner),
            count: leading.unwrap_or(1.0) * trailing.unwrap_or(1.0),
            charge,
            pinned: leading.is_some(),
        })
    }

    /// Plain numeral written directly against a run of symbols, the rendered
    /// spelling of a compound coefficient (`2H₂O`, `4OH⁻¹`). The numeral
    /// multiplies the whole contiguous run, not just the first symbol, so the
    /// run is collected into one formula. A trailing charge belongs to the
    /// compound, not to the last symbol it happens to sit on.
    ///
    /// The `2*X` and `2 X` spellings keep their meaning (multiplier on the
    /// next token only) and are left to the other alternatives.
    fn try_coefficient_run(&mut self) -> Option<Token> {
        let start = self.pos;
        let count = self.read_decimal()?;
        if !self
            .peek()
            .is_some_and(|c| c.is_ascii_uppercase() || c == '[')
        {
            self.pos = start;
            return None;
        }
        let mut body = Vec::new();
        loop {
            let token = match self.peek() {
                Some(c) if c.is_ascii_uppercase() => self.try_element(),
                Some('[') => self.try_formula(),
                _ => None,
            };
            match token {
                Some(t) => body.push(t),
                None => break,
            }
        }
        let mut charge = 0.0;
        if let Some(Token::Element { charge: c, .. } | Token::Formula { charge: c, .. }) =
            body.last_mut()
        {
            if *c != 0.0 {
                charge = *c;
                *c = 0.0;
            }
        }
        // a single uncharged symbol folds the numeral into its own count
        // (the element alternative), grouping adds nothing there
        if body.len() < 2 && charge == 0.0 {
            self.pos = start;
            return None;
        }
        Some(Token::Formula {
            body,
            count,
            charge,
            pinned: true,
        })
    }

    /// capitalized element symbol with optional multipliers and charge
    fn try_element(&mut self) -> Option<Token> {
        let start = self.pos;
        let leading = self.read_leading_multiplier();
        let Some(first) = self.peek() else {
            self.pos = start;
            return None;
        };
        if !first.is_ascii_uppercase() {
            self.pos = start;
            return None;
        }
        let mut name = String::from(first);
        self.pos += 1;
        if let Some(second) = self.peek() {
            if second.is_ascii_lowercase() {
                name.push(second);
                self.pos += 1;
            }
        }
        let trailing = self.read_trailing_multiplier();
        let charge = self.read_charge().unwrap_or(0.0);
        Some(Token::Element {
            name,
            count: leading.unwrap_or(1.0) * trailing.unwrap_or(1.0),
            charge,
        })
    }

    /// bare signed numeral: free electrons
    fn try_free_charge(&mut self) -> Option<Token> {
        if self.peek().is_some_and(is_superscript_start) {
            return self
                .read_superscript_number()
                .map(|value| Token::FreeCharge { value });
        }
        self.read_decimal().map(|value| Token::FreeCharge { value })
    }

    /// `*n` in the ASCII spelling or a subscript digit run in the display spelling
    fn read_trailing_multiplier(&mut self) -> Option<f64> {
        if self.peek() == Some('*') {
            let save = self.pos;
            self.pos += 1;
            match self.read_decimal() {
                Some(value) => Some(value),
                None => {
                    self.pos = save;
                    None
                }
            }
        } else if self.peek().and_then(from_subscript).is_some() {
            self.read_subscript_number()
        } else {
            None
        }
    }

    /// `^±n` in the ASCII spelling or a superscript run in the display spelling
    fn read_charge(&mut self) -> Option<f64> {
        if self.peek() == Some('^') {
            let save = self.pos;
            self.pos += 1;
            match self.read_decimal() {
                Some(value) => Some(value),
                None => {
                    self.pos = save;
                    None
                }
            }
        } else if self.peek().is_some_and(is_superscript_start) {
            self.read_superscript_number()
        } else {
            None
        }
    }

    /// signed decimal number in ASCII digits
    fn read_decimal(&mut self) -> Option<f64> {
        let start = self.pos;
        let mut literal = String::new();
        if let Some(sign) = self.peek() {
            if sign == '-' || sign == '+' {
                literal.push(sign);
                self.pos += 1;
            }
        }
        let mut digits = 0;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits += 1;
                literal.push(c);
                self.pos += 1;
            } else if c == '.' && !literal.contains('.') {
                literal.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if digits == 0 {
            self.pos = start;
            return None;
        }
        match literal.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.pos = start;
                None
            }
        }
    }

    fn read_subscript_number(&mut self) -> Option<f64> {
        let save = self.pos;
        let mut literal = String::new();
        while let Some(d) = self.peek().and_then(from_subscript) {
            literal.push(d);
            self.pos += 1;
        }
        match literal.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.pos = save;
                None
            }
        }
    }

    fn read_superscript_number(&mut self) -> Option<f64> {
        let save = self.pos;
        let mut literal = String::new();
        match self.peek() {
            Some('⁺') => {
                self.pos += 1;
            }
            Some('⁻') => {
                literal.push('-');
                self.pos += 1;
            }
            _ => {}
        }
        let mut digits = 0;
        while let Some(d) = self.peek().and_then(from_superscript) {
            digits += 1;
            literal.push(d);
            self.pos += 1;
        }
        if digits == 0 {
            self.pos = save;
            return None;
        }
        match literal.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.pos = save;
                None
            }
        }
    }
}

/// A bracket body which is just one bare element symbol stays a single
/// `Element` token; anything longer is re-scanned recursively.
fn formula_body(inner: &str) -> Vec<Token> {
    let trimmed = inner.trim();
    if is_bare_element(trimmed) {
        vec![Token::Element {
            name: trimmed.to_string(),
            count: 1.0,
            charge: 0.0,
        }]
    } else {
        scan(trimmed)
    }
}

fn is_bare_element(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    match chars.next() {
        None => true,
        Some(second) => second.is_ascii_lowercase() && chars.next().is_none(),
    }
}

fn is_superscript_start(c: char) -> bool {
    c == '⁺' || c == '⁻' || from_superscript(c).is_some()
}

fn from_subscript(c: char) -> Option<char> {
    let d = match c {
        '₀' => '0',
        '₁' => '1',
        '₂' => '2',
        '₃' => '3',
        '₄' => '4',
        '₅' => '5',
        '₆' => '6',
        '₇' => '7',
        '₈' => '8',
        '₉' => '9',
        '·' => '.',
        _ => return None,
    };
    Some(d)
}

fn from_superscript(c: char) -> Option<char> {
    let d = match c {
        '⁰' => '0',
        '¹' => '1',
        '²' => '2',
        '³' => '3',
        '⁴' => '4',
        '⁵' => '5',
        '⁶' => '6',
        '⁷' => '7',
        '⁸' => '8',
        '⁹' => '9',
        '·' => '.',
        _ => return None,
    };
    Some(d)
}
