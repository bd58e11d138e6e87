use super::syntax::{Token, YIELD_SIGN};

/// Renders a token sequence back into the display notation: subscript digits
/// for atom counts and group multipliers, superscript digits for charges,
/// parentheses around nested groups and a plain numeral prefix for the
/// stoichiometric coefficient of a top-level formula.
pub fn render(ast: &[Token]) -> String {
    let mut out = String::new();
    for token in ast {
        out.push_str(&render_token(token, false));
        out.push(' ');
    }
    out
}

fn render_token(token: &Token, is_nested: bool) -> String {
    match token {
        Token::Sum => "+".to_string(),
        Token::Yield => YIELD_SIGN.to_string(),
        Token::FreeCharge { value } => format!("+e{}", to_superscript(*value)),
        Token::Element {
            name,
            count,
            charge,
        } => {
            let mut s = name.clone();
            if *count != 1.0 {
                s.push_str(&to_subscript(*count));
            }
            if *charge != 0.0 {
                s.push_str(&to_superscript(*charge));
            }
            s
        }
        Token::Formula {
            body,
            count,
            charge,
            ..
        } => {
            let inner: String = body.iter().map(|t| render_token(t, true)).collect();
            let mut s = if is_nested {
                let mut s = format!("({inner})");
                if *count != 1.0 {
                    s.push_str(&to_subscript(*count));
                }
                s
            } else {
                // a top-level formula carries the coefficient as plain prefix
                let mut s = String::new();
                if *count != 1.0 {
                    s.push_str(&format_number(*count));
                }
                s.push_str(&inner);
                s
            };
            if *charge != 0.0 {
                s.push_str(&to_superscript(*charge));
            }
            s
        }
    }
}

fn to_subscript(value: f64) -> String {
    format_number(value)
        .chars()
        .map(|c| match c {
            '0' => '₀',
            '1' => '₁',
            '2' => '₂',
            '3' => '₃',
            '4' => '₄',
            '5' => '₅',
            '6' => '₆',
            '7' => '₇',
            '8' => '₈',
            '9' => '₉',
            '.' => '·',
            '-' => '₋',
            other => other,
        })
        .collect()
}

fn to_superscript(value: f64) -> String {
    let sign = if value < 0.0 { '⁻' } else { '⁺' };
    let digits: String = format_number(value.abs())
        .chars()
        .map(|c| match c {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            '.' => '·',
            other => other,
        })
        .collect();
    format!("{sign}{digits}")
}

/// integral values print without a fractional part
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
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
    fn test_render_simple_equation() {
        let ast = scan("[H*2]+[O*2]⇒[H*2 O]");
        assert_eq!(render(&ast), "H₂ + O₂ ⇒ H₂O ");
    }

    #[test]
    fn test_render_coefficient_prefix() {
        let mut ast = scan("[H*2 O]");
        if let Token::Formula { count, .. } = &mut ast[0] {
            *count = 2.0;
        }
        assert_eq!(render(&ast), "2H₂O ");
    }

    #[test]
    fn test_render_nested_group() {
        let ast = scan("[Al [O H]*3]");
        assert_eq!(render(&ast), "Al(OH)₃ ");
    }

    #[test]
    fn test_render_charge_and_free_electrons() {
        let ast = scan("[Mn O*4]^-1+-1");
        assert_eq!(render(&ast), "MnO₄⁻¹ + +e⁻¹ ");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "");
    }
}
