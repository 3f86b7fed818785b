
//! The grammar of unit expressions, as an ordered table of
//! alternatives.
//!
//! ```text
//! unit := '(' unit ')'
//!       | '(' unit ')' '^' integer
//!       | term '^' integer            -- term contains no '/' or '*'
//!       | unit '/' unit
//!       | unit '*' unit
//!       | word
//!       | '1'
//! ```
//!
//! The binary rules do not determine where the left operand ends,
//! so their matchers produce every plausible split, and the parser
//! takes the first one that works.

use crate::units::vector::DimensionVector;
use crate::util::regexes::{WORD_RE, EXPONENT_RE};

use itertools::Itertools;
use num::One;

use std::fmt::{self, Formatter, Display};

/// The grammar rule an [`Alternative`] implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
  Group,
  GroupPower,
  TermPower,
  Quotient,
  Product,
  Terminal,
}

/// One way of reading an operand of a binary rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandStyle {
  /// The operand is a fully parenthesized subgroup, and the
  /// parentheses are stripped before recursing.
  Parenthesized,
  /// The operand is taken verbatim.
  Greedy,
}

/// A single way in which a rule might match an input string. The
/// operands are substrings which still need to be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
  pub text: &'a str,
  pub operands: Vec<&'a str>,
  pub exponent: i64,
}

/// A grammar alternative: a matcher which enumerates candidates in
/// priority order, and a builder which combines the parsed operands
/// of a successful candidate. A builder returns `None` when the
/// combined exponents overflow, which rejects the candidate.
#[derive(Clone, Copy)]
pub struct Alternative {
  pub rule: Rule,
  pub matcher: for<'a> fn(&'a str) -> Vec<Candidate<'a>>,
  pub builder: fn(&Candidate<'_>, Vec<DimensionVector>) -> Option<DimensionVector>,
}

/// All alternatives, in the order in which they are tried.
///
/// Parenthesized forms come first so that `(a)` never reaches the
/// operator rules, and powers come before the operators so that the
/// caret is consumed before any split happens.
pub static ALTERNATIVES: [Alternative; 6] = [
  Alternative { rule: Rule::Group, matcher: match_group, builder: build_product },
  Alternative { rule: Rule::GroupPower, matcher: match_group_power, builder: build_power },
  Alternative { rule: Rule::TermPower, matcher: match_term_power, builder: build_power },
  Alternative { rule: Rule::Quotient, matcher: match_quotient, builder: build_quotient },
  Alternative { rule: Rule::Product, matcher: match_product, builder: build_product },
  Alternative { rule: Rule::Terminal, matcher: match_terminal, builder: build_terminal },
];

impl OperandStyle {
  pub const ALL: [OperandStyle; 2] = [OperandStyle::Parenthesized, OperandStyle::Greedy];

  /// The substring to recurse into if `operand` can be read in this
  /// style.
  pub fn extract(self, operand: &str) -> Option<&str> {
    match self {
      OperandStyle::Parenthesized => strip_parens(operand),
      OperandStyle::Greedy => (!operand.is_empty()).then_some(operand),
    }
  }
}

impl<'a> Candidate<'a> {
  pub fn new(text: &'a str, operands: Vec<&'a str>) -> Self {
    Self { text, operands, exponent: 1 }
  }

  pub fn with_exponent(mut self, exponent: i64) -> Self {
    self.exponent = exponent;
    self
  }
}

impl Display for Rule {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Rule::Group => write!(f, "(u)"),
      Rule::GroupPower => write!(f, "(u)^n"),
      Rule::TermPower => write!(f, "u^n"),
      Rule::Quotient => write!(f, "u/u"),
      Rule::Product => write!(f, "u*u"),
      Rule::Terminal => write!(f, "word"),
    }
  }
}

fn strip_parens(text: &str) -> Option<&str> {
  let inner = text.strip_prefix('(')?.strip_suffix(')')?;
  (!inner.is_empty()).then_some(inner)
}

/// Splits `text` at its final caret into a base and an integer
/// exponent. Only the final caret can work, since an exponent never
/// contains one.
fn split_exponent(text: &str) -> Option<(&str, i64)> {
  let (base, exponent) = text.rsplit_once('^')?;
  if base.is_empty() || !EXPONENT_RE.is_match(exponent) {
    return None;
  }
  // Out-of-range exponents fail here.
  let exponent = exponent.parse().ok()?;
  Some((base, exponent))
}

fn match_group(text: &str) -> Vec<Candidate<'_>> {
  strip_parens(text)
    .map(|inner| Candidate::new(text, vec![inner]))
    .into_iter()
    .collect()
}

fn match_group_power(text: &str) -> Vec<Candidate<'_>> {
  split_exponent(text)
    .and_then(|(base, exponent)| {
      let inner = strip_parens(base)?;
      Some(Candidate::new(text, vec![inner]).with_exponent(exponent))
    })
    .into_iter()
    .collect()
}

fn match_term_power(text: &str) -> Vec<Candidate<'_>> {
  split_exponent(text)
    .filter(|(base, _)| !base.contains(['/', '*']))
    .map(|(base, exponent)| Candidate::new(text, vec![base]).with_exponent(exponent))
    .into_iter()
    .collect()
}

fn match_quotient(text: &str) -> Vec<Candidate<'_>> {
  binary_candidates(text, '/')
}

fn match_product(text: &str) -> Vec<Candidate<'_>> {
  binary_candidates(text, '*')
}

fn match_terminal(text: &str) -> Vec<Candidate<'_>> {
  if WORD_RE.is_match(text) {
    vec![Candidate::new(text, vec![])]
  } else {
    vec![]
  }
}

/// Every split of `text` around an occurrence of `operator`. Style
/// pairs are enumerated first (parenthesized before greedy, left
/// operand before right), and within a style pair the left operand
/// is made as long as possible first.
fn binary_candidates(text: &str, operator: char) -> Vec<Candidate<'_>> {
  let positions: Vec<usize> = text.match_indices(operator).map(|(index, _)| index).collect();
  OperandStyle::ALL.into_iter()
    .cartesian_product(OperandStyle::ALL)
    .flat_map(|(left_style, right_style)| {
      positions.iter().rev().filter_map(move |&index| {
        let left = left_style.extract(&text[..index])?;
        let right = right_style.extract(&text[index + operator.len_utf8()..])?;
        Some(Candidate::new(text, vec![left, right]))
      })
    })
    .collect()
}

fn build_product(_: &Candidate<'_>, operands: Vec<DimensionVector>) -> Option<DimensionVector> {
  operands.iter().try_fold(DimensionVector::one(), |acc, unit| acc.checked_multiply(unit))
}

fn build_power(candidate: &Candidate<'_>, operands: Vec<DimensionVector>) -> Option<DimensionVector> {
  build_product(candidate, operands)?.checked_power_of(candidate.exponent)
}

fn build_quotient(_: &Candidate<'_>, operands: Vec<DimensionVector>) -> Option<DimensionVector> {
  let (numerator, denominator) = operands.iter().collect_tuple()?;
  numerator.checked_multiply(&denominator.checked_invert()?)
}

fn build_terminal(candidate: &Candidate<'_>, _: Vec<DimensionVector>) -> Option<DimensionVector> {
  if candidate.text == "1" {
    Some(DimensionVector::unitless())
  } else {
    Some(DimensionVector::singleton(candidate.text))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn operands<'a>(candidates: &[Candidate<'a>]) -> Vec<Vec<&'a str>> {
    candidates.iter().map(|c| c.operands.clone()).collect()
  }

  #[test]
  fn test_alternatives_are_in_priority_order() {
    let rules: Vec<_> = ALTERNATIVES.iter().map(|a| a.rule).collect();
    assert_eq!(rules, vec![
      Rule::Group,
      Rule::GroupPower,
      Rule::TermPower,
      Rule::Quotient,
      Rule::Product,
      Rule::Terminal,
    ]);
  }

  #[test]
  fn test_match_group() {
    assert_eq!(operands(&match_group("(m/s)")), vec![vec!["m/s"]]);
    assert_eq!(operands(&match_group("(a)*(b)")), vec![vec!["a)*(b"]]);
    assert!(match_group("()").is_empty());
    assert!(match_group("m").is_empty());
  }

  #[test]
  fn test_match_group_power() {
    let candidates = match_group_power("(Pa*m)^3");
    assert_eq!(operands(&candidates), vec![vec!["Pa*m"]]);
    assert_eq!(candidates[0].exponent, 3);
    assert!(match_group_power("m^3").is_empty());
    assert!(match_group_power("(m)^").is_empty());
  }

  #[test]
  fn test_match_term_power() {
    let candidates = match_term_power("m^-1");
    assert_eq!(operands(&candidates), vec![vec!["m"]]);
    assert_eq!(candidates[0].exponent, -1);
    assert!(match_term_power("Pa*m^3").is_empty());
    assert!(match_term_power("m/s^2").is_empty());
    assert!(match_term_power("m^3*Pa").is_empty());
  }

  #[test]
  fn test_binary_candidates_prefer_longest_left_operand() {
    assert_eq!(
      operands(&match_quotient("a/b/c")),
      vec![vec!["a/b", "c"], vec!["a", "b/c"]],
    );
  }

  #[test]
  fn test_binary_candidates_try_parenthesized_styles_first() {
    assert_eq!(
      operands(&match_product("(a)*(b)")),
      vec![
        vec!["a", "b"],
        vec!["a", "(b)"],
        vec!["(a)", "b"],
        vec!["(a)", "(b)"],
      ],
    );
  }

  #[test]
  fn test_binary_candidates_require_non_empty_operands() {
    assert!(match_product("*m").is_empty());
    assert!(match_product("m*").is_empty());
    assert!(match_quotient("m").is_empty());
  }

  #[test]
  fn test_match_terminal() {
    assert_eq!(match_terminal("mol").len(), 1);
    assert!(match_terminal("m s").is_empty());
    assert_eq!(build_terminal(&match_terminal("1")[0], vec![]), Some(DimensionVector::one()));
    assert_eq!(build_terminal(&match_terminal("K")[0], vec![]), Some(DimensionVector::singleton("K")));
  }

  #[test]
  fn test_builders_reject_exponent_overflow() {
    let candidate = Candidate::new("(m)^2", vec!["m"]).with_exponent(i64::MAX);
    assert_eq!(build_power(&candidate, vec![DimensionVector::singleton("m")]), None);
    let huge = DimensionVector::singleton("m").power_of(i64::MIN);
    let candidate = Candidate::new("1/m", vec!["1", "m"]);
    assert_eq!(build_quotient(&candidate, vec![DimensionVector::one(), huge]), None);
  }

  #[test]
  fn test_term_power_excludes_operators_in_base() {
    // "(m/s)^2" is neither a parenthesized group nor a bare term, so
    // it cannot take a second exponent.
    assert!(match_group_power("(m/s)^2^3").is_empty());
    assert!(match_term_power("(m/s)^2^3").is_empty());
  }
}
