use super::{ast::*, error::ParseError, lexer::*};
use crate::common::*;
use log::trace;
use logos_iter::LogosIter;

type PResult<T> = Result<T, ParseError>;

/// One sign-delimited piece of a notation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Term {
    Dice(DiceExpression),
    Flat(Int),
}

/// Parses a dice notation such as `"2d20kh1 + 5"`.
///
/// Whitespace is ignored and letters are case-insensitive. The notation is
/// split into terms in front of every `+` and `-`; each term is either a
/// flat integer or a dice term `[count]d<sides>[k[h|l]<keep>]`. The first
/// malformed term aborts the whole parse.
pub fn parse(notation: &str) -> PResult<ParsedNotation> {
    let normalized: String = notation
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if normalized.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut expressions = Vec::new();
    let mut modifier: Int = 0;
    for term in split_terms(&normalized) {
        match Parser::new(term).parse()? {
            Term::Dice(expr) => {
                trace!("parsed dice term {:?} as {:?}", term, expr);
                expressions.push(expr);
            }
            Term::Flat(x) => {
                trace!("parsed flat term {:?} as {}", term, x);
                modifier = modifier
                    .checked_add(x)
                    .ok_or_else(|| ParseError::InvalidNotation(term.to_string()))?;
            }
        }
    }

    if expressions.is_empty() && modifier == 0 {
        return Err(ParseError::NoExpressions);
    }
    Ok(ParsedNotation::new(expressions, modifier))
}

/// Splits in front of every sign, keeping the sign with the term it starts.
fn split_terms(s: &str) -> Vec<&str> {
    let mut terms = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if i > start && (c == '+' || c == '-') {
            terms.push(&s[start..i]);
            start = i;
        }
    }
    terms.push(&s[start..]);
    terms
}

struct Parser<'a> {
    term: &'a str,
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    fn new(term: &'a str) -> Self {
        Self {
            term,
            lexer: lexer(term),
        }
    }

    fn parse(mut self) -> PResult<Term> {
        let negative = self.parse_sign();
        self.parse_term(negative)
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.lexer
            .peek()
            .map_or(false, |peeked| options.contains(peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.lexer.next();
            Ok(())
        } else {
            self.invalid()
        }
    }

    fn consume_integer(&mut self) -> PResult<&'a str> {
        self.consume(TokenKind::Integer)?;
        Ok(self.lexer.slice())
    }

    fn invalid<T>(&self) -> PResult<T> {
        Err(ParseError::InvalidNotation(self.term.to_string()))
    }

    fn parse_sign(&mut self) -> bool {
        if self.matches_any(TokenKind::SIGNS) {
            self.advance() == Some(TokenKind::Minus)
        } else {
            false
        }
    }

    fn parse_term(&mut self, negative: bool) -> PResult<Term> {
        let count = if self.matches(TokenKind::Integer) {
            Some(self.consume_integer()?)
        } else {
            None
        };

        if self.lexer.peek().is_none() {
            return match count {
                Some(digits) => self.parse_flat(digits, negative),
                None => self.invalid(),
            };
        }

        self.consume(TokenKind::Dice)?;
        let sides = self.consume_integer()?;
        let keep = if self.matches(TokenKind::Keep) {
            self.advance();
            Some(self.parse_keep()?)
        } else {
            None
        };
        if self.lexer.peek().is_some() {
            return self.invalid();
        }

        self.build_dice(count, sides, keep, negative)
    }

    fn parse_flat(&self, digits: &str, negative: bool) -> PResult<Term> {
        let value = match digits.parse::<i64>() {
            Ok(x) if negative => -x,
            Ok(x) => x,
            Err(_) => return self.invalid(),
        };
        match Int::try_from(value) {
            Ok(x) => Ok(Term::Flat(x)),
            Err(_) => self.invalid(),
        }
    }

    fn parse_keep(&mut self) -> PResult<(KeepKind, &'a str)> {
        let kind = if self.matches_any(TokenKind::SELECTORS) {
            match self.advance() {
                Some(TokenKind::Lowest) => KeepKind::Lowest,
                _ => KeepKind::Highest,
            }
        } else {
            KeepKind::Highest
        };
        let count = self.consume_integer()?;
        Ok((kind, count))
    }

    fn build_dice(
        &self,
        count: Option<&str>,
        sides: &str,
        keep: Option<(KeepKind, &str)>,
        negative: bool,
    ) -> PResult<Term> {
        let num = match count {
            None => 1,
            Some(digits) => digits
                .parse::<UInt>()
                .ok()
                .filter(|n| (1..=MAX_DICE).contains(n))
                .ok_or_else(|| ParseError::InvalidCount(self.term.to_string()))?,
        };

        let sides = sides
            .parse::<UInt>()
            .ok()
            .filter(|n| (MIN_SIDES..=MAX_SIDES).contains(n))
            .ok_or_else(|| ParseError::InvalidSides(self.term.to_string()))?;

        let keep = match keep {
            None => None,
            Some((kind, digits)) => {
                let count = digits
                    .parse::<UInt>()
                    .ok()
                    .filter(|n| (1..=num).contains(n))
                    .ok_or_else(|| ParseError::InvalidKeep(self.term.to_string()))?;
                Some(Keep { kind, count })
            }
        };

        // `num` is at most MAX_DICE, so it always fits.
        let count = num as Int;
        Ok(Term::Dice(DiceExpression {
            count: if negative { -count } else { count },
            sides,
            keep,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(s: &str, expressions: Vec<DiceExpression>, modifier: Int) {
        assert_eq!(parse(s).unwrap(), ParsedNotation::new(expressions, modifier));
    }

    fn check_err(s: &str, expected: ParseError) {
        assert_eq!(parse(s).unwrap_err(), expected);
    }

    #[test]
    fn test_split_terms() {
        assert_eq!(split_terms("1d20+5"), vec!["1d20", "+5"]);
        assert_eq!(split_terms("-1d4-2+d6"), vec!["-1d4", "-2", "+d6"]);
        assert_eq!(split_terms("2d6+"), vec!["2d6", "+"]);
        assert_eq!(split_terms("++5"), vec!["+", "+5"]);
    }

    #[test]
    fn test_parse_dice() {
        check("1d20", vec![DiceExpression::new(1, 20)], 0);
        check("d20", vec![DiceExpression::new(1, 20)], 0);
        check("14d4", vec![DiceExpression::new(14, 4)], 0);
        check("100d100", vec![DiceExpression::new(100, 100)], 0);
        check("-2d6", vec![DiceExpression::new(-2, 6)], 0);
    }

    #[test]
    fn test_parse_keep() {
        check(
            "4d6kh3",
            vec![DiceExpression::new(4, 6).with_keep(Keep::highest(3))],
            0,
        );
        check(
            "2d20kl1",
            vec![DiceExpression::new(2, 20).with_keep(Keep::lowest(1))],
            0,
        );
        check(
            "4d6k3",
            vec![DiceExpression::new(4, 6).with_keep(Keep::highest(3))],
            0,
        );
    }

    #[test]
    fn test_parse_modifiers() {
        check(
            "2d20kh1+5",
            vec![DiceExpression::new(2, 20).with_keep(Keep::highest(1))],
            5,
        );
        check(
            "1d8 + 2 - 1d4 - 3",
            vec![DiceExpression::new(1, 8), DiceExpression::new(-1, 4)],
            -1,
        );
        check("+5", vec![], 5);
        check("-3", vec![], -3);
    }

    #[test]
    fn test_parse_whitespace_and_case() {
        check(
            "  2D20 KL 1 +\t5 ",
            vec![DiceExpression::new(2, 20).with_keep(Keep::lowest(1))],
            5,
        );
    }

    #[test]
    fn test_parse_errors() {
        check_err("", ParseError::Empty);
        check_err(" \t ", ParseError::Empty);
        check_err("1d1", ParseError::InvalidSides("1d1".into()));
        check_err("1d101", ParseError::InvalidSides("1d101".into()));
        check_err("0d20", ParseError::InvalidCount("0d20".into()));
        check_err("101d6", ParseError::InvalidCount("101d6".into()));
        check_err("4d6kh5", ParseError::InvalidKeep("4d6kh5".into()));
        check_err("4d6kl0", ParseError::InvalidKeep("4d6kl0".into()));
        check_err("+0", ParseError::NoExpressions);
        check_err("5-5", ParseError::NoExpressions);
    }

    #[test]
    fn test_parse_invalid_notation() {
        check_err("abc", ParseError::InvalidNotation("abc".into()));
        check_err("1d20+", ParseError::InvalidNotation("+".into()));
        check_err("1d", ParseError::InvalidNotation("1d".into()));
        check_err("1d20k", ParseError::InvalidNotation("1d20k".into()));
        check_err("1d20kh", ParseError::InvalidNotation("1d20kh".into()));
        check_err("2d6x", ParseError::InvalidNotation("2d6x".into()));
        check_err("1d20++5", ParseError::InvalidNotation("+".into()));
        check_err("d20d6", ParseError::InvalidNotation("d20d6".into()));
        check_err("0d20x", ParseError::InvalidNotation("0d20x".into()));
    }

    #[test]
    fn test_parse_huge_numbers() {
        check_err(
            "99999999999d6",
            ParseError::InvalidCount("99999999999d6".into()),
        );
        check_err(
            "1d99999999999",
            ParseError::InvalidSides("1d99999999999".into()),
        );
        check_err(
            "1d20+99999999999",
            ParseError::InvalidNotation("+99999999999".into()),
        );
    }

    #[test]
    fn test_parse_modifier_bounds() {
        check("1d20-2147483647-1", vec![DiceExpression::new(1, 20)], Int::MIN);
        check("d20-2147483648", vec![DiceExpression::new(1, 20)], Int::MIN);
        check("-2147483648", vec![], Int::MIN);
        check("+2147483647", vec![], Int::MAX);
        check_err("+2147483648", ParseError::InvalidNotation("+2147483648".into()));
        check_err("-2147483649", ParseError::InvalidNotation("-2147483649".into()));
        check_err(
            "-2147483648-1",
            ParseError::InvalidNotation("-1".into()),
        );

        let parsed = parse("1d20-2147483647-1").unwrap();
        assert_eq!(parse(&format_notation(&parsed)).unwrap(), parsed);
    }

    #[test]
    fn test_validation_order() {
        check_err("0d1", ParseError::InvalidCount("0d1".into()));
        check_err("2d1kh5", ParseError::InvalidSides("2d1kh5".into()));
    }
}
