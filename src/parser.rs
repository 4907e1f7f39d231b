//! Text form of comparisons, e.g. `hp <= 10` or `name == "Bob"`.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{alpha1, alphanumeric1, char, space0},
    combinator::{all_consuming, recognize, value},
    multi::many0,
    sequence::{delimited, pair},
    IResult,
};

use crate::CompareOp;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ComparisonExpr<'src> {
    pub key: &'src str,
    pub op: CompareOp,
    /// Literal text with surrounding quotes removed.
    pub literal: &'src str,
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_"), tag(".")))),
    ))(input)
}

pub fn compare_op(i: &str) -> IResult<&str, CompareOp> {
    // Two-character operators first so that `<=` is not read as `<`.
    alt((
        value(CompareOp::Equal, tag("==")),
        value(CompareOp::NotEqual, tag("!=")),
        value(CompareOp::LessEqual, tag("<=")),
        value(CompareOp::GreaterEqual, tag(">=")),
        value(CompareOp::Less, tag("<")),
        value(CompareOp::Greater, tag(">")),
    ))(i)
}

fn quoted(i: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_while(|c: char| c != '"'), char('"'))(i)
}

fn literal(i: &str) -> IResult<&str, &str> {
    alt((quoted, take_while1(|c: char| !c.is_whitespace())))(i)
}

pub fn comparison_expr(i: &str) -> IResult<&str, ComparisonExpr> {
    let (i, key) = delimited(space0, identifier, space0)(i)?;
    let (i, op) = compare_op(i)?;
    let (i, literal) = delimited(space0, literal, space0)(i)?;
    Ok((i, ComparisonExpr { key, op, literal }))
}

/// Parses a whole string as a single comparison, rejecting trailing input.
pub fn parse_comparison(src: &str) -> Option<ComparisonExpr> {
    all_consuming(comparison_expr)(src)
        .ok()
        .map(|(_, expr)| expr)
}
