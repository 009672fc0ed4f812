//! Balanced-parenthesis S-expression reader
//!
//! Reads HSIL text into a tree of atoms, quoted scalars and lists. Each
//! list keeps the slice of source text it was read from, so a sub-block
//! can be handed to the single-intent parser verbatim.

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, consumed, cut, map},
    multi::many0,
    sequence::{delimited, preceded},
    IResult, Parser,
};

use crate::hsil::ParseError;

/// Heads that open an intent block. Intent blocks never nest.
pub const INTENT_HEADS: [&str; 2] = ["intent", "intent-composite"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Atom(&'a str),
    Quoted(&'a str),
    List { items: Vec<Node<'a>>, source: &'a str },
}

impl<'a> Node<'a> {
    /// Leading atom of a list
    pub fn head(&self) -> Option<&'a str> {
        match self {
            Node::List { items, .. } => match items.first() {
                Some(Node::Atom(head)) => Some(*head),
                _ => None,
            },
            _ => None,
        }
    }

    /// Items after the head
    pub fn children(&self) -> &[Node<'a>] {
        match self {
            Node::List { items, .. } if !items.is_empty() => &items[1..],
            _ => &[],
        }
    }

    /// Source text of a list, including its parentheses
    pub fn source(&self) -> Option<&'a str> {
        match self {
            Node::List { source, .. } => Some(*source),
            _ => None,
        }
    }

    pub fn is_intent_block(&self) -> bool {
        self.head()
            .is_some_and(|h| INTENT_HEADS.iter().any(|known| *known == h))
    }

    /// Whether any list strictly inside this one opens an intent block
    pub fn contains_intent_block(&self) -> bool {
        self.children()
            .iter()
            .any(|child| child.is_intent_block() || child.contains_intent_block())
    }
}

/// Read a whole document: exactly one list, optionally surrounded by whitespace
pub fn read(text: &str) -> Result<Node<'_>, ParseError> {
    match all_consuming(delimited(multispace0, list, multispace0)).parse(text) {
        Ok((_, node)) => Ok(node),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let offset = text.len() - e.input.len();
            Err(ParseError::Malformed(format!(
                "unexpected {} at byte {}",
                describe(e.input),
                offset
            )))
        }
        Err(nom::Err::Incomplete(_)) => Err(ParseError::Malformed("incomplete input".into())),
    }
}

fn describe(rest: &str) -> String {
    match rest.chars().next() {
        Some(c) => format!("{:?}", c),
        None => "end of input".to_string(),
    }
}

fn node(input: &str) -> IResult<&str, Node<'_>> {
    alt((list, quoted, atom)).parse(input)
}

fn list(input: &str) -> IResult<&str, Node<'_>> {
    map(
        consumed(delimited(
            char('('),
            many0(preceded(multispace0, node)),
            preceded(multispace0, cut(char(')'))),
        )),
        |(source, items)| Node::List { items, source },
    )
    .parse(input)
}

fn quoted(input: &str) -> IResult<&str, Node<'_>> {
    map(
        delimited(char('"'), take_till(|c: char| c == '"'), cut(char('"'))),
        Node::Quoted,
    )
    .parse(input)
}

fn atom(input: &str) -> IResult<&str, Node<'_>> {
    map(
        take_while1(|c: char| !c.is_whitespace() && c != '(' && c != ')' && c != '"'),
        Node::Atom,
    )
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_flat_list() {
        let node = read("(scope Self)").unwrap();
        assert_eq!(node.head(), Some("scope"));
        assert_eq!(node.children(), &[Node::Atom("Self")]);
        assert_eq!(node.source(), Some("(scope Self)"));
    }

    #[test]
    fn test_read_nested_sources() {
        let text = "  (intent-composite (mode Blended) (intent (type T1_Create)))  ";
        let root = read(text).unwrap();
        assert_eq!(root.head(), Some("intent-composite"));

        let child = &root.children()[1];
        assert_eq!(child.head(), Some("intent"));
        assert_eq!(child.source(), Some("(intent (type T1_Create))"));
    }

    #[test]
    fn test_read_quoted_scalar() {
        let node = read("(type \"E1 Discover\")").unwrap();
        assert_eq!(node.children(), &[Node::Quoted("E1 Discover")]);
    }

    #[test]
    fn test_read_unbalanced() {
        assert!(matches!(
            read("(intent (type E1_Discover)"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            read("(intent (type E1_Discover)))"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_read_unterminated_quote() {
        assert!(matches!(read("(type \"E1)"), Err(ParseError::Malformed(_))));
    }

    #[test]
    fn test_read_rejects_trailing_document() {
        assert!(read("(a) (b)").is_err());
    }

    #[test]
    fn test_contains_intent_block() {
        let flat = read("(intent (type E1_Discover) (scope Self))").unwrap();
        assert!(!flat.contains_intent_block());

        let nested = read("(intent (type E1_Discover) (extra (intent (type T1_Create))))").unwrap();
        assert!(nested.contains_intent_block());
    }

    #[test]
    fn test_empty_list() {
        let node = read("()").unwrap();
        assert_eq!(node.head(), None);
        assert!(node.children().is_empty());
    }
}
