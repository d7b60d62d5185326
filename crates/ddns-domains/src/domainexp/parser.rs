//! Recursive-descent parser for domain lists and domain expressions
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! or   := and ("||" and)*
//! and  := not ("&&" not)*
//! not  := "!"* atom
//! atom := bool | "is" "(" list ")" | "sub" "(" list ")" | "(" or ")"
//! list := (domain ("[" host-id "]")? | ",")*
//! ```

use crate::domain::Domain;
use crate::error::{DomainError, ParseError};
use crate::host_id::HostId;
use crate::traits::Reporter;

use super::DomainHostId;
use super::predicate::Predicate;
use super::token::{Token, decode, tokenize};

const TRUE_LITERALS: [&str; 4] = ["true", "t", "1", "yes"];
const FALSE_LITERALS: [&str; 4] = ["false", "f", "0", "no"];

pub(crate) struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    key: &'a str,
    input: &'a str,
    reporter: &'a dyn Reporter,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        reporter: &'a dyn Reporter,
        key: &'a str,
        input: &'a [u8],
    ) -> Result<Self, ParseError> {
        let input = decode(input)?;
        let tokens = tokenize(input)?;
        Ok(Self {
            tokens,
            pos: 0,
            key,
            input,
            reporter,
        })
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token<'static>) -> Result<(), ParseError> {
        match self.bump() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(ParseError::UnexpectedTokenExpecting {
                token: token.to_string(),
                expected: expected.to_string(),
            }),
            None => Err(ParseError::MissingAtEnd {
                expected: expected.to_string(),
            }),
        }
    }

    /// Fail if anything is left over
    pub(crate) fn finish(&self) -> Result<(), ParseError> {
        match self.peek() {
            Some(token) => Err(unexpected(token)),
            None => Ok(()),
        }
    }

    /// Scan a comma-separated list up to `)` or the end
    ///
    /// Host IDs in brackets are accepted only when `host_prefix_len` is set.
    /// Two domains with no comma between them are both kept, with a warning.
    pub(crate) fn scan_list(
        &mut self,
        host_prefix_len: Option<u8>,
    ) -> Result<Vec<DomainHostId>, ParseError> {
        let mut list = Vec::new();
        let mut ready_for_next = true;

        loop {
            match self.peek() {
                None | Some(Token::RParen) => return Ok(list),
                Some(Token::Comma) => {
                    self.pos += 1;
                    ready_for_next = true;
                }
                Some(Token::Word(word)) => {
                    self.pos += 1;
                    if !ready_for_next {
                        self.reporter.warn(format_args!(
                            "{} ({:?}) is missing a comma \",\" before {:?}",
                            self.key, self.input, word
                        ));
                    }

                    let domain = parse_domain(word)?;
                    let host_id = match host_prefix_len {
                        Some(prefix_len) if self.peek() == Some(Token::LBracket) => {
                            self.pos += 1;
                            self.scan_host_id(prefix_len)?
                        }
                        _ => None,
                    };

                    list.push(DomainHostId { domain, host_id });
                    ready_for_next = false;
                }
                Some(token) => return Err(unexpected(token)),
            }
        }
    }

    /// The part after `[`, up to and including `]`
    fn scan_host_id(&mut self, prefix_len: u8) -> Result<Option<HostId>, ParseError> {
        match self.bump() {
            Some(Token::Word(raw)) => {
                let host_id = HostId::parse(raw, prefix_len).map_err(|source| {
                    ParseError::IllFormedHostId {
                        host_id: raw.to_owned(),
                        source,
                    }
                })?;
                self.expect(Token::RBracket)?;
                Ok(host_id)
            }
            Some(token) => Err(unexpected(token)),
            None => Err(ParseError::MissingAtEnd {
                expected: Token::RBracket.to_string(),
            }),
        }
    }

    pub(crate) fn scan_or(&mut self) -> Result<Predicate, ParseError> {
        let mut pred = self.scan_and()?;
        while self.peek() == Some(Token::Or) {
            self.pos += 1;
            let rhs = self.scan_and()?;
            pred = Predicate::Or(Box::new(pred), Box::new(rhs));
        }
        Ok(pred)
    }

    fn scan_and(&mut self) -> Result<Predicate, ParseError> {
        let mut pred = self.scan_not()?;
        while self.peek() == Some(Token::And) {
            self.pos += 1;
            let rhs = self.scan_not()?;
            pred = Predicate::And(Box::new(pred), Box::new(rhs));
        }
        Ok(pred)
    }

    fn scan_not(&mut self) -> Result<Predicate, ParseError> {
        let mut negated = false;
        while self.peek() == Some(Token::Not) {
            self.pos += 1;
            negated = !negated;
        }

        let atom = self.scan_atom()?;
        Ok(if negated {
            Predicate::Not(Box::new(atom))
        } else {
            atom
        })
    }

    fn scan_atom(&mut self) -> Result<Predicate, ParseError> {
        match self.bump() {
            Some(Token::LParen) => {
                let pred = self.scan_or()?;
                self.expect(Token::RParen)?;
                Ok(pred)
            }
            Some(Token::Word(word)) if word.eq_ignore_ascii_case("is") => {
                Ok(Predicate::Is(self.scan_arguments()?))
            }
            Some(Token::Word(word)) if word.eq_ignore_ascii_case("sub") => {
                Ok(Predicate::Sub(self.scan_arguments()?))
            }
            Some(Token::Word(word)) => parse_bool(word)
                .map(Predicate::Const)
                .ok_or(ParseError::NotBooleanExpression),
            _ => Err(ParseError::NotBooleanExpression),
        }
    }

    /// `( list )` after `is` or `sub`
    fn scan_arguments(&mut self) -> Result<Vec<Domain>, ParseError> {
        self.expect(Token::LParen)?;
        let list = self.scan_list(None)?;
        self.expect(Token::RParen)?;
        Ok(list.into_iter().map(|entry| entry.domain).collect())
    }
}

fn unexpected(token: Token<'_>) -> ParseError {
    ParseError::UnexpectedToken {
        token: token.to_string(),
    }
}

fn parse_domain(word: &str) -> Result<Domain, ParseError> {
    Domain::new(word).map_err(|source| match source {
        DomainError::NotFullyQualified => ParseError::NotFullyQualified {
            domain: word.to_owned(),
        },
        source => ParseError::IllFormedDomain {
            domain: word.to_lowercase(),
            source,
        },
    })
}

fn parse_bool(word: &str) -> Option<bool> {
    if TRUE_LITERALS.iter().any(|l| word.eq_ignore_ascii_case(l)) {
        Some(true)
    } else if FALSE_LITERALS.iter().any(|l| word.eq_ignore_ascii_case(l)) {
        Some(false)
    } else {
        None
    }
}
