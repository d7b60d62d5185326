//! Tokenizer shared by domain lists and domain expressions

use std::fmt;

use crate::error::LexError;

/// One lexical token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Domains, host IDs, literals and keywords
    Word(&'a str),
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Not,
    And,
    Or,
}

impl Token<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Token::Word(w) => w,
            Token::Comma => ",",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::Not => "!",
            Token::And => "&&",
            Token::Or => "||",
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check the encoding before anything else looks at the input
pub fn decode(input: &[u8]) -> Result<&str, LexError> {
    Ok(std::str::from_utf8(input)?)
}

/// Split the input into tokens
///
/// Whitespace only separates words. A lone `&` or `|` is rejected outright
/// since it is almost certainly a typo for `&&` or `||`.
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let punct = match c {
            ',' => Some(Token::Comma),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            '!' => Some(Token::Not),
            '&' => match chars.next_if(|&(_, next)| next == '&') {
                Some(_) => Some(Token::And),
                None => return Err(LexError::SingleAnd),
            },
            '|' => match chars.next_if(|&(_, next)| next == '|') {
                Some(_) => Some(Token::Or),
                None => return Err(LexError::SingleOr),
            },
            c if c.is_whitespace() => None,
            _ => {
                word_start.get_or_insert(i);
                continue;
            }
        };

        if let Some(start) = word_start.take() {
            tokens.push(Token::Word(&input[start..i]));
        }
        tokens.extend(punct);
    }

    if let Some(start) = word_start {
        tokens.push(Token::Word(&input[start..]));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Token::*;

    #[test]
    fn test_tokenize_list() {
        assert_eq!(
            tokenize(" a.a [ ::  ],,*.c").unwrap(),
            vec![
                Word("a.a"),
                LBracket,
                Word("::"),
                RBracket,
                Comma,
                Comma,
                Word("*.c")
            ]
        );
    }

    #[test]
    fn test_tokenize_expression() {
        assert_eq!(
            tokenize("!is(a.b)&&sub( c )||t").unwrap(),
            vec![
                Not,
                Word("is"),
                LParen,
                Word("a.b"),
                RParen,
                And,
                Word("sub"),
                LParen,
                Word("c"),
                RParen,
                Or,
                Word("t")
            ]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \t\n ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_single_operators() {
        assert_eq!(tokenize("&"), Err(LexError::SingleAnd));
        assert_eq!(tokenize("a && b &"), Err(LexError::SingleAnd));
        assert_eq!(tokenize("a|b"), Err(LexError::SingleOr));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        assert!(matches!(decode(b"\x80\xc0"), Err(LexError::Utf8(_))));
        assert_eq!(decode(b"a.org"), Ok("a.org"));
    }

    #[test]
    fn test_tokenize_unicode_words() {
        assert_eq!(
            tokenize("書.org,Bücher.org").unwrap(),
            vec![Word("書.org"), Comma, Word("Bücher.org")]
        );
    }
}
