//! Lexer for snippet text using logos
//!
//! Snippets use brace placeholders: `{key}` is substituted, `{{` and `}}`
//! are literal braces. Everything else is passed through verbatim.

use logos::Logos;

use crate::error::Span;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    #[token("{{")]
    EscapedOpen,
    #[token("}}")]
    EscapedClose,

    #[regex(r"\{[^{}]*\}", |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    Placeholder(String),

    // Lone braces are kept as tokens so the template parser can report them
    #[token("{")]
    Open,
    #[token("}")]
    Close,

    #[regex(r"[^{}]+", |lex| lex.slice().to_string())]
    Text(String),
}

/// Lex snippet text into tokens with byte spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let tokens: Vec<_> = lex("\\centering").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Text("\\centering".to_string())]);
    }

    #[test]
    fn test_placeholder() {
        let tokens: Vec<_> = lex("fig:{label}").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Text("fig:".to_string()),
                Token::Placeholder("label".to_string()),
            ]
        );
    }

    #[test]
    fn test_escaped_braces_around_placeholder() {
        // LaTeX group around a placeholder: `\caption{{{caption}}}`
        let tokens: Vec<_> = lex(r"\caption{{{caption}}}").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Text("\\caption".to_string()),
                Token::EscapedOpen,
                Token::Placeholder("caption".to_string()),
                Token::EscapedClose,
            ]
        );
    }

    #[test]
    fn test_lone_braces() {
        let tokens: Vec<_> = lex("a } b {").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Text("a ".to_string()),
                Token::Close,
                Token::Text(" b ".to_string()),
                Token::Open,
            ]
        );
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let spans: Vec<_> = lex("é{x}").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..2, 2..5]);
    }

    #[test]
    fn test_non_ascii_text() {
        let tokens: Vec<_> = lex("图片 {name}").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Text("图片 ".to_string()),
                Token::Placeholder("name".to_string()),
            ]
        );
    }
}
