//! Lexer
//!
//! logos 状态机产出原始 token，再补上行列范围和关键字分类。
//! 空白、换行、注释都保留为 token：语句分隔依赖它们。

use logos::Logos;

use crate::source::LineIndex;
use crate::token::{classify_word, Punctuator, Token, TokenKind};

#[derive(Logos, Debug, PartialEq, Clone)]
enum RawToken {
    #[regex(r"[ \t\f]+")]
    Whitespace,
    #[token("\n")]
    LineFeed,
    #[token("\r")]
    CarriageReturn,

    #[regex(r"//[^\n\r]*", |lex| lex.slice().to_string())]
    #[token("/*", block_comment)]
    Comment(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Word(String),
    #[regex(r"`[A-Za-z_][A-Za-z0-9_]*`", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    BacktickIdentifier(String),

    #[regex(r"[0-9][0-9_]*", |lex| lex.slice().to_string())]
    #[regex(r"0x[0-9a-fA-F][0-9a-fA-F_]*", |lex| lex.slice().to_string())]
    #[regex(r"0o[0-7][0-7_]*", |lex| lex.slice().to_string())]
    #[regex(r"0b[01][01_]*", |lex| lex.slice().to_string())]
    Integer(String),
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+", |lex| lex.slice().to_string())]
    Float(String),
    #[regex(r#""([^"\\\n\r]|\\[^\n\r])*""#, unescape)]
    String(String),

    // --- 标点 (Punctuators) ---
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftSquare,
    #[token("]")]
    RightSquare,
    #[token(".")]
    Period,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,
    #[token("=")]
    Equal,
    #[token("@")]
    At,
    #[token("#")]
    Hash,
    #[token("->")]
    Arrow,
    #[token("?")]
    Question,
    #[token("!")]
    Exclaim,

    // --- 运算符 (Operators) ---
    // `?` 和 `!` 不参与组合，`Int?`、`a!` 这类后缀才能单独成 token。
    // `/` 只能开头，且后面不能跟 `*` 或 `/`，否则会吞掉注释开头。
    // 与 `=`、`->` 等标点重叠时标点优先
    #[regex(r"[-+*%<>=&|^~]+|/[-+%<>=&|^~]*", |lex| lex.slice().to_string(), priority = 1)]
    #[token("!=", |lex| lex.slice().to_string())]
    #[token("!==", |lex| lex.slice().to_string())]
    #[token("??", |lex| lex.slice().to_string())]
    #[token("...", |lex| lex.slice().to_string())]
    #[token("..<", |lex| lex.slice().to_string())]
    Operator(String),
}

/// `/* ... */`，不支持嵌套。没有 `*/` 时吞掉剩余输入并作为无效 token
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> Option<String> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Some(lex.slice().to_string())
        }
        None => {
            lex.bump(lex.remainder().len());
            None
        }
    }
}

/// 去掉引号并处理转义
fn unescape(lex: &mut logos::Lexer<RawToken>) -> String {
    let s = lex.slice();
    let inner = &s[1..s.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl RawToken {
    fn into_kind(self) -> TokenKind {
        let punctuator = TokenKind::Punctuator;
        match self {
            RawToken::Whitespace => TokenKind::Whitespace,
            RawToken::LineFeed => TokenKind::LineFeed,
            RawToken::CarriageReturn => TokenKind::CarriageReturn,
            RawToken::Comment(text) => TokenKind::Comment(text),
            RawToken::Word(word) => classify_word(&word),
            RawToken::BacktickIdentifier(name) => TokenKind::BacktickIdentifier(name),
            RawToken::Integer(text) => TokenKind::IntegerLiteral(text),
            RawToken::Float(text) => TokenKind::FloatingPointLiteral(text),
            RawToken::String(text) => TokenKind::StringLiteral(text),
            RawToken::LeftParen => punctuator(Punctuator::LeftParen),
            RawToken::RightParen => punctuator(Punctuator::RightParen),
            RawToken::LeftBrace => punctuator(Punctuator::LeftBrace),
            RawToken::RightBrace => punctuator(Punctuator::RightBrace),
            RawToken::LeftSquare => punctuator(Punctuator::LeftSquare),
            RawToken::RightSquare => punctuator(Punctuator::RightSquare),
            RawToken::Period => punctuator(Punctuator::Period),
            RawToken::Comma => punctuator(Punctuator::Comma),
            RawToken::Colon => punctuator(Punctuator::Colon),
            RawToken::Semi => punctuator(Punctuator::Semi),
            RawToken::Equal => punctuator(Punctuator::Equal),
            RawToken::At => punctuator(Punctuator::At),
            RawToken::Hash => punctuator(Punctuator::Hash),
            RawToken::Arrow => punctuator(Punctuator::Arrow),
            RawToken::Question => punctuator(Punctuator::Question),
            RawToken::Exclaim => punctuator(Punctuator::Exclaim),
            RawToken::Operator(op) => TokenKind::Operator(op),
        }
    }
}

/// 把源码切成 token 序列
///
/// 永不失败：不认识的字符变成 [`TokenKind::Invalid`]，交给解析器报告。
pub fn lex(text: &str) -> Vec<Token> {
    let index = LineIndex::new(text);
    RawToken::lexer(text)
        .spanned()
        .map(|(raw, span)| {
            let kind = match raw {
                Ok(raw) => raw.into_kind(),
                Err(()) => TokenKind::Invalid(text.get(span.clone()).unwrap_or("").to_string()),
            };
            let range = index.range(&span);
            Token::new(kind, span, range)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::KeywordKind;

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lexer_basic() {
        assert_eq!(
            kinds("import A;\n"),
            vec![
                TokenKind::Keyword("import".into(), KeywordKind::Declaration),
                TokenKind::Whitespace,
                TokenKind::Identifier("A".into()),
                TokenKind::Punctuator(Punctuator::Semi),
                TokenKind::LineFeed,
            ]
        );
    }

    #[test]
    fn test_punctuators_beat_operators() {
        assert_eq!(
            kinds("= == -> ? !="),
            vec![
                TokenKind::Punctuator(Punctuator::Equal),
                TokenKind::Whitespace,
                TokenKind::Operator("==".into()),
                TokenKind::Whitespace,
                TokenKind::Punctuator(Punctuator::Arrow),
                TokenKind::Whitespace,
                TokenKind::Punctuator(Punctuator::Question),
                TokenKind::Whitespace,
                TokenKind::Operator("!=".into()),
            ]
        );
    }

    #[test]
    fn test_postfix_question_is_separate() {
        assert_eq!(
            kinds("Array<Int>?"),
            vec![
                TokenKind::Identifier("Array".into()),
                TokenKind::Operator("<".into()),
                TokenKind::Identifier("Int".into()),
                TokenKind::Operator(">".into()),
                TokenKind::Punctuator(Punctuator::Question),
            ]
        );
        assert_eq!(
            kinds("a ?? b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Whitespace,
                TokenKind::Operator("??".into()),
                TokenKind::Whitespace,
                TokenKind::Identifier("b".into()),
            ]
        );
    }

    #[test]
    fn test_block_comments() {
        assert_eq!(
            kinds("/* c */a/** doc **/"),
            vec![
                TokenKind::Comment("/* c */".into()),
                TokenKind::Identifier("a".into()),
                TokenKind::Comment("/** doc **/".into()),
            ]
        );
        assert_eq!(
            kinds("a ==/* x */b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Whitespace,
                TokenKind::Operator("==".into()),
                TokenKind::Comment("/* x */".into()),
                TokenKind::Identifier("b".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment_is_invalid() {
        let tokens = lex("a /* open\nimport B");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].kind, TokenKind::Invalid("/* open\nimport B".into()));
    }

    #[test]
    fn test_slash_operators() {
        assert_eq!(
            kinds("x/y /= 2"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::Operator("/".into()),
                TokenKind::Identifier("y".into()),
                TokenKind::Whitespace,
                TokenKind::Operator("/=".into()),
                TokenKind::Whitespace,
                TokenKind::IntegerLiteral("2".into()),
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\"b\n""#),
            vec![TokenKind::StringLiteral("a\"b\n".into())]
        );
    }

    #[test]
    fn test_invalid_input_is_kept() {
        let tokens = lex("a $ b");
        assert_eq!(tokens[2].kind, TokenKind::Invalid("$".into()));
        assert_eq!(tokens[2].span, 2..3);
    }
}
