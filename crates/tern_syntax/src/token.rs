//! Token - 词法单元
//!
//! 词法分析器产出、解析器只读。关键字在这里就已经分好类
//! (声明关键字 / 上下文关键字 ...)，解析器不再看字符。

use std::fmt;

use tern_diagnostics::Span;

use crate::source::SourceRange;

/// 关键字的子类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordKind {
    /// 引入声明: import, struct, func ...
    Declaration,
    /// 语句关键字: if, while, return ...
    Statement,
    /// 表达式关键字: true, nil, try ...
    Expression,
    /// 模式关键字: _
    Pattern,
    /// 只在特定位置是关键字，其余位置可作标识符: get, set, willSet ...
    Contextual,
}

/// 具体的标点符号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuator {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftSquare,
    RightSquare,
    Period,
    Comma,
    Colon,
    Semi,
    Equal,
    At,
    Hash,
    Arrow,
    Question,
    Exclaim,
}

impl Punctuator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftSquare => "[",
            Self::RightSquare => "]",
            Self::Period => ".",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::Semi => ";",
            Self::Equal => "=",
            Self::At => "@",
            Self::Hash => "#",
            Self::Arrow => "->",
            Self::Question => "?",
            Self::Exclaim => "!",
        }
    }
}

impl fmt::Display for Punctuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Identifier(String),
    /// `` `class` `` 形式的标识符，内容不含反引号
    BacktickIdentifier(String),
    Keyword(String, KeywordKind),
    Punctuator(Punctuator),
    Operator(String),
    IntegerLiteral(String),
    FloatingPointLiteral(String),
    /// 已处理转义
    StringLiteral(String),
    Whitespace,
    Comment(String),
    LineFeed,
    CarriageReturn,
    /// 词法分析器不认识的输入
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub range: SourceRange,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, range: SourceRange) -> Self {
        Self { kind, span, range }
    }

    /// 空白、注释和换行都算空白
    pub fn is_whitespace(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace
                | TokenKind::Comment(_)
                | TokenKind::LineFeed
                | TokenKind::CarriageReturn
        )
    }

    /// 同一行内的空白（不含换行）
    pub fn is_inline_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment(_))
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self.kind, TokenKind::LineFeed | TokenKind::CarriageReturn)
    }

    pub fn is_punctuator(&self, punctuator: Punctuator) -> bool {
        self.kind == TokenKind::Punctuator(punctuator)
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Keyword(keyword, _) if keyword == name)
    }

    pub fn is_operator(&self, text: &str) -> bool {
        matches!(&self.kind, TokenKind::Operator(op) if op == text)
    }

    pub fn keyword_kind(&self) -> Option<KeywordKind> {
        match &self.kind {
            TokenKind::Keyword(_, kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_declaration_keyword(&self) -> bool {
        self.keyword_kind() == Some(KeywordKind::Declaration)
    }
}

impl TokenKind {
    /// 近似还原源码文本，用于把 `#if` 条件原样记录下来
    pub fn source_text(&self) -> String {
        match self {
            Self::Identifier(name) | Self::Keyword(name, _) => name.clone(),
            Self::BacktickIdentifier(name) => format!("`{}`", name),
            Self::Punctuator(p) => p.symbol().to_string(),
            Self::Operator(text)
            | Self::IntegerLiteral(text)
            | Self::FloatingPointLiteral(text)
            | Self::Comment(text)
            | Self::Invalid(text) => text.clone(),
            Self::StringLiteral(text) => format!("{:?}", text),
            Self::Whitespace => " ".to_string(),
            Self::LineFeed => "\n".to_string(),
            Self::CarriageReturn => "\r".to_string(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => write!(f, "identifier `{}`", name),
            Self::BacktickIdentifier(name) => write!(f, "identifier `{}`", name),
            Self::Keyword(name, _) => write!(f, "keyword `{}`", name),
            Self::Punctuator(p) => write!(f, "{}", p),
            Self::Operator(op) => write!(f, "operator `{}`", op),
            Self::IntegerLiteral(text) | Self::FloatingPointLiteral(text) => {
                write!(f, "literal `{}`", text)
            }
            Self::StringLiteral(_) => f.write_str("string literal"),
            Self::Whitespace | Self::Comment(_) => f.write_str("whitespace"),
            Self::LineFeed | Self::CarriageReturn => f.write_str("line break"),
            Self::Invalid(text) => write!(f, "invalid input `{}`", text),
        }
    }
}

const DECLARATION_KEYWORDS: &[&str] = &[
    "associatedtype",
    "class",
    "deinit",
    "enum",
    "extension",
    "fileprivate",
    "func",
    "import",
    "init",
    "inout",
    "internal",
    "let",
    "open",
    "operator",
    "private",
    "protocol",
    "public",
    "static",
    "struct",
    "subscript",
    "typealias",
    "var",
];

const STATEMENT_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "continue",
    "default",
    "defer",
    "do",
    "else",
    "fallthrough",
    "for",
    "guard",
    "if",
    "in",
    "repeat",
    "return",
    "switch",
    "throw",
    "where",
    "while",
];

const EXPRESSION_KEYWORDS: &[&str] = &[
    "as", "false", "is", "nil", "rethrows", "self", "super", "throws", "true", "try",
];

const CONTEXTUAL_KEYWORDS: &[&str] = &[
    "Protocol",
    "Type",
    "associativity",
    "convenience",
    "didSet",
    "dynamic",
    "final",
    "get",
    "indirect",
    "lazy",
    "left",
    "mutating",
    "none",
    "nonmutating",
    "optional",
    "override",
    "postfix",
    "precedence",
    "prefix",
    "required",
    "right",
    "set",
    "unowned",
    "weak",
    "willSet",
];

/// 单词分类：关键字 (带子类) 或普通标识符
pub fn classify_word(word: &str) -> TokenKind {
    let kind = if DECLARATION_KEYWORDS.contains(&word) {
        KeywordKind::Declaration
    } else if STATEMENT_KEYWORDS.contains(&word) {
        KeywordKind::Statement
    } else if EXPRESSION_KEYWORDS.contains(&word) {
        KeywordKind::Expression
    } else if word == "_" {
        KeywordKind::Pattern
    } else if CONTEXTUAL_KEYWORDS.contains(&word) {
        KeywordKind::Contextual
    } else {
        return TokenKind::Identifier(word.to_string());
    };
    TokenKind::Keyword(word.to_string(), kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_word() {
        assert_eq!(
            classify_word("import"),
            TokenKind::Keyword("import".into(), KeywordKind::Declaration)
        );
        assert_eq!(
            classify_word("willSet"),
            TokenKind::Keyword("willSet".into(), KeywordKind::Contextual)
        );
        assert_eq!(
            classify_word("_"),
            TokenKind::Keyword("_".into(), KeywordKind::Pattern)
        );
        assert_eq!(classify_word("Foundation"), TokenKind::Identifier("Foundation".into()));
    }
}
