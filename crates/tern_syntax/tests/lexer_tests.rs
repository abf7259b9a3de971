use tern_syntax::{lex, KeywordKind, Punctuator, SourceLocation, TokenKind};

fn significant(text: &str) -> Vec<TokenKind> {
    lex(text)
        .into_iter()
        .filter(|t| !t.is_whitespace())
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_keyword_classes() {
    let kinds = significant("import if true _ willSet Foo");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Keyword("import".into(), KeywordKind::Declaration),
            TokenKind::Keyword("if".into(), KeywordKind::Statement),
            TokenKind::Keyword("true".into(), KeywordKind::Expression),
            TokenKind::Keyword("_".into(), KeywordKind::Pattern),
            TokenKind::Keyword("willSet".into(), KeywordKind::Contextual),
            TokenKind::Identifier("Foo".into()),
        ]
    );
}

#[test]
fn test_backtick_identifier() {
    assert_eq!(
        significant("`class`"),
        vec![TokenKind::BacktickIdentifier("class".into())]
    );
}

#[test]
fn test_numbers() {
    assert_eq!(
        significant("42 0xFF 1_000 3.14 1e10"),
        vec![
            TokenKind::IntegerLiteral("42".into()),
            TokenKind::IntegerLiteral("0xFF".into()),
            TokenKind::IntegerLiteral("1_000".into()),
            TokenKind::FloatingPointLiteral("3.14".into()),
            TokenKind::FloatingPointLiteral("1e10".into()),
        ]
    );
}

#[test]
fn test_line_breaks_and_comments_are_tokens() {
    let kinds: Vec<TokenKind> = lex("a // note\r\nb /* c */").into_iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier("a".into()),
            TokenKind::Whitespace,
            TokenKind::Comment("// note".into()),
            TokenKind::CarriageReturn,
            TokenKind::LineFeed,
            TokenKind::Identifier("b".into()),
            TokenKind::Whitespace,
            TokenKind::Comment("/* c */".into()),
        ]
    );
}

#[test]
fn test_ranges_are_line_and_column() {
    let tokens = lex("import A\n  import B");
    let b = tokens.last().expect("token");
    assert_eq!(b.range.start, SourceLocation::new(2, 10));
    assert_eq!(b.range.end, SourceLocation::new(2, 11));
    assert_eq!(b.span, 18..19);
}

#[test]
fn test_range_operators() {
    assert_eq!(
        significant("0..<n 1...5"),
        vec![
            TokenKind::IntegerLiteral("0".into()),
            TokenKind::Operator("..<".into()),
            TokenKind::Identifier("n".into()),
            TokenKind::IntegerLiteral("1".into()),
            TokenKind::Operator("...".into()),
            TokenKind::IntegerLiteral("5".into()),
        ]
    );
}

#[test]
fn test_attribute_marker() {
    assert_eq!(
        significant("@objc"),
        vec![
            TokenKind::Punctuator(Punctuator::At),
            TokenKind::Identifier("objc".into()),
        ]
    );
}
