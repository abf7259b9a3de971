use tern_syntax::ast::{
    CompilerControlKind, Condition, DeclarationKind, ElseClause, ExpressionKind, PatternKind,
    Statement, StatementKind, SwitchCase, TryKind,
};
use tern_syntax::{parse, ParseOutput};

/// 把语句包进函数体里解析，返回函数体的语句
fn body(source: &str) -> (Vec<Statement>, ParseOutput) {
    let output = parse(&format!("func f() {{\n{}\n}}\n", source));
    let statements = match &output.root.declarations[0].kind {
        DeclarationKind::Function(function) => function
            .body
            .as_ref()
            .map(|b| b.statements.clone())
            .unwrap_or_default(),
        other => panic!("expected func, got {:?}", other),
    };
    (statements, output)
}

fn clean_body(source: &str) -> Vec<Statement> {
    let (statements, output) = body(source);
    assert!(output.errors.is_empty(), "{:?}", output.messages());
    statements
}

#[test]
fn test_if_else_chain() {
    let statements = clean_body("if a { } else if b { } else { x() }");
    let StatementKind::If {
        conditions,
        else_clause: Some(ElseClause::ElseIf(nested)),
        ..
    } = &statements[0].kind
    else {
        panic!("expected if/else if, got {:?}", statements[0].kind);
    };
    assert_eq!(conditions.len(), 1);
    let StatementKind::If {
        else_clause: Some(ElseClause::Else(block)),
        ..
    } = &nested.kind
    else {
        panic!("expected final else");
    };
    assert_eq!(block.statements.len(), 1);
}

#[test]
fn test_guard_with_optional_binding() {
    let statements = clean_body("guard let x = y, x > 0 else { return }");
    let StatementKind::Guard { conditions, body } = &statements[0].kind else {
        panic!("expected guard");
    };
    assert!(matches!(conditions[0], Condition::OptionalBinding { mutable: false, .. }));
    assert!(matches!(conditions[1], Condition::Expression(_)));
    assert!(matches!(body.statements[0].kind, StatementKind::Return(None)));
}

#[test]
fn test_loops() {
    let statements = clean_body(
        "while i < 10 { i += 1 }\nrepeat { tick() } while running\nfor (i, x) in items where x > 0 { print(x) }",
    );
    assert_eq!(statements.len(), 3);

    let StatementKind::While { body, .. } = &statements[0].kind else {
        panic!("expected while");
    };
    let StatementKind::Expression(expression) = &body.statements[0].kind else {
        panic!("expected expression statement");
    };
    assert!(matches!(&expression.kind, ExpressionKind::Binary { operator, .. } if operator == "+="));

    assert!(matches!(statements[1].kind, StatementKind::RepeatWhile { .. }));

    let StatementKind::ForIn {
        is_case_matching,
        pattern,
        where_clause,
        ..
    } = &statements[2].kind
    else {
        panic!("expected for-in");
    };
    assert!(!is_case_matching);
    assert_eq!(pattern.to_string(), "(i, x)");
    assert_eq!(where_clause.as_ref().map(|w| w.to_string()).as_deref(), Some("x > 0"));
}

#[test]
fn test_for_case_pattern() {
    let statements = clean_body("for case let .some(x) in items {}");
    let StatementKind::ForIn {
        is_case_matching,
        pattern,
        ..
    } = &statements[0].kind
    else {
        panic!("expected for-in");
    };
    assert!(is_case_matching);
    assert_eq!(pattern.to_string(), "let .some(x)");
}

#[test]
fn test_switch() {
    let statements = clean_body(
        "switch x {\ncase 1, 2:\n  foo()\ncase let y where y > 3:\n  break\ndefault:\n  fallthrough\n}",
    );
    let StatementKind::Switch { cases, .. } = &statements[0].kind else {
        panic!("expected switch");
    };
    assert_eq!(cases.len(), 3);

    let SwitchCase::Case { items, statements } = &cases[0] else {
        panic!("expected case");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(statements.len(), 1);

    let SwitchCase::Case { items, .. } = &cases[1] else {
        panic!("expected case");
    };
    assert!(matches!(items[0].pattern.kind, PatternKind::ValueBinding { .. }));
    assert!(items[0].where_clause.is_some());

    let SwitchCase::Default { statements } = &cases[2] else {
        panic!("expected default");
    };
    assert!(matches!(statements[0].kind, StatementKind::Fallthrough));
}

#[test]
fn test_do_catch() {
    let statements = clean_body("do {\n  try f()\n} catch MyError.bad {\n} catch {\n}");
    let StatementKind::Do { body, catches } = &statements[0].kind else {
        panic!("expected do");
    };
    let StatementKind::Expression(expression) = &body.statements[0].kind else {
        panic!("expected try expression");
    };
    assert!(matches!(expression.kind, ExpressionKind::Try { kind: TryKind::Try, .. }));

    assert_eq!(catches.len(), 2);
    assert_eq!(
        catches[0].pattern.as_ref().map(|p| p.to_string()).as_deref(),
        Some("MyError.bad")
    );
    assert!(catches[1].pattern.is_none());
}

#[test]
fn test_jumps_and_labels() {
    let statements = clean_body("outer: for x in xs {\n  continue outer\n}\ndefer { close() }\nthrow MyError.bad");
    let StatementKind::Labeled { label, statement } = &statements[0].kind else {
        panic!("expected labeled statement");
    };
    assert_eq!(label, "outer");
    let StatementKind::ForIn { body, .. } = &statement.kind else {
        panic!("expected for-in");
    };
    assert!(matches!(
        &body.statements[0].kind,
        StatementKind::Continue { label: Some(name) } if name == "outer"
    ));

    assert!(matches!(statements[1].kind, StatementKind::Defer(_)));
    assert!(matches!(statements[2].kind, StatementKind::Throw(_)));
}

#[test]
fn test_compiler_control() {
    let statements = clean_body(
        "#if DEBUG && !TEST\nlog()\n#elseif os(Linux)\n#else\n#endif\n#sourceLocation(file: \"a.swift\", line: 10)",
    );
    let kinds: Vec<&CompilerControlKind> = statements
        .iter()
        .filter_map(|s| match &s.kind {
            StatementKind::CompilerControl(kind) => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            &CompilerControlKind::If("DEBUG && !TEST".to_string()),
            &CompilerControlKind::ElseIf("os(Linux)".to_string()),
            &CompilerControlKind::Else,
            &CompilerControlKind::EndIf,
            &CompilerControlKind::SourceLocation {
                file_name: Some("a.swift".to_string()),
                line_number: Some(10),
            },
        ]
    );
}

#[test]
fn test_local_declarations() {
    let statements = clean_body("let x = 1\nvar y = x\nstruct Local {}");
    assert_eq!(statements.len(), 3);
    assert!(statements
        .iter()
        .all(|s| matches!(s.kind, StatementKind::Declaration(_))));
}

#[test]
fn test_expressions() {
    let statements = clean_body(
        "x = a + b * c\nlet d = [1, 2, 3]\nlet e = [\"k\": 1]\nlet f = user.name!\nlet g = try? load(path: p)[0]\n_ = -n",
    );
    let rendered: Vec<String> = statements.iter().map(|s| match &s.kind {
        StatementKind::Expression(e) => e.to_string(),
        StatementKind::Declaration(d) => match &d.kind {
            DeclarationKind::Constant(list) => list[0].to_string(),
            other => panic!("unexpected {:?}", other),
        },
        other => panic!("unexpected {:?}", other),
    }).collect();
    assert_eq!(
        rendered,
        vec![
            "x = a + b * c",
            "d = [1, 2, 3]",
            "e = [\"k\": 1]",
            "f = user.name!",
            "g = try? load(path: p)[0]",
            "_ = -n",
        ]
    );

    let StatementKind::Expression(assignment) = &statements[0].kind else {
        panic!("expected expression");
    };
    let ExpressionKind::Assignment { rhs, .. } = &assignment.kind else {
        panic!("expected assignment");
    };
    // 乘法优先
    assert!(matches!(&rhs.kind, ExpressionKind::Binary { operator, .. } if operator == "+"));
}

#[test]
fn test_binary_operator_must_stay_on_line() {
    let (statements, output) = body("a\n+ b");
    // `+ b` 单独成行：前缀运算符后面跟了空白
    assert_eq!(output.messages(), vec!["Expected expression."]);
    assert_eq!(statements.len(), 1);
}

#[test]
fn test_errors_are_local_to_blocks() {
    let (statements, output) = body("let = 1\ng()\nif { }\nh()");
    assert_eq!(output.messages(), vec!["Expected pattern.", "Expected expression."]);
    assert_eq!(statements.len(), 2);
    assert_eq!(output.root.len(), 1);
}

#[test]
fn test_missing_closing_brace() {
    let output = parse("func f() {\n  g()\n");
    assert_eq!(output.messages(), vec!["Expected `}`."]);
}
