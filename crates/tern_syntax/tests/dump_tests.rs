use tern_syntax::ast::{DeclarationKind, Statement};
use tern_syntax::{parse, TtyDump};

fn dump(text: &str) -> String {
    let output = parse(text);
    assert!(output.errors.is_empty(), "{:?}", output.messages());
    output.root.tty_dump()
}

fn first_body_statement(text: &str) -> Statement {
    let output = parse(text);
    assert!(output.errors.is_empty(), "{:?}", output.messages());
    match &output.root.declarations[0].kind {
        DeclarationKind::Function(function) => function
            .body
            .as_ref()
            .map(|b| b.statements[0].clone())
            .expect("function body"),
        other => panic!("expected func, got {:?}", other),
    }
}

#[test]
fn test_import_dump() {
    let expected = [
        "(top_level_decl) <range>1:1-1:18</range>",
        "  (import_decl) <range>1:1-1:18</range>",
        "    kind: `module`",
        "    import_path: `Foundation`",
    ]
    .join("\n");
    assert_eq!(dump("import Foundation"), expected);
}

#[test]
fn test_attributed_qualified_import_dump() {
    let expected = [
        "(top_level_decl) <range>1:1-2:1</range>",
        "  (import_decl) <range>1:1-1:24</range>",
        "    attributes: `@objc`",
        "    kind: `struct`",
        "    import_path: `A.B`",
    ]
    .join("\n");
    assert_eq!(dump("@objc import struct A.B;\n"), expected);
}

#[test]
fn test_empty_root_dump() {
    assert_eq!(dump(""), "(top_level_decl) <range>1:1-1:1</range> &lt;empty&gt;");
}

#[test]
fn test_function_dump() {
    let expected = [
        "(top_level_decl) <range>1:1-3:2</range>",
        "  (func_decl) <range>1:1-3:2</range>",
        "    name: `f`",
        "    parameters: &lt;empty&gt;",
        "    (code_block) <range>1:10-3:2</range>",
        "      (return_stmt) <range>2:3-2:11</range>",
        "        (literal_expr) <range>2:10-2:11</range>",
        "          kind: `integer`, literal: `1`",
    ]
    .join("\n");
    assert_eq!(dump("func f() {\n  return 1\n}"), expected);
}

#[test]
fn test_constant_dump() {
    let expected = [
        "(top_level_decl) <range>1:1-1:14</range>",
        "  (const_decl) <range>1:1-1:14</range>",
        "    initializers:",
        "      0: pattern: `v`",
        "        initializer: (binary_op_expr) <range>1:9-1:14</range>",
        "          operator: `+`",
        "          (identifier_expr) <range>1:9-1:10</range>",
        "            name: `a`",
        "          (literal_expr) <range>1:13-1:14</range>",
        "            kind: `integer`, literal: `1`",
    ]
    .join("\n");
    assert_eq!(dump("let v = a + 1"), expected);
}

#[test]
fn test_if_statement_dump() {
    let statement =
        first_body_statement("func f() {\n  if let x = y, z {\n  } else {\n  }\n}");
    let expected = [
        "(if_stmt) <range>2:3-4:4</range>",
        "  conditions:",
        "    0: kind: `let`, pattern: `x`, expression: `y`",
        "    1: kind: `expression`, expression: `z`",
        "  (code_block) <range>2:19-3:4</range> &lt;empty&gt;",
        "  else:",
        "  (code_block) <range>3:10-4:4</range> &lt;empty&gt;",
    ]
    .join("\n");
    assert_eq!(statement.tty_dump(), expected);
}

#[test]
fn test_switch_statement_dump() {
    let statement = first_body_statement(
        "func f() {\nswitch x {\ncase 1:\n  break\ndefault:\n  break\n}\n}",
    );
    let expected = [
        "(switch_stmt) <range>2:1-7:2</range>",
        "  (identifier_expr) <range>2:8-2:9</range>",
        "    name: `x`",
        "  cases:",
        "  0: kind: `case`",
        "    items:",
        "    0: pattern: `1`",
        "    (break_stmt) <range>4:3-4:8</range>",
        "  1: kind: `default`",
        "    (break_stmt) <range>6:3-6:8</range>",
    ]
    .join("\n");
    assert_eq!(statement.tty_dump(), expected);
}

#[test]
fn test_switch_arms_without_statements_dump() {
    let statement = first_body_statement("func f() {\nswitch x {\ncase 1:\ndefault:\n}\n}");
    let expected = [
        "(switch_stmt) <range>2:1-5:2</range>",
        "  (identifier_expr) <range>2:8-2:9</range>",
        "    name: `x`",
        "  cases:",
        "  0: kind: `case`",
        "    items:",
        "    0: pattern: `1`",
        "    ",
        "  1: kind: `default`",
        "    ",
    ]
    .join("\n");
    assert_eq!(statement.tty_dump(), expected);
}

#[test]
fn test_do_without_catches_dump() {
    let statement = first_body_statement("func f() {\n  do {\n  }\n}");
    assert_eq!(
        statement.tty_dump(),
        "(do_stmt) <range>2:3-3:4</range>\n  (code_block) <range>2:6-3:4</range> &lt;empty&gt;\n  catches: &lt;empty&gt;"
    );
}

#[test]
fn test_dump_is_deterministic_and_ranged() {
    let text = "struct S: P {\n  var a = [1: \"x\"]\n  func g(_ n: Int) -> Int? {\n    guard n > 0 else { return nil }\n    for i in 0..<n where i != 2 { print(i) }\n    return n\n  }\n}\n";
    let output = parse(text);
    assert!(output.errors.is_empty(), "{:?}", output.messages());

    let first = output.root.tty_dump();
    let second = output.root.tty_dump();
    assert_eq!(first, second);

    // 每个节点头都带范围
    for line in first.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('(') {
            assert!(trimmed.contains("<range>"), "{}", line);
        }
    }
}
