use super::{head, indented, join_lines, list, TtyDump, EMPTY};
use crate::ast::{
    CodeBlock, CompilerControlKind, Condition, ElseClause, Node, Statement, StatementKind,
    SwitchCase,
};

impl TtyDump for CodeBlock {
    fn tty_dump(&self) -> String {
        let head = head("code_block", self.source_range());
        if self.statements.is_empty() {
            return format!("{} {}", head, EMPTY);
        }
        let mut parts = vec![head];
        parts.extend(self.statements.iter().map(|s| indented(&s.tty_dump())));
        join_lines(parts)
    }
}

fn dump_conditions(conditions: &[Condition]) -> String {
    list("conditions", conditions, |index, condition| {
        let body = match condition {
            Condition::Expression(expression) => {
                format!("kind: `expression`, expression: `{}`", expression)
            }
            Condition::Case(pattern, expression) => {
                format!("kind: `case`, pattern: `{}`, expression: `{}`", pattern, expression)
            }
            Condition::OptionalBinding {
                mutable,
                pattern,
                initializer,
            } => format!(
                "kind: `{}`, pattern: `{}`, expression: `{}`",
                if *mutable { "var" } else { "let" },
                pattern,
                initializer
            ),
        };
        format!("{}: {}", index, body)
    })
}

fn dump_label(tag: &str, statement: &Statement, label: &Option<String>) -> String {
    let mut parts = vec![head(tag, statement.range)];
    if let Some(label) = label {
        parts.push(indented(&format!("label_name: `{}`", label)));
    }
    join_lines(parts)
}

/// case 分支的语句，缩进两级；没有语句时也输出这一行（只有缩进）
fn dump_statements(statements: &[Statement]) -> String {
    let dumps: Vec<String> = statements.iter().map(|s| s.tty_dump()).collect();
    indented(&indented(&dumps.join("\n")))
}

impl TtyDump for Statement {
    fn tty_dump(&self) -> String {
        let range = self.range;
        match &self.kind {
            StatementKind::Break { label } => dump_label("break_stmt", self, label),
            StatementKind::Continue { label } => dump_label("continue_stmt", self, label),
            StatementKind::CompilerControl(kind) => {
                let body = match kind {
                    CompilerControlKind::If(condition) => {
                        format!("kind: `if`, condition: `{}`", condition)
                    }
                    CompilerControlKind::ElseIf(condition) => {
                        format!("kind: `elseif`, condition: `{}`", condition)
                    }
                    CompilerControlKind::Else => "kind: `else`".to_string(),
                    CompilerControlKind::EndIf => "kind: `endif`".to_string(),
                    CompilerControlKind::SourceLocation {
                        file_name,
                        line_number,
                    } => {
                        let mut body = "kind: `source_location`".to_string();
                        if let (Some(file_name), Some(line_number)) = (file_name, line_number) {
                            body.push_str(&format!(
                                ", file_name: `{}`, line_number: `{}`",
                                file_name, line_number
                            ));
                        }
                        body
                    }
                };
                format!("{}\n{}", head("compiler_ctrl_stmt", range), indented(&body))
            }
            StatementKind::Declaration(declaration) => declaration.tty_dump(),
            StatementKind::Defer(body) => {
                format!("{}\n{}", head("defer_stmt", range), indented(&body.tty_dump()))
            }
            StatementKind::Do { body, catches } => {
                let mut out = format!("{}\n{}\n", head("do_stmt", range), indented(&body.tty_dump()));
                out.push_str(&indented("catches:"));
                if catches.is_empty() {
                    out.push(' ');
                    out.push_str(EMPTY);
                }
                for (index, clause) in catches.iter().enumerate() {
                    out.push('\n');
                    out.push_str(&indented(&format!("{}: ", index)));
                    match (&clause.pattern, &clause.where_clause) {
                        (None, None) => out.push_str("&lt;catch_all&gt;"),
                        (Some(pattern), None) => out.push_str(&format!("pattern: `{}`", pattern)),
                        (None, Some(expr)) => out.push_str(&format!("where: `{}`", expr.tty_dump())),
                        (Some(pattern), Some(expr)) => out.push_str(&format!(
                            "pattern: `{}`, where: `{}`",
                            pattern,
                            expr.tty_dump()
                        )),
                    }
                    out.push('\n');
                    out.push_str(&indented(&indented(&clause.body.tty_dump())));
                }
                out
            }
            StatementKind::Expression(expression) => expression.tty_dump(),
            StatementKind::Fallthrough => head("fallthrough_stmt", range),
            StatementKind::ForIn {
                is_case_matching,
                pattern,
                collection,
                where_clause,
                body,
            } => {
                let mut parts = vec![head("for_stmt", range)];
                if *is_case_matching {
                    parts.push(indented("case_matching: `true`"));
                }
                parts.push(indented(&format!("pattern: `{}`", pattern)));
                parts.push(indented(&format!("collection: {}", collection.tty_dump())));
                if let Some(where_clause) = where_clause {
                    parts.push(indented(&format!("where: {}", where_clause.tty_dump())));
                }
                parts.push(indented(&body.tty_dump()));
                join_lines(parts)
            }
            StatementKind::Guard { conditions, body } => join_lines(vec![
                head("guard_stmt", range),
                indented(&dump_conditions(conditions)),
                indented(&body.tty_dump()),
            ]),
            StatementKind::If {
                conditions,
                body,
                else_clause,
            } => {
                let neck = join_lines(vec![
                    head("if_stmt", range),
                    indented(&dump_conditions(conditions)),
                    indented(&body.tty_dump()),
                ]);
                match else_clause {
                    None => neck,
                    Some(ElseClause::Else(block)) => {
                        format!("{}\n{}", neck, indented(&format!("else:\n{}", block.tty_dump())))
                    }
                    Some(ElseClause::ElseIf(statement)) => format!(
                        "{}\n{}",
                        neck,
                        indented(&format!("elseif:\n{}", statement.tty_dump()))
                    ),
                }
            }
            StatementKind::Labeled { label, statement } => join_lines(vec![
                head("labeled_stmt", range),
                indented(&format!("label_name: `{}`", label)),
                indented(&statement.tty_dump()),
            ]),
            StatementKind::RepeatWhile { body, condition } => join_lines(vec![
                head("repeat_stmt", range),
                indented(&body.tty_dump()),
                indented(&format!("condition: {}", condition.tty_dump())),
            ]),
            StatementKind::Return(value) => match value {
                None => head("return_stmt", range),
                Some(value) => format!("{}\n{}", head("return_stmt", range), indented(&value.tty_dump())),
            },
            StatementKind::Switch { expression, cases } => {
                let mut body = indented(&expression.tty_dump());
                body.push('\n');
                body.push_str(&indented("cases:"));
                if cases.is_empty() {
                    body.push(' ');
                    body.push_str(EMPTY);
                }
                for (index, case) in cases.iter().enumerate() {
                    body.push('\n');
                    body.push_str(&indented(&format!("{}: ", index)));
                    let statements = match case {
                        SwitchCase::Case { items, statements } => {
                            body.push_str("kind: `case`\n");
                            body.push_str(&indented(&indented("items:")));
                            if items.is_empty() {
                                body.push(' ');
                                body.push_str(EMPTY);
                            }
                            for (item_index, item) in items.iter().enumerate() {
                                body.push('\n');
                                body.push_str(&indented(&indented(&format!(
                                    "{}: pattern: `{}`",
                                    item_index, item.pattern
                                ))));
                                if let Some(where_clause) = &item.where_clause {
                                    body.push('\n');
                                    body.push_str(&indented(&indented(&indented(&format!(
                                        "where: {}",
                                        where_clause.tty_dump()
                                    )))));
                                }
                            }
                            statements
                        }
                        SwitchCase::Default { statements } => {
                            body.push_str("kind: `default`");
                            statements
                        }
                    };
                    body.push('\n');
                    body.push_str(&dump_statements(statements));
                }
                format!("{}\n{}", head("switch_stmt", range), body)
            }
            StatementKind::Throw(expression) => {
                format!("{}\n{}", head("throw_stmt", range), indented(&expression.tty_dump()))
            }
            StatementKind::While { conditions, body } => join_lines(vec![
                head("while_stmt", range),
                indented(&dump_conditions(conditions)),
                indented(&body.tty_dump()),
            ]),
        }
    }
}
