use super::{head, indented, join_lines, list, TtyDump};
use crate::ast::{Argument, Expression, ExpressionKind, LiteralKind, Pattern, PatternKind};

fn dump_arguments(label: &str, arguments: &[Argument]) -> String {
    list(label, arguments, |index, argument| {
        let mut out = format!("{}:", index);
        if let Some(name) = &argument.label {
            out.push_str(&format!(" label: `{}`", name));
        }
        out.push('\n');
        out.push_str(&indented(&argument.expression.tty_dump()));
        out
    })
}

fn literal_body(literal: &LiteralKind) -> Vec<String> {
    match literal {
        LiteralKind::Nil => vec!["kind: `nil`".to_string()],
        LiteralKind::Boolean(value) => vec![format!("kind: `boolean`, literal: `{}`", value)],
        LiteralKind::Integer(text) => vec![format!("kind: `integer`, literal: `{}`", text)],
        LiteralKind::FloatingPoint(text) => {
            vec![format!("kind: `floating_point`, literal: `{}`", text)]
        }
        LiteralKind::String(text) => vec![format!("kind: `string`, literal: `{:?}`", text)],
        LiteralKind::Array(elements) => vec![
            "kind: `array`".to_string(),
            list("elements", elements, |index, element| {
                format!("{}:\n{}", index, indented(&element.tty_dump()))
            }),
        ],
        LiteralKind::Dictionary(entries) => vec![
            "kind: `dictionary`".to_string(),
            list("entries", entries, |index, (key, value)| {
                format!(
                    "{}:\n{}\n{}",
                    index,
                    indented(&format!("key: {}", key.tty_dump())),
                    indented(&format!("value: {}", value.tty_dump()))
                )
            }),
        ],
    }
}

impl TtyDump for Expression {
    fn tty_dump(&self) -> String {
        let (tag, body): (&str, Vec<String>) = match &self.kind {
            ExpressionKind::Identifier(name) => ("identifier_expr", vec![format!("name: `{}`", name)]),
            ExpressionKind::Literal(literal) => ("literal_expr", literal_body(literal)),
            ExpressionKind::SelfExpression => ("self_expr", Vec::new()),
            ExpressionKind::ImplicitMember(name) => {
                ("implicit_member_expr", vec![format!("name: `{}`", name)])
            }
            ExpressionKind::Parenthesized(inner) => ("paren_expr", vec![inner.tty_dump()]),
            ExpressionKind::Tuple(elements) => ("tuple_expr", vec![dump_arguments("elements", elements)]),
            ExpressionKind::Prefix { operator, operand } => (
                "prefix_unary_expr",
                vec![format!("operator: `{}`", operator), operand.tty_dump()],
            ),
            ExpressionKind::Binary { operator, lhs, rhs } => (
                "binary_op_expr",
                vec![
                    format!("operator: `{}`", operator),
                    lhs.tty_dump(),
                    rhs.tty_dump(),
                ],
            ),
            ExpressionKind::Assignment { lhs, rhs } => {
                ("assignment_expr", vec![lhs.tty_dump(), rhs.tty_dump()])
            }
            ExpressionKind::FunctionCall { callee, arguments } => (
                "function_call_expr",
                vec![callee.tty_dump(), dump_arguments("arguments", arguments)],
            ),
            ExpressionKind::ExplicitMember { base, member } => (
                "explicit_member_expr",
                vec![base.tty_dump(), format!("member: `{}`", member)],
            ),
            ExpressionKind::Subscript { base, arguments } => (
                "subscript_expr",
                vec![base.tty_dump(), dump_arguments("arguments", arguments)],
            ),
            ExpressionKind::ForcedValue(base) => ("forced_value_expr", vec![base.tty_dump()]),
            ExpressionKind::Try { kind, expression } => (
                "try_expr",
                vec![format!("kind: `{}`", kind), expression.tty_dump()],
            ),
            ExpressionKind::Wildcard => ("wildcard_expr", Vec::new()),
        };

        let mut parts = vec![head(tag, self.range)];
        parts.extend(body.iter().map(|line| indented(line)));
        join_lines(parts)
    }
}

impl TtyDump for Pattern {
    fn tty_dump(&self) -> String {
        let tag = match &self.kind {
            PatternKind::Wildcard => "wildcard_pattern",
            PatternKind::Identifier(_) => "identifier_pattern",
            PatternKind::ValueBinding { .. } => "value_binding_pattern",
            PatternKind::Tuple(_) => "tuple_pattern",
            PatternKind::EnumCase { .. } => "enum_case_pattern",
            PatternKind::Optional(_) => "optional_pattern",
            PatternKind::TypeAnnotated { .. } => "type_annotated_pattern",
            PatternKind::Expression(_) => "expr_pattern",
        };
        format!(
            "{}\n{}",
            head(tag, self.range),
            indented(&format!("text: `{}`", self))
        )
    }
}
