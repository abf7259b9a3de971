use std::fmt;

use super::Node;
use crate::source::SourceRange;

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub range: SourceRange,
}

impl Expression {
    pub fn new(kind: ExpressionKind, range: SourceRange) -> Self {
        Self { kind, range }
    }
}

impl Node for Expression {
    fn source_range(&self) -> SourceRange {
        self.range
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    // 变量使用: x, `class`
    Identifier(String),

    // 字面量: 1, "hi", [1, 2], nil
    Literal(LiteralKind),

    // self
    SelfExpression,

    // 隐式成员: .red
    ImplicitMember(String),

    // (a)
    Parenthesized(Box<Expression>),

    // (a, label: b)
    Tuple(Vec<Argument>),

    // 前缀运算: -a, !b
    Prefix {
        operator: String,
        operand: Box<Expression>,
    },

    // 二元运算: a + b
    Binary {
        operator: String,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },

    // 赋值: a = b (复合赋值 += 仍是 Binary)
    Assignment {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },

    // 函数调用: f(1, label: 2)
    FunctionCall {
        callee: Box<Expression>,
        arguments: Vec<Argument>,
    },

    // 成员访问: user.name, tuple.0
    ExplicitMember {
        base: Box<Expression>,
        member: String,
    },

    // 下标: a[i]
    Subscript {
        base: Box<Expression>,
        arguments: Vec<Argument>,
    },

    // 强制解包: a!
    ForcedValue(Box<Expression>),

    // try / try? / try!
    Try {
        kind: TryKind,
        expression: Box<Expression>,
    },

    // 丢弃: _ = f()
    Wildcard,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralKind {
    Nil,
    Boolean(bool),
    Integer(String),
    FloatingPoint(String),
    String(String),
    Array(Vec<Expression>),
    Dictionary(Vec<(Expression, Expression)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryKind {
    Try,
    Optional,
    Forced,
}

/// 调用/元组/下标的一个参数，标签可选
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub label: Option<String>,
    pub expression: Expression,
}

fn join_arguments(arguments: &[Argument]) -> String {
    arguments
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}: {}", label, self.expression),
            None => write!(f, "{}", self.expression),
        }
    }
}

impl fmt::Display for TryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TryKind::Try => "try",
            TryKind::Optional => "try?",
            TryKind::Forced => "try!",
        })
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::Nil => f.write_str("nil"),
            LiteralKind::Boolean(value) => write!(f, "{}", value),
            LiteralKind::Integer(text) | LiteralKind::FloatingPoint(text) => f.write_str(text),
            LiteralKind::String(text) => write!(f, "{:?}", text),
            LiteralKind::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            LiteralKind::Dictionary(entries) if entries.is_empty() => f.write_str("[:]"),
            LiteralKind::Dictionary(entries) => {
                let items: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

/// 表达式的源码形式 (text description)
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Identifier(name) => f.write_str(name),
            ExpressionKind::Literal(literal) => write!(f, "{}", literal),
            ExpressionKind::SelfExpression => f.write_str("self"),
            ExpressionKind::ImplicitMember(name) => write!(f, ".{}", name),
            ExpressionKind::Parenthesized(inner) => write!(f, "({})", inner),
            ExpressionKind::Tuple(elements) => write!(f, "({})", join_arguments(elements)),
            ExpressionKind::Prefix { operator, operand } => write!(f, "{}{}", operator, operand),
            ExpressionKind::Binary { operator, lhs, rhs } => {
                write!(f, "{} {} {}", lhs, operator, rhs)
            }
            ExpressionKind::Assignment { lhs, rhs } => write!(f, "{} = {}", lhs, rhs),
            ExpressionKind::FunctionCall { callee, arguments } => {
                write!(f, "{}({})", callee, join_arguments(arguments))
            }
            ExpressionKind::ExplicitMember { base, member } => write!(f, "{}.{}", base, member),
            ExpressionKind::Subscript { base, arguments } => {
                write!(f, "{}[{}]", base, join_arguments(arguments))
            }
            ExpressionKind::ForcedValue(base) => write!(f, "{}!", base),
            ExpressionKind::Try { kind, expression } => write!(f, "{} {}", kind, expression),
            ExpressionKind::Wildcard => f.write_str("_"),
        }
    }
}
