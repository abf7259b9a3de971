use std::fmt;

use super::expr::Expression;
use super::types::Type;
use super::Node;
use crate::source::SourceRange;

#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub kind: PatternKind,
    pub range: SourceRange,
}

impl Pattern {
    pub fn new(kind: PatternKind, range: SourceRange) -> Self {
        Self { kind, range }
    }
}

impl Node for Pattern {
    fn source_range(&self) -> SourceRange {
        self.range
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternKind {
    // _
    Wildcard,

    // x
    Identifier(String),

    // let x / var (a, b)
    ValueBinding {
        mutable: bool,
        pattern: Box<Pattern>,
    },

    // (a, _)
    Tuple(Vec<Pattern>),

    // .some(let x) / Color.red
    EnumCase {
        type_name: Option<String>,
        case_name: String,
        associated: Option<Box<Pattern>>,
    },

    // x?
    Optional(Box<Pattern>),

    // x: Int
    TypeAnnotated {
        pattern: Box<Pattern>,
        annotation: Type,
    },

    // 其余情况按表达式匹配: case 1, case foo()
    Expression(Box<Expression>),
}

/// 模式的源码形式，dump 里用反引号包起来
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PatternKind::Wildcard => f.write_str("_"),
            PatternKind::Identifier(name) => f.write_str(name),
            PatternKind::ValueBinding { mutable, pattern } => {
                let keyword = if *mutable { "var" } else { "let" };
                write!(f, "{} {}", keyword, pattern)
            }
            PatternKind::Tuple(elements) => {
                let items: Vec<String> = elements.iter().map(|p| p.to_string()).collect();
                write!(f, "({})", items.join(", "))
            }
            PatternKind::EnumCase {
                type_name,
                case_name,
                associated,
            } => {
                if let Some(type_name) = type_name {
                    f.write_str(type_name)?;
                }
                write!(f, ".{}", case_name)?;
                match associated {
                    Some(tuple) => write!(f, "{}", tuple),
                    None => Ok(()),
                }
            }
            PatternKind::Optional(inner) => write!(f, "{}?", inner),
            PatternKind::TypeAnnotated {
                pattern,
                annotation,
            } => write!(f, "{}: {}", pattern, annotation),
            PatternKind::Expression(expression) => write!(f, "{}", expression),
        }
    }
}
