use std::fmt;

use super::decl::Declaration;
use super::expr::Expression;
use super::pattern::Pattern;
use super::Node;
use crate::source::SourceRange;

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub range: SourceRange,
}

impl Statement {
    pub fn new(kind: StatementKind, range: SourceRange) -> Self {
        Self { kind, range }
    }
}

impl Node for Statement {
    fn source_range(&self) -> SourceRange {
        self.range
    }
}

/// 语句：出现在代码块内部，子节点按值持有
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    // break / break outer
    Break {
        label: Option<String>,
    },

    // #if / #elseif / #else / #endif / #sourceLocation
    CompilerControl(CompilerControlKind),

    // continue / continue outer
    Continue {
        label: Option<String>,
    },

    // 块内声明: let x = 1
    Declaration(Box<Declaration>),

    // defer { ... }
    Defer(CodeBlock),

    // do { ... } catch ... { ... }
    Do {
        body: CodeBlock,
        catches: Vec<CatchClause>,
    },

    // 表达式语句: f(x)
    Expression(Expression),

    Fallthrough,

    // for case? pattern in collection where cond { ... }
    ForIn {
        is_case_matching: bool,
        pattern: Pattern,
        collection: Expression,
        where_clause: Option<Expression>,
        body: CodeBlock,
    },

    // guard cond else { ... }
    Guard {
        conditions: Vec<Condition>,
        body: CodeBlock,
    },

    // if cond { ... } else if ... else { ... }
    If {
        conditions: Vec<Condition>,
        body: CodeBlock,
        else_clause: Option<ElseClause>,
    },

    // outer: while ...
    Labeled {
        label: String,
        statement: Box<Statement>,
    },

    // repeat { ... } while cond
    RepeatWhile {
        body: CodeBlock,
        condition: Expression,
    },

    Return(Option<Expression>),

    // switch x { case ...: ... default: ... }
    Switch {
        expression: Expression,
        cases: Vec<SwitchCase>,
    },

    Throw(Expression),

    // while cond { ... }
    While {
        conditions: Vec<Condition>,
        body: CodeBlock,
    },
}

/// `{ ... }` 代码块
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBlock {
    pub statements: Vec<Statement>,
    pub range: SourceRange,
}

impl Node for CodeBlock {
    fn source_range(&self) -> SourceRange {
        self.range
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseClause {
    Else(CodeBlock),
    ElseIf(Box<Statement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub pattern: Option<Pattern>,
    pub where_clause: Option<Expression>,
    pub body: CodeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchCase {
    Case {
        items: Vec<CaseItem>,
        statements: Vec<Statement>,
    },
    Default {
        statements: Vec<Statement>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseItem {
    pub pattern: Pattern,
    pub where_clause: Option<Expression>,
}

/// if / guard / while 的单个条件
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Expression(Expression),
    // case .some(let x) = value
    Case(Pattern, Expression),
    // let x = value / var x = value
    OptionalBinding {
        mutable: bool,
        pattern: Pattern,
        initializer: Expression,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompilerControlKind {
    If(String),
    ElseIf(String),
    Else,
    EndIf,
    SourceLocation {
        file_name: Option<String>,
        line_number: Option<usize>,
    },
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Expression(expression) => write!(f, "{}", expression),
            Condition::Case(pattern, expression) => write!(f, "case {} = {}", pattern, expression),
            Condition::OptionalBinding {
                mutable,
                pattern,
                initializer,
            } => {
                let keyword = if *mutable { "var" } else { "let" };
                write!(f, "{} {} = {}", keyword, pattern, initializer)
            }
        }
    }
}
