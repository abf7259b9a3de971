pub mod decl;
pub mod expr;
pub mod pattern;
pub mod stmt;
pub mod types;
pub mod visitor;

// 重新导出核心类型，方便外部直接使用 tern_syntax::ast::Statement 等
pub use decl::{
    Attribute, Declaration, DeclarationKind, FunctionDeclaration, ImportDeclaration, ImportKind,
    Parameter, PatternInitializer, TypeDeclaration,
};
pub use expr::{Argument, Expression, ExpressionKind, LiteralKind, TryKind};
pub use pattern::{Pattern, PatternKind};
pub use stmt::{
    CaseItem, CatchClause, CodeBlock, CompilerControlKind, Condition, ElseClause, Statement,
    StatementKind, SwitchCase,
};
pub use types::{Type, TypeSegment};
pub use visitor::Visitor;

use crate::source::SourceRange;

/// 所有语法节点的公共能力：知道自己在源码中的范围
pub trait Node {
    fn source_range(&self) -> SourceRange;
}

/// 解析结果的根：按出现顺序排列的顶层声明，只追加
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopLevelDeclaration {
    pub declarations: Vec<Declaration>,
    pub range: SourceRange,
}

impl TopLevelDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl Node for TopLevelDeclaration {
    fn source_range(&self) -> SourceRange {
        self.range
    }
}
