use std::fmt;

use super::expr::Expression;
use super::pattern::Pattern;
use super::stmt::CodeBlock;
use super::types::Type;
use super::Node;
use crate::source::SourceRange;

/// 声明上的特性: @available, @objc ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// 按源码顺序
    pub attributes: Vec<Attribute>,
    /// public / static / override ...，按源码顺序
    pub modifiers: Vec<String>,
    pub kind: DeclarationKind,
    pub range: SourceRange,
}

impl Node for Declaration {
    fn source_range(&self) -> SourceRange {
        self.range
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationKind {
    // import struct Foundation.Data
    Import(ImportDeclaration),

    // let a = 1, b: Int
    Constant(Vec<PatternInitializer>),

    // var a = 1
    Variable(Vec<PatternInitializer>),

    // typealias Name = Type
    Typealias { name: String, assignment: Type },

    // func f(a: Int) -> Int { ... }
    Function(FunctionDeclaration),

    Struct(TypeDeclaration),
    Class(TypeDeclaration),
    Enum(TypeDeclaration),
    Protocol(TypeDeclaration),
    Extension(TypeDeclaration),

    // enum 内部: case a, b
    EnumCase(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub module: String,
    /// 子模块路径段: import A.B.C → ["B", "C"]
    pub submodules: Vec<String>,
    pub kind: ImportKind,
}

impl ImportDeclaration {
    /// 完整导入路径: A.B.C
    pub fn path(&self) -> String {
        std::iter::once(self.module.as_str())
            .chain(self.submodules.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImportKind {
    #[default]
    Module,
    Typealias,
    Struct,
    Class,
    Enum,
    Protocol,
    Var,
    Func,
}

impl ImportKind {
    /// import 后面紧跟的限定关键字
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "typealias" => Some(Self::Typealias),
            "struct" => Some(Self::Struct),
            "class" => Some(Self::Class),
            "enum" => Some(Self::Enum),
            "protocol" => Some(Self::Protocol),
            "var" => Some(Self::Var),
            "func" => Some(Self::Func),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Typealias => "typealias",
            Self::Struct => "struct",
            Self::Class => "class",
            Self::Enum => "enum",
            Self::Protocol => "protocol",
            Self::Var => "var",
            Self::Func => "func",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternInitializer {
    pub pattern: Pattern,
    pub initializer: Option<Expression>,
}

impl fmt::Display for PatternInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.initializer {
            Some(initializer) => write!(f, "{} = {}", self.pattern, initializer),
            None => write!(f, "{}", self.pattern),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub throws: bool,
    pub result: Option<Type>,
    /// 协议里的函数没有函数体
    pub body: Option<CodeBlock>,
}

/// 函数参数: `outer inner: Type = default`
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub external_name: Option<String>,
    pub local_name: String,
    pub type_annotation: Type,
    pub default_argument: Option<Expression>,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(external) = &self.external_name {
            write!(f, "{} ", external)?;
        }
        write!(f, "{}: {}", self.local_name, self.type_annotation)?;
        if let Some(default) = &self.default_argument {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

/// struct / class / enum / protocol / extension 共用的形状
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub name: String,
    pub inherits: Vec<Type>,
    pub members: Vec<Declaration>,
}
