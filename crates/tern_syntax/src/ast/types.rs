use std::fmt;

/// 类型标注。只以文本形式出现在 dump 里，所以不单独记录范围
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    // Swift.Array<Int>
    Named(Vec<TypeSegment>),
    // [Int]
    Array(Box<Type>),
    // [String: Int]
    Dictionary(Box<Type>, Box<Type>),
    // Int?
    Optional(Box<Type>),
    // Int!
    ImplicitlyUnwrappedOptional(Box<Type>),
    // (Int, String)
    Tuple(Vec<Type>),
    // (Int) throws -> String
    Function {
        parameters: Vec<Type>,
        throws: bool,
        result: Box<Type>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSegment {
    pub name: String,
    pub generic_arguments: Vec<Type>,
}

impl Type {
    /// 单个名字的类型，不带泛型参数
    pub fn named(name: impl Into<String>) -> Self {
        Type::Named(vec![TypeSegment {
            name: name.into(),
            generic_arguments: Vec::new(),
        }])
    }
}

fn join(types: &[Type]) -> String {
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for TypeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generic_arguments.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}<{}>", self.name, join(&self.generic_arguments))
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(segments) => {
                let names: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
                f.write_str(&names.join("."))
            }
            Type::Array(element) => write!(f, "[{}]", element),
            Type::Dictionary(key, value) => write!(f, "[{}: {}]", key, value),
            Type::Optional(wrapped) => write!(f, "{}?", wrapped),
            Type::ImplicitlyUnwrappedOptional(wrapped) => write!(f, "{}!", wrapped),
            Type::Tuple(elements) => write!(f, "({})", join(elements)),
            Type::Function {
                parameters,
                throws,
                result,
            } => {
                write!(f, "({})", join(parameters))?;
                if *throws {
                    f.write_str(" throws")?;
                }
                write!(f, " -> {}", result)
            }
        }
    }
}
