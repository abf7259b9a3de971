use super::*;

/// 只读遍历。默认实现递归访问所有子节点，覆盖某个方法后
/// 可以调用对应的 `walk_*` 继续向下。
pub trait Visitor {
    // 访问根
    fn visit_top_level(&mut self, root: &TopLevelDeclaration) {
        walk_top_level(self, root);
    }

    // 访问声明
    fn visit_declaration(&mut self, declaration: &Declaration) {
        walk_declaration(self, declaration);
    }

    // 访问语句
    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    // 访问表达式
    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression);
    }

    // 访问模式
    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }
}

pub fn walk_top_level<V: Visitor + ?Sized>(visitor: &mut V, root: &TopLevelDeclaration) {
    for declaration in &root.declarations {
        visitor.visit_declaration(declaration);
    }
}

pub fn walk_code_block<V: Visitor + ?Sized>(visitor: &mut V, block: &CodeBlock) {
    for statement in &block.statements {
        visitor.visit_statement(statement);
    }
}

fn walk_pattern_initializers<V: Visitor + ?Sized>(visitor: &mut V, list: &[PatternInitializer]) {
    for item in list {
        visitor.visit_pattern(&item.pattern);
        if let Some(initializer) = &item.initializer {
            visitor.visit_expression(initializer);
        }
    }
}

pub fn walk_declaration<V: Visitor + ?Sized>(visitor: &mut V, declaration: &Declaration) {
    match &declaration.kind {
        DeclarationKind::Import(_)
        | DeclarationKind::Typealias { .. }
        | DeclarationKind::EnumCase(_) => {}
        DeclarationKind::Constant(list) | DeclarationKind::Variable(list) => {
            walk_pattern_initializers(visitor, list);
        }
        DeclarationKind::Function(function) => {
            for parameter in &function.parameters {
                if let Some(default) = &parameter.default_argument {
                    visitor.visit_expression(default);
                }
            }
            if let Some(body) = &function.body {
                walk_code_block(visitor, body);
            }
        }
        DeclarationKind::Struct(ty)
        | DeclarationKind::Class(ty)
        | DeclarationKind::Enum(ty)
        | DeclarationKind::Protocol(ty)
        | DeclarationKind::Extension(ty) => {
            for member in &ty.members {
                visitor.visit_declaration(member);
            }
        }
    }
}

fn walk_conditions<V: Visitor + ?Sized>(visitor: &mut V, conditions: &[Condition]) {
    for condition in conditions {
        match condition {
            Condition::Expression(expression) => visitor.visit_expression(expression),
            Condition::Case(pattern, expression) => {
                visitor.visit_pattern(pattern);
                visitor.visit_expression(expression);
            }
            Condition::OptionalBinding {
                pattern,
                initializer,
                ..
            } => {
                visitor.visit_pattern(pattern);
                visitor.visit_expression(initializer);
            }
        }
    }
}

pub fn walk_statement<V: Visitor + ?Sized>(visitor: &mut V, statement: &Statement) {
    match &statement.kind {
        StatementKind::Break { .. }
        | StatementKind::Continue { .. }
        | StatementKind::CompilerControl(_)
        | StatementKind::Fallthrough => {}
        StatementKind::Declaration(declaration) => visitor.visit_declaration(declaration),
        StatementKind::Defer(body) => walk_code_block(visitor, body),
        StatementKind::Do { body, catches } => {
            walk_code_block(visitor, body);
            for clause in catches {
                if let Some(pattern) = &clause.pattern {
                    visitor.visit_pattern(pattern);
                }
                if let Some(where_clause) = &clause.where_clause {
                    visitor.visit_expression(where_clause);
                }
                walk_code_block(visitor, &clause.body);
            }
        }
        StatementKind::Expression(expression) | StatementKind::Throw(expression) => {
            visitor.visit_expression(expression)
        }
        StatementKind::ForIn {
            pattern,
            collection,
            where_clause,
            body,
            ..
        } => {
            visitor.visit_pattern(pattern);
            visitor.visit_expression(collection);
            if let Some(where_clause) = where_clause {
                visitor.visit_expression(where_clause);
            }
            walk_code_block(visitor, body);
        }
        StatementKind::Guard { conditions, body } | StatementKind::While { conditions, body } => {
            walk_conditions(visitor, conditions);
            walk_code_block(visitor, body);
        }
        StatementKind::If {
            conditions,
            body,
            else_clause,
        } => {
            walk_conditions(visitor, conditions);
            walk_code_block(visitor, body);
            match else_clause {
                Some(ElseClause::Else(block)) => walk_code_block(visitor, block),
                Some(ElseClause::ElseIf(statement)) => visitor.visit_statement(statement),
                None => {}
            }
        }
        StatementKind::Labeled { statement, .. } => visitor.visit_statement(statement),
        StatementKind::RepeatWhile { body, condition } => {
            walk_code_block(visitor, body);
            visitor.visit_expression(condition);
        }
        StatementKind::Return(value) => {
            if let Some(value) = value {
                visitor.visit_expression(value);
            }
        }
        StatementKind::Switch { expression, cases } => {
            visitor.visit_expression(expression);
            for case in cases {
                let statements = match case {
                    SwitchCase::Case { items, statements } => {
                        for item in items {
                            visitor.visit_pattern(&item.pattern);
                            if let Some(where_clause) = &item.where_clause {
                                visitor.visit_expression(where_clause);
                            }
                        }
                        statements
                    }
                    SwitchCase::Default { statements } => statements,
                };
                for statement in statements {
                    visitor.visit_statement(statement);
                }
            }
        }
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expression: &Expression) {
    match &expression.kind {
        ExpressionKind::Identifier(_)
        | ExpressionKind::SelfExpression
        | ExpressionKind::ImplicitMember(_)
        | ExpressionKind::Wildcard => {}
        ExpressionKind::Literal(literal) => match literal {
            LiteralKind::Array(elements) => {
                for element in elements {
                    visitor.visit_expression(element);
                }
            }
            LiteralKind::Dictionary(entries) => {
                for (key, value) in entries {
                    visitor.visit_expression(key);
                    visitor.visit_expression(value);
                }
            }
            _ => {}
        },
        ExpressionKind::Parenthesized(inner)
        | ExpressionKind::ForcedValue(inner)
        | ExpressionKind::Prefix { operand: inner, .. }
        | ExpressionKind::Try {
            expression: inner, ..
        }
        | ExpressionKind::ExplicitMember { base: inner, .. } => visitor.visit_expression(inner),
        ExpressionKind::Tuple(arguments) => {
            for argument in arguments {
                visitor.visit_expression(&argument.expression);
            }
        }
        ExpressionKind::Binary { lhs, rhs, .. } | ExpressionKind::Assignment { lhs, rhs } => {
            visitor.visit_expression(lhs);
            visitor.visit_expression(rhs);
        }
        ExpressionKind::FunctionCall {
            callee: base,
            arguments,
        }
        | ExpressionKind::Subscript { base, arguments } => {
            visitor.visit_expression(base);
            for argument in arguments {
                visitor.visit_expression(&argument.expression);
            }
        }
    }
}

pub fn walk_pattern<V: Visitor + ?Sized>(visitor: &mut V, pattern: &Pattern) {
    match &pattern.kind {
        PatternKind::Wildcard | PatternKind::Identifier(_) => {}
        PatternKind::ValueBinding { pattern: inner, .. }
        | PatternKind::Optional(inner)
        | PatternKind::TypeAnnotated { pattern: inner, .. } => visitor.visit_pattern(inner),
        PatternKind::Tuple(elements) => {
            for element in elements {
                visitor.visit_pattern(element);
            }
        }
        PatternKind::EnumCase { associated, .. } => {
            if let Some(associated) = associated {
                visitor.visit_pattern(associated);
            }
        }
        PatternKind::Expression(expression) => visitor.visit_expression(expression),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[derive(Default)]
    struct Counter {
        declarations: usize,
        statements: usize,
        identifiers: Vec<String>,
    }

    impl Visitor for Counter {
        fn visit_declaration(&mut self, declaration: &Declaration) {
            self.declarations += 1;
            walk_declaration(self, declaration);
        }

        fn visit_statement(&mut self, statement: &Statement) {
            self.statements += 1;
            walk_statement(self, statement);
        }

        fn visit_expression(&mut self, expression: &Expression) {
            if let ExpressionKind::Identifier(name) = &expression.kind {
                self.identifiers.push(name.clone());
            }
            walk_expression(self, expression);
        }
    }

    #[test]
    fn test_walk_reaches_nested_nodes() {
        let output = parse(
            "struct S {\n  func f() {\n    if a { g(b) }\n    let c = d\n  }\n}\n",
        );
        assert!(output.errors.is_empty(), "{:?}", output.messages());

        let mut counter = Counter::default();
        counter.visit_top_level(&output.root);

        // struct, func, let
        assert_eq!(counter.declarations, 3);
        // if, g(b), let
        assert_eq!(counter.statements, 3);
        assert_eq!(counter.identifiers, vec!["a", "g", "b", "d"]);
    }
}
