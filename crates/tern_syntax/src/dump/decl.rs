use super::{head, indented, join_lines, list, TtyDump};
use crate::ast::{Declaration, DeclarationKind, PatternInitializer, TypeDeclaration};

fn tag(kind: &DeclarationKind) -> &'static str {
    match kind {
        DeclarationKind::Import(_) => "import_decl",
        DeclarationKind::Constant(_) => "const_decl",
        DeclarationKind::Variable(_) => "var_decl",
        DeclarationKind::Typealias { .. } => "typealias_decl",
        DeclarationKind::Function(_) => "func_decl",
        DeclarationKind::Struct(_) => "struct_decl",
        DeclarationKind::Class(_) => "class_decl",
        DeclarationKind::Enum(_) => "enum_decl",
        DeclarationKind::Protocol(_) => "protocol_decl",
        DeclarationKind::Extension(_) => "ext_decl",
        DeclarationKind::EnumCase(_) => "enum_case_decl",
    }
}

fn dump_initializers(initializers: &[PatternInitializer]) -> String {
    list("initializers", initializers, |index, item| {
        let mut out = format!("{}: pattern: `{}`", index, item.pattern);
        if let Some(initializer) = &item.initializer {
            out.push('\n');
            out.push_str(&indented(&format!("initializer: {}", initializer.tty_dump())));
        }
        out
    })
}

fn dump_type_body(ty: &TypeDeclaration) -> Vec<String> {
    let mut parts = vec![format!("name: `{}`", ty.name)];
    if !ty.inherits.is_empty() {
        let names: Vec<String> = ty.inherits.iter().map(|t| t.to_string()).collect();
        parts.push(format!("inherits: `{}`", names.join(", ")));
    }
    parts.push(list("members", &ty.members, |index, member| {
        format!("{}:\n{}", index, indented(&member.tty_dump()))
    }));
    parts
}

impl TtyDump for Declaration {
    fn tty_dump(&self) -> String {
        let mut body = Vec::new();
        if !self.attributes.is_empty() {
            let names: Vec<String> = self.attributes.iter().map(|a| a.to_string()).collect();
            body.push(format!("attributes: `{}`", names.join(" ")));
        }
        if !self.modifiers.is_empty() {
            body.push(format!("modifiers: `{}`", self.modifiers.join(" ")));
        }

        match &self.kind {
            DeclarationKind::Import(import) => {
                body.push(format!("kind: `{}`", import.kind.name()));
                body.push(format!("import_path: `{}`", import.path()));
            }
            DeclarationKind::Constant(initializers) | DeclarationKind::Variable(initializers) => {
                body.push(dump_initializers(initializers));
            }
            DeclarationKind::Typealias { name, assignment } => {
                body.push(format!("name: `{}`", name));
                body.push(format!("assignment: `{}`", assignment));
            }
            DeclarationKind::Function(function) => {
                body.push(format!("name: `{}`", function.name));
                body.push(list("parameters", &function.parameters, |index, parameter| {
                    format!("{}: `{}`", index, parameter)
                }));
                if function.throws {
                    body.push("throws: `true`".to_string());
                }
                if let Some(result) = &function.result {
                    body.push(format!("result: `{}`", result));
                }
                if let Some(code) = &function.body {
                    body.push(code.tty_dump());
                }
            }
            DeclarationKind::Struct(ty)
            | DeclarationKind::Class(ty)
            | DeclarationKind::Enum(ty)
            | DeclarationKind::Protocol(ty)
            | DeclarationKind::Extension(ty) => body.extend(dump_type_body(ty)),
            DeclarationKind::EnumCase(names) => {
                body.push(format!("names: `{}`", names.join(", ")));
            }
        }

        let mut parts = vec![head(tag(&self.kind), self.range)];
        parts.extend(body.iter().map(|line| indented(line)));
        join_lines(parts)
    }
}
