//! AST dump
//!
//! 缩进嵌套的文本形式，快照测试直接比对字符串，所以这里的
//! 固定文本 (标签、`<range>`、`&lt;empty&gt;`) 属于兼容面，不要随意改。

mod decl;
mod expr;
mod stmt;

use crate::ast::{Node, TopLevelDeclaration};
use crate::source::SourceRange;

/// 空列表标记
pub const EMPTY: &str = "&lt;empty&gt;";

/// 每级缩进
pub const INDENT: &str = "  ";

/// 能输出终端 dump 的节点
pub trait TtyDump {
    fn tty_dump(&self) -> String;
}

/// 节点头: `(tag) <range>1:1-1:9</range>`
pub fn head(tag: &str, range: SourceRange) -> String {
    format!("({}) <range>{}</range>", tag, range)
}

/// 每一行前加一级缩进
pub fn indented(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("{}{}", INDENT, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `label:` 后跟编号子项；没有子项时输出空标记
fn list<T>(label: &str, items: &[T], mut item: impl FnMut(usize, &T) -> String) -> String {
    if items.is_empty() {
        return format!("{}: {}", label, EMPTY);
    }
    let mut out = format!("{}:", label);
    for (index, each) in items.iter().enumerate() {
        out.push('\n');
        out.push_str(&indented(&item(index, each)));
    }
    out
}

fn join_lines(parts: Vec<String>) -> String {
    parts.join("\n")
}

impl TtyDump for TopLevelDeclaration {
    fn tty_dump(&self) -> String {
        let head = head("top_level_decl", self.source_range());
        if self.declarations.is_empty() {
            return format!("{} {}", head, EMPTY);
        }
        let mut parts = vec![head];
        parts.extend(self.declarations.iter().map(|d| indented(&d.tty_dump())));
        join_lines(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceLocation;

    #[test]
    fn test_head_format() {
        let range = SourceRange::new(SourceLocation::new(1, 1), SourceLocation::new(1, 9));
        assert_eq!(head("import_decl", range), "(import_decl) <range>1:1-1:9</range>");
    }

    #[test]
    fn test_indented_applies_to_every_line() {
        assert_eq!(indented("a\nb"), "  a\n  b");
    }

    #[test]
    fn test_empty_list_marker() {
        let none: Vec<u8> = Vec::new();
        assert_eq!(list("cases", &none, |_, _| String::new()), "cases: &lt;empty&gt;");
        assert_eq!(
            list("cases", &[7u8], |i, v| format!("{}: {}", i, v)),
            "cases:\n  0: 7"
        );
    }
}
