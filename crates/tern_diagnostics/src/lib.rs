//! Tern Diagnostics
//!
//! 前端共用的诊断模型：解析器只负责收集，不负责渲染。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 诊断信息主体（级别 + 消息 + 错误码 + 位置）
//! - [`DiagnosticLevel`] - 诊断级别（Error/Warning/Note）
//! - [`DiagnosticSink`] - 诊断收集器，按发现顺序追加
//! - [`Span`] - 源码字节范围
//!
//! # 示例
//!
//! ```rust
//! use tern_diagnostics::{Diagnostic, DiagnosticSink};
//!
//! let mut sink = DiagnosticSink::new();
//! sink.add(
//!     Diagnostic::error("Missing identifier.")
//!         .with_code("P0002")
//!         .span(7..8),
//! );
//!
//! assert!(sink.has_errors());
//! assert_eq!(sink.messages(), vec!["Missing identifier.".to_string()]);
//! ```

pub mod diagnostic;
pub mod level;
pub mod sink;
pub mod span;

// 重新导出核心类型
pub use diagnostic::{Diagnostic, Suggestion};
pub use level::DiagnosticLevel;
pub use sink::DiagnosticSink;
pub use span::{Span, SpanExt};
