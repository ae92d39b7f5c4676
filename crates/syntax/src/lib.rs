//! Syntax layer for the MQTT service analyzer.
//!
//! The analyzer only needs a handful of Ballerina constructs: imports,
//! module-level `listener` declarations and `service` declarations with their
//! members. This crate recognizes exactly those and skips everything else by
//! balanced-delimiter scanning, producing an immutable arena [`SyntaxTree`].
//!
//! A [`SourceFile`] bundles the text, the tree and the [`LineIndex`] used to
//! convert byte offsets to editor positions and back.

mod error;
mod lexer;
mod line_index;
mod parser;
mod source_file;
mod tree;

pub use error::ParseError;
pub use lexer::{tokenize, Token, TokenKind};
pub use line_index::LineIndex;
pub use source_file::SourceFile;
pub use tree::{
    AttachPoint, ImportDecl, ListenerDecl, Member, NodeId, Param, ServiceDecl, SyntaxKind,
    SyntaxTree, TypeRef,
};

pub use mqtt_types::{LineRange, OffsetRange, Position};
