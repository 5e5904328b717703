//! Path-addressed access to JSON-like trees
//!
//! Paths are dotted field names with optional sequence indices, e.g.
//! `salaries[0].taxDetails[1].amount`. They are parsed once into a typed
//! [`Path`] and then walked by [`read`] and [`write`].
//!
//! Copyright (c) 2025 Tartan Team
//! Licensed under the Apache-2.0 license

pub mod accessor;
pub mod ast;
pub mod error;
pub mod parser;


pub use accessor::{exists, read, read_owned, write};
pub use ast::{Path, Segment, MAX_INDEX};
pub use error::PathError;
pub use parser::{parse, Parser};

use crate::Tree;

/// Parse `path` and read it from `tree` in one step
pub fn select<'a>(path: &str, tree: &'a Tree) -> Result<Option<&'a Tree>, PathError> {
    let path = parse(path)?;
    Ok(read(tree, &path))
}

/// Parse `path` and write `value` into `tree` in one step
pub fn assign(path: &str, tree: &mut Tree, value: Tree) -> Result<(), PathError> {
    let path = parse(path)?;
    write(tree, &path, value);
    Ok(())
}
