//! Batch transformation of many records with one table
//!
//! Records are independent of each other, so with the `parallel` feature
//! they are transformed on rayon's work-stealing pool. Results always come
//! back in input order.

use super::mapper::Mapper;
use super::report::Transformation;
use super::table::CompiledTable;
use crate::{Error, Result, Tree};
use serde_json::Value;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Transform every record with `table`, preserving input order
pub fn transform_batch(records: &[Tree], table: &CompiledTable) -> Vec<Transformation> {
    let mapper = Mapper::new(table);

    #[cfg(feature = "parallel")]
    {
        records.par_iter().map(|record| mapper.apply(record)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        records.iter().map(|record| mapper.apply(record)).collect()
    }
}

/// Split a decoded input document into records
///
/// An object is a single record and an array is a batch of records. Any
/// other value cannot be a record.
pub fn records_from_document(document: Tree) -> Result<Vec<Tree>> {
    match document {
        Value::Object(_) => Ok(vec![document]),
        Value::Array(records) => Ok(records),
        other => Err(Error::invalid_document(format!(
            "expected a record object or an array of records, found {}",
            match other {
                Value::Null => "null",
                Value::Bool(_) => "a boolean",
                Value::Number(_) => "a number",
                _ => "a string",
            }
        ))),
    }
}
