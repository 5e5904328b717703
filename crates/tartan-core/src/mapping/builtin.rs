//! Mapping tables shipped with the crate
//!
//! The ADP employee table rewrites ADP Workforce employee records into the
//! unified employee schema.

use super::table::MappingTable;
use crate::{Error, Result, Tree};

/// Name of the built-in ADP employee table
pub const ADP_EMPLOYEE: &str = "adp-employee";

/// Names accepted by [`lookup`]
pub const BUILTIN_TABLES: &[&str] = &[ADP_EMPLOYEE];

const ADP_EMPLOYEE_JSON: &str = include_str!("../../mappings/adp_employee.json");

/// The ADP employee to unified employee table
pub fn adp_employee_table() -> Result<MappingTable> {
    MappingTable::from_json_str(ADP_EMPLOYEE_JSON)
}

/// Resolve a built-in table by name
pub fn lookup(name: &str) -> Result<MappingTable> {
    match name {
        ADP_EMPLOYEE => adp_employee_table(),
        _ => Err(Error::UnknownTable {
            name: name.to_string(),
            available: BUILTIN_TABLES.join(", "),
        }),
    }
}

/// The provider-side identifier of a source record (`id`), if it has one
pub fn record_id(source: &Tree) -> Option<&str> {
    source.get("id").and_then(Tree::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_adp_table_is_valid() {
        let table = adp_employee_table().unwrap();
        assert_eq!(table.name.as_deref(), Some(ADP_EMPLOYEE));
        assert_eq!(table.len(), 28);
        table.validate().unwrap();
    }

    #[test]
    fn test_adp_table_destinations_are_unique() {
        let table = adp_employee_table().unwrap();
        let mut destinations: Vec<&str> = table.entries.iter().map(|e| e.destination.as_str()).collect();
        destinations.sort_unstable();
        destinations.dedup();
        assert_eq!(destinations.len(), table.len());
    }

    #[test]
    fn test_lookup() {
        assert!(lookup("adp-employee").is_ok());
        match lookup("workday") {
            Err(Error::UnknownTable { name, available }) => {
                assert_eq!(name, "workday");
                assert_eq!(available, "adp-employee");
            }
            other => panic!("Expected unknown table error, got {:?}", other),
        }
    }

    #[test]
    fn test_record_id() {
        assert_eq!(record_id(&json!({"id": "adp-1001"})), Some("adp-1001"));
        assert_eq!(record_id(&json!({"id": 1001})), None);
        assert_eq!(record_id(&json!({})), None);
        assert_eq!(record_id(&json!(["id"])), None);
    }
}
