//! Identifier normalization and owner-qualified table references
//!
//! Every comparison in the engine goes through [`normalize_identifier`]:
//! names coming from the introspection source and names typed by the user
//! are compared only in their canonical form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonicalize a raw identifier: drop every whitespace character and
/// upper-case the rest.
///
/// Total and idempotent; `""` normalizes to `""`.
///
/// ```
/// use dictlens_core::normalize_identifier;
///
/// assert_eq!(normalize_identifier("  hr . employees "), "HR.EMPLOYEES");
/// assert_eq!(normalize_identifier(""), "");
/// ```
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Split a raw identifier into owner and name on its last `.`
///
/// The input is normalized first. Without a dot the owner is empty.
pub fn split_owner_and_name(raw: &str) -> TableReference {
    let normalized = normalize_identifier(raw);

    match normalized.rfind('.') {
        Some(dot) => TableReference {
            owner: normalized[..dot].to_string(),
            name: normalized[dot + 1..].to_string(),
        },
        None => TableReference {
            owner: String::new(),
            name: normalized,
        },
    }
}

/// Join an owner and a name as `OWNER.NAME`, or just `NAME` when the
/// owner is empty. Both parts are normalized.
pub fn qualify(owner: &str, name: &str) -> String {
    let owner = normalize_identifier(owner);
    let name = normalize_identifier(name);

    if owner.is_empty() {
        name
    } else {
        format!("{}.{}", owner, name)
    }
}

/// A table reference as typed by the user, already normalized
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableReference {
    /// Schema owner (empty when unqualified)
    pub owner: String,

    /// Table name
    pub name: String,
}

impl TableReference {
    /// Parse a raw reference (see [`split_owner_and_name`])
    pub fn parse(raw: &str) -> Self {
        split_owner_and_name(raw)
    }

    /// True when no table name is present
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// True when the reference carries an owner
    pub fn has_owner(&self) -> bool {
        !self.owner.is_empty()
    }

    /// Check a `(table_owner, table_name)` pair against this reference.
    ///
    /// Names must be equal once normalized. Owners only reject the match
    /// when both sides specify one and they differ.
    pub fn matches(&self, table_owner: &str, table_name: &str) -> bool {
        if self.name.is_empty() {
            return false;
        }

        let entry_name = normalize_identifier(table_name);
        if entry_name.is_empty() || entry_name != self.name {
            return false;
        }

        let entry_owner = normalize_identifier(table_owner);
        if self.has_owner() && !entry_owner.is_empty() {
            return entry_owner == self.owner;
        }

        true
    }
}

impl fmt::Display for TableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.owner.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.owner, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_whitespace_and_uppercases() {
        assert_eq!(normalize_identifier("cust omers"), "CUSTOMERS");
        assert_eq!(normalize_identifier("\tOrders\n"), "ORDERS");
        assert_eq!(normalize_identifier("   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["hr.employees", " a b\tc ", "", "ÄbC", "x.y.z"] {
            let once = normalize_identifier(raw);
            assert_eq!(normalize_identifier(&once), once);
            assert!(!once.chars().any(char::is_whitespace));
            assert_eq!(once.to_uppercase(), once);
        }
    }

    #[test]
    fn split_qualified_reference() {
        let reference = split_owner_and_name("hr.employees");
        assert_eq!(reference.owner, "HR");
        assert_eq!(reference.name, "EMPLOYEES");
    }

    #[test]
    fn split_unqualified_reference() {
        let reference = split_owner_and_name("employees");
        assert_eq!(reference.owner, "");
        assert_eq!(reference.name, "EMPLOYEES");
    }

    #[test]
    fn split_uses_last_dot() {
        let reference = split_owner_and_name("db.hr.employees");
        assert_eq!(reference.owner, "DB.HR");
        assert_eq!(reference.name, "EMPLOYEES");
    }

    #[test]
    fn split_empty_input() {
        let reference = split_owner_and_name("  ");
        assert!(reference.is_empty());
        assert!(!reference.has_owner());
    }

    #[test]
    fn qualify_with_and_without_owner() {
        assert_eq!(qualify("app", "pk_orders"), "APP.PK_ORDERS");
        assert_eq!(qualify("", "pk_orders"), "PK_ORDERS");
    }

    #[test]
    fn owner_rule() {
        let qualified = TableReference::parse("app.orders");
        assert!(qualified.matches("APP", "orders"));
        assert!(qualified.matches("", "ORDERS"));
        assert!(!qualified.matches("LEGACY", "ORDERS"));
        assert!(!qualified.matches("APP", "ORDERS_ARCHIVE"));

        let bare = TableReference::parse("orders");
        assert!(bare.matches("LEGACY", "ORDERS"));
        assert!(!TableReference::default().matches("", ""));
    }

    #[test]
    fn display_round_trips_qualified_form() {
        assert_eq!(TableReference::parse(" app . orders ").to_string(), "APP.ORDERS");
        assert_eq!(TableReference::parse("orders").to_string(), "ORDERS");
    }
}
