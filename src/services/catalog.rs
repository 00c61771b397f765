//! Units and items catalog
//!
//! The reference data invoices draw line items from: units of measurement
//! and the items priced in them.

use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::error::{BillerError, BillerResult};
use crate::models::{ItemId, Money, UnitId};

/// A billable item with its default rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub unit_id: Option<UnitId>,
    pub rate: Money,
}

/// Units and items in a year file
pub struct CatalogService<'a> {
    conn: &'a Connection,
}

impl<'a> CatalogService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Add a unit of measurement; names are unique
    pub fn add_unit(&self, name: &str) -> BillerResult<UnitId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BillerError::Validation("Unit name cannot be empty".into()));
        }

        self.conn
            .execute("INSERT INTO UnitOfMeasurement (Name) VALUES (?1)", [name])?;
        Ok(UnitId::new(self.conn.last_insert_rowid()))
    }

    /// Add an item with an optional unit and default rate
    pub fn add_item(
        &self,
        name: &str,
        unit_id: Option<UnitId>,
        rate: Money,
    ) -> BillerResult<ItemId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BillerError::Validation("Item name cannot be empty".into()));
        }
        if rate.is_negative() {
            return Err(BillerError::Validation("Item rate cannot be negative".into()));
        }

        self.conn.execute(
            "INSERT INTO Items (Name, UnitID, Rate) VALUES (?1, ?2, ?3)",
            params![name, unit_id, rate],
        )?;
        Ok(ItemId::new(self.conn.last_insert_rowid()))
    }

    /// Fetch an item by ID
    pub fn get_item(&self, id: ItemId) -> BillerResult<Item> {
        self.conn
            .query_row(
                "SELECT ID, Name, UnitID, Rate FROM Items WHERE ID = ?1",
                [id],
                |row| {
                    Ok(Item {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        unit_id: row.get(2)?,
                        rate: row.get(3)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| BillerError::NotFound {
                entity_type: "Item",
                identifier: id.to_string(),
            })
    }

    /// All items, ordered by name, with their unit names when set
    pub fn list_items(&self) -> BillerResult<Vec<(Item, Option<String>)>> {
        let mut stmt = self.conn.prepare(
            "SELECT I.ID, I.Name, I.UnitID, I.Rate, U.Name \
             FROM Items I LEFT JOIN UnitOfMeasurement U ON U.ID = I.UnitID \
             ORDER BY I.Name",
        )?;
        let items = stmt
            .query_map([], |row| {
                Ok((
                    Item {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        unit_id: row.get(2)?,
                        rate: row.get(3)?,
                    },
                    row.get(4)?,
                ))
            })?
            .collect::<Result<_, _>>()?;
        Ok(items)
    }
}
