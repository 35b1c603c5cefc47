//! Storage access for the sellers table.
//!
//! Books are persisted as a JSON document in the seller row; mapping
//! between the stored record and the wire schemas is explicit.

use anyhow::Context;
use sqlx::{FromRow, SqlitePool};

use super::models::{NewSeller, SellerRead, SellerUpdate};

const RETURNING_COLUMNS: &str = "id, first_name, last_name, email, password, books_for_sale";

/// Seller row as stored in SQLite.
#[derive(Debug, Clone, FromRow)]
pub struct SellerRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub books_for_sale: String,
}

impl SellerRecord {
    /// Map the stored row into the wire representation.
    pub fn into_read(self) -> anyhow::Result<SellerRead> {
        let books = serde_json::from_str(&self.books_for_sale)
            .with_context(|| format!("corrupt books_for_sale document for seller {}", self.id))?;

        Ok(SellerRead {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            books_for_sale: books,
        })
    }
}

/// Insert a new seller and return the stored row with its assigned id.
pub async fn insert(pool: &SqlitePool, seller: &NewSeller) -> anyhow::Result<SellerRecord> {
    let books = serde_json::to_string(&seller.books_for_sale)
        .context("failed to encode books_for_sale")?;

    let record = sqlx::query_as::<_, SellerRecord>(&format!(
        "INSERT INTO sellers (first_name, last_name, email, password, books_for_sale)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING {RETURNING_COLUMNS}"
    ))
    .bind(&seller.first_name)
    .bind(&seller.last_name)
    .bind(&seller.email)
    .bind(&seller.password)
    .bind(&books)
    .fetch_one(pool)
    .await
    .context("failed to insert seller")?;

    Ok(record)
}

/// Fetch all sellers in id order.
pub async fn list_all(pool: &SqlitePool) -> anyhow::Result<Vec<SellerRecord>> {
    let records = sqlx::query_as::<_, SellerRecord>(&format!(
        "SELECT {RETURNING_COLUMNS} FROM sellers ORDER BY id"
    ))
    .fetch_all(pool)
    .await
    .context("failed to list sellers")?;

    Ok(records)
}

/// Fetch one seller by primary key.
pub async fn find(pool: &SqlitePool, id: i64) -> anyhow::Result<Option<SellerRecord>> {
    let record = sqlx::query_as::<_, SellerRecord>(&format!(
        "SELECT {RETURNING_COLUMNS} FROM sellers WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("failed to fetch seller {id}"))?;

    Ok(record)
}

/// Overwrite a seller's mutable fields, leaving `password` untouched.
///
/// Returns the updated row, or `None` when no row matched the id.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    new_data: &SellerUpdate,
) -> anyhow::Result<Option<SellerRecord>> {
    let books = serde_json::to_string(&new_data.books_for_sale)
        .context("failed to encode books_for_sale")?;

    let record = sqlx::query_as::<_, SellerRecord>(&format!(
        "UPDATE sellers
         SET first_name = ?1, last_name = ?2, email = ?3, books_for_sale = ?4
         WHERE id = ?5
         RETURNING {RETURNING_COLUMNS}"
    ))
    .bind(&new_data.first_name)
    .bind(&new_data.last_name)
    .bind(&new_data.email)
    .bind(&books)
    .bind(id)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("failed to update seller {id}"))?;

    Ok(record)
}

/// Delete a seller by primary key. Deleting a missing id is a no-op.
pub async fn delete(pool: &SqlitePool, id: i64) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM sellers WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await
        .with_context(|| format!("failed to delete seller {id}"))?;

    Ok(())
}
