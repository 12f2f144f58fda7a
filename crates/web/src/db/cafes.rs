//! Café repository for database operations.

use sqlx::SqlitePool;

use cuppa_core::CafeId;

use super::RepositoryError;
use crate::models::{Cafe, CafeDraft};

const CAFE_COLUMNS: &str = "id, name, map_url, img_url, location, has_sockets, has_toilet, \
                            has_wifi, can_take_calls, seats, coffee_price";

/// Repository for café database operations.
pub struct CafeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CafeRepository<'a> {
    /// Create a new café repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all cafés in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Cafe>, RepositoryError> {
        let cafes = sqlx::query_as::<_, Cafe>(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafes ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(cafes)
    }

    /// Get a café by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CafeId) -> Result<Option<Cafe>, RepositoryError> {
        let cafe = sqlx::query_as::<_, Cafe>(&format!(
            "SELECT {CAFE_COLUMNS} FROM cafes WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(cafe)
    }

    /// Create a new café, assigning its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, draft: &CafeDraft) -> Result<Cafe, RepositoryError> {
        let cafe = sqlx::query_as::<_, Cafe>(&format!(
            "INSERT INTO cafes (name, map_url, img_url, location, has_sockets, has_toilet, \
             has_wifi, can_take_calls, seats, coffee_price) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
             RETURNING {CAFE_COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.map_url)
        .bind(&draft.img_url)
        .bind(&draft.location)
        .bind(draft.has_sockets)
        .bind(draft.has_toilet)
        .bind(draft.has_wifi)
        .bind(draft.can_take_calls)
        .bind(draft.seats)
        .bind(draft.coffee_price)
        .fetch_one(self.pool)
        .await
        .map_err(conflict_on_unique("a café with this name already exists"))?;

        Ok(cafe)
    }

    /// Update a café in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the café doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new name collides.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: CafeId, draft: &CafeDraft) -> Result<Cafe, RepositoryError> {
        let cafe = sqlx::query_as::<_, Cafe>(&format!(
            "UPDATE cafes SET name = ?1, map_url = ?2, img_url = ?3, location = ?4, \
             has_sockets = ?5, has_toilet = ?6, has_wifi = ?7, can_take_calls = ?8, \
             seats = ?9, coffee_price = ?10 \
             WHERE id = ?11 \
             RETURNING {CAFE_COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.map_url)
        .bind(&draft.img_url)
        .bind(&draft.location)
        .bind(draft.has_sockets)
        .bind(draft.has_toilet)
        .bind(draft.has_wifi)
        .bind(draft.can_take_calls)
        .bind(draft.seats)
        .bind(draft.coffee_price)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(conflict_on_unique("a café with this name already exists"))?;

        cafe.ok_or(RepositoryError::NotFound)
    }

    /// Delete a café permanently.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the café doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CafeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cafes WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Map a unique-index violation to `Conflict`, everything else to `Database`.
pub(crate) fn conflict_on_unique(
    message: &'static str,
) -> impl Fn(sqlx::Error) -> RepositoryError {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return RepositoryError::Conflict(message.to_owned());
        }
        RepositoryError::Database(e)
    }
}
