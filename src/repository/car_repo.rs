use chrono::Utc;
use sqlx::SqlitePool;

use super::errors::RepositoryError;
use crate::constants::API_NAME;
use crate::models::{Car, CarPatch, NewCar};

/// Storage accessor for the `cars` table.
///
/// Every mutating call has committed to the database by the time it returns.
#[derive(Clone)]
pub struct CarRepository {
    pool: SqlitePool,
}

impl CarRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(
            "SELECT id, description, cylinders, make, model, year, owner, image, date_created FROM cars ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(
            "SELECT id, description, cylinders, make, model, year, owner, image, date_created FROM cars WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Car, RepositoryError> {
        self.find_by_id(id)
            .await?
            .ok_or(RepositoryError::NotFound(id))
    }

    /// Inserts a new row. The id comes from the table's autoincrement counter
    /// and `date_created` from the UTC clock at insert time.
    pub async fn create(&self, new_car: &NewCar) -> Result<Car, sqlx::Error> {
        let date_created = Utc::now().naive_utc();

        let car = sqlx::query_as::<_, Car>(
            "INSERT INTO cars (description, cylinders, make, model, year, owner, image, date_created)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id, description, cylinders, make, model, year, owner, image, date_created",
        )
        .bind(&new_car.description)
        .bind(new_car.cylinders)
        .bind(&new_car.make)
        .bind(&new_car.model)
        .bind(new_car.year)
        .bind(&new_car.owner)
        .bind(&new_car.image)
        .bind(date_created)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("{} Created car {}: {}", API_NAME, car.id, car);
        Ok(car)
    }

    pub async fn update(&self, id: i64, patch: &CarPatch) -> Result<Car, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut car = sqlx::query_as::<_, Car>(
            "SELECT id, description, cylinders, make, model, year, owner, image, date_created FROM cars WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound(id))?;

        car.apply(patch);

        sqlx::query(
            "UPDATE cars SET description = ?, cylinders = ?, make = ?, model = ?, year = ?, owner = ?, image = ?
             WHERE id = ?",
        )
        .bind(&car.description)
        .bind(car.cylinders)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(&car.owner)
        .bind(&car.image)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("{} Updated car {}: {}", API_NAME, car.id, car);
        Ok(car)
    }

    pub async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        tracing::info!("{} Deleted car {}", API_NAME, id);
        Ok(())
    }
}
