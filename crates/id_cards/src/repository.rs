use crate::models::{CardHolder, CreateIdCardRequest, IdCard, UpdateIdCardRequest};
use database::{self, RepositoryError};
use sqlx::FromRow;

#[derive(FromRow)]
struct IdCardRecord {
    id: i64,
    is_active: bool,
}

impl From<IdCardRecord> for IdCard {
    fn from(record: IdCardRecord) -> Self {
        IdCard {
            id: record.id,
            is_active: record.is_active,
        }
    }
}

#[derive(FromRow)]
struct CardHolderRecord {
    student_id: i64,
    name: String,
}

impl From<CardHolderRecord> for CardHolder {
    fn from(record: CardHolderRecord) -> Self {
        CardHolder {
            student_id: record.student_id,
            name: record.name,
        }
    }
}

pub(crate) struct IdCardRepository<'a> {
    conn: &'a mut database::Connection,
}

impl<'a> IdCardRepository<'a> {
    pub fn new(conn: &'a mut database::Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&mut self, req: &CreateIdCardRequest) -> Result<i64, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO id_cards (is_active) VALUES ($1) RETURNING id",
        )
        .bind(req.is_active)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    pub async fn list(&mut self) -> Result<Vec<IdCard>, RepositoryError> {
        let records = sqlx::query_as::<_, IdCardRecord>(
            "SELECT id, is_active FROM id_cards ORDER BY id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub async fn list_active(&mut self) -> Result<Vec<IdCard>, RepositoryError> {
        let records = sqlx::query_as::<_, IdCardRecord>(
            "SELECT id, is_active FROM id_cards WHERE is_active = 1 ORDER BY id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub async fn update(&mut self, id: i64, req: &UpdateIdCardRequest) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE id_cards SET is_active = $1 WHERE id = $2",
        )
        .bind(req.is_active)
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<IdCard>, RepositoryError> {
        let record = sqlx::query_as::<_, IdCardRecord>(
            "SELECT id, is_active FROM id_cards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    /// Non-owning side of the student/card association: the foreign key
    /// lives on the students table, so the holder is a lookup.
    pub async fn find_holder(&mut self, card_id: i64) -> Result<Option<CardHolder>, RepositoryError> {
        let record = sqlx::query_as::<_, CardHolderRecord>(
            "SELECT id AS student_id, name FROM students WHERE card_id = $1",
        )
        .bind(card_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM id_cards WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
