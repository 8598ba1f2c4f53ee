use crate::models::{CreateStudentRequest, Student, UpdateStudentRequest};
use database::{self, RepositoryError};
use sqlx::FromRow;

#[derive(FromRow)]
struct StudentRecord {
    id: i64,
    name: String,
    card_id: Option<i64>,
}

impl From<StudentRecord> for Student {
    fn from(record: StudentRecord) -> Self {
        Student {
            id: record.id,
            name: record.name,
            card_id: record.card_id,
        }
    }
}

pub(crate) struct StudentRepository<'a> {
    conn: &'a mut database::Connection,
}

impl<'a> StudentRepository<'a> {
    pub fn new(conn: &'a mut database::Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&mut self, req: &CreateStudentRequest) -> Result<i64, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO students (name) VALUES ($1) RETURNING id",
        )
        .bind(&req.name)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(id)
    }

    pub async fn list(&mut self) -> Result<Vec<Student>, RepositoryError> {
        let records = sqlx::query_as::<_, StudentRecord>(
            "SELECT id, name, card_id FROM students ORDER BY name",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<Student>, RepositoryError> {
        let record = sqlx::query_as::<_, StudentRecord>(
            "SELECT id, name, card_id FROM students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    pub async fn find_by_card(&mut self, card_id: i64) -> Result<Option<Student>, RepositoryError> {
        let record = sqlx::query_as::<_, StudentRecord>(
            "SELECT id, name, card_id FROM students WHERE card_id = $1",
        )
        .bind(card_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    pub async fn update(&mut self, id: i64, req: &UpdateStudentRequest) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE students SET name = $1 WHERE id = $2",
        )
        .bind(&req.name)
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Only writer of the association. The UNIQUE constraint on card_id
    /// keeps it one-to-one; a second assignment of the same card fails.
    pub async fn assign_card(&mut self, id: i64, card_id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE students SET card_id = $1 WHERE id = $2",
        )
        .bind(card_id)
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    pub async fn unassign_card(&mut self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE students SET card_id = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::get_test_db;

    async fn insert_card(conn: &mut database::Connection) -> i64 {
        sqlx::query_scalar("INSERT INTO id_cards (is_active) VALUES (1) RETURNING id")
            .fetch_one(&mut *conn)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_student() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = StudentRepository::new(uow.connection());

        let id = repo.create(&CreateStudentRequest { name: "Ada Lovelace".to_string() }).await.unwrap();
        assert!(id > 0);

        let student = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(student.name, "Ada Lovelace");
        assert_eq!(student.card_id, None);
    }

    #[tokio::test]
    async fn test_assign_card() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let card_id = insert_card(uow.connection()).await;

        let mut repo = StudentRepository::new(uow.connection());
        let id = repo.create(&CreateStudentRequest { name: "Grace Hopper".to_string() }).await.unwrap();

        repo.assign_card(id, card_id).await.unwrap();

        let student = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(student.card_id, Some(card_id));

        let by_card = repo.find_by_card(card_id).await.unwrap().unwrap();
        assert_eq!(by_card.id, id);
    }

    #[tokio::test]
    async fn test_assign_card_twice_violates_cardinality() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let card_id = insert_card(uow.connection()).await;

        let mut repo = StudentRepository::new(uow.connection());
        let first = repo.create(&CreateStudentRequest { name: "First".to_string() }).await.unwrap();
        let second = repo.create(&CreateStudentRequest { name: "Second".to_string() }).await.unwrap();

        repo.assign_card(first, card_id).await.unwrap();

        let result = repo.assign_card(second, card_id).await;
        assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));
    }

    #[tokio::test]
    async fn test_assign_missing_card() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = StudentRepository::new(uow.connection());

        let id = repo.create(&CreateStudentRequest { name: "No Card".to_string() }).await.unwrap();

        let result = repo.assign_card(id, 9999).await;
        assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));
    }

    #[tokio::test]
    async fn test_unassign_card() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let card_id = insert_card(uow.connection()).await;

        let mut repo = StudentRepository::new(uow.connection());
        let id = repo.create(&CreateStudentRequest { name: "Returner".to_string() }).await.unwrap();
        repo.assign_card(id, card_id).await.unwrap();

        repo.unassign_card(id).await.unwrap();

        let student = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(student.card_id, None);
        assert!(repo.find_by_card(card_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_student() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = StudentRepository::new(uow.connection());

        let id = repo.create(&CreateStudentRequest { name: "Old Name".to_string() }).await.unwrap();

        repo.update(id, &UpdateStudentRequest { name: "New Name".to_string() }).await.unwrap();

        let student = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(student.name, "New Name");
    }

    #[tokio::test]
    async fn test_delete_student() {
        let db = get_test_db().await;
        let mut uow = db.begin().await.unwrap();
        let mut repo = StudentRepository::new(uow.connection());

        let id = repo.create(&CreateStudentRequest { name: "To Be Deleted".to_string() }).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_some());

        repo.delete(id).await.unwrap();
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
