use crate::models::{CreateStudentRequest, Student, UpdateStudentRequest};
use crate::repository::StudentRepository;
use database::{Database, RepositoryError};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    Infrastructure(String),
    #[error("Student not found")]
    NotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for StudentError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => StudentError::NotFound,
            RepositoryError::UniqueViolation(msg) => StudentError::Conflict(msg),
            RepositoryError::Infrastructure(e) => StudentError::Infrastructure(e.to_string()),
            _ => StudentError::Infrastructure(err.to_string()),
        }
    }
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn enroll_student(db: &Database, name: String) -> Result<i64, StudentError> {
        if name.trim().is_empty() {
            return Err(StudentError::InvalidInput("Student name cannot be empty".into()));
        }

        let req = CreateStudentRequest { name: name.trim().to_string() };

        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = StudentRepository::new(uow.connection());

        let id = repo.create(&req).await?;

        uow.commit().await.map_err(RepositoryError::from)?;

        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn list_students(db: &Database) -> Result<Vec<Student>, StudentError> {
        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = StudentRepository::new(uow.connection());

        let students = repo.list().await?;
        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &Database, id: i64) -> Result<Student, StudentError> {
        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = StudentRepository::new(uow.connection());

        let student = repo.find_by_id(id).await?
            .ok_or(StudentError::NotFound)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn rename_student(db: &Database, id: i64, name: String) -> Result<(), StudentError> {
        if name.trim().is_empty() {
            return Err(StudentError::InvalidInput("Student name cannot be empty".into()));
        }

        let req = UpdateStudentRequest { name: name.trim().to_string() };

        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = StudentRepository::new(uow.connection());

        repo.update(id, &req).await?;

        uow.commit().await.map_err(RepositoryError::from)?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn assign_card(db: &Database, id: i64, card_id: i64) -> Result<(), StudentError> {
        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = StudentRepository::new(uow.connection());

        repo.assign_card(id, card_id).await.map_err(|err| match err {
            RepositoryError::UniqueViolation(_) => {
                StudentError::Conflict("Card is already assigned to another student".into())
            }
            RepositoryError::ForeignKeyViolation(_) => {
                StudentError::InvalidInput("Card does not exist".into())
            }
            other => other.into(),
        })?;

        uow.commit().await.map_err(RepositoryError::from)?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn unassign_card(db: &Database, id: i64) -> Result<(), StudentError> {
        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = StudentRepository::new(uow.connection());

        repo.unassign_card(id).await?;

        uow.commit().await.map_err(RepositoryError::from)?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &Database, id: i64) -> Result<(), StudentError> {
        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = StudentRepository::new(uow.connection());

        repo.delete(id).await?;

        uow.commit().await.map_err(RepositoryError::from)?;
        Ok(())
    }
}
