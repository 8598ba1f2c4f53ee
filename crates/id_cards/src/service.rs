use crate::models::{CardHolder, CreateIdCardRequest, IdCard, UpdateIdCardRequest};
use crate::repository::IdCardRepository;
use database::{Database, RepositoryError};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum IdCardError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    Infrastructure(String),
    #[error("Card not found")]
    NotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for IdCardError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => IdCardError::NotFound,
            RepositoryError::UniqueViolation(msg) => IdCardError::Conflict(msg),
            RepositoryError::Infrastructure(e) => IdCardError::Infrastructure(e.to_string()),
            _ => IdCardError::Infrastructure(err.to_string()),
        }
    }
}

pub struct IdCardService;

impl IdCardService {
    #[instrument(skip(db))]
    pub async fn issue_card(db: &Database, is_active: bool) -> Result<i64, IdCardError> {
        let req = CreateIdCardRequest { is_active };

        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = IdCardRepository::new(uow.connection());

        let id = repo.create(&req).await?;

        uow.commit().await.map_err(RepositoryError::from)?;

        tracing::debug!("issued {}", IdCard { id, is_active });
        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn get_card(db: &Database, id: i64) -> Result<IdCard, IdCardError> {
        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = IdCardRepository::new(uow.connection());

        let card = repo.find_by_id(id).await?.ok_or(IdCardError::NotFound)?;
        Ok(card)
    }

    #[instrument(skip(db))]
    pub async fn list_cards(db: &Database) -> Result<Vec<IdCard>, IdCardError> {
        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = IdCardRepository::new(uow.connection());

        let cards = repo.list().await?;
        Ok(cards)
    }

    #[instrument(skip(db))]
    pub async fn list_active_cards(db: &Database) -> Result<Vec<IdCard>, IdCardError> {
        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = IdCardRepository::new(uow.connection());

        let cards = repo.list_active().await?;
        Ok(cards)
    }

    #[instrument(skip(db))]
    pub async fn set_card_state(db: &Database, id: i64, is_active: bool) -> Result<(), IdCardError> {
        let req = UpdateIdCardRequest { is_active };

        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = IdCardRepository::new(uow.connection());

        repo.update(id, &req).await?;

        uow.commit().await.map_err(RepositoryError::from)?;
        Ok(())
    }

    /// Resolves the owning side of the association. Returns None for a
    /// card nobody holds; NotFound only if the card itself is missing.
    #[instrument(skip(db))]
    pub async fn get_holder(db: &Database, id: i64) -> Result<Option<CardHolder>, IdCardError> {
        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = IdCardRepository::new(uow.connection());

        repo.find_by_id(id).await?.ok_or(IdCardError::NotFound)?;

        let holder = repo.find_holder(id).await?;
        Ok(holder)
    }

    #[instrument(skip(db))]
    pub async fn revoke_card(db: &Database, id: i64) -> Result<(), IdCardError> {
        let mut uow = db.begin().await.map_err(RepositoryError::from)?;
        let mut repo = IdCardRepository::new(uow.connection());

        repo.delete(id).await.map_err(|err| match err {
            RepositoryError::ForeignKeyViolation(_) => {
                IdCardError::Conflict("Card is still assigned to a student".into())
            }
            other => other.into(),
        })?;

        uow.commit().await.map_err(RepositoryError::from)?;
        Ok(())
    }
}
