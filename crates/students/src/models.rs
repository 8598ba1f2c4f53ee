use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Student {
    pub id: i64,
    pub name: String,
    /// Owning side of the one-to-one card association; None means the
    /// student has no card.
    pub card_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdateStudentRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct AssignCardRequest {
    pub card_id: i64,
}
