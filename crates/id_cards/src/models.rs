use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct IdCard {
    pub id: i64,
    pub is_active: bool,
}

impl fmt::Display for IdCard {
    // Deliberately leaves out the holder so logging a card never drags
    // the student row along with it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdCard{{id={}, is_active={}}}", self.id, self.is_active)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateIdCardRequest {
    /// New cards are inactive until activated explicitly.
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct UpdateIdCardRequest {
    pub is_active: bool,
}

/// The student currently holding a card, resolved through the
/// `students.card_id` foreign key. The card row never stores this.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CardHolder {
    pub student_id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_round_trip() {
        let mut card = IdCard { id: 0, is_active: false };
        card.id = 7;
        card.is_active = true;
        assert_eq!(card.id, 7);
        assert!(card.is_active);
    }

    #[test]
    fn test_display_shows_literal_field_values() {
        let card = IdCard { id: 7, is_active: true };
        assert_eq!(card.to_string(), "IdCard{id=7, is_active=true}");

        let card = IdCard { id: 42, is_active: false };
        assert_eq!(card.to_string(), "IdCard{id=42, is_active=false}");
    }

    #[test]
    fn test_create_request_defaults_to_inactive() {
        let req: CreateIdCardRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.is_active);
    }
}
