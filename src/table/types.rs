use serde::{Deserialize, Serialize};

use super::models::{GameKind, ScoreGrid};

/// Query string for listing tables of one game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableListQuery {
    pub game: GameKind,
}

/// Request body for creating a table. Omitted players fall back to the regular group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableCreateRequest {
    pub name: String,
    pub game: GameKind,
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub scores: Option<ScoreGrid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoresUpdateRequest {
    pub scores: ScoreGrid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    #[test]
    fn test_create_request_defaults_optional_fields() {
        let request: TableCreateRequest =
            serde_json::from_str(r#"{"name": "Friday", "game": "SevenCards"}"#).unwrap();
        assert_eq!(request.game, GameKind::SevenCards);
        assert!(request.players.is_none());
        assert!(request.scores.is_none());
    }

    #[test]
    fn test_scores_request_accepts_text_cells() {
        let request: ScoresUpdateRequest =
            serde_json::from_str(r#"{"scores": [["1", ""], [2, null]]}"#).unwrap();
        assert_eq!(
            request.scores,
            vec![
                vec![Cell::Numeric(1), Cell::Empty],
                vec![Cell::Numeric(2), Cell::Empty]
            ]
        );
    }
}
