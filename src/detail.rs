use log::{debug, error};

use crate::model::Recipe;
use crate::ExplorerError;

pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load recipe details.";

/// What the recipe overlay shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailState {
    #[default]
    Closed,
    Loading {
        id: String,
    },
    Loaded(Box<Recipe>),
    Failed {
        id: String,
        message: String,
    },
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DetailState::Closed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading { .. })
    }

    /// Id of the recipe the overlay is about, if open
    pub fn recipe_id(&self) -> Option<&str> {
        match self {
            DetailState::Closed => None,
            DetailState::Loading { id } | DetailState::Failed { id, .. } => Some(id.as_str()),
            DetailState::Loaded(recipe) => Some(recipe.id.as_str()),
        }
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match self {
            DetailState::Loaded(recipe) => Some(recipe.as_ref()),
            _ => None,
        }
    }
}

/// Issued by [`DetailOverlay::open`]; identifies one detail fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    seq: u64,
    id: String,
}

impl DetailTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Closed → Loading → Loaded/Failed → Closed.
///
/// A fetch only lands while the overlay is still loading the ticket it was
/// issued for, so closing or reselecting discards late answers.
#[derive(Debug, Clone, Default)]
pub struct DetailOverlay {
    state: DetailState,
    issued: u64,
    loading_seq: Option<u64>,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Show the overlay in its loading state right away
    pub fn open(&mut self, id: &str) -> DetailTicket {
        self.issued += 1;
        self.loading_seq = Some(self.issued);
        self.state = DetailState::Loading { id: id.to_string() };
        DetailTicket {
            seq: self.issued,
            id: id.to_string(),
        }
    }

    /// Returns `false` when the answer arrived too late to be shown
    pub fn resolve(
        &mut self,
        ticket: &DetailTicket,
        outcome: Result<Recipe, ExplorerError>,
    ) -> bool {
        if self.loading_seq != Some(ticket.seq) {
            debug!("Discarding detail for {} (overlay moved on)", ticket.id);
            return false;
        }

        self.loading_seq = None;
        self.state = match outcome {
            Ok(recipe) => DetailState::Loaded(Box::new(recipe)),
            Err(e) => {
                error!("Loading recipe {} failed: {}", ticket.id, e);
                DetailState::Failed {
                    id: ticket.id.clone(),
                    message: DETAIL_ERROR_MESSAGE.to_string(),
                }
            }
        };
        true
    }

    /// Clears id, detail and loading flag together
    pub fn close(&mut self) {
        self.loading_seq = None;
        self.state = DetailState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: format!("Chef Special #{}", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_then_load() {
        let mut overlay = DetailOverlay::new();
        assert!(!overlay.state().is_open());

        let ticket = overlay.open("1-3");
        assert!(overlay.state().is_loading());
        assert_eq!(overlay.state().recipe_id(), Some("1-3"));

        assert!(overlay.resolve(&ticket, Ok(recipe("1-3"))));
        let loaded = overlay.state().recipe().unwrap();
        assert!(loaded.title.contains("Special"));

        overlay.close();
        assert_eq!(overlay.state(), &DetailState::Closed);
    }

    #[test]
    fn test_close_before_arrival_discards_detail() {
        let mut overlay = DetailOverlay::new();
        let ticket = overlay.open("7");
        overlay.close();

        assert!(!overlay.resolve(&ticket, Ok(recipe("7"))));
        assert_eq!(overlay.state(), &DetailState::Closed);
    }

    #[test]
    fn test_reselect_discards_previous_fetch() {
        let mut overlay = DetailOverlay::new();
        let first = overlay.open("1");
        let second = overlay.open("2");

        assert!(!overlay.resolve(&first, Ok(recipe("1"))));
        assert!(overlay.state().is_loading());
        assert!(overlay.resolve(&second, Ok(recipe("2"))));
        assert_eq!(overlay.state().recipe_id(), Some("2"));
    }

    #[test]
    fn test_failure_is_visible() {
        let mut overlay = DetailOverlay::new();
        let ticket = overlay.open("404");
        assert!(overlay.resolve(&ticket, Err(ExplorerError::NotFound("404".to_string()))));

        assert_eq!(
            overlay.state(),
            &DetailState::Failed {
                id: "404".to_string(),
                message: DETAIL_ERROR_MESSAGE.to_string(),
            }
        );
        assert!(overlay.state().is_open());
    }

    #[test]
    fn test_second_resolve_is_ignored() {
        let mut overlay = DetailOverlay::new();
        let ticket = overlay.open("5");
        assert!(overlay.resolve(&ticket, Ok(recipe("5"))));
        assert!(!overlay.resolve(&ticket, Err(ExplorerError::Status(500))));
        assert!(overlay.state().recipe().is_some());
    }
}
