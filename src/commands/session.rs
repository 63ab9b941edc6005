use crate::commands::capabilities::{build_assistant_context, Assistant};
use crate::commands::ledger::ImpactLedger;
use crate::models::eco_score::Catalog;
use crate::models::history::LogOutcome;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Everything one user accumulates while using the app.
///
/// Passed explicitly to each operation; the catalog it reads from is shared
/// and read-only.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub ledger: ImpactLedger,
    pub conversation: Vec<ChatMessage>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            ledger: ImpactLedger::new(),
            conversation: Vec::new(),
        }
    }

    /// Log a catalog product by name. `None` if the catalog has no such product.
    pub fn log_product(&mut self, catalog: &Catalog, name: &str) -> Option<LogOutcome> {
        let product = catalog.get(name)?;
        let outcome = self.ledger.log_product(product);
        log::debug!("session {}: log {name} -> {outcome:?}", self.id);
        Some(outcome)
    }

    /// Ask the assistant about `product` (if given) with this session's history as context.
    ///
    /// The exchange is recorded only when the assistant answers.
    pub fn ask_assistant(
        &mut self,
        assistant: &dyn Assistant,
        catalog: &Catalog,
        product: Option<&str>,
        question: &str,
    ) -> Result<String, String> {
        let question = question.trim();
        if question.is_empty() {
            return Err("Question is empty".to_string());
        }

        let summary = self.ledger.summary();
        let context = build_assistant_context(product.and_then(|name| catalog.get(name)), summary.as_ref());
        let answer = assistant
            .ask(&context, question)
            .map_err(|e| format!("Assistant unavailable: {e}"))?;

        self.conversation.push(ChatMessage {
            role: Role::User,
            content: question.to_string(),
        });
        self.conversation.push(ChatMessage {
            role: Role::Assistant,
            content: answer.clone(),
        });
        Ok(answer)
    }
}

/// Isolated sessions keyed by id; nothing is shared between them.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<Uuid, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) -> Uuid {
        let session = Session::new();
        let id = session.id;
        self.sessions.insert(id, session);
        log::info!("session {id} started");
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Drop a session and its ledger.
    pub fn end(&mut self, id: &Uuid) -> Option<Session> {
        let ended = self.sessions.remove(id);
        if ended.is_some() {
            log::info!("session {id} ended");
        }
        ended
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::scoring::score_records;
    use crate::models::material::{MaterialImpact, MaterialTable};
    use crate::models::product::{IngredientFlags, MaterialSlot, ProductRecord};
    use std::cell::RefCell;

    struct EchoAssistant {
        seen_context: RefCell<String>,
    }

    impl Assistant for EchoAssistant {
        fn ask(&self, context: &str, question: &str) -> Result<String, String> {
            *self.seen_context.borrow_mut() = context.to_string();
            Ok(format!("You asked: {question}"))
        }
    }

    struct OfflineAssistant;

    impl Assistant for OfflineAssistant {
        fn ask(&self, _context: &str, _question: &str) -> Result<String, String> {
            Err("connection refused".to_string())
        }
    }

    fn catalog() -> Catalog {
        let mut materials = MaterialTable::new();
        materials.insert(
            "PET".to_string(),
            MaterialImpact {
                carbon_kg_per_kg: 2.2,
                water_l_per_kg: 17.0,
                energy_mj_per_kg: 70.0,
                waste_score: 4.0,
            },
        );
        let record = ProductRecord {
            name: "Bottle Wash".to_string(),
            category: "Body Wash".to_string(),
            slots: vec![MaterialSlot {
                material: Some("PET".to_string()),
                weight_g: Some(40.0),
            }],
            flags: IngredientFlags::default(),
        };
        score_records(&[record], &materials)
    }

    #[test]
    fn logs_catalog_products_once() {
        let catalog = catalog();
        let mut session = Session::new();

        assert_eq!(session.log_product(&catalog, "Bottle Wash"), Some(LogOutcome::Added));
        assert_eq!(
            session.log_product(&catalog, "Bottle Wash"),
            Some(LogOutcome::AlreadyCounted)
        );
        assert_eq!(session.log_product(&catalog, "Missing"), None);
        assert_eq!(session.ledger.len(), 1);
    }

    #[test]
    fn assistant_exchange_is_recorded_with_grounded_context() {
        let catalog = catalog();
        let mut session = Session::new();
        session.log_product(&catalog, "Bottle Wash");
        let assistant = EchoAssistant {
            seen_context: RefCell::new(String::new()),
        };

        let answer = session
            .ask_assistant(&assistant, &catalog, Some("Bottle Wash"), " Is PET recyclable? ")
            .expect("answer");

        assert_eq!(answer, "You asked: Is PET recyclable?");
        assert_eq!(session.conversation.len(), 2);
        assert_eq!(session.conversation[0].role, Role::User);
        let context = assistant.seen_context.borrow();
        assert!(context.contains("Bottle Wash (Body Wash)"));
        assert!(context.contains("logged 1 products"));
    }

    #[test]
    fn failed_assistant_call_leaves_conversation_untouched() {
        let catalog = catalog();
        let mut session = Session::new();

        let err = session
            .ask_assistant(&OfflineAssistant, &catalog, None, "hello")
            .expect_err("offline");
        assert!(err.contains("connection refused"));
        assert!(session.conversation.is_empty());
    }

    #[test]
    fn registry_keeps_session_ledgers_isolated() {
        let catalog = catalog();
        let mut registry = SessionRegistry::new();
        let first = registry.start();
        let second = registry.start();
        assert_ne!(first, second);

        registry
            .get_mut(&first)
            .expect("first session")
            .log_product(&catalog, "Bottle Wash");

        assert_eq!(registry.get(&first).map(|s| s.ledger.len()), Some(1));
        assert_eq!(registry.get(&second).map(|s| s.ledger.len()), Some(0));

        assert!(registry.end(&first).is_some());
        assert!(registry.get(&first).is_none());
        assert_eq!(registry.len(), 1);
    }
}
