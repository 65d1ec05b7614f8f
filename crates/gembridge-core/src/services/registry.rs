//! Public model alias registry.
//!
//! Completion is permissive (unknown names fall back to the default backend
//! model) while the model-info lookup is strict (unknown names are
//! `ModelNotFound`).

use chrono::Utc;

use crate::domain::{ModelInfo, ModelList};
use crate::ports::CoreError;

/// Client-facing model names accepted and listed by the adapter, in listing order.
pub const PUBLIC_ALIASES: &[&str] = &[
    "gpt-3.5-turbo",
    "gpt-4",
    "gpt-4-turbo",
    "gpt-4o",
    "text-davinci-003",
    "gemini-pro",
    "gemini-pro-vision",
];

/// Backend model every alias maps to unless configured otherwise.
pub const DEFAULT_BACKEND_MODEL: &str = "gemini-2.0-flash-exp";

/// Read-only mapping from public aliases to backend model ids.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    aliases: Vec<(String, String)>,
    fallback: String,
    created: i64,
}

impl ModelRegistry {
    /// Map every public alias, and the fallback, to `backend_model`.
    pub fn new(backend_model: impl Into<String>) -> Self {
        let backend_model = backend_model.into();
        let aliases = PUBLIC_ALIASES
            .iter()
            .map(|alias| ((*alias).to_string(), backend_model.clone()))
            .collect();

        Self {
            aliases,
            fallback: backend_model,
            created: Utc::now().timestamp(),
        }
    }

    /// Override the `created` timestamp reported for every alias.
    #[must_use]
    pub const fn with_created(mut self, created: i64) -> Self {
        self.created = created;
        self
    }

    /// Resolve a client-supplied model name to a backend model id.
    ///
    /// Never fails: unknown names resolve to the fallback model.
    pub fn resolve(&self, public_model_id: &str) -> &str {
        self.aliases
            .iter()
            .find(|(alias, _)| alias == public_model_id)
            .map_or(self.fallback.as_str(), |(_, backend)| backend.as_str())
    }

    /// Whether `id` is one of the enumerated public aliases.
    pub fn contains(&self, id: &str) -> bool {
        self.aliases.iter().any(|(alias, _)| alias == id)
    }

    /// Model info for an enumerated alias.
    pub fn model_info(&self, id: &str) -> Result<ModelInfo, CoreError> {
        if self.contains(id) {
            Ok(ModelInfo::new(id, self.created))
        } else {
            Err(CoreError::ModelNotFound(id.to_string()))
        }
    }

    /// All enumerated aliases in `OpenAI` list format.
    pub fn list(&self) -> ModelList {
        ModelList::new(
            self.aliases
                .iter()
                .map(|(alias, _)| ModelInfo::new(alias.clone(), self.created))
                .collect(),
        )
    }

    /// The backend model used for unknown names.
    pub fn fallback_model(&self) -> &str {
        &self.fallback
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_MODEL)
    }
}
