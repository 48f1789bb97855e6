use serde_json::{Value, json};
use std::borrow::Cow;

use crate::{AnnotationError, Document, generate, wire::wire_document};

/// System instruction teaching the completion model the inline syntax.
pub const FORMAT_SPECIFICATION: &str = "\
Annotate the text according to the prompt using the following syntax:

## Annotation Format
- An annotation is two consecutive square bracket pairs:
  - First: the annotated text
  - Second: the label
- Example: [Annotated Text][Label]

## Label Definition (Optional)
- A label can be given a URL on its own line as `[Label]: URL`.

## Escaping Metacharacters
- If a `[` occurs naturally in the text, escape it with a backslash.
- Example: \\[Part of][Original Text]

## Handling Unknown Prompts
- If you cannot understand the prompt, return the input text unchanged.

Output the original text with annotations.
";

/// What the completion model annotates: either raw text, or a document
/// from an earlier turn that is rendered back to inline form first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    Raw(String),
    Structured(Document),
}

impl Context {
    /// Wire documents become structured context; any other value is taken
    /// as raw text, strings by their contents and the rest as JSON text.
    pub fn from_value(value: &Value) -> Self {
        if let Some(doc) = wire_document(value) {
            return Self::Structured(doc);
        }
        match value {
            Value::String(s) => Self::Raw(s.clone()),
            other => Self::Raw(other.to_string()),
        }
    }

    pub fn render(&self) -> Result<Cow<'_, str>, AnnotationError> {
        match self {
            Self::Raw(s) => Ok(Cow::Borrowed(s)),
            Self::Structured(doc) => generate(doc).map(Cow::Owned),
        }
    }
}

impl From<String> for Context {
    fn from(s: String) -> Self {
        Self::Raw(s)
    }
}

impl From<&str> for Context {
    fn from(s: &str) -> Self {
        Self::Raw(s.to_string())
    }
}

impl From<Document> for Context {
    fn from(doc: Document) -> Self {
        Self::Structured(doc)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRequest {
    pub context: Context,
    pub prompt: String,
}

impl AnnotationRequest {
    pub fn prepare_with(context: impl Into<Context>, prompt: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            prompt: prompt.into(),
        }
    }

    pub fn completion_request(&self) -> Result<CompletionRequest, AnnotationError> {
        let text = self.context.render()?;
        Ok(CompletionRequest {
            system: FORMAT_SPECIFICATION.to_string(),
            user: format!("{text}\nPrompt:\n{}", self.prompt),
        })
    }
}

/// The two messages sent to the completion model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
}

impl CompletionRequest {
    /// Single-string form for services without separate system messages.
    pub fn flatten(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }

    /// Body of a chat-completions style request.
    pub fn to_chat_json(&self, model: &str) -> Value {
        json!({
            "model": model,
            "messages": [
                {"role": "system", "content": self.system},
                {"role": "user", "content": self.user},
            ]
        })
    }
}
