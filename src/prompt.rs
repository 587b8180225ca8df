//! Prompt assembly
//!
//! Wraps the built context with the system preamble and the user's prompt,
//! calls the model, and pairs the reply with the original file text so the
//! caller can diff the two.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::ai::ModelClient;
use crate::context::{self, ContextConfig, ContextDocument, ContextError};

pub const SYSTEM_PROMPT: &str = r#"You are NeuroCLI, an expert-level AI developer and assistant integrated into a command-line tool.
Your primary goal is to help with coding and software development questions.
- Act as an expert developer and a helpful assistant.
- Your responses should be clear, concise, and directly address the user's prompt."#;

pub const CODE_GEN_INSTRUCTIONS: &str = r#"**IMPORTANT**: You are now in "Code Generation Mode".
When a file's content is provided as context, you MUST return only the complete, modified,
and syntactically correct code for that file.
- DO NOT use Markdown code blocks (e.g., ```python ... ```).
- DO NOT add any commentary, explanations, or introductory sentences.
- Your output MUST be only the raw, valid code for the entire file."#;

/// What a request hands back to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiResponse {
    /// Exact text of the target file, empty for directories or no path
    pub original_content: String,
    /// Model reply, or the error text that prevented one
    pub response: String,
}

impl AiResponse {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            original_content: String::new(),
            response: message.into(),
        }
    }
}

/// Build the final prompt. `context` is present whenever a path was given.
pub fn assemble_prompt(prompt: &str, context: Option<&str>) -> String {
    let mut out = String::from(SYSTEM_PROMPT);

    if let Some(context) = context {
        out.push_str("\n\n");
        out.push_str(CODE_GEN_INSTRUCTIONS);
        out.push_str("\n\nCONTEXT:\n---\n");
        out.push_str(context);
        out.push_str("\n---");
    }

    out.push_str("\n\nUSER PROMPT: ");
    out.push_str(prompt);
    out
}

/// Build the context and read the original file text off the async runtime.
async fn gather(
    path: PathBuf,
    config: ContextConfig,
) -> Result<(ContextDocument, String), String> {
    let joined = tokio::task::spawn_blocking(move || -> Result<_, ContextError> {
        let doc = context::build_context(&path, &config)?;
        let original = if doc.is_single_file() {
            context::read_file(&path)?
        } else {
            String::new()
        };
        Ok((doc, original))
    })
    .await;

    match joined {
        Ok(Ok(gathered)) => Ok(gathered),
        Ok(Err(err)) => Err(err.to_string()),
        Err(err) => Err(format!("Error: context builder did not finish: {}", err)),
    }
}

/// Answer `prompt`, optionally with `path` as context.
///
/// Never fails: a broken root path or a model error becomes the response
/// text. The model is not called when the context could not be built.
pub async fn get_ai_response(
    model: &dyn ModelClient,
    prompt: &str,
    path: Option<&Path>,
    config: &ContextConfig,
) -> AiResponse {
    let mut original_content = String::new();
    let mut context_text = None;

    if let Some(path) = path {
        let (doc, original) = match gather(path.to_path_buf(), *config).await {
            Ok(gathered) => gathered,
            Err(message) => {
                debug!("Context build failed: {}", message);
                return AiResponse::failed(message);
            }
        };

        info!(
            "Context from {}: {} included, {} omitted",
            path.display(),
            doc.blocks().len(),
            doc.omitted().len()
        );
        if doc.is_empty() {
            warn!("Nothing under {} made it into the context", path.display());
        }

        original_content = original;
        context_text = Some(doc.render());
    }

    let full_prompt = assemble_prompt(prompt, context_text.as_deref());
    debug!("Prompt is {} bytes", full_prompt.len());

    let response = match model.complete(&full_prompt).await {
        Ok(text) => text,
        Err(err) => format!(
            "Error: Could not retrieve response from {} API. Details: {:#}",
            model.name(),
            err
        ),
    };

    AiResponse {
        original_content,
        response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every prompt and answers with a fixed reply
    struct StubModel {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubModel {
        fn answering(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelClient for StubModel {
        fn name(&self) -> &str {
            "Stub"
        }

        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => anyhow::bail!("connection refused"),
            }
        }
    }

    #[test]
    fn test_prompt_without_path() {
        let prompt = assemble_prompt("hello", None);
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.ends_with("\n\nUSER PROMPT: hello"));
        assert!(!prompt.contains("CONTEXT:"));
        assert!(!prompt.contains("Code Generation Mode"));
    }

    #[test]
    fn test_prompt_with_context() {
        let prompt = assemble_prompt("fix it", Some("ctx"));
        assert_eq!(
            prompt,
            format!(
                "{}\n\n{}\n\nCONTEXT:\n---\nctx\n---\n\nUSER PROMPT: fix it",
                SYSTEM_PROMPT, CODE_GEN_INSTRUCTIONS
            )
        );
    }

    #[tokio::test]
    async fn test_single_file_pairs_original_with_reply() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("hi.py");
        std::fs::write(&file, "print('hi')\n").unwrap();

        let model = StubModel::answering("print('hello')\n");
        let result =
            get_ai_response(&model, "say hello", Some(file.as_path()), &ContextConfig::default()).await;

        assert_eq!(result.original_content, "print('hi')\n");
        assert_eq!(result.response, "print('hello')\n");

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("print('hi')"));
        assert!(prompts[0].contains("Code Generation Mode"));
    }

    #[tokio::test]
    async fn test_missing_path_short_circuits() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope");

        let model = StubModel::answering("unused");
        let result =
            get_ai_response(&model, "anything", Some(missing.as_path()), &ContextConfig::default()).await;

        assert_eq!(result.original_content, "");
        assert!(result.response.starts_with("Error: Path not found at"));
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_directory_has_no_original_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("a.txt"), "alpha\n").unwrap();
        std::fs::write(temp_dir.path().join("blob.bin"), b"\x00\x00").unwrap();

        let model = StubModel::answering("ok");
        let result =
            get_ai_response(&model, "summarize", Some(temp_dir.path()), &ContextConfig::default())
                .await;

        assert_eq!(result.original_content, "");
        assert_eq!(result.response, "ok");
        let prompt = &model.prompts()[0];
        assert!(prompt.contains("--- START OF"));
        assert!(prompt.contains("alpha"));
        assert!(!prompt.contains("blob.bin"));
    }

    #[tokio::test]
    async fn test_empty_context_still_calls_model() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("blob.bin"), b"\x00\x01").unwrap();

        let model = StubModel::answering("nothing to see");
        let result =
            get_ai_response(&model, "look", Some(temp_dir.path()), &ContextConfig::default())
                .await;

        assert_eq!(result.response, "nothing to see");
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("CONTEXT:\n---\n\n---"));
    }

    #[tokio::test]
    async fn test_no_path_calls_model_directly() {
        let model = StubModel::answering("42");
        let result = get_ai_response(&model, "meaning?", None, &ContextConfig::default()).await;

        assert_eq!(result.original_content, "");
        assert_eq!(result.response, "42");
        assert!(!model.prompts()[0].contains("CONTEXT:"));
    }

    #[tokio::test]
    async fn test_model_failure_becomes_response() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("a.rs");
        std::fs::write(&file, "fn a() {}\n").unwrap();

        let model = StubModel::failing();
        let result = get_ai_response(&model, "x", Some(file.as_path()), &ContextConfig::default()).await;

        assert_eq!(result.original_content, "fn a() {}\n");
        assert!(result
            .response
            .starts_with("Error: Could not retrieve response from Stub API."));
        assert!(result.response.contains("connection refused"));
    }
}
