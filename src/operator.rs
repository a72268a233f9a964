use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::warn;

/// The person in front of the client: answers confirmations and receives
/// notifications that the page showed as alerts.
#[async_trait]
pub trait Operator: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
    async fn notify(&self, message: &str);
}

/// Terminal operator reading answers from stdin.
#[derive(Debug, Default, Clone)]
pub struct ConsoleOperator {
    assume_yes: bool,
}

impl ConsoleOperator {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl Operator for ConsoleOperator {
    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stdout = tokio::io::stdout();
        if let Err(e) = stdout.write_all(format!("{prompt} [y/N] ").as_bytes()).await {
            warn!(error = %e, "failed to write prompt");
            return false;
        }
        let _ = stdout.flush().await;

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        match reader.read_line(&mut line).await {
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!(error = %e, "failed to read confirmation");
                false
            }
        }
    }

    async fn notify(&self, message: &str) {
        println!("{message}");
    }
}

/// Operator with a fixed answer that records every prompt and notification.
///
/// Test double for code that drives a [`LeadController`](crate::LeadController)
/// without a terminal; the `leadbook` binary never uses it.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answer: bool,
    prompts: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

impl ScriptedOperator {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Default::default()
        }
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn notices(&self) -> Vec<String> {
        self.notices.lock().await.clone()
    }
}

#[async_trait]
impl Operator for ScriptedOperator {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().await.push(prompt.to_string());
        self.answer
    }

    async fn notify(&self, message: &str) {
        self.notices.lock().await.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_operator_records() {
        let operator = ScriptedOperator::answering(false);
        assert!(!operator.confirm("Proceed?").await);
        operator.notify("done").await;

        assert_eq!(operator.prompts().await, vec!["Proceed?".to_string()]);
        assert_eq!(operator.notices().await, vec!["done".to_string()]);
    }

    #[tokio::test]
    async fn console_operator_can_skip_prompt() {
        assert!(ConsoleOperator::new(true).confirm("Proceed?").await);
    }
}
