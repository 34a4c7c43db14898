//! The question panel: collects a visitor's question, asks the completer and
//! shows the answer.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::TextCompleter;

/// Shown instead of calling the service when the question is blank.
pub const EMPTY_QUESTION_MESSAGE: &str = "please write your question.";

/// Placeholder answer while the call is in flight.
pub const PENDING_MESSAGE: &str = "generating answer...";

const DEFAULT_PREAMBLE: &str = "You are an expert assistant for this course. \
Answer the following question from a prospective student in a clear, concise and \
encouraging way:";

/// Turns a visitor's question into the prompt sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    preamble: String,
}

impl PromptTemplate {
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    pub fn render(&self, question: &str) -> String {
        format!("{} \"{}\"", self.preamble, question)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PREAMBLE)
    }
}

/// Enabled state of the panel's submit control.
///
/// Clones share the same flag, so a renderer can observe what the panel does.
#[derive(Debug, Clone)]
pub struct ActionControl {
    enabled: Arc<AtomicBool>,
}

impl ActionControl {
    pub fn new() -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Disable the control until the returned guard is dropped.
    pub fn disable(&self) -> ActionGuard<'_> {
        self.enabled.store(false, Ordering::Release);
        ActionGuard { control: self }
    }
}

impl Default for ActionControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-enables its [`ActionControl`] on drop.
#[must_use = "the control is re-enabled as soon as the guard is dropped"]
pub struct ActionGuard<'a> {
    control: &'a ActionControl,
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        self.control.enabled.store(true, Ordering::Release);
    }
}

/// What the panel's result area shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelView {
    #[default]
    Idle,
    EmptyQuestion,
    Pending {
        question: String,
    },
    Answered {
        question: String,
        answer: String,
    },
}

impl fmt::Display for PanelView {
    /// Plain text only; neither question nor answer is interpreted as markup.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelView::Idle => Ok(()),
            PanelView::EmptyQuestion => f.write_str(EMPTY_QUESTION_MESSAGE),
            PanelView::Pending { question } => {
                write!(f, "You asked:\n{question}\n\nAI answer:\n{PENDING_MESSAGE}")
            }
            PanelView::Answered { question, answer } => {
                write!(f, "You asked:\n{question}\n\nAI answer:\n{answer}")
            }
        }
    }
}

/// State of the question panel, handed to and from its event handler.
#[derive(Debug, Default)]
pub struct FaqPanel {
    pub question: String,
    view: PanelView,
    action: ActionControl,
    template: PromptTemplate,
}

impl FaqPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn action(&self) -> &ActionControl {
        &self.action
    }

    pub fn render(&self) -> String {
        self.view.to_string()
    }

    /// Handle a click on the submit control.
    ///
    /// Blank questions never reach the completer. Otherwise the control stays
    /// disabled for the duration of the call and the input is cleared afterwards.
    pub async fn submit<C>(&mut self, completer: &C)
    where
        C: TextCompleter + ?Sized,
    {
        let question = self.question.trim().to_string();
        if question.is_empty() {
            self.view = PanelView::EmptyQuestion;
            return;
        }

        self.view = PanelView::Pending {
            question: question.clone(),
        };

        let answer = {
            let _guard = self.action.disable();
            let prompt = self.template.render(&question);
            completer.complete(&prompt).await
        };

        tracing::debug!(answer_len = answer.len(), "question answered");
        self.view = PanelView::Answered { question, answer };
        self.question.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completions::COMMUNICATION_ERROR_FALLBACK;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records prompts and whether the control was disabled while answering.
    struct StubCompleter {
        answer: String,
        control: ActionControl,
        prompts: Mutex<Vec<String>>,
        enabled_during_call: Mutex<Vec<bool>>,
    }

    impl StubCompleter {
        fn new(answer: &str, control: ActionControl) -> Self {
            Self {
                answer: answer.to_string(),
                control,
                prompts: Mutex::new(Vec::new()),
                enabled_during_call: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextCompleter for StubCompleter {
        async fn complete(&self, prompt: &str) -> String {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.enabled_during_call
                .lock()
                .unwrap()
                .push(self.control.is_enabled());
            self.answer.clone()
        }
    }

    #[tokio::test]
    async fn blank_question_never_reaches_completer() {
        let mut panel = FaqPanel::new();
        let stub = StubCompleter::new("unused", panel.action().clone());
        panel.question = "   \n\t".to_string();

        panel.submit(&stub).await;

        assert_eq!(panel.view(), &PanelView::EmptyQuestion);
        assert_eq!(panel.render(), EMPTY_QUESTION_MESSAGE);
        assert!(stub.prompts.lock().unwrap().is_empty());
        assert!(panel.action().is_enabled());
    }

    #[tokio::test]
    async fn answer_is_shown_and_input_cleared() {
        let mut panel = FaqPanel::new().with_template(PromptTemplate::new("Answer:"));
        let stub = StubCompleter::new("It lasts six weeks.", panel.action().clone());
        panel.question = "  How long is it?  ".to_string();

        panel.submit(&stub).await;

        assert_eq!(
            stub.prompts.lock().unwrap().as_slice(),
            ["Answer: \"How long is it?\""]
        );
        assert_eq!(
            panel.view(),
            &PanelView::Answered {
                question: "How long is it?".to_string(),
                answer: "It lasts six weeks.".to_string(),
            }
        );
        assert!(panel.question.is_empty());
        assert!(panel.render().ends_with("It lasts six weeks."));
    }

    #[tokio::test]
    async fn control_is_disabled_during_call_and_restored_after_fallback() {
        let mut panel = FaqPanel::new();
        let stub = StubCompleter::new(COMMUNICATION_ERROR_FALLBACK, panel.action().clone());
        panel.question = "Is there a refund?".to_string();

        panel.submit(&stub).await;

        assert_eq!(stub.enabled_during_call.lock().unwrap().as_slice(), [false]);
        assert!(panel.action().is_enabled());
        assert!(panel.render().ends_with(COMMUNICATION_ERROR_FALLBACK));
    }

    #[test]
    fn guard_restores_control_on_drop() {
        let control = ActionControl::new();
        {
            let _guard = control.disable();
            assert!(!control.is_enabled());
        }
        assert!(control.is_enabled());
    }

    #[test]
    fn markup_in_question_is_rendered_verbatim() {
        let view = PanelView::Pending {
            question: "<b>hi</b>".to_string(),
        };
        assert_eq!(
            view.to_string(),
            format!("You asked:\n<b>hi</b>\n\nAI answer:\n{PENDING_MESSAGE}")
        );
    }

    #[test]
    fn default_template_quotes_the_question() {
        let prompt = PromptTemplate::default().render("Who teaches it?");
        assert!(prompt.starts_with("You are an expert assistant"));
        assert!(prompt.ends_with("\"Who teaches it?\""));
    }
}
