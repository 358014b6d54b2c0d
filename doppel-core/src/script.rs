use serde::{Deserialize, Serialize};

/// Read-only ordered list of interview prompts, loaded once at interview
/// start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewScript {
    questions: Vec<String>,
}

impl InterviewScript {
    pub fn new(questions: Vec<String>) -> Self {
        Self { questions }
    }

    /// The default script. Questions track the profile shape: identity,
    /// background, personality, relationships, one anecdote.
    pub fn builtin() -> Self {
        Self::new(
            [
                "What is your name, and how old are you?",
                "Where do you live, and what do you do for a living?",
                "Where did you grow up, and what was it like?",
                "Tell me about your education.",
                "How would you describe your career path so far?",
                "What do you enjoy doing outside of work?",
                "How would your friends describe your personality?",
                "Which values matter most to you?",
                "Who are the most important people in your life?",
                "Tell me a story or a memory that says a lot about who you are.",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Renders the script as a numbered block for embedding into an
    /// instruction message.
    pub fn numbered_block(&self) -> String {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. {}", i + 1, q))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for InterviewScript {
    fn default() -> Self {
        Self::builtin()
    }
}
