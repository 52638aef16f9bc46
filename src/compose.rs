//! Effective-prompt composition.

use crate::memory::MemoryStore;

/// Recent turns folded into the effective prompt.
const CONTEXT_TURNS: usize = 8;

/// Combines an optional system preface with a windowed transcript and the
/// new prompt.
///
/// The composer only reads memory. Callers append the raw prompt to memory
/// after the turn completes, never the composed text: storing synthesized
/// context would compound duplicated transcript across turns.
pub struct ContextComposer<'a> {
    memory: Option<&'a MemoryStore>,
}

impl<'a> ContextComposer<'a> {
    pub fn new(memory: Option<&'a MemoryStore>) -> Self {
        Self { memory }
    }

    /// Build the effective prompt for a new turn.
    ///
    /// With memory disabled or no store attached, the prompt passes through
    /// unchanged. Otherwise the result is the optional `System:` line, the
    /// recent transcript, and the prompt as the final `User:` line.
    pub fn compose(&self, system: Option<&str>, prompt: &str, memory_enabled: bool) -> String {
        let memory = match self.memory {
            Some(memory) if memory_enabled => memory,
            _ => return prompt.to_string(),
        };
        let transcript = memory.join(CONTEXT_TURNS, Some(prompt));
        if transcript.is_empty() {
            return prompt.to_string();
        }
        match system.map(str::trim).filter(|s| !s.is_empty()) {
            Some(system) => format!("System: {}\n{}", system, transcript),
            None => transcript,
        }
    }
}
