//! Prompt builders for the three language-service uses.

use super::ChatMessage;
use crate::knowledge::Entry;

/// A system instruction plus the conversation turns to send with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub turns: Vec<ChatMessage>,
}

/// Free-form user input into the canonical matching language.
pub fn normalize_query(source_language: &str, query: &str) -> Prompt {
    Prompt {
        system: format!(
            "You translate short troubleshooting requests from {source_language} into English. \
             Return only the English translation. Do not add commentary, quotes or explanations. \
             If the text is already English, return it unchanged."
        ),
        turns: vec![ChatMessage::user(query)],
    }
}

/// A fixed display string into `target_language`.
pub fn translate(text: &str, target_language: &str) -> Prompt {
    Prompt {
        system: format!(
            "Translate the user's text into {target_language}. \
             Return only the translated text. Do not add commentary, quotes or explanations."
        ),
        turns: vec![ChatMessage::user(text)],
    }
}

/// A grounded explanation of one knowledge-base entry.
pub fn explain(entry: &Entry, user_description: &str, language: &str) -> Prompt {
    let system = format!(
        "You are STIAB Assistant, a support assistant for restaurant technology (KDS, kiosk and POS). \
         Answer only from the troubleshooting context you are given; never invent steps. \
         Respond in {language}. Explain what to try first as short numbered steps, \
         then say when to call support. \
         If the context does not cover the user's problem, reply only that they should contact support."
    );

    let context = format!(
        "Troubleshooting context:\n\
         System: {}\n\
         Problem: {}\n\
         What to try first: {}\n\
         When to call support: {}\n\n\
         User's description: {}",
        entry.system.as_deref().unwrap_or("Unknown"),
        entry.problem,
        or_na(&entry.first_step),
        or_na(&entry.escalation),
        user_description.trim(),
    );

    Prompt {
        system,
        turns: vec![ChatMessage::user(context)],
    }
}

fn or_na(text: &str) -> &str {
    if text.trim().is_empty() {
        "N/A"
    } else {
        text
    }
}
