//! Prompt builder: persona preamble + platform data + user question.

/// Persona and rules prepended to every prompt.
pub const PERSONA_PREAMBLE: &str = "You are Zakbot, an AI Customer Service Manager for ZAKTOMATE. Your primary role is to assist users with inquiries regarding ZAKTOMATE's products and services: Zakbot (Chatbot), Zakdeck (Content Generator), and OpsMate (Service Plans). You also handle questions about ZAKTOMATE's shared features and overall company information.

Your persona and rules are:
- Helpful and Informative: Provide accurate, concise, and direct answers based on the ZAKTOMATE information you have.
- Problem-Solving: Aim to resolve user queries efficiently. If you don't have enough information, politely ask clarifying questions to guide the user.
- Professional and Friendly: Maintain a polite, approachable, and professional tone.
- Do not over use the symbol ** in your response.
- Focus on ZAKTOMATE: Keep all responses relevant to ZAKTOMATE's offerings. Do not engage in topics outside this scope.
- Prioritize User Needs: Understand the user's intent and provide the most relevant information first.
- Detail-Oriented: When describing features, pricing, or processes, be specific and include all relevant details provided in your knowledge base.
- Maintain Context: Remember previous turns in the conversation to provide coherent and continuous support.";

/// Separator placed between retrieved chunks.
pub const CONTEXT_SEPARATOR: &str = "\n---\n";

/// Hard cap on the context section, in characters.
pub const MAX_CONTEXT_CHARS: usize = 9000;

/// Builds the final prompt from the user query and retrieved chunks.
///
/// Chunks are joined in the given order and the joined string is cut to its
/// first [`MAX_CONTEXT_CHARS`] characters. The cut may land mid-chunk or
/// mid-separator.
///
/// # Example
/// ```
/// # use contextor::prompt::{compose, PERSONA_PREAMBLE};
/// let p = compose::<&str>("Hi?", &[]);
/// assert!(p.starts_with(PERSONA_PREAMBLE));
/// assert!(p.ends_with("Now answer the user's question:\nHi?"));
/// ```
pub fn compose<S: AsRef<str>>(query: &str, chunks: &[S]) -> String {
    let joined = chunks
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);
    let context = safe_truncate(&joined, MAX_CONTEXT_CHARS);

    format!(
        "{PERSONA_PREAMBLE}\n\nHere is some data from the platform:\n{context}\n\nNow answer the user's question:\n{query}"
    )
}

/// Keeps the first `max` chars without splitting a code point.
fn safe_truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_of(prompt: &str) -> &str {
        let start = prompt
            .find("Here is some data from the platform:\n")
            .unwrap()
            + "Here is some data from the platform:\n".len();
        let end = prompt.rfind("\n\nNow answer the user's question:\n").unwrap();
        &prompt[start..end]
    }

    #[test]
    fn joins_chunks_with_separator() {
        let p = compose(
            "What services does Zakbot offer?",
            &["Zakbot is a chatbot.", "OpsMate manages service plans."],
        );
        assert_eq!(
            context_of(&p),
            "Zakbot is a chatbot.\n---\nOpsMate manages service plans."
        );
        assert!(p.ends_with("What services does Zakbot offer?"));
    }

    #[test]
    fn context_is_exactly_first_9000_chars_of_joined() {
        let chunks: Vec<String> = (0..5).map(|i| format!("{i}").repeat(3000)).collect();
        let joined = chunks.join(CONTEXT_SEPARATOR);
        let p = compose("q", &chunks);

        let ctx = context_of(&p);
        assert_eq!(ctx.chars().count(), MAX_CONTEXT_CHARS);
        assert!(joined.starts_with(ctx));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let chunk = "é".repeat(MAX_CONTEXT_CHARS + 10);
        let p = compose("q", &[chunk]);
        assert_eq!(context_of(&p).chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn empty_context_keeps_preamble_and_query() {
        let p = compose::<&str>("Hello", &[]);
        assert!(p.starts_with(PERSONA_PREAMBLE));
        assert_eq!(context_of(&p), "");
        assert!(p.ends_with("\n\nNow answer the user's question:\nHello"));
    }

    #[test]
    fn preamble_is_trimmed() {
        assert!(PERSONA_PREAMBLE.starts_with("You are Zakbot"));
        assert!(PERSONA_PREAMBLE.ends_with("continuous support."));
    }
}
