//! System prompt construction

use crate::language::Language;

/// Text shown in the empty context box; never sent as context
pub const CONTEXT_PLACEHOLDER: &str = "Add context to help with translation accuracy...";

/// The context worth sending, if any
///
/// Blank input and the placeholder both mean "no context". Anything else is
/// returned untouched.
pub fn effective_context(raw: &str) -> Option<&str> {
    if raw.trim().is_empty() || raw == CONTEXT_PLACEHOLDER {
        None
    } else {
        Some(raw)
    }
}

/// Build the system instruction for one translation request
pub fn build_prompt(source: Language, target: Language, context: Option<&str>) -> String {
    let mut prompt = format!(
        "You are a professional translator. Translate the following text from {source} to {target}.\n\n"
    );

    if let Some(context) = context.and_then(effective_context) {
        prompt.push_str("Context for translation:\n");
        prompt.push_str(context);
        prompt.push_str("\n\n");
    }

    prompt.push_str(&format!(
        "Guidelines:\n\
         1. Provide ONLY the translated text\n\
         2. Maintain the original tone and context\n\
         3. Use natural {target} expressions\n\
         4. Preserve formatting and line breaks\n\
         5. NO explanations or additional text\n\
         6. Consider the provided context (if any) for more accurate translation"
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED_NO_CONTEXT: &str = "You are a professional translator. Translate the following text from Japanese to English.\n\n\
Guidelines:\n\
1. Provide ONLY the translated text\n\
2. Maintain the original tone and context\n\
3. Use natural English expressions\n\
4. Preserve formatting and line breaks\n\
5. NO explanations or additional text\n\
6. Consider the provided context (if any) for more accurate translation";

    #[test]
    fn test_prompt_without_context() {
        let prompt = build_prompt(Language::Japanese, Language::English, None);
        assert_eq!(prompt, EXPECTED_NO_CONTEXT);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_prompt(Language::Korean, Language::ChineseSimplified, Some("a game menu"));
        let b = build_prompt(Language::Korean, Language::ChineseSimplified, Some("a game menu"));
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_placeholder_and_blank_context_omitted() {
        for context in [Some(CONTEXT_PLACEHOLDER), Some(""), Some("   \n\t"), None] {
            let prompt = build_prompt(Language::Japanese, Language::English, context);
            assert_eq!(prompt, EXPECTED_NO_CONTEXT, "context {:?}", context);
            assert!(!prompt.contains("Context for translation"));
        }
    }

    #[test]
    fn test_context_included_verbatim() {
        let context = "  RPG dialogue, speaker is a knight\n";
        let prompt = build_prompt(Language::Japanese, Language::English, Some(context));

        let expected_block = format!("Context for translation:\n{context}\n\nGuidelines:\n");
        assert!(prompt.contains(&expected_block));
        assert!(prompt.starts_with(
            "You are a professional translator. Translate the following text from Japanese to English.\n\n"
        ));
    }

    #[test]
    fn test_target_name_in_guidelines() {
        let prompt = build_prompt(Language::English, Language::ChineseTraditional, None);
        assert!(prompt.contains("from English to Chinese (Traditional)."));
        assert!(prompt.contains("3. Use natural Chinese (Traditional) expressions\n"));
    }

    #[test]
    fn test_effective_context() {
        assert_eq!(effective_context(CONTEXT_PLACEHOLDER), None);
        assert_eq!(effective_context("  "), None);
        assert_eq!(effective_context(" menu "), Some(" menu "));
    }
}
