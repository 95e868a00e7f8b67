//! Fenced block extraction from free-form model output

use tracing::debug;

/// Markdown code fence
pub const FENCE: &str = "```";

/// Extract the body of the first fenced block tagged `block_type`
///
/// Text without any fence comes back unchanged. When fences exist but none of
/// the fenced segments starts with the tag, the whole text is returned trimmed.
pub fn extract_markdown_block<'a>(response: &'a str, block_type: &str) -> &'a str {
    debug!(%block_type, response_len = response.len(), "extract_markdown_block: called");
    if !response.contains(FENCE) {
        debug!("extract_markdown_block: no fence, returning input");
        return response;
    }

    // Odd segments are inside a fence
    for segment in response.split(FENCE).skip(1).step_by(2) {
        if let Some(body) = segment.trim().strip_prefix(block_type) {
            debug!("extract_markdown_block: found tagged block");
            return body.trim();
        }
    }

    debug!("extract_markdown_block: no tagged block, returning trimmed input");
    response.trim()
}

/// Extract the first fenced block, dropping a leading `language` tag
///
/// Text without any fence comes back unchanged.
pub fn extract_code_block<'a>(response: &'a str, language: &str) -> &'a str {
    debug!(%language, response_len = response.len(), "extract_code_block: called");
    let Some(segment) = response.split(FENCE).nth(1) else {
        debug!("extract_code_block: no fence, returning input");
        return response;
    };

    let block = segment.trim();
    match block.strip_prefix(language) {
        Some(body) => body.trim(),
        None => block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_block_without_fence_is_untouched() {
        let text = "  {\"tool_name\": \"list_files\", \"args\": {}}\n";
        assert_eq!(extract_markdown_block(text, "action"), text);
    }

    #[test]
    fn test_markdown_block_finds_tagged_block() {
        let text = "I should list the files first.\n\n```action\n{\"tool_name\": \"list_files\"}\n```\n";
        assert_eq!(extract_markdown_block(text, "action"), "{\"tool_name\": \"list_files\"}");
    }

    #[test]
    fn test_markdown_block_skips_other_tags() {
        let text = "```json\n{\"a\": 1}\n```\nthen\n```action\n{\"b\": 2}\n```";
        assert_eq!(extract_markdown_block(text, "action"), "{\"b\": 2}");
    }

    #[test]
    fn test_markdown_block_ignores_text_between_fences() {
        // "action" appears only outside a fence, which must not count
        let text = "```json\n{}\n```\naction is coming\n```\nplain\n```";
        assert_eq!(extract_markdown_block(text, "action"), text.trim());
    }

    #[test]
    fn test_markdown_block_unmatched_returns_trimmed() {
        let text = "\n```python\nprint(1)\n```\n";
        assert_eq!(extract_markdown_block(text, "action"), text.trim());
    }

    #[test]
    fn test_markdown_block_unterminated_fence() {
        let text = "thinking...\n```action\n{\"tool_name\": \"terminate\"}";
        assert_eq!(extract_markdown_block(text, "action"), "{\"tool_name\": \"terminate\"}");
    }

    #[test]
    fn test_code_block_strips_language() {
        let text = "Here you go:\n```python\ndef f(x):\n    return x\n```\nEnjoy.";
        assert_eq!(extract_code_block(text, "python"), "def f(x):\n    return x");
    }

    #[test]
    fn test_code_block_without_language_tag() {
        let text = "```\nfn main() {}\n```";
        assert_eq!(extract_code_block(text, "python"), "fn main() {}");
    }

    #[test]
    fn test_code_block_without_fence() {
        let text = "def f():\n    pass\n";
        assert_eq!(extract_code_block(text, "python"), text);
    }

    #[test]
    fn test_code_block_takes_first_block() {
        let text = "```python\nfirst\n```\n```python\nsecond\n```";
        assert_eq!(extract_code_block(text, "python"), "first");
    }
}
