//! Assistant reply rendering — message content blocks to simple HTML.

use crate::models::MessageContent;

/// Render content blocks into one HTML string.
///
/// Text blocks have each `\n` replaced by `<br>`. Other block types are
/// rendered as a placeholder naming the type. Blocks are joined in order
/// with no separator.
pub fn render_content(blocks: &[MessageContent]) -> String {
    blocks.iter().map(render_block).collect()
}

fn render_block(block: &MessageContent) -> String {
    if block.is_text() {
        block
            .text
            .as_ref()
            .map(|t| t.value.replace('\n', "<br>"))
            .unwrap_or_default()
    } else {
        format!("Unsupported content type: {}", block.kind)
    }
}
