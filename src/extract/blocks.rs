//! Segmentation of a flat configuration into named blocks.
//!
//! A block opens at an `interface <name>` or `router <protocol> [<id>]` line
//! and closes at a terminator line (a lone `!`), at the next block header, or
//! at end of text. Comment lines such as ` !note` stay inside the block. Lines outside any block are global and are not
//! returned here.

use super::patterns::PATTERNS;

/// The declaration that opened a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockHeader {
    Interface(String),
    Router {
        protocol: String,
        process: Option<String>,
    },
}

/// A block header plus the lines that followed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBlock<'a> {
    pub header: BlockHeader,
    pub lines: Vec<&'a str>,
}

impl ConfigBlock<'_> {
    /// The block's lines joined back into text for pattern matching
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns the interface name if this is an interface block
    pub fn interface_name(&self) -> Option<&str> {
        match &self.header {
            BlockHeader::Interface(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Returns the process id if this is a `router <protocol> <id>` block
    pub fn router_process(&self, protocol: &str) -> Option<&str> {
        match &self.header {
            BlockHeader::Router { protocol: p, process } if p.eq_ignore_ascii_case(protocol) => {
                process.as_deref()
            }
            _ => None,
        }
    }
}

fn is_terminator(trimmed: &str) -> bool {
    trimmed == "!"
}

fn parse_header(trimmed: &str) -> Option<BlockHeader> {
    if let Some(caps) = PATTERNS.interface_header.captures(trimmed) {
        let name = caps.get(1)?.as_str().trim().to_string();
        return Some(BlockHeader::Interface(name));
    }

    if let Some(caps) = PATTERNS.router_header.captures(trimmed) {
        return Some(BlockHeader::Router {
            protocol: caps.get(1)?.as_str().to_string(),
            process: caps.get(2).map(|m| m.as_str().to_string()),
        });
    }

    None
}

/// Split configuration text into blocks in document order.
///
/// Single forward pass; the open block is flushed on a terminator line, on a
/// new header, or at end of input.
pub fn segment_blocks(text: &str) -> Vec<ConfigBlock<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<ConfigBlock<'_>> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if is_terminator(trimmed) {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }

        if let Some(header) = parse_header(trimmed) {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            current = Some(ConfigBlock { header, lines: Vec::new() });
            continue;
        }

        if let Some(block) = current.as_mut() {
            block.lines.push(line);
        }
    }

    if let Some(block) = current.take() {
        blocks.push(block);
    }

    blocks
}
