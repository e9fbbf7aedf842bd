/// Block Partitioner
///
/// Resolves the requested block names against the configuration table
/// and merges adjacent same-width ranges into the minimal sorted list
/// of CharacterBlocks. Merging is purely an encoding-density
/// optimization: fewer index entries and larger shared dedup pools.

use super::types::{BlockSpec, CharacterBlock, FontConfig};
use itertools::Itertools;
use log::info;

/// Look up the comma-separated block names in the configuration table.
/// Request order does not matter, the specs are sorted by start
/// codepoint before partitioning.
pub fn resolve_blocks(config: &FontConfig, names: &str) -> Result<Vec<BlockSpec>, String> {
    let mut specs = Vec::new();
    for name in names.split(',') {
        let name = name.trim();
        let spec = config
            .blocks
            .get(name)
            .ok_or_else(|| format!("Unknown font block name: '{}'", name))?;
        specs.push(*spec);
    }
    Ok(specs)
}

/// Merge consecutive blocks: the accumulator absorbs the next spec iff
/// its range starts right after the accumulator ends and the width
/// class matches. Idempotent on already-merged input.
pub fn partition_blocks(specs: &[BlockSpec]) -> Vec<CharacterBlock> {
    let mut blocks: Vec<CharacterBlock> = Vec::new();

    for spec in specs.iter().sorted_by_key(|s| s.start) {
        match blocks.last_mut() {
            Some(last) if last.end + 1 == spec.start && last.width == spec.width => {
                last.end = spec.end;
            }
            _ => blocks.push(CharacterBlock {
                start: spec.start,
                end: spec.end,
                width: spec.width,
            }),
        }
    }

    for block in &blocks {
        info!(
            "Character block {:#X} - {:#X}, {} wide",
            block.start, block.end, block.width
        );
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_same_width_merge() {
        let specs = vec![
            BlockSpec::new(0x80, 0xFF, 8),
            BlockSpec::new(0x100, 0x17F, 8),
        ];
        let blocks = partition_blocks(&specs);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start, 0x80);
        assert_eq!(blocks[0].end, 0x17F);
        assert_eq!(blocks[0].width, 8);
    }

    #[test]
    fn test_adjacent_different_width_do_not_merge() {
        let specs = vec![
            BlockSpec::new(0x80, 0x17F, 8),
            BlockSpec::new(0x180, 0x24F, 16),
        ];
        let blocks = partition_blocks(&specs);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_gap_blocks_do_not_merge() {
        let specs = vec![
            BlockSpec::new(0, 0x7F, 8),
            BlockSpec::new(0x100, 0x17F, 8),
        ];
        let blocks = partition_blocks(&specs);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_request_order_does_not_matter() {
        let a = partition_blocks(&[
            BlockSpec::new(0x100, 0x17F, 8),
            BlockSpec::new(0x80, 0xFF, 8),
        ]);
        let b = partition_blocks(&[
            BlockSpec::new(0x80, 0xFF, 8),
            BlockSpec::new(0x100, 0x17F, 8),
        ]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_partition_is_idempotent() {
        let specs = vec![
            BlockSpec::new(0, 0x7F, 8),
            BlockSpec::new(0x80, 0xFF, 8),
            BlockSpec::new(0x3040, 0x309F, 16),
        ];
        let once = partition_blocks(&specs);
        let again: Vec<BlockSpec> = once
            .iter()
            .map(|b| BlockSpec::new(b.start, b.end, b.width))
            .collect();
        assert_eq!(partition_blocks(&again), once);
    }

    #[test]
    fn test_unknown_block_name_is_fatal() {
        let config = FontConfig::default();
        let err = resolve_blocks(&config, "ascii,klingon").unwrap_err();
        assert!(err.contains("klingon"));
    }

    #[test]
    fn test_default_set_resolves() {
        let config = FontConfig::default();
        let specs = resolve_blocks(&config, super::super::types::DEFAULT_BLOCKS).unwrap();
        assert_eq!(specs.len(), 6);
        // ascii..latin-b are contiguous 8-wide, greek/cyrilic merge too
        let blocks = partition_blocks(&specs);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].start, 0);
        assert_eq!(blocks[0].end, 0x24F);
        assert_eq!(blocks[1].start, 0x370);
        assert_eq!(blocks[1].end, 0x4FF);
    }
}
