use anyhow::{Context, Result};
use gametraits_codec::{CodecStrategy, Trait, TraitSet};
use std::io::Read;

use crate::args::OutputFormat;

pub fn encode_traits(traits: &[Trait], strategy: CodecStrategy) -> Result<()> {
    let set = TraitSet::from_traits(traits.iter().copied());
    let data = strategy
        .encode(&set)
        .with_context(|| format!("Failed to encode with strategy {strategy}"))?;
    let text = String::from_utf8(data).context("Encoded output is not UTF-8")?;
    println!("{text}");
    Ok(())
}

/// Read the decode input: the argument itself, or stdin when it is `-`.
fn read_input(input: &str) -> Result<Vec<u8>> {
    if input != "-" {
        return Ok(input.as_bytes().to_vec());
    }
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

pub fn decode_traits(input: &str, strategy: CodecStrategy, format: OutputFormat) -> Result<()> {
    let data = read_input(input)?;
    tracing::debug!(%strategy, bytes = data.len(), "decoding");
    let set = strategy
        .decode(&data)
        .with_context(|| format!("Failed to decode with strategy {strategy}"))?;

    match format {
        OutputFormat::Text => {
            for t in set.iter() {
                println!("{t}");
            }
        }
        OutputFormat::Json => {
            let flags: serde_json::Map<String, serde_json::Value> = Trait::ALL
                .iter()
                .map(|t| (t.tag().to_string(), serde_json::Value::Bool(set.get(*t))))
                .collect();
            println!("{}", serde_json::to_string_pretty(&flags)?);
        }
    }
    Ok(())
}
