use anyhow::Result;
use gametraits_codec::conformance;
use gametraits_codec::CodecStrategy;

use crate::args::OutputFormat;
use crate::printing::render_conformance;

pub fn verify_strategies(strategies: &[CodecStrategy], format: OutputFormat) -> Result<()> {
    let strategies = if strategies.is_empty() {
        CodecStrategy::ALL.to_vec()
    } else {
        strategies.to_vec()
    };

    let reports = conformance::check_all(&strategies);

    match format {
        OutputFormat::Text => print!("{}", render_conformance(&reports)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        anyhow::bail!("{failed} strategy(ies) failed conformance");
    }
    Ok(())
}
