//! Merge command handler
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::Target;
use crate::cli::MergeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{serialize, OutputWriter};
use tracing::{info, instrument};

/// Handle the merge command
#[instrument(skip(args, config, output), fields(schema = %args.target.schema, format = ?args.format))]
pub fn handle_merge(args: MergeArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let target = Target::load(&args.target, config)?;

    let merged = {
        let _timer = Timer::with_details("merge", &args.target.schema);
        target.refs.merge(&target.schema)?
    };

    info!(definitions = merged.definitions.len(), "Schema merged");
    let text = serialize(&merged.into_value(), args.format)?;

    // YAML output already ends with a newline
    output.write(&text)?;
    if !text.ends_with('\n') {
        output.writeln("")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::MergeFormat;
    use crate::handlers::tests::{petstore, target_args};
    use crate::output::tests::buffered;
    use serde_json::Value;

    fn merge(schema: &str, format: MergeFormat) -> String {
        let (_dir, path) = petstore();
        let (mut output, stdout, _) = buffered(true);
        let args = MergeArgs {
            target: target_args(path, schema),
            format,
        };

        handle_merge(args, &Config::default(), &mut output).unwrap();
        stdout.contents()
    }

    #[test]
    fn test_merge_inlines_references() {
        let merged: Value = serde_json::from_str(&merge("Pet", MergeFormat::Json)).unwrap();

        assert_eq!(merged["type"], "object");
        assert_eq!(merged["properties"]["owner"]["properties"]["id"]["example"], 7);
        assert!(merged.get("$defs").is_none());
        assert!(!merged.to_string().contains("$ref"));
    }

    #[test]
    fn test_merge_as_yaml() {
        let text = merge("Owner", MergeFormat::Yaml);
        let merged: Value = serde_yaml::from_str(&text).unwrap();

        assert_eq!(merged["properties"]["id"]["readOnly"], true);
        assert!(text.ends_with('\n'));
    }
}
