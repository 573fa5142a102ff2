//! Example command handler
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::Target;
use crate::cli::ExampleArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use schemadoc_core::Renderer;
use tracing::instrument;

/// Handle the example command
#[instrument(skip(args, config, output), fields(schema = %args.target.schema))]
pub fn handle_example(args: ExampleArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let target = Target::load(&args.target, config)?;
    let session = Renderer::with_config(&target.refs, &config.render.renderer_config());

    let example = session.example(&target.schema, target.mode)?;
    if example.is_empty() {
        output.warning(&format!("No example available for {}", args.target.schema))?;
        return Ok(());
    }

    output.writeln(&example)
}
