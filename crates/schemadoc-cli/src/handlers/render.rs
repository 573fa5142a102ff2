//! Render and body command handlers
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::Target;
use crate::cli::{BodyArgs, RenderArgs};
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use schemadoc_core::markdown::block;
use schemadoc_core::Renderer;
use tracing::{info, instrument};

/// Handle the render command: the schema table followed by its entity sections
#[instrument(skip(args, config, output), fields(schema = %args.target.schema))]
pub fn handle_render(args: RenderArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.info(&format!("Rendering {} from {}", args.target.schema, args.target.document.display()))?;

    let target = Target::load(&args.target, config)?;
    let session = Renderer::with_config(&target.refs, &config.render.renderer_config());

    let document = {
        let _timer = Timer::with_details("render", &args.target.schema);
        let table = session.table(&target.schema, target.mode)?;
        let sections = session.refs(target.mode)?;

        info!(entities = sections.len(), mode = %target.mode, "Schema rendered");
        block(std::iter::once(table).chain(sections))
    };

    if document.is_empty() {
        output.warning("Nothing to render for this schema")?;
    }

    output.document(&document, args.save_to.as_deref())
}

/// Handle the body command: a full `Body` section for a payload schema
#[instrument(skip(args, config, output), fields(schema = %args.target.schema))]
pub fn handle_body(args: BodyArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.info(&format!("Rendering body of {}", args.target.schema))?;

    let target = Target::load(&args.target, config)?;
    let session = Renderer::with_config(&target.refs, &config.render.renderer_config());

    let document = {
        let _timer = Timer::with_details("body", &args.target.schema);
        session.body(Some(&target.schema), target.mode, args.content_type.as_deref())?
    };

    info!(linked = session.linked_refs().len(), "Body rendered");
    output.document(&document, args.save_to.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Mode;
    use crate::handlers::tests::{petstore, target_args};
    use crate::output::tests::buffered;

    #[test]
    fn test_render_links_entities() {
        let (_dir, path) = petstore();
        let (mut output, stdout, _) = buffered(true);
        let args = RenderArgs {
            target: target_args(path, "Pet"),
            save_to: None,
        };

        handle_render(args, &Config::default(), &mut output).unwrap();

        let rendered = stdout.contents();
        assert!(rendered.starts_with("#|"));
        assert!(rendered.contains("[Owner](#entity-Owner)"));
        assert!(rendered.contains("### Owner {#entity-Owner}"));
        assert!(rendered.contains("_name_"));
        assert!(!rendered.contains("_secret_"));
    }

    #[test]
    fn test_render_write_mode_hides_read_only() {
        let (_dir, path) = petstore();
        let (mut output, stdout, _) = buffered(true);
        let mut target = target_args(path, "Owner");
        target.mode = Some(Mode::Write);

        handle_render(RenderArgs { target, save_to: None }, &Config::default(), &mut output).unwrap();

        assert!(!stdout.contents().contains("_id_"));
    }

    #[test]
    fn test_render_saves_to_file() {
        let (dir, path) = petstore();
        let save_to = dir.path().join("docs/pet.md");
        let (mut output, stdout, _) = buffered(true);
        let args = RenderArgs {
            target: target_args(path, "Pet"),
            save_to: Some(save_to.clone()),
        };

        handle_render(args, &Config::default(), &mut output).unwrap();

        assert!(stdout.contents().is_empty());
        assert!(std::fs::read_to_string(save_to).unwrap().contains("### Owner"));
    }

    #[test]
    fn test_body_section() {
        let (_dir, path) = petstore();
        let (mut output, stdout, _) = buffered(true);
        let args = BodyArgs {
            target: target_args(path, "Pet"),
            content_type: Some("application/json".to_string()),
            save_to: None,
        };

        handle_body(args, &Config::default(), &mut output).unwrap();

        let rendered = stdout.contents();
        assert!(rendered.starts_with("<div class=\"openapi-entity\">\n\n### Body"));
        assert!(rendered.contains("{% cut \"application/json\" %}"));
        assert!(rendered.contains("\"name\": \"Rex\""));
    }
}
