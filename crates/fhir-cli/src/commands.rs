use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span};

use fhir_cli::pipeline::{Pipeline, PipelineOptions, ValidationLevel};
use fhir_ingest::{CsvOptions, CsvRowSource};
use fhir_map::{MappingSpec, RecordBuilder};
use fhir_model::{TypeCatalog, default_catalog};
use fhir_output::{OutputFormat, create_sink};
use fhir_validate::CompositeValidator;

use crate::cli::{ConvertArgs, OutputFormatArg, TypesArgs, ValidationLevelArg};
use crate::summary::{fields_table, types_table};
use crate::types::ConvertResult;

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let span = info_span!("convert", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let spec = MappingSpec::load(&args.mapping)
        .with_context(|| format!("load mapping {}", args.mapping.display()))?;
    let source = CsvRowSource::open(
        &args.input,
        &CsvOptions {
            delimiter: args.delimiter,
        },
    )
    .with_context(|| format!("open {}", args.input.display()))?;
    spec.validate_columns(source.columns())
        .context("mapping does not match CSV header")?;

    let builder = RecordBuilder::new(&spec, default_catalog()).context("prepare mapping")?;
    let validator = args.validate.then(CompositeValidator::standard);
    let format = output_format(args.format);
    let output = args
        .output
        .as_ref()
        .filter(|path| path.as_os_str() != "-")
        .cloned();
    let mut sink = create_sink(output.as_deref(), format, args.max_resources)
        .context("open output")?;
    debug!(elapsed_ms = start.elapsed().as_millis(), "setup complete");

    info!(
        resource = builder.resource_type(),
        columns = source.columns().len(),
        "converting"
    );
    let mut pipeline = Pipeline::new(&builder).with_options(PipelineOptions {
        workers: args.workers,
        queue_depth: None,
        validation_level: validation_level(args.validation_level),
    });
    if let Some(validator) = &validator {
        pipeline = pipeline.with_validator(validator);
    }
    let summary = pipeline
        .run(source, sink.as_mut())
        .context("conversion aborted")?;
    info!(
        written = summary.written,
        failed = summary.failed,
        "conversion finished"
    );

    Ok(ConvertResult {
        resource_type: builder.resource_type(),
        input: args.input.clone(),
        output,
        format,
        validated: validator.is_some(),
        summary,
        elapsed: start.elapsed(),
    })
}

pub fn run_types(args: &TypesArgs) -> Result<()> {
    let catalog = default_catalog();
    match &args.resource {
        None => println!("{}", types_table(&catalog.shapes())),
        Some(name) => {
            let shape = catalog
                .lookup(name)
                .ok_or_else(|| anyhow!("unknown resource type: {name}"))?;
            println!("{}", shape.name);
            println!("{}", fields_table(shape.fields));
        }
    }
    Ok(())
}

fn output_format(format: OutputFormatArg) -> OutputFormat {
    match format {
        OutputFormatArg::Bundle => OutputFormat::Bundle,
        OutputFormatArg::Ndjson => OutputFormat::Ndjson,
    }
}

fn validation_level(level: ValidationLevelArg) -> ValidationLevel {
    match level {
        ValidationLevelArg::Error => ValidationLevel::Error,
        ValidationLevelArg::Warn => ValidationLevel::Warn,
    }
}
