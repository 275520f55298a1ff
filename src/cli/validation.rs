use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if args.page == Some(0) {
        return Err("invalid page, expected a number starting at 1".to_string());
    }
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json or html"
            ));
        }
    }
    if let Some(raw) = args.source.as_deref() {
        reqwest::Url::parse(raw.trim()).map_err(|e| format!("invalid --source '{raw}': {e}"))?;
    }
    if args.source.is_some() && args.file.is_some() {
        return Err("use either --source or --file, not both".to_string());
    }
    Ok(())
}
