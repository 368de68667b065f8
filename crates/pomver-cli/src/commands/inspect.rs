//! Handler for `pomver inspect`.

use miette::Result;

use pomver_ops::ops_inspect::{self, InspectFormat, InspectOptions};
use pomver_ops::ConfigOverrides;

use crate::cli::{ConfigArgs, OutputFormat};

pub fn exec(args: &ConfigArgs, app: Option<String>, format: OutputFormat) -> Result<()> {
    let overrides = ConfigOverrides {
        root_dir: args.root.clone(),
        ..ConfigOverrides::default()
    };
    let config = super::load_config(args, &overrides)?;

    let opts = InspectOptions {
        app,
        format: match format {
            OutputFormat::Text => InspectFormat::Text,
            OutputFormat::Json => InspectFormat::Json,
        },
    };
    let rendered = ops_inspect::inspect(&config, &opts)?;
    print!("{rendered}");
    if opts.format == InspectFormat::Json {
        println!();
    }
    Ok(())
}
