//! Handler for `pomver export`.

use miette::Result;

use pomver_ops::ops_export;
use pomver_ops::ConfigOverrides;
use pomver_util::status;

use crate::cli::ConfigArgs;

pub fn exec(args: &ConfigArgs, overrides: &ConfigOverrides) -> Result<()> {
    let config = super::load_config(args, overrides)?;
    let summary = ops_export::export(&config)?;

    if summary.unresolved > 0 {
        status::status_warn(
            "Unresolved",
            &format!("{} dependencies in total", summary.unresolved),
        );
    }
    status::status("Exported", &summary.to_string());
    Ok(())
}
