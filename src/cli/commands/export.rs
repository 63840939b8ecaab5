use crate::cli::commands::month_or_current;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::tracker::Tracker;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        month,
        force,
    } = cmd
    {
        let month = month_or_current(month)?;
        let tracker = Tracker::open(cfg)?;

        if let Some(path) = ExportLogic::export(tracker.state(), *format, file, &month, *force)? {
            ttlog_quiet(
                tracker.conn(),
                "export",
                &path.to_string_lossy(),
                &format!("{} export of {}", format.as_str(), month),
            );
        }

        tracker.finish()?;
    }
    Ok(())
}
