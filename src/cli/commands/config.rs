use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config, is_test: bool) -> AppResult<()> {
    let Commands::Config {
        print_config,
        rollover,
        rounding,
        granularity,
        enable_rounding,
        disable_rounding,
    } = cmd
    else {
        return Ok(());
    };

    let mut updated = cfg.clone();
    let mut changed = false;

    if let Some(r) = rollover {
        updated.day_rollover_time = r.clone();
        changed = true;
    }
    if let Some(m) = rounding {
        updated.rounding_method = m.clone();
        changed = true;
    }
    if let Some(g) = granularity {
        updated.rounding_granularity_minutes = *g;
        changed = true;
    }
    if *enable_rounding {
        updated.rounding_enabled = true;
        changed = true;
    }
    if *disable_rounding {
        updated.rounding_enabled = false;
        changed = true;
    }

    if changed && !is_test {
        updated.save().map_err(|_| AppError::ConfigSave)?;
        success("Configuration updated.");
    }

    if *print_config || !changed {
        let yaml = serde_yaml::to_string(&updated).map_err(|_| AppError::ConfigLoad)?;
        println!("{}", yaml);
    }

    Ok(())
}
