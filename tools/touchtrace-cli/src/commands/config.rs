//! Print or persist the effective configuration.

use touchtrace_common::config::{config_file_path, AppConfig};

pub fn run(app_config: &AppConfig, save: bool) -> anyhow::Result<()> {
    app_config.classifier.validate()?;
    for (name, profile) in &app_config.profiles {
        profile
            .validate()
            .map_err(|e| anyhow::anyhow!("Profile '{name}' is invalid: {e}"))?;
    }

    println!("{}", serde_json::to_string_pretty(app_config)?);

    if save {
        let path = app_config.save()?;
        eprintln!("Config saved to: {}", path.display());
    } else {
        eprintln!("Config file: {}", config_file_path().display());
    }

    Ok(())
}
