use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# WorkSafe configuration

[store]
path = "risk_data.csv"

# Score at or above each cut point moves into that band.
[thresholds]
mild = 40
medium = 60
high = 80

# Optional posture weight overrides
# [scoring.posture_weights]
# "Bending" = 1.25
# "Repetitive Upper Limb" = 1.35
"#;

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(&std::env::current_dir()?, force)
}
