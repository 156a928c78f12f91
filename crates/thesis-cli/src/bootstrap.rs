use thesis_config::ThesisConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration (`.env`, TOML files, `THESIS_*` env), then
/// apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<ThesisConfig> {
    let mut config = ThesisConfig::load_with_dotenv()?;
    apply_overrides(&mut config, flags)?;
    Ok(config)
}

fn apply_overrides(config: &mut ThesisConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
        config.validate()?;
    }
    Ok(())
}
