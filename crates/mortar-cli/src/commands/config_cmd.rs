use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub fn run_config_init(
    explicit_profile: Option<&str>,
    remote_url: Option<String>,
    api_key: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(explicit_profile);

    {
        let profile = config.profile_mut_or_default(&profile_name);
        if remote_url.is_some() {
            profile.remote_url = remote_url;
        }
        if api_key.is_some() {
            profile.api_key = api_key;
        }
    }

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!("Profile '{profile_name}' saved to {}", path.display());
    Ok(())
}
