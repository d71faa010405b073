// Setup command - interactive configuration wizard
use crate::config::Settings;
use crate::error::{Result, SsoError};
use crate::{validate, wizard};
use console::style;
use std::io::{self, IsTerminal};

/// Walks through every setting, seeding each prompt with the stored value,
/// and saves the result only after the final answer.
pub fn execute(sso: Option<String>) -> Result<()> {
    if !io::stdin().is_terminal() {
        return Err(SsoError::NotATerminal);
    }
    validate::compile_patterns();

    let mut settings = Settings::load()?;
    let seed_name = sso.unwrap_or_else(|| settings.default_sso.clone());

    println!("{}", style("ssokit interactive setup").bold());
    println!(
        "{}",
        style("Press Ctrl-C at any time to abort; nothing is saved until the end.").dim()
    );
    println!();

    let name = wizard::prompt_sso_instance(&seed_name)?;
    let mut instance = settings.instance(&name).cloned().unwrap_or_default();

    let host = wizard::prompt_start_url(&start_url_host(&instance.start_url))?;
    instance.start_url = wizard::start_url(&host);
    instance.sso_region = wizard::prompt_sso_region(&instance.sso_region)?;

    let default_region =
        wizard::prompt_default_region(instance.default_region.as_deref().unwrap_or(""))?;
    instance.default_region = match default_region.as_str() {
        "" | "None" => None,
        region => Some(region.to_string()),
    };

    settings.firefox_browser = wizard::prompt_use_firefox(&settings.firefox_browser)?;
    settings.url_action = wizard::prompt_url_action(&settings.url_action)?;
    if settings.url_action == "exec" {
        settings.url_exec_command = wizard::prompt_url_exec_command(&settings.url_exec_command)?;
    }
    settings.browser = wizard::prompt_default_browser(&settings.browser)?;
    settings.console_duration = wizard::prompt_console_duration(settings.console_duration)?;
    settings.history_limit = wizard::prompt_history_limit(settings.history_limit)?;
    settings.history_minutes = wizard::prompt_history_minutes(settings.history_minutes)?;
    settings.log_level = wizard::prompt_log_level(&settings.log_level)?;
    settings.auto_config_check = wizard::prompt_auto_config_check(settings.auto_config_check)?;
    settings.cache_refresh = wizard::prompt_cache_refresh(settings.cache_refresh)?;
    settings.config_profiles_url_action =
        wizard::prompt_config_profiles_url_action(&settings.config_profiles_url_action)?;

    settings.default_sso = name.clone();
    settings.sso.insert(name, instance);
    settings.save()?;

    println!();
    println!(
        "Saved configuration to {}",
        Settings::config_file_path()?.display()
    );
    Ok(())
}

/// Hostname default for re-runs, recovered from a stored start URL.
fn start_url_host(start_url: &str) -> String {
    start_url
        .trim_start_matches("https://")
        .trim_end_matches("/start")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_url_host_recovers_hostname() {
        assert_eq!(
            start_url_host("https://mycompany.awsapps.com/start"),
            "mycompany.awsapps.com"
        );
        assert_eq!(start_url_host(""), "");
    }

    #[test]
    fn test_start_url_host_round_trips_through_wizard() {
        let host = start_url_host("https://mycompany.awsapps.com/start");
        assert_eq!(wizard::start_url(&host), "https://mycompany.awsapps.com/start");
    }
}
