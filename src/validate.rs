// Input validators shared by the setup prompts
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;

/// Characters allowed in an SSO instance name. The name becomes part of
/// file names and environment variable values, so it stays conservative.
static SSO_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_@:-]+$").expect("valid pattern"));

/// A bare AWS SSO subdomain, optionally already carrying the
/// `.awsapps.com` suffix.
static HOSTNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z0-9-]+)(\.awsapps\.com)?$").expect("valid pattern"));

/// Forces the shared patterns to compile before the first prompt is shown,
/// so a bad pattern surfaces at startup instead of mid-wizard.
pub fn compile_patterns() {
    Lazy::force(&SSO_NAME_RE);
    Lazy::force(&HOSTNAME_RE);
}

/// Accepts any base-10 signed integer.
pub fn integer(input: &str) -> Result<(), String> {
    match input.parse::<i64>() {
        Ok(_) => Ok(()),
        Err(_) => Err("Value must be a valid integer".to_string()),
    }
}

/// Accepts an integer number of minutes between 15 minutes and 36 hours,
/// the range the AWS federation endpoint allows for console sessions.
pub fn console_duration(input: &str) -> Result<(), String> {
    match input.parse::<i64>() {
        Ok(minutes) if (15..=2160).contains(&minutes) => Ok(()),
        _ => Err("Value must be a valid integer between 15 and 2160".to_string()),
    }
}

/// Accepts a path to an existing executable file.
pub fn binary(input: &str) -> Result<(), String> {
    let metadata = fs::metadata(input).map_err(|e| e.to_string())?;
    if !metadata.is_file() {
        return Err(format!("Not a valid executable: {input}"));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o100 == 0 {
            return Err(format!("Not a valid executable: {input}"));
        }
    }

    Ok(())
}

/// Like [`binary`], but the empty string is allowed so the setting can be
/// left unset.
pub fn binary_or_empty(input: &str) -> Result<(), String> {
    if input.is_empty() {
        return Ok(());
    }
    binary(input)
}

/// Accepts a non-empty SSO instance name made of letters, digits and
/// `-_@:`.
pub fn sso_instance_name(input: &str) -> Result<(), String> {
    if !input.is_empty() && SSO_NAME_RE.is_match(input) {
        Ok(())
    } else {
        Err(format!("Invalid SSO instance name: {input}"))
    }
}

/// Accepts an AWS SSO start URL hostname: a subdomain with or without the
/// `.awsapps.com` suffix, shorter than 64 characters.
pub fn start_url_hostname(input: &str) -> Result<(), String> {
    if !input.is_empty() && input.len() < 64 && HOSTNAME_RE.is_match(input) {
        Ok(())
    } else {
        Err(format!("Invalid DNS hostname: {input}"))
    }
}

/// Checks that `fqdn` resolves to at least one address. Resolution happens
/// via the system resolver on port 443 and blocks without a timeout.
pub fn resolvable(fqdn: &str) -> Result<(), String> {
    use std::net::ToSocketAddrs;

    match (fqdn, 443).to_socket_addrs() {
        Ok(mut addrs) => {
            if addrs.next().is_some() {
                Ok(())
            } else {
                Err(format!("No addresses found for {fqdn}"))
            }
        }
        Err(e) => Err(format!("Unable to resolve {fqdn}: {e}")),
    }
}
