// Tags command - prints each role ARN with its resolved tags
use crate::config::Settings;
use crate::error::Result;
use crate::roles::{RoleCache, RoleSource};
use std::io::{self, Write};

pub fn execute(sso: Option<String>) -> Result<()> {
    let settings = Settings::load()?;
    let instance = sso.unwrap_or_else(|| settings.default_sso.clone());
    tracing::debug!("Listing role tags for SSO instance {}", instance);

    let mut cache = RoleCache::for_instance(&instance)?;
    print_role_tags(&mut cache, &mut io::stdout())?;

    if cache.is_stale(settings.cache_refresh) {
        tracing::warn!(
            "Role cache for {} is older than {} hours, refresh it to pick up new roles",
            instance,
            settings.cache_refresh
        );
    }
    Ok(())
}

/// Refreshes the source, then prints every role ARN followed by its tags,
/// one `key: value` pair per indented line, with a blank line after each
/// role. A failed refresh prints nothing.
pub fn print_role_tags<S: RoleSource, W: Write>(source: &mut S, out: &mut W) -> Result<()> {
    source.refresh()?;

    for role in source.roles() {
        writeln!(out, "{}", role.arn)?;
        for (key, value) in role.all_tags() {
            writeln!(out, "  {}: {}", key, value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
