// Interactive prompts for the setup wizard
use crate::config::{AVAILABLE_AWS_REGIONS, CONFIG_OPEN_OPTIONS, LOG_LEVELS, URL_ACTIONS};
use crate::error::{Result, SsoError};
use crate::validate;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

/// Regions which host an AWS SSO endpoint.
/// https://docs.aws.amazon.com/general/latest/gr/sso.html
pub const AVAILABLE_AWS_SSO_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-2",
    "ap-south-1",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "ca-central-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "sa-east-1",
    "us-gov-west-1",
];

const START_FQDN_SUFFIX: &str = ".awsapps.com";
const YES_NO: &[&str] = &["Yes", "No"];

/// Maps a dialoguer failure onto the crate error, distinguishing Ctrl-C
/// so callers can treat an abort differently from a broken terminal.
fn prompt_error(err: dialoguer::Error) -> SsoError {
    if is_cancelled(&err) {
        SsoError::Cancelled
    } else {
        SsoError::Prompt(err)
    }
}

fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

/// Free-form text prompt. The default is seeded as editable initial text;
/// the validator re-runs until it accepts the line.
fn input_with<V>(label: &str, initial: &str, validator: V) -> Result<String>
where
    V: FnMut(&String) -> std::result::Result<(), String>,
{
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(label)
        .allow_empty(true)
        .validate_with(validator);

    if !initial.is_empty() {
        input = input.with_initial_text(initial);
    }

    input.interact_text().map_err(prompt_error)
}

/// Text prompt without validation, used for the exec command arguments
/// where the empty string is the stop marker.
fn input_plain(label: &str, initial: &str) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(label)
        .allow_empty(true);

    if !initial.is_empty() {
        input = input.with_initial_text(initial);
    }

    input.interact_text().map_err(prompt_error)
}

/// Selection prompt over a fixed item list, cursor pre-positioned on the
/// current value.
fn select_from(label: &str, items: &[&str], default: &str) -> Result<String> {
    let theme = ColorfulTheme::default();
    let selection = Select::with_theme(&theme)
        .with_prompt(label)
        .items(items)
        .default(cursor_position(items, default))
        .interact_on(&Term::stderr())
        .map_err(prompt_error)?;

    Ok(items[selection].to_string())
}

fn select_yes_no(label: &str, default_yes: bool) -> Result<bool> {
    let theme = ColorfulTheme::default();
    let selection = Select::with_theme(&theme)
        .with_prompt(label)
        .items(YES_NO)
        .default(yes_no_cursor(default_yes))
        .interact_on(&Term::stderr())
        .map_err(prompt_error)?;

    Ok(selection == 0)
}

/// Position of `value` in `items`, or 0 when absent. Linear scan over the
/// small fixed option lists used here.
pub fn cursor_position(items: &[&str], value: &str) -> usize {
    items.iter().position(|item| *item == value).unwrap_or(0)
}

fn yes_no_cursor(flag: bool) -> usize {
    if flag {
        0
    } else {
        1
    }
}

/// The validators guarantee parseability before this runs, so a failure
/// here means a validator and its prompt disagree.
fn parse_int<T: std::str::FromStr>(val: &str) -> Result<T> {
    val.parse::<T>()
        .map_err(|_| SsoError::InvalidInput(format!("Not an integer: {val}")))
}

/// Appends the AWS SSO domain unless the hostname already carries it.
pub fn start_fqdn(host: &str) -> String {
    if host.ends_with(START_FQDN_SUFFIX) {
        host.to_string()
    } else {
        format!("{host}{START_FQDN_SUFFIX}")
    }
}

/// Full start URL for a hostname accepted by [`prompt_start_url`].
pub fn start_url(host: &str) -> String {
    format!("https://{}/start", start_fqdn(host))
}

/// Asks for the SSO instance name.
pub fn prompt_sso_instance(default: &str) -> Result<String> {
    input_with("SSO instance name (default_sso)", default, |s: &String| {
        validate::sso_instance_name(s)
    })
}

/// Asks for the start URL hostname until the fully-qualified name resolves.
/// Each DNS lookup blocks without a timeout and the retry loop is
/// unbounded, so a dead resolver keeps the wizard on this question.
pub fn prompt_start_url(default: &str) -> Result<String> {
    loop {
        let host = input_with(
            "SSO start URL hostname (XXXXXXX.awsapps.com)",
            default,
            |s: &String| validate::start_url_hostname(s),
        )?;

        let fqdn = start_fqdn(&host);
        match validate::resolvable(&fqdn) {
            Ok(()) => return Ok(host),
            Err(e) => tracing::warn!("{e}"),
        }
    }
}

/// Picks the region hosting the SSO instance.
pub fn prompt_sso_region(default: &str) -> Result<String> {
    select_from(
        "AWS SSO region (sso_region)",
        AVAILABLE_AWS_SSO_REGIONS,
        default,
    )
}

/// Picks the default region for connecting to AWS. Returns immediately
/// when the stored value is already a valid choice; an interactive "None"
/// answer maps to the empty string.
pub fn prompt_default_region(default: &str) -> Result<String> {
    let mut regions = vec!["None"];
    regions.extend_from_slice(AVAILABLE_AWS_REGIONS);

    if regions.iter().any(|region| *region == default) {
        return Ok(default.to_string());
    }

    let val = select_from(
        "Default region for connecting to AWS (default_region)",
        &regions,
        default,
    )?;
    if val == "None" {
        Ok(String::new())
    } else {
        Ok(val)
    }
}

/// First step of the Firefox chain: asks whether to open URLs in Firefox
/// containers. Returns the binary path from the second step, or "" when
/// containers stay off.
pub fn prompt_use_firefox(default: &str) -> Result<String> {
    if !select_yes_no("Use Firefox containers to open URLs?", !default.is_empty())? {
        return Ok(String::new());
    }
    prompt_firefox_path(default)
}

/// Second step of the Firefox chain: asks for a container-capable Firefox
/// binary, seeded with the platform default when nothing is configured yet.
pub fn prompt_firefox_path(default: &str) -> Result<String> {
    println!("Firefox containers require the 'Open external links in a container' plugin:");
    println!("\thttps://addons.mozilla.org/en-US/firefox/addon/open-url-in-container/");

    input_with(
        "Path to a Firefox binary that supports containers",
        &firefox_default_path(default),
        |s: &String| validate::binary(s),
    )
}

/// Platform default location of the Firefox binary; an already configured
/// path wins.
fn firefox_default_path(current: &str) -> String {
    firefox_default_path_for(std::env::consts::OS, current)
}

fn firefox_default_path_for(os: &str, current: &str) -> String {
    if !current.is_empty() {
        return current.to_string();
    }

    match os {
        "macos" => "/Applications/Firefox.app/Contents/MacOS/firefox".to_string(),
        "linux" => "/usr/bin/firefox".to_string(),
        "windows" => "\\Program Files\\Mozilla Firefox\\firefox.exe".to_string(),
        _ => String::new(),
    }
}

/// Picks the action taken with console sign-in URLs.
pub fn prompt_url_action(default: &str) -> Result<String> {
    select_from(
        "Default action to take with URLs (url_action)",
        URL_ACTIONS,
        default,
    )
}

/// Picks how URLs open when triggered through `$AWS_PROFILE`, restricted
/// to actions that work without a terminal to print to.
pub fn prompt_config_profiles_url_action(default: &str) -> Result<String> {
    select_from(
        "How to open URLs via $AWS_PROFILE (config_profiles_url_action)",
        CONFIG_OPEN_OPTIONS,
        default,
    )
}

/// Incremental state for the url_exec_command prompt: the binary first,
/// then one argument per line until an empty line. Argument defaults from
/// the previous configuration only survive while the binary stays the same.
#[derive(Debug)]
pub struct ExecCommand {
    defaults: Vec<String>,
    value: Vec<String>,
}

impl ExecCommand {
    pub fn new(defaults: &[String]) -> Self {
        Self {
            defaults: defaults.to_vec(),
            value: Vec::new(),
        }
    }

    /// Default shown for the binary prompt.
    pub fn binary_default(&self) -> &str {
        self.defaults.first().map(String::as_str).unwrap_or("")
    }

    /// Records the binary; a binary different from the previous one
    /// invalidates the recorded argument defaults.
    pub fn set_binary(&mut self, binary: String) {
        if self.defaults.first() != Some(&binary) {
            self.defaults.clear();
        }
        self.value.push(binary);
    }

    /// Default shown for argument number `arg_num` (the binary is #0).
    pub fn arg_default(&self, arg_num: usize) -> &str {
        self.defaults.get(arg_num).map(String::as_str).unwrap_or("")
    }

    /// Appends one argument. Returns false once an empty line ends the
    /// list.
    pub fn push_arg(&mut self, arg: String) -> bool {
        if arg.is_empty() {
            return false;
        }
        self.value.push(arg);
        true
    }

    pub fn into_value(self) -> Vec<String> {
        self.value
    }
}

/// Collects the command used to open URLs, one line per argument.
pub fn prompt_url_exec_command(defaults: &[String]) -> Result<Vec<String>> {
    println!("Enter the command and its arguments for url_exec_command, one per line:");

    let mut command = ExecCommand::new(defaults);
    let binary = input_with(
        "Binary to execute to open URLs (url_exec_command)",
        command.binary_default(),
        |s: &String| validate::binary(s),
    )?;
    command.set_binary(binary);

    let mut arg_num = 1;
    loop {
        let arg = input_plain(
            &format!("Argument #{arg_num} (empty string to stop)"),
            command.arg_default(arg_num),
        )?;
        if !command.push_arg(arg) {
            break;
        }
        arg_num += 1;
    }

    Ok(command.into_value())
}

/// Asks for the browser used by the `open` action, empty for the system
/// default.
pub fn prompt_default_browser(default: &str) -> Result<String> {
    input_with(
        "Path to browser to use, empty for system default (browser)",
        default,
        |s: &String| validate::binary_or_empty(s),
    )
}

/// Console session lifetime in minutes.
pub fn prompt_console_duration(default: i32) -> Result<i32> {
    let val = input_with(
        "Minutes before AWS console sessions expire (console_duration)",
        &default.to_string(),
        |s: &String| validate::console_duration(s),
    )?;
    parse_int(&val)
}

/// Maximum number of history entries to keep.
pub fn prompt_history_limit(default: i64) -> Result<i64> {
    let val = input_with(
        "Maximum number of history items to keep (history_limit)",
        &default.to_string(),
        |s: &String| validate::integer(s),
    )?;
    parse_int(&val)
}

/// How long history entries stay around.
pub fn prompt_history_minutes(default: i64) -> Result<i64> {
    let val = input_with(
        "Number of minutes to keep items in history (history_minutes)",
        &default.to_string(),
        |s: &String| validate::integer(s),
    )?;
    parse_int(&val)
}

/// Picks the logging verbosity.
pub fn prompt_log_level(default: &str) -> Result<String> {
    select_from("Log level (log_level)", LOG_LEVELS, default)
}

/// Yes/No toggle for automatic role cache refreshes.
pub fn prompt_auto_config_check(default: bool) -> Result<bool> {
    select_yes_no(
        "Automatically update the role cache? (auto_config_check)",
        default,
    )
}

/// Hours between role cache refreshes.
pub fn prompt_cache_refresh(default: i64) -> Result<i64> {
    let val = input_with(
        "Hours between role cache refreshes, 0 to disable (cache_refresh)",
        &default.to_string(),
        |s: &String| validate::integer(s),
    )?;
    parse_int(&val)
}
