use crate::error::Result;
use crate::runner::CommandRunner;

/// Pick the command used to open URLs.
///
/// The configured command wins, then `$BROWSER`, then the platform opener.
pub fn browser_command(configured: Option<Vec<String>>, env_browser: Option<&str>) -> Vec<String> {
    if let Some(cmd) = configured
        && !cmd.is_empty()
    {
        return cmd;
    }
    if let Some(env) = env_browser {
        let cmd: Vec<String> = env.split_whitespace().map(str::to_owned).collect();
        if !cmd.is_empty() {
            return cmd;
        }
    }
    platform_opener()
}

fn platform_opener() -> Vec<String> {
    let cmd: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(target_os = "windows") {
        &["cmd", "/C", "start", ""]
    } else {
        &["xdg-open"]
    };
    cmd.iter().map(|s| (*s).to_owned()).collect()
}

/// Open `url` with `command`; the URL is always the final argument.
pub fn open_in_browser(runner: &dyn CommandRunner, command: &[String], url: &str) -> Result<()> {
    let mut args: Vec<&str> = command.iter().map(String::as_str).collect();
    args.push(url);
    tracing::debug!("opening {url}");
    runner.launch(&args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::runner::RunError;

    /// Records launched commands; captured runs are not expected.
    #[derive(Default)]
    struct Recorder(RefCell<Vec<Vec<String>>>);

    impl CommandRunner for Recorder {
        fn run(&self, args: &[&str]) -> std::result::Result<String, RunError> {
            panic!("opener must not capture output: {args:?}");
        }

        fn launch(&self, args: &[&str]) -> std::result::Result<(), RunError> {
            self.0
                .borrow_mut()
                .push(args.iter().map(|s| (*s).to_owned()).collect());
            Ok(())
        }
    }

    #[test]
    fn configured_command_wins() {
        let cmd = browser_command(Some(vec!["firefox".into(), "--new-tab".into()]), Some("w3m"));
        assert_eq!(cmd, vec!["firefox", "--new-tab"]);
    }

    #[test]
    fn env_browser_is_split() {
        let cmd = browser_command(None, Some("lynx -accept_all_cookies"));
        assert_eq!(cmd, vec!["lynx", "-accept_all_cookies"]);
    }

    #[test]
    fn falls_back_to_platform_opener() {
        let cmd = browser_command(None, Some("  "));
        assert!(!cmd.is_empty());
        assert_eq!(cmd, platform_opener());
    }

    #[test]
    fn opener_is_launched_with_url_last() {
        let rec = Recorder::default();
        open_in_browser(&rec, &["open".to_owned()], "https://github.com/OWNER/REPO/pull/10").unwrap();
        let calls = rec.0.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].last().map(String::as_str),
            Some("https://github.com/OWNER/REPO/pull/10")
        );
    }
}
