//! Environment-driven tuning for property-test suites.
//!
//! Every suite reads the same variables so a CI job can raise or lower case
//! counts across the workspace in one place.

use std::env;

/// Environment variable overriding proptest case counts.
pub const PROPTEST_CASES_ENV_KEY: &str = "PIXSEG_PROPTEST_CASES";
/// Environment variable enabling forked proptest execution.
pub const PROPTEST_FORK_ENV_KEY: &str = "PIXSEG_PROPTEST_FORK";

/// Resolved case count and fork mode for a property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads the profile, falling back to the given defaults when a variable
    /// is unset or malformed.
    ///
    /// # Examples
    /// ```
    /// use pixseg_test_support::proptest_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: read_override(PROPTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: read_override(PROPTEST_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether each case runs in a forked subprocess.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn read_override<T: Copy>(
    key: &'static str,
    default: T,
    parse: fn(&str) -> Result<T, String>,
) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring malformed property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("`{other}` is not a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Sets or clears a variable for the guard's lifetime.
    struct EnvGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvGuard {
        fn new(key: &'static str, value: Option<&str>) -> Self {
            let original = env::var(key).ok();
            match value {
                // SAFETY: tests serialise environment access with ENV_LOCK.
                Some(value) => unsafe { env::set_var(key, value) },
                // SAFETY: tests serialise environment access with ENV_LOCK.
                None => unsafe { env::remove_var(key) },
            }
            Self { key, original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                // SAFETY: tests serialise environment access with ENV_LOCK.
                Some(value) => unsafe { env::set_var(self.key, value) },
                // SAFETY: tests serialise environment access with ENV_LOCK.
                None => unsafe { env::remove_var(self.key) },
            }
        }
    }

    #[rstest]
    #[case::unset(None, 48)]
    #[case::valid(Some("250"), 250)]
    #[case::padded(Some(" 7 "), 7)]
    #[case::zero(Some("0"), 48)]
    #[case::negative(Some("-3"), 48)]
    #[case::garbage(Some("many"), 48)]
    fn cases_fall_back_on_bad_overrides(#[case] raw: Option<&str>, #[case] expected: u32) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _cases = EnvGuard::new(PROPTEST_CASES_ENV_KEY, raw);
        let _fork = EnvGuard::new(PROPTEST_FORK_ENV_KEY, None);

        assert_eq!(ProptestRunProfile::load(48, false).cases(), expected);
    }

    #[rstest]
    #[case::unset(None, false)]
    #[case::yes(Some("YES"), true)]
    #[case::one(Some("1"), true)]
    #[case::off(Some("off"), false)]
    #[case::garbage(Some("maybe"), false)]
    fn fork_flag_parses_common_spellings(#[case] raw: Option<&str>, #[case] expected: bool) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _cases = EnvGuard::new(PROPTEST_CASES_ENV_KEY, None);
        let _fork = EnvGuard::new(PROPTEST_FORK_ENV_KEY, raw);

        assert_eq!(ProptestRunProfile::load(48, false).fork(), expected);
    }
}
