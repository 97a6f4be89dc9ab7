//! Settings validation. Collects every problem into a single error.

use embedbot_common::ConfigError;

use crate::schema::WidgetSettings;

const MAX_RESPONSE_DELAY_MS: u64 = 10_000;
const MAX_IDLE_NUDGE_MS: u64 = 600_000;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

pub fn validate(settings: &WidgetSettings) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_api_base(&mut errors, &settings.api_base);
    validate_max(
        &mut errors,
        "response_delay_ms",
        settings.response_delay_ms,
        MAX_RESPONSE_DELAY_MS,
    );
    validate_max(&mut errors, "idle_nudge_ms", settings.idle_nudge_ms, MAX_IDLE_NUDGE_MS);
    validate_max(
        &mut errors,
        "request_timeout_secs",
        settings.request_timeout_secs,
        MAX_REQUEST_TIMEOUT_SECS,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_api_base(errors: &mut Vec<String>, api_base: &str) {
    if api_base.trim().is_empty() {
        errors.push("api_base is empty".into());
        return;
    }
    if api_base.chars().any(char::is_whitespace) {
        errors.push(format!("api_base = {api_base:?} contains whitespace"));
        return;
    }
    let Some(rest) = api_base
        .strip_prefix("https://")
        .or_else(|| api_base.strip_prefix("http://"))
    else {
        errors.push(format!("api_base = {api_base:?} must be an http(s) URL"));
        return;
    };

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = match authority.strip_prefix('[') {
        Some(v6) => v6.split(']').next().unwrap_or_default(),
        None => authority.split(':').next().unwrap_or_default(),
    };
    if host.is_empty() {
        errors.push(format!("api_base = {api_base:?} has no host"));
    }
}

fn validate_max(errors: &mut Vec<String>, name: &str, value: u64, max: u64) {
    if value > max {
        errors.push(format!("{name} = {value} is out of range [0, {max}]"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&WidgetSettings::default()).is_ok());
    }

    #[test]
    fn rejects_non_http_base() {
        let s = WidgetSettings::default().with_api_base("ws://example.com");
        let err = validate(&s).unwrap_err().to_string();
        assert!(err.contains("http(s)"));
    }

    #[test]
    fn rejects_empty_and_hostless_base() {
        let err = validate(&WidgetSettings::default().with_api_base("  "))
            .unwrap_err()
            .to_string();
        assert!(err.contains("empty"));

        let err = validate(&WidgetSettings::default().with_api_base("https://"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("no host"));
    }

    #[test]
    fn rejects_whitespace_and_portonly_hosts() {
        let err = validate(&WidgetSettings::default().with_api_base("https:// x"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("whitespace"));

        for base in ["http://:80", "http://:80/api", "https:///api", "http://[]:8000"] {
            let err = validate(&WidgetSettings::default().with_api_base(base))
                .unwrap_err()
                .to_string();
            assert!(err.contains("no host"), "{base}: {err}");
        }
    }

    #[test]
    fn accepts_ports_paths_and_ipv6() {
        for base in [
            "http://127.0.0.1:8000/api",
            "https://bots.example.com",
            "http://[::1]:8000/api",
            "http://localhost:8000",
        ] {
            assert!(validate(&WidgetSettings::default().with_api_base(base)).is_ok(), "{base}");
        }
    }

    #[test]
    fn collects_all_errors() {
        let s = WidgetSettings::default()
            .with_api_base("")
            .with_response_delay_ms(60_000)
            .with_request_timeout_secs(3600);
        let err = validate(&s).unwrap_err().to_string();
        assert!(err.contains("api_base"));
        assert!(err.contains("response_delay_ms"));
        assert!(err.contains("request_timeout_secs"));
    }

    #[test]
    fn boundaries_are_inclusive() {
        let s = WidgetSettings::default()
            .with_response_delay_ms(MAX_RESPONSE_DELAY_MS)
            .with_idle_nudge_ms(MAX_IDLE_NUDGE_MS)
            .with_request_timeout_secs(MAX_REQUEST_TIMEOUT_SECS);
        assert!(validate(&s).is_ok());
    }
}
