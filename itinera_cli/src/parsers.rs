use jiff::SpanRelativeTo;

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds.abs()));
    }

    Err(String::from("Invalid duration"))
}

/// Like [`parse_duration`], for timeouts: negative and zero durations are refused.
pub fn parse_timeout(input: &str) -> Result<std::time::Duration, String> {
    let duration = parse_duration(input)?;

    if !duration.is_positive() {
        return Err(String::from("Timeout must be positive"));
    }

    std::time::Duration::try_from(duration).map_err(|err| err.to_string())
}
