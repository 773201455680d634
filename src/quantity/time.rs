use chrono::TimeDelta;

quantity!(Years, suffix: " years", precision: 2);

impl Years {
    /// Average Gregorian year length in seconds.
    const SECONDS: f64 = 365.25 * 24.0 * 3600.0;
}

impl From<TimeDelta> for Years {
    fn from(time_delta: TimeDelta) -> Self {
        Self(time_delta.as_seconds_f64() / Self::SECONDS)
    }
}
