//! Value formatting shared by the console views and the Markdown report.

/// Walks a byte quantity up through KB, MB, GB and TB, two decimals.
pub fn format_bytes(value: f64) -> String {
    let mut scaled = value;
    for unit in ["B", "KB", "MB", "GB"] {
        if scaled.abs() < 1024.0 {
            return format!("{scaled:.2} {unit}");
        }
        scaled /= 1024.0;
    }
    format!("{scaled:.2} TB")
}

/// Formats a sample value for display: whole numbers without decimals,
/// everything else with two.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Picks byte formatting for byte-valued families by name. cAdvisor keeps
/// the convention of a `_bytes` component in such names.
pub fn format_for_metric(metric_name: &str, value: f64) -> String {
    if metric_name.contains("bytes") {
        format_bytes(value)
    } else {
        format_value(value)
    }
}
