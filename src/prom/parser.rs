use std::collections::HashMap;

use thiserror::Error;

use super::model::{MetricType, Sample, Snapshot};

/// One classified line of exposition text.
#[derive(Debug, PartialEq)]
pub(crate) enum ParsedLine {
    Blank,
    /// A `#` line that is neither HELP nor TYPE, or one missing its metric
    /// name. Ignored, never an error.
    Comment,
    Help {
        metric_name: String,
        text: String,
    },
    Type {
        metric_name: String,
        metric_type: MetricType,
    },
    Sample(Sample),
    /// A non-comment line that failed to parse as a sample.
    Malformed,
}

/// Why a candidate sample line was rejected.
#[derive(Debug, PartialEq, Eq, Error)]
pub(crate) enum SampleError {
    #[error("missing metric name")]
    MissingName,
    #[error("label set is not terminated by '}}'")]
    UnterminatedLabels,
    #[error("malformed label pair")]
    BadLabel,
    #[error("missing value")]
    MissingValue,
    #[error("unparseable value")]
    BadValue,
    #[error("unparseable or negative timestamp")]
    BadTimestamp,
    #[error("trailing tokens after the timestamp")]
    TrailingTokens,
}

pub(crate) fn parse_snapshot(text: &str) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for line in text.lines() {
        let parsed = classify_line(line);
        if matches!(parsed, ParsedLine::Malformed) {
            log::debug!("skipping malformed line: {line:?}");
        }
        snapshot.record(parsed);
    }
    if snapshot.malformed_lines() > 0 {
        log::warn!("skipped {} malformed line(s)", snapshot.malformed_lines());
    }
    snapshot
}

/// Decides what one line is. Surrounding whitespace never matters.
pub(crate) fn classify_line(raw: &str) -> ParsedLine {
    let line = raw.trim();
    if line.is_empty() {
        return ParsedLine::Blank;
    }
    if let Some(rest) = line.strip_prefix('#') {
        return classify_comment(rest.trim_start());
    }
    match parse_sample(line) {
        Ok(sample) => ParsedLine::Sample(sample),
        Err(_) => ParsedLine::Malformed,
    }
}

/// `rest` is everything after the `#`, left-trimmed. A HELP or TYPE keyword
/// without the tokens it needs degrades to a plain comment.
fn classify_comment(rest: &str) -> ParsedLine {
    let (keyword, remainder) = match rest.split_once(char::is_whitespace) {
        Some((keyword, remainder)) => (keyword, remainder.trim_start()),
        None => (rest, ""),
    };
    match keyword {
        "HELP" => {
            let (metric_name, text) = match remainder.split_once(char::is_whitespace) {
                Some((name, text)) => (name, text.trim_start()),
                None => (remainder, ""),
            };
            if metric_name.is_empty() {
                return ParsedLine::Comment;
            }
            ParsedLine::Help {
                metric_name: metric_name.to_string(),
                text: unescape_help(text),
            }
        }
        "TYPE" => {
            let mut tokens = remainder.split_whitespace();
            let metric_name = match tokens.next() {
                Some(name) => name,
                None => return ParsedLine::Comment,
            };
            let token = match tokens.next() {
                Some(token) => token,
                None => return ParsedLine::Comment,
            };
            ParsedLine::Type {
                metric_name: metric_name.to_string(),
                metric_type: MetricType::parse(token),
            }
        }
        _ => ParsedLine::Comment,
    }
}

/// HELP text escapes `\\` and `\n`. Unknown escapes pass through untouched.
fn unescape_help(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Parses `name{label="value",...} value [timestamp]`. The label set and the
/// timestamp are optional; the timestamp is non-negative milliseconds since
/// the epoch.
pub(crate) fn parse_sample(line: &str) -> Result<Sample, SampleError> {
    let name_end = line.find(['{', ' ', '\t']).unwrap_or(line.len());
    let metric_name = &line[..name_end];
    if metric_name.is_empty() {
        return Err(SampleError::MissingName);
    }

    let (labels, rest) = if line[name_end..].starts_with('{') {
        let (labels, consumed) = scan_labels(&line[name_end + 1..])?;
        (labels, &line[name_end + 1 + consumed..])
    } else {
        (HashMap::new(), &line[name_end..])
    };

    let mut tokens = rest.split_whitespace();
    let value_token = tokens.next().ok_or(SampleError::MissingValue)?;
    // f64 parsing already accepts +Inf, -Inf and NaN in any casing.
    let value: f64 = value_token.parse().map_err(|_| SampleError::BadValue)?;

    let timestamp = match tokens.next() {
        Some(token) => {
            let millis: i64 = token.parse().map_err(|_| SampleError::BadTimestamp)?;
            if millis < 0 {
                return Err(SampleError::BadTimestamp);
            }
            Some(millis)
        }
        None => None,
    };
    if tokens.next().is_some() {
        return Err(SampleError::TrailingTokens);
    }

    Ok(Sample {
        metric_name: metric_name.to_string(),
        labels,
        value,
        timestamp,
    })
}

/// Scans a label set starting just after the opening `{`.
///
/// Quotes are authoritative: `,`, `}` and spaces inside a quoted value are
/// content, and `\"`, `\\` and `\n` escapes are decoded. A later duplicate of
/// a label name wins. Returns the labels plus the number of bytes consumed
/// including the closing `}`.
fn scan_labels(input: &str) -> Result<(HashMap<String, String>, usize), SampleError> {
    let mut labels = HashMap::new();
    let mut chars = input.char_indices().peekable();

    loop {
        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }
        match chars.peek() {
            Some(&(i, '}')) => {
                chars.next();
                return Ok((labels, i + 1));
            }
            Some(_) => {}
            None => return Err(SampleError::UnterminatedLabels),
        }

        // Label name runs up to the '='.
        let mut name = String::new();
        loop {
            match chars.next() {
                Some((_, '=')) => break,
                Some((_, c)) if c == '}' || c == ',' || c == '"' => {
                    return Err(SampleError::BadLabel)
                }
                Some((_, c)) => name.push(c),
                None => return Err(SampleError::UnterminatedLabels),
            }
        }
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(SampleError::BadLabel);
        }

        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            Some((_, '"')) => {}
            Some(_) => return Err(SampleError::BadLabel),
            None => return Err(SampleError::UnterminatedLabels),
        }

        let mut value = String::new();
        loop {
            match chars.next() {
                Some((_, '"')) => break,
                Some((_, '\\')) => match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, '"')) => value.push('"'),
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, other)) => {
                        value.push('\\');
                        value.push(other);
                    }
                    None => return Err(SampleError::UnterminatedLabels),
                },
                Some((_, c)) => value.push(c),
                None => return Err(SampleError::UnterminatedLabels),
            }
        }
        labels.insert(name, value);

        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            Some((_, ',')) => {}
            Some((i, '}')) => return Ok((labels, i + 1)),
            Some(_) => return Err(SampleError::BadLabel),
            None => return Err(SampleError::UnterminatedLabels),
        }
    }
}
