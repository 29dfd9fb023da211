//! Media-query parsing and evaluation for the headless viewport.
//!
//! Only the viewport-size subset is understood:
//!
//! ```text
//! query-list := query ("," query)*
//! query      := ["only" | "not"] media-type ("and" condition)*
//!             | "not" condition
//!             | condition ("and" condition)*
//! media-type := "all" | "screen" | "print"
//! condition  := "(" feature ":" value ")"
//! feature    := width | min-width | max-width | height | min-height | max-height | orientation
//! ```
//!
//! Lengths accept `px`, `em` and `rem` (16px each) or a bare `0`.

use smallvec::SmallVec;
use thiserror::Error;

/// Pixels per `em`/`rem` when no font metrics are available.
pub const PX_PER_EM: f64 = 16.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaQueryError {
    #[error("unterminated `(` in `{0}`")]
    Unterminated(String),
    #[error("unsupported media type `{0}`")]
    UnknownMediaType(String),
    #[error("unsupported media feature `{0}`")]
    UnknownFeature(String),
    #[error("invalid value `{value}` for `{feature}`")]
    InvalidValue { feature: String, value: String },
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
    #[error("empty query in list")]
    EmptyQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn orientation(&self) -> Orientation {
        if self.height >= self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaType {
    All,
    Screen,
    Print,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Condition {
    Width(f64),
    MinWidth(f64),
    MaxWidth(f64),
    Height(f64),
    MinHeight(f64),
    MaxHeight(f64),
    Orientation(Orientation),
}

impl Condition {
    fn matches(&self, size: ViewportSize) -> bool {
        match *self {
            Condition::Width(px) => size.width == px,
            Condition::MinWidth(px) => size.width >= px,
            Condition::MaxWidth(px) => size.width <= px,
            Condition::Height(px) => size.height == px,
            Condition::MinHeight(px) => size.height >= px,
            Condition::MaxHeight(px) => size.height <= px,
            Condition::Orientation(orientation) => size.orientation() == orientation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Query {
    negated: bool,
    media_type: MediaType,
    conditions: SmallVec<[Condition; 2]>,
}

impl Query {
    fn matches(&self, size: ViewportSize) -> bool {
        let matched = self.media_type != MediaType::Print
            && self.conditions.iter().all(|c| c.matches(size));
        matched != self.negated
    }
}

/// A parsed media query list. Matches when any of its queries matches.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    queries: SmallVec<[Query; 1]>,
}

impl MediaQuery {
    /// The query every viewport matches; what an empty query string parses to.
    pub fn all() -> Self {
        let mut queries = SmallVec::new();
        queries.push(Query {
            negated: false,
            media_type: MediaType::All,
            conditions: SmallVec::new(),
        });
        Self { queries }
    }

    pub fn parse(source: &str) -> Result<Self, MediaQueryError> {
        let source = source.trim();
        if source.is_empty() {
            return Ok(Self::all());
        }

        let queries = source
            .split(',')
            .map(parse_query)
            .collect::<Result<SmallVec<_>, _>>()?;
        Ok(Self { queries })
    }

    pub fn matches(&self, size: ViewportSize) -> bool {
        self.queries.iter().any(|query| query.matches(size))
    }
}

impl std::str::FromStr for MediaQuery {
    type Err = MediaQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Word(&'a str),
    Group(&'a str),
}

fn tokenize(source: &str) -> Result<Vec<Token<'_>>, MediaQueryError> {
    let mut tokens = Vec::new();
    let mut rest = source.trim_start();
    while !rest.is_empty() {
        if let Some(inner) = rest.strip_prefix('(') {
            let end = inner
                .find(')')
                .ok_or_else(|| MediaQueryError::Unterminated(source.to_string()))?;
            tokens.push(Token::Group(inner[..end].trim()));
            rest = inner[end + 1..].trim_start();
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '(')
                .unwrap_or(rest.len());
            tokens.push(Token::Word(&rest[..end]));
            rest = rest[end..].trim_start();
        }
    }
    Ok(tokens)
}

fn parse_query(source: &str) -> Result<Query, MediaQueryError> {
    let tokens = tokenize(source)?;
    let mut tokens = tokens.into_iter().peekable();

    let mut query = Query {
        negated: false,
        media_type: MediaType::All,
        conditions: SmallVec::new(),
    };

    match tokens.peek() {
        None => return Err(MediaQueryError::EmptyQuery),
        Some(Token::Word(word)) if word.eq_ignore_ascii_case("not") => {
            query.negated = true;
            tokens.next();
        }
        Some(Token::Word(word)) if word.eq_ignore_ascii_case("only") => {
            tokens.next();
        }
        _ => {}
    }

    // `not (condition)` negates that single condition and cannot be extended
    // with `and`.
    let mut allow_and = true;
    let mut expect_condition = match tokens.next() {
        Some(Token::Word(word)) => {
            query.media_type = parse_media_type(word)?;
            false
        }
        Some(Token::Group(group)) => {
            query.conditions.push(parse_condition(group)?);
            allow_and = !query.negated;
            false
        }
        None => return Err(MediaQueryError::EmptyQuery),
    };

    for token in tokens {
        match token {
            Token::Word(word)
                if allow_and && !expect_condition && word.eq_ignore_ascii_case("and") =>
            {
                expect_condition = true;
            }
            Token::Group(group) if expect_condition => {
                query.conditions.push(parse_condition(group)?);
                expect_condition = false;
            }
            Token::Word(word) => return Err(MediaQueryError::UnexpectedToken(word.to_string())),
            Token::Group(group) => {
                return Err(MediaQueryError::UnexpectedToken(format!("({group})")));
            }
        }
    }

    if expect_condition {
        return Err(MediaQueryError::UnexpectedToken("and".to_string()));
    }

    Ok(query)
}

fn parse_media_type(word: &str) -> Result<MediaType, MediaQueryError> {
    match word.to_ascii_lowercase().as_str() {
        "all" => Ok(MediaType::All),
        "screen" => Ok(MediaType::Screen),
        "print" => Ok(MediaType::Print),
        _ => Err(MediaQueryError::UnknownMediaType(word.to_string())),
    }
}

fn parse_condition(group: &str) -> Result<Condition, MediaQueryError> {
    let (feature, value) = group
        .split_once(':')
        .ok_or_else(|| MediaQueryError::UnknownFeature(group.to_string()))?;
    let feature = feature.trim().to_ascii_lowercase();
    let value = value.trim();

    let length = || {
        parse_length(value).ok_or_else(|| MediaQueryError::InvalidValue {
            feature: feature.clone(),
            value: value.to_string(),
        })
    };

    match feature.as_str() {
        "width" => Ok(Condition::Width(length()?)),
        "min-width" => Ok(Condition::MinWidth(length()?)),
        "max-width" => Ok(Condition::MaxWidth(length()?)),
        "height" => Ok(Condition::Height(length()?)),
        "min-height" => Ok(Condition::MinHeight(length()?)),
        "max-height" => Ok(Condition::MaxHeight(length()?)),
        "orientation" => match value.to_ascii_lowercase().as_str() {
            "portrait" => Ok(Condition::Orientation(Orientation::Portrait)),
            "landscape" => Ok(Condition::Orientation(Orientation::Landscape)),
            _ => Err(MediaQueryError::InvalidValue {
                feature: feature.clone(),
                value: value.to_string(),
            }),
        },
        _ => Err(MediaQueryError::UnknownFeature(feature.clone())),
    }
}

fn parse_length(value: &str) -> Option<f64> {
    let value = value.to_ascii_lowercase();
    let (number, scale) = if let Some(number) = value.strip_suffix("px") {
        (number, 1.0)
    } else if let Some(number) = value.strip_suffix("rem") {
        (number, PX_PER_EM)
    } else if let Some(number) = value.strip_suffix("em") {
        (number, PX_PER_EM)
    } else {
        // Only zero may omit its unit.
        return (value.parse::<f64>().ok()? == 0.0).then_some(0.0);
    };
    let number = number.trim().parse::<f64>().ok()?;
    number.is_finite().then_some(number * scale)
}
