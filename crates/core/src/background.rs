//! Channel page backgrounds: desktop image tiling, header height, page colour
//! and the clickable header imagemap.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::text::escape_markup;

/// Tallest header a channel may reserve at the top of its page, in pixels.
pub const MAX_HEADER_SIZE: i32 = 150;

/// Page colour used when the channel has not picked one.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#CCCCCC";

/// Maximum length of the raw imagemap markup, in characters.
pub const MAX_IMAGEMAP_LEN: usize = 5000;

/// Attributes an `<area>` tag keeps after sanitising.
const AREA_ATTRIBUTES: &[&str] = &["shape", "coords", "alt", "href", "target"];

define_text_enum! {
    /// How the desktop background image tiles.
    BackgroundRepeat ("background repeat") {
        NoRepeat = "NR",
        Repeat = "RE",
        RepeatX = "RX",
        RepeatY = "RY",
    }
}

impl Default for BackgroundRepeat {
    fn default() -> Self {
        Self::NoRepeat
    }
}

impl BackgroundRepeat {
    /// Value for the CSS `background-repeat` property.
    pub fn css_value(self) -> &'static str {
        match self {
            Self::NoRepeat => "no-repeat",
            Self::Repeat => "repeat",
            Self::RepeatX => "repeat-x",
            Self::RepeatY => "repeat-y",
        }
    }
}

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("colour regex is valid"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("tag regex is valid"));

static AREA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^<\s*area\b(.*?)/?\s*>$").expect("area regex is valid")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("attribute regex is valid")
});

pub fn validate_header_size(size: i32) -> Result<(), CoreError> {
    if !(0..=MAX_HEADER_SIZE).contains(&size) {
        return Err(CoreError::Validation(format!(
            "Header size must be between 0 and {MAX_HEADER_SIZE}"
        )));
    }
    Ok(())
}

/// Validate a `#RRGGBB` colour. A missing or blank colour becomes
/// [`DEFAULT_BACKGROUND_COLOR`].
pub fn normalize_color(color: Option<&str>) -> Result<String, CoreError> {
    let color = match color.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_BACKGROUND_COLOR.to_string()),
        Some(c) => c,
    };
    if !COLOR_RE.is_match(color) {
        return Err(CoreError::Validation(format!(
            "'{color}' is not a #RRGGBB colour"
        )));
    }
    Ok(color.to_uppercase())
}

pub fn validate_imagemap(imagemap: &str) -> Result<(), CoreError> {
    if imagemap.chars().count() > MAX_IMAGEMAP_LEN {
        return Err(CoreError::Validation(format!(
            "Imagemap must be at most {MAX_IMAGEMAP_LEN} characters"
        )));
    }
    Ok(())
}

/// Markup for the header imagemap, safe to embed in a page.
///
/// Only `<area>` tags survive, carrying only [`AREA_ATTRIBUTES`]. Every other
/// tag is dropped and the text between tags is escaped. Returns an empty
/// string when there is no imagemap or no header to attach it to.
pub fn imagemap_code(imagemap: Option<&str>, header_size: i32) -> String {
    let imagemap = match imagemap {
        Some(map) if !map.is_empty() && header_size > 0 => map,
        _ => return String::new(),
    };

    let mut out = String::with_capacity(imagemap.len());
    let mut last = 0;
    for tag in TAG_RE.find_iter(imagemap) {
        out.push_str(&escape_markup(&imagemap[last..tag.start()]));
        if let Some(area) = AREA_RE.captures(tag.as_str()) {
            push_area(&mut out, &area[1]);
        }
        last = tag.end();
    }
    out.push_str(&escape_markup(&imagemap[last..]));
    out.trim().to_string()
}

fn push_area(out: &mut String, attributes: &str) {
    out.push_str("<area");
    for attr in ATTR_RE.captures_iter(attributes) {
        let name = attr[1].to_ascii_lowercase();
        if !AREA_ATTRIBUTES.contains(&name.as_str()) {
            continue;
        }
        let value = attr
            .get(2)
            .or_else(|| attr.get(3))
            .or_else(|| attr.get(4))
            .map_or("", |m| m.as_str());
        out.push_str(&format!(" {name}=\"{}\"", escape_markup(value)));
    }
    out.push('>');
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn repeat_codes_and_css() {
        assert_eq!(BackgroundRepeat::default(), BackgroundRepeat::NoRepeat);
        assert_eq!(BackgroundRepeat::RepeatX.as_str(), "RX");
        assert_eq!(BackgroundRepeat::RepeatY.css_value(), "repeat-y");
        assert_matches!(
            BackgroundRepeat::try_from("XX".to_string()),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn header_size_bounds() {
        assert!(validate_header_size(0).is_ok());
        assert!(validate_header_size(MAX_HEADER_SIZE).is_ok());
        assert_matches!(validate_header_size(-1), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_header_size(MAX_HEADER_SIZE + 1),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn colour_defaults_and_validates() {
        assert_eq!(normalize_color(None).unwrap(), DEFAULT_BACKGROUND_COLOR);
        assert_eq!(normalize_color(Some("  ")).unwrap(), DEFAULT_BACKGROUND_COLOR);
        assert_eq!(normalize_color(Some("#1a2b3c")).unwrap(), "#1A2B3C");
        assert_matches!(normalize_color(Some("red")), Err(CoreError::Validation(_)));
        assert_matches!(normalize_color(Some("#12345")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn imagemap_keeps_only_area_tags() {
        let raw = r#"<map name="header"><area shape="rect" coords="0,0,50,50" href="/about" onclick="steal()"/></map>"#;
        assert_eq!(
            imagemap_code(Some(raw), 100),
            r#"<area shape="rect" coords="0,0,50,50" href="/about">"#
        );
    }

    #[test]
    fn imagemap_drops_script_tags_and_escapes_text() {
        let raw = "<script>alert(1)</script><AREA HREF='/a?x=1&y=2' TARGET=_blank>";
        assert_eq!(
            imagemap_code(Some(raw), 10),
            r#"alert(1)<area href="/a?x=1&amp;y=2" target="_blank">"#
        );
    }

    #[test]
    fn imagemap_needs_a_header() {
        let raw = r#"<area shape="rect" coords="0,0,1,1" href="/">"#;
        assert_eq!(imagemap_code(Some(raw), 0), "");
        assert_eq!(imagemap_code(None, 150), "");
        assert_eq!(imagemap_code(Some(""), 150), "");
    }

    #[test]
    fn imagemap_length_limit() {
        assert!(validate_imagemap(&"a".repeat(MAX_IMAGEMAP_LEN)).is_ok());
        assert_matches!(
            validate_imagemap(&"a".repeat(MAX_IMAGEMAP_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }
}
