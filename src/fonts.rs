//! Web font service URLs.

/// Base stylesheet URL of the web font service. The encoded family is
/// appended to it.
pub const FONT_SERVICE_URL: &str = "https://fonts.googleapis.com/css?family=";

/// Encodes a font family name for the web font service.
///
/// Each run of whitespace becomes a single `+`.
///
/// ```
/// use letters::fonts::web_fonts_family;
///
/// assert_eq!(web_fonts_family("Lily Script One"), "Lily+Script+One");
/// ```
pub fn web_fonts_family(font: &str) -> String {
    let mut family = String::with_capacity(font.len());
    let mut in_whitespace = false;
    for c in font.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                family.push('+');
            }
            in_whitespace = true;
        } else {
            family.push(c);
            in_whitespace = false;
        }
    }
    family
}

/// Returns the stylesheet URL that loads `font` from the service at
/// `service_url`, or the bare service URL when there is no font.
pub fn font_href(service_url: &str, font: Option<&str>) -> String {
    format!("{service_url}{}", web_fonts_family(font.unwrap_or_default()))
}
