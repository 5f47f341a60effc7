//! HTML card rendering for cable records.
//!
//! The renderer works from `CardView`, a denormalized projection of a
//! record plus its category, so display code never reaches back into the
//! full catalog. All interpolated text is escaped before it goes anywhere
//! near markup; term highlighting runs over the escaped form and wraps
//! literal matches only.

use crate::catalog::model::CableRecord;
use crate::catalog::store::CategoryInfo;
use crate::metrics::{max_data_rate, max_power};
use serde::Serialize;

// A record reads as legacy when its prose mentions retirement in any of
// these forms.
const LEGACY_MARKERS: &[&str] = &["obsolete", "legacy", "phased out", "deprecated"];

// Device tags shown on a card before the overflow counter takes over.
const MAX_DEVICE_TAGS: usize = 3;

#[derive(Clone, Debug, Serialize)]
/// Display projection of one record: everything a card needs, nothing more.
pub struct CardView {
    pub cable_type: String,
    pub name: String,
    pub category_slug: String,
    pub category_name: String,
    pub max_rate_mbps: f64,
    pub max_power_w: Option<f64>,
    pub pin_count: u32,
    pub width: f64,
    pub height: f64,
    pub units: String,
    pub reversible: bool,
    pub shape: String,
    pub common_devices: Vec<String>,
    pub confusion_points: Vec<String>,
    pub notes: String,
}

impl CardView {
    /// Build the projection for a record loaded from `category`.
    pub fn project(record: &CableRecord, category: &CategoryInfo) -> Self {
        Self {
            cable_type: record.cable_type.0.clone(),
            name: record.name.clone(),
            category_slug: category.slug.as_str().to_string(),
            category_name: category.name.to_string(),
            max_rate_mbps: max_data_rate(record),
            max_power_w: max_power(record),
            pin_count: record.connector.pin_count,
            width: record.connector.width,
            height: record.connector.height,
            units: record.connector.units.clone(),
            reversible: record.connector.reversible,
            shape: record.connector.shape.as_str().to_string(),
            common_devices: record.common_devices.clone(),
            confusion_points: record.confusion_points.clone(),
            notes: record.notes.clone(),
        }
    }

    /// Whether the card gets a Legacy badge.
    pub fn is_legacy(&self) -> bool {
        let marked = |text: &str| {
            let lowered = text.to_lowercase();
            LEGACY_MARKERS.iter().any(|marker| lowered.contains(marker))
        };
        marked(&self.notes) || self.confusion_points.iter().any(|point| marked(point))
    }
}

/// Escape text for embedding in HTML. The data itself may contain markup;
/// nothing is interpolated unescaped.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Wrap every case-insensitive occurrence of `term` in `<mark>`.
///
/// Runs over already-escaped text; the term is matched as a literal
/// substring (byte-wise ASCII case folding), so pattern metacharacters in
/// the term have no special meaning.
pub fn highlight_term(escaped: &str, term: &str) -> String {
    if term.is_empty() {
        return escaped.to_string();
    }
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;
    while let Some(pos) = find_ignore_ascii_case(rest, term) {
        let end = pos + term.len();
        out.push_str(&rest[..pos]);
        out.push_str("<mark>");
        out.push_str(&rest[pos..end]);
        out.push_str("</mark>");
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&i| {
        haystack.is_char_boundary(i)
            && haystack.is_char_boundary(i + needle.len())
            && haystack[i..i + needle.len()].eq_ignore_ascii_case(needle)
    })
}

/// Format an Mbps figure the way the cards display it.
///
/// At or above 1000 Mbps the value switches to Gbps via division by 1000;
/// whole numbers drop the fractional part either way.
pub fn format_data_rate(mbps: f64) -> String {
    if mbps >= 1000.0 {
        format!("{} Gbps", format_number(mbps / 1000.0))
    } else {
        format!("{} Mbps", format_number(mbps))
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Render one record card as an HTML fragment.
///
/// `highlight` wraps matches in the type and name fields only; escaping
/// always happens first.
pub fn render_card(view: &CardView, highlight: Option<&str>) -> String {
    let decorate = |text: &str| {
        let escaped = escape_html(text);
        match highlight {
            Some(term) => highlight_term(&escaped, term),
            None => escaped,
        }
    };

    let mut html = String::new();
    html.push_str(&format!(
        "<article class=\"cable-card\" data-category=\"{}\">\n",
        escape_html(&view.category_slug)
    ));

    html.push_str("  <header class=\"cable-card-header\">\n");
    html.push_str(&format!(
        "    <h3 class=\"cable-type\">{}</h3>\n",
        decorate(&view.cable_type)
    ));
    html.push_str(&format!(
        "    <p class=\"cable-name\">{}</p>\n",
        decorate(&view.name)
    ));
    html.push_str(&format!(
        "    <span class=\"badge badge-category\">{}</span>\n",
        escape_html(&view.category_name)
    ));
    if view.reversible {
        html.push_str("    <span class=\"badge badge-reversible\">Reversible</span>\n");
    }
    if view.is_legacy() {
        html.push_str("    <span class=\"badge badge-legacy\">Legacy</span>\n");
    }
    html.push_str("  </header>\n");

    html.push_str("  <dl class=\"cable-stats\">\n");
    html.push_str(&format!(
        "    <dt>Max data rate</dt><dd>{}</dd>\n",
        format_data_rate(view.max_rate_mbps)
    ));
    if let Some(watts) = view.max_power_w {
        html.push_str(&format!(
            "    <dt>Max power</dt><dd>{} W</dd>\n",
            format_number(watts)
        ));
    }
    html.push_str("  </dl>\n");

    if !view.common_devices.is_empty() {
        html.push_str("  <ul class=\"device-tags\">\n");
        for device in view.common_devices.iter().take(MAX_DEVICE_TAGS) {
            html.push_str(&format!(
                "    <li class=\"tag\">{}</li>\n",
                escape_html(device)
            ));
        }
        let overflow = view.common_devices.len().saturating_sub(MAX_DEVICE_TAGS);
        if overflow > 0 {
            html.push_str(&format!(
                "    <li class=\"tag tag-overflow\">+{overflow} more</li>\n"
            ));
        }
        html.push_str("  </ul>\n");
    }

    // Only the first confusion point surfaces on a card.
    if let Some(first) = view.confusion_points.first() {
        html.push_str(&format!(
            "  <p class=\"confusion-callout\">{}</p>\n",
            escape_html(first)
        ));
    }

    html.push_str("</article>\n");
    html
}

/// Minimal HTML5 page shell for the static site builder.
pub fn render_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"/style.css\">\n</head>\n\
         <body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_view() -> CardView {
        CardView {
            cable_type: "USB-C".to_string(),
            name: "USB Type-C".to_string(),
            category_slug: "usb".to_string(),
            category_name: "USB".to_string(),
            max_rate_mbps: 40000.0,
            max_power_w: Some(240.0),
            pin_count: 24,
            width: 8.34,
            height: 2.56,
            units: "mm".to_string(),
            reversible: true,
            shape: "oval".to_string(),
            common_devices: vec![
                "Laptops".to_string(),
                "Phones".to_string(),
                "Tablets".to_string(),
                "Monitors".to_string(),
                "Docks".to_string(),
            ],
            confusion_points: vec![
                "Identical plugs, different capabilities.".to_string(),
                "Charging-only cables exist.".to_string(),
            ],
            notes: String::new(),
        }
    }

    #[test]
    fn escape_covers_markup_and_quotes() {
        assert_eq!(
            escape_html("<b>\"R&D\" 'quoted'</b>"),
            "&lt;b&gt;&quot;R&amp;D&quot; &#39;quoted&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn highlight_wraps_case_insensitive_matches_only() {
        let escaped = escape_html("USB-C");
        assert_eq!(
            highlight_term(&escaped, "usb"),
            "<mark>USB</mark>-C"
        );
        assert_eq!(highlight_term("plain text", "usb"), "plain text");
        assert_eq!(highlight_term("usb usb", "USB"), "<mark>usb</mark> <mark>usb</mark>");
        assert_eq!(highlight_term("anything", ""), "anything");
    }

    #[test]
    fn highlighting_runs_after_escaping() {
        let view = CardView {
            name: "USB <Type-C>".to_string(),
            ..sample_view()
        };
        let html = render_card(&view, Some("usb"));
        assert!(html.contains("<mark>USB</mark> &lt;Type-C&gt;"));
        assert!(!html.contains("<Type-C>"));
    }

    #[test]
    fn card_shows_three_device_tags_plus_overflow() {
        let html = render_card(&sample_view(), None);
        assert_eq!(html.matches("<li class=\"tag\">").count(), 3);
        assert!(html.contains("+2 more"));
        assert!(html.contains("Laptops"));
        assert!(!html.contains("Monitors"));
    }

    #[test]
    fn card_surfaces_only_the_first_confusion_point() {
        let html = render_card(&sample_view(), None);
        assert!(html.contains("Identical plugs, different capabilities."));
        assert!(!html.contains("Charging-only cables exist."));
    }

    #[test]
    fn badges_reflect_reversibility_and_legacy_text() {
        let html = render_card(&sample_view(), None);
        assert!(html.contains("badge-reversible"));
        assert!(!html.contains("badge-legacy"));

        let mut retired = sample_view();
        retired.reversible = false;
        retired.notes = "Phased out in favor of USB-C.".to_string();
        let html = render_card(&retired, None);
        assert!(!html.contains("badge-reversible"));
        assert!(html.contains("badge-legacy"));
    }

    #[test]
    fn legacy_detection_reads_confusion_points_too() {
        let mut view = sample_view();
        view.confusion_points = vec!["Considered obsolete since 2014.".to_string()];
        assert!(view.is_legacy());
        view.confusion_points.clear();
        assert!(!view.is_legacy());
    }

    #[test]
    fn data_rate_formatting_switches_to_gbps_at_1000() {
        assert_eq!(format_data_rate(480.0), "480 Mbps");
        assert_eq!(format_data_rate(1000.0), "1 Gbps");
        assert_eq!(format_data_rate(2500.0), "2.5 Gbps");
        assert_eq!(format_data_rate(40000.0), "40 Gbps");
        assert_eq!(format_data_rate(0.0), "0 Mbps");
    }

    #[test]
    fn page_shell_escapes_the_title() {
        let page = render_page("A & B", "<main></main>");
        assert!(page.contains("<title>A &amp; B</title>"));
        assert!(page.contains("<main></main>"));
    }
}
