use crate::domain::model::{AggregateResult, ApodRecord, FeedDate, MarsPhoto};
use serde_json::Value;

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the whole page for one aggregation. `rejected` is a posted date
/// that could not be parsed; it is echoed back with a notice.
pub fn render_index(
    result: &AggregateResult,
    selected: Option<FeedDate>,
    rejected: Option<&str>,
) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Astronomy Feed</title>\n</head>\n<body>\n<h1>Astronomy Feed</h1>\n",
    );

    let selected = match (selected, rejected) {
        (Some(date), _) => date.to_string(),
        (None, Some(raw)) => escape_html(raw),
        (None, None) => String::new(),
    };
    html.push_str(&format!(
        "<form method=\"post\" action=\"/\">\n<label for=\"date\">Date</label>\n\
         <input type=\"date\" id=\"date\" name=\"date\" value=\"{}\">\n\
         <button type=\"submit\">Show</button>\n</form>\n",
        selected
    ));

    if let Some(raw) = rejected {
        html.push_str(&format!(
            "<p class=\"notice\">&quot;{}&quot; is not a valid date (YYYY-MM-DD); showing the latest entries instead.</p>\n",
            escape_html(raw)
        ));
    }

    if let Some(error) = &result.error {
        html.push_str(&format!(
            "<p class=\"error\">{}</p>\n",
            escape_html(error)
        ));
    }

    if let Some(apod) = &result.apod {
        render_apod(&mut html, apod);
    }
    render_mars_photos(&mut html, &result.mars_photos);
    render_neo(&mut html, result);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_apod(html: &mut String, apod: &ApodRecord) {
    let field = |key: &str| escape_html(apod.str_field(key).unwrap_or_default());

    html.push_str("<section id=\"apod\">\n<h2>Astronomy Picture of the Day</h2>\n");
    html.push_str(&format!("<h3>{}</h3>\n<p>{}</p>\n", field("title"), field("date")));

    match apod.str_field("media_type") {
        Some("video") => html.push_str(&format!(
            "<p><a href=\"{}\">Watch the video</a></p>\n",
            field("url")
        )),
        _ => html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            field("url"),
            field("title")
        )),
    }

    html.push_str(&format!("<p>{}</p>\n", field("explanation")));
    if let Some(copyright) = apod.str_field("copyright") {
        html.push_str(&format!("<p>&copy; {}</p>\n", escape_html(copyright.trim())));
    }
    html.push_str("</section>\n");
}

fn render_mars_photos(html: &mut String, photos: &[MarsPhoto]) {
    html.push_str("<section id=\"mars\">\n<h2>Mars Rover Photos</h2>\n");
    if photos.is_empty() {
        html.push_str("<p>No photos available.</p>\n");
    }
    for photo in photos {
        let Some(src) = photo.img_src() else { continue };
        html.push_str(&format!(
            "<figure>\n<img src=\"{}\" alt=\"Mars rover photo\">\n<figcaption>{} &middot; {}</figcaption>\n</figure>\n",
            escape_html(src),
            escape_html(photo.camera_name().unwrap_or("Unknown camera")),
            escape_html(photo.earth_date().unwrap_or_default()),
        ));
    }
    html.push_str("</section>\n");
}

fn render_neo(html: &mut String, result: &AggregateResult) {
    html.push_str("<section id=\"neo\">\n<h2>Near-Earth Objects Today</h2>\n");
    for (day, objects) in result.neo.objects_by_date() {
        html.push_str(&format!("<h3>{}</h3>\n<ul>\n", escape_html(day)));
        for object in objects {
            let name = object.get("name").and_then(Value::as_str).unwrap_or("Unnamed");
            let hazardous = object
                .get("is_potentially_hazardous_asteroid")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            html.push_str(&format!(
                "<li>{}{}</li>\n",
                escape_html(name),
                if hazardous { " (potentially hazardous)" } else { "" }
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
}
