use tunedrop_core::ConversionResult;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #111827; color: #f9fafb; margin: 0; }
main { max-width: 36rem; margin: 4rem auto; padding: 2rem; background: #1f2937; border-radius: 0.75rem; }
h1 { margin-top: 0; font-size: 1.6rem; }
form { display: flex; gap: 0.5rem; }
input[type=text] { flex: 1; padding: 0.6rem; border-radius: 0.4rem; border: 1px solid #4b5563; background: #111827; color: inherit; }
button, a.download { padding: 0.6rem 1rem; border: 0; border-radius: 0.4rem; background: #dc2626; color: #fff; text-decoration: none; cursor: pointer; }
.result { margin-top: 1.5rem; }
.error { color: #fca5a5; }
.details { font-family: monospace; white-space: pre-wrap; color: #9ca3af; }
"#;

/// Converter form, followed by the outcome of the last submission if any.
pub fn index_page(outcome: Option<&ConversionResult>) -> String {
    let result = match outcome {
        Some(result) if result.is_success() => {
            let title = result.song_title().unwrap_or("Your MP3");
            let link = result.song_link().unwrap_or_default();
            format!(
                r#"<section class="result"><p class="title">{}</p><a class="download" href="{}" rel="noopener">Download MP3</a></section>"#,
                escape_html(title),
                escape_html(link)
            )
        }
        Some(result) => format!(
            r#"<section class="result"><p class="error">{}</p></section>"#,
            escape_html(result.error_message().unwrap_or_default())
        ),
        None => String::new(),
    };

    layout(
        "YouTube to MP3",
        &format!(
            r#"<h1>YouTube to MP3</h1>
<form action="/convert-mp3" method="post">
<input type="text" name="videoID" placeholder="Video ID or YouTube link" autocomplete="off">
<button type="submit">Convert</button>
</form>
{result}"#
        ),
    )
}

pub fn error_page(message: &str, details: Option<&str>) -> String {
    let details = details
        .map(|details| format!(r#"<p class="details">{}</p>"#, escape_html(details)))
        .unwrap_or_default();
    layout(
        "Error",
        &format!(
            r#"<h1>Oops</h1>
<p class="error">{}</p>
{details}
<p><a href="/">Back to the converter</a></p>"#,
            escape_html(message)
        ),
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
<style>{STYLE}</style>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        escape_html(title)
    )
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
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
