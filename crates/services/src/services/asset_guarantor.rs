//! Guarantees the Tailwind CDN and Google Fonts are present in generated markup.

pub const TAILWIND_CDN_MARKER: &str = "cdn.tailwindcss.com";
const TAILWIND_CDN_SCRIPT: &str = r#"<script src="https://cdn.tailwindcss.com"></script>"#;

const GOOGLE_FONTS: &str = r#"<link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&family=Playfair+Display:wght@400;500;600;700&display=swap" rel="stylesheet">"#;

const FONT_STYLE: &str = r#"<style>
        body { font-family: 'Inter', sans-serif; }
        h1, h2, h3, h4, h5, h6 { font-family: 'Playfair Display', serif; }
    </style>"#;

/// Make sure `markup` references the CSS framework and webfonts.
///
/// Markup that already references the framework is returned untouched. Otherwise the
/// assets go right after the opening `<head>` tag, or the whole input is wrapped in a
/// minimal document when there is no head at all. Idempotent.
pub fn ensure_baseline_assets(markup: &str) -> String {
    if markup.contains(TAILWIND_CDN_MARKER) {
        return markup.to_string();
    }

    match find_head_open_tag(markup) {
        Some(HeadOpenTag::Complete(head_end)) => {
            inject_after(&markup[..head_end], &markup[head_end..])
        }
        // Input ends inside the tag: close it, drop the partial attributes, finish the document
        Some(HeadOpenTag::Truncated(name_end)) => inject_after(
            &format!("{}>", &markup[..name_end]),
            "</head>\n<body>\n</body>",
        ),
        None => wrap_in_skeleton(markup),
    }
}

fn inject_after(before: &str, after: &str) -> String {
    let injection = format!(
        "\n    <!-- Tailwind CSS CDN (Injected) -->\n    {TAILWIND_CDN_SCRIPT}\n    <!-- Google Fonts -->\n    {GOOGLE_FONTS}\n    {FONT_STYLE}\n"
    );
    let mut out = String::with_capacity(before.len() + injection.len() + after.len());
    out.push_str(before);
    out.push_str(&injection);
    out.push_str(after);
    out
}

fn wrap_in_skeleton(markup: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Website</title>
    {TAILWIND_CDN_SCRIPT}
    {GOOGLE_FONTS}
    {FONT_STYLE}
</head>
<body>
{markup}
</body>
</html>"#
    )
}

enum HeadOpenTag {
    /// Byte offset just past the closing `>`.
    Complete(usize),
    /// No `>` follows; byte offset just past `<head`.
    Truncated(usize),
}

/// Locate the first opening `<head>` tag, case-insensitively.
///
/// Accepts attributes (`<head lang="en">`) but not `<header>`.
fn find_head_open_tag(markup: &str) -> Option<HeadOpenTag> {
    // ASCII lowercasing keeps byte offsets aligned with `markup`
    let lower = markup.to_ascii_lowercase();
    let mut offset = 0;
    while let Some(pos) = lower[offset..].find("<head") {
        let name_end = offset + pos + "<head".len();
        match lower.as_bytes().get(name_end) {
            Some(b'>') => return Some(HeadOpenTag::Complete(name_end + 1)),
            Some(b) if b.is_ascii_whitespace() || *b == b'/' => {
                return Some(match lower[name_end..].find('>') {
                    Some(i) => HeadOpenTag::Complete(name_end + i + 1),
                    None => HeadOpenTag::Truncated(name_end),
                });
            }
            Some(_) => offset = name_end,
            None => return Some(HeadOpenTag::Truncated(name_end)),
        }
    }
    None
}
