//! HTML pages.

use std::fmt::Write;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
nav a {{ margin-right: 1rem; }}
.gallery {{ display: flex; flex-wrap: wrap; gap: 1rem; list-style: none; padding: 0; }}
.gallery img {{ max-width: 300px; max-height: 300px; display: block; }}
</style>
</head>
<body>
<nav><a href="/">Gallery</a><a href="/upload">Upload</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#
    )
}

/// The gallery listing: one thumbnail per image, linking to the original.
pub fn gallery_page(images: &[String]) -> String {
    if images.is_empty() {
        return layout(
            "Image Gallery",
            r#"<p>No images yet. <a href="/upload">Upload one</a>.</p>"#,
        );
    }

    let mut items = String::from("<ul class=\"gallery\">\n");
    for name in images {
        let path = encode_path_segment(name);
        let label = escape_html(name);
        let _ = writeln!(
            items,
            r#"<li><a href="/image/{path}"><img src="/thumbnail/{path}" alt="{label}" loading="lazy"></a></li>"#
        );
    }
    items.push_str("</ul>");
    layout("Image Gallery", &items)
}

/// The upload form, posting a single `file` field.
pub fn upload_page() -> String {
    layout(
        "Upload Image",
        r#"<form method="post" action="/upload" enctype="multipart/form-data">
<input type="file" name="file" accept=".png,.jpg,.jpeg,.gif" required>
<button type="submit">Upload</button>
</form>"#,
    )
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode everything but RFC 3986 unreserved characters.
pub fn encode_path_segment(s: &str) -> String {
    s.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                String::from(b as char)
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}
