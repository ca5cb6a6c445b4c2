use crate::ExportFormat;

/// Extract the filename token from a `content-disposition` header value.
///
/// Accepts both quoted and unquoted forms, e.g.
/// `attachment; filename="weekly-recap.md"` and
/// `attachment; filename=weekly-recap.md`.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let marker = "filename=";
    let idx = header.to_ascii_lowercase().find(marker)?;
    let rest = header[idx + marker.len()..].trim_start();
    let token = if let Some(quoted) = rest.strip_prefix('"') {
        match quoted.find('"') {
            Some(end) => &quoted[..end],
            None => quoted,
        }
    } else {
        match rest.find(';') {
            Some(end) => &rest[..end],
            None => rest,
        }
    };
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Local filename for an export download: the sanitized server suggestion,
/// or `postforge-export.<ext>` when the server offered none.
pub fn export_filename(suggested: Option<&str>, format: ExportFormat) -> String {
    if let Some(name) = suggested {
        let safe = sanitize_filename(name);
        if !safe.is_empty() {
            return safe;
        }
    }
    format!("postforge-export.{}", format.extension())
}

/// Windows-safe rendition of a server-supplied filename.
fn sanitize_filename(input: &str) -> String {
    let mut cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    // Collapse multiple underscores
    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' {
            if !prev_underscore {
                compacted.push(c);
            }
            prev_underscore = true;
        } else {
            compacted.push(c);
            prev_underscore = false;
        }
    }
    let mut final_name = compacted;
    if final_name.len() > 120 {
        let mut end = 120;
        while end > 0 && !final_name.is_char_boundary(end) {
            end -= 1;
        }
        final_name.truncate(end);
    }
    patch_reserved_stem(final_name)
}

/// `CON.md` is as unusable on Windows as `CON`; patch the stem.
fn patch_reserved_stem(name: String) -> String {
    let stem = match name.find('.') {
        Some(idx) => &name[..idx],
        None => &name,
    };
    if is_reserved_windows_name(stem) {
        match name.find('.') {
            Some(idx) => format!("{}_{}", &name[..idx], &name[idx..]),
            None => format!("{name}_"),
        }
    } else {
        name
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
