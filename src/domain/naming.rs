//! Naming rules for uploaded content.
//!
//! Callers choose the subdirectory and the original filename, so both are
//! untrusted. These functions reduce them to strings that cannot name anything
//! outside the upload root.

/// Reduce a caller supplied logical subpath to lowercase ASCII alphanumerics
/// and `/`.
///
/// Every maximal run of other characters becomes a single `/`, so `..` never
/// survives. An empty or separator-only result means "store at the root".
pub fn normalize_path(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut in_run = false;

    for c in raw.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '/' {
            normalized.push(c);
            in_run = false;
        } else if !in_run {
            normalized.push('/');
            in_run = true;
        }
    }

    normalized
}

/// Longest stored name most filesystems accept, in bytes.
pub const MAX_STORED_NAME_BYTES: usize = 255;

/// Derive the stored name `{epoch_millis}-{sanitized_base}{extension}`.
///
/// The base is lowercased and every run of characters outside `[a-z0-9]`
/// becomes one `-`; the extension is kept verbatim. A non-zero `attempt`
/// appends `-{attempt}` to the base, for when the first name is taken.
/// Overlong names lose the end of the base first, then the end of the
/// extension, so the result never exceeds [`MAX_STORED_NAME_BYTES`].
pub fn derive_filename(original_name: &str, epoch_millis: i64, attempt: u32) -> String {
    let (base, extension) = split_extension(file_basename(original_name));
    let mut sanitized = sanitize_base(base);

    let prefix = format!("{epoch_millis}-");
    let disambiguator = if attempt == 0 {
        String::new()
    } else {
        format!("-{attempt}")
    };

    let budget = MAX_STORED_NAME_BYTES.saturating_sub(prefix.len() + disambiguator.len());
    let extension = truncate_at_char_boundary(extension, budget);
    // ASCII only, any byte index is a char boundary
    sanitized.truncate(budget - extension.len());

    format!("{prefix}{sanitized}{disambiguator}{extension}")
}

fn truncate_at_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Last path component of a client filename; browsers on some platforms send
/// the full local path.
fn file_basename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Split at the last `.`; the extension keeps its dot.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

fn sanitize_base(base: &str) -> String {
    let mut sanitized = String::with_capacity(base.len());
    let mut in_run = false;

    for c in base.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            sanitized.push(c);
            in_run = false;
        } else if !in_run {
            sanitized.push('-');
            in_run = true;
        }
    }

    sanitized
}
