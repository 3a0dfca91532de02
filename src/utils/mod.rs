pub mod pdf;

/// Name used when sanitizing leaves nothing of the client's filename.
const FALLBACK_FILE_NAME: &str = "upload.pdf";

/// Reduces a client supplied filename to a safe, flat ASCII name.
///
/// Path separators split the name into `_`-joined segments, anything outside
/// `[A-Za-z0-9._-]` is dropped and leading/trailing dots and underscores are trimmed,
/// so `../../etc/passwd.pdf` becomes `etc_passwd.pdf`.
pub fn sanitize_filename(name: &str) -> String {
    let flattened = name.replace(['/', '\\'], " ");
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn has_pdf_extension(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pdf")
}

/// Exactly ten ASCII digits.
pub fn is_valid_mobile_number(number: &str) -> bool {
    number.len() == 10 && number.bytes().all(|b| b.is_ascii_digit())
}

/// True for a bare file name that cannot point outside the upload directory.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}
