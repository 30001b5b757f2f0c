//! Linux-safe filename sanitization.

/// Makes a URL path segment usable as a single Linux filename.
///
/// Only characters a filename cannot hold are touched: `/`, `\`, NUL and other
/// control characters become `_`. Everything else, including leading dots,
/// underscores and repeated underscores, is kept as is. The result is cut to
/// 255 bytes (NAME_MAX) on a char boundary.
pub fn sanitize_filename_for_linux(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out: String = name
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while !out.is_char_boundary(take) {
            take -= 1;
        }
        out.truncate(take);
    }
    out
}
