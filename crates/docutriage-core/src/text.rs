/// Normalize extracted or OCR'd text for measurement and detection.
///
/// Control characters (stray NULs from PDF text layers, form feeds from OCR)
/// and whitespace runs collapse to single spaces; leading/trailing space is
/// trimmed. The result is what the length gates and the detector see.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;
    for c in s.chars() {
        if c.is_whitespace() || c.is_control() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    out
}
