
const FULL_STOP: char = '。';

/// Returns the first sentence of `text`, terminator included.
///
/// A sentence ends at the first `。` or at the first `.` that is not a decimal point, i.e.
/// not surrounded by ASCII digits. Text without a terminator is returned whole.
pub fn leading_sentence(text: &str) -> &str {
    let text = text.trim();
    let full_stop = text.find(FULL_STOP);
    let period = find_sentence_period(text);

    let cut = match (full_stop, period) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };

    match cut {
        Some(index) => {
            let terminator_len = text[index..].chars().next().map_or(0, char::len_utf8);
            text[..index + terminator_len].trim()
        }
        None => text,
    }
}

fn find_sentence_period(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    (0..bytes.len()).find(|&i| {
        if bytes[i] != b'.' {
            return false;
        }
        let prev_is_digit = i > 0 && bytes[i - 1].is_ascii_digit();
        let next_is_digit = bytes.get(i + 1).map_or(false, u8::is_ascii_digit);
        !(prev_is_digit && next_is_digit)
    })
}
