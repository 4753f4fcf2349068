use std::{collections::HashSet, sync::LazyLock};

/// Status codes that have an image on <https://http.cat/>.
pub const KNOWN_STATUS_CODES: &[u16] = &[
    100, 101, //
    200, 201, 202, 204, 206, 207, //
    300, 301, 302, 303, 304, 305, 307, //
    400, 401, 402, 403, 404, 405, 406, 408, 409, //
    410, 411, 412, 413, 414, 415, 416, 417, 418, //
    420, 421, 422, 423, 424, 425, 426, 429, 431, //
    444, 450, 451, 499, //
    500, 501, 502, 503, 504, 505, 506, 507, 508, 509, //
    510, 511, 599,
];

static CATALOG: LazyLock<HashSet<u16>> =
    LazyLock::new(|| KNOWN_STATUS_CODES.iter().copied().collect());

/// Returns true when `text` is a plain decimal number naming a catalogued code.
///
/// Only ASCII digits are accepted, so signs and surrounding whitespace are
/// rejected. Callers trim user input first.
#[must_use]
pub fn is_known_code(text: &str) -> bool {
    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return false;
    }

    text.parse::<u16>()
        .is_ok_and(|code| CATALOG.contains(&code))
}
