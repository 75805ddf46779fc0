use std::convert::TryFrom;

/**
Whether the UTF-16 code unit is the first half of a surrogate pair.
*/
#[inline]
pub fn is_lead_surrogate(code: u32) -> bool {
    (0xD800..=0xDBFF).contains(&code)
}

/**
Combine a UTF-16 surrogate pair into the character it encodes.

Returns `None` if `high` and `low` aren't a lead and trail surrogate.
*/
pub fn try_from_utf16_surrogate_pair(high: u32, low: u32) -> Option<char> {
    if !is_lead_surrogate(high) || !(0xDC00..=0xDFFF).contains(&low) {
        return None;
    }

    // Courtesy of: http://www.russellcottrell.com/greek/utilities/SurrogatePairCalculator.htm
    let code = ((high - 0xD800) * 0x400) + (low - 0xDC00) + 0x10000;

    char::try_from(code).ok()
}
