use ethabi::param_type::{ParamType, Reader};

use crate::error::DecodeError;

/// A text signature split into its name and parsed parameter types
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSignature {
    pub name: String,
    pub types: Vec<ParamType>,
}

/// Parses `name(type,type,...)` into ABI parameter types
///
/// The parameter list runs from the first `(` to its matching `)`, so tuple
/// parameters like `(address,uint256)[]` stay intact.
pub fn parse_signature(text_signature: &str) -> Result<ParsedSignature, DecodeError> {
    let signature_error = |reason: &str| DecodeError::Signature {
        signature: text_signature.to_string(),
        reason: reason.to_string(),
    };

    let open = text_signature
        .find('(')
        .ok_or_else(|| signature_error("missing `(`"))?;
    let close = matching_paren(text_signature, open)
        .ok_or_else(|| signature_error("unbalanced parentheses"))?;
    if !text_signature[close + 1..].trim().is_empty() {
        return Err(signature_error("trailing characters after parameter list"));
    }

    let types = split_top_level(&text_signature[open + 1..close])
        .into_iter()
        .map(|type_name| {
            // Reader panics on some malformed names, so only well-formed ones reach it
            validate_type(type_name)
                .map_err(|reason| signature_error(&format!("invalid type `{}`: {}", type_name, reason)))?;
            Reader::read(type_name)
                .map_err(|e| signature_error(&format!("invalid type `{}`: {}", type_name, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedSignature {
        name: text_signature[..open].trim().to_string(),
        types,
    })
}

/// Splits a parameter list on commas that are not nested in `()` or `[]`
///
/// An empty (or all whitespace) list yields no entries.
pub fn split_top_level(list: &str) -> Vec<&str> {
    if list.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list[start..].trim());
    parts
}

/// Checks a type name against the ABI type grammar
///
/// Every accepted type occupies at least one 32 byte word when encoded: empty
/// tuples and zero length fixed arrays are rejected.
pub fn validate_type(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("empty type".to_string());
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b"()[],".contains(&b))
    {
        return Err("unexpected character".to_string());
    }

    if let Some(stripped) = name.strip_suffix(']') {
        let open = stripped
            .rfind('[')
            .ok_or_else(|| "unmatched `]`".to_string())?;
        let size = &stripped[open + 1..];
        if !size.is_empty() {
            if !size.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("invalid array length `{}`", size));
            }
            let len: usize = size
                .parse()
                .map_err(|_| format!("invalid array length `{}`", size))?;
            if len == 0 {
                return Err("zero length array".to_string());
            }
        }
        return validate_type(&stripped[..open]);
    }

    if let Some(inner) = name.strip_prefix('(') {
        let inner = inner
            .strip_suffix(')')
            .ok_or_else(|| "unbalanced parentheses".to_string())?;
        let components = split_top_level(inner);
        if components.is_empty() {
            return Err("empty tuple".to_string());
        }
        return components.into_iter().try_for_each(validate_type);
    }

    validate_elementary(name)
}

fn validate_elementary(name: &str) -> Result<(), String> {
    let valid = match name {
        "address" | "bool" | "string" | "bytes" | "uint" | "int" => true,
        _ => {
            if let Some(bits) = name.strip_prefix("uint").or_else(|| name.strip_prefix("int")) {
                parse_width(bits).map_or(false, |n| n % 8 == 0 && (8..=256).contains(&n))
            } else if let Some(len) = name.strip_prefix("bytes") {
                parse_width(len).map_or(false, |n| (1..=32).contains(&n))
            } else {
                false
            }
        }
    };
    if valid {
        Ok(())
    } else {
        Err("unknown type".to_string())
    }
}

fn parse_width(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn matching_paren(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}
