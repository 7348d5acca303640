//! Declaration splitting for rule bodies
//!
//! Bodies stay opaque text in [`Rule`](super::Rule); analyzers that need
//! `property: value` pairs walk them with [`declarations`]. Segments end at
//! `;`, `{` or `}` outside strings and parentheses, so `url(a;b)` and nested
//! blocks do not split a value. A final declaration without `;` is kept.

/// One `property: value` pair inside a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Property name, trimmed
    pub property: &'a str,
    /// Raw value text, trimmed
    pub value: &'a str,
    /// Byte offset of the property within the body
    pub offset: usize,
}

impl Declaration<'_> {
    /// Property name with any vendor prefix removed, lowercased.
    #[must_use]
    pub fn unprefixed_property(&self) -> String {
        let lower = self.property.to_ascii_lowercase();
        if lower.starts_with("--") {
            return lower;
        }
        match lower
            .strip_prefix('-')
            .and_then(|rest| rest.split_once('-'))
        {
            Some((vendor, name)) if !vendor.is_empty() => name.to_string(),
            _ => lower,
        }
    }

    /// Whether this declares a custom property (`--name`).
    #[must_use]
    pub fn is_custom_property(&self) -> bool {
        self.property.starts_with("--") && self.property.len() > 2
    }
}

/// Iterate the declarations of a rule body in order.
#[must_use]
pub fn declarations(body: &str) -> Declarations<'_> {
    Declarations { body, pos: 0 }
}

/// Iterator returned by [`declarations`].
#[derive(Debug, Clone)]
pub struct Declarations<'a> {
    body: &'a str,
    pos: usize,
}

impl<'a> Iterator for Declarations<'a> {
    type Item = Declaration<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.body.len() {
            let start = self.pos;
            let end = segment_end(self.body, start);
            self.pos = end + 1;

            if let Some(declaration) = split_declaration(self.body, start, end) {
                return Some(declaration);
            }
        }
        None
    }
}

/// Byte index of the terminator ending the segment at `start`.
fn segment_end(body: &str, start: usize) -> usize {
    let bytes = body.as_bytes();
    let mut quote: Option<u8> = None;
    let mut parens = 0usize;
    let mut i = start;

    while i < bytes.len() {
        let byte = bytes[i];
        match quote {
            Some(_) if byte == b'\\' => i += 1,
            Some(q) if byte == q || byte == b'\n' => quote = None,
            Some(_) => {}
            None => match byte {
                b'\\' => i += 1,
                b'"' | b'\'' => quote = Some(byte),
                b'(' => parens += 1,
                b')' => parens = parens.saturating_sub(1),
                b';' | b'{' | b'}' if parens == 0 => return i,
                _ => {}
            },
        }
        i += 1;
    }
    bytes.len()
}

fn split_declaration(body: &str, start: usize, end: usize) -> Option<Declaration<'_>> {
    let segment = body.get(start..end)?;
    let (property, value) = segment.split_once(':')?;

    let leading = property.len() - property.trim_start().len();
    let property = property.trim();
    let valid = !property.is_empty()
        && property
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if !valid {
        return None;
    }

    Some(Declaration {
        property,
        value: value.trim(),
        offset: start + leading,
    })
}
