use prism_domain::shape::FieldSpec;
use prism_kernel::ShapeError;

/// Character cursor over a trimmed shape string. Positions are character offsets.
pub(crate) struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    pub(crate) fn new(input: &str) -> Self {
        Self { chars: input.chars().collect(), pos: 0 }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_alias(&self) -> bool {
        self.chars.get(self.pos..self.pos + 2) == Some(&[':', ':'][..])
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    pub(crate) fn unexpected(&self, ch: char) -> ShapeError {
        ShapeError::parse(format!("Unexpected character \"{ch}\" at position {}", self.pos), Some(self.pos))
    }

    /// `field ("," field)*`, stopping before `)` or at end of input.
    ///
    /// An empty list is accepted here; `field()` yields an empty nested selection.
    pub(crate) fn field_list(&mut self) -> Result<Vec<FieldSpec>, ShapeError> {
        let mut fields = Vec::new();
        let mut expect_field = true;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None | Some(')') => break,
                Some(',') => {
                    if expect_field {
                        return Err(ShapeError::parse(
                            format!("Expected field before comma at position {}", self.pos),
                            Some(self.pos),
                        ));
                    }
                    expect_field = true;
                    self.pos += 1;
                }
                Some(ch) if !expect_field => return Err(self.unexpected(ch)),
                Some(_) => {
                    fields.push(self.field()?);
                    expect_field = false;
                }
            }
        }

        if expect_field && !fields.is_empty() {
            return Err(ShapeError::parse(
                "Expected field after comma but reached end of shape string",
                Some(self.pos),
            ));
        }
        Ok(fields)
    }

    fn field(&mut self) -> Result<FieldSpec, ShapeError> {
        let mut field = if self.peek() == Some('*') {
            self.pos += 1;
            FieldSpec::wildcard()
        } else {
            FieldSpec::named(self.identifier()?)
        };

        self.skip_whitespace();
        if self.at_alias() {
            if field.is_wildcard {
                return Err(ShapeError::parse(
                    "Wildcard fields cannot have aliases (\"*::alias\" is invalid)",
                    Some(self.pos),
                ));
            }
            self.pos += 2;
            self.skip_whitespace();
            field.alias = Some(self.identifier()?);
            self.skip_whitespace();
        }

        if self.peek() == Some('(') {
            self.pos += 1;
            let nested = self.field_list()?;
            self.skip_whitespace();
            if self.peek() != Some(')') {
                return Err(ShapeError::parse(
                    format!("Expected ')' to close nested field list for \"{}\"", field.name),
                    Some(self.pos),
                ));
            }
            self.pos += 1;
            field.nested_fields = Some(nested);
        }

        Ok(field)
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`
    fn identifier(&mut self) -> Result<String, ShapeError> {
        let start = self.pos;
        match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.pos += 1,
            Some(ch) => {
                return Err(ShapeError::parse(
                    format!("Invalid identifier start '{ch}' at position {start}"),
                    Some(start),
                ));
            }
            None => {
                return Err(ShapeError::parse(
                    format!("Unexpected end of shape string at position {start}"),
                    Some(start),
                ));
            }
        }

        while self.peek().is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            self.pos += 1;
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }
}
