//! Path navigation over generic values

use crate::Error;
use crate::Result;
use crate::value::Value;

/// A cursor for navigating a generic value tree
pub struct Cursor<'a> {
    /// Current value
    value: &'a Value,

    /// Path to current value (for error reporting)
    path: Vec<String>,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the given value
    pub fn new(value: &'a Value) -> Self {
        Self {
            value,
            path: Vec::new(),
        }
    }

    /// Get the current value
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Get the current path
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Navigate to a map entry by key
    pub fn key(&self, key: &str) -> Result<Cursor<'a>> {
        match self.value.get(key) {
            Some(child) => {
                let mut path = self.path.clone();
                path.push(key.to_string());
                Ok(Cursor { value: child, path })
            }
            None => Err(Error::value_not_found(self.joined_with(key))),
        }
    }

    /// Navigate to a list element by index
    pub fn index(&self, index: usize) -> Result<Cursor<'a>> {
        match self.value.as_list().and_then(|items| items.get(index)) {
            Some(child) => {
                let mut path = self.path.clone();
                path.push(format!("[{index}]"));
                Ok(Cursor { value: child, path })
            }
            None => Err(Error::value_not_found(format!(
                "{}[{index}]",
                self.path.join("/")
            ))),
        }
    }

    /// Navigate using a path (e.g., "company/addresses[1]/city")
    pub fn navigate(&self, path: &str) -> Result<Cursor<'a>> {
        let mut cursor = Cursor {
            value: self.value,
            path: self.path.clone(),
        };

        for segment in path.split('/') {
            if segment.is_empty() {
                continue;
            }

            // Handle list indexing like "addresses[0]", possibly repeated
            if let Some(open_bracket) = segment.find('[') {
                let key = &segment[..open_bracket];
                if !key.is_empty() {
                    cursor = cursor.key(key)?;
                }

                let mut rest = &segment[open_bracket..];
                while let Some(stripped) = rest.strip_prefix('[') {
                    let close_bracket = stripped.find(']').ok_or_else(|| {
                        Error::invalid_path(path, format!("unclosed bracket in '{segment}'"))
                    })?;
                    let index: usize = stripped[..close_bracket].parse().map_err(|_| {
                        Error::invalid_path(path, format!("invalid index in '{segment}'"))
                    })?;
                    cursor = cursor.index(index)?;
                    rest = &stripped[close_bracket + 1..];
                }

                if !rest.is_empty() {
                    return Err(Error::invalid_path(
                        path,
                        format!("unexpected '{rest}' after index in '{segment}'"),
                    ));
                }
            } else {
                cursor = cursor.key(segment)?;
            }
        }

        Ok(cursor)
    }

    fn joined_with(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}/{key}", self.path.join("/"))
        }
    }
}

impl Value {
    /// Resolve a slash-separated path such as `addresses[0]/city`
    pub fn pointer(&self, path: &str) -> Option<&Value> {
        Cursor::new(self).navigate(path).ok().map(|cursor| cursor.value())
    }
}
